//! WebSocket endpoint: the server side of the socket channel.
//!
//! Each connection gets an outbound mpsc queue pumped by a send task while
//! the receive loop dispatches decoded [`ClientEvent`]s. Everything is
//! fire-and-forget: undecodable frames are logged and skipped, sends to dead
//! peers are dropped, and events from unjoined connections that require a
//! session are ignored - mirroring the at-most-once channel contract.

mod handler;

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use vitrine_core::{ClientEvent, ServerEvent};

use crate::registry::ConnId;
use crate::state::AppState;

/// WebSocket upgrade handler for `GET /ws`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one connection until either side drops it.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = ConnId::generate();
    info!(conn_id = %conn_id, "socket connected");

    let (mut sink, mut stream) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<ServerEvent>();

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = outbound_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "failed to encode server event"),
            }
        }
    });

    let recv_state = state.clone();
    let recv_outbound = outbound_tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => {
                        handler::handle_event(&recv_state, conn_id, &recv_outbound, event).await;
                    }
                    Err(e) => {
                        warn!(conn_id = %conn_id, error = %e, "ignoring undecodable client frame");
                    }
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // The connection is gone; a future reconnect is a brand-new unjoined
    // entity, so drop the registry entry and notify the room.
    if let Some(info) = state.registry().disconnect(conn_id) {
        state.registry().emit_to_session(
            &info.session_id,
            Some(conn_id),
            &ServerEvent::UserLeft {
                session_id: info.session_id.clone(),
                user_id: info.user_id,
                timestamp: chrono::Utc::now(),
            },
        );
    }
    debug!(conn_id = %conn_id, "socket disconnected");
}
