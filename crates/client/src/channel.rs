//! Fire-and-forget socket channel to the showroom server.
//!
//! The channel relays [`ClientEvent`]s out and surfaces [`ServerEvent`]s on
//! an mpsc receiver. Delivery is at-most-once: emitting on a disconnected
//! channel logs a warning and drops the event - nothing is queued, retried,
//! or replayed after a reconnect.
//!
//! Reconnection uses a fixed attempt budget with a fixed delay between
//! attempts. Once the budget is spent the channel stays disconnected for the
//! rest of its life; the next page load starts a fresh one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, warn};

use vitrine_core::{ClientEvent, ServerEvent};

/// Reconnect attempts after a drop before giving up for good.
const RECONNECT_ATTEMPTS: u32 = 5;

/// Fixed delay between attempts; deliberately not exponential.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

enum Command {
    Emit(ClientEvent),
    Shutdown,
}

/// Handle to the background socket driver.
///
/// Cheap to clone; all clones share one connection.
#[derive(Clone)]
pub struct SocketChannel {
    cmd_tx: mpsc::UnboundedSender<Command>,
    connected: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
}

impl SocketChannel {
    /// Start a channel towards `url` (e.g. `ws://localhost:3001/ws`).
    ///
    /// Returns the handle plus the receiver for server-pushed events. The
    /// driver task is spawned onto the ambient tokio runtime; the call itself
    /// does not wait for the connection to be established.
    #[must_use]
    pub fn connect(url: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<ServerEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let connected = Arc::new(AtomicBool::new(false));
        let closed = Arc::new(AtomicBool::new(false));

        tokio::spawn(drive(
            url.into(),
            cmd_rx,
            event_tx,
            Arc::clone(&connected),
            Arc::clone(&closed),
        ));

        (
            Self {
                cmd_tx,
                connected,
                closed,
            },
            event_rx,
        )
    }

    /// Whether the underlying socket is currently established.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Emit an event, fire-and-forget.
    ///
    /// On a disconnected or closed channel this is a silent no-op apart from
    /// a log line - the event is dropped, never queued.
    pub fn emit(&self, event: ClientEvent) {
        if self.closed.load(Ordering::SeqCst) || !self.connected.load(Ordering::SeqCst) {
            warn!("socket not connected, dropping outgoing event");
            return;
        }
        if self.cmd_tx.send(Command::Emit(event)).is_err() {
            warn!("socket driver stopped, dropping outgoing event");
        }
    }

    /// Close the channel permanently.
    ///
    /// Events emitted afterwards are dropped without error.
    pub fn disconnect(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
        let _ = self.cmd_tx.send(Command::Shutdown);
    }
}

/// Background task owning the websocket across reconnects.
async fn drive(
    url: String,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
    connected: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
) {
    let mut attempts_left = RECONNECT_ATTEMPTS;
    loop {
        if closed.load(Ordering::SeqCst) {
            return;
        }
        match connect_async(url.as_str()).await {
            Ok((ws, _response)) => {
                debug!(url = %url, "socket connected");
                connected.store(true, Ordering::SeqCst);
                attempts_left = RECONNECT_ATTEMPTS;
                let shutdown = run_connection(ws, &mut cmd_rx, &event_tx).await;
                connected.store(false, Ordering::SeqCst);
                if shutdown {
                    return;
                }
                warn!("socket disconnected");
            }
            Err(e) => warn!(url = %url, error = %e, "socket connect failed"),
        }
        if attempts_left == 0 {
            warn!("reconnect budget exhausted, channel stays disconnected");
            return;
        }
        attempts_left -= 1;
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

/// Pump one established connection. Returns `true` when shutdown was
/// requested (as opposed to the connection dropping).
async fn run_connection(
    ws: WsStream,
    cmd_rx: &mut mpsc::UnboundedReceiver<Command>,
    event_tx: &mpsc::UnboundedSender<ServerEvent>,
) -> bool {
    let (mut sink, mut stream) = ws.split();
    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(Command::Emit(event)) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if let Err(e) = sink.send(Message::text(json)).await {
                            warn!(error = %e, "socket send failed, dropping event");
                            return false;
                        }
                    }
                    Err(e) => warn!(error = %e, "failed to encode outgoing event"),
                },
                Some(Command::Shutdown) | None => {
                    let _ = sink.send(Message::Close(None)).await;
                    return true;
                }
            },
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => {
                            // Receiver may have been dropped by the UI; fine.
                            let _ = event_tx.send(event);
                        }
                        Err(e) => debug!(error = %e, "ignoring undecodable server frame"),
                    }
                }
                Some(Ok(Message::Close(_))) | None => return false,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "socket read error");
                    return false;
                }
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vitrine_core::{ProductId, SessionId};

    #[tokio::test]
    async fn test_emit_after_disconnect_is_silent_noop() {
        // Port 9 (discard) is not listening; the channel never establishes.
        let (channel, _events) = SocketChannel::connect("ws://127.0.0.1:9");
        channel.disconnect();
        channel.emit(ClientEvent::InventoryCheck {
            product_id: ProductId::new("1"),
        });
        assert!(!channel.is_connected());
    }

    #[tokio::test]
    async fn test_emit_while_never_connected_is_silent_noop() {
        let (channel, _events) = SocketChannel::connect("ws://127.0.0.1:9");
        channel.emit(ClientEvent::ChatMessage {
            session_id: SessionId::new("s1"),
            message: "hello?".to_owned(),
        });
        assert!(!channel.is_connected());
    }

    #[tokio::test]
    async fn test_emit_and_receive_round_trip() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

            let msg = ws.next().await.unwrap().unwrap();
            let frame: serde_json::Value = serde_json::from_str(msg.to_text().unwrap()).unwrap();
            assert_eq!(frame["type"], "join_session");

            let event = ServerEvent::FlashSaleEnded {
                product_id: ProductId::new("1"),
            };
            ws.send(Message::text(serde_json::to_string(&event).unwrap()))
                .await
                .unwrap();
        });

        let (channel, mut events) = SocketChannel::connect(format!("ws://{addr}"));

        // Connection establishes asynchronously.
        for _ in 0..100 {
            if channel.is_connected() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(channel.is_connected());

        channel.emit(ClientEvent::JoinSession {
            session_id: SessionId::new("s1"),
            user_id: None,
        });

        let received = tokio::time::timeout(Duration::from_secs(2), events.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(received, ServerEvent::FlashSaleEnded { .. }));

        server.await.unwrap();
        channel.disconnect();
    }
}
