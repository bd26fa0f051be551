//! Server-side session/connection registry.
//!
//! Tracks which socket connections belong to which logical shopping session
//! and fans server events out to rooms. The registry is an explicitly owned
//! object constructed once and injected through `AppState` - no module-level
//! state.
//!
//! Connection lifecycle: unjoined -> joined(session) -> disconnected. An
//! unjoined connection has no registry entry at all; a socket that reconnects
//! is a brand-new unjoined entity until the client re-sends `join_session`.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use uuid::Uuid;

use vitrine_core::{ServerEvent, SessionId, UserId};

/// Session ID of the support-agent room.
pub const SUPPORT_ROOM: &str = "support";

/// Connections idle longer than this are reclaimed by the sweep.
pub const INACTIVE_THRESHOLD: Duration = Duration::from_secs(30 * 60);

/// How often the periodic sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Opaque connection identifier, unique per socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(Uuid);

impl ConnId {
    /// Generate a fresh connection ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the registry knows about a joined connection.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub session_id: SessionId,
    pub user_id: Option<UserId>,
    pub joined_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

struct ConnectedClient {
    info: ClientInfo,
    sender: mpsc::UnboundedSender<ServerEvent>,
}

#[derive(Default)]
struct RegistryInner {
    clients: HashMap<ConnId, ConnectedClient>,
    rooms: HashMap<SessionId, HashSet<ConnId>>,
}

/// Registry of joined socket connections and their session rooms.
#[derive(Default)]
pub struct SessionRegistry {
    inner: Mutex<RegistryInner>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a connection to a session, replacing any previous binding.
    pub fn join(
        &self,
        conn_id: ConnId,
        session_id: SessionId,
        user_id: Option<UserId>,
        sender: mpsc::UnboundedSender<ServerEvent>,
    ) {
        let now = Utc::now();
        let mut inner = self.inner.lock();

        // A re-join moves the connection out of its previous room.
        if let Some(existing) = inner.clients.remove(&conn_id) {
            remove_from_room(&mut inner.rooms, &existing.info.session_id, conn_id);
        }

        inner
            .rooms
            .entry(session_id.clone())
            .or_default()
            .insert(conn_id);
        inner.clients.insert(
            conn_id,
            ConnectedClient {
                info: ClientInfo {
                    session_id,
                    user_id,
                    joined_at: now,
                    last_activity: now,
                },
                sender,
            },
        );
    }

    /// Look up a joined connection. `None` means unjoined.
    #[must_use]
    pub fn get(&self, conn_id: ConnId) -> Option<ClientInfo> {
        self.inner.lock().clients.get(&conn_id).map(|c| c.info.clone())
    }

    /// Record activity on a connection.
    pub fn touch(&self, conn_id: ConnId) {
        if let Some(client) = self.inner.lock().clients.get_mut(&conn_id) {
            client.info.last_activity = Utc::now();
        }
    }

    /// Send an event to every member of a session room, optionally excluding
    /// one connection (typically the sender of the triggering event).
    pub fn emit_to_session(
        &self,
        session_id: &SessionId,
        except: Option<ConnId>,
        event: &ServerEvent,
    ) {
        let inner = self.inner.lock();
        let Some(members) = inner.rooms.get(session_id) else {
            return;
        };
        for conn_id in members {
            if Some(*conn_id) == except {
                continue;
            }
            if let Some(client) = inner.clients.get(conn_id) {
                deliver(&client.sender, *conn_id, event);
            }
        }
    }

    /// Send an event to every joined connection, optionally excluding one.
    pub fn broadcast(&self, except: Option<ConnId>, event: &ServerEvent) {
        let inner = self.inner.lock();
        for (conn_id, client) in &inner.clients {
            if Some(*conn_id) == except {
                continue;
            }
            deliver(&client.sender, *conn_id, event);
        }
    }

    /// Remove a connection, returning its info for departure notifications.
    pub fn disconnect(&self, conn_id: ConnId) -> Option<ClientInfo> {
        let mut inner = self.inner.lock();
        let client = inner.clients.remove(&conn_id)?;
        remove_from_room(&mut inner.rooms, &client.info.session_id, conn_id);
        Some(client.info)
    }

    /// Remove entries inactive longer than `threshold`. Returns how many were
    /// reclaimed. This is the only resource-reclamation mechanism.
    pub fn sweep(&self, threshold: Duration) -> usize {
        let now = Utc::now();
        let mut inner = self.inner.lock();
        let stale: Vec<ConnId> = inner
            .clients
            .iter()
            .filter(|(_, client)| {
                (now - client.info.last_activity)
                    .to_std()
                    .is_ok_and(|idle| idle > threshold)
            })
            .map(|(conn_id, _)| *conn_id)
            .collect();

        for conn_id in &stale {
            if let Some(client) = inner.clients.remove(conn_id) {
                tracing::info!(conn_id = %conn_id, session_id = %client.info.session_id, "cleaning up inactive connection");
                remove_from_room(&mut inner.rooms, &client.info.session_id, *conn_id);
            }
        }
        stale.len()
    }

    /// Number of joined connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.inner.lock().clients.len()
    }

    /// Number of session rooms with at least one member.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.inner.lock().rooms.len()
    }
}

/// Fire-and-forget delivery; a closed receiver just drops the event.
fn deliver(sender: &mpsc::UnboundedSender<ServerEvent>, conn_id: ConnId, event: &ServerEvent) {
    if sender.send(event.clone()).is_err() {
        tracing::debug!(conn_id = %conn_id, "dropping event for closed connection");
    }
}

fn remove_from_room(
    rooms: &mut HashMap<SessionId, HashSet<ConnId>>,
    session_id: &SessionId,
    conn_id: ConnId,
) {
    if let Some(members) = rooms.get_mut(session_id) {
        members.remove(&conn_id);
        if members.is_empty() {
            rooms.remove(session_id);
        }
    }
}
