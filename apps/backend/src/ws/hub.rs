//! In-process fan-out of session snapshots to websocket connections.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{ConnectionId, SessionId, SessionSnapshot};
use crate::services::publisher::SnapshotPublisher;

#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub enum HubEvent {
    /// A new version of a session the connection is attached to.
    SessionState(Arc<SessionSnapshot>),
    /// The session was dropped from the directory.
    SessionClosed { session_id: SessionId },
}

/// Which connections watch which sessions.
///
/// The two maps are never locked at the same time.
#[derive(Default)]
pub struct WsRegistry {
    subscribers: DashMap<SessionId, HashMap<ConnectionId, Recipient<HubEvent>>>,
    connections: DashMap<ConnectionId, HashSet<SessionId>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_connection(&self, conn_id: ConnectionId) {
        self.connections.entry(conn_id).or_default();
    }

    /// Route events for `session_id` to `recipient`. Idempotent.
    pub fn attach(
        &self,
        session_id: SessionId,
        conn_id: ConnectionId,
        recipient: Recipient<HubEvent>,
    ) {
        self.subscribers
            .entry(session_id)
            .or_default()
            .insert(conn_id, recipient);
        self.connections
            .entry(conn_id)
            .or_default()
            .insert(session_id);
    }

    pub fn detach(&self, session_id: SessionId, conn_id: ConnectionId) {
        self.remove_subscriber(session_id, conn_id);
        if let Some(mut sessions) = self.connections.get_mut(&conn_id) {
            sessions.remove(&session_id);
        }
    }

    /// Forget a connection and every session it was attached to.
    pub fn unregister_connection(&self, conn_id: ConnectionId) {
        let Some((_, sessions)) = self.connections.remove(&conn_id) else {
            return;
        };
        for session_id in sessions {
            self.remove_subscriber(session_id, conn_id);
        }
    }

    pub fn is_attached(&self, session_id: SessionId, conn_id: ConnectionId) -> bool {
        self.subscribers
            .get(&session_id)
            .is_some_and(|subs| subs.contains_key(&conn_id))
    }

    pub fn active_connections_count(&self) -> usize {
        self.connections.len()
    }

    pub fn subscriber_count(&self, session_id: SessionId) -> usize {
        self.subscribers
            .get(&session_id)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    fn remove_subscriber(&self, session_id: SessionId, conn_id: ConnectionId) {
        self.subscribers.remove_if_mut(&session_id, |_, subs| {
            subs.remove(&conn_id);
            subs.is_empty()
        });
    }

    fn broadcast(&self, session_id: SessionId, event: HubEvent) -> usize {
        let Some(subs) = self.subscribers.get(&session_id) else {
            return 0;
        };
        for recipient in subs.values() {
            recipient.do_send(event.clone());
        }
        subs.len()
    }
}

impl SnapshotPublisher for WsRegistry {
    fn publish(&self, snapshot: &SessionSnapshot) {
        let session_id = snapshot.session_id;
        let version = snapshot.version;
        let delivered = self.broadcast(
            session_id,
            HubEvent::SessionState(Arc::new(snapshot.clone())),
        );
        debug!(session_id = %session_id, version, delivered, "Snapshot fanned out");
    }

    fn session_closed(&self, session_id: SessionId) {
        self.broadcast(session_id, HubEvent::SessionClosed { session_id });
        if let Some((_, subs)) = self.subscribers.remove(&session_id) {
            for conn_id in subs.keys() {
                if let Some(mut sessions) = self.connections.get_mut(conn_id) {
                    sessions.remove(&session_id);
                }
            }
        }
    }
}
