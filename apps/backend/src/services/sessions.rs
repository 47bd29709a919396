//! Session directory: owns every live session and serializes access to each.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::domain::state::AppliedTurn;
use crate::domain::{
    Catalog, ConnectionId, DraftAction, Item, OpenSession, Role, Session, SessionId,
    SessionSnapshot, Side,
};
use crate::errors::domain::DraftError;
use crate::services::publisher::SnapshotPublisher;

type SessionHandle = Arc<Mutex<Session>>;

/// Registry of sessions keyed by id.
///
/// Lock order is map shard, then session. Handles are cloned out of the map
/// before the session lock is taken, so only removal ever holds both.
pub struct SessionDirectory {
    sessions: DashMap<SessionId, SessionHandle>,
    catalog: Arc<Catalog>,
    publisher: Arc<dyn SnapshotPublisher>,
}

impl SessionDirectory {
    pub fn new(catalog: Arc<Catalog>, publisher: Arc<dyn SnapshotPublisher>) -> Self {
        Self {
            sessions: DashMap::new(),
            catalog,
            publisher,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn create(
        &self,
        connection: ConnectionId,
        name: &str,
        side: Side,
    ) -> Result<SessionSnapshot, DraftError> {
        self.create_at(connection, name, side, OffsetDateTime::now_utc())
    }

    /// `create` with an explicit creation time, for expiry tests.
    pub fn create_at(
        &self,
        connection: ConnectionId,
        name: &str,
        side: Side,
        now: OffsetDateTime,
    ) -> Result<SessionSnapshot, DraftError> {
        let id = SessionId::generate();
        let session = Session::new(id, name, connection, side, now)?;
        let snapshot = session.snapshot();
        self.sessions.insert(id, Arc::new(Mutex::new(session)));

        info!(
            session_id = %id,
            connection_id = %connection,
            side = %side,
            name = %snapshot.name,
            "Session created"
        );
        Ok(snapshot)
    }

    pub fn join(
        &self,
        connection: ConnectionId,
        session_id: SessionId,
        side: Side,
    ) -> Result<SessionSnapshot, DraftError> {
        let handle = self.handle(session_id)?;
        let mut session = handle.lock();

        if let Err(err) = session.join(connection, side) {
            debug!(
                session_id = %session_id,
                connection_id = %connection,
                side = %side,
                error = %err,
                "Join rejected"
            );
            return Err(err);
        }

        info!(
            session_id = %session_id,
            connection_id = %connection,
            side = %side,
            "Session active"
        );
        Ok(self.publish_locked(&session))
    }

    /// Copy of the session as it is right now.
    pub fn get(&self, session_id: SessionId) -> Result<Session, DraftError> {
        let handle = self.handle(session_id)?;
        let session = handle.lock();
        Ok(session.clone())
    }

    pub fn snapshot(&self, session_id: SessionId) -> Result<SessionSnapshot, DraftError> {
        let handle = self.handle(session_id)?;
        let session = handle.lock();
        Ok(session.snapshot())
    }

    pub fn ban(
        &self,
        connection: ConnectionId,
        session_id: SessionId,
        item_id: &str,
    ) -> Result<SessionSnapshot, DraftError> {
        let handle = self.handle(session_id)?;
        let item = self.resolve_item(item_id)?;
        self.apply(&handle, connection, DraftAction::Ban { item })
    }

    pub fn pick(
        &self,
        connection: ConnectionId,
        session_id: SessionId,
        item_id: &str,
        role: Role,
    ) -> Result<SessionSnapshot, DraftError> {
        let handle = self.handle(session_id)?;
        let item = self.resolve_item(item_id)?;
        self.apply(&handle, connection, DraftAction::Pick { item, role })
    }

    pub fn reset(
        &self,
        connection: ConnectionId,
        session_id: SessionId,
    ) -> Result<SessionSnapshot, DraftError> {
        let handle = self.handle(session_id)?;
        let mut session = handle.lock();

        if let Err(err) = session.reset(connection) {
            debug!(
                session_id = %session_id,
                connection_id = %connection,
                error = %err,
                "Reset rejected"
            );
            return Err(err);
        }

        info!(
            session_id = %session_id,
            connection_id = %connection,
            version = session.version(),
            "Draft reset"
        );
        Ok(self.publish_locked(&session))
    }

    /// Pending sessions with their free side, oldest first.
    pub fn list_open(&self) -> Vec<OpenSession> {
        let handles: Vec<SessionHandle> = self
            .sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut open: Vec<OpenSession> = handles
            .iter()
            .filter_map(|handle| {
                let session = handle.lock();
                session.open_side().map(|open_side| OpenSession {
                    session_id: session.id(),
                    name: session.name().to_string(),
                    open_side,
                    created_at: session.created_at(),
                })
            })
            .collect();

        open.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        open
    }

    /// Drop pending sessions older than `max_age`. Active sessions stay.
    pub fn remove_expired(&self, now: OffsetDateTime, max_age: Duration) -> Vec<SessionId> {
        let removed = self.remove_where(|session| session.is_expired(now, max_age));
        if !removed.is_empty() {
            info!(count = removed.len(), "Expired pending sessions removed");
        }
        removed
    }

    /// Drop the pending sessions `connection` is waiting in.
    pub fn leave(&self, connection: ConnectionId) -> Vec<SessionId> {
        let removed = self.remove_where(|session| {
            !session.is_active() && session.side_of(connection).is_some()
        });
        for id in &removed {
            info!(
                session_id = %id,
                connection_id = %connection,
                "Pending session abandoned"
            );
        }
        removed
    }

    fn handle(&self, session_id: SessionId) -> Result<SessionHandle, DraftError> {
        self.sessions
            .get(&session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DraftError::InvalidSession(session_id.to_string()))
    }

    fn resolve_item(&self, item_id: &str) -> Result<Arc<Item>, DraftError> {
        self.catalog
            .get(item_id)
            .cloned()
            .ok_or_else(|| DraftError::UnknownItem(item_id.to_string()))
    }

    fn apply(
        &self,
        handle: &SessionHandle,
        connection: ConnectionId,
        action: DraftAction,
    ) -> Result<SessionSnapshot, DraftError> {
        let mut session = handle.lock();
        let session_id = session.id();
        let kind = action.kind();

        let applied: AppliedTurn = match session.apply(connection, action) {
            Ok(applied) => applied,
            Err(err) => {
                debug!(
                    session_id = %session_id,
                    connection_id = %connection,
                    action = %kind,
                    cursor = session.draft().map(|d| d.turn_cursor()),
                    error = %err,
                    "Action rejected"
                );
                return Err(err);
            }
        };

        info!(
            session_id = %session_id,
            side = %applied.entry.side,
            action = %applied.entry.kind,
            cursor = applied.cursor,
            item_id = %applied.item_id,
            role = applied.role.map(Role::as_str),
            delta = applied.delta,
            "Action accepted"
        );
        Ok(self.publish_locked(&session))
    }

    /// Snapshot and publish while the caller still holds the session lock.
    fn publish_locked(&self, session: &Session) -> SessionSnapshot {
        let snapshot = session.snapshot();
        self.publisher.publish(&snapshot);
        snapshot
    }

    fn remove_where(&self, mut predicate: impl FnMut(&Session) -> bool) -> Vec<SessionId> {
        let candidates: Vec<SessionId> = self.sessions.iter().map(|entry| *entry.key()).collect();

        let mut removed = Vec::new();
        for id in candidates {
            let gone = self.sessions.remove_if(&id, |_, handle| {
                let mut session = handle.lock();
                if predicate(&*session) {
                    session.close();
                    true
                } else {
                    false
                }
            });
            if gone.is_some() {
                self.publisher.session_closed(id);
                removed.push(id);
            }
        }
        removed
    }
}
