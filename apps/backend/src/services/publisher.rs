//! Hand-off point between the session directory and whatever fans
//! snapshots out to connections.

use crate::domain::{SessionId, SessionSnapshot};

/// Receives every accepted mutation, in admission order per session.
///
/// Called while the session lock is held, so implementations must not block
/// and must not call back into the directory.
pub trait SnapshotPublisher: Send + Sync {
    fn publish(&self, snapshot: &SessionSnapshot);

    /// The session was dropped from the directory (expired or abandoned).
    fn session_closed(&self, _session_id: SessionId) {}
}

/// Publisher that drops everything; useful for tooling and tests that only
/// look at return values.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

impl SnapshotPublisher for NoopPublisher {
    fn publish(&self, _snapshot: &SessionSnapshot) {}
}
