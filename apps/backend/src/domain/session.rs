//! A paired draft between two connections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use ulid::Ulid;
use uuid::Uuid;

use crate::domain::rules::Side;
use crate::domain::snapshot::{snapshot_draft, ParticipantPublic, SessionSnapshot, SessionStatus};
use crate::domain::state::{AppliedTurn, DraftAction, DraftState};
use crate::errors::domain::DraftError;

pub type ConnectionId = Uuid;

pub const MAX_SESSION_NAME_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(Ulid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s.trim())
            .map(SessionId)
            .map_err(|_| DraftError::InvalidSession(s.to_string()))
    }
}

impl TryFrom<String> for SessionId {
    type Error = DraftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub side: Side,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    name: String,
    created_at: OffsetDateTime,
    participants: Vec<Participant>,
    draft: Option<DraftState>,
    /// Bumped on every accepted mutation; never reset.
    version: u64,
    /// Set when the directory drops the session so late holders of the
    /// handle cannot act on it.
    closed: bool,
}

impl Session {
    pub fn new(
        id: SessionId,
        name: &str,
        creator: ConnectionId,
        side: Side,
        created_at: OffsetDateTime,
    ) -> Result<Self, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::Validation("session name must not be empty".into()));
        }
        if name.chars().count() > MAX_SESSION_NAME_LEN {
            return Err(DraftError::Validation(format!(
                "session name must be at most {MAX_SESSION_NAME_LEN} characters"
            )));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            created_at,
            participants: vec![Participant {
                connection_id: creator,
                side,
            }],
            draft: None,
            version: 0,
            closed: false,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn draft(&self) -> Option<&DraftState> {
        self.draft.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn side_of(&self, connection: ConnectionId) -> Option<Side> {
        self.participants
            .iter()
            .find(|p| p.connection_id == connection)
            .map(|p| p.side)
    }

    /// Free side of a pending session.
    pub fn open_side(&self) -> Option<Side> {
        if self.is_active() || self.closed {
            return None;
        }
        Side::ALL
            .into_iter()
            .find(|side| self.participants.iter().all(|p| p.side != *side))
    }

    pub fn is_expired(&self, now: OffsetDateTime, max_age: Duration) -> bool {
        !self.is_active() && now - self.created_at > max_age
    }

    /// Seat the second participant and start the draft.
    pub fn join(&mut self, connection: ConnectionId, side: Side) -> Result<(), DraftError> {
        if self.closed {
            return Err(DraftError::InvalidSession(self.id.to_string()));
        }
        let seated = self.side_of(connection).is_some();
        let full = self.participants.len() >= Side::ALL.len();
        let taken = self.participants.iter().any(|p| p.side == side);
        if seated || full || taken {
            return Err(DraftError::SideUnavailable(side));
        }

        self.participants.push(Participant {
            connection_id: connection,
            side,
        });
        self.draft = Some(DraftState::new());
        self.version += 1;
        Ok(())
    }

    fn acting_side(&self, connection: ConnectionId) -> Result<Side, DraftError> {
        if self.closed {
            return Err(DraftError::InvalidSession(self.id.to_string()));
        }
        self.side_of(connection).ok_or(DraftError::NotParticipant)
    }

    pub fn apply(
        &mut self,
        connection: ConnectionId,
        action: DraftAction,
    ) -> Result<AppliedTurn, DraftError> {
        let side = self.acting_side(connection)?;
        let draft = self.draft.as_mut().ok_or(DraftError::NotStarted)?;
        let applied = draft.apply(side, action)?;
        self.version += 1;
        Ok(applied)
    }

    pub fn reset(&mut self, connection: ConnectionId) -> Result<(), DraftError> {
        self.acting_side(connection)?;
        let draft = self.draft.as_mut().ok_or(DraftError::NotStarted)?;
        draft.reset();
        self.version += 1;
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            name: self.name.clone(),
            status: if self.is_active() {
                SessionStatus::Active
            } else {
                SessionStatus::Pending
            },
            version: self.version,
            created_at: self.created_at,
            participants: self
                .participants
                .iter()
                .map(|p| ParticipantPublic {
                    connection_id: p.connection_id,
                    side: p.side,
                })
                .collect(),
            draft: self.draft.as_ref().map(snapshot_draft),
        }
    }
}
