//! Domain-level error type for draft sessions.
//!
//! Every variant is a rejection the caller can recover from by re-reading
//! the latest snapshot; none of them tears down a session. HTTP handlers
//! convert through `From<DraftError> for AppError`, the websocket layer
//! reports them as `rejected` frames.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::rules::{Role, Side, TurnEntry};
use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// No session with this id (or it was already closed).
    InvalidSession(String),
    /// Requested side is taken, the session is full, or the caller already sits in it.
    SideUnavailable(Side),
    /// Side string did not name a side.
    SideInvalid(String),
    /// Wrong side or wrong action kind for the current turn; `expected` is
    /// `None` once the draft is complete.
    OutOfTurn { expected: Option<TurnEntry> },
    /// Item already banned or picked in this session.
    ItemUnavailable(String),
    /// Item id is not in the catalog.
    UnknownItem(String),
    /// The acting side already filled this role.
    SlotOccupied(Role),
    /// Pick without a role, or with an unknown one.
    RoleInvalid(String),
    /// Acting connection is not a participant of the session.
    NotParticipant,
    /// Session is still waiting for its second participant.
    NotStarted,
    Validation(String),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DraftError::InvalidSession(id) => write!(f, "session {id} not found"),
            DraftError::SideUnavailable(side) => write!(f, "side {side} is not available"),
            DraftError::SideInvalid(s) => write!(f, "invalid side: {s}"),
            DraftError::OutOfTurn {
                expected: Some(entry),
            } => write!(f, "out of turn: expecting {} {}", entry.side, entry.kind),
            DraftError::OutOfTurn { expected: None } => write!(f, "out of turn: draft is complete"),
            DraftError::ItemUnavailable(id) => write!(f, "item {id} was already banned or picked"),
            DraftError::UnknownItem(id) => write!(f, "item {id} is not in the catalog"),
            DraftError::SlotOccupied(role) => write!(f, "role {role} is already filled"),
            DraftError::RoleInvalid(s) => write!(f, "invalid role: {s}"),
            DraftError::NotParticipant => write!(f, "connection is not a participant of this session"),
            DraftError::NotStarted => write!(f, "session is waiting for a second participant"),
            DraftError::Validation(d) => write!(f, "validation error: {d}"),
        }
    }
}

impl Error for DraftError {}

impl DraftError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DraftError::InvalidSession(_) => ErrorCode::SessionNotFound,
            DraftError::SideUnavailable(_) => ErrorCode::SideUnavailable,
            DraftError::SideInvalid(_) => ErrorCode::InvalidSide,
            DraftError::OutOfTurn { .. } => ErrorCode::OutOfTurn,
            DraftError::ItemUnavailable(_) => ErrorCode::ItemUnavailable,
            DraftError::UnknownItem(_) => ErrorCode::ItemNotFound,
            DraftError::SlotOccupied(_) => ErrorCode::SlotOccupied,
            DraftError::RoleInvalid(_) => ErrorCode::InvalidRole,
            DraftError::NotParticipant => ErrorCode::NotAParticipant,
            DraftError::NotStarted => ErrorCode::SessionNotStarted,
            DraftError::Validation(_) => ErrorCode::ValidationError,
        }
    }
}
