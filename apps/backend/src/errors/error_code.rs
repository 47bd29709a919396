//! Error codes for the Draftroom API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP problem details and websocket `rejected` frames.

use core::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Session lookup and membership
    /// Session id unknown or already closed
    SessionNotFound,
    /// Malformed session id
    InvalidSessionId,
    /// Requested side already taken or session full
    SideUnavailable,
    /// Acting connection has no seat in the session
    NotAParticipant,
    /// Session still waiting for its second participant
    SessionNotStarted,

    // Draft actions
    /// Wrong side or wrong action kind for the current turn
    OutOfTurn,
    /// Item already banned or picked
    ItemUnavailable,
    /// Item id not present in the catalog
    ItemNotFound,
    /// Role slot already filled
    SlotOccupied,
    /// Missing or unknown role
    InvalidRole,
    /// Unknown side
    InvalidSide,

    // Request validation
    ValidationError,
    BadRequest,
    /// Malformed request header (e.g. `If-None-Match`)
    InvalidHeader,

    // System
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::InvalidSessionId => "INVALID_SESSION_ID",
            Self::SideUnavailable => "SIDE_UNAVAILABLE",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::SessionNotStarted => "SESSION_NOT_STARTED",

            Self::OutOfTurn => "OUT_OF_TURN",
            Self::ItemUnavailable => "ITEM_UNAVAILABLE",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::SlotOccupied => "SLOT_OCCUPIED",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidSide => "INVALID_SIDE",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidHeader => "INVALID_HEADER",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
