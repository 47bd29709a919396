use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{OpenSession, SessionId, SessionSnapshot, Side};
use crate::errors::ErrorCode as DomainCode;

pub const PROTOCOL_VERSION: i32 = 1;

/// Frames a client may send. Ids, sides and roles arrive as raw strings so
/// a bad value is rejected for that one request instead of closing the socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    CreateSession {
        name: String,
        side: String,
    },
    JoinSession {
        session_id: String,
        side: String,
    },
    Ban {
        session_id: String,
        item_id: String,
    },
    Pick {
        session_id: String,
        item_id: String,
        #[serde(default)]
        role: Option<String>,
    },
    Reset {
        session_id: String,
    },
    GetSnapshot {
        session_id: String,
    },
    ListSessions,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        connection_id: Uuid,
    },

    SessionJoined {
        session_id: SessionId,
        side: Side,
    },

    /// Creator is seated and waiting for an opponent.
    Waiting {
        session_id: SessionId,
    },

    SessionState {
        version: u64,
        session: SessionSnapshot,
    },

    OpenSessions {
        sessions: Vec<OpenSession>,
    },

    SessionClosed {
        session_id: SessionId,
    },

    /// A request was refused; the connection stays open.
    Rejected {
        code: DomainCode,
        message: String,
    },

    /// Protocol violation; the server closes the socket after sending it.
    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadProtocol,
    BadRequest,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadProtocol => "bad_protocol",
            ErrorCode::BadRequest => "bad_request",
        }
    }
}
