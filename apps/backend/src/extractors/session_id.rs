use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::SessionId;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Session id taken from the `{session_id}` path segment.
///
/// Only checks the format; whether the session exists is the directory's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdParam(pub SessionId);

impl FromRequest for SessionIdParam {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req))
    }
}

fn parse(req: &HttpRequest) -> Result<SessionIdParam, AppError> {
    let raw = req.match_info().get("session_id").ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidSessionId, "Missing session_id parameter")
    })?;

    raw.parse::<SessionId>().map(SessionIdParam).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidSessionId,
            format!("Invalid session id: {raw}"),
        )
    })
}
