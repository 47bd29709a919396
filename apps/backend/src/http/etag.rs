//! ETag helpers for session snapshots.
//!
//! A snapshot's version only moves forward, so `"session-{id}-v{version}"`
//! identifies its content exactly and lets pollers revalidate cheaply.

use crate::domain::SessionId;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Format: `"session-{id}-v{version}"`, quotes included.
pub fn session_etag(id: SessionId, version: u64) -> String {
    format!(r#""session-{id}-v{version}""#)
}

/// Parse a session ETag back into its id and version.
pub fn parse_session_etag(s: &str) -> Result<(SessionId, u64), AppError> {
    let raw = s.trim();
    let raw = raw.strip_prefix("W/").unwrap_or(raw).trim_matches('"');

    let invalid = || {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: expected \"session-{{id}}-v{{version}}\", got: \"{raw}\""),
        )
    };

    let rest = raw.strip_prefix("session-").ok_or_else(invalid)?;
    let (id, version) = rest.rsplit_once("-v").ok_or_else(invalid)?;
    let id = id.parse::<SessionId>().map_err(|_| invalid())?;
    let version = version.parse::<u64>().map_err(|_| invalid())?;
    Ok((id, version))
}

/// Whether an `If-None-Match` header value matches `current` (weak comparison).
pub fn if_none_match_hits(header: &str, current: &str) -> bool {
    let strip = |tag: &str| {
        let tag = tag.trim();
        tag.strip_prefix("W/").unwrap_or(tag).to_string()
    };
    let current = strip(current);
    header
        .split(',')
        .map(strip)
        .any(|candidate| candidate == "*" || candidate == current)
}
