use ulid::Ulid;

/// `{prefix}-{ulid}`, unique per call.
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// A session name that fits the 64 character limit.
pub fn unique_session_name(prefix: &str) -> String {
    let mut name = unique_str(prefix);
    name.truncate(64);
    name
}
