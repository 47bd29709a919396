//! Domain layer: pure draft logic types and helpers.

pub mod catalog;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod state;

#[cfg(test)]
pub(crate) mod test_fixtures;
#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use catalog::{Catalog, Item};
pub use rules::{ActionKind, Role, Side, TurnEntry, DRAFT_SEQUENCE};
pub use session::{ConnectionId, Session, SessionId};
pub use snapshot::{OpenSession, SessionSnapshot};
pub use state::{AppliedTurn, DraftAction, DraftPhase, DraftState};
