pub mod lobby;
pub mod publisher;
pub mod sessions;

pub use lobby::spawn_lobby_sweeper;
pub use publisher::{NoopPublisher, SnapshotPublisher};
pub use sessions::SessionDirectory;
