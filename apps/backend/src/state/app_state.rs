use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::Catalog;
use crate::services::publisher::SnapshotPublisher;
use crate::services::sessions::SessionDirectory;
use crate::ws::hub::WsRegistry;

/// Shared state handed to every handler and websocket actor.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<SessionDirectory>,
    pub catalog: Arc<Catalog>,
    pub registry: Arc<WsRegistry>,
    pub config: ServerConfig,
}

impl AppState {
    /// Wire a directory that publishes through a fresh websocket registry.
    pub fn new(catalog: Catalog, config: ServerConfig) -> Self {
        let catalog = Arc::new(catalog);
        let registry = Arc::new(WsRegistry::new());
        let publisher: Arc<dyn SnapshotPublisher> = registry.clone();
        let directory = Arc::new(SessionDirectory::new(catalog.clone(), publisher));
        Self {
            directory,
            catalog,
            registry,
            config,
        }
    }

    pub fn websocket_registry(&self) -> Arc<WsRegistry> {
        self.registry.clone()
    }
}
