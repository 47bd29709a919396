use actix_web::web;

pub mod catalog;
pub mod health;
pub mod realtime;
pub mod sessions;

/// Register every route. Shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Catalog: /api/catalog
    cfg.service(web::scope("/api/catalog").configure(catalog::configure_routes));

    // Lobby and snapshots: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));

    // Websocket upgrade: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
