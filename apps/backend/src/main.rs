use actix_web::{web, App, HttpServer};
use draftroom::config::ServerConfig;
use draftroom::domain::Catalog;
use draftroom::middleware::cors::cors_middleware;
use draftroom::middleware::request_trace::RequestTrace;
use draftroom::middleware::structured_logger::StructuredLogger;
use draftroom::middleware::trace_span::TraceSpan;
use draftroom::services::lobby::spawn_lobby_sweeper;
use draftroom::state::app_state::AppState;
use draftroom::{routes, telemetry};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let catalog = match Catalog::load(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, path = %config.catalog_path.display(), "Failed to load catalog");
            std::process::exit(1);
        }
    };
    info!(items = catalog.len(), path = %config.catalog_path.display(), "Catalog loaded");

    let app_state = AppState::new(catalog, config.clone());
    let _sweeper = spawn_lobby_sweeper(
        app_state.directory.clone(),
        config.lobby_sweep_every,
        config.lobby_max_age,
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    info!(host = %config.host, port = config.port, "Starting Draftroom backend");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
