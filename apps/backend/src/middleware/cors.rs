use actix_cors::Cors;
use actix_web::http::header;

/// Origins used when none are configured.
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS for the read-only HTTP API and the websocket handshake.
///
/// `allowed` comes from `ServerConfig::cors_allowed_origins`, already
/// validated; an empty list means localhost only.
pub fn cors_middleware(allowed: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_NONE_MATCH,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
            header::ETAG,
        ])
        .max_age(3600);

    if allowed.is_empty() {
        for origin in LOCAL_ORIGINS {
            cors = cors.allowed_origin(origin);
        }
    } else {
        for origin in allowed {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
