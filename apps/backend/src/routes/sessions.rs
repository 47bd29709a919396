use actix_web::http::header::{CACHE_CONTROL, ETAG, IF_NONE_MATCH};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::extractors::session_id::SessionIdParam;
use crate::http::etag::{if_none_match_hits, session_etag};
use crate::state::app_state::AppState;

/// Sessions waiting for an opponent, oldest first.
async fn list_open(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.directory.list_open()))
}

/// Current snapshot of one session.
///
/// Carries an ETag derived from the session version; a matching
/// `If-None-Match` gets `304 Not Modified` with no body.
async fn get_snapshot(
    http_req: HttpRequest,
    session_id: SessionIdParam,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let snapshot = app_state.directory.snapshot(session_id.0)?;
    let etag = session_etag(snapshot.session_id, snapshot.version);

    let not_modified = http_req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| if_none_match_hits(value, &etag));

    if not_modified {
        return Ok(HttpResponse::NotModified()
            .insert_header((ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_open))
        .route("/{session_id}/snapshot", web::get().to(get_snapshot));
}
