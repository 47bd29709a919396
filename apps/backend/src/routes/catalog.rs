use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Every item, sorted by display name.
async fn list_items(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items: Vec<&crate::domain::Item> = app_state
        .catalog
        .items()
        .iter()
        .map(|item| item.as_ref())
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_items));
}
