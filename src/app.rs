use axum::{
  extract::DefaultBodyLimit,
  middleware::from_fn_with_state,
  response::Json as JsonResponse,
  routing::get,
  Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::{
  domains::contact::rest::contact_routes,
  middleware::cors::{cors_layer, strip_foreign_cors_headers},
  state::{AppState, SharedAppState},
  AppError,
};

/// Upper bound on a submission body, in bytes.
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024;

pub fn create_app(state: SharedAppState) -> Router {
  let cors = cors_layer(state.allowed_origins());

  Router::new()
    .route("/health", get(health_handler))
    .nest("/api", contact_routes())
    .fallback(not_found_handler)
    .layer(DefaultBodyLimit::max(MAX_CONTENT_LENGTH))
    .layer(cors)
    .layer(from_fn_with_state(state.allowed_origins.clone(), strip_foreign_cors_headers))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn health_handler() -> JsonResponse<Value> {
  JsonResponse(json!({ "status": "ok" }))
}

async fn not_found_handler() -> AppError {
  AppError::not_found("Not Found")
}
