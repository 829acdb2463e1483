use axum::{
  extract::{rejection::JsonRejection, Json, State},
  http::HeaderMap,
  response::Json as JsonResponse,
  routing::{post, Router},
};

use super::{
  model::{ContactResponse, ContactSubmission},
  service::Dispatch,
};
use crate::{
  middleware::origin::check_origin,
  state::{AppState, SharedAppState},
  AppError,
};

pub fn contact_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/contact", post(contact_handler).fallback(method_not_allowed_handler))
    .route("/test", post(test_handler).fallback(method_not_allowed_handler))
}

pub async fn contact_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<JsonResponse<ContactResponse>, AppError> {
  handle_submission(&state, &headers, payload, Dispatch::Deliver).await
}

/// Same contract as `/contact`; whether mail is actually sent is a configuration switch.
pub async fn test_handler(
  State(state): State<SharedAppState>,
  headers: HeaderMap,
  payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<JsonResponse<ContactResponse>, AppError> {
  let dispatch = state.test_dispatch();
  handle_submission(&state, &headers, payload, dispatch).await
}

pub async fn method_not_allowed_handler() -> AppError {
  AppError::method_not_allowed("Method not allowed")
}

async fn handle_submission<S: AppState>(
  state: &S,
  headers: &HeaderMap,
  payload: Result<Json<ContactSubmission>, JsonRejection>,
  dispatch: Dispatch,
) -> Result<JsonResponse<ContactResponse>, AppError> {
  check_origin(headers, state.allowed_origins())?;

  let Json(submission) = payload?;

  state
    .submit_contact(submission, dispatch)
    .await
    .map(JsonResponse)
    .map_err(Into::into)
}
