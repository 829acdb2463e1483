use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn forbidden(message: impl Into<String>) -> Self {
    Self::new(StatusCode::FORBIDDEN, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(StatusCode::NOT_FOUND, message)
  }

  pub fn method_not_allowed(message: impl Into<String>) -> Self {
    Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
  }

  pub fn payload_too_large(message: impl Into<String>) -> Self {
    Self::new(StatusCode::PAYLOAD_TOO_LARGE, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(json!({
      "success": false,
      "error": self.message,
    }));

    (self.status_code, body).into_response()
  }
}

impl From<AppError> for StatusCode {
  fn from(err: AppError) -> Self {
    err.status_code
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
      tracing::warn!("Payload too large: {}", rejection.body_text());
      return AppError::payload_too_large("Payload too large");
    }

    tracing::warn!("Invalid JSON: {}", rejection.body_text());
    AppError::bad_request("Invalid JSON format")
  }
}

impl From<crate::domains::contact::service::ContactServiceError> for AppError {
  fn from(error: crate::domains::contact::service::ContactServiceError) -> Self {
    use crate::domains::contact::service::ContactServiceError;
    match error {
      ContactServiceError::ValidationError(msg) => AppError::bad_request(msg),
      ContactServiceError::VerificationFailed(msg) => AppError::bad_request(msg),
      ContactServiceError::VerificationUnavailable(msg) => AppError::internal_server_error(msg),
      ContactServiceError::DeliveryFailed(msg) => AppError::internal_server_error(msg),
    }
  }
}
