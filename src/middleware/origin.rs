use axum::http::{header::ORIGIN, HeaderMap};

use crate::utils::error::AppError;

/// Rejects requests whose `Origin` header names a site outside the allow-list.
///
/// A request without an `Origin` header did not come from a browser page and is let through.
pub fn check_origin(headers: &HeaderMap, allowed_origins: &[String]) -> Result<(), AppError> {
  let Some(origin) = headers.get(ORIGIN) else {
    return Ok(());
  };

  let origin = origin
    .to_str()
    .map_err(|_| AppError::forbidden("Origin not allowed"))?;

  if allowed_origins.iter().any(|allowed| allowed == origin) {
    tracing::info!("Request from Origin: {}", origin);
    return Ok(());
  }

  tracing::warn!("Blocked origin: {}", origin);
  Err(AppError::forbidden("Origin not allowed"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::{HeaderValue, StatusCode};

  fn allowed() -> Vec<String> {
    vec!["https://example.com".to_string(), "https://www.example.com".to_string()]
  }

  fn headers_with_origin(origin: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN, HeaderValue::from_static(origin));
    headers
  }

  #[test]
  fn allows_listed_origin() {
    assert!(check_origin(&headers_with_origin("https://www.example.com"), &allowed()).is_ok());
  }

  #[test]
  fn allows_missing_origin() {
    assert!(check_origin(&HeaderMap::new(), &allowed()).is_ok());
  }

  #[test]
  fn rejects_unlisted_origin() {
    let err = check_origin(&headers_with_origin("https://evil.example"), &allowed()).expect_err("must reject");
    assert_eq!(err.status_code, StatusCode::FORBIDDEN);
  }

  #[test]
  fn rejects_prefix_lookalike() {
    assert!(check_origin(&headers_with_origin("https://example.com.evil.example"), &allowed()).is_err());
  }
}
