use std::sync::Arc;

use axum::{
  extract::{Request, State},
  http::{
    header::{CONTENT_TYPE, ORIGIN},
    HeaderName, HeaderValue, Method,
  },
  middleware::Next,
  response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS headers are only ever emitted for the configured origins; no wildcard.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
  let origins: Vec<HeaderValue> = allowed_origins
    .iter()
    .filter(|origin| origin.as_str() != "*")
    .filter_map(|origin| match HeaderValue::from_str(origin) {
      Ok(value) => Some(value),
      Err(_) => {
        tracing::warn!("Ignoring malformed allowed origin: {:?}", origin);
        None
      }
    })
    .collect();

  CorsLayer::new()
    .allow_origin(AllowOrigin::list(origins))
    .allow_methods([Method::POST, Method::OPTIONS])
    .allow_headers([CONTENT_TYPE])
}

/// Drops every `access-control-*` header from responses to an origin outside the allow-list.
///
/// `CorsLayer` still advertises allowed methods and headers on a preflight from an unlisted origin.
pub async fn strip_foreign_cors_headers(
  State(allowed_origins): State<Arc<Vec<String>>>,
  request: Request,
  next: Next,
) -> Response {
  let foreign = request
    .headers()
    .get(ORIGIN)
    .is_some_and(|origin| !allowed_origins.iter().any(|allowed| allowed.as_bytes() == origin.as_bytes()));

  let mut response = next.run(request).await;
  if foreign {
    let names: Vec<HeaderName> = response
      .headers()
      .keys()
      .filter(|name| name.as_str().starts_with("access-control-"))
      .cloned()
      .collect();
    for name in names {
      response.headers_mut().remove(&name);
    }
  }

  response
}
