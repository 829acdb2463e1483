use async_trait::async_trait;
use reqwest::Client;

use super::types::{CaptchaError, RecaptchaConfig, SiteVerifyResponse};

#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
  /// `Ok(false)` means the provider rejected the token; `Err` means no verdict could be obtained.
  async fn verify(&self, token: &str) -> Result<bool, CaptchaError>;
}

pub struct RecaptchaVerifier {
  config: RecaptchaConfig,
  client: Client,
}

impl RecaptchaVerifier {
  pub fn new(config: RecaptchaConfig) -> Result<Self, CaptchaError> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| CaptchaError::Transport(e.to_string()))?;

    Ok(Self { config, client })
  }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
  async fn verify(&self, token: &str) -> Result<bool, CaptchaError> {
    let response = self
      .client
      .post(&self.config.verify_url)
      .form(&[("secret", self.config.secret.as_str()), ("response", token)])
      .send()
      .await
      .map_err(|e| CaptchaError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(CaptchaError::UnexpectedStatus(status.as_u16()));
    }

    let result: SiteVerifyResponse = response
      .json()
      .await
      .map_err(|e| CaptchaError::InvalidResponse(e.to_string()))?;

    tracing::debug!(success = result.success, hostname = ?result.hostname, "reCAPTCHA result");

    if !result.success {
      let error_codes = if result.error_codes.is_empty() {
        vec!["unknown".to_string()]
      } else {
        result.error_codes
      };
      tracing::warn!(?error_codes, "reCAPTCHA rejected token");
      return Ok(false);
    }

    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::{routing::post, Form, Json, Router};
  use serde_json::{json, Value};
  use std::{collections::HashMap, time::Duration};

  /// Serves a stand-in `siteverify` endpoint accepting only `secret`/`good-token`.
  async fn spawn_siteverify() -> String {
    async fn siteverify(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
      let accepted = form.get("secret").map(String::as_str) == Some("secret")
        && form.get("response").map(String::as_str) == Some("good-token");

      if accepted {
        Json(json!({ "success": true, "hostname": "example.com" }))
      } else {
        Json(json!({ "success": false, "error-codes": ["invalid-input-response"] }))
      }
    }

    let app = Router::new()
      .route("/siteverify", post(siteverify))
      .route("/broken", post(|| async { (axum::http::StatusCode::BAD_GATEWAY, "upstream down") }))
      .route("/garbage", post(|| async { "not json" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
      axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{}", addr)
  }

  fn verifier(base: &str, path: &str) -> RecaptchaVerifier {
    RecaptchaVerifier::new(RecaptchaConfig {
      secret: "secret".to_string(),
      verify_url: format!("{}{}", base, path),
      timeout: Duration::from_secs(3),
    })
    .expect("build verifier")
  }

  #[tokio::test]
  async fn verify_accepts_valid_token() {
    let base = spawn_siteverify().await;
    assert!(verifier(&base, "/siteverify").verify("good-token").await.expect("verdict"));
  }

  #[tokio::test]
  async fn verify_rejects_invalid_token() {
    let base = spawn_siteverify().await;
    assert!(!verifier(&base, "/siteverify").verify("bad-token").await.expect("verdict"));
  }

  #[tokio::test]
  async fn verify_errors_on_non_success_status() {
    let base = spawn_siteverify().await;
    let result = verifier(&base, "/broken").verify("good-token").await;
    assert!(matches!(result, Err(CaptchaError::UnexpectedStatus(502))));
  }

  #[tokio::test]
  async fn verify_errors_on_undecodable_body() {
    let base = spawn_siteverify().await;
    let result = verifier(&base, "/garbage").verify("good-token").await;
    assert!(matches!(result, Err(CaptchaError::InvalidResponse(_))));
  }

  #[tokio::test]
  async fn verify_errors_when_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let result = verifier(&format!("http://{}", addr), "/siteverify").verify("good-token").await;
    assert!(matches!(result, Err(CaptchaError::Transport(_))));
  }
}
