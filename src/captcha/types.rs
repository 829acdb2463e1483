use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Debug, Clone)]
pub struct RecaptchaConfig {
  pub secret: String,
  pub verify_url: String,
  pub timeout: Duration,
}

/// Body returned by the `siteverify` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteVerifyResponse {
  pub success: bool,
  #[serde(default)]
  pub hostname: Option<String>,
  #[serde(rename = "error-codes", default)]
  pub error_codes: Vec<String>,
}

#[derive(Debug)]
pub enum CaptchaError {
  Transport(String),
  UnexpectedStatus(u16),
  InvalidResponse(String),
}

impl std::error::Error for CaptchaError {}

impl std::fmt::Display for CaptchaError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CaptchaError::Transport(msg) => write!(f, "Verification request failed: {}", msg),
      CaptchaError::UnexpectedStatus(status) => write!(f, "Verification service returned status {}", status),
      CaptchaError::InvalidResponse(msg) => write!(f, "Verification response could not be decoded: {}", msg),
    }
  }
}
