//! Human-verification (reCAPTCHA v2) token checks.

mod service;
mod types;

pub use service::{CaptchaVerifier, RecaptchaVerifier};
pub use types::{CaptchaError, RecaptchaConfig, SiteVerifyResponse, DEFAULT_VERIFY_URL};
