use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
  body::Body,
  http::{header, Method, Request, Response},
  Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
  app::create_app,
  captcha::{CaptchaError, CaptchaVerifier},
  config::ContactSettings,
  domains::contact::service::ContactServiceImpl,
  email::{EmailMessage, Mailer},
  state::SharedAppState,
};

pub const ALLOWED_ORIGIN: &str = "https://example.com";

#[derive(Clone)]
pub struct FakeVerifier {
  accepted: Option<&'static str>,
  calls: Arc<AtomicUsize>,
}

impl FakeVerifier {
  pub fn accepting(token: &'static str) -> Self {
    Self {
      accepted: Some(token),
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn unavailable() -> Self {
    Self {
      accepted: None,
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CaptchaVerifier for FakeVerifier {
  async fn verify(&self, token: &str) -> Result<bool, CaptchaError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match self.accepted {
      Some(accepted) => Ok(accepted == token),
      None => Err(CaptchaError::Transport("connection refused".to_string())),
    }
  }
}

#[derive(Clone)]
pub struct FakeMailer {
  fail: bool,
  sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl FakeMailer {
  pub fn succeeding() -> Self {
    Self {
      fail: false,
      sent: Arc::new(Mutex::new(Vec::new())),
    }
  }

  pub fn failing() -> Self {
    Self {
      fail: true,
      sent: Arc::new(Mutex::new(Vec::new())),
    }
  }

  pub fn sent(&self) -> Vec<EmailMessage> {
    self.sent.lock().expect("sent lock").clone()
  }
}

#[async_trait]
impl Mailer for FakeMailer {
  async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
    if self.fail {
      anyhow::bail!("smtp connection refused");
    }
    self.sent.lock().expect("sent lock").push(message.clone());
    Ok(())
  }
}

pub fn test_settings() -> ContactSettings {
  ContactSettings {
    recipients: vec!["owner@example.com".to_string()],
    subject: "New Portfolio Message".to_string(),
    delivery_timeout: Duration::from_secs(1),
  }
}

pub fn app_with_fakes(verifier: FakeVerifier, mailer: FakeMailer, test_endpoint_sends_email: bool) -> Router {
  let service = ContactServiceImpl::new(verifier, mailer, test_settings());
  let state = SharedAppState::new(
    Arc::new(service),
    vec![ALLOWED_ORIGIN.to_string()],
    test_endpoint_sends_email,
  );
  create_app(state)
}

pub fn submission_json() -> Value {
  json!({
    "name": "A",
    "email": "a@x.com",
    "message": "hi",
    "g-recaptcha-response": "tok1",
  })
}

pub async fn send(app: Router, method: Method, uri: &str, origin: Option<&str>, body: Value) -> Response<Body> {
  let mut builder = Request::builder()
    .method(method)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json");

  if let Some(origin) = origin {
    builder = builder.header(header::ORIGIN, origin);
  }

  let request = builder
    .body(Body::from(serde_json::to_vec(&body).expect("serialize request body")))
    .expect("build request");

  app.oneshot(request).await.expect("handle request")
}

pub async fn body_json(response: Response<Body>) -> Value {
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  serde_json::from_slice(&body).expect("deserialize response body")
}
