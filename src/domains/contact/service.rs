use async_trait::async_trait;
use chrono::Utc;
use std::error::Error;
use validator::Validate;

use super::model::{describe_validation_errors, ContactResponse, ContactSubmission};
use crate::{
  captcha::CaptchaVerifier,
  config::ContactSettings,
  email::{render_contact_email, EmailMessage, Mailer},
};

pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const VERIFIED_ONLY_MESSAGE: &str = "Verification succeeded; delivery skipped for test endpoint";

#[derive(Debug)]
pub enum ContactServiceError {
  ValidationError(String),
  VerificationFailed(String),
  VerificationUnavailable(String),
  DeliveryFailed(String),
}

impl Error for ContactServiceError {}

impl std::fmt::Display for ContactServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ContactServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      ContactServiceError::VerificationFailed(msg) => write!(f, "Verification Failed: {}", msg),
      ContactServiceError::VerificationUnavailable(msg) => write!(f, "Verification Unavailable: {}", msg),
      ContactServiceError::DeliveryFailed(msg) => write!(f, "Delivery Failed: {}", msg),
    }
  }
}

/// What happens after a submission passes verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
  Deliver,
  VerifyOnly,
}

#[async_trait]
pub trait ContactService: Send + Sync {
  async fn submit(
    &self,
    submission: ContactSubmission,
    dispatch: Dispatch,
  ) -> Result<ContactResponse, ContactServiceError>;
}

pub struct ContactServiceImpl<V, M> {
  verifier: V,
  mailer: M,
  settings: ContactSettings,
}

impl<V, M> ContactServiceImpl<V, M>
where
  V: CaptchaVerifier,
  M: Mailer,
{
  pub fn new(verifier: V, mailer: M, settings: ContactSettings) -> Self {
    Self {
      verifier,
      mailer,
      settings,
    }
  }

  pub fn compose(&self, submission: &ContactSubmission) -> Result<EmailMessage, ContactServiceError> {
    let received_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let rendered = render_contact_email(&submission.name, &submission.email, &submission.message, &received_at)
      .map_err(|e| {
        tracing::error!("Failed to render contact email: {:?}", e);
        ContactServiceError::DeliveryFailed("Failed to send message".to_string())
      })?;

    Ok(
      EmailMessage::new(
        self.settings.recipients.clone(),
        self.settings.subject.clone(),
        rendered.text,
      )
      .with_reply_to(submission.name.clone(), submission.email.clone())
      .with_html(rendered.html),
    )
  }

  async fn deliver(&self, message: &EmailMessage) -> Result<(), ContactServiceError> {
    match tokio::time::timeout(self.settings.delivery_timeout, self.mailer.send(message)).await {
      Ok(Ok(())) => Ok(()),
      Ok(Err(e)) => {
        tracing::error!("Email sending failed: {:?}", e);
        Err(ContactServiceError::DeliveryFailed("Failed to send message".to_string()))
      }
      Err(_) => {
        tracing::error!(
          timeout_secs = self.settings.delivery_timeout.as_secs_f64(),
          "Email sending timed out"
        );
        Err(ContactServiceError::DeliveryFailed("Failed to send message".to_string()))
      }
    }
  }
}

#[async_trait]
impl<V, M> ContactService for ContactServiceImpl<V, M>
where
  V: CaptchaVerifier,
  M: Mailer,
{
  async fn submit(
    &self,
    submission: ContactSubmission,
    dispatch: Dispatch,
  ) -> Result<ContactResponse, ContactServiceError> {
    let submission = submission.normalized();

    submission.validate().map_err(|e| {
      let msg = describe_validation_errors(&e);
      tracing::warn!("Rejected submission: {}", msg);
      ContactServiceError::ValidationError(msg)
    })?;

    let verified = self.verifier.verify(&submission.recaptcha_token).await.map_err(|e| {
      tracing::error!("reCAPTCHA request failed: {}", e);
      ContactServiceError::VerificationUnavailable("Verification service unavailable".to_string())
    })?;

    if !verified {
      tracing::warn!("reCAPTCHA verification failed");
      return Err(ContactServiceError::VerificationFailed(
        "reCAPTCHA verification failed".to_string(),
      ));
    }

    if dispatch == Dispatch::VerifyOnly {
      tracing::info!("Verification passed, delivery skipped");
      return Ok(ContactResponse::accepted(VERIFIED_ONLY_MESSAGE));
    }

    let message = self.compose(&submission)?;
    self.deliver(&message).await?;

    tracing::info!("Email sent: {} <{}>", submission.name, submission.email);
    Ok(ContactResponse::accepted(SENT_MESSAGE))
  }
}
