use std::sync::Arc;

use crate::{
  captcha::RecaptchaVerifier,
  config::AppConfig,
  domains::contact::{
    model::{ContactResponse, ContactSubmission},
    service::{ContactService, ContactServiceError, ContactServiceImpl, Dispatch},
  },
  email::EmailService,
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn submit_contact(
    &self,
    submission: ContactSubmission,
    dispatch: Dispatch,
  ) -> impl std::future::Future<Output = Result<ContactResponse, ContactServiceError>> + Send;
  fn allowed_origins(&self) -> &[String];
  fn test_dispatch(&self) -> Dispatch;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub contact_service: Arc<dyn ContactService>,
  pub allowed_origins: Arc<Vec<String>>,
  pub test_endpoint_sends_email: bool,
}

impl SharedAppState {
  pub fn new(
    contact_service: Arc<dyn ContactService>,
    allowed_origins: Vec<String>,
    test_endpoint_sends_email: bool,
  ) -> Self {
    Self {
      contact_service,
      allowed_origins: Arc::new(allowed_origins),
      test_endpoint_sends_email,
    }
  }

  /// Wires the production collaborators: reCAPTCHA over HTTPS and SMTP delivery.
  pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
    let verifier = RecaptchaVerifier::new(config.recaptcha.clone())?;
    let email_service = EmailService::new(config.smtp.clone())?;
    let contact_service = ContactServiceImpl::new(verifier, email_service, config.contact.clone());

    Ok(Self::new(
      Arc::new(contact_service),
      config.allowed_origins.clone(),
      config.test_endpoint_sends_email,
    ))
  }
}

impl AppState for SharedAppState {
  async fn submit_contact(
    &self,
    submission: ContactSubmission,
    dispatch: Dispatch,
  ) -> Result<ContactResponse, ContactServiceError> {
    self.contact_service.submit(submission, dispatch).await
  }

  fn allowed_origins(&self) -> &[String] {
    &self.allowed_origins
  }

  fn test_dispatch(&self) -> Dispatch {
    if self.test_endpoint_sends_email {
      Dispatch::Deliver
    } else {
      Dispatch::VerifyOnly
    }
  }
}
