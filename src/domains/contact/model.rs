use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactSubmission {
  #[serde(default)]
  #[validate(length(min = 1))]
  pub name: String,
  #[serde(default)]
  #[validate(length(min = 1), custom(function = "crate::utils::validate_email_format"))]
  pub email: String,
  #[serde(default)]
  #[validate(length(min = 1))]
  pub message: String,
  #[serde(rename = "g-recaptcha-response", default)]
  #[validate(length(min = 1))]
  pub recaptcha_token: String,
}

impl ContactSubmission {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    message: impl Into<String>,
    recaptcha_token: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
      message: message.into(),
      recaptcha_token: recaptcha_token.into(),
    }
  }

  /// Strips surrounding whitespace so that blank fields count as missing.
  pub fn normalized(self) -> Self {
    Self {
      name: self.name.trim().to_string(),
      email: self.email.trim().to_string(),
      message: self.message.trim().to_string(),
      recaptcha_token: self.recaptcha_token.trim().to_string(),
    }
  }
}

/// Turns validator output into the message shown to the submitter.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
  let field_errors = errors.field_errors();
  let mut missing: Vec<String> = field_errors
    .iter()
    .filter(|(_, errs)| errs.iter().any(|e| e.code == "length"))
    .map(|(field, _)| {
      let field: &str = field.as_ref();
      match field {
        "recaptcha_token" => "g-recaptcha-response".to_string(),
        other => other.to_string(),
      }
    })
    .collect();

  if missing.is_empty() {
    return "Invalid email format".to_string();
  }

  missing.sort_unstable();
  format!("All fields are required (missing: {})", missing.join(", "))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactResponse {
  pub success: bool,
  pub message: String,
}

impl ContactResponse {
  pub fn accepted(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
    }
  }
}
