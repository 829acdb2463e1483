use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
  pub host: String,
  pub port: u16,
  pub username: String,
  pub password: String,
  pub from_email: String,
  pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTo {
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
  pub to: Vec<String>,
  pub reply_to: Option<ReplyTo>,
  pub subject: String,
  pub text_body: String,
  pub html_body: Option<String>,
}

impl EmailMessage {
  pub fn new(to: Vec<String>, subject: String, text_body: String) -> Self {
    EmailMessage {
      to,
      reply_to: None,
      subject,
      text_body,
      html_body: None,
    }
  }

  pub fn with_reply_to(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
    self.reply_to = Some(ReplyTo {
      name: name.into(),
      email: email.into(),
    });
    self
  }

  pub fn with_html(mut self, html_body: String) -> Self {
    self.html_body = Some(html_body);
    self
  }
}
