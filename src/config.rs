use std::{env, error::Error, str::FromStr, time::Duration};

use crate::{captcha::RecaptchaConfig, email::SmtpConfig, utils::split_list};

pub const DEFAULT_SUBJECT: &str = "New Portfolio Message";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug)]
pub enum ConfigError {
  Missing(Vec<&'static str>),
  Invalid { key: &'static str, value: String },
}

impl Error for ConfigError {}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ConfigError::Missing(keys) => write!(f, "Missing environment variables: {}", keys.join(", ")),
      ConfigError::Invalid { key, value } => write!(f, "Invalid value for {}: {:?}", key, value),
    }
  }
}

/// Settings for the contact pipeline itself, independent of either collaborator.
#[derive(Debug, Clone)]
pub struct ContactSettings {
  pub recipients: Vec<String>,
  pub subject: String,
  pub delivery_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub bind_addr: String,
  pub allowed_origins: Vec<String>,
  pub smtp: SmtpConfig,
  pub recaptcha: RecaptchaConfig,
  pub contact: ContactSettings,
  /// Whether `POST /api/test` dispatches a real email after verification.
  pub test_endpoint_sends_email: bool,
}

impl AppConfig {
  /// Reads the whole configuration from the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let mut missing = Vec::new();
    let mut required = |key: &'static str| {
      get(key).unwrap_or_else(|| {
        missing.push(key);
        String::new()
      })
    };

    let from_email = required("EMAIL_FROM");
    let to_email = required("EMAIL_TO");
    let password = required("EMAIL_PASSWORD");
    let recaptcha_secret = required("RECAPTCHA_SECRET");

    if !missing.is_empty() {
      return Err(ConfigError::Missing(missing));
    }

    let smtp_timeout = parse_or(&get, "SMTP_TIMEOUT", 10u64)?;
    let recaptcha_timeout = parse_or(&get, "RECAPTCHA_TIMEOUT", 3u64)?;

    let smtp = SmtpConfig {
      host: get("SMTP_SERVER").unwrap_or_else(|| "smtp.gmail.com".to_string()),
      port: parse_or(&get, "SMTP_PORT", 465u16)?,
      username: get("SMTP_USERNAME").unwrap_or_else(|| from_email.clone()),
      password,
      from_email,
      timeout: Duration::from_secs(smtp_timeout),
    };

    let recaptcha = RecaptchaConfig {
      secret: recaptcha_secret,
      verify_url: get("RECAPTCHA_VERIFY_URL").unwrap_or_else(|| crate::captcha::DEFAULT_VERIFY_URL.to_string()),
      timeout: Duration::from_secs(recaptcha_timeout),
    };

    let contact = ContactSettings {
      recipients: split_list(&to_email),
      subject: get("CONTACT_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
      delivery_timeout: smtp.timeout,
    };

    Ok(AppConfig {
      bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
      allowed_origins: get("ALLOWED_ORIGINS").map(|raw| split_list(&raw)).unwrap_or_default(),
      smtp,
      recaptcha,
      contact,
      test_endpoint_sends_email: parse_or(&get, "TEST_ENDPOINT_SENDS_EMAIL", false)?,
    })
  }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
  T: FromStr,
  G: Fn(&str) -> Option<String>,
{
  match get(key) {
    Some(value) => value
      .trim()
      .parse()
      .map_err(|_| ConfigError::Invalid { key, value }),
    None => Ok(default),
  }
}
