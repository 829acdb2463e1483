use std::sync::LazyLock;

use lettre::Address;
use regex::Regex;
use validator::ValidationError;

pub mod error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("email pattern is a valid regex")
});

/// Accepts only addresses that also survive lettre's parser, so anything validated here can be used as Reply-To.
pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
  if !EMAIL_REGEX.is_match(email) || email.parse::<Address>().is_err() {
    return Err(ValidationError::new("invalid_email_format"));
  }

  Ok(())
}

/// Splits a comma-separated environment value, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|item| !item.is_empty())
    .map(str::to_string)
    .collect()
}

/// Indents every line of `text` by four spaces, as quoted text in the plain-text email.
pub fn indent_lines(text: &str) -> String {
  text
    .lines()
    .map(|line| {
      if line.trim().is_empty() {
        String::new()
      } else {
        format!("    {}", line)
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}
