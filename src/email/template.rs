use anyhow::{Context, Result};
use askama::Template;

use crate::utils::indent_lines;

#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactTextTemplate<'a> {
  name: &'a str,
  email: &'a str,
  received_at: &'a str,
  message: &'a str,
}

/// HTML alternative; askama escapes every interpolated field.
#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
  name: &'a str,
  email: &'a str,
  received_at: &'a str,
  message: &'a str,
}

#[derive(Debug, Clone)]
pub struct RenderedEmail {
  pub text: String,
  pub html: String,
}

pub fn render_contact_email(name: &str, email: &str, message: &str, received_at: &str) -> Result<RenderedEmail> {
  let indented = indent_lines(message);

  let text = ContactTextTemplate {
    name,
    email,
    received_at,
    message: &indented,
  }
  .render()
  .context("Failed to render plain text email template")?;

  let html = ContactHtmlTemplate {
    name,
    email,
    received_at,
    message,
  }
  .render()
  .context("Failed to render HTML email template")?;

  Ok(RenderedEmail { text, html })
}
