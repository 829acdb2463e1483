//! Email delivery for contact submissions
//!
//! The `Mailer` trait is the seam the contact service sends through;
//! `EmailService` implements it over lettre's async SMTP transport.

mod service;
mod template;
mod types;

pub use service::{EmailService, Mailer};
pub use template::{render_contact_email, RenderedEmail};
pub use types::{EmailMessage, ReplyTo, SmtpConfig};
