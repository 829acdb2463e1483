use crate::email::types::{EmailMessage, SmtpConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
  message::{header::ContentType, Mailbox, MultiPart},
  transport::smtp::authentication::Credentials,
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Port on which SMTP servers expect TLS from the first byte (SMTPS).
const IMPLICIT_TLS_PORT: u16 = 465;

#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, message: &EmailMessage) -> Result<()>;
}

pub struct EmailService {
  smtp_config: SmtpConfig,
  transporter: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailService {
  pub fn new(smtp_config: SmtpConfig) -> Result<Self> {
    let creds = Credentials::new(smtp_config.username.clone(), smtp_config.password.clone());

    let builder = if smtp_config.host == "localhost" || smtp_config.host == "mailhog" {
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp_config.host)
    } else if smtp_config.port == IMPLICIT_TLS_PORT {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp_config.host)?
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp_config.host)?
    };

    let transporter = builder
      .credentials(creds)
      .port(smtp_config.port)
      .timeout(Some(smtp_config.timeout))
      .build();

    Ok(EmailService {
      smtp_config,
      transporter,
    })
  }

  pub fn build_message(&self, message: &EmailMessage) -> Result<Message> {
    let from: Mailbox = self
      .smtp_config
      .from_email
      .parse()
      .context("Failed to parse sender address")?;

    let mut builder = Message::builder().from(from).subject(&message.subject);

    for recipient in &message.to {
      builder = builder.to(recipient.parse().context("Failed to parse recipient address")?);
    }

    if let Some(reply_to) = &message.reply_to {
      let address = reply_to.email.parse().context("Failed to parse reply-to address")?;
      builder = builder.reply_to(Mailbox::new(Some(reply_to.name.clone()), address));
    }

    let email = match &message.html_body {
      Some(html) => builder.multipart(MultiPart::alternative_plain_html(
        message.text_body.clone(),
        html.clone(),
      )),
      None => builder.header(ContentType::TEXT_PLAIN).body(message.text_body.clone()),
    }
    .context("Failed to build email message")?;

    Ok(email)
  }
}

#[async_trait]
impl Mailer for EmailService {
  async fn send(&self, message: &EmailMessage) -> Result<()> {
    let email = self.build_message(message)?;

    self
      .transporter
      .send(email)
      .await
      .with_context(|| format!("SMTP delivery via {}:{} failed", self.smtp_config.host, self.smtp_config.port))?;

    tracing::info!(
      host = %self.smtp_config.host,
      port = self.smtp_config.port,
      "Email successfully sent"
    );

    Ok(())
  }
}
