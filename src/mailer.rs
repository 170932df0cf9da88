//! Best-effort email notifications over SMTP.
//!
//! Two emails go out per accepted application: an internal heads-up to the
//! admin address and a confirmation to the applicant. Callers log failures
//! and move on; a lost email never fails a submission.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::EmailConfig;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("Email build error: {0}")]
    Build(String),
}

/// Sends application notifications through a single reusable SMTP transport.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    admin: Mailbox,
}

impl Mailer {
    pub fn new(config: &EmailConfig, admin_email: &str) -> Result<Self, MailerError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from_address.parse()?,
            admin: admin_email.parse()?,
        })
    }

    /// Notify the admin address about a new submission, linking the resume.
    pub async fn notify_admin(
        &self,
        name: &str,
        email: &str,
        position: &str,
        resume_url: &str,
    ) -> Result<(), MailerError> {
        let html_body = format!(
            "<h2>New Job Application</h2>\n\
             <p><strong>Name:</strong> {name}</p>\n\
             <p><strong>Email:</strong> {email}</p>\n\
             <p><strong>Position:</strong> {position}</p>\n\
             <p><a href=\"{resume_url}\">View Resume</a></p>"
        );

        self.send(self.admin.clone(), "New Job Application", html_body)
            .await
    }

    /// Send the applicant a confirmation that their submission arrived.
    pub async fn notify_applicant(
        &self,
        to: &str,
        name: &str,
        position: &str,
    ) -> Result<(), MailerError> {
        let html_body = format!(
            "<h2>Application Received</h2>\n\
             <p>Hello {name},</p>\n\
             <p>Thank you for applying for the <strong>{position}</strong> role.</p>\n\
             <p>We'll be in touch if you're shortlisted.</p>"
        );

        self.send(to.parse()?, "Your Application Was Received", html_body)
            .await
    }

    async fn send(
        &self,
        to: Mailbox,
        subject: &str,
        html_body: String,
    ) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| MailerError::Build(e.to_string()))?;

        self.transport.send(message).await?;

        tracing::debug!(to = %to, subject, "Notification email sent");
        Ok(())
    }
}
