use std::sync::Arc;

use bellavista_audit_contracts::AuditLogService;
use bellavista_core_contact_contracts::{ContactService, ContactSubmitError};
use bellavista_email_contracts::{ContentType, Email, EmailService};
use bellavista_models::contact::ContactSubmission;
use bellavista_shared_contracts::time::TimeService;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Time, Email, Audit> {
    time: Time,
    email: Email,
    audit: Audit,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Recipient of the notification email.
    pub recipient: Arc<EmailAddress>,
    /// Restaurant phone number quoted in the auto-responder.
    pub phone: String,
}

impl<Time, Email, Audit> ContactServiceImpl<Time, Email, Audit> {
    pub fn new(time: Time, email: Email, audit: Audit, config: ContactServiceConfig) -> Self {
        Self {
            time,
            email,
            audit,
            config,
        }
    }
}

impl<Time, EmailS, Audit> ContactService for ContactServiceImpl<Time, EmailS, Audit>
where
    Time: TimeService,
    EmailS: EmailService,
    Audit: AuditLogService,
{
    async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactSubmitError> {
        let now = self.time.now();

        let notification = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("New Contact Form Submission - {}", submission.subject),
            body: notification_body(&submission, now),
            content_type: ContentType::Text,
            reply_to: Some(submission.email.clone()),
        };

        if !self.email.send(notification).await? {
            return Err(ContactSubmitError::Send);
        }

        // The submission already counts as delivered at this point, so a
        // failing log write must not turn it into an error response.
        if let Err(err) = self
            .audit
            .record_submission(now, submission.name.clone(), submission.email.clone())
            .await
        {
            warn!("Failed to record submission in the audit log: {err}");
        }

        let auto_responder = Email {
            recipient: submission.email.clone(),
            subject: "Thank you for contacting Bella Vista Restaurant".into(),
            body: auto_responder_body(&submission.name, &self.config),
            content_type: ContentType::Text,
            reply_to: Some((*self.config.recipient).clone()),
        };

        // Best effort; the outcome never reaches the submitter.
        match self.email.send(auto_responder).await {
            Ok(true) => {}
            Ok(false) => warn!(
                "Auto-responder to {} was rejected by the smtp server",
                submission.email
            ),
            Err(err) => warn!("Failed to send auto-responder to {}: {err}", submission.email),
        }

        Ok(())
    }
}

fn notification_body(submission: &ContactSubmission, timestamp: DateTime<Utc>) -> String {
    format!(
        "New contact form submission from the Bella Vista Restaurant website:\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Subject: {subject}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         This message was sent from the Bella Vista Restaurant contact form.\n\
         Reply to: {email}\n\
         Submission time: {time}\n",
        name = *submission.name,
        email = submission.email,
        phone = submission
            .phone
            .as_ref()
            .map(|phone| phone.as_str())
            .unwrap_or("Not provided"),
        subject = submission.subject,
        message = *submission.message,
        time = timestamp.format("%Y-%m-%d %H:%M:%S"),
    )
}

fn auto_responder_body(name: &str, config: &ContactServiceConfig) -> String {
    format!(
        "Dear {name},\n\
         \n\
         Thank you for contacting Bella Vista Restaurant. We have received your \
         message and will respond within 24 hours.\n\
         \n\
         In the meantime, feel free to:\n\
         - Visit our website to view our menu\n\
         - Call us at {phone} for immediate assistance\n\
         - Follow us on social media for updates\n\
         \n\
         We look forward to hearing from you soon!\n\
         \n\
         Best regards,\n\
         The Bella Vista Team\n\
         \n\
         ---\n\
         Bella Vista Restaurant\n\
         123 Restaurant Street\n\
         Downtown District\n\
         City, State 12345\n\
         Phone: {phone}\n\
         Email: {email}\n",
        phone = config.phone,
        email = config.recipient,
    )
}
