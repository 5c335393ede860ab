use std::future::Future;

use bellavista_models::contact::SubmissionName;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AuditLogService: Send + Sync + 'static {
    /// Appends one log line for a successfully dispatched submission.
    fn record_submission(
        &self,
        timestamp: DateTime<Utc>,
        name: SubmissionName,
        email: EmailAddress,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockAuditLogService {
    pub fn with_record_submission(
        mut self,
        timestamp: DateTime<Utc>,
        name: SubmissionName,
        email: EmailAddress,
    ) -> Self {
        self.expect_record_submission()
            .once()
            .with(
                mockall::predicate::eq(timestamp),
                mockall::predicate::eq(name),
                mockall::predicate::eq(email),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(Ok(()))));
        self
    }
}
