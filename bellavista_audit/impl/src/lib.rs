use std::{path::PathBuf, sync::Arc};

use bellavista_audit_contracts::AuditLogService;
use bellavista_models::contact::SubmissionName;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use tokio::{io::AsyncWriteExt, sync::Mutex};

/// Append-only submission log.
///
/// The file is the only shared mutable resource on the server; appends are
/// serialized through a mutex so concurrent requests cannot interleave
/// partial lines.
#[derive(Debug, Clone)]
pub struct AuditLogServiceImpl {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl AuditLogServiceImpl {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn ensure_log_dir(&self) -> anyhow::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        if tokio::fs::metadata(dir).await.is_ok() {
            return Ok(());
        }
        tokio::fs::create_dir_all(dir).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o755)).await?;
        }
        Ok(())
    }
}

impl AuditLogService for AuditLogServiceImpl {
    async fn record_submission(
        &self,
        timestamp: DateTime<Utc>,
        name: SubmissionName,
        email: EmailAddress,
    ) -> anyhow::Result<()> {
        let line = format!(
            "{} - Contact form submission from {} ({})\n",
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            *name,
            email
        );

        let _guard = self.lock.lock().await;
        self.ensure_log_dir().await?;
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn temp_log_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("bellavista-audit-{}", uuid::Uuid::new_v4()))
            .join("logs")
            .join("contact_submissions.log")
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap()
    }

    #[tokio::test]
    async fn creates_directory_and_appends_line() {
        let path = temp_log_path();
        let sut = AuditLogServiceImpl::new(path.clone());

        sut.record_submission(
            timestamp(),
            "Max Mustermann".to_owned().try_into().unwrap(),
            "max.mustermann@example.de".parse().unwrap(),
        )
        .await
        .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            content,
            "2025-03-14 15:09:26 - Contact form submission from Max Mustermann \
             (max.mustermann@example.de)\n"
        );
    }

    #[tokio::test]
    async fn repeated_submissions_append_independent_lines() {
        let path = temp_log_path();
        let sut = AuditLogServiceImpl::new(path.clone());

        for _ in 0..2 {
            sut.record_submission(
                timestamp(),
                "Max Mustermann".to_owned().try_into().unwrap(),
                "max.mustermann@example.de".parse().unwrap(),
            )
            .await
            .unwrap();
        }

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
