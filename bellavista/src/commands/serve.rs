use std::sync::Arc;

use bellavista_api_rest::{RestServer, RestServerConfig};
use bellavista_audit_impl::AuditLogServiceImpl;
use bellavista_config::Config;
use bellavista_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use bellavista_core_health_impl::{HealthServiceConfig, HealthServiceImpl};
use bellavista_email_contracts::EmailService;
use bellavista_email_impl::EmailServiceImpl;
use bellavista_shared_impl::time::TimeServiceImpl;
use tracing::info;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = EmailServiceImpl::new(&config.email.smtp_url, config.email.from.clone())?;
    email.ping().await?;

    let audit = AuditLogServiceImpl::new(config.audit.log_file.clone());

    let contact = ContactServiceImpl::new(
        TimeServiceImpl,
        email.clone(),
        audit,
        ContactServiceConfig {
            recipient: Arc::new(config.contact.email.clone()),
            phone: config.contact.phone.clone(),
        },
    );

    let health = HealthServiceImpl::new(
        TimeServiceImpl,
        email,
        HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    let server = RestServer::new(
        health,
        contact,
        RestServerConfig {
            contact_phone: config.contact.phone,
        },
    );

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
