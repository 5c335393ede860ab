use anyhow::bail;
use bellavista_client::{FormController, FormFields, SubmissionOutcome};
use bellavista_config::Config;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Validate and submit a contact form to a running server
    Send {
        /// Endpoint to post to; defaults to the configured server address
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// One of: reservation, event, feedback, general
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                endpoint,
                name,
                email,
                phone,
                subject,
                message,
            } => {
                let endpoint = endpoint.unwrap_or_else(|| {
                    format!("http://{}:{}/contact", config.http.host, config.http.port)
                });

                let mut controller = FormController::new(endpoint);
                *controller.fields_mut() = FormFields {
                    name,
                    email,
                    phone,
                    subject,
                    message,
                };

                match controller.submit().await {
                    SubmissionOutcome::Invalid(errors) => {
                        for error in &errors {
                            eprintln!("{}: {}", error.field, error.message);
                        }
                        bail!("Validation failed; nothing was sent");
                    }
                    outcome => {
                        let message = outcome.message().unwrap_or_default();
                        println!("{message}");
                        match outcome {
                            SubmissionOutcome::Response(response) if response.success => Ok(()),
                            _ => bail!("Submission was not accepted"),
                        }
                    }
                }
            }
        }
    }
}
