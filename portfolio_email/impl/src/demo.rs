use std::time::Duration;

use portfolio_email_contracts::{Email, EmailService};
use tracing::info;

/// Stands in for a real transport when no smtp server is configured.
///
/// Every email is logged and reported as accepted after a fixed delay.
/// Nothing leaves the process.
#[derive(Debug, Clone)]
pub struct DemoEmailService {
    delay: Duration,
}

impl DemoEmailService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl EmailService for DemoEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        info!(
            recipient = %email.recipient,
            subject = %email.subject,
            reply_to = ?email.reply_to.as_ref().map(ToString::to_string),
            body = %email.body.text(),
            "No smtp host configured, simulating email delivery"
        );

        tokio::time::sleep(self.delay).await;

        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
