use std::time::Duration;

use portfolio_email_contracts::{Email, EmailService};

pub use crate::{
    demo::DemoEmailService,
    smtp::{SmtpEmailService, SmtpEmailServiceConfig},
};

mod demo;
mod smtp;

/// The email transport selected by the configuration.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    /// Deliver emails through an smtp server.
    Smtp(SmtpEmailService),
    /// Only log emails, used when no smtp server is configured.
    Demo(DemoEmailService),
}

#[derive(Debug, Clone)]
pub enum EmailServiceConfig {
    Smtp(SmtpEmailServiceConfig),
    Demo { delay: Duration },
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        match config {
            EmailServiceConfig::Smtp(config) => SmtpEmailService::new(config).map(Self::Smtp),
            EmailServiceConfig::Demo { delay } => Ok(Self::Demo(DemoEmailService::new(delay))),
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo(_))
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        match self {
            Self::Smtp(smtp) => smtp.send(email).await,
            Self::Demo(demo) => demo.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Smtp(smtp) => smtp.ping().await,
            Self::Demo(demo) => demo.ping().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_config() {
        let sut = EmailServiceImpl::new(EmailServiceConfig::Demo {
            delay: Duration::from_secs(1),
        })
        .unwrap();

        assert!(sut.is_demo());
    }

    #[tokio::test]
    async fn smtp_config() {
        let sut = EmailServiceImpl::new(EmailServiceConfig::Smtp(SmtpEmailServiceConfig {
            host: "smtp.example.com".into(),
            port: 587,
            secure: false,
            username: "user".into(),
            password: "pass".into(),
            from: "Portfolio <noreply@example.com>".parse().unwrap(),
        }))
        .unwrap();

        assert!(!sut.is_demo());
    }
}
