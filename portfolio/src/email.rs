use anyhow::Context;
use portfolio_config::EmailConfig;
use portfolio_email_impl::{EmailServiceConfig, EmailServiceImpl, SmtpEmailServiceConfig};

/// Build the email transport. Without an smtp host, deliveries are only
/// simulated.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(service_config(config)).context("Failed to configure smtp transport")
}

fn service_config(config: &EmailConfig) -> EmailServiceConfig {
    match config.smtp_host() {
        Some(host) => EmailServiceConfig::Smtp(SmtpEmailServiceConfig {
            host: host.into(),
            port: config.port,
            secure: config.secure,
            username: config.username.clone(),
            password: (*config.password).clone(),
            from: config.from.clone(),
        }),
        None => EmailServiceConfig::Demo {
            delay: *config.demo_delay,
        },
    }
}
