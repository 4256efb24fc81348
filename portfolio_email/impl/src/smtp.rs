use anyhow::anyhow;
use lettre::{
    message::{header::ContentType, MessageBuilder, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_email_contracts::{Email, EmailBody, EmailService};
use portfolio_models::email_address::EmailAddressWithName;
use portfolio_utils::Apply;

#[derive(Debug, Clone)]
pub struct SmtpEmailService {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[derive(Debug, Clone)]
pub struct SmtpEmailServiceConfig {
    pub host: String,
    pub port: u16,
    /// Use implicit tls. Otherwise the connection is upgraded via STARTTLS if
    /// the server supports it.
    pub secure: bool,
    pub username: String,
    pub password: String,
    pub from: EmailAddressWithName,
}

impl SmtpEmailService {
    pub fn new(config: SmtpEmailServiceConfig) -> anyhow::Result<Self> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            let tls = TlsParameters::new(config.host.clone())?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(tls))
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        Ok(Self {
            from: config.from,
            transport,
        })
    }
}

impl EmailService for SmtpEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = build_message(&self.from, email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(from: &EmailAddressWithName, email: Email) -> anyhow::Result<Message> {
    let builder = Message::builder()
        .from(from.0.clone())
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.body {
        EmailBody::Text(text) => builder.header(ContentType::TEXT_PLAIN).body(text)?,
        EmailBody::Alternative { text, html } => {
            builder.multipart(MultiPart::alternative_plain_html(text, html))?
        }
    };

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(body: EmailBody) -> Email {
        Email {
            recipient: "owner@example.com".parse().unwrap(),
            subject: "New Contact Form Submission from Jane Doe".into(),
            body,
            reply_to: Some("Jane Doe <jane@example.com>".parse().unwrap()),
        }
    }

    #[test]
    fn alternative_message() {
        // Arrange
        let from = "Portfolio <noreply@example.com>".parse().unwrap();
        let email = email(EmailBody::Alternative {
            text: "Name: Jane Doe\nEmail: jane@example.com\nMessage: Hello, this is a test message."
                .into(),
            html: "<p>Jane Doe</p>".into(),
        });

        // Act
        let message = build_message(&from, email).unwrap();

        // Assert
        let envelope = message.envelope();
        assert_eq!(
            envelope.from().map(ToString::to_string).as_deref(),
            Some("noreply@example.com")
        );
        assert_eq!(
            envelope
                .to()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["owner@example.com"]
        );

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Subject: New Contact Form Submission from Jane Doe"));
        assert!(formatted.contains("Reply-To: "));
        assert!(formatted.contains("<jane@example.com>"));
        assert!(formatted.contains("multipart/alternative"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("Name: Jane Doe"));
        assert!(formatted.contains("Email: jane@example.com"));
        assert!(formatted.contains("Message: Hello, this is a test message."));
        assert!(formatted.contains("<p>Jane Doe</p>"));
    }

    #[test]
    fn text_message() {
        // Arrange
        let from = "noreply@example.com".parse().unwrap();
        let email = email(EmailBody::Text("Email deliverability seems to be working!".into()));

        // Act
        let message = build_message(&from, email).unwrap();

        // Assert
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(!formatted.contains("multipart"));
        assert!(formatted.contains("Email deliverability seems to be working!"));
    }
}
