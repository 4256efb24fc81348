use std::sync::Arc;

use portfolio_core_contact_contracts::{ContactSendMessageError, ContactService};
use portfolio_email_contracts::{Email, EmailBody, EmailService};
use portfolio_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use portfolio_shared_contracts::time::TimeService;
use portfolio_templates_contracts::{ContactSubmissionTemplate, TemplateService};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Time, Email, Template> {
    time: Time,
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Where contact form submissions are delivered to.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<Time, EmailS, Template> ContactServiceImpl<Time, EmailS, Template> {
    pub fn new(time: Time, email: EmailS, template: Template, config: ContactServiceConfig) -> Self {
        Self {
            time,
            email,
            template,
            config,
        }
    }
}

impl<Time, EmailS, Template> ContactService for ContactServiceImpl<Time, EmailS, Template>
where
    Time: TimeService,
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_message(&self, submission: ContactSubmission) -> Result<(), ContactSendMessageError> {
        let received_at = self.time.now();
        let html = self
            .template
            .render(&ContactSubmissionTemplate::new(&submission, received_at))?;

        let ContactSubmission {
            name,
            email,
            message,
        } = submission;

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("New Contact Form Submission from {}", *name),
            body: EmailBody::Alternative {
                text: format!("Name: {}\nEmail: {}\nMessage: {}", *name, email, *message),
                html,
            },
            reply_to: Some(email.with_name(name.into_inner())),
        };

        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        debug!(%received_at, "relayed contact form submission");

        Ok(())
    }
}
