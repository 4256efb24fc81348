use portfolio_models::contact::{
    ContactField, ContactSubmission, ContactValidationErrors, RawContactSubmission,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ContactApi, ContactApiError};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("A submission is already in flight.")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] ContactValidationErrors),
}

/// State of the contact form as presented to the visitor.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: RawContactSubmission,
    status: SubmitStatus,
    errors: Option<ContactValidationErrors>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &RawContactSubmission {
        &self.values
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.values.name,
            ContactField::Email => &self.values.email,
            ContactField::Message => &self.values.message,
        }
    }

    /// Update a field. Once a submission has been rejected, field errors are
    /// recomputed on every change.
    pub fn set_value(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.values.name = value,
            ContactField::Email => self.values.email = value,
            ContactField::Message => self.values.message = value,
        }

        if self.errors.is_some() {
            self.errors = self.values.validate().err();
        }
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Validate the current values and enter [`SubmitStatus::Submitting`].
    ///
    /// Nothing changes but the field errors if validation fails, so no
    /// request must be made in that case.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitRejected> {
        if self.status == SubmitStatus::Submitting {
            return Err(SubmitRejected::InFlight);
        }

        match self.values.validate() {
            Ok(submission) => {
                self.errors = None;
                self.status = SubmitStatus::Submitting;
                Ok(submission)
            }
            Err(err) => {
                debug!(fields = ?err.fields(), "contact form has invalid fields");
                self.errors = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Leave [`SubmitStatus::Submitting`] with the outcome of the request.
    /// The form is cleared only if the submission was delivered.
    pub fn finish_submit(&mut self, result: Result<(), ContactApiError>) {
        if self.status != SubmitStatus::Submitting {
            warn!(status = ?self.status, "no contact form submission in flight");
            return;
        }

        match result {
            Ok(()) => {
                self.values = RawContactSubmission::default();
                self.status = SubmitStatus::Success;
            }
            Err(err) => {
                warn!("failed to send contact form submission: {err}");
                self.status = SubmitStatus::Error;
            }
        }
    }

    /// Validate, send and record the outcome of a single submission.
    pub async fn submit(&mut self, api: &impl ContactApi) -> Result<SubmitStatus, SubmitRejected> {
        let submission = self.begin_submit()?;
        let result = api.send_submission(submission).await;
        self.finish_submit(result);
        Ok(self.status)
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.status != SubmitStatus::Submitting
    }

    pub fn is_loading(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    pub fn field_error(&self, field: ContactField) -> Option<&'static str> {
        self.errors
            .as_ref()
            .filter(|errors| errors.contains(field))
            .map(|_| field.requirement())
    }

    pub fn status_message(&self) -> Option<&'static str> {
        match self.status {
            SubmitStatus::Idle | SubmitStatus::Submitting => None,
            SubmitStatus::Success => Some(SUCCESS_MESSAGE),
            SubmitStatus::Error => Some(ERROR_MESSAGE),
        }
    }
}
