//! Contact form submissions and the validation rules shared by the contact
//! form client and the contact endpoint.

use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A submission whose fields satisfy all contact form constraints.
///
/// The only way to obtain one from untrusted input is
/// [`RawContactSubmission::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub message: ContactMessage,
}

#[nutype(
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

/// Contact addresses need a dotted domain ending in a label of at least two
/// letters, in addition to being deliverable by the smtp transport.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .unwrap()
});

#[nutype(
    validate(regex = CONTACT_EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, Deref)
)]
pub struct ContactEmail(String);

/// Field values exactly as they were typed into the form or received in a
/// request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid contact submission fields: {fields:?}")]
pub struct ContactValidationErrors {
    fields: Vec<ContactField>,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// The name of the field in request bodies and forms.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// The message shown next to the field if its value is rejected.
    pub fn requirement(self) -> &'static str {
        match self {
            Self::Name => "Name must be at least 2 characters",
            Self::Email => "Please enter a valid email address",
            Self::Message => "Message must be at least 10 characters",
        }
    }
}

impl ContactValidationErrors {
    /// The rejected fields in form order.
    pub fn fields(&self) -> &[ContactField] {
        &self.fields
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.fields.contains(&field)
    }
}

impl RawContactSubmission {
    /// Checks every field independently and returns either the validated
    /// submission or the full list of rejected fields.
    pub fn validate(&self) -> Result<ContactSubmission, ContactValidationErrors> {
        let name = ContactName::try_new(self.name.clone()).ok();
        let email = ContactEmail::try_new(self.email.clone())
            .ok()
            .and_then(|email| email.parse::<EmailAddress>().ok());
        let message = ContactMessage::try_new(self.message.clone()).ok();

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(ContactSubmission {
                name,
                email,
                message,
            }),
            (name, email, message) => {
                let fields = [
                    (ContactField::Name, name.is_none()),
                    (ContactField::Email, email.is_none()),
                    (ContactField::Message, message.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, rejected)| rejected.then_some(field))
                .collect();
                Err(ContactValidationErrors { fields })
            }
        }
    }
}

impl TryFrom<RawContactSubmission> for ContactSubmission {
    type Error = ContactValidationErrors;

    fn try_from(value: RawContactSubmission) -> Result<Self, Self::Error> {
        value.validate()
    }
}

impl From<&ContactSubmission> for RawContactSubmission {
    fn from(value: &ContactSubmission) -> Self {
        Self {
            name: value.name.to_string(),
            email: value.email.to_string(),
            message: value.message.to_string(),
        }
    }
}

impl ContactSubmission {
    /// The first word of the sender's name, used to address replies.
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use portfolio_utils::assert_matches;

    use super::*;

    fn raw(name: &str, email: &str, message: &str) -> RawContactSubmission {
        RawContactSubmission {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn valid() {
        // Act
        let result = raw("Jane Doe", "jane@example.com", "Hello, this is a test message.").validate();

        // Assert
        let submission = result.unwrap();
        assert_eq!(*submission.name, "Jane Doe");
        assert_eq!(submission.email.as_str(), "jane@example.com");
        assert_eq!(*submission.message, "Hello, this is a test message.");
    }

    #[test]
    fn boundaries() {
        raw("Jo", "jo@example.com", "0123456789").validate().unwrap();

        let err = raw("J", "jo@example.com", "012345678").validate().unwrap_err();
        assert_eq!(err.fields(), [ContactField::Name, ContactField::Message]);
    }

    #[test]
    fn lengths_count_characters() {
        raw("Zö", "zoe@example.com", "ääääääääää").validate().unwrap();

        let err = raw("ö", "zoe@example.com", "äääääääää").validate().unwrap_err();
        assert_eq!(err.fields(), [ContactField::Name, ContactField::Message]);

        let err = raw("😀", "zoe@example.com", "😀😀😀😀😀").validate().unwrap_err();
        assert_eq!(err.fields(), [ContactField::Name, ContactField::Message]);
        raw("😀😀", "zoe@example.com", "😀😀😀😀😀😀😀😀😀😀").validate().unwrap();
    }

    #[test]
    fn invalid_email() {
        for email in [
            "",
            "jane",
            "jane@",
            "@example.com",
            "jane doe@example.com",
            "jane@localhost",
            "jane@example",
            "jane@example.c",
            "jane@[127.0.0.1]",
            "jane@example.123",
            ".jane@example.com",
            "ja..ne@example.com",
        ] {
            let result = raw("Jane Doe", email, "Hello, this is a test message.").validate();
            assert_matches!(result, Err(err) if err.fields() == [ContactField::Email]);
        }
    }

    #[test]
    fn valid_email() {
        for email in [
            "jane@example.com",
            "jane.doe+portfolio@mail.example.co.uk",
            "o'brien@example.ie",
            "JANE_DOE@EXAMPLE.COM",
        ] {
            let result = raw("Jane Doe", email, "Hello, this is a test message.").validate();
            assert_eq!(result.unwrap().email.as_str(), email);
        }
    }

    #[test]
    fn empty() {
        let err = RawContactSubmission::default().validate().unwrap_err();
        assert_eq!(err.fields(), ContactField::ALL);
    }

    #[test]
    fn rejection_is_idempotent() {
        let input = raw("J", "not an email", "short");
        let first = input.validate().unwrap_err();
        for _ in 0..3 {
            assert_eq!(input.validate().unwrap_err(), first);
        }
    }

    #[test]
    fn requirement_messages() {
        assert_eq!(
            ContactField::Name.requirement(),
            "Name must be at least 2 characters"
        );
        assert_eq!(
            ContactField::Email.requirement(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ContactField::Message.requirement(),
            "Message must be at least 10 characters"
        );
    }

    #[test]
    fn deserialize_requires_all_fields() {
        let result = serde_json::from_str::<RawContactSubmission>(r#"{"foo": "bar"}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<RawContactSubmission>(
            r#"{"name": "Jane Doe", "email": "jane@example.com", "message": "Hello there!", "extra": 1}"#,
        );
        result.unwrap();
    }

    #[test]
    fn first_name() {
        let submission = raw("Jane Doe", "jane@example.com", "Hello, this is a test message.")
            .validate()
            .unwrap();
        assert_eq!(submission.first_name(), "Jane");
    }
}
