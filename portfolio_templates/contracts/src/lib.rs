use chrono::{DateTime, Utc};
use portfolio_models::contact::ContactSubmission;
use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }

    pub fn with_render_error<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Err(anyhow::anyhow!("Failed to render template")));
        self
    }
}

/// A template and the context it is rendered with.
///
/// Templates whose name ends in `.html` are rendered with html escaping.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    ContactSubmissionTemplate("contact_submission.html"),
}

/// The notification sent to the site owner for a contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmissionTemplate {
    pub name: String,
    pub first_name: String,
    pub email: String,
    pub message: String,
    pub received_date: String,
    pub received_time: String,
}

impl ContactSubmissionTemplate {
    pub fn new(submission: &ContactSubmission, received_at: DateTime<Utc>) -> Self {
        Self {
            name: submission.name.to_string(),
            first_name: submission.first_name().into(),
            email: submission.email.to_string(),
            message: submission.message.to_string(),
            received_date: received_at.format("%A, %B %-d, %Y").to_string(),
            received_time: received_at.format("%I:%M %p UTC").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use portfolio_models::contact::RawContactSubmission;

    use super::*;

    #[test]
    fn contact_submission_template() {
        // Arrange
        let submission = RawContactSubmission {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            message: "Hello, this is a test message.".into(),
        }
        .validate()
        .unwrap();
        let received_at = Utc.with_ymd_and_hms(2024, 3, 4, 17, 5, 0).unwrap();

        // Act
        let template = ContactSubmissionTemplate::new(&submission, received_at);

        // Assert
        assert_eq!(
            template,
            ContactSubmissionTemplate {
                name: "Jane Doe".into(),
                first_name: "Jane".into(),
                email: "jane@example.com".into(),
                message: "Hello, this is a test message.".into(),
                received_date: "Monday, March 4, 2024".into(),
                received_time: "05:05 PM UTC".into(),
            }
        );
    }
}
