use std::{future::Future, sync::Arc, time::Duration};

use portfolio_models::contact::{ContactSubmission, RawContactSubmission};
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::http::HttpClient;

/// Path of the contact endpoint relative to the site root.
pub const CONTACT_PATH: &str = "/api/contact";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactApi: Send + Sync + 'static {
    /// Deliver a validated submission to the contact endpoint.
    fn send_submission(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactApiError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactApiError {
    #[error("The contact endpoint responded with {0}.")]
    Status(StatusCode),
    #[error("Failed to reach the contact endpoint: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid contact endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone)]
pub struct HttpContactApi {
    endpoint: Arc<Url>,
    client: HttpClient,
}

impl HttpContactApi {
    pub fn new(endpoint: Url) -> Result<Self, ContactApiError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// A request that takes longer than `timeout` fails like any other
    /// network error.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self, ContactApiError> {
        Ok(Self {
            endpoint: endpoint.into(),
            client: HttpClient::new(timeout)?,
        })
    }

    /// Use the contact endpoint of the site served at `site`.
    pub fn for_site(site: &Url) -> Result<Self, ContactApiError> {
        Self::new(site.join(CONTACT_PATH)?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ContactApi for HttpContactApi {
    async fn send_submission(&self, submission: ContactSubmission) -> Result<(), ContactApiError> {
        let response = self
            .client
            .post((*self.endpoint).clone())
            .json(&RawContactSubmission::from(&submission))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContactApiError::Status(status));
        }

        Ok(())
    }
}

#[cfg(any(test, feature = "mock"))]
impl MockContactApi {
    pub fn with_send_submission(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactApiError>,
    ) -> Self {
        self.expect_send_submission()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
