//! Client side of the portfolio contact form.
//!
//! [`ContactForm`] holds what the visitor typed and walks through the
//! submission lifecycle, [`HttpContactApi`] delivers validated submissions to
//! the contact endpoint.

pub use api::{
    ContactApi, ContactApiError, HttpContactApi, CONTACT_PATH, DEFAULT_TIMEOUT,
};
pub use form::{ContactForm, SubmitRejected, SubmitStatus, ERROR_MESSAGE, SUCCESS_MESSAGE};

#[cfg(any(test, feature = "mock"))]
pub use api::MockContactApi;

mod api;
mod form;
mod http;
