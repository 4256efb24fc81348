use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{ContactSendMessageError, ContactService};
use portfolio_models::contact::RawContactSubmission;
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::contact::ApiContactResponse;

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

/// The body is read as raw bytes so that a body which is not json or has the
/// wrong shape is answered like any other invalid input.
async fn send_message(service: State<Arc<impl ContactService>>, body: Bytes) -> Response {
    let submission = match serde_json::from_slice::<RawContactSubmission>(&body) {
        Ok(raw) => raw.validate().map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };

    let submission = match submission {
        Ok(submission) => submission,
        Err(err) => {
            debug!("rejected contact form submission: {err}");
            return invalid_input();
        }
    };

    match service.send_message(submission).await {
        Ok(()) => Json(ApiContactResponse { success: true }).into_response(),
        Err(ContactSendMessageError::Send) => {
            internal_server_error(anyhow!("smtp server did not accept the contact message"))
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

fn invalid_input() -> Response {
    error(StatusCode::BAD_REQUEST, "Invalid input data")
}
