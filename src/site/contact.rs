//! Contact form handling
//!
//! Validates the three required fields, logs the submission, and
//! acknowledges with JSON. Nothing is persisted and no email is sent;
//! the logged record is the only side effect.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Deserialize;

use crate::http;
use crate::logger;

/// Acknowledgment text returned on a valid submission
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

/// A contact form submission, scoped to a single request
///
/// Fields default to empty so that an absent field and an empty field
/// fail validation the same way.
#[derive(Debug, Deserialize, Default)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// All three fields are required and must be non-empty
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }
}

/// Handle a POST /contact body
pub fn handle_submission(content_type: Option<&str>, body: &[u8]) -> Response<Full<Bytes>> {
    let Some(submission) = parse_submission(content_type, body) else {
        return http::json_response(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({"error": "Invalid request body"}),
        );
    };

    if !submission.is_complete() {
        return http::json_response(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({"error": "All fields are required"}),
        );
    }

    // TODO: deliver the submission by email instead of only logging it
    logger::log_contact_submission(&submission.name, &submission.email, &submission.message);

    http::json_response(
        StatusCode::OK,
        &serde_json::json!({"success": true, "message": SUCCESS_MESSAGE}),
    )
}

/// Parse the body according to its Content-Type
///
/// Forms post `application/x-www-form-urlencoded`; JSON is accepted as
/// well. Anything unparseable is rejected by the caller.
fn parse_submission(content_type: Option<&str>, body: &[u8]) -> Option<ContactSubmission> {
    let content_type = content_type.unwrap_or("");
    if content_type.starts_with("application/json") {
        serde_json::from_slice(body).ok()
    } else {
        serde_urlencoded::from_bytes(body).ok()
    }
}
