//! HTTP-facing errors. Every failure becomes a JSON body with a fixed `error` message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use outing_core::Error as CoreError;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or empty required input (400).
    ClientInput(&'static str),
    /// Upstream replied with a failure status, which we pass on.
    UpstreamStatus { status: StatusCode, message: &'static str },
    /// Transport or parse failure talking to an upstream (500 + details).
    Upstream { message: &'static str, details: String },
    /// The model replied with something that isn't JSON (500 + the text).
    InvalidAiContent(String),
}

impl ApiError {
    /// Map a core failure onto this route's messages: `status_message` when the upstream
    /// answered with an error status, `failure_message` for everything else.
    pub fn from_upstream(
        err: CoreError,
        status_message: &'static str,
        failure_message: &'static str,
    ) -> Self {
        match err {
            CoreError::Status(status) => ApiError::UpstreamStatus {
                status,
                message: status_message,
            },
            CoreError::InvalidContent(content) => ApiError::InvalidAiContent(content),
            other => ApiError::Upstream {
                message: failure_message,
                details: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ClientInput(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::UpstreamStatus { status, message } => {
                (status, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Upstream { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "details": details })),
            )
                .into_response(),
            ApiError::InvalidAiContent(content) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Invalid JSON returned from AI", "content": content })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_are_mirrored() {
        let err = ApiError::from_upstream(
            CoreError::Status(reqwest::StatusCode::TOO_MANY_REQUESTS),
            "AI request failed",
            "Failed to fetch AI activities",
        );
        match err {
            ApiError::UpstreamStatus { status, message } => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(message, "AI request failed");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn other_errors_carry_details() {
        let parse = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err = ApiError::from_upstream(CoreError::Json(parse), "x", "Failed to fetch places");
        match err {
            ApiError::Upstream { message, details } => {
                assert_eq!(message, "Failed to fetch places");
                assert!(!details.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            ApiError::ClientInput("Missing fsq_id").into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
