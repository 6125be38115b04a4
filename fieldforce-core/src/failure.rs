//! Transport/HTTP failure descriptor and the user-facing classifier.
//!
//! `classify` is a pure function from a failure descriptor to a
//! presentation decision. It never performs side effects; acting on
//! `logout = true` (by running the logout flow) is the caller's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed API call, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// The server answered with a non-2xx status. `message` carries the
    /// body's `message` field when it was decodable.
    #[error("HTTP {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { code: u16, message: Option<String> },

    /// The request never reached the server.
    #[error("network error")]
    Network,

    /// The request exceeded its client-side timeout.
    #[error("request timed out")]
    Timeout,

    /// The response arrived but its body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiFailure {
    pub fn status(code: u16) -> Self {
        ApiFailure::Status {
            code,
            message: None,
        }
    }

    /// Status code, when the failure carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiFailure::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Presentation decision for a classified failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorAction {
    pub message: String,
    pub show_retry: bool,
    pub show_support: bool,
    pub logout: bool,
}

impl ErrorAction {
    fn new(message: &str, show_retry: bool, show_support: bool, logout: bool) -> Self {
        Self {
            message: message.to_string(),
            show_retry,
            show_support,
            logout,
        }
    }
}

/// Map a failure to its user-facing message and recovery hints.
///
/// Fixed table: 401 forces logout, 403 is terminal, 404 and the transport
/// failures invite a retry, 500 points at support. Everything unknown gets
/// the generic retry message.
pub fn classify(failure: &ApiFailure) -> ErrorAction {
    match failure {
        ApiFailure::Status { code: 401, .. } => ErrorAction::new(
            "Your session has expired. Please login again.",
            false,
            false,
            true,
        ),
        ApiFailure::Status { code: 403, .. } => ErrorAction::new(
            "You don't have permission to access this data.",
            false,
            false,
            false,
        ),
        ApiFailure::Status { code: 404, .. } => {
            ErrorAction::new("Requested data was not found.", true, false, false)
        }
        ApiFailure::Status { code: 500, .. } => ErrorAction::new(
            "Server is down. Please contact support.",
            false,
            true,
            false,
        ),
        ApiFailure::Network => ErrorAction::new(
            "No internet connection. Please check your network.",
            true,
            false,
            false,
        ),
        ApiFailure::Timeout => {
            ErrorAction::new("Request timed out. Please try again.", true, false, false)
        }
        _ => ErrorAction::new(
            "Something went wrong. Please try again.",
            true,
            false,
            false,
        ),
    }
}

/// Short toast-style message for a failure, for call sites that do not
/// render recovery actions.
pub fn friendly_message(failure: &ApiFailure) -> &'static str {
    match failure {
        ApiFailure::Status { code: 400, .. } => "Invalid request. Please try again.",
        ApiFailure::Status { code: 401, .. } => "Your session has expired. Please login again.",
        ApiFailure::Status { code: 403, .. } => "You don't have permission to access this data.",
        ApiFailure::Status { code: 404, .. } => "Requested data was not found.",
        ApiFailure::Status { code: 500, .. } => "Server is currently unavailable. Please try later.",
        ApiFailure::Network => "No internet connection. Please check your network.",
        ApiFailure::Timeout => "Request timed out. Please try again.",
        _ => "Unexpected error occurred. Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_forces_logout_without_retry() {
        let action = classify(&ApiFailure::status(401));
        assert!(action.logout);
        assert!(!action.show_retry);
        assert!(!action.show_support);
    }

    #[test]
    fn forbidden_is_terminal() {
        let action = classify(&ApiFailure::status(403));
        assert!(!action.logout);
        assert!(!action.show_retry);
        assert!(!action.show_support);
    }

    #[test]
    fn not_found_invites_retry() {
        let action = classify(&ApiFailure::status(404));
        assert!(action.show_retry);
        assert!(!action.logout);
    }

    #[test]
    fn server_error_points_at_support() {
        let action = classify(&ApiFailure::status(500));
        assert!(action.show_support);
        assert!(!action.logout);
        assert!(!action.show_retry);
    }

    #[test]
    fn transport_failures_invite_retry() {
        for failure in [ApiFailure::Network, ApiFailure::Timeout] {
            let action = classify(&failure);
            assert!(action.show_retry);
            assert!(!action.logout);
            assert!(!action.show_support);
        }
    }

    #[test]
    fn unknown_status_gets_generic_message() {
        let action = classify(&ApiFailure::status(418));
        assert_eq!(action.message, "Something went wrong. Please try again.");
        assert!(action.show_retry);
    }

    #[test]
    fn friendly_messages_cover_the_toast_table() {
        assert_eq!(
            friendly_message(&ApiFailure::status(400)),
            "Invalid request. Please try again."
        );
        assert_eq!(
            friendly_message(&ApiFailure::status(500)),
            "Server is currently unavailable. Please try later."
        );
        assert_eq!(
            friendly_message(&ApiFailure::Decode("bad json".into())),
            "Unexpected error occurred. Please try again."
        );
    }

    #[test]
    fn classifier_has_no_side_channel() {
        // Classification of the same input is stable.
        let a = classify(&ApiFailure::status(401));
        let b = classify(&ApiFailure::status(401));
        assert_eq!(a, b);
    }
}
