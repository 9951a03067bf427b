//! "Not found" detection for GitHub GraphQL errors.
//!
//! GitHub does not give lookups a dependable structured error code, so a
//! missing organization, user, or node is recognized from the message text:
//! - GraphQL errors such as "Could not resolve to an Organization with the
//!   login of 'x'."
//! - HTTP 400/404 status codes surfaced by the client as
//!   "non-200 OK status code: <code>"
//!
//! Every recognized phrasing lives in [`NOT_FOUND_PATTERNS`]. Add new ones
//! there, and to the test table below.
//!
//! GraphQL errors tagged `type: NOT_FOUND` are classified when the response
//! is unwrapped, one error at a time; see
//! [`GraphQLError::classification`](crate::github::transport::GraphQLError::classification).

use crate::github::transport::TransportError;

/// Lowercase substrings that mark an error as "entity does not exist".
pub const NOT_FOUND_PATTERNS: &[&str] = &[
    "could not resolve to a user",
    "could not resolve to an organization",
    "could not resolve to a node",
    "could not resolve to a projectv2",
    "non-200 ok status code: 400",
    "non-200 ok status code: 404",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NotFound,
    Fatal,
}

/// Classify a failed call. Only meaningful for an actual error.
///
/// A classification fixed when the error was built wins over the text.
pub fn classify(error: &TransportError) -> Classification {
    error
        .classification()
        .unwrap_or_else(|| classify_message(error.message()))
}

pub(crate) fn classify_message(message: &str) -> Classification {
    let msg = message.to_lowercase();
    if NOT_FOUND_PATTERNS.iter().any(|pattern| msg.contains(pattern)) {
        Classification::NotFound
    } else {
        Classification::Fatal
    }
}
