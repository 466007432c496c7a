// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for courier dispatches
//!
//! Every failure a dispatch can produce is one variant of [`Error`],
//! discriminated by [`ErrorKind`]. Transport-level failures keep the
//! wire-compatible kind tags ("error", "timeout", "abort").

use std::fmt;

use thiserror::Error;

/// Result type alias for courier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for courier dispatches
#[derive(Error, Debug)]
pub enum Error {
    /// Caller misuse: no target address supplied
    #[error("A target address must be defined to dispatch a request")]
    MissingAddress,

    /// Target address parsing failed
    #[error("Invalid address: {0}")]
    Url(#[from] url::ParseError),

    /// Dispatcher or client construction failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level network failure (connection refused, DNS, TLS, ...)
    #[error("Network error: {detail}")]
    Network { detail: String },

    /// Timer elapsed, or the modern transport was cancelled in flight
    #[error("Request timed out{}", fmt_reason(.reason))]
    Timeout { reason: Option<String> },

    /// Explicit cancellation of a legacy-transport dispatch
    #[error("Request aborted{}", fmt_reason(.reason))]
    Abort { reason: Option<String> },

    /// HTTP error status, recognized or not
    #[error("{message}")]
    HttpStatus {
        message: String,
        status: u16,
        status_text: String,
        /// Error body: parsed JSON when possible, raw text otherwise
        body: serde_json::Value,
    },

    /// Success-status response whose body is not valid JSON
    #[error("ServerSide Error: response body is not valid JSON")]
    Parse {
        /// Raw response text as received
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Discriminant for [`Error`], matching the dispatch error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller misuse, rejected before any transport is touched
    Validation,
    /// Underlying connection failure
    Network,
    /// Timer elapsed or modern-transport cancellation
    Timeout,
    /// Legacy-transport cancellation
    Abort,
    /// HTTP error status with translated message
    HttpStatus,
    /// Unparseable success-status body
    Parse,
}

impl Error {
    /// Return the discriminant for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingAddress | Error::Url(_) | Error::Config(_) => ErrorKind::Validation,
            Error::Network { .. } => ErrorKind::Network,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Abort { .. } => ErrorKind::Abort,
            Error::HttpStatus { .. } => ErrorKind::HttpStatus,
            Error::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// HTTP status code, when this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Transport kinds keep their wire-compatible tags
        let tag = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Network => "error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Abort => "abort",
            ErrorKind::HttpStatus => "status",
            ErrorKind::Parse => "parse",
        };
        f.write_str(tag)
    }
}

fn fmt_reason(reason: &Option<String>) -> String {
    match reason {
        Some(r) => format!(": {}", r),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::MissingAddress.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::Network {
                detail: "refused".into()
            }
            .kind(),
            ErrorKind::Network
        );
        assert_eq!(Error::Timeout { reason: None }.kind(), ErrorKind::Timeout);
        assert_eq!(Error::Abort { reason: None }.kind(), ErrorKind::Abort);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ErrorKind::Network.to_string(), "error");
        assert_eq!(ErrorKind::Timeout.to_string(), "timeout");
        assert_eq!(ErrorKind::Abort.to_string(), "abort");
    }

    #[test]
    fn test_status_accessor() {
        let err = Error::HttpStatus {
            message: "404 - Not Found".into(),
            status: 404,
            status_text: "Not Found".into(),
            body: serde_json::Value::Null,
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(Error::MissingAddress.status(), None);
    }

    #[test]
    fn test_abort_display() {
        let err = Error::Abort {
            reason: Some("user navigated away".into()),
        };
        assert_eq!(err.to_string(), "Request aborted: user navigated away");
        assert_eq!(Error::Abort { reason: None }.to_string(), "Request aborted");
    }
}
