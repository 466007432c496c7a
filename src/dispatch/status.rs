// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP status translation
//!
//! Maps the recognized error statuses to human-readable messages. Every
//! message starts with the numeric code. Statuses outside the table get
//! a default rejection instead of hanging the dispatch.

use crate::error::Error;

/// Messages for the recognized error statuses
fn describe(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Bad Request: The server couldn't understand the request."),
        401 => Some(
            "Unauthorized: Authentication is required, or the provided credentials are incorrect.",
        ),
        403 => Some(
            "Forbidden: The server understood the request, but the user doesn't have permission to perform the action.",
        ),
        404 => Some("Not Found: The requested resource could not be found on the server."),
        500 => Some("Internal Server Error: The server encountered an unexpected condition."),
        502 => Some(
            "Bad Gateway: The server, while acting as a gateway or proxy, received an invalid response from the upstream server.",
        ),
        503 => Some(
            "Service Unavailable: The server is currently unavailable, often due to maintenance or overloading.",
        ),
        _ => None,
    }
}

/// Build the rejection for a terminal error status
///
/// `raw_body` is parsed as JSON when possible so the rejection carries a
/// structured error body, falling back to the raw text.
pub fn translate(status: u16, status_text: &str, raw_body: &[u8]) -> Error {
    let body = match serde_json::from_slice(raw_body) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(String::from_utf8_lossy(raw_body).into_owned()),
    };

    let message = match describe(status) {
        Some(text) => format!("{} - {}", status, text),
        None => format!("{} - Unexpected HTTP status.", status),
    };

    Error::HttpStatus {
        message,
        status,
        status_text: status_text.to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_recognized_statuses() {
        for status in [400u16, 401, 403, 404, 500, 502, 503] {
            let err = translate(status, "text", b"{}");
            assert_eq!(err.kind(), ErrorKind::HttpStatus);
            assert_eq!(err.status(), Some(status));
            assert!(
                err.to_string().starts_with(&status.to_string()),
                "message for {} must start with the code: {}",
                status,
                err
            );
        }
    }

    #[test]
    fn test_unrecognized_status_still_rejects() {
        let err = translate(418, "I'm a teapot", b"steam");
        assert_eq!(err.status(), Some(418));
        assert!(err.to_string().starts_with("418"));
    }

    #[test]
    fn test_error_body_parsed_when_json() {
        let err = translate(400, "Bad Request", br#"{"field":"name"}"#);
        match err {
            Error::HttpStatus { body, .. } => assert_eq!(body["field"], "name"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_body_falls_back_to_text() {
        let err = translate(500, "Internal Server Error", b"boom");
        match err {
            Error::HttpStatus { body, .. } => {
                assert_eq!(body, serde_json::Value::String("boom".into()))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
