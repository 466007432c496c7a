// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Normalized dispatch results

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Interpreted response body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Parsed JSON document
    Json(serde_json::Value),
    /// Plain text or HTML
    Text(String),
    /// Image or PDF converted to a base64 data URL
    DataUrl(String),
    /// Anything else, as received
    Bytes(Bytes),
}

impl Body {
    /// Parsed JSON value, if this body is JSON
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Text content, if this body is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            Body::DataUrl(url) => Some(url),
            _ => None,
        }
    }

    /// Deserialize a JSON body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Body::Json(value) => serde_json::from_value(value.clone()).map_err(|e| Error::Parse {
                raw: value.to_string(),
                source: e,
            }),
            Body::Text(text) | Body::DataUrl(text) => {
                serde_json::from_str(text).map_err(|e| Error::Parse {
                    raw: text.clone(),
                    source: e,
                })
            }
            Body::Bytes(bytes) => serde_json::from_slice(bytes).map_err(|e| Error::Parse {
                raw: String::from_utf8_lossy(bytes).into_owned(),
                source: e,
            }),
        }
    }
}

/// Raw response metadata, the transport-handle analogue
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    /// Response status code
    pub status: u16,
    /// Status text
    pub status_text: String,
    /// Final URL after any redirects
    pub url: Url,
    /// Raw response body
    pub body: Bytes,
}

/// Result of one successful dispatch, produced exactly once
#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// Interpreted body
    pub result: Body,
    /// Raw response metadata
    pub response: ResponseInfo,
    /// Response headers, keys lower-cased
    pub headers: HashMap<String, String>,
    /// Detected content type, parameters stripped
    pub content_type: Option<String>,
}

impl DispatchResult {
    /// Get a response header value by lower-cased name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_body_accessors() {
        let body = Body::Json(serde_json::json!({"a": 1}));
        assert_eq!(body.as_json().unwrap()["a"], 1);
        assert!(body.as_text().is_none());

        let body = Body::Text("hello".into());
        assert_eq!(body.as_text(), Some("hello"));
    }

    #[test]
    fn test_typed_json() {
        #[derive(Deserialize)]
        struct Payload {
            a: u32,
        }
        let body = Body::Json(serde_json::json!({"a": 7}));
        let payload: Payload = body.json().unwrap();
        assert_eq!(payload.a, 7);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());
        let result = DispatchResult {
            result: Body::Text("ok".into()),
            response: ResponseInfo {
                status: 200,
                status_text: "OK".into(),
                url: Url::parse("https://example.com/").unwrap(),
                body: Bytes::from_static(b"ok"),
            },
            headers,
            content_type: Some("text/plain".into()),
        };
        assert_eq!(result.header("Content-Type"), Some("text/plain"));
    }
}
