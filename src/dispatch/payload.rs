// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Payload encoding
//!
//! Form payloads are never reinterpreted; strings force `text/plain`;
//! JSON objects are serialized and force `application/json`; anything
//! else passes through with no forced content type.

use bytes::Bytes;

/// Caller-supplied request payload
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// No body
    #[default]
    None,
    /// Form field set, sent form-encoded without reinterpretation
    Form(Vec<(String, String)>),
    /// Plain string, sent verbatim as `text/plain`
    Text(String),
    /// JSON value; object literals force `application/json`
    Json(serde_json::Value),
    /// Raw bytes, passed through with no forced content type
    Bytes(Bytes),
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

/// Wire-ready payload produced by [`Payload::encode`]
#[derive(Debug, Clone, Default)]
pub struct EncodedPayload {
    /// Body bytes, if any
    pub bytes: Option<Bytes>,
    /// Content type forced by the encoding, or inherited from the
    /// header set
    pub content_type: Option<String>,
}

impl Payload {
    /// Encode for the wire. `header_content_type` is the explicit value
    /// from the header set; encodings that force a content type override
    /// it.
    pub fn encode(self, header_content_type: Option<String>) -> EncodedPayload {
        match self {
            Payload::None => EncodedPayload {
                bytes: None,
                content_type: header_content_type,
            },
            Payload::Form(fields) => EncodedPayload {
                bytes: Some(Bytes::from(form_encode(&fields))),
                content_type: Some("application/x-www-form-urlencoded".to_string()),
            },
            Payload::Text(text) => EncodedPayload {
                bytes: Some(Bytes::from(text)),
                content_type: Some("text/plain".to_string()),
            },
            Payload::Json(value) => {
                // Only object literals force the JSON content type;
                // other values serialize but keep the caller's header
                let forced = value.is_object();
                EncodedPayload {
                    bytes: Some(Bytes::from(value.to_string())),
                    content_type: if forced {
                        Some("application/json".to_string())
                    } else {
                        header_content_type
                    },
                }
            }
            Payload::Bytes(bytes) => EncodedPayload {
                bytes: Some(bytes),
                content_type: header_content_type,
            },
        }
    }
}

/// application/x-www-form-urlencoded encoding
fn form_encode(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn url_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                for byte in c.to_string().bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_payload_forces_json() {
        let encoded = Payload::Json(serde_json::json!({"a": 1})).encode(None);
        assert_eq!(encoded.bytes.as_deref(), Some(br#"{"a":1}"#.as_slice()));
        assert_eq!(encoded.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_non_object_json_keeps_header_content_type() {
        let encoded =
            Payload::Json(serde_json::json!([1, 2])).encode(Some("application/json".into()));
        assert_eq!(encoded.content_type.as_deref(), Some("application/json"));

        let encoded = Payload::Json(serde_json::Value::Null).encode(None);
        assert!(encoded.content_type.is_none());
    }

    #[test]
    fn test_string_payload_forces_text_plain() {
        let encoded = Payload::from("hello").encode(None);
        assert_eq!(encoded.bytes.as_deref(), Some(b"hello".as_slice()));
        assert_eq!(encoded.content_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_string_payload_overrides_header_content_type() {
        let encoded = Payload::from("hello").encode(Some("application/xml".into()));
        assert_eq!(encoded.content_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_bytes_pass_through_unmodified() {
        let encoded = Payload::Bytes(Bytes::from_static(&[0, 159, 146])).encode(None);
        assert_eq!(encoded.bytes.as_deref(), Some([0, 159, 146].as_slice()));
        assert!(encoded.content_type.is_none());
    }

    #[test]
    fn test_form_encoding() {
        let encoded = Payload::Form(vec![
            ("name".into(), "john doe".into()),
            ("q".into(), "a&b".into()),
        ])
        .encode(Some("text/plain".into()));
        assert_eq!(encoded.bytes.as_deref(), Some(b"name=john+doe&q=a%26b".as_slice()));
        assert_eq!(
            encoded.content_type.as_deref(),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_empty_payload() {
        let encoded = Payload::None.encode(Some("text/html".into()));
        assert!(encoded.bytes.is_none());
        assert_eq!(encoded.content_type.as_deref(), Some("text/html"));
    }
}
