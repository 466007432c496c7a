// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport-agnostic request description
//!
//! Normalizes method, timeout and credentials before a transport is
//! touched. Immutable once dispatch begins.

use std::time::Duration;

use url::Url;

use crate::headers::TranslatedHeaders;

/// Allowed request methods; anything else falls back to `Post`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    Put,
    Delete,
    #[default]
    Post,
    Get,
    Patch,
}

impl Method {
    /// Parse a method name, case-insensitively
    ///
    /// Unrecognized names fall back to `Post` with a diagnostic instead
    /// of failing; callers relying on this are covered by compatibility
    /// tests.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "put" => Method::Put,
            "delete" => Method::Delete,
            "post" => Method::Post,
            "get" => Method::Get,
            "patch" => Method::Patch,
            other => {
                tracing::warn!(method = %other, "unrecognized method, falling back to post");
                Method::Post
            }
        }
    }

    /// Lower-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Post => "post",
            Method::Get => "get",
            Method::Patch => "patch",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Post => reqwest::Method::POST,
            Method::Get => reqwest::Method::GET,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Infer the unit of an ambiguous numeric timeout and normalize to
/// milliseconds
///
/// Values under 10 read as seconds, under 100 as hundredths of a
/// second, under 1000 as tens of milliseconds, everything else as
/// milliseconds already. Zero disables the timeout.
pub fn normalize_timeout(timeout: u64) -> Option<Duration> {
    if timeout == 0 {
        return None;
    }
    let millis = if timeout < 10 {
        timeout * 1000
    } else if timeout < 100 {
        timeout * 100
    } else if timeout < 1000 {
        timeout * 10
    } else {
        timeout
    };
    Some(Duration::from_millis(millis))
}

/// Normalized, transport-agnostic request representation
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Resolved target address
    pub address: Url,
    /// Request method
    pub method: Method,
    /// Whether credentials travel with the request
    pub credentials: bool,
    /// Normalized timeout
    pub timeout: Option<Duration>,
    /// Translated header set
    pub headers: TranslatedHeaders,
    /// CSRF token for this request
    pub csrf: Option<String>,
    /// Default Authorization value from the dispatcher config
    pub default_authorization: Option<String>,
}

impl RequestDescriptor {
    /// Authorization value: the per-request header wins over the
    /// dispatcher-wide default
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .authorize
            .as_deref()
            .or(self.default_authorization.as_deref())
    }
}
