// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Semantic header set and per-transport translation
//!
//! Callers describe headers by meaning (`accept`, `cache`, `frame`, ...)
//! rather than wire name. Translation validates each value against the
//! selected transport's accepted vocabulary; invalid `cache`/`accept`
//! values are dropped with a warning, never fatal.

use crate::transport::TransportKind;

/// Wire header names
pub mod wire {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const AUTHORIZATION: &str = "authorization";
    pub const CACHE_CONTROL: &str = "cache-control";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const ORIGIN: &str = "origin";
    pub const REFERER: &str = "referer";
    pub const X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
    pub const X_CSRF_TOKEN: &str = "x-csrf-token";
    pub const X_FRAME_OPTIONS: &str = "x-frame-options";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
}

/// Accept values recognized by both transports
const ACCEPT_VALUES: &[&str] = &[
    "application/json",
    "application/xml",
    "text/html",
    "text/plain",
    "*/*",
];

/// Cache directives the legacy transport sends as Cache-Control
const LEGACY_CACHE_VALUES: &[&str] = &["no-cache", "no-store", "public", "private"];

/// Cache modes the modern transport understands
const MODERN_CACHE_VALUES: &[&str] = &[
    "default",
    "no-store",
    "no-cache",
    "reload",
    "force-cache",
    "only-if-cached",
];

/// Caching hint: a coarse boolean or an explicit directive string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheHint {
    /// `true` maps to "public" (legacy) / "force-cache" (modern),
    /// `false` to "no-cache" on both
    Flag(bool),
    /// Directive validated against the transport's vocabulary
    Directive(String),
}

impl From<bool> for CacheHint {
    fn from(flag: bool) -> Self {
        CacheHint::Flag(flag)
    }
}

impl From<&str> for CacheHint {
    fn from(directive: &str) -> Self {
        CacheHint::Directive(directive.to_string())
    }
}

/// Caller-facing semantic header collection
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    /// Expected response type
    pub accept: Option<String>,
    /// Caching hint
    pub cache: Option<CacheHint>,
    /// Cookie header value
    pub cookie: Option<String>,
    /// Referer of the request
    pub referer: Option<String>,
    /// Origin of the request
    pub origin: Option<String>,
    /// Accept-Language value
    pub lang: Option<String>,
    /// Authorization token for this request
    pub authorize: Option<String>,
    /// Frame options: `true` is SAMEORIGIN, `false` is DENY
    pub frame: Option<bool>,
    /// Send X-Content-Type-Options: nosniff
    pub nosniff: bool,
    /// Explicit content type; payload encoding may override it
    pub content_type: Option<String>,
}

impl HeaderSet {
    /// Create an empty header set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accept value
    pub fn accept(mut self, value: impl Into<String>) -> Self {
        self.accept = Some(value.into());
        self
    }

    /// Set the caching hint
    pub fn cache(mut self, hint: impl Into<CacheHint>) -> Self {
        self.cache = Some(hint.into());
        self
    }

    /// Set the cookie value
    pub fn cookie(mut self, value: impl Into<String>) -> Self {
        self.cookie = Some(value.into());
        self
    }

    /// Set the referer
    pub fn referer(mut self, value: impl Into<String>) -> Self {
        self.referer = Some(value.into());
        self
    }

    /// Set the origin
    pub fn origin(mut self, value: impl Into<String>) -> Self {
        self.origin = Some(value.into());
        self
    }

    /// Set the language
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Set the per-request authorization token
    pub fn authorize(mut self, value: impl Into<String>) -> Self {
        self.authorize = Some(value.into());
        self
    }

    /// Set the frame options flag
    pub fn frame(mut self, same_origin: bool) -> Self {
        self.frame = Some(same_origin);
        self
    }

    /// Request nosniff
    pub fn nosniff(mut self, nosniff: bool) -> Self {
        self.nosniff = nosniff;
        self
    }

    /// Set an explicit content type
    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    /// Validate against `kind`'s vocabulary and produce the wire-ready form
    pub fn translate(&self, kind: TransportKind) -> TranslatedHeaders {
        let mut out = TranslatedHeaders::default();

        if let Some(accept) = &self.accept {
            if ACCEPT_VALUES.contains(&accept.as_str()) {
                out.accept = Some(accept.clone());
            } else {
                tracing::warn!(accept = %accept, "dropping unrecognized accept value");
            }
        }

        if let Some(hint) = &self.cache {
            out.cache = translate_cache(hint, kind);
        }

        out.cookie = self.cookie.clone();
        out.referer = self.referer.clone();
        out.origin = self.origin.clone();
        out.lang = self.lang.clone();
        out.authorize = self.authorize.clone();
        out.frame = self
            .frame
            .map(|same_origin| if same_origin { "SAMEORIGIN" } else { "DENY" });
        out.nosniff = self.nosniff;
        out.content_type = self.content_type.clone();
        out
    }
}

fn translate_cache(hint: &CacheHint, kind: TransportKind) -> Option<String> {
    match hint {
        CacheHint::Flag(true) => Some(
            match kind {
                TransportKind::Legacy => "public",
                TransportKind::Modern => "force-cache",
            }
            .to_string(),
        ),
        CacheHint::Flag(false) => Some("no-cache".to_string()),
        CacheHint::Directive(value) => {
            let valid = match kind {
                TransportKind::Legacy => {
                    LEGACY_CACHE_VALUES.contains(&value.as_str()) || value.starts_with("max-age=")
                }
                TransportKind::Modern => MODERN_CACHE_VALUES.contains(&value.as_str()),
            };
            if valid {
                Some(value.clone())
            } else {
                tracing::warn!(cache = %value, transport = ?kind, "dropping invalid cache value");
                None
            }
        }
    }
}

/// Transport-ready header values, produced by [`HeaderSet::translate`]
#[derive(Debug, Clone, Default)]
pub struct TranslatedHeaders {
    pub accept: Option<String>,
    pub cache: Option<String>,
    pub cookie: Option<String>,
    pub referer: Option<String>,
    pub origin: Option<String>,
    pub lang: Option<String>,
    pub authorize: Option<String>,
    pub frame: Option<&'static str>,
    pub nosniff: bool,
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_flag_per_transport() {
        let set = HeaderSet::new().cache(true);
        assert_eq!(
            set.translate(TransportKind::Legacy).cache.as_deref(),
            Some("public")
        );
        assert_eq!(
            set.translate(TransportKind::Modern).cache.as_deref(),
            Some("force-cache")
        );

        let set = HeaderSet::new().cache(false);
        assert_eq!(
            set.translate(TransportKind::Legacy).cache.as_deref(),
            Some("no-cache")
        );
        assert_eq!(
            set.translate(TransportKind::Modern).cache.as_deref(),
            Some("no-cache")
        );
    }

    #[test]
    fn test_cache_directive_vocabularies() {
        // max-age prefix is legacy-only
        let set = HeaderSet::new().cache("max-age=3600");
        assert_eq!(
            set.translate(TransportKind::Legacy).cache.as_deref(),
            Some("max-age=3600")
        );
        assert!(set.translate(TransportKind::Modern).cache.is_none());

        // reload is modern-only
        let set = HeaderSet::new().cache("reload");
        assert!(set.translate(TransportKind::Legacy).cache.is_none());
        assert_eq!(
            set.translate(TransportKind::Modern).cache.as_deref(),
            Some("reload")
        );
    }

    #[test]
    fn test_invalid_cache_dropped() {
        let set = HeaderSet::new().cache("banana");
        assert!(set.translate(TransportKind::Legacy).cache.is_none());
        assert!(set.translate(TransportKind::Modern).cache.is_none());
    }

    #[test]
    fn test_accept_allow_list() {
        let set = HeaderSet::new().accept("application/json");
        assert_eq!(
            set.translate(TransportKind::Modern).accept.as_deref(),
            Some("application/json")
        );

        let set = HeaderSet::new().accept("application/x-banana");
        assert!(set.translate(TransportKind::Modern).accept.is_none());
    }

    #[test]
    fn test_frame_and_nosniff() {
        let set = HeaderSet::new().frame(true).nosniff(true);
        let translated = set.translate(TransportKind::Legacy);
        assert_eq!(translated.frame, Some("SAMEORIGIN"));
        assert!(translated.nosniff);

        let set = HeaderSet::new().frame(false);
        assert_eq!(set.translate(TransportKind::Legacy).frame, Some("DENY"));
    }

    #[test]
    fn test_passthrough_values() {
        let set = HeaderSet::new()
            .cookie("session=abc")
            .referer("https://example.com/")
            .lang("en-US");
        let translated = set.translate(TransportKind::Modern);
        assert_eq!(translated.cookie.as_deref(), Some("session=abc"));
        assert_eq!(translated.referer.as_deref(), Some("https://example.com/"));
        assert_eq!(translated.lang.as_deref(), Some("en-US"));
    }
}
