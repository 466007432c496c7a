// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport capability layer
//!
//! The two request-sending mechanisms are implementations of one
//! [`Transport`] trait, selected once at dispatch construction and
//! fixed for the lifetime of that dispatch. The legacy transport is
//! event-driven (progress events, native abort); the modern one is
//! promise-styled (armed-timer cancellation, content-type driven
//! result interpretation).

mod legacy;
mod modern;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::dispatch::{EncodedPayload, RequestDescriptor};
use crate::error::Result;
use crate::headers::wire;
use crate::outcome::DispatchResult;

pub use legacy::LegacyTransport;
pub use modern::ModernTransport;

/// Which transport a dispatch is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Callback-style transport: cancellable, progress-capable,
    /// strict JSON result interpretation
    Legacy,
    /// Promise-style transport: timer-based cancellation,
    /// content-type driven result interpretation
    Modern,
}

/// Direction of a progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressDirection {
    Upload,
    Download,
}

/// One progress tick, augmented with a computed percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub direction: ProgressDirection,
    /// Bytes transferred so far
    pub loaded: u64,
    /// Total bytes, when known
    pub total: Option<u64>,
    /// loaded / total * 100, 0.0 when the total is unknown
    pub percent: f64,
}

impl ProgressEvent {
    pub(crate) fn new(direction: ProgressDirection, loaded: u64, total: Option<u64>) -> Self {
        let percent = match total {
            Some(total) if total > 0 => (loaded as f64 / total as f64) * 100.0,
            _ => 0.0,
        };
        Self {
            direction,
            loaded,
            total,
            percent,
        }
    }
}

/// Progress callback slot type
pub type ProgressFn = dyn Fn(ProgressEvent) + Send + Sync;

/// Cancellation handle shared between a dispatch handle and its transport
///
/// Cloneable; a dispatch observes at most one trigger. May race with a
/// completing response, in which case the transport settles once with
/// whichever side won.
#[derive(Clone, Default)]
pub struct AbortHandle {
    notify: Arc<Notify>,
    triggered: Arc<AtomicBool>,
    reason: Arc<Mutex<Option<String>>>,
}

impl AbortHandle {
    /// Create an untriggered handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation with an optional reason
    pub fn abort(&self, reason: Option<String>) {
        *self.reason.lock() = reason;
        self.triggered.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Whether cancellation has been triggered
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// The reason supplied at trigger time, if any
    pub fn reason(&self) -> Option<String> {
        self.reason.lock().clone()
    }

    /// Resolve once cancellation is triggered
    pub(crate) async fn cancelled(&self) {
        if self.is_triggered() {
            return;
        }
        // notify_one stores a permit, so a trigger landing before this
        // await still resolves it
        self.notify.notified().await;
    }
}

impl std::fmt::Debug for AbortHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbortHandle")
            .field("triggered", &self.is_triggered())
            .finish()
    }
}

/// One request-sending mechanism
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fixed transport tag
    fn kind(&self) -> TransportKind;

    /// Send the request described by `descriptor` and settle exactly once
    async fn send(
        &self,
        descriptor: &RequestDescriptor,
        payload: EncodedPayload,
        progress: Option<Arc<ProgressFn>>,
        abort: AbortHandle,
    ) -> Result<DispatchResult>;
}

/// Lower-cased response header map shared by both transports
pub(crate) fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_ascii_lowercase(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// Attach the translated header set and token headers to a request builder
pub(crate) fn apply_headers(
    mut builder: reqwest::RequestBuilder,
    descriptor: &RequestDescriptor,
    content_type: Option<&str>,
    include_cookies: bool,
) -> reqwest::RequestBuilder {
    let headers = &descriptor.headers;

    if let Some(csrf) = descriptor.csrf.as_deref() {
        builder = builder.header(wire::X_CSRF_TOKEN, csrf);
    }
    if let Some(content_type) = content_type {
        builder = builder.header(wire::CONTENT_TYPE, content_type);
    }
    if let Some(accept) = headers.accept.as_deref() {
        builder = builder.header(wire::ACCEPT, accept);
    }
    if let Some(cache) = headers.cache.as_deref() {
        builder = builder.header(wire::CACHE_CONTROL, cache);
    }
    if include_cookies {
        if let Some(cookie) = headers.cookie.as_deref() {
            builder = builder.header(wire::COOKIE, cookie);
        }
    }
    if let Some(referer) = headers.referer.as_deref() {
        builder = builder.header(wire::REFERER, referer);
    }
    if let Some(origin) = headers.origin.as_deref() {
        builder = builder.header(wire::ORIGIN, origin);
    }
    if let Some(lang) = headers.lang.as_deref() {
        builder = builder.header(wire::ACCEPT_LANGUAGE, lang);
    }
    if let Some(authorize) = descriptor.authorization() {
        builder = builder.header(wire::AUTHORIZATION, authorize);
    }
    if let Some(frame) = headers.frame {
        builder = builder.header(wire::X_FRAME_OPTIONS, frame);
    }
    if headers.nosniff {
        builder = builder.header(wire::X_CONTENT_TYPE_OPTIONS, "nosniff");
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        let event = ProgressEvent::new(ProgressDirection::Download, 50, Some(200));
        assert_eq!(event.percent, 25.0);

        let event = ProgressEvent::new(ProgressDirection::Upload, 50, None);
        assert_eq!(event.percent, 0.0);

        let event = ProgressEvent::new(ProgressDirection::Download, 10, Some(0));
        assert_eq!(event.percent, 0.0);
    }

    #[test]
    fn test_abort_handle_state() {
        let handle = AbortHandle::new();
        assert!(!handle.is_triggered());
        assert!(handle.reason().is_none());

        handle.abort(Some("stop".into()));
        assert!(handle.is_triggered());
        assert_eq!(handle.reason().as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn test_abort_handle_resolves_after_trigger() {
        let handle = AbortHandle::new();
        handle.abort(None);
        // Must resolve immediately rather than hang
        handle.cancelled().await;
    }
}
