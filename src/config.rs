// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Dispatcher configuration
//!
//! All cross-call state lives here and is injected into the dispatcher
//! factory: default CSRF/Authorization tokens, the post-dispatch hook,
//! the optional UI blocker and the transport capability flag. The
//! config is read at the start of each dispatch; reconfiguring while a
//! request is in flight requires building a new dispatcher.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::Error;
use crate::outcome::DispatchResult;

/// Post-dispatch hook, invoked exactly once with the settled outcome
pub type AfterHook = Arc<dyn Fn(&Result<DispatchResult, Error>) + Send + Sync>;

/// Externally supplied UI-blocking element
///
/// Opened when a launch begins (unless the caller opts out) and closed
/// on every completion path, success or failure.
pub trait UiBlocker: Send + Sync {
    /// Display the blocker
    fn open(&self);
    /// Hide the blocker
    fn close(&self);
}

/// Dispatcher configuration
#[derive(Clone)]
pub struct DispatcherConfig {
    /// CSRF token merged into every dispatch unless overridden per call.
    /// A present token forces credentials on, since the protection
    /// relies on cookies travelling with the request.
    pub csrf: Option<String>,
    /// Authorization header value merged into every dispatch
    pub authorization: Option<String>,
    /// Post-dispatch hook, default no-op
    pub after: AfterHook,
    /// Optional UI blocker
    pub blocker: Option<Arc<dyn UiBlocker>>,
    /// Host-environment capability flag: when false, every dispatch
    /// falls back to the legacy transport
    pub modern_transport_available: bool,
    /// Origin against which relative target addresses are resolved
    pub base_url: Option<Url>,
    /// Default request timeout applied when the per-call options carry none
    pub timeout: Option<Duration>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            csrf: None,
            authorization: None,
            after: Arc::new(|_| {}),
            blocker: None,
            modern_transport_available: true,
            base_url: None,
            timeout: None,
        }
    }
}

impl DispatcherConfig {
    /// Create a new dispatcher config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default CSRF token
    pub fn csrf(mut self, token: impl Into<String>) -> Self {
        self.csrf = Some(token.into());
        self
    }

    /// Set the default Authorization header value
    pub fn authorization(mut self, token: impl Into<String>) -> Self {
        self.authorization = Some(token.into());
        self
    }

    /// Set the post-dispatch hook
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Result<DispatchResult, Error>) + Send + Sync + 'static,
    {
        self.after = Arc::new(hook);
        self
    }

    /// Set the UI blocker
    pub fn blocker(mut self, blocker: Arc<dyn UiBlocker>) -> Self {
        self.blocker = Some(blocker);
        self
    }

    /// Override the modern-transport capability flag
    pub fn modern_transport_available(mut self, available: bool) -> Self {
        self.modern_transport_available = available;
        self
    }

    /// Set the origin for relative target addresses
    pub fn base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }

    /// Set the default request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for DispatcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherConfig")
            .field("csrf", &self.csrf.as_deref().map(|_| "<set>"))
            .field("authorization", &self.authorization.as_deref().map(|_| "<set>"))
            .field("blocker", &self.blocker.is_some())
            .field("modern_transport_available", &self.modern_transport_available)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
