// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request dispatch layer
//!
//! [`Dispatcher`] turns a target address plus an options bag into a
//! [`DispatchHandle`] bound to one transport. The handle carries the
//! header builder step, the progress slot and the abort operation, and
//! settles exactly once per [`DispatchHandle::launch`].

mod descriptor;
mod payload;
pub(crate) mod status;

use std::sync::Arc;

use url::Url;

use crate::config::DispatcherConfig;
use crate::error::{Error, Result};
use crate::headers::HeaderSet;
use crate::outcome::DispatchResult;
use crate::transport::{
    AbortHandle, LegacyTransport, ModernTransport, ProgressEvent, ProgressFn, Transport,
    TransportKind,
};

pub use descriptor::{normalize_timeout, Method, RequestDescriptor};
pub use payload::{EncodedPayload, Payload};

/// Recognized per-call options
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    /// Method name; unrecognized values fall back to post
    pub method: Option<String>,
    /// Ambiguous numeric timeout, unit inferred from magnitude
    pub timeout: Option<u64>,
    /// Whether credentials travel with the request
    pub credentials: bool,
    /// CSRF token override for this call
    pub csrf: Option<String>,
    /// Force the legacy transport
    pub use_legacy_transport: bool,
}

impl DispatchOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method name
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the unit-inferred timeout
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send credentials with the request
    pub fn credentials(mut self, credentials: bool) -> Self {
        self.credentials = credentials;
        self
    }

    /// Override the CSRF token for this call
    pub fn csrf(mut self, token: impl Into<String>) -> Self {
        self.csrf = Some(token.into());
        self
    }

    /// Force the legacy transport
    pub fn use_legacy_transport(mut self, legacy: bool) -> Self {
        self.use_legacy_transport = legacy;
        self
    }
}

/// Request dispatcher: config plus a shared HTTP client
pub struct Dispatcher {
    client: reqwest::Client,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create a dispatcher with an explicit configuration
    pub fn with_config(config: DispatcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Get the injected configuration
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Build a dispatch handle for `address`
    ///
    /// Fails synchronously, before any transport is touched, when the
    /// address is missing or unparseable. Transport choice is fixed
    /// here for the lifetime of the dispatch.
    pub fn dispatch(&self, address: &str, options: DispatchOptions) -> Result<DispatchHandle> {
        if address.trim().is_empty() {
            return Err(Error::MissingAddress);
        }
        let address = self.resolve(address)?;

        let method = Method::parse(options.method.as_deref().unwrap_or("post"));
        let csrf = options.csrf.or_else(|| self.config.csrf.clone());

        // Credentials are required for cookies to travel with the CSRF
        // protection, so a present token forces them on
        let credentials = options.credentials || csrf.is_some();

        let timeout = match options.timeout {
            Some(value) => normalize_timeout(value),
            None => self.config.timeout,
        };

        let kind = if options.use_legacy_transport || !self.config.modern_transport_available {
            TransportKind::Legacy
        } else {
            TransportKind::Modern
        };
        let transport: Arc<dyn Transport> = match kind {
            TransportKind::Legacy => Arc::new(LegacyTransport::new(self.client.clone())),
            TransportKind::Modern => Arc::new(ModernTransport::new(self.client.clone())),
        };

        Ok(DispatchHandle {
            descriptor: RequestDescriptor {
                address,
                method,
                credentials,
                timeout,
                headers: HeaderSet::default().translate(kind),
                csrf,
                default_authorization: self.config.authorization.clone(),
            },
            transport,
            abort: AbortHandle::new(),
            progress: None,
            config: self.config.clone(),
            skip_blocker: false,
        })
    }

    fn resolve(&self, address: &str) -> Result<Url> {
        match &self.config.base_url {
            Some(base) => Ok(base.join(address)?),
            None => Ok(Url::parse(address)?),
        }
    }
}

/// One in-flight dispatch, bound to a transport
///
/// Immutable after construction except the progress slot; settles at
/// most once through [`launch`](Self::launch).
pub struct DispatchHandle {
    descriptor: RequestDescriptor,
    transport: Arc<dyn Transport>,
    abort: AbortHandle,
    progress: Option<Arc<ProgressFn>>,
    config: DispatcherConfig,
    skip_blocker: bool,
}

impl std::fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("kind", &self.kind())
            .field("descriptor", &self.descriptor)
            .field("skip_blocker", &self.skip_blocker)
            .finish()
    }
}

impl DispatchHandle {
    /// Read-only transport tag for this dispatch
    pub fn kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// The normalized request description
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Builder step: validate and translate a semantic header set into
    /// this transport's internal form
    pub fn headers(mut self, headers: HeaderSet) -> Self {
        self.descriptor.headers = headers.translate(self.kind());
        self
    }

    /// Set the progress callback slot
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressEvent) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Leave the UI blocker closed for this launch
    pub fn skip_blocker(mut self) -> Self {
        self.skip_blocker = true;
        self
    }

    /// Cloneable cancellation handle, usable while a launch is in flight
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Cancel this dispatch with an optional reason
    ///
    /// The legacy transport rejects with the abort kind, the modern one
    /// with the timeout kind.
    pub fn abort(&self, reason: Option<String>) {
        self.abort.abort(reason);
    }

    /// Send the request and settle exactly once
    ///
    /// Opens the configured UI blocker (unless skipped), runs the
    /// transport, closes the blocker on every completion path and
    /// invokes the post-dispatch hook once, strictly after settlement,
    /// for both outcomes.
    pub async fn launch(self, payload: Payload) -> Result<DispatchResult> {
        if !self.skip_blocker {
            if let Some(blocker) = &self.config.blocker {
                blocker.open();
            }
        }

        let encoded = payload.encode(self.descriptor.headers.content_type.clone());
        let outcome = self
            .transport
            .send(&self.descriptor, encoded, self.progress.clone(), self.abort.clone())
            .await;

        if let Some(blocker) = &self.config.blocker {
            blocker.close();
        }
        (self.config.after.as_ref())(&outcome);
        outcome
    }
}
