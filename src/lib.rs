// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Courier - Normalized HTTP Request Dispatch
//!
//! One request-builder API over two transports: a legacy callback-style
//! mechanism (cancellable, progress-capable, strict JSON results) and a
//! modern promise-style one (timer-based cancellation, content-type
//! driven results).
//!
//! ## Features
//!
//! - Semantic headers: accept/cache/frame/nosniff validated per transport
//! - CSRF and Authorization injection from an injected config
//! - Unit-inferred timeouts normalized to milliseconds
//! - Upload and download progress events with computed percentages
//! - Content-type sniffing: JSON, text, data URLs for images/PDF, raw bytes
//! - Optional UI-blocking element opened/closed around every launch
//! - Post-dispatch hook invoked exactly once per settlement
//! - Form-to-request binding with overridable address/payload derivation
//!
//! ## Example
//!
//! ```rust,no_run
//! use courier::{Dispatcher, DispatcherConfig, DispatchOptions, HeaderSet, Payload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = Dispatcher::with_config(
//!         DispatcherConfig::new().csrf("token-from-page"),
//!     )?;
//!
//!     let result = dispatcher
//!         .dispatch("https://api.example.com/users", DispatchOptions::new().timeout(5))?
//!         .headers(HeaderSet::new().accept("application/json").cache(false))
//!         .launch(Payload::Json(serde_json::json!({ "name": "john" })))
//!         .await?;
//!
//!     println!("{:?}", result.result);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod headers;
pub mod outcome;
pub mod transport;

// Re-exports for convenience

// Dispatch
pub use dispatch::{DispatchHandle, DispatchOptions, Dispatcher, Method, Payload};

// Configuration
pub use config::{AfterHook, DispatcherConfig, UiBlocker};

// Headers
pub use headers::{CacheHint, HeaderSet, TranslatedHeaders};

// Results
pub use outcome::{Body, DispatchResult, ResponseInfo};

// Errors
pub use error::{Error, ErrorKind, Result};

// Transports
pub use transport::{
    AbortHandle, ProgressDirection, ProgressEvent, Transport, TransportKind,
};

// Forms
pub use form::{Form, FormBinding};

/// Courier version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
