// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Modern promise-style transport
//!
//! Timeout is an armed timer that cancels the in-flight request; the
//! timer is dropped on every completion path. Result interpretation is
//! content-type driven; images and PDFs come back as base64 data URLs
//! after an asynchronous body read.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;

use crate::dispatch::{EncodedPayload, RequestDescriptor};
use crate::error::{Error, Result};
use crate::headers::wire;
use crate::outcome::{Body, DispatchResult, ResponseInfo};

use super::legacy::map_send_error;
use super::{apply_headers, collect_headers, AbortHandle, ProgressFn, Transport, TransportKind};

/// The promise-style transport
pub struct ModernTransport {
    client: reqwest::Client,
}

impl ModernTransport {
    /// Create a modern transport over a shared client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn perform(
        &self,
        descriptor: &RequestDescriptor,
        payload: EncodedPayload,
    ) -> Result<DispatchResult> {
        let mut builder = self
            .client
            .request(descriptor.method.into(), descriptor.address.clone());

        // Credentials boolean translates to an inclusion mode: omit
        // strips the cookie header
        builder = apply_headers(
            builder,
            descriptor,
            payload.content_type.as_deref(),
            descriptor.credentials,
        );

        if let Some(bytes) = payload.bytes {
            builder = builder.body(bytes);
        }

        tracing::debug!(
            address = %descriptor.address,
            method = descriptor.method.as_str(),
            "sending modern-transport request"
        );

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let url = response.url().clone();
        let headers = collect_headers(response.headers());
        let content_type = headers
            .get(wire::CONTENT_TYPE)
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_string());

        let body = response.bytes().await.map_err(map_send_error)?;

        if !status.is_success() {
            return Err(crate::dispatch::status::translate(
                status.as_u16(),
                &status_text,
                &body,
            ));
        }

        let result = match content_type.as_deref() {
            Some(ct) if ct.contains("application/json") => {
                let parsed: serde_json::Value =
                    serde_json::from_slice(&body).map_err(|e| Error::Parse {
                        raw: String::from_utf8_lossy(&body).into_owned(),
                        source: e,
                    })?;
                Body::Json(parsed)
            }
            Some(ct) if ct.contains("text/html") || ct.contains("text/plain") => {
                Body::Text(String::from_utf8_lossy(&body).into_owned())
            }
            Some(ct) if ct.contains("image") || ct.contains("application/pdf") => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(&body);
                Body::DataUrl(format!("data:{};base64,{}", ct, encoded))
            }
            _ => Body::Bytes(body.clone()),
        };

        Ok(DispatchResult {
            result,
            response: ResponseInfo {
                status: status.as_u16(),
                status_text,
                url,
                body,
            },
            headers,
            content_type,
        })
    }
}

#[async_trait]
impl Transport for ModernTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Modern
    }

    async fn send(
        &self,
        descriptor: &RequestDescriptor,
        payload: EncodedPayload,
        _progress: Option<Arc<ProgressFn>>,
        abort: AbortHandle,
    ) -> Result<DispatchResult> {
        // Cancellation on this transport always surfaces as the timeout
        // kind, whether the armed timer or the caller triggered it
        tokio::select! {
            result = self.perform(descriptor, payload) => result,
            _ = abort.cancelled() => Err(Error::Timeout {
                reason: abort.reason(),
            }),
            _ = arm_timer(descriptor.timeout) => Err(Error::Timeout { reason: None }),
        }
    }
}

/// Pending forever when no timeout was specified
async fn arm_timer(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}
