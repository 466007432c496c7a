// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Legacy callback-style transport
//!
//! Progress-capable and cancellable. Bodies are streamed in both
//! directions so upload and download progress events can be emitted.
//! Result interpretation is strict: status 200 means the body must be
//! JSON; an unparseable body is a server-side error, not a success.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;

use crate::dispatch::{EncodedPayload, RequestDescriptor};
use crate::error::{Error, Result};
use crate::headers::wire;
use crate::outcome::{Body, DispatchResult, ResponseInfo};

use super::{
    apply_headers, collect_headers, AbortHandle, ProgressDirection, ProgressEvent, ProgressFn,
    Transport, TransportKind,
};

/// Upload stream chunk size
const UPLOAD_CHUNK: usize = 16 * 1024;

/// The callback-style transport
pub struct LegacyTransport {
    client: reqwest::Client,
}

impl LegacyTransport {
    /// Create a legacy transport over a shared client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn perform(
        &self,
        descriptor: &RequestDescriptor,
        payload: EncodedPayload,
        progress: Option<Arc<ProgressFn>>,
    ) -> Result<DispatchResult> {
        let mut builder = self
            .client
            .request(descriptor.method.into(), descriptor.address.clone())
            .header(wire::X_REQUESTED_WITH, "XMLHttpRequest");

        builder = apply_headers(builder, descriptor, payload.content_type.as_deref(), true);

        if let Some(timeout) = descriptor.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(bytes) = payload.bytes {
            builder = match progress.clone() {
                Some(progress) => builder.body(progress_body(bytes, progress)),
                None => builder.body(bytes),
            };
        }

        tracing::debug!(
            address = %descriptor.address,
            method = descriptor.method.as_str(),
            "sending legacy-transport request"
        );

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let url = response.url().clone();
        let headers = collect_headers(response.headers());
        let total = response.content_length();

        // Streamed read so download progress can be reported per chunk
        let mut buf: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_send_error)?;
            buf.extend_from_slice(&chunk);
            if let Some(progress) = &progress {
                (progress.as_ref())(ProgressEvent::new(
                    ProgressDirection::Download,
                    buf.len() as u64,
                    total,
                ));
            }
        }
        let body = Bytes::from(buf);

        if status.as_u16() != 200 {
            return Err(crate::dispatch::status::translate(
                status.as_u16(),
                &status_text,
                &body,
            ));
        }

        let parsed: serde_json::Value = serde_json::from_slice(&body).map_err(|e| Error::Parse {
            raw: String::from_utf8_lossy(&body).into_owned(),
            source: e,
        })?;

        let content_type = headers
            .get(wire::CONTENT_TYPE)
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_string());

        Ok(DispatchResult {
            result: Body::Json(parsed),
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
impl Transport for LegacyTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Legacy
    }

    async fn send(
        &self,
        descriptor: &RequestDescriptor,
        payload: EncodedPayload,
        progress: Option<Arc<ProgressFn>>,
        abort: AbortHandle,
    ) -> Result<DispatchResult> {
        tokio::select! {
            result = self.perform(descriptor, payload, progress) => result,
            _ = abort.cancelled() => Err(Error::Abort {
                reason: abort.reason(),
            }),
        }
    }
}

/// Split body bytes into upload-sized chunks
fn chunk_bytes(bytes: &Bytes, size: usize) -> Vec<Bytes> {
    (0..bytes.len())
        .step_by(size.max(1))
        .map(|start| bytes.slice(start..bytes.len().min(start + size)))
        .collect()
}

/// Wrap body bytes in a chunked stream emitting upload progress
fn progress_body(bytes: Bytes, progress: Arc<ProgressFn>) -> reqwest::Body {
    let total = bytes.len() as u64;
    let chunks = chunk_bytes(&bytes, UPLOAD_CHUNK);

    let mut sent = 0u64;
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        (progress.as_ref())(ProgressEvent::new(
            ProgressDirection::Upload,
            sent,
            Some(total),
        ));
        Ok::<Bytes, std::io::Error>(chunk)
    }));

    reqwest::Body::wrap_stream(stream)
}

/// Map a reqwest failure onto the dispatch error taxonomy
pub(crate) fn map_send_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout { reason: None }
    } else {
        Error::Network {
            detail: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_covers_all_bytes() {
        let bytes = Bytes::from(vec![7u8; UPLOAD_CHUNK * 2 + 5]);
        let chunks = chunk_bytes(&bytes, UPLOAD_CHUNK);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), UPLOAD_CHUNK);
        assert_eq!(chunks[2].len(), 5);
        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total, bytes.len());
    }

    #[test]
    fn test_chunking_edge_sizes() {
        assert!(chunk_bytes(&Bytes::new(), UPLOAD_CHUNK).is_empty());
        let chunks = chunk_bytes(&Bytes::from_static(b"x"), UPLOAD_CHUNK);
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0][..], b"x");
    }

    #[test]
    fn test_send_error_mapping() {
        // Network failures that are not timeouts keep the generic kind;
        // covered end to end in tests/dispatch.rs, here just the tag
        let err = Error::Network {
            detail: "connection refused".into(),
        };
        assert_eq!(err.kind(), crate::error::ErrorKind::Network);
    }
}
