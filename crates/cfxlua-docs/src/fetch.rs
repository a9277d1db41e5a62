// CfxLua - Static analysis for CitizenFX Lua resources
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fetching source content over HTTP or from disk.

use crate::error::DocsError;
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

/// Largest payload accepted from any source (5 MiB).
pub const MAX_PAYLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Per-request deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("cfxlua-docs/", env!("CARGO_PKG_VERSION"));

/// Conditional-request validators remembered from the last fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheValidators {
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Fresh content and the validators to send next time.
    Modified {
        body: String,
        validators: CacheValidators,
    },
    /// `304 Not Modified`; the cached copy is current.
    NotModified,
}

/// Retrieves remote source content.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, validators: &CacheValidators) -> Result<FetchOutcome, DocsError>;
}

/// [`Fetcher`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, DocsError> {
        Self::with_limit(MAX_PAYLOAD_BYTES)
    }

    pub fn with_limit(max_bytes: usize) -> Result<Self, DocsError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| classify("<client>", e))?;
        Ok(Self { client, max_bytes })
    }
}

fn classify(url: &str, err: reqwest::Error) -> DocsError {
    if err.is_timeout() {
        DocsError::Timeout {
            url: url.to_string(),
            seconds: REQUEST_TIMEOUT.as_secs(),
        }
    } else if let Some(status) = err.status() {
        DocsError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        DocsError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, validators: &CacheValidators) -> Result<FetchOutcome, DocsError> {
        let mut request = self.client.get(url);
        if let Some(etag) = &validators.etag {
            request = request.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = &validators.last_modified {
            request = request.header(IF_MODIFIED_SINCE, last_modified);
        }

        let mut response = request.send().await.map_err(|e| classify(url, e))?;
        let status = response.status();
        if status == StatusCode::NOT_MODIFIED {
            return Ok(FetchOutcome::NotModified);
        }
        if !status.is_success() {
            return Err(DocsError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(len) = response.content_length() {
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            if len > self.max_bytes {
                return Err(DocsError::Oversized {
                    origin: url.to_string(),
                    size: len,
                    max: self.max_bytes,
                });
            }
        }

        let validators = CacheValidators {
            etag: header_value(response.headers(), ETAG),
            last_modified: header_value(response.headers(), LAST_MODIFIED),
        };

        // Content-Length can be absent or wrong; enforce the ceiling while streaming.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| classify(url, e))? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(DocsError::Oversized {
                    origin: url.to_string(),
                    size: body.len() + chunk.len(),
                    max: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchOutcome::Modified {
            body: String::from_utf8_lossy(&body).into_owned(),
            validators,
        })
    }
}

/// Read a local source, rejecting files over `max_bytes` before reading.
pub async fn read_local(path: &Path, max_bytes: usize) -> Result<String, DocsError> {
    let size = tokio::fs::metadata(path).await?.len();
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    if size > max_bytes {
        return Err(DocsError::Oversized {
            origin: path.display().to_string(),
            size,
            max: max_bytes,
        });
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_local_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.defs.lua");
        std::fs::write(&path, "function A() end").unwrap();
        assert_eq!(
            read_local(&path, MAX_PAYLOAD_BYTES).await.unwrap(),
            "function A() end"
        );
    }

    #[tokio::test]
    async fn test_read_local_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.lua");
        std::fs::write(&path, "x".repeat(64)).unwrap();
        let err = read_local(&path, 16).await.unwrap_err();
        assert!(matches!(err, DocsError::Oversized { size: 64, max: 16, .. }));
    }

    #[tokio::test]
    async fn test_read_local_missing_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_local(&dir.path().join("nope.lua"), 16).await.unwrap_err();
        assert!(matches!(err, DocsError::Io(_)));
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }
}
