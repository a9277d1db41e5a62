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

//! Error types for documentation fetching, extraction and persistence.

use thiserror::Error;

/// Failures surfaced by the documentation index.
///
/// Malformed source text never produces an error; the extractor degrades
/// to fewer (or minimal) entries instead. Only transport, size, storage
/// and catalog-shape problems are reported here.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Transport-level failure (DNS, connection reset, TLS, ...).
    #[error("network error fetching '{url}': {message}")]
    Network { url: String, message: String },

    /// The request did not complete within the per-request deadline.
    #[error("request to '{url}' timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// Non-success HTTP status other than 304.
    #[error("'{url}' responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Payload exceeded the size ceiling and was not parsed.
    #[error("payload from '{origin}' is {size} bytes (max: {max})")]
    Oversized {
        origin: String,
        size: usize,
        max: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A native catalog whose top level is not a JSON object.
    #[error("catalog '{source_name}' is malformed: {message}")]
    Catalog {
        source_name: String,
        message: String,
    },

    /// Another refresh is still running.
    #[error("a documentation refresh is already in progress")]
    RefreshInProgress,
}

impl DocsError {
    /// Whether the failure is transient and worth another attempt.
    ///
    /// Network failures, timeouts, server errors (5xx) and rate limiting
    /// (429) are retried; everything else fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            DocsError::Network { .. } | DocsError::Timeout { .. } => true,
            DocsError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
