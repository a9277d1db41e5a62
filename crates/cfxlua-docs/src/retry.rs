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

//! Deadline and exponential backoff around a fallible async operation.

use crate::error::DocsError;
use crate::fetch::REQUEST_TIMEOUT;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry schedule for source fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub base_delay: Duration,
    /// Deadline for a single attempt.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (zero-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << retry.min(16))
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out.
    ///
    /// An attempt that exceeds [`RetryPolicy::timeout`] fails with
    /// [`DocsError::Timeout`], which is retried like any network error.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, DocsError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DocsError>>,
    {
        let mut retry = 0;
        loop {
            let result = match tokio::time::timeout(self.timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(DocsError::Timeout {
                    url: label.to_string(),
                    seconds: self.timeout.as_secs(),
                }),
            };

            match result {
                Err(err) if err.is_retryable() && retry < self.max_retries => {
                    let delay = self.delay_for(retry);
                    warn!(
                        "Attempt {} for {} failed ({}), retrying in {:?}",
                        retry + 1,
                        label,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                other => return other,
            }
        }
    }
}
