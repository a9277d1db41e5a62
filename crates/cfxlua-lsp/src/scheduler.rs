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

//! Debounced scan scheduling.
//!
//! Each document identity moves through `idle -> pending -> scanning ->
//! idle`. [`ScanScheduler::schedule`] arms a timer task for the document;
//! a later trigger aborts that task and arms a new one carrying the newer
//! text, so a burst of edits costs one scan. Closing a document aborts
//! its timer and clears its diagnostics.
//!
//! A scan that is already running cannot be aborted, so every scan also
//! carries the generation it was started under. It publishes only if that
//! generation is still the document's latest once settings have arrived;
//! closing or re-triggering the document retires it.

use crate::analysis::analyze;
use crate::config::ServerSettings;
use crate::constants::{DEBOUNCE_MS, LUA_LANGUAGE_ID, WORKSPACE_LUA_GLOB};
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, info, warn};

/// Receives the diagnostics of each finished scan.
#[async_trait]
pub trait DiagnosticPublisher: Send + Sync + 'static {
    /// Replace the published set for `uri`.
    async fn publish(&self, uri: &str, diagnostics: Vec<Diagnostic>);
    /// Remove every diagnostic published for `uri`.
    async fn clear(&self, uri: &str);
}

/// Supplies the settings used for one scan.
#[async_trait]
pub trait SettingsProvider: Send + Sync + 'static {
    async fn settings(&self, uri: &str) -> ServerSettings;
}

/// A document to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub uri: String,
    pub language_id: String,
    pub text: String,
}

impl ScanRequest {
    pub fn lua(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            language_id: LUA_LANGUAGE_ID.to_string(),
            text: text.into(),
        }
    }

    fn is_scannable(&self) -> bool {
        self.language_id == LUA_LANGUAGE_ID
    }
}

/// Outcome of [`ScanScheduler::scan_workspace`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceScanSummary {
    /// Files matching the Lua glob.
    pub files: usize,
    pub scheduled: usize,
    /// Files that could not be read; logged and skipped.
    pub failed: Vec<PathBuf>,
}

struct Pending {
    generation: u64,
    /// `None` only between registration and spawn.
    handle: Option<JoinHandle<()>>,
}

pub struct ScanScheduler {
    pending: Arc<DashMap<String, Pending>>,
    /// Latest generation per open document; absent once closed.
    latest: Arc<DashMap<String, u64>>,
    publisher: Arc<dyn DiagnosticPublisher>,
    settings: Arc<dyn SettingsProvider>,
    delay: Duration,
    generation: AtomicU64,
}

impl ScanScheduler {
    pub fn new(publisher: Arc<dyn DiagnosticPublisher>, settings: Arc<dyn SettingsProvider>) -> Self {
        Self::with_delay(publisher, settings, Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn with_delay(
        publisher: Arc<dyn DiagnosticPublisher>,
        settings: Arc<dyn SettingsProvider>,
        delay: Duration,
    ) -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            latest: Arc::new(DashMap::new()),
            publisher,
            settings,
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Number of documents with an armed timer.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, uri: &str) -> bool {
        self.pending.contains_key(uri)
    }

    fn cancel(&self, uri: &str) -> bool {
        match self.pending.remove(uri) {
            Some((_, pending)) => {
                if let Some(handle) = pending.handle {
                    handle.abort();
                }
                true
            }
            None => false,
        }
    }

    fn next_generation(&self, uri: &str) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        self.latest.insert(uri.to_string(), generation);
        generation
    }

    /// Arm (or re-arm) the debounce timer for `request.uri`.
    ///
    /// Returns `false` when the document is not Lua and nothing was armed.
    pub fn schedule(&self, request: ScanRequest) -> bool {
        if !request.is_scannable() {
            debug!("Skipping scan of {} (language {})", request.uri, request.language_id);
            return false;
        }

        if self.cancel(&request.uri) {
            debug!("Re-arming scan timer for {}", request.uri);
        }

        let generation = self.next_generation(&request.uri);
        let uri = request.uri.clone();
        self.pending.insert(
            uri.clone(),
            Pending {
                generation,
                handle: None,
            },
        );

        let pending = Arc::clone(&self.pending);
        let latest = Arc::clone(&self.latest);
        let publisher = Arc::clone(&self.publisher);
        let settings = Arc::clone(&self.settings);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Past this point a newer trigger no longer aborts this scan.
            if pending
                .remove_if(&request.uri, |_, p| p.generation == generation)
                .is_none()
            {
                return;
            }
            run_scan(publisher.as_ref(), settings.as_ref(), &latest, generation, request).await;
        });

        match self.pending.get_mut(&uri) {
            Some(mut entry) if entry.generation == generation => entry.handle = Some(handle),
            // Already fired, or superseded from another thread.
            Some(_) => handle.abort(),
            None => {}
        }
        true
    }

    /// Cancel any pending timer and scan right away.
    pub async fn scan_now(&self, request: ScanRequest) -> bool {
        if !request.is_scannable() {
            return false;
        }
        self.cancel(&request.uri);
        let generation = self.next_generation(&request.uri);
        run_scan(
            self.publisher.as_ref(),
            self.settings.as_ref(),
            &self.latest,
            generation,
            request,
        )
        .await;
        true
    }

    /// Cancel any pending timer, retire a running scan and clear
    /// published diagnostics.
    pub async fn close(&self, uri: &str) {
        self.latest.remove(uri);
        self.cancel(uri);
        self.publisher.clear(uri).await;
    }

    /// Schedule a scan for every Lua file under `root`.
    ///
    /// Unreadable files are counted in the summary and skipped.
    pub async fn scan_workspace(&self, root: &Path) -> WorkspaceScanSummary {
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            WORKSPACE_LUA_GLOB
        );
        let mut summary = WorkspaceScanSummary::default();
        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid workspace pattern {}: {}", pattern, e);
                return summary;
            }
        };

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable workspace entry: {}", e);
                    summary.failed.push(e.path().to_path_buf());
                    continue;
                }
            };
            summary.files += 1;
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    if self.schedule(ScanRequest::lua(file_uri(&path), text)) {
                        summary.scheduled += 1;
                    }
                }
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    summary.failed.push(path);
                }
            }
        }

        info!(
            "Workspace scan of {}: {} files, {} scheduled, {} failed",
            root.display(),
            summary.files,
            summary.scheduled,
            summary.failed.len()
        );
        summary
    }

    /// Abort every pending timer.
    pub fn dispose(&self) {
        let count = self.pending.len();
        self.pending.retain(|_, pending| {
            if let Some(handle) = pending.handle.take() {
                handle.abort();
            }
            false
        });
        self.latest.clear();
        debug!("Scan scheduler disposed ({} pending timers aborted)", count);
    }
}

impl Drop for ScanScheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn file_uri(path: &Path) -> String {
    Url::from_file_path(path)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

async fn run_scan(
    publisher: &dyn DiagnosticPublisher,
    settings: &dyn SettingsProvider,
    latest: &DashMap<String, u64>,
    generation: u64,
    request: ScanRequest,
) {
    let config = settings.settings(&request.uri).await.lint_config();
    let is_current = latest
        .get(&request.uri)
        .map_or(false, |current| *current == generation);
    if !is_current {
        debug!("Dropping stale scan of {}", request.uri);
        return;
    }
    let diagnostics = analyze(&request.uri, &request.text, config);
    debug!("Publishing {} diagnostics for {}", diagnostics.len(), request.uri);
    publisher.publish(&request.uri, diagnostics).await;
}
