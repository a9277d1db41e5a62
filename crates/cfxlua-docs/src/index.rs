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

//! Aggregated documentation index.
//!
//! [`DocumentationIndex`] owns the per-source function maps. It is built
//! once by the host and shared behind an `Arc`; lookups take a read lock
//! on a `parking_lot::RwLock`, while [`DocumentationIndex::refresh`] is
//! single-flight and fetches sources through a FIFO semaphore.

use crate::discover::{discover, WORKSPACE_PREFIX};
use crate::error::DocsError;
use crate::extract::extract;
use crate::fetch::{read_local, CacheValidators, FetchOutcome, Fetcher, MAX_PAYLOAD_BYTES};
use crate::model::{DocumentationSource, FunctionDoc, FunctionMap, SourceOrigin};
use crate::persist::{CacheStore, IndexEntries, IndexEntry};
use crate::retry::RetryPolicy;
use futures::future::join_all;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, warn};

/// Concurrent source fetches allowed during a refresh.
pub const DEFAULT_CONCURRENCY: usize = 2;

/// Result of refreshing one source.
#[derive(Debug)]
pub enum SourceOutcome {
    Updated { functions: usize },
    NotModified,
    Failed(DocsError),
}

/// Per-source results of a [`DocumentationIndex::refresh`] call.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub outcomes: Vec<(String, SourceOutcome)>,
    /// Number of `*.defs.lua` files merged by auto-discovery.
    pub discovered: usize,
}

impl RefreshReport {
    pub fn updated(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, SourceOutcome::Updated { .. }))
            .map(|(name, _)| name.as_str())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &DocsError)> {
        self.outcomes.iter().filter_map(|(name, o)| match o {
            SourceOutcome::Failed(e) => Some((name.as_str(), e)),
            _ => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

enum Fetched {
    Fresh(FunctionMap, CacheValidators),
    Unchanged,
}

pub struct DocumentationIndex {
    entries: RwLock<IndexEntries>,
    priority: RwLock<Vec<String>>,
    fetcher: Arc<dyn Fetcher>,
    store: Option<CacheStore>,
    refresh_lock: Mutex<()>,
    permits: Semaphore,
    retry: RetryPolicy,
    max_bytes: usize,
}

impl DocumentationIndex {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            entries: RwLock::new(IndexEntries::new()),
            priority: RwLock::new(Vec::new()),
            fetcher,
            store: None,
            refresh_lock: Mutex::new(()),
            permits: Semaphore::new(DEFAULT_CONCURRENCY),
            retry: RetryPolicy::default(),
            max_bytes: MAX_PAYLOAD_BYTES,
        }
    }

    pub fn with_store(mut self, store: CacheStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_concurrency(mut self, permits: usize) -> Self {
        self.permits = Semaphore::new(permits.max(1));
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Sources consulted first by [`get_function`](Self::get_function).
    pub fn set_priority(&self, priority: Vec<String>) {
        *self.priority.write() = priority;
    }

    /// Replace (or add) one source's functions directly.
    pub fn insert(&self, source_name: impl Into<String>, entry: IndexEntry) {
        self.entries.write().insert(source_name.into(), entry);
    }

    /// Look up `name`: priority sources first, then insertion order.
    pub fn get_function(&self, name: &str) -> Option<FunctionDoc> {
        let entries = self.entries.read();
        let priority = self.priority.read();
        priority
            .iter()
            .filter_map(|source| entries.get(source))
            .chain(entries.values())
            .find_map(|entry| entry.functions.get(name))
            .cloned()
    }

    /// Every known function once, resolved with `get_function` precedence.
    pub fn all_functions(&self) -> Vec<FunctionDoc> {
        let entries = self.entries.read();
        let priority = self.priority.read();
        let mut seen: IndexMap<&str, &FunctionDoc> = IndexMap::new();
        for entry in priority
            .iter()
            .filter_map(|source| entries.get(source))
            .chain(entries.values())
        {
            for (name, doc) in &entry.functions {
                seen.entry(name.as_str()).or_insert(doc);
            }
        }
        seen.into_values().cloned().collect()
    }

    /// Source names in insertion order.
    pub fn sources(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Functions summed over all sources (duplicates counted per source).
    pub fn function_count(&self) -> usize {
        self.entries.read().values().map(|e| e.functions.len()).sum()
    }

    pub fn entry(&self, source_name: &str) -> Option<IndexEntry> {
        self.entries.read().get(source_name).cloned()
    }

    /// Refresh every enabled source, then merge `*.defs.lua` files found
    /// under `workspace_root` when one is given.
    ///
    /// A failing source is reported in the returned [`RefreshReport`] and
    /// leaves its previous entry in place. Only an overlapping call fails
    /// as a whole, with [`DocsError::RefreshInProgress`].
    pub async fn refresh(
        &self,
        sources: &[DocumentationSource],
        workspace_root: Option<&Path>,
    ) -> Result<RefreshReport, DocsError> {
        let _flight = self
            .refresh_lock
            .try_lock()
            .map_err(|_| DocsError::RefreshInProgress)?;

        let enabled: Vec<_> = sources.iter().filter(|s| s.enabled).collect();
        info!("Refreshing {} documentation sources", enabled.len());

        let results = join_all(enabled.iter().map(|source| async move {
            let _permit = self.permits.acquire().await.ok();
            (*source, self.fetch_source(source).await)
        }))
        .await;

        let mut report = RefreshReport::default();
        for (source, result) in results {
            let outcome = match result {
                Ok(Fetched::Fresh(functions, validators)) => {
                    let count = functions.len();
                    let entry = IndexEntry::new(source.origin.to_string(), functions)
                        .with_validators(validators);
                    self.entries.write().insert(source.name.clone(), entry);
                    debug!("Source {} refreshed with {} functions", source.name, count);
                    SourceOutcome::Updated { functions: count }
                }
                Ok(Fetched::Unchanged) => {
                    debug!("Source {} not modified", source.name);
                    SourceOutcome::NotModified
                }
                Err(e) => {
                    warn!("Failed to refresh documentation source {}: {}", source.name, e);
                    SourceOutcome::Failed(e)
                }
            };
            report.outcomes.push((source.name.clone(), outcome));
        }

        if let Some(root) = workspace_root {
            report.discovered = self.merge_discovered(root).await;
        }

        if let Err(e) = self.save().await {
            warn!("Failed to persist documentation cache: {}", e);
        }

        info!(
            "Documentation refresh done: {} sources, {} functions",
            self.len(),
            self.function_count()
        );
        Ok(report)
    }

    async fn fetch_source(&self, source: &DocumentationSource) -> Result<Fetched, DocsError> {
        match &source.origin {
            SourceOrigin::Url(url) => {
                let validators = self
                    .entries
                    .read()
                    .get(&source.name)
                    .map(IndexEntry::validators)
                    .unwrap_or_default();
                let outcome = self
                    .retry
                    .run(url, || self.fetcher.fetch(url, &validators))
                    .await?;
                match outcome {
                    FetchOutcome::NotModified => Ok(Fetched::Unchanged),
                    FetchOutcome::Modified { body, validators } => {
                        if body.len() > self.max_bytes {
                            return Err(DocsError::Oversized {
                                origin: url.clone(),
                                size: body.len(),
                                max: self.max_bytes,
                            });
                        }
                        let functions = extract(&body, &source.name, source.kind)?;
                        Ok(Fetched::Fresh(functions, validators))
                    }
                }
            }
            SourceOrigin::Path(path) => {
                let content = read_local(path, self.max_bytes).await?;
                let functions = extract(&content, &source.name, source.kind)?;
                Ok(Fetched::Fresh(functions, CacheValidators::default()))
            }
        }
    }

    async fn merge_discovered(&self, root: &Path) -> usize {
        let found = discover(root, self.max_bytes).await;
        let count = found.len();
        let mut entries = self.entries.write();
        entries.retain(|name, _| !name.starts_with(WORKSPACE_PREFIX));
        for source in found {
            let entry = IndexEntry::new(source.path.display().to_string(), source.functions);
            entries.insert(source.name, entry);
        }
        debug!("Merged {} discovered definition files", count);
        count
    }

    /// Replace the in-memory state with the persisted cache.
    ///
    /// Returns the number of sources loaded. Without a store this is a
    /// no-op.
    pub async fn load(&self) -> Result<usize, DocsError> {
        let Some(store) = &self.store else {
            return Ok(0);
        };
        let loaded = store.load().await?;
        let count = loaded.len();
        *self.entries.write() = loaded;
        info!("Loaded {} documentation sources from cache", count);
        Ok(count)
    }

    pub async fn save(&self) -> Result<(), DocsError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let snapshot = self.entries.read().clone();
        store.save(&snapshot).await
    }

    /// Drop everything in memory and delete the cache file.
    ///
    /// Confirmation is the caller's job.
    pub async fn clear(&self) -> Result<(), DocsError> {
        self.entries.write().clear();
        if let Some(store) = &self.store {
            store.clear().await?;
        }
        info!("Documentation cache cleared");
        Ok(())
    }
}

impl std::fmt::Debug for DocumentationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentationIndex")
            .field("sources", &self.sources())
            .field("store", &self.store)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
