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

//! On-disk documentation cache.
//!
//! The whole index is one JSON object keyed by source name:
//!
//! ```json
//! {
//!   "natives": {
//!     "functions": { "GetPlayerPed": { "name": "GetPlayerPed", ... } },
//!     "lastUpdate": "2025-01-01T12:00:00Z",
//!     "source": "https://example.invalid/natives.json",
//!     "etag": "\"abc\""
//!   }
//! }
//! ```

use crate::error::DocsError;
use crate::fetch::CacheValidators;
use crate::model::FunctionMap;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cached functions of one source plus its fetch metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub functions: FunctionMap,
    pub last_update: DateTime<Utc>,
    /// URL or path the functions came from.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl IndexEntry {
    pub fn new(source: impl Into<String>, functions: FunctionMap) -> Self {
        Self {
            functions,
            last_update: Utc::now(),
            source: source.into(),
            etag: None,
            last_modified: None,
        }
    }

    pub fn with_validators(mut self, validators: CacheValidators) -> Self {
        self.etag = validators.etag;
        self.last_modified = validators.last_modified;
        self
    }

    pub fn validators(&self) -> CacheValidators {
        CacheValidators {
            etag: self.etag.clone(),
            last_modified: self.last_modified.clone(),
        }
    }
}

/// Source name to entry, in insertion order.
pub type IndexEntries = IndexMap<String, IndexEntry>;

/// JSON file holding the persisted index.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<cache dir>/cfxlua/docs-cache.json` under `base`.
    pub fn in_dir(base: &Path) -> Self {
        Self::new(base.join("cfxlua").join("docs-cache.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache. A missing file is empty; a corrupt one is logged
    /// and treated as empty.
    pub async fn load(&self) -> Result<IndexEntries, DocsError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No documentation cache at {}", self.path.display());
                return Ok(IndexEntries::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Ignoring corrupt documentation cache {}: {}",
                    self.path.display(),
                    e
                );
                Ok(IndexEntries::new())
            }
        }
    }

    pub async fn save(&self, entries: &IndexEntries) -> Result<(), DocsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(
            "Saved {} documentation sources to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Delete the cache file; a missing file is not an error.
    pub async fn clear(&self) -> Result<(), DocsError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
