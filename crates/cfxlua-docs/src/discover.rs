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

//! Workspace auto-discovery of `*.defs.lua` definition files.

use crate::extract::extract;
use crate::fetch::read_local;
use crate::model::{FunctionMap, SourceKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File pattern picked up by auto-discovery.
pub const DEFINITIONS_GLOB: &str = "**/*.defs.lua";

/// Prefix of source names created by auto-discovery.
pub const WORKSPACE_PREFIX: &str = "workspace:";

/// One discovered definitions file.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredSource {
    /// `workspace:<relative path>`
    pub name: String,
    pub path: PathBuf,
    pub functions: FunctionMap,
}

fn matching_files(root: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        DEFINITIONS_GLOB
    );
    match glob::glob(&pattern) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable path during discovery: {}", e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!("Invalid discovery pattern {}: {}", pattern, e);
            Vec::new()
        }
    }
}

fn source_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    format!("{}{}", WORKSPACE_PREFIX, rel.join("/"))
}

/// Extract every definitions file under `root` in hybrid mode.
///
/// Unreadable files are logged and skipped.
pub async fn discover(root: &Path, max_bytes: usize) -> Vec<DiscoveredSource> {
    let mut found = Vec::new();
    for path in matching_files(root) {
        let name = source_name(root, &path);
        let content = match read_local(&path, max_bytes).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        match extract(&content, &name, SourceKind::Hybrid) {
            Ok(functions) => {
                debug!("Discovered {} functions in {}", functions.len(), name);
                found.push(DiscoveredSource {
                    name,
                    path,
                    functions,
                });
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found
}
