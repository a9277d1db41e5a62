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

//! Open-document store.
//!
//! Holds the text of every open document as a [`Rope`] together with its
//! language identifier, so scans, completion and hover read the newest
//! text without going back to the client.

use crate::constants::{DEFAULT_MAX_DOCUMENT_SIZE, LUA_LANGUAGE_ID};
use dashmap::DashMap;
use parking_lot::RwLock;
use ropey::Rope;
use tower_lsp::lsp_types::Url;
use tracing::{debug, warn};

/// One open document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub rope: Rope,
    pub language_id: String,
    pub version: i32,
}

impl DocumentState {
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Line `index` without its line terminator.
    pub fn line(&self, index: usize) -> Option<String> {
        if index >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(index).to_string();
        Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string())
    }
}

/// Store of open documents keyed by URI.
#[derive(Debug)]
pub struct DocumentStore {
    documents: DashMap<Url, DocumentState>,
    max_document_size: RwLock<usize>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_SIZE)
    }
}

impl DocumentStore {
    pub fn new(max_document_size: usize) -> Self {
        Self {
            documents: DashMap::new(),
            max_document_size: RwLock::new(max_document_size),
        }
    }

    pub fn max_document_size(&self) -> usize {
        *self.max_document_size.read()
    }

    pub fn set_max_document_size(&self, new_max: usize) {
        *self.max_document_size.write() = new_max;
        debug!("Max document size updated to: {} bytes", new_max);
    }

    /// Open a document. Returns `false` when it exceeds the size limit.
    pub fn open(&self, uri: &Url, language_id: &str, version: i32, text: &str) -> bool {
        if !self.within_limit(uri, text) {
            return false;
        }
        debug!(
            "Document opened: {} ({} bytes, language {})",
            uri,
            text.len(),
            language_id
        );
        self.documents.insert(
            uri.clone(),
            DocumentState {
                rope: Rope::from_str(text),
                language_id: language_id.to_string(),
                version,
            },
        );
        true
    }

    /// Replace the full text of an open document.
    ///
    /// Unknown documents are registered as Lua, which is what a
    /// full-sync client without a prior `didOpen` most likely sends.
    pub fn update(&self, uri: &Url, version: i32, text: &str) -> bool {
        if !self.within_limit(uri, text) {
            return false;
        }
        if let Some(mut state) = self.documents.get_mut(uri) {
            state.rope = Rope::from_str(text);
            state.version = version;
            return true;
        }
        self.documents.insert(
            uri.clone(),
            DocumentState {
                rope: Rope::from_str(text),
                language_id: LUA_LANGUAGE_ID.to_string(),
                version,
            },
        );
        true
    }

    fn within_limit(&self, uri: &Url, text: &str) -> bool {
        let max = self.max_document_size();
        if text.len() > max {
            warn!(
                "Document size limit exceeded for {}: {} bytes > {} bytes maximum (rejected)",
                uri,
                text.len(),
                max
            );
            return false;
        }
        true
    }

    pub fn get(&self, uri: &Url) -> Option<DocumentState> {
        self.documents.get(uri).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, uri: &Url) -> Option<DocumentState> {
        self.documents.remove(uri).map(|(_, state)| state)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn uris(&self) -> Vec<Url> {
        self.documents.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///resources/{}", name)).unwrap()
    }

    #[test]
    fn test_open_update_remove() {
        let store = DocumentStore::default();
        let u = uri("client.lua");
        assert!(store.open(&u, "lua", 1, "Wait(0)\n"));
        assert!(store.update(&u, 2, "Wait(1)\r\nprint(1)"));

        let doc = store.get(&u).unwrap();
        assert_eq!(doc.version, 2);
        assert_eq!(doc.line(0).as_deref(), Some("Wait(1)"));
        assert_eq!(doc.line(1).as_deref(), Some("print(1)"));
        assert_eq!(doc.line(5), None);

        assert!(store.remove(&u).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_size_limit() {
        let store = DocumentStore::new(8);
        let u = uri("big.lua");
        assert!(!store.open(&u, "lua", 1, "0123456789"));
        assert!(store.get(&u).is_none());
        store.set_max_document_size(64);
        assert!(store.open(&u, "lua", 1, "0123456789"));
    }

    #[test]
    fn test_update_unknown_registers_lua() {
        let store = DocumentStore::default();
        let u = uri("new.lua");
        assert!(store.update(&u, 3, "x = 1"));
        assert_eq!(store.get(&u).unwrap().language_id, "lua");
    }
}
