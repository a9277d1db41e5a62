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

//! CfxLua Language Server Protocol (LSP) Implementation
//!
//! This crate wires the CfxLua static-analysis engine into editors that speak
//! the Language Server Protocol, such as VS Code, Neovim and Emacs.
//!
//! # Features
//!
//! - **Diagnostics**: Debounced lint scans for every open Lua document
//! - **Autocomplete**: Function names from the documentation index
//! - **Hover**: Signatures, parameters, returns and examples for known functions
//! - **Commands**: Workspace scan, documentation refresh and cache clearing
//!
//! # Scanning
//!
//! Edits are coalesced per document: a scan only runs once the document has
//! been quiet for [`constants::DEBOUNCE_MS`]. Saves and explicit workspace
//! scans bypass the delay. Settings are read from the client for every scan,
//! so toggling a rule in the editor takes effect on the next keystroke.
//!
//! # Documentation
//!
//! The documentation index is shared across the server and persisted under
//! the platform cache directory. It is restored on startup and refreshed in
//! the background from the sources configured in `cfxlua.docs.sources`,
//! plus any `*.defs.lua` files found in the workspace.
//!
//! # Usage
//!
//! ```bash
//! # Run the language server (stdio transport)
//! cfxlua-lsp
//!
//! # With debug logging
//! RUST_LOG=debug cfxlua-lsp
//! ```
//!
//! ## Programmatic Usage
//!
//! ```no_run
//! use cfxlua_docs::{DocumentationIndex, HttpFetcher};
//! use cfxlua_lsp::CfxLuaLanguageServer;
//! use std::sync::Arc;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = HttpFetcher::new().expect("http client");
//!     let index = Arc::new(DocumentationIndex::new(Arc::new(fetcher)));
//!
//!     let (service, socket) =
//!         LspService::new(move |client| CfxLuaLanguageServer::new(client, Arc::clone(&index)));
//!
//!     Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
//!         .serve(service)
//!         .await;
//! }
//! ```
//!
//! # Architecture
//!
//! - `backend`: LSP protocol handlers
//! - [`analysis`]: Lint diagnostics converted to LSP diagnostics
//! - [`scheduler`]: Per-document debounce and workspace scans
//! - [`documents`]: Open document store
//! - [`completion`] and [`hover`]: Documentation lookups
//! - [`config`]: Client settings
//! - [`utils`]: UTF-8/UTF-16 position handling

pub mod analysis;
mod backend;
pub mod completion;
pub mod config;
pub mod constants;
pub mod documents;
pub mod hover;
pub mod scheduler;
pub mod utils;

pub use backend::{default_cache_store, CfxLuaLanguageServer, ClientBinding};
pub use config::ServerSettings;
pub use scheduler::{DiagnosticPublisher, ScanRequest, ScanScheduler, SettingsProvider};

/// LSP server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use cfxlua_docs::{
        extract, CacheValidators, DocsError, DocumentationIndex, FetchOutcome, Fetcher,
        IndexEntry, SourceKind,
    };
    use std::sync::Arc;

    const OX_LIB: &str = "\
--- Shows a notification.
--- @param data table Notification options
--- @param duration? number Milliseconds
--- @return boolean shown
function lib.notify(data, duration)
end
";

    const FRAMEWORK: &str = "\
function GetPlayerData()
end
";

    struct Offline;

    #[async_trait]
    impl Fetcher for Offline {
        async fn fetch(&self, url: &str, _: &CacheValidators) -> Result<FetchOutcome, DocsError> {
            Err(DocsError::Network {
                url: url.to_string(),
                message: "offline".to_string(),
            })
        }
    }

    /// Index with `lib.notify` (from `ox_lib`) and `GetPlayerData`.
    pub(crate) fn sample_index() -> DocumentationIndex {
        let index = DocumentationIndex::new(Arc::new(Offline));
        for (name, content, kind) in [
            ("ox_lib", OX_LIB, SourceKind::AnnotatedDefinitions),
            ("framework", FRAMEWORK, SourceKind::PlainFunctions),
        ] {
            let functions = extract(content, name, kind).unwrap();
            index.insert(name, IndexEntry::new(name, functions));
        }
        index
    }
}
