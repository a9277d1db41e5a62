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

//! CfxLua Language Server binary.
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
//! # Editor Integration
//!
//! ## Neovim (nvim-lspconfig)
//!
//! ```lua
//! require('lspconfig.configs').cfxlua = {
//!   default_config = {
//!     cmd = { 'cfxlua-lsp' },
//!     filetypes = { 'lua' },
//!     root_dir = function() return vim.fn.getcwd() end,
//!   },
//! }
//! require('lspconfig').cfxlua.setup {}
//! ```

use cfxlua_docs::{DocumentationIndex, HttpFetcher};
use cfxlua_lsp::{default_cache_store, CfxLuaLanguageServer};
use std::sync::Arc;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("cfxlua_lsp=info".parse().expect("valid log directive"))
                .add_directive("cfxlua_docs=info".parse().expect("valid log directive"))
                .add_directive("tower_lsp=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting CfxLua Language Server v{}", cfxlua_lsp::VERSION);

    let fetcher = match HttpFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let mut index = DocumentationIndex::new(Arc::new(fetcher));
    match default_cache_store() {
        Some(store) => {
            tracing::debug!("Documentation cache at {}", store.path().display());
            index = index.with_store(store);
        }
        None => tracing::warn!("No cache directory available; documentation will not persist"),
    }
    let index = Arc::new(index);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(move |client| CfxLuaLanguageServer::new(client, Arc::clone(&index)));

    Server::new(stdin, stdout, socket).serve(service).await;
}
