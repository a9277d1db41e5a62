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

//! LSP backend implementation.
//!
//! Protocol handling lives here; scanning is delegated to the
//! [`ScanScheduler`] and documentation lookups to the shared
//! [`DocumentationIndex`]. The tower-lsp [`Client`] is bound to the
//! scheduler's publisher and settings seams through [`ClientBinding`].

use crate::completion::{get_completions, TRIGGER_CHARACTERS};
use crate::config::ServerSettings;
use crate::constants::{
    BYTES_PER_MEGABYTE, CMD_CLEAR_DOC_CACHE, CMD_REFRESH_DOCS, CMD_SCAN_WORKSPACE, COMMANDS,
    CONFIG_SECTION,
};
use crate::documents::DocumentStore;
use crate::hover::get_hover;
use crate::scheduler::{DiagnosticPublisher, ScanRequest, ScanScheduler, SettingsProvider};
use async_trait::async_trait;
use cfxlua_docs::{CacheStore, DocsError, DocumentationIndex, RefreshReport};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_lsp::jsonrpc::{Error as RpcError, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

/// `cfxlua/docs-cache.json` under the platform cache directory, if there is one.
pub fn default_cache_store() -> Option<CacheStore> {
    dirs::cache_dir().map(|dir| CacheStore::in_dir(&dir))
}

/// Publishes diagnostics and reads settings through the LSP client.
#[derive(Clone)]
pub struct ClientBinding {
    client: Client,
}

impl ClientBinding {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DiagnosticPublisher for ClientBinding {
    async fn publish(&self, uri: &str, diagnostics: Vec<Diagnostic>) {
        match Url::parse(uri) {
            Ok(url) => self.client.publish_diagnostics(url, diagnostics, None).await,
            Err(e) => warn!("Cannot publish diagnostics for invalid URI {}: {}", uri, e),
        }
    }

    async fn clear(&self, uri: &str) {
        self.publish(uri, Vec::new()).await;
    }
}

#[async_trait]
impl SettingsProvider for ClientBinding {
    async fn settings(&self, uri: &str) -> ServerSettings {
        let item = ConfigurationItem {
            scope_uri: Url::parse(uri).ok(),
            section: Some(CONFIG_SECTION.to_string()),
        };
        match self.client.configuration(vec![item]).await {
            Ok(values) => values
                .into_iter()
                .next()
                .map(ServerSettings::from_value)
                .unwrap_or_default(),
            Err(e) => {
                debug!("workspace/configuration unavailable ({}), using defaults", e);
                ServerSettings::default()
            }
        }
    }
}

/// Refresh documentation with the current settings.
async fn refresh_documentation(
    index: &DocumentationIndex,
    settings: &dyn SettingsProvider,
    root: Option<PathBuf>,
) -> std::result::Result<RefreshReport, DocsError> {
    let settings = settings.settings("").await;
    index.set_priority(settings.docs.priority.clone());
    let root = root.filter(|_| settings.docs.auto_discover);
    index.refresh(&settings.docs.sources, root.as_deref()).await
}

/// CfxLua Language Server backend.
pub struct CfxLuaLanguageServer {
    client: Client,
    binding: Arc<ClientBinding>,
    documents: Arc<DocumentStore>,
    scheduler: Arc<ScanScheduler>,
    index: Arc<DocumentationIndex>,
    workspace_root: RwLock<Option<PathBuf>>,
}

impl CfxLuaLanguageServer {
    pub fn new(client: Client, index: Arc<DocumentationIndex>) -> Self {
        let binding = Arc::new(ClientBinding::new(client.clone()));
        let scheduler = Arc::new(ScanScheduler::new(binding.clone(), binding.clone()));
        Self {
            client,
            binding,
            documents: Arc::new(DocumentStore::default()),
            scheduler,
            index,
            workspace_root: RwLock::new(None),
        }
    }

    fn root(&self) -> Option<PathBuf> {
        self.workspace_root.read().clone()
    }

    fn request_for(&self, uri: &Url) -> Option<ScanRequest> {
        self.documents.get(uri).map(|doc| ScanRequest {
            uri: uri.to_string(),
            language_id: doc.language_id.clone(),
            text: doc.text(),
        })
    }

    async fn report_refresh(&self, result: std::result::Result<RefreshReport, DocsError>) {
        match result {
            Ok(report) => {
                for (name, err) in report.failures() {
                    self.client
                        .show_message(
                            MessageType::WARNING,
                            format!("Documentation source '{}' failed: {}", name, err),
                        )
                        .await;
                }
                self.client
                    .show_message(
                        MessageType::INFO,
                        format!(
                            "CfxLua documentation refreshed: {} sources, {} functions",
                            self.index.len(),
                            self.index.function_count()
                        ),
                    )
                    .await;
            }
            Err(DocsError::RefreshInProgress) => {
                self.client
                    .show_message(MessageType::INFO, "A documentation refresh is already running")
                    .await;
            }
            Err(e) => {
                error!("Documentation refresh failed: {}", e);
                self.client
                    .show_message(MessageType::ERROR, format!("Documentation refresh failed: {}", e))
                    .await;
            }
        }
    }

    async fn scan_workspace(&self) {
        let Some(root) = self.root() else {
            self.client
                .show_message(MessageType::WARNING, "No workspace folder is open")
                .await;
            return;
        };
        let summary = self.scheduler.scan_workspace(&root).await;
        let mut message = format!(
            "CfxLua scanned {} Lua files ({} scheduled)",
            summary.files, summary.scheduled
        );
        if !summary.failed.is_empty() {
            message.push_str(&format!(", {} could not be read", summary.failed.len()));
        }
        self.client.show_message(MessageType::INFO, message).await;
    }

    async fn clear_doc_cache(&self) {
        let clear = MessageActionItem {
            title: "Clear".to_string(),
            properties: HashMap::new(),
        };
        let cancel = MessageActionItem {
            title: "Cancel".to_string(),
            properties: HashMap::new(),
        };
        let answer = self
            .client
            .show_message_request(
                MessageType::WARNING,
                "Clear the cached CfxLua documentation?",
                Some(vec![clear, cancel]),
            )
            .await;

        match answer {
            Ok(Some(item)) if item.title == "Clear" => match self.index.clear().await {
                Ok(()) => {
                    self.client
                        .show_message(MessageType::INFO, "CfxLua documentation cache cleared")
                        .await;
                }
                Err(e) => {
                    error!("Failed to clear documentation cache: {}", e);
                    self.client
                        .show_message(MessageType::ERROR, format!("Failed to clear cache: {}", e))
                        .await;
                }
            },
            Ok(_) => debug!("Documentation cache clear cancelled"),
            Err(e) => warn!("Confirmation request failed: {}", e),
        }
    }
}

fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    if let Some(folder) = params.workspace_folders.as_ref().and_then(|f| f.first()) {
        return folder.uri.to_file_path().ok();
    }
    #[allow(deprecated)]
    let root_uri = params.root_uri.as_ref();
    root_uri.and_then(|u| u.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for CfxLuaLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = workspace_root(&params);
        match root.as_deref() {
            Some(path) => info!("CfxLua Language Server initializing (workspace: {})", path.display()),
            None => info!("CfxLua Language Server initializing without a workspace"),
        }
        *self.workspace_root.write() = root;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        will_save: None,
                        will_save_wait_until: None,
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                    },
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(
                        TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect(),
                    ),
                    work_done_progress_options: Default::default(),
                    all_commit_characters: None,
                    completion_item: None,
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "cfxlua-lsp".to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("CfxLua Language Server initialized");

        match self.index.load().await {
            Ok(count) => debug!("Restored {} cached documentation sources", count),
            Err(e) => warn!("Failed to load documentation cache: {}", e),
        }

        let index = Arc::clone(&self.index);
        let binding = Arc::clone(&self.binding);
        let client = self.client.clone();
        let root = self.root();
        tokio::spawn(async move {
            match refresh_documentation(&index, &*binding, root).await {
                Ok(report) => {
                    for (name, err) in report.failures() {
                        client
                            .show_message(
                                MessageType::WARNING,
                                format!("Documentation source '{}' failed: {}", name, err),
                            )
                            .await;
                    }
                }
                Err(e) => warn!("Initial documentation refresh failed: {}", e),
            }
        });
    }

    async fn shutdown(&self) -> Result<()> {
        info!("CfxLua Language Server shutting down");
        self.scheduler.dispose();
        if let Err(e) = self.index.save().await {
            warn!("Failed to persist documentation cache: {}", e);
        }
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        if !self
            .documents
            .open(&doc.uri, &doc.language_id, doc.version, &doc.text)
        {
            let max = self.documents.max_document_size();
            self.client
                .show_message(
                    MessageType::ERROR,
                    format!(
                        "Document too large: {} bytes exceeds maximum of {} MB",
                        doc.text.len(),
                        max / BYTES_PER_MEGABYTE
                    ),
                )
                .await;
            return;
        }
        self.scheduler.schedule(ScanRequest {
            uri: doc.uri.to_string(),
            language_id: doc.language_id,
            text: doc.text,
        });
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = &params.text_document.uri;
        let Some(change) = params.content_changes.into_iter().last() else {
            warn!("Document change event for {} had no content changes", uri);
            return;
        };
        if self
            .documents
            .update(uri, params.text_document.version, &change.text)
        {
            if let Some(request) = self.request_for(uri) {
                self.scheduler.schedule(request);
            }
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = &params.text_document.uri;
        debug!("Document saved: {}", uri);
        if let Some(text) = params.text {
            let version = self.documents.get(uri).map_or(0, |d| d.version);
            self.documents.update(uri, version, &text);
        }
        if let Some(request) = self.request_for(uri) {
            self.scheduler.scan_now(request).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document closed: {}", uri);
        self.documents.remove(&uri);
        self.scheduler.close(uri.as_str()).await;
    }

    async fn did_change_configuration(&self, _params: DidChangeConfigurationParams) {
        debug!("Configuration changed, rescanning {} open documents", self.documents.len());
        for uri in self.documents.uris() {
            if let Some(request) = self.request_for(&uri) {
                self.scheduler.schedule(request);
            }
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(line) = self
            .documents
            .get(uri)
            .and_then(|doc| doc.line(position.line as usize))
        else {
            debug!("No completion available for {} (document not open)", uri);
            return Ok(None);
        };

        let items = get_completions(&self.index, &line, position);
        debug!(
            "Providing {} completion items for {} at {}:{}",
            items.len(),
            uri,
            position.line,
            position.character
        );
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        Ok(self
            .documents
            .get(uri)
            .and_then(|doc| doc.line(position.line as usize))
            .and_then(|line| get_hover(&self.index, &line, position)))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        info!("Executing command {}", params.command);
        match params.command.as_str() {
            CMD_SCAN_WORKSPACE => self.scan_workspace().await,
            CMD_REFRESH_DOCS => {
                let result =
                    refresh_documentation(&self.index, &*self.binding, self.root()).await;
                self.report_refresh(result).await;
            }
            CMD_CLEAR_DOC_CACHE => self.clear_doc_cache().await,
            other => {
                return Err(RpcError::invalid_params(format!("unknown command '{}'", other)));
            }
        }
        Ok(None)
    }
}
