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

//! Refresh, persistence and discovery behaviour of the documentation index.

use async_trait::async_trait;
use cfxlua_docs::{
    extract, CacheStore, CacheValidators, DocsError, DocumentationIndex, DocumentationSource,
    FetchOutcome, Fetcher, ParamType, RetryPolicy, SourceKind, SourceOutcome,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

const ANNOTATED: &str = r#"
--- Sends a notification to a player.
--- @param source number Server id of the target
--- @param message string Text to display
--- @return boolean delivered Whether the client acknowledged
function Notify(source, message) end
"#;

const CATALOG: &str = r#"{ "GetEntityCoords": { "description": "Entity position", "params": [{ "name": "entity", "type": "number" }], "side": "shared" } }"#;

#[derive(Clone)]
enum Reply {
    Body(&'static str, Option<&'static str>),
    NotModified,
    Status(u16),
}

/// Scripted fetcher recording the validators it was called with.
#[derive(Default)]
struct FakeFetcher {
    replies: HashMap<String, Reply>,
    seen: Mutex<Vec<(String, CacheValidators)>>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    fn with(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, validators: &CacheValidators) -> Result<FetchOutcome, DocsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push((url.to_string(), validators.clone()));
        match self.replies.get(url) {
            Some(Reply::Body(body, etag)) => Ok(FetchOutcome::Modified {
                body: body.to_string(),
                validators: CacheValidators {
                    etag: etag.map(str::to_string),
                    last_modified: None,
                },
            }),
            Some(Reply::NotModified) => Ok(FetchOutcome::NotModified),
            Some(Reply::Status(status)) => Err(DocsError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(DocsError::Network {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

fn no_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 0,
        ..RetryPolicy::default()
    }
}

fn url_source(name: &str, url: &str, kind: SourceKind) -> DocumentationSource {
    DocumentationSource::url(name, url, kind)
}

// ==================== Round trip ====================

#[tokio::test]
async fn test_documentation_round_trip_through_persistence() {
    let functions = extract(ANNOTATED, "server-lib", SourceKind::AnnotatedDefinitions).unwrap();
    let notify = &functions["Notify"];
    assert_eq!(notify.parameters.len(), 2);
    assert_eq!(notify.parameters[0].name, "source");
    assert_eq!(notify.parameters[0].ty, ParamType::Known("number".into()));
    assert_eq!(notify.parameters[1].name, "message");
    assert_eq!(notify.parameters[1].ty, ParamType::Known("string".into()));
    assert_eq!(notify.returns.len(), 1);
    assert_eq!(
        notify.returns[0].description.as_deref(),
        Some("delivered Whether the client acknowledged")
    );

    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(FakeFetcher::default().with("https://lib", Reply::Body(ANNOTATED, None)));
    let index = DocumentationIndex::new(fetcher.clone())
        .with_store(CacheStore::in_dir(dir.path()))
        .with_retry(no_retry());
    index
        .refresh(&[url_source("server-lib", "https://lib", SourceKind::AnnotatedDefinitions)], None)
        .await
        .unwrap();

    let reloaded = DocumentationIndex::new(fetcher).with_store(CacheStore::in_dir(dir.path()));
    assert_eq!(reloaded.load().await.unwrap(), 1);
    assert_eq!(reloaded.entry("server-lib").unwrap().functions, functions);
}

// ==================== Refresh ====================

#[tokio::test]
async fn test_refresh_isolation() {
    let fetcher = Arc::new(
        FakeFetcher::default()
            .with("https://natives", Reply::Body(CATALOG, Some("\"n1\"")))
            .with("https://down", Reply::Status(404)),
    );
    let index = DocumentationIndex::new(fetcher).with_retry(no_retry());
    let report = index
        .refresh(
            &[
                url_source("broken", "https://down", SourceKind::Hybrid),
                url_source("natives", "https://natives", SourceKind::JsonNativeCatalog),
            ],
            None,
        )
        .await
        .unwrap();

    assert!(!report.is_clean());
    let failures: Vec<_> = report.failures().map(|(name, _)| name).collect();
    assert_eq!(failures, ["broken"]);
    assert_eq!(report.updated().collect::<Vec<_>>(), ["natives"]);
    assert!(index.get_function("GetEntityCoords").is_some());
    assert_eq!(index.sources(), ["natives"]);
}

#[tokio::test]
async fn test_network_failure_keeps_previous_entry() {
    let fetcher = Arc::new(FakeFetcher::default());
    let index = DocumentationIndex::new(fetcher).with_retry(no_retry());
    let functions = extract(ANNOTATED, "lib", SourceKind::Hybrid).unwrap();
    index.insert("lib", cfxlua_docs::IndexEntry::new("https://unreachable", functions));

    let report = index
        .refresh(&[url_source("lib", "https://unreachable", SourceKind::Hybrid)], None)
        .await
        .unwrap();
    assert!(matches!(
        report.outcomes[0].1,
        SourceOutcome::Failed(DocsError::Network { .. })
    ));
    assert!(index.get_function("Notify").is_some());
}

#[tokio::test]
async fn test_not_modified_keeps_entry_and_sends_validators() {
    let first = Arc::new(FakeFetcher::default().with("https://lib", Reply::Body(ANNOTATED, Some("\"v7\""))));
    let index = DocumentationIndex::new(first).with_retry(no_retry());
    let sources = [url_source("lib", "https://lib", SourceKind::Hybrid)];
    index.refresh(&sources, None).await.unwrap();
    let before = index.entry("lib").unwrap();
    assert_eq!(before.etag.as_deref(), Some("\"v7\""));

    let second = Arc::new(FakeFetcher::default().with("https://lib", Reply::NotModified));
    let index2 = DocumentationIndex::new(second.clone()).with_retry(no_retry());
    index2.insert("lib", before.clone());
    let report = index2.refresh(&sources, None).await.unwrap();

    assert!(matches!(report.outcomes[0].1, SourceOutcome::NotModified));
    assert_eq!(index2.entry("lib").unwrap(), before);
    let seen = second.seen.lock();
    assert_eq!(seen[0].1.etag.as_deref(), Some("\"v7\""));
}

#[tokio::test]
async fn test_oversized_payload_rejected() {
    let fetcher = Arc::new(FakeFetcher::default().with("https://big", Reply::Body(ANNOTATED, None)));
    let index = DocumentationIndex::new(fetcher)
        .with_retry(no_retry())
        .with_max_bytes(16);
    let report = index
        .refresh(&[url_source("big", "https://big", SourceKind::Hybrid)], None)
        .await
        .unwrap();
    assert!(matches!(
        report.outcomes[0].1,
        SourceOutcome::Failed(DocsError::Oversized { max: 16, .. })
    ));
    assert!(index.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_server_errors_retried() {
    let fetcher = Arc::new(FakeFetcher::default().with("https://flaky", Reply::Status(502)));
    let index = DocumentationIndex::new(fetcher.clone());
    let report = index
        .refresh(&[url_source("flaky", "https://flaky", SourceKind::Hybrid)], None)
        .await
        .unwrap();
    assert!(!report.is_clean());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_local_path_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("natives.json");
    std::fs::write(&path, CATALOG).unwrap();

    let index = DocumentationIndex::new(Arc::new(FakeFetcher::default()));
    let report = index
        .refresh(
            &[DocumentationSource::path("natives", &path, SourceKind::JsonNativeCatalog)],
            None,
        )
        .await
        .unwrap();
    assert!(report.is_clean());
    assert_eq!(
        index.get_function("GetEntityCoords").unwrap().side,
        Some(cfxlua_docs::Side::Shared)
    );
}

// ==================== Concurrency ====================

/// Parks every fetch until released, tracking peak concurrency.
struct GatedFetcher {
    started: Notify,
    release: Notify,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    hold: Duration,
}

impl GatedFetcher {
    fn new(hold: Duration) -> Self {
        Self {
            started: Notify::new(),
            release: Notify::new(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            hold,
        }
    }
}

#[async_trait]
impl Fetcher for GatedFetcher {
    async fn fetch(&self, _url: &str, _: &CacheValidators) -> Result<FetchOutcome, DocsError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.started.notify_one();
        if self.hold.is_zero() {
            self.release.notified().await;
        } else {
            tokio::time::sleep(self.hold).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(FetchOutcome::Modified {
            body: "function Gated() end".to_string(),
            validators: CacheValidators::default(),
        })
    }
}

#[tokio::test]
async fn test_overlapping_refresh_is_rejected() {
    let fetcher = Arc::new(GatedFetcher::new(Duration::ZERO));
    let index = Arc::new(DocumentationIndex::new(fetcher.clone()).with_retry(no_retry()));
    let sources = vec![url_source("gated", "https://gated", SourceKind::Hybrid)];

    let first = {
        let index = Arc::clone(&index);
        let sources = sources.clone();
        tokio::spawn(async move { index.refresh(&sources, None).await })
    };
    fetcher.started.notified().await;

    let second = index.refresh(&sources, None).await;
    assert!(matches!(second, Err(DocsError::RefreshInProgress)));

    fetcher.release.notify_one();
    let report = first.await.unwrap().unwrap();
    assert!(report.is_clean());
    assert!(index.get_function("Gated").is_some());

    // The lock is released once the first refresh finishes.
    fetcher.release.notify_one();
    assert!(index.refresh(&sources, None).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_fetch_concurrency_limited_to_two() {
    let fetcher = Arc::new(GatedFetcher::new(Duration::from_millis(100)));
    let index = DocumentationIndex::new(fetcher.clone()).with_retry(no_retry());
    let sources: Vec<_> = (0..5)
        .map(|i| url_source(&format!("s{}", i), &format!("https://s{}", i), SourceKind::Hybrid))
        .collect();

    let report = index.refresh(&sources, None).await.unwrap();
    assert_eq!(report.updated().count(), 5);
    assert_eq!(fetcher.peak.load(Ordering::SeqCst), 2);
}

// ==================== Discovery ====================

#[tokio::test]
async fn test_auto_discovery_merges_workspace_definitions() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("shared")).unwrap();
    std::fs::write(
        dir.path().join("shared").join("jobs.defs.lua"),
        "--- Current job name.\nlocal function GetJob() end\n",
    )
    .unwrap();

    let index = DocumentationIndex::new(Arc::new(FakeFetcher::default()));
    let report = index.refresh(&[], Some(dir.path())).await.unwrap();

    assert_eq!(report.discovered, 1);
    assert_eq!(index.sources(), ["workspace:shared/jobs.defs.lua"]);
    let job = index.get_function("GetJob").unwrap();
    assert_eq!(job.description, "Current job name.");
    assert_eq!(job.source, "workspace:shared/jobs.defs.lua");

    // Re-running replaces rather than duplicates discovered sources.
    std::fs::remove_file(dir.path().join("shared").join("jobs.defs.lua")).unwrap();
    let report = index.refresh(&[], Some(dir.path())).await.unwrap();
    assert_eq!(report.discovered, 0);
    assert!(index.is_empty());
}

#[tokio::test]
async fn test_clear_empties_memory_and_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::in_dir(dir.path());
    let path = store.path().to_path_buf();
    let fetcher = Arc::new(FakeFetcher::default().with("https://lib", Reply::Body(ANNOTATED, None)));
    let index = DocumentationIndex::new(fetcher).with_store(store);

    index
        .refresh(&[url_source("lib", "https://lib", SourceKind::Hybrid)], None)
        .await
        .unwrap();
    assert!(path.exists());

    index.clear().await.unwrap();
    assert!(index.is_empty());
    assert!(!path.exists());
}
