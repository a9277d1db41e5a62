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

//! CfxLua documentation index.
//!
//! Harvests function signatures from Lua library sources and JSON native
//! catalogs, and keeps them in an index that completion and hover consult.
//!
//! - [`extract`] reads one source's content into a [`FunctionMap`]
//! - [`DocumentationIndex`] aggregates sources, refreshes them over HTTP or
//!   from disk, and persists the result as JSON
//! - [`discover`](discover::discover) merges workspace `*.defs.lua` files
//!
//! ```
//! use cfxlua_docs::{extract, SourceKind};
//!
//! let map = extract("function lib.notify(data) end", "ox_lib", SourceKind::Hybrid).unwrap();
//! assert_eq!(map["lib.notify"].parameters[0].name, "data");
//! ```

pub mod discover;
mod error;
pub mod extract;
pub mod fetch;
mod index;
mod model;
pub mod persist;
pub mod retry;

pub use error::DocsError;
pub use extract::extract;
pub use fetch::{CacheValidators, FetchOutcome, Fetcher, HttpFetcher};
pub use index::{DocumentationIndex, RefreshReport, SourceOutcome};
pub use model::{
    DocumentationSource, FunctionDoc, FunctionMap, ParamType, ParameterDoc, ReturnDoc, Side,
    SourceKind, SourceOrigin, DEFAULT_DESCRIPTION,
};
pub use persist::{CacheStore, IndexEntry};
pub use retry::RetryPolicy;
