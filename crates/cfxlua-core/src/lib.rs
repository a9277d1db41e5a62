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

//! Text-level foundations for analysing CitizenFX Lua.
//!
//! This crate does not parse Lua. It gives the diagnostic passes three
//! things to work with:
//!
//! - [`lex`] - the sanitizer that blanks comments and string bodies while
//!   keeping every byte offset stable, plus identifier helpers
//! - [`block`] - keyword-pair block matching over sanitized lines
//! - [`scope`] - function-body and table-constructor depth tracking
//!
//! A [`ScanContext`] bundles the raw text with its sanitized twin so that
//! every pass reads the same, once-computed view of a document.
//!
//! # Examples
//!
//! ```
//! use cfxlua_core::ScanContext;
//!
//! let ctx = ScanContext::new("client.lua", "local s = 'while true do end'\nWait(0)");
//! assert_eq!(ctx.line_count(), 2);
//! assert!(!ctx.sanitized_line(0).unwrap_or_default().contains("while"));
//! ```

pub mod block;
mod context;
pub mod lex;
pub mod scope;

pub use block::{find_block_end, BlockMatcher, TextualBlockMatcher};
pub use context::ScanContext;
pub use lex::{sanitize, SourcePos, Span};
pub use scope::{ScopeTracker, TextualScopeTracker};
