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

//! Lexical layer for CitizenFX Lua.
//!
//! # Module Structure
//!
//! - [`sanitize`](mod@sanitize) - comment and string masking that keeps byte offsets stable
//! - [`span`] - source positions and spans
//! - [`words`] - identifier and whole-word helpers
//!
//! # Examples
//!
//! ```
//! use cfxlua_core::lex::{contains_word, sanitize};
//!
//! let masked = sanitize("print('while true do end')");
//! assert!(!contains_word(&masked, "while"));
//! ```

pub mod sanitize;
pub mod span;
pub mod words;

pub use sanitize::{is_masked, long_bracket_close, long_bracket_open, sanitize};
pub use span::{SourcePos, Span};
pub use words::{
    contains_word, find_word, ident_at, is_blank, is_ident_byte, is_ident_start, is_word_at,
};
