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

//! Documentation extraction.
//!
//! [`extract`] turns the content of one source into a [`FunctionMap`].
//! Lua sources are read with one of three strategies selected by
//! [`SourceKind`]; native catalogs are JSON.
//!
//! # Examples
//!
//! ```
//! use cfxlua_docs::{extract, SourceKind};
//!
//! let src = "--- Adds two numbers.\n--- @param a number\n--- @param b number\n--- @return number sum\nfunction Add(a, b) end\n";
//! let map = extract(src, "math", SourceKind::AnnotatedDefinitions).unwrap();
//!
//! let add = &map["Add"];
//! assert_eq!(add.description, "Adds two numbers.");
//! assert_eq!(add.parameters.len(), 2);
//! assert_eq!(add.returns[0].description.as_deref(), Some("sum"));
//! ```

mod catalog;
mod comment;
mod declaration;
mod plain;
mod walk;

pub use comment::CommentBlock;
pub use declaration::{match_declaration, parse_param_list, Declaration, DeclarationShape};

use crate::error::DocsError;
use crate::model::{FunctionMap, SourceKind};
use walk::WalkMode;

/// Markers that upgrade a plain source to hybrid extraction.
const ANNOTATION_MARKERS: [&str; 2] = ["---@", "--- @"];

/// Extract the functions documented in `content`.
///
/// Only [`SourceKind::JsonNativeCatalog`] can fail, and only when the
/// content is not a JSON object. Malformed Lua yields fewer entries.
pub fn extract(content: &str, source_name: &str, kind: SourceKind) -> Result<FunctionMap, DocsError> {
    let functions = match kind {
        SourceKind::AnnotatedDefinitions => walk::walk(content, source_name, WalkMode::Annotated),
        SourceKind::Hybrid => walk::walk(content, source_name, WalkMode::Hybrid),
        SourceKind::PlainFunctions => {
            if ANNOTATION_MARKERS.iter().any(|m| content.contains(m)) {
                walk::walk(content, source_name, WalkMode::Hybrid)
            } else {
                plain::scan(content, source_name)
            }
        }
        SourceKind::JsonNativeCatalog => catalog::parse(content, source_name)?,
    };
    Ok(functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_DESCRIPTION;

    #[test]
    fn test_plain_upgrades_to_hybrid() {
        let src = "---@param x number\nlocal function Scale(x) end\n";
        let map = extract(src, "util", SourceKind::PlainFunctions).unwrap();
        let scale = &map["Scale"];
        assert_eq!(scale.parameters[0].ty.as_str(), "number");
    }

    #[test]
    fn test_plain_without_markers() {
        let src = "-- helper functions\nfunction Round(n) end\n";
        let map = extract(src, "util", SourceKind::PlainFunctions).unwrap();
        assert_eq!(map["Round"].description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_malformed_lua_never_fails() {
        for kind in [
            SourceKind::AnnotatedDefinitions,
            SourceKind::PlainFunctions,
            SourceKind::Hybrid,
        ] {
            let result = extract("function (((\n--[==[ unterminated", "bad", kind);
            assert!(result.unwrap().is_empty());
        }
    }
}
