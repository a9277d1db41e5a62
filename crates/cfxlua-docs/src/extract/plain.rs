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

//! Whole-content pattern scan for undocumented sources.

use super::parse_param_list;
use crate::model::{FunctionDoc, FunctionMap};
use cfxlua_core::lex::{is_masked, sanitize};
use once_cell::sync::Lazy;
use regex::Regex;

/// Plain and library functions, assignments, locals, exports; in that order.
static SCANS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        r"(?m)^[ \t]*function\s+([A-Za-z_][A-Za-z0-9_]*(?:[.:][A-Za-z_][A-Za-z0-9_]*)?)\s*\(([^)]*)\)",
        r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?)\s*=\s*function\s*\(([^)]*)\)",
        r"(?m)^[ \t]*local\s+function\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)",
        r#"exports\s*\(\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*,\s*function\s*\(([^)]*)\)"#,
    ]
    .map(|p| Regex::new(p).expect("plain scan regex"))
});

/// `exports.name` is keyed by its bare name and `Lib:name` as `Lib.name`.
fn index_key(name: &str) -> String {
    match name.strip_prefix("exports.") {
        Some(bare) => bare.to_string(),
        None => name.replace(':', "."),
    }
}

pub(crate) fn scan(content: &str, source_name: &str) -> FunctionMap {
    let sanitized = sanitize(content);
    let mut functions = FunctionMap::new();

    for re in SCANS.iter() {
        for caps in re.captures_iter(content) {
            let (Some(name), Some(params)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let Some(whole) = caps.get(0) else { continue };
            let start = whole.start() + whole.as_str().len() - whole.as_str().trim_start().len();
            if is_masked(content, &sanitized, start) {
                continue;
            }
            let key = index_key(name.as_str());
            let doc = FunctionDoc::minimal(key.clone(), source_name, parse_param_list(params.as_str()));
            functions.insert(key, doc);
        }
    }

    functions
}
