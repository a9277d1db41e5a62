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

//! Function declaration shapes.

use crate::model::ParameterDoc;
use once_cell::sync::Lazy;
use regex::Regex;

/// The syntactic form a declaration was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationShape {
    /// `function name(...)`
    Plain,
    /// `name = function(...)`
    Assignment,
    /// `local function name(...)`
    Local,
    /// `exports('name', function(...))`, `exports.name = function(...)`,
    /// `function exports.name(...)`
    Export,
    /// `function Lib.name(...)`, `function Lib:name(...)`,
    /// `Lib.name = function(...)`
    Library,
}

impl DeclarationShape {
    /// Shapes visible outside the declaring file.
    pub fn is_public(self) -> bool {
        !matches!(self, DeclarationShape::Local)
    }
}

/// A matched declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Index key (`Lib.name` for library members).
    pub name: String,
    pub shape: DeclarationShape,
    /// The raw text between the parentheses.
    pub params: String,
    /// Byte offset of the first character of the match.
    pub start: usize,
}

const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";

fn line_regex(body: &str) -> Regex {
    let pattern = format!(r"^(\s*){}", body.replace("IDENT", IDENT));
    Regex::new(&pattern).expect("declaration regex")
}

/// Ordered table; the first match wins.
///
/// Every pattern captures the leading indentation as group 1, then either
/// a single name or a `(table, member)` pair, and the parameter list last.
static SHAPES: Lazy<Vec<(DeclarationShape, Regex)>> = Lazy::new(|| {
    use DeclarationShape::*;
    vec![
        (Plain, line_regex(r"function\s+(IDENT)\s*\(([^)]*)\)")),
        (Assignment, line_regex(r"(IDENT)\s*=\s*function\s*\(([^)]*)\)")),
        (Local, line_regex(r"local\s+function\s+(IDENT)\s*\(([^)]*)\)")),
        (
            Export,
            line_regex(r#"exports\s*\(\s*['"](IDENT)['"]\s*,\s*function\s*\(([^)]*)\)"#),
        ),
        (
            Export,
            line_regex(r"exports\.(IDENT)\s*=\s*function\s*\(([^)]*)\)"),
        ),
        (Export, line_regex(r"function\s+exports\.(IDENT)\s*\(([^)]*)\)")),
        (
            Library,
            line_regex(r"function\s+(IDENT)[.:](IDENT)\s*\(([^)]*)\)"),
        ),
        (
            Library,
            line_regex(r"(IDENT)\.(IDENT)\s*=\s*function\s*\(([^)]*)\)"),
        ),
    ]
});

/// Match `line` against the declaration shapes.
pub fn match_declaration(line: &str) -> Option<Declaration> {
    for (shape, re) in SHAPES.iter() {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let start = caps.get(1).map_or(0, |m| m.end());
        let name = if *shape == DeclarationShape::Library {
            format!("{}.{}", &caps[2], &caps[3])
        } else {
            caps[2].to_string()
        };
        let params = caps
            .get(caps.len() - 1)
            .map_or("", |m| m.as_str())
            .to_string();
        return Some(Declaration {
            name,
            shape: *shape,
            params,
            start,
        });
    }
    None
}

/// Split a parameter list into untyped parameters.
///
/// Entries are trimmed; a trailing `?` marks the parameter optional.
///
/// ```
/// use cfxlua_docs::extract::parse_param_list;
///
/// let params = parse_param_list(" source, data? ,");
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[1].name, "data");
/// assert!(params[1].optional);
/// ```
pub fn parse_param_list(list: &str) -> Vec<ParameterDoc> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| match p.strip_suffix('?') {
            Some(name) => ParameterDoc::untyped(name.trim_end(), true),
            None => ParameterDoc::untyped(p, false),
        })
        .collect()
}
