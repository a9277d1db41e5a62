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

//! Rule: local functions called above their declaration.
//!
//! A `local function` is not visible before the line that declares it, so
//! an earlier bare call resolves to a nil global and fails at runtime.

use super::LintRule;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cfxlua_core::lex::{find_word, is_blank};
use cfxlua_core::{ScanContext, Span};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub(crate) const RULE_ID: &str = "forward-reference";

static LOCAL_FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\blocal\s+function\s+([A-Za-z_][A-Za-z0-9_]*)").expect("local function regex")
});

/// Rule: forward reference to a local function
pub struct ForwardReferenceRule;

impl LintRule for ForwardReferenceRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Flag calls to local functions that appear before the declaration"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Diagnostic> {
        let lines = ctx.sanitized_lines();

        // First declaration wins
        let mut declared: HashMap<&str, usize> = HashMap::new();
        for (line_no, line) in lines.iter().enumerate() {
            for caps in LOCAL_FUNCTION_DECL.captures_iter(line) {
                if let Some(name) = caps.get(1) {
                    declared.entry(name.as_str()).or_insert(line_no);
                }
            }
        }

        if declared.is_empty() {
            return Vec::new();
        }

        let mut names: Vec<(&str, usize)> = declared.into_iter().collect();
        names.sort_unstable();

        let mut diagnostics = Vec::new();
        for (line_no, line) in lines.iter().enumerate() {
            if is_blank(line) || LOCAL_FUNCTION_DECL.is_match(line) {
                continue;
            }
            for &(name, decl_line) in &names {
                if line_no >= decl_line {
                    continue;
                }
                for (start, end) in bare_calls(line, name) {
                    diagnostics.push(
                        Diagnostic::error(
                            DiagnosticKind::ForwardReference,
                            format!(
                                "`{}` is called before its local declaration on line {}",
                                name,
                                decl_line + 1
                            ),
                            RULE_ID,
                        )
                        .with_span(Span::on_line(line_no, start, end))
                        .with_suggestion(format!("Move `local function {}` above this call", name)),
                    );
                }
            }
        }

        diagnostics
    }
}

/// Yields `(start, end)` for every `name(` call not reached through `.` or
/// `:`; `end` is one past the opening parenthesis.
fn bare_calls(line: &str, name: &str) -> Vec<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut calls = Vec::new();
    let mut from = 0;

    while let Some(start) = find_word(line, name, from) {
        from = start + name.len();

        let qualified = start > 0 && matches!(bytes[start - 1], b'.' | b':');
        if qualified {
            continue;
        }

        let mut paren = from;
        while paren < bytes.len() && (bytes[paren] == b' ' || bytes[paren] == b'\t') {
            paren += 1;
        }
        if bytes.get(paren) == Some(&b'(') {
            calls.push((start, paren + 1));
        }
    }

    calls
}
