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

//! Rule: assignments that silently create globals.

use super::LintRule;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cfxlua_core::lex::{contains_word, ident_at};
use cfxlua_core::{ScanContext, ScopeTracker, Span, TextualScopeTracker};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

pub(crate) const RULE_ID: &str = "global-leak";

/// Names that resources are expected to define or reassign at file scope.
pub const DEFAULT_GLOBAL_EXCEPTIONS: &[&str] = &[
    "Config",
    "ESX",
    "QBCore",
    "exports",
    "RegisterNetEvent",
    "AddEventHandler",
    "Citizen",
    "lib",
];

/// `name =` at the start of a line, but not `name ==`.
static BARE_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=(?:[^=]|$)").expect("assignment regex")
});

static LOCAL_NAMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\blocal\s+([A-Za-z_][A-Za-z0-9_]*(?:\s*<\s*\w+\s*>)?(?:\s*,\s*[A-Za-z_][A-Za-z0-9_]*(?:\s*<\s*\w+\s*>)?)*)")
        .expect("local declaration regex")
});

static LOCAL_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\blocal\s+function\s+([A-Za-z_][A-Za-z0-9_]*)").expect("local function regex")
});

/// Rule: global variable leak
pub struct GlobalLeakRule {
    exceptions: HashSet<String>,
}

impl GlobalLeakRule {
    pub fn new() -> Self {
        Self::with_exceptions(DEFAULT_GLOBAL_EXCEPTIONS.iter().copied())
    }

    /// Builds the rule with a custom allow-list.
    pub fn with_exceptions<I, S>(exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exceptions: exceptions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_exception(&self, name: &str) -> bool {
        self.exceptions.contains(name)
    }
}

impl Default for GlobalLeakRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for GlobalLeakRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Flag file-scope assignments to names never declared local"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut locals: HashSet<String> = HashSet::new();
        let mut scope = TextualScopeTracker::new();

        for (line_no, line) in ctx.sanitized_lines().iter().enumerate() {
            if scope.at_top_level() {
                if let Some(diag) = self.check_assignment(line_no, line, &locals) {
                    diagnostics.push(diag);
                }
            }

            collect_locals(line, &mut locals);
            scope.observe(line);
        }

        diagnostics
    }
}

impl GlobalLeakRule {
    fn check_assignment(
        &self,
        line_no: usize,
        line: &str,
        locals: &HashSet<String>,
    ) -> Option<Diagnostic> {
        let caps = BARE_ASSIGNMENT.captures(line)?;
        let name = caps.get(1)?;
        let ident = name.as_str();

        if locals.contains(ident) || self.is_exception(ident) {
            return None;
        }

        let rhs = line[name.end()..].trim_start().trim_start_matches('=').trim_start();
        if rhs.starts_with('{') || ident_at(rhs, 0) == Some("function") {
            return None;
        }

        Some(
            Diagnostic::information(
                DiagnosticKind::GlobalVariableLeak,
                format!("`{}` is assigned without `local` and leaks into the global scope", ident),
                RULE_ID,
            )
            .with_span(Span::on_line(line_no, name.start(), name.end()))
            .with_suggestion(format!("local {}", line[name.start()..].trim_end())),
        )
    }
}

/// Records every name a line declares with `local`.
fn collect_locals(line: &str, locals: &mut HashSet<String>) {
    if !contains_word(line, "local") {
        return;
    }

    for caps in LOCAL_FUNCTION.captures_iter(line) {
        if let Some(name) = caps.get(1) {
            locals.insert(name.as_str().to_string());
        }
    }

    for caps in LOCAL_NAMES.captures_iter(line) {
        let Some(list) = caps.get(1) else {
            continue;
        };
        for entry in list.as_str().split(',') {
            let entry = entry.trim();
            if let Some(name) = ident_at(entry, 0) {
                if name != "function" {
                    locals.insert(name.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(src: &str) -> Vec<Diagnostic> {
        GlobalLeakRule::new().check(&ScanContext::new("test.lua", src))
    }

    fn names(diags: &[Diagnostic], src: &str) -> Vec<String> {
        let ctx = ScanContext::new("test.lua", src);
        diags
            .iter()
            .map(|d| {
                let span = d.span();
                let line = ctx.raw_line(span.start().line()).unwrap_or_default();
                line[span.start().column()..span.end().column()].to_string()
            })
            .collect()
    }

    #[test]
    fn test_leak_scenario() {
        let src = "local x = 1\ny = 2\nConfig = {}";
        let diags = check(src);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), "global-variable-leak");
        assert_eq!(diags[0].span(), Span::on_line(1, 0, 1));
        assert_eq!(names(&diags, src), vec!["y"]);
    }

    #[test]
    fn test_multi_local_declaration() {
        assert!(check("local a, b, c\na = 1\nc = 3").is_empty());
        assert!(check("local limit <const>, other = 5, 6\nother = 1").is_empty());
    }

    #[test]
    fn test_local_function_counts_as_local() {
        assert!(check("local function f() end\nf = nil").is_empty());
    }

    #[test]
    fn test_comparison_is_not_assignment() {
        assert!(check("y == 2").is_empty());
    }

    #[test]
    fn test_dotted_and_indexed_skipped() {
        assert!(check("Config.Debug = true\nt[1] = 2").is_empty());
    }

    #[test]
    fn test_function_and_table_literals_skipped() {
        assert!(check("handler = function() end").is_empty());
        assert!(check("state = {\n  a = 1,\n}").is_empty());
    }

    #[test]
    fn test_inside_function_body_skipped() {
        assert!(check("function setup()\n  y = 2\nend").is_empty());
        assert_eq!(check("function setup()\n  a = 1\nend\nz = 3").len(), 1);
    }

    #[test]
    fn test_inside_table_skipped() {
        assert!(check("Config = {\n  Debug = false,\n}").is_empty());
    }

    #[test]
    fn test_custom_exceptions() {
        let rule = GlobalLeakRule::with_exceptions(["Framework"]);
        let ctx = ScanContext::new("t.lua", "Framework = nil\nESX = nil");
        let diags = rule.check(&ctx);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line(), 1);
    }

    #[test]
    fn test_assignment_in_comment_ignored() {
        assert!(check("-- y = 2\n--[[\nz = 3\n]]").is_empty());
    }
}
