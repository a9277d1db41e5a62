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

//! Lint rules
//!
//! Every rule is a pure function of a [`ScanContext`]. Detection runs on the
//! sanitized lines so that comments and string bodies never match; ranges
//! are reported in raw-line byte columns, which are identical by
//! construction.

mod deprecated;
mod events;
mod forward_ref;
mod global_leak;
mod legacy;
mod loop_yield;

pub use deprecated::{DeprecatedApiRule, DEPRECATED_APIS};
pub use events::EventRegistrationRule;
pub use forward_ref::ForwardReferenceRule;
pub use global_leak::{GlobalLeakRule, DEFAULT_GLOBAL_EXCEPTIONS};
pub use legacy::{LegacyApiRule, LEGACY_APIS};
pub use loop_yield::{LoopYieldRule, YIELD_PRIMITIVES};

use crate::diagnostic::Diagnostic;
use cfxlua_core::{ScanContext, Span};

/// Rule identifiers, in the order the default rule set runs them.
pub const RULE_IDS: &[&str] = &[
    loop_yield::RULE_ID,
    global_leak::RULE_ID,
    deprecated::RULE_ID,
    events::RULE_ID,
    legacy::RULE_ID,
    forward_ref::RULE_ID,
];

/// Configuration for a single rule
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Whether the rule is enabled
    pub enabled: bool,
    /// Whether to treat warnings as errors
    pub error: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            error: false,
        }
    }
}

/// Trait for lint rules
pub trait LintRule: Send + Sync {
    /// Rule identifier
    fn id(&self) -> &str;

    /// Rule description
    fn description(&self) -> &str;

    /// Run the rule on a scanned document
    fn check(&self, ctx: &ScanContext) -> Vec<Diagnostic>;
}

/// Get the default rule set, with the global-leak allow-list provided.
pub fn default_rules_with_exceptions<I, S>(exceptions: I) -> Vec<Box<dyn LintRule>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    vec![
        Box::new(LoopYieldRule::new()),
        Box::new(GlobalLeakRule::with_exceptions(exceptions)),
        Box::new(DeprecatedApiRule),
        Box::new(EventRegistrationRule),
        Box::new(LegacyApiRule),
        Box::new(ForwardReferenceRule),
    ]
}

/// Get all default rules
pub fn default_rules() -> Vec<Box<dyn LintRule>> {
    default_rules_with_exceptions(DEFAULT_GLOBAL_EXCEPTIONS.iter().copied())
}

/// One row of a call-replacement table.
#[derive(Debug, Clone, Copy)]
pub struct ApiReplacement {
    /// Text searched for on sanitized lines
    pub pattern: &'static str,
    /// What to write instead
    pub replacement: &'static str,
    /// Why the pattern is flagged
    pub reason: &'static str,
}

/// Shared scan for table-driven substring rules.
///
/// Every occurrence of every pattern yields one diagnostic produced by
/// `build`, spanning the pattern on the raw line.
pub(crate) fn scan_replacements<F>(
    ctx: &ScanContext,
    table: &[ApiReplacement],
    mut build: F,
) -> Vec<Diagnostic>
where
    F: FnMut(&ApiReplacement) -> Diagnostic,
{
    let mut diagnostics = Vec::new();

    for (line_no, line) in ctx.sanitized_lines().iter().enumerate() {
        for entry in table {
            for (column, _) in line.match_indices(entry.pattern) {
                diagnostics.push(build(entry).with_span(Span::on_line(
                    line_no,
                    column,
                    column + entry.pattern.len(),
                )));
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_ids() {
        let rules = default_rules();
        let ids: Vec<_> = rules.iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, RULE_IDS);
        assert!(rules.iter().all(|r| !r.description().is_empty()));
    }

    #[test]
    fn test_rule_config_default() {
        let config = RuleConfig::default();
        assert!(config.enabled);
        assert!(!config.error);
    }
}
