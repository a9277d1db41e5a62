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

//! Lint runner

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::error::ConfigError;
use crate::rules::{default_rules_with_exceptions, LintRule, RuleConfig, DEFAULT_GLOBAL_EXCEPTIONS, RULE_IDS};
use cfxlua_core::lex::{is_ident_byte, is_ident_start};
use cfxlua_core::ScanContext;
use std::collections::HashMap;

/// Maximum number of diagnostics to collect before stopping.
///
/// A generated or minified script can trip the same rule on every line;
/// past this point the editor gains nothing from more entries.
const MAX_DIAGNOSTICS: usize = 10_000;

/// Configuration for the lint runner
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Rule configurations by rule ID
    pub rules: HashMap<String, RuleConfig>,
    /// Minimum severity to report
    pub min_severity: Severity,
    /// Maximum number of diagnostics to collect (default: 10,000)
    pub max_diagnostics: usize,
    /// Names the global-leak rule never reports
    pub global_exceptions: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            min_severity: Severity::Hint,
            max_diagnostics: MAX_DIAGNOSTICS,
            global_exceptions: DEFAULT_GLOBAL_EXCEPTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LintConfig {
    /// Validate configuration (rule IDs, limits and the allow-list).
    pub fn validate(&self) -> Result<(), ConfigError> {
        const MAX_RULE_ID_LENGTH: usize = 100;
        const MAX_RULES: usize = 1000;

        if self.rules.len() > MAX_RULES {
            return Err(ConfigError::TooManyRules {
                count: self.rules.len(),
                max: MAX_RULES,
            });
        }

        for id in self.rules.keys() {
            if id.is_empty() {
                return Err(ConfigError::EmptyRuleId);
            }
            if id.len() > MAX_RULE_ID_LENGTH {
                return Err(ConfigError::RuleIdTooLong {
                    len: id.len(),
                    max: MAX_RULE_ID_LENGTH,
                });
            }
        }

        if self.max_diagnostics == 0 {
            return Err(ConfigError::ZeroDiagnosticLimit);
        }

        for name in &self.global_exceptions {
            if !is_identifier(name) {
                return Err(ConfigError::InvalidException(name.clone()));
            }
        }

        Ok(())
    }

    /// Like [`validate`](Self::validate), and also rejects rule IDs that
    /// no built-in rule uses.
    pub fn validate_known_rules(&self) -> Result<(), ConfigError> {
        self.validate()?;
        match self.rules.keys().find(|id| !RULE_IDS.contains(&id.as_str())) {
            Some(unknown) => Err(ConfigError::UnknownRule(unknown.clone())),
            None => Ok(()),
        }
    }

    /// Disable a specific rule
    pub fn disable_rule(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: false,
                error: false,
            },
        );
    }

    /// Enable a specific rule
    pub fn enable_rule(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: true,
                error: false,
            },
        );
    }

    /// Set a rule to error level
    pub fn set_rule_error(&mut self, rule_id: &str) {
        self.rules.insert(
            rule_id.to_string(),
            RuleConfig {
                enabled: true,
                error: true,
            },
        );
    }

    /// Whether a rule runs under this configuration.
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).map_or(true, |rule| rule.enabled)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    matches!(bytes.next(), Some(b) if is_ident_start(b)) && bytes.all(is_ident_byte)
}

/// Lint runner
pub struct LintRunner {
    config: LintConfig,
    rules: Vec<Box<dyn LintRule>>,
}

impl LintRunner {
    /// Create a new lint runner with default rules
    pub fn new(config: LintConfig) -> Self {
        let rules = default_rules_with_exceptions(config.global_exceptions.iter().cloned());
        Self { config, rules }
    }

    /// Create a lint runner with custom rules
    pub fn with_rules(config: LintConfig, rules: Vec<Box<dyn LintRule>>) -> Self {
        Self { config, rules }
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Run all enabled rules on a scanned document.
    ///
    /// Output is ordered by line, then column. If more than
    /// `config.max_diagnostics` diagnostics are produced, collection stops
    /// and a `diagnostic-limit-exceeded` warning is appended last.
    pub fn run(&self, ctx: &ScanContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut limit_exceeded = false;

        for rule in &self.rules {
            if diagnostics.len() >= self.config.max_diagnostics {
                limit_exceeded = true;
                break;
            }

            let rule_id = rule.id();
            let rule_config = self.config.rules.get(rule_id).cloned().unwrap_or_default();

            if !rule_config.enabled {
                continue;
            }

            let mut rule_diagnostics = rule.check(ctx);

            for diag in &mut rule_diagnostics {
                if rule_config.error && diag.severity() == Severity::Warning {
                    diag.escalate_to_error();
                }
            }

            for diag in rule_diagnostics
                .into_iter()
                .filter(|d| d.severity() >= self.config.min_severity)
            {
                if diagnostics.len() >= self.config.max_diagnostics {
                    limit_exceeded = true;
                    break;
                }
                diagnostics.push(diag);
            }

            if limit_exceeded {
                break;
            }
        }

        diagnostics.sort_by_key(|d| d.span().start());

        if limit_exceeded {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::DiagnosticLimitExceeded,
                format!(
                    "Diagnostic limit of {} exceeded; further diagnostics were suppressed",
                    self.config.max_diagnostics
                ),
                "lint-runner",
            ));
        }

        diagnostics
    }

    /// Check if any errors were found
    pub fn has_errors(&self, diagnostics: &[Diagnostic]) -> bool {
        diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }
}
