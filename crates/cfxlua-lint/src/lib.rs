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

//! CfxLua Linting
//!
//! Diagnostic passes for CitizenFX Lua resources. Each pass works on a
//! [`ScanContext`], which carries the raw text and a sanitized copy with
//! comments and string bodies blanked out.
//!
//! ## Quick Start
//!
//! ```rust
//! use cfxlua_lint::{lint_text, Severity};
//!
//! let diagnostics = lint_text("client.lua", "while true do\n  DoWork()\nend");
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].code(), "loop-no-yield-while");
//! assert_eq!(diagnostics[0].severity(), Severity::Warning);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use cfxlua_core::ScanContext;
//! use cfxlua_lint::{lint_with_config, LintConfig, Severity};
//!
//! let mut config = LintConfig::default();
//! config.disable_rule("global-leak");
//! config.set_rule_error("loop-yield");
//! config.min_severity = Severity::Information;
//! config.global_exceptions.push("Framework".to_string());
//!
//! let ctx = ScanContext::new("server.lua", "Framework = {}");
//! let diagnostics = lint_with_config(&ctx, config);
//! assert!(diagnostics.is_empty());
//! ```
//!
//! ## Custom Rules
//!
//! ```rust
//! use cfxlua_core::ScanContext;
//! use cfxlua_lint::{Diagnostic, LintConfig, LintRule, LintRunner};
//!
//! struct MyCustomRule;
//!
//! impl LintRule for MyCustomRule {
//!     fn id(&self) -> &str { "my-custom-rule" }
//!     fn description(&self) -> &str { "Custom validation logic" }
//!     fn check(&self, _ctx: &ScanContext) -> Vec<Diagnostic> {
//!         vec![]
//!     }
//! }
//!
//! let mut runner = LintRunner::new(LintConfig::default());
//! runner.add_rule(Box::new(MyCustomRule));
//!
//! let diagnostics = runner.run(&ScanContext::new("a.lua", "Wait(0)"));
//! assert!(diagnostics.is_empty());
//! ```

mod diagnostic;
mod error;
pub mod rules;
mod runner;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::ConfigError;
pub use rules::{default_rules, LintRule, RuleConfig, RULE_IDS};
pub use runner::{LintConfig, LintRunner};

use cfxlua_core::ScanContext;

/// Run all default lint rules on a scanned document
pub fn lint(ctx: &ScanContext) -> Vec<Diagnostic> {
    let runner = LintRunner::new(LintConfig::default());
    runner.run(ctx)
}

/// Run lint with custom configuration
pub fn lint_with_config(ctx: &ScanContext, config: LintConfig) -> Vec<Diagnostic> {
    let runner = LintRunner::new(config);
    runner.run(ctx)
}

/// Sanitize `text` and run the default rules on it.
pub fn lint_text(identity: &str, text: &str) -> Vec<Diagnostic> {
    lint(&ScanContext::new(identity, text))
}
