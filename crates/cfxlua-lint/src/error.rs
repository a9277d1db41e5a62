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

//! Configuration errors.

use thiserror::Error;

/// Invalid [`LintConfig`](crate::LintConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("too many rule configurations: {count} (max: {max})")]
    TooManyRules { count: usize, max: usize },

    #[error("empty rule ID not allowed")]
    EmptyRuleId,

    #[error("rule ID too long: {len} bytes (max: {max})")]
    RuleIdTooLong { len: usize, max: usize },

    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    #[error("global exception '{0}' is not a valid Lua identifier")]
    InvalidException(String),

    #[error("max_diagnostics must be greater than zero")]
    ZeroDiagnosticLimit,
}
