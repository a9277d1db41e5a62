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

//! Rule: `Citizen.*` prefixes with a global shorthand.

use super::{scan_replacements, ApiReplacement, LintRule};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cfxlua_core::ScanContext;

pub(crate) const RULE_ID: &str = "legacy-api";

pub const LEGACY_APIS: &[ApiReplacement] = &[
    ApiReplacement {
        pattern: "Citizen.CreateThread",
        replacement: "CreateThread",
        reason: "the global alias is shorter",
    },
    ApiReplacement {
        pattern: "Citizen.SetTimeout",
        replacement: "SetTimeout",
        reason: "the global alias is shorter",
    },
];

/// Rule: legacy API rename
pub struct LegacyApiRule;

impl LintRule for LegacyApiRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Prefer CreateThread/SetTimeout over their Citizen.* forms"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Diagnostic> {
        scan_replacements(ctx, LEGACY_APIS, |entry| {
            Diagnostic::information(
                DiagnosticKind::LegacyApiRename,
                format!("`{}` can be written as `{}`", entry.pattern, entry.replacement),
                RULE_ID,
            )
            .with_suggestion(entry.replacement)
        })
    }
}
