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

//! Rule: deprecated natives and helpers.

use super::{scan_replacements, ApiReplacement, LintRule};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cfxlua_core::ScanContext;

pub(crate) const RULE_ID: &str = "deprecated-api";

pub const DEPRECATED_APIS: &[ApiReplacement] = &[
    ApiReplacement {
        pattern: "GetPlayerPed(-1)",
        replacement: "PlayerPedId()",
        reason: "GetPlayerPed(-1) is slower than the dedicated native",
    },
    ApiReplacement {
        pattern: "GetDistanceBetweenCoords(",
        replacement: "#(coordsA - coordsB)",
        reason: "vector subtraction with the length operator is much faster",
    },
    ApiReplacement {
        pattern: "RegisterServerEvent(",
        replacement: "RegisterNetEvent(",
        reason: "RegisterServerEvent is a deprecated alias",
    },
    ApiReplacement {
        pattern: "Citizen.Wait(",
        replacement: "Wait(",
        reason: "Wait is available as a global",
    },
    ApiReplacement {
        pattern: "Citizen.Trace(",
        replacement: "print(",
        reason: "Citizen.Trace is superseded by print",
    },
    ApiReplacement {
        pattern: "GetPlayerPed(PlayerId())",
        replacement: "PlayerPedId()",
        reason: "PlayerPedId() returns the local ped directly",
    },
];

/// Rule: deprecated API usage
pub struct DeprecatedApiRule;

impl LintRule for DeprecatedApiRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Suggest replacements for deprecated natives and helpers"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Diagnostic> {
        scan_replacements(ctx, DEPRECATED_APIS, |entry| {
            Diagnostic::hint(
                DiagnosticKind::DeprecatedApi,
                format!("`{}` is deprecated: {}", entry.pattern, entry.reason),
                RULE_ID,
            )
            .with_suggestion(format!("Use {}", entry.replacement))
        })
    }
}
