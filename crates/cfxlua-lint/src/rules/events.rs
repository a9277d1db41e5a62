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

//! Rule: net-event registration idioms.
//!
//! Event names live in string literals, which the sanitizer blanks, so this
//! rule matches on raw lines. A match only counts when its first byte is
//! live code; that keeps commented-out registrations quiet.

use super::LintRule;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cfxlua_core::{ScanContext, Span};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const RULE_ID: &str = "event-registration";

static REGISTER_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bRegisterNetEvent\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("register regex")
});

static HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bAddEventHandler\s*\(\s*['"]([^'"]+)['"]"#).expect("handler regex")
});

static CRAMPED_ARGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:AddEventHandler|RegisterNetEvent|RegisterServerEvent|TriggerEvent|TriggerServerEvent|TriggerClientEvent)\s*\(\s*['"][^'"]*['"](,)[^\s]"#,
    )
    .expect("argument spacing regex")
});

/// Rule: event registration patterns
pub struct EventRegistrationRule;

impl LintRule for EventRegistrationRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Check RegisterNetEvent/AddEventHandler pairing and argument spacing"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Diagnostic> {
        let lines = ctx.raw_lines();
        let mut diagnostics = Vec::new();

        for (line_no, line) in lines.iter().enumerate() {
            for caps in REGISTER_ONLY.captures_iter(line) {
                let (Some(call), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if !ctx.is_code_at(line_no, call.start()) {
                    continue;
                }
                let span = Span::on_line(line_no, call.start(), call.end());
                let event = name.as_str();

                if next_line_handles(ctx, &lines, line_no + 1, event) {
                    diagnostics.push(
                        Diagnostic::hint(
                            DiagnosticKind::EventRegisterCombine,
                            format!(
                                "RegisterNetEvent and AddEventHandler for '{}' can be one call",
                                event
                            ),
                            RULE_ID,
                        )
                        .with_span(span)
                        .with_suggestion(format!(
                            "RegisterNetEvent('{}', function(...) end)",
                            event
                        )),
                    );
                } else {
                    diagnostics.push(
                        Diagnostic::information(
                            DiagnosticKind::EventRegisterNoHandler,
                            format!("Event '{}' is registered without a handler", event),
                            RULE_ID,
                        )
                        .with_span(span)
                        .with_suggestion("Pass the handler as the second argument"),
                    );
                }
            }

            for caps in CRAMPED_ARGS.captures_iter(line) {
                let (Some(call), Some(comma)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if !ctx.is_code_at(line_no, call.start()) {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::hint(
                        DiagnosticKind::EventParamSpacing,
                        "Missing space after the event name argument",
                        RULE_ID,
                    )
                    .with_span(Span::on_line(line_no, comma.start(), comma.end()))
                    .with_suggestion(", "),
                );
            }
        }

        diagnostics
    }
}

fn next_line_handles(ctx: &ScanContext, lines: &[&str], line_no: usize, event: &str) -> bool {
    let Some(line) = lines.get(line_no) else {
        return false;
    };
    HANDLER.captures_iter(line).any(|caps| match (caps.get(0), caps.get(1)) {
        (Some(call), Some(name)) => name.as_str() == event && ctx.is_code_at(line_no, call.start()),
        _ => false,
    })
}
