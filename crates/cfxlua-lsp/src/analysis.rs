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

//! Document analysis and diagnostic conversion.

use crate::utils::byte_to_utf16;
use cfxlua_core::{ScanContext, SourcePos};
use cfxlua_lint::{Diagnostic, LintConfig, LintRunner, Severity};
use tower_lsp::lsp_types::{self, DiagnosticSeverity, NumberOrString, Position, Range};

/// `source` field of every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "cfxlua";

/// Sanitize `text`, run the configured passes and convert the result.
pub fn analyze(identity: &str, text: &str, config: LintConfig) -> Vec<lsp_types::Diagnostic> {
    let ctx = ScanContext::new(identity, text);
    let diagnostics = LintRunner::new(config).run(&ctx);
    to_lsp_diagnostics(&ctx, &diagnostics)
}

fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Hint => DiagnosticSeverity::HINT,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Error => DiagnosticSeverity::ERROR,
    }
}

fn to_position(ctx: &ScanContext, pos: SourcePos) -> Position {
    let character = ctx
        .raw_line(pos.line())
        .map_or(pos.column() as u32, |line| byte_to_utf16(line, pos.column()));
    Position {
        line: pos.line() as u32,
        character,
    }
}

/// Convert byte-column diagnostics to LSP diagnostics with UTF-16 columns.
pub fn to_lsp_diagnostics(ctx: &ScanContext, diagnostics: &[Diagnostic]) -> Vec<lsp_types::Diagnostic> {
    diagnostics
        .iter()
        .map(|diag| {
            let span = diag.span();
            let message = match diag.suggestion() {
                Some(suggestion) => format!("{} ({})", diag.message(), suggestion),
                None => diag.message().to_string(),
            };
            lsp_types::Diagnostic {
                range: Range {
                    start: to_position(ctx, span.start()),
                    end: to_position(ctx, span.end()),
                },
                severity: Some(to_lsp_severity(diag.severity())),
                code: Some(NumberOrString::String(diag.code().to_string())),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message,
                ..Default::default()
            }
        })
        .collect()
}
