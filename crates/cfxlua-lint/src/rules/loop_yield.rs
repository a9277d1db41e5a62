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

//! Rule: loops that never yield.
//!
//! The CitizenFX scheduler is cooperative. A `while` or `repeat` loop whose
//! body never calls a yield primitive keeps the resource thread busy and
//! freezes the client or server.

use super::LintRule;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cfxlua_core::lex::find_word;
use cfxlua_core::{BlockMatcher, ScanContext, Span, TextualBlockMatcher};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const RULE_ID: &str = "loop-yield";

/// Calls that hand control back to the scheduler.
pub const YIELD_PRIMITIVES: &[&str] = &["Wait", "Citizen.Wait", "coroutine.yield", "Citizen.Await"];

static YIELD_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_.:])(?:Citizen\.Wait|Citizen\.Await|coroutine\.yield|Wait)\s*\(")
        .expect("yield call regex")
});

static WHILE_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bwhile\b.*\bdo\b").expect("while opener regex"));

static REPEAT_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\brepeat\b").expect("repeat opener regex"));

/// One loop shape the rule knows how to check.
struct LoopShape {
    opener: &'static Lazy<Regex>,
    start_keyword: &'static str,
    end_keyword: &'static str,
    kind: DiagnosticKind,
}

/// Rule: loop without yield
pub struct LoopYieldRule {
    shapes: Vec<LoopShape>,
    matcher: Box<dyn BlockMatcher + Send + Sync>,
}

impl LoopYieldRule {
    pub fn new() -> Self {
        Self::with_matcher(Box::new(TextualBlockMatcher))
    }

    /// Uses a different block matcher for finding loop ends.
    pub fn with_matcher(matcher: Box<dyn BlockMatcher + Send + Sync>) -> Self {
        Self {
            shapes: vec![
                LoopShape {
                    opener: &WHILE_OPENER,
                    start_keyword: "while",
                    end_keyword: "end",
                    kind: DiagnosticKind::LoopNoYieldWhile,
                },
                LoopShape {
                    opener: &REPEAT_OPENER,
                    start_keyword: "repeat",
                    end_keyword: "until",
                    kind: DiagnosticKind::LoopNoYieldRepeat,
                },
            ],
            matcher,
        }
    }

    fn check_shape(&self, shape: &LoopShape, lines: &[&str], out: &mut Vec<Diagnostic>) {
        for (line_no, line) in lines.iter().enumerate() {
            let Some(found) = shape.opener.find(line) else {
                continue;
            };
            let column = found.start();
            let after_keyword = column + shape.start_keyword.len();

            let yields = if let Some(close) = find_word(line, shape.end_keyword, after_keyword) {
                // Whole loop on one line: only its own body counts
                has_yield(&line[after_keyword..close])
            } else {
                match self
                    .matcher
                    .find_block_end(lines, line_no, shape.start_keyword, shape.end_keyword)
                {
                    Some(end) => lines[line_no + 1..end].iter().any(|body| has_yield(body)),
                    None => continue,
                }
            };

            if !yields {
                out.push(
                    Diagnostic::warning(
                        shape.kind.clone(),
                        format!(
                            "`{}` loop never yields; it will stall the resource thread",
                            shape.start_keyword
                        ),
                        RULE_ID,
                    )
                    .with_span(Span::on_line(line_no, column, after_keyword))
                    .with_suggestion("Call Wait(0) inside the loop body"),
                );
            }
        }
    }
}

impl Default for LoopYieldRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for LoopYieldRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Flag while/repeat loops that never call Wait or another yield"
    }

    fn check(&self, ctx: &ScanContext) -> Vec<Diagnostic> {
        let lines = ctx.sanitized_lines();
        let mut diagnostics = Vec::new();
        for shape in &self.shapes {
            self.check_shape(shape, &lines, &mut diagnostics);
        }
        diagnostics
    }
}

fn has_yield(text: &str) -> bool {
    YIELD_CALL.is_match(text)
}
