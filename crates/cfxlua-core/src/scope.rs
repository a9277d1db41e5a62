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

//! Nesting-depth tracking for line-oriented passes.

use crate::lex::contains_word;

/// Tracks how deep the scanner is inside function bodies and table
/// constructors, one sanitized line at a time.
///
/// Callers inspect the depths *before* feeding a line, so a line is judged
/// by the scope it starts in.
pub trait ScopeTracker {
    /// Updates the depths with one sanitized line.
    fn observe(&mut self, line: &str);

    /// Current function-body depth.
    fn function_depth(&self) -> usize;

    /// Current table-constructor depth.
    fn table_depth(&self) -> usize;

    /// Whether the scanner sits at file scope outside any table.
    fn at_top_level(&self) -> bool {
        self.function_depth() == 0 && self.table_depth() == 0
    }
}

/// Keyword-counting scope tracker.
///
/// A line containing the word `function` but not `end` opens a function
/// body; a line containing `end` but not `function` closes one. Lines with
/// both, such as `local f = function() end`, leave the depth alone. Loops
/// and conditionals also close with `end`, so depth saturates at zero
/// rather than going negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualScopeTracker {
    function_depth: usize,
    table_depth: usize,
}

impl TextualScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScopeTracker for TextualScopeTracker {
    fn observe(&mut self, line: &str) {
        let opens = contains_word(line, "function");
        let closes = contains_word(line, "end");
        if opens && !closes {
            self.function_depth += 1;
        } else if closes && !opens {
            self.function_depth = self.function_depth.saturating_sub(1);
        }

        let open_braces = memchr::memchr_iter(b'{', line.as_bytes()).count();
        let close_braces = memchr::memchr_iter(b'}', line.as_bytes()).count();
        self.table_depth = (self.table_depth + open_braces).saturating_sub(close_braces);
    }

    fn function_depth(&self) -> usize {
        self.function_depth
    }

    fn table_depth(&self) -> usize {
        self.table_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(lines: &[&str]) -> TextualScopeTracker {
        let mut tracker = TextualScopeTracker::new();
        for line in lines {
            tracker.observe(line);
        }
        tracker
    }

    #[test]
    fn test_function_body_opens_and_closes() {
        let tracker = feed(&["function foo()"]);
        assert_eq!(tracker.function_depth(), 1);
        let tracker = feed(&["function foo()", "  x = 1", "end"]);
        assert_eq!(tracker.function_depth(), 0);
        assert!(tracker.at_top_level());
    }

    #[test]
    fn test_one_line_function_is_neutral() {
        let tracker = feed(&["local f = function() end"]);
        assert_eq!(tracker.function_depth(), 0);
    }

    #[test]
    fn test_depth_saturates_at_zero() {
        let tracker = feed(&["end", "end", "function a()"]);
        assert_eq!(tracker.function_depth(), 1);
    }

    #[test]
    fn test_word_boundaries_respected() {
        let tracker = feed(&["local functional = 1", "local endless = 2"]);
        assert_eq!(tracker.function_depth(), 0);
    }

    #[test]
    fn test_table_depth() {
        let tracker = feed(&["Config = {", "  a = { 1, 2 },", "  b = {"]);
        assert_eq!(tracker.table_depth(), 2);
        let tracker = feed(&["Config = {", "}", "}"]);
        assert_eq!(tracker.table_depth(), 0);
        assert!(!feed(&["t = {"]).at_top_level());
    }
}
