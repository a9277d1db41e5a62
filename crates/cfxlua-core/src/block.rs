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

//! Keyword-pair block matching over sanitized lines.
//!
//! This is a textual nesting heuristic, not a parser. Keywords are matched
//! as plain substrings, so `endpoint` counts as an `end`. Callers rely on
//! that exact behavior; a real parser can be plugged in later through
//! [`BlockMatcher`].

/// Finds the line that closes a block opened on another line.
pub trait BlockMatcher {
    /// Returns the index of the line where the block opened at `start`
    /// is closed, or `None` when the text runs out first.
    fn find_block_end(
        &self,
        lines: &[&str],
        start: usize,
        start_keyword: &str,
        end_keyword: &str,
    ) -> Option<usize>;
}

/// Depth-counting matcher working on raw substrings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualBlockMatcher;

impl BlockMatcher for TextualBlockMatcher {
    fn find_block_end(
        &self,
        lines: &[&str],
        start: usize,
        start_keyword: &str,
        end_keyword: &str,
    ) -> Option<usize> {
        find_block_end(lines, start, start_keyword, end_keyword)
    }
}

/// Free-function form of [`TextualBlockMatcher`].
///
/// Depth starts at 1 for the opener on `start`. Every later non-blank line
/// that contains `start_keyword` adds one, then every line that contains
/// `end_keyword` removes one; the first line that brings the depth to zero
/// is returned.
///
/// # Examples
///
/// ```
/// use cfxlua_core::block::find_block_end;
///
/// let lines = ["while a do", "  while b do", "  end", "", "end"];
/// assert_eq!(find_block_end(&lines, 0, "while", "end"), Some(4));
/// assert_eq!(find_block_end(&lines[..3], 0, "while", "end"), None);
/// ```
pub fn find_block_end(
    lines: &[&str],
    start: usize,
    start_keyword: &str,
    end_keyword: &str,
) -> Option<usize> {
    let mut depth: usize = 1;

    for (index, line) in lines.iter().enumerate().skip(start + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if line.contains(start_keyword) {
            depth += 1;
        }
        if line.contains(end_keyword) {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_block() {
        let lines = ["while true do", "  Wait(0)", "end"];
        assert_eq!(find_block_end(&lines, 0, "while", "end"), Some(2));
    }

    #[test]
    fn test_nested_blocks() {
        let lines = [
            "while a do",
            "  while b do",
            "    Wait(0)",
            "  end",
            "end",
        ];
        assert_eq!(find_block_end(&lines, 0, "while", "end"), Some(4));
        assert_eq!(find_block_end(&lines, 1, "while", "end"), Some(3));
    }

    #[test]
    fn test_opener_and_closer_on_same_line() {
        // +1 then -1 keeps the depth unchanged.
        let lines = ["while a do", "  while b do Wait(0) end", "end"];
        assert_eq!(find_block_end(&lines, 0, "while", "end"), Some(2));
    }

    #[test]
    fn test_repeat_until() {
        let lines = ["repeat", "  x = x + 1", "until x > 10"];
        assert_eq!(find_block_end(&lines, 0, "repeat", "until"), Some(2));
    }

    #[test]
    fn test_not_found() {
        let lines = ["while true do", "  Wait(0)"];
        assert_eq!(find_block_end(&lines, 0, "while", "end"), None);
    }

    #[test]
    fn test_substring_heuristic_is_kept() {
        // `endpoint` closes the block: the matcher is intentionally textual.
        let lines = ["while true do", "  local endpoint = 1", "end"];
        assert_eq!(find_block_end(&lines, 0, "while", "end"), Some(1));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let lines = ["while true do", "   ", "", "end"];
        assert_eq!(find_block_end(&lines, 0, "while", "end"), Some(3));
    }

    #[test]
    fn test_start_past_end() {
        let lines = ["end"];
        assert_eq!(find_block_end(&lines, 5, "while", "end"), None);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let matcher: &dyn BlockMatcher = &TextualBlockMatcher;
        let lines = ["repeat", "until done"];
        assert_eq!(matcher.find_block_end(&lines, 0, "repeat", "until"), Some(1));
    }
}
