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

//! Source position and span tracking.
//!
//! Positions are zero-based. Columns are byte offsets into the raw source
//! line; because sanitization preserves byte lengths, a column computed
//! against the sanitized line is valid in the raw line as well.
//!
//! # Examples
//!
//! ```
//! use cfxlua_core::lex::{SourcePos, Span};
//!
//! let span = Span::on_line(3, 4, 9);
//! assert!(span.is_single_line());
//! assert_eq!(span.start(), SourcePos::new(3, 4));
//! assert_eq!(span.len_on_line(), Some(5));
//! ```

use std::fmt;

/// A position in source code (zero-based line, zero-based byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Creates a new source position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns the line number.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column (byte offset within the line).
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Humans count from one.
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open span `[start, end)` in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    start: SourcePos,
    end: SourcePos,
}

impl Span {
    /// Creates a new span from start and end positions.
    #[inline]
    pub const fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    /// Creates a span covering `start..end` columns on a single line.
    #[inline]
    pub const fn on_line(line: usize, start: usize, end: usize) -> Self {
        Self {
            start: SourcePos::new(line, start),
            end: SourcePos::new(line, end),
        }
    }

    /// Gets the start position (inclusive).
    #[inline]
    pub const fn start(&self) -> SourcePos {
        self.start
    }

    /// Gets the end position (exclusive).
    #[inline]
    pub const fn end(&self) -> SourcePos {
        self.end
    }

    /// Checks if this span is on a single line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Width in bytes for single-line spans.
    pub fn len_on_line(&self) -> Option<usize> {
        if self.is_single_line() {
            Some(self.end.column.saturating_sub(self.start.column))
        } else {
            None
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(
                f,
                "{}:{}-{}",
                self.start.line + 1,
                self.start.column + 1,
                self.end.column + 1
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_pos_ordering() {
        assert!(SourcePos::new(0, 9) < SourcePos::new(1, 0));
        assert!(SourcePos::new(2, 1) < SourcePos::new(2, 3));
    }

    #[test]
    fn test_source_pos_display_is_one_based() {
        assert_eq!(SourcePos::new(0, 0).to_string(), "1:1");
        assert_eq!(SourcePos::new(9, 4).to_string(), "10:5");
    }

    #[test]
    fn test_span_on_line() {
        let span = Span::on_line(2, 3, 8);
        assert_eq!(span.start(), SourcePos::new(2, 3));
        assert_eq!(span.end(), SourcePos::new(2, 8));
        assert_eq!(span.len_on_line(), Some(5));
        assert_eq!(span.to_string(), "3:4-9");
    }

    #[test]
    fn test_multi_line_span() {
        let span = Span::new(SourcePos::new(0, 2), SourcePos::new(3, 1));
        assert!(!span.is_single_line());
        assert_eq!(span.len_on_line(), None);
        assert_eq!(span.to_string(), "1:3-4:2");
    }
}
