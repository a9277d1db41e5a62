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

//! Per-document scan context.
//!
//! A [`ScanContext`] is built once per scan trigger and shared read-only by
//! every pass. It owns the raw text and its sanitized twin; lines are
//! addressed by byte ranges into both, so the two views can never drift
//! apart.

use std::ops::Range;

use crate::lex::{is_masked, sanitize};

/// Raw and sanitized views of one document.
#[derive(Debug, Clone)]
pub struct ScanContext {
    identity: String,
    raw_text: String,
    sanitized_text: String,
    lines: Vec<Range<usize>>,
}

impl ScanContext {
    /// Sanitizes `text` and indexes its lines.
    ///
    /// Lines are split on `\n`; a trailing `\r` is left out of the line so
    /// CRLF files report the same columns as LF files.
    pub fn new(identity: impl Into<String>, text: impl Into<String>) -> Self {
        let raw_text = text.into();
        let sanitized_text = sanitize(&raw_text);
        let lines = split_lines(&raw_text);

        Self {
            identity: identity.into(),
            raw_text,
            sanitized_text,
            lines,
        }
    }

    /// Document URI or path this context was built for.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn sanitized_text(&self) -> &str {
        &self.sanitized_text
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Raw line `index`, or `None` past the end.
    pub fn raw_line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|r| &self.raw_text[r.clone()])
    }

    /// Sanitized line `index`, or `None` past the end.
    pub fn sanitized_line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|r| &self.sanitized_text[r.clone()])
    }

    /// All raw lines in order.
    pub fn raw_lines(&self) -> Vec<&str> {
        self.lines.iter().map(|r| &self.raw_text[r.clone()]).collect()
    }

    /// All sanitized lines in order.
    pub fn sanitized_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(|r| &self.sanitized_text[r.clone()])
            .collect()
    }

    /// Returns `true` when the byte at (`line`, `column`) is live code,
    /// i.e. not blanked out as part of a comment or string body.
    ///
    /// Only meaningful for non-space bytes: whitespace inside a literal or
    /// comment reads as code (see [`is_masked`]).
    pub fn is_code_at(&self, line: usize, column: usize) -> bool {
        match self.lines.get(line) {
            Some(range) if range.start + column < range.end => {
                !is_masked(&self.raw_text, &self.sanitized_text, range.start + column)
            }
            _ => false,
        }
    }
}

fn split_lines(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;

    for newline in memchr::memchr_iter(b'\n', bytes) {
        lines.push(trim_cr(bytes, start, newline));
        start = newline + 1;
    }
    lines.push(trim_cr(bytes, start, bytes.len()));

    lines
}

fn trim_cr(bytes: &[u8], start: usize, end: usize) -> Range<usize> {
    if end > start && bytes[end - 1] == b'\r' {
        start..end - 1
    } else {
        start..end
    }
}
