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

//! Identifier and keyword helpers shared by the passes.
//!
//! All functions work on bytes. Identifier characters are ASCII letters,
//! digits and `_`; any non-ASCII byte is treated as a non-identifier byte,
//! which is how the CitizenFX runtime's Lua build treats them too.

/// Returns `true` for bytes that may appear inside an identifier.
#[inline]
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Returns `true` for bytes that may start an identifier.
#[inline]
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Checks whether `word` occurs in `line` at `offset` on word boundaries.
pub fn is_word_at(line: &str, word: &str, offset: usize) -> bool {
    let bytes = line.as_bytes();
    let end = offset + word.len();

    if end > bytes.len() || &bytes[offset..end] != word.as_bytes() {
        return false;
    }

    let before_ok = offset == 0 || !is_ident_byte(bytes[offset - 1]);
    let after_ok = end == bytes.len() || !is_ident_byte(bytes[end]);
    before_ok && after_ok
}

/// Finds the first whole-word occurrence of `word` at or after `from`.
pub fn find_word(line: &str, word: &str, from: usize) -> Option<usize> {
    if word.is_empty() || from > line.len() {
        return None;
    }

    let finder = memchr::memmem::Finder::new(word.as_bytes());
    let mut pos = from;
    while let Some(found) = finder.find(&line.as_bytes()[pos..]) {
        let at = pos + found;
        if is_word_at(line, word, at) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Checks whether `line` contains `word` as a whole word.
#[inline]
pub fn contains_word(line: &str, word: &str) -> bool {
    find_word(line, word, 0).is_some()
}

/// Reads the identifier starting at `offset`, if any.
pub fn ident_at(line: &str, offset: usize) -> Option<&str> {
    let bytes = line.as_bytes();
    if offset >= bytes.len() || !is_ident_start(bytes[offset]) {
        return None;
    }
    let mut end = offset + 1;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    Some(&line[offset..end])
}

/// Returns `true` when the line holds nothing but whitespace.
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries() {
        assert!(contains_word("while true do", "while"));
        assert!(!contains_word("somewhile true", "while"));
        assert!(!contains_word("while_x", "while"));
        assert!(contains_word("x=end", "end"));
        assert!(!contains_word("endless", "end"));
    }

    #[test]
    fn test_find_word_skips_partial_matches() {
        assert_eq!(find_word("endpoint end", "end", 0), Some(9));
        assert_eq!(find_word("end end", "end", 1), Some(4));
        assert_eq!(find_word("end", "end", 4), None);
        assert_eq!(find_word("end", "", 0), None);
    }

    #[test]
    fn test_ident_at() {
        assert_eq!(ident_at("  foo_1(", 2), Some("foo_1"));
        assert_eq!(ident_at("1abc", 0), None);
        assert_eq!(ident_at("x", 5), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t "));
        assert!(!is_blank("  x"));
    }
}
