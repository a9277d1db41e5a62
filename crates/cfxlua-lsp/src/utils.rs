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

//! Position conversion and safe string handling.
//!
//! Diagnostics carry byte columns; LSP positions count UTF-16 code units.
//! Every conversion here clamps to a valid character boundary instead of
//! panicking on out-of-range or mid-character positions.

use std::ops::Range;

/// Slice `s` up to `byte_pos`, rounding down to a character boundary.
///
/// ```
/// use cfxlua_lsp::utils::safe_slice_to;
///
/// let s = "Wait(\u{1F600})";
/// assert_eq!(safe_slice_to(s, 5), "Wait(");
/// assert_eq!(safe_slice_to(s, 7), "Wait(");
/// ```
pub fn safe_slice_to(s: &str, byte_pos: usize) -> &str {
    &s[..floor_boundary(s, byte_pos)]
}

/// Slice `s` from `byte_pos`, rounding down to a character boundary.
pub fn safe_slice_from(s: &str, byte_pos: usize) -> &str {
    if byte_pos >= s.len() {
        return "";
    }
    &s[floor_boundary(s, byte_pos)..]
}

fn floor_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut pos = pos;
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// UTF-16 length of the first `byte_col` bytes of `line`.
pub fn byte_to_utf16(line: &str, byte_col: usize) -> u32 {
    safe_slice_to(line, byte_col)
        .chars()
        .map(char::len_utf16)
        .sum::<usize>() as u32
}

/// Byte offset of UTF-16 column `col`, clamped to the line length.
pub fn utf16_to_byte(line: &str, col: u32) -> usize {
    let mut units = 0usize;
    for (offset, ch) in line.char_indices() {
        if units >= col as usize {
            return offset;
        }
        units += ch.len_utf16();
    }
    line.len()
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':'
}

/// Byte range of the dotted name (`lib.callback`, `obj:method`) that
/// touches `byte_col`, if any.
pub fn dotted_name_at(line: &str, byte_col: usize) -> Option<Range<usize>> {
    let bytes = line.as_bytes();
    let col = byte_col.min(bytes.len());
    let mut start = col;
    while start > 0 && is_name_byte(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = col;
    while end < bytes.len() && is_name_byte(bytes[end]) {
        end += 1;
    }
    let is_sep = |c: char| c == '.' || c == ':';
    let word = &line[start..end];
    let trimmed_start = start + word.len() - word.trim_start_matches(is_sep).len();
    let trimmed_end = trimmed_start + line[trimmed_start..end].trim_end_matches(is_sep).len();
    (trimmed_start < trimmed_end).then_some(trimmed_start..trimmed_end)
}

/// Index key form of a name: method syntax `a:b` is looked up as `a.b`.
pub fn index_key(name: &str) -> String {
    name.replace(':', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_slice_ascii() {
        let s = "Citizen.Wait(0)";
        assert_eq!(safe_slice_to(s, 7), "Citizen");
        assert_eq!(safe_slice_to(s, 100), s);
        assert_eq!(safe_slice_from(s, 8), "Wait(0)");
        assert_eq!(safe_slice_from(s, 100), "");
    }

    #[test]
    fn test_safe_slice_multibyte() {
        let s = "x = 'é'";
        // 'é' is two bytes starting at 5
        assert_eq!(safe_slice_to(s, 6), "x = '");
        assert_eq!(safe_slice_from(s, 6), "é'");
    }

    #[test]
    fn test_utf16_round_trip() {
        let line = "print('\u{1F600}') y = 1";
        let y = line.find('y').unwrap();
        let col = byte_to_utf16(line, y);
        // The emoji is 4 bytes but 2 UTF-16 units.
        assert_eq!(col as usize, y - 2);
        assert_eq!(utf16_to_byte(line, col), y);
        assert_eq!(utf16_to_byte(line, 10_000), line.len());
    }

    #[test]
    fn test_dotted_name_at() {
        let line = "local p = lib.callback.await('x')";
        let at = line.find("callback").unwrap();
        let range = dotted_name_at(line, at).unwrap();
        assert_eq!(&line[range], "lib.callback.await");

        let line = "QBCore.Functions:GetPlayer(src)";
        let range = dotted_name_at(line, 3).unwrap();
        assert_eq!(&line[range.clone()], "QBCore.Functions:GetPlayer");
        assert_eq!(index_key(&line[range]), "QBCore.Functions.GetPlayer");

        assert_eq!(dotted_name_at("   ", 1), None);
        assert_eq!(dotted_name_at("Wait(", 4).map(|r| &"Wait("[r]), Some("Wait"));
    }
}
