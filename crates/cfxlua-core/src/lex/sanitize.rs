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

//! Comment and string masking.
//!
//! [`sanitize`] produces a copy of the source where every byte inside a
//! comment or string literal is replaced by an ASCII space. Newlines and
//! carriage returns survive untouched and the output has exactly the same
//! byte length as the input, so any offset computed on the sanitized text
//! addresses the same character in the raw text.
//!
//! String delimiters (`"`, `'`, `[==[`, `]==]`) are kept so that passes can
//! still see *where* a literal sits; only its contents disappear. Comments,
//! including the `--` marker and any long-bracket delimiters, are blanked
//! entirely.
//!
//! ```
//! use cfxlua_core::lex::sanitize;
//!
//! let src = "local s = \"while true do end\" -- loop?\nWait(0)";
//! let out = sanitize(src);
//! assert_eq!(out.len(), src.len());
//! assert!(!out.contains("while"));
//! assert!(!out.contains("--"));
//! assert!(out.ends_with("\nWait(0)"));
//! ```

/// Scanner state. Levels count the `=` signs between long brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    LineComment,
    BlockComment { level: usize },
    ShortString { delimiter: u8 },
    LongString { level: usize },
}

/// Mask comments and string contents while preserving layout.
///
/// Malformed input never fails: an unterminated comment or string masks
/// everything up to the end of the text.
pub fn sanitize(text: &str) -> String {
    let bytes = text.as_bytes();

    // Fast path: nothing that could open a comment or a string
    if memchr::memchr3(b'-', b'"', b'\'', bytes).is_none() && memchr::memchr(b'[', bytes).is_none()
    {
        return text.to_string();
    }

    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut state = LexState::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        match state {
            LexState::Code => {
                if b == b'-' && bytes.get(i + 1) == Some(&b'-') {
                    if let Some(level) = long_bracket_open(bytes, i + 2) {
                        let len = 2 + level + 2;
                        mask_into(&mut out, &bytes[i..i + len]);
                        i += len;
                        state = LexState::BlockComment { level };
                    } else {
                        mask_into(&mut out, &bytes[i..i + 2]);
                        i += 2;
                        state = LexState::LineComment;
                    }
                } else if b == b'"' || b == b'\'' {
                    out.push(b);
                    i += 1;
                    state = LexState::ShortString { delimiter: b };
                } else if let Some(level) = long_bracket_open(bytes, i) {
                    let len = level + 2;
                    out.extend_from_slice(&bytes[i..i + len]);
                    i += len;
                    state = LexState::LongString { level };
                } else {
                    out.push(b);
                    i += 1;
                }
            }
            LexState::LineComment => {
                if b == b'\n' {
                    out.push(b);
                    state = LexState::Code;
                } else {
                    out.push(mask_byte(b));
                }
                i += 1;
            }
            LexState::BlockComment { level } => {
                if long_bracket_close(bytes, i, level) {
                    let len = level + 2;
                    mask_into(&mut out, &bytes[i..i + len]);
                    i += len;
                    state = LexState::Code;
                } else {
                    out.push(mask_byte(b));
                    i += 1;
                }
            }
            LexState::ShortString { delimiter } => {
                if b == b'\\' {
                    // The escape swallows whatever follows, newline included
                    let end = (i + 2).min(bytes.len());
                    mask_into(&mut out, &bytes[i..end]);
                    i = end;
                } else if b == delimiter {
                    out.push(b);
                    i += 1;
                    state = LexState::Code;
                } else {
                    out.push(mask_byte(b));
                    i += 1;
                }
            }
            LexState::LongString { level } => {
                if long_bracket_close(bytes, i, level) {
                    let len = level + 2;
                    out.extend_from_slice(&bytes[i..i + len]);
                    i += len;
                    state = LexState::Code;
                } else {
                    out.push(mask_byte(b));
                    i += 1;
                }
            }
        }
    }

    // State changes only happen on ASCII bytes, so every copied run is a
    // sequence of whole UTF-8 characters and every masked byte is a space.
    match String::from_utf8(out) {
        Ok(sanitized) => sanitized,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Check whether the byte at `offset` was blanked by [`sanitize`].
///
/// A byte counts as masked when the raw text has something other than a
/// space there but the sanitized text has a space. Offsets past the end of
/// either text are reported as masked.
///
/// A raw space is never reported as masked, even inside a string or
/// comment, since blanking leaves no trace there. Callers must ask about a
/// non-space byte, such as the first character of a token match.
pub fn is_masked(raw: &str, sanitized: &str, offset: usize) -> bool {
    match (raw.as_bytes().get(offset), sanitized.as_bytes().get(offset)) {
        (Some(&r), Some(&s)) => r != b' ' && s == b' ',
        _ => true,
    }
}

/// Detect a long-bracket opener `[=*[` at `start`, returning its level.
pub fn long_bracket_open(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b'[') {
        return None;
    }

    let mut j = start + 1;
    while bytes.get(j) == Some(&b'=') {
        j += 1;
    }

    if bytes.get(j) == Some(&b'[') {
        Some(j - start - 1)
    } else {
        None
    }
}

/// Check for a closer `]` + `level` equals + `]` at `start`.
///
/// At most `level + 1` equals signs are scanned, which is enough to tell a
/// near miss (`]===]` against level 2) from a match without walking an
/// arbitrarily long run of `=`.
pub fn long_bracket_close(bytes: &[u8], start: usize, level: usize) -> bool {
    if bytes.get(start) != Some(&b']') {
        return false;
    }

    let mut j = start + 1;
    let mut equals = 0;
    while equals <= level && bytes.get(j) == Some(&b'=') {
        equals += 1;
        j += 1;
    }

    equals == level && bytes.get(j) == Some(&b']')
}

#[inline]
fn mask_byte(b: u8) -> u8 {
    match b {
        b'\n' | b'\r' => b,
        _ => b' ',
    }
}

#[inline]
fn mask_into(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend(bytes.iter().map(|&b| mask_byte(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(n: usize) -> String {
        " ".repeat(n)
    }

    // ==================== Comments ====================

    #[test]
    fn test_line_comment_masked() {
        assert_eq!(sanitize("x = 1 -- note"), format!("x = 1 {}", blank(7)));
    }

    #[test]
    fn test_line_comment_keeps_newline() {
        assert_eq!(sanitize("-- a\r\nb"), format!("{}\r\nb", blank(4)));
    }

    #[test]
    fn test_block_comment_level_zero() {
        let src = "a --[[ while true do\nend ]] b";
        assert_eq!(sanitize(src), format!("a {}\n{} b", blank(18), blank(6)));
    }

    #[test]
    fn test_block_comment_requires_matching_level() {
        let src = "--[==[ ]] ]=] ]==]x";
        assert_eq!(sanitize(src), format!("{}x", blank(src.len() - 1)));
    }

    #[test]
    fn test_block_comment_does_not_nest() {
        // The inner [[ is plain text; the first ]] closes the comment.
        assert_eq!(sanitize("--[[ [[ ]] y ]]"), format!("{} y ]]", blank(10)));
    }

    #[test]
    fn test_unterminated_block_comment_masks_to_end() {
        assert_eq!(sanitize("--[[ open\nstill"), format!("{}\n{}", blank(9), blank(5)));
    }

    #[test]
    fn test_triple_dash_is_line_comment() {
        assert_eq!(sanitize("---@param x"), blank(11));
    }

    // ==================== Strings ====================

    #[test]
    fn test_short_string_contents_masked() {
        assert_eq!(sanitize(r#"print("hi")"#), r#"print("  ")"#);
        assert_eq!(sanitize("print('hi')"), "print('  ')");
    }

    #[test]
    fn test_escaped_delimiter_does_not_terminate() {
        assert_eq!(sanitize(r#"s = "a\"b" x"#), format!("s = \"{}\" x", blank(4)));
    }

    #[test]
    fn test_escaped_newline_continues_string() {
        assert_eq!(sanitize("s = \"a\\\nb\" x"), "s = \"  \n \" x");
    }

    #[test]
    fn test_newline_does_not_close_short_string() {
        let out = sanitize("s = \"abc\nWait(0)");
        assert_eq!(out, format!("s = \"{}\n{}", blank(3), blank(7)));
    }

    #[test]
    fn test_other_quote_inside_string() {
        assert_eq!(
            sanitize(r#"s = "it's" --c"#),
            format!("s = \"{}\"{}", blank(4), blank(4))
        );
    }

    #[test]
    fn test_comment_marker_inside_string() {
        assert_eq!(
            sanitize(r#"url = "http://a--b" y"#),
            format!("url = \"{}\" y", blank(11))
        );
    }

    #[test]
    fn test_long_string_keeps_delimiters() {
        assert_eq!(sanitize("s = [[abc]] t"), format!("s = [[{}]] t", blank(3)));
    }

    #[test]
    fn test_nested_long_bracket_fidelity() {
        let src = "s = [==[ a ]=] b ]==] c";
        assert_eq!(sanitize(src), format!("s = [==[{}]==] c", blank(9)));
    }

    #[test]
    fn test_unterminated_long_string() {
        assert_eq!(sanitize("x = [=[ abc"), format!("x = [=[{}", blank(4)));
    }

    // ==================== Layout ====================

    #[test]
    fn test_multibyte_masked_per_byte() {
        let src = "s = \"h\u{e9}llo\" -- \u{fc}";
        let out = sanitize(src);
        assert_eq!(out.len(), src.len());
        assert_eq!(out, format!("s = \"{}\"{}", blank(6), blank(6)));
    }

    #[test]
    fn test_multibyte_in_code_is_copied() {
        let src = "na\u{ef}ve = [[x]]";
        assert_eq!(sanitize(src), "na\u{ef}ve = [[ ]]");
    }

    #[test]
    fn test_fast_path_returns_input() {
        let src = "while true do\nWait(0)\nend";
        assert_eq!(sanitize(src), src);
    }

    #[test]
    fn test_idempotent_on_mixed_input() {
        let src = "a = \"x\\\"y\" --[=[ c ]=] [[ s ]] -- t\n'q'";
        let once = sanitize(src);
        assert_eq!(sanitize(&once), once);
    }

    // ==================== Bracket helpers ====================

    #[test]
    fn test_long_bracket_open_levels() {
        assert_eq!(long_bracket_open(b"[[", 0), Some(0));
        assert_eq!(long_bracket_open(b"[===[", 0), Some(3));
        assert_eq!(long_bracket_open(b"[==x", 0), None);
        assert_eq!(long_bracket_open(b"[", 0), None);
        assert_eq!(long_bracket_open(b"x[[", 0), None);
    }

    #[test]
    fn test_long_bracket_close_exact_level() {
        assert!(long_bracket_close(b"]==]", 0, 2));
        assert!(!long_bracket_close(b"]=]", 0, 2));
        assert!(!long_bracket_close(b"]===]", 0, 2));
        assert!(!long_bracket_close(b"]==", 0, 2));
        assert!(long_bracket_close(b"]]", 0, 0));
    }

    #[test]
    fn test_is_masked() {
        let raw = "f() -- g()";
        let san = sanitize(raw);
        assert!(!is_masked(raw, &san, 0));
        assert!(is_masked(raw, &san, 7));
        assert!(!is_masked(raw, &san, 3));
        assert!(is_masked(raw, &san, 100));
    }

    #[test]
    fn test_is_masked_only_answers_for_non_space_bytes() {
        let raw = r#"x = "a b" -- c d"#;
        let san = sanitize(raw);
        // Letters inside the string and the comment are masked.
        assert!(is_masked(raw, &san, 5));
        assert!(is_masked(raw, &san, 13));
        // Their neighbouring spaces are indistinguishable from code.
        assert!(!is_masked(raw, &san, 6));
        assert!(!is_masked(raw, &san, 14));
    }
}
