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

//! Property-based tests for the sanitizer.

use cfxlua_core::lex::sanitize;
use proptest::prelude::*;

/// Lua-ish text heavy on the characters that drive the state machine.
fn lua_soup() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("-".to_string()),
            Just("--".to_string()),
            Just("[".to_string()),
            Just("]".to_string()),
            Just("=".to_string()),
            Just("\"".to_string()),
            Just("'".to_string()),
            Just("\\".to_string()),
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("é".to_string()),
            "[a-z ]{1,6}",
        ],
        0..64,
    )
    .prop_map(|parts| parts.concat())
}

fn line_lengths(text: &str) -> Vec<usize> {
    text.split('\n').map(str::len).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Property: sanitizing twice is the same as sanitizing once.
    #[test]
    fn prop_idempotent(text in lua_soup()) {
        let once = sanitize(&text);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// Property: idempotence holds for arbitrary unicode input too.
    #[test]
    fn prop_idempotent_any_string(text in any::<String>()) {
        let once = sanitize(&text);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// Property: line count and per-line byte length never change.
    #[test]
    fn prop_shape_preserved(text in lua_soup()) {
        let out = sanitize(&text);
        prop_assert_eq!(out.len(), text.len());
        prop_assert_eq!(line_lengths(&out), line_lengths(&text));
    }

    /// Property: output bytes are either copied or blanked.
    #[test]
    fn prop_bytes_copied_or_blanked(text in any::<String>()) {
        let out = sanitize(&text);
        for (raw, masked) in text.bytes().zip(out.bytes()) {
            prop_assert!(raw == masked || masked == b' ');
            if raw == b'\n' || raw == b'\r' {
                prop_assert_eq!(raw, masked);
            }
        }
    }

    /// Property: keywords inside a string literal never survive.
    #[test]
    fn prop_string_contents_hidden(
        prefix in "[a-z0-9 =(),.]{0,20}",
        quote in prop_oneof![Just('"'), Just('\'')],
        filler in "[a-z ]{0,10}",
    ) {
        let text = format!("{prefix}{quote}{filler}while true do end{filler}{quote} x");
        let out = sanitize(&text);
        prop_assert!(out.starts_with(&prefix));
        let rest = &out[prefix.len()..];
        prop_assert!(!rest.contains("while"));
        prop_assert!(!rest.contains("end"));
        let suffix = format!("{quote} x");
        prop_assert!(out.ends_with(&suffix));
    }

    /// Property: keywords inside line and block comments never survive.
    #[test]
    fn prop_comment_contents_hidden(
        prefix in "[a-z0-9 =(),.]{0,20}",
        level in 0usize..4,
        block in any::<bool>(),
    ) {
        let text = if block {
            let eq = "=".repeat(level);
            format!("{prefix}--[{eq}[ while true do\nend ]{eq}]\nWait(0)")
        } else {
            format!("{prefix}-- while true do end\nWait(0)")
        };
        let out = sanitize(&text);
        prop_assert!(!out[prefix.len()..].contains("while"));
        prop_assert!(out.ends_with("\nWait(0)"));
    }

    /// Property: a long string only closes at its own level.
    #[test]
    fn prop_long_bracket_level_fidelity(
        level in 1usize..6,
        other in 0usize..6,
        body in "[a-z ]{0,12}",
    ) {
        prop_assume!(other != level);
        let eq = "=".repeat(level);
        let wrong = "=".repeat(other);
        let text = format!("s = [{eq}[{body}]{wrong}]{body}]{eq}] tail");
        let out = sanitize(&text);
        let interior = text.len() - "s = ".len() - 2 * (level + 2) - " tail".len();
        let expected = format!("s = [{eq}[{}]{eq}] tail", " ".repeat(interior));
        prop_assert_eq!(out, expected);
    }
}

#[test]
fn test_nested_long_bracket_scenario() {
    let text = "x = [==[ a ]=] b ]==]\nWait(0)";
    let out = sanitize(text);
    assert!(out.starts_with("x = [==["));
    assert!(out.contains("]==]\nWait(0)"));
    assert!(!out.contains("]=]"));
}

#[test]
fn test_loop_keywords_in_string_are_hidden() {
    let out = sanitize("local s = \"while true do end\"");
    assert!(!out.contains("while"));
    assert_eq!(out.len(), "local s = \"while true do end\"".len());
}
