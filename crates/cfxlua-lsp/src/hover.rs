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

//! Hover information from the documentation index.
//!
//! Hovering over `lib.notify` in `lib.notify({ title = 'x' })` shows the
//! signature, description, parameters, returns, side and examples of the
//! indexed function. Method syntax `obj:method` is looked up as
//! `obj.method`.

use crate::utils::{byte_to_utf16, dotted_name_at, index_key, utf16_to_byte};
use cfxlua_docs::{DocumentationIndex, FunctionDoc};
use std::fmt::Write;
use tower_lsp::lsp_types::*;

/// One-line signature, e.g. `lib.notify(data: table, duration?: any) -> boolean`.
pub fn signature(doc: &FunctionDoc) -> String {
    let params: Vec<String> = doc
        .parameters
        .iter()
        .map(|p| {
            format!(
                "{}{}: {}",
                p.name,
                if p.optional { "?" } else { "" },
                p.ty
            )
        })
        .collect();
    let mut sig = format!("{}({})", doc.name, params.join(", "));
    if !doc.returns.is_empty() {
        let returns: Vec<&str> = doc.returns.iter().map(|r| r.ty.as_str()).collect();
        let _ = write!(sig, " -> {}", returns.join(", "));
    }
    sig
}

/// Markdown body shared by hover and completion documentation.
pub fn markdown(doc: &FunctionDoc) -> String {
    let mut out = format!("```lua\nfunction {}\n```\n\n{}\n", signature(doc), doc.description);

    if !doc.parameters.is_empty() {
        out.push_str("\n**Parameters**\n\n");
        for p in &doc.parameters {
            let _ = write!(out, "- `{}` `{}`", p.name, p.ty);
            if let Some(desc) = &p.description {
                let _ = write!(out, ": {}", desc);
            }
            out.push('\n');
        }
    }

    if !doc.returns.is_empty() {
        out.push_str("\n**Returns**\n\n");
        for r in &doc.returns {
            let _ = write!(out, "- `{}`", r.ty);
            if let Some(desc) = &r.description {
                let _ = write!(out, ": {}", desc);
            }
            out.push('\n');
        }
    }

    if let Some(side) = doc.side {
        let _ = writeln!(out, "\n**Side:** {}", side);
    }

    for example in &doc.examples {
        let _ = write!(out, "\n```lua\n{}\n```\n", example);
    }

    let _ = write!(out, "\n*Source: {}*", doc.source);
    out
}

/// Hover for the dotted name under `position` on `line`.
pub fn get_hover(index: &DocumentationIndex, line: &str, position: Position) -> Option<Hover> {
    let byte_col = utf16_to_byte(line, position.character);
    let range = dotted_name_at(line, byte_col)?;
    let doc = index.get_function(&index_key(&line[range.clone()]))?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: markdown(&doc),
        }),
        range: Some(Range {
            start: Position {
                line: position.line,
                character: byte_to_utf16(line, range.start),
            },
            end: Position {
                line: position.line,
                character: byte_to_utf16(line, range.end),
            },
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_index;

    fn hover_text(hover: Hover) -> String {
        match hover.contents {
            HoverContents::Markup(m) => m.value,
            _ => String::new(),
        }
    }

    #[test]
    fn test_signature_format() {
        let index = sample_index();
        let doc = index.get_function("lib.notify").unwrap();
        assert_eq!(signature(&doc), "lib.notify(data: table, duration?: number) -> boolean");
    }

    #[test]
    fn test_hover_on_library_member() {
        let index = sample_index();
        let line = "    lib.notify({ title = 'Saved' })";
        let hover = get_hover(&index, line, Position { line: 3, character: 9 }).unwrap();
        let range = hover.range.unwrap();
        assert_eq!((range.start.character, range.end.character), (4, 14));

        let text = hover_text(hover);
        assert!(text.contains("function lib.notify("));
        assert!(text.contains("Shows a notification."));
        assert!(text.contains("- `duration` `number`: Milliseconds"));
        assert!(text.contains("*Source: ox_lib*"));
    }

    #[test]
    fn test_hover_method_syntax() {
        let index = sample_index();
        let hover = get_hover(&index, "lib:notify(x)", Position { line: 0, character: 5 });
        assert!(hover.is_some());
    }

    #[test]
    fn test_hover_unknown_or_blank() {
        let index = sample_index();
        assert!(get_hover(&index, "Unknown()", Position { line: 0, character: 2 }).is_none());
        assert!(get_hover(&index, "   ", Position { line: 0, character: 1 }).is_none());
    }
}
