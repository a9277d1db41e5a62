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

//! Completion from the documentation index.

use crate::hover::{markdown, signature};
use crate::utils::{byte_to_utf16, index_key, utf16_to_byte};
use cfxlua_docs::DocumentationIndex;
use tower_lsp::lsp_types::*;

/// Characters that re-trigger completion inside a dotted name.
pub const TRIGGER_CHARACTERS: [&str; 2] = [".", ":"];

/// Byte offset where the dotted name ending at `byte_col` starts.
fn prefix_start(line: &str, byte_col: usize) -> usize {
    let bytes = line.as_bytes();
    let mut start = byte_col.min(bytes.len());
    while start > 0 {
        let b = bytes[start - 1];
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':' {
            start -= 1;
        } else {
            break;
        }
    }
    start
}

/// Completion items for the name being typed at `position`.
///
/// Every indexed function whose name starts with the typed prefix is
/// offered; the edit replaces the whole prefix so `lib.no` completes to
/// `lib.notify` rather than `lib.lib.notify`.
pub fn get_completions(index: &DocumentationIndex, line: &str, position: Position) -> Vec<CompletionItem> {
    let byte_col = utf16_to_byte(line, position.character);
    let start = prefix_start(line, byte_col);
    let typed = &line[start..byte_col];
    let prefix = index_key(typed);

    let range = Range {
        start: Position {
            line: position.line,
            character: byte_to_utf16(line, start),
        },
        end: position,
    };

    let mut items: Vec<CompletionItem> = index
        .all_functions()
        .into_iter()
        .filter(|doc| doc.name.starts_with(&prefix))
        .map(|doc| {
            // Keep the method separator the user typed.
            let new_text = if typed.contains(':') {
                match doc.name.rsplit_once('.') {
                    Some((owner, method)) => format!("{}:{}", owner, method),
                    None => doc.name.clone(),
                }
            } else {
                doc.name.clone()
            };
            CompletionItem {
                label: doc.name.clone(),
                kind: Some(CompletionItemKind::FUNCTION),
                detail: Some(signature(&doc)),
                documentation: Some(Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: markdown(&doc),
                })),
                filter_text: Some(new_text.clone()),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                    range,
                    new_text,
                })),
                ..Default::default()
            }
        })
        .collect();

    items.sort_by(|a, b| a.label.cmp(&b.label));
    items
}
