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

//! Line walk shared by the annotated and hybrid modes.

use super::comment::CommentBlock;
use super::declaration::{match_declaration, Declaration, DeclarationShape};
use super::parse_param_list;
use crate::model::{FunctionDoc, FunctionMap};
use cfxlua_core::ScanContext;

/// Which undocumented declarations the walk keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkMode {
    /// Undocumented local functions are skipped.
    Annotated,
    /// Every declaration produces a doc.
    Hybrid,
}

const DOC_MARKER: &str = "---";

pub(crate) fn walk(content: &str, source_name: &str, mode: WalkMode) -> FunctionMap {
    let ctx = ScanContext::new(source_name, content);
    let mut functions = FunctionMap::new();
    let mut pending: Vec<&str> = Vec::new();

    for (index, line) in ctx.raw_lines().into_iter().enumerate() {
        if let Some(comment) = line.trim_start().strip_prefix(DOC_MARKER) {
            pending.push(comment);
            continue;
        }

        let decl = match match_declaration(line) {
            Some(decl) if ctx.is_code_at(index, decl.start) => decl,
            _ => {
                pending.clear();
                continue;
            }
        };

        let doc = if pending.is_empty() {
            // Definition files expose their API through annotations; a bare
            // local is an implementation helper no caller can reach.
            if mode == WalkMode::Annotated && decl.shape == DeclarationShape::Local {
                continue;
            }
            FunctionDoc::minimal(decl.name.clone(), source_name, parse_param_list(&decl.params))
        } else {
            let block = CommentBlock::parse(&pending);
            pending.clear();
            documented(decl.clone(), source_name, block)
        };
        functions.insert(decl.name, doc);
    }

    functions
}

fn documented(decl: Declaration, source_name: &str, block: CommentBlock) -> FunctionDoc {
    let parameters = block.bind_params(parse_param_list(&decl.params));
    let mut doc = FunctionDoc::minimal(decl.name, source_name, parameters);
    if !block.description.is_empty() {
        doc.description = block.description;
    }
    doc.returns = block.returns;
    doc.examples = block.examples;
    doc
}
