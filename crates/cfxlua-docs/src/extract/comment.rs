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

//! Doc-comment block parsing.

use crate::model::{ParamType, ParameterDoc, ReturnDoc};
use once_cell::sync::Lazy;
use regex::Regex;

static PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@param\s+([A-Za-z_][A-Za-z0-9_]*|\.\.\.)(\?)?(?:\s+(\S+))?(?:\s+(.*))?$")
        .expect("param regex")
});

static RETURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@returns?(?:\s+(\S+))?(?:\s+(.*))?$").expect("return regex"));

static EXAMPLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bexamples?\b").expect("example regex"));

/// Contents of one `---` block, before it is matched to a declaration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub description: String,
    pub params: Vec<ParameterDoc>,
    pub returns: Vec<ReturnDoc>,
    pub examples: Vec<String>,
}

fn non_empty(s: Option<regex::Match<'_>>) -> Option<String> {
    s.map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn flush_example(buf: &mut Vec<String>, out: &mut Vec<String>) {
    let text = buf.join("\n");
    let text = text.trim();
    if !text.is_empty() {
        out.push(text.to_string());
    }
    buf.clear();
}

impl CommentBlock {
    /// Parse comment lines with the leading `---` already removed.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut block = CommentBlock::default();
        let mut description = Vec::new();
        let mut example: Option<Vec<String>> = None;

        for line in lines {
            let raw = line.as_ref();
            let text = raw.trim();

            if let Some(buf) = example.as_mut() {
                if !text.starts_with('@') {
                    if !text.starts_with("```") {
                        buf.push(raw.strip_prefix(' ').unwrap_or(raw).trim_end().to_string());
                    }
                    continue;
                }
                flush_example(buf, &mut block.examples);
                example = None;
            }

            if let Some(caps) = PARAM.captures(text) {
                let mut ty = caps.get(3).map_or("", |m| m.as_str());
                let mut optional = caps.get(2).is_some();
                if let Some(stripped) = ty.strip_suffix('?') {
                    ty = stripped;
                    optional = true;
                }
                block.params.push(ParameterDoc {
                    name: caps[1].to_string(),
                    ty: ParamType::parse(ty),
                    optional,
                    description: non_empty(caps.get(4)),
                });
            } else if let Some(caps) = RETURN.captures(text) {
                block.returns.push(ReturnDoc {
                    ty: ParamType::parse(caps.get(1).map_or("", |m| m.as_str())),
                    description: non_empty(caps.get(2)),
                });
            } else if EXAMPLE.is_match(text) {
                example = Some(Vec::new());
            } else if !text.starts_with('@') {
                description.push(text);
            }
        }

        if let Some(mut buf) = example {
            flush_example(&mut buf, &mut block.examples);
        }

        block.description = description.join("\n").trim().to_string();
        block
    }

    /// Merge annotations onto the declared parameters.
    ///
    /// Declaration order is kept. Annotations naming no declared parameter
    /// are dropped.
    pub fn bind_params(&self, declared: Vec<ParameterDoc>) -> Vec<ParameterDoc> {
        declared
            .into_iter()
            .map(|param| match self.params.iter().find(|a| a.name == param.name) {
                Some(annotated) => ParameterDoc {
                    name: param.name,
                    ty: annotated.ty.clone(),
                    optional: param.optional || annotated.optional,
                    description: annotated.description.clone(),
                },
                None => param,
            })
            .collect()
    }
}
