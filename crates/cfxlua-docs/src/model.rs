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

//! Documentation data model.
//!
//! These types are what the extractor produces, what the index stores and
//! what the persistence layer writes to disk. Field names serialize in
//! camelCase to match the on-disk cache format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Description given to functions that carry no documentation comment.
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Extracted functions of one source, keyed by function name.
pub type FunctionMap = BTreeMap<String, FunctionDoc>;

/// A parameter or return type.
///
/// Undocumented types are [`ParamType::Unknown`] rather than a magic
/// string. On the wire `Unknown` is written as `"any"`, and `"any"` (or an
/// empty string) reads back as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamType {
    Known(String),
    #[default]
    Unknown,
}

impl ParamType {
    /// Parse a type annotation, mapping `any` and blanks to `Unknown`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == "any" {
            ParamType::Unknown
        } else {
            ParamType::Known(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParamType::Known(t) => t,
            ParamType::Unknown => "any",
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ParamType::Known(_))
    }
}

impl From<String> for ParamType {
    fn from(s: String) -> Self {
        ParamType::parse(&s)
    }
}

impl From<ParamType> for String {
    fn from(t: ParamType) -> Self {
        match t {
            ParamType::Known(s) => s,
            ParamType::Unknown => "any".to_string(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime side a native is available on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    Server,
    Shared,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Client => "client",
            Side::Server => "server",
            Side::Shared => "shared",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: ParamType,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterDoc {
    /// An untyped parameter as it appears in a bare signature.
    pub fn untyped(name: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            ty: ParamType::Unknown,
            optional,
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnDoc {
    #[serde(rename = "type", default)]
    pub ty: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One documented function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDoc {
    pub name: String,
    pub source: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDoc>,
    #[serde(default)]
    pub returns: Vec<ReturnDoc>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl FunctionDoc {
    /// A doc with only a name and bare parameter list.
    pub fn minimal(
        name: impl Into<String>,
        source: impl Into<String>,
        parameters: Vec<ParameterDoc>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            parameters,
            returns: Vec::new(),
            examples: Vec::new(),
            side: None,
        }
    }
}

/// How a source's content should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Library definitions documented with `---` comment blocks.
    AnnotatedDefinitions,
    /// Undocumented Lua; declarations are harvested by pattern.
    PlainFunctions,
    /// Every declaration, with or without a comment block.
    #[default]
    Hybrid,
    /// A JSON object of natives keyed by name.
    JsonNativeCatalog,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::AnnotatedDefinitions => "annotated-definitions",
            SourceKind::PlainFunctions => "plain-functions",
            SourceKind::Hybrid => "hybrid",
            SourceKind::JsonNativeCatalog => "json-native-catalog",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annotated-definitions" | "annotated" => Ok(SourceKind::AnnotatedDefinitions),
            "plain-functions" | "plain" => Ok(SourceKind::PlainFunctions),
            "hybrid" => Ok(SourceKind::Hybrid),
            "json-native-catalog" | "catalog" => Ok(SourceKind::JsonNativeCatalog),
            other => Err(format!(
                "unknown source kind '{}' (expected annotated-definitions, plain-functions, hybrid or json-native-catalog)",
                other
            )),
        }
    }
}

/// Where a source's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrigin {
    Url(String),
    Path(PathBuf),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::Url(url) => f.write_str(url),
            SourceOrigin::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// A configured documentation source.
///
/// ```
/// use cfxlua_docs::{DocumentationSource, SourceKind, SourceOrigin};
///
/// let json = r#"{ "name": "natives", "url": "https://example.invalid/n.json", "kind": "json-native-catalog" }"#;
/// let source: DocumentationSource = serde_json::from_str(json).unwrap();
/// assert_eq!(source.kind, SourceKind::JsonNativeCatalog);
/// assert!(source.enabled);
/// assert!(matches!(source.origin, SourceOrigin::Url(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationSource {
    pub name: String,
    #[serde(flatten)]
    pub origin: SourceOrigin,
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl DocumentationSource {
    pub fn url(name: impl Into<String>, url: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            origin: SourceOrigin::Url(url.into()),
            kind,
            enabled: true,
        }
    }

    pub fn path(name: impl Into<String>, path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            origin: SourceOrigin::Path(path.into()),
            kind,
            enabled: true,
        }
    }
}
