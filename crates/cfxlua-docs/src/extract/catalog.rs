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

//! JSON native catalogs.
//!
//! A catalog is a flat object keyed by function name:
//!
//! ```json
//! {
//!   "GetPlayerPed": {
//!     "description": "Returns the ped handle of a player.",
//!     "params": [{ "name": "playerId", "type": "number" }],
//!     "returns": { "type": "number", "description": "Ped handle" },
//!     "side": "client",
//!     "examples": ["local ped = GetPlayerPed(-1)"]
//!   }
//! }
//! ```
//!
//! `parameters` is accepted in place of `params`; `returns` may be a type
//! string, an object or an array of either.

use crate::error::DocsError;
use crate::model::{
    FunctionDoc, FunctionMap, ParamType, ParameterDoc, ReturnDoc, Side, DEFAULT_DESCRIPTION,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "parameters")]
    params: Vec<CatalogParam>,
    #[serde(default)]
    returns: Option<CatalogReturns>,
    #[serde(default)]
    side: Option<Side>,
    #[serde(default)]
    examples: Option<CatalogExamples>,
}

#[derive(Debug, Deserialize)]
struct CatalogParam {
    name: String,
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogReturn {
    Type(String),
    Detailed {
        #[serde(rename = "type", default)]
        ty: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogReturns {
    Many(Vec<CatalogReturn>),
    One(CatalogReturn),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogExamples {
    Many(Vec<String>),
    One(String),
}

impl From<CatalogReturn> for ReturnDoc {
    fn from(ret: CatalogReturn) -> Self {
        match ret {
            CatalogReturn::Type(ty) => ReturnDoc {
                ty: ParamType::parse(&ty),
                description: None,
            },
            CatalogReturn::Detailed { ty, description } => ReturnDoc {
                ty: ty.as_deref().map(ParamType::parse).unwrap_or_default(),
                description,
            },
        }
    }
}

impl CatalogEntry {
    fn into_doc(self, name: &str, source_name: &str) -> FunctionDoc {
        let parameters = self
            .params
            .into_iter()
            .map(|p| ParameterDoc {
                name: p.name,
                ty: p.ty.as_deref().map(ParamType::parse).unwrap_or_default(),
                optional: p.optional,
                description: p.description,
            })
            .collect();
        let returns = match self.returns {
            Some(CatalogReturns::Many(list)) => list.into_iter().map(ReturnDoc::from).collect(),
            Some(CatalogReturns::One(ret)) => vec![ret.into()],
            None => Vec::new(),
        };
        let examples = match self.examples {
            Some(CatalogExamples::Many(list)) => list,
            Some(CatalogExamples::One(example)) => vec![example],
            None => Vec::new(),
        };
        FunctionDoc {
            name: name.to_string(),
            source: source_name.to_string(),
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            parameters,
            returns,
            examples,
            side: self.side,
        }
    }
}

pub(crate) fn parse(content: &str, source_name: &str) -> Result<FunctionMap, DocsError> {
    let root: Value = serde_json::from_str(content).map_err(|e| DocsError::Catalog {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;
    let Value::Object(entries) = root else {
        return Err(DocsError::Catalog {
            source_name: source_name.to_string(),
            message: "top level is not an object".to_string(),
        });
    };

    let mut functions = FunctionMap::new();
    for (name, value) in entries {
        if !value.is_object() {
            debug!("Skipping catalog entry '{}' in {}: not an object", name, source_name);
            continue;
        }
        match serde_json::from_value::<CatalogEntry>(value) {
            Ok(entry) => {
                let doc = entry.into_doc(&name, source_name);
                functions.insert(name, doc);
            }
            Err(e) => {
                debug!("Skipping malformed catalog entry '{}' in {}: {}", name, source_name, e);
            }
        }
    }
    Ok(functions)
}
