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

//! Docs command - extract a documentation index from one source file

use super::{read_file, write_output};
use crate::error::CliError;
use cfxlua_docs::{extract, FunctionMap, SourceKind};
use std::path::Path;

/// Pick the source kind for `file`: the explicit one if given, otherwise
/// JSON files are native catalogs and anything else is hybrid.
pub(crate) fn resolve_kind(file: &str, kind: Option<&str>) -> Result<SourceKind, CliError> {
    match kind {
        Some(name) => name.parse().map_err(CliError::InvalidInput),
        None if file.ends_with(".json") => Ok(SourceKind::JsonNativeCatalog),
        None => Ok(SourceKind::Hybrid),
    }
}

/// Extract the functions documented in `file` and print them as JSON.
///
/// The source name recorded on each function defaults to the file stem.
///
/// # Examples
///
/// ```no_run
/// use cfxlua_cli::commands::docs;
///
/// # fn main() -> Result<(), cfxlua_cli::error::CliError> {
/// docs("ox_lib/init.lua", Some("annotated-definitions"), None, None, false)?;
/// # Ok(())
/// # }
/// ```
pub fn docs(
    file: &str,
    kind: Option<&str>,
    name: Option<&str>,
    output: Option<&str>,
    compact: bool,
) -> Result<(), CliError> {
    let kind = resolve_kind(file, kind)?;
    let content = read_file(file)?;

    let source_name = match name {
        Some(name) => name.to_string(),
        None => Path::new(file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string()),
    };

    let functions: FunctionMap = extract(&content, &source_name, kind)?;
    let mut json = if compact {
        serde_json::to_string(&functions)?
    } else {
        serde_json::to_string_pretty(&functions)?
    };
    json.push('\n');

    write_output(&json, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_kind_defaults() {
        assert_eq!(resolve_kind("natives.json", None).unwrap(), SourceKind::JsonNativeCatalog);
        assert_eq!(resolve_kind("lib.lua", None).unwrap(), SourceKind::Hybrid);
    }

    #[test]
    fn test_resolve_kind_explicit() {
        assert_eq!(
            resolve_kind("natives.json", Some("plain")).unwrap(),
            SourceKind::PlainFunctions
        );
        assert!(matches!(
            resolve_kind("lib.lua", Some("markdown")),
            Err(CliError::InvalidInput(_))
        ));
    }
}
