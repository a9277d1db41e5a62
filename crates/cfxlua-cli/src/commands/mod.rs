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

//! CLI command implementations

mod docs;
mod lint;

pub use docs::docs;
pub use lint::{lint, LintOptions, OutputFormat};

use crate::error::CliError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default maximum file size (64 MB).
/// Can be overridden via the `CFXLUA_MAX_FILE_SIZE` environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Files matched when a directory is given on the command line.
pub const LUA_GLOB: &str = "**/*.lua";

fn get_max_file_size() -> u64 {
    std::env::var("CFXLUA_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// The size is checked through `fs::metadata()` before anything is
/// allocated.
///
/// # Errors
///
/// Returns `Err` if:
/// - The file metadata cannot be accessed
/// - The file size exceeds the maximum allowed size (configurable via `CFXLUA_MAX_FILE_SIZE`)
/// - The file cannot be read or is not valid UTF-8
pub fn read_file(path: impl AsRef<Path>) -> Result<String, CliError> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Expand command-line paths into the Lua files to process.
///
/// Files are taken as given; directories contribute every `.lua` file
/// below them, sorted. Duplicates keep their first position.
pub fn collect_lua_files(paths: &[String]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for raw in paths {
        let path = Path::new(raw);
        if !path.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }

        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&path.to_string_lossy()),
            LUA_GLOB
        );
        let entries = glob::glob(&pattern).map_err(|e| CliError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

        let mut found: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        found.sort();
        files.extend(found);
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}
