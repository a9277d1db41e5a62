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

//! Structured error types for the CfxLua CLI.
//!
//! All CLI operations return `Result<T, CliError>`; `main` prints the
//! message and exits non-zero.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CfxLua CLI operations.
///
/// Implements `Clone` so batch results can be collected from worker threads.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File size exceeds the configured maximum.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// File is not valid UTF-8.
    #[error("File '{0}' is not valid UTF-8")]
    NotUtf8(PathBuf),

    /// A path pattern could not be expanded.
    #[error("Invalid path pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Lint configuration rejected.
    #[error("Invalid lint configuration: {0}")]
    Config(#[from] cfxlua_lint::ConfigError),

    /// Documentation extraction failed.
    #[error("Documentation extraction failed: {0}")]
    Docs(String),

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat { message: String },

    /// Linting found issues that should fail the run.
    #[error("Lint errors found in {files} file(s)")]
    LintErrors { files: usize },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cfxlua_cli::error::CliError;
    /// use std::fs;
    ///
    /// let result = fs::read_to_string("client.lua")
    ///     .map_err(|e| CliError::io_error("client.lua", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::InvalidData {
            return Self::NotUtf8(path);
        }
        Self::Io {
            path,
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

impl From<cfxlua_docs::DocsError> for CliError {
    fn from(source: cfxlua_docs::DocsError) -> Self {
        Self::Docs(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "missing.lua",
            io::Error::new(io::ErrorKind::NotFound, "No such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.lua"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_invalid_data_maps_to_utf8_error() {
        let err = CliError::io_error(
            "binary.lua",
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        assert!(matches!(err, CliError::NotUtf8(_)));
        assert_eq!(err.to_string(), "File 'binary.lua' is not valid UTF-8");
    }

    #[test]
    fn test_file_too_large_display() {
        let err = CliError::file_too_large("huge.lua", 3 * 1024 * 1024, 2 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("huge.lua"));
        assert!(msg.contains("(2 MB)"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = cfxlua_lint::ConfigError::UnknownRule("nope".to_string()).into();
        assert_eq!(err.to_string(), "Invalid lint configuration: unknown rule 'nope'");
    }

    #[test]
    fn test_json_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = source.into();
        assert!(matches!(err, CliError::JsonFormat { .. }));
    }
}
