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

//! CLI command definitions and argument parsing.

use crate::commands::{self, LintOptions, OutputFormat};
use crate::error::CliError;
use clap::Subcommand;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use cfxlua_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Lint Lua files for CitizenFX runtime pitfalls
    ///
    /// Accepts files and directories; directories are searched recursively
    /// for `.lua` files. Exits non-zero when any file has errors (or
    /// warnings, with --warn-error) or cannot be read.
    Lint {
        /// Files or directories to lint
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Disable a rule (repeatable)
        #[arg(long, value_name = "RULE")]
        disable: Vec<String>,

        /// Report a rule's findings as errors (repeatable)
        #[arg(long, value_name = "RULE")]
        deny: Vec<String>,

        /// Accept an extra global name (repeatable)
        #[arg(long = "allow-global", value_name = "NAME")]
        allow_globals: Vec<String>,

        /// Minimum severity to report (hint, info, warning, error)
        #[arg(long, value_name = "LEVEL")]
        min_severity: Option<String>,

        /// Treat warnings as errors
        #[arg(short = 'W', long)]
        warn_error: bool,

        /// Process files in parallel even for small batches
        #[arg(short, long)]
        parallel: bool,

        /// Report per-file progress on stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Extract documented functions from a source file as JSON
    ///
    /// Reads a Lua definition file or a JSON native catalog and prints the
    /// resulting function index.
    Docs {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Source kind (annotated-definitions, plain-functions, hybrid, json-native-catalog)
        #[arg(short, long)]
        kind: Option<String>,

        /// Source name recorded on each function (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

impl Commands {
    /// Execute the command with the provided arguments.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Lint {
                paths,
                format,
                disable,
                deny,
                allow_globals,
                min_severity,
                warn_error,
                parallel,
                verbose,
            } => commands::lint(
                &paths,
                &LintOptions {
                    format,
                    disable,
                    deny,
                    allow_globals,
                    min_severity,
                    warn_error,
                    parallel,
                    verbose,
                },
            ),
            Commands::Docs {
                file,
                kind,
                name,
                output,
                compact,
            } => commands::docs(
                &file,
                kind.as_deref(),
                name.as_deref(),
                output.as_deref(),
                compact,
            ),
        }
    }
}
