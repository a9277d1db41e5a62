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

//! Lint command - CitizenFX Lua static analysis

use super::collect_lua_files;
use crate::batch::{BatchConfig, BatchProcessor, FileResult, LintOperation};
use crate::error::CliError;
use cfxlua_lint::{Diagnostic, LintConfig, Severity};
use colored::Colorize;
use serde_json::{json, Value};

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Text,
    /// Machine-readable JSON array, one object per file
    Json,
}

/// Options for [`lint`], usually filled from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct LintOptions {
    pub format: OutputFormat,
    /// Rule IDs to turn off
    pub disable: Vec<String>,
    /// Rule IDs whose findings become errors
    pub deny: Vec<String>,
    /// Extra names the global-leak rule accepts
    pub allow_globals: Vec<String>,
    /// Lowest severity to report (hint, info, warning, error)
    pub min_severity: Option<String>,
    /// Fail on warnings as well as errors
    pub warn_error: bool,
    /// Parallelize regardless of the number of files
    pub parallel: bool,
    pub verbose: bool,
}

impl LintOptions {
    /// Map the flags onto a validated [`LintConfig`].
    pub fn lint_config(&self) -> Result<LintConfig, CliError> {
        let mut config = LintConfig::default();
        for rule in &self.disable {
            config.disable_rule(rule);
        }
        for rule in &self.deny {
            config.set_rule_error(rule);
        }
        config
            .global_exceptions
            .extend(self.allow_globals.iter().cloned());
        if let Some(name) = &self.min_severity {
            config.min_severity = Severity::parse(name).ok_or_else(|| {
                CliError::invalid_input(format!(
                    "unknown severity '{}' (expected hint, info, warning or error)",
                    name
                ))
            })?;
        }
        config.validate_known_rules()?;
        Ok(config)
    }
}

/// Lint Lua files and directories.
///
/// Directories are expanded to every `.lua` file below them. Each file is
/// sanitized and run through the enabled rules; files are processed in
/// parallel once there are enough of them.
///
/// # Errors
///
/// Returns `Err` if:
/// - The flags do not form a valid configuration
/// - No Lua files were found
/// - Any file could not be read
/// - Any file has errors, or warnings with `warn_error` set
///
/// # Examples
///
/// ```no_run
/// use cfxlua_cli::commands::{lint, LintOptions, OutputFormat};
///
/// # fn main() -> Result<(), cfxlua_cli::error::CliError> {
/// let options = LintOptions {
///     format: OutputFormat::Json,
///     disable: vec!["global-leak".to_string()],
///     ..Default::default()
/// };
/// lint(&["resources/".to_string()], &options)?;
/// # Ok(())
/// # }
/// ```
pub fn lint(paths: &[String], options: &LintOptions) -> Result<(), CliError> {
    let config = options.lint_config()?;

    let files = collect_lua_files(paths)?;
    if files.is_empty() {
        return Err(CliError::invalid_input("no Lua files found"));
    }

    let processor = BatchProcessor::new(BatchConfig {
        parallel_threshold: if options.parallel { 1 } else { BatchConfig::default().parallel_threshold },
        verbose: options.verbose,
        ..Default::default()
    });
    let results = processor.process(&files, LintOperation::new(config));

    match options.format {
        OutputFormat::Json => {
            let report: Vec<Value> = results.results.iter().map(file_json).collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for result in &results.results {
                print_text(result);
            }
        }
    }

    let failing = results
        .results
        .iter()
        .filter(|r| match &r.result {
            Ok(diags) => fails(diags, options.warn_error),
            Err(_) => true,
        })
        .count();

    if failing > 0 {
        Err(CliError::LintErrors { files: failing })
    } else {
        Ok(())
    }
}

fn fails(diagnostics: &[Diagnostic], warn_error: bool) -> bool {
    diagnostics.iter().any(|d| match d.severity() {
        Severity::Error => true,
        Severity::Warning => warn_error,
        _ => false,
    })
}

fn diagnostic_json(diag: &Diagnostic) -> Value {
    let span = diag.span();
    json!({
        "severity": diag.severity().to_string(),
        "code": diag.code(),
        "rule": diag.rule_id(),
        "message": diag.message(),
        "line": span.start().line() + 1,
        "column": span.start().column() + 1,
        "endLine": span.end().line() + 1,
        "endColumn": span.end().column() + 1,
        "suggestion": diag.suggestion(),
    })
}

fn file_json(result: &FileResult<Vec<Diagnostic>>) -> Value {
    let file = result.path.display().to_string();
    match &result.result {
        Ok(diags) => json!({
            "file": file,
            "diagnostics": diags.iter().map(diagnostic_json).collect::<Vec<_>>(),
        }),
        Err(e) => json!({
            "file": file,
            "error": e.to_string(),
        }),
    }
}

fn print_text(result: &FileResult<Vec<Diagnostic>>) {
    let file = result.path.display();
    let diagnostics = match &result.result {
        Ok(diags) => diags,
        Err(e) => {
            println!("{} {} - {}", "✗".red().bold(), file, e);
            return;
        }
    };

    if diagnostics.is_empty() {
        println!("{} {} - no issues found", "✓".green().bold(), file);
        return;
    }

    println!(
        "{} {} - {} issue(s) found:",
        "!".yellow().bold(),
        file,
        diagnostics.len()
    );
    for diag in diagnostics {
        let severity = match diag.severity() {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
            Severity::Information => "info".cyan(),
            Severity::Hint => "hint".blue(),
        };
        println!(
            "  {}:{}: {}[{}]: {}",
            file,
            diag.span().start(),
            severity,
            diag.code(),
            diag.message()
        );
        if let Some(suggestion) = diag.suggestion() {
            println!("    {} {}", "suggestion:".cyan(), suggestion);
        }
    }
}
