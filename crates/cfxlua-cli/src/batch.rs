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

//! Batch processing for multiple Lua files with parallel execution.
//!
//! Files are processed with Rayon once the batch reaches
//! [`BatchConfig::parallel_threshold`]; smaller batches run serially to
//! avoid thread pool overhead. Results come back in input order whichever
//! mode ran, and a failing file never stops the rest of the batch.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cfxlua_cli::batch::{BatchConfig, BatchProcessor, LintOperation};
//! use cfxlua_lint::LintConfig;
//! use std::path::PathBuf;
//!
//! let processor = BatchProcessor::new(BatchConfig::default());
//! let files = vec![PathBuf::from("client.lua"), PathBuf::from("server.lua")];
//! let results = processor.process(&files, LintOperation::new(LintConfig::default()));
//!
//! for result in results.successes() {
//!     println!("{}: {:?}", result.path.display(), result.result);
//! }
//! ```

use crate::commands::read_file;
use crate::error::CliError;
use cfxlua_core::ScanContext;
use cfxlua_lint::{Diagnostic, LintConfig, LintRunner};
use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files to trigger parallel processing.
    ///
    /// Default: 4
    pub parallel_threshold: usize,

    /// Maximum number of threads to use for parallel processing.
    ///
    /// None means use Rayon's default (typically number of CPU cores).
    pub max_threads: Option<usize>,

    /// Print a line per processed file to stderr.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 4,
            max_threads: None,
            verbose: false,
        }
    }
}

/// Result of processing a single file in a batch operation.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file path that was processed
    pub path: PathBuf,
    /// The result of processing (Ok or Err)
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    /// Create a successful file result.
    pub fn success(path: PathBuf, value: T) -> Self {
        Self {
            path,
            result: Ok(value),
        }
    }

    /// Create a failed file result.
    pub fn failure(path: PathBuf, error: CliError) -> Self {
        Self {
            path,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Aggregated results from a batch processing operation.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each processed file, in input order
    pub results: Vec<FileResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    pub fn new(results: Vec<FileResult<T>>, elapsed_ms: u128) -> Self {
        Self {
            results,
            elapsed_ms,
        }
    }

    /// Get the total number of files processed.
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    /// Get the number of successfully processed files.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Get the number of failed files.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Check if any files failed.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    /// Get an iterator over successful results.
    pub fn successes(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Get an iterator over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }
}

/// Trait for batch operations on Lua files.
///
/// The operation must be thread-safe (Send + Sync) to support parallel
/// processing.
///
/// # Examples
///
/// ```rust
/// use cfxlua_cli::batch::BatchOperation;
/// use cfxlua_cli::error::CliError;
/// use std::path::Path;
///
/// struct CountLinesOperation;
///
/// impl BatchOperation for CountLinesOperation {
///     type Output = usize;
///
///     fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
///         let content = std::fs::read_to_string(path)
///             .map_err(|e| CliError::io_error(path, e))?;
///         Ok(content.lines().count())
///     }
///
///     fn name(&self) -> &str {
///         "count-lines"
///     }
/// }
/// ```
pub trait BatchOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Process a single file and return the result.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Get a human-readable name for this operation.
    fn name(&self) -> &str;
}

/// Lock-free progress counter for verbose runs.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
}

impl ProgressTracker {
    fn new(total: usize) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
        }
    }

    fn record<T>(&self, path: &Path, result: &Result<T, CliError>) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        let status = if result.is_ok() {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        eprintln!("{} [{}/{}] {}", status, processed, self.total, path.display());
    }
}

/// Batch processor for Lua files.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Process multiple files with the given operation.
    ///
    /// Never fails as a whole; each file carries its own result.
    pub fn process<O>(&self, files: &[PathBuf], operation: O) -> BatchResults<O::Output>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();

        if files.is_empty() {
            return BatchResults::new(Vec::new(), 0);
        }

        if let Some(max_threads) = self.config.max_threads {
            // Ignore error if the global pool is already initialized
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build_global()
                .ok();
        }

        let tracker = self.config.verbose.then(|| ProgressTracker::new(files.len()));
        let run = |path: &PathBuf| {
            let result = operation.process_file(path);
            if let Some(t) = &tracker {
                t.record(path, &result);
            }
            FileResult {
                path: path.clone(),
                result,
            }
        };

        let results: Vec<FileResult<O::Output>> = if files.len() < self.config.parallel_threshold {
            files.iter().map(&run).collect()
        } else {
            files.par_iter().map(&run).collect()
        };

        if self.config.verbose {
            eprintln!(
                "{} {} files in {:.2}s",
                operation.name().bright_blue().bold(),
                results.len(),
                start_time.elapsed().as_secs_f64()
            );
        }

        BatchResults::new(results, start_time.elapsed().as_millis())
    }
}

/// Sanitizes and lints one file per call.
#[derive(Debug, Clone)]
pub struct LintOperation {
    config: LintConfig,
}

impl LintOperation {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }
}

impl BatchOperation for LintOperation {
    type Output = Vec<Diagnostic>;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        let content = read_file(path)?;
        let ctx = ScanContext::new(path.to_string_lossy(), &content);
        Ok(LintRunner::new(self.config.clone()).run(&ctx))
    }

    fn name(&self) -> &str {
        "lint"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    struct LengthOperation;

    impl BatchOperation for LengthOperation {
        type Output = usize;

        fn process_file(&self, path: &Path) -> Result<usize, CliError> {
            read_file(path).map(|s| s.len())
        }

        fn name(&self) -> &str {
            "length"
        }
    }

    fn write_files(dir: &Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("f{}.lua", i));
                fs::write(&path, "x".repeat(i)).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_empty_batch() {
        let results = BatchProcessor::new(BatchConfig::default()).process(&[], LengthOperation);
        assert_eq!(results.total_files(), 0);
        assert!(!results.has_failures());
    }

    #[test]
    fn test_parallel_preserves_order() {
        let dir = tempdir().unwrap();
        let files = write_files(dir.path(), 12);
        let processor = BatchProcessor::new(BatchConfig {
            parallel_threshold: 1,
            ..Default::default()
        });
        let results = processor.process(&files, LengthOperation);

        let lengths: Vec<usize> = results
            .results
            .iter()
            .map(|r| *r.result.as_ref().unwrap())
            .collect();
        assert_eq!(lengths, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_failures_do_not_stop_batch() {
        let dir = tempdir().unwrap();
        let mut files = write_files(dir.path(), 2);
        files.insert(1, dir.path().join("missing.lua"));

        let results = BatchProcessor::new(BatchConfig::default()).process(&files, LengthOperation);
        assert_eq!(results.total_files(), 3);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.failures().next().unwrap().path, files[1]);
    }

    #[test]
    fn test_lint_operation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loop.lua");
        fs::write(&path, "while true do\n  DoWork()\nend\n").unwrap();

        let diags = LintOperation::new(LintConfig::default())
            .process_file(&path)
            .unwrap();
        assert!(diags.iter().any(|d| d.code() == "loop-no-yield-while"));
    }
}
