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

//! CfxLua CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **lint**: Run the CitizenFX Lua diagnostic passes over files and
//!   directories, with text or JSON output for CI
//! - **docs**: Extract a documentation index from an annotated Lua file, a
//!   plain Lua file or a JSON native catalog
//!
//! # Examples
//!
//! ```no_run
//! use cfxlua_cli::commands::{lint, LintOptions};
//!
//! # fn main() -> Result<(), cfxlua_cli::error::CliError> {
//! lint(&["resources/my_resource".to_string()], &LintOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
