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

//! CfxLua Command Line Interface

use cfxlua_cli::cli::Commands;
use clap::Parser;
use std::process::ExitCode;

/// CfxLua - static analysis for CitizenFX Lua resources
///
/// # Examples
///
/// ```bash
/// # Lint a resource
/// cfxlua lint resources/my_resource
///
/// # JSON output for CI, without the global-leak rule
/// cfxlua lint client.lua server.lua --format json --disable global-leak
///
/// # Dump the functions documented in a definition file
/// cfxlua docs ox_lib/imports.lua --kind annotated-definitions
/// ```
#[derive(Parser)]
#[command(name = "cfxlua")]
#[command(author, version, about = "CfxLua - static analysis for CitizenFX Lua resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
