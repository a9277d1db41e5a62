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

//! Constants used throughout the LSP implementation.

// ==================== Scan scheduling ====================

/// Debounce window between the last edit and the scan it triggers.
pub const DEBOUNCE_MS: u64 = 350;

/// Language identifier of documents the server scans.
pub const LUA_LANGUAGE_ID: &str = "lua";

/// Files picked up by a workspace scan.
pub const WORKSPACE_LUA_GLOB: &str = "**/*.lua";

// ==================== Memory limits ====================

pub const BYTES_PER_MEGABYTE: usize = 1024 * 1024;

/// Largest document the server keeps or scans.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 16 * BYTES_PER_MEGABYTE;

// ==================== Configuration ====================

/// `workspace/configuration` section holding [`ServerSettings`](crate::config::ServerSettings).
pub const CONFIG_SECTION: &str = "cfxlua";

// ==================== Commands ====================

pub const CMD_SCAN_WORKSPACE: &str = "cfxlua.scanWorkspace";
pub const CMD_REFRESH_DOCS: &str = "cfxlua.refreshDocs";
pub const CMD_CLEAR_DOC_CACHE: &str = "cfxlua.clearDocCache";

pub const COMMANDS: [&str; 3] = [CMD_SCAN_WORKSPACE, CMD_REFRESH_DOCS, CMD_CLEAR_DOC_CACHE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasonable_limits() {
        assert!(DEBOUNCE_MS >= 50, "Debounce too short, will rescan on every keystroke");
        assert!(DEBOUNCE_MS <= 1000, "Debounce too long, will feel laggy");
        assert!(DEFAULT_MAX_DOCUMENT_SIZE >= BYTES_PER_MEGABYTE);
    }

    #[test]
    fn test_commands_are_namespaced() {
        for cmd in COMMANDS {
            assert!(cmd.starts_with(CONFIG_SECTION));
        }
    }
}
