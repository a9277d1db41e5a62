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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

fn cfxlua_cmd() -> Command {
    Command::cargo_bin("cfxlua").expect("Failed to find cfxlua binary")
}

fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

const CLEAN: &str = "\
CreateThread(function()
    while true do
        Wait(0)
    end
end)
";

const BUSY_LOOP: &str = "\
CreateThread(function()
    while true do
        DoWork()
    end
end)
";

const FORWARD_CALL: &str = "\
helper()
local function helper() end
";

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    cfxlua_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("static analysis for CitizenFX Lua"))
        .stdout(predicate::str::contains("lint"))
        .stdout(predicate::str::contains("docs"));
}

#[test]
fn test_version_output() {
    cfxlua_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cfxlua"));
}

#[test]
fn test_no_subcommand_fails() {
    cfxlua_cmd().assert().failure();
}

// ===== Lint Command Tests =====

#[test]
fn test_lint_clean_file() {
    let file = create_temp_file(CLEAN, ".lua");
    cfxlua_cmd()
        .arg("lint")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn test_lint_warning_passes_without_warn_error() {
    let file = create_temp_file(BUSY_LOOP, ".lua");
    cfxlua_cmd()
        .arg("lint")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("loop-no-yield-while"))
        .stdout(predicate::str::contains("2:5"));
}

#[test]
fn test_lint_warn_error_fails() {
    let file = create_temp_file(BUSY_LOOP, ".lua");
    cfxlua_cmd()
        .args(["lint", "-W"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lint errors found in 1 file(s)"));
}

#[test]
fn test_lint_error_fails() {
    let file = create_temp_file(FORWARD_CALL, ".lua");
    cfxlua_cmd()
        .arg("lint")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("forward-reference"));
}

#[test]
fn test_lint_disable_rule() {
    let file = create_temp_file(FORWARD_CALL, ".lua");
    cfxlua_cmd()
        .args(["lint", "--disable", "forward-reference"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("forward-reference").not());
}

#[test]
fn test_lint_deny_rule() {
    let file = create_temp_file(BUSY_LOOP, ".lua");
    cfxlua_cmd()
        .args(["lint", "--deny", "loop-yield"])
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_lint_unknown_rule() {
    let file = create_temp_file(CLEAN, ".lua");
    cfxlua_cmd()
        .args(["lint", "--disable", "no-such-rule"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule 'no-such-rule'"));
}

#[test]
fn test_lint_min_severity_filters() {
    let file = create_temp_file("Citizen.CreateThread(function()\n    Wait(0)\nend)\n", ".lua");
    cfxlua_cmd()
        .args(["lint", "--min-severity", "warning"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn test_lint_json_output() {
    let file = create_temp_file(FORWARD_CALL, ".lua");
    let output = cfxlua_cmd()
        .args(["lint", "--format", "json"])
        .arg(file.path())
        .output()
        .expect("Failed to run cfxlua");
    assert!(!output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("lint output is JSON");
    let diagnostics = report[0]["diagnostics"].as_array().unwrap();
    let forward = diagnostics
        .iter()
        .find(|d| d["code"] == "forward-reference")
        .unwrap();
    assert_eq!(forward["severity"], "error");
    assert_eq!(forward["line"], 1);
}

#[test]
fn test_lint_directory() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("client")).unwrap();
    fs::write(dir.path().join("client/main.lua"), CLEAN).unwrap();
    fs::write(dir.path().join("server.lua"), CLEAN).unwrap();
    fs::write(dir.path().join("README.md"), "while true do end").unwrap();

    cfxlua_cmd()
        .args(["lint", "--parallel"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("main.lua"))
        .stdout(predicate::str::contains("server.lua"))
        .stdout(predicate::str::contains("README").not());
}

#[test]
fn test_lint_missing_file() {
    cfxlua_cmd()
        .args(["lint", "/nonexistent/cfxlua/file.lua"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("I/O error"));
}

#[test]
fn test_lint_empty_directory() {
    let dir = tempdir().unwrap();
    cfxlua_cmd()
        .arg("lint")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Lua files found"));
}

// ===== Docs Command Tests =====

const DEFINITIONS: &str = "\
--- Shows a notification.
--- @param data table Notification options
--- @return boolean shown
function lib.notify(data)
end
";

fn docs_json(file: &Path, extra: &[&str]) -> serde_json::Value {
    let output = cfxlua_cmd()
        .arg("docs")
        .arg(file)
        .args(extra)
        .output()
        .expect("Failed to run cfxlua");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("docs output is JSON")
}

#[test]
fn test_docs_annotated() {
    let file = create_temp_file(DEFINITIONS, ".lua");
    let index = docs_json(file.path(), &["--kind", "annotated-definitions", "--name", "ox_lib"]);

    let notify = &index["lib.notify"];
    assert_eq!(notify["description"], "Shows a notification.");
    assert_eq!(notify["source"], "ox_lib");
    assert_eq!(notify["parameters"][0]["type"], "table");
    assert_eq!(notify["returns"][0]["type"], "boolean");
}

#[test]
fn test_docs_catalog_by_extension() {
    let catalog = r#"{
        "GetPlayerPed": {
            "description": "Returns the ped of a player.",
            "params": [{ "name": "playerId", "type": "number" }],
            "returns": "number",
            "side": "client"
        }
    }"#;
    let file = create_temp_file(catalog, ".json");
    let index = docs_json(file.path(), &[]);

    assert_eq!(index["GetPlayerPed"]["side"], "client");
    assert_eq!(index["GetPlayerPed"]["parameters"][0]["name"], "playerId");
}

#[test]
fn test_docs_output_file() {
    let file = create_temp_file(DEFINITIONS, ".lua");
    let dir = tempdir().unwrap();
    let out = dir.path().join("index.json");

    cfxlua_cmd()
        .arg("docs")
        .arg(file.path())
        .arg("--output")
        .arg(&out)
        .arg("--compact")
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"lib.notify\""));
    assert_eq!(written.lines().count(), 1);
}

#[test]
fn test_docs_unknown_kind() {
    let file = create_temp_file(DEFINITIONS, ".lua");
    cfxlua_cmd()
        .arg("docs")
        .arg(file.path())
        .args(["--kind", "markdown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown source kind 'markdown'"));
}

#[test]
fn test_docs_invalid_catalog() {
    let file = create_temp_file("[1, 2, 3]", ".json");
    cfxlua_cmd()
        .arg("docs")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Documentation extraction failed"));
}
