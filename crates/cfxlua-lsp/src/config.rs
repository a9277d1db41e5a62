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

//! Client-side settings.
//!
//! Read from the `cfxlua` configuration section on every scan. Missing
//! fields fall back to defaults (every pass on, the default allow-list,
//! no documentation sources).

use cfxlua_docs::DocumentationSource;
use cfxlua_lint::LintConfig;
use serde::{Deserialize, Serialize};

fn on() -> bool {
    true
}

/// Per-pass toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticToggles {
    #[serde(default = "on")]
    pub loop_yield: bool,
    #[serde(default = "on")]
    pub global_leak: bool,
    #[serde(default = "on")]
    pub deprecated_api: bool,
    #[serde(default = "on")]
    pub event_patterns: bool,
    #[serde(default = "on")]
    pub legacy_api: bool,
    #[serde(default = "on")]
    pub forward_reference: bool,
}

impl Default for DiagnosticToggles {
    fn default() -> Self {
        Self {
            loop_yield: true,
            global_leak: true,
            deprecated_api: true,
            event_patterns: true,
            legacy_api: true,
            forward_reference: true,
        }
    }
}

impl DiagnosticToggles {
    /// `(rule id, enabled)` for each built-in rule.
    fn by_rule(&self) -> [(&'static str, bool); 6] {
        [
            ("loop-yield", self.loop_yield),
            ("global-leak", self.global_leak),
            ("deprecated-api", self.deprecated_api),
            ("event-registration", self.event_patterns),
            ("legacy-api", self.legacy_api),
            ("forward-reference", self.forward_reference),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsSettings {
    #[serde(default)]
    pub sources: Vec<DocumentationSource>,
    #[serde(default = "on")]
    pub auto_discover: bool,
    /// Source names consulted first on lookup.
    #[serde(default)]
    pub priority: Vec<String>,
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            auto_discover: true,
            priority: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    #[serde(default)]
    pub diagnostics: DiagnosticToggles,
    /// Replaces the built-in global allow-list when present.
    #[serde(default)]
    pub global_exceptions: Option<Vec<String>>,
    #[serde(default)]
    pub docs: DocsSettings,
}

impl ServerSettings {
    /// Parse a configuration value, falling back to defaults on `null`
    /// or a malformed payload.
    pub fn from_value(value: serde_json::Value) -> Self {
        if value.is_null() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed cfxlua settings: {}", e);
            Self::default()
        })
    }

    pub fn lint_config(&self) -> LintConfig {
        let mut config = LintConfig::default();
        for (rule, enabled) in self.diagnostics.by_rule() {
            if !enabled {
                config.disable_rule(rule);
            }
        }
        if let Some(exceptions) = &self.global_exceptions {
            config.global_exceptions = exceptions.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfxlua_lint::RULE_IDS;
    use serde_json::json;

    #[test]
    fn test_defaults_enable_everything() {
        let settings = ServerSettings::from_value(json!({}));
        assert_eq!(settings, ServerSettings::default());
        let config = settings.lint_config();
        assert!(RULE_IDS.iter().all(|id| config.is_enabled(id)));
        assert!(settings.docs.auto_discover);
    }

    #[test]
    fn test_toggles_map_to_rules() {
        let settings = ServerSettings::from_value(json!({
            "diagnostics": { "globalLeak": false, "eventPatterns": false },
            "globalExceptions": ["Framework"]
        }));
        let config = settings.lint_config();
        assert!(!config.is_enabled("global-leak"));
        assert!(!config.is_enabled("event-registration"));
        assert!(config.is_enabled("loop-yield"));
        assert_eq!(config.global_exceptions, ["Framework"]);
    }

    #[test]
    fn test_docs_sources() {
        let settings = ServerSettings::from_value(json!({
            "docs": {
                "sources": [{ "name": "natives", "url": "https://example.invalid/n.json", "kind": "json-native-catalog" }],
                "autoDiscover": false,
                "priority": ["natives"]
            }
        }));
        assert_eq!(settings.docs.sources.len(), 1);
        assert!(!settings.docs.auto_discover);
        assert_eq!(settings.docs.priority, ["natives"]);
    }

    #[test]
    fn test_malformed_and_null_fall_back() {
        assert_eq!(ServerSettings::from_value(json!(null)), ServerSettings::default());
        assert_eq!(
            ServerSettings::from_value(json!({ "diagnostics": "yes" })),
            ServerSettings::default()
        );
    }
}
