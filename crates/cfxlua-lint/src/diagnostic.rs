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

//! Lint diagnostic types

use cfxlua_core::Span;

/// Severity level for diagnostics, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Style or modernisation hint
    Hint,
    /// Informational - worth a look
    Information,
    /// Warning - likely to break at runtime
    Warning,
    /// Error - guaranteed to break at runtime
    Error,
}

impl Severity {
    /// Parses the lowercase name used in configuration and on the CLI.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hint" => Some(Self::Hint),
            "info" | "information" => Some(Self::Information),
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hint => write!(f, "hint"),
            Self::Information => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Kind of diagnostic. Each kind maps to one stable code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// `while` loop with no yield in its body
    LoopNoYieldWhile,
    /// `repeat` loop with no yield in its body
    LoopNoYieldRepeat,
    /// Assignment to an undeclared global at file scope
    GlobalVariableLeak,
    /// Call to a deprecated native or helper
    DeprecatedApi,
    /// Register + handler pair that can be a single call
    EventRegisterCombine,
    /// Registered net event with no handler on the next line
    EventRegisterNoHandler,
    /// Missing space after the event name argument
    EventParamSpacing,
    /// `Citizen.*` prefix that has a shorter global form
    LegacyApiRename,
    /// Local function called above its declaration
    ForwardReference,
    /// Runner stopped collecting diagnostics
    DiagnosticLimitExceeded,
    /// Custom rule violation
    Custom(String),
}

impl DiagnosticKind {
    /// Stable code shown to users and used for filtering.
    pub fn code(&self) -> &str {
        match self {
            Self::LoopNoYieldWhile => "loop-no-yield-while",
            Self::LoopNoYieldRepeat => "loop-no-yield-repeat",
            Self::GlobalVariableLeak => "global-variable-leak",
            Self::DeprecatedApi => "deprecated-api",
            Self::EventRegisterCombine => "event-register-combine",
            Self::EventRegisterNoHandler => "event-register-no-handler",
            Self::EventParamSpacing => "event-param-spacing",
            Self::LegacyApiRename => "legacy-api-rename",
            Self::ForwardReference => "forward-reference",
            Self::DiagnosticLimitExceeded => "diagnostic-limit-exceeded",
            Self::Custom(code) => code,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A lint diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    severity: Severity,
    /// Kind of issue
    kind: DiagnosticKind,
    /// Human-readable message
    message: String,
    /// Location in the raw source (byte columns)
    span: Span,
    /// Rule ID that generated this diagnostic
    rule_id: String,
    /// Suggested fix (if any)
    suggestion: Option<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            span: Span::default(),
            rule_id: rule_id.into(),
            suggestion: None,
        }
    }

    pub fn error(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self::with_severity(Severity::Error, kind, message, rule_id)
    }

    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self::with_severity(Severity::Warning, kind, message, rule_id)
    }

    pub fn information(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self::with_severity(Severity::Information, kind, message, rule_id)
    }

    pub fn hint(
        kind: DiagnosticKind,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self::with_severity(Severity::Hint, kind, message, rule_id)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // Public getters
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn code(&self) -> &str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Zero-based line the diagnostic starts on.
    pub fn line(&self) -> usize {
        self.span.start().line()
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Escalate the severity to error level (used by lint runner).
    pub fn escalate_to_error(&mut self) {
        self.severity = Severity::Error;
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {}: {}",
            self.span.start(),
            self.code(),
            self.severity,
            self.message
        )?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({})", suggestion)?;
        }

        Ok(())
    }
}
