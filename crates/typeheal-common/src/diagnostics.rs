//! Diagnostics emitted while parsing and resolving type identifiers.
//!
//! Every diagnostic carries a numeric code and the identifier text it was
//! raised for. Message templates use `{0}`, `{1}`... placeholders that are
//! filled by [`format_message`].

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    /// The identifier does not follow the identifier grammar.
    pub const PARSE_ERROR: u32 = 1001;
    /// No loaded module contains the type, and no resolver knows about it.
    pub const RESOLUTION_MISS: u32 = 2001;
    /// The module scan found the type in more than one module.
    pub const AMBIGUOUS_MATCH: u32 = 2002;
    /// The identifier resolved, but only after rewriting its identity.
    pub const IDENTITY_REWRITTEN: u32 = 2003;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const PARSE_ERROR: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::PARSE_ERROR,
        category: DiagnosticCategory::Error,
        message: "Malformed type identifier at offset {0}: {1}.",
    };
    pub const RESOLUTION_MISS: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::RESOLUTION_MISS,
        category: DiagnosticCategory::Error,
        message: "Cannot find type '{0}' in module '{1}' or any other loaded module.",
    };
    pub const AMBIGUOUS_MATCH: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_MATCH,
        category: DiagnosticCategory::Warning,
        message: "Type '{0}' exists in {1} modules; using the one in '{2}'.",
    };
    pub const IDENTITY_REWRITTEN: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::IDENTITY_REWRITTEN,
        category: DiagnosticCategory::Message,
        message: "Type '{0}' now resolves as '{1}'.",
    };

    pub(super) const ALL: &[DiagnosticMessage] = &[
        PARSE_ERROR,
        RESOLUTION_MISS,
        AMBIGUOUS_MATCH,
        IDENTITY_REWRITTEN,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// The identifier (or identifier fragment) the diagnostic refers to.
    pub identifier: String,
    /// Byte offset into `identifier`, when the diagnostic points at one.
    pub offset: Option<u32>,
    pub message_text: String,
}

impl Diagnostic {
    /// Build a diagnostic from a message template and its arguments.
    pub fn from_message(
        message: DiagnosticMessage,
        identifier: impl Into<String>,
        args: &[&str],
    ) -> Self {
        Self {
            category: message.category,
            code: message.code,
            identifier: identifier.into(),
            offset: None,
            message_text: format_message(message.message, args),
        }
    }

    pub fn error(identifier: impl Into<String>, message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            identifier: identifier.into(),
            offset: None,
            message_text: message.into(),
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        };
        write!(f, "{category} TH{}: {}", self.code, self.message_text)
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    diagnostic_messages::ALL
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
