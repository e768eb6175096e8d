//! Errors returned by the resolution engine.

use std::fmt;
use typeheal_common::{Diagnostic, diagnostic_codes, diagnostics::diagnostic_messages};
use typeheal_parser::ParseError;

/// Why a resolution request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The identifier text is malformed. Never recoverable.
    Parse(ParseError),
    /// No step of the fallback chain found the type. Only returned under
    /// [`OnMiss::Fail`](crate::engine::OnMiss::Fail).
    NotFound {
        /// Search name of the node that missed, e.g. ``List`1`` or `Foo`.
        identifier: String,
        /// Module identity the identifier named (may be empty).
        module: String,
    },
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound { .. })
    }

    /// `source` is the full identifier the request was made with.
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        match self {
            ResolveError::Parse(err) => err.to_diagnostic(source),
            ResolveError::NotFound { identifier, module } => Diagnostic::from_message(
                diagnostic_messages::RESOLUTION_MISS,
                source,
                &[identifier.as_str(), module.as_str()],
            ),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ResolveError::Parse(_) => diagnostic_codes::PARSE_ERROR,
            ResolveError::NotFound { .. } => diagnostic_codes::RESOLUTION_MISS,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Parse(err) => write!(f, "malformed type identifier: {err}"),
            ResolveError::NotFound { identifier, module } if module.is_empty() => {
                write!(f, "type '{identifier}' not found in any loaded module")
            }
            ResolveError::NotFound { identifier, module } => {
                write!(f, "type '{identifier}' not found in '{module}' or any other loaded module")
            }
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Parse(err) => Some(err),
            ResolveError::NotFound { .. } => None,
        }
    }
}

impl From<ParseError> for ResolveError {
    fn from(err: ParseError) -> Self {
        ResolveError::Parse(err)
    }
}
