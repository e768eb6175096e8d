//! Parse errors for serialized type identifiers.
//!
//! A malformed identifier is never repaired: guessing at the intended
//! structure would produce a different type identity than the one saved.

use typeheal_common::Diagnostic;
use typeheal_common::diagnostics::diagnostic_messages;

/// Why an identifier failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A backtick not followed by arity digits.
    MissingArity,
    /// Arity digits that do not fit in a `u32`.
    InvalidArity,
    /// Arity digits not followed by `[[`.
    MissingArgumentList,
    /// A second arity section on the same identifier level.
    DuplicateArity,
    /// The arity marker disagrees with the number of bracketed arguments.
    ArityMismatch { declared: u32, found: usize },
    /// A bracket that neither opens an array specifier nor an argument.
    UnexpectedBracket(char),
    /// A `]` at the top level, or one not followed by `]` or `,[`.
    UnbalancedBracket,
    /// Input ended inside an argument list.
    UnclosedArgumentList { depth: usize },
    /// An identifier level without a type name.
    EmptyTypeName,
    /// The type name segment contains characters the grammar does not allow.
    MalformedName,
    /// Text other than an array suffix between `]]` and the module identity.
    TrailingCharacters,
    /// The module identity is empty or has a component without `Key=Value`.
    MalformedModuleIdentity,
}

impl ParseErrorKind {
    fn describe(&self) -> String {
        match self {
            ParseErrorKind::MissingArity => "expected arity digits after '`'".to_string(),
            ParseErrorKind::InvalidArity => "arity does not fit in 32 bits".to_string(),
            ParseErrorKind::MissingArgumentList => {
                "expected '[[' to open the generic argument list".to_string()
            }
            ParseErrorKind::DuplicateArity => {
                "identifier declares more than one generic argument list".to_string()
            }
            ParseErrorKind::ArityMismatch { declared, found } => format!(
                "arity marker declares {declared} generic argument(s) but {found} were given"
            ),
            ParseErrorKind::UnexpectedBracket(ch) => format!("unexpected '{ch}'"),
            ParseErrorKind::UnbalancedBracket => {
                "']' does not close an argument, expected ']]' or '],['".to_string()
            }
            ParseErrorKind::UnclosedArgumentList { depth } => {
                format!("identifier ends inside {depth} open generic argument list(s)")
            }
            ParseErrorKind::EmptyTypeName => "missing type name".to_string(),
            ParseErrorKind::MalformedName => "malformed type name".to_string(),
            ParseErrorKind::TrailingCharacters => {
                "unexpected text after the generic argument list".to_string()
            }
            ParseErrorKind::MalformedModuleIdentity => "malformed module identity".to_string(),
        }
    }
}

/// A parse failure at a byte offset of the source identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: u32,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: u32) -> Self {
        ParseError { kind, offset }
    }

    /// Convert to a diagnostic for the identifier that failed to parse.
    pub fn to_diagnostic(&self, identifier: &str) -> Diagnostic {
        let offset = self.offset.to_string();
        let description = self.kind.describe();
        Diagnostic::from_message(
            diagnostic_messages::PARSE_ERROR,
            identifier,
            &[&offset, &description],
        )
        .with_offset(self.offset)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.kind.describe(), self.offset)
    }
}

impl std::error::Error for ParseError {}
