//! Serialized type identifier parsing for typeheal.
//!
//! - [`parser`]: single-pass scan of an identifier into a [`ParseArena`]
//! - [`descriptor`]: arena to [`TypeDescriptor`] conversion
//! - [`printer`]: descriptor back to canonical identifier text

pub mod arena;
pub mod descriptor;
pub mod error;
pub mod parser;
pub mod printer;

pub use arena::{NodeIndex, ParseArena, ParseNode};
pub use descriptor::{TypeDescriptor, build, parse_identifier};
pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;
pub use printer::stringify;
