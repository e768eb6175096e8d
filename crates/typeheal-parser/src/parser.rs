//! Identifier parser.
//!
//! Grammar:
//!
//! ```text
//! Identifier      := TypeName ["," WS ModuleIdentity]
//! TypeName        := Name ["`" Digits "[[" ArgList "]]"] [ArraySuffix]
//! ArgList         := Identifier ("]," "[" Identifier)*
//! ModuleIdentity  := Name ("," WS Key "=" Value)*
//! ArraySuffix     := ("[" ("," | "*")* "]")+
//! ```
//!
//! The parser makes a single left-to-right pass with an explicit pointer to
//! the node currently receiving text. Opening an argument list pushes a child,
//! `],[` starts a sibling and `]]` pops back to the parent, so nesting depth
//! never touches the call stack. Everything that is not structural is copied
//! verbatim into the current node's buffer; splitting that text into name,
//! array suffix and module identity is the descriptor builder's job.

use crate::arena::{NodeIndex, ParseArena};
use crate::error::{ParseError, ParseErrorKind};
use tracing::trace;

/// Parse `source` into a [`ParseArena`] whose root is the outer identifier.
pub fn parse(source: &str) -> Result<ParseArena, ParseError> {
    IdentifierParser::new(source).parse()
}

pub struct IdentifierParser<'a> {
    source: &'a str,
    pos: usize,
    arena: ParseArena,
    current: NodeIndex,
}

impl<'a> IdentifierParser<'a> {
    pub fn new(source: &'a str) -> Self {
        // Every argument costs at least one '[', so this over-estimates by
        // array specifiers only.
        let estimate = source.bytes().filter(|&b| b == b'[').count() / 2 + 1;
        let mut arena = ParseArena::with_capacity(estimate);
        let root = arena.add_root();
        IdentifierParser {
            source,
            pos: 0,
            arena,
            current: root,
        }
    }

    pub fn parse(mut self) -> Result<ParseArena, ParseError> {
        while let Some(ch) = self.peek_char() {
            match ch {
                '`' => self.open_arguments()?,
                '[' => self.scan_array_specifier()?,
                ']' => self.close_argument()?,
                _ => {
                    self.push_to_current(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        self.finish()
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.source.as_bytes().get(pos).copied()
    }

    #[inline]
    fn offset(&self) -> u32 {
        self.pos as u32
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.offset())
    }

    fn push_to_current(&mut self, ch: char) {
        if let Some(node) = self.arena.get_mut(self.current) {
            node.buffer.push(ch);
        }
    }

    fn push_str_to_current(&mut self, text: &str) {
        if let Some(node) = self.arena.get_mut(self.current) {
            node.buffer.push_str(text);
        }
    }

    /// "`N[[": record the arity on the current node and descend into its
    /// first argument.
    fn open_arguments(&mut self) -> Result<(), ParseError> {
        let backtick = self.pos;
        self.pos += 1;

        let digits_start = self.pos;
        while self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(self.error(ParseErrorKind::MissingArity));
        }
        let arity: u32 = self.source[digits_start..self.pos]
            .parse()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidArity, digits_start as u32))?;

        if !self.source[self.pos..].starts_with("[[") {
            return Err(self.error(ParseErrorKind::MissingArgumentList));
        }

        let current = self.current;
        let Some(node) = self.arena.get_mut(current) else {
            return Err(ParseError::new(ParseErrorKind::UnbalancedBracket, backtick as u32));
        };
        if node.declared_arity.is_some() {
            return Err(ParseError::new(ParseErrorKind::DuplicateArity, backtick as u32));
        }
        node.declared_arity = Some(arity);
        node.name_end = Some(node.buffer.len());

        self.pos += 2;
        self.current = self.arena.add_child(current, self.offset());
        trace!(arity, depth = self.arena.depth(self.current), "open generic argument list");
        Ok(())
    }

    /// A '[' outside of "`N[[" and "],[" can only start an array specifier
    /// such as `[]`, `[,]` or `[*]`, which is copied verbatim.
    fn scan_array_specifier(&mut self) -> Result<(), ParseError> {
        let mut end = self.pos + 1;
        while matches!(self.byte_at(end), Some(b',' | b'*' | b' ')) {
            end += 1;
        }
        if self.byte_at(end) != Some(b']') {
            return Err(self.error(ParseErrorKind::UnexpectedBracket('[')));
        }
        let specifier = &self.source[self.pos..=end];
        self.push_str_to_current(specifier);
        self.pos = end + 1;
        Ok(())
    }

    /// A ']' that is not part of an array specifier ends the current
    /// argument: "]]" closes the argument list, "],[" starts a sibling.
    fn close_argument(&mut self) -> Result<(), ParseError> {
        let parent = self
            .arena
            .get(self.current)
            .map_or(NodeIndex::NONE, |node| node.parent);
        if parent.is_none() {
            return Err(self.error(ParseErrorKind::UnbalancedBracket));
        }

        match self.byte_at(self.pos + 1) {
            Some(b']') => {
                self.pos += 2;
                let end = self.offset();
                let Some(parent_node) = self.arena.get_mut(parent) else {
                    return Err(self.error(ParseErrorKind::UnbalancedBracket));
                };
                let declared = parent_node.declared_arity.unwrap_or(0);
                let found = parent_node.children.len();
                if declared as usize != found {
                    return Err(ParseError::new(
                        ParseErrorKind::ArityMismatch { declared, found },
                        end,
                    ));
                }
                parent_node.arguments_end = Some(end);
                self.current = parent;
                Ok(())
            }
            Some(b',') => {
                self.pos += 2;
                while self.byte_at(self.pos) == Some(b' ') {
                    self.pos += 1;
                }
                if self.byte_at(self.pos) != Some(b'[') {
                    return Err(self.error(ParseErrorKind::UnbalancedBracket));
                }
                self.pos += 1;
                self.current = self.arena.add_child(parent, self.offset());
                Ok(())
            }
            _ => Err(self.error(ParseErrorKind::UnbalancedBracket)),
        }
    }

    fn finish(self) -> Result<ParseArena, ParseError> {
        if self.current != self.arena.root() {
            let depth = self.arena.depth(self.current);
            return Err(self.error(ParseErrorKind::UnclosedArgumentList { depth }));
        }
        trace!(nodes = self.arena.len(), "parsed identifier");
        Ok(self.arena)
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
