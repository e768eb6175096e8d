//! Type descriptors and the parse-tree to descriptor builder.
//!
//! A [`TypeDescriptor`] is the durable form of an identifier: a name, the raw
//! identity of the module it lives in, an optional array suffix and its
//! generic arguments in positional order. The resolution engine rewrites
//! descriptors in place when a type has moved, and the printer turns them back
//! into identifier text.

use crate::arena::{NodeIndex, ParseArena, ParseNode};
use crate::error::{ParseError, ParseErrorKind};
use crate::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

/// Structural split of one node's buffer:
/// `Name[ArraySuffix][, ModuleIdentity]`.
static SEGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^,\[\]\s]+)\s*(?P<array>(?:\[[,*\s]*\]\s*)*)(?:,(?P<module>.*))?$")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Type name without the arity suffix, e.g. `System.Collections.Generic.List`.
    pub name: String,
    /// Module identity, e.g. `mscorlib, Version=4.0.0.0, Culture=neutral`.
    /// Empty when the identifier did not name a module.
    pub module: String,
    /// Array specifiers that follow the type, e.g. `[]` or `[,][]`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub array_suffix: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        TypeDescriptor {
            name: name.into(),
            module: module.into(),
            array_suffix: String::new(),
            generic_arguments: Vec::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<TypeDescriptor>) -> Self {
        self.generic_arguments = arguments;
        self
    }

    pub fn with_array_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.array_suffix = suffix.into();
        self
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generic_arguments.is_empty()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.generic_arguments.len()
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        !self.array_suffix.is_empty()
    }

    /// Name used to look the type up: the generic definition name
    /// (`List`1`) for generic descriptors, the plain name otherwise. Never
    /// includes the array suffix.
    pub fn search_name(&self) -> Cow<'_, str> {
        if self.is_generic() {
            Cow::Owned(format!("{}`{}", self.name, self.arity()))
        } else {
            Cow::Borrowed(&self.name)
        }
    }

    /// The module name without version/culture/key metadata.
    pub fn module_name(&self) -> &str {
        module_name(&self.module)
    }

    /// Rank of each array specifier, innermost first: `[,][]` is `[2, 1]`.
    pub fn array_ranks(&self) -> Vec<u32> {
        array_ranks(&self.array_suffix)
    }

    /// Replace the name and module identity. Returns `true` when either
    /// changed.
    pub fn set_identity(&mut self, name: &str, module: &str) -> bool {
        let mut changed = false;
        if self.name != name {
            self.name = name.to_string();
            changed = true;
        }
        if self.module != module {
            self.module = module.to_string();
            changed = true;
        }
        changed
    }

    /// Number of descriptors in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(desc) = stack.pop() {
            count += 1;
            stack.extend(desc.generic_arguments.iter());
        }
        count
    }
}

/// First component of a module identity.
pub fn module_name(identity: &str) -> &str {
    identity.split(',').next().unwrap_or("").trim()
}

/// Strip a trailing "`N" arity marker from a type name.
pub fn strip_arity(name: &str) -> &str {
    match name.rfind('`') {
        Some(pos) if pos + 1 < name.len() && name[pos + 1..].bytes().all(|b| b.is_ascii_digit()) => {
            &name[..pos]
        }
        _ => name,
    }
}

/// Rank of each `[...]` group in an array suffix, innermost first.
pub fn array_ranks(suffix: &str) -> Vec<u32> {
    suffix
        .split_inclusive(']')
        .filter(|group| group.contains('['))
        .map(|group| group.bytes().filter(|&b| b == b',').count() as u32 + 1)
        .collect()
}

/// Parse an identifier straight into a descriptor.
pub fn parse_identifier(source: &str) -> Result<TypeDescriptor, ParseError> {
    let arena = parser::parse(source)?;
    build(&arena)
}

/// Convert a parse tree into a descriptor tree.
///
/// Children are allocated after their parents, so visiting nodes in reverse
/// allocation order builds every argument before the node that owns it.
pub fn build(arena: &ParseArena) -> Result<TypeDescriptor, ParseError> {
    let mut built: Vec<Option<TypeDescriptor>> = vec![None; arena.len()];

    for (idx, node) in arena.iter().rev() {
        let mut descriptor = split_segments(node)?;
        descriptor.generic_arguments = node
            .children
            .iter()
            .filter_map(|child: &NodeIndex| built.get_mut(child.index()).and_then(Option::take))
            .collect();
        built[idx.index()] = Some(descriptor);
    }

    built
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| ParseError::new(ParseErrorKind::EmptyTypeName, 0))
}

/// Split one node's buffer into name, array suffix and module identity.
fn split_segments(node: &ParseNode) -> Result<TypeDescriptor, ParseError> {
    let buffer = node.buffer.as_str();
    if buffer.trim().is_empty() || buffer.trim_start().starts_with(',') {
        return Err(ParseError::new(ParseErrorKind::EmptyTypeName, node.start));
    }

    let Some(captures) = SEGMENT_RE.captures(buffer) else {
        let kind = if node.is_generic() && leaks_past_arguments(node) {
            ParseErrorKind::TrailingCharacters
        } else {
            ParseErrorKind::MalformedName
        };
        return Err(error_for(node, kind));
    };

    let name = captures.name("name").map_or("", |m| m.as_str());
    let array = captures.name("array");

    if let Some(name_end) = node.name_end {
        let name_end_in_buffer = captures.name("name").map_or(0, |m| m.end());
        let array_starts_early = array.is_some_and(|m| !m.as_str().is_empty() && m.start() < name_end);
        if name_end_in_buffer > name_end || array_starts_early {
            return Err(error_for(node, ParseErrorKind::TrailingCharacters));
        }
        // Only the name may precede the arity section.
        let before_arity = buffer.get(name_end_in_buffer..name_end).unwrap_or("");
        if !before_arity.trim().is_empty() {
            return Err(error_for(node, ParseErrorKind::MalformedName));
        }
    }

    let array_suffix: String = array
        .map_or("", |m| m.as_str())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let module = match captures.name("module") {
        Some(m) => normalize_module_identity(m.as_str())
            .ok_or_else(|| error_for(node, ParseErrorKind::MalformedModuleIdentity))?,
        None => String::new(),
    };

    Ok(TypeDescriptor {
        name: name.to_string(),
        module,
        array_suffix,
        generic_arguments: Vec::new(),
    })
}

/// Whether the text after the closing `]]` is something other than an array
/// suffix or module identity.
fn leaks_past_arguments(node: &ParseNode) -> bool {
    let Some(name_end) = node.name_end else {
        return false;
    };
    let tail = node.buffer[name_end..].trim_start();
    !(tail.is_empty() || tail.starts_with(',') || tail.starts_with('['))
}

fn error_for(node: &ParseNode, kind: ParseErrorKind) -> ParseError {
    let offset = match kind {
        ParseErrorKind::TrailingCharacters => node.arguments_end.unwrap_or(node.start),
        _ => node.start,
    };
    ParseError::new(kind, offset)
}

/// Trim every component of a module identity and join them with `", "`.
/// Returns `None` when the module name is empty or a metadata component is
/// not `Key=Value`.
fn normalize_module_identity(raw: &str) -> Option<String> {
    let mut parts = raw.split(',');
    let module = parts.next()?.trim();
    if module.is_empty() || module.contains('=') {
        return None;
    }

    let mut identity = module.to_string();
    for part in parts {
        let (key, value) = part.split_once('=')?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        identity.push_str(", ");
        identity.push_str(key);
        identity.push('=');
        identity.push_str(value.trim());
    }
    Some(identity)
}

#[cfg(test)]
#[path = "../tests/descriptor_tests.rs"]
mod tests;
