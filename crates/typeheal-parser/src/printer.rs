//! Canonical identifier printer.
//!
//! Output follows the parser grammar exactly: ``Name`N[[Arg],[Arg]][], Module``.
//! Module identity components are already normalized by the builder, so
//! `parse_identifier(&stringify(d)) == Ok(d)` for every built descriptor.

use crate::descriptor::TypeDescriptor;
use std::fmt::Write;

enum Step<'a> {
    Enter(&'a TypeDescriptor),
    Separator,
    Close(&'a TypeDescriptor),
}

/// Render a descriptor tree as identifier text.
pub fn stringify(descriptor: &TypeDescriptor) -> String {
    let mut out = String::with_capacity(64 * descriptor.node_count());
    write_identifier(&mut out, descriptor);
    out
}

/// Render into an existing buffer. Walks the tree with an explicit stack.
pub fn write_identifier(out: &mut String, descriptor: &TypeDescriptor) {
    let mut stack = vec![Step::Enter(descriptor)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(desc) => {
                out.push_str(&desc.name);
                if !desc.is_generic() {
                    write_tail(out, desc);
                    continue;
                }
                let _ = write!(out, "`{}[[", desc.arity());
                stack.push(Step::Close(desc));
                for (i, arg) in desc.generic_arguments.iter().enumerate().rev() {
                    stack.push(Step::Enter(arg));
                    if i > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Separator => out.push_str("],["),
            Step::Close(desc) => {
                out.push_str("]]");
                write_tail(out, desc);
            }
        }
    }
}

fn write_tail(out: &mut String, desc: &TypeDescriptor) {
    out.push_str(&desc.array_suffix);
    if !desc.module.is_empty() {
        out.push_str(", ");
        out.push_str(&desc.module);
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&stringify(self))
    }
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod tests;
