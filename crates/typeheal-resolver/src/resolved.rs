//! Resolved types: concrete type values built from universe handles.

use crate::universe::{TypeId, TypeUniverse};
use typeheal_parser::descriptor::strip_arity;
use typeheal_parser::{TypeDescriptor, stringify};

/// A live type: a loaded type, a constructed generic, or an array of either.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    Named(TypeId),
    Generic {
        definition: TypeId,
        arguments: Vec<ResolvedType>,
    },
    Array {
        element: Box<ResolvedType>,
        rank: u32,
    },
}

impl ResolvedType {
    /// Wrap `self` in one array level per rank, innermost first.
    pub fn into_array(self, ranks: &[u32]) -> ResolvedType {
        ranks.iter().fold(self, |element, &rank| ResolvedType::Array {
            element: Box::new(element),
            rank,
        })
    }

    /// The loaded type at the core of this value: the type itself, the generic
    /// definition, or the innermost array element's definition.
    pub fn definition(&self) -> TypeId {
        let mut current = self;
        loop {
            match current {
                ResolvedType::Named(ty) => return *ty,
                ResolvedType::Generic { definition, .. } => return *definition,
                ResolvedType::Array { element, .. } => current = element.as_ref(),
            }
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, ResolvedType::Generic { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ResolvedType::Array { .. })
    }

    /// Describe this type with the universe's current names and module
    /// identities. Returns `None` if any handle is unknown to `universe`.
    pub fn to_descriptor(&self, universe: &dyn TypeUniverse) -> Option<TypeDescriptor> {
        enum Step<'a> {
            Enter(&'a ResolvedType),
            Exit(&'a ResolvedType),
        }

        let mut results: Vec<TypeDescriptor> = Vec::new();
        let mut stack = vec![Step::Enter(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(ty) => match ty {
                    ResolvedType::Named(id) => results.push(describe(universe, *id)?),
                    ResolvedType::Generic { arguments, .. } => {
                        stack.push(Step::Exit(ty));
                        stack.extend(arguments.iter().rev().map(Step::Enter));
                    }
                    ResolvedType::Array { element, .. } => {
                        stack.push(Step::Exit(ty));
                        stack.push(Step::Enter(element.as_ref()));
                    }
                },
                Step::Exit(ty) => match ty {
                    ResolvedType::Generic {
                        definition,
                        arguments,
                    } => {
                        let start = results.len().checked_sub(arguments.len())?;
                        let args = results.split_off(start);
                        results.push(describe(universe, *definition)?.with_arguments(args));
                    }
                    ResolvedType::Array { rank, .. } => {
                        let element = results.last_mut()?;
                        element.array_suffix.push('[');
                        for _ in 1..*rank {
                            element.array_suffix.push(',');
                        }
                        element.array_suffix.push(']');
                    }
                    ResolvedType::Named(_) => {}
                },
            }
        }
        results.pop()
    }

    /// Canonical identifier text for this type.
    pub fn display(&self, universe: &dyn TypeUniverse) -> Option<String> {
        self.to_descriptor(universe).map(|desc| stringify(&desc))
    }
}

fn describe(universe: &dyn TypeUniverse, ty: TypeId) -> Option<TypeDescriptor> {
    let name = strip_arity(universe.type_name(ty)?);
    let module = universe.module_identity(universe.type_module(ty)?)?;
    Some(TypeDescriptor::new(name, module))
}
