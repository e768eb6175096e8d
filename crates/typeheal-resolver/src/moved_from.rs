//! Resolver driven by "previously known as" markers on loaded types.

use crate::cache::MovedTypeIndex;
use crate::registry::TypeMovedResolver;
use crate::universe::{MarkerKind, ModuleId, TypeId, TypeUniverse};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};
use typeheal_parser::descriptor::module_name;

/// Looks old identities up in an index built from every
/// [`MovedFrom`](crate::universe::MovedFrom) marker in the universe.
///
/// The index is built on first use and never rebuilt. `OnceLock` runs the
/// scan once even when several threads hit an empty index together.
pub struct MovedFromResolver {
    universe: Arc<dyn TypeUniverse>,
    index: OnceLock<MovedTypeIndex>,
}

impl MovedFromResolver {
    pub fn new(universe: Arc<dyn TypeUniverse>) -> Self {
        MovedFromResolver {
            universe,
            index: OnceLock::new(),
        }
    }

    /// Whether the first lookup has happened yet.
    pub fn is_built(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn index(&self) -> &MovedTypeIndex {
        self.index.get_or_init(|| build_index(self.universe.as_ref()))
    }
}

impl TypeMovedResolver for MovedFromResolver {
    fn name(&self) -> &str {
        "moved-from"
    }

    fn find_type(&self, old_full_name: &str) -> Option<TypeId> {
        self.index().get_type(old_full_name)
    }

    fn find_module(&self, old_module: &str, old_type_name: &str) -> Option<ModuleId> {
        self.index().get_module(module_name(old_module), old_type_name)
    }
}

fn build_index(universe: &dyn TypeUniverse) -> MovedTypeIndex {
    let mut index = MovedTypeIndex::new();
    let marked = universe.types_with_marker(MarkerKind::MovedFrom);
    debug!(types = marked.len(), "building moved-type index");

    for ty in marked {
        let (Some(marker), Some(current_name)) = (universe.moved_from(ty), universe.type_name(ty))
        else {
            continue;
        };
        let old_name = old_full_name(
            current_name,
            marker.namespace.as_deref(),
            marker.class_name.as_deref(),
        );
        trace!(ty = ty.0, current_name, old_name = old_name.as_str(), "moved-from marker");

        if let Some(old_module) = marker.module.as_deref()
            && let Some(module) = universe.type_module(ty)
        {
            index.register_module(
                MovedTypeIndex::module_key(module_name(old_module), &old_name),
                module,
            );
        }
        index.register_type(old_name, ty);
    }

    debug!(
        types = index.type_count(),
        modules = index.module_count(),
        "moved-type index built"
    );
    index
}

/// Reconstruct the full name a type had before it moved.
///
/// The namespace ends at the last `.` before the first `+`, so nested types
/// keep their containing type in the simple name. A generic type's old class
/// name gets the arity marker of the current name when it does not carry one.
pub(crate) fn old_full_name(
    current_name: &str,
    old_namespace: Option<&str>,
    old_class_name: Option<&str>,
) -> String {
    let outer_end = current_name.find('+').unwrap_or(current_name.len());
    let (namespace, simple_name) = match current_name[..outer_end].rfind('.') {
        Some(dot) => (&current_name[..dot], &current_name[dot + 1..]),
        None => ("", current_name),
    };

    let namespace = old_namespace.unwrap_or(namespace);
    let mut simple = match old_class_name {
        Some(class_name) => class_name.to_string(),
        None => simple_name.to_string(),
    };
    if old_class_name.is_some()
        && !simple.contains('`')
        && let Some(tick) = simple_name.rfind('`')
    {
        simple.push_str(&simple_name[tick..]);
    }

    if namespace.is_empty() {
        simple
    } else {
        format!("{namespace}.{simple}")
    }
}

#[cfg(test)]
#[path = "../tests/moved_from_tests.rs"]
mod tests;
