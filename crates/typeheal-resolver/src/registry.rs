//! Pluggable "type moved" resolvers and the ordered registry that consults them.
//!
//! A resolver maps an old identity (the module and type name an identifier
//! was saved with) to a type or module that is loaded now. The registry asks
//! its resolvers in registration order and takes the first answer; later
//! resolvers are not consulted once one has answered.

use crate::moved_from::MovedFromResolver;
use crate::universe::{ModuleId, TypeId, TypeUniverse};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, trace};
use typeheal_parser::descriptor::module_name;

/// Maps old identities to loaded types and modules.
pub trait TypeMovedResolver: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// The loaded type previously known by `old_full_name`.
    fn find_type(&self, old_full_name: &str) -> Option<TypeId>;

    /// The loaded module that now holds the type `old_type_name` previously
    /// saved in `old_module`.
    fn find_module(&self, old_module: &str, old_type_name: &str) -> Option<ModuleId>;
}

/// Ordered collection of resolvers, first match wins.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: Vec<Box<dyn TypeMovedResolver>>,
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &self.names())
            .finish()
    }
}

impl ResolverRegistry {
    /// An empty registry. Nothing is ever found through it.
    pub fn new() -> Self {
        ResolverRegistry::default()
    }

    /// A registry holding the marker-driven [`MovedFromResolver`] for `universe`.
    pub fn with_defaults(universe: Arc<dyn TypeUniverse>) -> Self {
        let mut registry = ResolverRegistry::new();
        registry.register(MovedFromResolver::new(universe));
        registry
    }

    /// Append a resolver. It is consulted after every resolver registered
    /// before it.
    pub fn register<R: TypeMovedResolver + 'static>(&mut self, resolver: R) -> &mut Self {
        debug!(resolver = resolver.name(), position = self.resolvers.len(), "registering type-moved resolver");
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn find_moved_type(&self, old_module: &str, old_type_name: &str) -> Option<TypeId> {
        self.resolvers.iter().find_map(|resolver| {
            let found = resolver.find_type(old_type_name)?;
            trace!(
                resolver = resolver.name(),
                old_module,
                old_type_name,
                ty = found.0,
                "moved type found"
            );
            Some(found)
        })
    }

    pub fn find_moved_module(&self, old_module: &str, old_type_name: &str) -> Option<ModuleId> {
        self.resolvers.iter().find_map(|resolver| {
            let found = resolver.find_module(old_module, old_type_name)?;
            trace!(
                resolver = resolver.name(),
                old_module,
                old_type_name,
                module = found.0,
                "moved module found"
            );
            Some(found)
        })
    }
}

/// A resolver fed from an explicit rename table instead of type markers.
///
/// Module keys use the module *name*, so any version of the old module
/// matches.
#[derive(Debug, Clone, Default)]
pub struct ExplicitRenames {
    label: String,
    types: FxHashMap<String, TypeId>,
    modules: FxHashMap<(String, String), ModuleId>,
}

impl ExplicitRenames {
    pub fn new(label: impl Into<String>) -> Self {
        ExplicitRenames {
            label: label.into(),
            ..ExplicitRenames::default()
        }
    }

    /// Map an old full type name to a loaded type. The first mapping for a
    /// name is kept.
    pub fn rename_type(&mut self, old_full_name: impl Into<String>, ty: TypeId) -> &mut Self {
        self.types.entry(old_full_name.into()).or_insert(ty);
        self
    }

    /// Map `(old module, old type name)` to the module that holds the type now.
    pub fn move_module(
        &mut self,
        old_module: &str,
        old_type_name: impl Into<String>,
        module: ModuleId,
    ) -> &mut Self {
        self.modules
            .entry((module_name(old_module).to_string(), old_type_name.into()))
            .or_insert(module);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.modules.is_empty()
    }
}

impl TypeMovedResolver for ExplicitRenames {
    fn name(&self) -> &str {
        &self.label
    }

    fn find_type(&self, old_full_name: &str) -> Option<TypeId> {
        self.types.get(old_full_name).copied()
    }

    fn find_module(&self, old_module: &str, old_type_name: &str) -> Option<ModuleId> {
        self.modules
            .get(&(module_name(old_module).to_string(), old_type_name.to_string()))
            .copied()
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
