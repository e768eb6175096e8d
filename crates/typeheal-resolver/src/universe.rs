//! The type universe: the loaded modules and types identifiers resolve against.
//!
//! The engine never inspects the host's type system directly. Everything it
//! needs goes through [`TypeUniverse`], which hosts implement over whatever
//! registry they have. [`StaticUniverse`] is the in-crate implementation,
//! populated by explicit registration through [`UniverseBuilder`] (there is no
//! runtime reflection to scan for markers, so moved types are declared when
//! the universe is built).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use typeheal_parser::descriptor::module_name;

/// Handle to a loaded module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModuleId(pub u32);

/// Handle to a loaded type (a non-generic type or a generic definition).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// How type names are compared during lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NameMatch {
    #[default]
    Exact,
    IgnoreCase,
}

impl NameMatch {
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            NameMatch::Exact => a == b,
            NameMatch::IgnoreCase => a.eq_ignore_ascii_case(b),
        }
    }
}

/// Kinds of declarative markers a type can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// The type declares the identity it was previously known by.
    MovedFrom,
}

/// "Previously known as" marker. Every field is optional; a missing field
/// means that part of the identity did not change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovedFrom {
    /// Previous namespace, e.g. `Old.Gameplay`.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Previous module name or identity, e.g. `Assembly-CSharp`.
    #[serde(default)]
    pub module: Option<String>,
    /// Previous simple class name, e.g. `Weapon`.
    #[serde(default)]
    pub class_name: Option<String>,
}

impl MovedFrom {
    pub fn namespace(namespace: impl Into<String>) -> Self {
        MovedFrom {
            namespace: Some(namespace.into()),
            ..MovedFrom::default()
        }
    }

    pub fn module(module: impl Into<String>) -> Self {
        MovedFrom {
            module: Some(module.into()),
            ..MovedFrom::default()
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// Read-only view of the host's loaded modules and types.
///
/// Type names are full names including the arity marker of generic
/// definitions (`System.Collections.Generic.List`1`).
pub trait TypeUniverse: Send + Sync {
    /// Every loaded module, in a stable order. The module scan walks modules
    /// in this order, so it decides which module wins an ambiguous match.
    fn loaded_modules(&self) -> Vec<ModuleId>;

    fn module_identity(&self, module: ModuleId) -> Option<&str>;

    /// Look a module up by exact identity.
    fn find_module(&self, identity: &str) -> Option<ModuleId> {
        self.loaded_modules()
            .into_iter()
            .find(|&module| self.module_identity(module) == Some(identity))
    }

    /// Look a module up by name, ignoring version/culture/key metadata.
    fn find_module_by_name(&self, name: &str) -> Option<ModuleId> {
        let name = module_name(name);
        self.loaded_modules().into_iter().find(|&module| {
            self.module_identity(module)
                .is_some_and(|identity| module_name(identity) == name)
        })
    }

    fn get_type(&self, module: ModuleId, full_name: &str, name_match: NameMatch) -> Option<TypeId>;

    fn type_name(&self, ty: TypeId) -> Option<&str>;

    fn type_module(&self, ty: TypeId) -> Option<ModuleId>;

    fn types_with_marker(&self, marker: MarkerKind) -> Vec<TypeId>;

    fn moved_from(&self, ty: TypeId) -> Option<&MovedFrom>;
}

#[derive(Debug, Clone)]
struct ModuleEntry {
    identity: String,
    types: FxHashMap<String, TypeId>,
    /// Lowercased name to the first type registered under it.
    types_folded: FxHashMap<String, TypeId>,
    /// Registration order, so iteration is deterministic.
    order: Vec<TypeId>,
}

#[derive(Debug, Clone)]
struct TypeEntry {
    full_name: String,
    module: ModuleId,
    moved_from: Option<MovedFrom>,
}

/// A fixed universe built by explicit registration.
#[derive(Debug, Clone, Default)]
pub struct StaticUniverse {
    modules: Vec<ModuleEntry>,
    types: Vec<TypeEntry>,
    by_identity: FxHashMap<String, ModuleId>,
}

impl StaticUniverse {
    pub fn builder() -> UniverseBuilder {
        UniverseBuilder::new()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Look up a type by exact module identity and full name.
    pub fn lookup(&self, module_identity: &str, full_name: &str) -> Option<TypeId> {
        let module = self.by_identity.get(module_identity)?;
        self.get_type(*module, full_name, NameMatch::Exact)
    }

    /// Types of `module` in registration order.
    pub fn module_types(&self, module: ModuleId) -> &[TypeId] {
        self.modules
            .get(module.0 as usize)
            .map(|entry| entry.order.as_slice())
            .unwrap_or(&[])
    }

    fn module_entry(&self, module: ModuleId) -> Option<&ModuleEntry> {
        self.modules.get(module.0 as usize)
    }

    fn type_entry(&self, ty: TypeId) -> Option<&TypeEntry> {
        self.types.get(ty.0 as usize)
    }
}

impl TypeUniverse for StaticUniverse {
    fn loaded_modules(&self) -> Vec<ModuleId> {
        (0..self.modules.len() as u32).map(ModuleId).collect()
    }

    fn module_identity(&self, module: ModuleId) -> Option<&str> {
        self.module_entry(module).map(|entry| entry.identity.as_str())
    }

    fn find_module(&self, identity: &str) -> Option<ModuleId> {
        self.by_identity.get(identity).copied()
    }

    fn get_type(&self, module: ModuleId, full_name: &str, name_match: NameMatch) -> Option<TypeId> {
        let entry = self.module_entry(module)?;
        match name_match {
            NameMatch::Exact => entry.types.get(full_name).copied(),
            NameMatch::IgnoreCase => entry
                .types
                .get(full_name)
                .or_else(|| entry.types_folded.get(&full_name.to_ascii_lowercase()))
                .copied(),
        }
    }

    fn type_name(&self, ty: TypeId) -> Option<&str> {
        self.type_entry(ty).map(|entry| entry.full_name.as_str())
    }

    fn type_module(&self, ty: TypeId) -> Option<ModuleId> {
        self.type_entry(ty).map(|entry| entry.module)
    }

    fn types_with_marker(&self, marker: MarkerKind) -> Vec<TypeId> {
        match marker {
            MarkerKind::MovedFrom => self
                .types
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.moved_from.is_some())
                .map(|(i, _)| TypeId(i as u32))
                .collect(),
        }
    }

    fn moved_from(&self, ty: TypeId) -> Option<&MovedFrom> {
        self.type_entry(ty).and_then(|entry| entry.moved_from.as_ref())
    }
}

/// Registers modules and types into a [`StaticUniverse`].
///
/// ```
/// use typeheal_resolver::universe::{MovedFrom, StaticUniverse, TypeUniverse};
///
/// let mut builder = StaticUniverse::builder();
/// let game = builder.add_module("Game");
/// let weapon = builder.add_type(game, "Combat.Weapon");
/// builder.mark_moved_from(weapon, MovedFrom::namespace("Items"));
/// let universe = builder.build();
///
/// assert_eq!(universe.lookup("Game", "Combat.Weapon"), Some(weapon));
/// assert!(universe.moved_from(weapon).is_some());
/// ```
#[derive(Debug, Default)]
pub struct UniverseBuilder {
    universe: StaticUniverse,
}

impl UniverseBuilder {
    pub fn new() -> Self {
        UniverseBuilder::default()
    }

    /// Register a module. Registering the same identity twice returns the
    /// existing handle.
    pub fn add_module(&mut self, identity: impl Into<String>) -> ModuleId {
        let identity = identity.into();
        if let Some(&existing) = self.universe.by_identity.get(&identity) {
            return existing;
        }
        let id = ModuleId(self.universe.modules.len() as u32);
        self.universe.by_identity.insert(identity.clone(), id);
        self.universe.modules.push(ModuleEntry {
            identity,
            types: FxHashMap::default(),
            types_folded: FxHashMap::default(),
            order: Vec::new(),
        });
        id
    }

    /// Register a type in `module`. Registering the same full name twice in
    /// one module returns the existing handle.
    pub fn add_type(&mut self, module: ModuleId, full_name: impl Into<String>) -> TypeId {
        let full_name = full_name.into();
        if let Some(existing) = self
            .universe
            .module_entry(module)
            .and_then(|entry| entry.types.get(&full_name))
        {
            return *existing;
        }

        let id = TypeId(self.universe.types.len() as u32);
        if let Some(entry) = self.universe.modules.get_mut(module.0 as usize) {
            entry.types.insert(full_name.clone(), id);
            entry
                .types_folded
                .entry(full_name.to_ascii_lowercase())
                .or_insert(id);
            entry.order.push(id);
        }
        self.universe.types.push(TypeEntry {
            full_name,
            module,
            moved_from: None,
        });
        id
    }

    /// Attach a "previously known as" marker to `ty`, replacing any earlier one.
    pub fn mark_moved_from(&mut self, ty: TypeId, moved_from: MovedFrom) -> &mut Self {
        if let Some(entry) = self.universe.types.get_mut(ty.0 as usize) {
            entry.moved_from = Some(moved_from);
        }
        self
    }

    pub fn build(self) -> StaticUniverse {
        self.universe
    }
}

#[cfg(test)]
#[path = "../tests/universe_tests.rs"]
mod tests;
