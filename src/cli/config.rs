//! Universe manifests: JSON descriptions of loaded modules for `typeheal resolve`.
//!
//! ```json
//! {
//!   "modules": [
//!     {
//!       "identity": "Game, Version=2.0.0.0",
//!       "types": [
//!         "Combat.Weapon",
//!         { "name": "New.Foo", "movedFrom": { "namespace": "Old" } }
//!       ]
//!     }
//!   ],
//!   "renames": [
//!     { "from": "Legacy.Thing", "fromModule": "Legacy", "module": "Game, Version=2.0.0.0", "name": "Combat.Weapon" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use typeheal_resolver::{
    ExplicitRenames, MovedFrom, MovedFromResolver, ResolutionEngine, ResolveOptions,
    ResolverRegistry, StaticUniverse, TypeUniverse,
};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UniverseManifest {
    #[serde(default)]
    pub modules: Vec<ModuleManifest>,
    #[serde(default)]
    pub renames: Vec<RenameEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleManifest {
    pub identity: String,
    #[serde(default)]
    pub types: Vec<TypeManifest>,
}

/// A type is either a bare full name or an object with a `movedFrom` marker.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeManifest {
    Name(String),
    Declared(TypeDeclaration),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default)]
    pub moved_from: Option<MovedFrom>,
}

impl TypeManifest {
    pub fn name(&self) -> &str {
        match self {
            TypeManifest::Name(name) => name,
            TypeManifest::Declared(decl) => &decl.name,
        }
    }

    pub fn moved_from(&self) -> Option<&MovedFrom> {
        match self {
            TypeManifest::Name(_) => None,
            TypeManifest::Declared(decl) => decl.moved_from.as_ref(),
        }
    }
}

/// An explicit mapping from an old type name to a type in the manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameEntry {
    /// Old full type name.
    pub from: String,
    /// Old module the type was saved with, if it changed module.
    #[serde(default)]
    pub from_module: Option<String>,
    /// Identity of the module that holds the type now.
    pub module: String,
    /// Current full type name.
    pub name: String,
}

/// A manifest turned into a universe plus its explicit renames.
pub struct LoadedUniverse {
    pub universe: Arc<StaticUniverse>,
    pub renames: ExplicitRenames,
}

impl LoadedUniverse {
    /// Explicit renames are consulted before `movedFrom` markers.
    pub fn registry(&self) -> ResolverRegistry {
        let universe: Arc<dyn TypeUniverse> = self.universe.clone();
        let mut registry = ResolverRegistry::new();
        if !self.renames.is_empty() {
            registry.register(self.renames.clone());
        }
        registry.register(MovedFromResolver::new(universe));
        registry
    }

    pub fn engine(&self, options: ResolveOptions) -> ResolutionEngine {
        let universe: Arc<dyn TypeUniverse> = self.universe.clone();
        ResolutionEngine::new(universe)
            .with_registry(self.registry())
            .with_options(options)
    }
}

pub fn parse_manifest(source: &str) -> Result<UniverseManifest> {
    serde_json::from_str(source).context("invalid universe manifest")
}

pub fn load_manifest(path: &Path) -> Result<UniverseManifest> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read universe manifest: {}", path.display()))?;
    parse_manifest(&source)
        .with_context(|| format!("failed to parse universe manifest: {}", path.display()))
}

pub fn load_universe(path: &Path) -> Result<LoadedUniverse> {
    let manifest = load_manifest(path)?;
    manifest
        .build()
        .with_context(|| format!("invalid universe manifest: {}", path.display()))
}

impl UniverseManifest {
    pub fn build(&self) -> Result<LoadedUniverse> {
        let mut builder = StaticUniverse::builder();
        let mut seen = Vec::with_capacity(self.modules.len());
        for module in &self.modules {
            let identity = module.identity.trim();
            if identity.is_empty() {
                bail!("module identity must not be empty");
            }
            if seen.contains(&identity) {
                bail!("module '{identity}' is declared more than once");
            }
            seen.push(identity);

            let id = builder.add_module(identity);
            for ty in &module.types {
                if ty.name().trim().is_empty() {
                    bail!("module '{identity}' declares a type with an empty name");
                }
                let type_id = builder.add_type(id, ty.name().trim());
                if let Some(marker) = ty.moved_from() {
                    builder.mark_moved_from(type_id, marker.clone());
                }
            }
        }
        let universe = builder.build();

        let mut renames = ExplicitRenames::new("manifest-renames");
        for rename in &self.renames {
            let ty = universe.lookup(rename.module.trim(), rename.name.trim()).ok_or_else(|| {
                anyhow!(
                    "rename of '{}' targets unknown type '{}' in module '{}'",
                    rename.from,
                    rename.name,
                    rename.module
                )
            })?;
            renames.rename_type(rename.from.trim(), ty);
            if let (Some(from_module), Some(module)) =
                (rename.from_module.as_deref(), universe.type_module(ty))
            {
                renames.move_module(from_module, rename.from.trim(), module);
            }
        }

        Ok(LoadedUniverse {
            universe: Arc::new(universe),
            renames,
        })
    }
}
