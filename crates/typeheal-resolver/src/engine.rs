//! The resolution engine: turns descriptor trees into resolved types.
//!
//! Every node of a descriptor tree goes through the same fallback chain:
//!
//! 1. the shared [`ResolutionCache`]
//! 2. the fast path, an exact lookup in the module the identifier names
//! 3. the [`ResolverRegistry`], first for a moved type, then for a moved module
//! 4. an exhaustive scan of the other loaded modules
//!
//! Whenever a step other than the fast path finds the type, the node's name
//! and module identity are rewritten to where the type lives now, so printing
//! the descriptor afterwards yields the healed identifier.
//!
//! Nodes are processed children first over a flattened copy of the tree, so
//! deeply nested generics never recurse.

use crate::cache::ResolutionCache;
use crate::error::ResolveError;
use crate::logger::ResolutionLogger;
use crate::registry::ResolverRegistry;
use crate::resolved::ResolvedType;
use crate::universe::{NameMatch, TypeId, TypeUniverse};
use smallvec::SmallVec;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, trace};
use typeheal_common::Diagnostic;
use typeheal_common::diagnostics::diagnostic_messages;
use typeheal_common::limits::SCAN_CANDIDATES_INLINE;
use typeheal_parser::descriptor::strip_arity;
use typeheal_parser::{TypeDescriptor, parse_identifier, stringify};

/// What to do when a node cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMiss {
    /// Stop and return [`ResolveError::NotFound`].
    Fail,
    /// Return `Ok(None)` and keep going, leaving the descriptor best-effort
    /// rewritten.
    #[default]
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Case rule for the exhaustive module scan.
    pub name_match: NameMatch,
    /// Keep scanning after the first hit so ambiguous names can be reported.
    pub report_ambiguity: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            name_match: NameMatch::Exact,
            report_ambiguity: true,
        }
    }
}

impl ResolveOptions {
    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    pub fn ignore_case(self) -> Self {
        self.with_name_match(NameMatch::IgnoreCase)
    }

    pub fn with_ambiguity_reports(mut self, report: bool) -> Self {
        self.report_ambiguity = report;
        self
    }
}

/// Result of [`ResolutionEngine::parse_and_resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// `None` when a node missed under [`OnMiss::Absent`].
    pub ty: Option<ResolvedType>,
    /// The descriptor after identity rewriting.
    pub descriptor: TypeDescriptor,
    /// `descriptor` printed in canonical form.
    pub canonical: String,
    /// Number of nodes whose identity was rewritten.
    pub rewrites: usize,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.ty.is_some()
    }

    pub fn was_rewritten(&self) -> bool {
        self.rewrites > 0
    }
}

pub struct ResolutionEngine {
    universe: Arc<dyn TypeUniverse>,
    registry: ResolverRegistry,
    cache: Arc<ResolutionCache>,
    logger: Option<Arc<dyn ResolutionLogger>>,
    options: ResolveOptions,
}

impl std::fmt::Debug for ResolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionEngine")
            .field("registry", &self.registry)
            .field("cache", &self.cache.stats())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ResolutionEngine {
    /// An engine with the default registry, a fresh cache and no logger.
    pub fn new(universe: Arc<dyn TypeUniverse>) -> Self {
        let registry = ResolverRegistry::with_defaults(Arc::clone(&universe));
        ResolutionEngine {
            universe,
            registry,
            cache: Arc::new(ResolutionCache::new()),
            logger: None,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_registry(mut self, registry: ResolverRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Share a cache with other engines over the same universe.
    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ResolutionLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn universe(&self) -> &dyn TypeUniverse {
        self.universe.as_ref()
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ResolverRegistry {
        &mut self.registry
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolve `descriptor`, rewriting moved nodes in place.
    ///
    /// The descriptor is rewritten even when the call fails, as far as
    /// resolution got.
    #[tracing::instrument(level = "debug", skip(self, descriptor), fields(identifier = %descriptor))]
    pub fn resolve(
        &self,
        descriptor: &mut TypeDescriptor,
        on_miss: OnMiss,
    ) -> Result<Option<ResolvedType>, ResolveError> {
        self.resolve_tree(descriptor, on_miss).0
    }

    /// Parse `raw`, resolve it and print the healed identifier.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use typeheal_resolver::{OnMiss, ResolutionEngine, StaticUniverse};
    /// use typeheal_resolver::universe::MovedFrom;
    ///
    /// let mut builder = StaticUniverse::builder();
    /// let game = builder.add_module("Game");
    /// let foo = builder.add_type(game, "New.Foo");
    /// builder.mark_moved_from(foo, MovedFrom::namespace("Old"));
    ///
    /// let engine = ResolutionEngine::new(Arc::new(builder.build()));
    /// let resolution = engine.parse_and_resolve("Old.Foo, Game", OnMiss::Fail).unwrap();
    /// assert_eq!(resolution.canonical, "New.Foo, Game");
    /// assert_eq!(resolution.rewrites, 1);
    /// ```
    pub fn parse_and_resolve(&self, raw: &str, on_miss: OnMiss) -> Result<Resolution, ResolveError> {
        let mut descriptor = parse_identifier(raw).map_err(|err| {
            self.log(&err.to_diagnostic(raw));
            ResolveError::Parse(err)
        })?;
        let (result, rewrites) = self.resolve_tree(&mut descriptor, on_miss);
        let ty = result?;
        let canonical = stringify(&descriptor);
        Ok(Resolution {
            ty,
            descriptor,
            canonical,
            rewrites,
        })
    }

    fn resolve_tree(
        &self,
        descriptor: &mut TypeDescriptor,
        on_miss: OnMiss,
    ) -> (Result<Option<ResolvedType>, ResolveError>, usize) {
        let mut tree = FlatTree::flatten(descriptor);
        let mut results: Vec<Option<ResolvedType>> = vec![None; tree.nodes.len()];
        let mut rewrites = 0;
        let mut failure = None;

        for idx in (0..tree.nodes.len()).rev() {
            let children = tree.nodes[idx].children.clone();
            let node = &mut tree.nodes[idx].descriptor;
            let search = search_name(&node.name, children.len());

            let Some(definition) = self.lookup(node, &search, &mut rewrites) else {
                self.log(&Diagnostic::from_message(
                    diagnostic_messages::RESOLUTION_MISS,
                    identity_text(&node.name, &node.module),
                    &[search.as_str(), node.module.as_str()],
                ));
                if on_miss == OnMiss::Fail {
                    failure = Some(ResolveError::NotFound {
                        identifier: search,
                        module: node.module.clone(),
                    });
                    break;
                }
                continue;
            };

            let ranks = node.array_ranks();
            let resolved = if children.is_empty() {
                Some(ResolvedType::Named(definition))
            } else {
                let arguments: Option<Vec<ResolvedType>> =
                    children.map(|child| results[child].take()).collect();
                arguments.map(|arguments| ResolvedType::Generic {
                    definition,
                    arguments,
                })
            };
            if resolved.is_none() {
                trace!(search = search.as_str(), "generic argument missed, node not constructed");
            }
            results[idx] = resolved.map(|ty| ty.into_array(&ranks));
        }

        tree.reassemble(descriptor);
        match failure {
            Some(err) => (Err(err), rewrites),
            None => (Ok(results.into_iter().next().flatten()), rewrites),
        }
    }

    /// Find the loaded type for one node, rewriting the node's identity when
    /// the type was found somewhere other than where it names.
    fn lookup(&self, node: &mut TypeDescriptor, search: &str, rewrites: &mut usize) -> Option<TypeId> {
        let name_match = self.options.name_match;
        if let Some(ty) = self.cache.get(&node.module, search, name_match) {
            self.rewrite(node, ty, rewrites);
            return Some(ty);
        }

        let found = {
            let node: &TypeDescriptor = node;
            self.fast_path(node, search)
                .or_else(|| self.from_registry(node, search))
                .or_else(|| self.scan(node, search))
        }?;
        let stored = self.cache.insert(&node.module, search, name_match, found);
        self.rewrite(node, stored, rewrites);
        Some(stored)
    }

    fn fast_path(&self, node: &TypeDescriptor, search: &str) -> Option<TypeId> {
        if node.module.is_empty() {
            return None;
        }
        let module = self.universe.find_module(&node.module)?;
        let ty = self.universe.get_type(module, search, NameMatch::Exact)?;
        trace!(search, module = node.module.as_str(), "fast path hit");
        Some(ty)
    }

    fn from_registry(&self, node: &TypeDescriptor, search: &str) -> Option<TypeId> {
        if let Some(ty) = self.registry.find_moved_type(&node.module, search) {
            return Some(ty);
        }
        let module = self.registry.find_moved_module(&node.module, search)?;
        self.universe.get_type(module, search, self.options.name_match)
    }

    /// Look through every loaded module. The named module was already checked
    /// exactly by the fast path, so it is only revisited for case-insensitive
    /// scans, and then first.
    fn scan(&self, node: &TypeDescriptor, search: &str) -> Option<TypeId> {
        let name_match = self.options.name_match;
        let named = if node.module.is_empty() {
            None
        } else {
            self.universe.find_module(&node.module)
        };
        let revisit = named.filter(|_| name_match == NameMatch::IgnoreCase);
        let modules = revisit.into_iter().chain(
            self.universe
                .loaded_modules()
                .into_iter()
                .filter(|&module| Some(module) != named),
        );

        let mut candidates: SmallVec<[TypeId; SCAN_CANDIDATES_INLINE]> = SmallVec::new();
        for module in modules {
            if let Some(ty) = self.universe.get_type(module, search, name_match) {
                candidates.push(ty);
                if !self.options.report_ambiguity {
                    break;
                }
            }
        }

        let first = *candidates.first()?;
        trace!(search, candidates = candidates.len(), "module scan hit");
        if candidates.len() > 1 {
            let winner = self
                .universe
                .type_module(first)
                .and_then(|module| self.universe.module_identity(module))
                .unwrap_or_default();
            let count = candidates.len().to_string();
            self.log(&Diagnostic::from_message(
                diagnostic_messages::AMBIGUOUS_MATCH,
                identity_text(&node.name, &node.module),
                &[search, count.as_str(), winner],
            ));
        }
        Some(first)
    }

    fn rewrite(&self, node: &mut TypeDescriptor, ty: TypeId, rewrites: &mut usize) {
        let universe = self.universe.as_ref();
        let (Some(full_name), Some(module)) = (
            universe.type_name(ty),
            universe
                .type_module(ty)
                .and_then(|module| universe.module_identity(module)),
        ) else {
            return;
        };
        let name = strip_arity(full_name);
        if node.name == name && node.module == module {
            return;
        }

        let before = identity_text(&node.name, &node.module);
        node.set_identity(name, module);
        *rewrites += 1;
        let after = identity_text(name, module);
        debug!(from = before.as_str(), to = after.as_str(), "rewrote moved type identity");
        self.log(&Diagnostic::from_message(
            diagnostic_messages::IDENTITY_REWRITTEN,
            before.as_str(),
            &[before.as_str(), after.as_str()],
        ));
    }

    fn log(&self, diagnostic: &Diagnostic) {
        if let Some(logger) = &self.logger {
            logger.log(diagnostic);
        }
    }
}

fn search_name(name: &str, arity: usize) -> String {
    if arity == 0 {
        name.to_string()
    } else {
        format!("{name}`{arity}")
    }
}

fn identity_text(name: &str, module: &str) -> String {
    if module.is_empty() {
        name.to_string()
    } else {
        format!("{name}, {module}")
    }
}

struct FlatNode {
    descriptor: TypeDescriptor,
    /// Indices of this node's generic arguments, in positional order.
    children: Range<usize>,
}

/// A descriptor tree laid out in pre-order. Arguments of a node occupy a
/// contiguous range of indices, all greater than the node's own.
struct FlatTree {
    nodes: Vec<FlatNode>,
}

impl FlatTree {
    /// Move the nodes of `root` out into a flat list. `root` keeps its
    /// scalar fields but loses its arguments until [`FlatTree::reassemble`].
    fn flatten(root: &mut TypeDescriptor) -> FlatTree {
        let mut nodes = vec![FlatNode {
            descriptor: std::mem::take(root),
            children: 0..0,
        }];
        let mut pending = vec![0];
        while let Some(idx) = pending.pop() {
            let arguments = std::mem::take(&mut nodes[idx].descriptor.generic_arguments);
            let start = nodes.len();
            for argument in arguments {
                pending.push(nodes.len());
                nodes.push(FlatNode {
                    descriptor: argument,
                    children: 0..0,
                });
            }
            nodes[idx].children = start..nodes.len();
        }
        FlatTree { nodes }
    }

    fn reassemble(self, root: &mut TypeDescriptor) {
        let mut built: Vec<Option<TypeDescriptor>> = Vec::with_capacity(self.nodes.len());
        let mut ranges = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            built.push(Some(node.descriptor));
            ranges.push(node.children);
        }

        for idx in (0..built.len()).rev() {
            let arguments: Vec<TypeDescriptor> = ranges[idx]
                .clone()
                .filter_map(|child| built[child].take())
                .collect();
            if let Some(node) = built[idx].as_mut() {
                node.generic_arguments = arguments;
            }
        }

        if let Some(Some(tree)) = built.into_iter().next() {
            *root = tree;
        }
    }
}

#[cfg(test)]
#[path = "../tests/engine_tests.rs"]
mod tests;
