//! Resolution of parsed type identifiers against a universe of loaded types.
//!
//! The [`ResolutionEngine`] walks a [`TypeDescriptor`](typeheal_parser::TypeDescriptor)
//! tree, looks every node up through the cache, the named module, the
//! [`ResolverRegistry`] and finally a scan of all loaded modules, and heals
//! the descriptor in place when a type has moved.

pub mod cache;
pub mod engine;
pub mod error;
pub mod logger;
pub mod moved_from;
pub mod registry;
pub mod resolved;
pub mod universe;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use cache::{CacheStats, MovedTypeIndex, ResolutionCache};
pub use engine::{OnMiss, Resolution, ResolutionEngine, ResolveOptions};
pub use error::ResolveError;
pub use logger::{DiagnosticCollector, ResolutionLogger, TracingLogger};
pub use moved_from::MovedFromResolver;
pub use registry::{ExplicitRenames, ResolverRegistry, TypeMovedResolver};
pub use resolved::ResolvedType;
pub use universe::{
    MarkerKind, ModuleId, MovedFrom, NameMatch, StaticUniverse, TypeId, TypeUniverse,
    UniverseBuilder,
};
