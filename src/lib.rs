//! typeheal: resolve serialized type identifiers back to live types.
//!
//! Persisted data often stores types as text, e.g.
//! ``Outer`1[[Inner`1[[System.Int32, mscorlib]], MyAssembly]], MyAssembly``.
//! When a type is later renamed, moved to another namespace or moved to
//! another module, those identifiers stop resolving. This crate parses such
//! identifiers, resolves them against a [`TypeUniverse`] with a chain of
//! fallbacks, and rewrites them to the type's current identity.
//!
//! - [`parse_identifier`] / [`stringify`]: grammar in both directions
//! - [`ResolutionEngine`]: lookup, healing and generic reconstruction
//! - [`ResolverRegistry`]: pluggable "type moved" resolvers
//!
//! ```
//! use std::sync::Arc;
//! use typeheal::{MovedFrom, OnMiss, ResolutionEngine, StaticUniverse};
//!
//! let mut builder = StaticUniverse::builder();
//! let game = builder.add_module("Game");
//! let weapon = builder.add_type(game, "Combat.Weapon");
//! builder.mark_moved_from(weapon, MovedFrom::namespace("Items"));
//!
//! let engine = ResolutionEngine::new(Arc::new(builder.build()));
//! let healed = engine.parse_and_resolve("Items.Weapon, Game", OnMiss::Fail).unwrap();
//! assert_eq!(healed.canonical, "Combat.Weapon, Game");
//! ```

pub use typeheal_common as common;
pub use typeheal_parser as parser;
pub use typeheal_resolver as resolver;

pub use typeheal_common::{Diagnostic, DiagnosticCategory, diagnostic_codes};
pub use typeheal_parser::{ParseError, ParseErrorKind, TypeDescriptor, parse_identifier, stringify};
pub use typeheal_resolver::{
    DiagnosticCollector, ExplicitRenames, MovedFrom, MovedFromResolver, NameMatch, OnMiss,
    Resolution, ResolutionCache, ResolutionEngine, ResolutionLogger, ResolveError,
    ResolveOptions, ResolvedType, ResolverRegistry, StaticUniverse, TracingLogger,
    TypeMovedResolver, TypeUniverse,
};

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
