//! Centralized limits and thresholds.
//!
//! Pre-allocation sizes and inline capacities used by the parser and the
//! resolution engine live here so they can be tuned in one place.
//!
//! None of these limits bound correctness: the parser and the engine walk
//! identifier trees iteratively, so nesting depth is only bounded by memory.

// =============================================================================
// Parser
// =============================================================================

/// Maximum number of parse nodes pre-allocated for a single identifier.
///
/// The parser estimates its node count from the number of argument openers in
/// the input. Hostile inputs with millions of brackets still parse, the arena
/// just grows on demand past this point.
pub const MAX_NODE_PREALLOC: usize = 4_096;

/// Inline capacity for a parse node's argument list.
///
/// Nearly every serialized generic has one or two arguments (`List`1`,
/// `Dictionary`2`), so argument lists up to this size never allocate.
pub const ARGUMENT_LIST_INLINE: usize = 2;

// =============================================================================
// Resolution
// =============================================================================

/// Inline capacity for the candidate list collected by the module scan.
///
/// More than one candidate means an ambiguous match, which is rare; the list
/// only spills to the heap when a type name exists in many modules.
pub const SCAN_CANDIDATES_INLINE: usize = 4;

/// Initial capacity of a moved-type index.
pub const MOVED_INDEX_CAPACITY: usize = 64;
