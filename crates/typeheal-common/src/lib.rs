//! Common types and utilities for the typeheal type identity resolver.
//!
//! This crate provides foundational types used across all typeheal crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, diagnostic codes)
//! - Centralized limits and pre-allocation thresholds

// Diagnostics reported by the parser and the resolution engine
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes};

// Centralized limits and thresholds
pub mod limits;
