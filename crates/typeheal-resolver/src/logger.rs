//! Sinks for resolution diagnostics. Loggers only observe; the engine never
//! branches on what they do.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};
use typeheal_common::{Diagnostic, DiagnosticCategory};

pub trait ResolutionLogger: Send + Sync {
    fn log(&self, diagnostic: &Diagnostic);
}

impl<T: ResolutionLogger + ?Sized> ResolutionLogger for Arc<T> {
    fn log(&self, diagnostic: &Diagnostic) {
        (**self).log(diagnostic);
    }
}

/// Sends every diagnostic to both loggers, left first.
impl<A: ResolutionLogger, B: ResolutionLogger> ResolutionLogger for (A, B) {
    fn log(&self, diagnostic: &Diagnostic) {
        self.0.log(diagnostic);
        self.1.log(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ResolutionLogger for TracingLogger {
    fn log(&self, diagnostic: &Diagnostic) {
        match diagnostic.category {
            DiagnosticCategory::Error | DiagnosticCategory::Warning => warn!(
                code = diagnostic.code,
                identifier = diagnostic.identifier.as_str(),
                "{}",
                diagnostic.message_text
            ),
            DiagnosticCategory::Message => debug!(
                code = diagnostic.code,
                identifier = diagnostic.identifier.as_str(),
                "{}",
                diagnostic.message_text
            ),
        }
    }
}

/// Keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        DiagnosticCollector::default()
    }

    /// Recovers the guard from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResolutionLogger for DiagnosticCollector {
    fn log(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}

#[cfg(test)]
#[path = "../tests/logger_tests.rs"]
mod tests;
