//! Thread-safe diagnostic collection.
//!
//! Lowering runs on several worker threads at once, and any of them may
//! discover that a well-known member is missing. `DiagnosticBag` accepts
//! reports through a shared reference and deduplicates identical ones, so
//! two workers tripping over the same missing member yield one error.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorGuaranteed};

/// Narrow reporting interface consumed by symbol synthesis.
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic.
    fn add(&self, diagnostic: Diagnostic);

    /// Record an error and get proof it was recorded.
    fn emit(&self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diagnostic.is_error(), "emit() is for errors only");
        self.add(diagnostic);
        ErrorGuaranteed::new()
    }
}

#[derive(Default, Debug)]
struct Collected {
    /// Report order.
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
}

/// Thread-safe, deduplicating diagnostic collection.
#[derive(Default, Debug)]
pub struct DiagnosticBag {
    collected: Mutex<Collected>,
    /// Count of errors (not warnings/notes), readable without the lock.
    error_count: AtomicUsize,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of errors collected.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Acquire)
    }

    /// Proof of errors, if any were recorded.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count())
    }

    /// Number of diagnostics of any severity.
    pub fn len(&self) -> usize {
        self.collected.lock().diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.lock().diagnostics.is_empty()
    }

    /// Copy of the collected diagnostics, in report order.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.collected.lock().diagnostics.clone()
    }

    /// Drain the collected diagnostics, sorted by code then message.
    ///
    /// Report order depends on thread scheduling, so a stable order is
    /// imposed here rather than at insertion.
    pub fn flush(&self) -> Vec<Diagnostic> {
        let mut drained = std::mem::take(&mut *self.collected.lock()).diagnostics;
        self.error_count.store(0, Ordering::Release);
        drained.sort_by(|a, b| {
            a.code
                .as_str()
                .cmp(b.code.as_str())
                .then_with(|| a.message.cmp(&b.message))
        });
        drained
    }
}

impl DiagnosticSink for DiagnosticBag {
    fn add(&self, diagnostic: Diagnostic) {
        let mut guard = self.collected.lock();
        if !guard.seen.insert(diagnostic.clone()) {
            return;
        }
        if diagnostic.is_error() {
            self.error_count.fetch_add(1, Ordering::AcqRel);
        }
        guard.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests;
