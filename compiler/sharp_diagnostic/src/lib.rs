//! Diagnostic collection for the Sharp compiler.
//!
//! The synthesized-symbol subsystem only ever *reports* problems; rendering
//! belongs to the driver. This crate therefore provides:
//! - `ErrorCode` with message templates
//! - `Diagnostic` carrying code, severity, location and message arguments
//! - `DiagnosticSink`, the narrow interface synthesis code reports through
//! - `DiagnosticBag`, a thread-safe sink shared by parallel lowering workers
//!
//! # Error Guarantees
//!
//! `ErrorGuaranteed` is type-level proof that at least one error was recorded:
//!
//! ```text
//! let guarantee = bag.emit(diagnostic);
//! fn synthesize() -> Result<Symbol, ErrorGuaranteed> { ... }
//! ```

mod bag;
mod diagnostic;
mod error_code;
mod guarantee;

pub use bag::{DiagnosticBag, DiagnosticSink};
pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
