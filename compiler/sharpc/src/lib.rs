//! Sharp Compiler - Synthesized Symbols Facade
//!
//! One entry point over the synthesis crates:
//! - [`names`]: the generated-name codec
//! - [`symbols`]: the symbol model and synthesized declarations
//! - [`diagnostic`] and [`ir`]: diagnostics and source positions
//!
//! A module is set up from a [`SynthesisConfig`]:
//!
//! ```text
//! let compilation = Compilation::new("app", &CoreLibrary::full());
//! let module = SynthesisConfig::new("app.dll")
//!     .with_nullable_context(1)
//!     .build(compilation);
//! ```
//!
//! Set `RUST_LOG=sharp_symbols=debug` and call [`init_tracing`] to see
//! what gets synthesized.

mod config;
mod tracing_setup;

pub use config::SynthesisConfig;
pub use tracing_setup::init_tracing;

pub use sharp_diagnostic as diagnostic;
pub use sharp_ir as ir;
pub use sharp_names as names;
pub use sharp_symbols as symbols;

pub use sharp_diagnostic::{Diagnostic, DiagnosticBag, DiagnosticSink, ErrorCode};
pub use sharp_symbols::{
    Compilation, CompilationContext, CoreLibrary, EmbeddableAttributes, EmitOptions,
    ModuleEmitContext, SynthesisError,
};
