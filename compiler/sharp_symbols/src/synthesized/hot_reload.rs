//! `HotReloadException`, thrown by code an edit-and-continue delta
//! replaced with a throwing stub.

use std::sync::Arc;

use super::embedded_attribute::{
    ConstructorDescription, EmbeddedBase, EmbeddedTypeDescription, FieldDescription, FieldInit,
    PayloadType,
};
use super::SynthesizedEmbeddedAttribute;
use crate::{CancellationToken, CompilationContext, SynthesisError};

/// `internal sealed class HotReloadException : Exception` with a public
/// `int Code` and a `(string message, int code)` constructor.
pub static HOT_RELOAD_EXCEPTION: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: "System.Runtime.CompilerServices",
    name: "HotReloadException",
    base: EmbeddedBase::Exception,
    fields: &[FieldDescription {
        name: "Code",
        ty: PayloadType::Int32,
    }],
    constructors: &[ConstructorDescription {
        parameters: &[("message", PayloadType::String), ("code", PayloadType::Int32)],
        initializers: &[(0, FieldInit::Parameter(1))],
    }],
    usage: None,
};

/// Declare and complete the exception type.
pub fn synthesize_hot_reload_exception(
    compilation: &dyn CompilationContext,
    cancel: &CancellationToken,
) -> Result<Arc<SynthesizedEmbeddedAttribute>, SynthesisError> {
    let exception = SynthesizedEmbeddedAttribute::new(compilation, &HOT_RELOAD_EXCEPTION);
    exception.force_complete(compilation, cancel)?;
    tracing::debug!("synthesized HotReloadException");
    Ok(exception)
}
