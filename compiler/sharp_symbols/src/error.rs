//! Errors from fallible synthesis requests.
//!
//! Missing core-library members are not errors here: they are reported to
//! the diagnostic sink and the symbol degrades. `SynthesisError` covers
//! requests the caller should not have made.

use sharp_names::RefKind;
use thiserror::Error;

/// Error returned by synthesis APIs that can reject a request.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum SynthesisError {
    /// A helper was requested after the helper container was frozen for
    /// emission.
    #[error("cannot add `{name}` to <PrivateImplementationDetails> after it was frozen")]
    HelperContainerFrozen { name: String },

    /// The ref-kind vector of a delegate shape does not cover every
    /// parameter plus the return.
    #[error(
        "delegate shape has {parameter_count} parameter(s) \
         but its ref-kind vector holds {capacity} slot(s)"
    )]
    InconsistentDelegateShape {
        parameter_count: usize,
        capacity: usize,
    },

    /// A void-returning delegate shape has a by-ref return slot.
    #[error("void-returning delegate shape cannot return by `{ref_kind}`")]
    VoidDelegateReturnsByRef { ref_kind: RefKind },

    /// Explicit-size types hold at least one byte.
    #[error("explicit-size type of size {size} is not allowed")]
    InvalidExplicitSize { size: u32 },

    /// Completion was cancelled between phases.
    #[error("symbol completion was cancelled")]
    Cancelled,
}
