//! Incremental completion of lazily computed symbol parts.
//!
//! A symbol whose parts (base type, members, attributes) are computed on
//! demand tracks them in a [`CompletionState`]. One thread wins the right
//! to compute each part; the others spin until it is published. A
//! [`CancellationToken`] is checked between parts, and a cancelled part is
//! released so a later caller can compute it.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use bitflags::bitflags;

use crate::SynthesisError;

bitflags! {
    /// Independently completed parts of a symbol.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CompletionPart: u8 {
        const BASE_TYPE = 1 << 0;
        const MEMBERS = 1 << 1;
        const ATTRIBUTES = 1 << 2;
        const ALL = Self::BASE_TYPE.bits() | Self::MEMBERS.bits() | Self::ATTRIBUTES.bits();
    }
}

/// Shared cancellation flag.
#[derive(Clone, Default, Debug)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// `Err(Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<(), SynthesisError> {
        if self.is_cancelled() {
            Err(SynthesisError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Started and completed parts of one symbol.
#[derive(Default, Debug)]
pub struct CompletionState {
    started: AtomicU8,
    completed: AtomicU8,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_complete(&self, part: CompletionPart) -> bool {
        CompletionPart::from_bits_truncate(self.completed.load(Ordering::Acquire)).contains(part)
    }

    /// Claim `part`. Exactly one caller gets `true`.
    pub fn try_start(&self, part: CompletionPart) -> bool {
        let previous = self.started.fetch_or(part.bits(), Ordering::AcqRel);
        previous & part.bits() == 0
    }

    /// Publish `part` as complete.
    pub fn notify_complete(&self, part: CompletionPart) {
        self.completed.fetch_or(part.bits(), Ordering::AcqRel);
    }

    /// Release a claimed part without completing it.
    pub fn abandon(&self, part: CompletionPart) {
        self.started.fetch_and(!part.bits(), Ordering::AcqRel);
    }

    /// Wait until another thread completes `part`.
    ///
    /// Returns `false` if the claim was abandoned, in which case the caller
    /// should try to start the part itself.
    pub fn spin_wait_complete(
        &self,
        part: CompletionPart,
        cancel: &CancellationToken,
    ) -> Result<bool, SynthesisError> {
        loop {
            if self.has_complete(part) {
                return Ok(true);
            }
            let started = CompletionPart::from_bits_truncate(self.started.load(Ordering::Acquire));
            if !started.contains(part) {
                return Ok(false);
            }
            cancel.check()?;
            std::hint::spin_loop();
            std::thread::yield_now();
        }
    }

    /// Run `compute` for `part` unless it is already complete.
    ///
    /// Concurrent callers wait for the winner. Cancellation observed before
    /// or during the computation releases the part and returns `Cancelled`.
    pub fn complete_part(
        &self,
        part: CompletionPart,
        cancel: &CancellationToken,
        compute: impl FnOnce() -> Result<(), SynthesisError>,
    ) -> Result<(), SynthesisError> {
        let mut compute = Some(compute);
        loop {
            if self.has_complete(part) {
                return Ok(());
            }
            cancel.check()?;
            if self.try_start(part) {
                tracing::trace!(?part, "completing symbol part");
                // Every claim returns, so `compute` is still here.
                let Some(compute) = compute.take() else {
                    self.abandon(part);
                    return Err(SynthesisError::Cancelled);
                };
                return match compute() {
                    Ok(()) => {
                        self.notify_complete(part);
                        Ok(())
                    }
                    Err(error) => {
                        self.abandon(part);
                        Err(error)
                    }
                };
            }
            if self.spin_wait_complete(part, cancel)? {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests;
