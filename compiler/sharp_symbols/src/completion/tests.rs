use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[test]
fn test_part_computed_once_across_threads() {
    let state = CompletionState::new();
    let cancel = CancellationToken::new();
    let runs = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let result = state.complete_part(CompletionPart::MEMBERS, &cancel, || {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
                assert_eq!(result, Ok(()));
            });
        }
    });

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(state.has_complete(CompletionPart::MEMBERS));
    assert!(!state.has_complete(CompletionPart::ALL));
}

#[test]
fn test_cancelled_before_start() {
    let state = CompletionState::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = state.complete_part(CompletionPart::ATTRIBUTES, &cancel, || Ok(()));
    assert_eq!(result, Err(SynthesisError::Cancelled));
    assert!(!state.has_complete(CompletionPart::ATTRIBUTES));
}

#[test]
fn test_failed_part_is_released() {
    let state = CompletionState::new();
    let cancel = CancellationToken::new();

    let failed = state.complete_part(CompletionPart::BASE_TYPE, &cancel, || {
        Err(SynthesisError::Cancelled)
    });
    assert_eq!(failed, Err(SynthesisError::Cancelled));

    assert!(state.try_start(CompletionPart::BASE_TYPE));
    assert!(!state.try_start(CompletionPart::BASE_TYPE));
}

#[test]
fn test_token_clones_share_flag() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert_eq!(clone.check(), Ok(()));
    token.cancel();
    assert!(clone.is_cancelled());
}
