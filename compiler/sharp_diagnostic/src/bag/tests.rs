use super::*;
use crate::ErrorCode;
use rayon::prelude::*;
use sharp_ir::Location;

#[test]
fn test_add_and_count() {
    let bag = DiagnosticBag::new();
    assert!(bag.is_empty());
    assert!(bag.has_errors().is_none());

    bag.add(Diagnostic::missing_member("System.Exception", ".ctor"));
    bag.add(Diagnostic::warning(
        ErrorCode::CS8335,
        Location::None,
        ["NullableAttribute"],
    ));

    assert_eq!(bag.len(), 2);
    assert_eq!(bag.error_count(), 1);
    assert!(bag.has_errors().is_some());
}

#[test]
fn test_duplicates_are_dropped() {
    let bag = DiagnosticBag::new();
    bag.add(Diagnostic::missing_type("System.Attribute"));
    bag.add(Diagnostic::missing_type("System.Attribute"));
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.error_count(), 1);
}

#[test]
fn test_emit_returns_guarantee() {
    let bag = DiagnosticBag::new();
    let _proof: ErrorGuaranteed = bag.emit(Diagnostic::missing_type("System.Object"));
    assert_eq!(bag.error_count(), 1);
}

#[test]
fn test_flush_sorts_and_clears() {
    let bag = DiagnosticBag::new();
    bag.add(Diagnostic::missing_member("B", "m"));
    bag.add(Diagnostic::missing_type("A"));
    bag.add(Diagnostic::missing_member("A", "m"));

    let flushed = bag.flush();
    let codes: Vec<_> = flushed.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::CS0518, ErrorCode::CS0656, ErrorCode::CS0656]
    );
    assert!(flushed[1].message.contains("'A.m'"));
    assert!(bag.is_empty());
    assert_eq!(bag.error_count(), 0);
}

#[test]
fn test_concurrent_reports_of_same_member_dedupe() {
    let bag = DiagnosticBag::new();
    (0..64).into_par_iter().for_each(|i| {
        bag.add(Diagnostic::missing_member(
            "System.Runtime.CompilerServices.NullableAttribute",
            ".ctor",
        ));
        bag.add(Diagnostic::missing_type(if i % 2 == 0 { "Even" } else { "Odd" }));
    });
    assert_eq!(bag.len(), 3);
    assert_eq!(bag.error_count(), 3);
}

#[test]
fn test_flush_forgets_seen_diagnostics() {
    let bag = DiagnosticBag::new();
    bag.add(Diagnostic::missing_type("System.Attribute"));
    assert_eq!(bag.flush().len(), 1);

    bag.add(Diagnostic::missing_type("System.Attribute"));
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.error_count(), 1);
}

#[test]
fn test_emit_through_dyn_sink() {
    let bag = DiagnosticBag::new();
    let sink: &dyn DiagnosticSink = &bag;
    let _proof: ErrorGuaranteed = sink.emit(Diagnostic::missing_member("System.Object", ".ctor"));
    assert!(bag.has_errors().is_some());
}
