use super::*;
use pretty_assertions::assert_eq;
use sharp_ir::{SourceId, Span};

#[test]
fn test_missing_member_renders_message() {
    let diag = Diagnostic::missing_member("System.AttributeUsageAttribute", ".ctor");
    assert_eq!(diag.code, ErrorCode::CS0656);
    assert_eq!(diag.location, Location::None);
    assert!(diag.is_error());
    assert_eq!(
        diag.to_string(),
        "error[CS0656]: Missing compiler required member 'System.AttributeUsageAttribute..ctor'"
    );
}

#[test]
fn test_missing_type() {
    let diag = Diagnostic::missing_type("System.Exception");
    assert_eq!(diag.args, vec!["System.Exception".to_string()]);
    assert_eq!(
        diag.message,
        "Predefined type 'System.Exception' is not defined or imported"
    );
}

#[test]
fn test_warning_with_label_and_note() {
    let loc = Location::source(SourceId::new(1), Span::new(4, 9));
    let diag = Diagnostic::warning(ErrorCode::CS8335, loc, ["NullableAttribute"])
        .with_label(Location::None, "synthesized here")
        .with_note("the compiler emits this attribute itself");
    assert!(!diag.is_error());
    assert_eq!(diag.labels.len(), 1);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.location.span(), Some(Span::new(4, 9)));
}
