use pretty_assertions::assert_eq;
use sharp_diagnostic::ErrorCode;

use super::*;
use crate::synthesized::PrivateImplementationDetails;
use crate::{BoundStmt, Compilation, CoreLibrary};

fn helper(
    compilation: &Compilation,
    helper: GlobalHelper,
) -> (Arc<PrivateImplementationDetails>, SymbolRef) {
    let details = PrivateImplementationDetails::new(compilation, None);
    let method = details.get_or_add_helper(compilation, helper).unwrap();
    (details, method)
}

fn body(compilation: &Compilation, method: &SymbolRef) -> BoundBlock {
    BodyFactory::new(compilation, method.clone())
        .synthesize_body()
        .unwrap()
}

#[test]
fn test_every_helper_builds_with_its_name() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let details = PrivateImplementationDetails::new(&*compilation, None);
    for helper in GlobalHelper::ALL {
        let method = details.get_or_add_helper(&*compilation, helper).unwrap();
        assert_eq!(method.name(), helper.name());
        assert!(method.is_static());
        assert_eq!(method.declared_accessibility(), Accessibility::Internal);
        assert!(!body(&compilation, &method).has_errors(), "{helper:?}");
    }
    assert_eq!(details.len(), GlobalHelper::ALL.len());
    assert!(compilation.diagnostic_bag().is_empty());
}

#[test]
fn test_string_hash_signature_and_body() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (_details, method) = helper(&compilation, GlobalHelper::ComputeStringHash);
    let signature = method.as_method().unwrap();
    assert_eq!(signature.return_type().ty.special_type(), Some(SpecialType::UInt32));
    let s = signature.parameters()[0].as_parameter().unwrap();
    assert_eq!(s.name(), "s");
    assert_eq!(s.ty().ty.special_type(), Some(SpecialType::String));

    let block = body(&compilation, &method);
    assert_eq!(block.locals.len(), 2);
    assert_eq!(block.statements.len(), 12);
    let BoundStmt::Expression(BoundExpr::Assignment { value, .. }) = &block.statements[2] else {
        panic!("expected the offset basis store");
    };
    assert!(matches!(
        **value,
        BoundExpr::Literal(ConstantValue::UInt32(FNV_OFFSET_BASIS))
    ));
    assert!(matches!(block.statements.last(), Some(BoundStmt::Return(Some(_)))));
}

#[test]
fn test_span_hash_skips_null_check() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (_details, method) = helper(&compilation, GlobalHelper::ComputeReadOnlySpanHash);
    let block = body(&compilation, &method);
    assert_eq!(block.statements.len(), 10);
    assert!(!block.has_errors());
}

#[test]
fn test_throw_if_null_calls_throw_helper() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (details, method) = helper(&compilation, GlobalHelper::ThrowIfNull);
    let throw = details.lookup("Throw").unwrap();

    let block = body(&compilation, &method);
    assert_eq!(block.statements.len(), 4);
    let BoundStmt::Expression(BoundExpr::Call { method: target, arguments, .. }) =
        &block.statements[1]
    else {
        panic!("expected a call to Throw");
    };
    assert!(crate::same_symbol(target, &throw));
    assert_eq!(arguments.len(), 1);
}

#[test]
fn test_switch_expression_exception_falls_back_silently() {
    let corlib =
        CoreLibrary::full().without_member(WellKnownMember::SwitchExpressionExceptionCtorObject);
    let compilation = Compilation::new("test", &corlib);
    let (_details, method) = helper(&compilation, GlobalHelper::ThrowSwitchExpressionException);
    let block = body(&compilation, &method);
    let [BoundStmt::Throw(Some(BoundExpr::ObjectCreation { arguments, .. }))] =
        block.statements.as_slice()
    else {
        panic!("expected a single throw");
    };
    assert!(arguments.is_empty());
    assert!(compilation.diagnostic_bag().is_empty());
}

#[test]
fn test_missing_exception_constructor_is_reported() {
    let corlib =
        CoreLibrary::full().without_member(WellKnownMember::ArgumentNullExceptionCtorString);
    let compilation = Compilation::new("test", &corlib);
    let (_details, method) = helper(&compilation, GlobalHelper::ThrowArgumentNull);
    assert!(body(&compilation, &method).has_errors());
    let diagnostics = compilation.diagnostic_bag().snapshot();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::CS0656);
}

#[test]
fn test_inline_array_helper_signatures() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let details = PrivateImplementationDetails::new(&*compilation, None);

    let element_ref = details
        .get_or_add_helper(&*compilation, GlobalHelper::InlineArrayElementRef)
        .unwrap();
    let element_ref = element_ref.as_method().unwrap();
    let type_parameter_names: Vec<&str> =
        element_ref.type_parameters().iter().map(|tp| tp.name()).collect();
    assert_eq!(type_parameter_names, vec!["TBuffer", "TElement"]);
    assert_eq!(element_ref.ref_kind(), RefKind::Ref);
    let element = TypeRef::TypeParameter(element_ref.type_parameters()[1].clone());
    assert_eq!(element_ref.return_type().ty, element);
    let parameters = element_ref.parameters();
    assert_eq!(parameters[0].as_parameter().unwrap().ref_kind(), RefKind::Ref);
    assert_eq!(parameters[1].name(), "index");

    let as_span = details
        .get_or_add_helper(&*compilation, GlobalHelper::InlineArrayAsReadOnlySpan)
        .unwrap();
    let as_span = as_span.as_method().unwrap();
    assert_eq!(as_span.ref_kind(), RefKind::None);
    let buffer = as_span.parameters()[0].as_parameter().unwrap();
    assert_eq!(buffer.ref_kind(), RefKind::RefReadOnly);
    assert_eq!(as_span.parameters()[1].name(), "length");
    let span = as_span.return_type().ty;
    assert_eq!(span.definition().map(|d| d.name().to_owned()), Some("ReadOnlySpan".to_owned()));

    let first = details
        .get_or_add_helper(&*compilation, GlobalHelper::InlineArrayFirstElementRefReadOnly)
        .unwrap();
    assert_eq!(first.as_method().unwrap().parameters().len(), 1);
}
