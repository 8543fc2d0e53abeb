use std::sync::Arc;

use pretty_assertions::assert_eq;
use sharp_diagnostic::ErrorCode;

use super::*;
use crate::declared::{DeclaredMethod, DeclaredNamedType, ParameterSpec};
use crate::{Compilation, CoreLibrary, TypeKind};

fn method_in(
    compilation: &Compilation,
    kind: TypeKind,
    base: Option<TypeRef>,
) -> (Arc<DeclaredNamedType>, SymbolRef) {
    let class = DeclaredNamedType::builder("Widget", kind)
        .build_in_namespace(&compilation.global_namespace());
    if let Some(base) = base {
        class.set_base_type(base);
    }
    let int32 = compilation.special_type_ref(SpecialType::Int32);
    let method: SymbolRef = DeclaredMethod::builder(".ctor", crate::MethodKind::Constructor)
        .parameter(ParameterSpec::new("size", int32))
        .build(&class, None);
    (class, method)
}

#[test]
fn test_base_constructor_call_targets_object_ctor() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let object = compilation.special_type_ref(SpecialType::Object);
    let (_class, method) = method_in(&compilation, TypeKind::Class, Some(object));
    let factory = BodyFactory::new(&*compilation, method);

    let Some(BoundStmt::Expression(BoundExpr::Call {
        receiver, method, ..
    })) = factory.base_constructor_call()
    else {
        panic!("expected a call statement");
    };
    assert!(matches!(receiver.as_deref(), Some(BoundExpr::This)));
    let object_ctor = compilation.special_member(SpecialMember::ObjectCtor).unwrap();
    assert!(crate::same_symbol(&method, &object_ctor));
    assert!(compilation.diagnostic_bag().is_empty());
}

#[test]
fn test_value_types_have_no_base_constructor_call() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let value_type = compilation.special_type_ref(SpecialType::ValueType);
    let (_class, method) = method_in(&compilation, TypeKind::Struct, Some(value_type));
    let factory = BodyFactory::new(&*compilation, method);
    assert!(factory.base_constructor_call().is_none());
}

#[test]
fn test_base_without_parameterless_ctor_reports_missing_member() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let base = DeclaredNamedType::builder("Base", TypeKind::Class)
        .build_in_namespace(&compilation.global_namespace());
    let (_class, method) = method_in(&compilation, TypeKind::Class, Some(base.as_type_ref()));
    let factory = BodyFactory::new(&*compilation, method);

    let statement = factory.base_constructor_call().unwrap();
    assert!(statement.has_errors());
    let diagnostics = compilation.diagnostic_bag().snapshot();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::CS0656);
    assert_eq!(diagnostics[0].args, vec!["Base".to_owned(), ".ctor".to_owned()]);
}

#[test]
fn test_missing_well_known_member_reports_once() {
    let corlib = CoreLibrary::full().without_member(WellKnownMember::EmbeddedAttributeCtor);
    let compilation = Compilation::new("test", &corlib);
    let (_class, method) = method_in(&compilation, TypeKind::Class, None);
    let factory = BodyFactory::new(&*compilation, method);

    assert!(factory
        .well_known_member(WellKnownMember::EmbeddedAttributeCtor)
        .is_none());
    assert!(factory
        .well_known_member(WellKnownMember::EmbeddedAttributeCtor)
        .is_none());
    let diagnostics = compilation.diagnostic_bag().snapshot();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::CS0656);
}

#[test]
fn test_parameter_out_of_range_is_bad() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (_class, method) = method_in(&compilation, TypeKind::Class, None);
    let factory = BodyFactory::new(&*compilation, method);

    assert!(matches!(factory.parameter(0), BoundExpr::Parameter(_)));
    assert!(matches!(factory.parameter(1), BoundExpr::Bad));
    assert_eq!(factory.parameters().len(), 1);
}

#[test]
fn test_locals_and_labels_are_sequential() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (_class, method) = method_in(&compilation, TypeKind::Class, None);
    let mut factory = BodyFactory::new(&*compilation, method);
    let int32 = factory.special_type(SpecialType::Int32);

    let first = factory.synthesized_local(int32.clone(), SynthesizedLocalKind::LoweringTemp);
    let second = factory.synthesized_local(int32, SynthesizedLocalKind::LoweringTemp);
    assert_eq!((first, second), (LocalId(0), LocalId(1)));
    assert_eq!(factory.generate_label(), LabelId(0));
    assert_eq!(factory.generate_label(), LabelId(1));
}

#[test]
fn test_declared_methods_have_no_synthesized_body() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (_class, method) = method_in(&compilation, TypeKind::Class, None);
    let mut factory = BodyFactory::new(&*compilation, method);
    assert!(factory.synthesize_body().is_none());
}

#[test]
fn test_errors_propagate_through_nested_nodes() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (_class, method) = method_in(&compilation, TypeKind::Class, None);
    let factory = BodyFactory::new(&*compilation, method);

    let clean = factory.binary(
        BinaryOperator::Add,
        factory.literal(ConstantValue::Int32(1)),
        factory.parameter(0),
    );
    assert!(!clean.has_errors());

    let broken = factory.assignment(factory.parameter(0), factory.call_member(None, None, vec![]));
    assert!(broken.has_errors());

    let block = factory.block(vec![
        factory.expression_statement(clean),
        factory.return_value(broken),
    ]);
    assert!(block.has_errors());
    assert!(!factory.block(vec![factory.return_void()]).has_errors());
}

#[test]
fn test_static_field_access_has_no_receiver() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let (class, method) = method_in(&compilation, TypeKind::Class, None);
    let int32 = compilation.special_type_ref(SpecialType::Int32);
    let instance: SymbolRef = crate::declared::DeclaredField::builder("count", int32.clone())
        .build(&class);
    let shared: SymbolRef = crate::declared::DeclaredField::builder("total", int32)
        .modifiers(crate::DeclarationModifiers::STATIC)
        .build(&class);
    let factory = BodyFactory::new(&*compilation, method);

    assert!(matches!(
        factory.field(instance),
        BoundExpr::FieldAccess { receiver: Some(_), .. }
    ));
    assert!(matches!(
        factory.field(shared),
        BoundExpr::FieldAccess { receiver: None, .. }
    ));
}
