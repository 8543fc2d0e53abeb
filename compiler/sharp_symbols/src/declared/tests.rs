use std::sync::Arc;

use pretty_assertions::assert_eq;
use sharp_ir::{Location, SourceId, Span, SyntaxReference};
use sharp_names::RefKind;

use super::*;
use crate::{
    Accessibility, Compilation, CompilationContext, ConstantValue, CoreLibrary,
    DeclarationModifiers, FieldSymbol, MethodKind, MethodSymbol, NamedTypeSymbol, NamespaceSymbol,
    PropertySymbol, SpecialType, Symbol, SymbolRef, TypeKind, TypeRef,
};

fn syntax(start: u32) -> SyntaxReference {
    SyntaxReference::new(SourceId::new(0), Span::new(start, start + 4))
}

#[test]
fn test_namespace_paths_are_shared() {
    let global = DeclaredNamespace::global();
    let a = global.get_or_add_path("System.Runtime");
    let b = global.get_or_add_path("System").get_or_add_child("Runtime");
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(global.members().len(), 1);
    assert_eq!(crate::qualified_name(&*a), "System.Runtime");
}

#[test]
fn test_find_type_uses_metadata_name() {
    let global = DeclaredNamespace::global();
    DeclaredNamedType::builder("Box", TypeKind::Class)
        .type_parameter(TypeParameterSpec::new("T"))
        .build_in_namespace(&global);
    assert!(global.find_type("Box`1").is_some());
    assert!(global.find_type("Box").is_none());
}

#[test]
fn test_named_type_records_declaration() {
    let global = DeclaredNamespace::global();
    let class = DeclaredNamedType::builder("Widget", TypeKind::Class)
        .accessibility(Accessibility::Internal)
        .modifiers(DeclarationModifiers::SEALED)
        .declared_at(syntax(10))
        .build_in_namespace(&global);

    assert!(!class.is_implicitly_declared());
    assert!(class.is_sealed());
    assert_eq!(class.declared_accessibility(), Accessibility::Internal);
    assert_eq!(class.locations(), vec![Location::source(SourceId::new(0), Span::new(10, 14))]);
    assert_eq!(class.declaring_syntax_references(), vec![syntax(10)]);
}

#[test]
fn test_base_type_is_set_once() {
    let global = DeclaredNamespace::global();
    let class = DeclaredNamedType::builder("C", TypeKind::Class).build_in_namespace(&global);
    class.set_base_type(TypeRef::error("First"));
    class.set_base_type(TypeRef::error("Second"));
    assert_eq!(class.base_type(), Some(TypeRef::error("First")));
}

#[test]
fn test_interface_is_abstract_and_struct_is_value_type() {
    let global = DeclaredNamespace::global();
    let interface =
        DeclaredNamedType::builder("IRun", TypeKind::Interface).build_in_namespace(&global);
    let point = DeclaredNamedType::builder("Point", TypeKind::Struct).build_in_namespace(&global);
    assert!(interface.is_abstract());
    assert!(point.is_value_type());
    assert!(point.is_sealed());
}

#[test]
fn test_method_parameters_and_this() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let global = compilation.global_namespace();
    let int32 = compilation.special_type_ref(SpecialType::Int32);
    let point = DeclaredNamedType::builder("Point", TypeKind::Struct).build_in_namespace(&global);
    let method = DeclaredMethod::builder("Offset", MethodKind::Ordinary)
        .parameter(ParameterSpec::new("dx", int32.clone()).with_ref_kind(RefKind::Ref))
        .parameter(ParameterSpec::new("dy", int32).with_default(ConstantValue::Int32(0)))
        .declared_at(syntax(20))
        .build(&point, None);

    let parameters = method.parameters();
    assert_eq!(parameters.len(), 2);
    let dy = parameters[1].as_parameter().unwrap();
    assert_eq!(dy.ordinal(), 1);
    assert_eq!(dy.explicit_default_value(), Some(ConstantValue::Int32(0)));
    assert_eq!(parameters[0].as_parameter().unwrap().ref_kind(), RefKind::Ref);

    let this = method.this_parameter().unwrap();
    let this = this.as_parameter().unwrap();
    assert!(this.is_this());
    assert_eq!(this.ref_kind(), RefKind::Ref);
    assert!(method.return_type().ty.is_error());
    assert!(method.generate_debug_info());
}

#[test]
fn test_this_parameter_is_cached() {
    let global = DeclaredNamespace::global();
    let class = DeclaredNamedType::builder("C", TypeKind::Class).build_in_namespace(&global);
    let method = DeclaredMethod::builder("M", MethodKind::Ordinary).build(&class, None);
    let a = method.this_parameter().unwrap();
    let b = method.this_parameter().unwrap();
    assert!(crate::same_symbol(&a, &b));

    let shared = DeclaredMethod::builder("S", MethodKind::Ordinary)
        .modifiers(DeclarationModifiers::STATIC)
        .build(&class, None);
    assert!(shared.this_parameter().is_none());
}

#[test]
fn test_generic_method_signature_sees_its_type_parameters() {
    let global = DeclaredNamespace::global();
    let class = DeclaredNamedType::builder("C", TypeKind::Class).build_in_namespace(&global);
    let method = DeclaredMethod::builder("Identity", MethodKind::Ordinary)
        .type_parameter(TypeParameterSpec::new("T"))
        .build_with(&class, |type_parameters| {
            let t = TypeRef::TypeParameter(type_parameters[0].clone());
            MethodSignature {
                return_type: t.clone().into(),
                parameters: vec![ParameterSpec::new("value", t)],
            }
        });
    assert_eq!(method.arity(), 1);
    assert_eq!(method.return_type().ty.to_string(), "T");
    let t = &method.type_parameters()[0];
    assert!(t.as_type_parameter().unwrap().is_method_type_parameter());
}

#[test]
fn test_constant_field() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let class = DeclaredNamedType::builder("C", TypeKind::Class)
        .build_in_namespace(&compilation.global_namespace());
    let field = DeclaredField::builder("Max", compilation.special_type_ref(SpecialType::Int32))
        .constant(ConstantValue::Int32(10))
        .build(&class);
    assert!(field.is_const());
    assert!(field.is_static());
    assert_eq!(field.constant_value(), Some(ConstantValue::Int32(10)));
    assert_eq!(class.members().len(), 1);
}

#[test]
fn test_property_accessors_attach_once() {
    let global = DeclaredNamespace::global();
    let class = DeclaredNamedType::builder("C", TypeKind::Class).build_in_namespace(&global);
    let property = DeclaredProperty::new(
        &class,
        "Name",
        TypeRef::error("String"),
        Accessibility::Public,
        DeclarationModifiers::empty(),
        true,
        Some(syntax(30)),
    );
    let getter: SymbolRef = DeclaredMethod::builder("get_Name", MethodKind::PropertyGet)
        .build(&class, None);
    let other: SymbolRef = DeclaredMethod::builder("get_Other", MethodKind::PropertyGet)
        .build(&class, None);
    property.set_get_method(getter.clone());
    property.set_get_method(other);

    assert!(crate::same_symbol(&property.get_method().unwrap(), &getter));
    assert!(property.set_method().is_none());
    assert!(property.is_auto_property());
    assert!(getter.has_special_name());
    assert_eq!(property.locations().len(), 1);
}
