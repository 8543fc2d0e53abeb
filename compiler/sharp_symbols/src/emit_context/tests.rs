use pretty_assertions::assert_eq;
use sharp_diagnostic::ErrorCode;

use super::*;
use crate::declared::{DeclaredNamedType, TypeParameterSpec};
use crate::synthesized::PrivateImplementationDetails;
use crate::{same_symbol, Compilation, CoreLibrary, SpecialType, TypeKind, TypeRef};

fn module(corlib: &CoreLibrary, options: EmitOptions) -> (Arc<Compilation>, ModuleEmitContext) {
    let compilation = Compilation::new("test", corlib);
    let module = ModuleEmitContext::new(compilation.clone(), options);
    (compilation, module)
}

fn embedding(needs_embedded: EmbeddableAttributes) -> EmitOptions {
    EmitOptions {
        needs_embedded,
        ..EmitOptions::default()
    }
}

fn annotated_string(compilation: &Compilation) -> TypeWithAnnotations {
    TypeWithAnnotations::annotated(compilation.special_type_ref(SpecialType::String))
}

#[test]
fn test_embedded_set_implies_embedded_marker() {
    let (_, plain) = module(&CoreLibrary::full(), EmitOptions::default());
    assert_eq!(plain.embedded_set(), EmbeddableAttributes::empty());
    assert!(plain.embedded_attribute(EmbeddableAttributes::NULLABLE).is_none());

    let (_, module) = module(&CoreLibrary::full(), embedding(EmbeddableAttributes::NULLABLE));
    assert_eq!(
        module.embedded_set(),
        EmbeddableAttributes::NULLABLE | EmbeddableAttributes::EMBEDDED
    );
    assert!(module.embedded_attribute(EmbeddableAttributes::SCOPED_REF).is_none());
}

#[test]
fn test_embedded_attribute_is_created_once_and_completed() {
    let (_, module) = module(&CoreLibrary::full(), embedding(EmbeddableAttributes::NULLABLE));
    let first = module.embedded_attribute(EmbeddableAttributes::NULLABLE).unwrap();
    let second = module.embedded_attribute(EmbeddableAttributes::NULLABLE).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(first.has_complete(crate::CompletionPart::ALL));
}

#[test]
fn test_embedded_attributes_are_ordered_by_name() {
    let needs = EmbeddableAttributes::SCOPED_REF | EmbeddableAttributes::NULLABLE;
    let (_, module) = module(&CoreLibrary::minimal(), embedding(needs));
    let names: Vec<String> = module
        .embedded_attributes()
        .iter()
        .map(|attribute| attribute.name().to_owned())
        .collect();
    assert_eq!(
        names,
        vec!["EmbeddedAttribute", "NullableAttribute", "ScopedRefAttribute"]
    );
}

#[test]
fn test_nullable_attribute_binds_to_embedded_copy() {
    let (compilation, module) =
        module(&CoreLibrary::full(), embedding(EmbeddableAttributes::NULLABLE));
    let mut attributes = Vec::new();
    module.add_type_attributes(&annotated_string(&compilation), &mut attributes);
    assert_eq!(attributes.len(), 1);

    let embedded = module.embedded_attribute(EmbeddableAttributes::NULLABLE).unwrap();
    let byte_constructor = embedded.instance_constructors()[0].clone();
    assert!(same_symbol(&attributes[0].constructor, &byte_constructor));
    assert_eq!(attributes[0].arguments, vec![ConstantValue::Byte(2).into()]);
}

#[test]
fn test_nullable_attribute_uses_core_library_when_not_embedded() {
    let (compilation, module) = module(&CoreLibrary::full(), EmitOptions::default());
    let mut attributes = Vec::new();
    module.add_type_attributes(&annotated_string(&compilation), &mut attributes);
    let expected = compilation
        .well_known_member(WellKnownMember::NullableAttributeCtorByte)
        .unwrap();
    assert!(same_symbol(&attributes[0].constructor, &expected));
}

#[test]
fn test_mixed_nullable_flags_use_byte_array() {
    let (compilation, module) = module(&CoreLibrary::full(), EmitOptions::default());
    let list = DeclaredNamedType::builder("List", TypeKind::Class)
        .type_parameter(TypeParameterSpec::new("T"))
        .build_in_namespace(&compilation.global_namespace());
    let ty = TypeWithAnnotations::not_annotated(TypeRef::constructed(
        list,
        vec![annotated_string(&compilation)],
    ));
    let mut attributes = Vec::new();
    module.add_type_attributes(&ty, &mut attributes);
    assert_eq!(attributes[0].arguments, vec![TypedConstant::byte_array(&[1, 2])]);
    let expected = compilation
        .well_known_member(WellKnownMember::NullableAttributeCtorTransformFlags)
        .unwrap();
    assert!(same_symbol(&attributes[0].constructor, &expected));
}

#[test]
fn test_nullable_flag_matching_context_is_omitted() {
    let options = EmitOptions {
        nullable_context: Some(2),
        ..EmitOptions::default()
    };
    let (compilation, module) = module(&CoreLibrary::full(), options);
    let mut attributes = Vec::new();
    module.add_type_attributes(&annotated_string(&compilation), &mut attributes);
    assert!(attributes.is_empty());

    let string = compilation.special_type_ref(SpecialType::String);
    let oblivious = TypeWithAnnotations::oblivious(string);
    module.add_type_attributes(&oblivious, &mut attributes);
    assert!(attributes.is_empty());
}

#[test]
fn test_dynamic_and_native_integer_attributes() {
    let (compilation, module) = module(&CoreLibrary::full(), EmitOptions::default());
    let mut attributes = Vec::new();
    module.add_type_attributes(&TypeRef::Dynamic.into(), &mut attributes);
    assert_eq!(attributes.len(), 1);
    assert!(attributes[0].arguments.is_empty());
    let expected = compilation
        .well_known_member(WellKnownMember::DynamicAttributeCtor)
        .unwrap();
    assert!(same_symbol(&attributes[0].constructor, &expected));

    let mut attributes = Vec::new();
    let elements: Vec<TypeWithAnnotations> = vec![
        TypeRef::NativeInteger { signed: true }.into(),
        compilation.special_type_ref(SpecialType::IntPtr).into(),
    ];
    let pair = TypeRef::Tuple {
        elements: elements.into(),
        names: None,
    };
    module.add_type_attributes(&pair.into(), &mut attributes);
    assert_eq!(
        attributes[0].arguments,
        vec![TypedConstant::bool_array(&[true, false])]
    );
}

#[test]
fn test_module_attributes() {
    let (_, plain) = module(&CoreLibrary::full(), EmitOptions::default());
    assert!(plain.module_attributes().is_empty());

    let options = EmitOptions {
        emit_nullable_public_only: true,
        ref_safety_rules_version: Some(11),
        ..EmitOptions::default()
    };
    let (_, module) = module(&CoreLibrary::full(), options);
    let attributes = module.module_attributes();
    let names: Vec<String> = attributes.iter().map(AttributeData::class_name).collect();
    assert_eq!(
        names,
        vec!["NullablePublicOnlyAttribute", "RefSafetyRulesAttribute"]
    );
    assert_eq!(attributes[0].arguments, vec![ConstantValue::Bool(false).into()]);
    assert_eq!(attributes[1].arguments, vec![ConstantValue::Int32(11).into()]);
}

#[test]
fn test_missing_required_attribute_is_reported() {
    let (compilation, module) = module(&CoreLibrary::minimal(), EmitOptions::default());
    assert!(module.nullable_context_attribute(1).is_none());
    let diagnostics = compilation.diagnostic_bag().snapshot();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::CS0656);
}

#[test]
fn test_missing_compiler_generated_is_silent() {
    let corlib =
        CoreLibrary::full().without_member(WellKnownMember::CompilerGeneratedAttributeCtor);
    let (compilation, module) = module(&corlib, EmitOptions::default());
    assert!(module.compiler_generated_attribute().is_none());
    assert!(module.debugger_hidden_attribute().is_some());
    assert!(compilation.diagnostic_bag().is_empty());
}

#[test]
fn test_helper_container_name_follows_module_kind() {
    let options = EmitOptions {
        module_version_id: Some("abc".to_owned()),
        ..EmitOptions::default()
    };
    let (_, assembly) = module(&CoreLibrary::full(), options.clone());
    assert_eq!(
        assembly.private_implementation_details().name(),
        "<PrivateImplementationDetails>"
    );

    let net_module = EmitOptions {
        is_net_module: true,
        ..options
    };
    let (_, module) = module(&CoreLibrary::full(), net_module);
    assert_eq!(
        module.private_implementation_details().name(),
        "<PrivateImplementationDetails>{abc}"
    );
}

#[test]
fn test_shared_helpers_and_delegates() {
    let (_, module) = module(&CoreLibrary::full(), EmitOptions::default());
    let hash = module.global_helper(GlobalHelper::ComputeStringHash).unwrap();
    let again = module.global_helper(GlobalHelper::ComputeStringHash).unwrap();
    assert!(same_symbol(&hash, &again));
    let details: &Arc<PrivateImplementationDetails> = module.private_implementation_details();
    assert_eq!(details.len(), 1);

    let shape = DelegateShape::by_value(2, true, 0);
    let delegate = module.synthesized_delegate(&shape);
    assert!(Arc::ptr_eq(&delegate, &module.synthesized_delegate(&shape)));
    assert_eq!(module.delegate_cache().len(), 1);
    assert!(format!("{module:?}").starts_with("ModuleEmitContext"));
}

#[test]
fn test_generation_is_stamped_into_ids_and_delegate_shapes() {
    let options = EmitOptions {
        generation: 2,
        ..EmitOptions::default()
    };
    let (_, module) = module(&CoreLibrary::full(), options);
    assert_eq!(module.debug_id(5), sharp_names::DebugId::new(5, 2));

    let shape = module
        .delegate_shape(1, sharp_names::RefKindVector::default(), true)
        .unwrap();
    assert_eq!(shape.name(), "<>A#2");
    assert!(module
        .delegate_shape(1, sharp_names::RefKindVector::create(4), true)
        .is_err());
}
