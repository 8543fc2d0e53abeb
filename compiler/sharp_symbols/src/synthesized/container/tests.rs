use pretty_assertions::assert_eq;

use super::*;
use crate::declared::{DeclaredMethod, DeclaredNamedType, TypeParameterSpec};
use crate::{Compilation, CoreLibrary, EmitOptions, MethodKind};

fn host(compilation: &Compilation) -> Arc<DeclaredNamedType> {
    DeclaredNamedType::builder("Host", TypeKind::Class)
        .build_in_namespace(&compilation.global_namespace())
}

#[test]
fn test_class_spec_defaults() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let host: SymbolRef = host(&compilation);
    let container = SynthesizedContainer::build(
        ContainerSpec::class("<>c", &host, ContainerKind::StaticLambdaContainer, &*compilation),
        |_| Vec::new(),
    );

    assert_eq!(container.declared_accessibility(), Accessibility::Private);
    assert!(container.is_sealed());
    assert!(container.is_synthesized());
    assert!(container.is_implicitly_declared());
    assert_eq!(container.base_type().unwrap().to_string(), "Object");
    assert!(crate::same_symbol(&container.containing_symbol().unwrap(), &host));
    // No constructor: emitted abstract.
    assert!(container.is_abstract());
}

#[test]
fn test_struct_container_is_never_abstract() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let host: SymbolRef = host(&compilation);
    let container = SynthesizedContainer::build(
        ContainerSpec::structure(
            "<>c__DisplayClass0_0",
            &host,
            ContainerKind::LambdaDisplayClass,
            &*compilation,
        ),
        |_| Vec::new(),
    );
    assert!(container.is_value_type());
    assert!(!container.is_abstract());
    assert_eq!(container.base_type().unwrap().to_string(), "ValueType");
}

#[test]
fn test_container_carries_compiler_generated() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let host: SymbolRef = host(&compilation);
    let container = SynthesizedContainer::build(
        ContainerSpec::class("<>c", &host, ContainerKind::StaticLambdaContainer, &*compilation),
        |_| Vec::new(),
    );
    let module = ModuleEmitContext::new(compilation.clone(), EmitOptions::default());
    let attributes = module.synthesized_attributes(&*container);
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].class_name(), "CompilerGeneratedAttribute");
}

#[test]
fn test_dynamic_call_site_container() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let host_type = host(&compilation);
    let host: SymbolRef = host_type.clone();
    let method: SymbolRef = DeclaredMethod::builder("Run", MethodKind::Ordinary)
        .type_parameter(TypeParameterSpec::new("T"))
        .build(&host_type, None);
    let t = TypeRef::TypeParameter(method.as_method().unwrap().type_parameters()[0].clone());

    let container = synthesize_dynamic_call_site_container(
        &*compilation,
        &host,
        &method,
        Some(DebugId::new(3, 0)),
        None,
        &[t.clone(), TypeRef::Dynamic],
    );

    assert_eq!(container.name(), "<>o__3");
    assert_eq!(container.metadata_name(), "<>o__3`1");
    assert!(container.is_static());
    assert_eq!(container.container_kind(), ContainerKind::DynamicCallSiteContainer);

    let names: Vec<String> = container.members().iter().map(|m| m.name().to_owned()).collect();
    assert_eq!(names, vec!["<>p__0".to_owned(), "<>p__1".to_owned()]);

    let site = container.member("<>p__0").unwrap();
    assert!(site.is_static());
    assert_eq!(site.declared_accessibility(), Accessibility::Public);
    let own_t = TypeRef::TypeParameter(container.type_parameters()[0].clone());
    assert_eq!(site.as_field().unwrap().ty().ty, own_t);
    assert_eq!(container.type_map().substitute_type(&t), own_t);
}

#[test]
fn test_delegate_cache_container() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let host: SymbolRef = host(&compilation);
    let owner = DelegateCacheOwner {
        generation: 0,
        method_name: Some("Run".to_owned()),
        method_ordinal: Some(2),
        owner_unique_id: Some(1),
    };
    let action = TypeRef::error("System.Action");
    let container = synthesize_delegate_cache_container(
        &*compilation,
        &host,
        &owner,
        &[],
        &[
            DelegateCacheEntry {
                target_method: "Print".to_owned(),
                delegate_type: action.clone(),
            },
            DelegateCacheEntry {
                target_method: "Log".to_owned(),
                delegate_type: action,
            },
        ],
    );

    assert_eq!(container.name(), "<Run>O__2_1");
    assert!(container.type_parameters().is_empty());
    assert!(container.is_abstract());
    let names: Vec<String> = container.members().iter().map(|m| m.name().to_owned()).collect();
    assert_eq!(names, vec!["<0>__Print".to_owned(), "<1>__Log".to_owned()]);
}

#[test]
fn test_module_wide_delegate_cache_container_name() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let host: SymbolRef = host(&compilation);
    let container = synthesize_delegate_cache_container(
        &*compilation,
        &host,
        &DelegateCacheOwner::default(),
        &[],
        &[],
    );
    assert_eq!(container.name(), "<>O");
}
