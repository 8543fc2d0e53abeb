use pretty_assertions::assert_eq;
use sharp_symbols::{Compilation, CoreLibrary, Symbol};

use super::*;

#[test]
fn test_default_matches_emit_options() {
    assert_eq!(SynthesisConfig::default().emit_options(), EmitOptions::default());
}

#[test]
fn test_builders() {
    let config = SynthesisConfig::new("app.dll")
        .with_nullable_context(1)
        .with_nullable_public_only(true)
        .with_generation(3)
        .embedding(EmbeddableAttributes::NULLABLE)
        .embedding(EmbeddableAttributes::SCOPED_REF)
        .with_ref_safety_rules(11);

    let options = config.emit_options();
    assert_eq!(options.module_name, "app.dll");
    assert_eq!(options.nullable_context, Some(1));
    assert!(options.emit_nullable_public_only);
    assert_eq!(options.generation, 3);
    assert_eq!(
        options.needs_embedded,
        EmbeddableAttributes::NULLABLE | EmbeddableAttributes::SCOPED_REF
    );
    assert_eq!(options.ref_safety_rules_version, Some(11));
    assert!(!options.is_net_module);
    assert_eq!(EmitOptions::from(config), options);
}

#[test]
fn test_net_module_names_helper_container_with_version_id() {
    let compilation = Compilation::new("app", &CoreLibrary::full());
    let module = SynthesisConfig::net_module("part.netmodule", "0A1B").build(compilation);
    assert_eq!(
        module.private_implementation_details().name(),
        "<PrivateImplementationDetails>{0A1B}"
    );
}

#[test]
fn test_version_id_alone_does_not_rename_helper_container() {
    let compilation = Compilation::new("app", &CoreLibrary::full());
    let module = SynthesisConfig::new("app.dll")
        .with_module_version_id("0A1B")
        .build(compilation);
    assert_eq!(
        module.private_implementation_details().name(),
        "<PrivateImplementationDetails>"
    );
}

#[test]
fn test_build_carries_options() {
    let compilation = Compilation::new("app", &CoreLibrary::full());
    let config = SynthesisConfig::new("app.dll").with_ref_safety_rules(11);
    let module = config.build(compilation);
    assert_eq!(module.options(), &config.emit_options());
    assert_eq!(module.compilation().assembly_name(), "app");
    assert_eq!(module.module_attributes().len(), 1);
}
