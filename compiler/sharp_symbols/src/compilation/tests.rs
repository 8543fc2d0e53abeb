use pretty_assertions::assert_eq;
use sharp_diagnostic::ErrorCode;

use super::*;
use crate::NamespaceSymbol;

#[test]
fn test_assembly_name_and_namespaces() {
    let compilation = Compilation::new("MyApp", &CoreLibrary::full());
    assert_eq!(compilation.assembly_name(), "MyApp");

    let global = compilation.global_namespace();
    assert!(global.is_global_namespace());
    assert_eq!(global.get_members("System").len(), 1);
    assert!(Arc::ptr_eq(&global, &compilation.global_namespace()));
}

#[test]
fn test_special_type_ref_reports_missing_type() {
    let corlib = CoreLibrary::full().without_special_type(SpecialType::Boolean);
    let compilation = Compilation::new("test", &corlib);

    let boolean = compilation.special_type_ref(SpecialType::Boolean);
    assert_eq!(boolean, TypeRef::error("System.Boolean"));
    let _ = compilation.special_type_ref(SpecialType::Boolean);

    let diagnostics = compilation.diagnostic_bag().snapshot();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::CS0518);
    assert_eq!(
        diagnostics[0].message,
        "Predefined type 'System.Boolean' is not defined or imported"
    );
}

#[test]
fn test_lookups_return_shared_symbols() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let first = compilation.special_type(SpecialType::String).unwrap();
    let second = compilation.special_type(SpecialType::String).unwrap();
    assert!(crate::same_symbol(&first, &second));
    assert_eq!(
        compilation.special_type_ref(SpecialType::String),
        TypeRef::named(first)
    );
    assert!(compilation.diagnostic_bag().is_empty());
}

#[test]
fn test_compilation_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Compilation>();
    assert_send_sync::<Arc<dyn CompilationContext>>();
}

#[test]
fn test_required_members_report_cs0656_once() {
    let corlib = CoreLibrary::full()
        .without_member(WellKnownMember::AttributeUsageAttributeInherited)
        .without_special_member(SpecialMember::ObjectCtor);
    let compilation = Compilation::new("test", &corlib);

    assert!(compilation
        .require_well_known_member(WellKnownMember::AttributeUsageAttributeInherited)
        .is_err());
    assert!(compilation
        .require_well_known_member(WellKnownMember::AttributeUsageAttributeInherited)
        .is_err());
    assert!(compilation.require_special_member(SpecialMember::ObjectCtor).is_err());
    assert!(compilation
        .require_well_known_member(WellKnownMember::AttributeUsageAttributeCtor)
        .is_ok());

    let diagnostics = compilation.diagnostic_bag().flush();
    let missing: Vec<_> = diagnostics
        .iter()
        .map(|diagnostic| (diagnostic.code, diagnostic.args[1].as_str()))
        .collect();
    assert_eq!(
        missing,
        vec![(ErrorCode::CS0656, "Inherited"), (ErrorCode::CS0656, ".ctor")]
    );
}
