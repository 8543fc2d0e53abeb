use std::sync::Weak;

use pretty_assertions::assert_eq;

use super::*;
use crate::declared::{DeclaredNamedType, DeclaredNamespace, TypeParameterSpec};
use crate::{NamedTypeSymbol, NullableAnnotation, TypeKind};

fn unowned() -> WeakSymbolRef {
    Weak::<DeclaredNamespace>::new()
}

fn generic_pair() -> (Arc<DeclaredNamespace>, Arc<DeclaredNamedType>) {
    let global = DeclaredNamespace::global();
    let pair = DeclaredNamedType::builder("Pair", TypeKind::Class)
        .type_parameter(TypeParameterSpec::new("K"))
        .type_parameter(TypeParameterSpec::new("V"))
        .build_in_namespace(&global);
    (global, pair)
}

#[test]
fn test_empty_map_is_identity() {
    let (_global, pair) = generic_pair();
    let ty = pair.as_type_ref();
    assert_eq!(TypeMap::empty().substitute_type(&ty), ty);
}

#[test]
fn test_substitution_reaches_nested_positions() {
    let (_global, pair) = generic_pair();
    let parameters = pair.type_parameters().to_vec();
    let object = DeclaredNamedType::builder("Object", TypeKind::Class)
        .build_in_namespace(&DeclaredNamespace::global());
    let target = object.as_type_ref();
    let map = TypeMap::new(&parameters[..1], &[target.clone()]);

    let k = TypeRef::TypeParameter(parameters[0].clone());
    let v = TypeRef::TypeParameter(parameters[1].clone());
    let array_of_k = TypeWithAnnotations::annotated(TypeRef::sz_array(k.into()));
    let substituted = map.substitute(&array_of_k);

    assert_eq!(substituted.annotation, NullableAnnotation::Annotated);
    assert_eq!(substituted.ty, TypeRef::sz_array(target.into()));
    assert_eq!(map.substitute_type(&v), v);
}

#[test]
fn test_alpha_rename_creates_fresh_parameters() {
    let (_global, pair) = generic_pair();
    let originals = pair.type_parameters().to_vec();
    let (map, renamed) = TypeMap::alpha_rename(&originals, &unowned());

    assert_eq!(renamed.len(), 2);
    assert_eq!(renamed[0].name(), "K");
    assert_eq!(renamed[1].as_type_parameter().unwrap().ordinal(), 1);
    assert!(!crate::same_symbol(&renamed[0], &originals[0]));
    assert_eq!(
        map.get(&originals[1]),
        Some(&TypeRef::TypeParameter(renamed[1].clone()))
    );
}

#[test]
fn test_alpha_rename_rewrites_constraints() {
    let t = SynthesizedTypeParameter::new("T", 0, unowned());
    let u = SynthesizedTypeParameter::new("U", 1, unowned());
    let t_ref: SymbolRef = t;
    u.set_constraint_types(vec![TypeRef::TypeParameter(t_ref.clone()).into()]);
    let u_ref: SymbolRef = u;

    let (_map, renamed) = TypeMap::alpha_rename(&[t_ref, u_ref], &unowned());
    let constraints = renamed[1].as_type_parameter().unwrap().constraint_types();
    assert_eq!(constraints.len(), 1);
    assert_eq!(constraints[0].ty, TypeRef::TypeParameter(renamed[0].clone()));
}
