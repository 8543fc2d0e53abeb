use super::*;

#[test]
fn test_accessibility_orders_by_visibility() {
    assert!(Accessibility::Private < Accessibility::Internal);
    assert!(Accessibility::Internal < Accessibility::Public);
    assert_eq!(Accessibility::default(), Accessibility::NotApplicable);
}

#[test]
fn test_special_type_display() {
    assert_eq!(SpecialType::Object.to_string(), "System.Object");
    assert!(SpecialType::Int32.is_value_type());
    assert!(!SpecialType::String.is_value_type());
}

#[test]
fn test_well_known_metadata_names_carry_arity() {
    assert_eq!(
        WellKnownType::ReadOnlySpan.metadata_name(),
        "System.ReadOnlySpan`1"
    );
    assert_eq!(
        WellKnownType::NullableAttribute.metadata_name(),
        "System.Runtime.CompilerServices.NullableAttribute"
    );
    assert_eq!(
        WellKnownType::EmbeddedAttribute.to_string(),
        "Microsoft.CodeAnalysis.EmbeddedAttribute"
    );
}

#[test]
fn test_every_member_belongs_to_a_listed_type() {
    let members = [
        WellKnownMember::AttributeUsageAttributeAllowMultiple,
        WellKnownMember::SpanGetItem,
        WellKnownMember::NullableContextAttributeCtor,
        WellKnownMember::EmbeddedAttributeCtor,
    ];
    for member in members {
        assert!(WellKnownType::ALL.contains(&member.owner()));
    }
    assert_eq!(WellKnownMember::SpanGetItem.name(), "get_Item");
    assert_eq!(WellKnownMember::EmbeddedAttributeCtor.name(), ".ctor");
    assert_eq!(SpecialMember::ObjectCtor.owner(), SpecialType::Object);
}

#[test]
fn test_embeddable_attributes_map_to_flags() {
    assert_eq!(
        WellKnownType::ScopedRefAttribute.embeddable(),
        Some(crate::EmbeddableAttributes::SCOPED_REF)
    );
    assert_eq!(WellKnownType::Exception.embeddable(), None);
}

#[test]
fn test_nullable_transform_flags() {
    assert_eq!(NullableAnnotation::Oblivious.transform_flag(), 0);
    assert_eq!(NullableAnnotation::NotAnnotated.transform_flag(), 1);
    assert_eq!(NullableAnnotation::Annotated.transform_flag(), 2);
}
