//! The embeddable attribute family.

use super::embedded_attribute::{
    ConstructorDescription, EmbeddedBase, EmbeddedTypeDescription, FieldDescription, FieldInit,
    PayloadType, SIGNATURE_TARGETS,
};
use crate::{AttributeTargets, AttributeUsageInfo, EmbeddableAttributes};

const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";

const PARAMETERLESS: ConstructorDescription = ConstructorDescription {
    parameters: &[],
    initializers: &[],
};

/// `Microsoft.CodeAnalysis.EmbeddedAttribute`, the marker every embedded
/// type carries.
pub static EMBEDDED_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: "Microsoft.CodeAnalysis",
    name: "EmbeddedAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[],
    constructors: &[PARAMETERLESS],
    usage: Some(AttributeUsageInfo::new(
        AttributeTargets::CLASS
            .union(AttributeTargets::STRUCT)
            .union(AttributeTargets::ENUM)
            .union(AttributeTargets::INTERFACE)
            .union(AttributeTargets::DELEGATE),
        false,
        false,
    )),
};

/// Nullable annotations of a signature, one byte per type in pre-order.
pub static NULLABLE_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "NullableAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[FieldDescription {
        name: "NullableFlags",
        ty: PayloadType::ByteArray,
    }],
    constructors: &[
        ConstructorDescription {
            parameters: &[("flag", PayloadType::Byte)],
            initializers: &[(0, FieldInit::ParameterInArray(0))],
        },
        ConstructorDescription {
            parameters: &[("flags", PayloadType::ByteArray)],
            initializers: &[(0, FieldInit::Parameter(0))],
        },
    ],
    usage: Some(AttributeUsageInfo::new(SIGNATURE_TARGETS, false, false)),
};

/// Default nullable annotation of the members of a type or method.
pub static NULLABLE_CONTEXT_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "NullableContextAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[FieldDescription {
        name: "Flag",
        ty: PayloadType::Byte,
    }],
    constructors: &[ConstructorDescription {
        parameters: &[("flag", PayloadType::Byte)],
        initializers: &[(0, FieldInit::Parameter(0))],
    }],
    usage: Some(AttributeUsageInfo::new(
        AttributeTargets::CLASS
            .union(AttributeTargets::DELEGATE)
            .union(AttributeTargets::INTERFACE)
            .union(AttributeTargets::METHOD)
            .union(AttributeTargets::STRUCT),
        false,
        false,
    )),
};

pub static NULLABLE_PUBLIC_ONLY_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "NullablePublicOnlyAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[FieldDescription {
        name: "IncludesInternals",
        ty: PayloadType::Bool,
    }],
    constructors: &[ConstructorDescription {
        parameters: &[("includesInternals", PayloadType::Bool)],
        initializers: &[(0, FieldInit::Parameter(0))],
    }],
    usage: Some(AttributeUsageInfo::new(AttributeTargets::MODULE, false, false)),
};

/// Marks `nint`/`nuint` positions; the parameterless form means a single
/// native integer.
pub static NATIVE_INTEGER_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "NativeIntegerAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[FieldDescription {
        name: "TransformFlags",
        ty: PayloadType::BoolArray,
    }],
    constructors: &[
        ConstructorDescription {
            parameters: &[],
            initializers: &[(0, FieldInit::TrueInArray)],
        },
        ConstructorDescription {
            parameters: &[("flags", PayloadType::BoolArray)],
            initializers: &[(0, FieldInit::Parameter(0))],
        },
    ],
    usage: Some(AttributeUsageInfo::new(SIGNATURE_TARGETS, false, false)),
};

pub static SCOPED_REF_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "ScopedRefAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[],
    constructors: &[PARAMETERLESS],
    usage: Some(AttributeUsageInfo::new(
        AttributeTargets::PARAMETER,
        false,
        false,
    )),
};

pub static REF_SAFETY_RULES_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "RefSafetyRulesAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[FieldDescription {
        name: "Version",
        ty: PayloadType::Int32,
    }],
    constructors: &[ConstructorDescription {
        parameters: &[("version", PayloadType::Int32)],
        initializers: &[(0, FieldInit::Parameter(0))],
    }],
    usage: Some(AttributeUsageInfo::new(AttributeTargets::MODULE, false, false)),
};

pub static MEMORY_SAFETY_RULES_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "MemorySafetyRulesAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[FieldDescription {
        name: "Version",
        ty: PayloadType::Int32,
    }],
    constructors: &[ConstructorDescription {
        parameters: &[("version", PayloadType::Int32)],
        initializers: &[(0, FieldInit::Parameter(0))],
    }],
    usage: Some(AttributeUsageInfo::new(AttributeTargets::MODULE, false, false)),
};

pub static EXTENSION_MARKER_ATTRIBUTE: EmbeddedTypeDescription = EmbeddedTypeDescription {
    namespace: COMPILER_SERVICES,
    name: "ExtensionMarkerAttribute",
    base: EmbeddedBase::Attribute,
    fields: &[FieldDescription {
        name: "Name",
        ty: PayloadType::String,
    }],
    constructors: &[ConstructorDescription {
        parameters: &[("name", PayloadType::String)],
        initializers: &[(0, FieldInit::Parameter(0))],
    }],
    usage: Some(AttributeUsageInfo::new(
        AttributeTargets::CLASS
            .union(AttributeTargets::STRUCT)
            .union(AttributeTargets::ENUM)
            .union(AttributeTargets::METHOD)
            .union(AttributeTargets::PROPERTY)
            .union(AttributeTargets::FIELD)
            .union(AttributeTargets::EVENT)
            .union(AttributeTargets::INTERFACE)
            .union(AttributeTargets::DELEGATE),
        false,
        false,
    )),
};

/// Template of a single embeddable attribute. `None` unless exactly one
/// flag is set.
pub fn embedded_attribute_description(
    attribute: EmbeddableAttributes,
) -> Option<&'static EmbeddedTypeDescription> {
    let description = match attribute {
        EmbeddableAttributes::EMBEDDED => &EMBEDDED_ATTRIBUTE,
        EmbeddableAttributes::NULLABLE => &NULLABLE_ATTRIBUTE,
        EmbeddableAttributes::NULLABLE_CONTEXT => &NULLABLE_CONTEXT_ATTRIBUTE,
        EmbeddableAttributes::NULLABLE_PUBLIC_ONLY => &NULLABLE_PUBLIC_ONLY_ATTRIBUTE,
        EmbeddableAttributes::NATIVE_INTEGER => &NATIVE_INTEGER_ATTRIBUTE,
        EmbeddableAttributes::SCOPED_REF => &SCOPED_REF_ATTRIBUTE,
        EmbeddableAttributes::REF_SAFETY_RULES => &REF_SAFETY_RULES_ATTRIBUTE,
        EmbeddableAttributes::MEMORY_SAFETY_RULES => &MEMORY_SAFETY_RULES_ATTRIBUTE,
        EmbeddableAttributes::EXTENSION_MARKER => &EXTENSION_MARKER_ATTRIBUTE,
        _ => return None,
    };
    Some(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_flag_has_a_description() {
        for flag in EmbeddableAttributes::all().iter() {
            let description = embedded_attribute_description(flag);
            assert!(description.is_some(), "{flag:?}");
        }
        assert!(embedded_attribute_description(EmbeddableAttributes::empty()).is_none());
        assert!(embedded_attribute_description(
            EmbeddableAttributes::NULLABLE | EmbeddableAttributes::SCOPED_REF
        )
        .is_none());
    }

    #[test]
    fn test_initializers_reference_declared_fields_and_parameters() {
        for flag in EmbeddableAttributes::all().iter() {
            let Some(description) = embedded_attribute_description(flag) else {
                continue;
            };
            for constructor in description.constructors {
                for &(field, init) in constructor.initializers {
                    assert!(field < description.fields.len(), "{}", description.name);
                    if let FieldInit::Parameter(p) | FieldInit::ParameterInArray(p) = init {
                        assert!(p < constructor.parameters.len(), "{}", description.name);
                    }
                }
            }
        }
    }
}
