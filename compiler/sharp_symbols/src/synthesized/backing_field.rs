//! Backing storage of auto-implemented properties.

use std::sync::Arc;

use sharp_names::make_backing_field_name;

use super::accessor::{synthesize_getter, synthesize_setter};
use super::SynthesizedField;
use crate::declared::{DeclaredNamedType, DeclaredProperty};
use crate::{
    CompilationContext, DeclarationModifiers, PropertySymbol, SpecialType, Symbol, SymbolRef,
};

/// Members produced for one auto-property.
#[derive(Clone, Debug)]
pub struct AutoPropertyMembers {
    pub backing_field: SymbolRef,
    pub getter: Option<SymbolRef>,
    pub setter: Option<SymbolRef>,
}

/// Give `property` a `<P>k__BackingField` and the requested accessors.
///
/// The field is read-only when there is no setter, and static when the
/// property is. Every new member is added to `containing` and the
/// accessors are attached to the property.
pub fn synthesize_auto_property(
    compilation: &dyn CompilationContext,
    containing: &Arc<DeclaredNamedType>,
    property: &Arc<DeclaredProperty>,
    has_getter: bool,
    has_setter: bool,
) -> AutoPropertyMembers {
    let owner: SymbolRef = containing.clone();
    let owner = Arc::downgrade(&owner);
    let property_symbol: SymbolRef = property.clone();

    let mut modifiers = DeclarationModifiers::empty();
    if property.is_static() {
        modifiers |= DeclarationModifiers::STATIC;
    }
    if !has_setter {
        modifiers |= DeclarationModifiers::READ_ONLY;
    }
    let backing_field = SynthesizedField::new(
        make_backing_field_name(property.name()),
        &owner,
        property.ty(),
    )
    .modifiers(modifiers)
    .associated_with(&property_symbol)
    .into_symbol();
    containing.add_member(backing_field.clone());

    let accessibility = property.declared_accessibility();
    let getter = has_getter.then(|| -> SymbolRef {
        let getter = synthesize_getter(&property_symbol, &backing_field, &owner, accessibility);
        property.set_get_method(getter.clone());
        containing.add_member(getter.clone());
        getter
    });
    let setter = has_setter.then(|| -> SymbolRef {
        let void_type = compilation.special_type_ref(SpecialType::Void);
        let setter =
            synthesize_setter(&property_symbol, &backing_field, &owner, accessibility, void_type);
        property.set_set_method(setter.clone());
        containing.add_member(setter.clone());
        setter
    });
    tracing::debug!(property = property.name(), "synthesized auto-property members");
    AutoPropertyMembers {
        backing_field,
        getter,
        setter,
    }
}
