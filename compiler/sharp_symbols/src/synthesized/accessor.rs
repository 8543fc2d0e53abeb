//! Accessors of auto-implemented properties.

use std::sync::Arc;

use super::{BodyGenerator, SynthesizedMethod};
use crate::declared::ParameterSpec;
use crate::{
    Accessibility, BodyFactory, BoundBlock, DeclarationModifiers, MethodKind, SymbolRef, TypeRef,
    WeakSymbolRef,
};

/// `get_{P}`, returning the backing field.
///
/// Accessors report the property's locations as their own.
pub fn synthesize_getter(
    property: &SymbolRef,
    backing_field: &SymbolRef,
    containing: &WeakSymbolRef,
    accessibility: Accessibility,
) -> Arc<SynthesizedMethod> {
    let ty = property
        .as_property()
        .map_or_else(|| TypeRef::error(property.name()).into(), |p| p.ty());
    SynthesizedMethod::builder(
        format!("get_{}", property.name()),
        MethodKind::PropertyGet,
        ty,
    )
    .accessibility(accessibility)
    .modifiers(static_if(property.is_static()))
    .special_name()
    .associated_with(property)
    .body(GetBackingField {
        field: backing_field.clone(),
    })
    .build(containing)
}

/// `set_{P}(value)`, storing into the backing field.
pub fn synthesize_setter(
    property: &SymbolRef,
    backing_field: &SymbolRef,
    containing: &WeakSymbolRef,
    accessibility: Accessibility,
    void_type: TypeRef,
) -> Arc<SynthesizedMethod> {
    let ty = property
        .as_property()
        .map_or_else(|| TypeRef::error(property.name()).into(), |p| p.ty());
    SynthesizedMethod::builder(
        format!("set_{}", property.name()),
        MethodKind::PropertySet,
        void_type,
    )
    .accessibility(accessibility)
    .modifiers(static_if(property.is_static()))
    .special_name()
    .associated_with(property)
    .parameter(ParameterSpec::new("value", ty))
    .body(SetBackingField {
        field: backing_field.clone(),
    })
    .build(containing)
}

fn static_if(is_static: bool) -> DeclarationModifiers {
    if is_static {
        DeclarationModifiers::STATIC
    } else {
        DeclarationModifiers::empty()
    }
}

/// `return this.<P>k__BackingField;`
#[derive(Debug)]
struct GetBackingField {
    field: SymbolRef,
}

impl BodyGenerator for GetBackingField {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let load = factory.field(self.field.clone());
        Some(factory.block(vec![factory.return_value(load)]))
    }
}

/// `this.<P>k__BackingField = value; return;`
#[derive(Debug)]
struct SetBackingField {
    field: SymbolRef,
}

impl BodyGenerator for SetBackingField {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let store = factory.assign(factory.field(self.field.clone()), factory.parameter(0));
        Some(factory.block(vec![store, factory.return_void()]))
    }
}
