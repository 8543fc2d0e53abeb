//! Parameters of synthesized methods.

use std::sync::Arc;

use sharp_names::RefKind;

use crate::declared::ParameterSpec;
use crate::symbol::upgrade;
use crate::{
    AttributeData, ConstantValue, ModuleEmitContext, ParameterSymbol, ScopedKind, Symbol,
    SymbolKind, SymbolRef, TypeMap, TypeWithAnnotations, WeakSymbolRef,
};

/// A parameter with no declaring syntax.
#[derive(Debug)]
pub struct SynthesizedParameter {
    name: String,
    owner: WeakSymbolRef,
    ordinal: usize,
    ty: TypeWithAnnotations,
    ref_kind: RefKind,
    scoped: ScopedKind,
    default_value: Option<ConstantValue>,
    is_params: bool,
}

impl SynthesizedParameter {
    /// Parameter described by `spec`. The spec's location is dropped.
    pub fn from_spec(spec: ParameterSpec, ordinal: usize, owner: WeakSymbolRef) -> SymbolRef {
        Arc::new(SynthesizedParameter {
            name: spec.name,
            owner,
            ordinal,
            ty: spec.ty,
            ref_kind: spec.ref_kind,
            scoped: spec.scoped,
            default_value: spec.default_value,
            is_params: spec.is_params,
        })
    }

    /// Copy of `source` on a new owner, with its type rewritten by `map`.
    pub fn copy_of(
        source: &dyn ParameterSymbol,
        map: &TypeMap,
        owner: WeakSymbolRef,
    ) -> SymbolRef {
        Arc::new(SynthesizedParameter {
            name: source.name().to_owned(),
            owner,
            ordinal: source.ordinal(),
            ty: map.substitute(&source.ty()),
            ref_kind: source.ref_kind(),
            scoped: source.scoped_kind(),
            default_value: source.explicit_default_value(),
            is_params: source.is_params(),
        })
    }
}

/// Copy every parameter of `source` onto `owner`.
///
/// Ordinal, ref kind, default value, name, scoped-ness and params-ness
/// carry over; types go through `map`.
pub fn derive_parameters(
    source: &SymbolRef,
    map: &TypeMap,
    owner: &WeakSymbolRef,
) -> Vec<SymbolRef> {
    let Some(method) = source.as_method() else {
        return Vec::new();
    };
    method
        .parameters()
        .iter()
        .filter_map(|parameter| parameter.as_parameter())
        .map(|parameter| SynthesizedParameter::copy_of(parameter, map, owner.clone()))
        .collect()
}

impl Symbol for SynthesizedParameter {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Parameter
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.owner))
    }

    fn add_synthesized_attributes(
        &self,
        module: &ModuleEmitContext,
        attributes: &mut Vec<AttributeData>,
    ) {
        module.add_type_attributes(&self.ty, attributes);
        if self.scoped != ScopedKind::None {
            attributes.extend(module.scoped_ref_attribute());
        }
    }

    fn as_parameter(&self) -> Option<&dyn ParameterSymbol> {
        Some(self)
    }
}

impl ParameterSymbol for SynthesizedParameter {
    fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn ty(&self) -> TypeWithAnnotations {
        self.ty.clone()
    }

    fn ref_kind(&self) -> RefKind {
        self.ref_kind
    }

    fn scoped_kind(&self) -> ScopedKind {
        self.scoped
    }

    fn explicit_default_value(&self) -> Option<ConstantValue> {
        self.default_value.clone()
    }

    fn is_params(&self) -> bool {
        self.is_params
    }
}
