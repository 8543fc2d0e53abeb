//! Type parameters owned by synthesized containers and methods.

use std::sync::{Arc, OnceLock};

use crate::symbol::upgrade;
use crate::{
    Symbol, SymbolKind, SymbolRef, TypeParameterSymbol, TypeWithAnnotations, VarianceKind,
    WeakSymbolRef,
};

/// A type parameter invented by the compiler, usually an alpha-renamed
/// copy of a user method's type parameter.
#[derive(Debug)]
pub struct SynthesizedTypeParameter {
    name: String,
    owner: WeakSymbolRef,
    ordinal: usize,
    /// The type parameter this one was renamed from.
    original: Option<SymbolRef>,
    reference_type_constraint: bool,
    value_type_constraint: bool,
    unmanaged_constraint: bool,
    constructor_constraint: bool,
    /// Set once, after the substitution that maps into this parameter
    /// exists.
    constraint_types: OnceLock<Vec<TypeWithAnnotations>>,
}

impl SynthesizedTypeParameter {
    /// Unconstrained type parameter `name`.
    pub fn new(name: impl Into<String>, ordinal: usize, owner: WeakSymbolRef) -> Arc<Self> {
        Arc::new(SynthesizedTypeParameter {
            name: name.into(),
            owner,
            ordinal,
            original: None,
            reference_type_constraint: false,
            value_type_constraint: false,
            unmanaged_constraint: false,
            constructor_constraint: false,
            constraint_types: OnceLock::new(),
        })
    }

    /// Copy of `original` owned by `owner`. Constraint types stay unset
    /// until [`Self::set_constraint_types`].
    pub fn renamed_from(original: &SymbolRef, ordinal: usize, owner: WeakSymbolRef) -> Arc<Self> {
        let source = original.as_type_parameter();
        Arc::new(SynthesizedTypeParameter {
            name: original.name().to_owned(),
            owner,
            ordinal,
            original: Some(original.clone()),
            reference_type_constraint: source.is_some_and(|p| p.has_reference_type_constraint()),
            value_type_constraint: source.is_some_and(|p| p.has_value_type_constraint()),
            unmanaged_constraint: source.is_some_and(|p| p.has_unmanaged_type_constraint()),
            constructor_constraint: source.is_some_and(|p| p.has_constructor_constraint()),
            constraint_types: OnceLock::new(),
        })
    }

    /// Publish the substituted constraint types. Later calls are ignored.
    pub fn set_constraint_types(&self, constraint_types: Vec<TypeWithAnnotations>) {
        let _ = self.constraint_types.set(constraint_types);
    }

    pub fn original(&self) -> Option<&SymbolRef> {
        self.original.as_ref()
    }
}

impl Symbol for SynthesizedTypeParameter {
    fn kind(&self) -> SymbolKind {
        SymbolKind::TypeParameter
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.owner))
    }

    fn as_type_parameter(&self) -> Option<&dyn TypeParameterSymbol> {
        Some(self)
    }
}

impl TypeParameterSymbol for SynthesizedTypeParameter {
    fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn variance(&self) -> VarianceKind {
        VarianceKind::None
    }

    fn has_reference_type_constraint(&self) -> bool {
        self.reference_type_constraint
    }

    fn has_value_type_constraint(&self) -> bool {
        self.value_type_constraint
    }

    fn has_unmanaged_type_constraint(&self) -> bool {
        self.unmanaged_constraint
    }

    fn has_constructor_constraint(&self) -> bool {
        self.constructor_constraint
    }

    fn constraint_types(&self) -> Vec<TypeWithAnnotations> {
        self.constraint_types.get().cloned().unwrap_or_default()
    }
}
