//! Type parameters.

use std::sync::Arc;

use crate::symbol::upgrade;
use crate::{
    Symbol, SymbolKind, SymbolRef, TypeParameterSymbol, TypeWithAnnotations, VarianceKind,
    WeakSymbolRef,
};

/// Declaration of one type parameter.
#[derive(Clone, Debug, Default)]
pub struct TypeParameterSpec {
    pub name: String,
    pub variance: VarianceKind,
    pub reference_type_constraint: bool,
    pub value_type_constraint: bool,
    pub unmanaged_constraint: bool,
    pub constructor_constraint: bool,
    pub constraint_types: Vec<TypeWithAnnotations>,
}

impl TypeParameterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        TypeParameterSpec {
            name: name.into(),
            ..TypeParameterSpec::default()
        }
    }
}

#[derive(Debug)]
pub struct DeclaredTypeParameter {
    spec: TypeParameterSpec,
    ordinal: usize,
    owner: WeakSymbolRef,
}

impl DeclaredTypeParameter {
    pub fn new(spec: TypeParameterSpec, ordinal: usize, owner: WeakSymbolRef) -> SymbolRef {
        Arc::new(DeclaredTypeParameter {
            spec,
            ordinal,
            owner,
        })
    }
}

impl Symbol for DeclaredTypeParameter {
    fn kind(&self) -> SymbolKind {
        SymbolKind::TypeParameter
    }

    fn name(&self) -> &str {
        &self.spec.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.owner))
    }

    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn as_type_parameter(&self) -> Option<&dyn TypeParameterSymbol> {
        Some(self)
    }
}

impl TypeParameterSymbol for DeclaredTypeParameter {
    fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn variance(&self) -> VarianceKind {
        self.spec.variance
    }

    fn has_reference_type_constraint(&self) -> bool {
        self.spec.reference_type_constraint
    }

    fn has_value_type_constraint(&self) -> bool {
        self.spec.value_type_constraint
    }

    fn has_unmanaged_type_constraint(&self) -> bool {
        self.spec.unmanaged_constraint
    }

    fn has_constructor_constraint(&self) -> bool {
        self.spec.constructor_constraint
    }

    fn constraint_types(&self) -> Vec<TypeWithAnnotations> {
        self.spec.constraint_types.clone()
    }
}
