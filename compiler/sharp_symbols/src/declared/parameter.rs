//! Parameters.

use std::sync::Arc;

use sharp_ir::Location;
use sharp_names::RefKind;

use crate::symbol::upgrade;
use crate::{
    ConstantValue, ParameterSymbol, ScopedKind, Symbol, SymbolKind, SymbolRef,
    TypeWithAnnotations, WeakSymbolRef,
};

/// Declaration of one parameter.
#[derive(Clone, Debug)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TypeWithAnnotations,
    pub ref_kind: RefKind,
    pub scoped: ScopedKind,
    pub default_value: Option<ConstantValue>,
    pub is_params: bool,
    pub location: Location,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeWithAnnotations>) -> Self {
        ParameterSpec {
            name: name.into(),
            ty: ty.into(),
            ref_kind: RefKind::None,
            scoped: ScopedKind::None,
            default_value: None,
            is_params: false,
            location: Location::None,
        }
    }

    #[must_use]
    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: ConstantValue) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn scoped(mut self, scoped: ScopedKind) -> Self {
        self.scoped = scoped;
        self
    }

    #[must_use]
    pub fn params(mut self) -> Self {
        self.is_params = true;
        self
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

#[derive(Debug)]
pub struct DeclaredParameter {
    spec: ParameterSpec,
    ordinal: usize,
    owner: WeakSymbolRef,
}

impl DeclaredParameter {
    pub fn new(spec: ParameterSpec, ordinal: usize, owner: WeakSymbolRef) -> SymbolRef {
        Arc::new(DeclaredParameter {
            spec,
            ordinal,
            owner,
        })
    }
}

impl Symbol for DeclaredParameter {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Parameter
    }

    fn name(&self) -> &str {
        &self.spec.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.owner))
    }

    fn locations(&self) -> Vec<Location> {
        if self.spec.location.is_in_source() {
            vec![self.spec.location]
        } else {
            Vec::new()
        }
    }

    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn as_parameter(&self) -> Option<&dyn ParameterSymbol> {
        Some(self)
    }
}

impl ParameterSymbol for DeclaredParameter {
    fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn ty(&self) -> TypeWithAnnotations {
        self.spec.ty.clone()
    }

    fn ref_kind(&self) -> RefKind {
        self.spec.ref_kind
    }

    fn scoped_kind(&self) -> ScopedKind {
        self.spec.scoped
    }

    fn explicit_default_value(&self) -> Option<ConstantValue> {
        self.spec.default_value.clone()
    }

    fn is_params(&self) -> bool {
        self.spec.is_params
    }
}
