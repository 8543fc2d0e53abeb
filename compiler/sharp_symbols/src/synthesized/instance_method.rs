//! The implicit `this` parameter.

use std::sync::{Arc, OnceLock};

use sharp_names::RefKind;

use crate::symbol::upgrade;
use crate::{
    containing_type, ParameterSymbol, Symbol, SymbolKind, SymbolRef, TypeRef,
    TypeWithAnnotations, WeakSymbolRef,
};

/// `this` of an instance method.
///
/// The type is read from the method's containing type on each request, so
/// the parameter holds no strong reference back into its container.
#[derive(Debug)]
pub struct ThisParameter {
    method: WeakSymbolRef,
}

impl ThisParameter {
    pub fn new(method: WeakSymbolRef) -> SymbolRef {
        Arc::new(ThisParameter { method })
    }

    fn containing_type(&self) -> Option<SymbolRef> {
        let method = upgrade(Some(&self.method))?;
        containing_type(method.as_ref())
    }
}

/// The shared `this` parameter of an instance method, created on first
/// use. Static methods have none.
///
/// Every caller, on any thread, observes the same `Arc`.
pub(crate) fn this_parameter(
    cell: &OnceLock<SymbolRef>,
    method: &WeakSymbolRef,
    is_static: bool,
) -> Option<SymbolRef> {
    if is_static {
        return None;
    }
    Some(cell.get_or_init(|| ThisParameter::new(method.clone())).clone())
}

impl Symbol for ThisParameter {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Parameter
    }

    fn name(&self) -> &str {
        "this"
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.method))
    }

    fn as_parameter(&self) -> Option<&dyn ParameterSymbol> {
        Some(self)
    }
}

impl ParameterSymbol for ThisParameter {
    /// `this` sits before the first declared parameter.
    fn ordinal(&self) -> usize {
        usize::MAX
    }

    fn ty(&self) -> TypeWithAnnotations {
        match self.containing_type() {
            Some(container) => {
                TypeWithAnnotations::not_annotated(TypeRef::for_definition(container))
            }
            None => TypeWithAnnotations::oblivious(TypeRef::error("this")),
        }
    }

    /// Struct receivers are passed by reference.
    fn ref_kind(&self) -> RefKind {
        let is_value_type = self
            .containing_type()
            .and_then(|container| container.as_named_type().map(|ty| ty.is_value_type()))
            .unwrap_or(false);
        if is_value_type {
            RefKind::Ref
        } else {
            RefKind::None
        }
    }

    fn is_this(&self) -> bool {
        true
    }
}
