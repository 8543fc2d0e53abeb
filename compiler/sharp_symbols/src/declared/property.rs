//! Properties.

use std::sync::{Arc, OnceLock};

use sharp_ir::{Location, SyntaxReference};

use super::DeclaredNamedType;
use crate::symbol::upgrade;
use crate::{
    Accessibility, DeclarationModifiers, PropertySymbol, Symbol, SymbolKind, SymbolRef,
    TypeWithAnnotations, WeakSymbolRef,
};

/// A property. Accessors are attached after construction, since they
/// refer back to the property.
#[derive(Debug)]
pub struct DeclaredProperty {
    name: String,
    containing: WeakSymbolRef,
    ty: TypeWithAnnotations,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    is_auto: bool,
    get_method: OnceLock<SymbolRef>,
    set_method: OnceLock<SymbolRef>,
    syntax: Option<SyntaxReference>,
}

impl DeclaredProperty {
    /// Declare a property in `containing`.
    pub fn new(
        containing: &Arc<DeclaredNamedType>,
        name: impl Into<String>,
        ty: impl Into<TypeWithAnnotations>,
        accessibility: Accessibility,
        modifiers: DeclarationModifiers,
        is_auto: bool,
        syntax: Option<SyntaxReference>,
    ) -> Arc<DeclaredProperty> {
        let owner: SymbolRef = containing.clone();
        let property = Arc::new(DeclaredProperty {
            name: name.into(),
            containing: Arc::downgrade(&owner),
            ty: ty.into(),
            accessibility,
            modifiers,
            is_auto,
            get_method: OnceLock::new(),
            set_method: OnceLock::new(),
            syntax,
        });
        containing.add_member(property.clone());
        property
    }

    /// Attach the getter. Only the first call has an effect.
    pub fn set_get_method(&self, getter: SymbolRef) {
        let _ = self.get_method.set(getter);
    }

    /// Attach the setter. Only the first call has an effect.
    pub fn set_set_method(&self, setter: SymbolRef) {
        let _ = self.set_method.set(setter);
    }
}

impl Symbol for DeclaredProperty {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Property
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.containing))
    }

    fn declared_accessibility(&self) -> Accessibility {
        self.accessibility
    }

    fn is_static(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::STATIC)
    }

    fn is_virtual(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::VIRTUAL)
    }

    fn locations(&self) -> Vec<Location> {
        self.syntax.iter().map(SyntaxReference::location).collect()
    }

    fn declaring_syntax_references(&self) -> Vec<SyntaxReference> {
        self.syntax.iter().copied().collect()
    }

    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn as_property(&self) -> Option<&dyn PropertySymbol> {
        Some(self)
    }
}

impl PropertySymbol for DeclaredProperty {
    fn ty(&self) -> TypeWithAnnotations {
        self.ty.clone()
    }

    fn get_method(&self) -> Option<SymbolRef> {
        self.get_method.get().cloned()
    }

    fn set_method(&self) -> Option<SymbolRef> {
        self.set_method.get().cloned()
    }

    fn is_auto_property(&self) -> bool {
        self.is_auto
    }
}
