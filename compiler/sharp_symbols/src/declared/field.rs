//! Fields.

use std::sync::Arc;

use sharp_ir::Location;

use super::DeclaredNamedType;
use crate::symbol::upgrade;
use crate::{
    Accessibility, ConstantValue, DeclarationModifiers, FieldSymbol, Symbol, SymbolKind,
    SymbolRef, TypeWithAnnotations, WeakSymbolRef,
};

#[derive(Debug)]
pub struct DeclaredField {
    name: String,
    containing: WeakSymbolRef,
    ty: TypeWithAnnotations,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    constant: Option<ConstantValue>,
    location: Location,
}

impl DeclaredField {
    pub fn builder(
        name: impl Into<String>,
        ty: impl Into<TypeWithAnnotations>,
    ) -> DeclaredFieldBuilder {
        DeclaredFieldBuilder {
            name: name.into(),
            ty: ty.into(),
            accessibility: Accessibility::Private,
            modifiers: DeclarationModifiers::empty(),
            constant: None,
            location: Location::None,
        }
    }
}

/// Builder for [`DeclaredField`].
#[derive(Debug)]
#[must_use]
pub struct DeclaredFieldBuilder {
    name: String,
    ty: TypeWithAnnotations,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    constant: Option<ConstantValue>,
    location: Location,
}

impl DeclaredFieldBuilder {
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Make the field a constant.
    pub fn constant(mut self, value: ConstantValue) -> Self {
        self.modifiers |= DeclarationModifiers::CONST | DeclarationModifiers::STATIC;
        self.constant = Some(value);
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn build(self, containing: &Arc<DeclaredNamedType>) -> Arc<DeclaredField> {
        let owner: SymbolRef = containing.clone();
        let field = Arc::new(DeclaredField {
            name: self.name,
            containing: Arc::downgrade(&owner),
            ty: self.ty,
            accessibility: self.accessibility,
            modifiers: self.modifiers,
            constant: self.constant,
            location: self.location,
        });
        containing.add_member(field.clone());
        field
    }
}

impl Symbol for DeclaredField {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Field
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

    fn locations(&self) -> Vec<Location> {
        if self.location.is_in_source() {
            vec![self.location]
        } else {
            Vec::new()
        }
    }

    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn as_field(&self) -> Option<&dyn FieldSymbol> {
        Some(self)
    }
}

impl FieldSymbol for DeclaredField {
    fn ty(&self) -> TypeWithAnnotations {
        self.ty.clone()
    }

    fn is_read_only(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::READ_ONLY)
    }

    fn is_const(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::CONST)
    }

    fn constant_value(&self) -> Option<ConstantValue> {
        self.constant.clone()
    }
}
