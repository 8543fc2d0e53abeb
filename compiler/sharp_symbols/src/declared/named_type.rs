//! Named types.

use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use sharp_ir::{Location, SyntaxReference};

use super::{DeclaredNamespace, DeclaredTypeParameter, TypeParameterSpec};
use crate::symbol::upgrade;
use crate::{
    Accessibility, AttributeData, AttributeUsageInfo, DeclarationModifiers, NamedTypeSymbol,
    SpecialType, Symbol, SymbolKind, SymbolRef, TypeKind, TypeRef, WeakSymbolRef,
};

/// A class, struct, interface, delegate or enum.
#[derive(Debug)]
pub struct DeclaredNamedType {
    name: String,
    containing: Option<WeakSymbolRef>,
    type_kind: TypeKind,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    special_type: Option<SpecialType>,
    type_parameters: Vec<SymbolRef>,
    base_type: OnceLock<TypeRef>,
    interfaces: RwLock<Vec<TypeRef>>,
    members: RwLock<Vec<SymbolRef>>,
    attributes: RwLock<Vec<AttributeData>>,
    attribute_usage: Option<AttributeUsageInfo>,
    locations: Vec<Location>,
    syntax_references: Vec<SyntaxReference>,
}

impl DeclaredNamedType {
    pub fn builder(name: impl Into<String>, type_kind: TypeKind) -> DeclaredNamedTypeBuilder {
        DeclaredNamedTypeBuilder {
            name: name.into(),
            type_kind,
            accessibility: Accessibility::Public,
            modifiers: DeclarationModifiers::empty(),
            special_type: None,
            type_parameters: Vec::new(),
            attribute_usage: None,
            locations: Vec::new(),
            syntax_references: Vec::new(),
        }
    }

    /// Set the base type. Only the first call has an effect.
    pub fn set_base_type(&self, base: TypeRef) {
        let _ = self.base_type.set(base);
    }

    pub fn add_interface(&self, interface: TypeRef) {
        self.interfaces.write().push(interface);
    }

    pub fn add_member(&self, member: SymbolRef) {
        self.members.write().push(member);
    }

    pub fn add_attribute(&self, attribute: AttributeData) {
        self.attributes.write().push(attribute);
    }

    /// Reference to this type with its own type parameters as arguments.
    pub fn as_type_ref(self: &Arc<Self>) -> TypeRef {
        let definition: SymbolRef = self.clone();
        if self.type_parameters.is_empty() {
            TypeRef::named(definition)
        } else {
            let arguments = self
                .type_parameters
                .iter()
                .map(|parameter| TypeRef::TypeParameter(parameter.clone()).into())
                .collect();
            TypeRef::constructed(definition, arguments)
        }
    }
}

/// Builder for [`DeclaredNamedType`].
#[derive(Debug)]
#[must_use]
pub struct DeclaredNamedTypeBuilder {
    name: String,
    type_kind: TypeKind,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    special_type: Option<SpecialType>,
    type_parameters: Vec<TypeParameterSpec>,
    attribute_usage: Option<AttributeUsageInfo>,
    locations: Vec<Location>,
    syntax_references: Vec<SyntaxReference>,
}

impl DeclaredNamedTypeBuilder {
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn special_type(mut self, special: SpecialType) -> Self {
        self.special_type = Some(special);
        self
    }

    pub fn type_parameter(mut self, spec: TypeParameterSpec) -> Self {
        self.type_parameters.push(spec);
        self
    }

    pub fn attribute_usage(mut self, usage: AttributeUsageInfo) -> Self {
        self.attribute_usage = Some(usage);
        self
    }

    /// Source location; also records the declaring syntax.
    pub fn declared_at(mut self, syntax: SyntaxReference) -> Self {
        self.locations.push(syntax.location());
        self.syntax_references.push(syntax);
        self
    }

    /// Build as a member of `namespace`.
    pub fn build_in_namespace(self, namespace: &Arc<DeclaredNamespace>) -> Arc<DeclaredNamedType> {
        let container: SymbolRef = namespace.clone();
        let built = self.build(Some(&container));
        namespace.add_member(built.clone());
        built
    }

    /// Build as a nested type of `outer`.
    pub fn build_nested(self, outer: &Arc<DeclaredNamedType>) -> Arc<DeclaredNamedType> {
        let container: SymbolRef = outer.clone();
        let built = self.build(Some(&container));
        outer.add_member(built.clone());
        built
    }

    fn build(self, container: Option<&SymbolRef>) -> Arc<DeclaredNamedType> {
        Arc::new_cyclic(|weak: &std::sync::Weak<DeclaredNamedType>| {
            let owner: WeakSymbolRef = weak.clone();
            let type_parameters = self
                .type_parameters
                .into_iter()
                .enumerate()
                .map(|(ordinal, spec)| DeclaredTypeParameter::new(spec, ordinal, owner.clone()))
                .collect();
            DeclaredNamedType {
                name: self.name,
                containing: container.map(Arc::downgrade),
                type_kind: self.type_kind,
                accessibility: self.accessibility,
                modifiers: self.modifiers,
                special_type: self.special_type,
                type_parameters,
                base_type: OnceLock::new(),
                interfaces: RwLock::new(Vec::new()),
                members: RwLock::new(Vec::new()),
                attributes: RwLock::new(Vec::new()),
                attribute_usage: self.attribute_usage,
                locations: self.locations,
                syntax_references: self.syntax_references,
            }
        })
    }
}

impl Symbol for DeclaredNamedType {
    fn kind(&self) -> SymbolKind {
        SymbolKind::NamedType
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata_name(&self) -> Cow<'_, str> {
        if self.mangle_name() {
            Cow::Owned(format!("{}`{}", self.name, self.type_parameters.len()))
        } else {
            Cow::Borrowed(self.name.as_str())
        }
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(self.containing.as_ref())
    }

    fn declared_accessibility(&self) -> Accessibility {
        self.accessibility
    }

    fn is_static(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::STATIC)
    }

    fn is_abstract(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::ABSTRACT)
            || self.type_kind == TypeKind::Interface
    }

    fn is_sealed(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::SEALED) || self.is_value_type()
    }

    fn locations(&self) -> Vec<Location> {
        self.locations.clone()
    }

    fn declaring_syntax_references(&self) -> Vec<SyntaxReference> {
        self.syntax_references.clone()
    }

    fn is_implicitly_declared(&self) -> bool {
        false
    }

    fn get_attributes(&self) -> Vec<AttributeData> {
        self.attributes.read().clone()
    }

    fn as_named_type(&self) -> Option<&dyn NamedTypeSymbol> {
        Some(self)
    }
}

impl NamedTypeSymbol for DeclaredNamedType {
    fn type_kind(&self) -> TypeKind {
        self.type_kind
    }

    fn type_parameters(&self) -> &[SymbolRef] {
        &self.type_parameters
    }

    fn base_type(&self) -> Option<TypeRef> {
        self.base_type.get().cloned()
    }

    fn interfaces(&self) -> Vec<TypeRef> {
        self.interfaces.read().clone()
    }

    fn members(&self) -> Vec<SymbolRef> {
        self.members.read().clone()
    }

    fn is_value_type(&self) -> bool {
        match self.special_type {
            Some(special) => special.is_value_type(),
            None => matches!(self.type_kind, TypeKind::Struct | TypeKind::Enum),
        }
    }

    fn special_type(&self) -> Option<SpecialType> {
        self.special_type
    }

    fn attribute_usage_info(&self) -> Option<AttributeUsageInfo> {
        self.attribute_usage
    }
}
