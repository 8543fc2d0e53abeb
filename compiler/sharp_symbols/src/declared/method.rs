//! Methods.

use std::sync::{Arc, OnceLock};

use sharp_ir::{Location, SyntaxReference};
use sharp_names::RefKind;

use super::{
    DeclaredNamedType, DeclaredParameter, DeclaredTypeParameter, ParameterSpec,
    TypeParameterSpec,
};
use crate::symbol::upgrade;
use crate::synthesized::this_parameter;
use crate::{
    Accessibility, DeclarationModifiers, MethodKind, MethodSymbol, Symbol, SymbolKind, SymbolRef,
    TypeRef, TypeWithAnnotations, WeakSymbolRef,
};

/// Return type and parameters of a method.
#[derive(Clone, Debug)]
pub struct MethodSignature {
    pub return_type: TypeWithAnnotations,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug)]
pub struct DeclaredMethod {
    name: String,
    containing: WeakSymbolRef,
    self_ref: WeakSymbolRef,
    method_kind: MethodKind,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    ref_kind: RefKind,
    return_type: TypeWithAnnotations,
    parameters: Vec<SymbolRef>,
    type_parameters: Vec<SymbolRef>,
    this_parameter: OnceLock<SymbolRef>,
    explicit_implementations: Vec<WeakSymbolRef>,
    associated: Option<WeakSymbolRef>,
    locations: Vec<Location>,
    syntax_references: Vec<SyntaxReference>,
}

impl DeclaredMethod {
    pub fn builder(name: impl Into<String>, method_kind: MethodKind) -> DeclaredMethodBuilder {
        DeclaredMethodBuilder {
            name: name.into(),
            method_kind,
            accessibility: Accessibility::Public,
            modifiers: DeclarationModifiers::empty(),
            ref_kind: RefKind::None,
            return_type: None,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            explicit_implementations: Vec::new(),
            associated: None,
            syntax_references: Vec::new(),
        }
    }
}

/// Builder for [`DeclaredMethod`].
#[derive(Debug)]
#[must_use]
pub struct DeclaredMethodBuilder {
    name: String,
    method_kind: MethodKind,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    ref_kind: RefKind,
    return_type: Option<TypeWithAnnotations>,
    parameters: Vec<ParameterSpec>,
    type_parameters: Vec<TypeParameterSpec>,
    explicit_implementations: Vec<WeakSymbolRef>,
    associated: Option<WeakSymbolRef>,
    syntax_references: Vec<SyntaxReference>,
}

impl DeclaredMethodBuilder {
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn returns(mut self, ty: impl Into<TypeWithAnnotations>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn type_parameter(mut self, spec: TypeParameterSpec) -> Self {
        self.type_parameters.push(spec);
        self
    }

    pub fn implements(mut self, interface_method: &SymbolRef) -> Self {
        self.explicit_implementations
            .push(Arc::downgrade(interface_method));
        self
    }

    pub fn associated_with(mut self, property: &SymbolRef) -> Self {
        self.associated = Some(Arc::downgrade(property));
        self
    }

    pub fn declared_at(mut self, syntax: SyntaxReference) -> Self {
        self.syntax_references.push(syntax);
        self
    }

    /// Build into `containing` with the signature given to the builder.
    ///
    /// A missing return type means `void`, represented as an error type
    /// when `void_type` is `None`.
    pub fn build(
        mut self,
        containing: &Arc<DeclaredNamedType>,
        void_type: Option<TypeRef>,
    ) -> Arc<DeclaredMethod> {
        let return_type = self.return_type.take().unwrap_or_else(|| {
            void_type
                .unwrap_or_else(|| TypeRef::error("System.Void"))
                .into()
        });
        let parameters = std::mem::take(&mut self.parameters);
        self.build_with(containing, move |_| MethodSignature {
            return_type,
            parameters,
        })
    }

    /// Build into `containing`, computing the signature from the method's
    /// own type parameters.
    pub fn build_with(
        self,
        containing: &Arc<DeclaredNamedType>,
        signature: impl FnOnce(&[SymbolRef]) -> MethodSignature,
    ) -> Arc<DeclaredMethod> {
        let owner: SymbolRef = containing.clone();
        let containing_weak = Arc::downgrade(&owner);
        let method = Arc::new_cyclic(|weak: &std::sync::Weak<DeclaredMethod>| {
            let self_ref: WeakSymbolRef = weak.clone();
            let type_parameters: Vec<SymbolRef> = self
                .type_parameters
                .into_iter()
                .enumerate()
                .map(|(ordinal, spec)| {
                    DeclaredTypeParameter::new(spec, ordinal, self_ref.clone())
                })
                .collect();
            let MethodSignature {
                return_type,
                parameters,
            } = signature(&type_parameters);
            let parameters = parameters
                .into_iter()
                .enumerate()
                .map(|(ordinal, spec)| {
                    DeclaredParameter::new(spec, ordinal, self_ref.clone())
                })
                .collect();
            DeclaredMethod {
                name: self.name,
                containing: containing_weak,
                self_ref,
                method_kind: self.method_kind,
                accessibility: self.accessibility,
                modifiers: self.modifiers,
                ref_kind: self.ref_kind,
                return_type,
                parameters,
                type_parameters,
                this_parameter: OnceLock::new(),
                explicit_implementations: self.explicit_implementations,
                associated: self.associated,
                locations: self
                    .syntax_references
                    .iter()
                    .map(SyntaxReference::location)
                    .collect(),
                syntax_references: self.syntax_references,
            }
        });
        containing.add_member(method.clone());
        method
    }
}

impl Symbol for DeclaredMethod {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Method
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
            || self.method_kind == MethodKind::StaticConstructor
    }

    fn is_abstract(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::ABSTRACT)
    }

    fn is_virtual(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::VIRTUAL)
    }

    fn is_override(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::OVERRIDE)
    }

    fn is_sealed(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::SEALED)
    }

    fn is_extern(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::EXTERN)
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

    fn has_special_name(&self) -> bool {
        self.method_kind.is_constructor()
            || matches!(
                self.method_kind,
                MethodKind::PropertyGet | MethodKind::PropertySet
            )
    }

    fn as_method(&self) -> Option<&dyn MethodSymbol> {
        Some(self)
    }
}

impl MethodSymbol for DeclaredMethod {
    fn method_kind(&self) -> MethodKind {
        self.method_kind
    }

    fn return_type(&self) -> TypeWithAnnotations {
        self.return_type.clone()
    }

    fn ref_kind(&self) -> RefKind {
        self.ref_kind
    }

    fn parameters(&self) -> &[SymbolRef] {
        &self.parameters
    }

    fn type_parameters(&self) -> &[SymbolRef] {
        &self.type_parameters
    }

    fn this_parameter(&self) -> Option<SymbolRef> {
        this_parameter(&self.this_parameter, &self.self_ref, self.is_static())
    }

    fn is_async(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::ASYNC)
    }

    fn explicit_interface_implementations(&self) -> Vec<SymbolRef> {
        self.explicit_implementations
            .iter()
            .filter_map(std::sync::Weak::upgrade)
            .collect()
    }

    fn associated_symbol(&self) -> Option<SymbolRef> {
        upgrade(self.associated.as_ref())
    }

    fn generate_debug_info(&self) -> bool {
        true
    }
}
