//! Compiler-synthesized methods.
//!
//! [`SynthesizedMethod`] covers every method family the compiler invents:
//! constructors of synthesized containers, lambda and local-function
//! bodies, accessors, forwarders, global helpers and entry points. What
//! differs between them is the name, the signature, the metadata flags
//! and the [`BodyGenerator`] that produces the body.

use std::fmt;
use std::sync::{Arc, OnceLock};

use sharp_ir::Location;
use sharp_names::RefKind;

use super::instance_method::this_parameter;
use super::{SynthesizedParameter, SynthesizedTypeParameter};
use crate::declared::{MethodSignature, ParameterSpec};
use crate::symbol::upgrade;
use crate::{
    containing_type, Accessibility, AttributeData, BodyFactory, BoundBlock, DeclarationModifiers,
    MethodImplFlags, MethodKind, MethodSymbol, ModuleEmitContext, Symbol, SymbolKind, SymbolRef,
    TypeMap, TypeWithAnnotations, WeakSymbolRef,
};

/// Produces the body of a synthesized method.
pub trait BodyGenerator: Send + Sync + fmt::Debug {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock>;
}

/// How the method occupies a vtable slot in metadata.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MetadataSlot {
    pub is_virtual: bool,
    pub new_slot: bool,
    pub is_final: bool,
}

impl MetadataSlot {
    /// `virtual newslot final`, required of explicit interface
    /// implementations.
    pub const SEALED_NEW_SLOT: MetadataSlot = MetadataSlot {
        is_virtual: true,
        new_slot: true,
        is_final: true,
    };
}

#[derive(Debug)]
pub struct SynthesizedMethod {
    name: String,
    containing: WeakSymbolRef,
    self_ref: WeakSymbolRef,
    method_kind: MethodKind,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    return_type: TypeWithAnnotations,
    ref_kind: RefKind,
    parameters: Vec<SymbolRef>,
    type_parameters: Vec<SymbolRef>,
    this_parameter: OnceLock<SymbolRef>,
    slot: MetadataSlot,
    impl_flags: MethodImplFlags,
    explicit_implementations: Vec<WeakSymbolRef>,
    associated: Option<WeakSymbolRef>,
    locations: Vec<Location>,
    special_name: bool,
    debugger_hidden: bool,
    generate_debug_info: bool,
    body: Option<Box<dyn BodyGenerator>>,
}

impl SynthesizedMethod {
    /// Start a method returning `return_type`.
    pub fn builder(
        name: impl Into<String>,
        method_kind: MethodKind,
        return_type: impl Into<TypeWithAnnotations>,
    ) -> SynthesizedMethodBuilder {
        SynthesizedMethodBuilder {
            name: name.into(),
            method_kind,
            accessibility: Accessibility::Private,
            modifiers: DeclarationModifiers::empty(),
            return_type: return_type.into(),
            ref_kind: RefKind::None,
            parameters: ParameterSource::Specs(Vec::new()),
            type_parameter_names: Vec::new(),
            renamed_type_parameters: Vec::new(),
            slot: MetadataSlot::default(),
            impl_flags: MethodImplFlags::empty(),
            explicit_implementations: Vec::new(),
            associated: None,
            locations: Vec::new(),
            special_name: false,
            debugger_hidden: false,
            generate_debug_info: true,
            body: None,
        }
    }

    pub fn is_debugger_hidden(&self) -> bool {
        self.debugger_hidden
    }
}

#[derive(Debug)]
enum ParameterSource {
    Specs(Vec<ParameterSpec>),
    /// Copy of another method's parameters through a type map.
    Derived { source: SymbolRef, map: TypeMap },
}

/// Builder for [`SynthesizedMethod`].
#[derive(Debug)]
#[must_use]
pub struct SynthesizedMethodBuilder {
    name: String,
    method_kind: MethodKind,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    return_type: TypeWithAnnotations,
    ref_kind: RefKind,
    parameters: ParameterSource,
    type_parameter_names: Vec<String>,
    renamed_type_parameters: Vec<SymbolRef>,
    slot: MetadataSlot,
    impl_flags: MethodImplFlags,
    explicit_implementations: Vec<WeakSymbolRef>,
    associated: Option<WeakSymbolRef>,
    locations: Vec<Location>,
    special_name: bool,
    debugger_hidden: bool,
    generate_debug_info: bool,
    body: Option<Box<dyn BodyGenerator>>,
}

impl SynthesizedMethodBuilder {
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

    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        match &mut self.parameters {
            ParameterSource::Specs(specs) => specs.push(spec),
            ParameterSource::Derived { .. } => {
                self.parameters = ParameterSource::Specs(vec![spec]);
            }
        }
        self
    }

    /// Copy the parameters of `source`, rewriting their types with `map`.
    pub fn parameters_from(mut self, source: &SymbolRef, map: TypeMap) -> Self {
        self.parameters = ParameterSource::Derived {
            source: source.clone(),
            map,
        };
        self
    }

    /// Declare fresh, unconstrained method type parameters.
    pub fn type_parameters(mut self, names: &[&str]) -> Self {
        self.type_parameter_names = names.iter().map(|&name| name.to_owned()).collect();
        self
    }

    /// Copy the type parameters of `method` onto the new method. Return
    /// and derived parameter types are rewritten to the copies.
    pub fn generic_like(mut self, method: &SymbolRef) -> Self {
        self.renamed_type_parameters = method
            .as_method()
            .map(|method| method.type_parameters().to_vec())
            .unwrap_or_default();
        self
    }

    pub fn metadata_slot(mut self, slot: MetadataSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn impl_flags(mut self, flags: MethodImplFlags) -> Self {
        self.impl_flags = flags;
        self
    }

    pub fn implements(mut self, interface_method: &SymbolRef) -> Self {
        self.explicit_implementations
            .push(Arc::downgrade(interface_method));
        self
    }

    /// Attach to a property or event. The method reports the associated
    /// symbol's locations as its own.
    pub fn associated_with(mut self, symbol: &SymbolRef) -> Self {
        self.associated = Some(Arc::downgrade(symbol));
        self.locations = symbol.locations();
        self
    }

    pub fn special_name(mut self) -> Self {
        self.special_name = true;
        self
    }

    pub fn debugger_hidden(mut self) -> Self {
        self.debugger_hidden = true;
        self
    }

    pub fn without_debug_info(mut self) -> Self {
        self.generate_debug_info = false;
        self
    }

    pub fn body(mut self, generator: impl BodyGenerator + 'static) -> Self {
        self.body = Some(Box::new(generator));
        self
    }

    pub fn build(self, containing: &WeakSymbolRef) -> Arc<SynthesizedMethod> {
        self.build_with(containing, |_, return_type, parameters| MethodSignature {
            return_type,
            parameters,
        })
    }

    /// Build with a signature computed from the method's own type
    /// parameters. The closure receives them together with the return type
    /// and parameter specs given to the builder.
    pub fn build_with(
        self,
        containing: &WeakSymbolRef,
        signature: impl FnOnce(
            &[SymbolRef],
            TypeWithAnnotations,
            Vec<ParameterSpec>,
        ) -> MethodSignature,
    ) -> Arc<SynthesizedMethod> {
        Arc::new_cyclic(|weak: &std::sync::Weak<SynthesizedMethod>| {
            let self_ref: WeakSymbolRef = weak.clone();
            let (rename, type_parameters) = if self.renamed_type_parameters.is_empty() {
                let fresh = self
                    .type_parameter_names
                    .iter()
                    .enumerate()
                    .map(|(ordinal, name)| -> SymbolRef {
                        SynthesizedTypeParameter::new(name.as_str(), ordinal, self_ref.clone())
                    })
                    .collect();
                (TypeMap::empty(), fresh)
            } else {
                TypeMap::alpha_rename(&self.renamed_type_parameters, &self_ref)
            };
            let (return_type, parameters) = match self.parameters {
                ParameterSource::Specs(specs) => {
                    let MethodSignature {
                        return_type,
                        parameters,
                    } = signature(&type_parameters, self.return_type, specs);
                    let parameters = parameters
                        .into_iter()
                        .enumerate()
                        .map(|(ordinal, spec)| {
                            SynthesizedParameter::from_spec(spec, ordinal, self_ref.clone())
                        })
                        .collect();
                    (return_type, parameters)
                }
                ParameterSource::Derived { source, map } => {
                    let map = if rename.is_empty() { map } else { rename.clone() };
                    let parameters = super::derive_parameters(&source, &map, &self_ref);
                    (self.return_type, parameters)
                }
            };
            let return_type = rename.substitute(&return_type);
            SynthesizedMethod {
                name: self.name,
                containing: containing.clone(),
                self_ref,
                method_kind: self.method_kind,
                accessibility: self.accessibility,
                modifiers: self.modifiers,
                return_type,
                ref_kind: self.ref_kind,
                parameters,
                type_parameters,
                this_parameter: OnceLock::new(),
                slot: self.slot,
                impl_flags: self.impl_flags,
                explicit_implementations: self.explicit_implementations,
                associated: self.associated,
                locations: self.locations,
                special_name: self.special_name,
                debugger_hidden: self.debugger_hidden,
                generate_debug_info: self.generate_debug_info,
                body: self.body,
            }
        })
    }
}

impl Symbol for SynthesizedMethod {
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

    fn locations(&self) -> Vec<Location> {
        self.locations.clone()
    }

    fn has_special_name(&self) -> bool {
        self.special_name || self.method_kind.is_constructor()
    }

    fn add_synthesized_attributes(
        &self,
        module: &ModuleEmitContext,
        attributes: &mut Vec<AttributeData>,
    ) {
        let in_synthesized_type = containing_type(self)
            .and_then(|container| container.as_named_type().map(|ty| ty.is_synthesized()))
            .unwrap_or(false);
        if !in_synthesized_type {
            attributes.extend(module.compiler_generated_attribute());
        }
        if self.debugger_hidden {
            attributes.extend(module.debugger_hidden_attribute());
        }
    }

    fn as_method(&self) -> Option<&dyn MethodSymbol> {
        Some(self)
    }
}

impl MethodSymbol for SynthesizedMethod {
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

    fn is_metadata_virtual(&self) -> bool {
        self.slot.is_virtual || self.is_virtual() || self.is_override() || self.is_abstract()
    }

    fn is_metadata_new_slot(&self) -> bool {
        self.slot.new_slot
    }

    fn is_metadata_final(&self) -> bool {
        self.slot.is_final
    }

    fn explicit_interface_implementations(&self) -> Vec<SymbolRef> {
        self.explicit_implementations
            .iter()
            .filter_map(|method| upgrade(Some(method)))
            .collect()
    }

    fn associated_symbol(&self) -> Option<SymbolRef> {
        upgrade(self.associated.as_ref())
    }

    fn impl_flags(&self) -> MethodImplFlags {
        self.impl_flags
    }

    fn generate_debug_info(&self) -> bool {
        self.generate_debug_info
    }

    fn generate_body(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        self.body.as_ref()?.generate(factory)
    }
}
