//! Types the compiler invents to hold lowered code.
//!
//! A [`SynthesizedContainer`] is immutable once built: its name, type
//! parameters, base type and members are fixed by the builder. When the
//! lowered method is generic, the container gets alpha-renamed copies of
//! the method's type parameters and a [`TypeMap`] from the originals to
//! the copies.

use std::borrow::Cow;
use std::sync::Arc;

use sharp_names::{
    make_delegate_cache_container_field_name, make_delegate_cache_container_type_name,
    make_dynamic_call_site_container_name, make_dynamic_call_site_field_name, DebugId,
};

use super::SynthesizedField;
use crate::symbol::upgrade;
use crate::{
    Accessibility, AttributeData, CompilationContext, DeclarationModifiers, ModuleEmitContext,
    NamedTypeSymbol, SpecialType, Symbol, SymbolKind, SymbolRef, TypeKind, TypeMap, TypeRef,
    WeakSymbolRef,
};

/// Flavors of state machine.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StateMachineKind {
    /// `IEnumerator` iterator; `is_enumerable` when the method returns an
    /// enumerable and the machine is its own enumerator.
    Iterator { is_enumerable: bool },
    Async,
    AsyncIterator,
}

/// What a container was synthesized for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ContainerKind {
    /// `<>c__DisplayClass{mo}_{co}`, a class or a struct.
    LambdaDisplayClass,
    /// `<>c`, holding non-capturing lambdas and their cached delegates.
    StaticLambdaContainer,
    StateMachine(StateMachineKind),
    /// `<>o__{mo}`, holding dynamic call sites.
    DynamicCallSiteContainer,
    /// `<{method}>O__{mo}_{owner}`, caching method-group delegates.
    DelegateCacheContainer,
}

/// Everything that shapes a container except its members.
#[derive(Debug)]
pub struct ContainerSpec {
    pub name: String,
    pub containing: SymbolRef,
    pub kind: ContainerKind,
    pub type_kind: TypeKind,
    pub accessibility: Accessibility,
    pub modifiers: DeclarationModifiers,
    pub base_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    /// Type parameters of the lowered method, copied onto the container.
    pub type_parameters_from: Vec<SymbolRef>,
}

impl ContainerSpec {
    /// A private sealed class deriving from `object`.
    pub fn class(
        name: impl Into<String>,
        containing: &SymbolRef,
        kind: ContainerKind,
        compilation: &dyn CompilationContext,
    ) -> Self {
        ContainerSpec {
            name: name.into(),
            containing: containing.clone(),
            kind,
            type_kind: TypeKind::Class,
            accessibility: Accessibility::Private,
            modifiers: DeclarationModifiers::SEALED,
            base_type: Some(compilation.special_type_ref(SpecialType::Object)),
            interfaces: Vec::new(),
            type_parameters_from: Vec::new(),
        }
    }

    /// A private struct deriving from `System.ValueType`.
    pub fn structure(
        name: impl Into<String>,
        containing: &SymbolRef,
        kind: ContainerKind,
        compilation: &dyn CompilationContext,
    ) -> Self {
        ContainerSpec {
            type_kind: TypeKind::Struct,
            base_type: Some(compilation.special_type_ref(SpecialType::ValueType)),
            ..ContainerSpec::class(name, containing, kind, compilation)
        }
    }

    #[must_use]
    pub fn generic_over(mut self, type_parameters: &[SymbolRef]) -> Self {
        self.type_parameters_from = type_parameters.to_vec();
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }
}

/// What member factories see while a container is being built.
pub struct ContainerScope<'a> {
    /// Handle members use to point at the container.
    pub owner: &'a WeakSymbolRef,
    /// Substitution from the lowered method's type parameters to the
    /// container's.
    pub type_map: &'a TypeMap,
    pub type_parameters: &'a [SymbolRef],
}

#[derive(Debug)]
pub struct SynthesizedContainer {
    name: String,
    containing: WeakSymbolRef,
    kind: ContainerKind,
    type_kind: TypeKind,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    type_parameters: Vec<SymbolRef>,
    type_map: TypeMap,
    base_type: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    members: Vec<SymbolRef>,
}

impl SynthesizedContainer {
    /// Build a container; `populate` creates its members.
    pub fn build(
        spec: ContainerSpec,
        populate: impl FnOnce(&ContainerScope<'_>) -> Vec<SymbolRef>,
    ) -> Arc<Self> {
        let container = Arc::new_cyclic(|weak: &std::sync::Weak<SynthesizedContainer>| {
            let owner: WeakSymbolRef = weak.clone();
            let (type_map, type_parameters) = if spec.type_parameters_from.is_empty() {
                (TypeMap::empty(), Vec::new())
            } else {
                TypeMap::alpha_rename(&spec.type_parameters_from, &owner)
            };
            let members = populate(&ContainerScope {
                owner: &owner,
                type_map: &type_map,
                type_parameters: &type_parameters,
            });
            SynthesizedContainer {
                name: spec.name,
                containing: Arc::downgrade(&spec.containing),
                kind: spec.kind,
                type_kind: spec.type_kind,
                accessibility: spec.accessibility,
                modifiers: spec.modifiers,
                type_parameters,
                type_map,
                base_type: spec.base_type,
                interfaces: spec.interfaces,
                members,
            }
        });
        tracing::debug!(
            name = %container.name,
            kind = ?container.kind,
            members = container.members.len(),
            "synthesized container"
        );
        container
    }

    pub fn container_kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    /// The instance constructor, if the container has one.
    pub fn constructor(&self) -> Option<SymbolRef> {
        self.instance_constructors().into_iter().next()
    }

    /// First member named `name`.
    pub fn member(&self, name: &str) -> Option<SymbolRef> {
        self.members
            .iter()
            .find(|member| member.name() == name)
            .cloned()
    }
}

impl Symbol for SynthesizedContainer {
    fn kind(&self) -> SymbolKind {
        SymbolKind::NamedType
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata_name(&self) -> Cow<'_, str> {
        if self.type_parameters.is_empty() {
            Cow::Borrowed(self.name.as_str())
        } else {
            Cow::Owned(format!("{}`{}", self.name, self.type_parameters.len()))
        }
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

    /// Abstract iff there is no constructor and the type is not a value
    /// type. Static containers end up `abstract sealed`.
    fn is_abstract(&self) -> bool {
        self.constructor().is_none() && !self.is_value_type()
    }

    fn is_sealed(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::SEALED) || self.is_value_type()
    }

    fn add_synthesized_attributes(
        &self,
        module: &ModuleEmitContext,
        attributes: &mut Vec<AttributeData>,
    ) {
        attributes.extend(module.compiler_generated_attribute());
    }

    fn as_named_type(&self) -> Option<&dyn NamedTypeSymbol> {
        Some(self)
    }
}

impl NamedTypeSymbol for SynthesizedContainer {
    fn type_kind(&self) -> TypeKind {
        self.type_kind
    }

    fn type_parameters(&self) -> &[SymbolRef] {
        &self.type_parameters
    }

    fn base_type(&self) -> Option<TypeRef> {
        self.base_type.clone()
    }

    fn interfaces(&self) -> Vec<TypeRef> {
        self.interfaces.clone()
    }

    fn members(&self) -> Vec<SymbolRef> {
        self.members.clone()
    }

    fn is_synthesized(&self) -> bool {
        true
    }
}

/// `<>o__{mo}`: a static class holding one `<>p__{i}` call-site field per
/// dynamic operation in a method.
///
/// `call_site_types` are written in terms of the method's type
/// parameters and are rewritten onto the container's.
pub fn synthesize_dynamic_call_site_container(
    compilation: &dyn CompilationContext,
    containing_type: &SymbolRef,
    method: &SymbolRef,
    method_id: Option<DebugId>,
    local_function_ordinal: Option<u32>,
    call_site_types: &[TypeRef],
) -> Arc<SynthesizedContainer> {
    let type_parameters = method
        .as_method()
        .map(|method| method.type_parameters().to_vec())
        .unwrap_or_default();
    let spec = ContainerSpec::class(
        make_dynamic_call_site_container_name(method_id, local_function_ordinal),
        containing_type,
        ContainerKind::DynamicCallSiteContainer,
        compilation,
    )
    .with_modifiers(DeclarationModifiers::STATIC)
    .generic_over(&type_parameters);
    SynthesizedContainer::build(spec, |scope| {
        call_site_types
            .iter()
            .enumerate()
            .map(|(id, ty)| {
                let id = u32::try_from(id).unwrap_or(u32::MAX);
                SynthesizedField::new(
                    make_dynamic_call_site_field_name(id),
                    scope.owner,
                    scope.type_map.substitute_type(ty),
                )
                .accessibility(Accessibility::Public)
                .modifiers(DeclarationModifiers::STATIC)
                .into_symbol()
            })
            .collect()
    })
}

/// One cached method-group conversion.
#[derive(Clone, Debug)]
pub struct DelegateCacheEntry {
    pub target_method: String,
    pub delegate_type: TypeRef,
}

/// Where a delegate cache container is scoped and named.
#[derive(Clone, Debug, Default)]
pub struct DelegateCacheOwner {
    pub generation: u32,
    pub method_name: Option<String>,
    pub method_ordinal: Option<u32>,
    pub owner_unique_id: Option<u32>,
}

/// `<{method}>O__{mo}_{owner}`: a static class with one static field per
/// cached method-group delegate, named `<{id}>__{target}`.
pub fn synthesize_delegate_cache_container(
    compilation: &dyn CompilationContext,
    containing_type: &SymbolRef,
    owner: &DelegateCacheOwner,
    type_parameters: &[SymbolRef],
    entries: &[DelegateCacheEntry],
) -> Arc<SynthesizedContainer> {
    let name = make_delegate_cache_container_type_name(
        owner.generation,
        owner.method_name.as_deref(),
        owner.method_ordinal,
        owner.owner_unique_id,
    );
    let spec = ContainerSpec::class(
        name,
        containing_type,
        ContainerKind::DelegateCacheContainer,
        compilation,
    )
    .with_modifiers(DeclarationModifiers::STATIC)
    .generic_over(type_parameters);
    SynthesizedContainer::build(spec, |scope| {
        entries
            .iter()
            .enumerate()
            .map(|(id, entry)| {
                let id = u32::try_from(id).unwrap_or(u32::MAX);
                SynthesizedField::new(
                    make_delegate_cache_container_field_name(id, &entry.target_method),
                    scope.owner,
                    scope.type_map.substitute_type(&entry.delegate_type),
                )
                .accessibility(Accessibility::Public)
                .modifiers(DeclarationModifiers::STATIC)
                .into_symbol()
            })
            .collect()
    })
}

#[cfg(test)]
mod tests;
