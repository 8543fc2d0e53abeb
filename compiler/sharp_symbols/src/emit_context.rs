//! Per-module state shared by everything that emits synthesized symbols.
//!
//! A [`ModuleEmitContext`] owns the module's `<PrivateImplementationDetails>`,
//! its synthesized delegate types and the attribute classes it embeds. It
//! also decides which attribute constructor an annotation binds to: the
//! module's embedded copy when the attribute is embedded, the core
//! library's otherwise.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use sharp_names::{DebugId, RefKindVector};

use crate::synthesized::attributes::embedded_attribute_description;
use crate::synthesized::{
    DelegateShape, GlobalHelper, PrivateImplementationDetails, SynthesizedDelegate,
    SynthesizedDelegateCache, SynthesizedEmbeddedAttribute,
};
use crate::{
    AttributeData, CancellationToken, CompilationContext, ConstantValue, EmbeddableAttributes,
    NamedTypeSymbol, Symbol, SymbolRef, SynthesisError, TypeWithAnnotations, TypedConstant,
    WellKnownMember,
};

/// Module-level emission settings.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EmitOptions {
    pub module_name: String,
    /// Module version id, written into the helper container's name of a
    /// net module.
    pub module_version_id: Option<String>,
    pub is_net_module: bool,
    /// Default nullable annotation byte of the module's members. Types
    /// whose annotations all equal it need no `NullableAttribute`.
    pub nullable_context: Option<u8>,
    pub emit_nullable_public_only: bool,
    /// Edit-and-continue generation, stamped into generated names.
    pub generation: u32,
    /// Attributes the module must define itself.
    pub needs_embedded: EmbeddableAttributes,
    /// Version for `[module: RefSafetyRules]`, if the module opts in.
    pub ref_safety_rules_version: Option<i32>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            module_name: String::from("module"),
            module_version_id: None,
            is_net_module: false,
            nullable_context: None,
            emit_nullable_public_only: false,
            generation: 0,
            needs_embedded: EmbeddableAttributes::empty(),
            ref_safety_rules_version: None,
        }
    }
}

pub struct ModuleEmitContext {
    compilation: Arc<dyn CompilationContext>,
    options: EmitOptions,
    private_implementation: Arc<PrivateImplementationDetails>,
    delegates: SynthesizedDelegateCache,
    embedded: DashMap<EmbeddableAttributes, Arc<SynthesizedEmbeddedAttribute>>,
    cancel: CancellationToken,
}

impl fmt::Debug for ModuleEmitContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleEmitContext")
            .field("assembly", &self.compilation.assembly_name())
            .field("options", &self.options)
            .field("delegates", &self.delegates.len())
            .field("embedded", &self.embedded.len())
            .finish_non_exhaustive()
    }
}

impl ModuleEmitContext {
    pub fn new(compilation: Arc<dyn CompilationContext>, options: EmitOptions) -> Self {
        let mvid = options
            .module_version_id
            .as_deref()
            .filter(|_| options.is_net_module);
        let private_implementation = PrivateImplementationDetails::new(&*compilation, mvid);
        ModuleEmitContext {
            compilation,
            options,
            private_implementation,
            delegates: SynthesizedDelegateCache::new(),
            embedded: DashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn compilation(&self) -> &dyn CompilationContext {
        &*self.compilation
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Debug id of the `ordinal`-th entity in this module's generation.
    pub fn debug_id(&self, ordinal: u32) -> DebugId {
        DebugId::new(ordinal, self.options.generation)
    }

    /// Delegate shape stamped with this module's generation.
    pub fn delegate_shape(
        &self,
        parameter_count: usize,
        ref_kinds: RefKindVector,
        returns_void: bool,
    ) -> Result<DelegateShape, SynthesisError> {
        DelegateShape::new(
            parameter_count,
            ref_kinds,
            returns_void,
            self.options.generation,
        )
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn private_implementation_details(&self) -> &Arc<PrivateImplementationDetails> {
        &self.private_implementation
    }

    /// Global helper `helper`, added to `<PrivateImplementationDetails>` on
    /// first request.
    pub fn global_helper(&self, helper: GlobalHelper) -> Result<SymbolRef, SynthesisError> {
        self.private_implementation
            .get_or_add_helper(&*self.compilation, helper)
    }

    pub fn delegate_cache(&self) -> &SynthesizedDelegateCache {
        &self.delegates
    }

    /// The module's delegate type for `shape`.
    pub fn synthesized_delegate(&self, shape: &DelegateShape) -> Arc<SynthesizedDelegate> {
        self.delegates.get_or_add(&*self.compilation, shape)
    }

    /// Attributes the module embeds. Any embedded attribute implies
    /// `EmbeddedAttribute`.
    pub fn embedded_set(&self) -> EmbeddableAttributes {
        if self.options.needs_embedded.is_empty() {
            EmbeddableAttributes::empty()
        } else {
            self.options.needs_embedded | EmbeddableAttributes::EMBEDDED
        }
    }

    /// The module's own copy of `attribute`, or `None` when the core
    /// library's is used.
    pub fn embedded_attribute(
        &self,
        attribute: EmbeddableAttributes,
    ) -> Option<Arc<SynthesizedEmbeddedAttribute>> {
        if !self.embedded_set().contains(attribute) {
            return None;
        }
        let description = embedded_attribute_description(attribute)?;
        let existing = self.embedded.get(&attribute).map(|entry| Arc::clone(entry.value()));
        let embedded = match existing {
            Some(embedded) => embedded,
            None => {
                let entry = self.embedded.entry(attribute).or_insert_with(|| {
                    tracing::debug!(name = description.name, "embedding attribute");
                    SynthesizedEmbeddedAttribute::new(&*self.compilation, description)
                });
                Arc::clone(entry.value())
            }
        };
        // Completion happens outside the map so that lookups from other
        // threads are never blocked behind it.
        if let Err(error) = embedded.force_complete(&*self.compilation, &self.cancel) {
            tracing::debug!(%error, name = description.name, "embedded attribute incomplete");
        }
        Some(embedded)
    }

    /// Every attribute the module embeds, ordered by name.
    pub fn embedded_attributes(&self) -> Vec<Arc<SynthesizedEmbeddedAttribute>> {
        let mut attributes: Vec<_> = self
            .embedded_set()
            .iter()
            .filter_map(|attribute| self.embedded_attribute(attribute))
            .collect();
        attributes.sort_by(|a, b| a.name().cmp(b.name()));
        attributes
    }

    fn attribute_constructor(&self, member: WellKnownMember, required: bool) -> Option<SymbolRef> {
        if let Some((attribute, ordinal)) = embedded_constructor(member) {
            if let Some(embedded) = self.embedded_attribute(attribute) {
                return embedded.instance_constructors().into_iter().nth(ordinal);
            }
        }
        if required {
            self.compilation.require_well_known_member(member).ok()
        } else {
            self.compilation.well_known_member(member)
        }
    }

    fn attribute(
        &self,
        member: WellKnownMember,
        arguments: Vec<TypedConstant>,
        required: bool,
    ) -> Option<AttributeData> {
        self.attribute_constructor(member, required)
            .map(|constructor| AttributeData::new(constructor, arguments))
    }

    /// `[CompilerGenerated]`, omitted silently when the core library lacks
    /// it.
    pub fn compiler_generated_attribute(&self) -> Option<AttributeData> {
        self.attribute(WellKnownMember::CompilerGeneratedAttributeCtor, Vec::new(), false)
    }

    pub fn debugger_hidden_attribute(&self) -> Option<AttributeData> {
        self.attribute(WellKnownMember::DebuggerHiddenAttributeCtor, Vec::new(), false)
    }

    /// `[Embedded]`, carried by every embedded attribute class.
    pub fn embedded_marker_attribute(&self) -> Option<AttributeData> {
        self.attribute(WellKnownMember::EmbeddedAttributeCtor, Vec::new(), true)
    }

    pub fn scoped_ref_attribute(&self) -> Option<AttributeData> {
        self.attribute(WellKnownMember::ScopedRefAttributeCtor, Vec::new(), true)
    }

    /// `[NullableContext(flag)]`.
    pub fn nullable_context_attribute(&self, flag: u8) -> Option<AttributeData> {
        self.attribute(
            WellKnownMember::NullableContextAttributeCtor,
            vec![ConstantValue::Byte(flag).into()],
            true,
        )
    }

    /// Attributes describing what the metadata form of `ty` loses:
    /// `dynamic`, native integers, tuple element names and nullable
    /// annotations. Each is added only when the type needs it.
    pub fn add_type_attributes(
        &self,
        ty: &TypeWithAnnotations,
        attributes: &mut Vec<AttributeData>,
    ) {
        let inner = &ty.ty;
        if inner.contains_dynamic() {
            let flags = inner.dynamic_transform_flags();
            attributes.extend(if flags == [true] {
                self.attribute(WellKnownMember::DynamicAttributeCtor, Vec::new(), true)
            } else {
                self.attribute(
                    WellKnownMember::DynamicAttributeCtorTransformFlags,
                    vec![TypedConstant::bool_array(&flags)],
                    true,
                )
            });
        }
        if inner.contains_native_integer() {
            let flags = inner.native_integer_transform_flags();
            attributes.extend(if flags == [true] {
                self.attribute(WellKnownMember::NativeIntegerAttributeCtor, Vec::new(), true)
            } else {
                self.attribute(
                    WellKnownMember::NativeIntegerAttributeCtorTransformFlags,
                    vec![TypedConstant::bool_array(&flags)],
                    true,
                )
            });
        }
        if inner.contains_tuple_names() {
            attributes.extend(self.attribute(
                WellKnownMember::TupleElementNamesAttributeCtorTransformNames,
                vec![TypedConstant::string_array(&inner.tuple_element_names())],
                true,
            ));
        }
        if ty.needs_nullable_attribute() {
            let flags = ty.nullable_transform_flags();
            let uniform = flags
                .first()
                .copied()
                .filter(|first| flags.iter().all(|flag| flag == first));
            match uniform {
                Some(flag) if Some(flag) == self.options.nullable_context => {}
                Some(flag) => attributes.extend(self.attribute(
                    WellKnownMember::NullableAttributeCtorByte,
                    vec![ConstantValue::Byte(flag).into()],
                    true,
                )),
                None => attributes.extend(self.attribute(
                    WellKnownMember::NullableAttributeCtorTransformFlags,
                    vec![TypedConstant::byte_array(&flags)],
                    true,
                )),
            }
        }
    }

    /// `[module: ...]` attributes the module carries.
    pub fn module_attributes(&self) -> Vec<AttributeData> {
        let mut attributes = Vec::new();
        if self.options.emit_nullable_public_only {
            attributes.extend(self.attribute(
                WellKnownMember::NullablePublicOnlyAttributeCtor,
                vec![ConstantValue::Bool(false).into()],
                true,
            ));
        }
        if let Some(version) = self.options.ref_safety_rules_version {
            attributes.extend(self.attribute(
                WellKnownMember::RefSafetyRulesAttributeCtor,
                vec![ConstantValue::Int32(version).into()],
                true,
            ));
        }
        attributes
    }

    /// Attributes the module adds to `symbol` on emission.
    pub fn synthesized_attributes(&self, symbol: &dyn Symbol) -> Vec<AttributeData> {
        let mut attributes = Vec::new();
        symbol.add_synthesized_attributes(self, &mut attributes);
        attributes
    }
}

/// Embeddable attribute and constructor ordinal that `member` binds to
/// when the module embeds the attribute.
fn embedded_constructor(member: WellKnownMember) -> Option<(EmbeddableAttributes, usize)> {
    use EmbeddableAttributes as E;
    use WellKnownMember as M;
    let target = match member {
        M::EmbeddedAttributeCtor => (E::EMBEDDED, 0),
        M::NullableAttributeCtorByte => (E::NULLABLE, 0),
        M::NullableAttributeCtorTransformFlags => (E::NULLABLE, 1),
        M::NullableContextAttributeCtor => (E::NULLABLE_CONTEXT, 0),
        M::NullablePublicOnlyAttributeCtor => (E::NULLABLE_PUBLIC_ONLY, 0),
        M::NativeIntegerAttributeCtor => (E::NATIVE_INTEGER, 0),
        M::NativeIntegerAttributeCtorTransformFlags => (E::NATIVE_INTEGER, 1),
        M::ScopedRefAttributeCtor => (E::SCOPED_REF, 0),
        M::RefSafetyRulesAttributeCtor => (E::REF_SAFETY_RULES, 0),
        M::MemorySafetyRulesAttributeCtor => (E::MEMORY_SAFETY_RULES, 0),
        M::ExtensionMarkerAttributeCtor => (E::EXTENSION_MARKER, 0),
        _ => return None,
    };
    Some(target)
}

#[cfg(test)]
mod tests;
