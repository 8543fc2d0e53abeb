//! `<PrivateImplementationDetails>`, the module-wide helper container.
//!
//! Lowering of every method body may request helpers concurrently, so the
//! container is a get-or-add map keyed by member name: whichever request
//! arrives first creates the member and every later request gets the same
//! symbol. Before emission the container is frozen; from then on lookups
//! of existing members still succeed but additions are rejected.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use super::{GlobalHelper, SynthesizedField};
use crate::symbol::upgrade;
use crate::{
    Accessibility, AttributeData, CompilationContext, DeclarationModifiers, ModuleEmitContext,
    NamedTypeSymbol, SpecialType, Symbol, SymbolKind, SymbolRef, SynthesisError, TypeKind,
    TypeRef, WeakSymbolRef,
};

/// Base name of the helper container.
pub const PRIVATE_IMPLEMENTATION_DETAILS_NAME: &str = "<PrivateImplementationDetails>";

#[derive(Debug)]
pub struct PrivateImplementationDetails {
    name: String,
    containing: WeakSymbolRef,
    self_ref: WeakSymbolRef,
    object_type: TypeRef,
    value_type: TypeRef,
    members: DashMap<String, SymbolRef>,
    /// Name-ordered member snapshot, set by [`Self::freeze`].
    frozen: RwLock<Option<Arc<[SymbolRef]>>>,
}

impl PrivateImplementationDetails {
    /// Create the container of a module. Net modules carry their module
    /// version id in the name so that linking several of them into one
    /// assembly does not produce duplicate types.
    pub fn new(
        compilation: &dyn CompilationContext,
        module_version_id: Option<&str>,
    ) -> Arc<Self> {
        let name = match module_version_id {
            Some(mvid) => format!("{PRIVATE_IMPLEMENTATION_DETAILS_NAME}{{{mvid}}}"),
            None => PRIVATE_IMPLEMENTATION_DETAILS_NAME.to_owned(),
        };
        let global: SymbolRef = compilation.global_namespace();
        let object_type = compilation.special_type_ref(SpecialType::Object);
        let value_type = compilation.special_type_ref(SpecialType::ValueType);
        Arc::new_cyclic(|weak: &std::sync::Weak<PrivateImplementationDetails>| {
            let self_ref: WeakSymbolRef = weak.clone();
            PrivateImplementationDetails {
                name,
                containing: Arc::downgrade(&global),
                self_ref,
                object_type,
                value_type,
                members: DashMap::new(),
                frozen: RwLock::new(None),
            }
        })
    }

    /// The helper method `helper`, creating it and the helpers it calls on
    /// first request.
    #[tracing::instrument(level = "debug", skip_all, fields(helper = helper.name()))]
    pub fn get_or_add_helper(
        &self,
        compilation: &dyn CompilationContext,
        helper: GlobalHelper,
    ) -> Result<SymbolRef, SynthesisError> {
        // Dependencies are resolved before the entry for `helper` is
        // locked; DashMap shards are not reentrant.
        let dependency = match helper.dependency() {
            Some(dependency) => Some(self.get_or_add_helper(compilation, dependency)?),
            None => None,
        };
        self.get_or_add(helper.name(), || -> SymbolRef {
            helper.build(compilation, &self.self_ref, dependency)
        })
    }

    /// `__StaticArrayInitTypeSize={size}`, a struct of exactly `size` bytes
    /// used as the type of mapped data fields.
    pub fn get_or_add_explicit_size_type(
        &self,
        size: u32,
        alignment: u16,
    ) -> Result<SymbolRef, SynthesisError> {
        if size == 0 {
            return Err(SynthesisError::InvalidExplicitSize { size });
        }
        let name = if alignment > 1 {
            format!("__StaticArrayInitTypeSize={size}_Align={alignment}")
        } else {
            format!("__StaticArrayInitTypeSize={size}")
        };
        self.get_or_add(&name, || -> SymbolRef {
            Arc::new(ExplicitSizeType {
                name: name.clone(),
                containing: self.self_ref.clone(),
                base_type: self.value_type.clone(),
                size,
                alignment,
            })
        })
    }

    /// Static read-only field whose initial value is mapped onto `data`.
    ///
    /// The field is named by the SHA-256 of its contents, so identical
    /// blobs share one field.
    pub fn get_or_add_data_field(
        &self,
        compilation: &dyn CompilationContext,
        data: &[u8],
        alignment: u16,
    ) -> Result<SymbolRef, SynthesisError> {
        let name = data_field_name(data, alignment);
        if let Some(existing) = self.lookup(&name) {
            return Ok(existing);
        }
        let ty = match (data.len(), alignment) {
            (1, 0..=1) => compilation.special_type_ref(SpecialType::Byte),
            (2, 0..=2) => compilation.special_type_ref(SpecialType::Int16),
            (4, 0..=4) => compilation.special_type_ref(SpecialType::Int32),
            (8, 0..=8) => compilation.special_type_ref(SpecialType::Int64),
            (size, _) => {
                let size = u32::try_from(size).unwrap_or(u32::MAX);
                TypeRef::named(self.get_or_add_explicit_size_type(size, alignment)?)
            }
        };
        self.get_or_add(&name, || {
            SynthesizedField::new(name.as_str(), &self.self_ref, ty)
                .accessibility(Accessibility::Internal)
                .modifiers(DeclarationModifiers::STATIC | DeclarationModifiers::READ_ONLY)
                .mapped_data(Arc::from(data))
                .into_symbol()
        })
    }

    /// Existing member named `name`.
    pub fn lookup(&self, name: &str) -> Option<SymbolRef> {
        self.members.get(name).map(|member| member.value().clone())
    }

    fn get_or_add(
        &self,
        name: &str,
        create: impl FnOnce() -> SymbolRef,
    ) -> Result<SymbolRef, SynthesisError> {
        // Held across the insertion so that `freeze` cannot snapshot a
        // half-added member.
        let frozen = self.frozen.read();
        if let Some(existing) = self.lookup(name) {
            tracing::trace!(name, "reusing private implementation member");
            return Ok(existing);
        }
        if frozen.is_some() {
            return Err(SynthesisError::HelperContainerFrozen {
                name: name.to_owned(),
            });
        }
        let entry = self.members.entry(name.to_owned()).or_insert_with(|| {
            tracing::debug!(name, "adding private implementation member");
            create()
        });
        Ok(entry.value().clone())
    }

    /// Fix the member list for emission. Idempotent.
    pub fn freeze(&self) -> Arc<[SymbolRef]> {
        let mut frozen = self.frozen.write();
        if let Some(snapshot) = frozen.as_ref() {
            return Arc::clone(snapshot);
        }
        let snapshot: Arc<[SymbolRef]> = self.sorted_members().into();
        tracing::debug!(
            name = %self.name,
            members = snapshot.len(),
            "froze private implementation details"
        );
        *frozen = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.read().is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn sorted_members(&self) -> Vec<SymbolRef> {
        let mut members: Vec<SymbolRef> = self
            .members
            .iter()
            .map(|member| member.value().clone())
            .collect();
        members.sort_by(|a, b| a.name().cmp(b.name()));
        members
    }
}

/// Name of the data field holding `data`: the uppercase hex SHA-256 of
/// the bytes, suffixed with the alignment when it exceeds one.
pub fn data_field_name(data: &[u8], alignment: u16) -> String {
    let digest = Sha256::digest(data);
    let mut name = String::with_capacity(digest.len() * 2 + 4);
    for byte in digest {
        let _ = write!(name, "{byte:02X}");
    }
    if alignment > 1 {
        let _ = write!(name, "_A{alignment}");
    }
    name
}

impl Symbol for PrivateImplementationDetails {
    fn kind(&self) -> SymbolKind {
        SymbolKind::NamedType
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.containing))
    }

    fn declared_accessibility(&self) -> Accessibility {
        Accessibility::Internal
    }

    fn is_static(&self) -> bool {
        true
    }

    fn is_abstract(&self) -> bool {
        true
    }

    fn is_sealed(&self) -> bool {
        true
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

impl NamedTypeSymbol for PrivateImplementationDetails {
    fn type_kind(&self) -> TypeKind {
        TypeKind::Class
    }

    fn base_type(&self) -> Option<TypeRef> {
        Some(self.object_type.clone())
    }

    /// Members ordered by name, so emission is deterministic regardless of
    /// which thread added what.
    fn members(&self) -> Vec<SymbolRef> {
        match self.frozen.read().as_ref() {
            Some(snapshot) => snapshot.to_vec(),
            None => self.sorted_members(),
        }
    }

    fn is_synthesized(&self) -> bool {
        true
    }
}

/// Struct of a fixed byte size nested in the helper container.
#[derive(Debug)]
pub struct ExplicitSizeType {
    name: String,
    containing: WeakSymbolRef,
    base_type: TypeRef,
    size: u32,
    alignment: u16,
}

impl ExplicitSizeType {
    pub fn alignment(&self) -> u16 {
        self.alignment
    }
}

impl Symbol for ExplicitSizeType {
    fn kind(&self) -> SymbolKind {
        SymbolKind::NamedType
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.containing))
    }

    fn declared_accessibility(&self) -> Accessibility {
        Accessibility::Private
    }

    fn is_sealed(&self) -> bool {
        true
    }

    fn as_named_type(&self) -> Option<&dyn NamedTypeSymbol> {
        Some(self)
    }
}

impl NamedTypeSymbol for ExplicitSizeType {
    fn type_kind(&self) -> TypeKind {
        TypeKind::Struct
    }

    fn base_type(&self) -> Option<TypeRef> {
        Some(self.base_type.clone())
    }

    fn members(&self) -> Vec<SymbolRef> {
        Vec::new()
    }

    fn is_synthesized(&self) -> bool {
        true
    }

    fn explicit_size(&self) -> Option<u32> {
        Some(self.size)
    }
}
