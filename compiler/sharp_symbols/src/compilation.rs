//! The compilation context synthesis runs against.
//!
//! Synthesis never resolves names on its own: everything it needs from the
//! core library (special types and members, well-known types and members)
//! and the place to report problems come from a [`CompilationContext`].

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sharp_diagnostic::{Diagnostic, DiagnosticBag, DiagnosticSink, ErrorGuaranteed};

use crate::declared::DeclaredNamespace;
use crate::{
    CoreLibrary, SpecialMember, SpecialType, SymbolRef, TypeRef, WellKnownMember, WellKnownType,
};

/// Narrow view of a compilation consumed by symbol synthesis.
pub trait CompilationContext: Send + Sync {
    fn assembly_name(&self) -> &str;

    fn special_type(&self, special: SpecialType) -> Option<SymbolRef>;

    fn well_known_type(&self, well_known: WellKnownType) -> Option<SymbolRef>;

    fn special_member(&self, member: SpecialMember) -> Option<SymbolRef>;

    fn well_known_member(&self, member: WellKnownMember) -> Option<SymbolRef>;

    /// Root of the merged namespace tree.
    fn global_namespace(&self) -> Arc<DeclaredNamespace>;

    fn diagnostics(&self) -> &dyn DiagnosticSink;

    /// Reference to a special type, reporting CS0518 when it is missing.
    fn special_type_ref(&self, special: SpecialType) -> TypeRef {
        let found = self.special_type(special);
        if found.is_none() {
            self.diagnostics()
                .emit(Diagnostic::missing_type(&special.to_string()));
        }
        TypeRef::special_or_error(found, special)
    }

    /// A special member, reporting CS0656 when it is missing.
    fn require_special_member(&self, member: SpecialMember) -> Result<SymbolRef, ErrorGuaranteed> {
        self.special_member(member).ok_or_else(|| {
            tracing::debug!(?member, "special member missing from core library");
            self.diagnostics().emit(Diagnostic::missing_member(
                &member.owner().to_string(),
                member.name(),
            ))
        })
    }

    /// A well-known member, reporting CS0656 when it is missing.
    fn require_well_known_member(
        &self,
        member: WellKnownMember,
    ) -> Result<SymbolRef, ErrorGuaranteed> {
        self.well_known_member(member).ok_or_else(|| {
            tracing::debug!(?member, "well-known member missing from core library");
            self.diagnostics().emit(Diagnostic::missing_member(
                &member.owner().to_string(),
                member.name(),
            ))
        })
    }

    /// Reference to a non-generic well-known type, or an error type.
    fn well_known_type_ref(&self, well_known: WellKnownType) -> TypeRef {
        match self.well_known_type(well_known) {
            Some(definition) => TypeRef::named(definition),
            None => TypeRef::error(well_known.to_string()),
        }
    }
}

/// A compilation over a modeled core library.
#[derive(Debug)]
pub struct Compilation {
    assembly_name: String,
    global_namespace: Arc<DeclaredNamespace>,
    special_types: FxHashMap<SpecialType, SymbolRef>,
    well_known_types: FxHashMap<WellKnownType, SymbolRef>,
    special_members: FxHashMap<SpecialMember, SymbolRef>,
    well_known_members: FxHashMap<WellKnownMember, SymbolRef>,
    diagnostics: DiagnosticBag,
}

impl Compilation {
    /// Create a compilation referencing `core_library`.
    pub fn new(assembly_name: impl Into<String>, core_library: &CoreLibrary) -> Arc<Self> {
        let global_namespace = DeclaredNamespace::global();
        let loaded = core_library.load(&global_namespace);
        tracing::debug!(
            special_types = loaded.special_types.len(),
            well_known_types = loaded.well_known_types.len(),
            "core library loaded"
        );
        Arc::new(Compilation {
            assembly_name: assembly_name.into(),
            global_namespace,
            special_types: loaded.special_types,
            well_known_types: loaded.well_known_types,
            special_members: loaded.special_members,
            well_known_members: loaded.well_known_members,
            diagnostics: DiagnosticBag::new(),
        })
    }

    pub fn diagnostic_bag(&self) -> &DiagnosticBag {
        &self.diagnostics
    }
}

impl CompilationContext for Compilation {
    fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    fn special_type(&self, special: SpecialType) -> Option<SymbolRef> {
        self.special_types.get(&special).cloned()
    }

    fn well_known_type(&self, well_known: WellKnownType) -> Option<SymbolRef> {
        self.well_known_types.get(&well_known).cloned()
    }

    fn special_member(&self, member: SpecialMember) -> Option<SymbolRef> {
        self.special_members.get(&member).cloned()
    }

    fn well_known_member(&self, member: WellKnownMember) -> Option<SymbolRef> {
        self.well_known_members.get(&member).cloned()
    }

    fn global_namespace(&self) -> Arc<DeclaredNamespace> {
        Arc::clone(&self.global_namespace)
    }

    fn diagnostics(&self) -> &dyn DiagnosticSink {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests;
