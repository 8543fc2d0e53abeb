//! Delegate types for lambdas no framework delegate can represent.
//!
//! A lambda with by-ref parameters, or more parameters than `Action` and
//! `Func` offer, gets an anonymous delegate type `<>A`/`<>F`. Its type
//! parameters stand for the parameter types (plus the return type), and
//! its name carries the ref kinds, so two lambdas with the same shape
//! share one type through [`SynthesizedDelegateCache`].

use std::borrow::Cow;
use std::sync::Arc;

use dashmap::DashMap;
use sharp_names::{make_synthesized_delegate_name, RefKind, RefKindVector};

use super::{SynthesizedMethod, SynthesizedTypeParameter};
use crate::declared::ParameterSpec;
use crate::symbol::upgrade;
use crate::{
    Accessibility, AttributeData, CompilationContext, DeclarationModifiers, MethodImplFlags,
    MethodKind, ModuleEmitContext, NamedTypeSymbol, SpecialType, Symbol, SymbolKind, SymbolRef,
    SynthesisError, TypeKind, TypeRef, WeakSymbolRef,
};

/// Identity of a synthesized delegate type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DelegateShape {
    parameter_count: usize,
    /// One slot per parameter plus one for the return; null when every
    /// slot is by-value.
    ref_kinds: RefKindVector,
    returns_void: bool,
    generation: u32,
}

impl DelegateShape {
    /// Shape with explicit ref kinds.
    ///
    /// A non-null `ref_kinds` must hold exactly `parameter_count + 1`
    /// slots. An all-by-value vector is normalized to the null vector. A
    /// void-returning shape must leave its return slot by value.
    pub fn new(
        parameter_count: usize,
        ref_kinds: RefKindVector,
        returns_void: bool,
        generation: u32,
    ) -> Result<Self, SynthesisError> {
        if !ref_kinds.is_null() && ref_kinds.capacity() != parameter_count + 1 {
            return Err(SynthesisError::InconsistentDelegateShape {
                parameter_count,
                capacity: ref_kinds.capacity(),
            });
        }
        if returns_void && !ref_kinds.is_null() {
            let ref_kind = ref_kinds.get(parameter_count);
            if ref_kind != RefKind::None {
                return Err(SynthesisError::VoidDelegateReturnsByRef { ref_kind });
            }
        }
        let ref_kinds = if ref_kinds.iter().all(|kind| kind == RefKind::None) {
            RefKindVector::default()
        } else {
            ref_kinds
        };
        Ok(DelegateShape {
            parameter_count,
            ref_kinds,
            returns_void,
            generation,
        })
    }

    /// All parameters by value.
    pub fn by_value(parameter_count: usize, returns_void: bool, generation: u32) -> Self {
        DelegateShape {
            parameter_count,
            ref_kinds: RefKindVector::default(),
            returns_void,
            generation,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    pub fn returns_void(&self) -> bool {
        self.returns_void
    }

    pub fn ref_kinds(&self) -> &RefKindVector {
        &self.ref_kinds
    }

    /// Number of type parameters: one per parameter, plus the return.
    pub fn arity(&self) -> usize {
        self.parameter_count + usize::from(!self.returns_void)
    }

    pub fn parameter_ref_kind(&self, ordinal: usize) -> RefKind {
        if self.ref_kinds.is_null() {
            RefKind::None
        } else {
            self.ref_kinds.get(ordinal)
        }
    }

    pub fn return_ref_kind(&self) -> RefKind {
        self.parameter_ref_kind(self.parameter_count)
    }

    pub fn name(&self) -> String {
        make_synthesized_delegate_name(&self.ref_kinds, self.returns_void, self.generation)
    }
}

/// A `<>A`/`<>F` delegate type.
///
/// It has exactly two members: `.ctor(object, native int)` and `Invoke`.
#[derive(Debug)]
pub struct SynthesizedDelegate {
    name: String,
    shape: DelegateShape,
    containing: WeakSymbolRef,
    base_type: TypeRef,
    type_parameters: Vec<SymbolRef>,
    members: Vec<SymbolRef>,
}

impl SynthesizedDelegate {
    pub fn new(compilation: &dyn CompilationContext, shape: &DelegateShape) -> Arc<Self> {
        let namespace: SymbolRef = compilation.global_namespace();
        let containing = Arc::downgrade(&namespace);
        let void_type = compilation.special_type_ref(SpecialType::Void);
        let object = compilation.special_type_ref(SpecialType::Object);
        let native_int = compilation.special_type_ref(SpecialType::IntPtr);
        let base_type = compilation.special_type_ref(SpecialType::MulticastDelegate);

        let delegate = Arc::new_cyclic(|weak: &std::sync::Weak<SynthesizedDelegate>| {
            let owner: WeakSymbolRef = weak.clone();
            let type_parameters: Vec<SymbolRef> = (0..shape.arity())
                .map(|ordinal| -> SymbolRef {
                    let name = if ordinal == shape.parameter_count {
                        "TResult".to_owned()
                    } else {
                        format!("T{}", ordinal + 1)
                    };
                    SynthesizedTypeParameter::new(name, ordinal, owner.clone())
                })
                .collect();

            let constructor =
                SynthesizedMethod::builder(".ctor", MethodKind::Constructor, void_type.clone())
                    .accessibility(Accessibility::Public)
                    .impl_flags(MethodImplFlags::RUNTIME)
                    .parameter(ParameterSpec::new("object", object))
                    .parameter(ParameterSpec::new("method", native_int))
                    .build(&owner);

            let return_type = match type_parameters.get(shape.parameter_count) {
                Some(result) if !shape.returns_void => TypeRef::TypeParameter(result.clone()),
                _ => void_type,
            };
            let mut invoke =
                SynthesizedMethod::builder("Invoke", MethodKind::DelegateInvoke, return_type)
                    .accessibility(Accessibility::Public)
                    .modifiers(DeclarationModifiers::VIRTUAL)
                    .impl_flags(MethodImplFlags::RUNTIME)
                    .ref_kind(shape.return_ref_kind());
            let parameter_types = type_parameters.iter().take(shape.parameter_count);
            for (ordinal, parameter) in parameter_types.enumerate() {
                invoke = invoke.parameter(
                    ParameterSpec::new(
                        format!("arg{}", ordinal + 1),
                        TypeRef::TypeParameter(parameter.clone()),
                    )
                    .with_ref_kind(shape.parameter_ref_kind(ordinal)),
                );
            }
            let invoke = invoke.build(&owner);

            SynthesizedDelegate {
                name: shape.name(),
                shape: shape.clone(),
                containing,
                base_type,
                type_parameters,
                members: vec![constructor, invoke],
            }
        });
        tracing::debug!(name = %delegate.name, arity = shape.arity(), "synthesized delegate type");
        delegate
    }

    pub fn shape(&self) -> &DelegateShape {
        &self.shape
    }
}

impl Symbol for SynthesizedDelegate {
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
        Accessibility::Internal
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

impl NamedTypeSymbol for SynthesizedDelegate {
    fn type_kind(&self) -> TypeKind {
        TypeKind::Delegate
    }

    fn type_parameters(&self) -> &[SymbolRef] {
        &self.type_parameters
    }

    fn base_type(&self) -> Option<TypeRef> {
        Some(self.base_type.clone())
    }

    fn members(&self) -> Vec<SymbolRef> {
        self.members.clone()
    }

    fn is_synthesized(&self) -> bool {
        true
    }
}

/// Per-module cache: one delegate type per shape.
#[derive(Debug, Default)]
pub struct SynthesizedDelegateCache {
    delegates: DashMap<DelegateShape, Arc<SynthesizedDelegate>>,
}

impl SynthesizedDelegateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The delegate type for `shape`, created on first request.
    ///
    /// Concurrent requests for one shape all receive the same `Arc`.
    pub fn get_or_add(
        &self,
        compilation: &dyn CompilationContext,
        shape: &DelegateShape,
    ) -> Arc<SynthesizedDelegate> {
        if let Some(existing) = self.delegates.get(shape) {
            tracing::trace!(name = %existing.name, "reusing synthesized delegate type");
            return Arc::clone(existing.value());
        }
        self.delegates
            .entry(shape.clone())
            .or_insert_with(|| SynthesizedDelegate::new(compilation, shape))
            .value()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// Every delegate created so far, ordered by metadata name.
    pub fn delegates(&self) -> Vec<Arc<SynthesizedDelegate>> {
        let mut delegates: Vec<_> = self
            .delegates
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        delegates.sort_by(|a, b| a.metadata_name().cmp(&b.metadata_name()));
        delegates
    }
}
