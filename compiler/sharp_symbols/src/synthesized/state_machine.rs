//! State machines for iterators and async methods.

use std::sync::Arc;

use sharp_names::{
    async_awaiter_field_name, async_builder_field_name,
    make_async_iterator_combined_tokens_field_name,
    make_async_iterator_promise_of_value_or_end_field_name, make_dispose_mode_field_name,
    make_hoisted_local_field_name, make_iterator_current_field_name,
    make_iterator_current_thread_id_field_name, make_iterator_finally_method_name,
    make_state_machine_state_field_name, make_state_machine_type_name,
    state_machine_parameter_proxy_field_name, this_proxy_field_name, DebugId,
    SynthesizedLocalKind,
};

use super::constructor::instance_constructor;
use super::{
    BodyGenerator, ContainerKind, ContainerScope, ContainerSpec, MetadataSlot, StateMachineKind,
    SynthesizedContainer, SynthesizedField, SynthesizedMethod,
};
use crate::declared::ParameterSpec;
use crate::{
    containing_type, Accessibility, BodyFactory, BoundBlock, CompilationContext, MethodKind,
    SpecialType, SymbolRef, TypeRef, TypeWithAnnotations,
};

/// A local that lives across a suspension point.
#[derive(Clone, Debug)]
pub struct HoistedLocal {
    /// Source name of a user local.
    pub name: Option<String>,
    pub kind: SynthesizedLocalKind,
    pub slot: u32,
    pub ty: TypeWithAnnotations,
}

/// Inputs for lowering one iterator or async method.
#[derive(Clone, Debug)]
pub struct StateMachineSpec {
    pub kind: StateMachineKind,
    /// The user method being lowered.
    pub method: SymbolRef,
    pub method_id: Option<DebugId>,
    /// Async state machines are structs in optimized builds.
    pub is_struct: bool,
    /// Element type of an iterator.
    pub element_type: Option<TypeWithAnnotations>,
    /// Method builder type of an async method.
    pub builder_type: Option<TypeRef>,
    pub hoisted_locals: Vec<HoistedLocal>,
    /// One awaiter type per distinct awaiter slot.
    pub awaiter_types: Vec<TypeRef>,
    /// States of the `finally` blocks an iterator extracts into methods.
    pub finally_states: Vec<i32>,
}

impl StateMachineSpec {
    pub fn new(kind: StateMachineKind, method: SymbolRef) -> Self {
        StateMachineSpec {
            kind,
            method,
            method_id: None,
            is_struct: false,
            element_type: None,
            builder_type: None,
            hoisted_locals: Vec::new(),
            awaiter_types: Vec::new(),
            finally_states: Vec::new(),
        }
    }

    fn has_parameter_proxies(&self) -> bool {
        matches!(
            self.kind,
            StateMachineKind::Iterator {
                is_enumerable: true
            } | StateMachineKind::AsyncIterator
        )
    }

    fn tracks_initial_thread(&self) -> bool {
        self.has_parameter_proxies()
    }
}

/// `<{method}>d__{mo}` with the fields, constructor and methods of its
/// kind.
///
/// The method's type parameters are alpha-renamed onto the state
/// machine; every field type is rewritten through the resulting map.
#[tracing::instrument(level = "debug", skip_all, fields(method = spec.method.name()))]
pub fn synthesize_state_machine(
    compilation: &dyn CompilationContext,
    spec: &StateMachineSpec,
) -> Option<Arc<SynthesizedContainer>> {
    let method = spec.method.as_method()?;
    let outer = containing_type(spec.method.as_ref())?;
    let name = make_state_machine_type_name(spec.method.name(), spec.method_id);
    let kind = ContainerKind::StateMachine(spec.kind);
    let container = if spec.is_struct {
        ContainerSpec::structure(name, &outer, kind, compilation)
    } else {
        ContainerSpec::class(name, &outer, kind, compilation)
    }
    .generic_over(method.type_parameters());

    let int32 = compilation.special_type_ref(SpecialType::Int32);
    let boolean = compilation.special_type_ref(SpecialType::Boolean);
    let object = compilation.special_type_ref(SpecialType::Object);
    let void_type = compilation.special_type_ref(SpecialType::Void);
    let this_type = (!spec.method.is_static()).then(|| TypeRef::for_definition(outer.clone()));

    Some(SynthesizedContainer::build(container, |scope| {
        let public_field = |name: String, ty: TypeWithAnnotations| -> SymbolRef {
            SynthesizedField::new(name, scope.owner, ty)
                .accessibility(Accessibility::Public)
                .into_symbol()
        };
        let mut members: Vec<SymbolRef> = Vec::new();

        members.push(public_field(
            make_state_machine_state_field_name(),
            int32.clone().into(),
        ));
        let element_type = spec
            .element_type
            .as_ref()
            .map_or_else(|| object.clone().into(), |ty| scope.type_map.substitute(ty));
        match spec.kind {
            StateMachineKind::Iterator { .. } => {
                members.push(private_field(
                    scope,
                    &make_iterator_current_field_name(),
                    element_type,
                ));
            }
            StateMachineKind::Async => {
                members.push(public_field(
                    async_builder_field_name(),
                    builder_type(spec, scope),
                ));
            }
            StateMachineKind::AsyncIterator => {
                members.push(public_field(
                    async_builder_field_name(),
                    builder_type(spec, scope),
                ));
                members.push(public_field(
                    make_async_iterator_promise_of_value_or_end_field_name(),
                    object.clone().into(),
                ));
                members.push(private_field(
                    scope,
                    &make_iterator_current_field_name(),
                    element_type,
                ));
                members.push(private_field(
                    scope,
                    &make_dispose_mode_field_name(),
                    boolean.clone().into(),
                ));
                members.push(private_field(
                    scope,
                    &make_async_iterator_combined_tokens_field_name(),
                    object.clone().into(),
                ));
            }
        }
        if spec.tracks_initial_thread() {
            members.push(private_field(
                scope,
                &make_iterator_current_thread_id_field_name(),
                int32.clone().into(),
            ));
        }
        if let Some(this_type) = &this_type {
            members.push(public_field(
                this_proxy_field_name(),
                TypeWithAnnotations::not_annotated(this_type.clone()),
            ));
        }
        for parameter in method.parameters() {
            let Some(symbol) = parameter.as_parameter() else {
                continue;
            };
            let ty = scope.type_map.substitute(&symbol.ty());
            members.push(public_field(parameter.name().to_owned(), ty.clone()));
            if spec.has_parameter_proxies() {
                members.push(public_field(
                    state_machine_parameter_proxy_field_name(parameter.name()),
                    ty,
                ));
            }
        }
        for local in &spec.hoisted_locals {
            let name =
                make_hoisted_local_field_name(local.kind, local.slot, local.name.as_deref());
            let field =
                SynthesizedField::new(name, scope.owner, scope.type_map.substitute(&local.ty));
            let field = if local.kind == SynthesizedLocalKind::UserDefined {
                field.accessibility(Accessibility::Public)
            } else {
                field
            };
            members.push(field.into_symbol());
        }
        for (slot, awaiter) in spec.awaiter_types.iter().enumerate() {
            let slot = u32::try_from(slot).unwrap_or(u32::MAX);
            members.push(private_field(
                scope,
                &async_awaiter_field_name(slot),
                scope.type_map.substitute_type(awaiter).into(),
            ));
        }

        if !spec.is_struct {
            let constructor = instance_constructor(void_type.clone());
            let constructor = match spec.kind {
                StateMachineKind::Iterator { .. } | StateMachineKind::AsyncIterator => constructor
                    .parameter(ParameterSpec::new(
                        make_state_machine_state_field_name(),
                        int32.clone(),
                    ))
                    .body(InitialStateBody),
                StateMachineKind::Async => constructor,
            };
            members.push(constructor.build(scope.owner));
        }

        let move_next_return = match spec.kind {
            StateMachineKind::Iterator { .. } => boolean.clone(),
            StateMachineKind::Async | StateMachineKind::AsyncIterator => void_type.clone(),
        };
        members.push(
            SynthesizedMethod::builder("MoveNext", MethodKind::Ordinary, move_next_return)
                .metadata_slot(MetadataSlot::SEALED_NEW_SLOT)
                .build(scope.owner),
        );
        if let StateMachineKind::Iterator { .. } = spec.kind {
            members.push(
                SynthesizedMethod::builder(
                    "System.IDisposable.Dispose",
                    MethodKind::ExplicitInterfaceImplementation,
                    void_type.clone(),
                )
                .metadata_slot(MetadataSlot::SEALED_NEW_SLOT)
                .debugger_hidden()
                .build(scope.owner),
            );
            for &state in &spec.finally_states {
                members.push(
                    SynthesizedMethod::builder(
                        make_iterator_finally_method_name(state),
                        MethodKind::Ordinary,
                        void_type.clone(),
                    )
                    .build(scope.owner),
                );
            }
        }
        members
    }))
}

fn private_field(scope: &ContainerScope<'_>, name: &str, ty: TypeWithAnnotations) -> SymbolRef {
    SynthesizedField::new(name, scope.owner, ty).into_symbol()
}

fn builder_type(spec: &StateMachineSpec, scope: &ContainerScope<'_>) -> TypeWithAnnotations {
    spec.builder_type.as_ref().map_or_else(
        || TypeRef::error("AsyncMethodBuilder").into(),
        |ty| scope.type_map.substitute_type(ty).into(),
    )
}

/// `base(); this.<>1__state = <>1__state; return;`
#[derive(Debug)]
struct InitialStateBody;

impl BodyGenerator for InitialStateBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let container = containing_type(factory.method().as_ref())?;
        let state = container
            .as_named_type()?
            .get_members(&make_state_machine_state_field_name())
            .into_iter()
            .next()?;
        let mut statements = Vec::new();
        statements.extend(factory.base_constructor_call());
        statements.push(factory.assign(factory.field(state), factory.parameter(0)));
        statements.push(factory.return_void());
        Some(factory.block(statements))
    }
}

#[cfg(test)]
mod tests;
