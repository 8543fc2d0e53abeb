//! Closure lowering targets: display classes and the static lambda
//! container.

use std::sync::Arc;

use sharp_names::{
    make_lambda_display_class_name, make_lambda_display_local_name, make_lambda_method_name,
    make_local_function_name, make_static_lambda_display_class_name, this_proxy_field_name,
    DebugId,
};

use super::constructor::{instance_constructor, static_constructor, SingletonInitializerBody};
use super::{
    ContainerKind, ContainerScope, ContainerSpec, SynthesizedContainer, SynthesizedField,
    SynthesizedMethod,
};
use crate::declared::ParameterSpec;
use crate::{
    Accessibility, CompilationContext, DeclarationModifiers, MethodKind, SpecialType, SymbolRef,
    TypeRef, TypeWithAnnotations,
};

/// A variable a closure captures.
#[derive(Clone, Debug)]
pub enum CapturedVariable {
    /// The enclosing instance, stored in `<>4__this`.
    This(TypeRef),
    /// A parameter or local, stored under its own name.
    Variable {
        name: String,
        ty: TypeWithAnnotations,
    },
    /// The enclosing scope's display class, stored in
    /// `CS$<>8__locals{id}`.
    ParentFrame { unique_id: u32, ty: TypeRef },
}

/// One lambda or local function moved into a container.
#[derive(Clone, Debug)]
pub struct LambdaSpec {
    /// Name of the user method the lambda was written in.
    pub method_name: String,
    pub method_id: Option<DebugId>,
    pub lambda_id: DebugId,
    /// Set for local functions.
    pub local_function: Option<String>,
    pub return_type: TypeWithAnnotations,
    pub parameters: Vec<ParameterSpec>,
    /// Delegate type the lambda converts to. Static lambdas with one get
    /// a cache field.
    pub delegate_type: Option<TypeRef>,
    pub is_async: bool,
}

impl LambdaSpec {
    pub fn new(
        method_name: impl Into<String>,
        method_id: Option<DebugId>,
        lambda_id: DebugId,
        return_type: impl Into<TypeWithAnnotations>,
    ) -> Self {
        LambdaSpec {
            method_name: method_name.into(),
            method_id,
            lambda_id,
            local_function: None,
            return_type: return_type.into(),
            parameters: Vec::new(),
            delegate_type: None,
            is_async: false,
        }
    }

    #[must_use]
    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    #[must_use]
    pub fn local_function(mut self, name: impl Into<String>) -> Self {
        self.local_function = Some(name.into());
        self
    }

    #[must_use]
    pub fn converts_to(mut self, delegate_type: TypeRef) -> Self {
        self.delegate_type = Some(delegate_type);
        self
    }

    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    /// `<{method}>b__{mo}_{lo}`, or `<{method}>g__{name}|{mo}_{lo}` for a
    /// local function.
    pub fn synthesized_name(&self) -> String {
        match &self.local_function {
            Some(local) => make_local_function_name(
                &self.method_name,
                local,
                self.method_id,
                self.lambda_id,
            ),
            None => make_lambda_method_name(&self.method_name, self.method_id, self.lambda_id),
        }
    }

    fn build(&self, scope: &ContainerScope<'_>) -> SymbolRef {
        let method_kind = if self.local_function.is_some() {
            MethodKind::LocalFunction
        } else {
            MethodKind::LambdaMethod
        };
        let mut modifiers = DeclarationModifiers::empty();
        if self.is_async {
            modifiers |= DeclarationModifiers::ASYNC;
        }
        let mut builder = SynthesizedMethod::builder(
            self.synthesized_name(),
            method_kind,
            scope.type_map.substitute(&self.return_type),
        )
        .accessibility(Accessibility::Internal)
        .modifiers(modifiers);
        for parameter in &self.parameters {
            let mut parameter = parameter.clone();
            parameter.ty = scope.type_map.substitute(&parameter.ty);
            builder = builder.parameter(parameter);
        }
        builder.build(scope.owner)
    }
}

/// A closure scope lowered into a display class.
#[derive(Clone, Debug)]
pub struct ClosureSpec {
    pub containing_type: SymbolRef,
    /// Type parameters of the enclosing generic method, if any.
    pub type_parameters: Vec<SymbolRef>,
    pub method_id: Option<DebugId>,
    pub closure_id: DebugId,
    /// Struct display classes serve closures that never escape.
    pub is_struct: bool,
    pub captured: Vec<CapturedVariable>,
    pub lambdas: Vec<LambdaSpec>,
}

/// `<>c__DisplayClass{mo}_{co}`: one field per captured variable plus
/// the lambdas of the scope as instance methods.
///
/// Class display classes get a public parameterless constructor; struct
/// display classes have none.
#[tracing::instrument(level = "debug", skip_all, fields(closure = ?spec.closure_id))]
pub fn synthesize_display_class(
    compilation: &dyn CompilationContext,
    spec: &ClosureSpec,
) -> Arc<SynthesizedContainer> {
    let name = make_lambda_display_class_name(spec.method_id, spec.closure_id);
    let container = if spec.is_struct {
        ContainerSpec::structure(
            name,
            &spec.containing_type,
            ContainerKind::LambdaDisplayClass,
            compilation,
        )
    } else {
        ContainerSpec::class(
            name,
            &spec.containing_type,
            ContainerKind::LambdaDisplayClass,
            compilation,
        )
    }
    .generic_over(&spec.type_parameters);
    let void_type = compilation.special_type_ref(SpecialType::Void);

    SynthesizedContainer::build(container, |scope| {
        let mut members: Vec<SymbolRef> = Vec::new();
        if !spec.is_struct {
            members.push(instance_constructor(void_type).build(scope.owner));
        }
        for captured in &spec.captured {
            let field = match captured {
                CapturedVariable::This(ty) => {
                    SynthesizedField::new(this_proxy_field_name(), scope.owner, ty.clone())
                }
                CapturedVariable::Variable { name, ty } => SynthesizedField::new(
                    name.as_str(),
                    scope.owner,
                    scope.type_map.substitute(ty),
                ),
                CapturedVariable::ParentFrame { unique_id, ty } => SynthesizedField::new(
                    make_lambda_display_local_name(*unique_id),
                    scope.owner,
                    scope.type_map.substitute_type(ty),
                ),
            };
            members.push(field.accessibility(Accessibility::Public).into_symbol());
        }
        for lambda in &spec.lambdas {
            members.push(lambda.build(scope));
        }
        members
    })
}

/// Non-capturing lambdas of one type, or of one generic method.
#[derive(Clone, Debug)]
pub struct StaticLambdaSpec {
    pub containing_type: SymbolRef,
    /// Set when the container is scoped to a generic method; its name is
    /// then `<>c__{mo}`.
    pub scope_method_id: Option<DebugId>,
    pub type_parameters: Vec<SymbolRef>,
    pub lambdas: Vec<LambdaSpec>,
}

/// `<>c`: the singleton `<>9`, a cache field per lambda with a delegate
/// type, the lambdas as instance methods, and the constructors.
#[tracing::instrument(level = "debug", skip_all, fields(lambdas = spec.lambdas.len()))]
pub fn synthesize_static_lambda_container(
    compilation: &dyn CompilationContext,
    spec: &StaticLambdaSpec,
) -> Arc<SynthesizedContainer> {
    let container = ContainerSpec::class(
        make_static_lambda_display_class_name(spec.scope_method_id),
        &spec.containing_type,
        ContainerKind::StaticLambdaContainer,
        compilation,
    )
    .generic_over(&spec.type_parameters);
    let void_type = compilation.special_type_ref(SpecialType::Void);

    SynthesizedContainer::build(container, |scope| {
        let mut members: Vec<SymbolRef> = vec![
            SynthesizedField::cached_frame_instance(scope.owner).into_symbol(),
        ];
        for lambda in &spec.lambdas {
            if let Some(delegate_type) = &lambda.delegate_type {
                members.push(
                    SynthesizedField::lambda_cache(
                        scope.owner,
                        lambda.method_id,
                        lambda.lambda_id,
                        scope.type_map.substitute_type(delegate_type),
                    )
                    .into_symbol(),
                );
            }
        }
        members.push(
            static_constructor(void_type.clone())
                .body(SingletonInitializerBody)
                .build(scope.owner),
        );
        members.push(instance_constructor(void_type).build(scope.owner));
        for lambda in &spec.lambdas {
            members.push(lambda.build(scope));
        }
        members
    })
}
