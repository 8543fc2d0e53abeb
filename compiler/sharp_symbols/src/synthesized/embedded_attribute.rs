//! Attribute classes the compiler emits into the module itself.
//!
//! When the referenced core library lacks an attribute the compiler needs
//! to write (nullable annotations, native integers, ref-safety rules...),
//! the module gets its own `internal sealed` copy marked
//! `[CompilerGenerated, Embedded]`. Every such class follows one template:
//! a set of public read-only payload fields, straight-line constructors
//! storing their arguments into them, and an `AttributeUsage`. A
//! [`EmbeddedTypeDescription`] captures the template; the symbol completes
//! its parts lazily through [`CompletionState`].

use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

use sharp_diagnostic::{Diagnostic, ErrorGuaranteed};

use super::{constructor, BodyGenerator, SynthesizedField};
use crate::declared::ParameterSpec;
use crate::symbol::upgrade;
use crate::{
    Accessibility, AttributeData, AttributeTargets, AttributeUsageInfo, BodyFactory, BoundBlock,
    BoundExpr, CancellationToken, CompilationContext, CompletionPart, CompletionState,
    ConstantValue, DeclarationModifiers, ModuleEmitContext, NamedTypeSymbol, SpecialType, Symbol,
    SymbolKind, SymbolRef, SynthesisError, TypeKind, TypeRef, TypedConstant,
    TypeWithAnnotations, WeakSymbolRef, WellKnownMember, WellKnownType,
};

/// Type of a payload field or constructor parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PayloadType {
    Bool,
    Byte,
    Int32,
    String,
    BoolArray,
    ByteArray,
}

impl PayloadType {
    fn resolve(self, compilation: &dyn CompilationContext) -> TypeRef {
        let special = |special| compilation.special_type_ref(special);
        let array = |element| TypeRef::sz_array(TypeWithAnnotations::oblivious(special(element)));
        match self {
            PayloadType::Bool => special(SpecialType::Boolean),
            PayloadType::Byte => special(SpecialType::Byte),
            PayloadType::Int32 => special(SpecialType::Int32),
            PayloadType::String => special(SpecialType::String),
            PayloadType::BoolArray => array(SpecialType::Boolean),
            PayloadType::ByteArray => array(SpecialType::Byte),
        }
    }

    fn element(self) -> Option<SpecialType> {
        match self {
            PayloadType::BoolArray => Some(SpecialType::Boolean),
            PayloadType::ByteArray => Some(SpecialType::Byte),
            _ => None,
        }
    }
}

/// A public read-only field.
#[derive(Debug)]
pub struct FieldDescription {
    pub name: &'static str,
    pub ty: PayloadType,
}

/// Value a constructor stores into a field.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FieldInit {
    /// The constructor parameter at this ordinal.
    Parameter(usize),
    /// A one-element array holding the parameter at this ordinal.
    ParameterInArray(usize),
    /// `new bool[] { true }`.
    TrueInArray,
}

#[derive(Debug)]
pub struct ConstructorDescription {
    pub parameters: &'static [(&'static str, PayloadType)],
    /// `(field ordinal, value)` assignments, in order.
    pub initializers: &'static [(usize, FieldInit)],
}

/// Base class of an embedded type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EmbeddedBase {
    /// `System.Attribute`, constructed through its parameterless
    /// constructor.
    Attribute,
    /// `System.Exception`, constructed through `Exception(string)` with
    /// the first constructor parameter.
    Exception,
}

impl EmbeddedBase {
    fn well_known(self) -> WellKnownType {
        match self {
            EmbeddedBase::Attribute => WellKnownType::Attribute,
            EmbeddedBase::Exception => WellKnownType::Exception,
        }
    }
}

/// Template of one embedded type.
#[derive(Debug)]
pub struct EmbeddedTypeDescription {
    pub namespace: &'static str,
    pub name: &'static str,
    pub base: EmbeddedBase,
    pub fields: &'static [FieldDescription],
    pub constructors: &'static [ConstructorDescription],
    /// `None` for types that carry no `AttributeUsage`.
    pub usage: Option<AttributeUsageInfo>,
}

impl EmbeddedTypeDescription {
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

#[derive(Debug)]
pub struct SynthesizedEmbeddedAttribute {
    description: &'static EmbeddedTypeDescription,
    containing: WeakSymbolRef,
    self_ref: WeakSymbolRef,
    state: CompletionState,
    base_type: OnceLock<TypeRef>,
    members: OnceLock<Vec<SymbolRef>>,
    usage_attribute: OnceLock<Option<AttributeData>>,
}

impl SynthesizedEmbeddedAttribute {
    /// Declare the type in its namespace. Parts are computed by
    /// [`Self::force_complete`].
    pub fn new(
        compilation: &dyn CompilationContext,
        description: &'static EmbeddedTypeDescription,
    ) -> Arc<Self> {
        let namespace: SymbolRef = compilation
            .global_namespace()
            .get_or_add_path(description.namespace);
        Arc::new_cyclic(|weak: &std::sync::Weak<SynthesizedEmbeddedAttribute>| {
            let self_ref: WeakSymbolRef = weak.clone();
            SynthesizedEmbeddedAttribute {
                description,
                containing: Arc::downgrade(&namespace),
                self_ref,
                state: CompletionState::new(),
                base_type: OnceLock::new(),
                members: OnceLock::new(),
                usage_attribute: OnceLock::new(),
            }
        })
    }

    pub fn description(&self) -> &'static EmbeddedTypeDescription {
        self.description
    }

    pub fn has_complete(&self, part: CompletionPart) -> bool {
        self.state.has_complete(part)
    }

    /// Compute every part, checking `cancel` between them.
    ///
    /// A cancelled completion leaves the remaining parts unclaimed; a later
    /// call picks up where it stopped.
    pub fn force_complete(
        &self,
        compilation: &dyn CompilationContext,
        cancel: &CancellationToken,
    ) -> Result<(), SynthesisError> {
        self.state.complete_part(CompletionPart::BASE_TYPE, cancel, || {
            let base = self.description.base.well_known();
            let base_type = match compilation.well_known_type(base) {
                Some(definition) => TypeRef::named(definition),
                None => {
                    compilation
                        .diagnostics()
                        .emit(Diagnostic::missing_type(&base.to_string()));
                    TypeRef::error(base.to_string())
                }
            };
            let _ = self.base_type.set(base_type);
            Ok(())
        })?;
        self.state.complete_part(CompletionPart::MEMBERS, cancel, || {
            let _ = self.members.set(self.build_members(compilation));
            Ok(())
        })?;
        self.state.complete_part(CompletionPart::ATTRIBUTES, cancel, || {
            let usage = self
                .description
                .usage
                .and_then(|usage| attribute_usage_attribute(compilation, usage).ok());
            let _ = self.usage_attribute.set(usage);
            Ok(())
        })
    }

    fn build_members(&self, compilation: &dyn CompilationContext) -> Vec<SymbolRef> {
        let fields: Vec<SymbolRef> = self
            .description
            .fields
            .iter()
            .map(|field| {
                SynthesizedField::new(field.name, &self.self_ref, field.ty.resolve(compilation))
                    .accessibility(Accessibility::Public)
                    .modifiers(DeclarationModifiers::READ_ONLY)
                    .into_symbol()
            })
            .collect();
        let void_type = compilation.special_type_ref(SpecialType::Void);
        let mut members = fields.clone();
        for description in self.description.constructors {
            let builder = description.parameters.iter().fold(
                constructor::instance_constructor(void_type.clone()),
                |builder, &(name, ty)| {
                    builder.parameter(ParameterSpec::new(name, ty.resolve(compilation)))
                },
            );
            let initializers = description
                .initializers
                .iter()
                .filter_map(|&(field, init)| {
                    let ty = self.description.fields.get(field)?.ty;
                    Some((fields.get(field)?.clone(), ty, init))
                })
                .collect();
            let body = EmbeddedConstructorBody {
                base: self.description.base,
                initializers,
            };
            members.push(builder.body(body).build(&self.self_ref));
        }
        members
    }
}

/// `[AttributeUsage(targets, AllowMultiple = .., Inherited = ..)]`.
///
/// Every missing member is reported, not just the first.
pub(crate) fn attribute_usage_attribute(
    compilation: &dyn CompilationContext,
    usage: AttributeUsageInfo,
) -> Result<AttributeData, ErrorGuaranteed> {
    let constructor =
        compilation.require_well_known_member(WellKnownMember::AttributeUsageAttributeCtor);
    let allow_multiple = compilation
        .require_well_known_member(WellKnownMember::AttributeUsageAttributeAllowMultiple);
    let inherited =
        compilation.require_well_known_member(WellKnownMember::AttributeUsageAttributeInherited);
    let (constructor, allow_multiple, inherited) = (constructor?, allow_multiple?, inherited?);
    let targets = i32::try_from(usage.valid_targets.bits()).unwrap_or(i32::MAX);
    Ok(
        AttributeData::new(
            constructor,
            vec![TypedConstant::Primitive(ConstantValue::Int32(targets))],
        )
        .with_named_argument(
            allow_multiple.name(),
            ConstantValue::Bool(usage.allow_multiple).into(),
        )
        .with_named_argument(inherited.name(), ConstantValue::Bool(usage.inherited).into()),
    )
}

impl Symbol for SynthesizedEmbeddedAttribute {
    fn kind(&self) -> SymbolKind {
        SymbolKind::NamedType
    }

    fn name(&self) -> &str {
        self.description.name
    }

    fn metadata_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.description.name)
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
        if self.description.base == EmbeddedBase::Attribute {
            attributes.extend(module.embedded_marker_attribute());
        }
        if let Some(Some(usage)) = self.usage_attribute.get() {
            attributes.push(usage.clone());
        }
    }

    fn as_named_type(&self) -> Option<&dyn NamedTypeSymbol> {
        Some(self)
    }
}

impl NamedTypeSymbol for SynthesizedEmbeddedAttribute {
    fn type_kind(&self) -> TypeKind {
        TypeKind::Class
    }

    fn base_type(&self) -> Option<TypeRef> {
        self.base_type.get().cloned()
    }

    fn members(&self) -> Vec<SymbolRef> {
        self.members.get().cloned().unwrap_or_default()
    }

    fn is_synthesized(&self) -> bool {
        true
    }

    fn attribute_usage_info(&self) -> Option<AttributeUsageInfo> {
        self.description.usage
    }
}

/// Base constructor call followed by the payload field stores.
#[derive(Debug)]
struct EmbeddedConstructorBody {
    base: EmbeddedBase,
    initializers: Vec<(SymbolRef, PayloadType, FieldInit)>,
}

impl BodyGenerator for EmbeddedConstructorBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let mut statements = Vec::new();
        match self.base {
            EmbeddedBase::Attribute => statements.extend(factory.base_constructor_call()),
            EmbeddedBase::Exception => {
                let constructor = factory.well_known_member(WellKnownMember::ExceptionCtorString);
                let message = vec![factory.parameter(0)];
                let call = factory.call_member(Some(factory.this()), constructor, message);
                statements.push(factory.expression_statement(call));
            }
        }
        for (field, ty, init) in &self.initializers {
            let value = match *init {
                FieldInit::Parameter(ordinal) => factory.parameter(ordinal),
                FieldInit::ParameterInArray(ordinal) => match ty.element() {
                    Some(element) => factory.array(
                        factory.special_type(element),
                        vec![factory.parameter(ordinal)],
                    ),
                    None => BoundExpr::Bad,
                },
                FieldInit::TrueInArray => factory.array(
                    factory.special_type(SpecialType::Boolean),
                    vec![factory.literal(ConstantValue::Bool(true))],
                ),
            };
            statements.push(factory.assign(factory.field(field.clone()), value));
        }
        statements.push(factory.return_void());
        Some(factory.block(statements))
    }
}

/// Targets shared by the annotation attributes that decorate signatures.
pub(crate) const SIGNATURE_TARGETS: AttributeTargets = AttributeTargets::CLASS
    .union(AttributeTargets::EVENT)
    .union(AttributeTargets::FIELD)
    .union(AttributeTargets::GENERIC_PARAMETER)
    .union(AttributeTargets::PARAMETER)
    .union(AttributeTargets::PROPERTY)
    .union(AttributeTargets::RETURN_VALUE);
