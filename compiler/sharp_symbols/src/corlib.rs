//! Model of the referenced core library.
//!
//! A [`CoreLibrary`] lists which special and well-known types and members
//! exist. Loading it into a namespace tree declares each present type with
//! its base type and each present member with its signature, so synthesis
//! can bind to them exactly as it would to metadata symbols.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use sharp_names::RefKind;

use crate::declared::{
    DeclaredMethod, DeclaredNamedType, DeclaredNamespace, DeclaredProperty, MethodSignature,
    ParameterSpec, TypeParameterSpec,
};
use crate::{
    Accessibility, AttributeTargets, AttributeUsageInfo, DeclarationModifiers, MethodKind,
    NamedTypeSymbol, SpecialMember, SpecialType, SymbolRef, TypeKind, TypeRef, TypeWithAnnotations,
    WellKnownMember, WellKnownType,
};

/// Which core-library types and members are available.
#[derive(Clone, Debug)]
pub struct CoreLibrary {
    special_types: FxHashSet<SpecialType>,
    well_known_types: FxHashSet<WellKnownType>,
    missing_members: FxHashSet<WellKnownMember>,
    missing_special_members: FxHashSet<SpecialMember>,
}

impl CoreLibrary {
    /// A core library defining every type and member synthesis knows.
    pub fn full() -> Self {
        CoreLibrary {
            special_types: SpecialType::ALL.into_iter().collect(),
            well_known_types: WellKnownType::ALL.into_iter().collect(),
            missing_members: FxHashSet::default(),
            missing_special_members: FxHashSet::default(),
        }
    }

    /// An older core library: no `AttributeUsageAttribute` and none of
    /// the attributes a module may have to embed.
    pub fn minimal() -> Self {
        let well_known_types = WellKnownType::ALL
            .into_iter()
            .filter(|ty| {
                *ty != WellKnownType::AttributeUsageAttribute && ty.embeddable().is_none()
            })
            .collect();
        CoreLibrary {
            well_known_types,
            ..CoreLibrary::full()
        }
    }

    #[must_use]
    pub fn without_special_type(mut self, special: SpecialType) -> Self {
        self.special_types.remove(&special);
        self
    }

    #[must_use]
    pub fn without_type(mut self, well_known: WellKnownType) -> Self {
        self.well_known_types.remove(&well_known);
        self
    }

    #[must_use]
    pub fn without_member(mut self, member: WellKnownMember) -> Self {
        self.missing_members.insert(member);
        self
    }

    #[must_use]
    pub fn without_special_member(mut self, member: SpecialMember) -> Self {
        self.missing_special_members.insert(member);
        self
    }

    pub fn has_type(&self, well_known: WellKnownType) -> bool {
        self.well_known_types.contains(&well_known)
    }

    /// Declare the library's types and members under `global`.
    pub(crate) fn load(&self, global: &Arc<DeclaredNamespace>) -> LoadedCoreLibrary {
        let mut loaded = LoadedCoreLibrary::default();
        let mut special_defs: FxHashMap<SpecialType, Arc<DeclaredNamedType>> =
            FxHashMap::default();
        let mut well_known_defs: FxHashMap<WellKnownType, Arc<DeclaredNamedType>> =
            FxHashMap::default();

        let system = global.get_or_add_path("System");
        for special in SpecialType::ALL {
            if !self.special_types.contains(&special) {
                continue;
            }
            let type_kind = special_type_kind(special);
            let modifiers = if matches!(special, SpecialType::Object | SpecialType::ValueType) {
                DeclarationModifiers::empty()
            } else if matches!(
                special,
                SpecialType::Enum
                    | SpecialType::Delegate
                    | SpecialType::MulticastDelegate
                    | SpecialType::Array
            ) {
                DeclarationModifiers::ABSTRACT
            } else {
                DeclarationModifiers::SEALED
            };
            let definition = DeclaredNamedType::builder(special.name(), type_kind)
                .special_type(special)
                .modifiers(modifiers)
                .build_in_namespace(&system);
            loaded.special_types.insert(special, definition.clone());
            special_defs.insert(special, definition);
        }

        for well_known in WellKnownType::ALL {
            if !self.well_known_types.contains(&well_known) {
                continue;
            }
            let namespace = global.get_or_add_path(well_known.namespace());
            let mut builder =
                DeclaredNamedType::builder(well_known.name(), well_known_type_kind(well_known));
            if well_known.arity() == 1 {
                let name = match well_known {
                    WellKnownType::TaskOfT | WellKnownType::TaskAwaiterOfT => "TResult",
                    _ => "T",
                };
                builder = builder.type_parameter(TypeParameterSpec::new(name));
            }
            if well_known.is_static_class() {
                builder = builder
                    .modifiers(DeclarationModifiers::STATIC | DeclarationModifiers::ABSTRACT);
            }
            if is_attribute(well_known) {
                builder = builder.attribute_usage(AttributeUsageInfo::new(
                    AttributeTargets::ALL,
                    false,
                    false,
                ));
            }
            let definition = builder.build_in_namespace(&namespace);
            loaded.well_known_types.insert(well_known, definition.clone());
            well_known_defs.insert(well_known, definition);
        }

        let types = TypeTable {
            special: &special_defs,
            well_known: &well_known_defs,
        };

        for (&special, definition) in &special_defs {
            if let Some(base) = special_base_type(special) {
                definition.set_base_type(types.special(base));
            }
        }
        for (&well_known, definition) in &well_known_defs {
            definition.set_base_type(types.base_of(well_known));
        }

        for member in SPECIAL_MEMBERS {
            if self.missing_special_members.contains(&member) {
                continue;
            }
            let Some(owner) = special_defs.get(&member.owner()) else {
                continue;
            };
            let shape = special_member_shape(member);
            let symbol = declare_method(owner, member.name(), &shape, &types);
            loaded.special_members.insert(member, symbol);
        }

        for member in WELL_KNOWN_MEMBERS {
            if self.missing_members.contains(&member) {
                continue;
            }
            let Some(owner) = well_known_defs.get(&member.owner()) else {
                continue;
            };
            let shape = well_known_member_shape(member);
            let symbol: SymbolRef = if shape.is_property {
                let property: SymbolRef = DeclaredProperty::new(
                    owner,
                    member.name(),
                    types.resolve(&shape.returns, &[], owner.type_parameters()),
                    Accessibility::Public,
                    DeclarationModifiers::empty(),
                    false,
                    None,
                );
                property
            } else {
                declare_method(owner, member.name(), &shape, &types)
            };
            loaded.well_known_members.insert(member, symbol);
        }

        loaded
    }
}

impl Default for CoreLibrary {
    fn default() -> Self {
        CoreLibrary::full()
    }
}

/// Symbols declared by [`CoreLibrary::load`].
#[derive(Default)]
pub(crate) struct LoadedCoreLibrary {
    pub special_types: FxHashMap<SpecialType, SymbolRef>,
    pub well_known_types: FxHashMap<WellKnownType, SymbolRef>,
    pub special_members: FxHashMap<SpecialMember, SymbolRef>,
    pub well_known_members: FxHashMap<WellKnownMember, SymbolRef>,
}

const SPECIAL_MEMBERS: [SpecialMember; 3] = [
    SpecialMember::ObjectCtor,
    SpecialMember::StringLength,
    SpecialMember::StringChars,
];

const WELL_KNOWN_MEMBERS: [WellKnownMember; 38] = [
    WellKnownMember::AttributeCtor,
    WellKnownMember::AttributeUsageAttributeCtor,
    WellKnownMember::AttributeUsageAttributeAllowMultiple,
    WellKnownMember::AttributeUsageAttributeInherited,
    WellKnownMember::ExceptionCtorString,
    WellKnownMember::InvalidOperationExceptionCtor,
    WellKnownMember::ArgumentNullExceptionCtorString,
    WellKnownMember::SwitchExpressionExceptionCtor,
    WellKnownMember::SwitchExpressionExceptionCtorObject,
    WellKnownMember::SpanLength,
    WellKnownMember::SpanGetItem,
    WellKnownMember::ReadOnlySpanLength,
    WellKnownMember::ReadOnlySpanGetItem,
    WellKnownMember::TaskGetAwaiter,
    WellKnownMember::TaskOfTGetAwaiter,
    WellKnownMember::TaskAwaiterGetResult,
    WellKnownMember::TaskAwaiterOfTGetResult,
    WellKnownMember::UnsafeAs,
    WellKnownMember::UnsafeAdd,
    WellKnownMember::UnsafeAsRef,
    WellKnownMember::MemoryMarshalCreateSpan,
    WellKnownMember::MemoryMarshalCreateReadOnlySpan,
    WellKnownMember::CompilerGeneratedAttributeCtor,
    WellKnownMember::DebuggerHiddenAttributeCtor,
    WellKnownMember::DynamicAttributeCtor,
    WellKnownMember::DynamicAttributeCtorTransformFlags,
    WellKnownMember::NullableAttributeCtorByte,
    WellKnownMember::NullableAttributeCtorTransformFlags,
    WellKnownMember::NullableContextAttributeCtor,
    WellKnownMember::NullablePublicOnlyAttributeCtor,
    WellKnownMember::NativeIntegerAttributeCtor,
    WellKnownMember::NativeIntegerAttributeCtorTransformFlags,
    WellKnownMember::TupleElementNamesAttributeCtorTransformNames,
    WellKnownMember::ScopedRefAttributeCtor,
    WellKnownMember::RefSafetyRulesAttributeCtor,
    WellKnownMember::MemorySafetyRulesAttributeCtor,
    WellKnownMember::ExtensionMarkerAttributeCtor,
    WellKnownMember::EmbeddedAttributeCtor,
];

/// Type occurring in a member signature.
#[derive(Clone, Debug)]
enum Sig {
    Void,
    Special(SpecialType),
    WellKnown(WellKnownType),
    /// Generic well-known type instantiated with one argument.
    Constructed(WellKnownType, Box<Sig>),
    SzArray(Box<Sig>),
    /// Type parameter of the owning type.
    TypeParameter(usize),
    /// Type parameter of the method itself.
    MethodTypeParameter(usize),
}

#[derive(Clone, Debug)]
struct MemberShape {
    is_static: bool,
    is_property: bool,
    method_type_parameters: usize,
    returns: Sig,
    returns_by_ref: bool,
    parameters: Vec<(Sig, RefKind)>,
}

impl MemberShape {
    fn constructor(parameters: Vec<Sig>) -> Self {
        MemberShape {
            is_static: false,
            is_property: false,
            method_type_parameters: 0,
            returns: Sig::Void,
            returns_by_ref: false,
            parameters: parameters
                .into_iter()
                .map(|sig| (sig, RefKind::None))
                .collect(),
        }
    }

    fn instance(returns: Sig, parameters: Vec<Sig>) -> Self {
        MemberShape {
            returns,
            ..MemberShape::constructor(parameters)
        }
    }

    fn property(ty: Sig) -> Self {
        MemberShape {
            is_property: true,
            ..MemberShape::instance(ty, Vec::new())
        }
    }

    fn generic_static(returns: Sig, returns_by_ref: bool, parameters: Vec<(Sig, RefKind)>) -> Self {
        let method_type_parameters = parameters
            .iter()
            .map(|(sig, _)| sig)
            .chain([&returns])
            .filter_map(|sig| match sig {
                Sig::MethodTypeParameter(ordinal) => Some(ordinal + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        MemberShape {
            is_static: true,
            is_property: false,
            method_type_parameters,
            returns,
            returns_by_ref,
            parameters,
        }
    }
}

fn special_member_shape(member: SpecialMember) -> MemberShape {
    match member {
        SpecialMember::ObjectCtor => MemberShape::constructor(Vec::new()),
        SpecialMember::StringLength => {
            MemberShape::instance(Sig::Special(SpecialType::Int32), Vec::new())
        }
        SpecialMember::StringChars => MemberShape::instance(
            Sig::Special(SpecialType::Char),
            vec![Sig::Special(SpecialType::Int32)],
        ),
    }
}

fn well_known_member_shape(member: WellKnownMember) -> MemberShape {
    use SpecialType as S;
    use WellKnownMember as M;

    let byte_array = || Sig::SzArray(Box::new(Sig::Special(S::Byte)));
    let bool_array = || Sig::SzArray(Box::new(Sig::Special(S::Boolean)));
    let t = || Sig::MethodTypeParameter(0);

    match member {
        M::AttributeCtor
        | M::InvalidOperationExceptionCtor
        | M::SwitchExpressionExceptionCtor
        | M::CompilerGeneratedAttributeCtor
        | M::DebuggerHiddenAttributeCtor
        | M::DynamicAttributeCtor
        | M::NativeIntegerAttributeCtor
        | M::ScopedRefAttributeCtor
        | M::EmbeddedAttributeCtor => MemberShape::constructor(Vec::new()),
        M::AttributeUsageAttributeCtor => {
            MemberShape::constructor(vec![Sig::WellKnown(WellKnownType::AttributeTargets)])
        }
        M::NullablePublicOnlyAttributeCtor => {
            MemberShape::constructor(vec![Sig::Special(S::Boolean)])
        }
        M::AttributeUsageAttributeAllowMultiple | M::AttributeUsageAttributeInherited => {
            MemberShape::property(Sig::Special(S::Boolean))
        }
        M::ExceptionCtorString
        | M::ArgumentNullExceptionCtorString
        | M::ExtensionMarkerAttributeCtor => {
            MemberShape::constructor(vec![Sig::Special(S::String)])
        }
        M::SwitchExpressionExceptionCtorObject => {
            MemberShape::constructor(vec![Sig::Special(S::Object)])
        }
        M::SpanLength | M::ReadOnlySpanLength => {
            MemberShape::instance(Sig::Special(S::Int32), Vec::new())
        }
        M::SpanGetItem | M::ReadOnlySpanGetItem => MemberShape {
            returns_by_ref: true,
            ..MemberShape::instance(Sig::TypeParameter(0), vec![Sig::Special(S::Int32)])
        },
        M::TaskGetAwaiter => {
            MemberShape::instance(Sig::WellKnown(WellKnownType::TaskAwaiter), Vec::new())
        }
        M::TaskOfTGetAwaiter => MemberShape::instance(
            Sig::Constructed(
                WellKnownType::TaskAwaiterOfT,
                Box::new(Sig::TypeParameter(0)),
            ),
            Vec::new(),
        ),
        M::TaskAwaiterGetResult => MemberShape::instance(Sig::Void, Vec::new()),
        M::TaskAwaiterOfTGetResult => MemberShape::instance(Sig::TypeParameter(0), Vec::new()),
        // ref TTo As<TFrom, TTo>(ref TFrom source)
        M::UnsafeAs => MemberShape::generic_static(
            Sig::MethodTypeParameter(1),
            true,
            vec![(Sig::MethodTypeParameter(0), RefKind::Ref)],
        ),
        M::UnsafeAdd => MemberShape::generic_static(
            t(),
            true,
            vec![(t(), RefKind::Ref), (Sig::Special(S::Int32), RefKind::None)],
        ),
        M::UnsafeAsRef => {
            MemberShape::generic_static(t(), true, vec![(t(), RefKind::RefReadOnlyParameter)])
        }
        M::MemoryMarshalCreateSpan => MemberShape::generic_static(
            Sig::Constructed(WellKnownType::Span, Box::new(t())),
            false,
            vec![(t(), RefKind::Ref), (Sig::Special(S::Int32), RefKind::None)],
        ),
        M::MemoryMarshalCreateReadOnlySpan => MemberShape::generic_static(
            Sig::Constructed(WellKnownType::ReadOnlySpan, Box::new(t())),
            false,
            vec![
                (t(), RefKind::RefReadOnlyParameter),
                (Sig::Special(S::Int32), RefKind::None),
            ],
        ),
        M::DynamicAttributeCtorTransformFlags | M::NativeIntegerAttributeCtorTransformFlags => {
            MemberShape::constructor(vec![bool_array()])
        }
        M::NullableAttributeCtorByte | M::NullableContextAttributeCtor => {
            MemberShape::constructor(vec![Sig::Special(S::Byte)])
        }
        M::NullableAttributeCtorTransformFlags => MemberShape::constructor(vec![byte_array()]),
        M::TupleElementNamesAttributeCtorTransformNames => {
            MemberShape::constructor(vec![Sig::SzArray(Box::new(Sig::Special(S::String)))])
        }
        M::RefSafetyRulesAttributeCtor | M::MemorySafetyRulesAttributeCtor => {
            MemberShape::constructor(vec![Sig::Special(S::Int32)])
        }
    }
}

struct TypeTable<'a> {
    special: &'a FxHashMap<SpecialType, Arc<DeclaredNamedType>>,
    well_known: &'a FxHashMap<WellKnownType, Arc<DeclaredNamedType>>,
}

impl TypeTable<'_> {
    fn special(&self, special: SpecialType) -> TypeRef {
        match self.special.get(&special) {
            Some(definition) => TypeRef::named(definition.clone()),
            None => TypeRef::error(special.to_string()),
        }
    }

    fn well_known(
        &self,
        well_known: WellKnownType,
        arguments: Vec<TypeWithAnnotations>,
    ) -> TypeRef {
        match self.well_known.get(&well_known) {
            Some(definition) if arguments.is_empty() => TypeRef::named(definition.clone()),
            Some(definition) => TypeRef::constructed(definition.clone(), arguments),
            None => TypeRef::error(well_known.to_string()),
        }
    }

    fn base_of(&self, well_known: WellKnownType) -> TypeRef {
        use WellKnownType as T;
        match well_known {
            T::AttributeTargets => self.special(SpecialType::Enum),
            T::Span | T::ReadOnlySpan | T::TaskAwaiter | T::TaskAwaiterOfT => {
                self.special(SpecialType::ValueType)
            }
            T::InvalidOperationException | T::ArgumentNullException => {
                self.well_known(T::Exception, Vec::new())
            }
            T::SwitchExpressionException => {
                self.well_known(T::InvalidOperationException, Vec::new())
            }
            T::TaskOfT => self.well_known(T::Task, Vec::new()),
            _ if is_attribute(well_known) => self.well_known(T::Attribute, Vec::new()),
            _ => self.special(SpecialType::Object),
        }
    }

    fn resolve(
        &self,
        sig: &Sig,
        method_type_parameters: &[SymbolRef],
        type_parameters: &[SymbolRef],
    ) -> TypeWithAnnotations {
        let ty = match sig {
            Sig::Void => self.special(SpecialType::Void),
            Sig::Special(special) => self.special(*special),
            Sig::WellKnown(well_known) => self.well_known(*well_known, Vec::new()),
            Sig::Constructed(well_known, argument) => {
                let argument = self.resolve(argument, method_type_parameters, type_parameters);
                self.well_known(*well_known, vec![argument])
            }
            Sig::SzArray(element) => {
                TypeRef::sz_array(self.resolve(element, method_type_parameters, type_parameters))
            }
            Sig::TypeParameter(index) => type_parameters
                .get(*index)
                .map_or_else(|| TypeRef::error("!T"), |p| TypeRef::TypeParameter(p.clone())),
            Sig::MethodTypeParameter(index) => method_type_parameters
                .get(*index)
                .map_or_else(|| TypeRef::error("!!T"), |p| TypeRef::TypeParameter(p.clone())),
        };
        TypeWithAnnotations::oblivious(ty)
    }
}

fn declare_method(
    owner: &Arc<DeclaredNamedType>,
    name: &str,
    shape: &MemberShape,
    types: &TypeTable<'_>,
) -> SymbolRef {
    let method_kind = if name == ".ctor" {
        MethodKind::Constructor
    } else {
        MethodKind::Ordinary
    };
    let mut builder = DeclaredMethod::builder(name, method_kind)
        .accessibility(Accessibility::Public)
        .ref_kind(if shape.returns_by_ref {
            RefKind::Ref
        } else {
            RefKind::None
        });
    if shape.is_static {
        builder = builder.modifiers(DeclarationModifiers::STATIC);
    }
    for ordinal in 0..shape.method_type_parameters {
        let name = if ordinal == 0 {
            "T".to_owned()
        } else {
            format!("T{ordinal}")
        };
        builder = builder.type_parameter(TypeParameterSpec::new(name));
    }
    let type_parameters = owner.type_parameters().to_vec();
    builder.build_with(owner, |method_type_parameters| MethodSignature {
        return_type: types.resolve(&shape.returns, method_type_parameters, &type_parameters),
        parameters: shape
            .parameters
            .iter()
            .enumerate()
            .map(|(ordinal, (sig, ref_kind))| {
                ParameterSpec::new(
                    format!("arg{ordinal}"),
                    types.resolve(sig, method_type_parameters, &type_parameters),
                )
                .with_ref_kind(*ref_kind)
            })
            .collect(),
    })
}

fn special_type_kind(special: SpecialType) -> TypeKind {
    if special.is_value_type() {
        TypeKind::Struct
    } else {
        TypeKind::Class
    }
}

fn special_base_type(special: SpecialType) -> Option<SpecialType> {
    match special {
        SpecialType::Object => None,
        SpecialType::Enum => Some(SpecialType::ValueType),
        SpecialType::MulticastDelegate => Some(SpecialType::Delegate),
        _ if special.is_value_type() => Some(SpecialType::ValueType),
        _ => Some(SpecialType::Object),
    }
}

fn well_known_type_kind(well_known: WellKnownType) -> TypeKind {
    if well_known == WellKnownType::AttributeTargets {
        TypeKind::Enum
    } else if well_known.is_value_type() {
        TypeKind::Struct
    } else {
        TypeKind::Class
    }
}

fn is_attribute(well_known: WellKnownType) -> bool {
    well_known != WellKnownType::Attribute && well_known.name().ends_with("Attribute")
}
