//! Closed enumerations of the symbol model: symbol and type categories,
//! and the core-library types and members synthesis depends on.

use std::fmt;

/// Category of a symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Namespace,
    NamedType,
    Method,
    Field,
    Parameter,
    Property,
    TypeParameter,
}

/// Declared accessibility, ordered from least to most accessible.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, Default)]
pub enum Accessibility {
    #[default]
    NotApplicable,
    Private,
    ProtectedAndInternal,
    Protected,
    Internal,
    ProtectedOrInternal,
    Public,
}

/// Category of a named type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Delegate,
    Enum,
}

/// Role a method plays.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MethodKind {
    Ordinary,
    Constructor,
    StaticConstructor,
    PropertyGet,
    PropertySet,
    DelegateInvoke,
    ExplicitInterfaceImplementation,
    LambdaMethod,
    LocalFunction,
}

impl MethodKind {
    pub const fn is_constructor(self) -> bool {
        matches!(self, MethodKind::Constructor | MethodKind::StaticConstructor)
    }
}

/// Nullable annotation of a type occurrence.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum NullableAnnotation {
    /// Written outside a nullable context.
    #[default]
    Oblivious,
    NotAnnotated,
    Annotated,
}

impl NullableAnnotation {
    /// Byte recorded for this annotation in `NullableAttribute` flags.
    pub const fn transform_flag(self) -> u8 {
        match self {
            NullableAnnotation::Oblivious => 0,
            NullableAnnotation::NotAnnotated => 1,
            NullableAnnotation::Annotated => 2,
        }
    }
}

/// `scoped` modifier of a parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ScopedKind {
    #[default]
    None,
    ScopedRef,
    ScopedValue,
}

/// Variance of a type parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum VarianceKind {
    #[default]
    None,
    Out,
    In,
}

/// Core-library types every compilation must reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpecialType {
    Object,
    Void,
    Boolean,
    Char,
    Byte,
    Int16,
    Int32,
    Int64,
    UInt32,
    IntPtr,
    UIntPtr,
    String,
    ValueType,
    Enum,
    Delegate,
    MulticastDelegate,
    Array,
}

impl SpecialType {
    pub const ALL: [SpecialType; 17] = [
        SpecialType::Object,
        SpecialType::Void,
        SpecialType::Boolean,
        SpecialType::Char,
        SpecialType::Byte,
        SpecialType::Int16,
        SpecialType::Int32,
        SpecialType::Int64,
        SpecialType::UInt32,
        SpecialType::IntPtr,
        SpecialType::UIntPtr,
        SpecialType::String,
        SpecialType::ValueType,
        SpecialType::Enum,
        SpecialType::Delegate,
        SpecialType::MulticastDelegate,
        SpecialType::Array,
    ];

    /// Simple name within `System`.
    pub const fn name(self) -> &'static str {
        match self {
            SpecialType::Object => "Object",
            SpecialType::Void => "Void",
            SpecialType::Boolean => "Boolean",
            SpecialType::Char => "Char",
            SpecialType::Byte => "Byte",
            SpecialType::Int16 => "Int16",
            SpecialType::Int32 => "Int32",
            SpecialType::Int64 => "Int64",
            SpecialType::UInt32 => "UInt32",
            SpecialType::IntPtr => "IntPtr",
            SpecialType::UIntPtr => "UIntPtr",
            SpecialType::String => "String",
            SpecialType::ValueType => "ValueType",
            SpecialType::Enum => "Enum",
            SpecialType::Delegate => "Delegate",
            SpecialType::MulticastDelegate => "MulticastDelegate",
            SpecialType::Array => "Array",
        }
    }

    pub const fn is_value_type(self) -> bool {
        matches!(
            self,
            SpecialType::Void
                | SpecialType::Boolean
                | SpecialType::Char
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::Int32
                | SpecialType::Int64
                | SpecialType::UInt32
                | SpecialType::IntPtr
                | SpecialType::UIntPtr
        )
    }
}

impl fmt::Display for SpecialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "System.{}", self.name())
    }
}

/// Core-library types synthesis uses when present.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WellKnownType {
    Attribute,
    AttributeUsageAttribute,
    AttributeTargets,
    Exception,
    InvalidOperationException,
    ArgumentNullException,
    Span,
    ReadOnlySpan,
    Task,
    TaskOfT,
    TaskAwaiter,
    TaskAwaiterOfT,
    Unsafe,
    MemoryMarshal,
    SwitchExpressionException,
    CompilerGeneratedAttribute,
    DebuggerHiddenAttribute,
    DynamicAttribute,
    NullableAttribute,
    NullableContextAttribute,
    NullablePublicOnlyAttribute,
    NativeIntegerAttribute,
    TupleElementNamesAttribute,
    ScopedRefAttribute,
    RefSafetyRulesAttribute,
    MemorySafetyRulesAttribute,
    ExtensionMarkerAttribute,
    EmbeddedAttribute,
}

impl WellKnownType {
    pub const ALL: [WellKnownType; 28] = [
        WellKnownType::Attribute,
        WellKnownType::AttributeUsageAttribute,
        WellKnownType::AttributeTargets,
        WellKnownType::Exception,
        WellKnownType::InvalidOperationException,
        WellKnownType::ArgumentNullException,
        WellKnownType::Span,
        WellKnownType::ReadOnlySpan,
        WellKnownType::Task,
        WellKnownType::TaskOfT,
        WellKnownType::TaskAwaiter,
        WellKnownType::TaskAwaiterOfT,
        WellKnownType::Unsafe,
        WellKnownType::MemoryMarshal,
        WellKnownType::SwitchExpressionException,
        WellKnownType::CompilerGeneratedAttribute,
        WellKnownType::DebuggerHiddenAttribute,
        WellKnownType::DynamicAttribute,
        WellKnownType::NullableAttribute,
        WellKnownType::NullableContextAttribute,
        WellKnownType::NullablePublicOnlyAttribute,
        WellKnownType::NativeIntegerAttribute,
        WellKnownType::TupleElementNamesAttribute,
        WellKnownType::ScopedRefAttribute,
        WellKnownType::RefSafetyRulesAttribute,
        WellKnownType::MemorySafetyRulesAttribute,
        WellKnownType::ExtensionMarkerAttribute,
        WellKnownType::EmbeddedAttribute,
    ];

    pub const fn namespace(self) -> &'static str {
        match self {
            WellKnownType::Attribute
            | WellKnownType::AttributeUsageAttribute
            | WellKnownType::AttributeTargets
            | WellKnownType::Exception
            | WellKnownType::InvalidOperationException
            | WellKnownType::ArgumentNullException
            | WellKnownType::Span
            | WellKnownType::ReadOnlySpan => "System",
            WellKnownType::Task | WellKnownType::TaskOfT => "System.Threading.Tasks",
            WellKnownType::MemoryMarshal => "System.Runtime.InteropServices",
            WellKnownType::DebuggerHiddenAttribute => "System.Diagnostics",
            WellKnownType::EmbeddedAttribute => "Microsoft.CodeAnalysis",
            WellKnownType::TaskAwaiter
            | WellKnownType::TaskAwaiterOfT
            | WellKnownType::Unsafe
            | WellKnownType::SwitchExpressionException
            | WellKnownType::CompilerGeneratedAttribute
            | WellKnownType::DynamicAttribute
            | WellKnownType::NullableAttribute
            | WellKnownType::NullableContextAttribute
            | WellKnownType::NullablePublicOnlyAttribute
            | WellKnownType::NativeIntegerAttribute
            | WellKnownType::TupleElementNamesAttribute
            | WellKnownType::ScopedRefAttribute
            | WellKnownType::RefSafetyRulesAttribute
            | WellKnownType::MemorySafetyRulesAttribute
            | WellKnownType::ExtensionMarkerAttribute => "System.Runtime.CompilerServices",
        }
    }

    /// Simple name without arity.
    pub const fn name(self) -> &'static str {
        match self {
            WellKnownType::Attribute => "Attribute",
            WellKnownType::AttributeUsageAttribute => "AttributeUsageAttribute",
            WellKnownType::AttributeTargets => "AttributeTargets",
            WellKnownType::Exception => "Exception",
            WellKnownType::InvalidOperationException => "InvalidOperationException",
            WellKnownType::ArgumentNullException => "ArgumentNullException",
            WellKnownType::Span => "Span",
            WellKnownType::ReadOnlySpan => "ReadOnlySpan",
            WellKnownType::Task | WellKnownType::TaskOfT => "Task",
            WellKnownType::TaskAwaiter | WellKnownType::TaskAwaiterOfT => "TaskAwaiter",
            WellKnownType::Unsafe => "Unsafe",
            WellKnownType::MemoryMarshal => "MemoryMarshal",
            WellKnownType::SwitchExpressionException => "SwitchExpressionException",
            WellKnownType::CompilerGeneratedAttribute => "CompilerGeneratedAttribute",
            WellKnownType::DebuggerHiddenAttribute => "DebuggerHiddenAttribute",
            WellKnownType::DynamicAttribute => "DynamicAttribute",
            WellKnownType::NullableAttribute => "NullableAttribute",
            WellKnownType::NullableContextAttribute => "NullableContextAttribute",
            WellKnownType::NullablePublicOnlyAttribute => "NullablePublicOnlyAttribute",
            WellKnownType::NativeIntegerAttribute => "NativeIntegerAttribute",
            WellKnownType::TupleElementNamesAttribute => "TupleElementNamesAttribute",
            WellKnownType::ScopedRefAttribute => "ScopedRefAttribute",
            WellKnownType::RefSafetyRulesAttribute => "RefSafetyRulesAttribute",
            WellKnownType::MemorySafetyRulesAttribute => "MemorySafetyRulesAttribute",
            WellKnownType::ExtensionMarkerAttribute => "ExtensionMarkerAttribute",
            WellKnownType::EmbeddedAttribute => "EmbeddedAttribute",
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            WellKnownType::Span
            | WellKnownType::ReadOnlySpan
            | WellKnownType::TaskOfT
            | WellKnownType::TaskAwaiterOfT => 1,
            _ => 0,
        }
    }

    pub const fn is_value_type(self) -> bool {
        matches!(
            self,
            WellKnownType::AttributeTargets
                | WellKnownType::Span
                | WellKnownType::ReadOnlySpan
                | WellKnownType::TaskAwaiter
                | WellKnownType::TaskAwaiterOfT
        )
    }

    pub const fn is_static_class(self) -> bool {
        matches!(self, WellKnownType::Unsafe | WellKnownType::MemoryMarshal)
    }

    /// The attribute this type stands for, if the module may embed its own
    /// copy when the core library lacks it.
    pub const fn embeddable(self) -> Option<crate::EmbeddableAttributes> {
        use crate::EmbeddableAttributes as E;
        match self {
            WellKnownType::EmbeddedAttribute => Some(E::EMBEDDED),
            WellKnownType::NullableAttribute => Some(E::NULLABLE),
            WellKnownType::NullableContextAttribute => Some(E::NULLABLE_CONTEXT),
            WellKnownType::NullablePublicOnlyAttribute => Some(E::NULLABLE_PUBLIC_ONLY),
            WellKnownType::NativeIntegerAttribute => Some(E::NATIVE_INTEGER),
            WellKnownType::ScopedRefAttribute => Some(E::SCOPED_REF),
            WellKnownType::RefSafetyRulesAttribute => Some(E::REF_SAFETY_RULES),
            WellKnownType::MemorySafetyRulesAttribute => Some(E::MEMORY_SAFETY_RULES),
            WellKnownType::ExtensionMarkerAttribute => Some(E::EXTENSION_MARKER),
            _ => None,
        }
    }

    /// Fully qualified metadata name, with arity suffix.
    pub fn metadata_name(self) -> String {
        match self.arity() {
            0 => format!("{}.{}", self.namespace(), self.name()),
            n => format!("{}.{}`{n}", self.namespace(), self.name()),
        }
    }
}

impl fmt::Display for WellKnownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace(), self.name())
    }
}

/// Owner of a core-library member.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberOwner {
    Special(SpecialType),
    WellKnown(WellKnownType),
}

impl fmt::Display for MemberOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberOwner::Special(special) => special.fmt(f),
            MemberOwner::WellKnown(well_known) => well_known.fmt(f),
        }
    }
}

/// Members of special types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpecialMember {
    ObjectCtor,
    StringLength,
    StringChars,
}

impl SpecialMember {
    pub const fn owner(self) -> SpecialType {
        match self {
            SpecialMember::ObjectCtor => SpecialType::Object,
            SpecialMember::StringLength | SpecialMember::StringChars => SpecialType::String,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SpecialMember::ObjectCtor => ".ctor",
            SpecialMember::StringLength => "get_Length",
            SpecialMember::StringChars => "get_Chars",
        }
    }
}

/// Members of well-known types.
///
/// Several constructors share a name; the variant fixes the signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WellKnownMember {
    AttributeCtor,
    AttributeUsageAttributeCtor,
    AttributeUsageAttributeAllowMultiple,
    AttributeUsageAttributeInherited,
    ExceptionCtorString,
    InvalidOperationExceptionCtor,
    ArgumentNullExceptionCtorString,
    SwitchExpressionExceptionCtor,
    SwitchExpressionExceptionCtorObject,
    SpanLength,
    SpanGetItem,
    ReadOnlySpanLength,
    ReadOnlySpanGetItem,
    TaskGetAwaiter,
    TaskOfTGetAwaiter,
    TaskAwaiterGetResult,
    TaskAwaiterOfTGetResult,
    UnsafeAs,
    UnsafeAdd,
    UnsafeAsRef,
    MemoryMarshalCreateSpan,
    MemoryMarshalCreateReadOnlySpan,
    CompilerGeneratedAttributeCtor,
    DebuggerHiddenAttributeCtor,
    DynamicAttributeCtor,
    DynamicAttributeCtorTransformFlags,
    NullableAttributeCtorByte,
    NullableAttributeCtorTransformFlags,
    NullableContextAttributeCtor,
    NullablePublicOnlyAttributeCtor,
    NativeIntegerAttributeCtor,
    NativeIntegerAttributeCtorTransformFlags,
    TupleElementNamesAttributeCtorTransformNames,
    ScopedRefAttributeCtor,
    RefSafetyRulesAttributeCtor,
    MemorySafetyRulesAttributeCtor,
    ExtensionMarkerAttributeCtor,
    EmbeddedAttributeCtor,
}

impl WellKnownMember {
    pub const fn owner(self) -> WellKnownType {
        use WellKnownMember as M;
        use WellKnownType as T;
        match self {
            M::AttributeCtor => T::Attribute,
            M::AttributeUsageAttributeCtor
            | M::AttributeUsageAttributeAllowMultiple
            | M::AttributeUsageAttributeInherited => T::AttributeUsageAttribute,
            M::ExceptionCtorString => T::Exception,
            M::InvalidOperationExceptionCtor => T::InvalidOperationException,
            M::ArgumentNullExceptionCtorString => T::ArgumentNullException,
            M::SwitchExpressionExceptionCtor | M::SwitchExpressionExceptionCtorObject => {
                T::SwitchExpressionException
            }
            M::SpanLength | M::SpanGetItem => T::Span,
            M::ReadOnlySpanLength | M::ReadOnlySpanGetItem => T::ReadOnlySpan,
            M::TaskGetAwaiter => T::Task,
            M::TaskOfTGetAwaiter => T::TaskOfT,
            M::TaskAwaiterGetResult => T::TaskAwaiter,
            M::TaskAwaiterOfTGetResult => T::TaskAwaiterOfT,
            M::UnsafeAs | M::UnsafeAdd | M::UnsafeAsRef => T::Unsafe,
            M::MemoryMarshalCreateSpan | M::MemoryMarshalCreateReadOnlySpan => T::MemoryMarshal,
            M::CompilerGeneratedAttributeCtor => T::CompilerGeneratedAttribute,
            M::DebuggerHiddenAttributeCtor => T::DebuggerHiddenAttribute,
            M::DynamicAttributeCtor | M::DynamicAttributeCtorTransformFlags => T::DynamicAttribute,
            M::NullableAttributeCtorByte | M::NullableAttributeCtorTransformFlags => {
                T::NullableAttribute
            }
            M::NullableContextAttributeCtor => T::NullableContextAttribute,
            M::NullablePublicOnlyAttributeCtor => T::NullablePublicOnlyAttribute,
            M::NativeIntegerAttributeCtor | M::NativeIntegerAttributeCtorTransformFlags => {
                T::NativeIntegerAttribute
            }
            M::TupleElementNamesAttributeCtorTransformNames => T::TupleElementNamesAttribute,
            M::ScopedRefAttributeCtor => T::ScopedRefAttribute,
            M::RefSafetyRulesAttributeCtor => T::RefSafetyRulesAttribute,
            M::MemorySafetyRulesAttributeCtor => T::MemorySafetyRulesAttribute,
            M::ExtensionMarkerAttributeCtor => T::ExtensionMarkerAttribute,
            M::EmbeddedAttributeCtor => T::EmbeddedAttribute,
        }
    }

    /// Metadata name of the member.
    pub const fn name(self) -> &'static str {
        use WellKnownMember as M;
        match self {
            M::AttributeUsageAttributeAllowMultiple => "AllowMultiple",
            M::AttributeUsageAttributeInherited => "Inherited",
            M::SpanLength | M::ReadOnlySpanLength => "get_Length",
            M::SpanGetItem | M::ReadOnlySpanGetItem => "get_Item",
            M::TaskGetAwaiter | M::TaskOfTGetAwaiter => "GetAwaiter",
            M::TaskAwaiterGetResult | M::TaskAwaiterOfTGetResult => "GetResult",
            M::UnsafeAs => "As",
            M::UnsafeAdd => "Add",
            M::UnsafeAsRef => "AsRef",
            M::MemoryMarshalCreateSpan => "CreateSpan",
            M::MemoryMarshalCreateReadOnlySpan => "CreateReadOnlySpan",
            _ => ".ctor",
        }
    }
}

#[cfg(test)]
mod tests;
