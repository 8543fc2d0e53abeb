//! Type references.
//!
//! A [`TypeRef`] names a type as it occurs in a signature. Named types
//! refer to their definition symbol; equality on definitions is identity,
//! so two references are equal exactly when they name the same symbol
//! with equal type arguments.

use std::fmt;
use std::sync::Arc;

use crate::{same_symbol, NullableAnnotation, SpecialType, SymbolRef, TypeFlags};

/// A type as it occurs in a signature.
#[derive(Clone)]
pub enum TypeRef {
    /// A class, struct, interface, delegate or enum, possibly constructed.
    Named {
        definition: SymbolRef,
        type_arguments: Arc<[TypeWithAnnotations]>,
    },
    /// A type or method type parameter.
    TypeParameter(SymbolRef),
    /// Single- or multi-dimensional array.
    Array {
        element: Box<TypeWithAnnotations>,
        rank: u32,
    },
    Pointer(Box<TypeRef>),
    /// `dynamic`, erased to `object` in metadata.
    Dynamic,
    /// `nint` and `nuint`, erased to `IntPtr`/`UIntPtr`.
    NativeInteger { signed: bool },
    /// Tuple with optional element names, erased to `ValueTuple`.
    Tuple {
        elements: Arc<[TypeWithAnnotations]>,
        names: Option<Arc<[Option<String>]>>,
    },
    /// A type that could not be resolved.
    Error(Arc<str>),
}

impl TypeRef {
    /// Non-generic named type.
    pub fn named(definition: SymbolRef) -> Self {
        TypeRef::Named {
            definition,
            type_arguments: Arc::from([]),
        }
    }

    /// Constructed generic type.
    pub fn constructed(definition: SymbolRef, type_arguments: Vec<TypeWithAnnotations>) -> Self {
        TypeRef::Named {
            definition,
            type_arguments: type_arguments.into(),
        }
    }

    /// The type a definition declares, constructed over its own type
    /// parameters. This is the type of `this` inside the definition.
    pub fn for_definition(definition: SymbolRef) -> Self {
        let type_arguments: Vec<TypeWithAnnotations> = definition
            .as_named_type()
            .map(|ty| {
                ty.type_parameters()
                    .iter()
                    .cloned()
                    .map(TypeRef::TypeParameter)
                    .map(TypeWithAnnotations::oblivious)
                    .collect()
            })
            .unwrap_or_default();
        TypeRef::constructed(definition, type_arguments)
    }

    pub fn sz_array(element: TypeWithAnnotations) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn error(name: impl Into<Arc<str>>) -> Self {
        TypeRef::Error(name.into())
    }

    /// Reference to `special`, or an error type when `definition` is missing.
    pub fn special_or_error(definition: Option<SymbolRef>, special: SpecialType) -> Self {
        definition.map_or_else(|| TypeRef::error(special.to_string()), TypeRef::named)
    }

    pub fn definition(&self) -> Option<&SymbolRef> {
        match self {
            TypeRef::Named { definition, .. } => Some(definition),
            _ => None,
        }
    }

    pub fn type_arguments(&self) -> &[TypeWithAnnotations] {
        match self {
            TypeRef::Named { type_arguments, .. } => type_arguments,
            _ => &[],
        }
    }

    pub fn special_type(&self) -> Option<SpecialType> {
        self.definition()?.as_named_type()?.special_type()
    }

    pub fn is_void(&self) -> bool {
        self.special_type() == Some(SpecialType::Void)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TypeRef::Error(_))
    }

    pub fn is_value_type(&self) -> bool {
        match self {
            TypeRef::Named { definition, .. } => definition
                .as_named_type()
                .is_some_and(|ty| ty.is_value_type()),
            TypeRef::TypeParameter(parameter) => parameter
                .as_type_parameter()
                .is_some_and(|p| {
                    p.has_value_type_constraint() || p.has_unmanaged_type_constraint()
                }),
            TypeRef::NativeInteger { .. } | TypeRef::Tuple { .. } | TypeRef::Pointer(_) => true,
            TypeRef::Array { .. } | TypeRef::Dynamic | TypeRef::Error(_) => false,
        }
    }

    /// Whether `nint`/`nuint` occurs anywhere in the type.
    pub fn contains_native_integer(&self) -> bool {
        self.flags().contains(TypeFlags::HAS_NATIVE_INTEGER)
    }

    pub fn contains_dynamic(&self) -> bool {
        self.flags().contains(TypeFlags::HAS_DYNAMIC)
    }

    pub fn contains_tuple_names(&self) -> bool {
        self.flags().contains(TypeFlags::HAS_TUPLE_NAMES)
    }

    /// Presence flags for the whole type tree.
    pub fn flags(&self) -> TypeFlags {
        let mut flags = TypeFlags::empty();
        self.visit(&mut |ty| {
            flags |= match ty {
                TypeRef::Dynamic => TypeFlags::HAS_DYNAMIC,
                TypeRef::NativeInteger { .. } => TypeFlags::HAS_NATIVE_INTEGER,
                TypeRef::Tuple { names: Some(_), .. } => TypeFlags::HAS_TUPLE_NAMES,
                TypeRef::TypeParameter(_) => TypeFlags::HAS_TYPE_PARAMETER,
                TypeRef::Error(_) => TypeFlags::HAS_ERROR,
                _ => TypeFlags::empty(),
            };
        });
        flags
    }

    /// Pre-order walk over this type and every nested type.
    pub fn visit(&self, f: &mut impl FnMut(&TypeRef)) {
        f(self);
        match self {
            TypeRef::Named { type_arguments, .. } => {
                for argument in type_arguments.iter() {
                    argument.ty.visit(f);
                }
            }
            TypeRef::Tuple { elements, .. } => {
                for element in elements.iter() {
                    element.ty.visit(f);
                }
            }
            TypeRef::Array { element, .. } => element.ty.visit(f),
            TypeRef::Pointer(pointee) => pointee.visit(f),
            TypeRef::TypeParameter(_)
            | TypeRef::Dynamic
            | TypeRef::NativeInteger { .. }
            | TypeRef::Error(_) => {}
        }
    }

    /// One flag per `dynamic` position for `DynamicAttribute`: `true` where
    /// the erased `object` was `dynamic`.
    pub fn dynamic_transform_flags(&self) -> Vec<bool> {
        let mut flags = Vec::new();
        self.visit(&mut |ty| flags.push(matches!(ty, TypeRef::Dynamic)));
        flags
    }

    /// One flag per `IntPtr`/`UIntPtr` position for `NativeIntegerAttribute`.
    pub fn native_integer_transform_flags(&self) -> Vec<bool> {
        let mut flags = Vec::new();
        self.visit(&mut |ty| match ty {
            TypeRef::NativeInteger { .. } => flags.push(true),
            TypeRef::Named { .. }
                if matches!(
                    ty.special_type(),
                    Some(SpecialType::IntPtr | SpecialType::UIntPtr)
                ) =>
            {
                flags.push(false);
            }
            _ => {}
        });
        flags
    }

    /// Element names of every tuple in the type, flattened in pre-order.
    pub fn tuple_element_names(&self) -> Vec<Option<String>> {
        let mut names = Vec::new();
        self.visit(&mut |ty| {
            if let TypeRef::Tuple { elements, names: element_names } = ty {
                match element_names {
                    Some(element_names) => names.extend(element_names.iter().cloned()),
                    None => names.extend(std::iter::repeat_n(None, elements.len())),
                }
            }
        });
        names
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                TypeRef::Named {
                    definition: a,
                    type_arguments: a_args,
                },
                TypeRef::Named {
                    definition: b,
                    type_arguments: b_args,
                },
            ) => same_symbol(a, b) && a_args == b_args,
            (TypeRef::TypeParameter(a), TypeRef::TypeParameter(b)) => same_symbol(a, b),
            (
                TypeRef::Array { element: a, rank: ra },
                TypeRef::Array { element: b, rank: rb },
            ) => ra == rb && a == b,
            (TypeRef::Pointer(a), TypeRef::Pointer(b)) => a == b,
            (TypeRef::Dynamic, TypeRef::Dynamic) => true,
            (TypeRef::NativeInteger { signed: a }, TypeRef::NativeInteger { signed: b }) => a == b,
            (
                TypeRef::Tuple {
                    elements: a,
                    names: an,
                },
                TypeRef::Tuple {
                    elements: b,
                    names: bn,
                },
            ) => a == b && an == bn,
            (TypeRef::Error(a), TypeRef::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({self})")
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named {
                definition,
                type_arguments,
            } => {
                write!(f, "{}", definition.name())?;
                if !type_arguments.is_empty() {
                    write!(f, "<")?;
                    for (i, argument) in type_arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::TypeParameter(parameter) => write!(f, "{}", parameter.name()),
            TypeRef::Array { element, rank } => {
                let commas = ",".repeat((*rank as usize).saturating_sub(1));
                write!(f, "{element}[{commas}]")
            }
            TypeRef::Pointer(pointee) => write!(f, "{pointee}*"),
            TypeRef::Dynamic => write!(f, "dynamic"),
            TypeRef::NativeInteger { signed: true } => write!(f, "nint"),
            TypeRef::NativeInteger { signed: false } => write!(f, "nuint"),
            TypeRef::Tuple { elements, names } => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                    if let Some(Some(name)) = names.as_ref().and_then(|names| names.get(i)) {
                        write!(f, " {name}")?;
                    }
                }
                write!(f, ")")
            }
            TypeRef::Error(name) => write!(f, "?{name}"),
        }
    }
}

/// A type together with its top-level nullable annotation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeWithAnnotations {
    pub ty: TypeRef,
    pub annotation: NullableAnnotation,
}

impl TypeWithAnnotations {
    pub fn new(ty: TypeRef, annotation: NullableAnnotation) -> Self {
        TypeWithAnnotations { ty, annotation }
    }

    /// Type written outside any nullable context.
    pub fn oblivious(ty: TypeRef) -> Self {
        TypeWithAnnotations::new(ty, NullableAnnotation::Oblivious)
    }

    pub fn not_annotated(ty: TypeRef) -> Self {
        TypeWithAnnotations::new(ty, NullableAnnotation::NotAnnotated)
    }

    pub fn annotated(ty: TypeRef) -> Self {
        TypeWithAnnotations::new(ty, NullableAnnotation::Annotated)
    }

    /// `NullableAttribute` flags: one byte per reference-type position
    /// in pre-order. Value types contribute no byte of their own.
    pub fn nullable_transform_flags(&self) -> Vec<u8> {
        let mut flags = Vec::new();
        push_nullable_flags(self, &mut flags);
        flags
    }

    /// Whether any position carries a non-oblivious annotation.
    pub fn needs_nullable_attribute(&self) -> bool {
        self.nullable_transform_flags().iter().any(|&flag| flag != 0)
    }
}

fn push_nullable_flags(ty: &TypeWithAnnotations, flags: &mut Vec<u8>) {
    match &ty.ty {
        TypeRef::Named { type_arguments, .. } => {
            if !ty.ty.is_value_type() {
                flags.push(ty.annotation.transform_flag());
            }
            for argument in type_arguments.iter() {
                push_nullable_flags(argument, flags);
            }
        }
        TypeRef::Tuple { elements, .. } => {
            for element in elements.iter() {
                push_nullable_flags(element, flags);
            }
        }
        TypeRef::Array { element, .. } => {
            flags.push(ty.annotation.transform_flag());
            push_nullable_flags(element, flags);
        }
        TypeRef::TypeParameter(_) | TypeRef::Dynamic => {
            if !ty.ty.is_value_type() {
                flags.push(ty.annotation.transform_flag());
            }
        }
        TypeRef::Pointer(_) | TypeRef::NativeInteger { .. } | TypeRef::Error(_) => {}
    }
}

impl fmt::Display for TypeWithAnnotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if self.annotation == NullableAnnotation::Annotated {
            write!(f, "?")?;
        }
        Ok(())
    }
}

impl From<TypeRef> for TypeWithAnnotations {
    fn from(ty: TypeRef) -> Self {
        TypeWithAnnotations::oblivious(ty)
    }
}
