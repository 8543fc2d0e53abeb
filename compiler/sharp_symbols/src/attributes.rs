//! Attribute applications.

use std::fmt;

use crate::{AttributeTargets, ConstantValue, SymbolRef, TypeRef};

/// An attribute argument: a constant, a type, or an array of either.
#[derive(Clone, PartialEq, Debug)]
pub enum TypedConstant {
    Primitive(ConstantValue),
    /// `typeof(T)` argument.
    Type(TypeRef),
    Array(Vec<TypedConstant>),
}

impl TypedConstant {
    pub fn byte_array(values: &[u8]) -> Self {
        TypedConstant::Array(
            values
                .iter()
                .map(|&b| TypedConstant::Primitive(ConstantValue::Byte(b)))
                .collect(),
        )
    }

    pub fn bool_array(values: &[bool]) -> Self {
        TypedConstant::Array(
            values
                .iter()
                .map(|&b| TypedConstant::Primitive(ConstantValue::Bool(b)))
                .collect(),
        )
    }

    pub fn string_array(values: &[Option<String>]) -> Self {
        TypedConstant::Array(
            values
                .iter()
                .map(|value| {
                    TypedConstant::Primitive(
                        value
                            .as_deref()
                            .map_or(ConstantValue::Null, ConstantValue::string),
                    )
                })
                .collect(),
        )
    }
}

impl From<ConstantValue> for TypedConstant {
    fn from(value: ConstantValue) -> Self {
        TypedConstant::Primitive(value)
    }
}

/// An applied attribute: constructor plus arguments.
#[derive(Clone, Debug)]
pub struct AttributeData {
    /// Constructor that was invoked.
    pub constructor: SymbolRef,
    pub arguments: Vec<TypedConstant>,
    /// Property or field assignments, by member name.
    pub named_arguments: Vec<(String, TypedConstant)>,
}

impl AttributeData {
    pub fn new(constructor: SymbolRef, arguments: Vec<TypedConstant>) -> Self {
        AttributeData {
            constructor,
            arguments,
            named_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_named_argument(mut self, name: impl Into<String>, value: TypedConstant) -> Self {
        self.named_arguments.push((name.into(), value));
        self
    }

    /// The attribute class.
    pub fn attribute_class(&self) -> Option<SymbolRef> {
        self.constructor.containing_symbol()
    }

    /// Simple name of the attribute class, empty if it is gone.
    pub fn class_name(&self) -> String {
        self.attribute_class()
            .map(|class| class.name().to_owned())
            .unwrap_or_default()
    }
}

impl PartialEq for AttributeData {
    fn eq(&self, other: &Self) -> bool {
        crate::same_symbol(&self.constructor, &other.constructor)
            && self.arguments == other.arguments
            && self.named_arguments == other.named_arguments
    }
}

impl fmt::Display for AttributeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}(", self.class_name())?;
        let mut first = true;
        for argument in &self.arguments {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{argument:?}")?;
        }
        for (name, value) in &self.named_arguments {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{name} = {value:?}")?;
        }
        write!(f, ")]")
    }
}

/// `AttributeUsage` of an attribute class.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AttributeUsageInfo {
    pub valid_targets: AttributeTargets,
    pub allow_multiple: bool,
    pub inherited: bool,
}

impl AttributeUsageInfo {
    pub const fn new(
        valid_targets: AttributeTargets,
        allow_multiple: bool,
        inherited: bool,
    ) -> Self {
        AttributeUsageInfo {
            valid_targets,
            allow_multiple,
            inherited,
        }
    }
}

impl Default for AttributeUsageInfo {
    /// What the runtime assumes for attribute classes without `AttributeUsage`.
    fn default() -> Self {
        AttributeUsageInfo::new(AttributeTargets::ALL, false, true)
    }
}
