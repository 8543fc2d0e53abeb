//! Compile-time constant values.

use std::fmt;
use std::sync::Arc;

/// A constant as it appears in default parameter values, field
/// initializers and attribute arguments.
#[derive(Clone, PartialEq, Debug)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Char(char),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    Float64(f64),
    String(Arc<str>),
}

impl ConstantValue {
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        ConstantValue::String(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConstantValue::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            ConstantValue::Byte(v) => Some(i32::from(v)),
            ConstantValue::Int16(v) => Some(i32::from(v)),
            ConstantValue::Int32(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => write!(f, "null"),
            ConstantValue::Bool(v) => write!(f, "{v}"),
            ConstantValue::Char(v) => write!(f, "'{v}'"),
            ConstantValue::Byte(v) => write!(f, "{v}"),
            ConstantValue::Int16(v) => write!(f, "{v}"),
            ConstantValue::Int32(v) => write!(f, "{v}"),
            ConstantValue::Int64(v) => write!(f, "{v}L"),
            ConstantValue::UInt32(v) => write!(f, "{v}u"),
            ConstantValue::Float64(v) => write!(f, "{v}"),
            ConstantValue::String(v) => write!(f, "{v:?}"),
        }
    }
}
