//! Declared symbols: what the binder produces for source declarations and
//! what the metadata reader produces for referenced assemblies.
//!
//! These are mutable while being populated (members are appended, base
//! types and signatures are set once) and otherwise behave like any other
//! symbol. Synthesis treats them as the entities it decorates.

mod field;
mod method;
mod named_type;
mod namespace;
mod parameter;
mod property;
mod type_parameter;

pub use field::{DeclaredField, DeclaredFieldBuilder};
pub use method::{DeclaredMethod, DeclaredMethodBuilder, MethodSignature};
pub use named_type::{DeclaredNamedType, DeclaredNamedTypeBuilder};
pub use namespace::DeclaredNamespace;
pub use parameter::{DeclaredParameter, ParameterSpec};
pub use property::DeclaredProperty;
pub use type_parameter::{DeclaredTypeParameter, TypeParameterSpec};

#[cfg(test)]
mod tests;
