//! Sharp Symbols - Symbol Model and Compiler-Synthesized Declarations
//!
//! This crate contains the symbol model lowering works against:
//! - The `Symbol` contract and its capability traits
//! - Type references, nullable annotations and type substitution
//! - Declared symbols standing in for binder and metadata output
//! - Every family of synthesized symbol (closures, state machines,
//!   delegates, accessors, forwarders, embedded attributes, entry points)
//! - The per-module helper container and emission context
//!
//! # Design Philosophy
//!
//! - **One contract**: synthesized and declared symbols answer the same
//!   queries; later phases never branch on where a symbol came from
//! - **Owned downwards**: containers hold members by `Arc`, members hold
//!   their container by `Weak`
//! - **Write once**: lazily computed parts live in `OnceLock` cells, so
//!   concurrent readers always observe the same instance
//! - **Degrade, don't abort**: a core library lacking a member yields a
//!   CS0656 diagnostic and an empty-but-valid symbol

mod attributes;
mod body;
mod compilation;
mod completion;
mod constant;
mod corlib;
pub mod declared;
mod emit_context;
mod error;
mod flags;
mod kinds;
mod symbol;
pub mod synthesized;
mod type_map;
mod types;

pub use attributes::{AttributeData, AttributeUsageInfo, TypedConstant};
pub use body::{
    BinaryOperator, BodyFactory, BoundBlock, BoundExpr, BoundLocal, BoundStmt, LabelId, LocalId,
};
pub use compilation::{Compilation, CompilationContext};
pub use completion::{CancellationToken, CompletionPart, CompletionState};
pub use constant::ConstantValue;
pub use corlib::CoreLibrary;
pub use emit_context::{EmitOptions, ModuleEmitContext};
pub use error::SynthesisError;
pub use flags::{
    AttributeTargets, DeclarationModifiers, EmbeddableAttributes, MethodImplFlags, TypeFlags,
};
pub use kinds::{
    Accessibility, MemberOwner, MethodKind, NullableAnnotation, ScopedKind, SpecialMember,
    SpecialType, SymbolKind, TypeKind, VarianceKind, WellKnownMember, WellKnownType,
};
pub use symbol::{
    containing_type, qualified_name, same_symbol, FieldSymbol, MethodSymbol, NamedTypeSymbol,
    NamespaceSymbol, ParameterSymbol, PropertySymbol, Symbol, SymbolKey, SymbolRef,
    TypeParameterSymbol, WeakSymbolRef,
};
pub use type_map::TypeMap;
pub use types::{TypeRef, TypeWithAnnotations};
