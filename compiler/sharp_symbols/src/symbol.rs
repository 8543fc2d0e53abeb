//! The polymorphic symbol contract.
//!
//! Every declaration, whether written by the user, read from metadata or
//! invented by the compiler during lowering, implements [`Symbol`]. Kind
//! specific members live on capability traits reached through the `as_*`
//! accessors, so later phases never need to know which family a symbol
//! came from.
//!
//! # Ownership
//!
//! A container owns its members (`Arc` downwards); members point back at
//! their container through a `Weak` (upwards). References to origin
//! entities, such as the interface method a forwarder implements, are
//! `Weak` as well.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use sharp_ir::{Location, SyntaxReference};
use sharp_names::RefKind;

use crate::{
    Accessibility, AttributeData, AttributeUsageInfo, BodyFactory, BoundBlock, ConstantValue,
    MethodImplFlags, MethodKind, ModuleEmitContext, ScopedKind, SpecialType, SymbolKind, TypeKind,
    TypeRef, TypeWithAnnotations, VarianceKind,
};

/// Shared handle to any symbol.
pub type SymbolRef = Arc<dyn Symbol>;

/// Non-owning handle to any symbol.
pub type WeakSymbolRef = Weak<dyn Symbol>;

/// Members common to every declaration.
///
/// The provided defaults describe a compiler-synthesized declaration: no
/// source location, no declaring syntax, implicitly declared. Declared
/// symbols override them.
pub trait Symbol: Send + Sync + fmt::Debug {
    fn kind(&self) -> SymbolKind;

    fn name(&self) -> &str;

    /// Name as written to metadata. Generic types append their arity.
    fn metadata_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name())
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        None
    }

    fn declared_accessibility(&self) -> Accessibility {
        Accessibility::NotApplicable
    }

    fn is_static(&self) -> bool {
        false
    }

    fn is_abstract(&self) -> bool {
        false
    }

    fn is_virtual(&self) -> bool {
        false
    }

    fn is_override(&self) -> bool {
        false
    }

    fn is_sealed(&self) -> bool {
        false
    }

    fn is_extern(&self) -> bool {
        false
    }

    fn locations(&self) -> Vec<Location> {
        Vec::new()
    }

    fn declaring_syntax_references(&self) -> Vec<SyntaxReference> {
        Vec::new()
    }

    fn is_implicitly_declared(&self) -> bool {
        true
    }

    fn is_obsolete(&self) -> bool {
        false
    }

    /// Whether metadata marks the name as special (`specialname`).
    fn has_special_name(&self) -> bool {
        false
    }

    /// Attributes applied in source or read from metadata.
    fn get_attributes(&self) -> Vec<AttributeData> {
        Vec::new()
    }

    /// Append the attributes the compiler adds when emitting this symbol.
    fn add_synthesized_attributes(
        &self,
        _module: &ModuleEmitContext,
        _attributes: &mut Vec<AttributeData>,
    ) {
    }

    fn as_method(&self) -> Option<&dyn MethodSymbol> {
        None
    }

    fn as_field(&self) -> Option<&dyn FieldSymbol> {
        None
    }

    fn as_parameter(&self) -> Option<&dyn ParameterSymbol> {
        None
    }

    fn as_named_type(&self) -> Option<&dyn NamedTypeSymbol> {
        None
    }

    fn as_type_parameter(&self) -> Option<&dyn TypeParameterSymbol> {
        None
    }

    fn as_property(&self) -> Option<&dyn PropertySymbol> {
        None
    }

    fn as_namespace(&self) -> Option<&dyn NamespaceSymbol> {
        None
    }
}

/// Methods, constructors, accessors and lambdas.
pub trait MethodSymbol: Symbol {
    fn method_kind(&self) -> MethodKind;

    fn return_type(&self) -> TypeWithAnnotations;

    fn ref_kind(&self) -> RefKind {
        RefKind::None
    }

    fn parameters(&self) -> &[SymbolRef];

    fn type_parameters(&self) -> &[SymbolRef] {
        &[]
    }

    fn arity(&self) -> usize {
        self.type_parameters().len()
    }

    fn returns_void(&self) -> bool {
        self.return_type().ty.is_void()
    }

    /// The implicit `this` parameter of an instance method.
    fn this_parameter(&self) -> Option<SymbolRef> {
        None
    }

    fn is_async(&self) -> bool {
        false
    }

    fn is_metadata_virtual(&self) -> bool {
        self.is_virtual() || self.is_override() || self.is_abstract()
    }

    fn is_metadata_new_slot(&self) -> bool {
        false
    }

    fn is_metadata_final(&self) -> bool {
        false
    }

    fn explicit_interface_implementations(&self) -> Vec<SymbolRef> {
        Vec::new()
    }

    /// Property or event this method is an accessor of.
    fn associated_symbol(&self) -> Option<SymbolRef> {
        None
    }

    fn impl_flags(&self) -> MethodImplFlags {
        MethodImplFlags::empty()
    }

    /// Whether sequence points are emitted for the body.
    fn generate_debug_info(&self) -> bool {
        false
    }

    /// Build the body of a compiler-synthesized method.
    ///
    /// Returns `None` for methods whose body is supplied elsewhere
    /// (source, runtime, abstract) or could not be built.
    fn generate_body(&self, _factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        None
    }
}

/// Fields.
pub trait FieldSymbol: Symbol {
    fn ty(&self) -> TypeWithAnnotations;

    fn is_read_only(&self) -> bool {
        false
    }

    fn is_const(&self) -> bool {
        false
    }

    fn constant_value(&self) -> Option<ConstantValue> {
        None
    }

    fn ref_kind(&self) -> RefKind {
        RefKind::None
    }

    /// Property or event this field backs.
    fn associated_symbol(&self) -> Option<SymbolRef> {
        None
    }

    /// Initial data mapped into the image, for fields of
    /// `<PrivateImplementationDetails>`.
    fn mapped_data(&self) -> Option<&[u8]> {
        None
    }
}

/// Parameters, including the implicit `this`.
pub trait ParameterSymbol: Symbol {
    fn ordinal(&self) -> usize;

    fn ty(&self) -> TypeWithAnnotations;

    fn ref_kind(&self) -> RefKind {
        RefKind::None
    }

    fn scoped_kind(&self) -> ScopedKind {
        ScopedKind::None
    }

    fn explicit_default_value(&self) -> Option<ConstantValue> {
        None
    }

    fn is_params(&self) -> bool {
        false
    }

    fn is_this(&self) -> bool {
        false
    }
}

/// Classes, structs, interfaces, delegates and enums.
pub trait NamedTypeSymbol: Symbol {
    fn type_kind(&self) -> TypeKind;

    fn type_parameters(&self) -> &[SymbolRef] {
        &[]
    }

    fn arity(&self) -> usize {
        self.type_parameters().len()
    }

    fn base_type(&self) -> Option<TypeRef>;

    fn interfaces(&self) -> Vec<TypeRef> {
        Vec::new()
    }

    /// All members in declaration order.
    fn members(&self) -> Vec<SymbolRef>;

    fn get_members(&self, name: &str) -> Vec<SymbolRef> {
        self.members()
            .into_iter()
            .filter(|member| member.name() == name)
            .collect()
    }

    fn type_members(&self) -> Vec<SymbolRef> {
        self.members()
            .into_iter()
            .filter(|member| member.kind() == SymbolKind::NamedType)
            .collect()
    }

    fn instance_constructors(&self) -> Vec<SymbolRef> {
        self.members()
            .into_iter()
            .filter(|member| {
                member
                    .as_method()
                    .is_some_and(|method| method.method_kind() == MethodKind::Constructor)
            })
            .collect()
    }

    fn static_constructor(&self) -> Option<SymbolRef> {
        self.members().into_iter().find(|member| {
            member
                .as_method()
                .is_some_and(|method| method.method_kind() == MethodKind::StaticConstructor)
        })
    }

    fn is_value_type(&self) -> bool {
        matches!(self.type_kind(), TypeKind::Struct | TypeKind::Enum)
    }

    fn is_reference_type(&self) -> bool {
        !self.is_value_type()
    }

    fn special_type(&self) -> Option<SpecialType> {
        None
    }

    /// Whether the compiler invented this type.
    fn is_synthesized(&self) -> bool {
        false
    }

    /// Whether the metadata name carries a `` `N`` arity suffix.
    fn mangle_name(&self) -> bool {
        self.arity() > 0
    }

    /// Explicit size for types with a fixed layout.
    fn explicit_size(&self) -> Option<u32> {
        None
    }

    /// Usage of an attribute class.
    fn attribute_usage_info(&self) -> Option<AttributeUsageInfo> {
        None
    }

    fn delegate_invoke_method(&self) -> Option<SymbolRef> {
        if self.type_kind() != TypeKind::Delegate {
            return None;
        }
        self.get_members("Invoke").into_iter().next()
    }
}

/// Type parameters of generic types and methods.
pub trait TypeParameterSymbol: Symbol {
    fn ordinal(&self) -> usize;

    fn variance(&self) -> VarianceKind {
        VarianceKind::None
    }

    fn has_reference_type_constraint(&self) -> bool {
        false
    }

    fn has_value_type_constraint(&self) -> bool {
        false
    }

    fn has_unmanaged_type_constraint(&self) -> bool {
        false
    }

    fn has_constructor_constraint(&self) -> bool {
        false
    }

    fn constraint_types(&self) -> Vec<TypeWithAnnotations> {
        Vec::new()
    }

    /// Whether the parameter belongs to a method rather than a type.
    fn is_method_type_parameter(&self) -> bool {
        self.containing_symbol()
            .is_some_and(|owner| owner.kind() == SymbolKind::Method)
    }
}

/// Properties and indexers.
pub trait PropertySymbol: Symbol {
    fn ty(&self) -> TypeWithAnnotations;

    fn parameters(&self) -> &[SymbolRef] {
        &[]
    }

    fn get_method(&self) -> Option<SymbolRef>;

    fn set_method(&self) -> Option<SymbolRef>;

    fn is_auto_property(&self) -> bool {
        false
    }
}

/// Namespaces.
pub trait NamespaceSymbol: Symbol {
    fn members(&self) -> Vec<SymbolRef>;

    fn get_members(&self, name: &str) -> Vec<SymbolRef> {
        self.members()
            .into_iter()
            .filter(|member| member.name() == name)
            .collect()
    }

    fn is_global_namespace(&self) -> bool {
        self.containing_symbol().is_none()
    }
}

/// Identity wrapper for using symbols as map keys.
///
/// Two keys are equal when they point at the same allocation.
#[derive(Clone, Debug)]
pub struct SymbolKey(pub SymbolRef);

impl SymbolKey {
    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for SymbolKey {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for SymbolKey {}

impl Hash for SymbolKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

/// Whether two handles name the same symbol.
pub fn same_symbol(a: &SymbolRef, b: &SymbolRef) -> bool {
    Arc::ptr_eq(a, b)
}

/// Upgrade an optional weak handle.
pub(crate) fn upgrade(weak: Option<&WeakSymbolRef>) -> Option<SymbolRef> {
    weak.and_then(Weak::upgrade)
}

/// Nearest enclosing named type, the symbol itself excluded.
pub fn containing_type(symbol: &dyn Symbol) -> Option<SymbolRef> {
    let mut current = symbol.containing_symbol();
    while let Some(candidate) = current {
        if candidate.kind() == SymbolKind::NamedType {
            return Some(candidate);
        }
        current = candidate.containing_symbol();
    }
    None
}

/// Dotted name from the outermost non-global namespace down to `symbol`.
pub fn qualified_name(symbol: &dyn Symbol) -> String {
    let mut parts = vec![symbol.metadata_name().into_owned()];
    let mut current = symbol.containing_symbol();
    while let Some(candidate) = current {
        let is_global = candidate
            .as_namespace()
            .is_some_and(|namespace| namespace.is_global_namespace());
        if !is_global {
            parts.push(candidate.metadata_name().into_owned());
        }
        current = candidate.containing_symbol();
    }
    parts.reverse();
    parts.join(".")
}
