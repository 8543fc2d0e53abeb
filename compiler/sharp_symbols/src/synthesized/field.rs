//! Compiler-synthesized fields.

use std::sync::Arc;

use sharp_names::{
    make_cached_frame_instance_field_name, make_lambda_cache_field_name,
    make_primary_constructor_parameter_field_name, DebugId,
};

use crate::symbol::upgrade;
use crate::{
    Accessibility, AttributeData, ConstantValue, DeclarationModifiers, FieldSymbol,
    ModuleEmitContext, Symbol, SymbolKind, SymbolRef, TypeRef, TypeWithAnnotations,
    WeakSymbolRef,
};

/// Type of a synthesized field.
#[derive(Clone, Debug)]
pub enum FieldType {
    Fixed(TypeWithAnnotations),
    /// The containing type itself, resolved on each request. Used by the
    /// `<>9` singleton of `<>c`.
    Container,
}

#[derive(Debug)]
pub struct SynthesizedField {
    name: String,
    containing: WeakSymbolRef,
    ty: FieldType,
    accessibility: Accessibility,
    modifiers: DeclarationModifiers,
    associated: Option<WeakSymbolRef>,
    constant: Option<ConstantValue>,
    mapped_data: Option<Arc<[u8]>>,
    special_name: bool,
}

impl SynthesizedField {
    /// Private instance field of `ty`.
    pub fn new(
        name: impl Into<String>,
        containing: &WeakSymbolRef,
        ty: impl Into<TypeWithAnnotations>,
    ) -> Self {
        SynthesizedField {
            name: name.into(),
            containing: containing.clone(),
            ty: FieldType::Fixed(ty.into()),
            accessibility: Accessibility::Private,
            modifiers: DeclarationModifiers::empty(),
            associated: None,
            constant: None,
            mapped_data: None,
            special_name: false,
        }
    }

    /// `<>9`, the cached instance of a static lambda container.
    pub fn cached_frame_instance(containing: &WeakSymbolRef) -> Self {
        SynthesizedField {
            ty: FieldType::Container,
            ..SynthesizedField::new(
                make_cached_frame_instance_field_name(),
                containing,
                TypeRef::error("<>c"),
            )
        }
        .accessibility(Accessibility::Public)
        .modifiers(DeclarationModifiers::STATIC | DeclarationModifiers::READ_ONLY)
    }

    /// `<>9__{mo}_{lo}`, the cached delegate for one lambda.
    pub fn lambda_cache(
        containing: &WeakSymbolRef,
        method_id: Option<DebugId>,
        lambda_id: DebugId,
        delegate_type: TypeRef,
    ) -> Self {
        SynthesizedField::new(
            make_lambda_cache_field_name(method_id, lambda_id),
            containing,
            delegate_type,
        )
        .accessibility(Accessibility::Public)
        .modifiers(DeclarationModifiers::STATIC)
    }

    /// `<p>P`, the field capturing a primary constructor parameter.
    pub fn primary_constructor_parameter(
        containing: &WeakSymbolRef,
        parameter: &SymbolRef,
    ) -> Self {
        let ty = parameter
            .as_parameter()
            .map_or_else(|| TypeRef::error(parameter.name()).into(), |p| p.ty());
        SynthesizedField::new(
            make_primary_constructor_parameter_field_name(parameter.name()),
            containing,
            ty,
        )
    }

    /// `value__`, the instance field holding an enum's value.
    pub fn enum_value(containing: &WeakSymbolRef, underlying: TypeRef) -> Self {
        let mut field = SynthesizedField::new("value__", containing, underlying)
            .accessibility(Accessibility::Public);
        field.special_name = true;
        field
    }

    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn associated_with(mut self, symbol: &SymbolRef) -> Self {
        self.associated = Some(Arc::downgrade(symbol));
        self
    }

    #[must_use]
    pub fn constant(mut self, value: ConstantValue) -> Self {
        self.modifiers |= DeclarationModifiers::CONST | DeclarationModifiers::STATIC;
        self.constant = Some(value);
        self
    }

    /// Data mapped into the image as the field's initial value.
    #[must_use]
    pub fn mapped_data(mut self, data: Arc<[u8]>) -> Self {
        self.mapped_data = Some(data);
        self
    }

    pub fn into_symbol(self) -> SymbolRef {
        Arc::new(self)
    }
}

impl Symbol for SynthesizedField {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Field
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn containing_symbol(&self) -> Option<SymbolRef> {
        upgrade(Some(&self.containing))
    }

    fn declared_accessibility(&self) -> Accessibility {
        self.accessibility
    }

    fn is_static(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::STATIC)
    }

    fn has_special_name(&self) -> bool {
        self.special_name
    }

    fn add_synthesized_attributes(
        &self,
        module: &ModuleEmitContext,
        attributes: &mut Vec<AttributeData>,
    ) {
        let in_synthesized_type = self
            .containing_symbol()
            .and_then(|container| container.as_named_type().map(|ty| ty.is_synthesized()))
            .unwrap_or(false);
        if !in_synthesized_type {
            attributes.extend(module.compiler_generated_attribute());
        }
        module.add_type_attributes(&self.ty(), attributes);
    }

    fn as_field(&self) -> Option<&dyn FieldSymbol> {
        Some(self)
    }
}

impl FieldSymbol for SynthesizedField {
    fn ty(&self) -> TypeWithAnnotations {
        match &self.ty {
            FieldType::Fixed(ty) => ty.clone(),
            FieldType::Container => match self.containing_symbol() {
                Some(container) => {
                    TypeWithAnnotations::not_annotated(TypeRef::for_definition(container))
                }
                None => TypeWithAnnotations::oblivious(TypeRef::error(self.name.as_str())),
            },
        }
    }

    fn is_read_only(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::READ_ONLY)
    }

    fn is_const(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::CONST)
    }

    fn constant_value(&self) -> Option<ConstantValue> {
        self.constant.clone()
    }

    fn associated_symbol(&self) -> Option<SymbolRef> {
        upgrade(self.associated.as_ref())
    }

    fn mapped_data(&self) -> Option<&[u8]> {
        self.mapped_data.as_deref()
    }
}
