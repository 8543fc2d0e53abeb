//! Constructors of synthesized types.

use std::sync::Arc;

use super::{BodyGenerator, SynthesizedMethod, SynthesizedMethodBuilder};
use crate::{
    containing_type, Accessibility, BodyFactory, BoundBlock, MethodKind, TypeRef, WeakSymbolRef,
};

/// `.ctor()` builder with a body that only calls the base constructor.
///
/// Constructors default to parameterless; callers add parameters and
/// replace the body as needed.
pub fn instance_constructor(void_type: TypeRef) -> SynthesizedMethodBuilder {
    SynthesizedMethod::builder(".ctor", MethodKind::Constructor, void_type)
        .accessibility(Accessibility::Public)
        .body(BaseConstructorBody)
}

pub fn default_constructor(
    containing: &WeakSymbolRef,
    void_type: TypeRef,
) -> Arc<SynthesizedMethod> {
    instance_constructor(void_type).build(containing)
}

/// `.cctor()` builder. The body must be supplied.
pub fn static_constructor(void_type: TypeRef) -> SynthesizedMethodBuilder {
    SynthesizedMethod::builder(".cctor", MethodKind::StaticConstructor, void_type)
}

/// `base(); return;`
#[derive(Debug)]
pub struct BaseConstructorBody;

impl BodyGenerator for BaseConstructorBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let mut statements = Vec::new();
        statements.extend(factory.base_constructor_call());
        statements.push(factory.return_void());
        Some(factory.block(statements))
    }
}

/// `<>9 = new <>c(); return;`, the static constructor of `<>c`.
#[derive(Debug)]
pub struct SingletonInitializerBody;

impl BodyGenerator for SingletonInitializerBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let container = containing_type(factory.method().as_ref())?;
        let container = container.as_named_type()?;
        let field = container
            .get_members(&sharp_names::make_cached_frame_instance_field_name())
            .into_iter()
            .next()?;
        let constructor = container.instance_constructors().into_iter().next();
        let instance = factory.new_object(constructor, Vec::new());
        let statements = vec![
            factory.assign(factory.field(field), instance),
            factory.return_void(),
        ];
        Some(factory.block(statements))
    }
}
