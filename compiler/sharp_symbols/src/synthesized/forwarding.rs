//! Methods that forward to another method.

use std::sync::Arc;

use sharp_names::make_base_method_wrapper_name;

use super::{BodyGenerator, MetadataSlot, SynthesizedMethod};
use crate::{
    containing_type, qualified_name, BodyFactory, BoundBlock, MethodKind, Symbol, SymbolRef,
    TypeMap, TypeRef, WeakSymbolRef,
};

/// `I.M`, an explicit implementation of `interface_method` that calls
/// `implementation` on `this`.
///
/// Forwarders are always `virtual newslot final` in metadata.
pub fn synthesize_explicit_implementation_forwarder(
    containing: &SymbolRef,
    interface_method: &SymbolRef,
    implementation: &SymbolRef,
) -> Option<Arc<SynthesizedMethod>> {
    let interface = containing_type(interface_method.as_ref())?;
    let signature = interface_method.as_method()?;
    let name = format!("{}.{}", qualified_name(interface.as_ref()), interface_method.name());
    let method = SynthesizedMethod::builder(
        name,
        MethodKind::ExplicitInterfaceImplementation,
        signature.return_type(),
    )
    .ref_kind(signature.ref_kind())
    .generic_like(interface_method)
    .parameters_from(interface_method, TypeMap::empty())
    .metadata_slot(MetadataSlot::SEALED_NEW_SLOT)
    .implements(interface_method)
    .body(ForwardingBody {
        target: Arc::downgrade(implementation),
        non_virtual: false,
    })
    .build(&Arc::downgrade(containing));
    tracing::debug!(forwarder = method.name(), "synthesized explicit implementation");
    Some(method)
}

/// `<>n__{id}`, a wrapper calling `base_method` non-virtually so a lambda
/// or state machine can reach `base.M(...)`.
pub fn synthesize_base_method_wrapper(
    containing: &SymbolRef,
    base_method: &SymbolRef,
    unique_id: u32,
) -> Option<Arc<SynthesizedMethod>> {
    let signature = base_method.as_method()?;
    Some(
        SynthesizedMethod::builder(
            make_base_method_wrapper_name(unique_id),
            MethodKind::Ordinary,
            signature.return_type(),
        )
        .ref_kind(signature.ref_kind())
        .generic_like(base_method)
        .parameters_from(base_method, TypeMap::empty())
        .debugger_hidden()
        .body(ForwardingBody {
            target: Arc::downgrade(base_method),
            non_virtual: true,
        })
        .build(&Arc::downgrade(containing)),
    )
}

/// `return this.target(args);` or, for `void` targets, the call followed
/// by `return;`.
#[derive(Debug)]
struct ForwardingBody {
    target: WeakSymbolRef,
    non_virtual: bool,
}

impl BodyGenerator for ForwardingBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let target = self.target.upgrade()?;
        let returns_void = target.as_method()?.returns_void();
        let receiver = if self.non_virtual {
            factory.base()
        } else {
            factory.this()
        };
        let type_arguments = factory
            .method()
            .as_method()
            .map(|method| {
                method
                    .type_parameters()
                    .iter()
                    .cloned()
                    .map(TypeRef::TypeParameter)
                    .collect()
            })
            .unwrap_or_default();
        let arguments = factory.parameters();
        let call = factory.call_generic(Some(receiver), target, type_arguments, arguments);
        let statements = if returns_void {
            vec![factory.expression_statement(call), factory.return_void()]
        } else {
            vec![factory.return_value(call)]
        };
        Some(factory.block(statements))
    }
}
