//! Compiler-synthesized symbols.
//!
//! Lowering invents declarations that never appear in source: closures
//! become display classes, iterators and async methods become state
//! machines, auto-properties get backing fields and accessors. Each family
//! lives in its own module and is exposed through the same [`Symbol`]
//! traits as declared symbols.
//!
//! [`Symbol`]: crate::Symbol

mod accessor;
pub mod attributes;
mod backing_field;
mod closure;
mod constructor;
mod container;
mod delegate;
pub mod embedded_attribute;
pub mod entry_point;
mod field;
mod forwarding;
mod global_methods;
pub mod hot_reload;
mod instance_method;
mod method;
mod parameter;
mod private_implementation;
mod state_machine;
mod type_parameter;

pub use accessor::{synthesize_getter, synthesize_setter};
pub use backing_field::{synthesize_auto_property, AutoPropertyMembers};
pub use closure::{
    synthesize_display_class, synthesize_static_lambda_container, CapturedVariable, ClosureSpec,
    LambdaSpec, StaticLambdaSpec,
};
pub use constructor::{
    default_constructor, instance_constructor, static_constructor, BaseConstructorBody,
    SingletonInitializerBody,
};
pub use container::{
    synthesize_delegate_cache_container, synthesize_dynamic_call_site_container, ContainerKind,
    ContainerScope, ContainerSpec, DelegateCacheEntry, DelegateCacheOwner, StateMachineKind,
    SynthesizedContainer,
};
pub use delegate::{DelegateShape, SynthesizedDelegate, SynthesizedDelegateCache};
pub use embedded_attribute::{EmbeddedTypeDescription, SynthesizedEmbeddedAttribute};
pub use field::{FieldType, SynthesizedField};
pub use forwarding::{synthesize_base_method_wrapper, synthesize_explicit_implementation_forwarder};
pub use global_methods::GlobalHelper;
pub use instance_method::ThisParameter;
pub(crate) use instance_method::this_parameter;
pub use method::{BodyGenerator, MetadataSlot, SynthesizedMethod, SynthesizedMethodBuilder};
pub use parameter::{derive_parameters, SynthesizedParameter};
pub use private_implementation::{
    data_field_name, ExplicitSizeType, PrivateImplementationDetails,
    PRIVATE_IMPLEMENTATION_DETAILS_NAME,
};
pub use state_machine::{synthesize_state_machine, HoistedLocal, StateMachineSpec};
pub use type_parameter::SynthesizedTypeParameter;
