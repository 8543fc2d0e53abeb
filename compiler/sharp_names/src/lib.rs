//! Generated metadata names.
//!
//! Every declaration the compiler invents during lowering (closure classes,
//! lambda methods, state machines, hoisted locals, backing fields, delegate
//! types) needs a metadata identifier that is:
//! - legal for the runtime but impossible to write in source,
//! - collision-free across methods, lambdas, and edit-and-continue generations,
//! - parseable back into structured data by tools that only see metadata.
//!
//! The grammar shared by all of them:
//!
//! ```text
//! generated-name := ["CS$"] "<" middle ">" kind-char [ "__" suffix ]
//! suffix         := [text] [ordinal-block]
//! ordinal-block  := [method-ordinal ["#" gen]] ["_" entity-ordinal ["#" gen]]
//! ```
//!
//! This grammar is read directly out of compiled binaries by debuggers and
//! edit-and-continue tooling, so its output is a compatibility surface: a
//! change here is a breaking change for every consumer.
//!
//! # Modules
//!
//! - `kind`: the one-character `GeneratedNameKind` tag set
//! - `ref_kind_vector`: bit-packed per-parameter ref kinds for delegate names
//! - `generated_names`: construction and parsing (parsing never panics)
//! - `file_type_names`: file-local type name prefixes with SHA-256 checksums
//! - `hash`: the string hash emitted into switch-on-string helpers

mod file_type_names;
mod generated_names;
mod hash;
mod kind;
mod local_kind;
mod ref_kind;
mod ref_kind_vector;

pub use file_type_names::{
    file_path_checksum, make_file_type_metadata_name_prefix, try_parse_file_type_name,
    FileIdentifier, FileTypeName, CHECKSUM_LEN,
};
pub use hash::{compute_span_hash, compute_string_hash, FNV_OFFSET_BASIS, FNV_PRIME};
pub use kind::GeneratedNameKind;
pub use local_kind::SynthesizedLocalKind;
pub use generated_names::{
    async_awaiter_field_name, async_builder_field_name, lambda_copy_parameter_name,
    make_anonymous_type_backing_field_name, make_anonymous_type_parameter_name,
    make_anonymous_type_template_name, make_async_iterator_combined_tokens_field_name,
    make_async_iterator_promise_of_value_or_end_field_name, make_backing_field_name,
    make_base_method_wrapper_name, make_cached_frame_instance_field_name,
    make_delegate_cache_container_field_name, make_delegate_cache_container_type_name,
    make_dispose_mode_field_name, make_dynamic_call_site_container_name,
    make_dynamic_call_site_field_name, make_fixed_field_implementation_name,
    make_hoisted_local_field_name, make_iterator_current_field_name,
    make_iterator_current_thread_id_field_name, make_iterator_finally_method_name,
    make_lambda_cache_field_name, make_lambda_display_class_name, make_lambda_display_local_name,
    make_lambda_method_name, make_local_function_name,
    make_primary_constructor_parameter_field_name, make_state_machine_state_field_name,
    make_state_machine_type_name, make_static_lambda_display_class_name,
    make_synthesized_delegate_name, make_synthesized_instrumentation_payload_local_field_name,
    make_synthesized_local_name, reusable_hoisted_local_field_name,
    state_machine_parameter_proxy_field_name, this_proxy_field_name, DebugId, MethodScopedName,
    ACTION_DELEGATE_PREFIX, DOT_REPLACEMENT_IN_TYPE_NAMES, FUNC_DELEGATE_PREFIX,
    GENERATION_SEPARATOR, ID_SEPARATOR, LOCAL_FUNCTION_NAME_TERMINATOR, SUFFIX_SEPARATOR,
    SYNTHESIZED_LOCAL_NAME_PREFIX,
};
pub use generated_names::{
    get_kind, is_generated_member_name, is_synthesized_local_name,
    try_parse_anonymous_type_parameter_name, try_parse_generated_name,
    try_parse_local_function_name, try_parse_slot_index,
    try_parse_source_method_name_from_generated_name, ParsedGeneratedName,
};
pub use ref_kind::RefKind;
pub use ref_kind_vector::RefKindVector;
