//! Name construction.
//!
//! Every builder writes its kind character through `GeneratedNameKind`, so
//! the tag table in `kind.rs` is the only place a character is spelled.

use std::fmt::{self, Write as _};

use super::{
    DebugId, ACTION_DELEGATE_PREFIX, DOT_REPLACEMENT_IN_TYPE_NAMES, FUNC_DELEGATE_PREFIX,
    GENERATION_SEPARATOR, ID_SEPARATOR, LOCAL_FUNCTION_NAME_TERMINATOR, SUFFIX_SEPARATOR,
    SYNTHESIZED_LOCAL_NAME_PREFIX,
};
use crate::{GeneratedNameKind, RefKindVector, SynthesizedLocalKind};

/// Parts of a name scoped to a source method.
///
/// Produces `<method>k__[suffix][terminator][mo[#g]][_eo[#g]]`. The whole
/// `__...` block is omitted when there is no suffix and neither ordinal is
/// present.
#[derive(Copy, Clone, Debug)]
pub struct MethodScopedName<'a> {
    pub kind: GeneratedNameKind,
    pub method_name: Option<&'a str>,
    pub method_id: Option<DebugId>,
    pub suffix: Option<&'a str>,
    pub suffix_terminator: Option<char>,
    pub entity_id: Option<DebugId>,
}

impl<'a> MethodScopedName<'a> {
    pub const fn new(kind: GeneratedNameKind) -> Self {
        MethodScopedName {
            kind,
            method_name: None,
            method_id: None,
            suffix: None,
            suffix_terminator: None,
            entity_id: None,
        }
    }

    #[must_use]
    pub const fn method_name(mut self, name: &'a str) -> Self {
        self.method_name = Some(name);
        self
    }

    #[must_use]
    pub const fn method_id(mut self, id: Option<DebugId>) -> Self {
        self.method_id = id;
        self
    }

    #[must_use]
    pub const fn suffix(mut self, suffix: &'a str, terminator: Option<char>) -> Self {
        self.suffix = Some(suffix);
        self.suffix_terminator = terminator;
        self
    }

    #[must_use]
    pub const fn entity_id(mut self, id: Option<DebugId>) -> Self {
        self.entity_id = id;
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::with_capacity(32);
        out.push('<');
        if let Some(name) = self.method_name {
            if self.kind.is_type_name() {
                out.extend(name.chars().map(|c| {
                    if c == '.' {
                        DOT_REPLACEMENT_IN_TYPE_NAMES
                    } else {
                        c
                    }
                }));
            } else {
                out.push_str(name);
            }
        }
        out.push('>');
        out.push(tag(self.kind).as_char());

        if self.suffix.is_none() && self.method_id.is_none() && self.entity_id.is_none() {
            return out;
        }

        out.push_str(SUFFIX_SEPARATOR);
        if let Some(suffix) = self.suffix {
            out.push_str(suffix);
        }
        if let Some(terminator) = self.suffix_terminator {
            out.push(terminator);
        }
        if let Some(method) = self.method_id {
            push_display(&mut out, method.ordinal);
            push_generation(&mut out, method.generation);
        }
        if let Some(entity) = self.entity_id {
            if self.method_id.is_some() {
                out.push(ID_SEPARATOR);
            }
            push_display(&mut out, entity.ordinal);
            push_generation(&mut out, entity.generation);
        }
        out
    }
}

fn push_display(out: &mut String, value: impl fmt::Display) {
    // Writing into a `String` cannot fail.
    let _ = write!(out, "{value}");
}

fn push_generation(out: &mut String, generation: u32) {
    if generation > 0 {
        out.push(GENERATION_SEPARATOR);
        push_display(out, generation);
    }
}

/// `kind`, checked to be a tag this version writes.
#[inline]
fn tag(kind: GeneratedNameKind) -> GeneratedNameKind {
    debug_assert!(kind.is_known(), "{kind:?} is not a live generated name kind");
    kind
}

/// `<>{kind}__{suffix}`, for the fixed state machine fields.
fn fixed_field_name(kind: GeneratedNameKind, suffix: &str) -> String {
    format!("<>{}{SUFFIX_SEPARATOR}{suffix}", tag(kind))
}

/// `<{property}>k__BackingField`
pub fn make_backing_field_name(property_name: &str) -> String {
    format!(
        "<{property_name}>{}__BackingField",
        tag(GeneratedNameKind::AUTO_PROPERTY_BACKING_FIELD)
    )
}

/// `<>m__Finally{n}` where `n` is `|finalize_state + 2|`.
///
/// Finalize states count down from -3, so the first finally is `Finally1`.
pub fn make_iterator_finally_method_name(finalize_state: i32) -> String {
    format!(
        "<>{}__Finally{}",
        tag(GeneratedNameKind::ITERATOR_FINALLY_METHOD),
        finalize_state.saturating_add(2).unsigned_abs()
    )
}

/// `<>n__{id}`
pub fn make_base_method_wrapper_name(unique_id: u32) -> String {
    format!("<>{}__{unique_id}", tag(GeneratedNameKind::BASE_METHOD_WRAPPER))
}

/// `<{method}>b__{mo}_{lo}`
pub fn make_lambda_method_name(
    method_name: &str,
    method_id: Option<DebugId>,
    lambda_id: DebugId,
) -> String {
    MethodScopedName::new(GeneratedNameKind::LAMBDA_METHOD)
        .method_name(method_name)
        .method_id(method_id)
        .entity_id(Some(lambda_id))
        .build()
}

/// `<>c__DisplayClass{mo}_{co}`
pub fn make_lambda_display_class_name(method_id: Option<DebugId>, closure_id: DebugId) -> String {
    MethodScopedName::new(GeneratedNameKind::LAMBDA_DISPLAY_CLASS)
        .method_id(method_id)
        .suffix("DisplayClass", None)
        .entity_id(Some(closure_id))
        .build()
}

/// `<>c` for the module-wide container, `<>c__{mo}` when scoped to a method.
pub fn make_static_lambda_display_class_name(method_id: Option<DebugId>) -> String {
    MethodScopedName::new(GeneratedNameKind::LAMBDA_DISPLAY_CLASS)
        .method_id(method_id)
        .build()
}

/// `<{method}>g__{local}|{mo}_{lo}`
pub fn make_local_function_name(
    method_name: &str,
    local_function_name: &str,
    method_id: Option<DebugId>,
    lambda_id: DebugId,
) -> String {
    MethodScopedName::new(GeneratedNameKind::LOCAL_FUNCTION)
        .method_name(method_name)
        .method_id(method_id)
        .suffix(local_function_name, Some(LOCAL_FUNCTION_NAME_TERMINATOR))
        .entity_id(Some(lambda_id))
        .build()
}

/// `<{method}>d__{mo}`
pub fn make_state_machine_type_name(method_name: &str, method_id: Option<DebugId>) -> String {
    MethodScopedName::new(GeneratedNameKind::STATE_MACHINE_TYPE)
        .method_name(method_name)
        .method_id(method_id)
        .build()
}

/// `<{module}>f__AnonymousType{index}`, with `#{slot}` for script submissions.
pub fn make_anonymous_type_template_name(
    index: u32,
    submission_slot: Option<u32>,
    module_id: &str,
) -> String {
    let mut name = format!(
        "<{module_id}>{}__AnonymousType{index}",
        tag(GeneratedNameKind::ANONYMOUS_TYPE)
    );
    if let Some(slot) = submission_slot {
        name.push(GENERATION_SEPARATOR);
        push_display(&mut name, slot);
    }
    name
}

/// `<{property}>i__Field`
pub fn make_anonymous_type_backing_field_name(property_name: &str) -> String {
    format!(
        "<{property_name}>{}__Field",
        tag(GeneratedNameKind::ANONYMOUS_TYPE_FIELD)
    )
}

/// `<{property}>j__TPar`
pub fn make_anonymous_type_parameter_name(property_name: &str) -> String {
    format!(
        "<{property_name}>{}__TPar",
        tag(GeneratedNameKind::ANONYMOUS_TYPE_TYPE_PARAMETER)
    )
}

/// `<{field}>e__FixedBuffer`
pub fn make_fixed_field_implementation_name(field_name: &str) -> String {
    format!(
        "<{field_name}>{}__FixedBuffer",
        tag(GeneratedNameKind::FIXED_BUFFER_FIELD)
    )
}

/// `<>1__state`
pub fn make_state_machine_state_field_name() -> String {
    fixed_field_name(GeneratedNameKind::STATE_MACHINE_STATE_FIELD, "state")
}

pub fn make_iterator_current_field_name() -> String {
    fixed_field_name(GeneratedNameKind::ITERATOR_CURRENT_BACKING_FIELD, "current")
}

pub fn make_iterator_current_thread_id_field_name() -> String {
    fixed_field_name(GeneratedNameKind::ITERATOR_CURRENT_THREAD_ID_FIELD, "initialThreadId")
}

pub fn make_dispose_mode_field_name() -> String {
    fixed_field_name(GeneratedNameKind::DISPOSE_MODE_FIELD, "disposeMode")
}

pub fn async_builder_field_name() -> String {
    fixed_field_name(GeneratedNameKind::ASYNC_BUILDER_FIELD, "builder")
}

pub fn make_async_iterator_promise_of_value_or_end_field_name() -> String {
    fixed_field_name(
        GeneratedNameKind::ASYNC_ITERATOR_PROMISE_OF_VALUE_OR_END_BACKING_FIELD,
        "promiseOfValueOrEnd",
    )
}

pub fn make_async_iterator_combined_tokens_field_name() -> String {
    fixed_field_name(GeneratedNameKind::COMBINED_TOKENS_FIELD, "combinedTokens")
}

/// `<>4__this`
pub fn this_proxy_field_name() -> String {
    fixed_field_name(GeneratedNameKind::THIS_PROXY_FIELD, "this")
}

/// `<>3__{parameter}`
pub fn state_machine_parameter_proxy_field_name(parameter_name: &str) -> String {
    format!(
        "<>{}__{parameter_name}",
        tag(GeneratedNameKind::STATE_MACHINE_PARAMETER_PROXY_FIELD)
    )
}

/// Field holding a local hoisted into a state machine or closure.
///
/// `<{local}>5__{slot+1}` for user locals, `<>8__{slot+1}` for display
/// class locals, `<>s__{slot+1}` for other synthesized locals. Slots are
/// written one-based; `try_parse_slot_index` undoes the shift.
///
/// Only long-lived locals are hoisted, and only user locals carry a name.
pub fn make_hoisted_local_field_name(
    kind: SynthesizedLocalKind,
    slot_index: u32,
    local_name: Option<&str>,
) -> String {
    debug_assert!(kind.is_long_lived(), "{kind:?} locals are never hoisted");
    debug_assert_eq!(
        local_name.is_some(),
        kind == SynthesizedLocalKind::UserDefined,
        "only user-defined locals are hoisted by name"
    );
    let kind_tag = tag(match kind {
        SynthesizedLocalKind::LambdaDisplayClass => GeneratedNameKind::DISPLAY_CLASS_LOCAL_OR_FIELD,
        SynthesizedLocalKind::UserDefined => GeneratedNameKind::HOISTED_LOCAL_FIELD,
        _ => GeneratedNameKind::HOISTED_SYNTHESIZED_LOCAL_FIELD,
    });
    format!(
        "<{}>{kind_tag}{SUFFIX_SEPARATOR}{}",
        local_name.unwrap_or_default(),
        u64::from(slot_index) + 1
    )
}

/// `<>u__{slot+1}`
pub fn async_awaiter_field_name(slot_index: u32) -> String {
    format!(
        "<>{}__{}",
        tag(GeneratedNameKind::AWAITER_FIELD),
        u64::from(slot_index) + 1
    )
}

/// `<>7__wrap{n}`
pub fn reusable_hoisted_local_field_name(number: u32) -> String {
    format!(
        "<>{}__wrap{number}",
        tag(GeneratedNameKind::REUSABLE_HOISTED_LOCAL_FIELD)
    )
}

/// Singleton instance field of the static lambda container.
pub fn make_cached_frame_instance_field_name() -> String {
    format!("<>{}", tag(GeneratedNameKind::LAMBDA_CACHE_FIELD))
}

/// `<>9__{mo}_{lo}`
pub fn make_lambda_cache_field_name(method_id: Option<DebugId>, lambda_id: DebugId) -> String {
    MethodScopedName::new(GeneratedNameKind::LAMBDA_CACHE_FIELD)
        .method_id(method_id)
        .entity_id(Some(lambda_id))
        .build()
}

/// `CS$<>8__locals{id}`
pub fn make_lambda_display_local_name(unique_id: u32) -> String {
    format!(
        "{SYNTHESIZED_LOCAL_NAME_PREFIX}<>{}__locals{unique_id}",
        tag(GeneratedNameKind::DISPLAY_CLASS_LOCAL_OR_FIELD)
    )
}

/// `<>o__{mo}`, or `<>o__{lf}_{mo}` inside a local function.
pub fn make_dynamic_call_site_container_name(
    method_id: Option<DebugId>,
    local_function_ordinal: Option<u32>,
) -> String {
    let local_function = local_function_ordinal.map(|ordinal| ordinal.to_string());
    let mut name = MethodScopedName::new(GeneratedNameKind::DYNAMIC_CALL_SITE_CONTAINER_TYPE)
        .method_id(method_id);
    if let Some(local_function) = local_function.as_deref() {
        name = name.suffix(local_function, Some(ID_SEPARATOR));
    }
    name.build()
}

/// `<>p__{id}`
pub fn make_dynamic_call_site_field_name(unique_id: u32) -> String {
    format!(
        "<>{}__{unique_id}",
        tag(GeneratedNameKind::DYNAMIC_CALL_SITE_FIELD)
    )
}

/// `<{method}>O__{mo}_{owner}[#gen]`
///
/// The module-wide container has neither method nor owner: `<>O`. The
/// owner id is only written after a method ordinal.
pub fn make_delegate_cache_container_type_name(
    generation: u32,
    method_name: Option<&str>,
    method_ordinal: Option<u32>,
    owner_unique_id: Option<u32>,
) -> String {
    let mut name = format!(
        "<{}>{}",
        method_name.unwrap_or_default(),
        tag(GeneratedNameKind::DELEGATE_CACHE_CONTAINER_TYPE)
    );
    if let Some(ordinal) = method_ordinal {
        name.push_str(SUFFIX_SEPARATOR);
        push_display(&mut name, ordinal);
        if let Some(owner) = owner_unique_id {
            name.push(ID_SEPARATOR);
            push_display(&mut name, owner);
        }
    }
    push_generation(&mut name, generation);
    name
}

/// `<{id}>__{target}`
pub fn make_delegate_cache_container_field_name(id: u32, target_method: &str) -> String {
    format!("<{id}>{SUFFIX_SEPARATOR}{target_method}")
}

/// `<{parameter}>P`
pub fn make_primary_constructor_parameter_field_name(parameter_name: &str) -> String {
    format!(
        "<{parameter_name}>{}",
        tag(GeneratedNameKind::PRIMARY_CONSTRUCTOR_PARAMETER)
    )
}

/// `<>A{refkinds}[#gen]` for void-returning delegates, `<>F...` otherwise.
///
/// A null vector omits the ref-kind segment.
pub fn make_synthesized_delegate_name(
    by_refs: &RefKindVector,
    returns_void: bool,
    generation: u32,
) -> String {
    let mut name = String::from(if returns_void {
        ACTION_DELEGATE_PREFIX
    } else {
        FUNC_DELEGATE_PREFIX
    });
    if !by_refs.is_null() {
        name.push_str(&by_refs.to_ref_kind_string());
    }
    push_generation(&mut name, generation);
    name
}

/// `CS$InstrumentationPayload{id}`
pub fn make_synthesized_instrumentation_payload_local_field_name(unique_id: u32) -> String {
    format!("{SYNTHESIZED_LOCAL_NAME_PREFIX}InstrumentationPayload{unique_id}")
}

/// `<p{ordinal}>`
pub fn lambda_copy_parameter_name(ordinal: u32) -> String {
    format!("<p{ordinal}>")
}

/// `CS${kind}${id:04}`, the debug name of a long-lived synthesized local.
pub fn make_synthesized_local_name(kind: SynthesizedLocalKind, unique_id: u32) -> String {
    format!(
        "{SYNTHESIZED_LOCAL_NAME_PREFIX}{}${unique_id:04}",
        kind.ordinal()
    )
}
