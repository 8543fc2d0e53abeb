//! Property-based tests for the generated-name codec.
//!
//! Every builder must be read back by the parser it pairs with, and the
//! parser must survive arbitrary input:
//! 1. Construction then parsing recovers kind, method name and slot.
//! 2. Generation zero is indistinguishable from no generation.
//! 3. Ref-kind vectors survive their textual form at every capacity.
//! 4. File-local type names recover file name, checksum and type name.
//! 5. No input makes a parser panic.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use sharp_names::{
    get_kind, make_file_type_metadata_name_prefix, make_hoisted_local_field_name,
    make_lambda_method_name, make_local_function_name, make_state_machine_type_name,
    make_synthesized_delegate_name, try_parse_file_type_name, try_parse_generated_name,
    try_parse_local_function_name, try_parse_slot_index,
    try_parse_source_method_name_from_generated_name, DebugId, GeneratedNameKind,
    MethodScopedName, RefKind, RefKindVector, SynthesizedLocalKind, CHECKSUM_LEN,
};

// -- Strategies --

/// Source method names, possibly namespace-qualified. No brackets and no
/// dashes, which would collide with the dot replacement.
fn method_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,10}(\\.[A-Za-z_][A-Za-z0-9_]{0,6}){0,3}")
        .expect("valid regex")
}

fn kind_strategy() -> impl Strategy<Value = GeneratedNameKind> {
    prop::sample::select(GeneratedNameKind::ALL.to_vec())
}

fn debug_id_strategy() -> impl Strategy<Value = DebugId> {
    (0u32..10_000, 0u32..100).prop_map(|(ordinal, generation)| DebugId::new(ordinal, generation))
}

fn ref_kind_strategy() -> impl Strategy<Value = RefKind> {
    prop::sample::select(RefKind::ALL.to_vec())
}

fn local_kind_strategy() -> impl Strategy<Value = SynthesizedLocalKind> {
    prop::sample::select(vec![
        SynthesizedLocalKind::UserDefined,
        SynthesizedLocalKind::LambdaDisplayClass,
        SynthesizedLocalKind::Lock,
        SynthesizedLocalKind::Using,
        SynthesizedLocalKind::ForEachEnumerator,
        SynthesizedLocalKind::InstrumentationPayload,
    ])
}

// -- Round trips --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn method_scoped_names_round_trip(
        kind in kind_strategy(),
        method in method_name_strategy(),
        method_id in prop::option::of(debug_id_strategy()),
        entity_id in prop::option::of(debug_id_strategy()),
    ) {
        let name = MethodScopedName::new(kind)
            .method_name(&method)
            .method_id(method_id)
            .entity_id(entity_id)
            .build();

        prop_assert_eq!(get_kind(&name), kind);
        let recovered = try_parse_source_method_name_from_generated_name(&name, kind);
        prop_assert_eq!(recovered.as_deref(), Some(method.as_str()));
        let recovered_any = try_parse_source_method_name_from_generated_name(&name, GeneratedNameKind::NONE);
        prop_assert_eq!(recovered_any.as_deref(), Some(method.as_str()));
    }

    #[test]
    fn type_name_kinds_never_contain_dots_in_middle(
        method in method_name_strategy(),
        method_id in prop::option::of(debug_id_strategy()),
    ) {
        let name = make_state_machine_type_name(&method, method_id);
        let parsed = try_parse_generated_name(&name).expect("generated name parses");
        prop_assert!(!parsed.middle(&name).contains('.'));
    }

    #[test]
    fn generation_zero_is_canonical(
        method in method_name_strategy(),
        method_ordinal in 0u32..10_000,
        lambda_ordinal in 0u32..10_000,
    ) {
        let explicit = make_lambda_method_name(
            &method,
            Some(DebugId::new(method_ordinal, 0)),
            DebugId::new(lambda_ordinal, 0),
        );
        let implicit = make_lambda_method_name(
            &method,
            Some(DebugId::from(method_ordinal)),
            DebugId::from(lambda_ordinal),
        );
        prop_assert!(!explicit.contains('#'));
        prop_assert_eq!(explicit, implicit);
    }

    #[test]
    fn slot_index_round_trips(
        kind in local_kind_strategy(),
        slot in any::<u32>(),
        local in "[a-z_][a-z0-9_]{0,8}",
    ) {
        let local = (kind == SynthesizedLocalKind::UserDefined).then_some(local.as_str());
        let name = make_hoisted_local_field_name(kind, slot, local);
        prop_assert_eq!(try_parse_slot_index(&name), Some(slot));
    }

    #[test]
    fn local_function_name_round_trips(
        method in method_name_strategy(),
        local in "[A-Za-z_][A-Za-z0-9_]{0,12}",
        method_id in prop::option::of(debug_id_strategy()),
        lambda_id in debug_id_strategy(),
    ) {
        let name = make_local_function_name(&method, &local, method_id, lambda_id);
        prop_assert_eq!(try_parse_local_function_name(&name), Some(local.as_str()));
    }

    #[test]
    fn nested_names_resolve_outer_bracket(
        inner_method in method_name_strategy(),
        outer_ordinal in 0u32..1000,
    ) {
        let inner =
            make_lambda_method_name(&inner_method, Some(DebugId::from(0)), DebugId::from(1));
        let outer = make_state_machine_type_name(&inner, Some(DebugId::from(outer_ordinal)));
        prop_assert_eq!(get_kind(&outer), GeneratedNameKind::STATE_MACHINE_TYPE);
        let parsed = try_parse_generated_name(&outer).expect("generated name parses");
        prop_assert_eq!(parsed.middle(&outer), inner.replace('.', "-"));
    }
}

// -- Ref-kind vectors and delegate names --

proptest! {
    #[test]
    fn ref_kind_vector_round_trips(kinds in prop::collection::vec(ref_kind_strategy(), 1..=64)) {
        let vector = RefKindVector::from_kinds(&kinds);
        let text = vector.to_ref_kind_string();

        let braced = RefKindVector::try_parse(&text, kinds.len());
        prop_assert_eq!(braced.as_ref(), Some(&vector));

        let bare = &text[1..text.len() - 1];
        prop_assert_eq!(RefKindVector::try_parse(bare, kinds.len()), Some(vector.clone()));

        let recovered: Vec<RefKind> = vector.iter().collect();
        prop_assert_eq!(recovered, kinds);
    }

    #[test]
    fn ref_kind_vector_rejects_wrong_capacity(
        kinds in prop::collection::vec(ref_kind_strategy(), 1..=64),
        delta in 11usize..40,
    ) {
        // `delta` slots always add at least one word.
        let text = RefKindVector::from_kinds(&kinds).to_ref_kind_string();
        prop_assert_eq!(RefKindVector::try_parse(&text, kinds.len() + delta), None);
    }

    #[test]
    fn delegate_names_are_deterministic(
        kinds in prop::collection::vec(ref_kind_strategy(), 1..=16),
        other in prop::collection::vec(ref_kind_strategy(), 1..=16),
        returns_void: bool,
        generation in 0u32..5,
    ) {
        let a = RefKindVector::from_kinds(&kinds);
        let b = RefKindVector::from_kinds(&other);
        let name_a = make_synthesized_delegate_name(&a, returns_void, generation);
        let again = make_synthesized_delegate_name(&a.clone(), returns_void, generation);
        prop_assert_eq!(&name_a, &again);
        if a != b {
            let name_b = make_synthesized_delegate_name(&b, returns_void, generation);
            prop_assert!(kinds.len() != other.len() || name_a != name_b);
        }
        prop_assert_ne!(
            name_a,
            make_synthesized_delegate_name(&a, !returns_void, generation)
        );
    }
}

// -- File-local types --

proptest! {
    #[test]
    fn file_type_names_round_trip(
        stem in "[A-Za-z0-9_ .-]{0,16}",
        checksum in prop::array::uniform32(any::<u8>()),
        type_name in "[A-Z][A-Za-z0-9]{0,12}(`[1-9])?",
    ) {
        let path = format!("/src/{stem}.cs");
        let prefix = make_file_type_metadata_name_prefix(&path, Some(&checksum));
        let parsed = try_parse_file_type_name(&format!("{prefix}{type_name}"))
            .expect("prefix parses");

        prop_assert_eq!(parsed.checksum.len(), CHECKSUM_LEN);
        prop_assert_eq!(parsed.checksum, checksum);
        prop_assert_eq!(parsed.original_type_name, type_name);
        prop_assert!(parsed
            .display_file_name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_'));
    }
}

// -- Totality --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1024))]

    #[test]
    fn parsers_never_panic(input in "(CS\\$)?<?[<>_#|a-zA-Z0-9.\\-{}é]{0,24}") {
        let _ = try_parse_generated_name(&input);
        let _ = get_kind(&input);
        let _ = try_parse_source_method_name_from_generated_name(&input, GeneratedNameKind::NONE);
        let _ = try_parse_local_function_name(&input);
        let _ = try_parse_slot_index(&input);
        let _ = try_parse_file_type_name(&input);
        let _ = RefKindVector::try_parse(&input, 3);
    }

    #[test]
    fn parsers_never_panic_on_arbitrary_text(input in any::<String>()) {
        let _ = try_parse_generated_name(&input);
        let _ = try_parse_local_function_name(&input);
        let _ = try_parse_slot_index(&input);
        let _ = try_parse_file_type_name(&input);
        let _ = RefKindVector::try_parse(&input, 8);
    }
}
