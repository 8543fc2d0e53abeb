use super::*;
use crate::{
    async_awaiter_field_name, make_hoisted_local_field_name, make_lambda_display_class_name,
    make_local_function_name, make_state_machine_type_name, DebugId, SynthesizedLocalKind,
};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_plain_and_prefixed() {
    assert_eq!(
        try_parse_generated_name("<Main>b__0_1"),
        Some(ParsedGeneratedName {
            kind: GeneratedNameKind::LAMBDA_METHOD,
            open_bracket_offset: 0,
            close_bracket_offset: 5,
        })
    );
    assert_eq!(
        try_parse_generated_name("CS$<>8__locals0"),
        Some(ParsedGeneratedName {
            kind: GeneratedNameKind::DISPLAY_CLASS_LOCAL_OR_FIELD,
            open_bracket_offset: 3,
            close_bracket_offset: 4,
        })
    );
}

#[test]
fn test_balanced_scan_picks_outer_bracket() {
    let parsed = try_parse_generated_name("<<Main>b__0_0>d__0");
    assert_eq!(
        parsed.map(|p| (p.kind, p.close_bracket_offset)),
        Some((GeneratedNameKind::STATE_MACHINE_TYPE, 13))
    );
}

#[test]
fn test_parse_rejects_non_generated() {
    assert_eq!(try_parse_generated_name(""), None);
    assert_eq!(try_parse_generated_name("Main"), None);
    assert_eq!(try_parse_generated_name("<Main"), None);
    assert_eq!(try_parse_generated_name("<Main>"), None);
    assert_eq!(try_parse_generated_name("<Main>_"), None);
    assert_eq!(try_parse_generated_name("<Main>0"), None);
    assert_eq!(try_parse_generated_name("CS$Main"), None);
    assert_eq!(get_kind("<é>"), GeneratedNameKind::NONE);
}

#[test]
fn test_parse_accepts_uppercase_kinds() {
    assert_eq!(get_kind("<>O"), GeneratedNameKind::DELEGATE_CACHE_CONTAINER_TYPE);
    assert_eq!(get_kind("<x>P"), GeneratedNameKind::PRIMARY_CONSTRUCTOR_PARAMETER);
    assert_eq!(get_kind("<>A{00000001}").as_char(), 'A');
}

#[test]
fn test_source_method_name_restores_dots() {
    let name = make_state_machine_type_name("N.C.M", Some(DebugId::from(0)));
    assert_eq!(
        try_parse_source_method_name_from_generated_name(
            &name,
            GeneratedNameKind::STATE_MACHINE_TYPE
        )
        .as_deref(),
        Some("N.C.M")
    );
}

#[test]
fn test_source_method_name_keeps_dashes_for_member_kinds() {
    assert_eq!(
        try_parse_source_method_name_from_generated_name("<a-b>b__0", GeneratedNameKind::NONE)
            .as_deref(),
        Some("a-b")
    );
}

#[test]
fn test_source_method_name_kind_mismatch() {
    assert_eq!(
        try_parse_source_method_name_from_generated_name(
            "<M>b__0",
            GeneratedNameKind::STATE_MACHINE_TYPE
        ),
        None
    );
}

#[test]
fn test_local_function_name() {
    let name = make_local_function_name("Main", "Inner", Some(DebugId::from(0)), DebugId::from(2));
    assert_eq!(try_parse_local_function_name(&name), Some("Inner"));
    assert_eq!(try_parse_local_function_name("<Main>b__0_2"), None);
    assert_eq!(try_parse_local_function_name("<Main>g__"), None);
    assert_eq!(try_parse_local_function_name("<Main>g__Inner"), None);
    assert_eq!(try_parse_local_function_name("<M>g_é|"), None);
}

#[test]
fn test_slot_index() {
    let name = make_hoisted_local_field_name(SynthesizedLocalKind::UserDefined, 6, Some("x"));
    assert_eq!(try_parse_slot_index(&name), Some(6));
    assert_eq!(try_parse_slot_index("<>u__1"), Some(0));
}

#[test]
fn test_slot_index_at_u32_max() {
    let hoisted =
        make_hoisted_local_field_name(SynthesizedLocalKind::UserDefined, u32::MAX, Some("x"));
    assert_eq!(hoisted, "<x>5__4294967296");
    assert_eq!(try_parse_slot_index(&hoisted), Some(u32::MAX));

    let awaiter = async_awaiter_field_name(u32::MAX);
    assert_eq!(try_parse_slot_index(&awaiter), Some(u32::MAX));

    assert_eq!(try_parse_slot_index("<x>5__4294967297"), None);
}

#[test]
fn test_slot_index_negative_cases() {
    assert_eq!(try_parse_slot_index("<>5__0"), None);
    assert_eq!(try_parse_slot_index("<>5_1"), None);
    assert_eq!(try_parse_slot_index("<>5__"), None);
    assert_eq!(try_parse_slot_index("<>5__+1"), None);
    assert_eq!(try_parse_slot_index("<>5__1a"), None);
    assert_eq!(try_parse_slot_index("_1"), None);
    assert_eq!(try_parse_slot_index("<>5__99999999999"), None);
    assert_eq!(try_parse_slot_index("nounderscore"), None);
}

#[test]
fn test_anonymous_type_parameter_name() {
    assert_eq!(try_parse_anonymous_type_parameter_name("<Name>j__TPar"), Some("Name"));
    assert_eq!(try_parse_anonymous_type_parameter_name("<>j__TPar"), Some(""));
    assert_eq!(try_parse_anonymous_type_parameter_name("<Name>i__Field"), None);
    assert_eq!(try_parse_anonymous_type_parameter_name("Name>j__TPar"), None);
}

#[test]
fn test_display_class_middle_is_empty() {
    let name = make_lambda_display_class_name(Some(DebugId::from(0)), DebugId::from(0));
    let parsed = try_parse_generated_name(&name);
    assert_eq!(parsed.map(|p| p.middle(&name)), Some(""));
}

#[test]
fn test_member_and_local_predicates() {
    assert!(is_generated_member_name("<>9"));
    assert!(!is_generated_member_name("Value"));
    assert!(!is_generated_member_name(""));
    assert!(is_synthesized_local_name("CS$<>8__locals0"));
    assert!(!is_synthesized_local_name("local"));
}
