use super::*;

#[test]
fn test_known_tags_are_distinct() {
    let mut chars: Vec<char> = GeneratedNameKind::ALL.iter().map(|k| k.as_char()).collect();
    chars.sort_unstable();
    chars.dedup();
    assert_eq!(chars.len(), GeneratedNameKind::ALL.len());
}

#[test]
fn test_known_tags_never_reuse_retired_chars() {
    for kind in GeneratedNameKind::ALL {
        assert!(!kind.is_deprecated(), "{kind:?} reuses a retired tag");
    }
}

#[test]
fn test_initializer_local_shares_local_function_tag() {
    assert_eq!(
        GeneratedNameKind::DEPRECATED_INITIALIZER_LOCAL,
        GeneratedNameKind::LOCAL_FUNCTION
    );
}

#[test]
fn test_is_type_name() {
    assert!(GeneratedNameKind::LAMBDA_DISPLAY_CLASS.is_type_name());
    assert!(GeneratedNameKind::STATE_MACHINE_TYPE.is_type_name());
    assert!(GeneratedNameKind::DYNAMIC_CALL_SITE_CONTAINER_TYPE.is_type_name());

    assert!(!GeneratedNameKind::LAMBDA_METHOD.is_type_name());
    assert!(!GeneratedNameKind::ANONYMOUS_TYPE.is_type_name());
    assert!(!GeneratedNameKind::DELEGATE_CACHE_CONTAINER_TYPE.is_type_name());
}

#[test]
fn test_from_char_range() {
    assert_eq!(
        GeneratedNameKind::from_char('b'),
        Some(GeneratedNameKind::LAMBDA_METHOD)
    );
    assert_eq!(
        GeneratedNameKind::from_char('F'),
        Some(GeneratedNameKind::FILE_TYPE)
    );
    assert_eq!(GeneratedNameKind::from_char('0'), None);
    assert_eq!(GeneratedNameKind::from_char('_'), None);
    assert_eq!(GeneratedNameKind::from_char('é'), None);

    let unknown = GeneratedNameKind::from_char('z');
    assert!(unknown.is_some_and(|k| !k.is_known()));
}

#[test]
fn test_debug_output() {
    assert_eq!(
        format!("{:?}", GeneratedNameKind::AWAITER_FIELD),
        "GeneratedNameKind::AwaiterField('u')"
    );
    assert_eq!(
        format!("{:?}", GeneratedNameKind::NONE),
        "GeneratedNameKind::None"
    );
}
