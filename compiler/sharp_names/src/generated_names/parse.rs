//! Name parsing.
//!
//! Every function here is total: malformed or hostile input yields `None`
//! (or `GeneratedNameKind::NONE`), never a panic. Offsets are byte offsets;
//! the bracket and kind characters are ASCII, so slicing at them is always
//! on a character boundary.

use std::borrow::Cow;

use super::{
    DOT_REPLACEMENT_IN_TYPE_NAMES, LOCAL_FUNCTION_NAME_TERMINATOR, SUFFIX_SEPARATOR,
    SYNTHESIZED_LOCAL_NAME_PREFIX,
};
use crate::GeneratedNameKind;

/// Structure recovered from a generated name.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ParsedGeneratedName {
    pub kind: GeneratedNameKind,
    /// Offset of the opening `<`: 3 after a `CS$` prefix, otherwise 0.
    pub open_bracket_offset: usize,
    /// Offset of the `>` balancing the opening bracket.
    pub close_bracket_offset: usize,
}

impl ParsedGeneratedName {
    /// The text between the brackets.
    pub fn middle<'a>(&self, name: &'a str) -> &'a str {
        &name[self.open_bracket_offset + 1..self.close_bracket_offset]
    }
}

/// Whether a member name was produced by the compiler.
pub fn is_generated_member_name(member_name: &str) -> bool {
    member_name.starts_with('<')
}

/// Whether a local name carries the synthesized-local prefix.
pub fn is_synthesized_local_name(name: &str) -> bool {
    name.starts_with(SYNTHESIZED_LOCAL_NAME_PREFIX)
}

/// Split a generated name into kind and bracket offsets.
///
/// The closing bracket is found by a depth-counting scan, so nested
/// generated names such as `<<Main>b__0_0>d__0` resolve to their outermost
/// pair.
pub fn try_parse_generated_name(name: &str) -> Option<ParsedGeneratedName> {
    let open = if name.starts_with("CS$<") {
        3
    } else if name.starts_with('<') {
        0
    } else {
        return None;
    };

    let close = index_of_balanced_bracket(name.as_bytes(), open, b'>')?;
    let kind_byte = *name.as_bytes().get(close + 1)?;
    let kind = GeneratedNameKind::from_char(char::from(kind_byte))?;
    Some(ParsedGeneratedName {
        kind,
        open_bracket_offset: open,
        close_bracket_offset: close,
    })
}

/// Kind of a generated name, `NONE` if it is not one.
pub fn get_kind(name: &str) -> GeneratedNameKind {
    try_parse_generated_name(name).map_or(GeneratedNameKind::NONE, |parsed| parsed.kind)
}

/// Recover the source method name embedded in a generated name.
///
/// `required_kind` of `NONE` accepts any kind. For type-name kinds the
/// dot replacement is undone.
pub fn try_parse_source_method_name_from_generated_name(
    generated_name: &str,
    required_kind: GeneratedNameKind,
) -> Option<Cow<'_, str>> {
    let parsed = try_parse_generated_name(generated_name)?;
    if required_kind != GeneratedNameKind::NONE && parsed.kind != required_kind {
        return None;
    }
    let middle = parsed.middle(generated_name);
    if parsed.kind.is_type_name() && middle.contains(DOT_REPLACEMENT_IN_TYPE_NAMES) {
        Some(Cow::Owned(middle.replace(DOT_REPLACEMENT_IN_TYPE_NAMES, ".")))
    } else {
        Some(Cow::Borrowed(middle))
    }
}

/// Recover `local` from `<method>g__local|...`.
pub fn try_parse_local_function_name(generated_name: &str) -> Option<&str> {
    let parsed = try_parse_generated_name(generated_name)?;
    if parsed.kind != GeneratedNameKind::LOCAL_FUNCTION {
        return None;
    }
    let start = parsed.close_bracket_offset + 2 + SUFFIX_SEPARATOR.len();
    let rest = generated_name.get(start..).filter(|rest| !rest.is_empty())?;
    let end = rest.find(LOCAL_FUNCTION_NAME_TERMINATOR)?;
    Some(&rest[..end])
}

/// Zero-based slot index from a hoisted field name ending in `__N`.
///
/// `N` must be a plain decimal of at least 1; the one-based shift applied
/// by the builders is undone.
pub fn try_parse_slot_index(field_name: &str) -> Option<u32> {
    let last_under = field_name.rfind('_')?;
    if last_under == 0 || field_name.as_bytes()[last_under - 1] != b'_' {
        return None;
    }
    let digits = &field_name[last_under + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Slot `u32::MAX` is written as `u32::MAX + 1`.
    let one_based: u64 = digits.parse().ok()?;
    u32::try_from(one_based.checked_sub(1)?).ok()
}

/// Recover `prop` from `<prop>j__TPar`.
pub fn try_parse_anonymous_type_parameter_name(type_parameter_name: &str) -> Option<&str> {
    type_parameter_name
        .strip_prefix('<')?
        .strip_suffix(">j__TPar")
}

/// Index of the byte closing the bracket at `open`, tracking nesting of the
/// same opening byte.
fn index_of_balanced_bracket(bytes: &[u8], open: usize, closing: u8) -> Option<usize> {
    let opening = *bytes.get(open)?;
    let mut depth = 1usize;
    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        if b == opening {
            depth += 1;
        } else if b == closing {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests;
