//! The string hash used by switch-on-string lowering.
//!
//! Lowering a large `switch` over strings dispatches on this hash first,
//! so the compiler and the emitted `ComputeStringHash` helper must agree
//! bit for bit. It is 32-bit FNV-1a over UTF-16 code units.

pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
pub const FNV_PRIME: u32 = 16_777_619;

/// Hash of a possibly-null string. Null hashes to zero, the empty string
/// to the offset basis.
pub fn compute_string_hash(text: Option<&str>) -> u32 {
    text.map_or(0, |text| fnv1a(text.encode_utf16()))
}

/// Hash of a UTF-16 span. Same function as `compute_string_hash` without
/// the null case.
pub fn compute_span_hash(units: &[u16]) -> u32 {
    fnv1a(units.iter().copied())
}

fn fnv1a(units: impl Iterator<Item = u16>) -> u32 {
    units.fold(FNV_OFFSET_BASIS, |hash, unit| {
        (u32::from(unit) ^ hash).wrapping_mul(FNV_PRIME)
    })
}
