//! Parameter and return passing modes.

use std::fmt;

/// How a parameter or return value is passed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[repr(u8)]
pub enum RefKind {
    /// By value.
    #[default]
    None = 0,
    Ref = 1,
    Out = 2,
    /// `in` parameters and `ref readonly` returns.
    RefReadOnly = 3,
    /// `ref readonly` parameters.
    RefReadOnlyParameter = 4,
}

impl RefKind {
    pub const ALL: [RefKind; 5] = [
        RefKind::None,
        RefKind::Ref,
        RefKind::Out,
        RefKind::RefReadOnly,
        RefKind::RefReadOnlyParameter,
    ];

    /// Three-bit encoding used in delegate names.
    #[inline]
    pub const fn to_bits(self) -> u8 {
        self as u8
    }

    /// Decode a three-bit pattern. Patterns 5 through 7 are unassigned.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(RefKind::None),
            1 => Some(RefKind::Ref),
            2 => Some(RefKind::Out),
            3 => Some(RefKind::RefReadOnly),
            4 => Some(RefKind::RefReadOnlyParameter),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_by_ref(self) -> bool {
        !matches!(self, RefKind::None)
    }

    /// Source keyword, empty for by-value.
    pub const fn keyword(self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::Ref => "ref",
            RefKind::Out => "out",
            RefKind::RefReadOnly => "in",
            RefKind::RefReadOnlyParameter => "ref readonly",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
