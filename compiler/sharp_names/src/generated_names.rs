//! The `<middle>kind__suffix` grammar: shared constants, debug ids, and
//! the construction and parsing halves of the codec.

mod make;
mod parse;

pub use make::*;
pub use parse::*;

/// Replaces `.` inside the middle segment of type-name kinds.
pub const DOT_REPLACEMENT_IN_TYPE_NAMES: char = '-';
/// Prefix of synthesized local names.
pub const SYNTHESIZED_LOCAL_NAME_PREFIX: &str = "CS$";
/// Separates the kind character from the suffix.
pub const SUFFIX_SEPARATOR: &str = "__";
/// Separates the method ordinal from the entity ordinal.
pub const ID_SEPARATOR: char = '_';
/// Introduces an edit-and-continue generation.
pub const GENERATION_SEPARATOR: char = '#';
/// Ends the local function name inside a local function's suffix.
pub const LOCAL_FUNCTION_NAME_TERMINATOR: char = '|';

pub const ACTION_DELEGATE_PREFIX: &str = "<>A";
pub const FUNC_DELEGATE_PREFIX: &str = "<>F";

/// Ordinal of an entity within its scope plus the edit-and-continue
/// generation that introduced it.
///
/// Generation zero is the initial compilation and is never written out,
/// so `DebugId::new(n, 0)` and `DebugId::from(n)` produce identical names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct DebugId {
    pub ordinal: u32,
    pub generation: u32,
}

impl DebugId {
    #[inline]
    pub const fn new(ordinal: u32, generation: u32) -> Self {
        DebugId {
            ordinal,
            generation,
        }
    }
}

impl From<u32> for DebugId {
    fn from(ordinal: u32) -> Self {
        DebugId::new(ordinal, 0)
    }
}
