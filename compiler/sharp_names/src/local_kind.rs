//! Kinds of compiler-introduced locals.

/// Kind of a local the compiler introduces while lowering.
///
/// Only kinds at or above `UserDefined` survive into state machines and
/// need stable hoisted-field names across edits; short-lived temporaries
/// are never hoisted by name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(i8)]
pub enum SynthesizedLocalKind {
    /// Temporary whose lifetime never spans an await or yield.
    LoweringTemp = -3,
    /// Receiver spill for an await in a compound expression.
    AwaitByRefSpill = -2,
    /// Capture of an expression value that must survive a suspension.
    EmitterTemp = -1,
    UserDefined = 0,
    /// Local holding the closure environment.
    LambdaDisplayClass = 1,
    Lock = 2,
    Using = 3,
    ForEachEnumerator = 4,
    ForEachArray = 5,
    ForEachArrayIndex = 6,
    FixedReference = 7,
    LockTaken = 8,
    TryAwaitPendingException = 9,
    TryAwaitPendingBranch = 10,
    TryAwaitPendingCatch = 11,
    TryAwaitPendingCaughtException = 12,
    AwaitByRefSpillLong = 13,
    InstrumentationPayload = 14,
    InstrumentationContext = 15,
}

impl SynthesizedLocalKind {
    /// Whether the local may live across a suspension point.
    #[inline]
    pub const fn is_long_lived(self) -> bool {
        self as i8 >= SynthesizedLocalKind::UserDefined as i8
    }

    /// Whether the local is introduced by the compiler rather than written
    /// by the user.
    #[inline]
    pub const fn is_synthesized(self) -> bool {
        !matches!(self, SynthesizedLocalKind::UserDefined)
    }

    /// Numeric discriminant written into hoisted field and local names.
    #[inline]
    pub const fn ordinal(self) -> i8 {
        self as i8
    }
}
