//! Source files, locations, and declaring syntax references.

use std::fmt;

use crate::Span;

/// Identifier of a source file within one compilation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct SourceId(u32);

impl SourceId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        SourceId(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Where a declaration lives.
///
/// Purely synthesized declarations use `Location::None`; diagnostics about
/// them (for example a missing well-known member) are reported there too.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Location {
    /// No source position.
    #[default]
    None,
    /// A span inside a source file.
    Source { source: SourceId, span: Span },
}

impl Location {
    /// Create a source location.
    #[inline]
    pub const fn source(source: SourceId, span: Span) -> Self {
        Location::Source { source, span }
    }

    /// Whether this location points into source text.
    #[inline]
    pub const fn is_in_source(&self) -> bool {
        matches!(self, Location::Source { .. })
    }

    /// The span, when this is a source location.
    #[inline]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Location::None => None,
            Location::Source { span, .. } => Some(*span),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::None => write!(f, "<no location>"),
            Location::Source { source, span } => write!(f, "#{}:{span}", source.raw()),
        }
    }
}

/// Reference to the syntax node that declared a symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SyntaxReference {
    pub source: SourceId,
    pub span: Span,
}

impl SyntaxReference {
    pub const fn new(source: SourceId, span: Span) -> Self {
        SyntaxReference { source, span }
    }

    /// Location of the referenced syntax.
    pub const fn location(&self) -> Location {
        Location::source(self.source, self.span)
    }
}
