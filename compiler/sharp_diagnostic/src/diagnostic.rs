//! Core diagnostic types.

use std::fmt;

use sharp_ir::Location;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A location with an explanatory message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub location: Location,
    pub message: String,
}

impl Label {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Label {
            location,
            message: message.into(),
        }
    }
}

/// A diagnostic: an error code reported at a location with arguments.
///
/// The message is rendered eagerly from the code's template so that
/// diagnostics can be compared and deduplicated by value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Primary location.
    pub location: Location,
    /// Template arguments, in placeholder order.
    pub args: Vec<String>,
    /// Rendered message.
    pub message: String,
    /// Secondary labels.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(
        code: ErrorCode,
        severity: Severity,
        location: Location,
        args: Vec<String>,
    ) -> Self {
        let message = code.format_message(&args);
        Diagnostic {
            code,
            severity,
            location,
            args,
            message,
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error<I, S>(code: ErrorCode, location: Location, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect();
        Self::new_with_severity(code, Severity::Error, location, args)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning<I, S>(code: ErrorCode, location: Location, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect();
        Self::new_with_severity(code, Severity::Warning, location, args)
    }

    /// Missing compiler required member `type_name.member_name`.
    #[cold]
    pub fn missing_member(type_name: &str, member_name: &str) -> Self {
        Self::error(ErrorCode::CS0656, Location::None, [type_name, member_name])
    }

    /// Predefined type `type_name` is not defined or imported.
    #[cold]
    pub fn missing_type(type_name: &str) -> Self {
        Self::error(ErrorCode::CS0518, Location::None, [type_name])
    }

    /// Add a secondary label.
    pub fn with_label(mut self, location: Location, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(location, message));
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Check if this is an error (vs warning/note).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests;
