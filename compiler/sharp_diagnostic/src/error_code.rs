//! Error codes for compiler diagnostics.
//!
//! Codes follow the `CSnnnn` numbering so that tooling which already knows
//! those numbers can match them. Each code owns a message template with
//! positional `{0}`, `{1}`, ... placeholders filled from diagnostic arguments.

use std::fmt;

/// Error codes reported by symbol synthesis.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Predefined type is not defined or imported
    CS0518,
    /// Missing compiler required member
    CS0656,
    /// Reserved attribute used explicitly
    CS8335,
    /// Module-level attribute could not be synthesized
    CS8356,
    /// Internal compiler error during synthesis
    CS8078,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::CS0518,
        ErrorCode::CS0656,
        ErrorCode::CS8335,
        ErrorCode::CS8356,
        ErrorCode::CS8078,
    ];

    /// The code as it appears in output, e.g. `"CS0656"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::CS0518 => "CS0518",
            ErrorCode::CS0656 => "CS0656",
            ErrorCode::CS8335 => "CS8335",
            ErrorCode::CS8356 => "CS8356",
            ErrorCode::CS8078 => "CS8078",
        }
    }

    /// Message template with positional placeholders.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorCode::CS0518 => "Predefined type '{0}' is not defined or imported",
            ErrorCode::CS0656 => "Missing compiler required member '{0}.{1}'",
            ErrorCode::CS8335 => {
                "Do not use '{0}'. This is reserved for compiler usage."
            }
            ErrorCode::CS8356 => "Module attribute '{0}' could not be synthesized",
            ErrorCode::CS8078 => "An expression is too long or complex to compile",
        }
    }

    /// Substitute `args` into this code's template.
    ///
    /// Placeholders without a matching argument are left as-is.
    pub fn format_message(&self, args: &[String]) -> String {
        let template = self.template();
        let mut out = String::with_capacity(template.len() + 16);
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            match after[..close].parse::<usize>().ok().and_then(|i| args.get(i)) {
                Some(arg) => out.push_str(arg),
                None => out.push_str(&rest[open..=open + 1 + close]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }

    /// Check if this code reports a missing predefined type or member.
    pub fn is_missing_predefined(&self) -> bool {
        matches!(self, ErrorCode::CS0518 | ErrorCode::CS0656)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"CS0656"` (case-insensitive).
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
