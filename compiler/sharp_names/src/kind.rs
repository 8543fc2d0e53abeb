//! The one-character kind tag that follows `>` in a generated name.

use std::fmt;

/// Kind tag of a generated name.
///
/// A newtype over the ASCII tag byte rather than a closed enum: the parser
/// must round-trip tags written by other compiler versions, including ones
/// this version never produces. Known tags are associated constants, which
/// also makes them usable as match patterns.
///
/// Tags are frozen once shipped. Retired tags keep their `DEPRECATED_*`
/// constant so nobody reuses the character.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct GeneratedNameKind(u8);

impl GeneratedNameKind {
    /// No recognizable kind.
    pub const NONE: Self = Self(0);

    pub const STATE_MACHINE_STATE_FIELD: Self = Self(b'1');
    pub const ITERATOR_CURRENT_BACKING_FIELD: Self = Self(b'2');
    pub const STATE_MACHINE_PARAMETER_PROXY_FIELD: Self = Self(b'3');
    pub const THIS_PROXY_FIELD: Self = Self(b'4');
    pub const HOISTED_LOCAL_FIELD: Self = Self(b'5');
    pub const REUSABLE_HOISTED_LOCAL_FIELD: Self = Self(b'7');
    pub const DISPLAY_CLASS_LOCAL_OR_FIELD: Self = Self(b'8');
    pub const LAMBDA_CACHE_FIELD: Self = Self(b'9');
    pub const LAMBDA_METHOD: Self = Self(b'b');
    pub const LAMBDA_DISPLAY_CLASS: Self = Self(b'c');
    pub const STATE_MACHINE_TYPE: Self = Self(b'd');
    pub const FIXED_BUFFER_FIELD: Self = Self(b'e');
    pub const ANONYMOUS_TYPE: Self = Self(b'f');
    pub const LOCAL_FUNCTION: Self = Self(b'g');
    pub const TRANSPARENT_IDENTIFIER: Self = Self(b'h');
    pub const ANONYMOUS_TYPE_FIELD: Self = Self(b'i');
    pub const ANONYMOUS_TYPE_TYPE_PARAMETER: Self = Self(b'j');
    pub const AUTO_PROPERTY_BACKING_FIELD: Self = Self(b'k');
    pub const ITERATOR_CURRENT_THREAD_ID_FIELD: Self = Self(b'l');
    pub const ITERATOR_FINALLY_METHOD: Self = Self(b'm');
    pub const BASE_METHOD_WRAPPER: Self = Self(b'n');
    pub const DYNAMIC_CALL_SITE_CONTAINER_TYPE: Self = Self(b'o');
    pub const DYNAMIC_CALL_SITE_FIELD: Self = Self(b'p');
    pub const HOISTED_SYNTHESIZED_LOCAL_FIELD: Self = Self(b's');
    pub const ASYNC_BUILDER_FIELD: Self = Self(b't');
    pub const AWAITER_FIELD: Self = Self(b'u');
    pub const ASYNC_ITERATOR_PROMISE_OF_VALUE_OR_END_BACKING_FIELD: Self = Self(b'v');
    pub const DISPOSE_MODE_FIELD: Self = Self(b'w');
    pub const COMBINED_TOKENS_FIELD: Self = Self(b'x');
    pub const FILE_TYPE: Self = Self(b'F');
    pub const DELEGATE_CACHE_CONTAINER_TYPE: Self = Self(b'O');
    pub const PRIMARY_CONSTRUCTOR_PARAMETER: Self = Self(b'P');

    pub const DEPRECATED_OUTER_SCOPE_LOCALS: Self = Self(b'6');
    pub const DEPRECATED_INITIALIZER_LOCAL: Self = Self(b'g');
    pub const DEPRECATED_LAMBDA_DISPLAY_CLASS_LOCAL: Self = Self(b'a');
    pub const DEPRECATED_DYNAMIC_CALL_SITE_FIELD: Self = Self(b'q');
    pub const DEPRECATED_ITERATOR_DISPOSE: Self = Self(b'r');

    /// Tags that may appear in any name this version produces.
    pub const ALL: [Self; 32] = [
        Self::STATE_MACHINE_STATE_FIELD,
        Self::ITERATOR_CURRENT_BACKING_FIELD,
        Self::STATE_MACHINE_PARAMETER_PROXY_FIELD,
        Self::THIS_PROXY_FIELD,
        Self::HOISTED_LOCAL_FIELD,
        Self::REUSABLE_HOISTED_LOCAL_FIELD,
        Self::DISPLAY_CLASS_LOCAL_OR_FIELD,
        Self::LAMBDA_CACHE_FIELD,
        Self::LAMBDA_METHOD,
        Self::LAMBDA_DISPLAY_CLASS,
        Self::STATE_MACHINE_TYPE,
        Self::FIXED_BUFFER_FIELD,
        Self::ANONYMOUS_TYPE,
        Self::LOCAL_FUNCTION,
        Self::TRANSPARENT_IDENTIFIER,
        Self::ANONYMOUS_TYPE_FIELD,
        Self::ANONYMOUS_TYPE_TYPE_PARAMETER,
        Self::AUTO_PROPERTY_BACKING_FIELD,
        Self::ITERATOR_CURRENT_THREAD_ID_FIELD,
        Self::ITERATOR_FINALLY_METHOD,
        Self::BASE_METHOD_WRAPPER,
        Self::DYNAMIC_CALL_SITE_CONTAINER_TYPE,
        Self::DYNAMIC_CALL_SITE_FIELD,
        Self::HOISTED_SYNTHESIZED_LOCAL_FIELD,
        Self::ASYNC_BUILDER_FIELD,
        Self::AWAITER_FIELD,
        Self::ASYNC_ITERATOR_PROMISE_OF_VALUE_OR_END_BACKING_FIELD,
        Self::DISPOSE_MODE_FIELD,
        Self::COMBINED_TOKENS_FIELD,
        Self::FILE_TYPE,
        Self::DELEGATE_CACHE_CONTAINER_TYPE,
        Self::PRIMARY_CONSTRUCTOR_PARAMETER,
    ];

    /// Tag for a parsed character.
    ///
    /// Accepts `[1-9a-zA-Z]`, which covers every tag ever shipped plus room
    /// for future ones. Returns `None` for anything else.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='9' | 'a'..='z' | 'A'..='Z' => Some(Self(c as u8)),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    /// Whether names of this kind denote types.
    ///
    /// Dots in the owning method's name are replaced by `-` for these, so
    /// the generated type name never looks namespace-qualified.
    #[inline]
    pub const fn is_type_name(self) -> bool {
        matches!(
            self,
            Self::LAMBDA_DISPLAY_CLASS
                | Self::STATE_MACHINE_TYPE
                | Self::DYNAMIC_CALL_SITE_CONTAINER_TYPE
        )
    }

    /// Whether this version produces names with this tag.
    pub fn is_known(self) -> bool {
        Self::ALL.contains(&self)
    }

    /// Whether this tag was retired and must not be reused.
    pub const fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::DEPRECATED_OUTER_SCOPE_LOCALS
                | Self::DEPRECATED_LAMBDA_DISPLAY_CLASS_LOCAL
                | Self::DEPRECATED_DYNAMIC_CALL_SITE_FIELD
                | Self::DEPRECATED_ITERATOR_DISPOSE
        )
    }

    /// Readable name for debugging output.
    pub fn name(self) -> &'static str {
        match self {
            Self::NONE => "None",
            Self::STATE_MACHINE_STATE_FIELD => "StateMachineStateField",
            Self::ITERATOR_CURRENT_BACKING_FIELD => "IteratorCurrentBackingField",
            Self::STATE_MACHINE_PARAMETER_PROXY_FIELD => "StateMachineParameterProxyField",
            Self::THIS_PROXY_FIELD => "ThisProxyField",
            Self::HOISTED_LOCAL_FIELD => "HoistedLocalField",
            Self::REUSABLE_HOISTED_LOCAL_FIELD => "ReusableHoistedLocalField",
            Self::DISPLAY_CLASS_LOCAL_OR_FIELD => "DisplayClassLocalOrField",
            Self::LAMBDA_CACHE_FIELD => "LambdaCacheField",
            Self::LAMBDA_METHOD => "LambdaMethod",
            Self::LAMBDA_DISPLAY_CLASS => "LambdaDisplayClass",
            Self::STATE_MACHINE_TYPE => "StateMachineType",
            Self::FIXED_BUFFER_FIELD => "FixedBufferField",
            Self::ANONYMOUS_TYPE => "AnonymousType",
            Self::LOCAL_FUNCTION => "LocalFunction",
            Self::TRANSPARENT_IDENTIFIER => "TransparentIdentifier",
            Self::ANONYMOUS_TYPE_FIELD => "AnonymousTypeField",
            Self::ANONYMOUS_TYPE_TYPE_PARAMETER => "AnonymousTypeTypeParameter",
            Self::AUTO_PROPERTY_BACKING_FIELD => "AutoPropertyBackingField",
            Self::ITERATOR_CURRENT_THREAD_ID_FIELD => "IteratorCurrentThreadIdField",
            Self::ITERATOR_FINALLY_METHOD => "IteratorFinallyMethod",
            Self::BASE_METHOD_WRAPPER => "BaseMethodWrapper",
            Self::DYNAMIC_CALL_SITE_CONTAINER_TYPE => "DynamicCallSiteContainerType",
            Self::DYNAMIC_CALL_SITE_FIELD => "DynamicCallSiteField",
            Self::HOISTED_SYNTHESIZED_LOCAL_FIELD => "HoistedSynthesizedLocalField",
            Self::ASYNC_BUILDER_FIELD => "AsyncBuilderField",
            Self::AWAITER_FIELD => "AwaiterField",
            Self::ASYNC_ITERATOR_PROMISE_OF_VALUE_OR_END_BACKING_FIELD => {
                "AsyncIteratorPromiseOfValueOrEndBackingField"
            }
            Self::DISPOSE_MODE_FIELD => "DisposeModeField",
            Self::COMBINED_TOKENS_FIELD => "CombinedTokensField",
            Self::FILE_TYPE => "FileType",
            Self::DELEGATE_CACHE_CONTAINER_TYPE => "DelegateCacheContainerType",
            Self::PRIMARY_CONSTRUCTOR_PARAMETER => "PrimaryConstructorParameter",
            Self::DEPRECATED_OUTER_SCOPE_LOCALS => "Deprecated_OuterscopeLocals",
            Self::DEPRECATED_LAMBDA_DISPLAY_CLASS_LOCAL => "Deprecated_LambdaDisplayClassLocal",
            Self::DEPRECATED_DYNAMIC_CALL_SITE_FIELD => "Deprecated_DynamicCallSiteField",
            Self::DEPRECATED_ITERATOR_DISPOSE => "Deprecated_IteratorDispose",
            _ => "Unknown",
        }
    }
}

impl fmt::Debug for GeneratedNameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            write!(f, "GeneratedNameKind::None")
        } else {
            write!(f, "GeneratedNameKind::{}('{}')", self.name(), self.as_char())
        }
    }
}

impl fmt::Display for GeneratedNameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests;
