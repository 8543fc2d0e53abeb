//! Bit-flag sets shared by the symbol model.

use bitflags::bitflags;

bitflags! {
    /// Legal attachment targets of an attribute.
    ///
    /// Values match the runtime's `System.AttributeTargets`, since they are
    /// written into `AttributeUsage` blobs verbatim.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct AttributeTargets: u32 {
        const ASSEMBLY = 0x0001;
        const MODULE = 0x0002;
        const CLASS = 0x0004;
        const STRUCT = 0x0008;
        const ENUM = 0x0010;
        const CONSTRUCTOR = 0x0020;
        const METHOD = 0x0040;
        const PROPERTY = 0x0080;
        const FIELD = 0x0100;
        const EVENT = 0x0200;
        const INTERFACE = 0x0400;
        const PARAMETER = 0x0800;
        const DELEGATE = 0x1000;
        const RETURN_VALUE = 0x2000;
        const GENERIC_PARAMETER = 0x4000;
        const ALL = 0x7FFF;
    }
}

bitflags! {
    /// Declaration modifiers of a member or type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclarationModifiers: u32 {
        const STATIC = 1 << 0;
        const ABSTRACT = 1 << 1;
        const VIRTUAL = 1 << 2;
        const OVERRIDE = 1 << 3;
        const SEALED = 1 << 4;
        const EXTERN = 1 << 5;
        const READ_ONLY = 1 << 6;
        const CONST = 1 << 7;
        const ASYNC = 1 << 8;
        const UNSAFE = 1 << 9;
        const FILE = 1 << 10;
        const REQUIRED = 1 << 11;
    }
}

bitflags! {
    /// Attributes the compiler may have to embed into the output module
    /// because the referenced core library does not define them.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct EmbeddableAttributes: u32 {
        const EMBEDDED = 1 << 0;
        const NULLABLE = 1 << 1;
        const NULLABLE_CONTEXT = 1 << 2;
        const NULLABLE_PUBLIC_ONLY = 1 << 3;
        const NATIVE_INTEGER = 1 << 4;
        const SCOPED_REF = 1 << 5;
        const REF_SAFETY_RULES = 1 << 6;
        const MEMORY_SAFETY_RULES = 1 << 7;
        const EXTENSION_MARKER = 1 << 8;
    }
}

bitflags! {
    /// Method implementation flags written to the method's metadata row.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MethodImplFlags: u16 {
        /// Body supplied by the runtime (delegate members).
        const RUNTIME = 0x0003;
        const NO_INLINING = 0x0008;
        const AGGRESSIVE_INLINING = 0x0100;
    }
}

bitflags! {
    /// Presence flags computed by walking a type.
    ///
    /// Attribute emission consults these to decide which auxiliary
    /// attributes a member's signature needs.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u16 {
        const HAS_DYNAMIC = 1 << 0;
        const HAS_NATIVE_INTEGER = 1 << 1;
        const HAS_TUPLE_NAMES = 1 << 2;
        const HAS_TYPE_PARAMETER = 1 << 3;
        const HAS_ERROR = 1 << 4;
        const HAS_NULLABLE_ANNOTATION = 1 << 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_targets_match_runtime_values() {
        assert_eq!(AttributeTargets::CLASS.bits(), 4);
        assert_eq!(AttributeTargets::RETURN_VALUE.bits(), 8192);
        assert!(AttributeTargets::ALL.contains(
            AttributeTargets::GENERIC_PARAMETER | AttributeTargets::ASSEMBLY
        ));
    }
}
