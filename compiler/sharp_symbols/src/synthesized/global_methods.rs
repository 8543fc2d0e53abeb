//! Helper methods the compiler emits into `<PrivateImplementationDetails>`.
//!
//! Each helper is a static method with a fixed name and signature and a
//! small straight-line body. Lowering requests them by identity; the
//! helper container creates each at most once.

use std::sync::Arc;

use sharp_names::{RefKind, SynthesizedLocalKind, FNV_OFFSET_BASIS, FNV_PRIME};

use super::{BodyGenerator, SynthesizedMethod};
use crate::declared::{MethodSignature, ParameterSpec};
use crate::{
    Accessibility, BinaryOperator, BodyFactory, BoundBlock, BoundExpr, CompilationContext,
    ConstantValue, DeclarationModifiers, MethodKind, SpecialMember, SpecialType, SymbolRef,
    TypeRef, TypeWithAnnotations, WeakSymbolRef, WellKnownMember, WellKnownType,
};

/// Identity of a global helper method.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GlobalHelper {
    /// `uint ComputeStringHash(string s)`, FNV-1a over UTF-16 code units.
    ComputeStringHash,
    /// `uint ComputeSpanHash(Span<char> s)`.
    ComputeSpanHash,
    /// `uint ComputeReadOnlySpanHash(ReadOnlySpan<char> s)`.
    ComputeReadOnlySpanHash,
    /// `void ThrowSwitchExpressionException(object unmatchedValue)`.
    ThrowSwitchExpressionException,
    ThrowSwitchExpressionExceptionParameterless,
    ThrowInvalidOperationException,
    /// `void Throw(string paramName)`, throwing `ArgumentNullException`.
    ThrowArgumentNull,
    /// `void ThrowIfNull(object argument, string paramName)`.
    ThrowIfNull,
    InlineArrayAsSpan,
    InlineArrayAsReadOnlySpan,
    InlineArrayElementRef,
    InlineArrayElementRefReadOnly,
    InlineArrayFirstElementRef,
    InlineArrayFirstElementRefReadOnly,
}

impl GlobalHelper {
    pub const ALL: [GlobalHelper; 14] = [
        GlobalHelper::ComputeStringHash,
        GlobalHelper::ComputeSpanHash,
        GlobalHelper::ComputeReadOnlySpanHash,
        GlobalHelper::ThrowSwitchExpressionException,
        GlobalHelper::ThrowSwitchExpressionExceptionParameterless,
        GlobalHelper::ThrowInvalidOperationException,
        GlobalHelper::ThrowArgumentNull,
        GlobalHelper::ThrowIfNull,
        GlobalHelper::InlineArrayAsSpan,
        GlobalHelper::InlineArrayAsReadOnlySpan,
        GlobalHelper::InlineArrayElementRef,
        GlobalHelper::InlineArrayElementRefReadOnly,
        GlobalHelper::InlineArrayFirstElementRef,
        GlobalHelper::InlineArrayFirstElementRefReadOnly,
    ];

    /// Metadata name of the helper method.
    pub const fn name(self) -> &'static str {
        match self {
            GlobalHelper::ComputeStringHash => "ComputeStringHash",
            GlobalHelper::ComputeSpanHash => "ComputeSpanHash",
            GlobalHelper::ComputeReadOnlySpanHash => "ComputeReadOnlySpanHash",
            GlobalHelper::ThrowSwitchExpressionException => "ThrowSwitchExpressionException",
            GlobalHelper::ThrowSwitchExpressionExceptionParameterless => {
                "ThrowSwitchExpressionExceptionParameterless"
            }
            GlobalHelper::ThrowInvalidOperationException => "ThrowInvalidOperationException",
            GlobalHelper::ThrowArgumentNull => "Throw",
            GlobalHelper::ThrowIfNull => "ThrowIfNull",
            GlobalHelper::InlineArrayAsSpan => "InlineArrayAsSpan",
            GlobalHelper::InlineArrayAsReadOnlySpan => "InlineArrayAsReadOnlySpan",
            GlobalHelper::InlineArrayElementRef => "InlineArrayElementRef",
            GlobalHelper::InlineArrayElementRefReadOnly => "InlineArrayElementRefReadOnly",
            GlobalHelper::InlineArrayFirstElementRef => "InlineArrayFirstElementRef",
            GlobalHelper::InlineArrayFirstElementRefReadOnly => {
                "InlineArrayFirstElementRefReadOnly"
            }
        }
    }

    /// Helpers this helper's body calls. They must exist first.
    pub const fn dependency(self) -> Option<GlobalHelper> {
        match self {
            GlobalHelper::ThrowIfNull => Some(GlobalHelper::ThrowArgumentNull),
            _ => None,
        }
    }

    /// Create the helper method in `owner`. `dependency` is the symbol
    /// for [`Self::dependency`], when there is one.
    pub(crate) fn build(
        self,
        compilation: &dyn CompilationContext,
        owner: &WeakSymbolRef,
        dependency: Option<SymbolRef>,
    ) -> Arc<SynthesizedMethod> {
        let special = |special| compilation.special_type_ref(special);
        let void_type = special(SpecialType::Void);
        let uint32 = special(SpecialType::UInt32);
        let int32 = special(SpecialType::Int32);
        let string = special(SpecialType::String);
        let object = special(SpecialType::Object);
        let char_span = |well_known| {
            well_known_generic(
                compilation,
                well_known,
                vec![TypeWithAnnotations::oblivious(special(SpecialType::Char))],
            )
        };

        let method = |return_type: TypeRef| {
            SynthesizedMethod::builder(self.name(), MethodKind::Ordinary, return_type)
                .accessibility(Accessibility::Internal)
                .modifiers(DeclarationModifiers::STATIC)
        };
        match self {
            GlobalHelper::ComputeStringHash => method(uint32)
                .parameter(ParameterSpec::new("s", string))
                .body(HashBody {
                    length: HashInput::String,
                })
                .build(owner),
            GlobalHelper::ComputeSpanHash => method(uint32)
                .parameter(ParameterSpec::new("s", char_span(WellKnownType::Span)))
                .body(HashBody {
                    length: HashInput::Span,
                })
                .build(owner),
            GlobalHelper::ComputeReadOnlySpanHash => method(uint32)
                .parameter(ParameterSpec::new(
                    "s",
                    char_span(WellKnownType::ReadOnlySpan),
                ))
                .body(HashBody {
                    length: HashInput::ReadOnlySpan,
                })
                .build(owner),
            GlobalHelper::ThrowSwitchExpressionException => method(void_type)
                .parameter(ParameterSpec::new("unmatchedValue", object))
                .body(ThrowBody::SwitchExpression { with_value: true })
                .build(owner),
            GlobalHelper::ThrowSwitchExpressionExceptionParameterless => method(void_type)
                .body(ThrowBody::SwitchExpression { with_value: false })
                .build(owner),
            GlobalHelper::ThrowInvalidOperationException => method(void_type)
                .body(ThrowBody::InvalidOperation)
                .build(owner),
            GlobalHelper::ThrowArgumentNull => method(void_type)
                .parameter(ParameterSpec::new("paramName", string))
                .body(ThrowBody::ArgumentNull)
                .build(owner),
            GlobalHelper::ThrowIfNull => method(void_type)
                .parameter(ParameterSpec::new("argument", object))
                .parameter(ParameterSpec::new("paramName", string))
                .body(ThrowIfNullBody { throw: dependency })
                .build(owner),
            GlobalHelper::InlineArrayAsSpan
            | GlobalHelper::InlineArrayAsReadOnlySpan
            | GlobalHelper::InlineArrayElementRef
            | GlobalHelper::InlineArrayElementRefReadOnly
            | GlobalHelper::InlineArrayFirstElementRef
            | GlobalHelper::InlineArrayFirstElementRefReadOnly => {
                self.build_inline_array_helper(compilation, owner, int32, method(void_type))
            }
        }
    }

    fn build_inline_array_helper(
        self,
        compilation: &dyn CompilationContext,
        owner: &WeakSymbolRef,
        int32: TypeRef,
        builder: super::SynthesizedMethodBuilder,
    ) -> Arc<SynthesizedMethod> {
        let read_only = matches!(
            self,
            GlobalHelper::InlineArrayAsReadOnlySpan
                | GlobalHelper::InlineArrayElementRefReadOnly
                | GlobalHelper::InlineArrayFirstElementRefReadOnly
        );
        let buffer_ref_kind = if read_only {
            RefKind::RefReadOnly
        } else {
            RefKind::Ref
        };
        let return_ref_kind = match self {
            GlobalHelper::InlineArrayAsSpan | GlobalHelper::InlineArrayAsReadOnlySpan => {
                RefKind::None
            }
            _ if read_only => RefKind::RefReadOnly,
            _ => RefKind::Ref,
        };
        let span = match self {
            GlobalHelper::InlineArrayAsSpan => Some(WellKnownType::Span),
            GlobalHelper::InlineArrayAsReadOnlySpan => Some(WellKnownType::ReadOnlySpan),
            _ => None,
        };
        let count_name = match self {
            GlobalHelper::InlineArrayAsSpan | GlobalHelper::InlineArrayAsReadOnlySpan => {
                Some("length")
            }
            GlobalHelper::InlineArrayElementRef | GlobalHelper::InlineArrayElementRefReadOnly => {
                Some("index")
            }
            _ => None,
        };

        builder
            .type_parameters(&["TBuffer", "TElement"])
            .ref_kind(return_ref_kind)
            .body(InlineArrayBody { helper: self })
            .build_with(owner, |type_parameters, return_type, parameters| {
                let [buffer, element] = type_parameters else {
                    return MethodSignature {
                        return_type,
                        parameters,
                    };
                };
                let buffer = TypeRef::TypeParameter(buffer.clone());
                let element = TypeRef::TypeParameter(element.clone());
                let return_type = match span {
                    Some(span) => well_known_generic(
                        compilation,
                        span,
                        vec![TypeWithAnnotations::oblivious(element)],
                    ),
                    None => element,
                };
                let mut parameters =
                    vec![ParameterSpec::new("buffer", buffer).with_ref_kind(buffer_ref_kind)];
                if let Some(name) = count_name {
                    parameters.push(ParameterSpec::new(name, int32));
                }
                MethodSignature {
                    return_type: return_type.into(),
                    parameters,
                }
            })
    }
}

fn well_known_generic(
    compilation: &dyn CompilationContext,
    well_known: WellKnownType,
    type_arguments: Vec<TypeWithAnnotations>,
) -> TypeRef {
    match compilation.well_known_type(well_known) {
        Some(definition) => TypeRef::constructed(definition, type_arguments),
        None => TypeRef::error(well_known.to_string()),
    }
}

#[derive(Copy, Clone, Debug)]
enum HashInput {
    String,
    Span,
    ReadOnlySpan,
}

/// FNV-1a over the UTF-16 code units of parameter 0.
///
/// ```text
///     hash = 0;                       // string input only
///     if (s == null) goto end;        // string input only
///     hash = 2166136261;
///     i = 0;
///     goto check;
/// loop:
///     hash = (s[i] ^ hash) * 16777619;
///     i = i + 1;
/// check:
///     if (i < s.Length) goto loop;
/// end:
///     return hash;
/// ```
#[derive(Debug)]
struct HashBody {
    length: HashInput,
}

impl BodyGenerator for HashBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let (length, chars) = match self.length {
            HashInput::String => (
                factory.special_member(SpecialMember::StringLength),
                factory.special_member(SpecialMember::StringChars),
            ),
            HashInput::Span => (
                factory.well_known_member(WellKnownMember::SpanLength),
                factory.well_known_member(WellKnownMember::SpanGetItem),
            ),
            HashInput::ReadOnlySpan => (
                factory.well_known_member(WellKnownMember::ReadOnlySpanLength),
                factory.well_known_member(WellKnownMember::ReadOnlySpanGetItem),
            ),
        };
        let uint32 = factory.special_type(SpecialType::UInt32);
        let int32 = factory.special_type(SpecialType::Int32);
        let hash = factory.synthesized_local(uint32, SynthesizedLocalKind::LoweringTemp);
        let index = factory.synthesized_local(int32, SynthesizedLocalKind::LoweringTemp);
        let loop_label = factory.generate_label();
        let check_label = factory.generate_label();
        let end_label = factory.generate_label();

        let mut statements = Vec::new();
        if let HashInput::String = self.length {
            statements.push(factory.assign(
                factory.local(hash),
                factory.literal(ConstantValue::UInt32(0)),
            ));
            let is_null =
                factory.binary(BinaryOperator::Equal, factory.parameter(0), factory.null());
            statements.push(factory.goto_if(is_null, true, end_label));
        }
        statements.push(factory.assign(
            factory.local(hash),
            factory.literal(ConstantValue::UInt32(FNV_OFFSET_BASIS)),
        ));
        statements.push(factory.assign(
            factory.local(index),
            factory.literal(ConstantValue::Int32(0)),
        ));
        statements.push(factory.goto(check_label));

        statements.push(factory.label(loop_label));
        let unit = factory.call_member(
            Some(factory.parameter(0)),
            chars,
            vec![factory.local(index)],
        );
        let mixed = factory.binary(BinaryOperator::Xor, unit, factory.local(hash));
        let scrambled = factory.binary(
            BinaryOperator::Multiply,
            mixed,
            factory.literal(ConstantValue::UInt32(FNV_PRIME)),
        );
        statements.push(factory.assign(factory.local(hash), scrambled));
        let next = factory.binary(
            BinaryOperator::Add,
            factory.local(index),
            factory.literal(ConstantValue::Int32(1)),
        );
        statements.push(factory.assign(factory.local(index), next));

        statements.push(factory.label(check_label));
        let count = factory.call_member(Some(factory.parameter(0)), length, Vec::new());
        let in_range = factory.binary(BinaryOperator::LessThan, factory.local(index), count);
        statements.push(factory.goto_if(in_range, true, loop_label));

        statements.push(factory.label(end_label));
        statements.push(factory.return_value(factory.local(hash)));
        Some(factory.block(statements))
    }
}

#[derive(Debug)]
enum ThrowBody {
    /// `throw new SwitchExpressionException(unmatchedValue)`, falling
    /// back to `InvalidOperationException` on older frameworks.
    SwitchExpression { with_value: bool },
    InvalidOperation,
    /// `throw new ArgumentNullException(paramName)`.
    ArgumentNull,
}

impl BodyGenerator for ThrowBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let exception = match self {
            ThrowBody::SwitchExpression { with_value } => {
                let preferred = if *with_value {
                    WellKnownMember::SwitchExpressionExceptionCtorObject
                } else {
                    WellKnownMember::SwitchExpressionExceptionCtor
                };
                match factory.compilation().well_known_member(preferred) {
                    Some(constructor) => {
                        let arguments = if *with_value {
                            vec![factory.parameter(0)]
                        } else {
                            Vec::new()
                        };
                        factory.new_object(Some(constructor), arguments)
                    }
                    None => invalid_operation(factory),
                }
            }
            ThrowBody::InvalidOperation => invalid_operation(factory),
            ThrowBody::ArgumentNull => {
                let constructor =
                    factory.well_known_member(WellKnownMember::ArgumentNullExceptionCtorString);
                factory.new_object(constructor, vec![factory.parameter(0)])
            }
        };
        Some(factory.block(vec![factory.throw(exception)]))
    }
}

fn invalid_operation(factory: &BodyFactory<'_>) -> BoundExpr {
    let constructor = factory.well_known_member(WellKnownMember::InvalidOperationExceptionCtor);
    factory.new_object(constructor, Vec::new())
}

/// ```text
///     if (argument != null) goto end;
///     Throw(paramName);
/// end:
///     return;
/// ```
#[derive(Debug)]
struct ThrowIfNullBody {
    throw: Option<SymbolRef>,
}

impl BodyGenerator for ThrowIfNullBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let end = factory.generate_label();
        let not_null =
            factory.binary(BinaryOperator::NotEqual, factory.parameter(0), factory.null());
        let throw = factory.call_member(None, self.throw.clone(), vec![factory.parameter(1)]);
        let statements = vec![
            factory.goto_if(not_null, true, end),
            factory.expression_statement(throw),
            factory.label(end),
            factory.return_void(),
        ];
        Some(factory.block(statements))
    }
}

/// Reinterpret the buffer as its first element, then offset or wrap it.
#[derive(Debug)]
struct InlineArrayBody {
    helper: GlobalHelper,
}

impl BodyGenerator for InlineArrayBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let method = factory.method().as_method()?;
        let type_arguments: Vec<TypeRef> = method
            .type_parameters()
            .iter()
            .cloned()
            .map(TypeRef::TypeParameter)
            .collect();
        let [buffer_type, element_type] = type_arguments.as_slice() else {
            return None;
        };
        let (buffer_type, element_type) = (buffer_type.clone(), element_type.clone());
        let read_only = matches!(
            self.helper,
            GlobalHelper::InlineArrayAsReadOnlySpan
                | GlobalHelper::InlineArrayElementRefReadOnly
                | GlobalHelper::InlineArrayFirstElementRefReadOnly
        );

        let mut buffer = factory.parameter(0);
        if read_only {
            let as_ref = factory.well_known_member(WellKnownMember::UnsafeAsRef);
            buffer = match as_ref {
                Some(as_ref) => {
                    factory.call_generic(None, as_ref, vec![buffer_type.clone()], vec![buffer])
                }
                None => BoundExpr::Bad,
            };
        }
        let first = match factory.well_known_member(WellKnownMember::UnsafeAs) {
            Some(cast) => factory.call_generic(
                None,
                cast,
                vec![buffer_type, element_type.clone()],
                vec![buffer],
            ),
            None => BoundExpr::Bad,
        };

        let result = match self.helper {
            GlobalHelper::InlineArrayAsSpan | GlobalHelper::InlineArrayAsReadOnlySpan => {
                let create = if self.helper == GlobalHelper::InlineArrayAsSpan {
                    WellKnownMember::MemoryMarshalCreateSpan
                } else {
                    WellKnownMember::MemoryMarshalCreateReadOnlySpan
                };
                generic_call(factory, create, element_type, vec![first, factory.parameter(1)])
            }
            GlobalHelper::InlineArrayElementRef | GlobalHelper::InlineArrayElementRefReadOnly => {
                generic_call(
                    factory,
                    WellKnownMember::UnsafeAdd,
                    element_type,
                    vec![first, factory.parameter(1)],
                )
            }
            _ => first,
        };
        Some(factory.block(vec![factory.return_value(result)]))
    }
}

fn generic_call(
    factory: &BodyFactory<'_>,
    member: WellKnownMember,
    type_argument: TypeRef,
    arguments: Vec<BoundExpr>,
) -> BoundExpr {
    match factory.well_known_member(member) {
        Some(method) => factory.call_generic(None, method, vec![type_argument], arguments),
        None => BoundExpr::Bad,
    }
}

#[cfg(test)]
mod tests;
