//! Bound trees for synthesized method bodies.
//!
//! Synthesized methods carry straight-line bodies: field loads and stores,
//! calls, object creations, throws and returns, plus the labels and
//! conditional jumps a hash loop needs. [`BodyFactory`] builds them and
//! reports missing core-library members on the way.

use sharp_diagnostic::{Diagnostic, DiagnosticSink};
use sharp_names::SynthesizedLocalKind;
use smallvec::SmallVec;

use crate::{
    CompilationContext, ConstantValue, MethodSymbol, SpecialMember, SpecialType, SymbolRef,
    TypeRef, WellKnownMember,
};

/// Identifier of a label within one body.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LabelId(pub u32);

/// Identifier of a local within one body.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LocalId(pub u32);

/// A compiler-introduced local.
#[derive(Clone, PartialEq, Debug)]
pub struct BoundLocal {
    pub id: LocalId,
    pub kind: SynthesizedLocalKind,
    pub ty: TypeRef,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    LessThan,
    Add,
    Multiply,
    Xor,
}

#[derive(Clone, Debug)]
pub enum BoundExpr {
    This,
    /// `base`: `this` as a non-virtual call receiver.
    Base,
    Parameter(SymbolRef),
    Local(LocalId),
    Literal(ConstantValue),
    /// `default(T)`.
    Default(TypeRef),
    FieldAccess {
        receiver: Option<Box<BoundExpr>>,
        field: SymbolRef,
    },
    Call {
        receiver: Option<Box<BoundExpr>>,
        method: SymbolRef,
        /// Method type arguments of a generic call.
        type_arguments: SmallVec<[TypeRef; 2]>,
        arguments: Vec<BoundExpr>,
    },
    ObjectCreation {
        constructor: SymbolRef,
        arguments: Vec<BoundExpr>,
    },
    /// `new T[] { elements }`.
    ArrayCreation {
        element_type: TypeRef,
        elements: Vec<BoundExpr>,
    },
    Assignment {
        target: Box<BoundExpr>,
        value: Box<BoundExpr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<BoundExpr>,
        right: Box<BoundExpr>,
    },
    /// Stands in for an expression that could not be built.
    Bad,
}

impl BoundExpr {
    pub fn has_errors(&self) -> bool {
        match self {
            BoundExpr::Bad => true,
            BoundExpr::FieldAccess { receiver, .. } => {
                receiver.as_deref().is_some_and(BoundExpr::has_errors)
            }
            BoundExpr::Call {
                receiver,
                arguments,
                ..
            } => {
                receiver.as_deref().is_some_and(BoundExpr::has_errors)
                    || arguments.iter().any(BoundExpr::has_errors)
            }
            BoundExpr::ObjectCreation { arguments, .. }
            | BoundExpr::ArrayCreation {
                elements: arguments,
                ..
            } => arguments.iter().any(BoundExpr::has_errors),
            BoundExpr::Assignment { target, value } => target.has_errors() || value.has_errors(),
            BoundExpr::Binary { left, right, .. } => left.has_errors() || right.has_errors(),
            BoundExpr::This
            | BoundExpr::Base
            | BoundExpr::Parameter(_)
            | BoundExpr::Local(_)
            | BoundExpr::Literal(_)
            | BoundExpr::Default(_) => false,
        }
    }
}

#[derive(Clone, Debug)]
pub enum BoundStmt {
    Expression(BoundExpr),
    Return(Option<BoundExpr>),
    /// `throw expr;`, or a rethrow without an operand.
    Throw(Option<BoundExpr>),
    Label(LabelId),
    Goto(LabelId),
    ConditionalGoto {
        condition: BoundExpr,
        jump_if_true: bool,
        label: LabelId,
    },
    Block(BoundBlock),
}

impl BoundStmt {
    pub fn has_errors(&self) -> bool {
        match self {
            BoundStmt::Expression(expr) | BoundStmt::ConditionalGoto { condition: expr, .. } => {
                expr.has_errors()
            }
            BoundStmt::Return(expr) | BoundStmt::Throw(expr) => {
                expr.as_ref().is_some_and(BoundExpr::has_errors)
            }
            BoundStmt::Block(block) => block.has_errors(),
            BoundStmt::Label(_) | BoundStmt::Goto(_) => false,
        }
    }
}

/// A statement list with the locals it declares.
#[derive(Clone, Debug, Default)]
pub struct BoundBlock {
    pub locals: Vec<BoundLocal>,
    pub statements: Vec<BoundStmt>,
}

impl BoundBlock {
    pub fn new(statements: Vec<BoundStmt>) -> Self {
        BoundBlock {
            locals: Vec::new(),
            statements,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.statements.iter().any(BoundStmt::has_errors)
    }
}

/// Builds bound nodes for the body of one synthesized method.
pub struct BodyFactory<'a> {
    compilation: &'a dyn CompilationContext,
    method: SymbolRef,
    next_label: u32,
    locals: Vec<BoundLocal>,
}

impl<'a> BodyFactory<'a> {
    pub fn new(compilation: &'a dyn CompilationContext, method: SymbolRef) -> Self {
        BodyFactory {
            compilation,
            method,
            next_label: 0,
            locals: Vec::new(),
        }
    }

    pub fn compilation(&self) -> &'a dyn CompilationContext {
        self.compilation
    }

    /// The method whose body is being built.
    pub fn method(&self) -> &SymbolRef {
        &self.method
    }

    fn method_symbol(&self) -> Option<&dyn MethodSymbol> {
        self.method.as_method()
    }

    fn diagnostics(&self) -> &dyn DiagnosticSink {
        self.compilation.diagnostics()
    }

    /// Build the body of the factory's method.
    pub fn synthesize_body(&mut self) -> Option<BoundBlock> {
        let method = self.method.clone();
        let mut block = method.as_method()?.generate_body(self)?;
        block.locals.append(&mut self.locals);
        Some(block)
    }

    // -- Lookups --

    /// A special member, reporting CS0656 when it is missing.
    pub fn special_member(&self, member: SpecialMember) -> Option<SymbolRef> {
        self.compilation.require_special_member(member).ok()
    }

    /// A well-known member, reporting CS0656 when it is missing.
    pub fn well_known_member(&self, member: WellKnownMember) -> Option<SymbolRef> {
        self.compilation.require_well_known_member(member).ok()
    }

    pub fn special_type(&self, special: SpecialType) -> TypeRef {
        TypeRef::special_or_error(self.compilation.special_type(special), special)
    }

    // -- Expressions --

    pub fn this(&self) -> BoundExpr {
        BoundExpr::This
    }

    pub fn base(&self) -> BoundExpr {
        BoundExpr::Base
    }

    /// Load of the method's parameter at `ordinal`.
    pub fn parameter(&self, ordinal: usize) -> BoundExpr {
        self.method_symbol()
            .and_then(|method| method.parameters().get(ordinal).cloned())
            .map_or(BoundExpr::Bad, BoundExpr::Parameter)
    }

    /// Loads of every parameter, in order.
    pub fn parameters(&self) -> Vec<BoundExpr> {
        self.method_symbol()
            .map(|method| {
                method
                    .parameters()
                    .iter()
                    .cloned()
                    .map(BoundExpr::Parameter)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn literal(&self, value: ConstantValue) -> BoundExpr {
        BoundExpr::Literal(value)
    }

    pub fn null(&self) -> BoundExpr {
        BoundExpr::Literal(ConstantValue::Null)
    }

    pub fn default_value(&self, ty: TypeRef) -> BoundExpr {
        BoundExpr::Default(ty)
    }

    /// Instance field of `this`, or a static field when it is static.
    pub fn field(&self, field: SymbolRef) -> BoundExpr {
        let receiver = (!field.is_static()).then(|| Box::new(BoundExpr::This));
        BoundExpr::FieldAccess { receiver, field }
    }

    pub fn field_of(&self, receiver: BoundExpr, field: SymbolRef) -> BoundExpr {
        BoundExpr::FieldAccess {
            receiver: Some(Box::new(receiver)),
            field,
        }
    }

    pub fn call(
        &self,
        receiver: Option<BoundExpr>,
        method: SymbolRef,
        arguments: Vec<BoundExpr>,
    ) -> BoundExpr {
        self.call_generic(receiver, method, Vec::new(), arguments)
    }

    /// Call of a generic method instantiated with `type_arguments`.
    pub fn call_generic(
        &self,
        receiver: Option<BoundExpr>,
        method: SymbolRef,
        type_arguments: Vec<TypeRef>,
        arguments: Vec<BoundExpr>,
    ) -> BoundExpr {
        BoundExpr::Call {
            receiver: receiver.map(Box::new),
            method,
            type_arguments: type_arguments.into(),
            arguments,
        }
    }

    /// Call of an optional member; a missing member yields `Bad`.
    pub fn call_member(
        &self,
        receiver: Option<BoundExpr>,
        method: Option<SymbolRef>,
        arguments: Vec<BoundExpr>,
    ) -> BoundExpr {
        match method {
            Some(method) => self.call(receiver, method, arguments),
            None => BoundExpr::Bad,
        }
    }

    /// `new T(args)` through `constructor`; a missing constructor yields `Bad`.
    pub fn new_object(
        &self,
        constructor: Option<SymbolRef>,
        arguments: Vec<BoundExpr>,
    ) -> BoundExpr {
        match constructor {
            Some(constructor) => BoundExpr::ObjectCreation {
                constructor,
                arguments,
            },
            None => BoundExpr::Bad,
        }
    }

    pub fn array(&self, element_type: TypeRef, elements: Vec<BoundExpr>) -> BoundExpr {
        BoundExpr::ArrayCreation {
            element_type,
            elements,
        }
    }

    pub fn assignment(&self, target: BoundExpr, value: BoundExpr) -> BoundExpr {
        BoundExpr::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn binary(&self, operator: BinaryOperator, left: BoundExpr, right: BoundExpr) -> BoundExpr {
        BoundExpr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Declare a temporary of `ty`.
    pub fn synthesized_local(&mut self, ty: TypeRef, kind: SynthesizedLocalKind) -> LocalId {
        let id = LocalId(u32::try_from(self.locals.len()).unwrap_or(u32::MAX));
        self.locals.push(BoundLocal { id, kind, ty });
        id
    }

    pub fn local(&self, id: LocalId) -> BoundExpr {
        BoundExpr::Local(id)
    }

    pub fn generate_label(&mut self) -> LabelId {
        let label = LabelId(self.next_label);
        self.next_label += 1;
        label
    }

    // -- Statements --

    pub fn expression_statement(&self, expr: BoundExpr) -> BoundStmt {
        BoundStmt::Expression(expr)
    }

    pub fn assign(&self, target: BoundExpr, value: BoundExpr) -> BoundStmt {
        BoundStmt::Expression(self.assignment(target, value))
    }

    pub fn return_value(&self, value: BoundExpr) -> BoundStmt {
        BoundStmt::Return(Some(value))
    }

    pub fn return_void(&self) -> BoundStmt {
        BoundStmt::Return(None)
    }

    pub fn throw(&self, exception: BoundExpr) -> BoundStmt {
        BoundStmt::Throw(Some(exception))
    }

    pub fn label(&self, label: LabelId) -> BoundStmt {
        BoundStmt::Label(label)
    }

    pub fn goto(&self, label: LabelId) -> BoundStmt {
        BoundStmt::Goto(label)
    }

    pub fn goto_if(&self, condition: BoundExpr, jump_if_true: bool, label: LabelId) -> BoundStmt {
        BoundStmt::ConditionalGoto {
            condition,
            jump_if_true,
            label,
        }
    }

    pub fn block(&self, statements: Vec<BoundStmt>) -> BoundBlock {
        BoundBlock::new(statements)
    }

    /// Call to the base type's parameterless constructor on `this`.
    ///
    /// Value types have no base constructor call.
    pub fn base_constructor_call(&self) -> Option<BoundStmt> {
        let containing = crate::containing_type(self.method.as_ref())?;
        let containing = containing.as_named_type()?;
        if containing.is_value_type() {
            return None;
        }
        let base = containing.base_type()?;
        let constructor = base.definition().and_then(|definition| {
            definition.as_named_type().and_then(|base_type| {
                base_type
                    .instance_constructors()
                    .into_iter()
                    .find(|ctor| {
                        ctor.as_method()
                            .is_some_and(|ctor| ctor.parameters().is_empty())
                    })
            })
        });
        let constructor = match constructor {
            Some(constructor) => Some(constructor),
            None if base.special_type() == Some(SpecialType::Object) || base.is_error() => {
                self.special_member(SpecialMember::ObjectCtor)
            }
            None => {
                self.diagnostics()
                    .emit(Diagnostic::missing_member(&base.to_string(), ".ctor"));
                None
            }
        };
        let call = self.call_member(Some(self.this()), constructor, Vec::new());
        Some(self.expression_statement(call))
    }
}

#[cfg(test)]
mod tests;
