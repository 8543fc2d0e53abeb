//! Runs synthesized helper bodies through a small evaluator and checks
//! them against the reference implementations in `sharp_names`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use sharp_names::compute_string_hash;
use sharp_symbols::synthesized::{GlobalHelper, PrivateImplementationDetails};
use sharp_symbols::{
    same_symbol, BinaryOperator, BodyFactory, BoundBlock, BoundExpr, BoundStmt, Compilation,
    CompilationContext, ConstantValue, CoreLibrary, LabelId, LocalId, SpecialMember, SymbolRef,
};

#[derive(Clone, PartialEq, Debug)]
enum Value {
    Null,
    Text(Vec<u16>),
    UInt32(u32),
    Int32(i32),
    Bool(bool),
}

/// Interprets the statement forms helper bodies use, with one argument.
struct Evaluator<'a> {
    compilation: &'a Compilation,
    argument: Value,
    locals: FxHashMap<LocalId, Value>,
}

impl Evaluator<'_> {
    fn run(&mut self, block: &BoundBlock) -> Option<Value> {
        let labels: FxHashMap<LabelId, usize> = block
            .statements
            .iter()
            .enumerate()
            .filter_map(|(index, statement)| match statement {
                BoundStmt::Label(label) => Some((*label, index)),
                _ => None,
            })
            .collect();
        let mut pc = 0;
        while let Some(statement) = block.statements.get(pc) {
            pc += 1;
            match statement {
                BoundStmt::Expression(expr) => {
                    self.eval(expr);
                }
                BoundStmt::Return(value) => return value.as_ref().map(|v| self.eval(v)),
                BoundStmt::Label(_) => {}
                BoundStmt::Goto(label) => pc = labels[label],
                BoundStmt::ConditionalGoto {
                    condition,
                    jump_if_true,
                    label,
                } => {
                    if self.eval(condition) == Value::Bool(*jump_if_true) {
                        pc = labels[label];
                    }
                }
                other => panic!("unsupported statement {other:?}"),
            }
        }
        None
    }

    fn is_member(&self, method: &SymbolRef, member: SpecialMember) -> bool {
        self.compilation
            .special_member(member)
            .is_some_and(|expected| same_symbol(method, &expected))
    }

    fn eval(&mut self, expr: &BoundExpr) -> Value {
        match expr {
            BoundExpr::Parameter(_) => self.argument.clone(),
            BoundExpr::Local(id) => self.locals[id].clone(),
            BoundExpr::Literal(ConstantValue::Null) => Value::Null,
            BoundExpr::Literal(ConstantValue::UInt32(v)) => Value::UInt32(*v),
            BoundExpr::Literal(ConstantValue::Int32(v)) => Value::Int32(*v),
            BoundExpr::Assignment { target, value } => {
                let value = self.eval(value);
                let BoundExpr::Local(id) = **target else {
                    panic!("helpers only assign locals");
                };
                self.locals.insert(id, value.clone());
                value
            }
            BoundExpr::Call {
                receiver: Some(receiver),
                method,
                arguments,
                ..
            } => {
                let Value::Text(units) = self.eval(receiver) else {
                    panic!("call on a non-string receiver");
                };
                if self.is_member(method, SpecialMember::StringLength) {
                    Value::Int32(i32::try_from(units.len()).unwrap())
                } else if self.is_member(method, SpecialMember::StringChars) {
                    let Value::Int32(index) = self.eval(&arguments[0]) else {
                        panic!("non-integer index");
                    };
                    Value::UInt32(u32::from(units[usize::try_from(index).unwrap()]))
                } else {
                    panic!("unexpected call to {}", method.name());
                }
            }
            BoundExpr::Binary {
                operator,
                left,
                right,
            } => {
                let (left, right) = (self.eval(left), self.eval(right));
                match (operator, left, right) {
                    (BinaryOperator::Equal, left, right) => Value::Bool(left == right),
                    (BinaryOperator::Xor, Value::UInt32(a), Value::UInt32(b)) => {
                        Value::UInt32(a ^ b)
                    }
                    (BinaryOperator::Multiply, Value::UInt32(a), Value::UInt32(b)) => {
                        Value::UInt32(a.wrapping_mul(b))
                    }
                    (BinaryOperator::Add, Value::Int32(a), Value::Int32(b)) => {
                        Value::Int32(a + b)
                    }
                    (BinaryOperator::LessThan, Value::Int32(a), Value::Int32(b)) => {
                        Value::Bool(a < b)
                    }
                    (operator, left, right) => {
                        panic!("unsupported {operator:?} on {left:?} and {right:?}")
                    }
                }
            }
            other => panic!("unsupported expression {other:?}"),
        }
    }
}

fn string_hash_body(compilation: &Arc<Compilation>) -> BoundBlock {
    let details = PrivateImplementationDetails::new(&**compilation, None);
    let method = details
        .get_or_add_helper(&**compilation, GlobalHelper::ComputeStringHash)
        .unwrap();
    BodyFactory::new(&**compilation, method)
        .synthesize_body()
        .unwrap()
}

fn run(compilation: &Compilation, block: &BoundBlock, argument: Value) -> Value {
    let mut evaluator = Evaluator {
        compilation,
        argument,
        locals: FxHashMap::default(),
    };
    evaluator.run(block).unwrap()
}

#[test]
fn string_hash_body_matches_reference() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let block = string_hash_body(&compilation);
    for text in ["", "a", "hello", "ComputeStringHash", "h\u{e9}llo w\u{f6}rld", "\u{1F600}"] {
        let units: Vec<u16> = text.encode_utf16().collect();
        assert_eq!(
            run(&compilation, &block, Value::Text(units)),
            Value::UInt32(compute_string_hash(Some(text))),
            "{text:?}"
        );
    }
}

#[test]
fn string_hash_body_of_null_is_zero() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let block = string_hash_body(&compilation);
    assert_eq!(run(&compilation, &block, Value::Null), Value::UInt32(0));
    assert_eq!(compute_string_hash(None), 0);
}
