use pretty_assertions::assert_eq;

use super::*;
use crate::declared::{DeclaredMethod, DeclaredNamedType, TypeParameterSpec};
use crate::{
    BoundExpr, BoundStmt, Compilation, CompilationContext, CoreLibrary, DeclarationModifiers,
    NamedTypeSymbol, Symbol, TypeKind,
};

struct Fixture {
    compilation: Arc<Compilation>,
    host: Arc<DeclaredNamedType>,
}

impl Fixture {
    fn new() -> Self {
        let compilation = Compilation::new("test", &CoreLibrary::full());
        let host = DeclaredNamedType::builder("Host", TypeKind::Class)
            .build_in_namespace(&compilation.global_namespace());
        Fixture { compilation, host }
    }

    fn int32(&self) -> TypeRef {
        self.compilation.special_type_ref(SpecialType::Int32)
    }

    /// `Items(int count)`, static when `is_static`.
    fn method(&self, is_static: bool) -> SymbolRef {
        let modifiers = if is_static {
            DeclarationModifiers::STATIC
        } else {
            DeclarationModifiers::empty()
        };
        DeclaredMethod::builder("Items", MethodKind::Ordinary)
            .modifiers(modifiers)
            .parameter(ParameterSpec::new("count", self.int32()))
            .build(&self.host, None)
    }
}

fn names(container: &SynthesizedContainer) -> Vec<String> {
    container
        .members()
        .iter()
        .map(|member| member.name().to_owned())
        .collect()
}

#[test]
fn test_enumerable_iterator_layout() {
    let fixture = Fixture::new();
    let mut spec = StateMachineSpec::new(
        StateMachineKind::Iterator {
            is_enumerable: true,
        },
        fixture.method(false),
    );
    spec.method_id = Some(DebugId::new(0, 0));
    spec.element_type = Some(fixture.int32().into());
    spec.hoisted_locals = vec![HoistedLocal {
        name: Some("i".to_owned()),
        kind: SynthesizedLocalKind::UserDefined,
        slot: 0,
        ty: fixture.int32().into(),
    }];
    spec.finally_states = vec![-3];

    let machine = synthesize_state_machine(&*fixture.compilation, &spec).unwrap();
    assert_eq!(machine.name(), "<Items>d__0");
    assert_eq!(
        names(&machine),
        vec![
            "<>1__state",
            "<>2__current",
            "<>l__initialThreadId",
            "<>4__this",
            "count",
            "<>3__count",
            "<i>5__1",
            ".ctor",
            "MoveNext",
            "System.IDisposable.Dispose",
            "<>m__Finally1",
        ]
    );

    let current = machine.member("<>2__current").unwrap();
    assert_eq!(current.declared_accessibility(), Accessibility::Private);
    assert_eq!(current.as_field().unwrap().ty().ty, fixture.int32());
    let hoisted = machine.member("<i>5__1").unwrap();
    assert_eq!(hoisted.declared_accessibility(), Accessibility::Public);

    let move_next = machine.member("MoveNext").unwrap();
    let move_next = move_next.as_method().unwrap();
    assert_eq!(move_next.return_type().ty.special_type(), Some(SpecialType::Boolean));
    assert!(move_next.is_metadata_final());
}

#[test]
fn test_iterator_constructor_stores_initial_state() {
    let fixture = Fixture::new();
    let spec = StateMachineSpec::new(
        StateMachineKind::Iterator {
            is_enumerable: false,
        },
        fixture.method(true),
    );
    let machine = synthesize_state_machine(&*fixture.compilation, &spec).unwrap();
    assert!(machine.member("<>4__this").is_none());
    assert!(machine.member("<>l__initialThreadId").is_none());

    let ctor = machine.constructor().unwrap();
    assert_eq!(ctor.as_method().unwrap().parameters()[0].name(), "<>1__state");
    let body = BodyFactory::new(&*fixture.compilation, ctor).synthesize_body().unwrap();
    assert_eq!(body.statements.len(), 3);
    let BoundStmt::Expression(BoundExpr::Assignment { target, value }) = &body.statements[1]
    else {
        panic!("expected the state store");
    };
    assert!(matches!(**target, BoundExpr::FieldAccess { receiver: Some(_), .. }));
    assert!(matches!(**value, BoundExpr::Parameter(_)));
    assert!(!body.has_errors());
}

#[test]
fn test_async_struct_machine() {
    let fixture = Fixture::new();
    let mut spec = StateMachineSpec::new(StateMachineKind::Async, fixture.method(true));
    spec.method_id = Some(DebugId::new(2, 0));
    spec.is_struct = true;
    spec.builder_type = Some(TypeRef::error("AsyncTaskMethodBuilder"));
    spec.awaiter_types = vec![TypeRef::error("TaskAwaiter")];

    let machine = synthesize_state_machine(&*fixture.compilation, &spec).unwrap();
    assert!(machine.is_value_type());
    assert!(machine.constructor().is_none());
    assert_eq!(
        names(&machine),
        vec!["<>1__state", "<>t__builder", "count", "<>u__1", "MoveNext"]
    );
    let move_next = machine.member("MoveNext").unwrap();
    assert!(move_next.as_method().unwrap().returns_void());
}

#[test]
fn test_async_iterator_fields() {
    let fixture = Fixture::new();
    let spec = StateMachineSpec::new(StateMachineKind::AsyncIterator, fixture.method(true));
    let machine = synthesize_state_machine(&*fixture.compilation, &spec).unwrap();
    let names = names(&machine);
    assert_eq!(
        &names[..7],
        &[
            "<>1__state",
            "<>t__builder",
            "<>v__promiseOfValueOrEnd",
            "<>2__current",
            "<>w__disposeMode",
            "<>x__combinedTokens",
            "<>l__initialThreadId",
        ]
    );
    assert!(names.contains(&"<>3__count".to_owned()));
}

#[test]
fn test_generic_method_machine_rewrites_field_types() {
    let fixture = Fixture::new();
    let method: SymbolRef = DeclaredMethod::builder("Echo", MethodKind::Ordinary)
        .modifiers(DeclarationModifiers::STATIC)
        .type_parameter(TypeParameterSpec::new("T"))
        .build_with(&fixture.host, |type_parameters| {
            let t = TypeRef::TypeParameter(type_parameters[0].clone());
            crate::declared::MethodSignature {
                return_type: TypeRef::error("IEnumerable").into(),
                parameters: vec![ParameterSpec::new("value", t)],
            }
        });
    let spec = StateMachineSpec::new(
        StateMachineKind::Iterator {
            is_enumerable: false,
        },
        method,
    );
    let machine = synthesize_state_machine(&*fixture.compilation, &spec).unwrap();
    assert_eq!(machine.metadata_name(), "<Echo>d`1");

    let own_t = TypeRef::TypeParameter(machine.type_parameters()[0].clone());
    let value = machine.member("value").unwrap();
    assert_eq!(value.as_field().unwrap().ty().ty, own_t);
}

#[test]
fn test_method_without_containing_type_is_rejected() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let global = crate::declared::DeclaredNamespace::global();
    let class = DeclaredNamedType::builder("Gone", TypeKind::Class).build_in_namespace(&global);
    let orphan: SymbolRef =
        DeclaredMethod::builder("Run", MethodKind::Ordinary).build(&class, None);
    drop(class);
    drop(global);
    let spec = StateMachineSpec::new(StateMachineKind::Async, orphan);
    assert!(synthesize_state_machine(&*compilation, &spec).is_none());
}
