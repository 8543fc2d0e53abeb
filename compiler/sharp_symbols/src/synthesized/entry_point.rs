//! Synthesized entry points.
//!
//! Scripts and submissions get a `<Main>` or `<Factory>` that creates the
//! script object and runs its `<Initialize>` method. An `async Main` gets a
//! synchronous `<Main>` that blocks on the task it returns. Top-level
//! statements live in `<Main>$`, whose body is bound from source.

use std::sync::Arc;

use sharp_names::SynthesizedLocalKind;

use super::{BodyGenerator, SynthesizedMethod};
use crate::declared::{DeclaredNamedType, ParameterSpec};
use crate::{
    containing_type, same_symbol, Accessibility, BodyFactory, BoundBlock, BoundExpr,
    CompilationContext, DeclarationModifiers, MethodKind, SpecialType, Symbol, SymbolRef,
    TypeRef, TypeWithAnnotations, WeakSymbolRef, WellKnownMember, WellKnownType,
};

pub const SCRIPT_ENTRY_POINT_NAME: &str = "<Main>";
pub const SUBMISSION_FACTORY_NAME: &str = "<Factory>";
pub const SCRIPT_INITIALIZER_NAME: &str = "<Initialize>";
pub const TOP_LEVEL_STATEMENTS_ENTRY_POINT_NAME: &str = "<Main>$";

/// What awaiting a task-like return type produces.
#[derive(Clone, Debug)]
enum Awaited {
    /// `Task`.
    Void,
    /// `Task<T>`, producing `T`.
    Value(TypeWithAnnotations),
}

impl Awaited {
    fn of(compilation: &dyn CompilationContext, ty: &TypeRef) -> Option<Self> {
        let definition = ty.definition()?;
        let is = |well_known| {
            compilation
                .well_known_type(well_known)
                .is_some_and(|task| same_symbol(&task, definition))
        };
        if is(WellKnownType::Task) {
            Some(Awaited::Void)
        } else if is(WellKnownType::TaskOfT) {
            ty.type_arguments().first().cloned().map(Awaited::Value)
        } else {
            None
        }
    }

    fn get_awaiter(&self) -> WellKnownMember {
        match self {
            Awaited::Void => WellKnownMember::TaskGetAwaiter,
            Awaited::Value(_) => WellKnownMember::TaskOfTGetAwaiter,
        }
    }

    fn get_result(&self) -> WellKnownMember {
        match self {
            Awaited::Void => WellKnownMember::TaskAwaiterGetResult,
            Awaited::Value(_) => WellKnownMember::TaskAwaiterOfTGetResult,
        }
    }
}

fn owner_of(containing: &Arc<DeclaredNamedType>) -> WeakSymbolRef {
    let owner: SymbolRef = containing.clone();
    Arc::downgrade(&owner)
}

fn task_of(compilation: &dyn CompilationContext, result: TypeRef) -> TypeRef {
    match compilation.well_known_type(WellKnownType::TaskOfT) {
        Some(task) => TypeRef::constructed(task, vec![TypeWithAnnotations::oblivious(result)]),
        None => TypeRef::error(WellKnownType::TaskOfT.to_string()),
    }
}

/// `task.GetAwaiter().GetResult()`.
fn block_on(factory: &BodyFactory<'_>, task: BoundExpr, awaited: &Awaited) -> BoundExpr {
    let get_awaiter = factory.well_known_member(awaited.get_awaiter());
    let awaiter = factory.call_member(Some(task), get_awaiter, Vec::new());
    let get_result = factory.well_known_member(awaited.get_result());
    factory.call_member(Some(awaiter), get_result, Vec::new())
}

/// `internal async Task<T> <Initialize>()` of a script class. Its body is
/// the script's top-level code.
pub fn synthesize_script_initializer(
    compilation: &dyn CompilationContext,
    script_class: &Arc<DeclaredNamedType>,
    result_type: TypeRef,
) -> Arc<SynthesizedMethod> {
    let initializer = SynthesizedMethod::builder(
        SCRIPT_INITIALIZER_NAME,
        MethodKind::Ordinary,
        task_of(compilation, result_type),
    )
    .accessibility(Accessibility::Internal)
    .modifiers(DeclarationModifiers::ASYNC)
    .build(&owner_of(script_class));
    script_class.add_member(initializer.clone());
    initializer
}

/// `private static void <Main>()` running a script:
///
/// ```text
/// var script = new Script();
/// script.<Initialize>().GetAwaiter().GetResult();
/// ```
pub fn synthesize_script_entry_point(
    compilation: &dyn CompilationContext,
    script_class: &Arc<DeclaredNamedType>,
    initializer: &SymbolRef,
) -> Arc<SynthesizedMethod> {
    let entry_point = SynthesizedMethod::builder(
        SCRIPT_ENTRY_POINT_NAME,
        MethodKind::Ordinary,
        compilation.special_type_ref(SpecialType::Void),
    )
    .modifiers(DeclarationModifiers::STATIC)
    .body(ScriptEntryBody {
        initializer: initializer.clone(),
        submission: false,
    })
    .build(&owner_of(script_class));
    script_class.add_member(entry_point.clone());
    tracing::debug!(script = script_class.name(), "synthesized script entry point");
    entry_point
}

/// `public static Task<T> <Factory>(object[] submissionArray)` creating a
/// submission and returning its initialization task.
pub fn synthesize_submission_factory(
    compilation: &dyn CompilationContext,
    submission_class: &Arc<DeclaredNamedType>,
    initializer: &SymbolRef,
) -> Arc<SynthesizedMethod> {
    let return_type = initializer
        .as_method()
        .map(|method| method.return_type())
        .unwrap_or_else(|| compilation.special_type_ref(SpecialType::Object).into());
    let object_array = TypeRef::sz_array(TypeWithAnnotations::oblivious(
        compilation.special_type_ref(SpecialType::Object),
    ));
    let factory = SynthesizedMethod::builder(
        SUBMISSION_FACTORY_NAME,
        MethodKind::Ordinary,
        return_type,
    )
    .accessibility(Accessibility::Public)
    .modifiers(DeclarationModifiers::STATIC)
    .parameter(ParameterSpec::new("submissionArray", object_array))
    .body(ScriptEntryBody {
        initializer: initializer.clone(),
        submission: true,
    })
    .build(&owner_of(submission_class));
    submission_class.add_member(factory.clone());
    tracing::debug!(
        submission = submission_class.name(),
        "synthesized submission factory"
    );
    factory
}

#[derive(Debug)]
struct ScriptEntryBody {
    initializer: SymbolRef,
    /// Submissions pass the submission array to the constructor and
    /// return the task instead of blocking on it.
    submission: bool,
}

impl BodyGenerator for ScriptEntryBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let script_class = containing_type(factory.method().as_ref())?;
        let script_type = TypeRef::named(script_class.clone());
        let expected_arity = usize::from(self.submission);
        let constructor = script_class
            .as_named_type()?
            .instance_constructors()
            .into_iter()
            .find(|ctor| {
                ctor.as_method()
                    .is_some_and(|ctor| ctor.parameters().len() == expected_arity)
            });
        let script = factory.synthesized_local(script_type, SynthesizedLocalKind::LoweringTemp);
        let mut statements = Vec::new();
        let instance = factory.new_object(constructor, factory.parameters());
        statements.push(factory.assign(factory.local(script), instance));
        let task = factory.call(
            Some(factory.local(script)),
            self.initializer.clone(),
            Vec::new(),
        );
        if self.submission {
            statements.push(factory.return_value(task));
        } else {
            let awaited = self
                .initializer
                .as_method()
                .and_then(|method| Awaited::of(factory.compilation(), &method.return_type().ty))
                .unwrap_or(Awaited::Void);
            let result = block_on(factory, task, &awaited);
            statements.push(factory.expression_statement(result));
            statements.push(factory.return_void());
        }
        Some(factory.block(statements))
    }
}

/// Synchronous `<Main>` for an `async Main` returning `Task` or
/// `Task<int>`:
///
/// ```text
/// static int <Main>(string[] args) => Main(args).GetAwaiter().GetResult();
/// ```
///
/// Returns `None` when `user_main` does not return a task.
pub fn synthesize_async_forwarding_entry_point(
    compilation: &dyn CompilationContext,
    containing: &Arc<DeclaredNamedType>,
    user_main: &SymbolRef,
) -> Option<Arc<SynthesizedMethod>> {
    let method = user_main.as_method()?;
    let awaited = Awaited::of(compilation, &method.return_type().ty)?;
    let return_type = match awaited {
        Awaited::Void => compilation.special_type_ref(SpecialType::Void).into(),
        Awaited::Value(result) => result,
    };
    let entry_point = SynthesizedMethod::builder(
        SCRIPT_ENTRY_POINT_NAME,
        MethodKind::Ordinary,
        return_type,
    )
    .accessibility(Accessibility::Private)
    .modifiers(DeclarationModifiers::STATIC)
    .parameters_from(user_main, crate::TypeMap::empty())
    .associated_with(user_main)
    .body(AsyncForwardingBody {
        user_main: user_main.clone(),
    })
    .build(&owner_of(containing));
    containing.add_member(entry_point.clone());
    tracing::debug!(
        containing = containing.name(),
        "synthesized async main forwarder"
    );
    Some(entry_point)
}

#[derive(Debug)]
struct AsyncForwardingBody {
    user_main: SymbolRef,
}

impl BodyGenerator for AsyncForwardingBody {
    fn generate(&self, factory: &mut BodyFactory<'_>) -> Option<BoundBlock> {
        let method = self.user_main.as_method()?;
        let awaited = Awaited::of(factory.compilation(), &method.return_type().ty)?;
        let task = factory.call(None, self.user_main.clone(), factory.parameters());
        let result = block_on(factory, task, &awaited);
        let statements = match awaited {
            Awaited::Void => vec![factory.expression_statement(result), factory.return_void()],
            Awaited::Value(_) => vec![factory.return_value(result)],
        };
        Some(factory.block(statements))
    }
}

/// Return shape of a top-level-statements entry point.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TopLevelReturn {
    /// The statements contain `await`.
    pub is_async: bool,
    /// The statements contain `return expr;`.
    pub returns_int: bool,
}

/// `private static <ret> <Main>$(string[] args)` for a program written as
/// top-level statements. The body is bound from the statements.
pub fn synthesize_top_level_entry_point(
    compilation: &dyn CompilationContext,
    program_class: &Arc<DeclaredNamedType>,
    shape: TopLevelReturn,
) -> Arc<SynthesizedMethod> {
    let int32 = compilation.special_type_ref(SpecialType::Int32);
    let return_type = match (shape.is_async, shape.returns_int) {
        (false, false) => compilation.special_type_ref(SpecialType::Void),
        (false, true) => int32,
        (true, false) => compilation.well_known_type_ref(WellKnownType::Task),
        (true, true) => task_of(compilation, int32),
    };
    let mut modifiers = DeclarationModifiers::STATIC;
    if shape.is_async {
        modifiers |= DeclarationModifiers::ASYNC;
    }
    let string_array = TypeRef::sz_array(TypeWithAnnotations::oblivious(
        compilation.special_type_ref(SpecialType::String),
    ));
    let entry_point = SynthesizedMethod::builder(
        TOP_LEVEL_STATEMENTS_ENTRY_POINT_NAME,
        MethodKind::Ordinary,
        return_type,
    )
    .modifiers(modifiers)
    .parameter(ParameterSpec::new("args", string_array))
    .build(&owner_of(program_class));
    program_class.add_member(entry_point.clone());
    entry_point
}
