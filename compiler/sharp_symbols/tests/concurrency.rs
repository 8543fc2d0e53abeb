//! Concurrent access to the shared, lazily populated parts of a module.
//!
//! Method bodies are lowered in parallel, so every get-or-add path must
//! hand all callers the same symbol, and freezing the helper container
//! must never lose a member some caller already received.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;
use std::thread;

use rayon::prelude::*;
use sharp_names::RefKind;
use sharp_symbols::declared::DeclaredNamedType;
use sharp_symbols::synthesized::{
    DelegateShape, GlobalHelper, PrivateImplementationDetails, SynthesizedMethod,
};
use sharp_symbols::{
    same_symbol, Compilation, CompilationContext, CoreLibrary, EmbeddableAttributes, EmitOptions,
    MethodKind, MethodSymbol, ModuleEmitContext, NamedTypeSymbol, SpecialType, SymbolRef,
    TypeKind,
};

fn all_same(symbols: &[SymbolRef]) -> bool {
    symbols.iter().all(|symbol| same_symbol(symbol, &symbols[0]))
}

#[test]
fn parallel_helper_requests_create_one_method() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let details = PrivateImplementationDetails::new(&*compilation, None);
    let helpers: Vec<SymbolRef> = (0..64)
        .into_par_iter()
        .map(|i| {
            let helper = if i % 2 == 0 {
                GlobalHelper::ComputeStringHash
            } else {
                GlobalHelper::ThrowIfNull
            };
            details.get_or_add_helper(&*compilation, helper).unwrap()
        })
        .collect();
    assert_eq!(details.len(), 3);
    let hashes: Vec<SymbolRef> = helpers.iter().step_by(2).cloned().collect();
    assert!(all_same(&hashes));
    let throws: Vec<SymbolRef> = helpers.iter().skip(1).step_by(2).cloned().collect();
    assert!(all_same(&throws));
}

#[test]
fn parallel_data_fields_share_size_type() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let details = PrivateImplementationDetails::new(&*compilation, None);
    let blob = [7u8; 24];
    let fields: Vec<SymbolRef> = (0..32)
        .into_par_iter()
        .map(|_| details.get_or_add_data_field(&*compilation, &blob, 1).unwrap())
        .collect();
    assert!(all_same(&fields));
    assert_eq!(details.len(), 2);
    assert!(details.lookup("__StaticArrayInitTypeSize=24").is_some());
}

#[test]
fn freeze_keeps_every_member_handed_out() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let details = PrivateImplementationDetails::new(&*compilation, None);
    let (added, snapshot) = thread::scope(|scope| {
        let adders: Vec<_> = (0u8..8)
            .map(|seed| {
                let details = &details;
                let compilation = &compilation;
                scope.spawn(move || {
                    (0u8..16)
                        .filter_map(|i| {
                            let blob = [seed, i, 0, 1, 2];
                            details.get_or_add_data_field(&**compilation, &blob, 1).ok()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let snapshot = details.freeze();
        let added: Vec<SymbolRef> = adders
            .into_iter()
            .flat_map(|adder| adder.join().unwrap())
            .collect();
        (added, snapshot)
    });
    for member in &added {
        assert!(snapshot.iter().any(|frozen| same_symbol(frozen, member)));
    }
    assert_eq!(details.members().len(), snapshot.len());
}

#[test]
fn concurrent_this_parameter_is_one_symbol() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let point: SymbolRef = DeclaredNamedType::builder("Point", TypeKind::Struct)
        .build_in_namespace(&compilation.global_namespace());
    let void = compilation.special_type_ref(SpecialType::Void);
    let method = SynthesizedMethod::builder("<Move>g__Step|0_0", MethodKind::Ordinary, void)
        .build(&Arc::downgrade(&point));
    let parameters: Vec<SymbolRef> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| method.this_parameter().unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    assert!(parameters.iter().all(|p| Arc::ptr_eq(p, &parameters[0])));
    let this = parameters[0].as_parameter().unwrap();
    assert_eq!(this.ref_kind(), RefKind::Ref);
}

#[test]
fn concurrent_module_requests_share_symbols() {
    let compilation = Compilation::new("test", &CoreLibrary::full());
    let options = EmitOptions {
        needs_embedded: EmbeddableAttributes::NULLABLE | EmbeddableAttributes::NATIVE_INTEGER,
        ..EmitOptions::default()
    };
    let module = ModuleEmitContext::new(compilation, options);
    let shape = DelegateShape::by_value(5, false, 0);

    let results: Vec<(SymbolRef, SymbolRef, SymbolRef)> = (0..32)
        .into_par_iter()
        .map(|_| {
            let embedded: SymbolRef = module
                .embedded_attribute(EmbeddableAttributes::NULLABLE)
                .unwrap();
            let delegate: SymbolRef = module.synthesized_delegate(&shape);
            let helper = module.global_helper(GlobalHelper::ComputeSpanHash).unwrap();
            (embedded, delegate, helper)
        })
        .collect();

    let (embedded, delegates, helpers): (Vec<_>, Vec<_>, Vec<_>) = results.into_iter().fold(
        (Vec::new(), Vec::new(), Vec::new()),
        |(mut a, mut b, mut c), (x, y, z)| {
            a.push(x);
            b.push(y);
            c.push(z);
            (a, b, c)
        },
    );
    assert!(all_same(&embedded));
    assert!(all_same(&delegates));
    assert!(all_same(&helpers));
    assert_eq!(module.delegate_cache().len(), 1);
    assert_eq!(module.private_implementation_details().len(), 1);

    let nullable = module
        .embedded_attribute(EmbeddableAttributes::NULLABLE)
        .unwrap();
    assert_eq!(nullable.instance_constructors().len(), 2);
    assert_eq!(module.embedded_attributes().len(), 3);
}
