//! Tests for the symbol pass walk.

use asl_binder::{Binder, Decorations, SymbolTable};
use asl_common::diagnostics::{Diagnostic, DiagnosticSink, diagnostic_codes};
use asl_parser::ast::Program;
use asl_parser::parse;
use asl_types::TypeRegistry;

struct Bound {
    program: Program,
    types: TypeRegistry,
    symbols: SymbolTable,
    decorations: Decorations,
    diagnostics: Vec<Diagnostic>,
}

fn bind(source: &str) -> Bound {
    let output = parse(source, "test.asl");
    assert!(
        output.diagnostics.is_empty(),
        "parse errors: {:?}",
        output.diagnostics
    );
    let program = output.program;
    let mut types = TypeRegistry::new();
    let mut symbols = SymbolTable::new();
    let mut decorations = Decorations::new();
    let mut sink = DiagnosticSink::new();
    Binder::new(
        &mut types,
        &mut symbols,
        &mut decorations,
        &mut sink,
        "test.asl",
    )
    .run(&program);
    Bound {
        program,
        types,
        symbols,
        decorations,
        diagnostics: sink.into_vec(),
    }
}

#[test]
fn program_and_functions_get_scopes() {
    let bound = bind("func f() endfunc func main() endfunc");
    assert!(bound.decorations.scope_of(bound.program.node).is_some());
    for f in &bound.program.functions {
        assert!(bound.decorations.scope_of(f.node).is_some());
    }
    assert!(bound.diagnostics.is_empty());
}

#[test]
fn function_symbols_live_in_the_global_scope() {
    let mut bound = bind("func f(a : int) : float endfunc func main() endfunc");
    let global = bound.decorations.scope_of(bound.program.node).unwrap();
    bound.symbols.push_scope(global);
    assert!(bound.symbols.is_function("f"));
    let f_ty = bound.symbols.type_of("f").unwrap();
    assert!(bound.types.is_function_ty(f_ty));
    assert_eq!(
        bound.types.function_params(f_ty),
        [bound.types.integer_ty()]
    );
    assert_eq!(bound.types.function_ret_ty(f_ty), bound.types.float_ty());
}

#[test]
fn missing_return_annotation_means_void() {
    let mut bound = bind("func p() endfunc");
    let global = bound.decorations.scope_of(bound.program.node).unwrap();
    bound.symbols.push_scope(global);
    let p_ty = bound.symbols.type_of("p").unwrap();
    assert!(bound.types.is_void_ty(bound.types.function_ret_ty(p_ty)));
}

#[test]
fn parameters_and_locals_resolve_in_the_function_scope() {
    let mut bound = bind("func f(a : int) var b : float; endfunc");
    let scope = bound
        .decorations
        .scope_of(bound.program.functions[0].node)
        .unwrap();
    bound.symbols.push_scope(scope);
    assert!(bound.symbols.is_parameter("a"));
    assert!(bound.symbols.is_local_var("b"));
    assert_eq!(bound.symbols.type_of("b"), Some(bound.types.float_ty()));
}

#[test]
fn array_declaration_builds_an_array_type() {
    let mut bound = bind("func f() var v : array[5] of int; endfunc");
    let scope = bound
        .decorations
        .scope_of(bound.program.functions[0].node)
        .unwrap();
    bound.symbols.push_scope(scope);
    let v_ty = bound.symbols.type_of("v").unwrap();
    assert!(bound.types.is_array_ty(v_ty));
    assert_eq!(bound.types.array_size(v_ty), 5);
    assert_eq!(bound.types.array_elem_ty(v_ty), bound.types.integer_ty());
    // The declared type node carries the same decoration.
    let decl_ty = bound
        .decorations
        .type_of(bound.program.functions[0].decls[0].ty.node)
        .unwrap();
    assert_eq!(decl_ty, v_ty);
}

#[test]
fn variable_redeclaration_is_diagnosed() {
    let bound = bind("func f() var a : int; var a : float; endfunc");
    assert_eq!(bound.diagnostics.len(), 1);
    assert_eq!(bound.diagnostics[0].code, diagnostic_codes::DECLARED_IDENT);
    assert!(bound.diagnostics[0].message.contains("'a'"));
}

#[test]
fn variable_colliding_with_parameter_is_diagnosed() {
    let bound = bind("func f(a : int) var a : int; endfunc");
    assert_eq!(bound.diagnostics.len(), 1);
    assert_eq!(bound.diagnostics[0].code, diagnostic_codes::DECLARED_IDENT);
}

#[test]
fn function_redeclaration_is_diagnosed() {
    let bound = bind("func f() endfunc func f() endfunc");
    assert_eq!(bound.diagnostics.len(), 1);
    assert_eq!(bound.diagnostics[0].code, diagnostic_codes::DECLARED_IDENT);
    assert!(bound.diagnostics[0].message.contains("'f'"));
}

#[test]
fn rebinding_emits_the_same_diagnostics() {
    let source = "func f() var a : int; var a : float; endfunc func f() endfunc";
    let first = bind(source);

    // A second walk over the same tree with fresh state.
    let output = parse(source, "test.asl");
    let program = output.program;
    let mut types = TypeRegistry::new();
    let mut symbols = SymbolTable::new();
    let mut decorations = Decorations::new();
    let mut sink = DiagnosticSink::new();
    let mut binder = Binder::new(
        &mut types,
        &mut symbols,
        &mut decorations,
        &mut sink,
        "test.asl",
    );
    binder.run(&program);
    binder.run(&program);

    let codes = |diags: &[Diagnostic]| diags.iter().map(|d| d.code).collect::<Vec<_>>();
    // Two runs, each emitting the same set.
    assert_eq!(sink.len(), first.diagnostics.len() * 2);
    assert_eq!(
        codes(&sink.into_vec()),
        [codes(&first.diagnostics), codes(&first.diagnostics)].concat()
    );
}
