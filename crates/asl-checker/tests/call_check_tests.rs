//! Call checking: callability, arity, per-argument compatibility, results.

use asl_binder::{Binder, Decorations, SymbolTable};
use asl_checker::Checker;
use asl_common::diagnostics::{Diagnostic, DiagnosticSink, diagnostic_codes};
use asl_parser::parse;
use asl_types::TypeRegistry;

fn check(source: &str) -> Vec<Diagnostic> {
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
    Checker::new(&types, &mut symbols, &mut decorations, &mut sink, "test.asl").run(&program);
    sink.into_vec()
}

fn codes(source: &str) -> Vec<u32> {
    check(source).iter().map(|d| d.code).collect()
}

#[test]
fn matching_procedure_call_is_clean() {
    assert!(codes("func p(a : int) endfunc func main() p(1); endfunc").is_empty());
}

#[test]
fn calling_a_variable_is_rejected() {
    let diagnostics = check("func main() var x : int; x(1); endfunc");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::IS_NOT_CALLABLE);
    assert!(diagnostics[0].message.contains("'x'"));
}

#[test]
fn wrong_arity() {
    assert_eq!(
        codes("func p(a : int) endfunc func main() p(1, 2); endfunc"),
        [diagnostic_codes::NUMBER_OF_PARAMETERS]
    );
    assert_eq!(
        codes("func p(a : int) endfunc func main() p(); endfunc"),
        [diagnostic_codes::NUMBER_OF_PARAMETERS]
    );
}

#[test]
fn argument_widening_is_admitted() {
    assert!(codes("func q(a : float) endfunc func main() q(1); endfunc").is_empty());
}

#[test]
fn incompatible_argument_names_position_and_callee() {
    let diagnostics = check("func q(a : int, b : float) endfunc func main() q(1, true); endfunc");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::INCOMPATIBLE_PARAMETER);
    assert!(diagnostics[0].message.contains("#2"));
    assert!(diagnostics[0].message.contains("'q'"));
}

#[test]
fn narrowing_argument_is_rejected() {
    assert_eq!(
        codes("func p(a : int) endfunc func main() p(1.5); endfunc"),
        [diagnostic_codes::INCOMPATIBLE_PARAMETER]
    );
}

#[test]
fn procedure_used_as_function() {
    assert_eq!(
        codes("func p() endfunc func main() var x : int; x = p(); endfunc"),
        [diagnostic_codes::IS_NOT_FUNCTION]
    );
}

#[test]
fn function_result_feeds_the_assignment() {
    assert!(
        codes("func g() : int return 1; endfunc func main() var x : int; x = g(); endfunc")
            .is_empty()
    );
}

#[test]
fn function_result_widens_into_float_target() {
    assert!(
        codes("func g() : int return 1; endfunc func main() var y : float; y = g(); endfunc")
            .is_empty()
    );
}

#[test]
fn calling_an_undeclared_name_reports_only_the_name() {
    assert_eq!(
        codes("func main() h(); endfunc"),
        [diagnostic_codes::UNDECLARED_IDENT]
    );
}

#[test]
fn ignoring_a_function_result_in_a_procedure_call_is_fine() {
    assert!(codes("func g() : int return 1; endfunc func main() g(); endfunc").is_empty());
}

#[test]
fn array_arguments_require_equal_array_types() {
    assert!(codes(
        "func r(v : array[3] of int) endfunc \
         func main() var v : array[3] of int; r(v); endfunc"
    )
    .is_empty());
    assert_eq!(
        codes(
            "func r(v : array[3] of int) endfunc \
             func main() var w : array[4] of int; r(w); endfunc"
        ),
        [diagnostic_codes::INCOMPATIBLE_PARAMETER]
    );
}

#[test]
fn arguments_are_checked_before_the_call_itself() {
    // The undeclared argument reports once; no parameter mismatch is piled
    // on top of the error argument.
    assert_eq!(
        codes("func p(a : int) endfunc func main() p(z); endfunc"),
        [diagnostic_codes::UNDECLARED_IDENT]
    );
}
