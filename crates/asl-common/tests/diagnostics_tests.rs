use asl_common::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticSink, diagnostic_codes, diagnostic_messages,
    format_message,
};
use asl_common::Span;

#[test]
fn error_constructor() {
    let diag = Diagnostic::error("a.asl", Span::new(1, 4), "boom", 2001);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.code, 2001);
    assert_eq!(diag.file, "a.asl");
    assert_eq!(diag.message, "boom");
}

#[test]
fn sink_preserves_insertion_order() {
    let mut sink = DiagnosticSink::new();
    assert!(sink.is_empty());
    sink.push(Diagnostic::error("a.asl", Span::at(0), "first", 1));
    sink.push(Diagnostic::error("a.asl", Span::at(5), "second", 2));
    sink.push(Diagnostic::error("a.asl", Span::at(2), "third", 3));
    assert_eq!(sink.len(), 3);
    let messages: Vec<&str> = sink.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["first", "second", "third"]);
}

#[test]
fn format_message_fills_placeholders() {
    assert_eq!(
        format_message(diagnostic_messages::UNDECLARED_IDENT, &["x"]),
        "identifier 'x' is undeclared"
    );
    assert_eq!(
        format_message(diagnostic_messages::INCOMPATIBLE_PARAMETER, &["2", "f"]),
        "incompatible type for argument #2 in call to 'f'"
    );
}

#[test]
fn codes_are_distinct() {
    let codes = [
        diagnostic_codes::DECLARED_IDENT,
        diagnostic_codes::UNDECLARED_IDENT,
        diagnostic_codes::INCOMPATIBLE_ASSIGNMENT,
        diagnostic_codes::NON_REFERENCEABLE_LEFT_EXPR,
        diagnostic_codes::NON_REFERENCEABLE_EXPRESSION,
        diagnostic_codes::BOOLEAN_REQUIRED,
        diagnostic_codes::IS_NOT_CALLABLE,
        diagnostic_codes::IS_NOT_FUNCTION,
        diagnostic_codes::NUMBER_OF_PARAMETERS,
        diagnostic_codes::INCOMPATIBLE_PARAMETER,
        diagnostic_codes::INCOMPATIBLE_RETURN,
        diagnostic_codes::READ_WRITE_REQUIRE_BASIC,
        diagnostic_codes::NON_ARRAY_IN_ARRAY_ACCESS,
        diagnostic_codes::NON_INTEGER_INDEX_IN_ARRAY_ACCESS,
        diagnostic_codes::INCOMPATIBLE_OPERATOR,
        diagnostic_codes::NO_MAIN_PROPERLY_DECLARED,
    ];
    for (i, a) in codes.iter().enumerate() {
        for b in &codes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
