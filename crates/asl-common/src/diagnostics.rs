//! Diagnostics for the ASL compiler.
//!
//! Semantic problems are values, never panics: each pass appends
//! `Diagnostic`s to a shared `DiagnosticSink`, and the printed order is the
//! insertion order. Every diagnostic carries a stable numeric code from the
//! closed set in `diagnostic_codes` and a span anchoring it in the source.

use serde::{Deserialize, Serialize};

use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

/// A single diagnostic message anchored to a source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn error(file: impl Into<String>, span: Span, message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            file: file.into(),
            span,
            message: message.into(),
        }
    }
}

/// Ordered collection of diagnostics shared by the compiler passes.
///
/// Printing order is insertion order; the sink never reorders or
/// deduplicates.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Stable numeric codes for every diagnostic the compiler can emit.
///
/// Block 1xxx is the front end; block 2xxx is semantic analysis.
pub mod diagnostic_codes {
    pub const SYNTAX_ERROR: u32 = 1001;

    pub const DECLARED_IDENT: u32 = 2001;
    pub const UNDECLARED_IDENT: u32 = 2002;
    pub const INCOMPATIBLE_ASSIGNMENT: u32 = 2003;
    pub const NON_REFERENCEABLE_LEFT_EXPR: u32 = 2004;
    pub const NON_REFERENCEABLE_EXPRESSION: u32 = 2005;
    pub const BOOLEAN_REQUIRED: u32 = 2006;
    pub const IS_NOT_CALLABLE: u32 = 2007;
    pub const IS_NOT_FUNCTION: u32 = 2008;
    pub const NUMBER_OF_PARAMETERS: u32 = 2009;
    pub const INCOMPATIBLE_PARAMETER: u32 = 2010;
    pub const INCOMPATIBLE_RETURN: u32 = 2011;
    pub const READ_WRITE_REQUIRE_BASIC: u32 = 2012;
    pub const NON_ARRAY_IN_ARRAY_ACCESS: u32 = 2013;
    pub const NON_INTEGER_INDEX_IN_ARRAY_ACCESS: u32 = 2014;
    pub const INCOMPATIBLE_OPERATOR: u32 = 2015;
    pub const NO_MAIN_PROPERLY_DECLARED: u32 = 2016;
}

/// Message templates for the codes in [`diagnostic_codes`].
///
/// `{0}`, `{1}`, ... are filled by [`format_message`].
pub mod diagnostic_messages {
    pub const SYNTAX_ERROR: &str = "{0}";

    pub const DECLARED_IDENT: &str = "identifier '{0}' is already declared in this scope";
    pub const UNDECLARED_IDENT: &str = "identifier '{0}' is undeclared";
    pub const INCOMPATIBLE_ASSIGNMENT: &str = "incompatible types in assignment";
    pub const NON_REFERENCEABLE_LEFT_EXPR: &str =
        "left-hand side of assignment is not referenceable";
    pub const NON_REFERENCEABLE_EXPRESSION: &str = "expression is not referenceable";
    pub const BOOLEAN_REQUIRED: &str = "condition must be of type bool";
    pub const IS_NOT_CALLABLE: &str = "identifier '{0}' is not callable";
    pub const IS_NOT_FUNCTION: &str = "function '{0}' does not return a value";
    pub const NUMBER_OF_PARAMETERS: &str = "wrong number of arguments in call to '{0}'";
    pub const INCOMPATIBLE_PARAMETER: &str =
        "incompatible type for argument #{0} in call to '{1}'";
    pub const INCOMPATIBLE_RETURN: &str = "incompatible return statement";
    pub const READ_WRITE_REQUIRE_BASIC: &str = "read/write statements require a basic type";
    pub const NON_ARRAY_IN_ARRAY_ACCESS: &str = "indexed identifier is not an array";
    pub const NON_INTEGER_INDEX_IN_ARRAY_ACCESS: &str = "array index must be of type int";
    pub const INCOMPATIBLE_OPERATOR: &str = "incompatible operands for operator '{0}'";
    pub const NO_MAIN_PROPERLY_DECLARED: &str =
        "there is no 'main' function taking no parameters and returning no value";
}

/// Fill the `{n}` placeholders of a message template.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
