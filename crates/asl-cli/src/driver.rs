//! Pipeline orchestration.
//!
//! The contract: run the symbol pass then the type-check pass; if the sink
//! is non-empty, the program is rejected and the diagnostics are the
//! output. Otherwise run the code pass and the serialized program is the
//! output. The code pass never sees an ill-typed tree.

use colored::Colorize;
use tracing::debug;

use asl_binder::{Binder, Decorations, SymbolTable};
use asl_checker::Checker;
use asl_common::diagnostics::{Diagnostic, DiagnosticSink};
use asl_common::LineMap;
use asl_emitter::{CodeGen, TacProgram};
use asl_parser::parse;
use asl_types::TypeRegistry;

/// Result of compiling one source file.
#[derive(Debug)]
pub enum CompileOutcome {
    /// Front-end or semantic diagnostics; the program was rejected.
    Rejected(Vec<Diagnostic>),
    /// Clean compilation: the emitted three-address program.
    Accepted(TacProgram),
}

impl CompileOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, CompileOutcome::Accepted(_))
    }
}

/// Run the whole pipeline over `source`.
#[must_use]
pub fn compile_source(source: &str, file: &str) -> CompileOutcome {
    let mut sink = DiagnosticSink::new();

    let parsed = parse(source, file);
    sink.extend(parsed.diagnostics);
    if !sink.is_empty() {
        debug!(count = sink.len(), "front-end diagnostics");
        return CompileOutcome::Rejected(sink.into_vec());
    }
    let program = parsed.program;

    let mut types = TypeRegistry::new();
    let mut symbols = SymbolTable::new();
    let mut decorations = Decorations::new();

    Binder::new(&mut types, &mut symbols, &mut decorations, &mut sink, file).run(&program);
    Checker::new(&types, &mut symbols, &mut decorations, &mut sink, file).run(&program);
    if !sink.is_empty() {
        debug!(count = sink.len(), "semantic diagnostics");
        return CompileOutcome::Rejected(sink.into_vec());
    }

    let tac = CodeGen::new(&types, &mut symbols, &decorations).run(&program);
    CompileOutcome::Accepted(tac)
}

/// Human-readable one-line rendering:
/// `file:line:col: error: message [ASLxxxx]`.
#[must_use]
pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str, line_map: &LineMap) -> String {
    let position = line_map.offset_to_position(diagnostic.span.start, source);
    format!(
        "{}:{}:{}: {}: {} [ASL{}]",
        diagnostic.file,
        position.line + 1,
        position.column + 1,
        "error".red().bold(),
        diagnostic.message,
        diagnostic.code,
    )
}
