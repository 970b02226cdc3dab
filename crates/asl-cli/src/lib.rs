//! The `aslc` compiler driver.
//!
//! Runs the pipeline over one source file: scan + parse, symbol pass,
//! type-check pass, and - only when no diagnostic was emitted - the code
//! pass. Diagnostics print in insertion order; a clean compilation prints
//! the serialized three-address program.

pub mod args;
pub mod driver;

pub use args::CliArgs;
pub use driver::{CompileOutcome, compile_source, render_diagnostic};
