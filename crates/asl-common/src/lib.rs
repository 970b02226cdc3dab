//! Common types and utilities for the ASL compiler.
//!
//! This crate provides foundational types used across all asl crates:
//! - Source spans (`Span`)
//! - Position/line-map types for source locations (`LineMap`, `Position`)
//! - Diagnostics (`Diagnostic`, `DiagnosticSink`) and the closed set of
//!   diagnostic codes and message templates

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/LineMap types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Diagnostics - error values, codes, message templates, ordered sink
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticSink, diagnostic_codes, diagnostic_messages,
    format_message,
};
