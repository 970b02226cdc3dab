use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use asl_cli::{CliArgs, CompileOutcome, compile_source, render_diagnostic};
use asl_common::LineMap;

fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read '{}'", args.input.display()))?;
    let file = args.input.display().to_string();

    match compile_source(&source, &file) {
        CompileOutcome::Accepted(program) => {
            print!("{program}");
            Ok(ExitCode::SUCCESS)
        }
        CompileOutcome::Rejected(diagnostics) => {
            if args.json {
                for diagnostic in &diagnostics {
                    println!("{}", serde_json::to_string(diagnostic)?);
                }
            } else {
                let line_map = LineMap::build(&source);
                for diagnostic in &diagnostics {
                    eprintln!("{}", render_diagnostic(diagnostic, &source, &line_map));
                }
                if !args.quiet {
                    let n = diagnostics.len();
                    let plural = if n == 1 { "" } else { "s" };
                    eprintln!("{n} error{plural}");
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
