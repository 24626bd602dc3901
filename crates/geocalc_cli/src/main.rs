//! Terminal entry point for geocalc.
//!
//! # Responsibility
//! - Parse command-line arguments and bootstrap core logging.
//! - Run one-shot calculations or the interactive session loop.
//! - Keep stdout for results; diagnostics go to stderr.

mod repl;

use clap::{Parser, Subcommand};
use geocalc_core::{
    fields_for, init_logging, render_report, CalculationSession, LogTarget, Operation,
    SessionConfig, ShapeKind, ShapeMode,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "geocalc", version, about = "Area, perimeter, volume and surface area calculator")]
struct Cli {
    /// Log level: trace|debug|info|warn|error|off.
    #[arg(long, env = "GEOCALC_LOG_LEVEL", default_value = DEFAULT_CLI_LOG_LEVEL, global = true)]
    log_level: String,

    /// Absolute directory for rolling log files; logs go to stderr when unset.
    #[arg(long, env = "GEOCALC_LOG_DIR", global = true)]
    log_dir: Option<String>,

    /// Length unit label applied to every input.
    #[arg(long, default_value = "cm", global = true)]
    unit: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute one shape and print the result.
    Calc {
        shape: String,
        operation: String,
        /// `name=value` pairs; omitted fields use the form defaults.
        assignments: Vec<String>,
        /// Print the full plain-text report instead of one line.
        #[arg(long)]
        report: bool,
    },
    /// List the input fields of one shape and operation.
    Fields { shape: String, operation: String },
    /// Interactive session (default).
    Repl {
        /// Initial shape family: 2d|3d.
        #[arg(long, default_value = "2d")]
        mode: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    bootstrap_logging(&cli);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = match cli.command {
        Some(Command::Calc {
            shape,
            operation,
            assignments,
            report,
        }) => run_calc(&mut out, &cli.unit, &shape, &operation, &assignments, report),
        Some(Command::Fields { shape, operation }) => run_fields(&mut out, &shape, &operation),
        Some(Command::Repl { mode }) => run_repl(&mut out, &cli.unit, &mode),
        None => run_repl(&mut out, &cli.unit, "2d"),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn bootstrap_logging(cli: &Cli) {
    // Why: a broken log setup must not block calculations; report and continue.
    let target = match cli.log_dir.as_deref() {
        Some(dir) => LogTarget::directory(dir),
        None => Ok(LogTarget::Stderr),
    };
    if let Err(err) = target.and_then(|target| init_logging(&cli.log_level, target)) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn run_calc(
    out: &mut impl Write,
    unit: &str,
    shape: &str,
    operation: &str,
    assignments: &[String],
    report: bool,
) -> Result<(), String> {
    let shape = ShapeKind::parse(shape).map_err(|err| err.to_string())?;
    let operation = Operation::parse(operation).map_err(|err| err.to_string())?;

    let mut session = CalculationSession::new(SessionConfig {
        mode: shape.mode(),
        unit: unit.to_string(),
    });
    session.select_shape(shape).map_err(|err| err.to_string())?;
    session
        .select_operation(operation)
        .map_err(|err| err.to_string())?;
    session
        .apply_assignments(&assignments.join(" "))
        .map_err(|err| err.to_string())?;

    let result = session.submit().map_err(|err| err.to_string())?;
    let text = if report {
        render_report(result)
    } else {
        format!("{} {}\n", result.display_value(), result.quantity_unit())
    };
    out.write_all(text.as_bytes())
        .map_err(|err| format!("failed to write output: {err}"))
}

fn run_fields(out: &mut impl Write, shape: &str, operation: &str) -> Result<(), String> {
    let shape = ShapeKind::parse(shape).map_err(|err| err.to_string())?;
    let operation = Operation::parse(operation).map_err(|err| err.to_string())?;
    let fields = fields_for(shape, operation).map_err(|err| err.to_string())?;

    for field in fields {
        writeln!(
            out,
            "{:<8} {:<14} default={} min={}",
            field.dimension.as_str(),
            field.label,
            field.default,
            field.minimum
        )
        .map_err(|err| format!("failed to write output: {err}"))?;
    }
    Ok(())
}

fn run_repl(out: &mut impl Write, unit: &str, mode: &str) -> Result<(), String> {
    let mode = ShapeMode::parse(mode).map_err(|err| err.to_string())?;
    let mut session = CalculationSession::new(SessionConfig {
        mode,
        unit: unit.to_string(),
    });
    let stdin = io::stdin();
    repl::run(stdin.lock().lines(), out, &mut session)
        .map_err(|err| format!("session I/O failed: {err}"))
}
