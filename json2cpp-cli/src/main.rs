//! # json2cpp CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use json2cpp_cli::data::{DataArgs, run_data};
use json2cpp_cli::diff::{DiffArgs, run_diff};
use json2cpp_cli::xsd::{XsdArgs, run_xsd};

/// Generate C++ classes with json_spirit encode/decode methods from a sample
/// JSON document or an XSD schema.
#[derive(Parser, Debug)]
#[command(name = "json2cpp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate classes by inferring the model from one sample document.
    Data(DataArgs),

    /// Generate classes for every type reachable from a schema element.
    Xsd(XsdArgs),

    /// Compare two JSON documents, skipping null fields present only in the
    /// first.
    Diff(DiffArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Data(args) => run_data(&args),
        Commands::Xsd(args) => run_xsd(&args),
        Commands::Diff(args) => run_diff(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
