//! `json2cpp data` — generation from a sample JSON document.

use crate::{root_name_from_path, write_artifacts};
use anyhow::{Context, Result};
use clap::Args;
use json2cpp_codegen::{GeneratorConfig, generate_from_sample_str};
use std::fs;
use std::path::PathBuf;

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Sample JSON document; its basename names the root type.
    pub json_file: PathBuf,

    /// Directory to save the generated code files.
    #[arg(long, default_value = ".")]
    pub dstdir: PathBuf,

    /// C++ namespace separated with "::", for example "com::company".
    #[arg(long, default_value = "")]
    pub namespace: String,

    /// C++ string type, std::string or std::wstring.
    #[arg(long, default_value = "std::string")]
    pub stringtype: String,

    /// Also generate the round-trip test harness "main.cpp".
    #[arg(long)]
    pub gentest: bool,
}

/// Runs the `data` subcommand.
///
/// # Errors
/// Returns an error for unreadable input, invalid configuration, or failed
/// inference; any error terminates the run with a non-zero exit.
pub fn run_data(args: &DataArgs) -> Result<u8> {
    let config = GeneratorConfig::from_options(&args.namespace, &args.stringtype, args.gentest)?;
    let document = fs::read_to_string(&args.json_file)
        .with_context(|| format!("reading {}", args.json_file.display()))?;
    let root_name = root_name_from_path(&args.json_file)?;

    tracing::info!(root = %root_name, "generating from sample document");
    let artifacts = generate_from_sample_str(&document, &root_name, &config)?;
    write_artifacts(&args.dstdir, &artifacts)?;
    Ok(0)
}
