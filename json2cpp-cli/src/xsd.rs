//! `json2cpp xsd` — generation from an XSD schema.

use crate::write_artifacts;
use anyhow::{Context, Result};
use clap::Args;
use json2cpp_codegen::{GeneratorConfig, generate_from_xsd_str};
use std::fs;
use std::path::PathBuf;

/// Arguments for the `xsd` subcommand.
#[derive(Args, Debug)]
pub struct XsdArgs {
    /// XSD schema file.
    pub xsd_file: PathBuf,

    /// Generate code against this top-level element name.
    #[arg(long)]
    pub element: String,

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

/// Runs the `xsd` subcommand.
///
/// # Errors
/// Returns an error for unreadable input, invalid configuration, or schema
/// parsing/resolution failures.
pub fn run_xsd(args: &XsdArgs) -> Result<u8> {
    let config = GeneratorConfig::from_options(&args.namespace, &args.stringtype, args.gentest)?;
    let schema = fs::read_to_string(&args.xsd_file)
        .with_context(|| format!("reading {}", args.xsd_file.display()))?;

    tracing::info!(element = %args.element, "generating from schema");
    let artifacts = generate_from_xsd_str(&schema, &args.element, &config)?;
    if artifacts.is_empty() {
        tracing::warn!(element = %args.element, "element resolves to a bare scalar; nothing to generate");
        return Ok(0);
    }
    write_artifacts(&args.dstdir, &artifacts)?;
    Ok(0)
}
