//! `json2cpp diff` — lenient structural comparison of two JSON documents.
//!
//! Used to validate generated round-trips: encoding omits fields that were
//! null or absent before decoding, so the comparison tolerates null-valued
//! source-only fields while treating destination-only fields as mismatches.
//! The relation is intentionally asymmetric.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments for the `diff` subcommand.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Source document (typically the original input).
    pub src_file: PathBuf,

    /// Destination document (typically the re-encoded output).
    pub dst_file: PathBuf,
}

/// Runs the `diff` subcommand. Exit code 0 on match, 1 on mismatch.
///
/// # Errors
/// Returns an error if either document cannot be read or parsed.
pub fn run_diff(args: &DiffArgs) -> Result<u8> {
    let src = load_json(&args.src_file)?;
    let dst = load_json(&args.dst_file)?;
    if lenient_eq(&src, &dst) {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn load_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Compares two documents, skipping null-valued fields present only in
/// `src`.
///
/// Recursively: a null `src` value matches anything; object fields present
/// only in `src` must be null; fields present only in `dst` are mismatches;
/// arrays must match pairwise with equal length.
#[must_use]
pub fn lenient_eq(src: &Value, dst: &Value) -> bool {
    if src == dst || src.is_null() {
        return true;
    }

    match (src, dst) {
        (Value::Object(src_fields), Value::Object(dst_fields)) => {
            for (key, value) in src_fields {
                if !dst_fields.contains_key(key) && !value.is_null() {
                    debug!(key, "non-null field present only in source");
                    return false;
                }
            }
            for key in dst_fields.keys() {
                if !src_fields.contains_key(key) {
                    debug!(key, "field present only in destination");
                    return false;
                }
            }
            for (key, value) in src_fields {
                if let Some(dst_value) = dst_fields.get(key) {
                    if !lenient_eq(value, dst_value) {
                        debug!(key, "field values differ");
                        return false;
                    }
                }
            }
            true
        }
        (Value::Array(src_items), Value::Array(dst_items)) => {
            if src_items.len() != dst_items.len() {
                debug!(
                    src_len = src_items.len(),
                    dst_len = dst_items.len(),
                    "array lengths differ"
                );
                return false;
            }
            src_items
                .iter()
                .zip(dst_items)
                .all(|(a, b)| lenient_eq(a, b))
        }
        _ => false,
    }
}
