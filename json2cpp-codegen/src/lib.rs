//! # json2cpp Codegen
//!
//! Structural-model inference and C++ artifact generation.
//!
//! This crate provides:
//! - A canonical structural node model inferred from sample JSON documents
//! - An emission engine broadcasting traversal events to artifact handlers
//! - Deterministic C++ identifier derivation shared by all handlers
//! - Generation entry points for the sample and schema paths

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod generator;
pub mod handlers;
pub mod node;

pub use config::{GeneratorConfig, Namespace, StringType};
pub use engine::{Handler, walk_complex_type, walk_tree, walk_wrapper};
pub use error::{CodegenError, ConfigError, ModelError};
pub use generator::{Artifact, generate_sample, generate_schema};
pub use node::{NodeKind, StructuralNode, infer_tree};

/// Generates artifacts from a sample JSON document string.
///
/// # Errors
/// Returns `CodegenError` if the document does not parse or inference fails.
pub fn generate_from_sample_str(
    json: &str,
    root_name: &str,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, CodegenError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    generate_sample(&value, root_name, config)
}

/// Generates artifacts from an XSD schema string and a root element name.
///
/// # Errors
/// Returns `CodegenError` if the schema does not parse or resolution fails.
pub fn generate_from_xsd_str(
    xml: &str,
    element_name: &str,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, CodegenError> {
    let schema = json2cpp_schema::parse_schema(xml)?;
    generate_schema(&schema, element_name, config)
}
