//! Error types for model inference and code generation.

use thiserror::Error;

/// Error type for sample-document inference.
///
/// All variants are fatal: no later sibling or array element is consulted to
/// compensate for a position that carries no usable type information.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Null value at a sampled position.
    #[error("ambiguous or missing type information: null value at '{path}'")]
    NullValue {
        /// Path from the document root.
        path: String,
    },

    /// Empty object at a sampled position.
    #[error("ambiguous or missing type information: empty object at '{path}'")]
    EmptyObject {
        /// Path from the document root.
        path: String,
    },

    /// Empty array at a sampled position.
    #[error("ambiguous or missing type information: empty array at '{path}'")]
    EmptyArray {
        /// Path from the document root.
        path: String,
    },

    /// Document root is not an object or array.
    #[error("document root must be an object or an array")]
    ScalarRoot,
}

/// Error type for generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Namespace string with empty or malformed segments.
    #[error("invalid namespace '{value}': expected '::'-separated identifiers")]
    InvalidNamespace {
        /// Offending value.
        value: String,
    },

    /// String representation outside the two supported choices.
    #[error("unsupported string type '{value}': expected 'std::string' or 'std::wstring'")]
    UnsupportedStringType {
        /// Offending value.
        value: String,
    },
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Sample-document inference error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] json2cpp_schema::ParseError),

    /// Schema resolution error.
    #[error("schema error: {0}")]
    Schema(#[from] json2cpp_schema::SchemaError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
