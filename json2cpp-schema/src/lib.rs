//! # json2cpp Schema
//!
//! XSD subset parser and type resolution for json2cpp.
//!
//! This crate provides:
//! - Parsing of the supported XSD subset (element / simpleType / complexType
//!   with sequence composition) into an immutable schema definition
//! - SimpleType alias-chain resolution down to the five basic scalar types
//! - Dependency closure computation over the schema graph

pub mod closure;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod types;

pub use closure::DependencyClosure;
pub use error::{ParseError, SchemaError};
pub use parser::parse_schema;
pub use resolver::{resolve_basic_type, resolve_element, resolve_position, type_dependencies};
pub use types::{
    BasicType, ComplexTypeDef, ElementDef, SchemaDefinition, SequenceItem, SimpleTypeDef, TypeRef,
};
