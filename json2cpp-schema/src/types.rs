//! Schema type definitions.
//!
//! Data structures for the supported XSD subset: top-level elements,
//! simpleType aliases, and complexTypes with sequence composition.

use std::collections::BTreeMap;

/// The five scalar types the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BasicType {
    /// XSD `boolean`.
    Boolean,
    /// XSD `int`.
    Int,
    /// XSD `long`.
    Int64,
    /// XSD `double`.
    Double,
    /// XSD `string`.
    String,
}

impl BasicType {
    /// Parses an XSD type name into a basic type.
    #[must_use]
    pub fn from_xsd_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "int" => Some(Self::Int),
            "long" => Some(Self::Int64),
            "double" => Some(Self::Double),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// Returns the XSD spelling of the type.
    #[must_use]
    pub fn xsd_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Int64 => "long",
            Self::Double => "double",
            Self::String => "string",
        }
    }

    /// Returns the fixed wrapper class used when the type is repeated.
    #[must_use]
    pub fn wrapper_class(self) -> &'static str {
        match self {
            Self::Boolean => "detail::BooleanArray",
            Self::Int => "detail::IntArray",
            Self::Int64 => "detail::Int64Array",
            Self::Double => "detail::DoubleArray",
            Self::String => "detail::StringArray",
        }
    }

    /// Returns the unqualified wrapper class name.
    #[must_use]
    pub fn wrapper_name(self) -> &'static str {
        match self {
            Self::Boolean => "BooleanArray",
            Self::Int => "IntArray",
            Self::Int64 => "Int64Array",
            Self::Double => "DoubleArray",
            Self::String => "StringArray",
        }
    }
}

/// Identifies a basic or named complex type together with its cardinality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeRef {
    /// Type name (XSD spelling for basic types).
    pub name: String,
    /// Whether the position holds a list of instances.
    pub multiple: bool,
}

impl TypeRef {
    /// Creates a type reference.
    #[must_use]
    pub fn new(name: impl Into<String>, multiple: bool) -> Self {
        Self {
            name: name.into(),
            multiple,
        }
    }

    /// Returns the basic type, if this references one.
    #[must_use]
    pub fn basic(&self) -> Option<BasicType> {
        BasicType::from_xsd_name(&self.name)
    }
}

/// A top-level named element.
#[derive(Debug, Clone)]
pub struct ElementDef {
    /// Element name.
    pub name: String,
    /// Referenced type name, namespace prefix stripped.
    pub type_name: String,
    /// Cardinality derived from the occurrence bounds.
    pub multiple: bool,
}

/// A simpleType alias restricting a base type.
#[derive(Debug, Clone)]
pub struct SimpleTypeDef {
    /// Alias name.
    pub name: String,
    /// Restriction base type name, namespace prefix stripped.
    pub base_type_name: String,
}

/// One child position inside a complexType sequence.
#[derive(Debug, Clone)]
pub enum SequenceItem {
    /// Inline element with its own name and type.
    Inline {
        /// Field name.
        name: String,
        /// Referenced type name.
        type_name: String,
        /// Cardinality of the position.
        multiple: bool,
    },
    /// Reference to a named top-level element. The referenced element
    /// supplies both name and cardinality; occurrence bounds on the ref
    /// site are ignored.
    Ref {
        /// Referenced element name.
        ref_name: String,
    },
}

/// A complexType composed of an ordered element sequence.
#[derive(Debug, Clone)]
pub struct ComplexTypeDef {
    /// Type name.
    pub name: String,
    /// Ordered child positions; `None` when the type declares no sequence.
    pub sequence: Option<Vec<SequenceItem>>,
}

/// Parsed schema: the three name-keyed definition tables.
///
/// Built once per schema source and held immutable for the duration of a
/// generation run.
#[derive(Debug, Clone, Default)]
pub struct SchemaDefinition {
    /// Top-level named elements.
    pub elements: BTreeMap<String, ElementDef>,
    /// SimpleType aliases.
    pub simple_types: BTreeMap<String, SimpleTypeDef>,
    /// ComplexType definitions.
    pub complex_types: BTreeMap<String, ComplexTypeDef>,
}

impl SchemaDefinition {
    /// Creates an empty schema definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a top-level element by name.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&ElementDef> {
        self.elements.get(name)
    }

    /// Looks up a complexType by name.
    #[must_use]
    pub fn complex_type(&self, name: &str) -> Option<&ComplexTypeDef> {
        self.complex_types.get(name)
    }

    /// Returns true if a type with the given name is declared (basic names
    /// count as declared).
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        BasicType::from_xsd_name(name).is_some()
            || self.simple_types.contains_key(name)
            || self.complex_types.contains_key(name)
    }
}
