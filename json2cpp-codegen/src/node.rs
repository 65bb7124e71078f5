//! Structural node model and sample-document inference.
//!
//! A [`StructuralNode`] tree is the canonical description of a data shape.
//! For the sample path it is inferred from one concrete document; the schema
//! path drives the emission engine directly from resolved type definitions.

use crate::error::ModelError;
use serde_json::Value;
use std::collections::BTreeMap;

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// Boolean scalar.
    Boolean,
    /// 32-bit integer scalar.
    Integer,
    /// 64-bit integer scalar (schema path only).
    Int64,
    /// Floating-point scalar.
    Float,
    /// String scalar.
    String,
}

/// One typed position in an inferred data shape.
///
/// Object children are keyed by field name and iterate in lexicographic
/// order; an array holds exactly one representative element node.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralNode {
    /// Object with named children.
    Object(BTreeMap<String, StructuralNode>),
    /// Array with one representative element.
    Array(Box<StructuralNode>),
    /// Boolean scalar.
    Boolean,
    /// 32-bit integer scalar.
    Integer,
    /// 64-bit integer scalar.
    Int64,
    /// Floating-point scalar.
    Float,
    /// String scalar.
    String,
}

impl StructuralNode {
    /// Returns the kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Object(_) => NodeKind::Object,
            Self::Array(_) => NodeKind::Array,
            Self::Boolean => NodeKind::Boolean,
            Self::Integer => NodeKind::Integer,
            Self::Int64 => NodeKind::Int64,
            Self::Float => NodeKind::Float,
            Self::String => NodeKind::String,
        }
    }

    /// Returns true for object and array nodes.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }
}

/// Infers a structural node tree from one concrete document value.
///
/// Objects recurse into every key; arrays recurse into the first element
/// only, all elements being assumed structurally homogeneous. A null value
/// or an empty container carries no usable type information and aborts
/// inference.
///
/// # Errors
/// Returns `ModelError` for null values and empty containers.
pub fn infer_tree(value: &Value) -> Result<StructuralNode, ModelError> {
    infer_value(value, &mut Vec::new())
}

fn infer_value(value: &Value, path: &mut Vec<String>) -> Result<StructuralNode, ModelError> {
    match value {
        Value::Null => Err(ModelError::NullValue {
            path: render_path(path),
        }),
        Value::Bool(_) => Ok(StructuralNode::Boolean),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Ok(StructuralNode::Integer)
            } else {
                Ok(StructuralNode::Float)
            }
        }
        Value::String(_) => Ok(StructuralNode::String),
        Value::Array(elements) => {
            let Some(first) = elements.first() else {
                return Err(ModelError::EmptyArray {
                    path: render_path(path),
                });
            };
            path.push("[0]".to_string());
            let element = infer_value(first, path)?;
            path.pop();
            Ok(StructuralNode::Array(Box::new(element)))
        }
        Value::Object(fields) => {
            if fields.is_empty() {
                return Err(ModelError::EmptyObject {
                    path: render_path(path),
                });
            }
            let mut children = BTreeMap::new();
            for (name, child) in fields {
                path.push(name.clone());
                children.insert(name.clone(), infer_value(child, path)?);
                path.pop();
            }
            Ok(StructuralNode::Object(children))
        }
    }
}

fn render_path(path: &[String]) -> String {
    let mut rendered = String::from("$");
    for segment in path {
        if segment.starts_with('[') {
            rendered.push_str(segment);
        } else {
            rendered.push('.');
            rendered.push_str(segment);
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_scalars() {
        assert_eq!(infer_tree(&json!(true)).unwrap(), StructuralNode::Boolean);
        assert_eq!(infer_tree(&json!(42)).unwrap(), StructuralNode::Integer);
        assert_eq!(infer_tree(&json!(1.5)).unwrap(), StructuralNode::Float);
        assert_eq!(infer_tree(&json!("x")).unwrap(), StructuralNode::String);
    }

    #[test]
    fn test_integral_numbers_are_integers() {
        // large integral values still classify as Integer on the sample path
        assert_eq!(
            infer_tree(&json!(9_000_000_000_i64)).unwrap(),
            StructuralNode::Integer
        );
    }

    #[test]
    fn test_infer_object_sorts_children() {
        let tree = infer_tree(&json!({"b": 1, "a": "x", "c": true})).unwrap();
        let StructuralNode::Object(children) = tree else {
            panic!("expected object");
        };
        let keys: Vec<_> = children.keys().cloned().collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn test_infer_array_uses_first_element_only() {
        // second element is never inspected
        let tree = infer_tree(&json!([1, "not-a-number"])).unwrap();
        assert_eq!(
            tree,
            StructuralNode::Array(Box::new(StructuralNode::Integer))
        );
    }

    #[test]
    fn test_empty_array_is_fatal() {
        let err = infer_tree(&json!({"user": {"tags": []}})).unwrap_err();
        match err {
            ModelError::EmptyArray { path } => assert_eq!(path, "$.user.tags"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_object_and_null_are_fatal() {
        assert!(matches!(
            infer_tree(&json!({"a": {}})).unwrap_err(),
            ModelError::EmptyObject { .. }
        ));
        assert!(matches!(
            infer_tree(&json!({"a": null})).unwrap_err(),
            ModelError::NullValue { .. }
        ));
    }

    #[test]
    fn test_null_path_inside_array() {
        let err = infer_tree(&json!({"rows": [null]})).unwrap_err();
        match err {
            ModelError::NullValue { path } => assert_eq!(path, "$.rows[0]"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
