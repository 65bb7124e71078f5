//! Emission engine.
//!
//! Walks a structural model and broadcasts lifecycle events to every
//! registered handler, in registration order. The engine owns only the
//! traversal; handlers accumulate output and never see each other.
//!
//! Three drivers share the [`Handler`] contract:
//! - [`walk_tree`] — depth-first pre/post order over an inferred node tree
//!   (sample path; no named types exist, so every event carries `None`)
//! - [`walk_complex_type`] — one resolved complexType (schema path; child
//!   positions of named types surface as enter/leave pairs carrying the
//!   resolved type name and are not descended into)
//! - [`walk_wrapper`] — one basic-array wrapper class

use crate::format::NameStep;
use crate::node::StructuralNode;
use json2cpp_schema::{
    BasicType, SchemaDefinition, SchemaError, SequenceItem, TypeRef, resolve_position,
};
use tracing::trace;

use crate::format;

/// Listener over structural traversal events.
///
/// `parents` is the ancestor name path from the root; `name` is `None` when
/// the parent is an array. On the schema path, object events carry the
/// resolved type name for named positions and array events carry the element
/// type's class name; both are `None` for anonymous (inferred) positions.
#[allow(unused_variables)]
pub trait Handler {
    /// Called when entering an object position.
    fn on_object_start(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {
    }
    /// Called when leaving an object position.
    fn on_object_end(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {}
    /// Called when entering an array position.
    fn on_array_start(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
    }
    /// Called when leaving an array position.
    fn on_array_end(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
    }
    /// Terminal event for a boolean position.
    fn on_boolean(&mut self, parents: &[NameStep], name: Option<&str>) {}
    /// Terminal event for a 32-bit integer position.
    fn on_integer(&mut self, parents: &[NameStep], name: Option<&str>) {}
    /// Terminal event for a 64-bit integer position.
    fn on_int64(&mut self, parents: &[NameStep], name: Option<&str>) {}
    /// Terminal event for a floating-point position.
    fn on_float(&mut self, parents: &[NameStep], name: Option<&str>) {}
    /// Terminal event for a string position.
    fn on_string(&mut self, parents: &[NameStep], name: Option<&str>) {}
}

/// Walks an inferred node tree rooted at `root_name`.
///
/// Object children are visited in lexicographic key order; the single
/// representative array element is visited with an anonymous name.
pub fn walk_tree(root: &StructuralNode, root_name: &str, handlers: &mut [&mut dyn Handler]) {
    let mut parents = Vec::new();
    walk_node(&mut parents, Some(root_name), root, handlers);
}

fn walk_node(
    parents: &mut Vec<NameStep>,
    name: Option<&str>,
    node: &StructuralNode,
    handlers: &mut [&mut dyn Handler],
) {
    match node {
        StructuralNode::Object(children) => {
            trace!(depth = parents.len(), name = name.unwrap_or("<element>"), "object start");
            for handler in handlers.iter_mut() {
                handler.on_object_start(parents, name, None);
            }
            parents.push(name.map(ToString::to_string));
            for (child_name, child) in children {
                walk_node(parents, Some(child_name), child, handlers);
            }
            parents.pop();
            for handler in handlers.iter_mut() {
                handler.on_object_end(parents, name, None);
            }
        }
        StructuralNode::Array(element) => {
            trace!(depth = parents.len(), name = name.unwrap_or("<element>"), "array start");
            for handler in handlers.iter_mut() {
                handler.on_array_start(parents, name, None);
            }
            parents.push(name.map(ToString::to_string));
            walk_node(parents, None, element, handlers);
            parents.pop();
            for handler in handlers.iter_mut() {
                handler.on_array_end(parents, name, None);
            }
        }
        StructuralNode::Boolean => {
            for handler in handlers.iter_mut() {
                handler.on_boolean(parents, name);
            }
        }
        StructuralNode::Integer => {
            for handler in handlers.iter_mut() {
                handler.on_integer(parents, name);
            }
        }
        StructuralNode::Int64 => {
            for handler in handlers.iter_mut() {
                handler.on_int64(parents, name);
            }
        }
        StructuralNode::Float => {
            for handler in handlers.iter_mut() {
                handler.on_float(parents, name);
            }
        }
        StructuralNode::String => {
            for handler in handlers.iter_mut() {
                handler.on_string(parents, name);
            }
        }
    }
}

/// Walks one resolved complexType position for the schema path.
///
/// For a single complexType, its sequence children surface as one event (or
/// enter/leave pair) each; named child types are not descended into — each
/// named type gets its own independent walk. A complexType without a
/// sequence emits no events.
///
/// # Errors
/// Returns `SchemaError` for unknown types or elements reached during the
/// walk.
pub fn walk_complex_type(
    schema: &SchemaDefinition,
    type_name: &str,
    multiple: bool,
    handlers: &mut [&mut dyn Handler],
) -> Result<(), SchemaError> {
    if multiple {
        walk_array_complex_type(type_name, handlers);
        return Ok(());
    }

    let complex = schema
        .complex_type(type_name)
        .ok_or_else(|| SchemaError::UnknownType {
            name: type_name.to_string(),
        })?;
    let Some(items) = &complex.sequence else {
        return Ok(());
    };

    let name = format::type_ref_class_name(&TypeRef::new(type_name, false));
    trace!(type_name, "walking complexType");
    for handler in handlers.iter_mut() {
        handler.on_object_start(&[], Some(&name), None);
    }

    let parents: Vec<NameStep> = vec![Some(name.clone())];
    for item in items {
        let (child_name, type_ref) = match item {
            SequenceItem::Ref { ref_name } => {
                let element =
                    schema
                        .element(ref_name)
                        .ok_or_else(|| SchemaError::UnknownElement {
                            name: ref_name.clone(),
                        })?;
                let (type_ref, _) =
                    resolve_position(schema, &element.type_name, element.multiple)?;
                (element.name.clone(), type_ref)
            }
            SequenceItem::Inline {
                name,
                type_name,
                multiple,
            } => {
                let (type_ref, _) = resolve_position(schema, type_name, *multiple)?;
                (name.clone(), type_ref)
            }
        };

        if type_ref.multiple {
            let element_class = format::type_ref_class_name(&type_ref);
            for handler in handlers.iter_mut() {
                handler.on_array_start(&parents, Some(&child_name), Some(&element_class));
            }
            for handler in handlers.iter_mut() {
                handler.on_array_end(&parents, Some(&child_name), Some(&element_class));
            }
        } else if let Some(basic) = type_ref.basic() {
            emit_scalar(basic, &parents, Some(&child_name), handlers);
        } else {
            for handler in handlers.iter_mut() {
                handler.on_object_start(&parents, Some(&child_name), Some(&type_ref.name));
            }
            for handler in handlers.iter_mut() {
                handler.on_object_end(&parents, Some(&child_name), Some(&type_ref.name));
            }
        }
    }

    for handler in handlers.iter_mut() {
        handler.on_object_end(&[], Some(&name), None);
    }

    Ok(())
}

/// Walks the array form of a complexType: a root array class whose element
/// is the named type.
fn walk_array_complex_type(type_name: &str, handlers: &mut [&mut dyn Handler]) {
    let name = format::type_ref_class_name(&TypeRef::new(type_name, true));
    trace!(type_name, "walking complexType array form");
    for handler in handlers.iter_mut() {
        handler.on_array_start(&[], Some(&name), Some(type_name));
    }

    let parents: Vec<NameStep> = vec![Some(name.clone())];
    for handler in handlers.iter_mut() {
        handler.on_object_start(&parents, None, Some(type_name));
    }
    for handler in handlers.iter_mut() {
        handler.on_object_end(&parents, None, Some(type_name));
    }

    for handler in handlers.iter_mut() {
        handler.on_array_end(&[], Some(&name), Some(type_name));
    }
}

/// Walks one basic-array wrapper class (`IntArray`, `StringArray`, ...).
pub fn walk_wrapper(basic: BasicType, handlers: &mut [&mut dyn Handler]) {
    let name = basic.wrapper_name();
    trace!(wrapper = name, "walking wrapper class");
    for handler in handlers.iter_mut() {
        handler.on_array_start(&[], Some(name), None);
    }

    let parents: Vec<NameStep> = vec![Some(name.to_string())];
    emit_scalar(basic, &parents, None, handlers);

    for handler in handlers.iter_mut() {
        handler.on_array_end(&[], Some(name), None);
    }
}

fn emit_scalar(
    basic: BasicType,
    parents: &[NameStep],
    name: Option<&str>,
    handlers: &mut [&mut dyn Handler],
) {
    for handler in handlers.iter_mut() {
        match basic {
            BasicType::Boolean => handler.on_boolean(parents, name),
            BasicType::Int => handler.on_integer(parents, name),
            BasicType::Int64 => handler.on_int64(parents, name),
            BasicType::Double => handler.on_float(parents, name),
            BasicType::String => handler.on_string(parents, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::infer_tree;
    use json2cpp_schema::parse_schema;
    use serde_json::json;

    /// Records every event as a flat line for order assertions.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Recorder {
        fn push(&mut self, kind: &str, parents: &[NameStep], name: Option<&str>) {
            self.events
                .push(format!("{kind} depth={} name={:?}", parents.len(), name));
        }
    }

    impl Handler for Recorder {
        fn on_object_start(&mut self, p: &[NameStep], n: Option<&str>, _t: Option<&str>) {
            self.push("obj+", p, n);
        }
        fn on_object_end(&mut self, p: &[NameStep], n: Option<&str>, _t: Option<&str>) {
            self.push("obj-", p, n);
        }
        fn on_array_start(&mut self, p: &[NameStep], n: Option<&str>, _t: Option<&str>) {
            self.push("arr+", p, n);
        }
        fn on_array_end(&mut self, p: &[NameStep], n: Option<&str>, _t: Option<&str>) {
            self.push("arr-", p, n);
        }
        fn on_boolean(&mut self, p: &[NameStep], n: Option<&str>) {
            self.push("bool", p, n);
        }
        fn on_integer(&mut self, p: &[NameStep], n: Option<&str>) {
            self.push("int", p, n);
        }
        fn on_int64(&mut self, p: &[NameStep], n: Option<&str>) {
            self.push("int64", p, n);
        }
        fn on_float(&mut self, p: &[NameStep], n: Option<&str>) {
            self.push("float", p, n);
        }
        fn on_string(&mut self, p: &[NameStep], n: Option<&str>) {
            self.push("string", p, n);
        }
    }

    #[test]
    fn test_tree_walk_order_is_depth_first_and_sorted() {
        let tree = infer_tree(&json!({
            "z_last": 1,
            "a_first": {"inner": true},
            "m_tags": ["x"]
        }))
        .unwrap();

        let mut recorder = Recorder::default();
        {
            let mut handlers: [&mut dyn Handler; 1] = [&mut recorder];
            walk_tree(&tree, "doc", &mut handlers);
        }

        assert_eq!(
            recorder.events,
            vec![
                "obj+ depth=0 name=Some(\"doc\")",
                "obj+ depth=1 name=Some(\"a_first\")",
                "bool depth=2 name=Some(\"inner\")",
                "obj- depth=1 name=Some(\"a_first\")",
                "arr+ depth=1 name=Some(\"m_tags\")",
                "string depth=2 name=None",
                "arr- depth=1 name=Some(\"m_tags\")",
                "int depth=1 name=Some(\"z_last\")",
                "obj- depth=0 name=Some(\"doc\")",
            ]
        );
    }

    #[test]
    fn test_handlers_receive_events_in_registration_order() {
        let tree = infer_tree(&json!({"a": 1})).unwrap();
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        {
            let mut handlers: [&mut dyn Handler; 2] = [&mut first, &mut second];
            walk_tree(&tree, "doc", &mut handlers);
        }
        assert_eq!(first.events, second.events);
        assert_eq!(first.events.len(), 3);
    }

    #[test]
    fn test_complex_type_walk_does_not_descend_into_named_types() {
        let schema = parse_schema(
            r#"<schema>
                <element name="root" type="Person"/>
                <complexType name="Person">
                    <sequence>
                        <element name="employer" type="Company"/>
                        <element name="age" type="int"/>
                        <element name="scores" type="double" maxOccurs="unbounded"/>
                    </sequence>
                </complexType>
                <complexType name="Company">
                    <sequence>
                        <element name="name" type="string"/>
                    </sequence>
                </complexType>
            </schema>"#,
        )
        .unwrap();

        let mut recorder = Recorder::default();
        {
            let mut handlers: [&mut dyn Handler; 1] = [&mut recorder];
            walk_complex_type(&schema, "Person", false, &mut handlers).unwrap();
        }

        assert_eq!(
            recorder.events,
            vec![
                "obj+ depth=0 name=Some(\"Person\")",
                "obj+ depth=1 name=Some(\"employer\")",
                "obj- depth=1 name=Some(\"employer\")",
                "int depth=1 name=Some(\"age\")",
                "arr+ depth=1 name=Some(\"scores\")",
                "arr- depth=1 name=Some(\"scores\")",
                "obj- depth=0 name=Some(\"Person\")",
            ]
        );
    }

    #[test]
    fn test_array_form_walk() {
        let schema = parse_schema(
            r#"<schema>
                <complexType name="Person">
                    <sequence><element name="age" type="int"/></sequence>
                </complexType>
            </schema>"#,
        )
        .unwrap();

        let mut recorder = Recorder::default();
        {
            let mut handlers: [&mut dyn Handler; 1] = [&mut recorder];
            walk_complex_type(&schema, "Person", true, &mut handlers).unwrap();
        }

        assert_eq!(
            recorder.events,
            vec![
                "arr+ depth=0 name=Some(\"PersonArray\")",
                "obj+ depth=1 name=None",
                "obj- depth=1 name=None",
                "arr- depth=0 name=Some(\"PersonArray\")",
            ]
        );
    }

    #[test]
    fn test_sequenceless_complex_type_emits_nothing() {
        let schema = parse_schema(r#"<schema><complexType name="Void"/></schema>"#).unwrap();
        let mut recorder = Recorder::default();
        {
            let mut handlers: [&mut dyn Handler; 1] = [&mut recorder];
            walk_complex_type(&schema, "Void", false, &mut handlers).unwrap();
        }
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_wrapper_walk() {
        let mut recorder = Recorder::default();
        {
            let mut handlers: [&mut dyn Handler; 1] = [&mut recorder];
            walk_wrapper(BasicType::Int64, &mut handlers);
        }
        assert_eq!(
            recorder.events,
            vec![
                "arr+ depth=0 name=Some(\"Int64Array\")",
                "int64 depth=1 name=None",
                "arr- depth=0 name=Some(\"Int64Array\")",
            ]
        );
    }
}
