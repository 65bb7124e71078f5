//! Deterministic C++ identifier and signature derivation.
//!
//! Every function here is a pure function of the node name and ancestor
//! path. Handlers never coordinate directly; they stay consistent because
//! they all derive identifiers through this module.
//!
//! A name of `None` marks an anonymous position: the element of an array.
//! Ancestor paths are therefore lists of `Option<String>`.

use crate::config::{Namespace, StringType};
use json2cpp_schema::TypeRef;

/// Banner placed at the top of every generated file.
pub const FILE_BANNER: &str = "// Generated by json2cpp. Do not edit.\n";

/// One ancestor step: a field name, or `None` for an array-element level.
pub type NameStep = Option<String>;

/// Derives the class identifier for a position.
///
/// Named positions convert snake_case segments to TitleCase and concatenate.
/// Names already qualified with `::` (the basic-array wrappers) pass through
/// unchanged. Anonymous positions synthesize an `ArrayElement` prefix once
/// per contiguous level of array nesting, applied outward until a named
/// ancestor is reached.
#[must_use]
pub fn class_name(name: Option<&str>, parents: &[NameStep]) -> String {
    match name {
        Some(n) if n.contains("::") => n.to_string(),
        Some(n) => n
            .split('_')
            .map(|segment| {
                let mut chars = segment.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect(),
        None => {
            let mut names = parents.to_vec();
            names.push(None);
            array_element_class_name(&names)
        }
    }
}

fn array_element_class_name(names: &[NameStep]) -> String {
    match names.last() {
        Some(None) => format!(
            "ArrayElement{}",
            array_element_class_name(&names[..names.len() - 1])
        ),
        _ => String::new(),
    }
}

/// Derives the member-variable identifier for a named field.
#[must_use]
pub fn field_name(name: &str) -> String {
    let class = class_name(Some(name), &[]);
    let mut chars = class.chars();
    match chars.next() {
        Some(first) => format!("m_{}{}", first.to_lowercase(), chars.as_str()),
        None => "m_".to_string(),
    }
}

/// Declaration filename for a type. `::`-qualified names map to subpaths.
#[must_use]
pub fn header_filename(name: &str) -> String {
    if name.contains("::") {
        format!("{}.h", name.replace("::", "/"))
    } else {
        format!("{}.h", class_name(Some(name), &[]))
    }
}

/// Implementation filename for a type.
#[must_use]
pub fn body_filename(name: &str) -> String {
    format!("{}.cpp", class_name(Some(name), &[]))
}

/// Two spaces per nesting level.
#[must_use]
pub fn indent(level: usize) -> String {
    "  ".repeat(level)
}

/// Fully-qualified class path: per-prefix class names joined with `::`.
#[must_use]
pub fn class_decorator(names: &[NameStep]) -> String {
    (0..names.len())
        .map(|i| class_name(names[i].as_deref(), &names[..i]))
        .collect::<Vec<_>>()
        .join("::")
}

/// C++ class identifier for a resolved type reference.
///
/// Basic repeated positions use the fixed wrapper classes; basic single
/// positions keep the XSD spelling (the caller dispatches on it); complex
/// positions title-case the type name, with an `Array` suffix when repeated.
#[must_use]
pub fn type_ref_class_name(type_ref: &TypeRef) -> String {
    if let Some(basic) = type_ref.basic() {
        if type_ref.multiple {
            basic.wrapper_class().to_string()
        } else {
            basic.xsd_name().to_string()
        }
    } else if type_ref.multiple {
        class_name(Some(&format!("{}Array", type_ref.name)), &[])
    } else {
        class_name(Some(&type_ref.name), &[])
    }
}

/// Opens the configured namespace, one level of indentation per segment.
#[must_use]
pub fn namespace_begin(namespace: &Namespace) -> String {
    if namespace.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for (level, segment) in namespace.segments().iter().enumerate() {
        out.push_str(&format!("{i}namespace {segment}\n{i}{{\n", i = indent(level)));
    }
    out.push('\n');
    out
}

/// Closes the configured namespace.
#[must_use]
pub fn namespace_end(namespace: &Namespace) -> String {
    if namespace.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n");
    for (level, segment) in namespace.segments().iter().enumerate().rev() {
        out.push_str(&format!("{}}} // namespace {segment}\n", indent(level)));
    }
    out
}

fn decorator_prefix(names: &[NameStep]) -> String {
    if names.is_empty() {
        String::new()
    } else {
        format!("{}::", class_decorator(names))
    }
}

/// Signature of the stream-reading decode method.
#[must_use]
pub fn decode_stream_signature(names: &[NameStep], string_type: StringType) -> String {
    format!(
        "void {}DecodeJSON(std::{}istream & is)",
        decorator_prefix(names),
        string_type.w_prefix()
    )
}

/// Signature of the value decode method, shared by object and array types.
#[must_use]
pub fn decode_value_signature(names: &[NameStep], string_type: StringType) -> String {
    format!(
        "void {}DecodeJSON(const json_spirit::{}Value & val)",
        decorator_prefix(names),
        string_type.w_prefix()
    )
}

/// Signature of the stream-writing encode method.
#[must_use]
pub fn encode_stream_signature(names: &[NameStep], string_type: StringType) -> String {
    format!(
        "void {}EncodeJSON(std::{}ostream & os, bool isPrettyPrint) const",
        decorator_prefix(names),
        string_type.w_prefix()
    )
}

/// Signature of the value encode method, shared by object and array types.
#[must_use]
pub fn encode_value_signature(names: &[NameStep], string_type: StringType) -> String {
    format!(
        "void {}EncodeJSON(json_spirit::{}Value & val) const",
        decorator_prefix(names),
        string_type.w_prefix()
    )
}
