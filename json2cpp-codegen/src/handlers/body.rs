//! Implementation artifact handlers.
//!
//! The implementation file is assembled from three independent handlers: a
//! file handler owning the preamble, and two method handlers accumulating
//! decode and encode bodies. Method text is keyed by the full C++ method
//! signature and finalized in sorted-signature order, which makes the file
//! layout independent of visitation order.

use crate::config::{GeneratorConfig, Namespace, StringType};
use crate::engine::Handler;
use crate::format::{self, NameStep};
use std::collections::BTreeMap;

/// Growable method bodies keyed by their eventual method signature.
#[derive(Debug, Default)]
struct MethodMap(BTreeMap<String, String>);

impl MethodMap {
    /// Starts a method body, replacing any previous text for the signature.
    fn begin(&mut self, signature: String, text: String) {
        self.0.insert(signature, text);
    }

    /// Appends to a method body.
    fn append(&mut self, signature: String, text: &str) {
        self.0.entry(signature).or_default().push_str(text);
    }

    /// Concatenates all bodies in sorted-signature order.
    fn content(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join("\n")
    }
}

/// Handler owning the implementation file preamble.
#[derive(Debug, Default)]
pub struct BodyFileHandler {
    filename: String,
    file_begin: String,
}

impl BodyFileHandler {
    /// Creates the file handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn begin_file(&mut self, root_name: &str) {
        self.filename = format::body_filename(root_name);
        self.file_begin = format!(
            "{banner}\n#include <boost/foreach.hpp>\n#include \"{header}\"\n\n",
            banner = format::FILE_BANNER,
            header = format::header_filename(root_name)
        );
    }
}

impl Handler for BodyFileHandler {
    fn on_object_start(&mut self, parents: &[NameStep], name: Option<&str>, _type_name: Option<&str>) {
        if parents.is_empty() {
            self.begin_file(name.expect("root position has a name"));
        }
    }

    fn on_array_start(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        _element_type: Option<&str>,
    ) {
        if parents.is_empty() {
            self.begin_file(name.expect("root position has a name"));
        }
    }
}

/// Handler accumulating the decode method bodies.
#[derive(Debug)]
pub struct DecodeHandler {
    string_type: StringType,
    methods: MethodMap,
}

impl DecodeHandler {
    /// Creates a decode handler.
    #[must_use]
    pub fn new(string_type: StringType) -> Self {
        Self {
            string_type,
            methods: MethodMap::default(),
        }
    }

    /// Finalizes the decode slice of the implementation file.
    #[must_use]
    pub fn content(&self) -> String {
        self.methods.content()
    }

    fn simple_type(&mut self, parents: &[NameStep], name: Option<&str>, getter: &str) {
        let signature = format::decode_value_signature(parents, self.string_type);
        match name {
            None => self
                .methods
                .append(signature, &decode_array_do_scalar(getter)),
            Some(n) => {
                let text = decode_object_do_scalar(
                    self.string_type.literal_prefix(),
                    n,
                    &format::field_name(n),
                    getter,
                );
                self.methods.append(signature, &text);
            }
        }
    }

    fn append_to_parent(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        type_name: Option<&str>,
    ) {
        let signature = format::decode_value_signature(parents, self.string_type);
        match name {
            None => {
                let classname = match type_name {
                    Some(t) => format::class_name(Some(t), &[]),
                    None => format::class_name(name, parents),
                };
                self.methods
                    .append(signature, &decode_array_do_complex(&classname));
            }
            Some(n) => {
                let classname = match type_name {
                    Some(t) => format::class_name(Some(t), &[]),
                    None => format::class_name(Some(n), &[]),
                };
                let text = decode_object_do_complex(
                    self.string_type.literal_prefix(),
                    n,
                    &format::field_name(n),
                    &classname,
                );
                self.methods.append(signature, &text);
            }
        }
    }

    fn begin_methods(&mut self, names: &[NameStep], body_begin: fn(&str, &str) -> String) {
        let w = self.string_type.w_prefix();
        let stream_sig = format::decode_stream_signature(names, self.string_type);
        self.methods
            .begin(stream_sig.clone(), decode_stream_method(&stream_sig, w));
        let value_sig = format::decode_value_signature(names, self.string_type);
        self.methods
            .begin(value_sig.clone(), body_begin(&value_sig, w));
    }
}

impl Handler for DecodeHandler {
    fn on_object_start(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {
        let gen_class = type_name.is_none() || parents.is_empty();

        if !parents.is_empty() {
            self.append_to_parent(parents, name, type_name);
        }
        if !gen_class {
            return;
        }

        let names = child_path(parents, name);
        self.begin_methods(&names, decode_object_begin);
    }

    fn on_object_end(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {
        let gen_class = type_name.is_none() || parents.is_empty();
        if !gen_class {
            return;
        }
        let names = child_path(parents, name);
        let signature = format::decode_value_signature(&names, self.string_type);
        self.methods.append(signature, DECODE_OBJECT_END);
    }

    fn on_array_start(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
        if !parents.is_empty() {
            self.append_to_parent(parents, name, element_type);
            if element_type.is_some() {
                return;
            }
        }

        let names = child_path(parents, name);
        self.begin_methods(&names, decode_array_begin);
    }

    fn on_array_end(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
        if !parents.is_empty() && element_type.is_some() {
            return;
        }
        let names = child_path(parents, name);
        let signature = format::decode_value_signature(&names, self.string_type);
        self.methods.append(signature, DECODE_ARRAY_END);
    }

    fn on_boolean(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "get_bool()");
    }

    fn on_integer(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "get_int()");
    }

    fn on_int64(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "get_int64()");
    }

    fn on_float(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "get_real()");
    }

    fn on_string(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "get_str()");
    }
}

/// Handler accumulating the encode method bodies.
#[derive(Debug)]
pub struct EncodeHandler {
    string_type: StringType,
    methods: MethodMap,
}

impl EncodeHandler {
    /// Creates an encode handler.
    #[must_use]
    pub fn new(string_type: StringType) -> Self {
        Self {
            string_type,
            methods: MethodMap::default(),
        }
    }

    /// Finalizes the encode slice of the implementation file.
    #[must_use]
    pub fn content(&self) -> String {
        self.methods.content()
    }

    fn simple_type(&mut self, parents: &[NameStep], name: Option<&str>) {
        let signature = format::encode_value_signature(parents, self.string_type);
        let w = self.string_type.w_prefix();
        match name {
            None => self.methods.append(signature, &encode_array_do_scalar(w)),
            Some(n) => {
                let text = encode_object_do_scalar(
                    w,
                    self.string_type.literal_prefix(),
                    n,
                    &format::field_name(n),
                );
                self.methods.append(signature, &text);
            }
        }
    }

    fn append_to_parent(&mut self, parents: &[NameStep], name: Option<&str>) {
        let signature = format::encode_value_signature(parents, self.string_type);
        let w = self.string_type.w_prefix();
        match name {
            None => self.methods.append(signature, &encode_array_do_complex(w)),
            Some(n) => {
                let text = encode_object_do_complex(
                    w,
                    self.string_type.literal_prefix(),
                    n,
                    &format::field_name(n),
                );
                self.methods.append(signature, &text);
            }
        }
    }

    fn begin_methods(&mut self, names: &[NameStep], body_begin: fn(&str, &str) -> String) {
        let w = self.string_type.w_prefix();
        let stream_sig = format::encode_stream_signature(names, self.string_type);
        self.methods
            .begin(stream_sig.clone(), encode_stream_method(&stream_sig, w));
        let value_sig = format::encode_value_signature(names, self.string_type);
        self.methods
            .begin(value_sig.clone(), body_begin(&value_sig, w));
    }
}

impl Handler for EncodeHandler {
    fn on_object_start(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {
        let gen_class = type_name.is_none() || parents.is_empty();

        if !parents.is_empty() {
            self.append_to_parent(parents, name);
        }
        if !gen_class {
            return;
        }

        let names = child_path(parents, name);
        self.begin_methods(&names, encode_object_begin);
    }

    fn on_object_end(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {
        let gen_class = type_name.is_none() || parents.is_empty();
        if !gen_class {
            return;
        }
        let names = child_path(parents, name);
        let signature = format::encode_value_signature(&names, self.string_type);
        self.methods.append(signature, ENCODE_OBJECT_END);
    }

    fn on_array_start(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
        if !parents.is_empty() {
            self.append_to_parent(parents, name);
            if element_type.is_some() {
                return;
            }
        }

        let names = child_path(parents, name);
        self.begin_methods(&names, encode_array_begin);
    }

    fn on_array_end(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
        if !parents.is_empty() && element_type.is_some() {
            return;
        }
        let names = child_path(parents, name);
        let signature = format::encode_value_signature(&names, self.string_type);
        self.methods.append(signature, ENCODE_ARRAY_END);
    }

    fn on_boolean(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name);
    }

    fn on_integer(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name);
    }

    fn on_int64(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name);
    }

    fn on_float(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name);
    }

    fn on_string(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name);
    }
}

/// Composes the three handlers that own the implementation artifact.
#[derive(Debug)]
pub struct BodyBuilder {
    /// File preamble handler.
    pub file: BodyFileHandler,
    /// Decode method handler.
    pub decode: DecodeHandler,
    /// Encode method handler.
    pub encode: EncodeHandler,
    namespace: Namespace,
}

impl BodyBuilder {
    /// Creates the builder for one walk.
    #[must_use]
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            file: BodyFileHandler::new(),
            decode: DecodeHandler::new(config.string_type),
            encode: EncodeHandler::new(config.string_type),
            namespace: config.namespace.clone(),
        }
    }

    /// Filename of the accumulated artifact; empty if no walk happened.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.file.filename
    }

    /// Finalizes the artifact text: preamble, then the decode and encode
    /// method slices, wrapped in the configured namespace.
    #[must_use]
    pub fn content(&self) -> String {
        format!(
            "{}{}{}\n{}{}\n",
            self.file.file_begin,
            format::namespace_begin(&self.namespace),
            self.decode.content(),
            self.encode.content(),
            format::namespace_end(&self.namespace)
        )
    }
}

fn child_path(parents: &[NameStep], name: Option<&str>) -> Vec<NameStep> {
    let mut names = parents.to_vec();
    names.push(name.map(ToString::to_string));
    names
}

// Decode method text fragments.

fn decode_stream_method(signature: &str, w: &str) -> String {
    format!(
        "{signature}\n{{\n  json_spirit::{w}Value value;\n  json_spirit::read(is, value);\n  DecodeJSON(value);\n}}\n"
    )
}

fn decode_object_begin(signature: &str, w: &str) -> String {
    format!(
        "{signature}\n{{\n  const json_spirit::{w}Object & obj(val.get_obj());\n  BOOST_FOREACH(const json_spirit::{w}Pair & pair, obj)\n  {{\n    if (pair.value_.is_null()) continue;\n\n"
    )
}

fn decode_object_do_scalar(l: &str, json_name: &str, field: &str, getter: &str) -> String {
    format!(
        "    if (pair.name_ == {l}\"{json_name}\")\n    {{\n      {field} = pair.value_.{getter};\n    }}\n    else\n"
    )
}

fn decode_object_do_complex(l: &str, json_name: &str, field: &str, classname: &str) -> String {
    format!(
        "    if (pair.name_ == {l}\"{json_name}\")\n    {{\n      {classname} value;\n      value.DecodeJSON(pair.value_);\n      {field} = value;\n    }}\n    else\n"
    )
}

const DECODE_OBJECT_END: &str = "    {\n      // do nothing\n    }\n  }\n}\n";

fn decode_array_begin(signature: &str, w: &str) -> String {
    format!(
        "{signature}\n{{\n  const json_spirit::{w}Array & array(val.get_array());\n  BOOST_FOREACH(const json_spirit::{w}Value & value, array)\n  {{\n    ArrayElementType element;\n    if (!value.is_null())\n    {{\n"
    )
}

fn decode_array_do_scalar(getter: &str) -> String {
    format!("      element = value.{getter};\n")
}

fn decode_array_do_complex(classname: &str) -> String {
    format!("      {classname} e;\n      e.DecodeJSON(value);\n      element = e;\n")
}

const DECODE_ARRAY_END: &str = "    }\n    m_array.push_back(element);\n  }\n}\n";

// Encode method text fragments.

fn encode_stream_method(signature: &str, w: &str) -> String {
    format!(
        "{signature}\n{{\n  json_spirit::{w}Value value;\n  EncodeJSON(value);\n  unsigned int options = json_spirit::remove_trailing_zeros;\n  if (isPrettyPrint)\n  {{\n    options = json_spirit::pretty_print|json_spirit::remove_trailing_zeros;\n  }}\n  json_spirit::write(value, os, options);\n}}\n"
    )
}

fn encode_object_begin(signature: &str, w: &str) -> String {
    format!(
        "{signature}\n{{\n  if (json_spirit::null_type == val.type())\n  {{\n    val = json_spirit::{w}Object();\n  }}\n\n"
    )
}

const ENCODE_OBJECT_END: &str = "\n}\n";

fn encode_object_do_scalar(w: &str, l: &str, json_name: &str, field: &str) -> String {
    format!(
        "  if ({field}) {{ val.get_obj().push_back(json_spirit::{w}Pair({l}\"{json_name}\", *{field})); }}\n"
    )
}

fn encode_object_do_complex(w: &str, l: &str, json_name: &str, field: &str) -> String {
    format!(
        "  if ({field})\n  {{\n    json_spirit::{w}Value child;\n    (*{field}).EncodeJSON(child);\n    val.get_obj().push_back(json_spirit::{w}Pair({l}\"{json_name}\", child));\n  }}\n"
    )
}

fn encode_array_begin(signature: &str, w: &str) -> String {
    format!(
        "{signature}\n{{\n  json_spirit::{w}Array array;\n  BOOST_FOREACH(const ArrayElementType & value, m_array)\n  {{\n"
    )
}

const ENCODE_ARRAY_END: &str = "  }\n  val = array;\n}\n";

fn encode_array_do_scalar(w: &str) -> String {
    format!(
        "\n    if (value) {{ array.push_back(json_spirit::{w}Value(*value)); }}\n    else {{ array.push_back(json_spirit::{w}Value()); }}\n"
    )
}

fn encode_array_do_complex(w: &str) -> String {
    format!(
        "    if (value)\n    {{\n      json_spirit::{w}Value child;\n      (*value).EncodeJSON(child);\n      array.push_back(child);\n    }}\n    else {{ array.push_back(json_spirit::{w}Value()); }}\n\n"
    )
}
