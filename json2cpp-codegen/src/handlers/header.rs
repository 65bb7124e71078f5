//! Declaration artifact handler.
//!
//! Accumulates the C++ header for one root type: nested class declarations
//! for anonymous positions, `boost::optional` fields, array typedefs, and
//! `#include` lines for every named type the declarations reference.

use crate::config::{GeneratorConfig, Namespace, StringType};
use crate::engine::Handler;
use crate::format::{self, NameStep};
use std::collections::BTreeSet;

/// Handler accumulating one declaration artifact.
pub struct HeaderHandler {
    namespace: Namespace,
    string_type: StringType,
    filename: String,
    root_class: String,
    file_begin: String,
    class_decl: String,
    dep_types: BTreeSet<String>,
}

impl HeaderHandler {
    /// Creates a header handler for one walk.
    #[must_use]
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            string_type: config.string_type,
            filename: String::new(),
            root_class: String::new(),
            file_begin: String::new(),
            class_decl: String::new(),
            dep_types: BTreeSet::new(),
        }
    }

    /// Filename of the accumulated artifact; empty if no walk happened.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Class name of the walked root type.
    #[must_use]
    pub fn root_class(&self) -> &str {
        &self.root_class
    }

    /// Finalizes the artifact text.
    #[must_use]
    pub fn content(&self) -> String {
        let dep_includes = self
            .dep_types
            .iter()
            .map(|dep| format!("#include \"{}\"", format::header_filename(dep)))
            .collect::<Vec<_>>()
            .join("\n")
            + "\n\n";
        format!(
            "{}{}{}{}{}",
            self.file_begin,
            dep_includes,
            format::namespace_begin(&self.namespace),
            self.class_decl,
            format::namespace_end(&self.namespace)
        ) + FILE_END
    }

    fn file_begin(guard: &str) -> String {
        format!(
            "{banner}\n#ifndef _{guard}_H_\n#define _{guard}_H_\n\n\
             #include <istream>\n#include <ostream>\n#include <string>\n#include <vector>\n\
             #include <boost/optional.hpp>\n#include <json_spirit.h>\n\n",
            banner = format::FILE_BANNER
        )
    }

    fn class_begin(&self, level: usize, classname: &str) -> String {
        let i = format::indent(level);
        let w = self.string_type.w_prefix();
        format!(
            "\n{i}class {classname}\n{i}{{\n{i}public:\n\
             {i}  void DecodeJSON(std::{w}istream & is);\n\
             {i}  {decode};\n\
             {i}  void EncodeJSON(std::{w}ostream & os, bool isPrettyPrint = false) const;\n\
             {i}  {encode};\n\n",
            decode = format::decode_value_signature(&[], self.string_type),
            encode = format::encode_value_signature(&[], self.string_type),
        )
    }

    fn class_end(level: usize) -> String {
        format!("{}}};\n\n", format::indent(level))
    }

    fn field(level: usize, cpp_type: &str, name: &str) -> String {
        format!(
            "{}boost::optional<{cpp_type}> {name};\n",
            format::indent(level)
        )
    }

    fn element_typedef(level: usize, cpp_type: &str) -> String {
        format!(
            "{}typedef boost::optional<{cpp_type}> ArrayElementType;\n",
            format::indent(level)
        )
    }

    fn array_type(level: usize) -> String {
        let i = format::indent(level);
        format!("{i}  typedef std::vector<ArrayElementType> ArrayType;\n{i}  ArrayType m_array;\n")
    }

    fn simple_type(&mut self, parents: &[NameStep], name: Option<&str>, cpp_type: &str) {
        match name {
            None => {
                self.class_decl
                    .push_str(&Self::element_typedef(parents.len(), cpp_type));
            }
            Some(n) => {
                self.class_decl.push_str(&Self::field(
                    parents.len(),
                    cpp_type,
                    &format::field_name(n),
                ));
            }
        }
    }
}

const FILE_END: &str = "\n\n#endif\n";

impl Handler for HeaderHandler {
    fn on_object_start(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {
        let gen_class = type_name.is_none() || parents.is_empty();
        if let Some(t) = type_name {
            self.dep_types.insert(t.to_string());
        }

        let classname = format::class_name(name, parents);
        if parents.is_empty() {
            let root = name.expect("root position has a name");
            self.filename = format::header_filename(root);
            self.root_class = format::class_name(Some(root), &[]);
            self.file_begin = Self::file_begin(&classname);
        }

        if gen_class {
            let begin = self.class_begin(parents.len(), &classname);
            self.class_decl.push_str(&begin);
        }
    }

    fn on_object_end(&mut self, parents: &[NameStep], name: Option<&str>, type_name: Option<&str>) {
        let gen_class = type_name.is_none() || parents.is_empty();
        if gen_class {
            self.class_decl.push_str(&Self::class_end(parents.len()));
        }

        if parents.is_empty() {
            return;
        }
        match name {
            None => {
                if gen_class {
                    self.class_decl.push_str(&Self::element_typedef(
                        parents.len(),
                        &format::class_name(name, parents),
                    ));
                }
            }
            Some(n) => {
                let cpp_type = match type_name {
                    Some(t) => format::class_name(Some(t), &[]),
                    None => format::class_name(Some(n), &[]),
                };
                self.class_decl.push_str(&Self::field(
                    parents.len(),
                    &cpp_type,
                    &format::field_name(n),
                ));
            }
        }
    }

    fn on_array_start(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
        if let Some(t) = element_type {
            self.dep_types.insert(t.to_string());
        }

        if parents.is_empty() {
            let root = name.expect("root position has a name");
            self.filename = format::header_filename(root);
            self.root_class = format::class_name(Some(root), &[]);
            self.file_begin = Self::file_begin(&self.root_class.to_uppercase());
        }

        if !parents.is_empty() && element_type.is_some() {
            return;
        }

        let begin = self.class_begin(parents.len(), &format::class_name(name, parents));
        self.class_decl.push_str(&begin);
    }

    fn on_array_end(
        &mut self,
        parents: &[NameStep],
        name: Option<&str>,
        element_type: Option<&str>,
    ) {
        if parents.is_empty() || element_type.is_none() {
            if let Some(t) = element_type {
                self.class_decl.push_str(&Self::element_typedef(
                    parents.len() + 1,
                    &format::class_name(Some(t), &[]),
                ));
            }
            self.class_decl.push_str(&Self::array_type(parents.len()));
            self.class_decl.push_str(&Self::class_end(parents.len()));
        }

        if parents.is_empty() {
            return;
        }
        let cpp_type = match element_type {
            Some(t) => format::class_name(Some(t), &[]),
            None => format::class_name(name, parents),
        };
        match name {
            None => {
                self.class_decl
                    .push_str(&Self::element_typedef(parents.len(), &cpp_type));
            }
            Some(n) => {
                self.class_decl.push_str(&Self::field(
                    parents.len(),
                    &cpp_type,
                    &format::field_name(n),
                ));
            }
        }
    }

    fn on_boolean(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "bool");
    }

    fn on_integer(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "int");
    }

    fn on_int64(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "boost::int64_t");
    }

    fn on_float(&mut self, parents: &[NameStep], name: Option<&str>) {
        self.simple_type(parents, name, "double");
    }

    fn on_string(&mut self, parents: &[NameStep], name: Option<&str>) {
        let cpp_type = self.string_type.cpp_type();
        self.simple_type(parents, name, cpp_type);
    }
}
