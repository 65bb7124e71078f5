//! Generation entry points.
//!
//! Drives the emission engine over one root type per walk, each walk with a
//! fresh set of handlers, and collects the finalized artifacts. Nothing here
//! touches the filesystem; callers own artifact placement.

use crate::config::GeneratorConfig;
use crate::engine::{Handler, walk_complex_type, walk_tree, walk_wrapper};
use crate::error::{CodegenError, ModelError};
use crate::format;
use crate::handlers::{BodyBuilder, HeaderHandler, test_harness};
use crate::node::{StructuralNode, infer_tree};
use json2cpp_schema::{BasicType, DependencyClosure, SchemaDefinition, TypeRef};
use serde_json::Value;
use tracing::debug;

/// One named output unit, owned by the handlers that accumulated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Output-directory-relative filename.
    pub filename: String,
    /// Finalized text.
    pub content: String,
}

/// Generates the artifact set for one sample document.
///
/// Produces a declaration and an implementation artifact for the root type,
/// plus the test harness when configured.
///
/// # Errors
/// Returns `CodegenError` when inference fails or the root is a scalar.
pub fn generate_sample(
    value: &Value,
    root_name: &str,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, CodegenError> {
    let tree = infer_tree(value)?;
    if !tree.is_container() {
        return Err(ModelError::ScalarRoot.into());
    }

    debug!(root_name, "generating from sample document");
    let (header, body) = walk_with_handlers(config, |handlers| {
        walk_tree(&tree, root_name, handlers);
        Ok(())
    })?;

    let mut artifacts = paired_artifacts(&header, &body);
    if config.emit_test {
        artifacts.push(test_harness(
            header.root_class(),
            &config.namespace,
            config.string_type,
        ));
    }
    Ok(artifacts)
}

/// Generates the artifact set for one schema root element.
///
/// Resolves the dependency closure, then emits: the optional harness for the
/// root type, one wrapper pair per referenced basic-array type (under
/// `detail/`), and one declaration/implementation pair per complex type in
/// the closure. A root that resolves to a single basic type yields an empty
/// artifact set.
///
/// # Errors
/// Returns `CodegenError` for unknown elements/types or alias cycles.
pub fn generate_schema(
    schema: &SchemaDefinition,
    element_name: &str,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, CodegenError> {
    let (root, closure) = DependencyClosure::resolve(schema, element_name)?;
    debug!(
        element_name,
        types = closure.types.len(),
        wrappers = closure.wrappers.len(),
        "resolved dependency closure"
    );

    let mut artifacts = Vec::new();
    if root.basic().is_some() && !root.multiple {
        // A single basic root is a bare scalar; there is nothing to emit.
        return Ok(artifacts);
    }

    if config.emit_test {
        let root_class = format::type_ref_class_name(&root);
        artifacts.push(test_harness(
            &root_class,
            &config.namespace,
            config.string_type,
        ));
    }

    for wrapper in &closure.wrappers {
        artifacts.extend(generate_wrapper(*wrapper, config)?);
    }

    for type_ref in &closure.types {
        artifacts.extend(generate_complex_type(schema, type_ref, config)?);
    }

    Ok(artifacts)
}

/// Generates the declaration/implementation pair for one basic-array
/// wrapper class, placed under `detail/` with the namespace extended.
fn generate_wrapper(
    basic: BasicType,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, CodegenError> {
    let detail_config = GeneratorConfig {
        namespace: config.namespace.child("detail"),
        ..config.clone()
    };

    let (header, body) = walk_with_handlers(&detail_config, |handlers| {
        walk_wrapper(basic, handlers);
        Ok(())
    })?;

    Ok(paired_artifacts(&header, &body)
        .into_iter()
        .map(|artifact| Artifact {
            filename: format!("detail/{}", artifact.filename),
            content: artifact.content,
        })
        .collect())
}

/// Generates the declaration/implementation pair for one complex type
/// reference, with a fresh handler set.
fn generate_complex_type(
    schema: &SchemaDefinition,
    type_ref: &TypeRef,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, CodegenError> {
    let (header, body) = walk_with_handlers(config, |handlers| {
        walk_complex_type(schema, &type_ref.name, type_ref.multiple, handlers)
            .map_err(CodegenError::from)
    })?;

    // A complexType without a sequence emits no events and no artifacts.
    if header.filename().is_empty() {
        return Ok(Vec::new());
    }
    Ok(paired_artifacts(&header, &body))
}

/// Runs one walk with a fresh header handler and body builder registered.
fn walk_with_handlers<F>(
    config: &GeneratorConfig,
    walk: F,
) -> Result<(HeaderHandler, BodyBuilder), CodegenError>
where
    F: FnOnce(&mut [&mut dyn Handler]) -> Result<(), CodegenError>,
{
    let mut header = HeaderHandler::new(config);
    let mut body = BodyBuilder::new(config);
    {
        let mut handlers: [&mut dyn Handler; 4] =
            [&mut header, &mut body.file, &mut body.decode, &mut body.encode];
        walk(&mut handlers)?;
    }
    Ok((header, body))
}

/// The declaration and implementation artifacts for one walked type. The
/// pair is only ever written together.
fn paired_artifacts(header: &HeaderHandler, body: &BodyBuilder) -> Vec<Artifact> {
    vec![
        Artifact {
            filename: header.filename().to_string(),
            content: header.content(),
        },
        Artifact {
            filename: body.filename().to_string(),
            content: body.content(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use json2cpp_schema::parse_schema;
    use serde_json::json;

    fn config() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    #[test]
    fn test_sample_artifacts_are_paired() {
        let value = json!({"user_name": "a", "tags": ["x", "y"]});
        let artifacts = generate_sample(&value, "person", &config()).unwrap();

        let names: Vec<_> = artifacts.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, ["Person.h", "Person.cpp"]);
        assert!(artifacts[0].content.contains("class Person"));
        assert!(artifacts[1].content.contains("void Person::DecodeJSON"));
    }

    #[test]
    fn test_sample_with_harness() {
        let value = json!({"a": 1});
        let cfg = GeneratorConfig::from_options("", "std::string", true).unwrap();
        let artifacts = generate_sample(&value, "doc", &cfg).unwrap();
        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[2].filename, "main.cpp");
        assert!(artifacts[2].content.contains("::Doc val;"));
    }

    #[test]
    fn test_sample_scalar_root_fails() {
        let err = generate_sample(&json!(42), "doc", &config()).unwrap_err();
        assert!(matches!(err, CodegenError::Model(ModelError::ScalarRoot)));
    }

    #[test]
    fn test_sample_empty_array_produces_no_artifacts() {
        let err = generate_sample(&json!({"tags": []}), "doc", &config()).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Model(ModelError::EmptyArray { .. })
        ));
    }

    #[test]
    fn test_sample_determinism() {
        let value = json!({"z": [1.5], "a": {"b": true}});
        let first = generate_sample(&value, "doc", &config()).unwrap();
        let second = generate_sample(&value, "doc", &config()).unwrap();
        assert_eq!(first, second);
    }

    const SCHEMA: &str = r#"<schema>
        <element name="people" type="Person" maxOccurs="unbounded"/>
        <element name="nick" type="string"/>
        <complexType name="Person">
            <sequence>
                <element name="user_name" type="string"/>
                <element name="tags" type="string" maxOccurs="unbounded"/>
                <element name="employer" type="Company"/>
            </sequence>
        </complexType>
        <complexType name="Company">
            <sequence>
                <element name="company_name" type="string"/>
            </sequence>
        </complexType>
    </schema>"#;

    #[test]
    fn test_schema_emits_each_type_once() {
        let schema = parse_schema(SCHEMA).unwrap();
        let artifacts = generate_schema(&schema, "people", &config()).unwrap();

        let names: Vec<_> = artifacts.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(
            names,
            [
                "detail/StringArray.h",
                "detail/StringArray.cpp",
                "Company.h",
                "Company.cpp",
                "Person.h",
                "Person.cpp",
                "PersonArray.h",
                "PersonArray.cpp",
            ]
        );
    }

    #[test]
    fn test_schema_wrapper_uses_detail_namespace() {
        let schema = parse_schema(SCHEMA).unwrap();
        let cfg = GeneratorConfig::from_options("com", "std::string", false).unwrap();
        let artifacts = generate_schema(&schema, "people", &cfg).unwrap();

        let wrapper = artifacts
            .iter()
            .find(|a| a.filename == "detail/StringArray.h")
            .unwrap();
        assert!(wrapper.content.contains("namespace com\n{\n  namespace detail\n"));
        assert!(wrapper.content.contains("class StringArray"));
    }

    #[test]
    fn test_schema_array_form_references_element_type() {
        let schema = parse_schema(SCHEMA).unwrap();
        let artifacts = generate_schema(&schema, "people", &config()).unwrap();

        let array_header = artifacts
            .iter()
            .find(|a| a.filename == "PersonArray.h")
            .unwrap();
        assert!(array_header.content.contains("#include \"Person.h\""));
        assert!(
            array_header
                .content
                .contains("typedef boost::optional<Person> ArrayElementType;")
        );
    }

    #[test]
    fn test_schema_single_basic_root_emits_nothing() {
        let schema = parse_schema(SCHEMA).unwrap();
        let cfg = GeneratorConfig::from_options("", "std::string", true).unwrap();
        let artifacts = generate_schema(&schema, "nick", &cfg).unwrap();
        assert!(artifacts.is_empty());
    }

    #[test]
    fn test_schema_harness_references_root_class() {
        let schema = parse_schema(SCHEMA).unwrap();
        let cfg = GeneratorConfig::from_options("", "std::string", true).unwrap();
        let artifacts = generate_schema(&schema, "people", &cfg).unwrap();
        assert_eq!(artifacts[0].filename, "main.cpp");
        assert!(artifacts[0].content.contains("::PersonArray val;"));
    }

    #[test]
    fn test_schema_determinism() {
        let schema = parse_schema(SCHEMA).unwrap();
        let first = generate_schema(&schema, "people", &config()).unwrap();
        let second = generate_schema(&schema, "people", &config()).unwrap();
        assert_eq!(first, second);
    }
}
