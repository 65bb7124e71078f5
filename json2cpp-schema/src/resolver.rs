//! Type alias resolution and direct dependency computation.
//!
//! Resolves a `(type name, multiple)` position to its canonical [`TypeRef`]
//! and the set of named types that position directly depends on.

use crate::error::SchemaError;
use crate::types::{BasicType, SchemaDefinition, SequenceItem, TypeRef};
use std::collections::BTreeSet;

/// Follows a simpleType restriction chain until a basic type is reached.
///
/// Returns `None` if `name` refers to a complexType. Alias cycles are
/// detected and reported rather than recursed into.
///
/// # Errors
/// Returns `SchemaError::UnknownType` for undefined names and
/// `SchemaError::AliasCycle` for self- or mutually-referential aliases.
pub fn resolve_basic_type(
    schema: &SchemaDefinition,
    name: &str,
) -> Result<Option<BasicType>, SchemaError> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = name.to_string();

    loop {
        if let Some(basic) = BasicType::from_xsd_name(&current) {
            return Ok(Some(basic));
        }
        if schema.complex_types.contains_key(&current) {
            return Ok(None);
        }
        let Some(simple) = schema.simple_types.get(&current) else {
            return Err(SchemaError::UnknownType { name: current });
        };
        if chain.contains(&current) {
            chain.push(current);
            return Err(SchemaError::AliasCycle {
                path: chain.join(" -> "),
            });
        }
        chain.push(current);
        current = simple.base_type_name.clone();
    }
}

/// Resolves one `(type, multiple)` position to its canonical type reference
/// plus the set of types the position directly depends on.
///
/// Basic single positions are inlined as plain scalar fields and carry no
/// dependency. Basic repeated positions depend only on the corresponding
/// wrapper type. Complex positions depend on the type itself, and on its
/// array form as well when repeated.
pub fn resolve_position(
    schema: &SchemaDefinition,
    type_name: &str,
    multiple: bool,
) -> Result<(TypeRef, BTreeSet<TypeRef>), SchemaError> {
    let mut deps = BTreeSet::new();

    if let Some(basic) = resolve_basic_type(schema, type_name)? {
        let canonical = TypeRef::new(basic.xsd_name(), multiple);
        if multiple {
            deps.insert(canonical.clone());
        }
        return Ok((canonical, deps));
    }

    let canonical = TypeRef::new(type_name, multiple);
    deps.insert(TypeRef::new(type_name, false));
    if multiple {
        deps.insert(TypeRef::new(type_name, true));
    }
    Ok((canonical, deps))
}

/// Resolves a named top-level element to its canonical type reference and
/// direct dependencies.
///
/// # Errors
/// Returns `SchemaError::UnknownElement` if no element with that name exists.
pub fn resolve_element(
    schema: &SchemaDefinition,
    element_name: &str,
) -> Result<(TypeRef, BTreeSet<TypeRef>), SchemaError> {
    let element = schema
        .element(element_name)
        .ok_or_else(|| SchemaError::UnknownElement {
            name: element_name.to_string(),
        })?;
    resolve_position(schema, &element.type_name, element.multiple)
}

/// Computes the direct dependencies of a named type.
///
/// SimpleType aliases depend on nothing. ComplexTypes depend on the union of
/// their sequence children's direct dependencies; a type without a sequence
/// has none.
pub fn type_dependencies(
    schema: &SchemaDefinition,
    type_name: &str,
) -> Result<BTreeSet<TypeRef>, SchemaError> {
    let mut deps = BTreeSet::new();

    if schema.simple_types.contains_key(type_name) {
        return Ok(deps);
    }

    let complex = schema
        .complex_type(type_name)
        .ok_or_else(|| SchemaError::UnknownType {
            name: type_name.to_string(),
        })?;

    let Some(items) = &complex.sequence else {
        return Ok(deps);
    };

    for item in items {
        let (_, item_deps) = match item {
            SequenceItem::Ref { ref_name } => resolve_element(schema, ref_name)?,
            SequenceItem::Inline {
                type_name,
                multiple,
                ..
            } => resolve_position(schema, type_name, *multiple)?,
        };
        deps.extend(item_deps);
    }

    Ok(deps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn schema() -> SchemaDefinition {
        parse_schema(
            r#"<schema>
                <element name="people" type="Person" maxOccurs="unbounded"/>
                <element name="nick" type="ShortName"/>
                <simpleType name="UserName">
                    <restriction base="string"/>
                </simpleType>
                <simpleType name="ShortName">
                    <restriction base="UserName"/>
                </simpleType>
                <complexType name="Person">
                    <sequence>
                        <element name="user_name" type="UserName"/>
                        <element name="tags" type="string" maxOccurs="unbounded"/>
                        <element name="employer" type="Company"/>
                    </sequence>
                </complexType>
                <complexType name="Company">
                    <sequence>
                        <element name="company_name" type="string"/>
                    </sequence>
                </complexType>
            </schema>"#,
        )
        .expect("Failed to parse schema")
    }

    #[test]
    fn test_resolve_basic_type_follows_alias_chain() {
        let s = schema();
        assert_eq!(
            resolve_basic_type(&s, "ShortName").unwrap(),
            Some(BasicType::String)
        );
        assert_eq!(resolve_basic_type(&s, "int").unwrap(), Some(BasicType::Int));
        assert_eq!(resolve_basic_type(&s, "Person").unwrap(), None);
    }

    #[test]
    fn test_resolve_basic_type_unknown() {
        let s = schema();
        let err = resolve_basic_type(&s, "Nope").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { .. }));
    }

    #[test]
    fn test_alias_cycle_detected() {
        let s = parse_schema(
            r#"<schema>
                <simpleType name="A"><restriction base="B"/></simpleType>
                <simpleType name="B"><restriction base="A"/></simpleType>
            </schema>"#,
        )
        .expect("parse");
        let err = resolve_basic_type(&s, "A").unwrap_err();
        match err {
            SchemaError::AliasCycle { path } => assert!(path.contains("A -> B")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_position_basic() {
        let s = schema();

        let (r, deps) = resolve_position(&s, "UserName", false).unwrap();
        assert_eq!(r, TypeRef::new("string", false));
        assert!(deps.is_empty());

        let (r, deps) = resolve_position(&s, "int", true).unwrap();
        assert_eq!(r, TypeRef::new("int", true));
        assert_eq!(deps.len(), 1);
        assert!(deps.contains(&TypeRef::new("int", true)));
    }

    #[test]
    fn test_resolve_position_complex() {
        let s = schema();

        let (r, deps) = resolve_position(&s, "Person", false).unwrap();
        assert_eq!(r, TypeRef::new("Person", false));
        assert_eq!(deps.len(), 1);

        let (_, deps) = resolve_position(&s, "Person", true).unwrap();
        assert!(deps.contains(&TypeRef::new("Person", false)));
        assert!(deps.contains(&TypeRef::new("Person", true)));
    }

    #[test]
    fn test_type_dependencies() {
        let s = schema();
        let deps = type_dependencies(&s, "Person").unwrap();
        assert!(deps.contains(&TypeRef::new("string", true)));
        assert!(deps.contains(&TypeRef::new("Company", false)));
        // single basic children contribute nothing
        assert!(!deps.contains(&TypeRef::new("string", false)));
    }

    #[test]
    fn test_resolve_element() {
        let s = schema();
        let (r, _) = resolve_element(&s, "people").unwrap();
        assert_eq!(r, TypeRef::new("Person", true));

        let (r, deps) = resolve_element(&s, "nick").unwrap();
        assert_eq!(r, TypeRef::new("string", false));
        assert!(deps.is_empty());

        let err = resolve_element(&s, "ghost").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownElement { .. }));
    }
}
