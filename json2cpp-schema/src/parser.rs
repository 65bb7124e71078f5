//! XSD schema parser.
//!
//! Parses the supported XSD subset (top-level `element`, `simpleType` with a
//! scalar `restriction` base, and `complexType` with `sequence` composition)
//! into a [`SchemaDefinition`]. Namespace prefixes on element tags and type
//! references are stripped.

use crate::error::ParseError;
use crate::types::{ComplexTypeDef, ElementDef, SchemaDefinition, SequenceItem, SimpleTypeDef};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses an XSD schema from a string.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a required attribute is
/// missing, or the schema uses constructs outside the supported subset.
pub fn parse_schema(xml: &str) -> Result<SchemaDefinition, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut schema = SchemaDefinition::new();
    let mut buf = Vec::new();
    let mut in_schema = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.local_name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "schema" => in_schema = true,
                    "element" if in_schema => {
                        let element = parse_top_level_element(e)?;
                        skip_element(&mut reader)?;
                        add_element(&mut schema, element)?;
                    }
                    "simpleType" if in_schema => {
                        let simple = parse_simple_type(&mut reader, e)?;
                        if schema.simple_types.contains_key(&simple.name) {
                            return Err(ParseError::duplicate("simpleType", simple.name));
                        }
                        schema.simple_types.insert(simple.name.clone(), simple);
                    }
                    "complexType" if in_schema => {
                        let complex = parse_complex_type(&mut reader, e)?;
                        if schema.complex_types.contains_key(&complex.name) {
                            return Err(ParseError::duplicate("complexType", complex.name));
                        }
                        schema.complex_types.insert(complex.name.clone(), complex);
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.local_name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "element" && in_schema {
                    let element = parse_top_level_element(e)?;
                    add_element(&mut schema, element)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !in_schema {
        return Err(ParseError::structure("no schema element found"));
    }

    Ok(schema)
}

fn add_element(schema: &mut SchemaDefinition, element: ElementDef) -> Result<(), ParseError> {
    if schema.elements.contains_key(&element.name) {
        return Err(ParseError::duplicate("element", element.name));
    }
    schema.elements.insert(element.name.clone(), element);
    Ok(())
}

/// Strips an optional namespace prefix from a QName-style value.
fn strip_prefix(value: &str) -> &str {
    value.rsplit(':').next().unwrap_or(value)
}

/// Raw attributes of an `element` tag.
struct ElementAttrs {
    name: Option<String>,
    type_name: Option<String>,
    ref_name: Option<String>,
    min_occurs: String,
    max_occurs: String,
}

impl ElementAttrs {
    /// A position is multiple unless it occurs exactly once: maxOccurs must
    /// be "1" and minOccurs must be "0" or "1".
    fn multiple(&self) -> bool {
        self.max_occurs != "1" || (self.min_occurs != "0" && self.min_occurs != "1")
    }
}

fn parse_element_attrs(e: &BytesStart<'_>) -> Result<ElementAttrs, ParseError> {
    let mut attrs = ElementAttrs {
        name: None,
        type_name: None,
        ref_name: None,
        min_occurs: "1".to_string(),
        max_occurs: "1".to_string(),
    };

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => attrs.name = Some(value.to_string()),
            "type" => attrs.type_name = Some(strip_prefix(value).to_string()),
            "ref" => attrs.ref_name = Some(strip_prefix(value).to_string()),
            "minOccurs" => attrs.min_occurs = value.to_string(),
            "maxOccurs" => attrs.max_occurs = value.to_string(),
            _ => {}
        }
    }

    Ok(attrs)
}

/// Parses a top-level `element`, which must carry `name` and `type`.
fn parse_top_level_element(e: &BytesStart<'_>) -> Result<ElementDef, ParseError> {
    let attrs = parse_element_attrs(e)?;

    if attrs.ref_name.is_some() {
        return Err(ParseError::structure(
            "top-level element must not have attribute 'ref'",
        ));
    }
    let name = attrs
        .name
        .clone()
        .ok_or_else(|| ParseError::missing_attr("element", "name"))?;
    let type_name = attrs
        .type_name
        .clone()
        .ok_or_else(|| ParseError::missing_attr("element", "type"))?;

    Ok(ElementDef {
        name,
        type_name,
        multiple: attrs.multiple(),
    })
}

/// Parses an `element` inside a `sequence`: either a `ref` or name+type.
fn parse_sequence_element(e: &BytesStart<'_>) -> Result<SequenceItem, ParseError> {
    let attrs = parse_element_attrs(e)?;

    if let Some(ref_name) = attrs.ref_name {
        return Ok(SequenceItem::Ref { ref_name });
    }

    let name = attrs
        .name
        .clone()
        .ok_or_else(|| ParseError::missing_attr("element", "name"))?;
    let type_name = attrs
        .type_name
        .clone()
        .ok_or_else(|| ParseError::missing_attr("element", "type"))?;

    Ok(SequenceItem::Inline {
        name,
        type_name,
        multiple: attrs.multiple(),
    })
}

/// Parses a `simpleType` definition with its `restriction` base.
fn parse_simple_type(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<SimpleTypeDef, ParseError> {
    let name = required_name(e, "simpleType")?;

    let mut buf = Vec::new();
    let mut base_type_name: Option<String> = None;
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref child)) => {
                let tag_bytes = child.local_name().as_ref().to_vec();
                let tag = std::str::from_utf8(&tag_bytes)?;
                match tag {
                    "restriction" => {
                        base_type_name = Some(restriction_base(child, &name)?);
                    }
                    "union" | "list" => {
                        return Err(ParseError::unsupported(tag, format!("simpleType '{name}'")));
                    }
                    _ => {}
                }
                depth += 1;
            }
            Ok(Event::Empty(ref child)) => {
                let tag_bytes = child.local_name().as_ref().to_vec();
                let tag = std::str::from_utf8(&tag_bytes)?;
                match tag {
                    "restriction" => {
                        base_type_name = Some(restriction_base(child, &name)?);
                    }
                    "union" | "list" => {
                        return Err(ParseError::unsupported(tag, format!("simpleType '{name}'")));
                    }
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let base_type_name = base_type_name
        .ok_or_else(|| ParseError::structure(format!("simpleType '{name}' has no restriction")))?;

    Ok(SimpleTypeDef {
        name,
        base_type_name,
    })
}

fn restriction_base(e: &BytesStart<'_>, simple_type: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "base" {
            let value = std::str::from_utf8(&attr.value)?;
            return Ok(strip_prefix(value).to_string());
        }
    }
    Err(ParseError::structure(format!(
        "simpleType '{simple_type}' restriction has no 'base' attribute"
    )))
}

/// Parses a `complexType` definition with an optional `sequence`.
fn parse_complex_type(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<ComplexTypeDef, ParseError> {
    let name = required_name(e, "complexType")?;

    let mut buf = Vec::new();
    let mut sequence: Option<Vec<SequenceItem>> = None;
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref child)) => {
                let tag_bytes = child.local_name().as_ref().to_vec();
                let tag = std::str::from_utf8(&tag_bytes)?;
                match tag {
                    "sequence" => {
                        sequence = Some(parse_sequence(reader, &name)?);
                        // parse_sequence consumes the matching end tag.
                    }
                    "choice" | "all" | "complexContent" | "simpleContent" => {
                        return Err(ParseError::unsupported(
                            tag,
                            format!("complexType '{name}'"),
                        ));
                    }
                    _ => {
                        depth += 1;
                    }
                }
            }
            Ok(Event::Empty(ref child)) => {
                let tag_bytes = child.local_name().as_ref().to_vec();
                let tag = std::str::from_utf8(&tag_bytes)?;
                if matches!(tag, "choice" | "all" | "complexContent" | "simpleContent") {
                    return Err(ParseError::unsupported(tag, format!("complexType '{name}'")));
                }
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(ComplexTypeDef { name, sequence })
}

/// Parses the children of a `sequence` until its end tag.
fn parse_sequence(
    reader: &mut Reader<&[u8]>,
    complex_type: &str,
) -> Result<Vec<SequenceItem>, ParseError> {
    let mut buf = Vec::new();
    let mut items = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref child)) => {
                let tag_bytes = child.local_name().as_ref().to_vec();
                let tag = std::str::from_utf8(&tag_bytes)?;
                if tag == "element" {
                    items.push(parse_sequence_element(child)?);
                } else if matches!(tag, "choice" | "all" | "sequence") {
                    return Err(ParseError::unsupported(
                        tag,
                        format!("sequence of complexType '{complex_type}'"),
                    ));
                }
                depth += 1;
            }
            Ok(Event::Empty(ref child)) => {
                let tag_bytes = child.local_name().as_ref().to_vec();
                let tag = std::str::from_utf8(&tag_bytes)?;
                if tag == "element" {
                    items.push(parse_sequence_element(child)?);
                }
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

fn required_name(e: &BytesStart<'_>, element: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            let value = std::str::from_utf8(&attr.value)?;
            return Ok(value.to_string());
        }
    }
    Err(ParseError::missing_attr(element, "name"))
}

/// Skips to the end of the current element.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:element name="people" type="Person" maxOccurs="unbounded"/>
    <xs:element name="company_name" type="xs:string"/>
    <xs:simpleType name="UserName">
        <xs:restriction base="xs:string"/>
    </xs:simpleType>
    <xs:complexType name="Person">
        <xs:sequence>
            <xs:element name="user_name" type="UserName"/>
            <xs:element name="age" type="xs:int" minOccurs="0"/>
            <xs:element name="tags" type="xs:string" maxOccurs="unbounded"/>
            <xs:element ref="company_name"/>
        </xs:sequence>
    </xs:complexType>
</xs:schema>"#;

    #[test]
    fn test_parse_people_schema() {
        let schema = parse_schema(PEOPLE_SCHEMA).expect("Failed to parse schema");

        assert_eq!(schema.elements.len(), 2);
        assert_eq!(schema.simple_types.len(), 1);
        assert_eq!(schema.complex_types.len(), 1);

        let people = schema.element("people").unwrap();
        assert_eq!(people.type_name, "Person");
        assert!(people.multiple);

        let company = schema.element("company_name").unwrap();
        assert_eq!(company.type_name, "string");
        assert!(!company.multiple);

        assert_eq!(schema.simple_types["UserName"].base_type_name, "string");
    }

    #[test]
    fn test_parse_sequence_items() {
        let schema = parse_schema(PEOPLE_SCHEMA).expect("Failed to parse schema");
        let person = schema.complex_type("Person").unwrap();
        let items = person.sequence.as_ref().unwrap();
        assert_eq!(items.len(), 4);

        match &items[0] {
            SequenceItem::Inline {
                name,
                type_name,
                multiple,
            } => {
                assert_eq!(name, "user_name");
                assert_eq!(type_name, "UserName");
                assert!(!multiple);
            }
            other => panic!("unexpected item: {other:?}"),
        }
        match &items[1] {
            SequenceItem::Inline { multiple, .. } => assert!(!multiple),
            other => panic!("unexpected item: {other:?}"),
        }
        match &items[2] {
            SequenceItem::Inline { multiple, .. } => assert!(multiple),
            other => panic!("unexpected item: {other:?}"),
        }
        match &items[3] {
            SequenceItem::Ref { ref_name } => assert_eq!(ref_name, "company_name"),
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_multiplicity_rule() {
        // multiple unless maxOccurs is "1" and minOccurs is "0" or "1"
        let cases = [
            ("1", "1", false),
            ("0", "1", false),
            ("2", "2", true),
            ("0", "unbounded", true),
            ("1", "5", true),
        ];
        for (min, max, expected) in cases {
            let xml = format!(
                r#"<schema><element name="e" type="string" minOccurs="{min}" maxOccurs="{max}"/></schema>"#
            );
            let schema = parse_schema(&xml).expect("Failed to parse");
            assert_eq!(
                schema.element("e").unwrap().multiple,
                expected,
                "minOccurs={min} maxOccurs={max}"
            );
        }
    }

    #[test]
    fn test_top_level_element_requires_name_and_type() {
        let err = parse_schema(r#"<schema><element type="string"/></schema>"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));

        let err = parse_schema(r#"<schema><element name="e"/></schema>"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));

        let err = parse_schema(r#"<schema><element ref="e"/></schema>"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_unsupported_constructs_rejected() {
        let xml = r#"<schema>
            <complexType name="T"><choice/></complexType>
        </schema>"#;
        let err = parse_schema(xml).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedConstruct { .. }));

        let xml = r#"<schema>
            <simpleType name="S"><union memberTypes="a b"/></simpleType>
        </schema>"#;
        let err = parse_schema(xml).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedConstruct { .. }));
    }

    #[test]
    fn test_complex_type_without_sequence() {
        let schema =
            parse_schema(r#"<schema><complexType name="Empty"/></schema>"#).expect("parse");
        assert!(schema.complex_type("Empty").unwrap().sequence.is_none());
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let xml = r#"<schema>
            <element name="e" type="string"/>
            <element name="e" type="int"/>
        </schema>"#;
        let err = parse_schema(xml).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDefinition { .. }));
    }

    #[test]
    fn test_no_schema_element() {
        let err = parse_schema("<notaschema/>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }
}
