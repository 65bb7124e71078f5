//! Generator configuration.
//!
//! Everything that was process-global state in earlier generations of this
//! tool (trace flags, namespace, string representation) is carried here and
//! passed explicitly to the engine and handlers at construction.

use crate::error::ConfigError;
use std::fmt;

/// The two supported C++ string representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringType {
    /// `std::string` with narrow streams and literals.
    #[default]
    Narrow,
    /// `std::wstring` with wide streams and `L"..."` literals.
    Wide,
}

impl StringType {
    /// Parses the C++ spelling of the string type.
    ///
    /// # Errors
    /// Returns `ConfigError::UnsupportedStringType` for anything other than
    /// the two supported spellings.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "std::string" => Ok(Self::Narrow),
            "std::wstring" => Ok(Self::Wide),
            _ => Err(ConfigError::UnsupportedStringType {
                value: value.to_string(),
            }),
        }
    }

    /// Returns the C++ type spelling.
    #[must_use]
    pub fn cpp_type(self) -> &'static str {
        match self {
            Self::Narrow => "std::string",
            Self::Wide => "std::wstring",
        }
    }

    /// Returns the `w` prefix used on wide json_spirit and stream types.
    #[must_use]
    pub fn w_prefix(self) -> &'static str {
        match self {
            Self::Narrow => "",
            Self::Wide => "w",
        }
    }

    /// Returns the `L` prefix used on wide string literals.
    #[must_use]
    pub fn literal_prefix(self) -> &'static str {
        match self {
            Self::Narrow => "",
            Self::Wide => "L",
        }
    }
}

/// A validated C++ namespace path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// Parses a `::`-separated namespace path. An empty string yields the
    /// global namespace.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidNamespace` when a segment is empty or
    /// contains a stray colon.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        if value.is_empty() {
            return Ok(Self(Vec::new()));
        }
        let segments: Vec<&str> = value.split("::").collect();
        if segments.iter().any(|s| s.is_empty() || s.contains(':')) {
            return Err(ConfigError::InvalidNamespace {
                value: value.to_string(),
            });
        }
        Ok(Self(segments.iter().map(ToString::to_string).collect()))
    }

    /// Returns true for the global namespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the namespace segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns this namespace extended with one more segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("::"))
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Namespace wrapping the generated declarations.
    pub namespace: Namespace,
    /// String representation used for string fields and streams.
    pub string_type: StringType,
    /// Whether to also emit the round-trip test harness.
    pub emit_test: bool,
}

impl GeneratorConfig {
    /// Builds a configuration from raw option strings.
    ///
    /// # Errors
    /// Returns `ConfigError` for an invalid namespace or string type.
    pub fn from_options(
        namespace: &str,
        string_type: &str,
        emit_test: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            namespace: Namespace::parse(namespace)?,
            string_type: StringType::parse(string_type)?,
            emit_test,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_type_parse() {
        assert_eq!(StringType::parse("std::string").unwrap(), StringType::Narrow);
        assert_eq!(StringType::parse("std::wstring").unwrap(), StringType::Wide);
        assert!(StringType::parse("QString").is_err());
    }

    #[test]
    fn test_string_type_prefixes() {
        assert_eq!(StringType::Narrow.w_prefix(), "");
        assert_eq!(StringType::Wide.w_prefix(), "w");
        assert_eq!(StringType::Wide.literal_prefix(), "L");
        assert_eq!(StringType::Wide.cpp_type(), "std::wstring");
    }

    #[test]
    fn test_namespace_parse() {
        assert!(Namespace::parse("").unwrap().is_empty());
        let ns = Namespace::parse("com::company").unwrap();
        assert_eq!(ns.segments(), ["com", "company"]);
        assert_eq!(ns.to_string(), "com::company");
    }

    #[test]
    fn test_namespace_rejects_malformed() {
        assert!(Namespace::parse("::").is_err());
        assert!(Namespace::parse("com::").is_err());
        assert!(Namespace::parse("a:b").is_err());
        assert!(Namespace::parse("a::b:c::d").is_err());
    }

    #[test]
    fn test_namespace_child() {
        let ns = Namespace::parse("com").unwrap().child("detail");
        assert_eq!(ns.to_string(), "com::detail");
        let ns = Namespace::default().child("detail");
        assert_eq!(ns.to_string(), "detail");
    }
}
