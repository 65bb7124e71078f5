//! Round-trip test harness artifact.

use crate::config::{Namespace, StringType};
use crate::format;
use crate::generator::Artifact;

/// Builds the `main.cpp` harness: decode a document from the file named on
/// the command line into the root type, then re-encode it to stdout.
#[must_use]
pub fn test_harness(class_name: &str, namespace: &Namespace, string_type: StringType) -> Artifact {
    let w = string_type.w_prefix();
    let content = format!(
        "{banner}\n#include <iostream>\n#include <fstream>\n#include \"{header}\"\n\nint main(int argc, char ** argv)\n{{\n  std::{w}ifstream is(argv[1]);\n  {namespace}::{classname} val;\n  val.DecodeJSON(is);\n  val.EncodeJSON(std::{w}cout, true);\n  return 0;\n}}\n",
        banner = format::FILE_BANNER,
        header = format::header_filename(class_name),
        classname = format::class_name(Some(class_name), &[]),
    );

    Artifact {
        filename: "main.cpp".to_string(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_references_root_type() {
        let ns = Namespace::parse("com").unwrap();
        let artifact = test_harness("Person", &ns, StringType::Narrow);
        assert_eq!(artifact.filename, "main.cpp");
        assert!(artifact.content.contains("#include \"Person.h\""));
        assert!(artifact.content.contains("com::Person val;"));
        assert!(artifact.content.contains("val.EncodeJSON(std::cout, true);"));
    }

    #[test]
    fn test_harness_wide_variant() {
        let artifact = test_harness("Person", &Namespace::default(), StringType::Wide);
        assert!(artifact.content.contains("std::wifstream is(argv[1]);"));
        assert!(artifact.content.contains("std::wcout"));
        // global namespace still qualifies the type
        assert!(artifact.content.contains("::Person val;"));
    }

    #[test]
    fn test_harness_for_wrapper_root() {
        let artifact = test_harness("detail::IntArray", &Namespace::default(), StringType::Narrow);
        assert!(artifact.content.contains("#include \"detail/IntArray.h\""));
        assert!(artifact.content.contains("::detail::IntArray val;"));
    }
}
