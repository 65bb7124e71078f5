//! CLI support library for json2cpp.
//!
//! The binary in `main.rs` parses arguments and dispatches to the `run_*`
//! functions here. All filesystem access lives in this crate; the generator
//! crates only produce in-memory artifacts.

pub mod data;
pub mod diff;
pub mod xsd;

use anyhow::{Context, Result};
use json2cpp_codegen::Artifact;
use std::fs;
use std::path::Path;

/// Writes artifacts into the destination directory, creating subdirectories
/// (e.g. `detail/`) as needed.
///
/// Artifacts are written in order; a failure mid-run leaves earlier files in
/// place.
///
/// # Errors
/// Returns an error if a directory or file cannot be written.
pub fn write_artifacts(dstdir: &Path, artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        let path = dstdir.join(&artifact.filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        fs::write(&path, &artifact.content)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(file = %path.display(), "wrote artifact");
    }
    Ok(())
}

/// Derives the generated root name from an input filename: the basename up
/// to the first dot.
///
/// # Errors
/// Returns an error for paths without a usable filename.
pub fn root_name_from_path(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid input filename {}", path.display()))?;
    let stem = file_name.split('.').next().unwrap_or(file_name);
    if stem.is_empty() {
        anyhow::bail!("invalid input filename {}", path.display());
    }
    Ok(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_root_name_from_path() {
        assert_eq!(
            root_name_from_path(&PathBuf::from("/tmp/person.json")).unwrap(),
            "person"
        );
        assert_eq!(
            root_name_from_path(&PathBuf::from("user_record.sample.json")).unwrap(),
            "user_record"
        );
        assert!(root_name_from_path(&PathBuf::from("/tmp/.json")).is_err());
    }

    #[test]
    fn test_write_artifacts_creates_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = vec![
            Artifact {
                filename: "Person.h".to_string(),
                content: "// decl\n".to_string(),
            },
            Artifact {
                filename: "detail/IntArray.h".to_string(),
                content: "// wrapper\n".to_string(),
            },
        ];
        write_artifacts(dir.path(), &artifacts).unwrap();
        assert!(dir.path().join("Person.h").is_file());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("detail/IntArray.h")).unwrap(),
            "// wrapper\n"
        );
    }
}
