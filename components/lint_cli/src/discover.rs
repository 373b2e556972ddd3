//! Input file discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CliError, CliResult};

/// Extensions picked up when walking a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Expand command line paths into the list of files to lint.
///
/// Files named explicitly are always kept. Directories are walked in
/// sorted order so output does not depend on the file system.
pub fn collect_files(paths: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(CliError::MissingPath(path.clone()));
        }
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_source(e.path()));
        for entry in walker {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(count = files.len(), "collected input files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walks_directories_for_sources() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        fs::write(dir.path().join("a.mjs"), "").unwrap();
        fs::write(dir.path().join("lib/c.cjs"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["a.mjs", "b.js", "lib/c.cjs"]);
    }

    #[test]
    fn test_explicit_file_kept_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script");
        fs::write(&script, "").unwrap();

        assert_eq!(collect_files(&[script.clone()]).unwrap(), vec![script]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let result = collect_files(&[PathBuf::from("/definitely/not/here")]);
        assert!(matches!(result, Err(CliError::MissingPath(_))));
    }
}
