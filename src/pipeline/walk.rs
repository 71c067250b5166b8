//! Discovery of input documents.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::Result;

lazy_static! {
    /// Scanner output names: `YYYY_MM_DD_hh_mm_ss.pdf`.
    static ref RE_SCANNER_NAME: Regex = Regex::new(r"^\d{4}(_\d{2}){5}\.pdf$").unwrap();
}

/// True if `path` has a `.pdf` extension (case-sensitive, as scanners emit it).
pub fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "pdf")
}

/// True if the file name looks like a scanner timestamp name.
pub fn is_scanner_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| RE_SCANNER_NAME.is_match(name))
}

/// Lazily walk `input_dir` and yield every PDF file, in traversal order with
/// siblings sorted by name.
///
/// Anything under `skip` (normally the output directory) is left out so a run
/// never feeds on its own output.
pub fn pdf_files(input_dir: &Path, skip: &Path) -> impl Iterator<Item = Result<PathBuf>> {
    let skip = skip.canonicalize().unwrap_or_else(|_| skip.to_path_buf());

    WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_under(entry.path(), &skip))
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() && is_pdf(entry.path()) => {
                Some(Ok(entry.into_path()))
            },
            Ok(_) => None,
            Err(e) => Some(Err(e.into())),
        })
}

/// Collect [`pdf_files`].
///
/// # Errors
///
/// The first directory that cannot be read aborts the walk.
pub fn discover(input_dir: &Path, skip: &Path) -> Result<Vec<PathBuf>> {
    let found = pdf_files(input_dir, skip).collect::<Result<Vec<_>>>()?;
    log::debug!("Discovered {} PDF files under {}", found.len(), input_dir.display());
    Ok(found)
}

fn is_under(path: &Path, root: &Path) -> bool {
    if path.starts_with(root) {
        return true;
    }
    path.canonicalize().is_ok_and(|p| p.starts_with(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scanner_names() {
        assert!(is_scanner_name(Path::new("2021_03_03_10_11_12.pdf")));
        assert!(is_scanner_name(Path::new("scans/2020_12_31_23_59_59.pdf")));
        assert!(!is_scanner_name(Path::new("Tesla-2021-Mar-3.pdf")));
        assert!(!is_scanner_name(Path::new("2021_03_03_10_11.pdf")));
        assert!(!is_scanner_name(Path::new("x2021_03_03_10_11_12.pdf")));
        assert!(!is_scanner_name(Path::new("2021_03_03_10_11_12.txt")));
    }

    #[test]
    fn test_discover_recurses_and_skips_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::create_dir_all(root.join("out")).unwrap();
        fs::write(root.join("one.pdf"), b"%PDF").unwrap();
        fs::write(root.join("a/b/two.pdf"), b"%PDF").unwrap();
        fs::write(root.join("a/notes.txt"), b"x").unwrap();
        fs::write(root.join("out/old.pdf"), b"%PDF").unwrap();

        let found = discover(root, &root.join("out")).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["two.pdf", "one.pdf"]);
    }

    #[test]
    fn test_discover_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("nope"), &dir.path().join("out")).is_err());
    }
}
