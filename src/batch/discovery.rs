//! Directory listing and companion file pairing.

use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::error::{EsgdocError, Result};

/// A PDF found in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDocument {
    /// Position in discovery order.
    pub index: usize,
    /// File name of the PDF, as reported in results.
    pub file_name: String,
    pub pdf_path: PathBuf,
    /// The sibling `.txt` file expected to hold the extracted text.
    pub companion_path: PathBuf,
}

/// Check whether a path has a `pdf` extension, in any case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// List the PDFs directly inside `directory`, sorted by file name.
///
/// Subdirectories are not searched. Entries that cannot be read are logged
/// and left out.
pub fn discover(directory: &Path) -> Result<Vec<DiscoveredDocument>> {
    if !directory.is_dir() {
        return Err(EsgdocError::configuration(format!(
            "not a directory: {}",
            directory.display()
        )));
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read directory entry in {}: {e}", directory.display());
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_pdf(entry.path()) {
            continue;
        }

        let pdf_path = entry.path().to_path_buf();
        documents.push(DiscoveredDocument {
            index: documents.len(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
            companion_path: pdf_path.with_extension("txt"),
            pdf_path,
        });
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_discover_sorted_pdfs() {
        let dir = TempDir::new().unwrap();
        for name in ["c.pdf", "a.pdf", "B.PDF", "notes.txt", "a.txt", "image.png"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        fs::write(dir.path().join("nested.pdf").join("d.pdf"), b"").unwrap();

        let documents = discover(dir.path()).unwrap();
        let names: Vec<_> = documents.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["B.PDF", "a.pdf", "c.pdf"]);

        for (i, document) in documents.iter().enumerate() {
            assert_eq!(document.index, i);
        }
        assert_eq!(documents[0].companion_path, dir.path().join("B.txt"));
        assert_eq!(documents[1].companion_path, dir.path().join("a.txt"));
    }

    #[test]
    fn test_discover_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("x.pdf");
        fs::write(&file, b"").unwrap();

        assert!(matches!(
            discover(&file).unwrap_err(),
            EsgdocError::Configuration(_)
        ));
        assert!(discover(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }
}
