//! Documents as the batch driver sees them.
//!
//! A [`Document`] is the companion text of one PDF, read once and dropped as
//! soon as its classification result has been emitted.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// The extracted text of one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name of the source PDF.
    pub file_name: String,
    /// Raw companion text, before cleaning.
    pub raw_text: String,
}

impl Document {
    /// Create a document from already loaded text.
    pub fn new<N: Into<String>, T: Into<String>>(file_name: N, raw_text: T) -> Self {
        Document {
            file_name: file_name.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Read a companion text file.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// rejected, since extraction tools often emit legacy encodings.
    pub fn read<N: Into<String>>(file_name: N, path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let raw_text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };

        Ok(Document {
            file_name: file_name.into(),
            raw_text,
        })
    }
}
