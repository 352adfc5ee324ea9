//! ARFF training set export.
//!
//! Turns a directory of extracted texts into a Weka ARFF file whose rows
//! all carry the same class label. Each row holds the features the
//! configured extractor produces, so a model trained on the file matches
//! the pipeline that will later classify with it.
//!
//! ```text
//! @relation kw-based-classification
//!
//! @attribute text string
//! @attribute class {AR, CSR, CC, COC, MISC, POLICY, NOISE}
//!
//! @data
//! "sustainability stakeholders",CSR
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::cleaner::TextCleaner;
use crate::config::PipelineConfig;
use crate::document::Document;
use crate::error::{EsgdocError, Result};
use crate::features::FeatureVector;
use crate::model::ModelSchema;

/// Default output file name, written inside the input directory.
pub const DEFAULT_OUTPUT_FILE: &str = "wekaoutput.arff";

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output: PathBuf,
    pub rows: usize,
    /// Text files that could not be read.
    pub skipped: usize,
}

/// Quote a string value for an ARFF data row.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// The ARFF data row of one document.
pub fn data_row(vector: &FeatureVector, label: &str) -> String {
    match vector {
        FeatureVector::KeywordSet(set) => format!("{},{label}", set.to_feature_string()),
        FeatureVector::TextWithLength(t) => format!("{},{},{label}", quote(&t.text), t.length),
    }
}

/// List the `.txt` files directly inside a directory, sorted by name.
fn text_files(directory: &Path) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Cannot read directory entry in {}: {e}", directory.display());
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Export every text file of `directory` as a row labelled `label`.
///
/// The label must belong to the configured taxonomy. Without an explicit
/// `output`, the file is written to `<directory>/wekaoutput.arff`.
pub fn export_directory(
    directory: &Path,
    label: &str,
    config: &PipelineConfig,
    output: Option<&Path>,
) -> Result<ExportReport> {
    if !directory.is_dir() {
        return Err(EsgdocError::configuration(format!(
            "not a directory: {}",
            directory.display()
        )));
    }
    config.taxonomy.require(label)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| directory.join(DEFAULT_OUTPUT_FILE));
    let schema = ModelSchema::for_pipeline(config.taxonomy, config.extractor);
    let cleaner = TextCleaner::new()?;
    let extractor = config.extractor.build()?;

    let files = text_files(directory);
    info!("Exporting {} text files from {}", files.len(), directory.display());

    let mut writer = BufWriter::new(File::create(&output)?);
    writer.write_all(schema.arff_header().as_bytes())?;

    let mut rows = 0;
    let mut skipped = 0;
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document = match Document::read(name.as_str(), path) {
            Ok(document) => document,
            Err(e) => {
                warn!("Skipping {name}: {e}");
                skipped += 1;
                continue;
            }
        };

        let cleaned = cleaner.clean(&document.raw_text)?;
        let vector = extractor.extract(&cleaned)?;
        writeln!(writer, "{}", data_row(&vector, label))?;
        rows += 1;
    }
    writer.flush()?;

    info!("Wrote {rows} rows to {}", output.display());
    Ok(ExportReport {
        output,
        rows,
        skipped,
    })
}
