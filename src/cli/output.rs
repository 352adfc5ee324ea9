//! Output formatting for CLI commands.
//!
//! Results go to standard output; the run summary goes to standard error so
//! the result stream stays machine readable.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::adapter::ClassificationResult;
use crate::batch::{BatchReport, BatchSummary};
use crate::cli::args::{EsgdocArgs, OutputFormat};
use crate::export::ExportReport;
use crate::model::{AttributeKind, Model};

/// JSON form of a batch run.
#[derive(Debug, Serialize)]
pub struct ClassificationOutput {
    pub results: Vec<ClassificationResult>,
    pub summary: BatchSummary,
    pub elapsed_ms: u64,
}

impl From<&BatchReport> for ClassificationOutput {
    fn from(report: &BatchReport) -> Self {
        ClassificationOutput {
            results: report.results.clone(),
            summary: report.summary,
            elapsed_ms: report.elapsed.as_millis() as u64,
        }
    }
}

/// JSON form of an export.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportOutput {
    pub output: String,
    pub rows: usize,
    pub skipped: usize,
}

/// One attribute of an inspected model.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub name: String,
    pub kind: String,
}

/// JSON form of a model inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub created_at: String,
    pub description: Option<String>,
    pub classifier: String,
    pub relation: String,
    pub attributes: Vec<AttributeInfo>,
    pub classes: Vec<String>,
}

impl From<&Model> for ModelInfo {
    fn from(model: &Model) -> Self {
        use crate::model::ProbabilisticClassifier;

        let schema = model.schema();
        let attributes = schema
            .feature_attributes()
            .map(|(_, attribute)| AttributeInfo {
                name: attribute.name.clone(),
                kind: match &attribute.kind {
                    AttributeKind::String => "string".to_string(),
                    AttributeKind::Numeric => "numeric".to_string(),
                    AttributeKind::Nominal { values } => format!("{{{}}}", values.join(", ")),
                },
            })
            .collect();

        ModelInfo {
            name: model.metadata().name.clone(),
            created_at: model.metadata().created_at.to_rfc3339(),
            description: model.metadata().description.clone(),
            classifier: model.classifier().name().to_string(),
            relation: schema.relation.clone(),
            attributes,
            classes: schema.class_values().map(|v| v.to_vec()).unwrap_or_default(),
        }
    }
}

/// Format one result line: `file<TAB>label<TAB>probability`.
pub fn result_line(result: &ClassificationResult) -> String {
    format!(
        "{}\t{}\t{}",
        result.file_name, result.label, result.probability
    )
}

/// Write a batch report to `out` and its summary to `err`.
pub fn write_report<W: Write, E: Write>(
    report: &BatchReport,
    args: &EsgdocArgs,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<()> {
    match args.output_format {
        OutputFormat::Tsv => {
            for result in &report.results {
                writeln!(out, "{}", result_line(result))?;
            }
            writeln!(out, "Elapsed time: {} ms", report.elapsed.as_millis())?;
        }
        OutputFormat::Json => {
            write_json(&ClassificationOutput::from(report), args, out)?;
        }
    }
    out.flush()?;

    if args.verbosity() > 0 {
        writeln!(err, "{}", report.summary)?;
    }
    Ok(())
}

/// Write an export report.
pub fn write_export<W: Write>(
    report: &ExportReport,
    args: &EsgdocArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    match args.output_format {
        OutputFormat::Tsv => {
            if args.verbosity() > 0 {
                writeln!(
                    out,
                    "Wrote {} rows to {} ({} skipped)",
                    report.rows,
                    report.output.display(),
                    report.skipped
                )?;
            }
        }
        OutputFormat::Json => write_json(
            &ExportOutput {
                output: report.output.to_string_lossy().into_owned(),
                rows: report.rows,
                skipped: report.skipped,
            },
            args,
            out,
        )?,
    }
    Ok(())
}

/// Write a model description.
pub fn write_model_info<W: Write>(
    info: &ModelInfo,
    args: &EsgdocArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    match args.output_format {
        OutputFormat::Tsv => {
            writeln!(out, "name\t{}", info.name)?;
            writeln!(out, "created_at\t{}", info.created_at)?;
            if let Some(description) = &info.description {
                writeln!(out, "description\t{description}")?;
            }
            writeln!(out, "classifier\t{}", info.classifier)?;
            writeln!(out, "relation\t{}", info.relation)?;
            for attribute in &info.attributes {
                writeln!(out, "attribute\t{}\t{}", attribute.name, attribute.kind)?;
            }
            writeln!(out, "classes\t{}", info.classes.join(","))?;
        }
        OutputFormat::Json => write_json(info, args, out)?,
    }
    Ok(())
}

fn write_json<T: Serialize, W: Write>(value: &T, args: &EsgdocArgs, out: &mut W) -> anyhow::Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::batch::DocumentOutcome;

    fn report() -> BatchReport {
        BatchReport::new(
            vec![
                DocumentOutcome::Classified(ClassificationResult {
                    file_name: "a.pdf".to_string(),
                    label: "CSR",
                    probability: 0.875,
                }),
                DocumentOutcome::Skipped {
                    file_name: "b.pdf".to_string(),
                    reason: "missing".to_string(),
                },
            ],
            Duration::from_millis(42),
        )
    }

    fn args(extra: &[&str]) -> EsgdocArgs {
        let mut argv = vec!["esgdoc"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["classify", "docs", "model.json"]);
        EsgdocArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_tsv_output() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_report(&report(), &args(&[]), &mut out, &mut err).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a.pdf\tCSR\t0.875\nElapsed time: 42 ms\n"
        );
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "processed=1 skipped=1 failed=0\n"
        );
    }

    #[test]
    fn test_quiet_suppresses_summary() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_report(&report(), &args(&["-q"]), &mut out, &mut err).unwrap();
        assert!(err.is_empty());
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_report(&report(), &args(&["-f", "json"]), &mut out, &mut err).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["results"][0]["label"], "CSR");
        assert_eq!(value["summary"]["skipped"], 1);
        assert_eq!(value["elapsed_ms"], 42);
    }
}
