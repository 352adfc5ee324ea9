//! Command line argument parsing for the esgdoc CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::features::ExtractorKind;
use crate::label::Taxonomy;

/// esgdoc - classify corporate ESG disclosure documents
#[derive(Parser, Debug, Clone)]
#[command(name = "esgdoc")]
#[command(about = "Classify corporate ESG disclosure documents with a trained model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EsgdocArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", global = true, default_value = "tsv")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EsgdocArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify every PDF of a directory
    Classify(ClassifyArgs),

    /// Write an ARFF training file from a directory of texts
    Export(ExportArgs),

    /// Show what a model was trained on
    Inspect(InspectArgs),
}

/// Taxonomy and feature strategy, shared by the commands that need them.
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Label set the model was trained on
    #[arg(short, long, env = "ESGDOC_TAXONOMY", default_value = "seven")]
    pub taxonomy: Taxonomy,

    /// Feature extraction strategy the model was trained with
    #[arg(short, long, env = "ESGDOC_EXTRACTOR", default_value = "keyword")]
    pub extractor: ExtractorKind,
}

/// Arguments for classifying a directory
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Directory holding the PDFs and their companion .txt files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Trained model artifact (.json or .bin)
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Number of worker threads (0 = one per CPU)
    #[arg(long, env = "ESGDOC_THREADS", default_value = "1")]
    pub threads: usize,

    /// Per-document time limit in seconds
    #[arg(long, env = "ESGDOC_DOCUMENT_TIMEOUT", value_name = "SECONDS")]
    pub document_timeout: Option<u64>,
}

impl ClassifyArgs {
    /// The pipeline configuration these arguments describe.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let threads = if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        };
        let config = PipelineConfig::new(self.pipeline.taxonomy, self.pipeline.extractor)
            .with_threads(threads);
        match self.document_timeout {
            Some(seconds) => config.with_document_timeout(std::time::Duration::from_secs(seconds)),
            None => config,
        }
    }
}

/// Arguments for exporting a training file
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Directory holding the .txt files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Class label given to every row
    #[arg(value_name = "LABEL")]
    pub label: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output file (default: DIRECTORY/wekaoutput.arff)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for inspecting a model
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Trained model artifact (.json or .bin)
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Tab-separated result lines
    Tsv,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_command() {
        let args = EsgdocArgs::try_parse_from([
            "esgdoc",
            "classify",
            "/data/docs",
            "model.json",
            "--taxonomy",
            "two",
            "--extractor",
            "raw-text",
            "--threads",
            "4",
            "--document-timeout",
            "30",
        ])
        .unwrap();

        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.directory, PathBuf::from("/data/docs"));
            assert_eq!(classify_args.model_path, PathBuf::from("model.json"));

            let config = classify_args.pipeline_config();
            assert_eq!(config.taxonomy, Taxonomy::Two);
            assert_eq!(config.extractor, ExtractorKind::RawText);
            assert_eq!(config.threads, 4);
            assert_eq!(
                config.document_timeout,
                Some(std::time::Duration::from_secs(30))
            );
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_classify_defaults() {
        let args = EsgdocArgs::try_parse_from(["esgdoc", "classify", "docs", "model.bin"]).unwrap();

        if let Command::Classify(classify_args) = args.command {
            let config = classify_args.pipeline_config();
            assert_eq!(config, PipelineConfig::default());
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_export_command() {
        let args = EsgdocArgs::try_parse_from([
            "esgdoc",
            "export",
            "texts",
            "CSR",
            "--output",
            "train.arff",
        ])
        .unwrap();

        if let Command::Export(export_args) = args.command {
            assert_eq!(export_args.label, "CSR");
            assert_eq!(export_args.output, Some(PathBuf::from("train.arff")));
            assert_eq!(export_args.pipeline.taxonomy, Taxonomy::Seven);
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn test_missing_arguments() {
        assert!(EsgdocArgs::try_parse_from(["esgdoc", "classify", "docs"]).is_err());
        assert!(
            EsgdocArgs::try_parse_from(["esgdoc", "classify", "docs", "m.json", "-t", "five"])
                .is_err()
        );
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = EsgdocArgs::try_parse_from(["esgdoc", "inspect", "m.json"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = EsgdocArgs::try_parse_from(["esgdoc", "-vv", "inspect", "m.json"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Global flags after the subcommand
        let args = EsgdocArgs::try_parse_from(["esgdoc", "inspect", "m.json", "-vvv"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        // Quiet flag
        let args = EsgdocArgs::try_parse_from(["esgdoc", "--quiet", "inspect", "m.json"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            EsgdocArgs::try_parse_from(["esgdoc", "--format", "json", "inspect", "m.json"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
