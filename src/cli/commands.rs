//! Command implementations for the esgdoc CLI.

use std::io;

use anyhow::Context;
use log::info;

use crate::batch;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{BatchConfig, PipelineConfig};
use crate::export::export_directory;
use crate::model::Model;

/// Execute a CLI command.
pub fn execute_command(args: EsgdocArgs) -> anyhow::Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::Export(export_args) => export(export_args, &args),
        Command::Inspect(inspect_args) => inspect(inspect_args, &args),
    }
}

/// Classify a directory and print one line per classified document.
fn classify(args: &ClassifyArgs, cli_args: &EsgdocArgs) -> anyhow::Result<()> {
    let config = BatchConfig::new(
        &args.directory,
        &args.model_path,
        args.pipeline_config(),
    );
    info!(
        "Classifying {} with {} ({} threads)",
        config.directory.display(),
        config.model_path.display(),
        config.pipeline.threads
    );

    let report = batch::run(&config)?;

    write_report(&report, cli_args, &mut io::stdout().lock(), &mut io::stderr().lock())
        .context("failed to write results")
}

/// Export a directory of texts as an ARFF training file.
fn export(args: &ExportArgs, cli_args: &EsgdocArgs) -> anyhow::Result<()> {
    let config = PipelineConfig::new(args.pipeline.taxonomy, args.pipeline.extractor);
    let report = export_directory(
        &args.directory,
        &args.label,
        &config,
        args.output.as_deref(),
    )?;

    write_export(&report, cli_args, &mut io::stdout().lock()).context("failed to write report")
}

/// Describe a model artifact.
fn inspect(args: &InspectArgs, cli_args: &EsgdocArgs) -> anyhow::Result<()> {
    let model = Model::load(&args.model_path)?;
    let info = ModelInfo::from(&model);

    write_model_info(&info, cli_args, &mut io::stdout().lock())
        .context("failed to write model description")
}
