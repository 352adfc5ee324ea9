//! Run configuration.
//!
//! A [`PipelineConfig`] fixes the taxonomy and feature strategy a run uses,
//! plus how documents are scheduled. Both the taxonomy and the extractor
//! must agree with the model, which is checked when the batch starts.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EsgdocError, Result};
use crate::features::ExtractorKind;
use crate::label::Taxonomy;

/// How documents are turned into predictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Label set of the model.
    pub taxonomy: Taxonomy,
    /// Feature strategy the model was trained with.
    pub extractor: ExtractorKind,
    /// Number of worker threads.
    pub threads: usize,
    /// Per-document time limit.
    pub document_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            taxonomy: Taxonomy::default(),
            extractor: ExtractorKind::default(),
            threads: 1,
            document_timeout: None,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration for a taxonomy and extractor.
    pub fn new(taxonomy: Taxonomy, extractor: ExtractorKind) -> Self {
        PipelineConfig {
            taxonomy,
            extractor,
            ..Default::default()
        }
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the per-document time limit.
    pub fn with_document_timeout(mut self, timeout: Duration) -> Self {
        self.document_timeout = Some(timeout);
        self
    }

    /// Reject unusable settings.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(EsgdocError::configuration("thread count must be at least 1"));
        }
        if self.document_timeout.is_some_and(|t| t.is_zero()) {
            return Err(EsgdocError::configuration(
                "document timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// A complete batch run: where the documents are, which model to use, and
/// how to run the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub directory: PathBuf,
    pub model_path: PathBuf,
    pub pipeline: PipelineConfig,
}

impl BatchConfig {
    pub fn new<D: Into<PathBuf>, M: Into<PathBuf>>(
        directory: D,
        model_path: M,
        pipeline: PipelineConfig,
    ) -> Self {
        BatchConfig {
            directory: directory.into(),
            model_path: model_path.into(),
            pipeline,
        }
    }
}
