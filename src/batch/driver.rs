//! The batch driver.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use super::discovery::{DiscoveredDocument, discover};
use super::outcome::{BatchReport, DocumentOutcome, DocumentState};
use crate::adapter::ClassifierAdapter;
use crate::cleaner::TextCleaner;
use crate::config::{BatchConfig, PipelineConfig};
use crate::document::Document;
use crate::error::{EsgdocError, Result};
use crate::features::FeatureExtractor;
use crate::model::{Model, ProbabilisticClassifier};

/// Runs cleaning, feature extraction and classification over documents.
///
/// A driver holds one loaded model and is cheap to clone; clones share the
/// model and the analysis pipelines.
#[derive(Clone)]
pub struct BatchDriver {
    config: PipelineConfig,
    cleaner: TextCleaner,
    extractor: Arc<dyn FeatureExtractor>,
    adapter: ClassifierAdapter,
}

impl std::fmt::Debug for BatchDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchDriver")
            .field("config", &self.config)
            .field("extractor", &self.extractor.name())
            .field("model", &self.adapter.model().metadata().name)
            .finish()
    }
}

impl BatchDriver {
    /// Create a driver for a loaded model.
    ///
    /// Fails with a configuration error if the configuration is unusable or
    /// the model was not trained for its taxonomy and extractor.
    pub fn new(model: Arc<Model>, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        model.validate(config.taxonomy, config.extractor)?;

        let extractor: Arc<dyn FeatureExtractor> = Arc::from(config.extractor.build()?);
        Ok(BatchDriver {
            cleaner: TextCleaner::new()?,
            extractor,
            adapter: ClassifierAdapter::new(model, config.taxonomy),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Classify every PDF in a directory.
    pub fn classify_directory(&self, directory: &Path) -> Result<BatchReport> {
        let started = Instant::now();

        let documents = discover(directory)?;
        info!(
            "Found {} PDF documents in {}",
            documents.len(),
            directory.display()
        );

        let outcomes = self.process_all(&documents)?;
        for outcome in &outcomes {
            if outcome.result().is_some() {
                debug!("{}: {}", outcome.file_name(), DocumentState::Emitted);
            }
        }

        let report = BatchReport::new(outcomes, started.elapsed());
        info!("Batch finished: {}", report.summary);
        Ok(report)
    }

    /// Process documents on the worker pool and return their outcomes in
    /// discovery order.
    pub fn process_all(&self, documents: &[DiscoveredDocument]) -> Result<Vec<DocumentOutcome>> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| EsgdocError::configuration(format!("cannot build thread pool: {e}")))?;

        let mut tagged: Vec<(usize, DocumentOutcome)> = pool.install(|| {
            documents
                .par_iter()
                .map(|document| (document.index, self.process_with_timeout(document)))
                .collect()
        });
        tagged.sort_by_key(|(index, _)| *index);

        Ok(tagged.into_iter().map(|(_, outcome)| outcome).collect())
    }

    /// Process one document, enforcing the configured time limit.
    ///
    /// With a limit, the document runs on its own thread; if it does not
    /// finish in time it is recorded as failed and its thread is abandoned.
    pub fn process_with_timeout(&self, document: &DiscoveredDocument) -> DocumentOutcome {
        let Some(timeout) = self.config.document_timeout else {
            return self.process(document);
        };

        let (sender, receiver) = crossbeam_channel::bounded(1);
        let worker = self.clone();
        let job = document.clone();
        let spawned = thread::Builder::new()
            .name(format!("esgdoc-{}", document.index))
            .spawn(move || {
                let _ = sender.send(worker.process(&job));
            });

        if let Err(e) = spawned {
            return self.fail(document, format!("cannot start worker thread: {e}"));
        }

        match receiver.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                self.fail(document, format!("timed out after {} ms", timeout.as_millis()))
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.fail(document, "worker thread stopped without a result".to_string())
            }
        }
    }

    /// Process one document.
    pub fn process(&self, document: &DiscoveredDocument) -> DocumentOutcome {
        let file_name = document.file_name.as_str();
        debug!("{file_name}: {}", DocumentState::Discovered);

        let text = match Document::read(file_name, &document.companion_path) {
            Ok(text) => text,
            Err(e) => {
                let error =
                    EsgdocError::missing_companion(file_name, document.companion_path.clone());
                warn!("Skipping {file_name}: {error} ({e})");
                debug!("{file_name}: {}", DocumentState::SkippedMissingCompanion);
                return DocumentOutcome::Skipped {
                    file_name: file_name.to_string(),
                    reason: error.to_string(),
                };
            }
        };
        debug!("{file_name}: {}", DocumentState::TextLoaded);

        let cleaned = match self.cleaner.clean(&text.raw_text) {
            Ok(cleaned) => cleaned,
            Err(e) => return self.fail(document, e.to_string()),
        };
        debug!(
            "{file_name}: {} ({} sentences)",
            DocumentState::Cleaned,
            cleaned.sentence_count
        );

        let vector = match self.extractor.extract(&cleaned) {
            Ok(vector) => vector,
            Err(e) => return self.fail(document, e.to_string()),
        };
        debug!("{file_name}: {}", DocumentState::FeatureExtracted);

        match self.adapter.classify(file_name, &vector) {
            Ok(result) => {
                debug!(
                    "{file_name}: {} as {} ({})",
                    DocumentState::Classified,
                    result.label,
                    result.probability
                );
                DocumentOutcome::Classified(result)
            }
            Err(e) => {
                warn!("{e}");
                debug!("{file_name}: {}", DocumentState::Failed);
                DocumentOutcome::Failed {
                    file_name: file_name.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn fail(&self, document: &DiscoveredDocument, reason: String) -> DocumentOutcome {
        let error = EsgdocError::classification_failed(&document.file_name, reason);
        warn!("{error}");
        debug!("{}: {}", document.file_name, DocumentState::Failed);
        DocumentOutcome::Failed {
            file_name: document.file_name.clone(),
            reason: error.to_string(),
        }
    }
}

/// Run a complete batch.
///
/// The directory is checked first and the model is loaded exactly once,
/// before any document is read. Both failures are configuration errors.
/// The reported elapsed time covers the whole run, model loading included.
pub fn run(config: &BatchConfig) -> Result<BatchReport> {
    let started = Instant::now();

    config.pipeline.validate()?;
    if !config.directory.is_dir() {
        return Err(EsgdocError::configuration(format!(
            "not a directory: {}",
            config.directory.display()
        )));
    }

    let model = Arc::new(Model::load(&config.model_path)?);
    info!(
        "Loaded {} model '{}' ({} taxonomy, {} extractor)",
        model.classifier().name(),
        model.metadata().name,
        config.pipeline.taxonomy,
        config.pipeline.extractor
    );

    let driver = BatchDriver::new(model, config.pipeline.clone())?;
    let mut report = driver.classify_directory(&config.directory)?;
    report.elapsed = started.elapsed();
    Ok(report)
}
