//! # esgdoc
//!
//! Batch classification of corporate ESG disclosure documents (annual
//! reports, CSR reports, codes of conduct, policies, ...) with a trained
//! probabilistic model.
//!
//! ## Pipeline
//!
//! - [`cleaner`]: sentence segmentation and text normalization
//! - [`features`]: keyword or raw-text feature extraction
//! - [`adapter`]: classification of a feature vector with a [`model`]
//! - [`batch`]: directory discovery, per-document failure isolation and
//!   parallel execution
//!
//! ## Example
//!
//! ```no_run
//! use esgdoc::batch;
//! use esgdoc::config::{BatchConfig, PipelineConfig};
//! use esgdoc::features::ExtractorKind;
//! use esgdoc::label::Taxonomy;
//!
//! let pipeline = PipelineConfig::new(Taxonomy::Seven, ExtractorKind::Keyword);
//! let config = BatchConfig::new("reports/", "models/keyword.json", pipeline);
//!
//! let report = batch::run(&config).unwrap();
//! for result in &report.results {
//!     println!("{}\t{}\t{}", result.file_name, result.label, result.probability);
//! }
//! ```

pub mod adapter;
pub mod analysis;
pub mod batch;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod features;
pub mod label;
pub mod model;

pub mod prelude {
    pub use crate::adapter::{ClassificationResult, ClassifierAdapter};
    pub use crate::batch::{BatchDriver, BatchReport, BatchSummary};
    pub use crate::cleaner::{CleanedText, TextCleaner};
    pub use crate::config::{BatchConfig, PipelineConfig};
    pub use crate::error::{EsgdocError, Result};
    pub use crate::features::{ExtractorKind, FeatureExtractor, FeatureVector};
    pub use crate::label::Taxonomy;
    pub use crate::model::{Model, ProbabilisticClassifier};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
