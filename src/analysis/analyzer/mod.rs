//! Analyzers combine a tokenizer with char filters and token filters.

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod pipeline;
pub mod standard;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
pub use standard::StandardAnalyzer;
