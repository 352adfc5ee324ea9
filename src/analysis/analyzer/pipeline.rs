//! Analyzer assembled from char filters, one tokenizer and token filters.
//!
//! Text goes through the char filters in insertion order, is tokenized, then
//! each token filter rewrites the stream in turn. Token spans point into the
//! char-filtered text.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use esgdoc::analysis::analyzer::analyzer::Analyzer;
//! use esgdoc::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use esgdoc::analysis::token_filter::length::LengthFilter;
//! use esgdoc::analysis::token_filter::lowercase::LowercaseFilter;
//! use esgdoc::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(LengthFilter::new(4, 20).unwrap()))
//!     .with_name("terms");
//!
//! let terms: Vec<String> = analyzer
//!     .analyze("Our Climate Policy")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(terms, vec!["climate", "policy"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

#[derive(Clone)]
pub struct PipelineAnalyzer {
    name: String,
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// A pipeline with no filters, named after its tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            char_filters: Vec::new(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Apply the char filters only.
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = text.to_string();
        for char_filter in &self.char_filters {
            normalized = char_filter.filter(&normalized);
        }
        normalized
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let normalized = self.normalize(text);
        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(&normalized)?, |tokens, filter| {
                filter.filter(tokens)
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let char_filters: Vec<_> = self.char_filters.iter().map(|c| c.name()).collect();
        let filters: Vec<_> = self.filters.iter().map(|t| t.name()).collect();
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("char_filters", &char_filters)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &filters)
            .finish()
    }
}
