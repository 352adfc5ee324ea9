//! Word analyzer for string attributes.
//!
//! Splits on `\w+` and, unless the model was trained case-sensitive,
//! lowercases each word. No length limits apply: every word of a string
//! attribute is a candidate feature.

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

#[derive(Clone)]
pub struct StandardAnalyzer {
    pipeline: PipelineAnalyzer,
    lowercase: bool,
}

impl StandardAnalyzer {
    /// Lowercasing word analyzer.
    pub fn new() -> Result<Self> {
        Self::with_lowercase(true)
    }

    pub fn with_lowercase(lowercase: bool) -> Result<Self> {
        let pipeline = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?));
        let pipeline = if lowercase {
            pipeline
                .add_filter(Arc::new(LowercaseFilter::new()))
                .with_name("standard")
        } else {
            pipeline.with_name("standard_cased")
        };

        Ok(StandardAnalyzer {
            pipeline,
            lowercase,
        })
    }

    pub fn lowercases(&self) -> bool {
        self.lowercase
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &str {
        self.pipeline.name()
    }
}

impl fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.pipeline, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(analyzer: &StandardAnalyzer, text: &str) -> Vec<String> {
        analyzer.analyze(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_lowercases_by_default() {
        let analyzer = StandardAnalyzer::new().unwrap();
        assert_eq!(
            words(&analyzer, "\"Annual Report 2015\""),
            vec!["annual", "report", "2015"]
        );
        assert!(analyzer.lowercases());
        assert_eq!(analyzer.name(), "standard");
    }

    #[test]
    fn test_case_sensitive() {
        let analyzer = StandardAnalyzer::with_lowercase(false).unwrap();
        assert_eq!(words(&analyzer, "Code of Conduct"), vec!["Code", "of", "Conduct"]);
        assert_eq!(analyzer.name(), "standard_cased");
    }
}
