//! Keyword (tag cloud) feature extraction.
//!
//! Terms are lowercased words of 10 to 20 characters. Each term is weighted
//! by its frequency relative to the most frequent qualifying term, and the
//! 20 best terms are kept. Shorter and longer words are mostly stop words,
//! numbers and page layout debris.
//!
//! Equal scores are ordered by first occurrence in the text, so the
//! selection is fully determined by the input.
//!
//! # Examples
//!
//! ```
//! use esgdoc::features::keyword::KeywordExtractor;
//!
//! let extractor = KeywordExtractor::new().unwrap();
//! let set = extractor
//!     .extract_terms("Sustainability report. Our sustainability strategy and stakeholders.")
//!     .unwrap();
//!
//! let terms: Vec<_> = set.iter_terms().collect();
//! assert_eq!(terms, vec!["sustainability", "stakeholders"]);
//! assert_eq!(set.to_feature_string(), "\"sustainability stakeholders\"");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::{ExtractorKind, FeatureExtractor, FeatureVector, KeywordSet, ScoredTerm};
use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::length::LengthFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::cleaner::CleanedText;
use crate::error::Result;

/// Minimum term length in characters.
pub const DEFAULT_MIN_TERM_LENGTH: usize = 10;
/// Maximum term length in characters.
pub const DEFAULT_MAX_TERM_LENGTH: usize = 20;
/// Number of terms kept per document.
pub const DEFAULT_MAX_TERMS: usize = 20;

/// Selects the top-N terms of a document by term frequency.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    analyzer: PipelineAnalyzer,
    max_terms: usize,
}

impl KeywordExtractor {
    /// Create a keyword extractor with the default limits.
    pub fn new() -> Result<Self> {
        Self::with_limits(
            DEFAULT_MIN_TERM_LENGTH,
            DEFAULT_MAX_TERM_LENGTH,
            DEFAULT_MAX_TERMS,
        )
    }

    /// Create a keyword extractor with custom term length bounds and term count.
    pub fn with_limits(min_length: usize, max_length: usize, max_terms: usize) -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(LengthFilter::new(min_length, max_length)?))
            .with_name("keyword_terms");

        Ok(KeywordExtractor {
            analyzer,
            max_terms,
        })
    }

    /// Maximum number of terms returned.
    pub fn max_terms(&self) -> usize {
        self.max_terms
    }

    /// Score and select the terms of a text.
    pub fn extract_terms(&self, text: &str) -> Result<KeywordSet> {
        // Terms in first-occurrence order, with their counts.
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for token in self.analyzer.analyze(text)? {
            match slots.get(&token.text) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    slots.insert(token.text.clone(), order.len());
                    order.push((token.text, 1));
                }
            }
        }

        let max_frequency = order.iter().map(|(_, count)| *count).max().unwrap_or(0);
        if max_frequency == 0 {
            return Ok(KeywordSet::default());
        }

        // Stable: ties keep first-occurrence order.
        order.sort_by(|a, b| b.1.cmp(&a.1));

        let terms = order
            .into_iter()
            .take(self.max_terms)
            .map(|(term, frequency)| ScoredTerm {
                term,
                score: frequency as f64 / max_frequency as f64,
                frequency,
            })
            .collect();

        Ok(KeywordSet { terms })
    }
}

impl FeatureExtractor for KeywordExtractor {
    fn extract(&self, cleaned: &CleanedText) -> Result<FeatureVector> {
        Ok(FeatureVector::KeywordSet(self.extract_terms(&cleaned.text)?))
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Keyword
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new().unwrap()
    }

    #[test]
    fn test_terms_sorted_by_descending_score() {
        let text = "governance governance governance stakeholders stakeholders environment";
        let set = extractor().extract_terms(text).unwrap();

        let terms: Vec<_> = set.iter_terms().collect();
        assert_eq!(terms, vec!["governance", "stakeholders", "environment"]);
        assert_eq!(set.terms[0].score, 1.0);
        assert_eq!(set.terms[0].frequency, 3);
        assert!((set.terms[1].score - 2.0 / 3.0).abs() < 1e-12);
        assert!((set.terms[2].score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_break_by_first_occurrence() {
        let text = "transparency accountability biodiversity accountability transparency biodiversity";
        let set = extractor().extract_terms(text).unwrap();

        let terms: Vec<_> = set.iter_terms().collect();
        assert_eq!(
            terms,
            vec!["transparency", "accountability", "biodiversity"]
        );
    }

    #[test]
    fn test_length_bounds() {
        let text = "short words excluded, but governance (10) and \
                    responsibilityreport (20) stay; irresponsibilityreports (23) goes";
        let set = extractor().extract_terms(text).unwrap();

        let terms: Vec<_> = set.iter_terms().collect();
        assert_eq!(terms, vec!["governance", "responsibilityreport"]);
        for term in set.iter_terms() {
            let len = term.chars().count();
            assert!((10..=20).contains(&len));
        }
    }

    #[test]
    fn test_at_most_twenty_terms() {
        let text: String = (0..50)
            .map(|i| format!("keywordterm{i:03} "))
            .collect();
        let set = extractor().extract_terms(&text).unwrap();

        assert_eq!(set.len(), 20);
        assert_eq!(set.terms[0].term, "keywordterm000");
        assert_eq!(set.terms[19].term, "keywordterm019");
    }

    #[test]
    fn test_fewer_than_twenty_terms() {
        let set = extractor()
            .extract_terms("environmental disclosure requirements")
            .unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_no_qualifying_terms() {
        let set = extractor().extract_terms("a b c short text only").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.to_feature_string(), "\"\"");

        let set = extractor().extract_terms("").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_terms_are_lowercased() {
        let set = extractor()
            .extract_terms("Sustainability SUSTAINABILITY sustainability")
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.terms[0].frequency, 3);
    }

    #[test]
    fn test_extract_uses_cleaned_text() {
        let cleaned = CleanedText {
            text: "Corporate governance framework.".to_string(),
            sentence_count: 1,
        };
        let vector = extractor().extract(&cleaned).unwrap();
        assert_eq!(vector.text_value(), "\"governance\"");
    }

    #[test]
    fn test_custom_limits() {
        let extractor = KeywordExtractor::with_limits(3, 5, 2).unwrap();
        let set = extractor.extract_terms("the code the code of ethic ethic ethic").unwrap();
        let terms: Vec<_> = set.iter_terms().collect();
        assert_eq!(terms, vec!["ethic", "the"]);
        assert_eq!(extractor.max_terms(), 2);
    }
}
