//! Feature extraction strategies.
//!
//! A feature extractor turns a [`CleanedText`] into the [`FeatureVector`] a
//! model was trained on. Two strategies exist and the configured one must
//! match the model's schema:
//!
//! - [`KeywordExtractor`]: the top scoring terms of the document, serialized
//!   as one quoted, space separated string.
//! - [`RawTextExtractor`]: the whole cleaned text plus its sentence count.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cleaner::CleanedText;
use crate::error::Result;

pub mod keyword;
pub mod raw_text;

pub use keyword::KeywordExtractor;
pub use raw_text::RawTextExtractor;

/// A term selected by the keyword strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTerm {
    /// The lowercased term.
    pub term: String,
    /// Term-frequency weight in `(0, 1]`; the most frequent term scores 1.
    pub score: f64,
    /// Raw number of occurrences.
    pub frequency: usize,
}

/// Terms ordered by descending score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordSet {
    pub terms: Vec<ScoredTerm>,
}

impl KeywordSet {
    /// Number of selected terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether no term qualified.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the selected terms, best first.
    pub fn iter_terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.term.as_str())
    }

    /// The string-attribute value the keyword models were trained on:
    /// the terms joined by single spaces and wrapped in double quotes.
    pub fn to_feature_string(&self) -> String {
        let joined = self.iter_terms().collect::<Vec<_>>().join(" ");
        format!("\"{joined}\"")
    }
}

/// Whole-document text with its sentence count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextWithLength {
    pub text: String,
    pub length: usize,
}

/// The strategy-dependent payload handed to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureVector {
    KeywordSet(KeywordSet),
    TextWithLength(TextWithLength),
}

impl FeatureVector {
    /// The strategy that produced this vector.
    pub fn kind(&self) -> ExtractorKind {
        match self {
            FeatureVector::KeywordSet(_) => ExtractorKind::Keyword,
            FeatureVector::TextWithLength(_) => ExtractorKind::RawText,
        }
    }

    /// The value of the string attribute.
    pub fn text_value(&self) -> String {
        match self {
            FeatureVector::KeywordSet(set) => set.to_feature_string(),
            FeatureVector::TextWithLength(t) => t.text.clone(),
        }
    }

    /// The value of the numeric attribute, if this strategy has one.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            FeatureVector::KeywordSet(_) => None,
            FeatureVector::TextWithLength(t) => Some(t.length as f64),
        }
    }
}

/// Which feature extraction strategy a pipeline uses.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Top-N term extraction
    #[default]
    Keyword,
    /// Full cleaned text plus sentence count
    RawText,
}

impl ExtractorKind {
    /// Build the extractor for this strategy.
    pub fn build(&self) -> Result<Box<dyn FeatureExtractor>> {
        Ok(match self {
            ExtractorKind::Keyword => Box::new(KeywordExtractor::new()?),
            ExtractorKind::RawText => Box::new(RawTextExtractor::new()),
        })
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractorKind::Keyword => write!(f, "keyword"),
            ExtractorKind::RawText => write!(f, "raw-text"),
        }
    }
}

/// Trait for feature extraction strategies.
pub trait FeatureExtractor: Send + Sync {
    /// Extract the feature vector of a cleaned document.
    fn extract(&self, cleaned: &CleanedText) -> Result<FeatureVector>;

    /// The strategy implemented by this extractor.
    fn kind(&self) -> ExtractorKind;

    /// Get the name of this extractor for logging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(term: &str, score: f64) -> ScoredTerm {
        ScoredTerm {
            term: term.to_string(),
            score,
            frequency: 1,
        }
    }

    #[test]
    fn test_keyword_feature_string() {
        let set = KeywordSet {
            terms: vec![term("sustainability", 1.0), term("governance", 0.5)],
        };
        assert_eq!(set.to_feature_string(), "\"sustainability governance\"");
    }

    #[test]
    fn test_empty_keyword_feature_string() {
        assert_eq!(KeywordSet::default().to_feature_string(), "\"\"");
    }

    #[test]
    fn test_feature_vector_values() {
        let vector = FeatureVector::TextWithLength(TextWithLength {
            text: "One. Two.".to_string(),
            length: 2,
        });
        assert_eq!(vector.kind(), ExtractorKind::RawText);
        assert_eq!(vector.text_value(), "One. Two.");
        assert_eq!(vector.numeric_value(), Some(2.0));

        let vector = FeatureVector::KeywordSet(KeywordSet::default());
        assert_eq!(vector.kind(), ExtractorKind::Keyword);
        assert_eq!(vector.numeric_value(), None);
    }

    #[test]
    fn test_build_matches_kind() {
        for kind in [ExtractorKind::Keyword, ExtractorKind::RawText] {
            assert_eq!(kind.build().unwrap().kind(), kind);
        }
    }
}
