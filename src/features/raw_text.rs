//! Raw text feature extraction.

use super::{ExtractorKind, FeatureExtractor, FeatureVector, TextWithLength};
use crate::cleaner::CleanedText;
use crate::error::Result;

/// Uses the cleaned text verbatim plus its sentence count.
#[derive(Debug, Clone, Default)]
pub struct RawTextExtractor;

impl RawTextExtractor {
    /// Create a new raw text extractor.
    pub fn new() -> Self {
        RawTextExtractor
    }
}

impl FeatureExtractor for RawTextExtractor {
    fn extract(&self, cleaned: &CleanedText) -> Result<FeatureVector> {
        Ok(FeatureVector::TextWithLength(TextWithLength {
            text: cleaned.text.clone(),
            length: cleaned.sentence_count,
        }))
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::RawText
    }

    fn name(&self) -> &'static str {
        "raw_text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_extractor() {
        let cleaned = CleanedText {
            text: "Policy statement. Scope.".to_string(),
            sentence_count: 2,
        };

        let vector = RawTextExtractor::new().extract(&cleaned).unwrap();
        assert_eq!(
            vector,
            FeatureVector::TextWithLength(TextWithLength {
                text: "Policy statement. Scope.".to_string(),
                length: 2,
            })
        );
    }

    #[test]
    fn test_empty_text() {
        let vector = RawTextExtractor::new()
            .extract(&CleanedText::default())
            .unwrap();
        assert_eq!(vector.numeric_value(), Some(0.0));
        assert_eq!(vector.text_value(), "");
    }
}
