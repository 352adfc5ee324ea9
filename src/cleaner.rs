//! Text cleaning: sentence segmentation and normalization.
//!
//! The cleaner turns raw companion text into a single line of text that is
//! safe to embed in a quoted feature value, and counts its sentences.
//!
//! 1. Double and single quotes are removed.
//! 2. Every whitespace character (CR and LF included) becomes a space and
//!    runs of spaces collapse to one.
//! 3. The text is segmented into sentences; each sentence is trimmed and the
//!    non-empty sentences are joined with single spaces.
//!
//! Cleaning is idempotent: cleaning an already cleaned text returns the same
//! text.
//!
//! # Examples
//!
//! ```
//! use esgdoc::cleaner::TextCleaner;
//!
//! let cleaner = TextCleaner::new().unwrap();
//! let cleaned = cleaner
//!     .clean("Our \"Code of Conduct\".\r\nIt applies to all staff.")
//!     .unwrap();
//!
//! assert_eq!(cleaned.text, "Our Code of Conduct. It applies to all staff.");
//! assert_eq!(cleaned.sentence_count, 2);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::tokenizer::sentence::SentenceTokenizer;
use crate::error::Result;

/// Cleaned document text plus its sentence count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleanedText {
    /// Normalized, single-line text.
    pub text: String,
    /// Number of sentence segments detected.
    pub sentence_count: usize,
}

impl CleanedText {
    /// Check whether cleaning left any text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Segments raw text into sentences and normalizes whitespace and quoting.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    analyzer: PipelineAnalyzer,
}

impl TextCleaner {
    /// Create a new text cleaner.
    pub fn new() -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(SentenceTokenizer::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(r#"["']"#, "")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(r"\s+", " ")?))
            .with_name("cleaner");

        Ok(TextCleaner { analyzer })
    }

    /// Clean raw text.
    ///
    /// Empty or whitespace-only input yields empty text and a sentence count
    /// of zero.
    pub fn clean(&self, raw_text: &str) -> Result<CleanedText> {
        let sentences: Vec<String> = self.analyzer.analyze(raw_text)?.map(|t| t.text).collect();

        Ok(CleanedText {
            sentence_count: sentences.len(),
            text: sentences.join(" "),
        })
    }
}
