//! Sentence tokenizer implementation.
//!
//! Splits text on sentence boundaries following the Unicode Text
//! Segmentation algorithm (UAX #29). Each emitted token is one sentence with
//! surrounding whitespace trimmed; whitespace-only segments are dropped.
//!
//! # Examples
//!
//! ```
//! use esgdoc::analysis::tokenizer::Tokenizer;
//! use esgdoc::analysis::tokenizer::sentence::SentenceTokenizer;
//!
//! let tokenizer = SentenceTokenizer::new();
//! let sentences: Vec<_> = tokenizer
//!     .tokenize("We report annually. Our targets are public.")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(sentences, vec!["We report annually.", "Our targets are public."]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that emits one token per sentence.
#[derive(Clone, Debug, Default)]
pub struct SentenceTokenizer;

impl SentenceTokenizer {
    /// Create a new sentence tokenizer.
    pub fn new() -> Self {
        SentenceTokenizer
    }
}

impl Tokenizer for SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_sentence_bound_indices()
            .filter_map(|(start, segment)| {
                let trimmed = segment.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let lead = segment.len() - segment.trim_start().len();
                Some((start + lead, trimmed))
            })
            .enumerate()
            .map(|(position, (start, sentence))| {
                Token::at(sentence, position, start..start + sentence.len())
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "sentence"
    }
}
