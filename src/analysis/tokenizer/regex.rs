//! Word tokenizer driven by a regular expression.
//!
//! Every non-overlapping match becomes a token, so punctuation, quotes and
//! hyphens all act as separators with the default `\w+` pattern.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{EsgdocError, Result};

/// Word pattern used when none is given.
pub const DEFAULT_WORD_PATTERN: &str = r"\w+";

/// Emits one token per match of its pattern.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    regex: Arc<Regex>,
}

impl RegexTokenizer {
    /// Tokenizer over runs of word characters.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_WORD_PATTERN)
    }

    /// Tokenizer over matches of `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            EsgdocError::analysis(format!("invalid token pattern '{pattern}': {e}"))
        })?;
        Ok(RegexTokenizer {
            regex: Arc::new(regex),
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let words: Vec<Token> = self
            .regex
            .find_iter(text)
            .enumerate()
            .map(|(position, found)| Token::at(found.as_str(), position, found.range()))
            .collect();

        Ok(Box::new(words.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        RegexTokenizer::new()
            .unwrap()
            .tokenize(text)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_tokens_carry_spans() {
        let tokens: Vec<Token> = RegexTokenizer::new()
            .unwrap()
            .tokenize("Ethics  policy")
            .unwrap()
            .collect();

        assert_eq!(
            tokens,
            vec![Token::at("Ethics", 0, 0..6), Token::at("policy", 1, 8..14)]
        );
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(
            words("\"greenhouse-gas emissions\", 2015."),
            vec!["greenhouse", "gas", "emissions", "2015"]
        );
    }

    #[test]
    fn test_custom_pattern() {
        let tokenizer = RegexTokenizer::with_pattern("[A-Z]{2,}").unwrap();
        let found: Vec<String> = tokenizer
            .tokenize("The CSR and AR teams")
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(found, vec!["CSR", "AR"]);
        assert_eq!(tokenizer.pattern(), "[A-Z]{2,}");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            RegexTokenizer::with_pattern("(").unwrap_err(),
            EsgdocError::Analysis(_)
        ));
    }
}
