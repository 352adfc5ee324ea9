//! Length filter implementation.

use super::Filter;

use crate::analysis::token::{Token, TokenStream};
use crate::error::{EsgdocError, Result};

/// A filter that keeps tokens whose character length lies in `[min, max]`.
///
/// Lengths are counted in Unicode scalar values, not bytes.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min: usize,
    max: usize,
}

impl LengthFilter {
    /// Create a new length filter with inclusive bounds.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(EsgdocError::analysis(format!(
                "Invalid length range: min {min} is greater than max {max}"
            )));
        }
        Ok(LengthFilter { min, max })
    }

    /// Get the minimum accepted length.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Get the maximum accepted length.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Check whether a piece of text passes this filter.
    pub fn accepts(&self, text: &str) -> bool {
        let len = text.chars().count();
        len >= self.min && len <= self.max
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept: Vec<Token> = tokens.filter(|t| self.accepts(&t.text)).collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_filter_bounds_are_inclusive() {
        let filter = LengthFilter::new(10, 20).unwrap();
        let tokens = vec![
            Token::new("short", 0),
            Token::new("governance", 1),           // 10
            Token::new("responsibilities", 2),     // 16
            Token::new("environmentalstewards", 3), // 21
            Token::new("aaaaaaaaaaaaaaaaaaaa", 4), // 20
        ];

        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(
            result,
            vec!["governance", "responsibilities", "aaaaaaaaaaaaaaaaaaaa"]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let filter = LengthFilter::new(10, 20).unwrap();
        // 10 characters, 12 bytes
        assert!(filter.accepts("réglementé"));
    }

    #[test]
    fn test_invalid_range() {
        assert!(LengthFilter::new(5, 4).is_err());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LengthFilter::new(1, 2).unwrap().name(), "length");
    }
}
