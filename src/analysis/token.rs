//! Tokens produced by tokenizers and rewritten by filters.
//!
//! A token remembers where it came from: its index in the stream and the
//! byte span it covers in the text the tokenizer saw (after char filters).
//!
//! # Examples
//!
//! ```
//! use esgdoc::analysis::token::Token;
//!
//! let token = Token::at("sustainability", 3, 17..31);
//! assert_eq!(token.text, "sustainability");
//! assert_eq!(token.char_len(), 14);
//! assert_eq!(token.span, 17..31);
//! ```

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One unit of analyzed text: a word, a term or a whole sentence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    /// Index in the token stream, counted before any filter dropped tokens.
    pub position: usize,

    /// Byte range of the token in the tokenized text.
    pub span: Range<usize>,
}

impl Token {
    /// A token without source span, mostly useful in tests.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::at(text, position, 0..0)
    }

    /// A token cut from `span` of the tokenized text.
    pub fn at<S: Into<String>>(text: S, position: usize, span: Range<usize>) -> Self {
        Token {
            text: text.into(),
            position,
            span,
        }
    }

    /// Length in characters. Term length limits are expressed in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The same token with its text replaced.
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Tokens flowing from a tokenizer through the filters.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
