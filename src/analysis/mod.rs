//! Text analysis module for esgdoc.
//!
//! This module provides the tokenization and filtering building blocks used by
//! the text cleaner, the keyword extractor and the model's word vectorizer.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Token Stream
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use char_filter::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
