//! The analyzer abstraction.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Turns text into a stream of tokens.
///
/// Analyzers are shared by the batch workers, hence `Send + Sync`.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Short name used in log and debug output.
    fn name(&self) -> &str;
}
