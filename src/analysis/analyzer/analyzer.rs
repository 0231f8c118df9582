//! Core analyzer trait definition.
//!
//! Analyzers are the complete text processing pipeline:
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Index
//!             ↓
//!         Tokenizer (morpheme source → flattener → punctuation skipping)
//!             ↓
//!         Filter 1
//!             ↓
//!         Filter N
//! ```
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use wakachi::analysis::analyzer::analyzer::Analyzer;
//! use wakachi::analysis::token::TokenStream;
//! use wakachi::error::Result;
//!
//! struct NothingAnalyzer;
//!
//! impl Analyzer for NothingAnalyzer {
//!     fn analyze(&self, _text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "nothing"
//!     }
//! }
//!
//! assert_eq!(NothingAnalyzer.analyze("何か").unwrap().count(), 0);
//! ```

use crate::analysis::token::{TokenStream, TrackedTokenStream};
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Analyzers are `Send + Sync`; a single instance may serve any number of
/// concurrent `analyze` calls, each producing an independent stream.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Analyze `text` into a stream that reports the end offset of the input
    /// once drained, even when every token was filtered out.
    ///
    /// The default reports the character length of `text`.
    fn analyze_tracked(&self, text: &str) -> Result<TrackedTokenStream> {
        let tokens = self.analyze(text)?;
        Ok(TrackedTokenStream::with_final_offset(tokens, text.chars().count()))
    }

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
