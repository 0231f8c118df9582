//! Token filter implementations for token transformation.
//!
//! Filters consume the token stream produced by the tokenizer (or by the
//! previous filter) and lazily produce a new one. Each filter either rewrites
//! the text of tokens or decides whether to keep them; none of them change
//! offsets.
//!
//! # Available Filters
//!
//! Term rewriting (keyword tokens are left alone):
//! - [`form::BaseFormFilter`] - Dictionary (lemma) form
//! - [`form::NormalizedFormFilter`] - Normalized spelling
//! - [`form::SurfaceFormFilter`] - Surface text as written
//! - [`form::ReadingFormFilter`] - Katakana reading
//! - [`katakana_stem::KatakanaStemFilter`] - Strips a trailing long-vowel mark
//! - [`lowercase::LowercaseFilter`] - Lowercases Latin letters
//!
//! Normalization (applies to every token):
//! - [`hiragana_uppercase::HiraganaUppercaseFilter`] - Small hiragana to normal size
//! - [`katakana_uppercase::KatakanaUppercaseFilter`] - Small katakana to normal size
//!
//! Selection:
//! - [`pos_stop::PartOfSpeechStopFilter`] - Drops tokens by part of speech
//! - [`stop::StopFilter`] - Drops stop words
//! - [`keyword_marker::KeywordMarkerFilter`] - Marks protected words as keywords
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Base Form → POS Stop → Stop Words → Katakana Stem → Lowercase
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// All token filters must implement this trait to be used in the analysis
/// pipeline. Filters are built once from validated configuration and can
/// then be applied to any number of streams; `filter` itself does not fail
/// for any of the filters in this crate.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use wakachi::analysis::token::{Token, TokenStream};
/// use wakachi::analysis::token_filter::Filter;
/// use wakachi::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         Ok(Box::new(tokens.map(|mut t: Token| {
///             t.text = t.text.chars().rev().collect();
///             t
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual filter modules
pub mod form;
pub mod hiragana_uppercase;
pub mod katakana_stem;
pub mod katakana_uppercase;
pub mod keyword_marker;
pub mod lowercase;
pub mod pos_stop;
pub mod stop;

pub use form::{BaseFormFilter, NormalizedFormFilter, ReadingFormFilter, SurfaceFormFilter};
pub use hiragana_uppercase::HiraganaUppercaseFilter;
pub use katakana_stem::KatakanaStemFilter;
pub use katakana_uppercase::KatakanaUppercaseFilter;
pub use keyword_marker::KeywordMarkerFilter;
pub use lowercase::LowercaseFilter;
pub use pos_stop::{PartOfSpeechStopFilter, StopTagMatcher, StopTagPattern};
pub use stop::StopFilter;
