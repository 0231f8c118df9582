//! Tokenizers that convert text into token streams.
//!
//! Tokenizers are the first step of the analysis pipeline. The tokenizer in
//! this crate does not segment text itself: it asks a
//! [`MorphemeSource`](crate::analysis::source::MorphemeSource) for
//! sentence-segmented morphemes and flattens them into one stream.
//!
//! - [`flatten::SentenceFlattener`] - Sentences to one morpheme sequence with a running base offset
//! - [`punctuation::PunctuationSkipping`] - Decorator that skips punctuation morphemes
//! - [`morphological::MorphologicalTokenizer`] - Morphemes to tokens
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use wakachi::analysis::morpheme::{Morpheme, SentenceMorphemes};
//! use wakachi::analysis::source::StaticMorphemeSource;
//! use wakachi::analysis::tokenizer::Tokenizer;
//! use wakachi::analysis::tokenizer::morphological::MorphologicalTokenizer;
//!
//! let source = StaticMorphemeSource::new()
//!     .with_text("もも。", vec![SentenceMorphemes::new(vec![
//!         Morpheme::new("もも", 0, 2),
//!         Morpheme::new("。", 2, 3),
//!     ])])
//!     .unwrap();
//!
//! let tokenizer = MorphologicalTokenizer::new(Arc::new(source));
//! let tokens: Vec<_> = tokenizer.tokenize("もも。").unwrap().collect();
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "もも");
//! ```

use crate::analysis::morpheme::Morpheme;
use crate::analysis::token::{TokenStream, TrackedTokenStream};
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can be shared by the
/// analyzers of several fields.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Tokenize `text` into a stream that also reports the end offset of the
    /// input once drained.
    ///
    /// The default reports the character length of `text`.
    fn tracked_stream(&self, text: &str) -> Result<TrackedTokenStream> {
        let tokens = self.tokenize(text)?;
        Ok(TrackedTokenStream::with_final_offset(tokens, text.chars().count()))
    }

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A forward-only sequence of morphemes that also reports where the
/// sentence of the most recently returned morpheme starts.
///
/// The absolute offsets of a morpheme `m` just returned by `next()` are
/// `base_offset() + m.begin` and `base_offset() + m.end`. Once `next()` has
/// returned `None`, `base_offset()` is the total number of characters
/// consumed.
pub trait MorphemeCursor: Iterator<Item = Morpheme> {
    /// Absolute character offset of the start of the current sentence.
    fn base_offset(&self) -> usize;
}

impl<C: MorphemeCursor + ?Sized> MorphemeCursor for Box<C> {
    fn base_offset(&self) -> usize {
        (**self).base_offset()
    }
}

pub mod flatten;
pub mod morphological;
pub mod punctuation;
