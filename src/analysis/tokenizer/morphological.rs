//! Tokenizer backed by a morpheme source.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use wakachi::analysis::morpheme::{Morpheme, SentenceMorphemes};
//! use wakachi::analysis::source::StaticMorphemeSource;
//! use wakachi::analysis::tokenizer::morphological::MorphologicalTokenizer;
//!
//! let source = StaticMorphemeSource::new()
//!     .with_text("猫。犬。", vec![
//!         SentenceMorphemes::new(vec![Morpheme::new("猫", 0, 1), Morpheme::new("。", 1, 2)]),
//!         SentenceMorphemes::new(vec![Morpheme::new("犬", 0, 1), Morpheme::new("。", 1, 2)]),
//!     ])
//!     .unwrap();
//!
//! let tokenizer = MorphologicalTokenizer::new(Arc::new(source)).discard_punctuation(false);
//! let mut stream = tokenizer.token_stream("猫。犬。").unwrap();
//! let offsets: Vec<_> = stream.by_ref().map(|t| (t.start_offset, t.end_offset)).collect();
//!
//! assert_eq!(offsets, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
//! assert_eq!(stream.final_offset(), 4);
//! ```

use std::sync::Arc;

use log::trace;

use super::flatten::SentenceFlattener;
use super::punctuation::PunctuationSkipping;
use super::{MorphemeCursor, Tokenizer};
use crate::analysis::source::{MorphemeSource, SplitMode};
use crate::analysis::token::{FinalOffset, Token, TokenStream, TrackedTokenStream};
use crate::error::Result;

/// Turns the morphemes of a [`MorphemeSource`] into tokens.
///
/// Punctuation is discarded by default.
#[derive(Clone)]
pub struct MorphologicalTokenizer {
    source: Arc<dyn MorphemeSource>,
    mode: SplitMode,
    discard_punctuation: bool,
}

impl MorphologicalTokenizer {
    /// Create a tokenizer in search mode that discards punctuation.
    pub fn new(source: Arc<dyn MorphemeSource>) -> Self {
        MorphologicalTokenizer {
            source,
            mode: SplitMode::default(),
            discard_punctuation: true,
        }
    }

    /// Set the split mode passed to the source.
    pub fn with_mode(mut self, mode: SplitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether punctuation morphemes are skipped.
    pub fn discard_punctuation(mut self, discard: bool) -> Self {
        self.discard_punctuation = discard;
        self
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn discards_punctuation(&self) -> bool {
        self.discard_punctuation
    }

    pub fn source(&self) -> &Arc<dyn MorphemeSource> {
        &self.source
    }

    /// Analyze `text` and return the concrete token stream.
    pub fn token_stream(&self, text: &str) -> Result<MorphemeTokenStream> {
        trace!(
            "tokenizing {} chars with source '{}' in {} mode",
            text.chars().count(),
            self.source.name(),
            self.mode
        );
        let sentences = self.source.analyze(text, self.mode)?;
        let flattener = SentenceFlattener::new(sentences);
        let cursor: Box<dyn MorphemeCursor> = if self.discard_punctuation {
            Box::new(PunctuationSkipping::new(flattener))
        } else {
            Box::new(flattener)
        };
        Ok(MorphemeTokenStream::new(cursor))
    }
}

impl Tokenizer for MorphologicalTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.token_stream(text)?))
    }

    fn tracked_stream(&self, text: &str) -> Result<TrackedTokenStream> {
        let stream = self.token_stream(text)?;
        let final_offset = stream.final_offset_handle();
        Ok(TrackedTokenStream::new(Box::new(stream), final_offset))
    }

    fn name(&self) -> &'static str {
        "morphological"
    }
}

impl std::fmt::Debug for MorphologicalTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphologicalTokenizer")
            .field("source", &self.source.name())
            .field("mode", &self.mode)
            .field("discard_punctuation", &self.discard_punctuation)
            .finish()
    }
}

/// Lazy stream of tokens over a morpheme cursor.
///
/// Not restartable: analyze the text again to get a fresh stream.
pub struct MorphemeTokenStream {
    cursor: Box<dyn MorphemeCursor>,
    position: usize,
    last_start: usize,
    end: FinalOffset,
}

impl MorphemeTokenStream {
    pub fn new(cursor: Box<dyn MorphemeCursor>) -> Self {
        MorphemeTokenStream {
            cursor,
            position: 0,
            last_start: 0,
            end: FinalOffset::new(),
        }
    }

    /// Absolute offset of the start of the sentence being read.
    ///
    /// After the stream is exhausted this is the length of the analyzed text.
    pub fn final_offset(&self) -> usize {
        self.cursor.base_offset()
    }

    /// Handle that receives [`final_offset`](Self::final_offset) when the
    /// stream is exhausted, readable after filters have wrapped the stream.
    pub fn final_offset_handle(&self) -> FinalOffset {
        self.end.clone()
    }
}

impl Iterator for MorphemeTokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let Some(morpheme) = self.cursor.next() else {
            self.end.set(self.cursor.base_offset());
            return None;
        };
        let token = Token::from_morpheme(morpheme, self.position, self.cursor.base_offset());
        assert!(
            token.start_offset >= self.last_start,
            "token offsets went backwards: {} after {}",
            token.start_offset,
            self.last_start
        );
        self.last_start = token.start_offset;
        self.position += 1;
        Some(token)
    }
}
