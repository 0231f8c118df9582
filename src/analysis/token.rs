//! Token types and utilities for text analysis.
//!
//! This module defines the [`Token`], the unit that flows through the
//! analysis pipeline. A token is created once per morpheme by the
//! tokenizer, handed by value from filter to filter, and dropped after the
//! consumer has read it.
//!
//! # Offsets
//!
//! `start_offset` and `end_offset` are absolute character (Unicode scalar
//! value) offsets into the analyzed text, not byte offsets.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token::Token;
//!
//! let token = Token::with_offsets("もも", 1, 4, 6);
//! assert_eq!(token.text, "もも");
//! assert_eq!(token.start_offset, 4);
//! assert_eq!(token.end_offset, 6);
//! assert_eq!(token.position_increment, 1);
//! assert!(!token.is_keyword());
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::analysis::morpheme::{Morpheme, PartOfSpeech};
use crate::error::Result;

/// A token represents a single unit of text after tokenization.
///
/// # Fields
///
/// - `text` - The term text, rewritten by filters
/// - `position` - Position in the token stream (0-based)
/// - `start_offset` / `end_offset` - Character offsets in the original text
/// - `position_increment` - Position relative to previous token (always 1)
/// - `position_length` - Number of positions this token spans (always 1)
/// - `keyword` - Exempts the token from rewriting and stemming filters
/// - `morpheme` - The morpheme this token was created from
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// The character offset where this token starts in the original text
    pub start_offset: usize,

    /// The character offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    pub position_length: usize,

    /// Whether this token is protected from term rewriting and stemming
    pub keyword: bool,

    /// The originating morpheme, if the token came from a morpheme source
    pub morpheme: Option<Arc<Morpheme>>,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
            keyword: false,
            morpheme: None,
        }
    }

    /// Create a new token with text, position, and character offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Create a token for a morpheme located at `base_offset` + its relative offsets.
    pub fn from_morpheme(morpheme: Morpheme, position: usize, base_offset: usize) -> Self {
        assert!(
            morpheme.begin <= morpheme.end,
            "morpheme {:?} ends before it begins",
            morpheme.surface
        );
        Token {
            text: morpheme.surface.clone(),
            position,
            start_offset: base_offset + morpheme.begin,
            end_offset: base_offset + morpheme.end,
            position_increment: 1,
            position_length: 1,
            keyword: false,
            morpheme: Some(Arc::new(morpheme)),
        }
    }

    /// Get the length of the token text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as a keyword.
    pub fn keyword(mut self) -> Self {
        self.keyword = true;
        self
    }

    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.keyword
    }

    /// Attach the originating morpheme.
    pub fn with_morpheme(mut self, morpheme: Morpheme) -> Self {
        self.morpheme = Some(Arc::new(morpheme));
        self
    }

    /// Get the originating morpheme.
    pub fn morpheme(&self) -> Option<&Morpheme> {
        self.morpheme.as_deref()
    }

    /// Part-of-speech tuple of the originating morpheme.
    pub fn part_of_speech(&self) -> Option<&PartOfSpeech> {
        self.morpheme().map(Morpheme::part_of_speech)
    }

    /// Dictionary (base) form of the originating morpheme.
    pub fn dictionary_form(&self) -> Option<&str> {
        self.morpheme().map(Morpheme::dictionary_form)
    }

    /// Normalized form of the originating morpheme.
    pub fn normalized_form(&self) -> Option<&str> {
        self.morpheme().map(Morpheme::normalized_form)
    }

    /// Reading form of the originating morpheme.
    pub fn reading_form(&self) -> Option<&str> {
        self.morpheme().map(Morpheme::reading_form)
    }

    /// Whether the originating morpheme is out of vocabulary.
    pub fn is_oov(&self) -> bool {
        self.morpheme().is_some_and(Morpheme::is_oov)
    }

    /// Replace the text of this token, keeping everything else.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a lazy sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

/// Handle to the end offset of the text behind a token stream.
///
/// The tokenizer keeps one clone and sets it when its input runs out; the
/// consumer reads another clone after draining the stream.
#[derive(Clone, Debug, Default)]
pub struct FinalOffset(Rc<Cell<usize>>);

impl FinalOffset {
    pub fn new() -> Self {
        FinalOffset::default()
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }

    pub fn set(&self, offset: usize) {
        self.0.set(offset);
    }
}

/// A token stream that reports the character length of its input once it
/// has been consumed, however many tokens the filters dropped.
pub struct TrackedTokenStream {
    tokens: TokenStream,
    final_offset: FinalOffset,
}

impl TrackedTokenStream {
    pub fn new(tokens: TokenStream, final_offset: FinalOffset) -> Self {
        TrackedTokenStream {
            tokens,
            final_offset,
        }
    }

    /// Wrap a stream whose end offset is already known.
    pub fn with_final_offset(tokens: TokenStream, offset: usize) -> Self {
        let final_offset = FinalOffset::new();
        final_offset.set(offset);
        TrackedTokenStream::new(tokens, final_offset)
    }

    /// End offset of the analyzed text. Only reliable after `next()` has
    /// returned `None`.
    pub fn final_offset(&self) -> usize {
        self.final_offset.get()
    }

    /// Replace the tokens by `f(tokens)`, keeping the offset handle.
    pub fn map_tokens<F>(self, f: F) -> Result<Self>
    where
        F: FnOnce(TokenStream) -> Result<TokenStream>,
    {
        Ok(TrackedTokenStream {
            tokens: f(self.tokens)?,
            final_offset: self.final_offset,
        })
    }

    /// Drop the offset handle and keep the plain stream.
    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }
}

impl Iterator for TrackedTokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tokens.size_hint()
    }
}

impl fmt::Debug for TrackedTokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedTokenStream")
            .field("final_offset", &self.final_offset.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert_eq!(token.position_length, 1);
        assert!(!token.keyword);
        assert!(token.morpheme.is_none());
    }

    #[test]
    fn test_token_from_morpheme() {
        let morpheme = Morpheme::new("行っ", 2, 4).with_dictionary_form("行く");
        let token = Token::from_morpheme(morpheme, 3, 10);

        assert_eq!(token.text, "行っ");
        assert_eq!(token.position, 3);
        assert_eq!(token.start_offset, 12);
        assert_eq!(token.end_offset, 14);
        assert_eq!(token.dictionary_form(), Some("行く"));
        assert_eq!(token.len(), 2);
    }

    #[test]
    fn test_token_accessors_without_morpheme() {
        let token = Token::new("東京", 0).keyword();
        assert!(token.is_keyword());
        assert_eq!(token.part_of_speech(), None);
        assert_eq!(token.reading_form(), None);
        assert!(!token.is_oov());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("こんにちは", 0);
        assert_eq!(format!("{token}"), "こんにちは");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("すもも", 0), Token::new("もも", 1)];

        let collected: Vec<_> = tokens.into_token_stream().collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "すもも");
        assert_eq!(collected[1].text, "もも");
    }

    #[test]
    fn test_tracked_stream_keeps_offset_through_mapping() {
        let final_offset = FinalOffset::new();
        let tokens = vec![Token::with_offsets("猫", 0, 0, 1), Token::with_offsets("。", 1, 1, 2)];
        let mut stream = TrackedTokenStream::new(tokens.into_token_stream(), final_offset.clone())
            .map_tokens(|tokens| {
                let kept: TokenStream = Box::new(tokens.filter(|t| t.text != "。"));
                Ok(kept)
            })
            .unwrap();

        final_offset.set(2);
        assert_eq!(stream.by_ref().count(), 1);
        assert_eq!(stream.final_offset(), 2);

        let known = TrackedTokenStream::with_final_offset(Vec::new().into_token_stream(), 5);
        assert_eq!(known.final_offset(), 5);
        assert_eq!(known.into_tokens().count(), 0);
    }
}
