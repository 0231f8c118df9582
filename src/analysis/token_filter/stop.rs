//! Stop word filter.
//!
//! Removes frequent function words that carry little meaning for search.
//! The default list holds common Japanese particles, auxiliaries and
//! formal nouns, matched against the token text after any form rewriting.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::stop::StopFilter;
//! use wakachi::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("猫", 0),
//!     Token::new("が", 1),
//!     Token::new("いる", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "猫");
//! ```

use std::sync::{Arc, LazyLock};

use ahash::AHashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

const DEFAULT_JAPANESE_STOP_WORDS: &[&str] = &[
    "の",
    "に",
    "は",
    "を",
    "た",
    "が",
    "で",
    "て",
    "と",
    "し",
    "れ",
    "さ",
    "ある",
    "いる",
    "も",
    "する",
    "から",
    "な",
    "こと",
    "として",
    "い",
    "や",
    "れる",
    "など",
    "なっ",
    "ない",
    "この",
    "ため",
    "その",
    "あっ",
    "よう",
    "また",
    "もの",
    "という",
    "あり",
    "まで",
    "られ",
    "なる",
    "へ",
    "か",
    "だ",
    "これ",
    "によって",
    "により",
    "おり",
    "より",
    "による",
    "ず",
    "なり",
    "られる",
    "において",
    "ば",
    "なかっ",
    "なく",
    "しかし",
    "について",
    "せ",
    "だっ",
    "その後",
    "できる",
    "それ",
    "う",
    "ので",
    "なお",
    "のみ",
    "でき",
    "き",
    "つ",
    "における",
    "および",
    "いう",
    "さらに",
    "でも",
    "ら",
    "たり",
    "その他",
    "に関する",
    "たち",
    "ます",
    "ん",
    "なら",
    "に対して",
    "特に",
    "せる",
    "及び",
    "これら",
    "とき",
    "では",
    "にて",
    "ほか",
    "ながら",
    "うち",
    "そして",
    "とともに",
    "ただし",
    "かつて",
    "それぞれ",
    "または",
    "お",
    "ほど",
    "ものの",
    "に対する",
    "ほとんど",
    "と共に",
    "といった",
    "です",
    "とも",
    "ところ",
    "ここ",
];

/// Default Japanese stop words as a set.
pub static DEFAULT_JAPANESE_STOP_WORDS_SET: LazyLock<AHashSet<String>> = LazyLock::new(|| {
    DEFAULT_JAPANESE_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// Keyword tokens are never removed.
///
/// ## Custom Stop Words
///
/// ```
/// use wakachi::analysis::token_filter::stop::StopFilter;
///
/// let filter = StopFilter::from_words(vec!["これ", "それ", "あれ"]);
/// assert_eq!(filter.len(), 3);
/// assert!(filter.is_stop_word("それ"));
/// ```
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<AHashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default Japanese stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_JAPANESE_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: AHashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        Ok(Box::new(tokens.filter(move |token| {
            token.is_keyword() || !stop_words.contains(token.text.as_str())
        })))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["の", "を", "は"]);
        let tokens = vec![
            Token::new("今日", 0),
            Token::new("は", 1),
            Token::new("本", 2),
            Token::new("を", 3),
            Token::new("読む", 4),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "今日");
        assert_eq!(result[1].text, "本");
        assert_eq!(result[2].text, "読む");
        // positions are not renumbered
        assert_eq!(result[2].position, 4);
    }

    #[test]
    fn test_stop_filter_keeps_keywords() {
        let filter = StopFilter::new();
        let tokens = vec![Token::new("これ", 0).keyword(), Token::new("これ", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 1);
        assert!(result[0].is_keyword());
    }

    #[test]
    fn test_default_japanese_words() {
        let filter = StopFilter::default();
        assert_eq!(filter.len(), DEFAULT_JAPANESE_STOP_WORDS.len());
        assert!(filter.is_stop_word("について"));
        assert!(!filter.is_stop_word("すもも"));
        assert!(StopFilter::from_words(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
