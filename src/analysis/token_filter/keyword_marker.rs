//! Keyword marker filter.
//!
//! Marks tokens whose text is in a protected word list as keywords. Later
//! rewriting filters (base form, stemming, lowercasing) and the stop filter
//! leave keyword tokens alone.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::katakana_stem::KatakanaStemFilter;
//! use wakachi::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
//!
//! let marker = KeywordMarkerFilter::from_words(["コピー"]);
//! let tokens = vec![Token::new("コピー", 0), Token::new("サーバー", 1)];
//!
//! let marked = marker.filter(Box::new(tokens.into_iter())).unwrap();
//! let result: Vec<_> = KatakanaStemFilter::new().filter(marked).unwrap().collect();
//!
//! assert_eq!(result[0].text, "コピー");
//! assert_eq!(result[1].text, "サーバ");
//! ```

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that marks protected words as keywords.
#[derive(Clone, Debug, Default)]
pub struct KeywordMarkerFilter {
    keywords: Arc<AHashSet<String>>,
}

impl KeywordMarkerFilter {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordMarkerFilter {
            keywords: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Filter for KeywordMarkerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let keywords = Arc::clone(&self.keywords);
        Ok(Box::new(tokens.map(move |token| {
            if !token.is_keyword() && keywords.contains(token.text.as_str()) {
                token.keyword()
            } else {
                token
            }
        })))
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_marks_listed_words() {
        let filter = KeywordMarkerFilter::from_words(vec!["東京", "Rust"]);
        let tokens = vec![
            Token::new("東京", 0),
            Token::new("大阪", 1),
            Token::new("Rust", 2),
            Token::new("rust", 3),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        let flags: Vec<bool> = result.iter().map(|t| t.is_keyword()).collect();
        assert_eq!(flags, vec![true, false, true, false]);
        assert_eq!(result[0].text, "東京");
    }

    #[test]
    fn test_existing_keywords_stay_marked() {
        let filter = KeywordMarkerFilter::default();
        assert!(filter.is_empty());

        let tokens = vec![Token::new("x", 0).keyword()];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        assert!(result[0].is_keyword());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(KeywordMarkerFilter::default().name(), "keyword_marker");
    }
}
