//! Small hiragana normalization filter.
//!
//! Rewrites small hiragana (sokuon `っ`, yōon `ゃゅょ`, ...) to their
//! normal-size letters, so that `ちょっと` and the historical spelling
//! `ちよつと` index to the same term. The mapping is lossy and meant for
//! searching historical texts; it applies to keyword tokens too.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::hiragana_uppercase::HiraganaUppercaseFilter;
//!
//! let tokens = vec![Token::new("ちょっとまって", 0)];
//! let result: Vec<_> = HiraganaUppercaseFilter::new()
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "ちよつとまつて");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Map a small hiragana letter to its normal-size counterpart.
pub fn to_normal_hiragana(c: char) -> Option<char> {
    let mapped = match c {
        'ぁ' => 'あ',
        'ぃ' => 'い',
        'ぅ' => 'う',
        'ぇ' => 'え',
        'ぉ' => 'お',
        'っ' => 'つ',
        'ゃ' => 'や',
        'ゅ' => 'ゆ',
        'ょ' => 'よ',
        'ゎ' => 'わ',
        'ゕ' => 'か',
        'ゖ' => 'け',
        _ => return None,
    };
    Some(mapped)
}

/// A filter that normalizes small hiragana letters to normal size.
#[derive(Clone, Debug, Default)]
pub struct HiraganaUppercaseFilter;

impl HiraganaUppercaseFilter {
    pub fn new() -> Self {
        HiraganaUppercaseFilter
    }

    /// Normalize a single term.
    pub fn normalize(term: &str) -> String {
        term.chars().map(|c| to_normal_hiragana(c).unwrap_or(c)).collect()
    }
}

impl Filter for HiraganaUppercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if token.text.chars().any(|c| to_normal_hiragana(c).is_some()) {
                token.text = Self::normalize(&token.text);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "hiragana_uppercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn run(texts: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(*t, i))
            .collect();
        HiraganaUppercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_small_hiragana() {
        assert_eq!(run(&["ちょっとまって"]), vec!["ちよつとまつて"]);
        assert_eq!(
            run(&["ぁぃぅぇぉっゃゅょゎゕゖ"]),
            vec!["あいうえおつやゆよわかけ"]
        );
    }

    #[test]
    fn test_other_text_unchanged() {
        assert_eq!(run(&["ッァ", "すもも", "東京", ""]), vec!["ッァ", "すもも", "東京", ""]);
    }

    #[test]
    fn test_supplementary_characters_preserved() {
        assert_eq!(run(&["𠀋ちょっと"]), vec!["𠀋ちよつと"]);
        assert_eq!(run(&["ちょ𠀋っと"]), vec!["ちよ𠀋つと"]);
        assert_eq!(run(&["ちょっと𠀋"]), vec!["ちよつと𠀋"]);
    }

    #[test]
    fn test_keywords_are_normalized() {
        let tokens = vec![Token::with_offsets("きゃっ", 0, 3, 6).keyword()];
        let result: Vec<Token> = HiraganaUppercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();
        assert_eq!(result[0].text, "きやつ");
        assert_eq!((result[0].start_offset, result[0].end_offset), (3, 6));
        assert!(result[0].is_keyword());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(HiraganaUppercaseFilter::new().name(), "hiragana_uppercase");
    }
}
