//! Katakana long-vowel stemming filter.
//!
//! Loanwords are often written both with and without a final prolonged
//! sound mark (`コンピューター` / `コンピュータ`). This filter removes one
//! trailing `ー` from katakana terms that are long enough, so both spellings
//! map to the same term.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::katakana_stem::KatakanaStemFilter;
//!
//! let filter = KatakanaStemFilter::new();
//! let tokens = vec![Token::new("パーティー", 0), Token::new("コーヒー", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result[0].text, "パーティ");
//! assert_eq!(result[1].text, "コーヒ");
//! ```

use log::debug;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::{Result, WakachiError};

/// Katakana-hiragana prolonged sound mark.
pub const PROLONGED_SOUND_MARK: char = 'ー';

/// Default minimum term length (in characters) for stemming.
pub const DEFAULT_MINIMUM_LENGTH: usize = 4;

/// Returns true if `c` is in the (full-width) Katakana block.
fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A0}'..='\u{30FF}')
}

/// A filter that strips a trailing prolonged sound mark from katakana terms.
///
/// A term is stemmed when it consists of Katakana-block characters only and
/// is at least `minimum_length` characters long, i.e. when the stem keeps at
/// least `minimum_length - 1` characters. Half-width katakana is not handled.
/// Keyword tokens are passed through unchanged.
#[derive(Clone, Debug)]
pub struct KatakanaStemFilter {
    minimum_length: usize,
}

impl KatakanaStemFilter {
    /// Create a filter with the default minimum length of 4.
    pub fn new() -> Self {
        KatakanaStemFilter {
            minimum_length: DEFAULT_MINIMUM_LENGTH,
        }
    }

    /// Create a filter with a custom minimum length.
    ///
    /// Fails if `minimum_length` is less than 2.
    pub fn with_minimum_length(minimum_length: usize) -> Result<Self> {
        if minimum_length < 2 {
            return Err(WakachiError::invalid_config(format!(
                "minimum_length must be >= 2, got {minimum_length}"
            )));
        }
        debug!("katakana stem filter with minimum length {minimum_length}");
        Ok(KatakanaStemFilter { minimum_length })
    }

    pub fn minimum_length(&self) -> usize {
        self.minimum_length
    }

    /// Stem a single term, returning `None` if it is left unchanged.
    pub fn stem(&self, term: &str) -> Option<String> {
        let mut length = 0;
        for c in term.chars() {
            if !is_katakana(c) {
                return None;
            }
            length += 1;
        }
        if length < self.minimum_length {
            return None;
        }
        term.strip_suffix(PROLONGED_SOUND_MARK).map(str::to_string)
    }
}

impl Default for KatakanaStemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for KatakanaStemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = self.clone();
        Ok(Box::new(tokens.map(move |token| {
            if token.is_keyword() {
                return token;
            }
            match stemmer.stem(&token.text) {
                Some(stemmed) => token.with_text(stemmed),
                None => token,
            }
        })))
    }

    fn name(&self) -> &'static str {
        "katakana_stem"
    }
}
