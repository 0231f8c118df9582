//! Lowercase filter implementation.
//!
//! Japanese text often mixes in Latin words (`iPhone`, `ＡＢＣ`). This filter
//! lowercases them so matching is case-insensitive. Kana and kanji have no
//! case and pass through untouched.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::lowercase::LowercaseFilter;
//! use wakachi::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("iPhone", 0), Token::new("ＡＢＣ", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "iphone");
//! assert_eq!(filtered[1].text, "ａｂｃ");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// - Converts all characters to lowercase
/// - Skips keyword tokens
/// - Preserves token positions and offsets
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if token.is_keyword() || !token.text.chars().any(char::is_uppercase) {
                token
            } else {
                let lowered = token.text.to_lowercase();
                token.with_text(lowered)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
