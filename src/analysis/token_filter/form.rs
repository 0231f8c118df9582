//! Filters that replace the token text with one of the morpheme's forms.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::morpheme::Morpheme;
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::form::BaseFormFilter;
//!
//! let tokens = vec![
//!     Token::new("行っ", 0).with_morpheme(Morpheme::new("行っ", 0, 2).with_dictionary_form("行く")),
//!     Token::new("行っ", 1).with_morpheme(Morpheme::new("行っ", 2, 4).with_dictionary_form("行く")).keyword(),
//! ];
//!
//! let result: Vec<_> = BaseFormFilter::new()
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "行く");
//! assert_eq!(result[1].text, "行っ"); // keywords are not rewritten
//! ```

use crate::analysis::morpheme::Morpheme;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Replace the text of every non-keyword token with `form(morpheme)`.
///
/// Tokens without a morpheme, or whose form is empty, keep their text.
fn rewrite_terms(tokens: TokenStream, form: fn(&Morpheme) -> &str) -> TokenStream {
    Box::new(tokens.map(move |token| {
        if token.is_keyword() {
            return token;
        }
        match token.morpheme().map(form) {
            Some(replacement) if !replacement.is_empty() && replacement != token.text => {
                let replacement = replacement.to_string();
                token.with_text(replacement)
            }
            _ => token,
        }
    }))
}

/// Replaces terms with their dictionary (base) form, e.g. `行っ` → `行く`.
#[derive(Clone, Debug, Default)]
pub struct BaseFormFilter;

impl BaseFormFilter {
    pub fn new() -> Self {
        BaseFormFilter
    }
}

impl Filter for BaseFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(rewrite_terms(tokens, Morpheme::dictionary_form))
    }

    fn name(&self) -> &'static str {
        "base_form"
    }
}

/// Replaces terms with their normalized form, e.g. `附属` → `付属`.
#[derive(Clone, Debug, Default)]
pub struct NormalizedFormFilter;

impl NormalizedFormFilter {
    pub fn new() -> Self {
        NormalizedFormFilter
    }
}

impl Filter for NormalizedFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(rewrite_terms(tokens, Morpheme::normalized_form))
    }

    fn name(&self) -> &'static str {
        "normalized_form"
    }
}

/// Restores the surface form, undoing an earlier rewrite.
#[derive(Clone, Debug, Default)]
pub struct SurfaceFormFilter;

impl SurfaceFormFilter {
    pub fn new() -> Self {
        SurfaceFormFilter
    }
}

impl Filter for SurfaceFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(rewrite_terms(tokens, Morpheme::surface))
    }

    fn name(&self) -> &'static str {
        "surface_form"
    }
}

/// Replaces terms with their katakana reading, e.g. `寿司` → `スシ`.
#[derive(Clone, Debug, Default)]
pub struct ReadingFormFilter;

impl ReadingFormFilter {
    pub fn new() -> Self {
        ReadingFormFilter
    }
}

impl Filter for ReadingFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(rewrite_terms(tokens, Morpheme::reading_form))
    }

    fn name(&self) -> &'static str {
        "reading_form"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn tokens() -> Vec<Token> {
        let morpheme = Morpheme::new("附属", 0, 2)
            .with_dictionary_form("附属")
            .with_normalized_form("付属")
            .with_reading_form("フゾク");
        vec![
            Token::with_offsets("附属", 0, 0, 2).with_morpheme(morpheme),
            Token::with_offsets("書い", 1, 2, 4).with_morpheme(
                Morpheme::new("書い", 2, 4)
                    .with_dictionary_form("書く")
                    .with_reading_form("カイ"),
            ),
            Token::with_offsets("ＡＢＣ", 2, 4, 7)
                .with_morpheme(Morpheme::new("ＡＢＣ", 4, 7).with_dictionary_form("")),
            Token::with_offsets("plain", 3, 7, 12),
        ]
    }

    fn apply(filter: &dyn Filter, tokens: Vec<Token>) -> Vec<Token> {
        filter.filter(Box::new(tokens.into_iter())).unwrap().collect()
    }

    #[test]
    fn test_base_form_filter() {
        let result = apply(&BaseFormFilter::new(), tokens());
        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["附属", "書く", "ＡＢＣ", "plain"]);
    }

    #[test]
    fn test_normalized_form_filter() {
        let result = apply(&NormalizedFormFilter::new(), tokens());
        assert_eq!(result[0].text, "付属");
        assert_eq!(result[1].text, "書い");
    }

    #[test]
    fn test_reading_form_filter() {
        let result = apply(&ReadingFormFilter::new(), tokens());
        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();
        // an empty reading leaves the term alone
        assert_eq!(texts, vec!["フゾク", "カイ", "ＡＢＣ", "plain"]);
    }

    #[test]
    fn test_surface_form_restores_text() {
        let rewritten = apply(&BaseFormFilter::new(), tokens());
        let restored = apply(&SurfaceFormFilter::new(), rewritten);
        let texts: Vec<_> = restored.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["附属", "書い", "ＡＢＣ", "plain"]);
    }

    #[test]
    fn test_keywords_and_offsets_preserved() {
        let mut input = tokens();
        input[1].keyword = true;

        let result = apply(&BaseFormFilter::new(), input.clone());
        assert_eq!(result.len(), input.len());
        assert_eq!(result[1].text, "書い");
        for (before, after) in input.iter().zip(&result) {
            assert_eq!(before.start_offset, after.start_offset);
            assert_eq!(before.end_offset, after.end_offset);
            assert_eq!(before.position, after.position);
        }
    }

    #[test]
    fn test_filter_names() {
        assert_eq!(BaseFormFilter::new().name(), "base_form");
        assert_eq!(NormalizedFormFilter::new().name(), "normalized_form");
        assert_eq!(SurfaceFormFilter::new().name(), "surface_form");
        assert_eq!(ReadingFormFilter::new().name(), "reading_form");
    }
}
