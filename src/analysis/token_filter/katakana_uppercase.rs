//! Small katakana normalization filter.
//!
//! Rewrites small katakana, including the Ainu small letters of the Katakana
//! Phonetic Extensions block, to their normal-size letters. The sequence
//! `ㇷ゚` (small FU followed by the combining semi-voiced mark) has no
//! precomposed small form and is collapsed to the single letter `プ`, so the
//! term becomes one character shorter.
//!
//! Like the hiragana variant this is lossy, meant for historical texts, and
//! applies to keyword tokens too.

use std::iter::Peekable;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

const SMALL_FU: char = 'ㇷ';
const COMBINING_HANDAKUTEN: char = '\u{309A}';

/// Map a small katakana letter to its normal-size counterpart.
pub fn to_normal_katakana(c: char) -> Option<char> {
    let mapped = match c {
        'ァ' => 'ア',
        'ィ' => 'イ',
        'ゥ' => 'ウ',
        'ェ' => 'エ',
        'ォ' => 'オ',
        'ヵ' => 'カ',
        'ㇰ' => 'ク',
        'ヶ' => 'ケ',
        'ㇱ' => 'シ',
        'ㇲ' => 'ス',
        'ッ' => 'ツ',
        'ㇳ' => 'ト',
        'ㇴ' => 'ヌ',
        'ㇵ' => 'ハ',
        'ㇶ' => 'ヒ',
        'ㇷ' => 'フ',
        'ㇸ' => 'ヘ',
        'ㇹ' => 'ホ',
        'ㇺ' => 'ム',
        'ャ' => 'ヤ',
        'ュ' => 'ユ',
        'ョ' => 'ヨ',
        'ㇻ' => 'ラ',
        'ㇼ' => 'リ',
        'ㇽ' => 'ル',
        'ㇾ' => 'レ',
        'ㇿ' => 'ロ',
        'ヮ' => 'ワ',
        _ => return None,
    };
    Some(mapped)
}

/// Iterator adapter producing the normalized characters of a term.
struct NormalKatakana<I: Iterator<Item = char>> {
    chars: Peekable<I>,
}

impl<I: Iterator<Item = char>> Iterator for NormalKatakana<I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == SMALL_FU && self.chars.next_if_eq(&COMBINING_HANDAKUTEN).is_some() {
            return Some('プ');
        }
        Some(to_normal_katakana(c).unwrap_or(c))
    }
}

/// A filter that normalizes small katakana letters to normal size.
///
/// # Examples
///
/// ```
/// use wakachi::analysis::token::Token;
/// use wakachi::analysis::token_filter::Filter;
/// use wakachi::analysis::token_filter::katakana_uppercase::KatakanaUppercaseFilter;
///
/// let tokens = vec![Token::new("カㇷ゚ッ", 0)];
/// let result: Vec<_> = KatakanaUppercaseFilter::new()
///     .filter(Box::new(tokens.into_iter()))
///     .unwrap()
///     .collect();
///
/// assert_eq!(result[0].text, "カプツ");
/// ```
#[derive(Clone, Debug, Default)]
pub struct KatakanaUppercaseFilter;

impl KatakanaUppercaseFilter {
    pub fn new() -> Self {
        KatakanaUppercaseFilter
    }

    /// Normalize a single term.
    pub fn normalize(term: &str) -> String {
        NormalKatakana {
            chars: term.chars().peekable(),
        }
        .collect()
    }
}

impl Filter for KatakanaUppercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if token.text.chars().any(|c| to_normal_katakana(c).is_some()) {
                token.text = Self::normalize(&token.text);
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "katakana_uppercase"
    }
}
