//! Punctuation classification and the punctuation-skipping cursor.

use std::iter::FusedIterator;

use super::MorphemeCursor;
use crate::analysis::morpheme::Morpheme;

/// Latin-1 punctuation marks outside the ASCII range.
const LATIN1_PUNCTUATION: &[char] = &['¡', '§', '«', '¶', '·', '»', '¿'];

/// Returns true if `c` is treated as punctuation.
pub fn is_punctuation_char(c: char) -> bool {
    c.is_ascii_punctuation()
        || c.is_whitespace()
        || LATIN1_PUNCTUATION.contains(&c)
        // Katakana middle dot
        || c == '\u{30FB}'
        // CJK Symbols and Punctuation
        || matches!(c, '\u{3000}'..='\u{303F}')
        // Full-width forms of ASCII punctuation, plus half-width CJK marks
        || matches!(
            c,
            '\u{FF01}'..='\u{FF0F}'
                | '\u{FF1A}'..='\u{FF20}'
                | '\u{FF3B}'..='\u{FF40}'
                | '\u{FF5B}'..='\u{FF65}'
        )
}

/// Returns true if `term` is empty or made up of punctuation only.
pub fn is_punctuation(term: &str) -> bool {
    term.chars().all(is_punctuation_char)
}

/// Cursor decorator that skips morphemes whose normalized form is punctuation.
///
/// The base offset is read straight from the inner cursor, so skipping never
/// changes the offsets of the morphemes that are kept.
pub struct PunctuationSkipping<C> {
    inner: C,
}

impl<C: MorphemeCursor> PunctuationSkipping<C> {
    pub fn new(inner: C) -> Self {
        PunctuationSkipping { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: MorphemeCursor> Iterator for PunctuationSkipping<C> {
    type Item = Morpheme;

    fn next(&mut self) -> Option<Morpheme> {
        self.inner.find(|m| !is_punctuation(m.normalized_form()))
    }
}

impl<C: MorphemeCursor + FusedIterator> FusedIterator for PunctuationSkipping<C> {}

impl<C: MorphemeCursor> MorphemeCursor for PunctuationSkipping<C> {
    fn base_offset(&self) -> usize {
        self.inner.base_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::morpheme::SentenceMorphemes;
    use crate::analysis::tokenizer::flatten::SentenceFlattener;

    #[test]
    fn test_is_punctuation() {
        for term in ["。", "、", "「", "」", "!", "...", "・", "？", "！", "（", "）", "«»", "　", " ", ""] {
            assert!(is_punctuation(term), "{term:?} should be punctuation");
        }
        for term in ["すもも", "A", "1", "ー", "。a", "𠀋"] {
            assert!(!is_punctuation(term), "{term:?} should not be punctuation");
        }
    }

    #[test]
    fn test_skips_punctuation_keeps_offsets() {
        let sentences = vec![
            SentenceMorphemes::new(vec![
                Morpheme::new("「", 0, 1),
                Morpheme::new("猫", 1, 2),
                Morpheme::new("」", 2, 3),
                Morpheme::new("。", 3, 4),
            ]),
            SentenceMorphemes::new(vec![Morpheme::new("犬", 0, 1), Morpheme::new("！", 1, 2)]),
        ];
        let mut cursor = PunctuationSkipping::new(SentenceFlattener::new(sentences));

        let mut seen = Vec::new();
        while let Some(m) = cursor.next() {
            let base = cursor.base_offset();
            seen.push((m.surface.clone(), base + m.begin, base + m.end));
        }

        assert_eq!(seen, vec![("猫".to_string(), 1, 2), ("犬".to_string(), 4, 5)]);
        assert_eq!(cursor.base_offset(), 6);
    }

    #[test]
    fn test_classifies_by_normalized_form() {
        let sentences = vec![SentenceMorphemes::new(vec![
            Morpheme::new("ー", 0, 1).with_normalized_form(""),
            Morpheme::new("～", 1, 2).with_normalized_form("〜"),
            Morpheme::new("!", 2, 3).with_normalized_form("びっくり"),
        ])];

        let kept: Vec<_> = PunctuationSkipping::new(SentenceFlattener::new(sentences))
            .map(|m| m.surface)
            .collect();
        assert_eq!(kept, vec!["!".to_string()]);
    }

    #[test]
    fn test_idempotent_on_punctuation_free_stream() {
        let sentences = vec![
            SentenceMorphemes::new(vec![Morpheme::new("今日", 0, 2), Morpheme::new("晴れ", 2, 4)]),
            SentenceMorphemes::new(vec![Morpheme::new("雨", 0, 1)]),
        ];

        let plain: Vec<_> = SentenceFlattener::new(sentences.clone()).collect();
        let skipped: Vec<_> = PunctuationSkipping::new(SentenceFlattener::new(sentences)).collect();
        assert_eq!(plain, skipped);
    }
}
