//! Flattening of per-sentence morpheme lists into one sequence.

use std::iter::FusedIterator;
use std::vec;

use super::MorphemeCursor;
use crate::analysis::morpheme::{Morpheme, SentenceMorphemes};

/// Yields the morphemes of every sentence in order, tracking the absolute
/// offset of the sentence currently being read.
///
/// When a sentence runs out of morphemes its length is added to the base
/// offset before the next sentence is loaded, so sentences without any
/// morpheme still move the offset forward.
pub struct SentenceFlattener<I> {
    sentences: I,
    current: vec::IntoIter<Morpheme>,
    current_len: usize,
    base_offset: usize,
    finished: bool,
}

impl<I> SentenceFlattener<I>
where
    I: Iterator<Item = SentenceMorphemes>,
{
    pub fn new<S>(sentences: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        SentenceFlattener {
            sentences: sentences.into_iter(),
            current: Vec::new().into_iter(),
            current_len: 0,
            base_offset: 0,
            finished: false,
        }
    }

    /// True once every sentence has been consumed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<I> Iterator for SentenceFlattener<I>
where
    I: Iterator<Item = SentenceMorphemes>,
{
    type Item = Morpheme;

    fn next(&mut self) -> Option<Morpheme> {
        if self.finished {
            return None;
        }
        loop {
            if let Some(morpheme) = self.current.next() {
                assert!(
                    morpheme.end <= self.current_len,
                    "morpheme {:?} ends past its sentence",
                    morpheme.surface
                );
                return Some(morpheme);
            }

            self.base_offset += self.current_len;
            self.current_len = 0;

            match self.sentences.next() {
                Some(sentence) => {
                    let (morphemes, length) = sentence.into_parts();
                    self.current = morphemes.into_iter();
                    self.current_len = length;
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

impl<I> FusedIterator for SentenceFlattener<I> where I: Iterator<Item = SentenceMorphemes> {}

impl<I> MorphemeCursor for SentenceFlattener<I>
where
    I: Iterator<Item = SentenceMorphemes>,
{
    fn base_offset(&self) -> usize {
        self.base_offset
    }
}
