//! Morpheme source that replays pre-analyzed sentences.
//!
//! Useful for fixtures and benchmarks: analyze a corpus once with a real
//! analyzer, store the result as JSON, and replay it without loading a
//! dictionary.
//!
//! # JSON format
//!
//! ```json
//! [
//!   {
//!     "text": "もも。",
//!     "sentences": [
//!       {
//!         "morphemes": [
//!           {"begin": 0, "end": 2, "surface": "もも", "part_of_speech": ["名詞", "一般"]},
//!           {"begin": 2, "end": 3, "surface": "。", "part_of_speech": ["記号", "句点"]}
//!         ],
//!         "length": 3
//!       }
//!     ]
//!   }
//! ]
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use log::debug;
use serde::Deserialize;

use super::{MorphemeSource, SentenceStream, SplitMode};
use crate::analysis::morpheme::SentenceMorphemes;
use crate::error::{Result, WakachiError};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalyzedText {
    text: String,
    sentences: Vec<SentenceMorphemes>,
}

/// A morpheme source backed by an in-memory table of analyzed texts.
#[derive(Clone, Debug, Default)]
pub struct StaticMorphemeSource {
    entries: AHashMap<String, Vec<SentenceMorphemes>>,
}

impl StaticMorphemeSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the analysis of `text`.
    ///
    /// Fails if a sentence does not pass [`SentenceMorphemes::validate`], or
    /// if the sentence lengths do not add up to the character length of
    /// `text`.
    pub fn insert<S: Into<String>>(&mut self, text: S, sentences: Vec<SentenceMorphemes>) -> Result<()> {
        let text = text.into();
        for (index, sentence) in sentences.iter().enumerate() {
            sentence
                .validate()
                .map_err(|e| WakachiError::other(format!("{e} (sentence #{index} of '{text}')")))?;
        }
        let expected = text.chars().count();
        let covered: usize = sentences.iter().map(SentenceMorphemes::len).sum();
        if covered != expected {
            return Err(WakachiError::invalid_argument(format!(
                "sentences of '{text}' cover {covered} characters, expected {expected}"
            )));
        }
        self.entries.insert(text, sentences);
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_text<S: Into<String>>(mut self, text: S, sentences: Vec<SentenceMorphemes>) -> Result<Self> {
        self.insert(text, sentences)?;
        Ok(self)
    }

    /// Load analyzed texts from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let analyzed: Vec<AnalyzedText> = serde_json::from_str(json)?;
        let mut source = Self::new();
        for entry in analyzed {
            source.insert(entry.text, entry.sentences)?;
        }
        debug!("loaded {} pre-analyzed texts", source.len());
        Ok(source)
    }

    /// Load analyzed texts from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Number of registered texts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MorphemeSource for StaticMorphemeSource {
    fn analyze(&self, text: &str, _mode: SplitMode) -> Result<SentenceStream> {
        if text.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }
        let sentences = self.entries.get(text).cloned().ok_or_else(|| {
            WakachiError::analysis(format!("no pre-analyzed morphemes for '{text}'"))
        })?;
        Ok(Box::new(sentences.into_iter()))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
