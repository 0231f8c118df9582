//! Morpheme data produced by an external morphological analyzer.
//!
//! A [`MorphemeSource`](crate::analysis::source::MorphemeSource) analyzes a
//! text span and returns it split into sentences, each a
//! [`SentenceMorphemes`] list whose morphemes carry offsets relative to the
//! start of their own sentence. The tokenizer turns these into absolute
//! offsets; see [`SentenceFlattener`](crate::analysis::tokenizer::flatten::SentenceFlattener).
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::morpheme::{Morpheme, PartOfSpeech, SentenceMorphemes};
//!
//! let pos = PartOfSpeech::new(["名詞", "普通名詞", "一般"]).unwrap();
//! let sumomo = Morpheme::new("すもも", 0, 3).with_part_of_speech(pos);
//! let sentence = SentenceMorphemes::new(vec![sumomo]);
//!
//! assert_eq!(sentence.len(), 3);
//! assert_eq!(sentence.morphemes()[0].part_of_speech().get(0), Some("名詞"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WakachiError};

/// Maximum number of fields in a part-of-speech tuple.
pub const MAX_POS_FIELDS: usize = 6;

/// Value used by dictionaries for an unspecified part-of-speech cell.
pub const POS_WILDCARD: &str = "*";

/// Hierarchical part-of-speech classification, coarse to fine.
///
/// Holds at most [`MAX_POS_FIELDS`] fields. Dictionaries usually fill
/// unknown cells with `"*"`; that value has no special meaning here and is
/// compared like any other string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PartOfSpeech {
    fields: Vec<String>,
}

impl PartOfSpeech {
    /// Create a part-of-speech tuple, failing if it has more than six fields.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.len() > MAX_POS_FIELDS {
            return Err(WakachiError::invalid_argument(format!(
                "part of speech has {} fields, at most {} are allowed: {}",
                fields.len(),
                MAX_POS_FIELDS,
                fields.join(",")
            )));
        }
        Ok(PartOfSpeech { fields })
    }

    /// Get the field at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Get all fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the tuple has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Vec<String>> for PartOfSpeech {
    type Error = WakachiError;

    fn try_from(fields: Vec<String>) -> Result<Self> {
        PartOfSpeech::new(fields)
    }
}

impl From<PartOfSpeech> for Vec<String> {
    fn from(pos: PartOfSpeech) -> Self {
        pos.fields
    }
}

impl FromStr for PartOfSpeech {
    type Err = WakachiError;

    /// Parse a comma-joined tuple such as `名詞,普通名詞,一般`.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(PartOfSpeech::default());
        }
        PartOfSpeech::new(s.split(',').map(str::trim))
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(","))
    }
}

/// A single morpheme as returned by the morpheme source.
///
/// `begin` and `end` are character (Unicode scalar value) offsets relative to
/// the start of the sentence the morpheme belongs to. When deserialized, a
/// missing normalized or dictionary form defaults to the surface text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MorphemeRecord")]
pub struct Morpheme {
    /// Start offset within the owning sentence
    pub begin: usize,

    /// End offset (exclusive) within the owning sentence
    pub end: usize,

    /// Text as it appears in the input
    pub surface: String,

    /// Canonical spelling used for matching
    pub normalized_form: String,

    /// Dictionary (lemma) form
    pub dictionary_form: String,

    /// Reading in katakana
    pub reading_form: String,

    /// Part-of-speech tuple
    pub part_of_speech: PartOfSpeech,

    /// Whether the analyzer produced this morpheme for an unknown word
    pub oov: bool,

    /// Dictionary word id
    pub word_id: u32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MorphemeRecord {
    begin: usize,
    end: usize,
    surface: String,
    #[serde(default)]
    normalized_form: Option<String>,
    #[serde(default)]
    dictionary_form: Option<String>,
    #[serde(default)]
    reading_form: String,
    #[serde(default)]
    part_of_speech: PartOfSpeech,
    #[serde(default)]
    oov: bool,
    #[serde(default)]
    word_id: u32,
}

impl From<MorphemeRecord> for Morpheme {
    fn from(record: MorphemeRecord) -> Self {
        Morpheme {
            normalized_form: record.normalized_form.unwrap_or_else(|| record.surface.clone()),
            dictionary_form: record.dictionary_form.unwrap_or_else(|| record.surface.clone()),
            begin: record.begin,
            end: record.end,
            surface: record.surface,
            reading_form: record.reading_form,
            part_of_speech: record.part_of_speech,
            oov: record.oov,
            word_id: record.word_id,
        }
    }
}

impl Morpheme {
    /// Create a morpheme whose forms all default to the surface text.
    pub fn new<S: Into<String>>(surface: S, begin: usize, end: usize) -> Self {
        let surface = surface.into();
        Morpheme {
            begin,
            end,
            normalized_form: surface.clone(),
            dictionary_form: surface.clone(),
            reading_form: String::new(),
            surface,
            part_of_speech: PartOfSpeech::default(),
            oov: false,
            word_id: 0,
        }
    }

    pub fn with_normalized_form<S: Into<String>>(mut self, form: S) -> Self {
        self.normalized_form = form.into();
        self
    }

    pub fn with_dictionary_form<S: Into<String>>(mut self, form: S) -> Self {
        self.dictionary_form = form.into();
        self
    }

    pub fn with_reading_form<S: Into<String>>(mut self, form: S) -> Self {
        self.reading_form = form.into();
        self
    }

    pub fn with_part_of_speech(mut self, pos: PartOfSpeech) -> Self {
        self.part_of_speech = pos;
        self
    }

    pub fn with_oov(mut self, oov: bool) -> Self {
        self.oov = oov;
        self
    }

    pub fn with_word_id(mut self, word_id: u32) -> Self {
        self.word_id = word_id;
        self
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn normalized_form(&self) -> &str {
        &self.normalized_form
    }

    pub fn dictionary_form(&self) -> &str {
        &self.dictionary_form
    }

    pub fn reading_form(&self) -> &str {
        &self.reading_form
    }

    pub fn part_of_speech(&self) -> &PartOfSpeech {
        &self.part_of_speech
    }

    pub fn is_oov(&self) -> bool {
        self.oov
    }
}

/// The morphemes of one sentence, in order, plus the sentence length.
///
/// When deserialized, a missing `length` defaults to the end offset of the
/// last morpheme and the sentence is checked with
/// [`validate`](SentenceMorphemes::validate).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SentenceRecord")]
pub struct SentenceMorphemes {
    morphemes: Vec<Morpheme>,
    length: usize,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SentenceRecord {
    morphemes: Vec<Morpheme>,
    #[serde(default)]
    length: Option<usize>,
}

impl TryFrom<SentenceRecord> for SentenceMorphemes {
    type Error = WakachiError;

    fn try_from(record: SentenceRecord) -> Result<Self> {
        let sentence = match record.length {
            Some(length) => SentenceMorphemes {
                morphemes: record.morphemes,
                length,
            },
            None => SentenceMorphemes::new(record.morphemes),
        };
        sentence.validate()?;
        Ok(sentence)
    }
}

impl SentenceMorphemes {
    /// Create a sentence whose length is the end offset of its last morpheme.
    pub fn new(morphemes: Vec<Morpheme>) -> Self {
        let length = morphemes.last().map(|m| m.end).unwrap_or(0);
        SentenceMorphemes { morphemes, length }
    }

    /// Create a sentence with an explicit length in characters.
    ///
    /// Use this when the sentence has characters not covered by any morpheme,
    /// e.g. an empty sentence consisting only of skipped whitespace.
    pub fn with_length(morphemes: Vec<Morpheme>, length: usize) -> Self {
        debug_assert!(
            morphemes.last().is_none_or(|m| m.end <= length),
            "sentence length {length} is shorter than its last morpheme"
        );
        SentenceMorphemes { morphemes, length }
    }

    pub fn morphemes(&self) -> &[Morpheme] {
        &self.morphemes
    }

    /// Sentence length in characters.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn into_parts(self) -> (Vec<Morpheme>, usize) {
        (self.morphemes, self.length)
    }

    /// Check that the morphemes are ordered, do not overlap, and lie within
    /// the sentence.
    pub fn validate(&self) -> Result<()> {
        let mut previous_end = 0;
        for m in &self.morphemes {
            if m.begin > m.end {
                return Err(WakachiError::invalid_argument(format!(
                    "morpheme '{}' ends at {} before it begins at {}",
                    m.surface, m.end, m.begin
                )));
            }
            if m.begin < previous_end {
                return Err(WakachiError::invalid_argument(format!(
                    "morpheme '{}' at {} starts before the previous one ends at {previous_end}",
                    m.surface, m.begin
                )));
            }
            if m.end > self.length {
                return Err(WakachiError::invalid_argument(format!(
                    "morpheme '{}' ends at {}, past the sentence length {}",
                    m.surface, m.end, self.length
                )));
            }
            previous_end = m.end;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_of_speech_limits() {
        let pos = PartOfSpeech::new(["動詞", "一般", "*", "*", "五段-ラ行", "連用形-促音便"]).unwrap();
        assert_eq!(pos.len(), 6);
        assert_eq!(pos.get(4), Some("五段-ラ行"));
        assert_eq!(pos.get(6), None);

        let err = PartOfSpeech::new(["a", "b", "c", "d", "e", "f", "g"]).unwrap_err();
        assert!(err.to_string().contains("7 fields"));
    }

    #[test]
    fn test_part_of_speech_parse_and_display() {
        let pos: PartOfSpeech = "名詞, 固有名詞 ,人名".parse().unwrap();
        assert_eq!(pos.fields(), &["名詞", "固有名詞", "人名"]);
        assert_eq!(pos.to_string(), "名詞,固有名詞,人名");

        let empty: PartOfSpeech = "".parse().unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_morpheme_defaults_to_surface() {
        let m = Morpheme::new("東京", 0, 2);
        assert_eq!(m.surface(), "東京");
        assert_eq!(m.normalized_form(), "東京");
        assert_eq!(m.dictionary_form(), "東京");
        assert_eq!(m.reading_form(), "");
        assert!(!m.is_oov());
    }

    #[test]
    fn test_sentence_length() {
        let sentence = SentenceMorphemes::new(vec![Morpheme::new("a", 0, 1), Morpheme::new("b", 2, 3)]);
        assert_eq!(sentence.len(), 3);

        let empty = SentenceMorphemes::with_length(Vec::new(), 2);
        assert_eq!(empty.len(), 2);
        assert!(empty.morphemes().is_empty());
        assert!(SentenceMorphemes::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_sentence_validate() {
        let ok = SentenceMorphemes::with_length(vec![Morpheme::new("a", 0, 1), Morpheme::new("b", 2, 3)], 4);
        assert!(ok.validate().is_ok());

        let past_end = SentenceMorphemes {
            morphemes: vec![Morpheme::new("abc", 0, 3)],
            length: 1,
        };
        assert!(past_end.validate().unwrap_err().to_string().contains("past the sentence length"));

        let backwards = SentenceMorphemes::new(vec![Morpheme::new("b", 1, 2), Morpheme::new("a", 0, 1)]);
        assert!(backwards.validate().is_err());

        let overlapping = SentenceMorphemes::new(vec![Morpheme::new("ab", 0, 2), Morpheme::new("bc", 1, 3)]);
        assert!(overlapping.validate().is_err());

        let inverted = SentenceMorphemes::new(vec![Morpheme::new("x", 2, 1)]);
        assert!(inverted.validate().unwrap_err().to_string().contains("before it begins"));
    }

    #[test]
    fn test_sentence_json() {
        let implicit = r#"{"morphemes":[{"begin":0,"end":2,"surface":"もも"}]}"#;
        let sentence: SentenceMorphemes = serde_json::from_str(implicit).unwrap();
        assert_eq!(sentence.len(), 2);

        let explicit = r#"{"morphemes":[{"begin":0,"end":2,"surface":"もも"}],"length":3}"#;
        let sentence: SentenceMorphemes = serde_json::from_str(explicit).unwrap();
        assert_eq!(sentence.len(), 3);

        let too_short = r#"{"morphemes":[{"begin":0,"end":3,"surface":"abc"}],"length":1}"#;
        assert!(serde_json::from_str::<SentenceMorphemes>(too_short).is_err());

        let unknown = r#"{"morphemes":[],"size":1}"#;
        assert!(serde_json::from_str::<SentenceMorphemes>(unknown).is_err());
    }

    #[test]
    fn test_morpheme_json() {
        let json = r#"{"begin":0,"end":3,"surface":"すもも","part_of_speech":["名詞","一般"]}"#;
        let m: Morpheme = serde_json::from_str(json).unwrap();
        assert_eq!(m.surface(), "すもも");
        assert_eq!(m.part_of_speech().get(1), Some("一般"));
        assert_eq!(m.dictionary_form(), "すもも");
        assert_eq!(m.normalized_form(), "すもも");
        assert_eq!(m.reading_form(), "");

        let with_forms = r#"{"begin":0,"end":2,"surface":"行っ","dictionary_form":"行く"}"#;
        let m: Morpheme = serde_json::from_str(with_forms).unwrap();
        assert_eq!(m, Morpheme::new("行っ", 0, 2).with_dictionary_form("行く"));

        let unknown = r#"{"begin":0,"end":1,"surface":"x","lemma":"y"}"#;
        assert!(serde_json::from_str::<Morpheme>(unknown).is_err());

        let too_long = r#"{"begin":0,"end":1,"surface":"x","part_of_speech":["1","2","3","4","5","6","7"]}"#;
        assert!(serde_json::from_str::<Morpheme>(too_long).is_err());
    }
}
