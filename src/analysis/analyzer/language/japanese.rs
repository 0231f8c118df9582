//! Japanese language analyzer implementation.
//!
//! # Pipeline
//!
//! 1. Morphological tokenizer (search mode, punctuation discarded)
//! 2. Base form filter
//! 3. Part-of-speech stop filter
//! 4. Japanese stop word filter
//! 5. Katakana stem filter
//! 6. Lowercase filter
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use wakachi::analysis::analyzer::analyzer::Analyzer;
//! use wakachi::analysis::analyzer::language::japanese::JapaneseAnalyzer;
//! use wakachi::analysis::morpheme::{Morpheme, SentenceMorphemes};
//! use wakachi::analysis::source::StaticMorphemeSource;
//!
//! let noun = "名詞,普通名詞,一般".parse().unwrap();
//! let particle = "助詞,格助詞".parse().unwrap();
//! let source = StaticMorphemeSource::new()
//!     .with_text("コーヒーの味", vec![SentenceMorphemes::new(vec![
//!         Morpheme::new("コーヒー", 0, 4).with_part_of_speech(noun),
//!         Morpheme::new("の", 4, 5).with_part_of_speech(particle),
//!         Morpheme::new("味", 5, 6),
//!     ])])
//!     .unwrap();
//!
//! let analyzer = JapaneseAnalyzer::new(Arc::new(source));
//! let tokens: Vec<_> = analyzer.analyze("コーヒーの味").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "コーヒ");
//! assert_eq!(tokens[1].text, "味");
//! ```

use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::source::{MorphemeSource, SplitMode};
use crate::analysis::token::{TokenStream, TrackedTokenStream};
use crate::analysis::token_filter::form::BaseFormFilter;
use crate::analysis::token_filter::katakana_stem::KatakanaStemFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::pos_stop::PartOfSpeechStopFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::morphological::MorphologicalTokenizer;
use crate::error::Result;

/// Analyzer for Japanese search text.
///
/// Stop tags default to
/// [`DEFAULT_STOP_TAGS`](crate::analysis::token_filter::pos_stop::DEFAULT_STOP_TAGS) and the katakana stem minimum
/// length to 4; both can be replaced. The stage order is fixed.
pub struct JapaneseAnalyzer {
    source: Arc<dyn MorphemeSource>,
    pos_stop: PartOfSpeechStopFilter,
    katakana_stem: KatakanaStemFilter,
    inner: PipelineAnalyzer,
}

impl JapaneseAnalyzer {
    /// Create a new Japanese analyzer with default settings over `source`.
    pub fn new(source: Arc<dyn MorphemeSource>) -> Self {
        let pos_stop = PartOfSpeechStopFilter::with_default_tags();
        let katakana_stem = KatakanaStemFilter::new();
        let inner = Self::build(&source, &pos_stop, &katakana_stem);
        JapaneseAnalyzer {
            source,
            pos_stop,
            katakana_stem,
            inner,
        }
    }

    /// Replace the part-of-speech stop tags.
    ///
    /// Fails if any tag is not a valid pattern.
    pub fn with_stop_tags<I, S>(mut self, tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pos_stop = PartOfSpeechStopFilter::from_tags(tags)?;
        self.inner = Self::build(&self.source, &self.pos_stop, &self.katakana_stem);
        Ok(self)
    }

    /// Set the katakana stem minimum length.
    ///
    /// Fails if `minimum_length` is less than 2.
    pub fn with_minimum_length(mut self, minimum_length: usize) -> Result<Self> {
        self.katakana_stem = KatakanaStemFilter::with_minimum_length(minimum_length)?;
        self.inner = Self::build(&self.source, &self.pos_stop, &self.katakana_stem);
        Ok(self)
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    fn build(
        source: &Arc<dyn MorphemeSource>,
        pos_stop: &PartOfSpeechStopFilter,
        katakana_stem: &KatakanaStemFilter,
    ) -> PipelineAnalyzer {
        debug!(
            "japanese analyzer: {} stop tags, katakana minimum length {}",
            pos_stop.matcher().len(),
            katakana_stem.minimum_length()
        );
        let tokenizer = MorphologicalTokenizer::new(Arc::clone(source))
            .with_mode(SplitMode::Search)
            .discard_punctuation(true);

        PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(BaseFormFilter::new()))
            .add_filter(Arc::new(pos_stop.clone()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(katakana_stem.clone()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("japanese")
    }
}

impl Analyzer for JapaneseAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn analyze_tracked(&self, text: &str) -> Result<TrackedTokenStream> {
        self.inner.analyze_tracked(text)
    }

    fn name(&self) -> &'static str {
        "japanese"
    }
}

impl Debug for JapaneseAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JapaneseAnalyzer")
            .field("source", &self.source.name())
            .field("stop_tags", &self.pos_stop.matcher().len())
            .field("minimum_length", &self.katakana_stem.minimum_length())
            .field("inner", &self.inner)
            .finish()
    }
}
