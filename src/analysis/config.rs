//! Configuration for analysis pipelines.
//!
//! An [`AnalyzerConfig`] describes a tokenizer and an ordered list of
//! filters as JSON:
//!
//! ```json
//! {
//!   "tokenizer": { "split_mode": "search", "discard_punctuation": true },
//!   "filters": [
//!     { "type": "base_form" },
//!     { "type": "pos_stop", "stop_tags": ["助詞", "名詞,非自立"] },
//!     { "type": "katakana_stem", "minimum_length": 4 },
//!     { "type": "lowercase" }
//!   ]
//! }
//! ```
//!
//! Every option is validated when the pipeline is built. Unknown filter
//! types, unknown option keys and invalid values are reported as
//! [`WakachiError::Configuration`] naming the offending filter and key.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use wakachi::analysis::config::AnalyzerConfig;
//! use wakachi::analysis::source::StaticMorphemeSource;
//!
//! let config = AnalyzerConfig::from_json_str(
//!     r#"{ "filters": [{ "type": "katakana_stem", "minimum_length": 1 }] }"#,
//! )
//! .unwrap();
//!
//! let err = config.build(Arc::new(StaticMorphemeSource::new())).unwrap_err();
//! assert!(err.is_configuration());
//! assert!(err.to_string().contains("minimum_length"));
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::source::{MorphemeSource, SplitMode};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::form::{
    BaseFormFilter, NormalizedFormFilter, ReadingFormFilter, SurfaceFormFilter,
};
use crate::analysis::token_filter::hiragana_uppercase::HiraganaUppercaseFilter;
use crate::analysis::token_filter::katakana_stem::{DEFAULT_MINIMUM_LENGTH, KatakanaStemFilter};
use crate::analysis::token_filter::katakana_uppercase::KatakanaUppercaseFilter;
use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::pos_stop::PartOfSpeechStopFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::morphological::MorphologicalTokenizer;
use crate::error::{Result, WakachiError};

/// Filter type names accepted in the `"type"` key.
pub const FILTER_TYPES: &[&str] = &[
    "base_form",
    "normalized_form",
    "surface_form",
    "reading_form",
    "hiragana_uppercase",
    "katakana_uppercase",
    "katakana_stem",
    "pos_stop",
    "stop",
    "keyword_marker",
    "lowercase",
];

/// Tokenizer settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Split mode passed to the morpheme source.
    pub split_mode: SplitMode,
    /// Whether punctuation morphemes are skipped.
    pub discard_punctuation: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            split_mode: SplitMode::Search,
            discard_punctuation: true,
        }
    }
}

/// A complete pipeline description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Optional pipeline name, used in logs and `Debug` output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub tokenizer: TokenizerConfig,
    /// Filter entries, each an object with a `"type"` key and its options.
    pub filters: Vec<Map<String, Value>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoOptions {}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KatakanaStemOptions {
    #[serde(default = "default_minimum_length")]
    minimum_length: usize,
}

fn default_minimum_length() -> usize {
    DEFAULT_MINIMUM_LENGTH
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PosStopOptions {
    #[serde(default)]
    stop_tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StopOptions {
    #[serde(default)]
    words: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordMarkerOptions {
    keywords: Vec<String>,
}

impl AnalyzerConfig {
    /// Parse a configuration from JSON.
    ///
    /// Unknown keys and ill-typed values are configuration errors; malformed
    /// JSON is a [`WakachiError::Json`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => WakachiError::invalid_config(e.to_string()),
            _ => WakachiError::Json(e),
        })
    }

    /// Read and parse a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize back to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append a filter entry of the given type with no options.
    pub fn push_filter<S: Into<String>>(mut self, filter_type: S) -> Self {
        let mut entry = Map::new();
        entry.insert("type".to_string(), Value::String(filter_type.into()));
        self.filters.push(entry);
        self
    }

    /// Build every filter without building the tokenizer.
    pub fn validate(&self) -> Result<()> {
        self.build_filters().map(|_| ())
    }

    /// Build the filters in order.
    pub fn build_filters(&self) -> Result<Vec<Arc<dyn Filter>>> {
        self.filters
            .iter()
            .enumerate()
            .map(|(index, entry)| build_filter(index, entry))
            .collect()
    }

    /// Build a pipeline over `source`.
    pub fn build(&self, source: Arc<dyn MorphemeSource>) -> Result<PipelineAnalyzer> {
        let filters = self.build_filters()?;

        let tokenizer = MorphologicalTokenizer::new(source)
            .with_mode(self.tokenizer.split_mode)
            .discard_punctuation(self.tokenizer.discard_punctuation);
        let mut analyzer = PipelineAnalyzer::new(Arc::new(tokenizer));
        for filter in filters {
            analyzer = analyzer.add_filter(filter);
        }
        if let Some(name) = &self.name {
            analyzer = analyzer.with_name(name.clone());
        }

        debug!(
            "built pipeline {:?} ({} mode, discard_punctuation={})",
            analyzer.filter_names(),
            self.tokenizer.split_mode,
            self.tokenizer.discard_punctuation
        );
        Ok(analyzer)
    }
}

/// Prefix configuration errors with the filter that raised them.
fn in_filter(filter_type: &str, err: WakachiError) -> WakachiError {
    match err {
        WakachiError::Configuration(msg) => {
            WakachiError::invalid_config(format!("{filter_type}: {msg}"))
        }
        other => other,
    }
}

fn options<T: DeserializeOwned>(filter_type: &str, entry: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(entry))
        .map_err(|e| WakachiError::invalid_config(format!("{filter_type}: {e}")))
}

/// Build one filter from its configuration entry.
fn build_filter(index: usize, entry: &Map<String, Value>) -> Result<Arc<dyn Filter>> {
    let mut entry = entry.clone();
    let filter_type = match entry.remove("type") {
        Some(Value::String(filter_type)) => filter_type,
        Some(other) => {
            return Err(WakachiError::invalid_config(format!(
                "filter #{index}: 'type' must be a string, got {other}"
            )));
        }
        None => {
            return Err(WakachiError::invalid_config(format!(
                "filter #{index}: missing 'type'"
            )));
        }
    };
    let kind = filter_type.as_str();

    let filter: Arc<dyn Filter> = match kind {
        "base_form" | "normalized_form" | "surface_form" | "reading_form"
        | "hiragana_uppercase" | "katakana_uppercase" | "lowercase" => {
            options::<NoOptions>(kind, entry)?;
            match kind {
                "base_form" => Arc::new(BaseFormFilter::new()),
                "normalized_form" => Arc::new(NormalizedFormFilter::new()),
                "surface_form" => Arc::new(SurfaceFormFilter::new()),
                "reading_form" => Arc::new(ReadingFormFilter::new()),
                "hiragana_uppercase" => Arc::new(HiraganaUppercaseFilter::new()),
                "katakana_uppercase" => Arc::new(KatakanaUppercaseFilter::new()),
                _ => Arc::new(LowercaseFilter::new()),
            }
        }
        "katakana_stem" => {
            let opts: KatakanaStemOptions = options(kind, entry)?;
            Arc::new(
                KatakanaStemFilter::with_minimum_length(opts.minimum_length)
                    .map_err(|e| in_filter(kind, e))?,
            )
        }
        "pos_stop" => {
            let opts: PosStopOptions = options(kind, entry)?;
            let filter = match opts.stop_tags {
                Some(tags) => {
                    PartOfSpeechStopFilter::from_tags(&tags).map_err(|e| in_filter(kind, e))?
                }
                None => PartOfSpeechStopFilter::with_default_tags(),
            };
            Arc::new(filter)
        }
        "stop" => {
            let opts: StopOptions = options(kind, entry)?;
            Arc::new(match opts.words {
                Some(words) => StopFilter::from_words(words),
                None => StopFilter::new(),
            })
        }
        "keyword_marker" => {
            let opts: KeywordMarkerOptions = options(kind, entry)?;
            Arc::new(KeywordMarkerFilter::from_words(opts.keywords))
        }
        unknown => {
            return Err(WakachiError::invalid_config(format!(
                "filter #{index}: unknown filter type '{unknown}', expected one of {}",
                FILTER_TYPES.join(", ")
            )));
        }
    };

    debug!("filter #{index}: {}", filter.name());
    Ok(filter)
}
