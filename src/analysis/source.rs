//! Morpheme sources: the boundary to the external morphological analyzer.
//!
//! The analyzer itself (dictionary loading, lattice search, segmentation) is
//! not part of this crate. It is reached through the [`MorphemeSource`]
//! trait, which turns a text span into a lazy sequence of sentences.
//!
//! - [`StaticMorphemeSource`] replays pre-analyzed sentences (fixtures, tests, benchmarks)
//! - [`SourceCache`] shares loaded sources between analyzers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::morpheme::SentenceMorphemes;
use crate::error::{Result, WakachiError};

pub mod cache;
pub mod static_source;

pub use cache::SourceCache;
pub use static_source::StaticMorphemeSource;

/// Lazy, finite sequence of analyzed sentences.
pub type SentenceStream = Box<dyn Iterator<Item = SentenceMorphemes>>;

/// Split granularity requested from the analyzer.
///
/// The tokenizer passes this through without interpreting it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Short units (mode A)
    #[default]
    #[serde(alias = "A", alias = "a")]
    Search,
    /// Middle units (mode B)
    #[serde(alias = "B", alias = "b")]
    Normal,
    /// Long, named-entity sized units (mode C)
    #[serde(alias = "C", alias = "c")]
    Extended,
}

impl SplitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMode::Search => "search",
            SplitMode::Normal => "normal",
            SplitMode::Extended => "extended",
        }
    }
}

impl FromStr for SplitMode {
    type Err = WakachiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "search" | "A" | "a" => Ok(SplitMode::Search),
            "normal" | "B" | "b" => Ok(SplitMode::Normal),
            "extended" | "C" | "c" => Ok(SplitMode::Extended),
            _ => Err(WakachiError::invalid_config(format!(
                "unknown split mode '{s}', expected one of search, normal, extended"
            ))),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to produce sentence-segmented morphemes for a text span.
///
/// Implementations must report morpheme offsets in characters relative to
/// the start of each sentence, and the sentence lengths must add up to the
/// number of characters in `text`.
pub trait MorphemeSource: Send + Sync {
    /// Analyze `text` and return its sentences in order.
    fn analyze(&self, text: &str, mode: SplitMode) -> Result<SentenceStream>;

    /// Get the name of this source (for debugging and configuration).
    fn name(&self) -> &'static str;
}
