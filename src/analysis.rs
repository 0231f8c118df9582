//! Text analysis module for Wakachi.
//!
//! This module turns the output of a morphological analyzer into a search
//! token stream:
//!
//! ```text
//! MorphemeSource → SentenceFlattener → PunctuationSkipping → Tokenizer → Filters
//! ```
//!
//! - [`morpheme`] - Morphemes, part-of-speech tuples and analyzed sentences
//! - [`token`] - Tokens and token streams
//! - [`source`] - The boundary to the external analyzer
//! - [`tokenizer`] - Offset flattening, punctuation skipping, tokenization
//! - [`token_filter`] - Japanese normalization and selection filters
//! - [`analyzer`] - Pipelines that combine a tokenizer with filters
//! - [`config`] - JSON pipeline configuration

pub mod analyzer;
pub mod config;
pub mod morpheme;
pub mod source;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, JapaneseAnalyzer, PipelineAnalyzer};
pub use config::{AnalyzerConfig, TokenizerConfig};
pub use morpheme::{Morpheme, PartOfSpeech, SentenceMorphemes};
pub use source::{MorphemeSource, SourceCache, SplitMode, StaticMorphemeSource};
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
