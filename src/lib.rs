//! # Wakachi
//!
//! Offset-correct token streams and Japanese normalization filters over the
//! output of a morphological analyzer.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Sentence-by-sentence analysis flattened into one stream with absolute
//!   character offsets
//! - Punctuation skipping
//! - Small kana normalization, katakana long-vowel stemming
//! - Hierarchical part-of-speech stop tags
//! - Base, normalized, surface and reading form rewriting
//! - JSON-configurable pipelines
//!
//! The morphological analyzer itself is external and plugs in through
//! [`analysis::source::MorphemeSource`].

pub mod analysis;
pub mod error;

pub mod prelude {
    pub use crate::analysis::analyzer::Analyzer;
    pub use crate::analysis::token_filter::Filter;
    pub use crate::analysis::tokenizer::Tokenizer;
    pub use crate::error::{Result, WakachiError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
