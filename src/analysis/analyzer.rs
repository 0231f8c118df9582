//! Analyzer implementations that combine tokenizers and filters.
//!
//! - [`analyzer::Analyzer`] - The analyzer trait
//! - [`pipeline::PipelineAnalyzer`] - A tokenizer followed by an ordered filter chain
//! - [`language::japanese::JapaneseAnalyzer`] - The standard Japanese search pipeline

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod language;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use language::japanese::JapaneseAnalyzer;
pub use pipeline::PipelineAnalyzer;
