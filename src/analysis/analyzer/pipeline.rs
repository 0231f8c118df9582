//! Pipeline analyzer that combines a tokenizer and filters.
//!
//! This is the main building block for custom analyzers, and what an
//! [`AnalyzerConfig`](crate::analysis::config::AnalyzerConfig) builds.
//! Filters are applied in the order they were added; the resulting stream is
//! lazy, so no stage does any work until the caller pulls tokens.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use wakachi::analysis::analyzer::analyzer::Analyzer;
//! use wakachi::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use wakachi::analysis::morpheme::{Morpheme, SentenceMorphemes};
//! use wakachi::analysis::source::StaticMorphemeSource;
//! use wakachi::analysis::token_filter::lowercase::LowercaseFilter;
//! use wakachi::analysis::token_filter::stop::StopFilter;
//! use wakachi::analysis::tokenizer::morphological::MorphologicalTokenizer;
//!
//! let source = StaticMorphemeSource::new()
//!     .with_text("Rustの本", vec![SentenceMorphemes::new(vec![
//!         Morpheme::new("Rust", 0, 4),
//!         Morpheme::new("の", 4, 5),
//!         Morpheme::new("本", 5, 6),
//!     ])])
//!     .unwrap();
//!
//! let tokenizer = Arc::new(MorphologicalTokenizer::new(Arc::new(source)));
//! let analyzer = PipelineAnalyzer::new(tokenizer)
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["の"])))
//!     .with_name("my_custom_analyzer");
//!
//! let tokens: Vec<_> = analyzer.analyze("Rustの本").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "rust");
//! assert_eq!(tokens[1].text, "本");
//! ```

use std::sync::Arc;

use log::trace;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::{TokenStream, TrackedTokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Names of the filters, in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// The configured name of this pipeline.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        Ok(self.analyze_tracked(text)?.into_tokens())
    }

    fn analyze_tracked(&self, text: &str) -> Result<TrackedTokenStream> {
        trace!("{}: analyzing {} chars", self.name, text.chars().count());

        let mut stream = self.tokenizer.tracked_stream(text)?;
        for filter in &self.filters {
            stream = stream.map_tokens(|tokens| filter.filter(tokens))?;
        }
        Ok(stream)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &self.filter_names())
            .finish()
    }
}
