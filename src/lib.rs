//! # Morphkit
//!
//! An embedding layer around a morphological analysis engine.
//!
//! ## Features
//!
//! - Lazily compiled engine, rebuilt only after the dictionary changes
//! - Ordered streaming analysis with a bounded prefetch window
//! - Token offsets in codepoints, repaired from the engine's UTF-16 units
//! - User dictionaries, dictionary files and corpus word extraction
//! - A built-in lexicon engine with k-best lattice search

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod reader;
pub mod stream;

pub mod prelude {
    pub use crate::analysis::{Candidate, MatchOptions, Morpheme, PosTag, Token};
    pub use crate::analyzer::Analyzer;
    pub use crate::config::{AnalyzeOptions, AnalyzerConfig, ExtractParams};
    pub use crate::engine::{ExtractedWord, MorphBuilder, MorphEngine};
    pub use crate::error::{MorphkitError, Result};
    pub use crate::stream::AnalysisStream;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
