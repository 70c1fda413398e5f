//! Engine seams.
//!
//! The analysis engine is consumed through two traits:
//!
//! - [`MorphBuilder`] - mutable configuration and user dictionary, able to
//!   compile an engine and to run corpus word extraction.
//! - [`MorphEngine`] - the compiled, queryable analyzer with synchronous and
//!   asynchronous analysis.
//!
//! [`cache::EngineCache`] keeps a builder and its lazily compiled engine in
//! step. [`crate::lexicon`] provides the bundled implementation of both traits.
//!
//! # Examples
//!
//! Implementing a trivial engine:
//!
//! ```
//! use morphkit::analysis::{MatchOptions, Morpheme, MorphRef, PosTag, RawCandidate, RawToken};
//! use morphkit::engine::{AnalysisHandle, MorphEngine};
//! use morphkit::error::Result;
//!
//! struct WholeTextEngine;
//!
//! impl MorphEngine for WholeTextEngine {
//!     fn analyze(&self, text: &str, _: usize, _: MatchOptions) -> Result<Vec<RawCandidate>> {
//!         let token = RawToken {
//!             form: text.to_string(),
//!             tag: PosTag::NNG,
//!             position: 0,
//!             length: text.encode_utf16().count() as u32,
//!             morph: MorphRef(0),
//!         };
//!         Ok(vec![RawCandidate { tokens: vec![token], score: 0.0 }])
//!     }
//!
//!     fn analyze_async(&self, text: String, n: usize, m: MatchOptions) -> AnalysisHandle {
//!         AnalysisHandle::ready(self.analyze(&text, n, m))
//!     }
//!
//!     fn morph_to_id(&self, morph: MorphRef) -> usize { morph.0 }
//!     fn id_to_morph(&self, id: usize) -> Option<Morpheme> {
//!         (id == 0).then(|| Morpheme::new("", PosTag::NNG))
//!     }
//!     fn num_workers(&self) -> usize { 1 }
//!     fn cutoff_threshold(&self) -> f32 { 0.0 }
//!     fn set_cutoff_threshold(&mut self, _: f32) {}
//!     fn integrate_allomorph(&self) -> bool { false }
//!     fn set_integrate_allomorph(&mut self, _: bool) {}
//! }
//! ```

pub mod cache;
pub mod handle;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::match_options::MatchOptions;
use crate::analysis::tag::PosTag;
use crate::analysis::token::{Morpheme, MorphRef, RawCandidate};
use crate::config::{EngineTunables, ExtractParams};
use crate::error::Result;

pub use cache::EngineCache;
pub use handle::{AnalysisHandle, HandleSender};

/// A word found by corpus extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedWord {
    /// Surface form
    pub form: String,

    /// Word score in `[0, 1]`
    pub score: f32,

    /// Number of occurrences in the corpus
    pub freq: usize,

    /// Log-likelihood of being a proper noun
    pub pos_score: f32,
}

/// Zero-argument line source consumed by word extraction.
///
/// Each call returns the next line; an empty string marks the end.
pub type LineSource<'a> = dyn FnMut() -> Result<String> + 'a;

/// A compiled morphological analyzer.
///
/// Positions and lengths in returned [`RawToken`](crate::analysis::RawToken)s
/// are counted in UTF-16 code units. Candidates are returned best first.
pub trait MorphEngine: Send + Sync {
    /// Analyse `text` synchronously.
    ///
    /// `candidate_count` is a lower bound on the number of candidates
    /// computed; the engine may return fewer when fewer exist, or more.
    fn analyze(
        &self,
        text: &str,
        candidate_count: usize,
        match_options: MatchOptions,
    ) -> Result<Vec<RawCandidate>>;

    /// Submit `text` for analysis and return a handle to the pending result.
    fn analyze_async(
        &self,
        text: String,
        candidate_count: usize,
        match_options: MatchOptions,
    ) -> AnalysisHandle;

    /// Public id of an engine-internal morpheme handle.
    fn morph_to_id(&self, morph: MorphRef) -> usize;

    /// Morpheme registered under `id`, if any.
    fn id_to_morph(&self, id: usize) -> Option<Morpheme>;

    /// Size of the engine's analysis worker pool.
    fn num_workers(&self) -> usize;

    fn cutoff_threshold(&self) -> f32;

    fn set_cutoff_threshold(&mut self, threshold: f32);

    fn integrate_allomorph(&self) -> bool;

    fn set_integrate_allomorph(&mut self, integrate: bool);

    /// Apply both runtime tunables at once.
    fn apply_tunables(&mut self, tunables: EngineTunables) {
        self.set_cutoff_threshold(tunables.cutoff_threshold);
        self.set_integrate_allomorph(tunables.integrate_allomorph);
    }
}

/// Mutable dictionary and configuration from which engines are built.
///
/// Mutations report whether they changed the builder's state; a change means
/// any previously built engine is stale.
pub trait MorphBuilder {
    type Engine: MorphEngine;

    /// Compile an engine from the current state.
    fn build(&self) -> Result<Self::Engine>;

    /// Register a user word. Returns false if it was already present.
    fn add_word(&mut self, form: &str, tag: PosTag, score: f32) -> Result<bool>;

    /// Load a user dictionary file. Returns true if any entry was new.
    fn load_dictionary(&mut self, path: &Path) -> Result<bool>;

    /// Find word candidates in the lines produced by `reader`.
    fn extract_words(
        &self,
        reader: &mut LineSource<'_>,
        params: &ExtractParams,
    ) -> Result<Vec<ExtractedWord>>;

    /// Like [`MorphBuilder::extract_words`], and register the words found.
    /// Returns only the words that were newly added.
    fn extract_add_words(
        &mut self,
        reader: &mut LineSource<'_>,
        params: &ExtractParams,
    ) -> Result<Vec<ExtractedWord>>;
}
