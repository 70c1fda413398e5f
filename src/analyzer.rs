//! The analyzer facade.
//!
//! [`Analyzer`] ties together the lazily built engine, the user dictionary
//! and the streaming pipeline. Mutations go to the builder and invalidate the
//! compiled engine when they change something; analyses build it on demand.
//!
//! # Examples
//!
//! ```no_run
//! use morphkit::analyzer::Analyzer;
//! use morphkit::config::{AnalyzeOptions, AnalyzerConfig};
//!
//! # fn main() -> morphkit::error::Result<()> {
//! let mut analyzer = Analyzer::new(AnalyzerConfig::new().with_load_default_dict(false))?;
//! analyzer.add_user_word("감기약", "NNP", 0.0)?;
//!
//! let result = analyzer.analyze("감기약을 먹었다", &AnalyzeOptions::default())?;
//! println!("{}", result[0].to_tagged_string());
//!
//! for result in analyzer.analyze_many(["첫 문장", "두 번째 문장"], &AnalyzeOptions::new(3))? {
//!     println!("{} candidates", result?.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::analysis::offset::marshal_result;
use crate::analysis::tag::PosTag;
use crate::analysis::token::{AnalysisResult, Token};
use crate::config::{AnalyzeOptions, AnalyzerConfig, EngineTunables, ExtractParams};
use crate::engine::{EngineCache, ExtractedWord, MorphBuilder, MorphEngine};
use crate::error::{MorphkitError, Result};
use crate::lexicon::LexiconBuilder;
use crate::reader::{IntoText, line_reader};
use crate::stream::{AnalysisStream, candidate_count};

/// Morphological analyzer with a user dictionary.
pub struct Analyzer<B: MorphBuilder = LexiconBuilder> {
    cache: EngineCache<B>,
}

impl Analyzer<LexiconBuilder> {
    /// Create an analyzer backed by the built-in lexicon engine.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let builder = LexiconBuilder::new(&config)?;
        Ok(Self::with_builder(builder, config.tunables()))
    }
}

impl<B: MorphBuilder> Analyzer<B> {
    /// Create an analyzer around an existing builder.
    pub fn with_builder(builder: B, tunables: EngineTunables) -> Self {
        Analyzer {
            cache: EngineCache::new(builder, tunables),
        }
    }

    /// Analyse one text, returning its `top_n` best candidates.
    pub fn analyze(&mut self, text: &str, options: &AnalyzeOptions) -> Result<AnalysisResult> {
        options.validate()?;
        let engine = self.cache.ensure_built()?;
        let raw = engine.analyze(
            text,
            candidate_count(options.top_n),
            options.match_options,
        )?;
        Ok(marshal_result(raw, options.top_n, engine))
    }

    /// Analyse a sequence of texts, yielding results in input order.
    ///
    /// The returned stream keeps the analyzer borrowed; no dictionary change
    /// is possible until it is dropped. A non-text element met while priming
    /// the stream fails this call with a type error.
    pub fn analyze_many<L>(
        &mut self,
        texts: L,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisStream<'_, B::Engine, L::IntoIter>>
    where
        L: IntoIterator,
        L::Item: IntoText,
    {
        options.validate()?;
        let engine = self.cache.ensure_built()?;
        AnalysisStream::new(engine, texts.into_iter(), options)
    }

    /// Register a user word. `tag` is a tag name such as `"NNP"`.
    ///
    /// Returns true if the word was new; only then is the engine rebuilt.
    pub fn add_user_word(&mut self, word: &str, tag: &str, score: f32) -> Result<bool> {
        let tag: PosTag = tag.parse()?;
        self.cache.add_word(word, tag, score)
    }

    /// Load a user dictionary file. Returns true if any entry was new.
    pub fn load_user_dictionary<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        self.cache.load_dictionary(path.as_ref())
    }

    /// Find word candidates in a corpus without registering them.
    pub fn extract_words<L>(&self, lines: L, params: &ExtractParams) -> Result<Vec<ExtractedWord>>
    where
        L: IntoIterator,
        L::Item: IntoText,
    {
        let mut reader = line_reader(lines);
        self.cache.extract_words(&mut reader, params)
    }

    /// Find word candidates in a corpus and register them as proper nouns.
    /// Returns the words that were newly added.
    pub fn extract_add_words<L>(
        &mut self,
        lines: L,
        params: &ExtractParams,
    ) -> Result<Vec<ExtractedWord>>
    where
        L: IntoIterator,
        L::Item: IntoText,
    {
        let mut reader = line_reader(lines);
        self.cache.extract_add_words(&mut reader, params)
    }

    /// Morpheme registered under `id`, as a token with empty span.
    pub fn morpheme(&mut self, id: usize) -> Result<Token> {
        let engine = self.cache.ensure_built()?;
        let morph = engine
            .id_to_morph(id)
            .ok_or_else(|| MorphkitError::not_found(format!("No morpheme with id {id}")))?;
        Ok(Token::new(morph.form, morph.tag, 0, 0, id))
    }

    /// Score gap below the best candidate beyond which candidates are dropped.
    pub fn cutoff_threshold(&self) -> f32 {
        self.cache.tunables().cutoff_threshold
    }

    /// Set the cutoff threshold. Applies without rebuilding the engine.
    pub fn set_cutoff_threshold(&mut self, threshold: f32) {
        self.cache.set_cutoff_threshold(threshold);
    }

    /// Whether allomorphs resolve to a shared morpheme id.
    pub fn integrate_allomorph(&self) -> bool {
        self.cache.tunables().integrate_allomorph
    }

    /// Enable or disable allomorph integration. Applies without rebuilding the engine.
    pub fn set_integrate_allomorph(&mut self, integrate: bool) {
        self.cache.set_integrate_allomorph(integrate);
    }

    /// Size of the engine's worker pool. Builds the engine if needed.
    pub fn num_workers(&mut self) -> Result<usize> {
        Ok(self.cache.ensure_built()?.num_workers())
    }

    /// Whether a compiled engine is currently cached.
    pub fn is_built(&self) -> bool {
        self.cache.is_built()
    }

    /// Number of engine builds performed so far.
    pub fn build_count(&self) -> u64 {
        self.cache.build_count()
    }

    /// The builder holding the current dictionary.
    pub fn builder(&self) -> &B {
        self.cache.builder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::with_builder(LexiconBuilder::empty(2), EngineTunables::default())
    }

    #[test]
    fn test_lazy_build() {
        let mut analyzer = analyzer();
        assert!(!analyzer.is_built());

        analyzer.analyze("좋다", &AnalyzeOptions::default()).unwrap();
        analyzer.analyze("좋다", &AnalyzeOptions::default()).unwrap();
        assert!(analyzer.is_built());
        assert_eq!(analyzer.build_count(), 1);
    }

    #[test]
    fn test_unknown_tag_is_config_error() {
        let mut analyzer = analyzer();
        let err = analyzer.add_user_word("감기약", "XYZ", 0.0).unwrap_err();
        assert!(err.is_config());
        assert!(analyzer.add_user_word("감기약", "nnp", 0.0).unwrap());
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let mut analyzer = analyzer();
        let err = analyzer.analyze("좋다", &AnalyzeOptions::new(0)).unwrap_err();
        assert!(err.is_config());
        assert!(analyzer.analyze_many(["좋다"], &AnalyzeOptions::new(0)).is_err());
    }

    #[test]
    fn test_morpheme_lookup() {
        let mut analyzer = analyzer();
        let token = analyzer.morpheme(PosTag::NNP.index()).unwrap();
        assert_eq!(token.tag, PosTag::NNP);
        assert_eq!((token.start, token.len), (0, 0));

        let err = analyzer.morpheme(usize::MAX).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_tunables_are_reported_before_build() {
        let mut analyzer = analyzer();
        analyzer.set_cutoff_threshold(2.5);
        analyzer.set_integrate_allomorph(false);
        assert_eq!(analyzer.cutoff_threshold(), 2.5);
        assert!(!analyzer.integrate_allomorph());
        assert_eq!(analyzer.num_workers().unwrap(), 2);
    }
}
