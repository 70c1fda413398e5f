//! Mutable lexicon from which [`LexiconEngine`]s are built.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use rayon::ThreadPoolBuilder;

use crate::analysis::tag::PosTag;
use crate::config::{AnalyzerConfig, ExtractParams};
use crate::engine::{ExtractedWord, LineSource, MorphBuilder};
use crate::error::{MorphkitError, Result};
use crate::lexicon::dictionary::{DEFAULT_DICT_FILE, load_dictionary_file};
use crate::lexicon::engine::LexiconEngine;
use crate::lexicon::extract::extract_words;
use crate::lexicon::store::Lexicon;

/// Builder holding the lexicon and the engine settings fixed at build time.
#[derive(Debug, Clone)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
    num_workers: usize,
    model_path: Option<PathBuf>,
}

impl LexiconBuilder {
    /// Create a builder from `config`, loading the model's default
    /// dictionary when one is present and enabled.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let model_path = config.resolved_model_path();
        let mut builder = LexiconBuilder {
            lexicon: Lexicon::with_builtins(),
            num_workers: config.resolved_num_workers(),
            model_path: model_path.clone(),
        };

        if let Some(dir) = model_path {
            if !dir.is_dir() {
                return Err(MorphkitError::engine(format!(
                    "Model path {} is not a directory",
                    dir.display()
                )));
            }
            let default_dict = dir.join(DEFAULT_DICT_FILE);
            if config.load_default_dict && default_dict.is_file() {
                builder.load_dictionary(&default_dict)?;
            }
        }

        debug!(
            "Lexicon builder ready with {} entries and {} workers",
            builder.lexicon.len(),
            builder.num_workers
        );
        Ok(builder)
    }

    /// A builder with only the built-in lexicon.
    pub fn empty(num_workers: usize) -> Self {
        LexiconBuilder {
            lexicon: Lexicon::with_builtins(),
            num_workers: num_workers.max(1),
            model_path: None,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}

impl MorphBuilder for LexiconBuilder {
    type Engine = LexiconEngine;

    fn build(&self) -> Result<LexiconEngine> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.num_workers)
            .thread_name(|i| format!("morphkit-worker-{i}"))
            .build()
            .map_err(|e| MorphkitError::engine(format!("Failed to create thread pool: {e}")))?;

        Ok(LexiconEngine::new(
            Arc::new(self.lexicon.clone()),
            Arc::new(pool),
            self.num_workers,
        ))
    }

    fn add_word(&mut self, form: &str, tag: PosTag, score: f32) -> Result<bool> {
        if form.is_empty() || form.chars().any(char::is_whitespace) {
            return Err(MorphkitError::config(format!("Invalid word form {form:?}")));
        }
        if !score.is_finite() {
            return Err(MorphkitError::config(format!("Invalid word score {score}")));
        }
        Ok(self.lexicon.insert(form, tag, score))
    }

    fn load_dictionary(&mut self, path: &Path) -> Result<bool> {
        let entries = load_dictionary_file(path)?;
        let total = entries.len();
        let added = entries
            .into_iter()
            .filter(|e| self.lexicon.insert(&e.form, e.tag, e.score))
            .count();

        if added == 0 {
            warn!(
                "Dictionary {} added no new words ({total} entries)",
                path.display()
            );
        } else {
            debug!("Loaded {added} of {total} entries from {}", path.display());
        }
        Ok(added > 0)
    }

    fn extract_words(
        &self,
        reader: &mut LineSource<'_>,
        params: &ExtractParams,
    ) -> Result<Vec<ExtractedWord>> {
        extract_words(&self.lexicon, reader, params)
    }

    fn extract_add_words(
        &mut self,
        reader: &mut LineSource<'_>,
        params: &ExtractParams,
    ) -> Result<Vec<ExtractedWord>> {
        let words = extract_words(&self.lexicon, reader, params)?;
        let added: Vec<ExtractedWord> = words
            .into_iter()
            .filter(|w| self.lexicon.insert(&w.form, PosTag::NNP, w.pos_score))
            .collect();
        debug!("Registered {} extracted words", added.len());
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_add_word_reports_change() {
        let mut builder = LexiconBuilder::empty(1);
        assert!(builder.add_word("감기약", PosTag::NNP, 0.0).unwrap());
        assert!(!builder.add_word("감기약", PosTag::NNP, 0.0).unwrap());
        assert!(builder.add_word("두 단어", PosTag::NNP, 0.0).unwrap_err().is_config());
        assert!(builder.add_word("", PosTag::NNP, 0.0).is_err());
        assert!(builder.add_word("값", PosTag::NNG, f32::NAN).is_err());
    }

    #[test]
    fn test_model_directory_loads_default_dictionary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_DICT_FILE), "감기약\tNNP\n").unwrap();

        let config = AnalyzerConfig::new()
            .with_num_workers(1)
            .with_model_path(dir.path());
        let builder = LexiconBuilder::new(&config).unwrap();
        assert!(builder.lexicon().contains("감기약", PosTag::NNP));

        let skipped = LexiconBuilder::new(&config.clone().with_load_default_dict(false)).unwrap();
        assert!(!skipped.lexicon().contains("감기약", PosTag::NNP));
    }

    #[test]
    fn test_model_path_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        let config = AnalyzerConfig::new().with_model_path(&file);
        assert!(LexiconBuilder::new(&config).is_err());
    }

    #[test]
    fn test_load_dictionary_reports_change() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.dict");
        fs::write(&path, "감기약\tNNP\n먹방\tNNG\t-3.5\n").unwrap();

        let mut builder = LexiconBuilder::empty(1);
        assert!(builder.load_dictionary(&path).unwrap());
        assert!(!builder.load_dictionary(&path).unwrap());
        assert_eq!(builder.lexicon().added_len(), 2);
    }

    #[test]
    fn test_malformed_dictionary_adds_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.dict");
        fs::write(&path, "감기약\tNNP\n먹방\tXYZ\n").unwrap();

        let mut builder = LexiconBuilder::empty(1);
        assert!(builder.load_dictionary(&path).is_err());
        assert_eq!(builder.lexicon().added_len(), 0);
    }
}
