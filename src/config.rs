//! Configuration for analyzers, analysis calls and word extraction.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::match_options::MatchOptions;
use crate::error::{MorphkitError, Result};

/// Environment variable consulted when no model path is configured.
pub const MODEL_PATH_ENV: &str = "MORPHKIT_MODEL_PATH";

/// Default score gap below the best candidate beyond which candidates are dropped.
pub const DEFAULT_CUTOFF_THRESHOLD: f32 = 8.0;

/// Configuration for constructing an analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of analysis worker threads.
    /// Zero uses the number of CPU cores.
    pub num_workers: usize,

    /// Directory holding the model files.
    /// If None, falls back to `MORPHKIT_MODEL_PATH`, then to the built-in lexicon only.
    pub model_path: Option<PathBuf>,

    /// Whether allomorphs are resolved to a shared morpheme id.
    pub integrate_allomorph: bool,

    /// Whether the model's default dictionary is loaded at construction.
    pub load_default_dict: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            num_workers: 0,
            model_path: None,
            integrate_allomorph: true,
            load_default_dict: true,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new AnalyzerConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the number of worker threads.
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Set the model directory.
    pub fn with_model_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.model_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable allomorph integration.
    pub fn with_integrate_allomorph(mut self, integrate: bool) -> Self {
        self.integrate_allomorph = integrate;
        self
    }

    /// Enable or disable loading the default dictionary.
    pub fn with_load_default_dict(mut self, load: bool) -> Self {
        self.load_default_dict = load;
        self
    }

    /// Worker count after resolving zero to the CPU count.
    pub fn resolved_num_workers(&self) -> usize {
        if self.num_workers == 0 {
            num_cpus::get()
        } else {
            self.num_workers
        }
    }

    /// Model directory after applying the environment fallback.
    pub fn resolved_model_path(&self) -> Option<PathBuf> {
        self.model_path
            .clone()
            .or_else(|| env::var_os(MODEL_PATH_ENV).map(PathBuf::from))
    }

    /// Runtime tunables implied by this configuration.
    pub fn tunables(&self) -> EngineTunables {
        EngineTunables {
            integrate_allomorph: self.integrate_allomorph,
            ..EngineTunables::default()
        }
    }
}

/// Engine-level settings that may change after the engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineTunables {
    /// Candidates scoring further than this below the best one are dropped.
    pub cutoff_threshold: f32,

    /// Whether allomorphs share one morpheme id.
    pub integrate_allomorph: bool,
}

impl Default for EngineTunables {
    fn default() -> Self {
        Self {
            cutoff_threshold: DEFAULT_CUTOFF_THRESHOLD,
            integrate_allomorph: true,
        }
    }
}

/// Options for a single analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    /// Number of candidates returned per text.
    pub top_n: usize,

    /// Web-entity patterns recognised as single tokens.
    pub match_options: MatchOptions,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            top_n: 1,
            match_options: MatchOptions::ALL,
        }
    }
}

impl AnalyzeOptions {
    /// Create options returning the `top_n` best candidates.
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n,
            ..Default::default()
        }
    }

    /// Set the match options.
    pub fn with_match_options(mut self, match_options: MatchOptions) -> Self {
        self.match_options = match_options;
        self
    }

    /// Reject option values no engine call could honour.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(MorphkitError::config("top_n must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters of the corpus word-extraction procedures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractParams {
    /// Minimum number of occurrences of a candidate.
    pub min_count: usize,

    /// Maximum candidate length in codepoints.
    pub max_word_len: usize,

    /// Minimum word score.
    pub min_score: f32,

    /// Minimum noun-likeness score.
    pub pos_threshold: f32,

    /// Whether to drop candidates explained by known words plus a particle.
    pub lm_filter: bool,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            min_count: 10,
            max_word_len: 10,
            min_score: 0.25,
            pos_threshold: -3.0,
            lm_filter: true,
        }
    }
}

impl ExtractParams {
    /// Set the minimum occurrence count.
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    /// Set the maximum word length.
    pub fn with_max_word_len(mut self, max_word_len: usize) -> Self {
        self.max_word_len = max_word_len;
        self
    }

    /// Set the minimum score.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the noun-likeness threshold.
    pub fn with_pos_threshold(mut self, pos_threshold: f32) -> Self {
        self.pos_threshold = pos_threshold;
        self
    }

    /// Enable or disable the known-word filter.
    pub fn with_lm_filter(mut self, lm_filter: bool) -> Self {
        self.lm_filter = lm_filter;
        self
    }

    /// Reject parameter values the extractor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_word_len < 2 {
            return Err(MorphkitError::config("max_word_len must be at least 2"));
        }
        if !self.min_score.is_finite() || !self.pos_threshold.is_finite() {
            return Err(MorphkitError::config(
                "min_score and pos_threshold must be finite",
            ));
        }
        Ok(())
    }
}
