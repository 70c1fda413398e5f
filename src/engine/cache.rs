//! Lazily compiled engine.
//!
//! [`EngineCache`] owns a builder and, once needed, the engine compiled from
//! it. The empty engine slot is the dirty flag: construction leaves it empty,
//! every mutation that reports a change empties it again, and
//! [`EngineCache::ensure_built`] fills it on the next analysis.
//!
//! Runtime tunables are remembered here so that a rebuilt engine starts with
//! the values last set by the caller.

use std::path::Path;

use log::debug;

use crate::analysis::tag::PosTag;
use crate::config::{EngineTunables, ExtractParams};
use crate::engine::{ExtractedWord, LineSource, MorphBuilder, MorphEngine};
use crate::error::{MorphkitError, Result};

/// Builder plus its lazily compiled engine.
pub struct EngineCache<B: MorphBuilder> {
    builder: B,
    engine: Option<B::Engine>,
    tunables: EngineTunables,
    build_count: u64,
}

impl<B: MorphBuilder> EngineCache<B> {
    /// Create an unbuilt cache around `builder`.
    pub fn new(builder: B, tunables: EngineTunables) -> Self {
        EngineCache {
            builder,
            engine: None,
            tunables,
            build_count: 0,
        }
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// The compiled engine, if it is currently built.
    pub fn engine(&self) -> Option<&B::Engine> {
        self.engine.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.engine.is_some()
    }

    /// Number of successful builds performed so far.
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    /// Build the engine if it is not built, and return it.
    ///
    /// A failed build leaves the cache unbuilt.
    pub fn ensure_built(&mut self) -> Result<&B::Engine> {
        if self.engine.is_none() {
            debug!("building analysis engine (build #{})", self.build_count + 1);
            let mut engine = self.builder.build()?;
            engine.apply_tunables(self.tunables);
            self.build_count += 1;
            self.engine = Some(engine);
        }

        self.engine
            .as_ref()
            .ok_or_else(|| MorphkitError::engine("engine slot empty after build"))
    }

    /// Drop the compiled engine.
    pub fn invalidate(&mut self) {
        if self.engine.take().is_some() {
            debug!("analysis engine invalidated");
        }
    }

    /// Add a word to the builder, invalidating the engine if it was new.
    pub fn add_word(&mut self, form: &str, tag: PosTag, score: f32) -> Result<bool> {
        let changed = self.builder.add_word(form, tag, score)?;
        if changed {
            self.invalidate();
        }
        Ok(changed)
    }

    /// Load a dictionary into the builder, invalidating the engine on change.
    pub fn load_dictionary(&mut self, path: &Path) -> Result<bool> {
        let changed = self.builder.load_dictionary(path)?;
        if changed {
            self.invalidate();
        }
        Ok(changed)
    }

    /// Run word extraction against the builder.
    pub fn extract_words(
        &self,
        reader: &mut LineSource<'_>,
        params: &ExtractParams,
    ) -> Result<Vec<ExtractedWord>> {
        self.builder.extract_words(reader, params)
    }

    /// Extract words and register them, invalidating if any were added.
    pub fn extract_add_words(
        &mut self,
        reader: &mut LineSource<'_>,
        params: &ExtractParams,
    ) -> Result<Vec<ExtractedWord>> {
        let added = self.builder.extract_add_words(reader, params)?;
        if !added.is_empty() {
            self.invalidate();
        }
        Ok(added)
    }

    pub fn tunables(&self) -> EngineTunables {
        self.tunables
    }

    pub fn set_cutoff_threshold(&mut self, threshold: f32) {
        self.tunables.cutoff_threshold = threshold;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_cutoff_threshold(threshold);
        }
    }

    pub fn set_integrate_allomorph(&mut self, integrate: bool) {
        self.tunables.integrate_allomorph = integrate;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_integrate_allomorph(integrate);
        }
    }
}
