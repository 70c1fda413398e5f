//! Compiled lexicon engine.

use std::sync::Arc;

use rayon::ThreadPool;

use crate::analysis::match_options::MatchOptions;
use crate::analysis::token::{Morpheme, MorphRef, RawCandidate};
use crate::config::DEFAULT_CUTOFF_THRESHOLD;
use crate::engine::{AnalysisHandle, MorphEngine};
use crate::error::Result;
use crate::lexicon::lattice;
use crate::lexicon::store::Lexicon;

/// Immutable snapshot of a lexicon with a worker pool for asynchronous
/// analysis.
pub struct LexiconEngine {
    /// Lexicon shared with in-flight analyses.
    lexicon: Arc<Lexicon>,

    /// Allomorph representative of every morpheme id.
    representatives: Vec<usize>,

    /// Worker pool.
    pool: Arc<ThreadPool>,

    num_workers: usize,
    cutoff_threshold: f32,
    integrate_allomorph: bool,
}

impl LexiconEngine {
    pub(crate) fn new(lexicon: Arc<Lexicon>, pool: Arc<ThreadPool>, num_workers: usize) -> Self {
        let representatives = lexicon.allomorph_representatives();
        LexiconEngine {
            lexicon,
            representatives,
            pool,
            num_workers,
            cutoff_threshold: DEFAULT_CUTOFF_THRESHOLD,
            integrate_allomorph: true,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl MorphEngine for LexiconEngine {
    fn analyze(
        &self,
        text: &str,
        candidate_count: usize,
        match_options: MatchOptions,
    ) -> Result<Vec<RawCandidate>> {
        Ok(lattice::analyze(
            &self.lexicon,
            text,
            candidate_count,
            match_options,
            self.cutoff_threshold,
        ))
    }

    fn analyze_async(
        &self,
        text: String,
        candidate_count: usize,
        match_options: MatchOptions,
    ) -> AnalysisHandle {
        let (sender, handle) = AnalysisHandle::channel();
        let lexicon = Arc::clone(&self.lexicon);
        let cutoff = self.cutoff_threshold;

        self.pool.spawn(move || {
            let candidates =
                lattice::analyze(&lexicon, &text, candidate_count, match_options, cutoff);
            sender.send(Ok(candidates));
        });
        handle
    }

    fn morph_to_id(&self, morph: MorphRef) -> usize {
        if self.integrate_allomorph {
            self.representatives.get(morph.0).copied().unwrap_or(morph.0)
        } else {
            morph.0
        }
    }

    fn id_to_morph(&self, id: usize) -> Option<Morpheme> {
        self.lexicon.morpheme(id)
    }

    fn num_workers(&self) -> usize {
        self.num_workers
    }

    fn cutoff_threshold(&self) -> f32 {
        self.cutoff_threshold
    }

    fn set_cutoff_threshold(&mut self, threshold: f32) {
        self.cutoff_threshold = threshold;
    }

    fn integrate_allomorph(&self) -> bool {
        self.integrate_allomorph
    }

    fn set_integrate_allomorph(&mut self, integrate: bool) {
        self.integrate_allomorph = integrate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tag::PosTag;
    use crate::engine::MorphBuilder;
    use crate::lexicon::builder::LexiconBuilder;

    #[test]
    fn test_async_matches_sync() {
        let engine = LexiconBuilder::empty(2).build().unwrap();
        let text = "우리는 사과를 먹었다";
        let sync = engine.analyze(text, 10, MatchOptions::ALL).unwrap();
        let handle = engine.analyze_async(text.to_string(), 10, MatchOptions::ALL);
        assert_eq!(handle.wait().unwrap(), sync);
    }

    #[test]
    fn test_allomorph_integration_toggles_ids() {
        let mut engine = LexiconBuilder::empty(1).build().unwrap();
        let lexicon = engine.lexicon().clone();
        let find = |form: &str, tag: PosTag| {
            lexicon
                .lookup(form)
                .iter()
                .copied()
                .find(|&id| lexicon.entry(id).unwrap().tag == tag)
                .unwrap()
        };
        let eul = find("을", PosTag::JKO);
        let reul = find("를", PosTag::JKO);

        assert_eq!(engine.morph_to_id(MorphRef(reul)), eul);
        engine.set_integrate_allomorph(false);
        assert_eq!(engine.morph_to_id(MorphRef(reul)), reul);
        assert_eq!(engine.id_to_morph(reul), Some(Morpheme::new("를", PosTag::JKO)));
        assert_eq!(engine.id_to_morph(usize::MAX), None);
    }
}
