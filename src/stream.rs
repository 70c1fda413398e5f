//! Ordered, bounded-concurrency streaming analysis.
//!
//! [`AnalysisStream`] pulls texts from a caller-supplied iterator, submits
//! each one to [`MorphEngine::analyze_async`] and yields the results in
//! input order. At most `window` analyses are in flight at any time; the
//! window is refilled by one submission each time a result is handed out.
//!
//! The stream borrows the engine, so it cannot outlive the analyzer that
//! owns it and no dictionary mutation can happen while it is alive.
//!
//! Dropping the stream early abandons the in-flight handles. The engine's
//! workers finish those analyses and their results are discarded.
//!
//! # Errors
//!
//! - An input element that is not text fails the stream where it is found.
//!   Met while priming, it fails construction; met while refilling, it is
//!   yielded by the next pull. In-flight work is abandoned and the stream
//!   ends.
//! - An analysis failure is yielded at the pull that would have returned
//!   that result; the remaining in-flight work is abandoned and the stream
//!   ends.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use log::trace;

use crate::analysis::match_options::MatchOptions;
use crate::analysis::offset::marshal_result;
use crate::analysis::token::AnalysisResult;
use crate::config::AnalyzeOptions;
use crate::engine::{AnalysisHandle, MorphEngine};
use crate::error::{MorphkitError, Result};
use crate::reader::IntoText;

/// In-flight analyses allowed per engine worker.
pub const PREFETCH_PER_WORKER: usize = 16;

/// Lower bound on the number of candidates requested from the engine,
/// whatever `top_n` the caller asked for. Truncation happens afterwards.
pub const MIN_CANDIDATES: usize = 10;

/// Number of candidates to request for a caller asking for `top_n`.
pub fn candidate_count(top_n: usize) -> usize {
    top_n.max(MIN_CANDIDATES)
}

/// Prefetch window for an engine with `num_workers` workers.
pub fn prefetch_window(num_workers: usize) -> usize {
    num_workers.max(1) * PREFETCH_PER_WORKER
}

/// Streaming analysis over a sequence of texts.
pub struct AnalysisStream<'a, E: MorphEngine + ?Sized, I> {
    engine: &'a E,
    input: Option<I>,
    in_flight: VecDeque<AnalysisHandle>,
    pending_error: Option<MorphkitError>,
    window: usize,
    top_n: usize,
    match_options: MatchOptions,
    submitted: usize,
    finished: bool,
}

impl<'a, E, I> AnalysisStream<'a, E, I>
where
    E: MorphEngine + ?Sized,
    I: Iterator,
    I::Item: IntoText,
{
    /// Create a stream with the window sized from the engine's worker count,
    /// and prime it.
    pub fn new(engine: &'a E, input: I, options: &AnalyzeOptions) -> Result<Self> {
        let window = prefetch_window(engine.num_workers());
        Self::with_window(engine, input, options, window)
    }

    /// Create a stream with an explicit prefetch window, and prime it.
    pub fn with_window(
        engine: &'a E,
        input: I,
        options: &AnalyzeOptions,
        window: usize,
    ) -> Result<Self> {
        options.validate()?;
        if window == 0 {
            return Err(MorphkitError::config("prefetch window must be at least 1"));
        }

        let mut stream = AnalysisStream {
            engine,
            input: Some(input),
            in_flight: VecDeque::with_capacity(window),
            pending_error: None,
            window,
            top_n: options.top_n,
            match_options: options.match_options,
            submitted: 0,
            finished: false,
        };
        stream.fill()?;
        trace!(
            "analysis stream primed with {} of {} slots",
            stream.in_flight.len(),
            window
        );
        Ok(stream)
    }

    /// Maximum number of analyses in flight.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of analyses currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Number of texts submitted to the engine so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Pull one text and submit it. Returns false when nothing was submitted.
    fn feed(&mut self) -> Result<bool> {
        let Some(input) = self.input.as_mut() else {
            return Ok(false);
        };

        match input.next().map(IntoText::into_text) {
            Some(Ok(text)) => {
                let handle =
                    self.engine
                        .analyze_async(text, candidate_count(self.top_n), self.match_options);
                self.in_flight.push_back(handle);
                self.submitted += 1;
                Ok(true)
            }
            Some(Err(e)) => {
                self.input = None;
                Err(e)
            }
            None => {
                self.input = None;
                Ok(false)
            }
        }
    }

    fn fill(&mut self) -> Result<()> {
        while self.in_flight.len() < self.window && self.feed()? {}
        Ok(())
    }

    fn abandon(&mut self) {
        self.in_flight.clear();
        self.input = None;
        self.pending_error = None;
        self.finished = true;
    }
}

impl<E, I> Iterator for AnalysisStream<'_, E, I>
where
    E: MorphEngine + ?Sized,
    I: Iterator,
    I::Item: IntoText,
{
    type Item = Result<AnalysisResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(e) = self.pending_error.take() {
            self.abandon();
            return Some(Err(e));
        }

        let Some(handle) = self.in_flight.pop_front() else {
            self.finished = true;
            return None;
        };

        match handle.wait() {
            Ok(raw) => {
                let result = marshal_result(raw, self.top_n, self.engine);
                if let Err(e) = self.fill() {
                    self.pending_error = Some(e);
                }
                Some(Ok(result))
            }
            Err(e) => {
                self.abandon();
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        if self.pending_error.is_some() {
            return (1, Some(1));
        }
        let known = self.in_flight.len();
        match &self.input {
            Some(input) => {
                let (_, upper) = input.size_hint();
                (known, upper.and_then(|u| u.checked_add(known)))
            }
            None => (known, Some(known)),
        }
    }
}

impl<E, I> FusedIterator for AnalysisStream<'_, E, I>
where
    E: MorphEngine + ?Sized,
    I: Iterator,
    I::Item: IntoText,
{
}
