//! In-flight analysis handles.
//!
//! An [`AnalysisHandle`] is the future-like value returned by
//! [`crate::engine::MorphEngine::analyze_async`]. Engines that analyse on a
//! worker pool create a [`HandleSender`]/[`AnalysisHandle`] pair with
//! [`AnalysisHandle::channel`] and move the sender into the worker; engines
//! that analyse inline wrap their result with [`AnalysisHandle::ready`].
//!
//! Dropping a handle abandons the analysis: the worker still runs to
//! completion and its result is discarded when the send fails.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};

use crate::analysis::token::RawCandidate;
use crate::error::{MorphkitError, Result};

type AnalysisOutcome = Result<Vec<RawCandidate>>;

/// Pending or completed result of an asynchronous analysis.
#[derive(Debug)]
pub struct AnalysisHandle {
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    Ready(AnalysisOutcome),
    Pending(Receiver<AnalysisOutcome>),
}

/// Sending half of an [`AnalysisHandle`], owned by the worker.
#[derive(Debug)]
pub struct HandleSender {
    tx: Sender<AnalysisOutcome>,
}

impl HandleSender {
    /// Deliver the outcome. Returns false if the handle was already dropped.
    pub fn send(self, outcome: AnalysisOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }
}

impl AnalysisHandle {
    /// Create a connected sender/handle pair.
    pub fn channel() -> (HandleSender, AnalysisHandle) {
        let (tx, rx) = bounded(1);
        (
            HandleSender { tx },
            AnalysisHandle {
                state: HandleState::Pending(rx),
            },
        )
    }

    /// Wrap an already computed outcome.
    pub fn ready(outcome: AnalysisOutcome) -> Self {
        AnalysisHandle {
            state: HandleState::Ready(outcome),
        }
    }

    /// Whether `wait` would return without blocking.
    pub fn is_ready(&self) -> bool {
        match &self.state {
            HandleState::Ready(_) => true,
            HandleState::Pending(rx) => !rx.is_empty(),
        }
    }

    /// Poll the handle without blocking, returning it back if still pending.
    pub fn try_wait(self) -> std::result::Result<AnalysisOutcome, AnalysisHandle> {
        match self.state {
            HandleState::Ready(outcome) => Ok(outcome),
            HandleState::Pending(rx) => match rx.try_recv() {
                Ok(outcome) => Ok(outcome),
                Err(TryRecvError::Empty) => Err(AnalysisHandle {
                    state: HandleState::Pending(rx),
                }),
                Err(TryRecvError::Disconnected) => Ok(Err(worker_lost())),
            },
        }
    }

    /// Block until the analysis completes.
    pub fn wait(self) -> AnalysisOutcome {
        match self.state {
            HandleState::Ready(outcome) => outcome,
            HandleState::Pending(rx) => rx.recv().unwrap_or_else(|_| Err(worker_lost())),
        }
    }
}

fn worker_lost() -> MorphkitError {
    MorphkitError::engine("analysis worker terminated without a result")
}
