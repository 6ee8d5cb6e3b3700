//! Batch-size search state machine
//!
//! The search is pure: it is told whether each probed size fit and answers
//! with the next size to probe or a conclusion. Running trials, counting the
//! budget and restoring trainer state live in the scaler.
//!
//! Both strategies share the first phase: grow by doubling from the initial
//! size until a size exhausts memory (or the clamp is reached), or shrink by
//! halving if the initial size already exhausts. `Power` stops as soon as a
//! fitting and an exhausting size are known. `BinSearch` then bisects the
//! interval between them until it collapses to adjacent integers.

mod binsearch;
mod power;

use super::config::ScaleMode;
use serde::{Deserialize, Serialize};

/// Known feasibility bounds
///
/// Every size `<= low` fits; every size `>= high` exhausts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchBounds {
    pub low: Option<usize>,
    pub high: Option<usize>,
}

/// Where the search currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Doubling from a fitting size
    Growing,
    /// Halving because nothing has fit yet
    Shrinking,
    /// Bisecting `(low, high)`
    Bisecting,
    /// Finished
    Done(Conclusion),
}

/// Final answer of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    /// Largest size known to fit. `converged` is false when the budget ran
    /// out before the boundary was pinned down.
    Found { batch_size: usize, converged: bool },
    /// Not even the smallest allowed size fit
    Infeasible,
}

/// What the scaler should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Probe(usize),
    Finish(Conclusion),
}

/// Search over `[min, max]` starting from an initial size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSizeSearch {
    mode: ScaleMode,
    min: usize,
    max: usize,
    current: usize,
    bounds: SearchBounds,
    phase: Phase,
}

impl BatchSizeSearch {
    /// Start a search; `init` is clamped into `[min, max]`
    pub fn new(mode: ScaleMode, init: usize, min: usize, max: usize) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self {
            mode,
            min,
            max,
            current: init.clamp(min, max),
            bounds: SearchBounds::default(),
            phase: Phase::Growing,
        }
    }

    /// Size to probe next
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn bounds(&self) -> SearchBounds {
        self.bounds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Feed the outcome of probing [`current`](Self::current)
    pub fn observe(&mut self, fits: bool) -> Step {
        let size = self.current;
        match self.phase {
            Phase::Done(conclusion) => Step::Finish(conclusion),
            Phase::Growing if fits => {
                self.bounds.low = Some(size);
                if size >= self.max {
                    return self.finish(Conclusion::Found { batch_size: size, converged: true });
                }
                self.probe(power::grow(size, self.max), Phase::Growing)
            }
            Phase::Growing => {
                self.bounds.high = Some(size);
                match self.bounds.low {
                    Some(low) => self.bracketed(low, size),
                    None => self.shrink(),
                }
            }
            Phase::Shrinking if fits => {
                self.bounds.low = Some(size);
                let high = self.bounds.high.unwrap_or(self.max);
                self.bracketed(size, high)
            }
            Phase::Shrinking => {
                self.bounds.high = Some(size);
                self.shrink()
            }
            Phase::Bisecting => {
                if fits {
                    self.bounds.low = Some(size);
                } else {
                    self.bounds.high = Some(size);
                }
                match (self.bounds.low, self.bounds.high) {
                    (Some(low), Some(high)) => self.bracketed(low, high),
                    // Bisection only starts with both bounds set
                    _ => self.finish(Conclusion::Infeasible),
                }
            }
        }
    }

    /// Conclude early because the trial budget ran out
    pub fn out_of_budget(&mut self) -> Conclusion {
        if let Phase::Done(conclusion) = self.phase {
            return conclusion;
        }
        let conclusion = match self.bounds.low {
            Some(low) => Conclusion::Found { batch_size: low, converged: false },
            None => Conclusion::Infeasible,
        };
        self.phase = Phase::Done(conclusion);
        conclusion
    }

    /// Both a fitting and an exhausting size are known
    fn bracketed(&mut self, low: usize, high: usize) -> Step {
        match self.mode {
            ScaleMode::Power => self.finish(Conclusion::Found { batch_size: low, converged: true }),
            ScaleMode::BinSearch if binsearch::collapsed(low, high) => {
                self.finish(Conclusion::Found { batch_size: low, converged: true })
            }
            ScaleMode::BinSearch => self.probe(binsearch::midpoint(low, high), Phase::Bisecting),
        }
    }

    fn shrink(&mut self) -> Step {
        if self.current <= self.min {
            return self.finish(Conclusion::Infeasible);
        }
        self.probe(power::shrink(self.current, self.min), Phase::Shrinking)
    }

    fn probe(&mut self, size: usize, phase: Phase) -> Step {
        self.current = size;
        self.phase = phase;
        Step::Probe(size)
    }

    fn finish(&mut self, conclusion: Conclusion) -> Step {
        self.phase = Phase::Done(conclusion);
        Step::Finish(conclusion)
    }
}
