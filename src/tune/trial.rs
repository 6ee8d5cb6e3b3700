//! Trial bookkeeping

use super::config::ScaleMode;
use super::search::{BatchSizeSearch, Conclusion, SearchBounds, Step};
use serde::{Deserialize, Serialize};

/// Outcome of a probe as recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Fits,
    Exhausted,
}

/// One probed batch size and its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub batch_size: usize,
    pub outcome: Fit,
}

impl Observation {
    pub fn fits(&self) -> bool {
        self.outcome == Fit::Fits
    }
}

/// Mutable state of one search, owned by the scaler
#[derive(Debug, Clone)]
pub struct TrialState {
    search: BatchSizeSearch,
    observations: Vec<Observation>,
}

impl TrialState {
    pub fn new(mode: ScaleMode, init: usize, min: usize, max: usize) -> Self {
        Self { search: BatchSizeSearch::new(mode, init, min, max), observations: Vec::new() }
    }

    /// Size the next trial should run at
    pub fn current(&self) -> usize {
        self.search.current()
    }

    /// Number of trials run so far
    pub fn trials(&self) -> usize {
        self.observations.len()
    }

    pub fn bounds(&self) -> SearchBounds {
        self.search.bounds()
    }

    /// Record the outcome of the trial at [`current`](Self::current)
    pub fn record(&mut self, fits: bool) -> Step {
        let outcome = if fits { Fit::Fits } else { Fit::Exhausted };
        self.observations.push(Observation { batch_size: self.current(), outcome });
        self.search.observe(fits)
    }

    pub fn out_of_budget(&mut self) -> Conclusion {
        self.search.out_of_budget()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Smallest size probed so far
    pub fn smallest_probed(&self) -> Option<usize> {
        self.observations.iter().map(|o| o.batch_size).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut state = TrialState::new(ScaleMode::Power, 4, 1, 100);
        assert_eq!(state.record(true), Step::Probe(8));
        let found = Conclusion::Found { batch_size: 4, converged: true };
        assert_eq!(state.record(false), Step::Finish(found));

        assert_eq!(state.trials(), 2);
        assert_eq!(
            state.observations(),
            &[
                Observation { batch_size: 4, outcome: Fit::Fits },
                Observation { batch_size: 8, outcome: Fit::Exhausted },
            ]
        );
        assert_eq!(state.smallest_probed(), Some(4));
    }

    #[test]
    fn test_observation_serializes() {
        let obs = Observation { batch_size: 32, outcome: Fit::Exhausted };
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"batch_size":32,"outcome":"exhausted"}"#);
        assert!(!obs.fits());
    }
}
