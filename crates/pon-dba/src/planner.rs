//! The `WindowPlanner` trait, the OLT's only view of an allocator.

use pon_core::{PathId, SimRng};

use crate::{DbaResult, PheromoneMatrix};

/// A window plan for one round.
///
/// `durations[i]` is ONU `i`'s window length; `paths[i]` is the candidate
/// index it was drawn from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub durations: Vec<f64>,
    pub paths:     Vec<PathId>,
}

/// Pluggable bandwidth allocation policy.
///
/// Called once per round with the normalized offered demand of every ONU,
/// indexed by `OnuId`.  Returning `Ok(None)` keeps the current window
/// vector.
///
/// Any randomness must come from `rng` (the run's planner stream) so a
/// seeded run is reproducible.
pub trait WindowPlanner: Send + 'static {
    fn plan(&mut self, demand: &[f64], rng: &mut SimRng) -> DbaResult<Option<Assignment>>;

    /// Candidate window durations the planner may assign.  Empty for
    /// planners without a path menu.
    fn time_paths(&self) -> &[f64] {
        &[]
    }

    /// Number of candidate paths, or 0 for planners without a path menu.
    fn path_count(&self) -> usize {
        self.time_paths().len()
    }

    /// The learned weights, for planners that keep any.
    fn pheromone(&self) -> Option<&PheromoneMatrix> {
        None
    }
}

/// Keeps the initial window distribution for the whole run.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPlan;

impl WindowPlanner for FixedPlan {
    fn plan(&mut self, _demand: &[f64], _rng: &mut SimRng) -> DbaResult<Option<Assignment>> {
        Ok(None)
    }
}
