use crate::config::SearchConfig;
use crate::error::LayoutError;
use crate::eval::ObjectiveBreakdown;
use crate::instance::Instance;
use crate::solution::{Layout, Placement};
use crate::util::listener::SearchListener;
use crate::util::terminator::Terminator;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::BTreeMap;
use std::time::Duration;

pub mod neighbors;
pub mod tabu;

/// One history row: the accepted and best objective at an iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub iteration: usize,
    pub objective: f32,
    pub best_objective: f32,
}

/// Everything a run produces: the best layout with its score breakdown, the
/// iteration trace and the run counters.
#[derive(Debug, Clone)]
pub struct BestResult {
    pub best_objective: f32,
    pub breakdown: ObjectiveBreakdown,
    /// Final position of every placed department (fixed and movable), by id.
    pub placements: BTreeMap<String, Placement>,
    pub layout: Layout,
    pub history: Vec<HistoryEntry>,
    pub total_time: Duration,
    pub time_to_best: Duration,
    pub iterations_run: usize,
    pub improvements_found: usize,
}

/// Runs a full tabu search on the instance. All randomized choices derive
/// from the given RNG, so identical seeds reproduce identical runs.
pub fn optimize(
    instance: &Instance,
    config: &SearchConfig,
    rng: Xoshiro256PlusPlus,
    listener: &mut impl SearchListener,
    terminator: &impl Terminator,
) -> Result<BestResult, LayoutError> {
    let mut search = tabu::TabuSearch::new(instance, *config, rng)?;
    Ok(search.run(listener, terminator))
}
