use crate::config::SearchConfig;
use crate::consts::{INITIAL_CONSTRUCT_ATTEMPTS, NEIGHBOR_BATCH, TABU_SIMILARITY_THRESHOLD};
use crate::construct::{self, plp};
use crate::error::LayoutError;
use crate::eval::{self, ObjectiveBreakdown};
use crate::instance::Instance;
use crate::optimizer::neighbors::generate_neighbor;
use crate::optimizer::{BestResult, HistoryEntry};
use crate::solution::{Encoding, Gene, Layout};
use crate::util::listener::{ReportType, SearchListener};
use crate::util::terminator::Terminator;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A feasible encoding together with its decoded layout and score.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub encoding: Encoding,
    pub layout: Layout,
    pub breakdown: ObjectiveBreakdown,
}

/// What an iteration did with its candidate batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationStatus {
    Continued,
    /// Stagnation on an empty batch: the search re-seeded itself.
    Restarted,
    /// Stagnation with candidates available: the search is done.
    Stagnated,
}

/// Tabu-search state. `run` drives the whole loop; the public step methods
/// (`sample_batch`, `process_batch`, `restart`, `finish`) expose the phases
/// individually.
pub struct TabuSearch<'a> {
    pub instance: &'a Instance,
    pub config: SearchConfig,
    pub rng: Xoshiro256PlusPlus,
    /// FIFO of recently accepted encodings, at most `tabu_tenure` long.
    pub tabu: VecDeque<Encoding>,
    pub current: Candidate,
    pub best: Candidate,
    pub history: Vec<HistoryEntry>,
    pub non_improving: usize,
    pub n_iterations: usize,
    pub n_improvements: usize,
    pub start: Instant,
    pub time_to_best: Duration,
}

impl<'a> TabuSearch<'a> {
    pub fn new(
        instance: &'a Instance,
        config: SearchConfig,
        mut rng: Xoshiro256PlusPlus,
    ) -> Result<Self, LayoutError> {
        let initial = random_candidate(instance, &mut rng)?;
        info!(
            "[INIT] initial layout constructed, objective: {:.4}",
            initial.breakdown.objective
        );
        Ok(Self {
            instance,
            config,
            rng,
            tabu: VecDeque::new(),
            current: initial.clone(),
            best: initial,
            history: vec![],
            non_improving: 0,
            n_iterations: 0,
            n_improvements: 0,
            start: Instant::now(),
            time_to_best: Duration::ZERO,
        })
    }

    /// Samples the candidate batch for one iteration: neighbors of the
    /// current encoding that pass the tabu filter and construct completely.
    /// Tabu candidates are only rejected on the first iteration; afterwards
    /// they are admitted for diversification.
    pub fn sample_batch(&mut self, iteration: usize) -> Vec<Candidate> {
        let n_plps = self.current.layout.plps.len();
        let mut batch = vec![];
        for _ in 0..NEIGHBOR_BATCH {
            let encoding =
                generate_neighbor(self.instance, &self.current.encoding, n_plps, &mut self.rng);
            let is_tabu = self
                .tabu
                .iter()
                .any(|t| encoding.is_similar(t, TABU_SIMILARITY_THRESHOLD));
            if is_tabu && iteration == 0 {
                continue;
            }
            let cons = construct::construct(self.instance, &encoding);
            if !cons.is_complete() {
                debug!(
                    "[TABU] candidate placed only {}/{} departments, discarded",
                    cons.placed, cons.n_movable
                );
                continue;
            }
            let breakdown = eval::evaluate(self.instance, &cons.layout);
            batch.push(Candidate {
                encoding,
                layout: cons.layout,
                breakdown,
            });
        }
        batch
    }

    /// Accepts the best candidate of the batch (or handles an empty one),
    /// maintains the tabu queue, the best-so-far and the history.
    pub fn process_batch(
        &mut self,
        iteration: usize,
        batch: Vec<Candidate>,
        listener: &mut impl SearchListener,
    ) -> IterationStatus {
        let chosen = batch
            .into_iter()
            .min_by_key(|c| OrderedFloat(c.breakdown.objective));

        match chosen {
            None => {
                debug!("[TABU] no feasible candidate at iteration {iteration}");
                self.non_improving += 1;
                if self.non_improving >= self.config.max_non_improving {
                    self.restart(listener);
                    return IterationStatus::Restarted;
                }
            }
            Some(chosen) => {
                if chosen.breakdown.objective < self.best.breakdown.objective {
                    info!(
                        "[TABU] iteration {iteration}: new best objective {:.4}",
                        chosen.breakdown.objective
                    );
                    self.best = chosen.clone();
                    self.time_to_best = self.start.elapsed();
                    self.n_improvements += 1;
                    self.non_improving = 0;
                    listener.report(
                        ReportType::Improving,
                        &self.best.layout,
                        &self.best.breakdown,
                        self.instance,
                    );
                } else {
                    self.non_improving += 1;
                }
                self.tabu.push_back(chosen.encoding.clone());
                if self.tabu.len() > self.config.tabu_tenure {
                    self.tabu.pop_front();
                }
                self.current = chosen;
            }
        }

        self.history.push(HistoryEntry {
            iteration,
            objective: self.current.breakdown.objective,
            best_objective: self.best.breakdown.objective,
        });

        match self.non_improving >= self.config.max_non_improving {
            true => IterationStatus::Stagnated,
            false => IterationStatus::Continued,
        }
    }

    /// Re-seeds the search from a fresh random encoding and resets the
    /// stagnation counter. A restart that fails to construct keeps the
    /// current encoding.
    pub fn restart(&mut self, listener: &mut impl SearchListener) {
        self.non_improving = 0;
        match random_candidate(self.instance, &mut self.rng) {
            Ok(candidate) => {
                info!("[TABU] stagnated, restarting from a fresh random encoding");
                // a lucky re-seed may beat the best found so far
                if candidate.breakdown.objective < self.best.breakdown.objective {
                    self.best = candidate.clone();
                }
                listener.report(
                    ReportType::Restart,
                    &candidate.layout,
                    &candidate.breakdown,
                    self.instance,
                );
                self.current = candidate;
            }
            Err(_) => {
                warn!("[TABU] restart failed to construct a feasible layout, keeping current");
            }
        }
    }

    /// Restores the best layout by re-running the constructor on the best
    /// encoding and assembles the result record.
    pub fn finish(&mut self, listener: &mut impl SearchListener) -> BestResult {
        let restored = construct::construct(self.instance, &self.best.encoding);
        debug_assert!(restored.is_complete());
        self.best.layout = restored.layout;
        listener.report(
            ReportType::Final,
            &self.best.layout,
            &self.best.breakdown,
            self.instance,
        );
        info!(
            "[TABU] finished: best objective {:.4} after {} iterations ({} improvements)",
            self.best.breakdown.objective, self.n_iterations, self.n_improvements
        );

        let placements = self
            .instance
            .departments
            .iter()
            .enumerate()
            .filter_map(|(idx, d)| self.best.layout.placements[idx].map(|p| (d.id.clone(), p)))
            .collect();

        BestResult {
            best_objective: self.best.breakdown.objective,
            breakdown: self.best.breakdown,
            placements,
            layout: self.best.layout.clone(),
            history: std::mem::take(&mut self.history),
            total_time: self.start.elapsed(),
            time_to_best: self.time_to_best,
            iterations_run: self.n_iterations,
            improvements_found: self.n_improvements,
        }
    }

    /// The full loop: sample, process, stop on stagnation, iteration limit or
    /// the terminator.
    pub fn run(
        &mut self,
        listener: &mut impl SearchListener,
        terminator: &impl Terminator,
    ) -> BestResult {
        listener.report(
            ReportType::Initial,
            &self.current.layout,
            &self.current.breakdown,
            self.instance,
        );

        for iteration in 0..self.config.max_iterations {
            if terminator.kill() {
                info!("[TABU] terminated by caller at iteration {iteration}");
                break;
            }
            self.n_iterations += 1;
            let batch = self.sample_batch(iteration);
            if self.process_batch(iteration, batch, listener) == IterationStatus::Stagnated {
                info!(
                    "[TABU] no improvement for {} iterations, stopping",
                    self.config.max_non_improving
                );
                break;
            }
        }

        self.finish(listener)
    }
}

/// Movable departments in catalogue order, each with a uniformly random
/// anchor into the initial PLP list, retried until construction places every
/// department or the attempt cap runs out.
fn random_candidate(
    instance: &Instance,
    rng: &mut Xoshiro256PlusPlus,
) -> Result<Candidate, LayoutError> {
    let n_plps = {
        let mut fixed_only = Layout::empty(instance.n_depts());
        construct::place_fixed(instance, &mut fixed_only);
        plp::generate_plps(instance, &fixed_only).len()
    };

    for attempt in 0..INITIAL_CONSTRUCT_ATTEMPTS {
        let encoding = Encoding::new(
            instance
                .movable()
                .map(|dept| Gene {
                    dept,
                    anchor: rng.random_range(0..n_plps),
                })
                .collect(),
        );
        let cons = construct::construct(instance, &encoding);
        if cons.is_complete() {
            let breakdown = eval::evaluate(instance, &cons.layout);
            return Ok(Candidate {
                encoding,
                layout: cons.layout,
                breakdown,
            });
        }
        debug!(
            "[INIT] attempt {attempt} placed {}/{} departments",
            cons.placed, cons.n_movable
        );
    }
    Err(LayoutError::InfeasibleInitial {
        attempts: INITIAL_CONSTRUCT_ATTEMPTS,
    })
}
