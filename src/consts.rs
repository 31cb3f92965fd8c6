//! Named constants of the scoring formulas and the search. The four
//! normalization ceilings are load-bearing: regression baselines assume them.

/// Normalization ceiling for the distance cost component.
pub const DISTANCE_NORM: f32 = 1000.0;

/// Normalization ceiling for the adjacency score component.
pub const ADJACENCY_NORM: f32 = 100.0;

/// Normalization ceiling for the safety score component.
pub const SAFETY_NORM: f32 = 50.0;

/// Normalization ceiling for the flexibility score component.
pub const FLEXIBILITY_NORM: f32 = 50.0;

pub const NORM_EPSILON: f32 = 1e-10;

/// REL value from which adjacency is rewarded (I, E and A codes).
pub const REL_REWARD_MIN: f32 = 2.0;

/// Penalty for placing an undesirable (X) pair adjacent, per direction.
pub const REL_CONFLICT_PENALTY: f32 = 5.0;

/// Safety levels from this one up want an exit within reach.
pub const HIGH_RISK_SAFETY_LEVEL: u8 = 2;

/// Exit reach as a ratio of the larger facility dimension.
pub const EXIT_PROXIMITY_RATIO: f32 = 0.25;

pub const EXIT_NEARBY_BONUS: f32 = 5.0;

pub const EXIT_MISSING_PENALTY: f32 = 10.0;

/// Required center separation per hazard level.
pub const HAZARD_SEPARATION_PER_LEVEL: f32 = 5.0;

/// Penalty per unit of separation shortfall, per direction.
pub const HAZARD_SHORTFALL_PENALTY: f32 = 2.0;

/// Growth probes never shrink below this extent along the expansion axis.
pub const MIN_GROWTH_PROBE: f32 = 1.0;

pub const GROWTH_ROOM_BONUS: f32 = 5.0;

pub const GROWTH_BLOCKED_PENALTY: f32 = 2.0;

pub const EXTERNAL_ACCESS_BONUS: f32 = 10.0;

pub const EXTERNAL_ACCESS_PENALTY: f32 = 15.0;

/// Candidate encodings sampled per tabu iteration.
pub const NEIGHBOR_BATCH: usize = 5;

/// Positional match ratio from which two encodings count as similar.
pub const TABU_SIMILARITY_THRESHOLD: f32 = 0.8;

/// Construction attempts before the initial solution is declared infeasible.
pub const INITIAL_CONSTRUCT_ATTEMPTS: usize = 10;
