use std::collections::HashMap;

pub mod department;
pub mod matrix;

pub use department::{Department, LocationKind, Obstacle, Orientation, SpecialLocation};
pub use matrix::{MatrixData, RelCode, SquareMatrix};

#[derive(Debug, Clone, Copy)]
pub struct Facility {
    pub width: f32,
    pub height: f32,
}

impl Facility {
    /// Reach of the exit-proximity check, a quarter of the larger facility side.
    pub fn exit_radius(&self) -> f32 {
        f32::max(self.width, self.height) * crate::consts::EXIT_PROXIMITY_RATIO
    }
}

/// Weights of the four objective components. Non-negative; they conventionally
/// sum to 1 but are not required to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub distance: f32,
    pub adjacency: f32,
    pub safety: f32,
    pub flexibility: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            distance: 0.6,
            adjacency: 0.2,
            safety: 0.1,
            flexibility: 0.1,
        }
    }
}

/// A fully parsed UA-FLP problem. Immutable during a search; built by
/// [`crate::engine::Engine::build`].
#[derive(Debug, Clone)]
pub struct Instance {
    pub facility: Facility,
    pub departments: Vec<Department>,
    pub obstacles: Vec<Obstacle>,
    pub special_locations: Vec<SpecialLocation>,
    /// Transport intensity per ordered department pair, `>= 0`.
    pub flow: Option<SquareMatrix>,
    /// REL closeness codes, `-1..=4`. Both directions are read as stored.
    pub rel: Option<SquareMatrix>,
    /// `1` iff row-department must precede column-department. Stored for
    /// collaborators; consumed by no scoring formula.
    pub precedence: Option<SquareMatrix>,
    /// Pairwise hazard separation requirement, `>= 0`.
    pub hazard: Option<SquareMatrix>,
    /// Per-department noise level. Informational.
    pub noise: Vec<f32>,
    /// Per-department vibration level. Informational.
    pub vibration: Vec<f32>,
    pub weights: Weights,
    id_index: HashMap<String, usize>,
}

impl Instance {
    pub fn new(
        facility: Facility,
        departments: Vec<Department>,
        obstacles: Vec<Obstacle>,
        special_locations: Vec<SpecialLocation>,
        weights: Weights,
    ) -> Self {
        let id_index = departments
            .iter()
            .enumerate()
            .map(|(idx, d)| (d.id.clone(), idx))
            .collect();
        let n = departments.len();
        Self {
            facility,
            departments,
            obstacles,
            special_locations,
            flow: None,
            rel: None,
            precedence: None,
            hazard: None,
            noise: vec![0.0; n],
            vibration: vec![0.0; n],
            weights,
            id_index,
        }
    }

    pub fn n_depts(&self) -> usize {
        self.departments.len()
    }

    pub fn dept(&self, idx: usize) -> &Department {
        &self.departments[idx]
    }

    pub fn dept_index(&self, id: &str) -> Option<usize> {
        self.id_index.get(id).copied()
    }

    /// Indices of movable departments, in catalogue order.
    pub fn movable(&self) -> impl Iterator<Item = usize> + '_ {
        self.departments
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.fixed)
            .map(|(idx, _)| idx)
    }

    /// Indices of fixed departments, in catalogue order.
    pub fn fixed(&self) -> impl Iterator<Item = usize> + '_ {
        self.departments
            .iter()
            .enumerate()
            .filter(|(_, d)| d.fixed)
            .map(|(idx, _)| idx)
    }

    pub fn n_movable(&self) -> usize {
        self.movable().count()
    }
}
