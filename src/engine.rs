use crate::config::SearchConfig;
use crate::error::LayoutError;
use crate::instance::{
    Department, Facility, Instance, LocationKind, MatrixData, Obstacle, SpecialLocation,
    SquareMatrix, Weights,
};
use crate::geometry::Rect;
use crate::optimizer::{self, BestResult};
use crate::util::listener::{NullSearchListener, SearchListener};
use crate::util::terminator::{BasicTerminator, Terminator};
use log::{info, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Ingress surface of the engine: collects the problem piece by piece, then
/// validates it into an [`Instance`] and runs the search. All `add_`/`set_`
/// calls are chainable and infallible; validation happens in [`Engine::build`]
/// so collaborators can feed data in any order.
pub struct Engine {
    facility: Facility,
    departments: Vec<Department>,
    obstacles: Vec<Obstacle>,
    special_locations: Vec<SpecialLocation>,
    flow: Option<MatrixData>,
    rel: Option<MatrixData>,
    precedence: Option<MatrixData>,
    hazard: Option<MatrixData>,
    noise: Vec<(String, f32)>,
    hazard_levels: Vec<(String, f32)>,
    vibration: Vec<(String, f32)>,
    weights: Weights,
}

impl Engine {
    pub fn new(facility_width: f32, facility_height: f32) -> Self {
        Self {
            facility: Facility {
                width: facility_width,
                height: facility_height,
            },
            departments: vec![],
            obstacles: vec![],
            special_locations: vec![],
            flow: None,
            rel: None,
            precedence: None,
            hazard: None,
            noise: vec![],
            hazard_levels: vec![],
            vibration: vec![],
            weights: Weights::default(),
        }
    }

    /// Duplicate ids replace the earlier department, with a warning.
    pub fn add_department(&mut self, dept: Department) -> &mut Self {
        match self.departments.iter().position(|d| d.id == dept.id) {
            Some(idx) => {
                warn!(
                    "[ENG] duplicate department id {}, replacing the earlier one",
                    dept.id
                );
                self.departments[idx] = dept;
            }
            None => self.departments.push(dept),
        }
        self
    }

    pub fn add_obstacle(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        kind: impl Into<String>,
    ) -> &mut Self {
        self.obstacles.push(Obstacle {
            rect: Rect::new(x, y, w, h),
            kind: kind.into(),
        });
        self
    }

    pub fn add_special_location(
        &mut self,
        id: impl Into<String>,
        x: f32,
        y: f32,
        kind: LocationKind,
    ) -> &mut Self {
        self.special_locations.push(SpecialLocation {
            id: id.into(),
            pos: (x, y),
            kind,
        });
        self
    }

    pub fn set_flow_matrix(&mut self, data: MatrixData) -> &mut Self {
        self.flow = Some(data);
        self
    }

    pub fn set_relationship_matrix(&mut self, data: MatrixData) -> &mut Self {
        self.rel = Some(data);
        self
    }

    pub fn set_precedence_matrix(&mut self, data: MatrixData) -> &mut Self {
        self.precedence = Some(data);
        self
    }

    pub fn set_hazard_matrix(&mut self, data: MatrixData) -> &mut Self {
        self.hazard = Some(data);
        self
    }

    /// Per-department environmental scalars by id. Hazard levels fill whole
    /// rows of the hazard matrix (creating it when absent); noise and
    /// vibration are stored on the instance for collaborators.
    pub fn set_environment_factors(
        &mut self,
        noise: &[(&str, f32)],
        hazard: &[(&str, f32)],
        vibration: &[(&str, f32)],
    ) -> &mut Self {
        self.noise = noise.iter().map(|(id, v)| (id.to_string(), *v)).collect();
        self.hazard_levels = hazard.iter().map(|(id, v)| (id.to_string(), *v)).collect();
        self.vibration = vibration
            .iter()
            .map(|(id, v)| (id.to_string(), *v))
            .collect();
        self
    }

    pub fn set_weights(&mut self, weights: Weights) -> &mut Self {
        self.weights = weights;
        self
    }

    /// Validates the collected data into an immutable instance.
    /// Unknown ids in sparse matrix entries or environment factors are
    /// warnings; structural defects are [`LayoutError::InvalidProblem`].
    pub fn build(&self) -> Result<Instance, LayoutError> {
        self.validate()?;

        let mut instance = Instance::new(
            self.facility,
            self.departments.clone(),
            self.obstacles.clone(),
            self.special_locations.clone(),
            self.weights,
        );

        instance.flow = self.resolve(&instance, self.flow.as_ref(), true, "flow")?;
        instance.rel = self.resolve(&instance, self.rel.as_ref(), true, "relationship")?;
        instance.precedence =
            self.resolve(&instance, self.precedence.as_ref(), false, "precedence")?;
        instance.hazard = self.resolve(&instance, self.hazard.as_ref(), true, "hazard")?;

        for (id, level) in &self.noise {
            match instance.dept_index(id) {
                Some(idx) => instance.noise[idx] = *level,
                None => warn!("[ENG] noise level for unknown department {id}, skipped"),
            }
        }
        for (id, level) in &self.vibration {
            match instance.dept_index(id) {
                Some(idx) => instance.vibration[idx] = *level,
                None => warn!("[ENG] vibration level for unknown department {id}, skipped"),
            }
        }
        if !self.hazard_levels.is_empty() {
            let n = instance.n_depts();
            let mut hazard = instance
                .hazard
                .take()
                .unwrap_or_else(|| SquareMatrix::new(n));
            for (id, level) in &self.hazard_levels {
                match instance.dept_index(id) {
                    Some(i) => {
                        for j in 0..n {
                            hazard[(i, j)] = *level;
                        }
                    }
                    None => warn!("[ENG] hazard level for unknown department {id}, skipped"),
                }
            }
            instance.hazard = Some(hazard);
        }

        Ok(instance)
    }

    /// Builds the instance and runs a full search with default sinks.
    pub fn optimize(&self, config: &SearchConfig) -> Result<BestResult, LayoutError> {
        self.optimize_with(config, &mut NullSearchListener, &BasicTerminator::new())
    }

    pub fn optimize_with(
        &self,
        config: &SearchConfig,
        listener: &mut impl SearchListener,
        terminator: &impl Terminator,
    ) -> Result<BestResult, LayoutError> {
        let instance = self.build()?;
        let rng = match config.rng_seed {
            Some(seed) => {
                info!("[ENG] using seed: {seed}");
                Xoshiro256PlusPlus::seed_from_u64(seed)
            }
            None => {
                let seed = rand::random();
                warn!("[ENG] no seed provided, using: {seed}");
                Xoshiro256PlusPlus::seed_from_u64(seed)
            }
        };
        optimizer::optimize(&instance, config, rng, listener, terminator)
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |msg: String| Err(LayoutError::InvalidProblem(msg));

        if self.facility.width <= 0.0 || self.facility.height <= 0.0 {
            return invalid(format!(
                "facility dimensions must be positive, got {}x{}",
                self.facility.width, self.facility.height
            ));
        }
        if self.departments.is_empty() {
            return invalid("no departments".into());
        }
        for d in &self.departments {
            if d.width <= 0.0 || d.height <= 0.0 {
                return invalid(format!(
                    "department {} has non-positive dimensions {}x{}",
                    d.id, d.width, d.height
                ));
            }
            if !(0.0..=1.0).contains(&d.growth_factor) {
                return invalid(format!(
                    "department {} growth factor {} outside [0, 1]",
                    d.id, d.growth_factor
                ));
            }
            if d.safety_level > 3 {
                return invalid(format!(
                    "department {} safety level {} outside 0..=3",
                    d.id, d.safety_level
                ));
            }
            if d.fixed {
                let Some(pos) = d.fixed_location else {
                    return invalid(format!("fixed department {} has no location", d.id));
                };
                let rect = Rect::new(pos.0, pos.1, d.width, d.height);
                if !rect.within_bounds(self.facility.width, self.facility.height) {
                    return invalid(format!("fixed department {} lies outside the facility", d.id));
                }
            }
        }
        for o in &self.obstacles {
            if o.rect.w <= 0.0 || o.rect.h <= 0.0 {
                return invalid(format!(
                    "{} obstacle at ({}, {}) has non-positive dimensions",
                    o.kind, o.rect.x, o.rect.y
                ));
            }
        }
        Ok(())
    }

    /// Resolves raw matrix input against the catalogue. Sparse entries are
    /// mirrored when the relation is symmetric by convention.
    fn resolve(
        &self,
        instance: &Instance,
        data: Option<&MatrixData>,
        mirror: bool,
        name: &str,
    ) -> Result<Option<SquareMatrix>, LayoutError> {
        let Some(data) = data else {
            return Ok(None);
        };
        let n = instance.n_depts();
        let mut matrix = SquareMatrix::new(n);
        match data {
            MatrixData::Dense(rows) => {
                if rows.len() != n || rows.iter().any(|r| r.len() != n) {
                    return Err(LayoutError::InvalidProblem(format!(
                        "dense {name} matrix is not {n}x{n}"
                    )));
                }
                for (i, row) in rows.iter().enumerate() {
                    for (j, value) in row.iter().enumerate() {
                        matrix[(i, j)] = *value;
                    }
                }
            }
            MatrixData::Sparse(entries) => {
                for (from, to, value) in entries {
                    let (Some(i), Some(j)) =
                        (instance.dept_index(from), instance.dept_index(to))
                    else {
                        warn!("[ENG] {name} entry ({from}, {to}) names an unknown department, skipped");
                        continue;
                    };
                    matrix[(i, j)] = *value;
                    if mirror {
                        matrix[(j, i)] = *value;
                    }
                }
            }
        }
        Ok(Some(matrix))
    }
}
