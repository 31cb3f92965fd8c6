use thiserror::Error;

/// Errors that surface to the caller of `optimize`. Data-quality issues that
/// leave the problem solvable are reported as warnings instead.
#[derive(Debug, Clone, Error)]
pub enum LayoutError {
    #[error("invalid problem: {0}")]
    InvalidProblem(String),
    #[error("no feasible initial layout after {attempts} construction attempts")]
    InfeasibleInitial { attempts: usize },
}
