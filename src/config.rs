/// Parameters of a tabu-search run.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_iterations: usize,
    /// Number of recent encodings kept in the tabu queue.
    pub tabu_tenure: usize,
    /// Consecutive non-improving iterations tolerated before restart/termination.
    pub max_non_improving: usize,
    /// Seed for the search RNG; `None` draws a fresh one (and logs it).
    pub rng_seed: Option<u64>,
}

pub const DEFAULT_SEARCH_CONFIG: SearchConfig = SearchConfig {
    max_iterations: 200,
    tabu_tenure: 15,
    max_non_improving: 30,
    rng_seed: None,
};
