use crate::instance::Instance;
use itertools::Itertools;

/// One slot of the search genotype: a movable department and the PLP index it
/// prefers. The index is a hint: the constructor wraps it modulo the live
/// PLP list and falls back to a full scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gene {
    pub dept: usize,
    pub anchor: usize,
}

/// Ordered placement list covering every movable department exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub genes: Vec<Gene>,
}

impl Encoding {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Fraction of positions holding an identical `(dept, anchor)` pair.
    /// Encodings of different lengths are entirely dissimilar; two empty
    /// encodings are identical.
    pub fn similarity(&self, other: &Encoding) -> f32 {
        if self.len() != other.len() {
            return 0.0;
        }
        if self.is_empty() {
            return 1.0;
        }
        let matches = self
            .genes
            .iter()
            .zip(&other.genes)
            .filter(|(a, b)| a == b)
            .count();
        matches as f32 / self.len() as f32
    }

    pub fn is_similar(&self, other: &Encoding, threshold: f32) -> bool {
        self.similarity(other) >= threshold
    }

    /// Every movable department appears exactly once, and nothing else does.
    pub fn covers_movables(&self, instance: &Instance) -> bool {
        let mut depts = self.genes.iter().map(|g| g.dept).collect_vec();
        depts.sort_unstable();
        depts.dedup();
        depts.len() == self.genes.len() && depts.into_iter().eq(instance.movable())
    }
}
