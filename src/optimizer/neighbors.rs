use crate::instance::Instance;
use crate::solution::Encoding;
use itertools::Itertools;
use rand::Rng;
use rand::seq::IndexedRandom;
use tap::Tap;

/// Neighborhood operators, selected uniformly. `ChangeDirection` leaves the
/// encoding structurally unchanged (the orientation flip is realized by the
/// constructor's trial order) and `MoveDepartment` perturbs the anchor like
/// `ChangeLocation`; both are kept as named operators so the distribution
/// over next encodings stays at 1/2 anchor perturbation, 1/4 swap, 1/4 no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborOp {
    Swap,
    ChangeLocation,
    ChangeDirection,
    MoveDepartment,
}

impl NeighborOp {
    pub const ALL: [NeighborOp; 4] = [
        NeighborOp::Swap,
        NeighborOp::ChangeLocation,
        NeighborOp::ChangeDirection,
        NeighborOp::MoveDepartment,
    ];
}

/// Derives one candidate encoding from `current`. Anchor draws index into the
/// live PLP list of the current layout (`n_plps` entries).
pub fn generate_neighbor(
    instance: &Instance,
    current: &Encoding,
    n_plps: usize,
    rng: &mut impl Rng,
) -> Encoding {
    let op = *NeighborOp::ALL.choose(rng).unwrap();
    current.clone().tap_mut(|enc| apply(instance, enc, op, n_plps, rng))
}

fn apply(
    instance: &Instance,
    enc: &mut Encoding,
    op: NeighborOp,
    n_plps: usize,
    rng: &mut impl Rng,
) {
    match op {
        NeighborOp::Swap => {
            if enc.len() >= 2 {
                let picked = rand::seq::index::sample(rng, enc.len(), 2);
                enc.genes.swap(picked.index(0), picked.index(1));
            }
        }
        NeighborOp::ChangeLocation | NeighborOp::MoveDepartment => {
            if !enc.is_empty() {
                let pos = rng.random_range(0..enc.len());
                enc.genes[pos].anchor = rng.random_range(0..n_plps);
            }
        }
        NeighborOp::ChangeDirection => {
            let rotatable = enc
                .genes
                .iter()
                .positions(|g| instance.dept(g.dept).can_rotate)
                .collect_vec();
            // drawn for the operator mix; the flip happens during construction
            let _ = rotatable.choose(rng);
        }
    }
}
