use crate::consts::*;
use crate::geometry::{Rect, manhattan};
use crate::instance::Instance;
use crate::solution::Layout;

/// The four sub-scores and the scalar objective they aggregate into.
/// Smaller objective is better; the sub-scores keep their natural sign
/// (distance is a cost, the other three are rewards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveBreakdown {
    pub distance_cost: f32,
    pub adjacency_score: f32,
    pub safety_score: f32,
    pub flexibility_score: f32,
    pub objective: f32,
}

/// Scores a layout. Never fails: unplaced departments are skipped and a
/// missing matrix zeroes out the sub-score that reads it.
pub fn evaluate(instance: &Instance, layout: &Layout) -> ObjectiveBreakdown {
    let distance_cost = distance_cost(instance, layout);
    let adjacency_score = adjacency_score(instance, layout);
    let safety_score = safety_score(instance, layout);
    let flexibility_score = flexibility_score(instance, layout);

    let n_dist = f32::min(1.0, distance_cost / (DISTANCE_NORM + NORM_EPSILON));
    let n_adj = f32::min(1.0, f32::max(0.0, adjacency_score) / (ADJACENCY_NORM + NORM_EPSILON));
    let n_saf = f32::min(1.0, f32::max(0.0, safety_score) / (SAFETY_NORM + NORM_EPSILON));
    let n_flex = f32::min(
        1.0,
        f32::max(0.0, flexibility_score) / (FLEXIBILITY_NORM + NORM_EPSILON),
    );

    let w = &instance.weights;
    let objective =
        w.distance * n_dist - w.adjacency * n_adj - w.safety * n_saf - w.flexibility * n_flex;

    ObjectiveBreakdown {
        distance_cost,
        adjacency_score,
        safety_score,
        flexibility_score,
        objective,
    }
}

/// Total material-handling cost: `flow * manhattan(center, center)` over all
/// ordered pairs with positive flow.
fn distance_cost(instance: &Instance, layout: &Layout) -> f32 {
    let Some(flow) = &instance.flow else {
        return 0.0;
    };

    let mut cost = 0.0;
    for (i, j) in placed_pairs(instance, layout) {
        if flow[(i, j)] > 0.0 {
            let d = manhattan(
                layout.center_of(instance, i).unwrap(),
                layout.center_of(instance, j).unwrap(),
            );
            cost += flow[(i, j)] * d;
        }
    }
    cost
}

/// Rewards A/E/I pairs that ended up adjacent and penalizes adjacent X pairs.
/// Both directions of the REL matrix are read as stored; an asymmetric entry
/// contributes each direction independently.
fn adjacency_score(instance: &Instance, layout: &Layout) -> f32 {
    let Some(rel) = &instance.rel else {
        return 0.0;
    };

    let mut score = 0.0;
    for (i, j) in placed_pairs(instance, layout) {
        let d = manhattan(
            layout.center_of(instance, i).unwrap(),
            layout.center_of(instance, j).unwrap(),
        );
        // adjacency radius uses declared dimensions, not effective ones
        let adjacent = d < f32::max(instance.dept(i).max_extent(), instance.dept(j).max_extent());
        let value = rel[(i, j)];
        if adjacent && value >= REL_REWARD_MIN {
            score += value;
        } else if adjacent && value < 0.0 {
            score -= REL_CONFLICT_PENALTY;
        }
    }
    score
}

/// Exit proximity for high-risk departments plus hazard separation shortfall.
/// Gated on the hazard matrix being present.
fn safety_score(instance: &Instance, layout: &Layout) -> f32 {
    let Some(hazard) = &instance.hazard else {
        return 0.0;
    };

    let mut score = 0.0;
    let exit_radius = instance.facility.exit_radius();
    for i in 0..instance.n_depts() {
        let Some(center) = layout.center_of(instance, i) else {
            continue;
        };
        if instance.dept(i).safety_level >= HIGH_RISK_SAFETY_LEVEL {
            let near_exit = instance
                .special_locations
                .iter()
                .any(|loc| loc.kind.is_exit() && manhattan(center, loc.pos) < exit_radius);
            score += match near_exit {
                true => EXIT_NEARBY_BONUS,
                false => -EXIT_MISSING_PENALTY,
            };
        }
    }

    for (i, j) in placed_pairs(instance, layout) {
        let level = hazard[(i, j)];
        if level > 0.0 {
            let min_d = level * HAZARD_SEPARATION_PER_LEVEL;
            let d = manhattan(
                layout.center_of(instance, i).unwrap(),
                layout.center_of(instance, j).unwrap(),
            );
            if d < min_d {
                score -= (min_d - d) * HAZARD_SHORTFALL_PENALTY;
            }
        }
    }
    score
}

/// Growth headroom probes and external-access placement. Needs no matrix.
fn flexibility_score(instance: &Instance, layout: &Layout) -> f32 {
    let mut score = 0.0;
    for i in 0..instance.n_depts() {
        let Some(rect) = layout.rect_of(instance, i) else {
            continue;
        };
        let d = instance.dept(i);

        if d.growth_factor > 0.0 {
            let has_room = expansion_probes(&rect, d.growth_factor)
                .iter()
                .any(|probe| !layout.rect_is_blocked(instance, probe, Some(i)));
            score += match has_room {
                true => GROWTH_ROOM_BONUS * d.growth_factor,
                false => -GROWTH_BLOCKED_PENALTY * d.growth_factor,
            };
        }

        if d.external_access_needed {
            let on_boundary = rect.x == 0.0
                || rect.y == 0.0
                || rect.x + rect.w >= instance.facility.width
                || rect.y + rect.h >= instance.facility.height;
            score += match on_boundary {
                true => EXTERNAL_ACCESS_BONUS,
                false => -EXTERNAL_ACCESS_PENALTY,
            };
        }
    }
    score
}

/// Probe rectangles flush against the right, left, top and bottom sides. The
/// probe spans the full perpendicular extent and `max(side * growth, 1)`
/// along the expansion axis.
fn expansion_probes(rect: &Rect, growth_factor: f32) -> [Rect; 4] {
    let probe_w = f32::max(rect.w * growth_factor, MIN_GROWTH_PROBE);
    let probe_h = f32::max(rect.h * growth_factor, MIN_GROWTH_PROBE);
    [
        Rect::new(rect.x + rect.w, rect.y, probe_w, rect.h),
        Rect::new(rect.x - probe_w, rect.y, probe_w, rect.h),
        Rect::new(rect.x, rect.y + rect.h, rect.w, probe_h),
        Rect::new(rect.x, rect.y - probe_h, rect.w, probe_h),
    ]
}

/// Ordered pairs `(i, j)`, `i != j`, with both departments placed.
fn placed_pairs<'a>(
    instance: &'a Instance,
    layout: &'a Layout,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let n = instance.n_depts();
    (0..n)
        .flat_map(move |i| (0..n).map(move |j| (i, j)))
        .filter(move |&(i, j)| {
            i != j && layout.placements[i].is_some() && layout.placements[j].is_some()
        })
}
