use crate::instance::{Instance, Orientation};
use crate::solution::{Encoding, Layout, Placement};
use crate::util::assertions;
use log::{debug, warn};

pub mod plp;

/// Outcome of decoding an encoding into a layout.
pub struct Construction {
    pub layout: Layout,
    /// Movable departments that found a spot.
    pub placed: usize,
    pub n_movable: usize,
}

impl Construction {
    pub fn is_complete(&self) -> bool {
        self.placed == self.n_movable
    }
}

/// Places every fixed department at its declared location, horizontal.
/// Violations are data-quality warnings, not failures.
pub fn place_fixed(instance: &Instance, layout: &mut Layout) {
    for dept in instance.fixed() {
        let d = instance.dept(dept);
        let Some(pos) = d.fixed_location else {
            warn!("[CONSTR] fixed department {} has no location", d.id);
            continue;
        };
        layout.placements[dept] = Some(Placement {
            position: pos,
            orientation: Orientation::Horizontal,
        });
    }

    for dept in instance.fixed() {
        let Some(rect) = layout.rect_of(instance, dept) else {
            continue;
        };
        if layout.rect_is_blocked(instance, &rect, Some(dept)) {
            warn!(
                "[CONSTR] fixed department {} overlaps other elements or exceeds the facility",
                instance.dept(dept).id
            );
        }
    }
}

/// Decodes an encoding into a concrete layout.
///
/// Each gene is tried at its preferred anchor (`plp[anchor mod len]`) in every
/// allowed orientation, then against every anchor in list order. A successful
/// placement appends its four corners to the live PLP list so later genes can
/// anchor against it; an exhausted gene leaves its department unplaced.
pub fn construct(instance: &Instance, encoding: &Encoding) -> Construction {
    debug_assert!(assertions::encoding_covers_movables(instance, encoding));

    let mut layout = Layout::empty(instance.n_depts());
    place_fixed(instance, &mut layout);
    layout.plps = plp::generate_plps(instance, &layout);

    let mut placed = 0;
    for gene in &encoding.genes {
        let preferred = gene.anchor % layout.plps.len();
        let success = try_place(instance, &layout, gene.dept, preferred).or_else(|| {
            (0..layout.plps.len()).find_map(|idx| try_place(instance, &layout, gene.dept, idx))
        });

        match success {
            Some(placement) => {
                layout.placements[gene.dept] = Some(placement);
                let rect = layout.rect_of(instance, gene.dept).unwrap();
                layout.plps.extend(rect.corners());
                placed += 1;
                debug!(
                    "[CONSTR] placed {} at ({}, {}) {:?}",
                    instance.dept(gene.dept).id,
                    placement.position.0,
                    placement.position.1,
                    placement.orientation,
                );
            }
            None => {
                debug!(
                    "[CONSTR] no feasible anchor for {}, leaving unplaced",
                    instance.dept(gene.dept).id
                );
            }
        }
    }

    debug_assert!(assertions::movable_placements_feasible(instance, &layout));
    debug_assert!(assertions::plps_contain_placed_corners(instance, &layout));

    Construction {
        layout,
        placed,
        n_movable: encoding.len(),
    }
}

/// First allowed orientation that fits at the given anchor, if any.
fn try_place(
    instance: &Instance,
    layout: &Layout,
    dept: usize,
    anchor_idx: usize,
) -> Option<Placement> {
    let d = instance.dept(dept);
    let anchor = layout.plps[anchor_idx];
    let orientations: &[Orientation] = match d.can_rotate {
        true => &[Orientation::Horizontal, Orientation::Vertical],
        false => &[Orientation::Horizontal],
    };

    orientations
        .iter()
        .map(|&orientation| Placement {
            position: anchor,
            orientation,
        })
        .find(|p| {
            let rect = d.rect_at(p.position, p.orientation);
            !layout.rect_is_blocked(instance, &rect, Some(dept))
        })
}
