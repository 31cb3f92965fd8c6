use crate::instance::Instance;
use crate::solution::{Encoding, Layout};

/// Every placed movable department lies inside the facility, clears all
/// obstacles and overlaps no other placed department. Fixed departments are
/// exempt: bad fixed data is warned about, not rejected.
pub fn movable_placements_feasible(instance: &Instance, layout: &Layout) -> bool {
    for i in instance.movable() {
        let Some(rect) = layout.rect_of(instance, i) else {
            continue;
        };
        if !rect.within_bounds(instance.facility.width, instance.facility.height) {
            return false;
        }
        if instance.obstacles.iter().any(|o| rect.overlaps(&o.rect)) {
            return false;
        }
        for j in 0..instance.n_depts() {
            if j == i {
                continue;
            }
            if let Some(other) = layout.rect_of(instance, j) {
                if rect.overlaps(&other) {
                    return false;
                }
            }
        }
    }
    true
}

/// Full feasibility, fixed departments included. Holds whenever the problem
/// data itself is clean.
pub fn layout_is_feasible(instance: &Instance, layout: &Layout) -> bool {
    for i in 0..instance.n_depts() {
        let Some(rect) = layout.rect_of(instance, i) else {
            continue;
        };
        if !rect.within_bounds(instance.facility.width, instance.facility.height) {
            return false;
        }
        if instance.obstacles.iter().any(|o| rect.overlaps(&o.rect)) {
            return false;
        }
        for j in (i + 1)..instance.n_depts() {
            if let Some(other) = layout.rect_of(instance, j) {
                if rect.overlaps(&other) {
                    return false;
                }
            }
        }
    }
    true
}

pub fn encoding_covers_movables(instance: &Instance, encoding: &Encoding) -> bool {
    encoding.covers_movables(instance)
}

/// The four corners of every placed department appear in the PLP snapshot.
pub fn plps_contain_placed_corners(instance: &Instance, layout: &Layout) -> bool {
    (0..instance.n_depts())
        .filter_map(|i| layout.rect_of(instance, i))
        .all(|rect| {
            rect.corners()
                .iter()
                .all(|corner| layout.plps.contains(corner))
        })
}
