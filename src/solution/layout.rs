use crate::geometry::{Point, Rect};
use crate::instance::{Instance, Orientation};

/// A concrete position for one department.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Bottom-left corner of the effective bounding box.
    pub position: Point,
    pub orientation: Orientation,
}

/// The search phenotype: one optional placement per catalogue department plus
/// the PLP list as it stood at the end of the construction pass.
#[derive(Debug, Clone)]
pub struct Layout {
    pub placements: Vec<Option<Placement>>,
    pub plps: Vec<Point>,
}

impl Layout {
    pub fn empty(n_depts: usize) -> Self {
        Self {
            placements: vec![None; n_depts],
            plps: vec![],
        }
    }

    /// Effective bounding box of a placed department.
    pub fn rect_of(&self, instance: &Instance, dept: usize) -> Option<Rect> {
        self.placements[dept]
            .map(|p| instance.dept(dept).rect_at(p.position, p.orientation))
    }

    pub fn center_of(&self, instance: &Instance, dept: usize) -> Option<Point> {
        self.rect_of(instance, dept).map(|r| r.center())
    }

    /// Whether a candidate rectangle is unusable: outside the facility, or
    /// intersecting an obstacle or any placed department other than `exclude`.
    pub fn rect_is_blocked(
        &self,
        instance: &Instance,
        rect: &Rect,
        exclude: Option<usize>,
    ) -> bool {
        if !rect.within_bounds(instance.facility.width, instance.facility.height) {
            return true;
        }
        for (dept, placement) in self.placements.iter().enumerate() {
            if Some(dept) == exclude {
                continue;
            }
            if let Some(p) = placement {
                let other = instance.dept(dept).rect_at(p.position, p.orientation);
                if rect.overlaps(&other) {
                    return true;
                }
            }
        }
        instance.obstacles.iter().any(|o| rect.overlaps(&o.rect))
    }
}
