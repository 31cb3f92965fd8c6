use crate::geometry::{Point, Rect};

/// Orientation of a department's bounding box.
/// Vertical swaps the declared width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A department from the catalogue. Position and orientation are runtime
/// state and live in [`crate::solution::Layout`], not here.
#[derive(Debug, Clone)]
pub struct Department {
    pub id: String,
    pub width: f32,
    pub height: f32,
    /// Carried for collaborators that model depth; the engine places in 2D.
    pub depth: Option<f32>,
    pub area: f32,
    pub fixed: bool,
    pub fixed_location: Option<Point>,
    pub can_rotate: bool,
    /// Expected growth in `[0, 1]`, drives the flexibility probes.
    pub growth_factor: f32,
    pub external_access_needed: bool,
    pub natural_light_needed: bool,
    /// Risk level in `0..=3`; levels `>= 2` want an exit nearby.
    pub safety_level: u8,
}

impl Department {
    pub fn new(id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            depth: None,
            area: width * height,
            fixed: false,
            fixed_location: None,
            can_rotate: true,
            growth_factor: 0.0,
            external_access_needed: false,
            natural_light_needed: false,
            safety_level: 0,
        }
    }

    /// Effective `(w, h)` under the given orientation.
    pub fn footprint(&self, orientation: Orientation) -> (f32, f32) {
        match orientation {
            Orientation::Horizontal => (self.width, self.height),
            Orientation::Vertical => (self.height, self.width),
        }
    }

    pub fn rect_at(&self, pos: Point, orientation: Orientation) -> Rect {
        let (w, h) = self.footprint(orientation);
        Rect::new(pos.0, pos.1, w, h)
    }

    /// Largest declared dimension, the adjacency radius contribution.
    pub fn max_extent(&self) -> f32 {
        f32::max(self.width, self.height)
    }
}

/// Fixed obstruction inside the facility (wall, column, ...).
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Entry,
    Exit,
    EmergencyExit,
    Other,
}

impl LocationKind {
    /// Exits (regular and emergency) satisfy the exit-proximity check.
    pub fn is_exit(&self) -> bool {
        matches!(self, LocationKind::Exit | LocationKind::EmergencyExit)
    }
}

/// Point-like boundary feature: entry, exit, loading dock, ...
#[derive(Debug, Clone)]
pub struct SpecialLocation {
    pub id: String,
    pub pos: Point,
    pub kind: LocationKind,
}
