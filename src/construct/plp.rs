use crate::geometry::{Point, Rect};
use crate::instance::Instance;
use crate::solution::Layout;
use log::debug;

/// Builds the potential-location-point list for a layout: facility corners,
/// then the corners of every fixed department, obstacle and placed movable
/// department, then every special-location point. Duplicates are kept; the
/// constructor treats index-equivalent anchors identically.
pub fn generate_plps(instance: &Instance, layout: &Layout) -> Vec<Point> {
    let facility = Rect::new(0.0, 0.0, instance.facility.width, instance.facility.height);
    let mut plps: Vec<Point> = facility.corners().to_vec();

    for dept in instance.fixed() {
        if let Some(rect) = layout.rect_of(instance, dept) {
            plps.extend(rect.corners());
        }
    }
    for obstacle in &instance.obstacles {
        plps.extend(obstacle.rect.corners());
    }
    for dept in instance.movable() {
        if let Some(rect) = layout.rect_of(instance, dept) {
            plps.extend(rect.corners());
        }
    }
    for loc in &instance.special_locations {
        plps.push(loc.pos);
    }

    debug!("[CONSTR] generated {} potential location points", plps.len());
    plps
}
