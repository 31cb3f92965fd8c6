use crate::eval::ObjectiveBreakdown;
use crate::instance::{Instance, LocationKind};
use crate::solution::Layout;
use crate::util::listener::{ReportType, SearchListener};
use anyhow::{Context, Result};
use log::{Level, log};
use std::fs;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Rectangle, Text};

/// Writes layouts reported during a search to SVG files.
pub struct LayoutSvgExporter {
    svg_counter: usize,
    /// Path to write the final layout SVG to, if provided
    pub final_path: Option<String>,
    /// Directory to write every reported layout SVG to, if provided
    pub intermediate_dir: Option<String>,
}

impl LayoutSvgExporter {
    pub fn new(final_path: Option<String>, intermediate_dir: Option<String>) -> Self {
        Self {
            svg_counter: 0,
            final_path,
            intermediate_dir,
        }
    }
}

impl SearchListener for LayoutSvgExporter {
    fn report(
        &mut self,
        report: ReportType,
        layout: &Layout,
        breakdown: &ObjectiveBreakdown,
        instance: &Instance,
    ) {
        let suffix = match report {
            ReportType::Initial => "init",
            ReportType::Improving => "impr",
            ReportType::Restart => "rstrt",
            ReportType::Final => "final",
        };
        if let Some(intermediate_dir) = &self.intermediate_dir {
            let file_name = format!(
                "{}_{:.4}_{}.svg",
                self.svg_counter, breakdown.objective, suffix
            );
            let svg = layout_to_svg(instance, layout);
            write_svg(&svg, Path::new(&format!("{intermediate_dir}/{file_name}")), Level::Trace)
                .expect("failed to write intermediate svg");
            self.svg_counter += 1;
        }
        if let Some(final_path) = &self.final_path
            && report == ReportType::Final
        {
            let svg = layout_to_svg(instance, layout);
            write_svg(&svg, Path::new(final_path), Level::Info).expect("failed to write final svg");
        }
    }
}

pub fn write_svg(document: &Document, path: &Path, log_lvl: Level) -> Result<()> {
    //make sure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("could not create parent directory for svg file")?;
    }
    svg::save(path, document)?;
    log!(
        log_lvl,
        "[IO] svg exported to file://{}",
        fs::canonicalize(path)
            .context("could not canonicalize path")?
            .to_str()
            .context("could not convert path to str")?
    );
    Ok(())
}

/// Renders a layout: facility outline, obstacles, departments (fixed ones
/// darker) and special-location markers. SVG's y axis points down, so every
/// rectangle is flipped around the facility's horizontal center line.
pub fn layout_to_svg(instance: &Instance, layout: &Layout) -> Document {
    let (fw, fh) = (instance.facility.width, instance.facility.height);
    let margin = f32::max(fw, fh) * 0.05;

    let mut doc = Document::new()
        .set(
            "viewBox",
            (-margin, -margin, fw + 2.0 * margin, fh + 2.0 * margin),
        )
        .add(
            Rectangle::new()
                .set("x", 0.0)
                .set("y", 0.0)
                .set("width", fw)
                .set("height", fh)
                .set("fill", "white")
                .set("stroke", "black")
                .set("stroke-width", 0.1),
        );

    for obstacle in &instance.obstacles {
        let r = &obstacle.rect;
        doc = doc.add(
            Rectangle::new()
                .set("x", r.x)
                .set("y", fh - r.y - r.h)
                .set("width", r.w)
                .set("height", r.h)
                .set("fill", "dimgray"),
        );
    }

    for (idx, dept) in instance.departments.iter().enumerate() {
        let Some(rect) = layout.rect_of(instance, idx) else {
            continue;
        };
        let fill = match dept.fixed {
            true => "lightslategray",
            false => "lightsteelblue",
        };
        let (cx, cy) = rect.center();
        doc = doc
            .add(
                Rectangle::new()
                    .set("x", rect.x)
                    .set("y", fh - rect.y - rect.h)
                    .set("width", rect.w)
                    .set("height", rect.h)
                    .set("fill", fill)
                    .set("stroke", "black")
                    .set("stroke-width", 0.05),
            )
            .add(
                Text::new(dept.id.clone())
                    .set("x", cx)
                    .set("y", fh - cy)
                    .set("font-size", f32::min(rect.w, rect.h) * 0.4)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle"),
            );
    }

    for loc in &instance.special_locations {
        let color = match loc.kind {
            LocationKind::Entry => "seagreen",
            LocationKind::Exit | LocationKind::EmergencyExit => "firebrick",
            LocationKind::Other => "goldenrod",
        };
        doc = doc.add(
            Circle::new()
                .set("cx", loc.pos.0)
                .set("cy", fh - loc.pos.1)
                .set("r", f32::max(fw, fh) * 0.01)
                .set("fill", color),
        );
    }

    doc
}
