//! Geometry-to-SVG serialization.
//!
//! Turns a [`Scene`] into a standalone SVG document: a root element sized
//! to the canvas, a white background rectangle, and one `<g>` per layer
//! with the layer's stroke/fill attributes. Coordinates are written at
//! fixed 2-decimal precision straight from the scene cache — the same
//! numbers the draw path uses, so the export is a faithful snapshot of the
//! last generated frame.

use crate::scene::{Path2, Scene};
use std::fmt::Write;

/// Decimal places used for every emitted coordinate.
const PRECISION: usize = 2;

/// Serializes a scene to a complete SVG document string.
///
/// An empty scene still yields a well-formed document (background only);
/// callers that want to refuse empty exports check [`Scene::is_empty`]
/// before calling.
pub fn document(scene: &Scene) -> String {
    let mut out = String::new();
    let w = scene.width;
    let h = scene.height;
    // Writing to a String cannot fail; discard the fmt::Result.
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);

    for layer in &scene.layers {
        if layer.paths.is_empty() {
            continue;
        }
        let fill = layer.style.fill.as_deref().unwrap_or("none");
        let _ = writeln!(
            out,
            r#"<g id="{}" stroke="{}" stroke-width="{}" fill="{}" stroke-linecap="round" stroke-linejoin="round">"#,
            layer.name, layer.style.color, layer.style.width, fill
        );
        for path in &layer.paths {
            write_path(&mut out, path);
        }
        let _ = writeln!(out, "</g>");
    }

    let _ = writeln!(out, "</svg>");
    out
}

fn write_path(out: &mut String, path: &Path2) {
    if path.points.len() < 2 {
        return;
    }
    let width_attr = match path.width {
        Some(w) => format!(r#" stroke-width="{}""#, fmt_coord(w)),
        None => String::new(),
    };
    if path.points.len() == 2 && !path.closed {
        let (a, b) = (path.points[0], path.points[1]);
        let _ = writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            fmt_coord(a.x),
            fmt_coord(a.y),
            fmt_coord(b.x),
            fmt_coord(b.y),
            width_attr
        );
        return;
    }
    let points: Vec<String> = path
        .points
        .iter()
        .map(|p| format!("{},{}", fmt_coord(p.x), fmt_coord(p.y)))
        .collect();
    let tag = if path.closed { "polygon" } else { "polyline" };
    let _ = writeln!(
        out,
        r#"<{} points="{}"{}/>"#,
        tag,
        points.join(" "),
        width_attr
    );
}

/// Formats one coordinate at the document's fixed precision.
pub fn fmt_coord(v: f64) -> String {
    format!("{v:.PRECISION$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Layer, Stroke};
    use glam::DVec2;

    fn one_line_scene() -> Scene {
        let mut scene = Scene::new(800.0, 600.0);
        let mut layer = Layer::new("edges", Stroke::pen(1.5));
        layer.push(Path2::line(
            DVec2::new(10.123, 20.456),
            DVec2::new(399.999, 300.0),
        ));
        scene.push_layer(layer);
        scene
    }

    #[test]
    fn document_has_root_size_and_white_background() {
        let svg = document(&one_line_scene());
        assert!(svg.contains(r#"width="800" height="600""#));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn coordinates_are_written_at_two_decimal_precision() {
        let svg = document(&one_line_scene());
        // 10.123 rounds to 10.12, 399.999 rounds to 400.00: exactly the
        // values a reader recovers at the stated precision.
        assert!(svg.contains(r#"x1="10.12""#), "{svg}");
        assert!(svg.contains(r#"y1="20.46""#), "{svg}");
        assert!(svg.contains(r#"x2="400.00""#), "{svg}");
    }

    #[test]
    fn layers_become_groups_with_stroke_attributes() {
        let svg = document(&one_line_scene());
        assert!(svg.contains(r#"<g id="edges" stroke="black" stroke-width="1.5" fill="none""#));
    }

    #[test]
    fn closed_paths_become_polygons_and_open_become_polylines() {
        let mut scene = Scene::new(100.0, 100.0);
        let mut cells = Layer::new("cells", Stroke::pen(1.0));
        cells.push(Path2::closed(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
        ]));
        cells.push(Path2::open(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(10.0, 0.0),
        ]));
        scene.push_layer(cells);
        let svg = document(&scene);
        assert!(svg.contains("<polygon points="));
        assert!(svg.contains("<polyline points="));
    }

    #[test]
    fn per_path_width_override_is_emitted_on_the_element() {
        let mut scene = Scene::new(100.0, 100.0);
        let mut layer = Layer::new("edges", Stroke::pen(1.0));
        layer.push(Path2::line(DVec2::ZERO, DVec2::new(50.0, 50.0)).with_width(0.37));
        scene.push_layer(layer);
        let svg = document(&scene);
        assert!(svg.contains(r#"stroke-width="0.37""#), "{svg}");
    }

    #[test]
    fn empty_scene_serializes_to_background_only_document() {
        let svg = document(&Scene::new(800.0, 600.0));
        assert!(svg.contains("<rect"));
        assert!(!svg.contains("<g "));
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn degenerate_single_point_paths_are_skipped() {
        let mut scene = Scene::new(100.0, 100.0);
        let mut layer = Layer::new("edges", Stroke::pen(1.0));
        layer.push(Path2::open(vec![DVec2::new(1.0, 1.0)]));
        scene.push_layer(layer);
        let svg = document(&scene);
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn layer_fill_color_is_emitted_when_present() {
        let mut scene = Scene::new(100.0, 100.0);
        let mut layer = Layer::new(
            "cells",
            Stroke {
                color: "black".into(),
                width: 1.0,
                fill: Some("#eeeeee".into()),
            },
        );
        layer.push(Path2::closed(vec![
            DVec2::ZERO,
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
        ]));
        scene.push_layer(layer);
        let svg = document(&scene);
        assert!(svg.contains(r##"fill="#eeeeee""##));
    }
}
