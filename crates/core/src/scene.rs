//! Scene model: the geometry cache every generator fills.
//!
//! A [`Scene`] is the single value produced by a generation pass and read by
//! both the interactive draw step and the SVG export, so the two always
//! agree. Layers group geometry by class (wireframe edges, maze walls,
//! solution overlay, tessellation cells) and carry the stroke/fill styling
//! the serializer emits.

use glam::DVec2;

/// Stroke/fill styling for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// CSS color for the stroke, e.g. `"black"` or `"#cc3333"`.
    pub color: String,
    /// Stroke width in canvas units. Individual paths may override it.
    pub width: f64,
    /// Fill color, or `None` for unfilled geometry.
    pub fill: Option<String>,
}

impl Stroke {
    /// Plain black pen of the given width, no fill.
    pub fn pen(width: f64) -> Self {
        Self {
            color: "black".to_owned(),
            width,
            fill: None,
        }
    }

    /// Colored pen of the given width, no fill.
    pub fn colored(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            fill: None,
        }
    }
}

/// One pen path: an ordered point sequence, optionally closed into a
/// polygon, with an optional per-path stroke-width override (used for
/// distance-based stroke scaling in the 3D generators).
#[derive(Debug, Clone, PartialEq)]
pub struct Path2 {
    pub points: Vec<DVec2>,
    pub closed: bool,
    pub width: Option<f64>,
}

impl Path2 {
    /// An open polyline through `points`.
    pub fn open(points: Vec<DVec2>) -> Self {
        Self {
            points,
            closed: false,
            width: None,
        }
    }

    /// A closed polygon through `points` (last point connects to first).
    pub fn closed(points: Vec<DVec2>) -> Self {
        Self {
            points,
            closed: true,
            width: None,
        }
    }

    /// A two-point line segment.
    pub fn line(a: DVec2, b: DVec2) -> Self {
        Self::open(vec![a, b])
    }

    /// Attaches a per-path stroke width override.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

/// A named group of paths sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub style: Stroke,
    pub paths: Vec<Path2>,
}

impl Layer {
    pub fn new(name: impl Into<String>, style: Stroke) -> Self {
        Self {
            name: name.into(),
            style,
            paths: Vec::new(),
        }
    }

    pub fn push(&mut self, path: Path2) {
        self.paths.push(path);
    }
}

/// The complete output of one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// True when no layer holds any path. An empty scene is valid output
    /// (e.g. a tessellation with fewer than 3 sites), not an error.
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.paths.is_empty())
    }

    /// Total number of paths across all layers.
    pub fn path_count(&self) -> usize {
        self.layers.iter().map(|l| l.paths.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_is_empty() {
        let s = Scene::new(800.0, 600.0);
        assert!(s.is_empty());
        assert_eq!(s.path_count(), 0);
    }

    #[test]
    fn scene_with_empty_layers_is_still_empty() {
        let mut s = Scene::new(800.0, 600.0);
        s.push_layer(Layer::new("walls", Stroke::pen(2.0)));
        assert!(s.is_empty());
    }

    #[test]
    fn pushing_a_path_makes_the_scene_non_empty() {
        let mut s = Scene::new(800.0, 600.0);
        let mut layer = Layer::new("walls", Stroke::pen(2.0));
        layer.push(Path2::line(DVec2::ZERO, DVec2::new(1.0, 1.0)));
        s.push_layer(layer);
        assert!(!s.is_empty());
        assert_eq!(s.path_count(), 1);
    }

    #[test]
    fn path_width_override_round_trips() {
        let p = Path2::line(DVec2::ZERO, DVec2::ONE).with_width(0.4);
        assert_eq!(p.width, Some(0.4));
    }

    #[test]
    fn closed_flag_distinguishes_polygon_from_polyline() {
        let pts = vec![DVec2::ZERO, DVec2::X, DVec2::Y];
        assert!(!Path2::open(pts.clone()).closed);
        assert!(Path2::closed(pts).closed);
    }
}
