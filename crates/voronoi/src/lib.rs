#![deny(unsafe_code)]
//! Voronoi/Delaunay tessellation generator.
//!
//! Distributes sites over the canvas under a configurable policy, builds a
//! Delaunay triangulation, and derives the dual Voronoi diagram clipped to
//! the margin rectangle. The `voronoice` crate does the triangulation math;
//! the site policy, clip configuration, and cell/triangle extraction here
//! are what turn it into a plottable pattern.
//!
//! Fewer than three sites (after the minimum-distance filter) is valid
//! input: the pass produces an empty scene, never an error.

use plotlines_core::glam::DVec2;
use plotlines_core::params::{param_bool, param_f64, param_string, param_usize};
use plotlines_core::sites::{generate_sites, Distribution, SiteConfig};
use plotlines_core::{Generator, GeneratorError, Layer, Path2, Rect, Scene, Stroke, Xorshift64};
use serde_json::{json, Value};
use voronoice::{BoundingBox, ClipBehavior, Point, VoronoiBuilder};

/// Default site count.
const DEFAULT_NUM_POINTS: usize = 120;
/// Default inset from the canvas edge.
const DEFAULT_MARGIN: f64 = 20.0;
/// Stroke width for cell and triangle outlines.
const OUTLINE_WIDTH: f64 = 1.0;
/// Half-size of the cross drawn per site when `draw_sites` is set.
const SITE_MARK: f64 = 2.0;

/// Which dual of the site set gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramStyle {
    /// Clipped convex Voronoi cell polygons.
    #[default]
    Cells,
    /// Delaunay triangles over the sites.
    Triangles,
}

impl DiagramStyle {
    /// Parses a style name; unrecognized names fall back to `Cells`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "triangles" => DiagramStyle::Triangles,
            _ => DiagramStyle::Cells,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiagramStyle::Cells => "cells",
            DiagramStyle::Triangles => "triangles",
        }
    }
}

/// Parameters for the tessellation generator.
#[derive(Debug, Clone)]
pub struct TessellationParams {
    /// Size of the site set.
    pub num_points: usize,
    /// Inset from the canvas edge; sites and cells stay inside it.
    pub boundary_margin: f64,
    pub distribution: Distribution,
    /// Greedy rejection threshold; 0 disables.
    pub min_distance: f64,
    /// [0, 1] → 2..=10 clusters (clustered distribution only).
    pub cluster_factor: f64,
    /// [0, 1], higher is tighter (clustered distribution only).
    pub cluster_tightness: f64,
    pub style: DiagramStyle,
    /// Draw a small cross at every site.
    pub draw_sites: bool,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            boundary_margin: DEFAULT_MARGIN,
            distribution: Distribution::Random,
            min_distance: 0.0,
            cluster_factor: 0.5,
            cluster_tightness: 0.5,
            style: DiagramStyle::Cells,
            draw_sites: false,
        }
    }
}

impl TessellationParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            num_points: param_usize(params, "num_points", DEFAULT_NUM_POINTS),
            boundary_margin: param_f64(params, "boundary_margin", DEFAULT_MARGIN),
            distribution: Distribution::from_name(&param_string(
                params,
                "distribution",
                "random",
            )),
            min_distance: param_f64(params, "min_distance", 0.0),
            cluster_factor: param_f64(params, "cluster_factor", 0.5),
            cluster_tightness: param_f64(params, "cluster_tightness", 0.5),
            style: DiagramStyle::from_name(&param_string(params, "style", "cells")),
            draw_sites: param_bool(params, "draw_sites", false),
        }
    }
}

/// The tessellation generator: sites, triangulation, dual cells.
pub struct Tessellation {
    width: f64,
    height: f64,
    seed: u64,
    params: TessellationParams,
    sites: Vec<DVec2>,
    /// Per-site clipped convex cell polygon; `None` where degenerate.
    cells: Vec<Option<Vec<DVec2>>>,
    /// Delaunay triangles as site-index triples.
    triangles: Vec<[usize; 3]>,
    scene: Option<Scene>,
}

impl Tessellation {
    pub fn new(
        width: f64,
        height: f64,
        seed: u64,
        params: TessellationParams,
    ) -> Result<Self, GeneratorError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(GeneratorError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            seed,
            params,
            sites: Vec::new(),
            cells: Vec::new(),
            triangles: Vec::new(),
            scene: None,
        })
    }

    /// Creates a tessellation generator from a JSON params object.
    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, GeneratorError> {
        Self::new(width, height, seed, TessellationParams::from_json(json_params))
    }

    /// Same, but with the diagram style fixed regardless of the params
    /// object (the registry exposes cells and triangles as two names).
    pub fn from_json_with_style(
        width: f64,
        height: f64,
        seed: u64,
        json_params: &Value,
        style: DiagramStyle,
    ) -> Result<Self, GeneratorError> {
        let mut params = TessellationParams::from_json(json_params);
        params.style = style;
        Self::new(width, height, seed, params)
    }

    /// The site list from the last pass, in generation order.
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    /// Per-site cell polygons from the last pass; index-aligned with
    /// [`sites`](Self::sites), `None` for degenerate cells.
    pub fn cells(&self) -> &[Option<Vec<DVec2>>] {
        &self.cells
    }

    /// Delaunay triangles from the last pass as site-index triples.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    fn clip_rect(&self) -> Rect {
        Rect::canvas(self.width, self.height).inset(self.params.boundary_margin)
    }

    /// Runs the site policy and the tessellation, filling the caches.
    fn tessellate(&mut self, rng: &mut Xorshift64) {
        let bounds = self.clip_rect();
        let cfg = SiteConfig {
            count: self.params.num_points,
            bounds,
            distribution: self.params.distribution,
            min_distance: self.params.min_distance,
            cluster_factor: self.params.cluster_factor,
            cluster_tightness: self.params.cluster_tightness,
        };
        self.sites = generate_sites(&cfg, rng);
        self.cells = vec![None; self.sites.len()];
        self.triangles = Vec::new();

        if self.sites.len() < 3 {
            return;
        }

        let center = bounds.center();
        let bbox = BoundingBox::new(
            Point {
                x: center.x,
                y: center.y,
            },
            bounds.width,
            bounds.height,
        );
        let diagram = VoronoiBuilder::default()
            .set_sites(
                self.sites
                    .iter()
                    .map(|p| Point { x: p.x, y: p.y })
                    .collect(),
            )
            .set_bounding_box(bbox)
            .set_clip_behavior(ClipBehavior::Clip)
            .build();

        // The builder refuses fully degenerate site sets (e.g. all
        // collinear); that degrades to an empty diagram, not a failure.
        let Some(diagram) = diagram else {
            return;
        };

        for cell in diagram.iter_cells() {
            let vertices: Vec<DVec2> = cell
                .iter_vertices()
                .map(|v| DVec2::new(v.x, v.y))
                .collect();
            if vertices.len() >= 3 {
                self.cells[cell.site()] = Some(vertices);
            }
        }

        self.triangles = diagram
            .triangulation()
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
    }

    fn build_scene(&self) -> Scene {
        let mut scene = Scene::new(self.width, self.height);

        match self.params.style {
            DiagramStyle::Cells => {
                let mut layer = Layer::new("cells", Stroke::pen(OUTLINE_WIDTH));
                for polygon in self.cells.iter().flatten() {
                    layer.push(Path2::closed(polygon.clone()));
                }
                if !layer.paths.is_empty() {
                    scene.push_layer(layer);
                }
            }
            DiagramStyle::Triangles => {
                let mut layer = Layer::new("triangles", Stroke::pen(OUTLINE_WIDTH));
                for tri in &self.triangles {
                    layer.push(Path2::closed(vec![
                        self.sites[tri[0]],
                        self.sites[tri[1]],
                        self.sites[tri[2]],
                    ]));
                }
                if !layer.paths.is_empty() {
                    scene.push_layer(layer);
                }
            }
        }

        if self.params.draw_sites && !self.sites.is_empty() {
            let mut marks = Layer::new("sites", Stroke::pen(OUTLINE_WIDTH));
            for site in &self.sites {
                marks.push(Path2::line(
                    *site - DVec2::new(SITE_MARK, 0.0),
                    *site + DVec2::new(SITE_MARK, 0.0),
                ));
                marks.push(Path2::line(
                    *site - DVec2::new(0.0, SITE_MARK),
                    *site + DVec2::new(0.0, SITE_MARK),
                ));
            }
            scene.push_layer(marks);
        }
        scene
    }
}

impl Generator for Tessellation {
    fn regenerate(&mut self) -> Result<(), GeneratorError> {
        let mut rng = Xorshift64::new(self.seed);
        self.tessellate(&mut rng);
        self.scene = Some(self.build_scene());
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    fn params(&self) -> Value {
        json!({
            "num_points": self.params.num_points,
            "boundary_margin": self.params.boundary_margin,
            "distribution": self.params.distribution.name(),
            "min_distance": self.params.min_distance,
            "cluster_factor": self.params.cluster_factor,
            "cluster_tightness": self.params.cluster_tightness,
            "style": self.params.style.name(),
            "draw_sites": self.params.draw_sites,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "num_points": {
                "type": "integer",
                "default": DEFAULT_NUM_POINTS,
                "description": "Size of the site set"
            },
            "boundary_margin": {
                "type": "number",
                "default": DEFAULT_MARGIN,
                "description": "Inset from the canvas edge"
            },
            "distribution": {
                "type": "string",
                "default": "random",
                "values": ["random", "uniform", "clustered"],
                "description": "Site distribution policy"
            },
            "min_distance": {
                "type": "number",
                "default": 0.0,
                "description": "Greedy minimum-distance rejection threshold; 0 disables"
            },
            "cluster_factor": {
                "type": "number",
                "default": 0.5,
                "range": [0.0, 1.0],
                "description": "Maps linearly to 2-10 clusters"
            },
            "cluster_tightness": {
                "type": "number",
                "default": 0.5,
                "range": [0.0, 1.0],
                "description": "Higher pulls cluster points closer to their center"
            },
            "style": {
                "type": "string",
                "default": "cells",
                "values": ["cells", "triangles"],
                "description": "Draw Voronoi cells or Delaunay triangles"
            },
            "draw_sites": {
                "type": "boolean",
                "default": false,
                "description": "Mark each site with a small cross"
            }
        })
    }
}
