#![deny(unsafe_code)]
//! Generator registry: maps generator names to implementations and provides
//! SVG file export.
//!
//! This crate sits between `plotlines-core` (which defines the `Generator`
//! trait) and the individual pattern crates (`plotlines-maze`, etc.). The
//! CLI depends on this crate so dispatch logic lives in one place.

pub mod output;

use plotlines_core::{Generator, GeneratorError, Scene};
use plotlines_voronoi::DiagramStyle;
use serde_json::Value;

/// All available generator names.
const GENERATOR_NAMES: &[&str] = &[
    "voronoi",
    "delaunay",
    "waves",
    "mountain",
    "boxes",
    "wormhole",
    "maze",
];

/// Enumeration of all available pattern generators.
///
/// Wraps each generator implementation and delegates `Generator` trait
/// methods. Use [`GeneratorKind::from_name`] for string-based construction.
pub enum GeneratorKind {
    /// Voronoi cell tessellation.
    Voronoi(plotlines_voronoi::Tessellation),
    /// Delaunay triangulation over the same site machinery.
    Delaunay(plotlines_voronoi::Tessellation),
    /// Closed-form wave height field.
    Waves(plotlines_waves::Waves),
    /// Fractal-noise terrain wireframe.
    Mountain(plotlines_mountain::Mountain),
    /// Random tilted box scatter.
    Boxes(plotlines_boxes::Boxes),
    /// Parametric wormhole surface.
    Wormhole(plotlines_wormhole::Wormhole),
    /// Perfect maze with BFS solution overlay.
    Maze(plotlines_maze::Maze),
}

impl GeneratorKind {
    /// Constructs a generator by name.
    ///
    /// `"voronoi"` and `"delaunay"` share one implementation; the name
    /// fixes the diagram style regardless of any `style` entry in `params`.
    /// Returns `GeneratorError::UnknownGenerator` if the name is not
    /// recognized.
    pub fn from_name(
        name: &str,
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, GeneratorError> {
        match name {
            "voronoi" => Ok(GeneratorKind::Voronoi(
                plotlines_voronoi::Tessellation::from_json_with_style(
                    width,
                    height,
                    seed,
                    params,
                    DiagramStyle::Cells,
                )?,
            )),
            "delaunay" => Ok(GeneratorKind::Delaunay(
                plotlines_voronoi::Tessellation::from_json_with_style(
                    width,
                    height,
                    seed,
                    params,
                    DiagramStyle::Triangles,
                )?,
            )),
            "waves" => Ok(GeneratorKind::Waves(plotlines_waves::Waves::from_json(
                width, height, seed, params,
            )?)),
            "mountain" => Ok(GeneratorKind::Mountain(
                plotlines_mountain::Mountain::from_json(width, height, seed, params)?,
            )),
            "boxes" => Ok(GeneratorKind::Boxes(plotlines_boxes::Boxes::from_json(
                width, height, seed, params,
            )?)),
            "wormhole" => Ok(GeneratorKind::Wormhole(
                plotlines_wormhole::Wormhole::from_json(width, height, seed, params)?,
            )),
            "maze" => Ok(GeneratorKind::Maze(plotlines_maze::Maze::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(GeneratorError::UnknownGenerator(name.to_string())),
        }
    }

    /// Returns a slice of all recognized generator names.
    pub fn list_generators() -> &'static [&'static str] {
        GENERATOR_NAMES
    }
}

impl Generator for GeneratorKind {
    fn regenerate(&mut self) -> Result<(), GeneratorError> {
        match self {
            GeneratorKind::Voronoi(g) | GeneratorKind::Delaunay(g) => g.regenerate(),
            GeneratorKind::Waves(g) => g.regenerate(),
            GeneratorKind::Mountain(g) => g.regenerate(),
            GeneratorKind::Boxes(g) => g.regenerate(),
            GeneratorKind::Wormhole(g) => g.regenerate(),
            GeneratorKind::Maze(g) => g.regenerate(),
        }
    }

    fn scene(&self) -> Option<&Scene> {
        match self {
            GeneratorKind::Voronoi(g) | GeneratorKind::Delaunay(g) => g.scene(),
            GeneratorKind::Waves(g) => g.scene(),
            GeneratorKind::Mountain(g) => g.scene(),
            GeneratorKind::Boxes(g) => g.scene(),
            GeneratorKind::Wormhole(g) => g.scene(),
            GeneratorKind::Maze(g) => g.scene(),
        }
    }

    fn params(&self) -> Value {
        match self {
            GeneratorKind::Voronoi(g) | GeneratorKind::Delaunay(g) => g.params(),
            GeneratorKind::Waves(g) => g.params(),
            GeneratorKind::Mountain(g) => g.params(),
            GeneratorKind::Boxes(g) => g.params(),
            GeneratorKind::Wormhole(g) => g.params(),
            GeneratorKind::Maze(g) => g.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            GeneratorKind::Voronoi(g) | GeneratorKind::Delaunay(g) => g.param_schema(),
            GeneratorKind::Waves(g) => g.param_schema(),
            GeneratorKind::Mountain(g) => g.param_schema(),
            GeneratorKind::Boxes(g) => g.param_schema(),
            GeneratorKind::Wormhole(g) => g.param_schema(),
            GeneratorKind::Maze(g) => g.param_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_name_constructs_every_listed_generator() {
        for name in GeneratorKind::list_generators() {
            let g = GeneratorKind::from_name(name, 800.0, 600.0, 42, &json!({}));
            assert!(g.is_ok(), "{name} failed to construct");
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = GeneratorKind::from_name("nonexistent", 800.0, 600.0, 42, &json!({}));
        assert!(matches!(
            result,
            Err(GeneratorError::UnknownGenerator(_))
        ));
    }

    #[test]
    fn every_generator_produces_a_non_empty_scene() {
        for name in GeneratorKind::list_generators() {
            let mut g = GeneratorKind::from_name(name, 800.0, 600.0, 42, &json!({})).unwrap();
            assert!(g.scene().is_none(), "{name} had a scene before any pass");
            g.regenerate().unwrap();
            let scene = g.scene().unwrap_or_else(|| panic!("{name} has no scene"));
            assert!(!scene.is_empty(), "{name} produced an empty scene");
            assert_eq!(scene.width, 800.0);
            assert_eq!(scene.height, 600.0);
        }
    }

    #[test]
    fn delaunay_name_overrides_a_cells_style_param() {
        let mut g = GeneratorKind::from_name(
            "delaunay",
            800.0,
            600.0,
            7,
            &json!({"style": "cells"}),
        )
        .unwrap();
        g.regenerate().unwrap();
        let scene = g.scene().unwrap();
        assert!(scene.layers.iter().any(|l| l.name == "triangles"));
        assert!(scene.layers.iter().all(|l| l.name != "cells"));
    }

    #[test]
    fn determinism_same_seed_across_the_registry() {
        for name in GeneratorKind::list_generators() {
            let mut a = GeneratorKind::from_name(name, 800.0, 600.0, 99, &json!({})).unwrap();
            let mut b = GeneratorKind::from_name(name, 800.0, 600.0, 99, &json!({})).unwrap();
            a.regenerate().unwrap();
            b.regenerate().unwrap();
            assert_eq!(a.scene(), b.scene(), "{name} is not deterministic");
        }
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let g = GeneratorKind::from_name("maze", 800.0, 600.0, 42, &json!({})).unwrap();
        assert!(g.params().get("density").is_some());
        assert!(g.param_schema().get("density").is_some());
    }

    #[test]
    fn object_safety() {
        let mut boxed: Box<dyn Generator> =
            Box::new(GeneratorKind::from_name("waves", 800.0, 600.0, 42, &json!({})).unwrap());
        boxed.regenerate().unwrap();
        assert!(boxed.scene().is_some());
    }
}
