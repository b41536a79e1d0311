#![deny(unsafe_code)]
//! Perfect-maze generator and solver.
//!
//! Carves an N×M grid into a perfect maze (spanning tree over the wall
//! graph: exactly one path between any two cells) with randomized
//! depth-first search, then finds the start-to-goal path with breadth-first
//! search. Walls render as axis-aligned segments, the solution as a
//! polyline through cell centers.

use plotlines_core::glam;
use plotlines_core::params::{param_bool, param_f64, param_usize};
use plotlines_core::{Generator, GeneratorError, Layer, Path2, Scene, Stroke, Xorshift64};
use serde_json::{json, Value};

mod grid;

pub use grid::MazeGrid;

/// Default cells across.
const DEFAULT_DENSITY: usize = 10;
/// Default inset from the canvas edge.
const DEFAULT_MARGIN: f64 = 40.0;
/// Wall stroke width.
const WALL_WIDTH: f64 = 2.0;
/// Solution overlay stroke width and color.
const SOLUTION_WIDTH: f64 = 2.0;
const SOLUTION_COLOR: &str = "#cc3333";

/// Parameters for the maze generator.
#[derive(Debug, Clone, Copy)]
pub struct MazeParams {
    /// Number of columns; also the default row count.
    pub density: usize,
    /// Number of rows. Differs from `density` for non-square aspect ratios.
    pub rows: usize,
    /// Inset from the canvas edge, in canvas units.
    pub margin: f64,
    /// Whether to draw the BFS solution overlay.
    pub solve: bool,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            rows: DEFAULT_DENSITY,
            margin: DEFAULT_MARGIN,
            solve: true,
        }
    }
}

impl MazeParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// `rows` defaults to `density`.
    pub fn from_json(params: &Value) -> Self {
        let density = param_usize(params, "density", DEFAULT_DENSITY).max(1);
        Self {
            density,
            rows: param_usize(params, "rows", density).max(1),
            margin: param_f64(params, "margin", DEFAULT_MARGIN),
            solve: param_bool(params, "solve", true),
        }
    }
}

/// The maze generator: carve, solve, render.
pub struct Maze {
    width: f64,
    height: f64,
    seed: u64,
    params: MazeParams,
    grid: Option<MazeGrid>,
    scene: Option<Scene>,
}

impl Maze {
    /// Creates a maze generator for the given canvas and seed.
    ///
    /// Returns `GeneratorError::InvalidDimensions` if either canvas
    /// dimension is not positive.
    pub fn new(width: f64, height: f64, seed: u64, params: MazeParams) -> Result<Self, GeneratorError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(GeneratorError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            seed,
            params,
            grid: None,
            scene: None,
        })
    }

    /// Creates a maze generator from a JSON params object.
    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, GeneratorError> {
        Self::new(width, height, seed, MazeParams::from_json(json_params))
    }

    /// The carved grid from the last pass, for inspection.
    pub fn grid(&self) -> Option<&MazeGrid> {
        self.grid.as_ref()
    }

    fn build_scene(&self, grid: &MazeGrid, path: &[(usize, usize)]) -> Scene {
        let mut scene = Scene::new(self.width, self.height);
        let cols = grid.cols() as f64;
        let rows = grid.rows() as f64;
        let cell_w = (self.width - 2.0 * self.params.margin) / cols;
        let cell_h = (self.height - 2.0 * self.params.margin) / rows;
        let origin_x = self.params.margin;
        let origin_y = self.params.margin;

        let mut walls = Layer::new("walls", Stroke::pen(WALL_WIDTH));
        for segment in grid.wall_segments() {
            let a = glam::DVec2::new(
                origin_x + segment.0.x * cell_w,
                origin_y + segment.0.y * cell_h,
            );
            let b = glam::DVec2::new(
                origin_x + segment.1.x * cell_w,
                origin_y + segment.1.y * cell_h,
            );
            walls.push(Path2::line(a, b));
        }
        scene.push_layer(walls);

        if self.params.solve && path.len() >= 2 {
            let mut solution = Layer::new("solution", Stroke::colored(SOLUTION_COLOR, SOLUTION_WIDTH));
            let centers = path
                .iter()
                .map(|&(col, row)| {
                    glam::DVec2::new(
                        origin_x + (col as f64 + 0.5) * cell_w,
                        origin_y + (row as f64 + 0.5) * cell_h,
                    )
                })
                .collect();
            solution.push(Path2::open(centers));
            scene.push_layer(solution);
        }
        scene
    }
}

impl Generator for Maze {
    fn regenerate(&mut self) -> Result<(), GeneratorError> {
        let mut rng = Xorshift64::new(self.seed);
        let mut grid = MazeGrid::new(self.params.density, self.params.rows);
        grid.carve(&mut rng);
        let path = grid.solve();
        self.scene = Some(self.build_scene(&grid, &path));
        self.grid = Some(grid);
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    fn params(&self) -> Value {
        json!({
            "density": self.params.density,
            "rows": self.params.rows,
            "margin": self.params.margin,
            "solve": self.params.solve,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "density": {
                "type": "integer",
                "default": DEFAULT_DENSITY,
                "min": 1,
                "description": "Cells across; also the default row count"
            },
            "rows": {
                "type": "integer",
                "default": DEFAULT_DENSITY,
                "min": 1,
                "description": "Row count override for non-square mazes"
            },
            "margin": {
                "type": "number",
                "default": DEFAULT_MARGIN,
                "description": "Inset from the canvas edge"
            },
            "solve": {
                "type": "boolean",
                "default": true,
                "description": "Draw the BFS solution overlay"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(density: usize, seed: u64) -> Maze {
        let params = MazeParams {
            density,
            rows: density,
            ..MazeParams::default()
        };
        let mut maze = Maze::new(800.0, 600.0, seed, params).unwrap();
        maze.regenerate().unwrap();
        maze
    }

    #[test]
    fn scene_is_none_before_first_pass() {
        let maze = Maze::new(800.0, 600.0, 1, MazeParams::default()).unwrap();
        assert!(maze.scene().is_none());
        assert!(maze.grid().is_none());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Maze::new(0.0, 600.0, 1, MazeParams::default()).is_err());
        assert!(Maze::new(800.0, 0.0, 1, MazeParams::default()).is_err());
    }

    #[test]
    fn spanning_tree_property_holds_across_sizes_and_seeds() {
        for n in 2..=12 {
            for seed in [1_u64, 99, 123_456] {
                let maze = generated(n, seed);
                let grid = maze.grid().unwrap();
                assert_eq!(
                    grid.open_wall_pairs(),
                    n * n - 1,
                    "size {n} seed {seed}: wrong open wall count"
                );
                assert_eq!(
                    grid.reachable_cell_count(0, 0),
                    n * n,
                    "size {n} seed {seed}: not all cells reachable"
                );
            }
        }
    }

    #[test]
    fn solution_path_is_adjacent_and_never_crosses_a_closed_wall() {
        for n in 2..=10 {
            let maze = generated(n, 7);
            let grid = maze.grid().unwrap();
            let path = grid.solve();
            assert!(!path.is_empty(), "size {n}: unsolvable perfect maze");
            assert_eq!(path[0], (0, 0));
            assert_eq!(*path.last().unwrap(), (n - 1, n - 1));
            for pair in path.windows(2) {
                let (ac, ar) = pair[0];
                let (bc, br) = pair[1];
                let manhattan = ac.abs_diff(bc) + ar.abs_diff(br);
                assert_eq!(manhattan, 1, "non-adjacent step {pair:?}");
                assert!(
                    grid.connected(pair[0], pair[1]),
                    "path crosses a closed wall at {pair:?}"
                );
            }
        }
    }

    #[test]
    fn density_ten_scenario() {
        let maze = generated(10, 42);
        let grid = maze.grid().unwrap();
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.open_wall_pairs(), 99);
        let path = grid.solve();
        // Manhattan lower bound: 18 steps = 19 cells; upper bound: every cell.
        assert!(path.len() >= 19, "path of {} cells too short", path.len());
        assert!(path.len() <= 100, "path of {} cells too long", path.len());
    }

    #[test]
    fn regeneration_is_deterministic_per_seed() {
        let a = generated(12, 2024);
        let b = generated(12, 2024);
        assert_eq!(a.scene().unwrap(), b.scene().unwrap());
    }

    #[test]
    fn different_seeds_give_different_mazes() {
        let a = generated(12, 1);
        let b = generated(12, 2);
        assert_ne!(a.scene().unwrap(), b.scene().unwrap());
    }

    #[test]
    fn rows_override_gives_non_square_grid() {
        let params = MazeParams::from_json(&json!({"density": 8, "rows": 5}));
        let mut maze = Maze::new(800.0, 600.0, 3, params).unwrap();
        maze.regenerate().unwrap();
        let grid = maze.grid().unwrap();
        assert_eq!(grid.cols(), 8);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.open_wall_pairs(), 8 * 5 - 1);
    }

    #[test]
    fn solve_false_omits_the_solution_layer() {
        let params = MazeParams {
            solve: false,
            ..MazeParams::default()
        };
        let mut maze = Maze::new(800.0, 600.0, 5, params).unwrap();
        maze.regenerate().unwrap();
        let names: Vec<_> = maze
            .scene()
            .unwrap()
            .layers
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert!(names.contains(&"walls"));
        assert!(!names.contains(&"solution"));
    }

    #[test]
    fn params_round_trip_through_json() {
        let maze = Maze::from_json(800.0, 600.0, 1, &json!({"density": 6, "margin": 20.0})).unwrap();
        let p = maze.params();
        assert_eq!(p["density"], 6);
        assert_eq!(p["rows"], 6);
        assert_eq!(p["margin"], 20.0);
    }
}
