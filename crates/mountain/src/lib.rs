#![deny(unsafe_code)]
//! Fractal-noise terrain wireframe generator.
//!
//! Samples multi-octave Perlin noise over an (x, z) grid to form a
//! mountainous height field, then projects the grid wireframe through an
//! orbiting perspective camera. Edges behind the camera or fully off the
//! page are dropped whole.

use plotlines_core::camera::ViewCamera;
use plotlines_core::glam::DVec3;
use plotlines_core::params::{param_f64, param_usize};
use plotlines_core::{Generator, GeneratorError, Layer, OctaveNoise, Path2, Rect, Scene, Segment3, Stroke};
use serde_json::{json, Value};

/// Multiplier folding the seed into a noise-domain offset. The fold keeps
/// equal-seed renders identical while pushing different seeds into
/// unrelated sample windows.
const SEED_OFFSET: f64 = 7919.0;

/// Noise sits mostly near 0.5; subtracting this bias leaves valleys below
/// the base plane and peaks above it.
const HEIGHT_BIAS: f64 = 0.25;

const DEFAULT_COLS: usize = 50;
const DEFAULT_ROWS: usize = 50;
const DEFAULT_SPACING: f64 = 15.0;
const DEFAULT_NOISE_SCALE: f64 = 0.02;
const DEFAULT_HEIGHT_SCALE: f64 = 140.0;
const DEFAULT_DETAIL: usize = 4;
const DEFAULT_FALLOFF: f64 = 0.5;
const DEFAULT_ROT_X: f64 = 0.55;
const DEFAULT_ROT_Y: f64 = 0.7;
const DEFAULT_DISTANCE: f64 = 650.0;
const DEFAULT_FOV: f64 = 60.0;

/// Parameters for the terrain generator.
#[derive(Debug, Clone, Copy)]
pub struct MountainParams {
    pub cols: usize,
    pub rows: usize,
    /// Grid spacing in world units.
    pub spacing: f64,
    /// World-to-noise coordinate scale; smaller values give broader hills.
    pub noise_scale: f64,
    /// Vertical exaggeration of the sampled noise.
    pub height_scale: f64,
    /// Noise octave count, clamped to [1, 8].
    pub detail: usize,
    /// Per-octave amplitude falloff, clamped to [0, 1].
    pub falloff: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub distance: f64,
    pub fov_deg: f64,
}

impl Default for MountainParams {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            spacing: DEFAULT_SPACING,
            noise_scale: DEFAULT_NOISE_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            detail: DEFAULT_DETAIL,
            falloff: DEFAULT_FALLOFF,
            rot_x: DEFAULT_ROT_X,
            rot_y: DEFAULT_ROT_Y,
            distance: DEFAULT_DISTANCE,
            fov_deg: DEFAULT_FOV,
        }
    }
}

impl MountainParams {
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            cols: param_usize(params, "cols", d.cols).max(2),
            rows: param_usize(params, "rows", d.rows).max(2),
            spacing: param_f64(params, "spacing", d.spacing),
            noise_scale: param_f64(params, "noise_scale", d.noise_scale),
            height_scale: param_f64(params, "height_scale", d.height_scale),
            detail: param_usize(params, "detail", d.detail),
            falloff: param_f64(params, "falloff", d.falloff),
            rot_x: param_f64(params, "rot_x", d.rot_x),
            rot_y: param_f64(params, "rot_y", d.rot_y),
            distance: param_f64(params, "distance", d.distance),
            fov_deg: param_f64(params, "fov", d.fov_deg),
        }
    }
}

/// The terrain generator.
pub struct Mountain {
    width: f64,
    height: f64,
    seed: u64,
    params: MountainParams,
    noise: OctaveNoise,
    scene: Option<Scene>,
}

impl Mountain {
    pub fn new(
        width: f64,
        height: f64,
        seed: u64,
        params: MountainParams,
    ) -> Result<Self, GeneratorError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(GeneratorError::InvalidDimensions);
        }
        let noise = OctaveNoise::new(seed, params.detail, params.falloff);
        Ok(Self {
            width,
            height,
            seed,
            params,
            noise,
            scene: None,
        })
    }

    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, GeneratorError> {
        Self::new(width, height, seed, MountainParams::from_json(json_params))
    }

    /// Seed-derived offset added to both sample coordinates. Reduced
    /// modulo a small range so the offset stays where f64 sampling keeps
    /// full precision.
    fn seed_offset(&self) -> f64 {
        (self.seed % 4096) as f64 * SEED_OFFSET
    }

    /// Terrain height at world (x, z): biased, scaled fractal noise.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        let off = self.seed_offset();
        let p = &self.params;
        let sample = self
            .noise
            .sample((x + off) * p.noise_scale, (z + off) * p.noise_scale);
        (sample - HEIGHT_BIAS) * p.height_scale
    }

    fn mesh(&self) -> Vec<Vec<DVec3>> {
        let p = &self.params;
        let half_w = (p.cols - 1) as f64 * p.spacing * 0.5;
        let half_d = (p.rows - 1) as f64 * p.spacing * 0.5;
        (0..p.rows)
            .map(|row| {
                let z = row as f64 * p.spacing - half_d;
                (0..p.cols)
                    .map(|col| {
                        let x = col as f64 * p.spacing - half_w;
                        DVec3::new(x, self.height_at(x, z), z)
                    })
                    .collect()
            })
            .collect()
    }
}

impl Generator for Mountain {
    fn regenerate(&mut self) -> Result<(), GeneratorError> {
        let p = self.params;
        let camera = ViewCamera::orbit(
            Rect::canvas(self.width, self.height),
            p.rot_x,
            p.rot_y,
            p.distance,
            p.fov_deg,
        );
        let mesh = self.mesh();
        let mut layer = Layer::new("terrain", Stroke::pen(1.0));

        for row in 0..mesh.len() {
            for col in 0..mesh[row].len() {
                let here = mesh[row][col];
                if col + 1 < mesh[row].len() {
                    if let Some((a, b)) =
                        camera.project_segment(Segment3::new(here, mesh[row][col + 1]))
                    {
                        layer.push(Path2::line(a, b));
                    }
                }
                if row + 1 < mesh.len() {
                    if let Some((a, b)) =
                        camera.project_segment(Segment3::new(here, mesh[row + 1][col]))
                    {
                        layer.push(Path2::line(a, b));
                    }
                }
            }
        }

        let mut scene = Scene::new(self.width, self.height);
        scene.push_layer(layer);
        self.scene = Some(scene);
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    fn params(&self) -> Value {
        let p = &self.params;
        json!({
            "cols": p.cols,
            "rows": p.rows,
            "spacing": p.spacing,
            "noise_scale": p.noise_scale,
            "height_scale": p.height_scale,
            "detail": p.detail,
            "falloff": p.falloff,
            "rot_x": p.rot_x,
            "rot_y": p.rot_y,
            "distance": p.distance,
            "fov": p.fov_deg,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "cols": {"type": "integer", "default": DEFAULT_COLS, "min": 2, "description": "Grid columns"},
            "rows": {"type": "integer", "default": DEFAULT_ROWS, "min": 2, "description": "Grid rows"},
            "spacing": {"type": "number", "default": DEFAULT_SPACING, "description": "Grid spacing in world units"},
            "noise_scale": {"type": "number", "default": DEFAULT_NOISE_SCALE, "description": "World-to-noise coordinate scale"},
            "height_scale": {"type": "number", "default": DEFAULT_HEIGHT_SCALE, "description": "Vertical exaggeration"},
            "detail": {"type": "integer", "default": DEFAULT_DETAIL, "min": 1, "max": 8, "description": "Noise octave count"},
            "falloff": {"type": "number", "default": DEFAULT_FALLOFF, "min": 0.0, "max": 1.0, "description": "Per-octave amplitude falloff"},
            "rot_x": {"type": "number", "default": DEFAULT_ROT_X, "description": "Camera tilt in radians"},
            "rot_y": {"type": "number", "default": DEFAULT_ROT_Y, "description": "Camera orbit angle in radians"},
            "distance": {"type": "number", "default": DEFAULT_DISTANCE, "description": "Camera pull-back distance"},
            "fov": {"type": "number", "default": DEFAULT_FOV, "description": "Vertical field of view in degrees"}
        })
    }
}
