#![deny(unsafe_code)]
//! Parametric wormhole surface generator.
//!
//! Builds a surface of revolution whose radius pinches from two mouths
//! down to a throat under a power-law profile, then draws its
//! longitude/latitude wireframe through an orbiting perspective camera.
//! The angular axis wraps, so every latitude ring closes.

use plotlines_core::camera::ViewCamera;
use plotlines_core::glam::DVec3;
use plotlines_core::params::{param_f64, param_usize};
use plotlines_core::{Generator, GeneratorError, Layer, Path2, Rect, Scene, Segment3, Stroke};
use serde_json::{json, Value};

const DEFAULT_RINGS: usize = 40;
const DEFAULT_SIDES: usize = 24;
const DEFAULT_LENGTH: f64 = 500.0;
const DEFAULT_MOUTH_A: f64 = 180.0;
const DEFAULT_MOUTH_B: f64 = 130.0;
const DEFAULT_THROAT: f64 = 45.0;
const DEFAULT_THROAT_POS: f64 = 0.45;
const DEFAULT_EXPONENT: f64 = 2.2;
const DEFAULT_ROT_X: f64 = 0.5;
const DEFAULT_ROT_Y: f64 = 0.9;
const DEFAULT_DISTANCE: f64 = 900.0;
const DEFAULT_FOV: f64 = 60.0;

/// Parameters for the wormhole surface.
#[derive(Debug, Clone, Copy)]
pub struct WormholeParams {
    /// Latitude ring count along the axis.
    pub rings: usize,
    /// Vertex count around each ring.
    pub sides: usize,
    /// Axial length in world units.
    pub length: f64,
    /// Radius at the u = 0 mouth.
    pub mouth_a: f64,
    /// Radius at the u = 1 mouth.
    pub mouth_b: f64,
    /// Minimum radius at the pinch.
    pub throat: f64,
    /// Axial position of the throat in (0, 1).
    pub throat_pos: f64,
    /// Power-law exponent shaping how sharply the pinch falls off.
    pub exponent: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub distance: f64,
    pub fov_deg: f64,
}

impl Default for WormholeParams {
    fn default() -> Self {
        Self {
            rings: DEFAULT_RINGS,
            sides: DEFAULT_SIDES,
            length: DEFAULT_LENGTH,
            mouth_a: DEFAULT_MOUTH_A,
            mouth_b: DEFAULT_MOUTH_B,
            throat: DEFAULT_THROAT,
            throat_pos: DEFAULT_THROAT_POS,
            exponent: DEFAULT_EXPONENT,
            rot_x: DEFAULT_ROT_X,
            rot_y: DEFAULT_ROT_Y,
            distance: DEFAULT_DISTANCE,
            fov_deg: DEFAULT_FOV,
        }
    }
}

impl WormholeParams {
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            rings: param_usize(params, "rings", d.rings).max(2),
            sides: param_usize(params, "sides", d.sides).max(3),
            length: param_f64(params, "length", d.length),
            mouth_a: param_f64(params, "mouth_a", d.mouth_a),
            mouth_b: param_f64(params, "mouth_b", d.mouth_b),
            throat: param_f64(params, "throat", d.throat),
            throat_pos: param_f64(params, "throat_pos", d.throat_pos),
            exponent: param_f64(params, "exponent", d.exponent),
            rot_x: param_f64(params, "rot_x", d.rot_x),
            rot_y: param_f64(params, "rot_y", d.rot_y),
            distance: param_f64(params, "distance", d.distance),
            fov_deg: param_f64(params, "fov", d.fov_deg),
        }
    }
}

/// Radius profile along the normalized axis coordinate `u` in [0, 1].
///
/// Two power-law arcs meet at the throat: the left arc blends from
/// `mouth_a` down to `throat` over [0, throat_pos], the right arc from
/// `throat` up to `mouth_b` over [throat_pos, 1]. `r(throat_pos)` equals
/// the throat radius exactly.
pub fn profile_radius(u: f64, p: &WormholeParams) -> f64 {
    let tp = p.throat_pos.clamp(0.01, 0.99);
    let k = p.exponent.max(0.01);
    if u <= tp {
        p.throat + (p.mouth_a - p.throat) * ((tp - u) / tp).powf(k)
    } else {
        p.throat + (p.mouth_b - p.throat) * ((u - tp) / (1.0 - tp)).powf(k)
    }
}

/// The wormhole generator.
pub struct Wormhole {
    width: f64,
    height: f64,
    params: WormholeParams,
    scene: Option<Scene>,
}

impl Wormhole {
    pub fn new(width: f64, height: f64, params: WormholeParams) -> Result<Self, GeneratorError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(GeneratorError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            params,
            scene: None,
        })
    }

    /// The surface is fully determined by its parameters; the seed exists
    /// for interface uniformity and is unused.
    pub fn from_json(
        width: f64,
        height: f64,
        _seed: u64,
        json_params: &Value,
    ) -> Result<Self, GeneratorError> {
        Self::new(width, height, WormholeParams::from_json(json_params))
    }

    /// Surface vertices: `rings` rows of `sides` points each. The axis is
    /// centered on the origin so the orbit camera looks at the throat
    /// region.
    fn vertices(&self) -> Vec<Vec<DVec3>> {
        let p = &self.params;
        (0..p.rings)
            .map(|ring| {
                let u = ring as f64 / (p.rings - 1) as f64;
                let r = profile_radius(u, p);
                let z = (u - 0.5) * p.length;
                (0..p.sides)
                    .map(|side| {
                        let theta = side as f64 / p.sides as f64 * std::f64::consts::TAU;
                        DVec3::new(r * theta.cos(), r * theta.sin(), z)
                    })
                    .collect()
            })
            .collect()
    }
}

impl Generator for Wormhole {
    fn regenerate(&mut self) -> Result<(), GeneratorError> {
        let p = self.params;
        let camera = ViewCamera::orbit(
            Rect::canvas(self.width, self.height),
            p.rot_x,
            p.rot_y,
            p.distance,
            p.fov_deg,
        );
        let rows = self.vertices();
        let mut layer = Layer::new("surface", Stroke::pen(1.0));

        for ring in 0..rows.len() {
            for side in 0..rows[ring].len() {
                let here = rows[ring][side];
                // Latitude neighbor wraps around the ring.
                let around = rows[ring][(side + 1) % rows[ring].len()];
                if let Some((a, b)) = camera.project_segment(Segment3::new(here, around)) {
                    layer.push(Path2::line(a, b));
                }
                if ring + 1 < rows.len() {
                    if let Some((a, b)) =
                        camera.project_segment(Segment3::new(here, rows[ring + 1][side]))
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
            "rings": p.rings,
            "sides": p.sides,
            "length": p.length,
            "mouth_a": p.mouth_a,
            "mouth_b": p.mouth_b,
            "throat": p.throat,
            "throat_pos": p.throat_pos,
            "exponent": p.exponent,
            "rot_x": p.rot_x,
            "rot_y": p.rot_y,
            "distance": p.distance,
            "fov": p.fov_deg,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "rings": {"type": "integer", "default": DEFAULT_RINGS, "min": 2, "description": "Latitude ring count along the axis"},
            "sides": {"type": "integer", "default": DEFAULT_SIDES, "min": 3, "description": "Vertices around each ring"},
            "length": {"type": "number", "default": DEFAULT_LENGTH, "description": "Axial length in world units"},
            "mouth_a": {"type": "number", "default": DEFAULT_MOUTH_A, "description": "Radius at the near mouth"},
            "mouth_b": {"type": "number", "default": DEFAULT_MOUTH_B, "description": "Radius at the far mouth"},
            "throat": {"type": "number", "default": DEFAULT_THROAT, "description": "Minimum radius at the pinch"},
            "throat_pos": {"type": "number", "default": DEFAULT_THROAT_POS, "description": "Axial position of the throat in (0, 1)"},
            "exponent": {"type": "number", "default": DEFAULT_EXPONENT, "description": "Power-law pinch exponent"},
            "rot_x": {"type": "number", "default": DEFAULT_ROT_X, "description": "Camera tilt in radians"},
            "rot_y": {"type": "number", "default": DEFAULT_ROT_Y, "description": "Camera orbit angle in radians"},
            "distance": {"type": "number", "default": DEFAULT_DISTANCE, "description": "Camera pull-back distance"},
            "fov": {"type": "number", "default": DEFAULT_FOV, "description": "Vertical field of view in degrees"}
        })
    }
}
