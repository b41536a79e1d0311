#![deny(unsafe_code)]
//! Random box scatter generator.
//!
//! Scatters tilted cuboids through a cubic volume and draws their twelve
//! edges through an orbiting perspective camera. Stroke width falls off
//! with projected depth so nearer boxes read heavier on the page.

use plotlines_core::camera::{Projected, ViewCamera};
use plotlines_core::glam::{DMat3, DVec3};
use plotlines_core::params::{param_f64, param_usize};
use plotlines_core::{
    Generator, GeneratorError, Layer, Path2, Rect, Scene, Stroke, Xorshift64,
};
use serde_json::{json, Value};

/// Cuboid edge list over the corner indexing where bit 0 selects +x,
/// bit 1 selects +y and bit 2 selects +z.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Depth-to-width mapping: a segment at the near end of the depth range
/// draws at full base width, one at the far threshold at this fraction.
const FAR_WIDTH_FRACTION: f64 = 0.35;
const MIN_STROKE_WIDTH: f64 = 0.3;

const DEFAULT_COUNT: usize = 25;
const DEFAULT_MIN_SIZE: f64 = 20.0;
const DEFAULT_MAX_SIZE: f64 = 80.0;
const DEFAULT_SPREAD: f64 = 250.0;
const DEFAULT_MAX_TILT: f64 = 0.5;
const DEFAULT_ROT_X: f64 = 0.45;
const DEFAULT_ROT_Y: f64 = 0.6;
const DEFAULT_DISTANCE: f64 = 750.0;
const DEFAULT_FOV: f64 = 60.0;
const DEFAULT_STROKE: f64 = 1.4;

/// Parameters for the box scatter.
#[derive(Debug, Clone, Copy)]
pub struct BoxesParams {
    pub count: usize,
    pub min_size: f64,
    pub max_size: f64,
    /// Half-extent of the cubic scatter volume.
    pub spread: f64,
    /// Maximum per-axis tilt in radians.
    pub max_tilt: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub distance: f64,
    pub fov_deg: f64,
    /// Base stroke width before the depth falloff.
    pub stroke: f64,
}

impl Default for BoxesParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            spread: DEFAULT_SPREAD,
            max_tilt: DEFAULT_MAX_TILT,
            rot_x: DEFAULT_ROT_X,
            rot_y: DEFAULT_ROT_Y,
            distance: DEFAULT_DISTANCE,
            fov_deg: DEFAULT_FOV,
            stroke: DEFAULT_STROKE,
        }
    }
}

impl BoxesParams {
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        let min_size = param_f64(params, "min_size", d.min_size).max(0.1);
        Self {
            count: param_usize(params, "count", d.count),
            min_size,
            max_size: param_f64(params, "max_size", d.max_size).max(min_size),
            spread: param_f64(params, "spread", d.spread).abs(),
            max_tilt: param_f64(params, "max_tilt", d.max_tilt).abs(),
            rot_x: param_f64(params, "rot_x", d.rot_x),
            rot_y: param_f64(params, "rot_y", d.rot_y),
            distance: param_f64(params, "distance", d.distance),
            fov_deg: param_f64(params, "fov", d.fov_deg),
            stroke: param_f64(params, "stroke", d.stroke).max(MIN_STROKE_WIDTH),
        }
    }
}

/// One placed cuboid: center, half-extents, and its tilt rotation.
#[derive(Debug, Clone, Copy)]
struct PlacedBox {
    center: DVec3,
    half: DVec3,
    rotation: DMat3,
}

impl PlacedBox {
    /// Draws position, size and tilt from the stream, in that fixed order.
    fn sample(rng: &mut Xorshift64, p: &BoxesParams) -> Self {
        let center = DVec3::new(
            rng.next_range(-p.spread, p.spread),
            rng.next_range(-p.spread, p.spread),
            rng.next_range(-p.spread, p.spread),
        );
        let half = DVec3::new(
            rng.next_range(p.min_size, p.max_size) * 0.5,
            rng.next_range(p.min_size, p.max_size) * 0.5,
            rng.next_range(p.min_size, p.max_size) * 0.5,
        );
        // Z tilt is applied first, then Y, then X.
        let rotation = DMat3::from_rotation_x(rng.next_range(-p.max_tilt, p.max_tilt))
            * DMat3::from_rotation_y(rng.next_range(-p.max_tilt, p.max_tilt))
            * DMat3::from_rotation_z(rng.next_range(-p.max_tilt, p.max_tilt));
        Self {
            center,
            half,
            rotation,
        }
    }

    fn corners(&self) -> [DVec3; 8] {
        std::array::from_fn(|i| {
            let local = DVec3::new(
                if i & 1 == 0 { -self.half.x } else { self.half.x },
                if i & 2 == 0 { -self.half.y } else { self.half.y },
                if i & 4 == 0 { -self.half.z } else { self.half.z },
            );
            self.center + self.rotation * local
        })
    }
}

/// Width for a projected edge, thinning toward the far depth threshold.
fn depth_width(base: f64, a: &Projected, b: &Projected) -> f64 {
    let t = ((a.depth + b.depth) * 0.5).clamp(0.0, 1.0);
    (base * (1.0 - (1.0 - FAR_WIDTH_FRACTION) * t)).max(MIN_STROKE_WIDTH)
}

/// The box scatter generator.
pub struct Boxes {
    width: f64,
    height: f64,
    seed: u64,
    params: BoxesParams,
    scene: Option<Scene>,
}

impl Boxes {
    pub fn new(
        width: f64,
        height: f64,
        seed: u64,
        params: BoxesParams,
    ) -> Result<Self, GeneratorError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(GeneratorError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            seed,
            params,
            scene: None,
        })
    }

    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, GeneratorError> {
        Self::new(width, height, seed, BoxesParams::from_json(json_params))
    }
}

impl Generator for Boxes {
    fn regenerate(&mut self) -> Result<(), GeneratorError> {
        let p = self.params;
        let mut rng = Xorshift64::new(self.seed);
        let camera = ViewCamera::orbit(
            Rect::canvas(self.width, self.height),
            p.rot_x,
            p.rot_y,
            p.distance,
            p.fov_deg,
        );
        let mut layer = Layer::new("boxes", Stroke::pen(p.stroke));

        for _ in 0..p.count {
            let cuboid = PlacedBox::sample(&mut rng, &p);
            let corners = cuboid.corners();
            for &(i, j) in &EDGES {
                let (Some(a), Some(b)) = (camera.project(corners[i]), camera.project(corners[j]))
                else {
                    continue;
                };
                if !camera.segment_visible(&a, &b) {
                    continue;
                }
                layer.push(
                    Path2::line(a.screen, b.screen).with_width(depth_width(p.stroke, &a, &b)),
                );
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
            "count": p.count,
            "min_size": p.min_size,
            "max_size": p.max_size,
            "spread": p.spread,
            "max_tilt": p.max_tilt,
            "rot_x": p.rot_x,
            "rot_y": p.rot_y,
            "distance": p.distance,
            "fov": p.fov_deg,
            "stroke": p.stroke,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {"type": "integer", "default": DEFAULT_COUNT, "description": "Number of boxes"},
            "min_size": {"type": "number", "default": DEFAULT_MIN_SIZE, "description": "Smallest edge length"},
            "max_size": {"type": "number", "default": DEFAULT_MAX_SIZE, "description": "Largest edge length"},
            "spread": {"type": "number", "default": DEFAULT_SPREAD, "description": "Half-extent of the scatter volume"},
            "max_tilt": {"type": "number", "default": DEFAULT_MAX_TILT, "description": "Maximum per-axis tilt in radians"},
            "rot_x": {"type": "number", "default": DEFAULT_ROT_X, "description": "Camera tilt in radians"},
            "rot_y": {"type": "number", "default": DEFAULT_ROT_Y, "description": "Camera orbit angle in radians"},
            "distance": {"type": "number", "default": DEFAULT_DISTANCE, "description": "Camera pull-back distance"},
            "fov": {"type": "number", "default": DEFAULT_FOV, "description": "Vertical field of view in degrees"},
            "stroke": {"type": "number", "default": DEFAULT_STROKE, "description": "Base stroke width before depth falloff"}
        })
    }
}
