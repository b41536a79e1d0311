#![deny(unsafe_code)]
//! Closed-form wave-field generator.
//!
//! Evaluates a periodic waveform over an (x, z) grid to build a rolling
//! 3D surface, then projects its wireframe through a pitch-only pinhole
//! camera. The height formula is a single function used for every sample,
//! so the drawn frame and the exported file cannot diverge.

use plotlines_core::camera::PitchCamera;
use plotlines_core::glam::{DVec2, DVec3};
use plotlines_core::params::{param_f64, param_string, param_usize};
use plotlines_core::{Generator, GeneratorError, Layer, Path2, Rect, Scene, Segment3, Stroke};
use serde_json::{json, Value};

/// Fixed secondary "cross wave" amplitude, for visual complexity.
const CROSS_AMPLITUDE: f64 = 0.3;
/// Cross wave spatial frequency along x.
const CROSS_FREQ: f64 = 0.01;
/// Cross wave temporal frequency.
const CROSS_TIME_FREQ: f64 = 0.5;

const DEFAULT_COLS: usize = 60;
const DEFAULT_ROWS: usize = 40;
const DEFAULT_SPACING: f64 = 20.0;
const DEFAULT_AMPLITUDE: f64 = 30.0;
const DEFAULT_FREQUENCY: f64 = 0.15;
const DEFAULT_X_COUPLING: f64 = 0.05;
const DEFAULT_CAM_HEIGHT: f64 = 160.0;
const DEFAULT_CAM_DISTANCE: f64 = 320.0;
const DEFAULT_CAM_PITCH: f64 = 0.35;
const DEFAULT_FOCAL: f64 = 420.0;

/// The periodic waveform families, one pure function per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    /// Arcsine-of-sine folding, normalized to [-1, 1].
    Triangle,
    /// Sign of sine. Tie-break: `sin(t) >= 0` maps to +1, so
    /// `square(0) == 1`.
    Square,
    /// Centered modulo ramp in [-1, 1); `sawtooth(0) == 0`.
    Sawtooth,
}

impl Waveform {
    /// Parses a waveform name; unrecognized names fall back to `Sine`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "triangle" => Waveform::Triangle,
            "square" => Waveform::Square,
            "sawtooth" => Waveform::Sawtooth,
            _ => Waveform::Sine,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// Evaluates the waveform at phase `t`. All variants return values in
    /// [-1, 1].
    pub fn eval(self, t: f64) -> f64 {
        match self {
            Waveform::Sine => sine(t),
            Waveform::Triangle => triangle(t),
            Waveform::Square => square(t),
            Waveform::Sawtooth => sawtooth(t),
        }
    }
}

fn sine(t: f64) -> f64 {
    t.sin()
}

fn triangle(t: f64) -> f64 {
    (2.0 / std::f64::consts::PI) * t.sin().asin()
}

fn square(t: f64) -> f64 {
    if t.sin() >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn sawtooth(t: f64) -> f64 {
    let u = t / std::f64::consts::TAU;
    2.0 * (u - (u + 0.5).floor())
}

/// Parameters for the wave generator.
#[derive(Debug, Clone, Copy)]
pub struct WaveParams {
    pub cols: usize,
    pub rows: usize,
    /// Grid spacing in world units.
    pub spacing: f64,
    pub amplitude: f64,
    /// Spatial frequency along the depth (z) axis.
    pub frequency: f64,
    pub phase: f64,
    /// Frozen animation time; the exported frame.
    pub time: f64,
    /// How strongly x skews the primary wave phase.
    pub x_coupling: f64,
    pub waveform: Waveform,
    pub cam_height: f64,
    pub cam_distance: f64,
    pub cam_pitch: f64,
    pub focal: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            spacing: DEFAULT_SPACING,
            amplitude: DEFAULT_AMPLITUDE,
            frequency: DEFAULT_FREQUENCY,
            phase: 0.0,
            time: 0.0,
            x_coupling: DEFAULT_X_COUPLING,
            waveform: Waveform::Sine,
            cam_height: DEFAULT_CAM_HEIGHT,
            cam_distance: DEFAULT_CAM_DISTANCE,
            cam_pitch: DEFAULT_CAM_PITCH,
            focal: DEFAULT_FOCAL,
        }
    }
}

impl WaveParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            cols: param_usize(params, "cols", d.cols).max(2),
            rows: param_usize(params, "rows", d.rows).max(2),
            spacing: param_f64(params, "spacing", d.spacing),
            amplitude: param_f64(params, "amplitude", d.amplitude),
            frequency: param_f64(params, "frequency", d.frequency),
            phase: param_f64(params, "phase", d.phase),
            time: param_f64(params, "time", d.time),
            x_coupling: param_f64(params, "x_coupling", d.x_coupling),
            waveform: Waveform::from_name(&param_string(params, "waveform", "sine")),
            cam_height: param_f64(params, "cam_height", d.cam_height),
            cam_distance: param_f64(params, "cam_distance", d.cam_distance),
            cam_pitch: param_f64(params, "cam_pitch", d.cam_pitch),
            focal: param_f64(params, "focal", d.focal),
        }
    }
}

/// The wave generator.
pub struct Waves {
    width: f64,
    height: f64,
    params: WaveParams,
    scene: Option<Scene>,
}

impl Waves {
    pub fn new(width: f64, height: f64, params: WaveParams) -> Result<Self, GeneratorError> {
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

    /// Creates a wave generator from a JSON params object.
    ///
    /// The wave field is closed-form, so the pass consumes no randomness;
    /// the seed parameter exists for interface uniformity and is unused.
    pub fn from_json(
        width: f64,
        height: f64,
        _seed: u64,
        json_params: &Value,
    ) -> Result<Self, GeneratorError> {
        Self::new(width, height, WaveParams::from_json(json_params))
    }

    /// The surface height at world (x, z): the primary waveform driven by
    /// depth, skewed by x, plus the fixed small cross wave.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        let p = &self.params;
        let base = p
            .waveform
            .eval(z * p.frequency + x * p.x_coupling + p.phase + p.time);
        let cross = CROSS_AMPLITUDE * (x * CROSS_FREQ + p.time * CROSS_TIME_FREQ).sin();
        p.amplitude * (base + cross)
    }

    fn mesh(&self) -> Vec<Vec<DVec3>> {
        let p = &self.params;
        let half_width = (p.cols - 1) as f64 * p.spacing * 0.5;
        (0..p.rows)
            .map(|row| {
                let z = row as f64 * p.spacing;
                (0..p.cols)
                    .map(|col| {
                        let x = col as f64 * p.spacing - half_width;
                        DVec3::new(x, self.height_at(x, z), z)
                    })
                    .collect()
            })
            .collect()
    }

    fn camera(&self) -> PitchCamera {
        let p = &self.params;
        PitchCamera::new(
            DVec3::new(0.0, p.cam_height, -p.cam_distance),
            p.cam_pitch,
            p.focal,
            Rect::canvas(self.width, self.height),
        )
    }
}

impl Generator for Waves {
    fn regenerate(&mut self) -> Result<(), GeneratorError> {
        let mesh = self.mesh();
        let camera = self.camera();
        let mut layer = Layer::new("wireframe", Stroke::pen(1.0));

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
            "amplitude": p.amplitude,
            "frequency": p.frequency,
            "phase": p.phase,
            "time": p.time,
            "x_coupling": p.x_coupling,
            "waveform": p.waveform.name(),
            "cam_height": p.cam_height,
            "cam_distance": p.cam_distance,
            "cam_pitch": p.cam_pitch,
            "focal": p.focal,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "cols": {"type": "integer", "default": DEFAULT_COLS, "min": 2, "description": "Grid columns (x axis)"},
            "rows": {"type": "integer", "default": DEFAULT_ROWS, "min": 2, "description": "Grid rows (depth axis)"},
            "spacing": {"type": "number", "default": DEFAULT_SPACING, "description": "Grid spacing in world units"},
            "amplitude": {"type": "number", "default": DEFAULT_AMPLITUDE, "description": "Wave height scale"},
            "frequency": {"type": "number", "default": DEFAULT_FREQUENCY, "description": "Spatial frequency along depth"},
            "phase": {"type": "number", "default": 0.0, "description": "Phase offset"},
            "time": {"type": "number", "default": 0.0, "description": "Frozen animation time"},
            "x_coupling": {"type": "number", "default": DEFAULT_X_COUPLING, "description": "How strongly x skews the wave phase"},
            "waveform": {
                "type": "string",
                "default": "sine",
                "values": ["sine", "triangle", "square", "sawtooth"],
                "description": "Waveform family"
            },
            "cam_height": {"type": "number", "default": DEFAULT_CAM_HEIGHT, "description": "Camera height above the surface plane"},
            "cam_distance": {"type": "number", "default": DEFAULT_CAM_DISTANCE, "description": "Camera pull-back from the grid front"},
            "cam_pitch": {"type": "number", "default": DEFAULT_CAM_PITCH, "description": "Downward pitch in radians"},
            "focal": {"type": "number", "default": DEFAULT_FOCAL, "description": "Pinhole focal distance"}
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Waveform boundary values --

    #[test]
    fn sine_triangle_sawtooth_are_zero_at_zero() {
        assert_eq!(Waveform::Sine.eval(0.0), 0.0);
        assert_eq!(Waveform::Triangle.eval(0.0), 0.0);
        assert_eq!(Waveform::Sawtooth.eval(0.0), 0.0);
    }

    #[test]
    fn square_tie_break_at_zero_is_positive_one() {
        // sin(0) == 0 is the boundary; the >= 0 convention maps it to +1.
        assert_eq!(Waveform::Square.eval(0.0), 1.0);
        assert_eq!(Waveform::Square.eval(0.1), 1.0);
        assert_eq!(Waveform::Square.eval(-0.1), -1.0);
    }

    #[test]
    fn all_waveforms_stay_within_unit_amplitude() {
        for wf in [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Square,
            Waveform::Sawtooth,
        ] {
            for i in -1000..1000 {
                let t = i as f64 * 0.0137;
                let v = wf.eval(t);
                assert!(
                    (-1.0..=1.0).contains(&v),
                    "{wf:?}({t}) = {v} out of [-1, 1]"
                );
            }
        }
    }

    #[test]
    fn triangle_peaks_at_quarter_period() {
        use std::f64::consts::FRAC_PI_2;
        assert!((Waveform::Triangle.eval(FRAC_PI_2) - 1.0).abs() < 1e-12);
        assert!((Waveform::Triangle.eval(-FRAC_PI_2) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn sawtooth_is_periodic_and_centered() {
        use std::f64::consts::TAU;
        for i in 0..20 {
            let t = i as f64 * 0.3;
            assert!((Waveform::Sawtooth.eval(t) - Waveform::Sawtooth.eval(t + TAU)).abs() < 1e-9);
        }
    }

    // -- Generator --

    fn generated(params: WaveParams) -> Waves {
        let mut w = Waves::new(800.0, 600.0, params).unwrap();
        w.regenerate().unwrap();
        w
    }

    #[test]
    fn scene_is_none_before_first_pass() {
        let w = Waves::new(800.0, 600.0, WaveParams::default()).unwrap();
        assert!(w.scene().is_none());
    }

    #[test]
    fn default_parameters_produce_visible_wireframe() {
        let w = generated(WaveParams::default());
        let scene = w.scene().unwrap();
        assert!(!scene.is_empty());
        for layer in &scene.layers {
            for path in &layer.paths {
                for p in &path.points {
                    assert!(p.x.is_finite() && p.y.is_finite());
                }
            }
        }
    }

    #[test]
    fn identical_parameters_produce_identical_scenes() {
        let a = generated(WaveParams::default());
        let b = generated(WaveParams::default());
        assert_eq!(a.scene().unwrap(), b.scene().unwrap());
    }

    #[test]
    fn height_includes_the_cross_wave_term() {
        let mut params = WaveParams::default();
        params.amplitude = 1.0;
        params.frequency = 0.0;
        params.x_coupling = 0.0;
        params.phase = 0.0;
        let w = Waves::new(800.0, 600.0, params).unwrap();
        // Primary term is sine(0) = 0, so only the cross wave remains.
        let expected = CROSS_AMPLITUDE * (100.0 * CROSS_FREQ).sin();
        assert!((w.height_at(100.0, 57.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn amplitude_scales_heights_linearly() {
        let mut quiet = WaveParams::default();
        quiet.amplitude = 10.0;
        let mut loud = WaveParams::default();
        loud.amplitude = 30.0;
        let a = Waves::new(800.0, 600.0, quiet).unwrap();
        let b = Waves::new(800.0, 600.0, loud).unwrap();
        let (x, z) = (42.0, 13.0);
        assert!((b.height_at(x, z) - 3.0 * a.height_at(x, z)).abs() < 1e-9);
    }

    #[test]
    fn from_json_parses_waveform_names() {
        let w = Waves::from_json(800.0, 600.0, 0, &json!({"waveform": "square"})).unwrap();
        assert_eq!(w.params()["waveform"], "square");
        let w = Waves::from_json(800.0, 600.0, 0, &json!({"waveform": "nonsense"})).unwrap();
        assert_eq!(w.params()["waveform"], "sine");
    }
}
