//! Camera projection: 3D world points to 2D canvas coordinates.
//!
//! Two strategies, matched to how the generators build their views:
//!
//! - [`PitchCamera`]: translate relative to the camera, rotate by a single
//!   pitch angle, pinhole divide by a focal distance. Used by the wave
//!   generator.
//! - [`ViewCamera`]: full model-view + projection matrix pipeline with a
//!   homogeneous divide and NDC-to-screen mapping (Y flipped). Used by the
//!   box, mountain, and wormhole generators.
//!
//! Both are plain values built once per generation pass and passed by
//! reference into pure projection calls; the draw path and the export path
//! read the same camera, so they agree by construction.

use crate::geom::{Rect, Segment3};
use glam::{DMat4, DVec2, DVec3};

/// Slack band around the canvas inside which an off-screen endpoint still
/// keeps its segment. Generous on purpose: partially visible long segments
/// would otherwise vanish whole.
pub const EXPORT_MARGIN: f64 = 50.0;

/// Near-zero threshold for the homogeneous divide.
const W_EPSILON: f64 = 1e-9;

/// Pitch-only pinhole camera.
///
/// Projects by translating the point relative to the camera position,
/// rotating about the X axis by `pitch`, then dividing by depth scaled by
/// `focal`. World +Y maps up on the canvas. Points at or behind the camera
/// plane (depth ≤ 0 after rotation) are culled.
#[derive(Debug, Clone, Copy)]
pub struct PitchCamera {
    pub position: DVec3,
    pub pitch: f64,
    pub focal: f64,
    pub canvas: Rect,
}

impl PitchCamera {
    pub fn new(position: DVec3, pitch: f64, focal: f64, canvas: Rect) -> Self {
        Self {
            position,
            pitch,
            focal,
            canvas,
        }
    }

    /// Projects a world point, or `None` if it lies behind the camera.
    pub fn project(&self, p: DVec3) -> Option<DVec2> {
        let rel = p - self.position;
        let (s, c) = self.pitch.sin_cos();
        let y = rel.y * c - rel.z * s;
        let depth = rel.y * s + rel.z * c;
        if depth <= 0.0 {
            return None;
        }
        let scale = self.focal / depth;
        let center = self.canvas.center();
        Some(DVec2::new(
            center.x + rel.x * scale,
            center.y - y * scale,
        ))
    }

    /// Projects both endpoints, dropping the segment whole if either is
    /// behind the camera. No partial clipping.
    pub fn project_segment(&self, seg: Segment3) -> Option<(DVec2, DVec2)> {
        Some((self.project(seg.a)?, self.project(seg.b)?))
    }
}

/// A point after the full matrix pipeline: screen coordinates plus the
/// post-divide NDC depth used by the visibility heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: DVec2,
    pub depth: f64,
}

/// Model-view/projection matrix camera.
///
/// The matrices are optional: before they are initialized every projection
/// fails closed (`None`), so callers skip the element instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct ViewCamera {
    model_view: Option<DMat4>,
    projection: Option<DMat4>,
    canvas: Rect,
}

impl ViewCamera {
    /// A camera with no matrices yet; all projections return `None`.
    pub fn uninitialized(canvas: Rect) -> Self {
        Self {
            model_view: None,
            projection: None,
            canvas,
        }
    }

    /// An orbit camera: the scene rotated by `rot_x` then `rot_y` (radians),
    /// pushed back `distance` along -Z, viewed through a perspective
    /// projection with the given vertical field of view in degrees.
    pub fn orbit(canvas: Rect, rot_x: f64, rot_y: f64, distance: f64, fov_deg: f64) -> Self {
        let model_view = DMat4::from_translation(DVec3::new(0.0, 0.0, -distance))
            * DMat4::from_rotation_x(rot_x)
            * DMat4::from_rotation_y(rot_y);
        let aspect = canvas.width / canvas.height;
        let projection =
            DMat4::perspective_rh_gl(fov_deg.to_radians(), aspect, 0.1, distance * 20.0);
        Self {
            model_view: Some(model_view),
            projection: Some(projection),
            canvas,
        }
    }

    /// A camera with explicit matrices (test doubles use this).
    pub fn with_matrices(canvas: Rect, model_view: DMat4, projection: DMat4) -> Self {
        Self {
            model_view: Some(model_view),
            projection: Some(projection),
            canvas,
        }
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Transforms a world point through model-view and projection, performs
    /// the homogeneous divide, and maps NDC to screen pixels with Y flipped.
    ///
    /// Fails closed: returns `None` if the matrices are unset or the point
    /// is at/behind the eye plane (non-positive w).
    pub fn project(&self, p: DVec3) -> Option<Projected> {
        let mv = self.model_view?;
        let proj = self.projection?;
        let clip = proj * mv * p.extend(1.0);
        if clip.w <= W_EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = self.canvas.x + (ndc.x * 0.5 + 0.5) * self.canvas.width;
        let y = self.canvas.y + (1.0 - (ndc.y * 0.5 + 0.5)) * self.canvas.height;
        Some(Projected {
            screen: DVec2::new(x, y),
            depth: ndc.z,
        })
    }

    /// Projects a segment and applies the whole-segment visibility rule:
    /// both post-divide depths must be below the far threshold (depth < 1)
    /// and at least one endpoint must land within [`EXPORT_MARGIN`] of the
    /// canvas. Partially out-of-frame segments are kept or dropped whole —
    /// there is no frustum clipping, so exports can truncate lines right at
    /// the frame edge. Accepted approximation; do not "fix" silently.
    pub fn project_segment(&self, seg: Segment3) -> Option<(DVec2, DVec2)> {
        let a = self.project(seg.a)?;
        let b = self.project(seg.b)?;
        if !self.segment_visible(&a, &b) {
            return None;
        }
        Some((a.screen, b.screen))
    }

    /// The keep/drop rule described on [`project_segment`](Self::project_segment).
    pub fn segment_visible(&self, a: &Projected, b: &Projected) -> bool {
        let in_depth = a.depth < 1.0 && b.depth < 1.0;
        let near_canvas = self.canvas.contains_with_margin(a.screen, EXPORT_MARGIN)
            || self.canvas.contains_with_margin(b.screen, EXPORT_MARGIN);
        in_depth && near_canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    // -- PitchCamera --

    #[test]
    fn pitch_camera_projects_on_axis_point_to_canvas_center() {
        let cam = PitchCamera::new(DVec3::new(0.0, 50.0, -200.0), 0.0, 300.0, CANVAS);
        // Directly ahead of the camera at positive depth.
        let p = DVec3::new(0.0, 50.0, 100.0);
        let s = cam.project(p).unwrap();
        assert!((s.x - 400.0).abs() < 1e-9, "x = {}", s.x);
        assert!((s.y - 300.0).abs() < 1e-9, "y = {}", s.y);
    }

    #[test]
    fn pitch_camera_culls_points_behind_the_camera() {
        let cam = PitchCamera::new(DVec3::ZERO, 0.0, 300.0, CANVAS);
        assert!(cam.project(DVec3::new(0.0, 0.0, -10.0)).is_none());
        assert!(cam.project(DVec3::ZERO).is_none(), "zero depth must cull");
    }

    #[test]
    fn pitch_camera_drops_segment_whole_when_one_end_is_behind() {
        let cam = PitchCamera::new(DVec3::ZERO, 0.0, 300.0, CANVAS);
        let seg = Segment3::new(DVec3::new(0.0, 0.0, 10.0), DVec3::new(0.0, 0.0, -10.0));
        assert!(cam.project_segment(seg).is_none());
    }

    #[test]
    fn pitch_camera_world_up_maps_to_screen_up() {
        let cam = PitchCamera::new(DVec3::ZERO, 0.0, 300.0, CANVAS);
        let above = cam.project(DVec3::new(0.0, 10.0, 100.0)).unwrap();
        // Screen y grows downward, so a point above the axis lands above
        // the canvas center.
        assert!(above.y < 300.0);
    }

    #[test]
    fn pitch_rotation_moves_projection_vertically() {
        let flat = PitchCamera::new(DVec3::ZERO, 0.0, 300.0, CANVAS);
        let tilted = PitchCamera::new(DVec3::ZERO, 0.3, 300.0, CANVAS);
        let p = DVec3::new(0.0, 0.0, 100.0);
        let a = flat.project(p).unwrap();
        let b = tilted.project(p).unwrap();
        assert!((a.y - b.y).abs() > 1.0, "pitch had no effect");
    }

    // -- ViewCamera --

    #[test]
    fn view_camera_projects_origin_to_canvas_center_under_orbit() {
        let cam = ViewCamera::orbit(CANVAS, 0.4, 1.2, 500.0, 60.0);
        // The world origin lies on the optical axis for any orbit rotation.
        let s = cam.project(DVec3::ZERO).unwrap();
        assert!((s.screen.x - 400.0).abs() < 1e-6, "x = {}", s.screen.x);
        assert!((s.screen.y - 300.0).abs() < 1e-6, "y = {}", s.screen.y);
        assert!(s.depth < 1.0);
    }

    #[test]
    fn uninitialized_camera_fails_closed() {
        let cam = ViewCamera::uninitialized(CANVAS);
        assert!(cam.project(DVec3::ZERO).is_none());
        let seg = Segment3::new(DVec3::ZERO, DVec3::X);
        assert!(cam.project_segment(seg).is_none());
    }

    #[test]
    fn points_behind_the_eye_are_culled() {
        let cam = ViewCamera::orbit(CANVAS, 0.0, 0.0, 100.0, 60.0);
        // 200 units toward the viewer puts the point behind the eye.
        assert!(cam.project(DVec3::new(0.0, 0.0, 200.0)).is_none());
    }

    #[test]
    fn y_axis_is_flipped_to_screen_coordinates() {
        let cam = ViewCamera::orbit(CANVAS, 0.0, 0.0, 500.0, 60.0);
        let up = cam.project(DVec3::new(0.0, 50.0, 0.0)).unwrap();
        assert!(
            up.screen.y < 300.0,
            "world +Y should land above canvas center, got y = {}",
            up.screen.y
        );
    }

    #[test]
    fn far_segments_are_dropped_by_the_depth_heuristic() {
        let cam = ViewCamera::orbit(CANVAS, 0.0, 0.0, 100.0, 60.0);
        let near = cam.project(DVec3::ZERO).unwrap();
        // Beyond the far plane (far = distance * 20 = 2000).
        let far = cam.project(DVec3::new(0.0, 0.0, -3000.0)).unwrap();
        assert!(far.depth > 1.0);
        assert!(!cam.segment_visible(&near, &far));
    }

    #[test]
    fn segment_with_one_endpoint_near_canvas_is_kept_whole() {
        let cam = ViewCamera::orbit(CANVAS, 0.0, 0.0, 500.0, 60.0);
        let inside = cam.project(DVec3::ZERO).unwrap();
        let off = cam.project(DVec3::new(900.0, 0.0, 0.0)).unwrap();
        // One endpoint is on-canvas, so the pair passes the margin rule.
        assert!(cam.segment_visible(&inside, &off));
    }

    #[test]
    fn segment_entirely_outside_margin_is_dropped() {
        let cam = ViewCamera::orbit(CANVAS, 0.0, 0.0, 500.0, 60.0);
        let a = Projected {
            screen: DVec2::new(-200.0, -200.0),
            depth: 0.5,
        };
        let b = Projected {
            screen: DVec2::new(-300.0, -250.0),
            depth: 0.5,
        };
        assert!(!cam.segment_visible(&a, &b));
    }
}
