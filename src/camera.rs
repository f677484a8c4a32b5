//! Camera poses and how a scene's target string turns into one.

use log::warn;
use raylib::prelude::*;
use crate::composition::Stage;
use crate::constants::*;
use crate::visual::VisualMode;

/// Translate, rotate and scale applied to the whole composition.
/// Angles are in degrees, offsets in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub zoom: f32,
    pub ry: f32,
    pub rx: f32,
}

impl CameraPose {
    pub const WIDE: CameraPose     = CameraPose { x: 0.0,   y: 0.0,   z: 0.0, zoom: 1.00, ry: 0.0,  rx: 0.0 };
    pub const INTRO: CameraPose    = CameraPose { x: -20.0, y: -10.0, z: 0.0, zoom: 1.05, ry: -1.0, rx: 0.4 };
    pub const EQUATION: CameraPose = CameraPose { x: -40.0, y: -20.0, z: 0.0, zoom: 1.15, ry: 1.2,  rx: 0.2 };
    pub const SUN: CameraPose      = CameraPose { x: 140.0, y: 40.0,  z: 0.0, zoom: 1.35, ry: -2.5, rx: 0.6 };

    // Base poses for anchor targets; x/y are replaced by the computed pan.
    pub const TARGET: CameraPose   = CameraPose { x: 0.0,   y: 0.0,   z: 0.0, zoom: 1.85, ry: -2.0, rx: 1.0 };
    pub const MICRO: CameraPose    = CameraPose { x: 0.0,   y: 0.0,   z: 0.0, zoom: 2.20, ry: 2.5,  rx: 1.5 };

    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        CameraPose {
            x: mix(self.x, other.x),
            y: mix(self.y, other.y),
            z: mix(self.z, other.z),
            zoom: mix(self.zoom, other.zoom),
            ry: mix(self.ry, other.ry),
            rx: mix(self.rx, other.rx),
        }
    }

    /// Maps a world point to the screen: `translate3d · rotateY · rotateX · scale`
    /// around `origin`, then perspective. Returns the projected point and the
    /// effective scale at that point.
    pub fn project(&self, point: Vector2, origin: Vector2) -> (Vector2, f32) {
        // scale
        let x = (point.x - origin.x) * self.zoom;
        let y = (point.y - origin.y) * self.zoom;
        let z = 0.0_f32;

        // rotateX
        let (sin_x, cos_x) = self.rx.to_radians().sin_cos();
        let (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

        // rotateY
        let (sin_y, cos_y) = self.ry.to_radians().sin_cos();
        let (x, z) = (x * cos_y + z * sin_y, -x * sin_y + z * cos_y);

        // translate3d
        let (x, y, z) = (x + self.x, y + self.y, z + self.z);

        let depth = (PERSPECTIVE - z).max(1.0);
        let f = PERSPECTIVE / depth;
        (
            Vector2::new(origin.x + x * f, origin.y + y * f),
            self.zoom * f,
        )
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        CameraPose::WIDE
    }
}

/// A scene's camera framing before geometry is known.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraPreset {
    Static(CameraPose),
    Target { anchor: String, base: CameraPose },
}

impl CameraPreset {
    /// `wide`, `intro`, `equation` and `sun` are fixed shots; anything else names
    /// an anchor. Micro scenes frame their anchor closer.
    pub fn from_target(target: &str, mode: VisualMode) -> CameraPreset {
        match target {
            "" | "wide" => CameraPreset::Static(CameraPose::WIDE),
            "intro" => CameraPreset::Static(CameraPose::INTRO),
            "equation" => CameraPreset::Static(CameraPose::EQUATION),
            "sun" => CameraPreset::Static(CameraPose::SUN),
            anchor => CameraPreset::Target {
                anchor: anchor.to_string(),
                base: if mode == VisualMode::Micro { CameraPose::MICRO } else { CameraPose::TARGET },
            },
        }
    }

    pub fn resolve(&self, stage: &dyn Stage) -> CameraPose {
        match self {
            CameraPreset::Static(pose) => *pose,
            CameraPreset::Target { anchor, base } => match target_offset(stage, anchor) {
                Some(delta) => pose_for_delta(delta, base),
                None => {
                    warn!("Camera anchor '{}' not found, falling back to wide shot", anchor);
                    CameraPose::WIDE
                }
            },
        }
    }
}

/// Pixel delta that moves the anchor's centre onto the camera box centre.
pub fn target_offset(stage: &dyn Stage, anchor: &str) -> Option<Vector2> {
    let target = stage.anchor_bounds(anchor)?;
    let cam = stage.camera_bounds();

    let cx = (target.x - cam.x) + target.width / 2.0;
    let cy = (target.y - cam.y) + target.height / 2.0;

    Some(Vector2::new(cam.width / 2.0 - cx, cam.height / 2.0 - cy))
}

/// Scales the delta by the zoom and clamps it so the camera never pans off the
/// composition.
pub fn pose_for_delta(delta: Vector2, base: &CameraPose) -> CameraPose {
    CameraPose {
        x: (delta.x * base.zoom).clamp(-MAX_PAN_X, MAX_PAN_X),
        y: (delta.y * base.zoom).clamp(-MAX_PAN_Y, MAX_PAN_Y),
        ..*base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;

    struct OneAnchor(Rectangle);

    impl Stage for OneAnchor {
        fn camera_bounds(&self) -> Rectangle {
            Rectangle::new(0.0, 0.0, 1000.0, 800.0)
        }

        fn anchor_bounds(&self, id: &str) -> Option<Rectangle> {
            (id == "t-test").then_some(self.0)
        }
    }

    #[test]
    fn pan_is_clamped_to_safe_range() {
        let pose = pose_for_delta(Vector2::new(1000.0, -1000.0), &CameraPose::WIDE);
        assert_eq!(pose.x, 420.0);
        assert_eq!(pose.y, -320.0);
        assert_eq!(pose.zoom, 1.0);
    }

    #[test]
    fn delta_is_multiplied_by_zoom() {
        let pose = pose_for_delta(Vector2::new(100.0, 50.0), &CameraPose::TARGET);
        assert!((pose.x - 185.0).abs() < 1e-4);
        assert!((pose.y - 92.5).abs() < 1e-4);
        assert_eq!(pose.ry, CameraPose::TARGET.ry);
    }

    #[test]
    fn target_offset_centres_the_anchor() {
        // Anchor centre at (400, 300); camera centre at (500, 400).
        let stage = OneAnchor(Rectangle::new(350.0, 250.0, 100.0, 100.0));
        let delta = target_offset(&stage, "t-test").unwrap();
        assert_eq!(delta.x, 100.0);
        assert_eq!(delta.y, 100.0);
    }

    #[test]
    fn missing_anchor_falls_back_to_wide() {
        let stage = OneAnchor(Rectangle::new(0.0, 0.0, 10.0, 10.0));
        let preset = CameraPreset::from_target("t-nowhere", VisualMode::Leaf);
        assert_eq!(preset.resolve(&stage), CameraPose::WIDE);
    }

    #[test]
    fn presets_pick_the_right_base() {
        assert_eq!(CameraPreset::from_target("sun", VisualMode::Light), CameraPreset::Static(CameraPose::SUN));
        assert_eq!(CameraPreset::from_target("", VisualMode::Intro), CameraPreset::Static(CameraPose::WIDE));
        match CameraPreset::from_target("t-chloroplast", VisualMode::Micro) {
            CameraPreset::Target { base, .. } => assert_eq!(base, CameraPose::MICRO),
            other => panic!("unexpected preset {other:?}"),
        }
    }

    #[test]
    fn composition_targets_resolve_within_limits() {
        let composition = Composition::new();
        let pose = CameraPreset::from_target("t-roots", VisualMode::H2o).resolve(&composition);
        assert!(pose.x.abs() <= MAX_PAN_X && pose.y.abs() <= MAX_PAN_Y);
        // Roots sit low in the frame, so the camera moves the world up.
        assert!(pose.y < 0.0);
    }

    #[test]
    fn translation_is_applied_after_scale() {
        let pose = CameraPose { x: 100.0, zoom: 2.0, ..CameraPose::WIDE };
        let origin = Vector2::new(500.0, 500.0);

        let (at_origin, scale) = pose.project(origin, origin);
        assert!((at_origin.x - 600.0).abs() < 1e-3);
        assert!((scale - 2.0).abs() < 1e-6);

        let (p, _) = pose.project(Vector2::new(510.0, 500.0), origin);
        assert!((p.x - 620.0).abs() < 1e-3);
    }

    #[test]
    fn lerp_reaches_both_ends() {
        let a = CameraPose::WIDE;
        let b = CameraPose::SUN;
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 2.0), b);
        assert!((a.lerp(&b, 0.5).x - 70.0).abs() < 1e-4);
    }
}
