use crate::camera::CameraPose;
use crate::story::Caption;
use crate::visual::VisualState;

/// Write-only output the engines drive. Nothing here is ever read back.
pub trait Surface {
    fn apply_camera(&mut self, pose: &CameraPose);
    fn apply_visuals(&mut self, visuals: &VisualState);
    /// Start the caption's exit animation.
    fn caption_leave(&mut self);
    /// Replace the caption text and play the entry animation.
    fn caption_enter(&mut self, caption: &Caption);
    fn set_progress(&mut self, fraction: f32);
    fn set_clock(&mut self, label: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Camera(CameraPose),
    Visuals(VisualState),
    CaptionLeave,
    CaptionEnter(Caption),
    Progress(f32),
    Clock(String),
}

/// Keeps every write in order. Used to check what an engine did without a window.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// One activation writes exactly one camera pose.
    pub fn activation_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Camera(_)))
            .count()
    }

    pub fn last_camera(&self) -> Option<CameraPose> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Camera(pose) => Some(*pose),
            _ => None,
        })
    }

    pub fn last_visuals(&self) -> Option<&VisualState> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Visuals(v) => Some(v),
            _ => None,
        })
    }

    pub fn last_caption(&self) -> Option<&Caption> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::CaptionEnter(c) => Some(c),
            _ => None,
        })
    }

    pub fn captions_entered(&self) -> Vec<&Caption> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::CaptionEnter(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn last_progress(&self) -> Option<f32> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Progress(p) => Some(*p),
            _ => None,
        })
    }

    pub fn progress_history(&self) -> Vec<f32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Progress(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn last_clock(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Clock(c) => Some(c.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn apply_camera(&mut self, pose: &CameraPose) {
        self.events.push(SurfaceEvent::Camera(*pose));
    }

    fn apply_visuals(&mut self, visuals: &VisualState) {
        self.events.push(SurfaceEvent::Visuals(visuals.clone()));
    }

    fn caption_leave(&mut self) {
        self.events.push(SurfaceEvent::CaptionLeave);
    }

    fn caption_enter(&mut self, caption: &Caption) {
        self.events.push(SurfaceEvent::CaptionEnter(caption.clone()));
    }

    fn set_progress(&mut self, fraction: f32) {
        self.events.push(SurfaceEvent::Progress(fraction));
    }

    fn set_clock(&mut self, label: &str) {
        self.events.push(SurfaceEvent::Clock(label.to_string()));
    }
}
