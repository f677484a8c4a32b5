use raylib::prelude::*;
use crate::story::Story;
use crate::surface::Surface;

/// A loop driver plus its pause/resume/restart controller.
///
/// The host calls [`Engine::pump`] once per displayed frame; it runs the
/// pending animation-frame callback (if one was requested) and any deferred
/// work that has come due.
pub trait Engine {
    /// Activates scene 0 and requests the first frame.
    fn start(&mut self, now: f64, surface: &mut dyn Surface);
    fn pump(&mut self, now: f64, surface: &mut dyn Surface);

    fn pause(&mut self, now: f64) -> bool;
    fn resume(&mut self, now: f64) -> bool;
    fn restart(&mut self, now: f64, surface: &mut dyn Surface);
    /// Goes straight to `index`, bypassing normal progression.
    fn jump_to(&mut self, index: usize, now: f64, surface: &mut dyn Surface);
    /// Re-applies the active scene after the viewport changed.
    fn refresh(&mut self, now: f64, surface: &mut dyn Surface);

    /// Advances host-side animation (smooth scrolling) by `dt` seconds.
    fn update(&mut self, _dt: f32) {}
    fn scroll_by(&mut self, _delta: f32) {}
    fn set_viewport(&mut self, _width: f32, _height: f32) {}
    /// Screen rectangles of the chapter cards, when the engine scrolls them.
    fn chapter_rects(&self) -> Vec<Rectangle> {
        Vec::new()
    }

    fn story(&self) -> &Story;
    fn active_scene(&self) -> Option<usize>;
    fn is_paused(&self) -> bool;
    fn is_finished(&self) -> bool {
        false
    }
}
