use std::rc::Rc;

use log::{debug, info};
use raylib::prelude::*;
use crate::activator::{Deferred, SceneActivator};
use crate::composition::Stage;
use crate::constants::*;
use crate::playback::PlaybackState;
use crate::resolver::{SceneResolver, ScrollSignal};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::scroll::layout::ScrollLayout;
use crate::story::Story;
use crate::surface::Surface;

/// Scroll-driven presentation: the chapter nearest the reference line is the
/// active scene.
pub struct ScrollEngine {
    story: Story,
    stage: Rc<dyn Stage>,
    layout: ScrollLayout,

    playback: PlaybackState,
    activator: SceneActivator,
    scheduler: Scheduler<Deferred>,
    restart_task: Option<TaskHandle>,
}

impl ScrollEngine {
    pub fn new(story: Story, stage: Rc<dyn Stage>, viewport_width: f32, viewport_height: f32) -> Self {
        let layout = ScrollLayout::new(viewport_width, viewport_height, story.len());
        Self {
            story,
            stage,
            layout,
            playback: PlaybackState::new(0.0),
            activator: SceneActivator::new(),
            scheduler: Scheduler::new(),
            restart_task: None,
        }
    }

    pub fn layout(&self) -> &ScrollLayout {
        &self.layout
    }

    pub fn frame_pending(&self) -> bool {
        self.scheduler.frame_pending()
    }

    fn start_loop(&mut self) {
        self.scheduler.cancel_frame();
        self.scheduler.request_frame();
    }

    fn activate(&mut self, index: usize, now: f64, surface: &mut dyn Surface) -> bool {
        self.activator.activate(index, now, &self.story, self.stage.as_ref(), &mut self.scheduler, surface)
    }

    fn resolve(&self) -> Option<usize> {
        let rects = self.layout.scene_rects();
        ScrollSignal::new(self.layout.viewport_height(), &rects).resolve(self.activator.active())
    }

    /// One animation-frame callback. Always reschedules so the loop survives a
    /// pause, but does no work while paused or inside the throttle window.
    fn frame(&mut self, now: f64, surface: &mut dyn Surface) {
        self.scheduler.request_frame();

        if self.playback.is_paused() {
            return;
        }
        if let Some(last) = self.playback.last_tick {
            if now - last < FRAME_THROTTLE {
                return;
            }
        }
        self.playback.last_tick = Some(now);

        if let Some(index) = self.resolve() {
            self.activate(index, now, surface);
        }
    }

    fn run_deferred(&mut self, now: f64, surface: &mut dyn Surface) {
        for (handle, task) in self.scheduler.drain_due(now) {
            match task {
                Deferred::CaptionSwap(index) => {
                    self.activator.complete_swap(handle, index, &self.story, surface);
                }
                Deferred::RestartSettle => {
                    if self.restart_task != Some(handle) {
                        continue;
                    }
                    self.restart_task = None;
                    debug!("Scroll settled, reactivating scene 0");
                    self.activate(0, now, surface);
                    self.start_loop();
                }
            }
        }
    }
}

impl crate::engine::Engine for ScrollEngine {
    fn start(&mut self, now: f64, surface: &mut dyn Surface) {
        self.playback = PlaybackState::new(now);
        self.activate(0, now, surface);
        self.start_loop();
    }

    fn pump(&mut self, now: f64, surface: &mut dyn Surface) {
        self.run_deferred(now, surface);
        if self.scheduler.take_frame().is_some() {
            self.frame(now, surface);
        }
    }

    fn pause(&mut self, now: f64) -> bool {
        let changed = self.playback.pause(now);
        if changed {
            info!("Paused");
        }
        changed
    }

    fn resume(&mut self, now: f64) -> bool {
        if !self.playback.resume(now) {
            return false;
        }
        info!("Resumed");
        self.start_loop();
        true
    }

    fn restart(&mut self, now: f64, _surface: &mut dyn Surface) {
        info!("Restarting from the top");
        if let Some(stale) = self.restart_task.take() {
            self.scheduler.cancel(stale);
        }
        self.scheduler.cancel_frame();
        self.activator.reset(&mut self.scheduler);
        self.playback.restart(now);

        self.layout.scroll_to(0.0, true);
        self.restart_task = Some(self.scheduler.schedule(now + RESTART_SETTLE_DELAY, Deferred::RestartSettle));
    }

    fn jump_to(&mut self, index: usize, now: f64, surface: &mut dyn Surface) {
        if index >= self.story.len() {
            self.activate(index, now, surface);
            return;
        }
        // A jump inside the restart settle window wins over the pending reset.
        if let Some(stale) = self.restart_task.take() {
            self.scheduler.cancel(stale);
        }
        self.layout.scroll_to(self.layout.offset_for_chapter(index), false);
        self.activate(index, now, surface);
        self.start_loop();
    }

    fn refresh(&mut self, now: f64, surface: &mut dyn Surface) {
        if self.playback.is_paused() {
            return;
        }
        self.activator.reapply(&self.story, self.stage.as_ref(), surface);
        if let Some(index) = self.resolve() {
            self.activate(index, now, surface);
        }
    }

    fn update(&mut self, dt: f32) {
        self.layout.update(dt);
    }

    fn scroll_by(&mut self, delta: f32) {
        self.layout.scroll_by(delta);
    }

    fn set_viewport(&mut self, width: f32, height: f32) {
        self.layout.set_viewport(width, height);
    }

    fn chapter_rects(&self) -> Vec<Rectangle> {
        self.layout.scene_rects()
    }

    fn story(&self) -> &Story {
        &self.story
    }

    fn active_scene(&self) -> Option<usize> {
        self.activator.active()
    }

    fn is_paused(&self) -> bool {
        self.playback.is_paused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;
    use crate::engine::Engine;
    use crate::surface::RecordingSurface;

    const DT: f64 = 1.0 / 60.0;

    fn engine() -> ScrollEngine {
        ScrollEngine::new(Story::builtin(), Rc::new(Composition::new()), 1280.0, 720.0)
    }

    /// Runs frames from `from` to `to` like the host loop does.
    fn run(engine: &mut ScrollEngine, surface: &mut RecordingSurface, from: f64, to: f64) -> f64 {
        let mut now = from;
        while now <= to {
            engine.update(DT as f32);
            engine.pump(now, surface);
            now += DT;
        }
        now
    }

    #[test]
    fn scrolling_changes_the_active_scene() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        let now = run(&mut engine, &mut surface, 0.0, 0.5);
        assert_eq!(engine.active_scene(), Some(0));

        let offset = engine.layout().offset_for_chapter(3);
        engine.scroll_by(offset);
        run(&mut engine, &mut surface, now, now + 0.5);
        assert_eq!(engine.active_scene(), Some(3));
        assert_eq!(surface.last_caption(), Some(&engine.story().get(3).unwrap().caption));
    }

    #[test]
    fn steady_scroll_activates_once() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        run(&mut engine, &mut surface, 0.0, 2.0);
        assert_eq!(surface.activation_count(), 1);
    }

    #[test]
    fn throttle_skips_frames_inside_the_window() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        engine.pump(1.0, &mut surface);

        engine.scroll_by(engine.layout().offset_for_chapter(2));
        engine.pump(1.01, &mut surface);
        assert_eq!(engine.active_scene(), Some(0));
        engine.pump(1.04, &mut surface);
        assert_eq!(engine.active_scene(), Some(2));
    }

    #[test]
    fn paused_loop_keeps_scheduling_but_does_nothing() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        let now = run(&mut engine, &mut surface, 0.0, 0.5);

        assert!(engine.pause(now));
        assert!(!engine.pause(now));
        engine.scroll_by(engine.layout().offset_for_chapter(4));
        let now = run(&mut engine, &mut surface, now, now + 1.0);
        assert_eq!(engine.active_scene(), Some(0));
        assert!(engine.frame_pending());

        assert!(engine.resume(now));
        assert!(!engine.resume(now));
        run(&mut engine, &mut surface, now, now + 0.2);
        assert_eq!(engine.active_scene(), Some(4));
    }

    #[test]
    fn restart_scrolls_up_then_reactivates_scene_zero() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        engine.scroll_by(engine.layout().offset_for_chapter(5));
        let now = run(&mut engine, &mut surface, 0.0, 0.5);
        assert_eq!(engine.active_scene(), Some(5));

        engine.pause(now);
        engine.restart(now, &mut surface);
        assert!(!engine.is_paused());
        assert!(!engine.frame_pending());
        assert_eq!(engine.active_scene(), None);

        surface.clear();
        run(&mut engine, &mut surface, now, now + 1.0);
        assert_eq!(engine.layout().offset(), 0.0);
        assert_eq!(engine.active_scene(), Some(0));
        assert_eq!(surface.activation_count(), 1);
        assert!(engine.frame_pending());
    }

    #[test]
    fn jump_scrolls_the_chapter_into_place() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        engine.jump_to(6, 0.1, &mut surface);
        assert_eq!(engine.active_scene(), Some(6));

        run(&mut engine, &mut surface, 0.1, 1.5);
        assert_eq!(engine.active_scene(), Some(6));
        assert_eq!(engine.layout().offset(), engine.layout().offset_for_chapter(6));
    }

    #[test]
    fn jump_during_restart_settle_cancels_the_reset() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        engine.scroll_by(engine.layout().offset_for_chapter(3));
        let now = run(&mut engine, &mut surface, 0.0, 0.5);
        assert_eq!(engine.active_scene(), Some(3));

        engine.restart(now, &mut surface);
        engine.jump_to(5, now + 0.1, &mut surface);
        assert!(engine.frame_pending());

        surface.clear();
        run(&mut engine, &mut surface, now + 0.1, now + 1.0);
        assert_eq!(engine.active_scene(), Some(5));
        assert_eq!(surface.activation_count(), 0);
        assert_eq!(engine.layout().offset(), engine.layout().offset_for_chapter(5));
    }

    #[test]
    fn refresh_rewrites_camera_and_visuals() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        engine.scroll_by(engine.layout().offset_for_chapter(2));
        let now = run(&mut engine, &mut surface, 0.0, 0.5);
        assert_eq!(engine.active_scene(), Some(2));
        let pose = surface.last_camera();

        surface.clear();
        engine.refresh(now, &mut surface);
        assert_eq!(surface.activation_count(), 1);
        assert_eq!(surface.last_camera(), pose);
        let mode = engine.story().get(2).unwrap().mode;
        assert_eq!(surface.last_visuals().map(|v| v.mode()), Some(mode));
        assert_eq!(engine.active_scene(), Some(2));
    }

    #[test]
    fn refresh_while_paused_writes_nothing() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        let now = run(&mut engine, &mut surface, 0.0, 0.5);

        engine.pause(now);
        surface.clear();
        engine.refresh(now + 0.1, &mut surface);
        assert!(surface.events.is_empty());
    }

    #[test]
    fn resize_then_refresh_keeps_the_scene() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        engine.scroll_by(engine.layout().offset_for_chapter(4));
        let now = run(&mut engine, &mut surface, 0.0, 0.5);
        assert_eq!(engine.active_scene(), Some(4));

        engine.set_viewport(1600.0, 900.0);
        engine.refresh(now, &mut surface);
        assert_eq!(engine.active_scene(), Some(4));
        run(&mut engine, &mut surface, now, now + 0.5);
        assert_eq!(engine.active_scene(), Some(4));
    }

    #[test]
    fn bad_jump_is_harmless() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);
        engine.jump_to(42, 0.1, &mut surface);
        assert_eq!(engine.active_scene(), Some(0));
        run(&mut engine, &mut surface, 0.1, 0.5);
        assert_eq!(engine.active_scene(), Some(0));
    }
}
