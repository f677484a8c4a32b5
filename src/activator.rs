//! Applies a scene's visual preset and caption, once per scene change.

use log::{debug, warn};
use crate::composition::Stage;
use crate::constants::*;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::story::Story;
use crate::surface::Surface;
use crate::visual::VisualState;

/// Deferred work shared by both engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Swap the caption text for this scene once the exit animation is done.
    CaptionSwap(usize),
    /// Reactivate scene 0 once the smooth scroll to the top has settled.
    RestartSettle,
}

#[derive(Debug, Default)]
pub struct SceneActivator {
    active: Option<usize>,
    pending_swap: Option<TaskHandle>,
}

impl SceneActivator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn has_pending_swap(&self) -> bool {
        self.pending_swap.is_some()
    }

    /// Activates scene `index`. Returns true if anything was written.
    ///
    /// Re-activating the active scene does nothing. Out-of-range indices are
    /// logged and ignored. A caption swap still pending from an earlier call is
    /// cancelled so the latest scene's text always wins.
    pub fn activate(
        &mut self,
        index: usize,
        now: f64,
        story: &Story,
        stage: &dyn Stage,
        scheduler: &mut Scheduler<Deferred>,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.active == Some(index) {
            return false;
        }
        let Some(scene) = story.get(index) else {
            warn!("Ignoring activation of scene {} ({} scenes)", index, story.len());
            return false;
        };

        debug!("Activating scene {} ({}, target '{}')", index, scene.mode, scene.target);
        self.active = Some(index);

        surface.apply_visuals(&VisualState::for_mode(scene.mode));
        surface.apply_camera(&scene.camera.resolve(stage));
        surface.caption_leave();

        if let Some(stale) = self.pending_swap.take() {
            scheduler.cancel(stale);
        }
        self.pending_swap = Some(scheduler.schedule(now + CAPTION_SWAP_DELAY, Deferred::CaptionSwap(index)));

        true
    }

    /// Runs a due caption swap. Swaps from superseded activations are dropped.
    pub fn complete_swap(
        &mut self,
        handle: TaskHandle,
        index: usize,
        story: &Story,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.pending_swap != Some(handle) || self.active != Some(index) {
            return false;
        }
        self.pending_swap = None;
        match story.get(index) {
            Some(scene) => {
                surface.caption_enter(&scene.caption);
                true
            }
            None => false,
        }
    }

    /// Re-applies the active scene's camera and visuals, e.g. after the window
    /// changed size. The caption is left alone.
    pub fn reapply(&self, story: &Story, stage: &dyn Stage, surface: &mut dyn Surface) {
        if let Some(scene) = self.active.and_then(|i| story.get(i)) {
            surface.apply_visuals(&VisualState::for_mode(scene.mode));
            surface.apply_camera(&scene.camera.resolve(stage));
        }
    }

    /// Forgets the active scene and cancels the pending caption swap.
    pub fn reset(&mut self, scheduler: &mut Scheduler<Deferred>) {
        if let Some(stale) = self.pending_swap.take() {
            scheduler.cancel(stale);
        }
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPose;
    use crate::composition::Composition;
    use crate::surface::{RecordingSurface, SurfaceEvent};
    use crate::visual::VisualMode;

    struct Fixture {
        story: Story,
        stage: Composition,
        scheduler: Scheduler<Deferred>,
        surface: RecordingSurface,
        activator: SceneActivator,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                story: Story::builtin(),
                stage: Composition::new(),
                scheduler: Scheduler::new(),
                surface: RecordingSurface::new(),
                activator: SceneActivator::new(),
            }
        }

        fn activate(&mut self, index: usize, now: f64) -> bool {
            self.activator.activate(
                index,
                now,
                &self.story,
                &self.stage,
                &mut self.scheduler,
                &mut self.surface,
            )
        }

        fn run_timers(&mut self, now: f64) {
            for (handle, task) in self.scheduler.drain_due(now) {
                if let Deferred::CaptionSwap(index) = task {
                    self.activator.complete_swap(handle, index, &self.story, &mut self.surface);
                }
            }
        }
    }

    #[test]
    fn same_index_twice_writes_once() {
        let mut f = Fixture::new();
        assert!(f.activate(2, 0.0));
        assert!(!f.activate(2, 0.1));
        assert_eq!(f.surface.activation_count(), 1);
        assert_eq!(f.scheduler.pending_timers(), 1);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut f = Fixture::new();
        f.activate(1, 0.0);
        f.surface.clear();
        assert!(!f.activate(99, 0.1));
        assert!(f.surface.events.is_empty());
        assert_eq!(f.activator.active(), Some(1));
    }

    #[test]
    fn caption_leaves_then_enters_after_delay() {
        let mut f = Fixture::new();
        f.activate(0, 0.0);
        assert_eq!(f.surface.events.last(), Some(&SurfaceEvent::CaptionLeave));

        f.run_timers(CAPTION_SWAP_DELAY - 0.01);
        assert!(f.surface.last_caption().is_none());

        f.run_timers(CAPTION_SWAP_DELAY);
        assert_eq!(f.surface.last_caption(), Some(&f.story.get(0).unwrap().caption));
    }

    #[test]
    fn newer_activation_wins_the_caption() {
        let mut f = Fixture::new();
        f.activate(1, 0.0);
        f.activate(4, 0.1);
        f.run_timers(5.0);

        let entered = f.surface.captions_entered();
        assert_eq!(entered.len(), 1);
        assert_eq!(entered[0], &f.story.get(4).unwrap().caption);
    }

    #[test]
    fn visuals_follow_the_scene_mode() {
        let mut f = Fixture::new();
        f.activate(5, 0.0);
        assert_eq!(f.surface.last_visuals().unwrap().mode(), VisualMode::Micro);
        let pose = f.surface.last_camera().unwrap();
        assert_eq!(pose.zoom, CameraPose::MICRO.zoom);
    }

    #[test]
    fn reset_allows_reactivating_the_same_scene() {
        let mut f = Fixture::new();
        f.activate(0, 0.0);
        f.activator.reset(&mut f.scheduler);
        assert_eq!(f.scheduler.pending_timers(), 0);
        assert!(f.activate(0, 1.0));
        assert_eq!(f.surface.activation_count(), 2);
    }
}
