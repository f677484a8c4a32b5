use std::rc::Rc;

use log::{debug, info};
use crate::activator::{Deferred, SceneActivator};
use crate::composition::Stage;
use crate::playback::PlaybackState;
use crate::resolver::{ClockSignal, SceneResolver};
use crate::scheduler::Scheduler;
use crate::story::Story;
use crate::surface::Surface;
use crate::timeline::{Timeline, format_clock};
use crate::timer::state::TimerState;

/// Clock-driven presentation: each scene stays up for its own duration.
pub struct TimerEngine {
    story: Story,
    stage: Rc<dyn Stage>,
    timeline: Timeline,

    state: TimerState,
    playback: PlaybackState,
    activator: SceneActivator,
    scheduler: Scheduler<Deferred>,
}

impl TimerEngine {
    pub fn new(story: Story, stage: Rc<dyn Stage>) -> Self {
        let timeline = Timeline::new(&story.durations());
        Self {
            story,
            stage,
            timeline,
            state: TimerState::Playing,
            playback: PlaybackState::new(0.0),
            activator: SceneActivator::new(),
            scheduler: Scheduler::new(),
        }
    }

    pub fn frame_pending(&self) -> bool {
        self.scheduler.frame_pending()
    }

    pub fn elapsed_in_scene(&self, now: f64) -> f64 {
        self.playback.elapsed_in_scene(now)
    }

    pub fn progress(&self, now: f64) -> f32 {
        if self.state == TimerState::Finished {
            return 1.0;
        }
        self.timeline.progress(self.playback.active_scene(), self.playback.elapsed_in_scene(now))
    }

    fn start_loop(&mut self) {
        self.scheduler.cancel_frame();
        if !self.timeline.is_empty() {
            self.scheduler.request_frame();
        }
    }

    fn activate(&mut self, index: usize, now: f64, surface: &mut dyn Surface) -> bool {
        self.activator.activate(index, now, &self.story, self.stage.as_ref(), &mut self.scheduler, surface)
    }

    fn publish(&self, now: f64, surface: &mut dyn Surface) {
        let index = self.playback.active_scene();
        let elapsed = self.playback.elapsed_in_scene(now);
        surface.set_clock(&format_clock(self.timeline.position(index, elapsed)));
        surface.set_progress(self.progress(now));
    }

    fn finish(&mut self, surface: &mut dyn Surface) {
        info!("Timeline finished");
        self.state = TimerState::Finished;
        surface.set_clock(&format_clock(self.timeline.total()));
        surface.set_progress(1.0);
    }

    fn frame(&mut self, now: f64, surface: &mut dyn Surface) {
        if self.playback.is_paused() {
            self.scheduler.request_frame();
            return;
        }
        self.playback.last_tick = Some(now);

        // Catch up on every scene whose duration has run out since the last frame.
        loop {
            let index = self.playback.active_scene();
            let Some(duration) = self.timeline.duration(index) else {
                break;
            };
            let signal = ClockSignal {
                scene_count: self.timeline.len(),
                duration,
                elapsed: self.playback.elapsed_in_scene(now),
            };
            if !signal.should_advance() {
                break;
            }
            if self.timeline.is_last(index) {
                self.finish(surface);
                return;
            }
            if let Some(next) = signal.resolve(Some(index)) {
                self.playback.advance(duration);
                debug!("Scene {} done after {:.1}s", index, duration);
                self.activate(next, now, surface);
            }
        }

        self.publish(now, surface);
        self.scheduler.request_frame();
    }

    fn run_deferred(&mut self, now: f64, surface: &mut dyn Surface) {
        for (handle, task) in self.scheduler.drain_due(now) {
            if let Deferred::CaptionSwap(index) = task {
                self.activator.complete_swap(handle, index, &self.story, surface);
            }
        }
    }
}

impl crate::engine::Engine for TimerEngine {
    fn start(&mut self, now: f64, surface: &mut dyn Surface) {
        self.restart(now, surface);
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
            info!("Paused at {:.2}s into scene {}", self.playback.elapsed_in_scene(now), self.playback.active_scene());
        }
        changed
    }

    fn resume(&mut self, now: f64) -> bool {
        let changed = self.playback.resume(now);
        if changed {
            info!("Resumed");
        }
        changed
    }

    fn restart(&mut self, now: f64, surface: &mut dyn Surface) {
        self.scheduler.cancel_frame();
        self.activator.reset(&mut self.scheduler);
        self.playback.restart(now);
        self.state = TimerState::Playing;

        self.activate(0, now, surface);
        self.publish(now, surface);
        self.start_loop();
    }

    fn jump_to(&mut self, index: usize, now: f64, surface: &mut dyn Surface) {
        if index >= self.story.len() {
            self.activate(index, now, surface);
            return;
        }
        // Jumping to the scene already on screen still restarts its clock.
        self.activate(index, now, surface);
        self.playback.start_scene(index, now);
        if self.state == TimerState::Finished {
            self.state = TimerState::Playing;
        }
        self.publish(now, surface);
        self.start_loop();
    }

    fn refresh(&mut self, _now: f64, surface: &mut dyn Surface) {
        if self.playback.is_paused() {
            return;
        }
        self.activator.reapply(&self.story, self.stage.as_ref(), surface);
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

    fn is_finished(&self) -> bool {
        self.state == TimerState::Finished
    }
}
