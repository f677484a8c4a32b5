//! Running/paused state and the per-scene clock.
//!
//! Elapsed time in a scene is `now - scene_started_at - paused_accumulated`.
//! Paused intervals are folded into `paused_accumulated` on resume, so they
//! never count toward a scene's duration.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct PlaybackState {
    active_scene: usize,
    state: PlayState,
    scene_started_at: f64,
    paused_accumulated: f64,
    paused_at: Option<f64>,
    pub last_tick: Option<f64>,
}

impl PlaybackState {
    pub fn new(now: f64) -> Self {
        Self {
            active_scene: 0,
            state: PlayState::Running,
            scene_started_at: now,
            paused_accumulated: 0.0,
            paused_at: None,
            last_tick: None,
        }
    }

    pub fn active_scene(&self) -> usize {
        self.active_scene
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    pub fn paused_accumulated(&self) -> f64 {
        self.paused_accumulated
    }

    /// RUNNING -> PAUSED. Returns false when already paused.
    pub fn pause(&mut self, now: f64) -> bool {
        if self.state == PlayState::Paused {
            return false;
        }
        self.state = PlayState::Paused;
        self.paused_at = Some(now);
        true
    }

    /// PAUSED -> RUNNING. Returns false when already running.
    pub fn resume(&mut self, now: f64) -> bool {
        if self.state == PlayState::Running {
            return false;
        }
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_accumulated += (now - paused_at).max(0.0);
        }
        self.state = PlayState::Running;
        true
    }

    /// Back to scene 0, running, with every accumulated duration cleared.
    pub fn restart(&mut self, now: f64) {
        *self = PlaybackState::new(now);
    }

    /// Jumps to `index` and starts its clock from zero.
    pub fn start_scene(&mut self, index: usize, now: f64) {
        self.active_scene = index;
        self.scene_started_at = now;
        self.paused_accumulated = 0.0;
        if self.paused_at.is_some() {
            self.paused_at = Some(now);
        }
    }

    /// Moves to the next scene, carrying any time past `duration` into it.
    pub fn advance(&mut self, duration: f64) {
        self.scene_started_at += self.paused_accumulated + duration;
        self.paused_accumulated = 0.0;
        self.active_scene += 1;
    }

    pub fn elapsed_in_scene(&self, now: f64) -> f64 {
        let reference = self.paused_at.unwrap_or(now);
        (reference - self.scene_started_at - self.paused_accumulated).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_on_scene_zero() {
        let p = PlaybackState::new(10.0);
        assert_eq!(p.active_scene(), 0);
        assert_eq!(p.state(), PlayState::Running);
        assert_eq!(p.elapsed_in_scene(12.5), 2.5);
    }

    #[test]
    fn paused_time_does_not_count() {
        let mut p = PlaybackState::new(0.0);
        assert!(p.pause(3.0));
        // Frozen while paused.
        assert_eq!(p.elapsed_in_scene(50.0), 3.0);
        assert!(p.resume(103.0));
        assert_eq!(p.elapsed_in_scene(103.0), 3.0);
        assert_eq!(p.elapsed_in_scene(104.0), 4.0);
        assert_eq!(p.paused_accumulated(), 100.0);
    }

    #[test]
    fn redundant_transitions_are_noops() {
        let mut p = PlaybackState::new(0.0);
        assert!(!p.resume(1.0));
        assert!(p.pause(2.0));
        assert!(!p.pause(5.0));
        assert_eq!(p.elapsed_in_scene(9.0), 2.0);
        assert!(p.resume(6.0));
        assert!(!p.resume(7.0));
        assert_eq!(p.paused_accumulated(), 4.0);
    }

    #[test]
    fn advance_carries_overflow() {
        let mut p = PlaybackState::new(0.0);
        p.pause(1.0);
        p.resume(2.0);
        // 5.2s wall clock, 1s paused: 4.2s in scene.
        p.advance(4.0);
        assert_eq!(p.active_scene(), 1);
        assert!((p.elapsed_in_scene(5.2) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn restart_clears_everything() {
        let mut p = PlaybackState::new(0.0);
        p.advance(5.0);
        p.pause(7.0);
        p.restart(20.0);
        assert_eq!(p.active_scene(), 0);
        assert!(!p.is_paused());
        assert_eq!(p.paused_accumulated(), 0.0);
        assert_eq!(p.elapsed_in_scene(20.0), 0.0);
    }

    #[test]
    fn start_scene_while_paused_stays_frozen_at_zero() {
        let mut p = PlaybackState::new(0.0);
        p.pause(4.0);
        p.start_scene(3, 6.0);
        assert_eq!(p.active_scene(), 3);
        assert_eq!(p.elapsed_in_scene(9.0), 0.0);
        p.resume(10.0);
        assert_eq!(p.elapsed_in_scene(11.0), 1.0);
    }
}
