//! Which scene is active for a given input signal.

use raylib::prelude::*;
use crate::constants::*;

pub trait SceneResolver {
    /// The scene that should be active, or `None` when there are no scenes.
    fn resolve(&self, current: Option<usize>) -> Option<usize>;
}

/// Snapshot of the scroll layout: the chapter whose vertical centre is closest
/// to the reference line wins. Stateless.
pub struct ScrollSignal<'a> {
    pub viewport_height: f32,
    pub scene_rects: &'a [Rectangle],
    pub reference: f32,
}

impl<'a> ScrollSignal<'a> {
    pub fn new(viewport_height: f32, scene_rects: &'a [Rectangle]) -> Self {
        Self {
            viewport_height,
            scene_rects,
            reference: REFERENCE_LINE,
        }
    }

    pub fn reference_line(&self) -> f32 {
        self.viewport_height * self.reference
    }
}

impl SceneResolver for ScrollSignal<'_> {
    fn resolve(&self, _current: Option<usize>) -> Option<usize> {
        let line = self.reference_line();
        let mut best: Option<(usize, f32)> = None;

        for (index, rect) in self.scene_rects.iter().enumerate() {
            let center = rect.y + rect.height / 2.0;
            let distance = (center - line).abs();
            // Strict comparison keeps the lowest index on ties.
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index)
    }
}

/// Clock-driven step: stay until the active scene's duration is used up.
pub struct ClockSignal {
    pub scene_count: usize,
    pub duration: f64,
    pub elapsed: f64,
}

impl ClockSignal {
    pub fn should_advance(&self) -> bool {
        self.elapsed >= self.duration
    }
}

impl SceneResolver for ClockSignal {
    fn resolve(&self, current: Option<usize>) -> Option<usize> {
        if self.scene_count == 0 {
            return None;
        }
        let last = self.scene_count - 1;
        match current {
            None => Some(0),
            Some(index) if self.should_advance() && index < last => Some(index + 1),
            Some(index) => Some(index.min(last)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects(centers: &[f32]) -> Vec<Rectangle> {
        centers
            .iter()
            .map(|c| Rectangle::new(0.0, c - 50.0, 400.0, 100.0))
            .collect()
    }

    #[test]
    fn closest_center_to_reference_line_wins() {
        let rects = rects(&[100.0, 500.0, 900.0]);
        // 1000 * 0.55 = 550
        let signal = ScrollSignal::new(1000.0, &rects);
        assert_eq!(signal.resolve(None), Some(1));
    }

    #[test]
    fn ties_pick_the_lowest_index() {
        let rects = rects(&[500.0, 600.0]);
        let signal = ScrollSignal::new(1000.0, &rects);
        assert_eq!(signal.resolve(Some(1)), Some(0));
    }

    #[test]
    fn no_scenes_resolves_to_none() {
        let signal = ScrollSignal::new(1000.0, &[]);
        assert_eq!(signal.resolve(None), None);

        let clock = ClockSignal { scene_count: 0, duration: 0.0, elapsed: 10.0 };
        assert_eq!(clock.resolve(Some(0)), None);
    }

    #[test]
    fn clock_advances_only_when_duration_is_spent() {
        let waiting = ClockSignal { scene_count: 3, duration: 5.0, elapsed: 4.99 };
        assert_eq!(waiting.resolve(Some(1)), Some(1));

        let done = ClockSignal { scene_count: 3, duration: 5.0, elapsed: 5.0 };
        assert_eq!(done.resolve(Some(1)), Some(2));
        assert_eq!(done.resolve(Some(2)), Some(2));
        assert_eq!(done.resolve(None), Some(0));
    }
}
