use raylib::prelude::*;
use crate::constants::*;

/// Chapter cards stacked vertically on the right side of the viewport.
///
/// With `offset == 0` the first chapter is centred on the reference line; the
/// content can be scrolled until the last chapter is.
pub struct ScrollLayout {
    viewport_width: f32,
    viewport_height: f32,
    chapter_count: usize,
    offset: f32,

    smooth_timer: f32,
    smooth_target: f32,
    smooth_tween: Option<ease::Tween>,
}

impl ScrollLayout {
    pub fn new(viewport_width: f32, viewport_height: f32, chapter_count: usize) -> Self {
        Self {
            viewport_width,
            viewport_height,
            chapter_count,
            offset: 0.0,
            smooth_timer: 0.0,
            smooth_target: 0.0,
            smooth_tween: None,
        }
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_scrolling(&self) -> bool {
        self.smooth_tween.is_some()
    }

    fn chapter_height(&self) -> f32 {
        self.viewport_height * CHAPTER_HEIGHT
    }

    fn stride(&self) -> f32 {
        self.chapter_height() + CHAPTER_GAP
    }

    fn padding(&self) -> f32 {
        self.viewport_height * REFERENCE_LINE - self.chapter_height() * 0.5
    }

    pub fn max_offset(&self) -> f32 {
        self.offset_for_chapter(self.chapter_count.saturating_sub(1))
    }

    /// Offset that puts chapter `index` on the reference line.
    pub fn offset_for_chapter(&self, index: usize) -> f32 {
        index as f32 * self.stride()
    }

    /// Chapter rectangles in screen space for the current offset.
    pub fn scene_rects(&self) -> Vec<Rectangle> {
        let x = self.viewport_width * 0.62;
        let width = self.viewport_width * 0.34;
        let height = self.chapter_height();
        (0..self.chapter_count)
            .map(|i| {
                let top = self.padding() + i as f32 * self.stride() - self.offset;
                Rectangle::new(x, top, width, height)
            })
            .collect()
    }

    /// User scroll. Interrupts any smooth scroll in progress.
    pub fn scroll_by(&mut self, delta: f32) {
        self.smooth_tween = None;
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    pub fn scroll_to(&mut self, offset: f32, smooth: bool) {
        let target = offset.clamp(0.0, self.max_offset());
        if smooth && (target - self.offset).abs() > f32::EPSILON {
            self.smooth_timer = 0.0;
            self.smooth_target = target;
            self.smooth_tween = Some(ease::Tween::new(ease::cubic_out, self.offset, target, SMOOTH_SCROLL_DURATION));
        } else {
            self.smooth_tween = None;
            self.offset = target;
        }
    }

    pub fn update(&mut self, dt: f32) {
        let Some(tween) = self.smooth_tween.as_mut() else {
            return;
        };
        self.smooth_timer += dt;
        self.offset = tween.apply(dt);
        if self.smooth_timer >= SMOOTH_SCROLL_DURATION {
            self.offset = self.smooth_target;
            self.smooth_tween = None;
        }
    }

    /// Keeps the same fractional chapter position across a resize.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let position = self.offset / self.stride();
        self.viewport_width = width;
        self.viewport_height = height;
        self.smooth_tween = None;
        self.offset = (position * self.stride()).clamp(0.0, self.max_offset());
    }
}
