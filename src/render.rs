//! Raylib side of the output surface.
//!
//! [`RenderState`] receives the engine's writes and eases toward them every
//! frame: the camera glides between poses, elements fade, the caption slides
//! out and back in. [`RenderState::draw`] paints the result.

use rand::Rng;
use raylib::prelude::*;
use crate::camera::CameraPose;
use crate::composition::{Composition, Stage};
use crate::constants::*;
use crate::hud::Hud;
use crate::story::{Caption, Story};
use crate::surface::Surface;
use crate::visual::{Element, VisualState};

const FADE_TIME: f32 = 0.8;
const BEAM_COUNT: usize = 9;
const PARTICLE_COUNT: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptionPhase {
    Leaving,
    Entering,
    Shown,
}

pub struct RenderState {
    camera_from: CameraPose,
    camera_to: CameraPose,
    camera_timer: f32,

    visuals: VisualState,
    opacity: [f32; Element::COUNT],
    scale: [f32; Element::COUNT],

    caption: Caption,
    caption_phase: CaptionPhase,
    caption_timer: f32,

    progress: f32,
    shown_progress: f32,
    clock: String,

    // (angle in degrees, length factor)
    beams: Vec<(f32, f32)>,
    // Unit-square positions inside the micro view
    particles: Vec<Vector2>,
}

/// Everything besides the render state that a frame needs.
pub struct FrameInfo<'a> {
    pub screen_width: f32,
    pub screen_height: f32,
    pub composition: &'a Composition,
    pub story: &'a Story,
    pub chapters: &'a [Rectangle],
    pub hud: &'a Hud,
    pub active: Option<usize>,
    pub paused: bool,
    pub finished: bool,
    pub show_timeline: bool,
}

impl RenderState {
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let beams = (0..BEAM_COUNT)
            .map(|i| {
                let spread = 200.0 + i as f32 * 7.0;
                (spread + rng.random_range(-2.5..2.5), rng.random_range(0.75..1.15))
            })
            .collect();
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Vector2::new(rng.random_range(0.12..0.88), rng.random_range(0.2..0.8)))
            .collect();

        let hidden = VisualState::hidden();
        let mut opacity = [0.0; Element::COUNT];
        let mut scale = [1.0; Element::COUNT];
        for (i, element) in Element::ALL.iter().enumerate() {
            opacity[i] = hidden.get(*element).opacity;
            scale[i] = hidden.get(*element).scale;
        }

        Self {
            camera_from: CameraPose::WIDE,
            camera_to: CameraPose::WIDE,
            camera_timer: CAMERA_TRANSITION,
            visuals: hidden,
            opacity,
            scale,
            caption: Caption::default(),
            caption_phase: CaptionPhase::Shown,
            caption_timer: 0.0,
            progress: 0.0,
            shown_progress: 0.0,
            clock: "00:00".to_string(),
            beams,
            particles,
        }
    }

    /// Current camera, part-way through the eased transition.
    pub fn camera(&self) -> CameraPose {
        let t = self.camera_timer.min(CAMERA_TRANSITION);
        let eased = ease::cubic_in_out(t, 0.0, 1.0, CAMERA_TRANSITION);
        self.camera_from.lerp(&self.camera_to, eased)
    }

    pub fn caption_phase(&self) -> CaptionPhase {
        self.caption_phase
    }

    /// Caption opacity in [0, 1].
    pub fn caption_alpha(&self) -> f32 {
        let t = (self.caption_timer / CAPTION_FADE).clamp(0.0, 1.0);
        match self.caption_phase {
            CaptionPhase::Leaving => 1.0 - t,
            CaptionPhase::Entering => t,
            CaptionPhase::Shown => 1.0,
        }
    }

    pub fn opacity(&self, element: Element) -> f32 {
        self.opacity[element.index()]
    }

    pub fn update(&mut self, dt: f32) {
        self.camera_timer += dt;

        let rate = (dt / FADE_TIME * 4.0).min(1.0);
        for (i, element) in Element::ALL.iter().enumerate() {
            let target = self.visuals.get(*element);
            self.opacity[i] += (target.opacity - self.opacity[i]) * rate;
            self.scale[i] += (target.scale - self.scale[i]) * rate;
        }

        self.caption_timer += dt;
        if self.caption_phase == CaptionPhase::Entering && self.caption_timer >= CAPTION_FADE {
            self.caption_phase = CaptionPhase::Shown;
        }

        self.shown_progress += (self.progress - self.shown_progress) * (dt * 10.0).min(1.0);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, frame: &FrameInfo) {
        let view = View::new(self.camera(), frame);

        d.clear_background(Color::BLACK);
        d.draw_rectangle_gradient_v(
            0,
            0,
            frame.screen_width as i32,
            frame.screen_height as i32,
            Color::new(112, 184, 232, 255),
            Color::new(210, 236, 250, 255),
        );

        self.draw_sun(d, &view, frame.composition);
        draw_plant(d, &view, frame.composition);
        self.draw_molecules(d, &view, frame.composition);
        self.draw_micro(d, frame);

        draw_chapters(d, frame);
        self.draw_caption(d, frame);
        self.draw_hud(d, frame);
    }

    fn draw_sun(&self, d: &mut RaylibDrawHandle, view: &View, composition: &Composition) {
        let (center, s) = view.point(composition.sun);

        let beams = self.opacity(Element::LightBeams);
        if beams > 0.01 {
            for (angle, length) in &self.beams {
                let (sin, cos) = angle.to_radians().sin_cos();
                let reach = 900.0 * length * s;
                let end = Vector2::new(center.x + cos * reach, center.y - sin * reach);
                d.draw_line_ex(center, end, 5.0 * s, with_opacity(Color::new(255, 236, 140, 150), beams));
            }
        }

        let sun = self.opacity(Element::Sun);
        if sun > 0.01 {
            let radius = composition.sun_radius * self.scale[Element::Sun.index()] * s;
            d.draw_circle_v(center, radius * 1.5, with_opacity(Color::new(255, 220, 90, 70), sun));
            d.draw_circle_v(center, radius, with_opacity(Color::GOLD, sun));
        }

        self.draw_label(d, view, composition, Element::LabelLight, "Light energy");
    }

    fn draw_molecules(&self, d: &mut RaylibDrawHandle, view: &View, composition: &Composition) {
        let icons = [
            (Element::Co2, "CO2", Color::new(150, 150, 160, 255)),
            (Element::H2o, "H2O", Color::new(60, 140, 230, 255)),
            (Element::O2, "O2", Color::new(120, 200, 250, 255)),
            (Element::Glucose, "C6H12O6", Color::new(240, 170, 60, 255)),
        ];
        for (element, text, color) in icons {
            let alpha = self.opacity(element);
            if alpha <= 0.01 {
                continue;
            }
            let (p, s) = view.point(composition.position(element));
            let radius = 46.0 * s * self.scale[element.index()];
            d.draw_circle_v(p, radius, with_opacity(color, alpha));
            let size = (22.0 * s) as i32;
            let half = text.len() as f32 * size as f32 * 0.28;
            d.draw_text(text, (p.x - half) as i32, (p.y - size as f32 * 0.5) as i32, size, with_opacity(Color::WHITE, alpha));
        }

        self.draw_label(d, view, composition, Element::LabelCo2, "CO2 enters through the stomata");
        self.draw_label(d, view, composition, Element::LabelH2o, "Water rises from the roots");
        self.draw_label(d, view, composition, Element::LabelO2, "Oxygen is released");
        self.draw_label(d, view, composition, Element::LabelGlucose, "Glucose feeds the plant");
    }

    fn draw_label(&self, d: &mut RaylibDrawHandle, view: &View, composition: &Composition, element: Element, text: &str) {
        let alpha = self.opacity(element);
        if alpha <= 0.01 {
            return;
        }
        let (p, s) = view.point(composition.position(element));
        let size = (26.0 * s) as i32;
        d.draw_text(text, p.x as i32, p.y as i32, size, with_opacity(Color::new(20, 40, 30, 255), alpha));
    }

    fn draw_micro(&self, d: &mut RaylibDrawHandle, frame: &FrameInfo) {
        let alpha = self.opacity(Element::Micro);
        if alpha <= 0.01 {
            return;
        }
        let panel = Rectangle::new(
            frame.screen_width * 0.52,
            frame.screen_height * 0.12,
            frame.screen_width * 0.34,
            frame.screen_height * 0.42,
        );
        d.draw_rectangle_rounded(panel, 0.12, 12, with_opacity(Color::new(10, 40, 20, 220), alpha));

        let cx = panel.x + panel.width * 0.5;
        let cy = panel.y + panel.height * 0.5;
        d.draw_ellipse(cx as i32, cy as i32, panel.width * 0.42, panel.height * 0.34, with_opacity(Color::new(70, 170, 80, 255), alpha));
        for p in &self.particles {
            let at = Vector2::new(panel.x + p.x * panel.width, panel.y + p.y * panel.height);
            d.draw_circle_v(at, 6.0, with_opacity(Color::new(20, 100, 40, 255), alpha));
        }
        d.draw_text("Chloroplast", (panel.x + 16.0) as i32, (panel.y + 12.0) as i32, 22, with_opacity(Color::RAYWHITE, alpha));
    }

    fn draw_caption(&self, d: &mut RaylibDrawHandle, frame: &FrameInfo) {
        let alpha = self.caption_alpha();
        if alpha <= 0.01 {
            return;
        }
        let width = frame.screen_width * 0.46;
        let body = wrap(&self.caption.text, (width / 12.0) as usize);
        let height = 110.0 + body.len() as f32 * 28.0 + self.caption.bullets.len() as f32 * 26.0;
        let slide = (1.0 - alpha) * 20.0;
        let x = 32.0;
        let y = frame.screen_height - 96.0 - height + slide;

        d.draw_rectangle_rounded(Rectangle::new(x, y, width, height), 0.08, 8, with_opacity(Color::new(10, 20, 30, 200), alpha));

        let mut line_y = y + 16.0;
        d.draw_text(&self.caption.kicker, (x + 20.0) as i32, line_y as i32, 20, with_opacity(Color::GOLD, alpha));
        line_y += 30.0;
        d.draw_text(&self.caption.title, (x + 20.0) as i32, line_y as i32, 30, with_opacity(Color::WHITE, alpha));
        line_y += 46.0;
        for line in &body {
            d.draw_text(line, (x + 20.0) as i32, line_y as i32, 22, with_opacity(Color::LIGHTGRAY, alpha));
            line_y += 28.0;
        }
        for bullet in &self.caption.bullets {
            d.draw_text(&format!("- {}", bullet), (x + 32.0) as i32, line_y as i32, 20, with_opacity(Color::LIGHTGRAY, alpha));
            line_y += 26.0;
        }
    }

    fn draw_hud(&self, d: &mut RaylibDrawHandle, frame: &FrameInfo) {
        d.draw_text(&frame.story.title, 24, 20, 28, Color::new(20, 40, 60, 255));

        for (button, rect) in &frame.hud.buttons {
            d.draw_rectangle_rounded(*rect, 0.3, 6, Color::new(10, 20, 30, 180));
            d.draw_text(button.label(), (rect.x + 14.0) as i32, (rect.y + 9.0) as i32, 20, Color::RAYWHITE);
        }

        for (i, dot) in frame.hud.dots.iter().enumerate() {
            let center = Vector2::new(dot.x + dot.width / 2.0, dot.y + dot.height / 2.0);
            let color = if frame.active == Some(i) { Color::GOLD } else { Color::new(10, 20, 30, 140) };
            d.draw_circle_v(center, dot.width / 2.0, color);
        }

        if frame.show_timeline {
            let bar = frame.hud.progress_bar;
            d.draw_rectangle_rec(bar, Color::new(10, 20, 30, 120));
            d.draw_rectangle_rec(Rectangle::new(bar.x, bar.y, bar.width * self.shown_progress, bar.height), Color::GOLD);
            d.draw_text(&self.clock, (frame.screen_width - 110.0) as i32, 20, 28, Color::new(20, 40, 60, 255));
        }

        if frame.paused {
            d.draw_text("PAUSED - Enter to resume", (frame.screen_width * 0.5 - 150.0) as i32, 20, 24, Color::MAROON);
        } else if frame.finished {
            d.draw_text("The end - R to restart", (frame.screen_width * 0.5 - 130.0) as i32, 20, 24, Color::DARKGREEN);
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RenderState {
    fn apply_camera(&mut self, pose: &CameraPose) {
        self.camera_from = self.camera();
        self.camera_to = *pose;
        self.camera_timer = 0.0;
    }

    fn apply_visuals(&mut self, visuals: &VisualState) {
        self.visuals = visuals.clone();
    }

    fn caption_leave(&mut self) {
        // Fade out from wherever the caption currently is.
        let alpha = self.caption_alpha();
        self.caption_phase = CaptionPhase::Leaving;
        self.caption_timer = (1.0 - alpha) * CAPTION_FADE;
    }

    fn caption_enter(&mut self, caption: &Caption) {
        self.caption = caption.clone();
        self.caption_phase = CaptionPhase::Entering;
        self.caption_timer = 0.0;
    }

    fn set_progress(&mut self, fraction: f32) {
        self.progress = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    }

    fn set_clock(&mut self, label: &str) {
        self.clock = label.to_string();
    }
}

/// World-to-screen mapping for one frame: camera projection, then the
/// composition scaled to cover the window.
struct View {
    pose: CameraPose,
    origin: Vector2,
    fit: f32,
    offset: Vector2,
}

impl View {
    fn new(pose: CameraPose, frame: &FrameInfo) -> Self {
        let composition = frame.composition;
        let fit = (frame.screen_width / composition.width).max(frame.screen_height / composition.height);
        let offset = Vector2::new(
            (frame.screen_width - composition.width * fit) * 0.5,
            (frame.screen_height - composition.height * fit) * 0.5,
        );
        Self { pose, origin: composition.center(), fit, offset }
    }

    fn point(&self, world: Vector2) -> (Vector2, f32) {
        let (p, s) = self.pose.project(world, self.origin);
        (Vector2::new(self.offset.x + p.x * self.fit, self.offset.y + p.y * self.fit), s * self.fit)
    }

    /// Axis-aligned screen bounds of a world rectangle.
    fn rect(&self, world: Rectangle) -> Rectangle {
        let (a, _) = self.point(Vector2::new(world.x, world.y));
        let (b, _) = self.point(Vector2::new(world.x + world.width, world.y + world.height));
        Rectangle::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
    }
}

fn draw_plant(d: &mut RaylibDrawHandle, view: &View, composition: &Composition) {
    let ground = view.rect(Rectangle::new(
        -composition.width,
        composition.ground_y,
        composition.width * 3.0,
        composition.height * 2.0,
    ));
    d.draw_rectangle_rec(ground, Color::new(112, 82, 52, 255));

    let (base, s) = view.point(composition.stem_base);
    let (top, _) = view.point(composition.stem_top);

    if let Some(roots) = composition.anchor_bounds("t-roots") {
        for i in 0..5 {
            let x = roots.x + roots.width * (i as f32 / 4.0);
            let y = roots.y + roots.height * (0.6 + 0.1 * (i % 2) as f32);
            let (tip, _) = view.point(Vector2::new(x, y));
            d.draw_line_ex(base, tip, 5.0 * s, Color::new(190, 160, 110, 255));
        }
    }

    d.draw_line_ex(base, top, 14.0 * s, Color::DARKGREEN);

    if let Some(leaf) = composition.anchor_bounds("t-leaf") {
        let (c, _) = view.point(Vector2::new(leaf.x + leaf.width / 2.0, leaf.y + leaf.height / 2.0));
        d.draw_ellipse(c.x as i32, c.y as i32, leaf.width * 0.5 * s, leaf.height * 0.5 * s, Color::new(64, 160, 72, 255));
        let (tip, _) = view.point(Vector2::new(leaf.x + leaf.width, leaf.y + leaf.height / 2.0));
        d.draw_line_ex(top, tip, 3.0 * s, Color::new(40, 110, 50, 255));
    }

    if let Some(stomata) = composition.anchor_bounds("t-stomata") {
        let (c, _) = view.point(Vector2::new(stomata.x + stomata.width / 2.0, stomata.y + stomata.height / 2.0));
        d.draw_ellipse(c.x as i32, c.y as i32, stomata.width * 0.5 * s, stomata.height * 0.5 * s, Color::new(30, 80, 40, 255));
    }

    if let Some(chloroplast) = composition.anchor_bounds("t-chloroplast") {
        let (c, _) = view.point(Vector2::new(chloroplast.x + chloroplast.width / 2.0, chloroplast.y + chloroplast.height / 2.0));
        d.draw_ellipse(c.x as i32, c.y as i32, chloroplast.width * 0.5 * s, chloroplast.height * 0.5 * s, Color::new(24, 120, 44, 255));
    }
}

fn draw_chapters(d: &mut RaylibDrawHandle, frame: &FrameInfo) {
    for (i, rect) in frame.chapters.iter().enumerate() {
        if rect.y + rect.height < 0.0 || rect.y > frame.screen_height {
            continue;
        }
        let Some(scene) = frame.story.get(i) else {
            continue;
        };
        let active = frame.active == Some(i);
        let alpha = if active { 230 } else { 120 };
        d.draw_rectangle_rounded(*rect, 0.06, 8, Color::new(255, 255, 255, alpha));
        if active {
            d.draw_rectangle_rec(Rectangle::new(rect.x, rect.y + 16.0, 6.0, rect.height - 32.0), Color::GOLD);
        }

        let x = (rect.x + 24.0) as i32;
        d.draw_text(&scene.caption.kicker, x, (rect.y + 24.0) as i32, 18, Color::DARKGRAY);
        let mut y = rect.y + 52.0;
        for line in wrap(&scene.caption.title, (rect.width / 14.0) as usize) {
            d.draw_text(&line, x, y as i32, 26, Color::new(20, 40, 60, 255));
            y += 32.0;
        }
    }
}

fn with_opacity(color: Color, opacity: f32) -> Color {
    let a = color.a as f32 * opacity.clamp(0.0, 1.0);
    Color::new(color.r, color.g, color.b, a as u8)
}

/// Greedy word wrap on character count.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
