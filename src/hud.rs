//! On-screen controls: pause/resume/restart buttons and one navigation dot per
//! scene. Layout only; drawing lives in the renderer.

use raylib::prelude::*;
use crate::input::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Pause,
    Resume,
    Restart,
}

impl Button {
    pub fn label(self) -> &'static str {
        match self {
            Button::Pause => "Pause",
            Button::Resume => "Resume",
            Button::Restart => "Restart",
        }
    }

    fn command(self) -> Command {
        match self {
            Button::Pause => Command::Pause,
            Button::Resume => Command::Resume,
            Button::Restart => Command::Restart,
        }
    }
}

pub struct Hud {
    pub buttons: Vec<(Button, Rectangle)>,
    pub dots: Vec<Rectangle>,
    pub progress_bar: Rectangle,
}

impl Hud {
    const MARGIN: f32 = 24.0;
    const BUTTON_WIDTH: f32 = 110.0;
    const BUTTON_HEIGHT: f32 = 36.0;
    const DOT_SIZE: f32 = 18.0;
    const DOT_GAP: f32 = 14.0;

    pub fn new(screen_width: f32, screen_height: f32, scene_count: usize) -> Self {
        let bottom = screen_height - Self::MARGIN - Self::BUTTON_HEIGHT;

        let buttons = [Button::Pause, Button::Resume, Button::Restart]
            .into_iter()
            .enumerate()
            .map(|(i, button)| {
                let x = Self::MARGIN + i as f32 * (Self::BUTTON_WIDTH + 10.0);
                (button, Rectangle::new(x, bottom, Self::BUTTON_WIDTH, Self::BUTTON_HEIGHT))
            })
            .collect();

        let dots_width = scene_count as f32 * (Self::DOT_SIZE + Self::DOT_GAP) - Self::DOT_GAP;
        let dots_x = screen_width - Self::MARGIN - dots_width.max(0.0);
        let dots_y = bottom + (Self::BUTTON_HEIGHT - Self::DOT_SIZE) / 2.0;
        let dots = (0..scene_count)
            .map(|i| {
                let x = dots_x + i as f32 * (Self::DOT_SIZE + Self::DOT_GAP);
                Rectangle::new(x, dots_y, Self::DOT_SIZE, Self::DOT_SIZE)
            })
            .collect();

        let progress_bar = Rectangle::new(0.0, screen_height - 6.0, screen_width, 6.0);

        Self { buttons, dots, progress_bar }
    }

    /// The command behind whatever was clicked at `point`, if anything.
    pub fn hit(&self, point: Vector2) -> Option<Command> {
        let inside = |r: &Rectangle| {
            point.x >= r.x && point.x <= r.x + r.width && point.y >= r.y && point.y <= r.y + r.height
        };

        if let Some((button, _)) = self.buttons.iter().find(|(_, r)| inside(r)) {
            return Some(button.command());
        }
        self.dots.iter().position(inside).map(Command::Jump)
    }
}
