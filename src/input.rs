use raylib::prelude::*;
use crate::engine::Engine;
use crate::hud::Hud;
use crate::surface::Surface;

/// Pixels scrolled per mouse-wheel notch or arrow key press.
const SCROLL_STEP: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Pause,
    Resume,
    Restart,
    Jump(usize),
    Scroll(f32),
}

/// Keyboard bindings. Space pauses and never scrolls the story.
pub fn key_command(key: KeyboardKey) -> Option<Command> {
    match key {
        KeyboardKey::KEY_SPACE => Some(Command::Pause),
        KeyboardKey::KEY_ENTER | KeyboardKey::KEY_KP_ENTER => Some(Command::Resume),
        KeyboardKey::KEY_R => Some(Command::Restart),
        KeyboardKey::KEY_DOWN => Some(Command::Scroll(SCROLL_STEP)),
        KeyboardKey::KEY_UP => Some(Command::Scroll(-SCROLL_STEP)),
        KeyboardKey::KEY_PAGE_DOWN => Some(Command::Scroll(SCROLL_STEP * 4.0)),
        KeyboardKey::KEY_PAGE_UP => Some(Command::Scroll(-SCROLL_STEP * 4.0)),
        KeyboardKey::KEY_ONE => Some(Command::Jump(0)),
        KeyboardKey::KEY_TWO => Some(Command::Jump(1)),
        KeyboardKey::KEY_THREE => Some(Command::Jump(2)),
        KeyboardKey::KEY_FOUR => Some(Command::Jump(3)),
        KeyboardKey::KEY_FIVE => Some(Command::Jump(4)),
        KeyboardKey::KEY_SIX => Some(Command::Jump(5)),
        KeyboardKey::KEY_SEVEN => Some(Command::Jump(6)),
        KeyboardKey::KEY_EIGHT => Some(Command::Jump(7)),
        KeyboardKey::KEY_NINE => Some(Command::Jump(8)),
        _ => None,
    }
}

const BOUND_KEYS: [KeyboardKey; 17] = [
    KeyboardKey::KEY_SPACE,
    KeyboardKey::KEY_ENTER,
    KeyboardKey::KEY_KP_ENTER,
    KeyboardKey::KEY_R,
    KeyboardKey::KEY_DOWN,
    KeyboardKey::KEY_UP,
    KeyboardKey::KEY_PAGE_DOWN,
    KeyboardKey::KEY_PAGE_UP,
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

/// Collects this frame's commands from the keyboard, wheel and HUD clicks.
pub fn poll(rl: &RaylibHandle, hud: &Hud) -> Vec<Command> {
    let mut commands: Vec<Command> = BOUND_KEYS
        .iter()
        .filter(|key| rl.is_key_pressed(**key))
        .filter_map(|key| key_command(*key))
        .collect();

    let wheel = rl.get_mouse_wheel_move();
    if wheel != 0.0 {
        commands.push(Command::Scroll(-wheel * SCROLL_STEP));
    }

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        if let Some(command) = hud.hit(rl.get_mouse_position()) {
            commands.push(command);
        }
    }

    commands
}

pub fn dispatch(engine: &mut dyn Engine, command: Command, now: f64, surface: &mut dyn Surface) {
    match command {
        Command::Pause => {
            engine.pause(now);
        }
        Command::Resume => {
            engine.resume(now);
        }
        Command::Restart => engine.restart(now, surface),
        Command::Jump(index) => engine.jump_to(index, now, surface),
        Command::Scroll(delta) => engine.scroll_by(delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;
    use crate::story::Story;
    use crate::surface::RecordingSurface;
    use crate::timer::engine::TimerEngine;
    use std::rc::Rc;

    #[test]
    fn keyboard_bindings() {
        assert_eq!(key_command(KeyboardKey::KEY_SPACE), Some(Command::Pause));
        assert_eq!(key_command(KeyboardKey::KEY_ENTER), Some(Command::Resume));
        assert_eq!(key_command(KeyboardKey::KEY_R), Some(Command::Restart));
        assert_eq!(key_command(KeyboardKey::KEY_THREE), Some(Command::Jump(2)));
        assert_eq!(key_command(KeyboardKey::KEY_A), None);
    }

    #[test]
    fn dispatch_drives_the_engine() {
        let mut engine = TimerEngine::new(Story::builtin(), Rc::new(Composition::new()));
        let mut surface = RecordingSurface::new();
        engine.start(0.0, &mut surface);

        dispatch(&mut engine, Command::Pause, 1.0, &mut surface);
        assert!(engine.is_paused());
        dispatch(&mut engine, Command::Resume, 2.0, &mut surface);
        assert!(!engine.is_paused());
        dispatch(&mut engine, Command::Jump(4), 3.0, &mut surface);
        assert_eq!(engine.active_scene(), Some(4));
        dispatch(&mut engine, Command::Restart, 4.0, &mut surface);
        assert_eq!(engine.active_scene(), Some(0));
    }
}
