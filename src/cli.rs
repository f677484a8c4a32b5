// cli.rs - Command-line interface configuration
use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use crate::constants::*;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Scenes follow the scroll position of the chapter column
    Scroll,
    /// Scenes advance on a clock, each for its own duration
    Timer,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "cinematic")]
#[command(about = "Cinematic photosynthesis presentation", long_about = None)]
pub struct Cli {
    /// What drives scene changes
    #[arg(long, value_enum, default_value_t = DriveMode::Scroll)]
    pub mode: DriveMode,

    /// JSON story to present instead of the built-in one
    #[arg(long)]
    pub story: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = RENDER_WIDTH * 2 / 3)]
    pub width: i32,

    /// Initial window height
    #[arg(long, default_value_t = RENDER_HEIGHT * 2 / 3)]
    pub height: i32,

    /// Target frames per second
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["cinematic"]).unwrap();
        assert_eq!(cli.mode, DriveMode::Scroll);
        assert!(cli.story.is_none());
        assert_eq!(cli.width, 1280);
        assert_eq!(cli.height, 720);
        assert_eq!(cli.fps, FPS);
    }

    #[test]
    fn timer_mode_with_story() {
        let cli = Cli::try_parse_from(["cinematic", "--mode", "timer", "--story", "story.json"]).unwrap();
        assert_eq!(cli.mode, DriveMode::Timer);
        assert_eq!(cli.story, Some(PathBuf::from("story.json")));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["cinematic", "--mode", "swipe"]).is_err());
    }
}
