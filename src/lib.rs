//! Scroll- or timer-driven cinematic presentation of a fixed multi-scene story.
//!
//! The engines decide which scene is active and write camera poses, visual
//! state-sets, captions and progress to a [`surface::Surface`]. The binary
//! draws that surface with raylib.

pub mod activator;
pub mod camera;
pub mod cli;
pub mod composition;
pub mod constants;
pub mod engine;
pub mod error;
pub mod hud;
pub mod input;
pub mod playback;
pub mod render;
pub mod resolver;
pub mod scheduler;
pub mod scroll;
pub mod story;
pub mod surface;
pub mod timeline;
pub mod timer;
pub mod visual;
