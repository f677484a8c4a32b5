use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use raylib::prelude::*;

use cinematic::cli::{Cli, DriveMode};
use cinematic::composition::Composition;
use cinematic::engine::Engine;
use cinematic::hud::Hud;
use cinematic::input;
use cinematic::render::{FrameInfo, RenderState};
use cinematic::scroll::engine::ScrollEngine;
use cinematic::story::Story;
use cinematic::timer::engine::TimerEngine;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --- Load Story ---
    let story = match &cli.story {
        Some(path) => Story::from_path(path)
            .with_context(|| format!("Failed to load story from {}", path.display()))?,
        None => Story::builtin(),
    };
    info!("Presenting '{}' ({} scenes, {:?} mode)", story.title, story.len(), cli.mode);

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title(&story.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(cli.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut screen_width = rl.get_screen_width() as f32;
    let mut screen_height = rl.get_screen_height() as f32;

    // The engines resolve camera targets against the same layout the renderer draws.
    let composition = Rc::new(Composition::new());
    let mut engine: Box<dyn Engine> = match cli.mode {
        DriveMode::Scroll => Box::new(ScrollEngine::new(story, composition.clone(), screen_width, screen_height)),
        DriveMode::Timer => Box::new(TimerEngine::new(story, composition.clone())),
    };
    let mut hud = Hud::new(screen_width, screen_height, engine.story().len());
    let mut render = RenderState::new();

    engine.start(rl.get_time(), &mut render);

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = rl.get_time();
        let dt = rl.get_frame_time();

        if rl.is_window_resized() {
            screen_width = rl.get_screen_width() as f32;
            screen_height = rl.get_screen_height() as f32;
            engine.set_viewport(screen_width, screen_height);
            hud = Hud::new(screen_width, screen_height, engine.story().len());
            engine.refresh(now, &mut render);
        }

        for command in input::poll(&rl, &hud) {
            input::dispatch(engine.as_mut(), command, now, &mut render);
        }

        // --- Update Logic ---
        engine.update(dt);
        engine.pump(now, &mut render);
        render.update(dt);

        // --- Render ---
        let chapters = engine.chapter_rects();
        let frame = FrameInfo {
            screen_width,
            screen_height,
            composition: &composition,
            story: engine.story(),
            chapters: &chapters,
            hud: &hud,
            active: engine.active_scene(),
            paused: engine.is_paused(),
            finished: engine.is_finished(),
            show_timeline: cli.mode == DriveMode::Timer,
        };

        let mut d = rl.begin_drawing(&thread);
        render.draw(&mut d, &frame);
    }

    Ok(())
}
