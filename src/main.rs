//! Dot Swing entry point
//!
//! Runs the campaign headless: input comes from stdin, one line per tick, as
//! whitespace-separated key names (`left right up down jump attach`). End of
//! input quits. Splash text goes to stdout, frames to the log.
//!
//! Usage: `dot-swing [start-level]` where `start-level` is 0-based.

use std::io::{BufRead, Lines, StdinLock};

use anyhow::{Context, bail};
use glam::Vec2;

use dot_swing::driver::{Driver, Frontend, Outcome, Splash};
use dot_swing::sim::{FrameView, TickEvents, TickInput};
use dot_swing::{LevelSet, Tuning};

const LEVEL_DIR: &str = "levels";
const TUNING_PATH: &str = "tuning.json";
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
/// Log a frame snapshot this often (ticks)
const FRAME_LOG_INTERVAL: u64 = 60;

/// Reads scripted input from stdin and reports through the log
struct HeadlessFrontend {
    lines: Lines<StdinLock<'static>>,
}

impl HeadlessFrontend {
    fn new() -> Self {
        Self {
            lines: std::io::stdin().lock().lines(),
        }
    }
}

fn parse_input(line: &str) -> TickInput {
    let mut input = TickInput::default();
    for token in line.split_whitespace() {
        match token {
            "left" => input.left = true,
            "right" => input.right = true,
            "up" => input.up = true,
            "down" => input.down = true,
            "jump" => input.jump = true,
            "attach" => input.toggle_attach = true,
            other => log::warn!("Unknown input token `{}`", other),
        }
    }
    input
}

impl Frontend for HeadlessFrontend {
    fn poll_input(&mut self) -> Option<TickInput> {
        match self.lines.next()? {
            Ok(line) => Some(parse_input(&line)),
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn present(&mut self, view: &FrameView, camera: Vec2, events: &TickEvents) {
        if events.snapped.is_some() {
            log::debug!("Tether snapped at {:?}", view.player);
        }
        if view.tick % FRAME_LOG_INTERVAL == 0 {
            match serde_json::to_string(view) {
                Ok(json) => log::debug!("camera={:?} frame={}", camera, json),
                Err(e) => log::warn!("Failed to encode frame: {}", e),
            }
        }
    }

    fn splash(&mut self, splash: &Splash) {
        println!("{}", splash.title());
        if let Some(subtitle) = splash.subtitle() {
            println!("{}", subtitle);
        }
    }
}

fn start_level_from_args() -> anyhow::Result<usize> {
    let mut args = std::env::args().skip(1);
    let index = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("start level must be a 0-based index, got `{}`", arg))?,
        None => 0,
    };
    if args.next().is_some() {
        bail!("usage: dot-swing [start-level]");
    }
    Ok(index)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Dot Swing (headless) starting...");

    let start = start_level_from_args()?;
    let tuning = Tuning::load(TUNING_PATH);
    let levels = LevelSet::campaign(LEVEL_DIR);

    let mut frontend = HeadlessFrontend::new();
    let outcome = Driver::new(tuning, levels, VIEWPORT)
        .run(&mut frontend, start)
        .context("level load failed")?;

    match outcome {
        Outcome::Won { total_score } => log::info!("Won with total score {}", total_score),
        Outcome::Quit { total_score } => log::info!("Quit with total score {}", total_score),
    }
    Ok(())
}
