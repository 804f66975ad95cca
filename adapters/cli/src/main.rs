#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the pacmaze experience.

mod config;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pacmaze_core::InputState;
use pacmaze_rendering::{Color, Presentation, RenderingBackend};
use pacmaze_rendering_macroquad::MacroquadBackend;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{FileConfig, Mode, Settings},
    session::Session,
};

const WINDOW_TITLE: &str = "Pacman";
const DEFAULT_HEADLESS_TICKS: u64 = 3_600;

/// Command-line arguments accepted by the pacmaze binary.
#[derive(Debug, Parser)]
#[command(name = "pacmaze", version, about = "Pellet-chasing maze game")]
struct CliArgs {
    /// Adversary arrangement.
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    /// Number of wandering adversaries (1 to 4).
    #[arg(long)]
    adversaries: Option<usize>,
    /// Seed for the wandering adversaries. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per second (60 when omitted).
    #[arg(long, value_name = "HZ")]
    tick_rate: Option<f32>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
    /// Simulate without opening a window and print a summary.
    #[arg(long)]
    headless: bool,
    /// Tick budget of a headless run.
    #[arg(long, default_value_t = DEFAULT_HEADLESS_TICKS, requires = "headless")]
    ticks: u64,
    /// TOML file providing defaults for the flags above.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl CliArgs {
    fn overrides(&self) -> FileConfig {
        FileConfig {
            mode: self.mode,
            adversaries: self.adversaries,
            seed: self.seed,
            tick_rate: self.tick_rate,
            vsync: self.vsync,
            show_fps: self.show_fps.then_some(true),
        }
    }
}

/// Entry point for the pacmaze command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file.overlay(args.overrides()), rand::random())?;
    tracing::info!(
        mode = ?settings.mode,
        adversaries = settings.adversaries,
        seed = settings.seed,
        tick_rate = settings.tick_rate,
        "starting session"
    );

    let mut session = Session::new(&settings);
    if args.headless {
        let summary = session.run_headless(args.ticks);
        println!("{summary}");
        return Ok(());
    }

    let scene = session.scene().context("failed to build the initial scene")?;
    let presentation = Presentation::new(WINDOW_TITLE, Color::from_rgb_u8(0, 0, 0), scene);
    MacroquadBackend::new()
        .with_vsync(settings.vsync)
        .with_show_fps(settings.show_fps)
        .run(presentation, move |dt, input, scene| {
            let _ = session.advance(dt, InputState::from(input));
            session.populate(scene);
        })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(tracing::Level::INFO.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
