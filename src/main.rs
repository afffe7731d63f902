//! Amaze entry point
//!
//! Runs the game headless: scripted input, logged audio and a renderer that
//! only records draw calls. Useful for checking level files and replaying
//! a fixed number of frames.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use amaze::audio::LogAudio;
use amaze::game::{FrameLimiter, Game};
use amaze::input::{Control, ControlEvent, ScriptedInput};
use amaze::level::{DirLevelSource, find_data_directory};
use amaze::renderer::RecordingRenderer;
use amaze::settings::SETTINGS_FILE;
use amaze::{Result, Settings};

#[derive(Parser, Debug)]
#[command(name = "amaze")]
#[command(about = "Vector-graphics maze flying game (headless runner)")]
struct Args {
    /// Level to start on (defaults to the one in the settings file)
    #[arg(long)]
    level: Option<usize>,
    /// Number of frames to run
    #[arg(long, default_value_t = 1000)]
    frames: u64,
    /// Settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding level<N>.cfg files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// RNG seed for explosions and flames
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Frames of full thrust at the start of the run
    #[arg(long, default_value_t = 0)]
    thrust: u64,
    /// Run as fast as possible instead of at the game frame rate
    #[arg(long)]
    unthrottled: bool,
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn resolve_data_dir(args: &Args, settings: &Settings) -> Result<PathBuf> {
    if let Some(dir) = args.data_dir.as_ref().or(settings.data_dir.as_ref()) {
        return Ok(dir.clone());
    }
    find_data_directory(&exe_dir()).or_else(|err| {
        log::debug!("{}; trying the working directory", err);
        find_data_directory(Path::new("."))
    })
}

fn run(args: Args) -> Result<()> {
    let config = args
        .config
        .clone()
        .unwrap_or_else(|| exe_dir().join(SETTINGS_FILE));
    let settings = Settings::load(&config)?;
    let levels = DirLevelSource::new(resolve_data_dir(&args, &settings)?);
    log::info!("Using data directory {}", levels.dir().display());

    let mut input = ScriptedInput::new();
    if args.thrust > 0 {
        let frame_ms = 1000 / u64::from(settings.frame_rate.max(1));
        input = input
            .at(0, ControlEvent::press(Control::Accelerate, 0))
            .at(args.thrust, ControlEvent::release(Control::Accelerate, args.thrust * frame_ms));
    }

    if settings.fullscreen {
        log::info!("Full screen requested; headless runs draw into a window-sized buffer");
    }
    let renderer = RecordingRenderer::new(settings.window_width, settings.window_height);
    let mut game = Game::new(
        args.seed,
        &settings,
        input,
        LogAudio,
        renderer,
        levels,
    );
    game.load_level(args.level.unwrap_or(settings.start_level), true)?;

    let mut limiter = FrameLimiter::new(settings.frame_rate);
    for _ in 0..args.frames {
        if !game.run_frame()? {
            break;
        }
        if !args.unthrottled {
            limiter.wait();
        }
    }

    log::info!(
        "Stopped after {} frames: {:?}, {} lives, {} lines on screen",
        game.frame(),
        game.world.phase(),
        game.world.lives(),
        game.renderer().lines.len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Amaze starting...");

    if let Err(err) = run(Args::parse()) {
        log::error!("{}", err);
        eprintln!("amaze: {}", err);
        process::exit(1);
    }
}
