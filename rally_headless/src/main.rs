//! Headless rally driver
//!
//! Runs the simulation without rendering, with autopilot paddles, and prints
//! score popups plus the final standings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use rally_core::{
    Command, Config, FrameInput, GameMode, GameRng, GameWorld, ManualClock, PaddleIntent,
    PaddlePolicy, PlayerId, TrackingCpu,
};

#[derive(Parser)]
#[command(name = "rally_headless")]
#[command(about = "Simulate rally matches without a renderer", long_about = None)]
struct Cli {
    /// Number of fixed frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// RNG seed for serve angles and particles; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Game mode to select from the menu
    #[arg(long, value_enum, default_value_t = ModeArg::VsCpu)]
    mode: ModeArg,

    /// Override the win score (10-200)
    #[arg(long)]
    win_score: Option<u32>,

    /// JSON config file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print the final standings
    #[arg(long, default_value = "false")]
    quiet: bool,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    VsCpu,
    TwoPlayer,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::VsCpu => GameMode::VsCpu,
            ModeArg::TwoPlayer => GameMode::TwoPlayer,
        }
    }
}

fn log_builder(level: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Config::from_json_str(&text)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => Config::new(),
    };

    if let Some(win_score) = cli.win_score {
        config.win_score = win_score;
    }
    Ok(config.validate()?)
}

/// Steer a human-controlled paddle the way the CPU would
fn autopilot(game: &GameWorld, pilots: &mut [TrackingCpu; 2]) -> FrameInput {
    let ball = game.ball();
    let mut input = FrameInput::new();
    for player in PlayerId::BOTH {
        let steer = pilots[player.index()].steer(&ball, &game.paddle(player), game.config());
        input = input.with(
            player,
            PaddleIntent {
                dir: steer.dir,
                boost: false,
            },
        );
    }
    input
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    log_builder(cli.log_level).init();

    let config = load_config(&cli)?;
    let rng = match cli.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let clock = ManualClock::new(0);
    let mut game = GameWorld::with_parts(config, rng, Box::new(clock.clone()));
    let mut pilots = [TrackingCpu::default(); 2];

    game.select_mode(cli.mode.into());
    log::info!(
        "Simulating {} frames in {:?}, first to {}",
        cli.frames,
        game.mode(),
        game.win_score()
    );

    for frame in 0..cli.frames {
        clock.set(frame * 1000 / 60);
        if game.can_apply(Command::StartBall) {
            game.start_ball();
        }

        let input = autopilot(&game, &mut pilots);
        game.tick(&input);

        if !cli.quiet {
            for event in game.drain_events() {
                if let Some(text) = event.popup_text() {
                    println!("[{:>6}] {}", game.frame(), text.replace('\n', " | "));
                }
            }
        }
    }

    let snapshot = game.snapshot();
    let mode = game.mode();
    println!("Final standings after {} frames:", snapshot.frame);
    for player in PlayerId::BOTH {
        let stats = snapshot.stats(player);
        println!(
            "   {:<8} goals {:>3}  points {:>4}  streak {:>2}  multiplier {:.1}x",
            mode.player_label(player),
            stats.score,
            stats.total_score,
            stats.streak,
            stats.multiplier
        );
    }

    if !cli.quiet {
        println!("{}", serde_json::to_string_pretty(&snapshot.stats)?);
    }

    Ok(())
}
