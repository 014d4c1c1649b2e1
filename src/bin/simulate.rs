//! Headless simulation driver.
//!
//! Runs the engine for a fixed number of ticks with a simple scripted pilot
//! (turn whenever the player halts), logging round milestones and printing a
//! final summary. Useful for smoke-testing determinism and pacing without any
//! rendering stack:
//!
//! ```text
//! simulate [--ticks N] [--seed N] [--realtime]
//! ```

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use pacman_core::constants::LOOP_TIME;
use pacman_core::events::GameCommand;
use pacman_core::game::{Game, GameConfig};
use pacman_core::map::direction::Direction;
use pacman_core::systems::stage::GameStage;

struct Options {
    ticks: u64,
    seed: u64,
    realtime: bool,
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        ticks: 3600,
        seed: 0,
        realtime: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = args.next().context("--ticks requires a value")?;
                options.ticks = value.parse().context("--ticks must be an integer")?;
            }
            "--seed" => {
                let value = args.next().context("--seed requires a value")?;
                options.seed = value.parse().context("--seed must be an integer")?;
            }
            "--realtime" => options.realtime = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(options)
}

/// The scripted pilot: cycle through directions whenever the player is
/// stopped, which keeps it wandering (and eating) indefinitely.
struct Pilot {
    rotation: [Direction; 4],
    index: usize,
}

impl Pilot {
    fn new() -> Self {
        Self {
            rotation: [Direction::Left, Direction::Up, Direction::Right, Direction::Down],
            index: 0,
        }
    }

    fn steer(&mut self, game: &mut Game) {
        let snapshot = game.snapshot();
        if !snapshot.player.moving {
            self.index = (self.index + 1) % self.rotation.len();
            game.queue_command(GameCommand::MovePlayer(self.rotation[self.index]));
        }
    }
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")?;

    let options = parse_args()?;
    let mut game = Game::new(GameConfig {
        seed: options.seed,
        ..GameConfig::default()
    })?;
    let mut pilot = Pilot::new();

    info!(ticks = options.ticks, seed = options.seed, "Starting headless run");

    let mut audio_events = 0usize;
    let mut elapsed = 0u64;
    for _ in 0..options.ticks {
        let start = std::time::Instant::now();

        pilot.steer(&mut game);
        game.tick();
        audio_events += game.drain_audio().len();

        for error in game.drain_errors() {
            tracing::warn!(%error, "Runtime anomaly");
        }

        elapsed += 1;
        if matches!(game.stage(), GameStage::GameOver) {
            break;
        }

        if options.realtime {
            let budget = LOOP_TIME.saturating_sub(start.elapsed());
            if !budget.is_zero() {
                spin_sleep::sleep(budget);
            }
        }
    }

    let snapshot = game.snapshot();
    info!(
        ticks = elapsed,
        score = snapshot.score,
        level = snapshot.level,
        lives = snapshot.lives,
        pellets_remaining = snapshot.pellets_remaining,
        audio_events,
        stage = ?snapshot.stage,
        "Run finished"
    );

    Ok(())
}
