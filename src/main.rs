//! Cosmic Defender entry point
//!
//! Native builds run a headless session driven by a simple autopilot:
//! useful for soak-testing balance tables and reproducing seeds.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use cosmic_defender::box_center;
    use cosmic_defender::consts::FRAME_MS;
    use cosmic_defender::persistence::{JsonFileStore, MemoryStore, ScoreStore};
    use cosmic_defender::platform::FrameClock;
    use cosmic_defender::sim::{GameEvent, GamePhase, GameState, Screen, TickInput};
    use cosmic_defender::{GameTuning, QualityPreset, Settings, Simulation};

    /// Pixels of slack before the autopilot steers
    const STEER_DEADZONE: f32 = 4.0;

    #[derive(Parser, Debug)]
    #[command(name = "cosmic-defender")]
    #[command(about = "Headless Cosmic Defender session driven by an autopilot")]
    struct Cli {
        /// RNG seed for the run
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Maximum simulation ticks before stopping
        #[arg(long, default_value_t = 36_000)]
        ticks: u32,
        /// Simulated milliseconds per host frame
        #[arg(long, default_value_t = FRAME_MS)]
        frame_ms: f32,
        /// JSON balance table replacing the built-in levels
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Save directory for the high score (in-memory when omitted)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Quality preset: low, medium or high
        #[arg(long, value_parser = parse_quality)]
        quality: Option<QualityPreset>,
        /// Print the final render snapshot as JSON
        #[arg(long)]
        dump: bool,
    }

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::from_str(s).ok_or_else(|| format!("unknown quality preset '{s}'"))
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let cli = Cli::parse();

        let tuning = match &cli.tuning {
            Some(path) => GameTuning::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => GameTuning::default(),
        };

        let settings = cli.quality.map(Settings::from_preset).unwrap_or_default();

        let store: Box<dyn ScoreStore> = match &cli.store {
            Some(dir) => Box::new(JsonFileStore::in_dir(dir)),
            None => Box::new(MemoryStore::new()),
        };

        log::info!("Cosmic Defender (headless) starting, seed {}", cli.seed);
        let mut sim = Simulation::new(tuning, settings, store, cli.seed);
        sim.start();
        report(sim.drain_events());

        let mut clock = FrameClock::new();
        let mut ticks_run = 0;
        for frame in 0..cli.ticks {
            let dt = clock.tick(f64::from(frame) * f64::from(cli.frame_ms));
            let input = autopilot(sim.state());
            sim.step(&input, dt);
            ticks_run += 1;
            report(sim.drain_events());

            match sim.phase() {
                GamePhase::LevelComplete => {
                    sim.next_level();
                    report(sim.drain_events());
                }
                GamePhase::GameOver => break,
                _ => {}
            }
        }

        let state = sim.state();
        match state.outcome {
            Some(run) => println!(
                "{} | score {} | level {} | high score {}{}",
                if run.won { "MISSION ACCOMPLISHED" } else { "GAME OVER" },
                run.final_score,
                run.level,
                state.high_score,
                if run.new_high_score { " (new)" } else { "" },
            ),
            None => println!(
                "Stopped after {ticks_run} ticks | score {} | level {} | lives {}",
                state.score, state.level, state.lives
            ),
        }

        if cli.dump {
            let json = serde_json::to_string_pretty(&sim.snapshot()).context("serializing snapshot")?;
            println!("{json}");
        }
        Ok(())
    }

    /// Track the lowest enemy horizontally and keep the trigger held
    fn autopilot(state: &GameState) -> TickInput {
        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };
        let Some(player) = &state.player else {
            return input;
        };
        let here = box_center(player.pos, player.size).x;
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|enemy| box_center(enemy.pos, enemy.size).x);
        if let Some(x) = target {
            input.left = x < here - STEER_DEADZONE;
            input.right = x > here + STEER_DEADZONE;
        }
        input
    }

    fn report(events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::ShowScreen(Screen::LevelComplete(summary)) => log::info!(
                    "Level {} cleared: {} pts (+{} bonus), {}% accuracy",
                    summary.level,
                    summary.level_score,
                    summary.bonus,
                    summary.accuracy
                ),
                GameEvent::ShowScreen(screen) => log::debug!("Screen: {screen:?}"),
                GameEvent::Sound(sound) => log::trace!("Sound: {sound:?}"),
                GameEvent::ScreenShake(intensity) => log::trace!("Shake: {intensity}"),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Simulation` directly; there is no CLI
}
