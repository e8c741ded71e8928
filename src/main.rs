//! Hop Road entry point
//!
//! Native builds run a headless session, feeding simulated render frames
//! through the fixed-timestep accumulator. The token is driven by the
//! autopilot or left idle, and the run is recorded on a file-backed leaderboard.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use hop_road::consts::SIM_DT;
    use hop_road::highscores::{Leaderboard, ScoreBoard, format_survival_time};
    use hop_road::persistence::FileStore;
    use hop_road::platform;
    use hop_road::sim::{GameEvent, GameSession, TickInput, autopilot};
    use hop_road::tuning::Tuning;

    /// Headless Hop Road runner
    #[derive(Debug, Parser)]
    #[command(name = "hop-road", version, about)]
    struct Args {
        /// Run seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Tuning overrides (JSON)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Leaderboard directory
        #[arg(long)]
        scores: Option<PathBuf>,
        /// Stop the run after this many simulated seconds
        #[arg(long, default_value_t = 120.0)]
        max_seconds: f64,
        /// Leave the token idle instead of using the autopilot
        #[arg(long)]
        no_autopilot: bool,
        /// Simulated render frame length in milliseconds
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f32,
    }

    pub fn run() {
        let args = Args::parse();

        let tuning = args
            .tuning
            .as_deref()
            .map(Tuning::load)
            .unwrap_or_default();
        let seed = args.seed.unwrap_or_else(|| platform::now_ms() as u64);
        let dir = args.scores.unwrap_or_else(platform::default_data_dir);
        let mut board = ScoreBoard::new(FileStore::new(dir));

        let frame_dt = if args.frame_ms.is_finite() && args.frame_ms > 0.0 {
            args.frame_ms / 1000.0
        } else {
            log::warn!("Ignoring frame length {}ms", args.frame_ms);
            SIM_DT
        };
        let mut session = GameSession::new(tuning, seed, &mut board);
        let mut hops = 0u32;
        let mut frames = 0u64;
        while session.handoff().is_none() {
            let input = if args.no_autopilot {
                TickInput::default()
            } else {
                TickInput {
                    hop: autopilot::choose_hop(&session),
                }
            };
            session.update(&input, frame_dt);
            frames += 1;

            for event in session.take_events() {
                if let GameEvent::HopFinished { .. } = event {
                    hops += 1;
                }
            }

            if session.accepts_input() && session.elapsed() >= args.max_seconds {
                log::info!("Time limit reached, stopping run");
                break;
            }
        }
        log::info!("{} frames, {} ticks", frames, session.time_ticks());

        match session.report() {
            Some(report) => println!(
                "Game over ({:?}): survived {}s, {} hops, row {}",
                report.reason,
                format_survival_time(report.survival_time_seconds),
                hops,
                session.player().row_index()
            ),
            None => println!(
                "Still alive after {}s ({} hops), not recorded",
                format_survival_time(session.elapsed()),
                hops
            ),
        }
        drop(session);

        println!("\nLeaderboard:");
        for (rank, result) in board.load_all().iter().take(10).enumerate() {
            println!(
                "{:>3}. {:>8}s",
                rank + 1,
                format_survival_time(result.survival_time_seconds)
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hop Road (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `hop_road::sim::GameSession` directly
}
