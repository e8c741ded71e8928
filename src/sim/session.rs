//! Top-level game session
//!
//! Orchestrates one run on a fixed timestep. Per tick, in order:
//! input -> camera advance and row streaming -> hop -> cars -> spawn cadence
//! -> terminal checks. The first terminal condition ends the run exactly once:
//! input stops, timers stop, and the result is handed to the leaderboard.
//!
//! Hosts either call `tick` at the fixed rate or feed real frame times to
//! `update`, which runs up to `MAX_SUBSTEPS` fixed steps per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{self, CollisionParams};
use super::frame::{
    CameraTransform, CarVisual, Frame, PlayerVisual, RowVisual, death_fraction, death_rotation,
    death_scale, hop_pulse_scale,
};
use super::player::{HopDirection, Player};
use super::spawner::CarSpawner;
use super::state::{Camera, Car, GameEvent, GameOverReason, GamePhase};
use super::stream::WorldStreamer;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::{GameResult, Leaderboard};
use crate::platform;
use crate::tuning::Tuning;

/// Discrete gestures from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Hop forward
    Tap,
    /// Hop backward
    SwipeDown,
}

impl From<InputEvent> for HopDirection {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::Tap => HopDirection::Forward,
            InputEvent::SwipeDown => HopDirection::Backward,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub hop: Option<HopDirection>,
}

impl From<InputEvent> for TickInput {
    fn from(event: InputEvent) -> Self {
        Self {
            hop: Some(event.into()),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub reason: GameOverReason,
    pub survival_time_seconds: f64,
    pub result: GameResult,
}

/// One run of the game
pub struct GameSession<L> {
    tuning: Tuning,
    phase: GamePhase,
    world: WorldStreamer,
    spawner: CarSpawner,
    player: Player,
    /// Live cars (spawn order)
    cars: Vec<Car>,
    leaderboard: L,
    /// Unix ms at session start
    started_at_ms: f64,
    /// Simulated seconds since start
    elapsed: f64,
    time_ticks: u64,
    /// Events from the latest `tick`/`update` call (pre-roll rows until the first)
    events: Vec<GameEvent>,
    /// Unsimulated frame time carried into the next `update`
    accumulator: f32,
    report: Option<GameOverReport>,
    /// Seconds since game over (drives the result handoff delay)
    since_game_over: f32,
}

impl<L: Leaderboard> GameSession<L> {
    /// Start a run: pre-roll rows, place the player on row 0, start the clock
    ///
    /// Invalid tuning is replaced by the defaults.
    pub fn new(tuning: Tuning, seed: u64, leaderboard: L) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(err) => {
                log::warn!("Rejected tuning, using defaults: {}", err);
                Tuning::default()
            }
        };
        let mut world = WorldStreamer::new(&tuning);
        let preroll = world.preroll(tuning.preroll_rows);
        let events = preroll
            .iter()
            .map(|row| GameEvent::RowSpawned {
                row: row.id(),
                kind: row.kind,
            })
            .collect();

        let player = Player::new(
            world.camera().x,
            tuning.row_height,
            tuning.player_size,
            tuning.hop_duration,
        );
        log::info!(
            "Session started (seed {}, {} rows pre-generated)",
            seed,
            preroll.len()
        );

        Self {
            spawner: CarSpawner::new(&tuning, seed),
            tuning,
            phase: GamePhase::Running,
            world,
            player,
            cars: Vec::new(),
            leaderboard,
            started_at_ms: platform::now_ms(),
            elapsed: 0.0,
            time_ticks: 0,
            events,
            accumulator: 0.0,
            report: None,
            since_game_over: 0.0,
        }
    }

    /// Override the wall-clock start time (Unix ms)
    pub fn started_at(mut self, ms: f64) -> Self {
        self.started_at_ms = ms;
        self
    }

    /// Whether input events should still be delivered
    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Advance the session by one fixed timestep
    ///
    /// Events from the previous call are discarded; nothing is recorded after
    /// game over, so the final tick's events stay readable.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if self.phase == GamePhase::Running {
            self.events.clear();
        }
        self.step(input, dt);
    }

    /// Advance by one rendered frame of `frame_dt` seconds
    ///
    /// Runs whole `SIM_DT` steps from an accumulator, at most `MAX_SUBSTEPS`
    /// per frame. The hop input applies to the first step only. Returns the
    /// number of steps taken.
    pub fn update(&mut self, input: &TickInput, frame_dt: f32) -> u32 {
        if self.phase == GamePhase::Running {
            self.events.clear();
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(&input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot
            input.hop = None;
        }
        substeps
    }

    fn step(&mut self, input: &TickInput, dt: f32) {
        if self.phase == GamePhase::GameOver {
            self.since_game_over += dt;
            return;
        }

        self.time_ticks += 1;
        self.elapsed += f64::from(dt);

        if let Some(direction) = input.hop {
            let from_y = self.player.y;
            if let Some(to_y) = self.player.request_hop(direction) {
                self.events.push(GameEvent::HopStarted { from_y, to_y });
            }
        }

        let update = self.world.advance(dt);
        for row in &update.spawned {
            self.events.push(GameEvent::RowSpawned {
                row: row.id(),
                kind: row.kind,
            });
        }
        for &row in &update.culled {
            self.events.push(GameEvent::RowCulled { row });
        }

        if let Some(y) = self.player.update(dt) {
            self.events.push(GameEvent::HopFinished { y });
        }

        let cull_line = self.world.cull_line();
        let events = &mut self.events;
        self.cars.retain_mut(|car| {
            let finished = car.advance(dt);
            if finished || car.y < cull_line {
                events.push(GameEvent::CarExpired { id: car.id });
                false
            } else {
                true
            }
        });

        if let Some(car) = self
            .spawner
            .tick(dt, self.world.camera(), self.world.active_roads())
        {
            self.events.push(GameEvent::CarSpawned {
                id: car.id,
                row: car.row,
                direction: car.direction,
            });
            self.cars.push(car);
        }

        if let Some(reason) = self.check_terminal() {
            self.end_run(reason);
        }
    }

    /// Terminal condition for the current state (no side effects)
    pub fn check_terminal(&self) -> Option<GameOverReason> {
        collision::check(
            &self.player,
            &self.cars,
            self.world.camera(),
            &self.collision_params(),
        )
    }

    fn collision_params(&self) -> CollisionParams {
        CollisionParams {
            car_width: self.tuning.car_width,
            car_height: self.tuning.car_height,
            view_half_height: self.tuning.view_half_height(),
            fall_margin: self.tuning.fall_behind_margin,
        }
    }

    /// Enter game over; later calls are ignored
    pub fn end_run(&mut self, reason: GameOverReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.player.kill();
        self.spawner.stop();

        let survival_time_seconds = self.elapsed;
        let result = GameResult {
            timestamp: self.started_at_ms + survival_time_seconds * 1000.0,
            survival_time_seconds,
        };
        // Best-effort: the run is reported whether or not the save lands
        if let Err(err) = self.leaderboard.save(result) {
            log::warn!("Failed to save result: {}", err);
        }

        log::info!(
            "Game over ({:?}) after {:.2}s, {} ticks",
            reason,
            survival_time_seconds,
            self.time_ticks
        );
        self.events.push(GameEvent::GameOver {
            reason,
            survival_time_seconds,
        });
        self.report = Some(GameOverReport {
            reason,
            survival_time_seconds,
            result,
        });
    }

    /// Survival time for the presentation layer, once the death animation has played
    pub fn handoff(&self) -> Option<f64> {
        self.report
            .filter(|_| self.since_game_over >= self.tuning.handoff_delay)
            .map(|r| r.survival_time_seconds)
    }

    /// Declarative snapshot for the renderer
    pub fn frame(&self) -> Frame {
        let camera = self.world.camera();
        let (scale, rotation, dying) = if self.player.is_alive() {
            (hop_pulse_scale(self.player.hop_fraction()), 0.0, 0.0)
        } else {
            let fraction = death_fraction(self.since_game_over);
            (death_scale(fraction), death_rotation(self.since_game_over), fraction)
        };
        let row_size = Vec2::new(self.tuning.view_width * 2.0, self.tuning.row_height);
        let car_size = Vec2::new(self.tuning.car_width, self.tuning.car_height);

        Frame {
            rows: self
                .world
                .rows()
                .map(|row| RowVisual {
                    id: row.id(),
                    kind: row.kind,
                    center: Vec2::new(camera.x, row.y),
                    size: row_size,
                })
                .collect(),
            cars: self
                .cars
                .iter()
                .map(|car| CarVisual {
                    id: car.id,
                    center: car.pos(),
                    size: car_size,
                    direction: car.direction,
                })
                .collect(),
            player: PlayerVisual {
                center: self.player.bounds().center,
                size: self.player.size,
                scale,
                rotation,
                death_fraction: dying,
                alive: self.player.is_alive(),
            },
            camera: CameraTransform {
                center: Vec2::new(camera.x, camera.y),
                view_size: Vec2::new(self.tuning.view_width, self.tuning.view_height),
            },
        }
    }

    /// Drain the latest call's events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn camera(&self) -> &Camera {
        self.world.camera()
    }

    pub fn world(&self) -> &WorldStreamer {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Simulated seconds since start
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn leaderboard(&self) -> &L {
        &self.leaderboard
    }

    pub fn into_leaderboard(self) -> L {
        self.leaderboard
    }
}
