//! Hop Road - An endless road-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (row streaming, cars, player, collisions)
//! - `highscores`: Survival-time leaderboard
//! - `persistence`: Key-value storage backends
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::{GameResult, Leaderboard, ScoreBoard};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one camera step per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the accumulator accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Height of one world row
    pub const ROW_HEIGHT: f32 = 60.0;
    /// Visible world area (portrait phone)
    pub const VIEW_WIDTH: f32 = 390.0;
    pub const VIEW_HEIGHT: f32 = 844.0;

    /// Camera scroll speed (world units per tick)
    pub const SCROLL_START_SPEED: f32 = 0.5;
    pub const SCROLL_MAX_SPEED: f32 = 4.0;
    pub const SCROLL_SPEED_STEP: f32 = 0.0005;

    /// Rows generated before the first tick
    pub const PREROLL_ROWS: u32 = 20;

    /// Car spawn cadence (seconds) and spawn window above the camera
    pub const CAR_SPAWN_INTERVAL: f32 = 0.6;
    pub const CAR_SPAWN_LOOKAHEAD: f32 = 200.0;
    /// Car traversal time range [min, max) in seconds
    pub const CAR_MIN_TRAVEL_SECS: f32 = 2.0;
    pub const CAR_MAX_TRAVEL_SECS: f32 = 4.0;
    pub const CAR_WIDTH: f32 = 50.0;
    pub const CAR_HEIGHT: f32 = 30.0;

    /// Player token
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const HOP_DURATION: f32 = 0.1;
    /// Scale reached at the middle of a hop
    pub const HOP_PULSE_SCALE: f32 = 1.2;
    /// How far below the camera's bottom edge the player may drift
    pub const FALL_BEHIND_MARGIN: f32 = 30.0;

    /// Death animation: half a turn per period, shrinking to a speck
    pub const DEATH_SPIN_SECS: f32 = 0.2;
    pub const DEATH_SHRINK_SECS: f32 = 0.5;
    pub const DEATH_MIN_SCALE: f32 = 0.1;

    /// Delay between game over and the result handoff (death animation)
    pub const GAME_OVER_HANDOFF_DELAY: f32 = 0.8;
}
