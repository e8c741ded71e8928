//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (rows by index, cars by spawn order)
//! - No rendering or platform dependencies (the wall-clock start time is injected)

pub mod autopilot;
pub mod collision;
pub mod frame;
pub mod player;
pub mod rect;
pub mod rows;
pub mod session;
pub mod spawner;
pub mod state;
pub mod stream;

pub use collision::{CollisionParams, check};
pub use frame::{CameraTransform, CarVisual, Frame, PlayerVisual, RowVisual};
pub use player::{HopDirection, MotionState, Player};
pub use rect::Aabb;
pub use rows::{RowGenerator, row_kind};
pub use session::{GameOverReport, GameSession, InputEvent, TickInput};
pub use spawner::CarSpawner;
pub use state::{
    Camera, Car, Direction, GameEvent, GameOverReason, GamePhase, RoadLane, Row, RowId, RowKind,
};
pub use stream::{StreamUpdate, WorldStreamer};
