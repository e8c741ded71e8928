//! World state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of a world row (its global index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

/// Terrain of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// Safe
    Grass,
    /// Carries cars
    Road,
}

/// One horizontal strip of the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub index: u64,
    pub kind: RowKind,
    /// Row centerline (index * row_height + row_height / 2)
    pub y: f32,
}

impl Row {
    pub fn id(&self) -> RowId {
        RowId(self.index)
    }
}

/// A road row eligible for car spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadLane {
    pub row: RowId,
    pub y: f32,
}

/// Travel direction of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Leftward,
    Rightward,
}

impl Direction {
    /// Lane direction from the global row index: even rows run rightward
    pub fn for_row(index: u64) -> Self {
        if index % 2 == 0 {
            Direction::Rightward
        } else {
            Direction::Leftward
        }
    }
}

/// A passive moving hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: u32,
    pub row: RowId,
    pub spawn_x: f32,
    pub end_x: f32,
    pub y: f32,
    pub travel_duration: f32,
    pub direction: Direction,
    /// Seconds since spawn
    pub elapsed: f32,
}

impl Car {
    /// Traversal progress in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.travel_duration).clamp(0.0, 1.0)
    }

    /// Current center position
    pub fn pos(&self) -> Vec2 {
        let x = self.spawn_x + (self.end_x - self.spawn_x) * self.progress();
        Vec2::new(x, self.y)
    }

    /// Advance along the lane; returns true once the traversal is complete
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.travel_duration
    }
}

/// Scrolling camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Horizontal center (fixed)
    pub x: f32,
    /// Vertical center
    pub y: f32,
    /// World units per tick
    pub scroll_speed: f32,
}

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Struck by a car
    Collision,
    /// Left behind by the scrolling camera
    FellBehind,
}

/// Things that happened during a tick (for presentation/audio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RowSpawned { row: RowId, kind: RowKind },
    RowCulled { row: RowId },
    CarSpawned { id: u32, row: RowId, direction: Direction },
    CarExpired { id: u32 },
    HopStarted { from_y: f32, to_y: f32 },
    HopFinished { y: f32 },
    GameOver { reason: GameOverReason, survival_time_seconds: f64 },
}
