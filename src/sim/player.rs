//! Player token state machine
//!
//! Idle -> Hopping (one row up or down, `hop_duration` seconds) -> Idle.
//! Input while hopping is dropped. Death is terminal and cancels any hop in
//! flight, leaving the token on the row it hopped from.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Aabb;

/// Hop request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HopDirection {
    Forward,
    Backward,
}

/// Motion state of the token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionState {
    Idle,
    /// Moving by `dy` with `remaining` seconds to go
    Hopping { dy: f32, remaining: f32 },
    Dead,
}

/// The player's token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal center (fixed)
    pub x: f32,
    /// Row-quantized position (bottom edge of the current row)
    pub y: f32,
    pub motion: MotionState,
    pub size: f32,
    row_height: f32,
    hop_duration: f32,
}

impl Player {
    pub fn new(x: f32, row_height: f32, size: f32, hop_duration: f32) -> Self {
        Self {
            x,
            y: 0.0,
            motion: MotionState::Idle,
            size,
            row_height,
            hop_duration,
        }
    }

    pub fn is_alive(&self) -> bool {
        !matches!(self.motion, MotionState::Dead)
    }

    pub fn is_hopping(&self) -> bool {
        matches!(self.motion, MotionState::Hopping { .. })
    }

    /// Start a hop if idle; returns the hop's target y, or `None` if dropped
    pub fn request_hop(&mut self, direction: HopDirection) -> Option<f32> {
        if self.motion != MotionState::Idle {
            return None;
        }
        let dy = match direction {
            HopDirection::Forward => self.row_height,
            HopDirection::Backward => -self.row_height,
        };
        self.motion = MotionState::Hopping {
            dy,
            remaining: self.hop_duration,
        };
        Some(self.y + dy)
    }

    /// Advance an in-flight hop; returns the landed y when it completes
    pub fn update(&mut self, dt: f32) -> Option<f32> {
        let MotionState::Hopping { dy, remaining } = self.motion else {
            return None;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.motion = MotionState::Hopping { dy, remaining };
            return None;
        }
        // Snap to the row grid so float drift never accumulates
        self.y = ((self.y + dy) / self.row_height).round() * self.row_height;
        self.motion = MotionState::Idle;
        Some(self.y)
    }

    /// Terminal transition
    pub fn kill(&mut self) {
        self.motion = MotionState::Dead;
    }

    /// Hop completion fraction in [0, 1] (0 when not hopping)
    pub fn hop_fraction(&self) -> f32 {
        match self.motion {
            MotionState::Hopping { remaining, .. } => {
                (1.0 - remaining / self.hop_duration).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Interpolated bottom-edge y, for drawing and contact tests
    pub fn visual_y(&self) -> f32 {
        match self.motion {
            MotionState::Hopping { dy, .. } => self.y + dy * self.hop_fraction(),
            _ => self.y,
        }
    }

    /// Global index of the row the token stands on
    pub fn row_index(&self) -> i64 {
        (self.y / self.row_height).round() as i64
    }

    /// Bounding box centered on the token's current row position
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.visual_y() + self.row_height / 2.0),
            Vec2::splat(self.size),
        )
    }
}
