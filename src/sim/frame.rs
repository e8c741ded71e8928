//! Declarative per-tick output for the rendering collaborator
//!
//! The renderer draws whatever is in a `Frame`; it never reads simulation
//! state directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Direction, RowId, RowKind};
use std::f32::consts::{PI, TAU};

use crate::consts::{DEATH_MIN_SCALE, DEATH_SHRINK_SECS, DEATH_SPIN_SECS, HOP_PULSE_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowVisual {
    pub id: RowId,
    pub kind: RowKind,
    pub center: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarVisual {
    pub id: u32,
    pub center: Vec2,
    pub size: Vec2,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVisual {
    pub center: Vec2,
    pub size: f32,
    /// Pulse scale during a hop (1.0 at rest), shrink while dying
    pub scale: f32,
    /// Spin in radians, nonzero only once dead
    pub rotation: f32,
    /// Death animation progress, 0 while alive and 1 once fully shrunk
    pub death_fraction: f32,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    pub center: Vec2,
    pub view_size: Vec2,
}

/// Everything visible this tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub rows: Vec<RowVisual>,
    pub cars: Vec<CarVisual>,
    pub player: PlayerVisual,
    pub camera: CameraTransform,
}

/// Hop pulse: grows to `HOP_PULSE_SCALE` at mid-hop and shrinks back
pub fn hop_pulse_scale(fraction: f32) -> f32 {
    let t = fraction.clamp(0.0, 1.0);
    let peak = 1.0 - (2.0 * t - 1.0).abs();
    1.0 + (HOP_PULSE_SCALE - 1.0) * peak
}

/// Death animation progress after `secs` seconds dead
pub fn death_fraction(secs: f32) -> f32 {
    (secs / DEATH_SHRINK_SECS).clamp(0.0, 1.0)
}

/// Token scale for a death fraction: 1.0 down to `DEATH_MIN_SCALE`
pub fn death_scale(fraction: f32) -> f32 {
    1.0 - (1.0 - DEATH_MIN_SCALE) * fraction.clamp(0.0, 1.0)
}

/// Spin after `secs` seconds dead, wrapped to one turn
pub fn death_rotation(secs: f32) -> f32 {
    (PI * secs.max(0.0) / DEATH_SPIN_SECS).rem_euclid(TAU)
}
