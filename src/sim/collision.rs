//! Terminal-condition checks
//!
//! Run every tick after the camera has moved. Either a car overlapping the
//! player or the player drifting below the camera ends the run. The check is
//! pure, so calling it again after game over has no side effects.

use glam::Vec2;

use super::player::Player;
use super::rect::Aabb;
use super::state::{Camera, Car, GameOverReason};

/// Player box overlaps any car box
pub fn hit_by_car(player: &Player, cars: &[Car], car_width: f32, car_height: f32) -> bool {
    let bounds = player.bounds();
    cars.iter()
        .filter(|car| !car.is_finished())
        .any(|car| bounds.intersects(&Aabb::new(car.pos(), Vec2::new(car_width, car_height))))
}

/// Player is more than `margin` below the camera's bottom edge
pub fn fell_behind(player: &Player, camera: &Camera, view_half_height: f32, margin: f32) -> bool {
    player.visual_y() < (camera.y - view_half_height) - margin
}

/// Geometry needed by `check`
#[derive(Debug, Clone, Copy)]
pub struct CollisionParams {
    pub car_width: f32,
    pub car_height: f32,
    pub view_half_height: f32,
    pub fall_margin: f32,
}

/// First satisfied terminal condition, if any (car contact wins ties)
pub fn check(
    player: &Player,
    cars: &[Car],
    camera: &Camera,
    params: &CollisionParams,
) -> Option<GameOverReason> {
    if hit_by_car(player, cars, params.car_width, params.car_height) {
        return Some(GameOverReason::Collision);
    }
    if fell_behind(player, camera, params.view_half_height, params.fall_margin) {
        return Some(GameOverReason::FellBehind);
    }
    None
}
