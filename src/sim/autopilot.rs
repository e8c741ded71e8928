//! Demo-mode autopilot
//!
//! Picks a hop each tick from lane safety alone: stay in the lower half of the
//! screen, dodge cars that would reach the token within a short window, and
//! never idle long enough to fall behind the camera.

use super::player::HopDirection;
use super::session::GameSession;
use super::state::Car;
use crate::highscores::Leaderboard;

/// Seconds of car travel to look ahead when judging a lane
const DANGER_WINDOW: f32 = 0.35;
/// Extra horizontal clearance around the token
const CLEARANCE: f32 = 10.0;

/// Car on `row` will sweep through the token's column within the window
fn lane_threatened(cars: &[Car], row: i64, player_x: f32, reach: f32) -> bool {
    cars.iter()
        .filter(|car| car.row.0 as i64 == row && !car.is_finished())
        .any(|car| {
            let now = car.pos().x;
            let span = car.end_x - car.spawn_x;
            let later = now + span * (DANGER_WINDOW / car.travel_duration);
            let (lo, hi) = if now <= later { (now, later) } else { (later, now) };
            hi >= player_x - reach && lo <= player_x + reach
        })
}

/// Hop to issue this tick, if any
pub fn choose_hop<L: Leaderboard>(session: &GameSession<L>) -> Option<HopDirection> {
    let player = session.player();
    if !session.accepts_input() || !player.is_alive() || player.is_hopping() {
        return None;
    }

    let tuning = session.tuning();
    let camera = session.camera();
    let reach = (tuning.car_width + tuning.player_size) / 2.0 + CLEARANCE;
    let row = player.row_index();
    let safe = |r: i64| !lane_threatened(session.cars(), r, player.x, reach);

    // Distance above the fall line, in rows
    let fall_line = camera.y - tuning.view_half_height() - tuning.fall_behind_margin;
    let rows_of_slack = (player.y - fall_line) / tuning.row_height;

    let here_safe = safe(row);
    let ahead_safe = safe(row + 1);
    let behind_safe = safe(row - 1);

    if !here_safe {
        if ahead_safe {
            return Some(HopDirection::Forward);
        }
        if behind_safe && rows_of_slack > 2.0 {
            return Some(HopDirection::Backward);
        }
        return None;
    }

    let wants_progress = player.y < camera.y - tuning.row_height || rows_of_slack < 2.0;
    if wants_progress && ahead_safe {
        return Some(HopDirection::Forward);
    }
    None
}
