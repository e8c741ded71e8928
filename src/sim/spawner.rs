//! Car spawning on a fixed cadence
//!
//! An accumulator fires every `spawn_interval` seconds. Each firing picks one
//! road lane near the camera at random and sends a car across it. The first
//! tick of a run fires immediately.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Camera, Car, Direction, RoadLane};
use crate::consts::CAR_MIN_TRAVEL_SECS;
use crate::tuning::Tuning;

/// Spawn cadence and random lane/speed selection
#[derive(Debug, Clone)]
pub struct CarSpawner {
    rng: Pcg32,
    /// Seconds accumulated toward the next firing
    since_last_spawn: f32,
    next_id: u32,
    stopped: bool,
    interval: f32,
    lookahead: f32,
    min_travel: f32,
    max_travel: f32,
    view_width: f32,
    view_height: f32,
}

impl CarSpawner {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            since_last_spawn: tuning.spawn_interval,
            next_id: 1,
            stopped: false,
            interval: tuning.spawn_interval,
            lookahead: tuning.spawn_lookahead,
            min_travel: tuning.car_min_travel_secs,
            max_travel: tuning.car_max_travel_secs,
            view_width: tuning.view_width,
            view_height: tuning.view_height,
        }
    }

    /// Advance the cadence timer; spawns at most one car per firing
    pub fn tick(&mut self, dt: f32, camera: &Camera, roads: &[RoadLane]) -> Option<Car> {
        if self.stopped {
            return None;
        }
        self.since_last_spawn += dt;
        if self.since_last_spawn < self.interval {
            return None;
        }
        self.since_last_spawn -= self.interval;
        self.try_spawn(camera, roads)
    }

    /// Cancel the cadence timer for good
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Lanes strictly inside (camera bottom, camera top + lookahead)
    pub fn eligible_lanes<'a>(&self, camera: &Camera, roads: &'a [RoadLane]) -> Vec<&'a RoadLane> {
        let bottom = camera.y - self.view_height / 2.0;
        let top = camera.y + self.view_height / 2.0;
        roads
            .iter()
            .filter(|lane| lane.y > bottom && lane.y < top + self.lookahead)
            .collect()
    }

    /// Pick an eligible lane and build a car for it; `None` when no lane qualifies
    pub fn try_spawn(&mut self, camera: &Camera, roads: &[RoadLane]) -> Option<Car> {
        let lanes = self.eligible_lanes(camera, roads);
        if lanes.is_empty() {
            return None;
        }
        let lane = *lanes[self.rng.random_range(0..lanes.len())];

        let direction = Direction::for_row(lane.row.0);
        let (spawn_x, end_x) = match direction {
            Direction::Rightward => (camera.x - self.view_width, camera.x + self.view_width),
            Direction::Leftward => (camera.x + self.view_width, camera.x - self.view_width),
        };
        let travel_duration = self.travel_duration();

        let id = self.next_id;
        self.next_id += 1;
        log::debug!(
            "Spawned car {} on row {} ({:?}, {:.2}s)",
            id,
            lane.row.0,
            direction,
            travel_duration
        );

        Some(Car {
            id,
            row: lane.row,
            spawn_x,
            end_x,
            y: lane.y,
            travel_duration,
            direction,
            elapsed: 0.0,
        })
    }

    /// Random duration in `[min, max)`; a degenerate or unbounded range
    /// collapses to a fixed duration instead of drawing
    fn travel_duration(&mut self) -> f32 {
        let bounded = self.min_travel.is_finite() && self.max_travel.is_finite();
        if bounded && self.min_travel < self.max_travel {
            self.rng.random_range(self.min_travel..self.max_travel)
        } else if self.min_travel.is_finite() && self.min_travel > 0.0 {
            self.min_travel
        } else {
            CAR_MIN_TRAVEL_SECS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RowId;

    fn camera() -> Camera {
        Camera {
            x: 195.0,
            y: 422.0,
            scroll_speed: 0.5,
        }
    }

    fn lane(index: u64) -> RoadLane {
        RoadLane {
            row: RowId(index),
            y: index as f32 * 60.0 + 30.0,
        }
    }

    #[test]
    fn test_no_lanes_no_spawn() {
        let mut spawner = CarSpawner::new(&Tuning::default(), 7);
        assert!(spawner.try_spawn(&camera(), &[]).is_none());
        assert!(spawner.tick(0.0, &camera(), &[]).is_none());
    }

    #[test]
    fn test_lane_window() {
        let spawner = CarSpawner::new(&Tuning::default(), 7);
        // bottom = 0, top = 844, window = (0, 1044)
        let roads = [lane(1), lane(15), lane(17), lane(19)];
        let eligible: Vec<u64> = spawner
            .eligible_lanes(&camera(), &roads)
            .iter()
            .map(|l| l.row.0)
            .collect();
        // Row 17 is at y=1050, past the lookahead
        assert_eq!(eligible, vec![1, 15]);
    }

    #[test]
    fn test_odd_lane_car_runs_leftward() {
        let mut spawner = CarSpawner::new(&Tuning::default(), 7);
        let car = spawner.try_spawn(&camera(), &[lane(3)]).unwrap();
        assert_eq!(car.direction, Direction::Leftward);
        assert_eq!(car.spawn_x, 195.0 + 390.0);
        assert_eq!(car.end_x, 195.0 - 390.0);
        assert_eq!(car.y, 210.0);
        assert!(car.travel_duration >= 2.0 && car.travel_duration < 4.0);
    }

    #[test]
    fn test_even_lane_car_runs_rightward() {
        let mut spawner = CarSpawner::new(&Tuning::default(), 7);
        let even = RoadLane { row: RowId(4), y: 270.0 };
        let car = spawner.try_spawn(&camera(), &[even]).unwrap();
        assert_eq!(car.direction, Direction::Rightward);
        assert!(car.spawn_x < car.end_x);
    }

    #[test]
    fn test_cadence() {
        let mut spawner = CarSpawner::new(&Tuning::default(), 7);
        let roads = [lane(1)];
        let dt = 0.1;

        // Fires on the first tick
        assert!(spawner.tick(dt, &camera(), &roads).is_some());
        let mut fired = 0;
        for _ in 0..12 {
            if spawner.tick(dt, &camera(), &roads).is_some() {
                fired += 1;
            }
        }
        // 1.2s more at a 0.6s cadence
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut spawner = CarSpawner::new(&Tuning::default(), 7);
        spawner.stop();
        for _ in 0..20 {
            assert!(spawner.tick(0.6, &camera(), &[lane(1)]).is_none());
        }
    }

    #[test]
    fn test_unbounded_travel_range_stays_finite() {
        let tuning = Tuning {
            car_max_travel_secs: f32::INFINITY,
            ..Tuning::default()
        };
        let mut spawner = CarSpawner::new(&tuning, 7);
        let car = spawner.try_spawn(&camera(), &[lane(1)]).unwrap();
        assert_eq!(car.travel_duration, 2.0);

        let tuning = Tuning {
            car_min_travel_secs: f32::NAN,
            ..Tuning::default()
        };
        let mut spawner = CarSpawner::new(&tuning, 7);
        let car = spawner.try_spawn(&camera(), &[lane(1)]).unwrap();
        assert_eq!(car.travel_duration, CAR_MIN_TRAVEL_SECS);
    }

    #[test]
    fn test_same_seed_same_cars() {
        let roads = [lane(1), lane(3), lane(5), lane(7)];
        let mut a = CarSpawner::new(&Tuning::default(), 42);
        let mut b = CarSpawner::new(&Tuning::default(), 42);
        for _ in 0..10 {
            let ca = a.try_spawn(&camera(), &roads).unwrap();
            let cb = b.try_spawn(&camera(), &roads).unwrap();
            assert_eq!(ca.row, cb.row);
            assert_eq!(ca.travel_duration, cb.travel_duration);
        }
    }
}
