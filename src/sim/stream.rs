//! Camera-driven world streaming
//!
//! The camera climbs a little every tick and speeds up until capped. Whenever
//! its top edge gets within one screen of the last generated row, exactly one
//! more row is generated. Rows that fall more than a screen plus a row behind
//! the camera are culled.

use std::collections::VecDeque;

use super::rows::RowGenerator;
use super::state::{Camera, RoadLane, Row, RowId};
use crate::tuning::Tuning;

/// Rows added and removed by one `advance`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamUpdate {
    pub spawned: Vec<Row>,
    pub culled: Vec<RowId>,
}

/// Owns the camera and the live rows
#[derive(Debug, Clone)]
pub struct WorldStreamer {
    camera: Camera,
    /// Live rows, ordered by index (and therefore by y)
    rows: VecDeque<Row>,
    generator: RowGenerator,
    row_height: f32,
    view_height: f32,
    scroll_max_speed: f32,
    scroll_speed_step: f32,
}

impl WorldStreamer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            camera: Camera {
                x: tuning.view_width / 2.0,
                y: tuning.view_height / 2.0,
                scroll_speed: tuning.scroll_start_speed,
            },
            rows: VecDeque::new(),
            generator: RowGenerator::new(tuning.row_height),
            row_height: tuning.row_height,
            view_height: tuning.view_height,
            scroll_max_speed: tuning.scroll_max_speed,
            scroll_speed_step: tuning.scroll_speed_step,
        }
    }

    /// Eagerly generate `count` rows so the first frame is never empty
    pub fn preroll(&mut self, count: u32) -> Vec<Row> {
        (0..count).map(|_| self.spawn_row()).collect()
    }

    /// Advance the camera one tick and stream rows in/out
    ///
    /// The camera moves by `scroll_speed` world units per tick; `dt` is
    /// accepted for symmetry with the other per-tick systems.
    pub fn advance(&mut self, _dt: f32) -> StreamUpdate {
        let mut update = StreamUpdate::default();

        self.camera.y += self.camera.scroll_speed;
        self.camera.scroll_speed =
            (self.camera.scroll_speed + self.scroll_speed_step).min(self.scroll_max_speed);

        if self.camera_top() > self.generation_threshold() {
            update.spawned.push(self.spawn_row());
        }

        // Rows are ordered by y, so only the front can be stale
        let cutoff = self.cull_line();
        while let Some(row) = self.rows.front().copied() {
            if row.y >= cutoff {
                break;
            }
            self.rows.pop_front();
            self.generator.retire_road(&row);
            log::debug!("Culled row {} at y={}", row.index, row.y);
            update.culled.push(row.id());
        }

        update
    }

    fn spawn_row(&mut self) -> Row {
        let row = self.generator.generate_next();
        log::debug!("Generated row {} ({:?}) at y={}", row.index, row.kind, row.y);
        self.rows.push_back(row);
        row
    }

    /// `rows_generated * row_height - view_half_height`
    fn generation_threshold(&self) -> f32 {
        self.generator.rows_generated() as f32 * self.row_height - self.view_height / 2.0
    }

    /// Anything below this y is culled
    pub fn cull_line(&self) -> f32 {
        self.camera.y - self.view_height - self.row_height
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_top(&self) -> f32 {
        self.camera.y + self.view_height / 2.0
    }

    pub fn camera_bottom(&self) -> f32 {
        self.camera.y - self.view_height / 2.0
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn active_roads(&self) -> &[RoadLane] {
        self.generator.active_roads()
    }

    /// Index the next generated row will get
    pub fn rows_generated(&self) -> u64 {
        self.generator.rows_generated()
    }

    #[cfg(test)]
    pub(crate) fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streamer() -> WorldStreamer {
        let mut s = WorldStreamer::new(&Tuning::default());
        s.preroll(20);
        s
    }

    #[test]
    fn test_camera_speed_ramps_and_caps() {
        let mut s = streamer();
        let y0 = s.camera().y;
        s.advance(1.0 / 60.0);
        assert!((s.camera().y - (y0 + 0.5)).abs() < 1e-4);
        assert!((s.camera().scroll_speed - 0.5005).abs() < 1e-6);

        s.camera_mut().scroll_speed = 3.9999;
        s.advance(1.0 / 60.0);
        assert_eq!(s.camera().scroll_speed, 4.0);
        s.advance(1.0 / 60.0);
        assert_eq!(s.camera().scroll_speed, 4.0);
    }

    #[test]
    fn test_generates_one_row_when_threshold_crossed() {
        let mut s = streamer();
        // Default view: top = 844 > 20 * 60 - 422 = 778, so the first tick spawns
        let update = s.advance(1.0 / 60.0);
        assert_eq!(update.spawned.len(), 1);
        assert_eq!(update.spawned[0].index, 20);
        assert_eq!(s.rows_generated(), 21);
    }

    #[test]
    fn test_no_row_below_threshold() {
        let mut s = streamer();
        // Pull the camera down so its top sits far below the threshold
        s.camera_mut().y = 0.0;
        let update = s.advance(1.0 / 60.0);
        assert!(update.spawned.is_empty());
        assert_eq!(s.rows_generated(), 20);
    }

    #[test]
    fn test_culls_rows_behind_camera() {
        let mut s = streamer();
        // Cull line = y - 844 - 60; put it just above row 2 (y = 150)
        s.camera_mut().y = 150.0 + 904.0 + 0.1 - 0.5;
        let update = s.advance(1.0 / 60.0);
        assert_eq!(update.culled, vec![RowId(0), RowId(1), RowId(2)]);
        assert!(s.rows().all(|r| r.y >= s.cull_line()));
        // Row 1 was a road and left the active set
        assert!(s.active_roads().iter().all(|l| l.row != RowId(1)));
        assert_eq!(s.active_roads()[0].row, RowId(3));
    }
}
