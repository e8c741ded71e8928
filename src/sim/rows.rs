//! Procedural row generation
//!
//! Rows are produced one at a time in strictly increasing index order. Kind is
//! a pure function of the row counter: even rows are grass, odd rows are road.
//! Row 0 is grass and is the player's start row.

use super::state::{RoadLane, Row, RowKind};

/// Kind of the row at a global index
pub fn row_kind(index: u64) -> RowKind {
    if index % 2 == 0 {
        RowKind::Grass
    } else {
        RowKind::Road
    }
}

/// Hands out rows by counter and tracks the road rows still in the world
#[derive(Debug, Clone)]
pub struct RowGenerator {
    row_height: f32,
    /// Index of the next row to generate
    next_index: u64,
    /// Road rows not yet culled, ordered by index
    active_roads: Vec<RoadLane>,
}

impl RowGenerator {
    pub fn new(row_height: f32) -> Self {
        Self {
            row_height,
            next_index: 0,
            active_roads: Vec::new(),
        }
    }

    /// Produce the next row; road rows are appended to the active set
    pub fn generate_next(&mut self) -> Row {
        let index = self.next_index;
        self.next_index += 1;

        let row = Row {
            index,
            kind: row_kind(index),
            y: index as f32 * self.row_height + self.row_height / 2.0,
        };
        if row.kind == RowKind::Road {
            self.active_roads.push(RoadLane { row: row.id(), y: row.y });
        }
        row
    }

    /// Number of rows generated so far (also the next index)
    pub fn rows_generated(&self) -> u64 {
        self.next_index
    }

    pub fn active_roads(&self) -> &[RoadLane] {
        &self.active_roads
    }

    /// Drop a culled road from the spawn set
    pub fn retire_road(&mut self, row: &Row) {
        if row.kind == RowKind::Road {
            self.active_roads.retain(|lane| lane.row != row.id());
        }
    }
}
