//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be retuned from a JSON file
//! without recompiling. Missing fields fall back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Tuning load/validation failure
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub row_height: f32,
    pub view_width: f32,
    pub view_height: f32,

    // === Camera ===
    pub scroll_start_speed: f32,
    pub scroll_max_speed: f32,
    pub scroll_speed_step: f32,

    // === World streaming ===
    pub preroll_rows: u32,

    // === Cars ===
    pub spawn_interval: f32,
    pub spawn_lookahead: f32,
    pub car_min_travel_secs: f32,
    pub car_max_travel_secs: f32,
    pub car_width: f32,
    pub car_height: f32,

    // === Player ===
    pub player_size: f32,
    pub hop_duration: f32,
    pub fall_behind_margin: f32,

    // === Presentation ===
    pub handoff_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            scroll_start_speed: SCROLL_START_SPEED,
            scroll_max_speed: SCROLL_MAX_SPEED,
            scroll_speed_step: SCROLL_SPEED_STEP,

            preroll_rows: PREROLL_ROWS,

            spawn_interval: CAR_SPAWN_INTERVAL,
            spawn_lookahead: CAR_SPAWN_LOOKAHEAD,
            car_min_travel_secs: CAR_MIN_TRAVEL_SECS,
            car_max_travel_secs: CAR_MAX_TRAVEL_SECS,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,

            player_size: PLAYER_SIZE,
            hop_duration: HOP_DURATION,
            fall_behind_margin: FALL_BEHIND_MARGIN,

            handoff_delay: GAME_OVER_HANDOFF_DELAY,
        }
    }
}

impl Tuning {
    /// Half the visible height
    #[inline]
    pub fn view_half_height(&self) -> f32 {
        self.view_height / 2.0
    }

    /// Parse tuning from JSON (partial documents allowed) and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the numbers describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        // JSON overflow such as `1e39` parses to infinity
        let finite = [
            ("row_height", self.row_height),
            ("view_width", self.view_width),
            ("view_height", self.view_height),
            ("scroll_start_speed", self.scroll_start_speed),
            ("scroll_max_speed", self.scroll_max_speed),
            ("scroll_speed_step", self.scroll_speed_step),
            ("spawn_interval", self.spawn_interval),
            ("spawn_lookahead", self.spawn_lookahead),
            ("car_min_travel_secs", self.car_min_travel_secs),
            ("car_max_travel_secs", self.car_max_travel_secs),
            ("car_width", self.car_width),
            ("car_height", self.car_height),
            ("player_size", self.player_size),
            ("hop_duration", self.hop_duration),
            ("fall_behind_margin", self.fall_behind_margin),
            ("handoff_delay", self.handoff_delay),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }

        let positive = [
            ("row_height", self.row_height),
            ("view_width", self.view_width),
            ("view_height", self.view_height),
            ("spawn_interval", self.spawn_interval),
            ("hop_duration", self.hop_duration),
            ("player_size", self.player_size),
            ("car_width", self.car_width),
            ("car_height", self.car_height),
            ("car_min_travel_secs", self.car_min_travel_secs),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.car_min_travel_secs >= self.car_max_travel_secs {
            return Err(TuningError::Invalid(format!(
                "car travel range [{}, {}) is empty",
                self.car_min_travel_secs, self.car_max_travel_secs
            )));
        }
        if self.scroll_start_speed < 0.0 || self.scroll_start_speed > self.scroll_max_speed {
            return Err(TuningError::Invalid(format!(
                "scroll start speed {} outside [0, {}]",
                self.scroll_start_speed, self.scroll_max_speed
            )));
        }
        if self.scroll_speed_step < 0.0 {
            return Err(TuningError::Invalid("scroll speed step must not be negative".into()));
        }
        Ok(())
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(TuningError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.row_height, 60.0);
        assert_eq!(tuning.preroll_rows, 20);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "row_height": 40.0, "preroll_rows": 8 }"#).unwrap();
        assert_eq!(tuning.row_height, 40.0);
        assert_eq!(tuning.preroll_rows, 8);
        assert_eq!(tuning.spawn_interval, CAR_SPAWN_INTERVAL);
    }

    #[test]
    fn test_rejects_inverted_travel_range() {
        let err = Tuning::from_json(r#"{ "car_min_travel_secs": 5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        for field in [
            "car_max_travel_secs",
            "scroll_max_speed",
            "scroll_speed_step",
            "spawn_lookahead",
            "fall_behind_margin",
            "handoff_delay",
        ] {
            let json = format!(r#"{{ "{field}": 1e39 }}"#);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(ref msg) if msg.contains(field)), "{field}: {err}");
        }
    }

    #[test]
    fn test_load_overflowing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "car_max_travel_secs": 1e39 }"#).unwrap();
        assert_eq!(Tuning::load(&path), Tuning::default());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load(Path::new("/definitely/not/here.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
