//! Survival-time leaderboard
//!
//! Every completed run is appended under a single storage key as a JSON list.
//! Reads return the list sorted by survival time, longest first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{KeyValueStore, StoreError};

/// Leaderboard write failure
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of one completed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Unix timestamp (ms) of the game over
    pub timestamp: f64,
    /// Seconds survived
    pub survival_time_seconds: f64,
}

/// Persisted leaderboard collaborator
pub trait Leaderboard {
    /// Append a finished run
    fn save(&mut self, result: GameResult) -> Result<(), LeaderboardError>;
    /// All runs, longest survival first
    fn load_all(&self) -> Vec<GameResult>;
}

impl<L: Leaderboard + ?Sized> Leaderboard for &mut L {
    fn save(&mut self, result: GameResult) -> Result<(), LeaderboardError> {
        (**self).save(result)
    }

    fn load_all(&self) -> Vec<GameResult> {
        (**self).load_all()
    }
}

/// Leaderboard backed by a key-value store
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreBoard<S> {
    /// Storage key for the result list
    pub const STORAGE_KEY: &'static str = "game_results";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored runs in insertion order; malformed data reads as empty
    fn read_raw(&self) -> Vec<GameResult> {
        let Some(json) = self.store.get(Self::STORAGE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<GameResult>>(&json) {
            Ok(results) => results,
            Err(err) => {
                log::warn!("Discarding malformed leaderboard data: {}", err);
                Vec::new()
            }
        }
    }

    /// Longest survival (if any)
    pub fn best(&self) -> Option<GameResult> {
        self.load_all().into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.read_raw().is_empty()
    }
}

impl<S: KeyValueStore> Leaderboard for ScoreBoard<S> {
    fn save(&mut self, result: GameResult) -> Result<(), LeaderboardError> {
        let mut results = self.read_raw();
        results.push(result);
        let json = serde_json::to_string(&results)?;
        self.store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Leaderboard saved ({} entries)", results.len());
        Ok(())
    }

    fn load_all(&self) -> Vec<GameResult> {
        let mut results = self.read_raw();
        results.sort_by(|a, b| b.survival_time_seconds.total_cmp(&a.survival_time_seconds));
        results
    }
}

/// Format a survival time the way the game-over dialog shows it
pub fn format_survival_time(seconds: f64) -> String {
    format!("{:.2}", seconds)
}
