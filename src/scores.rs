// ── High-score persistence ────────────────────────────────────────────────────

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Best scores, highest first.  Serialized as a flat JSON array of integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores(Vec<u32>);

impl HighScores {
    pub fn new(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        Self(scores)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn best(&self) -> Option<u32> {
        self.0.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert `score` in rank order and keep at most `capacity` entries.
    /// Returns the 1-based rank, or `None` if the score did not make the cut.
    pub fn record(&mut self, score: u32, capacity: usize) -> Option<usize> {
        let rank = self.0.iter().position(|&s| score > s).unwrap_or(self.0.len());
        if rank >= capacity {
            return None;
        }
        self.0.insert(rank, score);
        self.0.truncate(capacity);
        Some(rank + 1)
    }
}

/// The high-score list stored as JSON in one file.
#[derive(Clone, Debug)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read: a missing file is an empty list, anything unreadable or
    /// malformed is an error.
    pub fn try_load(&self) -> Result<HighScores, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScores::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(HighScores::default());
        }
        let scores: Vec<u32> = serde_json::from_str(&raw)?;
        Ok(HighScores::new(scores))
    }

    /// Lenient read used by the game: failures fall back to an empty list.
    pub fn load(&self) -> HighScores {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable high scores");
            HighScores::default()
        })
    }

    pub fn save(&self, scores: &HighScores) -> Result<(), StoreError> {
        let json = serde_json::to_string(scores)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
