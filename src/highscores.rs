//! Session high score table
//!
//! In-process only; nothing is ever written to disk. Tracks the best runs
//! of the current session so the game-over screen has something to show.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
}

/// Session leaderboard, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the table.
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns the 1-indexed rank it achieved, or
    /// `None` if it did not qualify.
    pub fn record(&mut self, score: u64, level: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, HighScoreEntry { score, level });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank + 1)
    }

    /// Best score of the session, 0 if none yet.
    pub fn best(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_scores_never_qualify() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.record(0, 1), None);
        assert!(scores.entries.is_empty());
    }

    #[test]
    fn test_entries_stay_sorted_best_first() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(10, 1), Some(1));
        assert_eq!(scores.record(30, 2), Some(1));
        assert_eq!(scores.record(20, 2), Some(2));

        let values: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![30, 20, 10]);
        assert_eq!(scores.best(), 30);
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=15u64 {
            scores.record(s, 1);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // The weakest surviving entry is 6: scores 1-5 were pushed out
        assert_eq!(scores.entries.last().unwrap().score, 6);
        assert!(!scores.qualifies(5));
        assert!(scores.qualifies(7));
    }
}
