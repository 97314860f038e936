//! High score tracking
//!
//! Kept in memory for the lifetime of the page only.

/// Best score of the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Best score so far
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished round's score.
    /// Returns true if it set a new record.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }
}
