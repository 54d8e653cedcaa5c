//! Run score, bonus multiplier and high score ledger
//!
//! The surrounding program owns this and passes it into `Stage::tick`;
//! the simulation only feeds it point and bonus events.

use crate::highscores::ScoreStore;

#[derive(Debug, Clone, Default)]
pub struct GameState {
    score: u32,
    bonus: u32,
    high_score: u32,
}

impl GameState {
    /// New state, reading any stored high score (unavailable counts as 0)
    pub fn new(store: &dyn ScoreStore) -> Self {
        Self {
            score: 0,
            bonus: 0,
            high_score: store.get().unwrap_or(0),
        }
    }

    /// Award `count` base points scaled by the bonus multiplier
    pub fn add_points(&mut self, count: u32) {
        self.score += count * (self.bonus + 10) / 10;
    }

    pub fn add_bonus(&mut self, count: u32) {
        self.bonus += count;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Zero-padded score string for the HUD
    pub fn score_string(&self, max_length: usize) -> String {
        format!("{:0width$}", self.score, width = max_length)
    }

    /// Bonus multiplier string, e.g. bonus 5 renders as "#1.5"
    pub fn bonus_string(&self) -> String {
        format!("#{}.{}", 1 + self.bonus / 10, self.bonus % 10)
    }

    /// Fold the current score into the high score, persisting on a new record
    pub fn update_high_score(&mut self, store: &mut dyn ScoreStore) {
        if self.score > self.high_score {
            self.high_score = self.score;
            store.set(self.high_score);
            log::info!("New high score: {}", self.high_score);
        }
    }

    /// Start a fresh run; the high score survives
    pub fn reset(&mut self) {
        self.score = 0;
        self.bonus = 0;
    }
}
