use std::time::Duration;

use serde::Serialize;

/// Points awarded per line-clear event, multiplied by the level at the time.
const CLEAR_BONUS_PER_LEVEL: usize = 250;

/// Score needed to advance one level.
const SCORE_PER_LEVEL: usize = 1000;

const BASE_FALL_DELAY: Duration = Duration::from_millis(1000);
const FALL_DELAY_STEP: Duration = Duration::from_millis(60);
const MIN_FALL_DELAY: Duration = Duration::from_millis(100);

/// Largest number of rows one lock can clear (the tallest shape is 4 rows).
const MAX_CLEARED_ROWS: usize = 4;

/// Score, level and speed progression, plus a few counters for display.
///
/// # Scoring
///
/// Every lock that clears at least one row awards `250 × level`, using the
/// level before the award. The bonus is flat: one row and four rows at once
/// are worth the same.
///
/// - **Level** is `score / 1000 + 1`, always derived from the score.
/// - **Fall delay** is `max(100ms, 1000ms - (level - 1) × 60ms)`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_lock(2);
///
/// assert_eq!(stats.score(), 250);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.fall_delay(), Duration::from_millis(1000));
/// assert_eq!(stats.cleared_lines(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    locked_pieces: usize,
    cleared_lines: usize,
    line_cleared_counter: [usize; MAX_CLEARED_ROWS + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            locked_pieces: 0,
            cleared_lines: 0,
            line_cleared_counter: [0; MAX_CLEARED_ROWS + 1],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.score / SCORE_PER_LEVEL + 1
    }

    /// Returns the interval between gravity steps at the current level.
    #[must_use]
    pub fn fall_delay(&self) -> Duration {
        let steps = u32::try_from(self.level() - 1).unwrap_or(u32::MAX);
        BASE_FALL_DELAY
            .saturating_sub(FALL_DELAY_STEP.saturating_mul(steps))
            .max(MIN_FALL_DELAY)
    }

    /// Returns the number of pieces locked into the grid.
    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Returns the total number of rows cleared.
    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns how many locks cleared 0, 1, 2, 3 and 4 rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_CLEARED_ROWS + 1] {
        &self.line_cleared_counter
    }

    /// Records one piece lock that cleared `cleared_lines` rows.
    pub fn complete_piece_lock(&mut self, cleared_lines: usize) {
        self.locked_pieces += 1;
        self.cleared_lines += cleared_lines;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        if cleared_lines > 0 {
            self.score += CLEAR_BONUS_PER_LEVEL * self.level();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.fall_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_no_clear_changes_nothing_but_counters() {
        let mut stats = GameStats::new();
        stats.complete_piece_lock(0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.locked_pieces(), 1);
        assert_eq!(stats.line_cleared_counter()[0], 1);
    }

    #[test]
    fn test_flat_bonus_regardless_of_rows() {
        let mut single = GameStats::new();
        single.complete_piece_lock(1);
        let mut quad = GameStats::new();
        quad.complete_piece_lock(4);

        assert_eq!(single.score(), 250);
        assert_eq!(quad.score(), 250);
        assert_eq!(quad.cleared_lines(), 4);
        assert_eq!(quad.line_cleared_counter()[4], 1);
    }

    #[test]
    fn test_level_up_at_one_thousand() {
        let mut stats = GameStats::new();
        for _ in 0..3 {
            stats.complete_piece_lock(1);
        }
        assert_eq!(stats.score(), 750);
        assert_eq!(stats.level(), 1);

        stats.complete_piece_lock(1);
        assert_eq!(stats.score(), 1000);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.fall_delay(), Duration::from_millis(940));

        // Level 2 doubles the bonus
        stats.complete_piece_lock(3);
        assert_eq!(stats.score(), 1500);
    }

    #[test]
    fn test_fall_delay_floor() {
        let mut stats = GameStats::new();
        while stats.level() < 40 {
            stats.complete_piece_lock(1);
        }
        assert_eq!(stats.fall_delay(), MIN_FALL_DELAY);

        // Level 16 is the first level at the floor: 1000 - 15 * 60 = 100
        let at = |level: usize| GameStats {
            score: (level - 1) * SCORE_PER_LEVEL,
            ..GameStats::new()
        };
        assert_eq!(at(15).fall_delay(), Duration::from_millis(160));
        assert_eq!(at(16).fall_delay(), Duration::from_millis(100));
        assert_eq!(at(17).fall_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = GameStats::new();
        stats.complete_piece_lock(1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["score"], 250);
        assert_eq!(json["cleared_lines"], 1);
        assert_eq!(json["locked_pieces"], 1);
    }
}
