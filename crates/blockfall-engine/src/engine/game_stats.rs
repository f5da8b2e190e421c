/// Number of locked pieces between two level-ups.
pub const LOCKS_PER_LEVEL: usize = 5;

/// Points for locking one piece at `level`.
#[must_use]
pub const fn lock_points(level: usize) -> usize {
    level + 1
}

/// Points for clearing `lines` rows in one pass at `level`.
///
/// The rate is flat: a double is worth exactly twice a single.
#[must_use]
pub const fn clear_points(level: usize, lines: usize) -> usize {
    (level + 1) * (level + 1) * lines
}

/// Game statistics tracking score, level, and lock counts.
///
/// # Scoring
///
/// - Every lock adds `level + 1`
/// - Every clear pass adds `(level + 1)² × lines`
/// - The level used is the one in effect before the lock, even if that lock
///   triggers a level-up
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_lock(2);
///
/// assert_eq!(stats.score(), 3);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    locks_since_level_up: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0, 0)
    }

    /// Creates statistics resuming from a given score and level.
    #[must_use]
    pub const fn starting_at(score: usize, level: usize) -> Self {
        Self {
            score,
            level,
            locks_since_level_up: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Pieces locked since the last level-up (always below [`LOCKS_PER_LEVEL`]).
    #[must_use]
    pub const fn locks_since_level_up(&self) -> usize {
        self.locks_since_level_up
    }

    /// Pieces locked in this session.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of clear passes by line count.
    ///
    /// Index 0 counts locks that cleared nothing; index 4 counts four-line
    /// clears. Passes of more than four lines are not counted.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines` rows.
    ///
    /// Returns `true` if this lock raised the level.
    pub fn complete_piece_lock(&mut self, cleared_lines: usize) -> bool {
        self.score += lock_points(self.level) + clear_points(self.level, cleared_lines);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }

        self.locks_since_level_up += 1;
        if self.locks_since_level_up < LOCKS_PER_LEVEL {
            return false;
        }
        self.locks_since_level_up = 0;
        self.level += 1;
        true
    }
}
