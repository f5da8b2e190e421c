use std::time::Duration;

use crate::{
    CheatError, MoveError, PieceCollisionError, RestoreError,
    core::{grid::Grid, piece::Piece},
};

use super::{
    Cheat, CheatSet, GameStats, LockedPiece, PieceGenerator, PieceSeed, SessionRecord,
    apply_row_clear, replay_records,
};

/// Fall interval of a fresh session.
pub const BASE_FALL_INTERVAL: Duration = Duration::from_millis(500);
/// Fall interval of a fresh session with [`Cheat::SlowGame`].
pub const SLOW_FALL_INTERVAL: Duration = Duration::from_millis(1000);
/// Amount the fall interval shrinks on every level-up.
pub const FALL_INTERVAL_STEP: Duration = Duration::from_millis(20);
/// The fall interval never drops below this.
pub const MIN_FALL_INTERVAL: Duration = Duration::from_millis(50);
/// Starting level with [`Cheat::Level10`].
pub const CHEAT_START_LEVEL: usize = 10;

/// Why a session is not ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PauseKind {
    /// The pause menu is open.
    Menu,
    /// Frozen by the stop key.
    Stop,
    /// Hidden behind the boss screen.
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused(PauseKind),
    GameOver,
}

/// What happened during one tick (or soft drop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The falling piece moved down one row.
    Fell,
    /// The falling piece locked and a new piece spawned.
    Locked { cleared_lines: usize },
    /// The session ended on this tick (or had already ended).
    GameOver,
    /// The session is paused; nothing moved.
    Suspended,
}

fn fall_interval(base: Duration, level_ups: u32) -> Duration {
    base.saturating_sub(FALL_INTERVAL_STEP * level_ups)
        .max(MIN_FALL_INTERVAL)
}

/// One game from the first spawn to game over.
///
/// The session owns the grid, the falling piece, the statistics, and the
/// locked-piece records that make up a save. Time is driven from outside:
/// the caller invokes [`Self::tick`] every [`Self::tick_interval`].
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    falling_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    cheats: CheatSet,
    locked_pieces: Vec<LockedPiece>,
    next_piece_id: usize,
    state: SessionState,
    base_interval: Duration,
    level_ups: u32,
}

impl GameSession {
    /// Starts a new game on the default grid.
    #[must_use]
    pub fn new(cheats: CheatSet) -> Self {
        Self::with_grid(Grid::default(), PieceGenerator::new(), cheats)
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed, cheats: CheatSet) -> Self {
        Self::with_grid(Grid::default(), PieceGenerator::with_seed(seed), cheats)
    }

    /// Starts a new game on `grid`, which may already hold settled cells.
    #[must_use]
    pub fn with_grid(grid: Grid, generator: PieceGenerator, cheats: CheatSet) -> Self {
        let level = if cheats.contains(Cheat::Level10) {
            CHEAT_START_LEVEL
        } else {
            0
        };
        let stats = GameStats::starting_at(0, level);
        let session = Self::assemble(grid, generator, cheats, stats, vec![]);
        log::info!(
            "new game: seed={} level={} cheats={:?}",
            session.generator.seed(),
            session.stats.level(),
            session.cheats
        );
        session
    }

    /// Resumes a saved game on the default grid.
    pub fn restore(record: SessionRecord, generator: PieceGenerator) -> Result<Self, RestoreError> {
        Self::restore_with_grid(Grid::default(), record, generator)
    }

    /// Resumes a saved game by replaying its records onto the empty `grid`.
    ///
    /// A new piece is spawned; the piece that was falling at save time is not
    /// part of the record.
    pub fn restore_with_grid(
        mut grid: Grid,
        record: SessionRecord,
        generator: PieceGenerator,
    ) -> Result<Self, RestoreError> {
        replay_records(&mut grid, &record.locked_pieces)?;
        let SessionRecord {
            cheats,
            score,
            level,
            locked_pieces,
        } = record;
        let level = if cheats.contains(Cheat::Level10) && score == 0 {
            level.max(CHEAT_START_LEVEL)
        } else {
            level
        };
        let session = Self::assemble(
            grid,
            generator,
            cheats,
            GameStats::starting_at(score, level),
            locked_pieces,
        );
        log::info!(
            "restored game: score={} level={} locked_pieces={}",
            session.stats.score(),
            session.stats.level(),
            session.locked_pieces.len()
        );
        Ok(session)
    }

    fn assemble(
        grid: Grid,
        mut generator: PieceGenerator,
        cheats: CheatSet,
        stats: GameStats,
        locked_pieces: Vec<LockedPiece>,
    ) -> Self {
        let falling_piece = Piece::spawn(generator.next_kind(), &grid);
        let next_piece_id = locked_pieces.iter().map(|p| p.id + 1).max().unwrap_or(0);
        let base_interval = if cheats.contains(Cheat::SlowGame) {
            SLOW_FALL_INTERVAL
        } else {
            BASE_FALL_INTERVAL
        };
        Self {
            grid,
            falling_piece,
            generator,
            stats,
            cheats,
            locked_pieces,
            next_piece_id,
            state: SessionState::Playing,
            base_interval,
            level_ups: 0,
        }
    }

    /// Captures the persistent part of the session.
    #[must_use]
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            cheats: self.cheats.clone(),
            score: self.stats.score(),
            level: self.stats.level(),
            locked_pieces: self.locked_pieces.clone(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn cheats(&self) -> &CheatSet {
        &self.cheats
    }

    /// Returns `true` if any cheat is active in this session.
    #[must_use]
    pub fn is_cheated(&self) -> bool {
        !self.cheats.is_empty()
    }

    #[must_use]
    pub fn locked_pieces(&self) -> &[LockedPiece] {
        &self.locked_pieces
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// Time between two automatic falls at the current level.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        fall_interval(self.base_interval, self.level_ups)
    }

    /// Time until the next tick is due, or `None` while the session is not
    /// ticking.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.state.is_playing().then(|| self.fall_interval())
    }

    /// Opens the pause menu, or closes it if it is open.
    ///
    /// Has no effect while stopped, hidden, or after game over.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused(PauseKind::Menu),
            SessionState::Paused(PauseKind::Menu) => SessionState::Playing,
            state => state,
        };
    }

    /// Resumes from any kind of pause.
    pub fn resume(&mut self) {
        if self.state.is_paused() {
            self.state = SessionState::Playing;
        }
    }

    /// Freezes or unfreezes the falling piece. Requires [`Cheat::StopKey`].
    pub fn toggle_stop(&mut self) -> Result<(), CheatError> {
        if !self.cheats.contains(Cheat::StopKey) {
            return Err(CheatError::NotActive {
                cheat: Cheat::StopKey,
            });
        }
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused(PauseKind::Stop),
            SessionState::Paused(PauseKind::Stop) => SessionState::Playing,
            state => state,
        };
        Ok(())
    }

    /// Hides the game behind the boss screen, or brings it back to play.
    pub fn toggle_boss(&mut self) {
        self.state = match self.state {
            SessionState::Paused(PauseKind::Boss) => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
            _ => SessionState::Paused(PauseKind::Boss),
        };
    }

    /// Advances the session by one fall step.
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            SessionState::Playing => self.step(),
            SessionState::Paused(_) => TickOutcome::Suspended,
            SessionState::GameOver => TickOutcome::GameOver,
        }
    }

    fn ensure_playing(&self) -> Result<(), MoveError> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(MoveError::NotPlaying)
        }
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), MoveError> {
        self.ensure_playing()?;
        if self.falling_piece.move_by(dx, dy, &self.grid) {
            Ok(())
        } else {
            Err(MoveError::Collision(PieceCollisionError))
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveError> {
        self.try_move(-1, 0)
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveError> {
        self.try_move(1, 0)
    }

    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        if self.falling_piece.rotate(&self.grid) {
            Ok(())
        } else {
            Err(MoveError::Collision(PieceCollisionError))
        }
    }

    /// Runs one fall step immediately, locking the piece if it is blocked.
    pub fn soft_drop(&mut self) -> Result<TickOutcome, MoveError> {
        self.ensure_playing()?;
        Ok(self.step())
    }

    fn step(&mut self) -> TickOutcome {
        if !self.grid.can_place(&self.falling_piece) {
            // Spawned on top of settled cells.
            return self.game_over();
        }
        if self.falling_piece.move_by(0, 1, &self.grid) {
            return TickOutcome::Fell;
        }
        self.lock_falling_piece()
    }

    fn lock_falling_piece(&mut self) -> TickOutcome {
        self.grid.lock(&self.falling_piece);
        self.locked_pieces
            .push(LockedPiece::from_piece(self.next_piece_id, &self.falling_piece));
        self.next_piece_id += 1;

        let cleared = self.grid.clear_completed_rows_indexed();
        apply_row_clear(&mut self.locked_pieces, &cleared);
        let cleared_lines = cleared.len();
        log::debug!(
            "locked {:?}: cleared_lines={cleared_lines} score={}",
            self.falling_piece.kind(),
            self.stats.score()
        );

        if self.stats.complete_piece_lock(cleared_lines) {
            self.level_ups += 1;
            log::info!(
                "level up: level={} fall_interval={:?}",
                self.stats.level(),
                self.fall_interval()
            );
        }

        self.falling_piece = Piece::spawn(self.generator.next_kind(), &self.grid);
        if !self.grid.can_place(&self.falling_piece)
            || !self.falling_piece.can_move(0, 1, &self.grid)
        {
            return self.game_over();
        }
        TickOutcome::Locked { cleared_lines }
    }

    fn game_over(&mut self) -> TickOutcome {
        self.state = SessionState::GameOver;
        log::info!(
            "game over: score={} level={} pieces={}",
            self.stats.score(),
            self.stats.level(),
            self.stats.completed_pieces()
        );
        TickOutcome::GameOver
    }

    #[cfg(test)]
    pub(crate) fn set_falling_piece(&mut self, piece: Piece) {
        self.falling_piece = piece;
    }
}
