//! Game rules and session state built on top of [`crate::core`].
//!
//! - [`GameSession`] - One game: ticking, input, pause kinds, game over
//! - [`GameStats`] - Score, level, and lock counters
//! - [`CheatSet`] - Cheat codes entered before a game
//! - [`PieceGenerator`] - Seedable uniform piece selection
//! - [`SessionRecord`] - The serializable part of a session used by saves
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (fresh, or restored from a [`SessionRecord`])
//! 2. Call [`GameSession::tick`] every [`GameSession::tick_interval`]
//! 3. Apply player input between ticks (move, rotate, soft drop)
//! 4. A piece that cannot fall locks, full rows clear, a new piece spawns
//! 5. The game ends when a new piece has no room to fall
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{CheatSet, GameSession, PieceSeed, TickOutcome};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from_u128(7), CheatSet::new());
//! session.try_move_left().ok();
//! session.try_rotate().ok();
//!
//! while session.tick() == TickOutcome::Fell {}
//! assert_eq!(session.stats().completed_pieces(), 1);
//! ```

pub use self::{cheats::*, game_session::*, game_stats::*, piece_generator::*, record::*};

mod cheats;
mod game_session;
mod game_stats;
mod piece_generator;
mod record;
