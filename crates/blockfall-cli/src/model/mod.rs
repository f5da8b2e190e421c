pub mod key_bindings;
pub mod leaderboard;
