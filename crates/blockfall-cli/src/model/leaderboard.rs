use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of entries kept on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Player initials: exactly three visible characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Initials(String);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("initials must be exactly 3 characters without spaces, got {input:?}")]
pub struct InitialsError {
    input: String,
}

impl Initials {
    pub fn new(input: &str) -> Result<Self, InitialsError> {
        let valid = input.chars().count() == 3 && input.chars().all(|c| !c.is_whitespace());
        if valid {
            Ok(Self(input.to_owned()))
        } else {
            Err(InitialsError {
                input: input.to_owned(),
            })
        }
    }
}

impl fmt::Display for Initials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Initials {
    type Error = InitialsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Initials> for String {
    fn from(initials: Initials) -> Self {
        initials.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub initials: Initials,
    pub score: usize,
    pub level: usize,
}

/// Top scores, highest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Returns `true` if `score` would earn a place on the board.
    ///
    /// With free places any positive score qualifies; on a full board the
    /// score must beat the lowest entry.
    pub fn qualifies(&self, score: usize) -> bool {
        if self.entries.len() < LEADERBOARD_SIZE {
            return score > 0;
        }
        self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    /// Inserts `entry` and drops whatever falls off the bottom.
    ///
    /// Returns the zero-based rank of the new entry, or `None` if it did not
    /// make the board. Ties rank below existing entries.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(rank, entry);
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(rank)
    }

    /// Restores ordering and size after loading a file edited by hand.
    pub fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(initials: &str, score: usize) -> LeaderboardEntry {
        LeaderboardEntry {
            initials: Initials::new(initials).unwrap(),
            score,
            level: score / 10,
        }
    }

    fn scores(board: &Leaderboard) -> Vec<usize> {
        board.entries().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_initials_validation() {
        assert!(Initials::new("ABC").is_ok());
        assert!(Initials::new("a1!").is_ok());
        assert!(Initials::new("AB").is_err());
        assert!(Initials::new("ABCD").is_err());
        assert!(Initials::new("A C").is_err());
    }

    #[test]
    fn test_empty_board_needs_positive_score() {
        let board = Leaderboard::default();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_board_keeps_top_five_sorted() {
        let mut board = Leaderboard::default();
        for (i, score) in [40, 10, 70, 20, 50].into_iter().enumerate() {
            assert!(board.insert(entry(&format!("P{i}0"), score)).is_some());
        }
        assert_eq!(scores(&board), vec![70, 50, 40, 20, 10]);

        assert!(!board.qualifies(10));
        assert_eq!(board.insert(entry("LOW", 5)), None);
        assert_eq!(board.insert(entry("MID", 45)), Some(2));
        assert_eq!(scores(&board), vec![70, 50, 45, 40, 20]);
    }

    #[test]
    fn test_tie_ranks_below_existing() {
        let mut board = Leaderboard::default();
        board.insert(entry("OLD", 30));
        assert_eq!(board.insert(entry("NEW", 30)), Some(1));
        assert_eq!(board.entries()[0].initials.to_string(), "OLD");
    }

    #[test]
    fn test_normalize_sorts_and_truncates() {
        let mut board: Leaderboard = serde_json::from_str(
            r#"[
                {"initials": "AAA", "score": 1, "level": 0},
                {"initials": "BBB", "score": 9, "level": 1},
                {"initials": "CCC", "score": 5, "level": 0},
                {"initials": "DDD", "score": 3, "level": 0},
                {"initials": "EEE", "score": 7, "level": 1},
                {"initials": "FFF", "score": 8, "level": 1}
            ]"#,
        )
        .unwrap();
        board.normalize();
        assert_eq!(scores(&board), vec![9, 8, 7, 5, 3]);
    }

    #[test]
    fn test_invalid_initials_fail_to_load() {
        let result = serde_json::from_str::<Leaderboard>(r#"[{"initials": "TOOLONG", "score": 1, "level": 0}]"#);
        assert!(result.is_err());
    }
}
