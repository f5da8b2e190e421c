use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::CheatError;

/// Optional modifiers unlocked by entering a code before a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Cheat {
    /// A new game starts at level 10.
    Level10,
    /// Enables the stop key, which freezes the falling piece without a pause menu.
    StopKey,
    /// Doubles the base fall interval.
    SlowGame,
}

impl Cheat {
    pub const ALL: [Self; 3] = [Self::Level10, Self::StopKey, Self::SlowGame];

    /// The code a player types to enable this cheat.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Cheat::Level10 => "Level10",
            Cheat::StopKey => "StopKey",
            Cheat::SlowGame => "SlowGame",
        }
    }
}

impl fmt::Display for Cheat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Cheat {
    type Err = CheatError;

    /// Codes are matched exactly after trimming surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|cheat| cheat.code() == code)
            .ok_or_else(|| CheatError::Unknown {
                code: code.to_owned(),
            })
    }
}

/// The cheats active in a session, in the order they were entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CheatSet(Vec<Cheat>);

impl CheatSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, cheat: Cheat) -> bool {
        self.0.contains(&cheat)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cheat> + '_ {
        self.0.iter().copied()
    }

    pub fn activate(&mut self, cheat: Cheat) -> Result<(), CheatError> {
        if self.contains(cheat) {
            return Err(CheatError::AlreadyActive { cheat });
        }
        self.0.push(cheat);
        Ok(())
    }

    /// Parses `code` and activates the matching cheat.
    pub fn enter_code(&mut self, code: &str) -> Result<Cheat, CheatError> {
        let cheat = code.parse()?;
        self.activate(cheat)?;
        Ok(cheat)
    }
}

impl FromIterator<Cheat> for CheatSet {
    fn from_iter<T: IntoIterator<Item = Cheat>>(iter: T) -> Self {
        let mut set = Self::new();
        for cheat in iter {
            _ = set.activate(cheat);
        }
        set
    }
}
