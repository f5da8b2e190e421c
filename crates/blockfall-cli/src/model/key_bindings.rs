use std::{fmt, str::FromStr};

use crossterm::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};

/// A rebindable game action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    Fall,
    Stop,
    BossKey,
}

impl Action {
    pub const ALL: [Self; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::Rotate,
        Self::Fall,
        Self::Stop,
        Self::BossKey,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Action::MoveLeft => "Move Left",
            Action::MoveRight => "Move Right",
            Action::Rotate => "Rotate",
            Action::Fall => "Fall",
            Action::Stop => "Stop",
            Action::BossKey => "Boss Key",
        }
    }
}

/// A key that can be bound to an action.
///
/// Serialized by name: `space`, `period`, `comma`, `semicolon`, `backslash`,
/// `Left`, `Right`, `Down`, `Up`, a lowercase letter, or a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BoundKey {
    Char(char),
    Left,
    Right,
    Down,
    Up,
}

const NAMED_CHARS: [(char, &str); 5] = [
    (' ', "space"),
    ('.', "period"),
    (',', "comma"),
    (';', "semicolon"),
    ('\\', "backslash"),
];

impl BoundKey {
    /// Every bindable key, in menu order.
    pub fn all() -> impl Iterator<Item = Self> {
        let named = NAMED_CHARS.into_iter().map(|(c, _)| Self::Char(c));
        let arrows = [Self::Left, Self::Right, Self::Down, Self::Up];
        let letters = ('a'..='z').filter(|&c| c != 'j').map(Self::Char);
        let digits = ('0'..='9').map(Self::Char);
        named.chain(arrows).chain(letters).chain(digits)
    }

    /// Converts a key press into a bindable key, if it is one.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Down => Self::Down,
            KeyCode::Up => Self::Up,
            KeyCode::Char(c) => Self::Char(c.to_ascii_lowercase()),
            _ => return None,
        };
        key.is_bindable().then_some(key)
    }

    fn is_bindable(self) -> bool {
        match self {
            Self::Char(c) => {
                NAMED_CHARS.iter().any(|&(named, _)| named == c)
                    || (c.is_ascii_lowercase() && c != 'j')
                    || c.is_ascii_digit()
            }
            Self::Left | Self::Right | Self::Down | Self::Up => true,
        }
    }

    pub fn matches(self, event: &KeyEvent) -> bool {
        Self::from_key_code(event.code) == Some(self)
    }
}

impl fmt::Display for BoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => match NAMED_CHARS.iter().find(|&&(named, _)| named == *c) {
                Some((_, name)) => f.write_str(name),
                None => write!(f, "{c}"),
            },
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
            Self::Down => f.write_str("Down"),
            Self::Up => f.write_str("Up"),
        }
    }
}

impl FromStr for BoundKey {
    type Err = KeyBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|key| key.to_string() == s)
            .ok_or_else(|| KeyBindingError::UnknownKey { name: s.to_owned() })
    }
}

impl TryFrom<String> for BoundKey {
    type Error = KeyBindingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BoundKey> for String {
    fn from(key: BoundKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum KeyBindingError {
    #[display("unknown key name: {name:?}")]
    UnknownKey { name: String },
    #[display("{key} is bound to both {} and {}", first.label(), second.label())]
    Duplicate {
        key: BoundKey,
        first: Action,
        second: Action,
    },
}

/// The key bound to each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub move_left: BoundKey,
    pub move_right: BoundKey,
    pub rotate: BoundKey,
    pub fall: BoundKey,
    pub stop: BoundKey,
    pub boss_key: BoundKey,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: BoundKey::Char('a'),
            move_right: BoundKey::Char('d'),
            rotate: BoundKey::Char('w'),
            fall: BoundKey::Char('s'),
            stop: BoundKey::Char(' '),
            boss_key: BoundKey::Char('q'),
        }
    }
}

impl KeyBindings {
    pub fn get(&self, action: Action) -> BoundKey {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Rotate => self.rotate,
            Action::Fall => self.fall,
            Action::Stop => self.stop,
            Action::BossKey => self.boss_key,
        }
    }

    pub fn set(&mut self, action: Action, key: BoundKey) {
        let slot = match action {
            Action::MoveLeft => &mut self.move_left,
            Action::MoveRight => &mut self.move_right,
            Action::Rotate => &mut self.rotate,
            Action::Fall => &mut self.fall,
            Action::Stop => &mut self.stop,
            Action::BossKey => &mut self.boss_key,
        };
        *slot = key;
    }

    /// Rejects bindings where two actions share a key.
    pub fn validate(&self) -> Result<(), KeyBindingError> {
        for (i, first) in Action::ALL.into_iter().enumerate() {
            for second in Action::ALL.into_iter().skip(i + 1) {
                if self.get(first) == self.get(second) {
                    return Err(KeyBindingError::Duplicate {
                        key: self.get(first),
                        first,
                        second,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the action bound to the pressed key.
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.get(action).matches(event))
    }
}
