use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Rect},
    text::Line,
};

use crate::view::widgets::style;

pub(super) use self::main_menu::MainMenuScreen;

mod game;
mod game_over;
mod instructions;
mod leaderboard;
mod load_game;
mod main_menu;
mod options;

/// Returns the key event if `event` is a key press (not a release or repeat).
fn key_press(event: &Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
        _ => None,
    }
}

/// A one-line message shown under a menu.
#[derive(Debug, Clone)]
enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    fn error(err: &anyhow::Error) -> Self {
        Self::Error(format!("{err:#}"))
    }

    fn line(&self) -> Line<'_> {
        let line = match self {
            Notice::Info(text) => Line::styled(text.as_str(), style::MESSAGE),
            Notice::Error(text) => Line::styled(text.as_str(), style::ERROR),
        };
        line.centered()
    }
}

/// Cursor over a fixed number of menu items, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    fn index(self) -> usize {
        self.index
    }

    fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Moves on Up/Down. Returns `true` if the key was used.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => self.prev(),
            KeyCode::Down => self.next(),
            _ => return false,
        }
        true
    }

    fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }
}

/// Applies a typing key to `text`. Returns `true` if the key was used.
fn edit_text(text: &mut String, code: KeyCode, max_chars: usize) -> bool {
    match code {
        KeyCode::Char(c) if !c.is_control() => {
            if text.chars().count() < max_chars {
                text.push(c);
            }
            true
        }
        KeyCode::Backspace => {
            text.pop();
            true
        }
        _ => false,
    }
}

fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    area.centered(Constraint::Length(width), Constraint::Length(height))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut selection = Selection::new(3);
        selection.prev();
        assert_eq!(selection.index(), 2);
        selection.next();
        assert_eq!(selection.index(), 0);
        assert!(selection.handle_key(KeyCode::Down));
        assert_eq!(selection.index(), 1);
        assert!(!selection.handle_key(KeyCode::Enter));
    }

    #[test]
    fn test_selection_shrinks() {
        let mut selection = Selection::new(5);
        selection.prev();
        selection.set_len(2);
        assert_eq!(selection.index(), 1);
        selection.set_len(0);
        assert_eq!(selection.index(), 0);
        selection.next();
        assert_eq!(selection.index(), 0);
    }

    #[test]
    fn test_edit_text_limits_length() {
        let mut text = String::from("AB");
        assert!(edit_text(&mut text, KeyCode::Char('C'), 3));
        assert!(edit_text(&mut text, KeyCode::Char('D'), 3));
        assert_eq!(text, "ABC");
        assert!(edit_text(&mut text, KeyCode::Backspace, 3));
        assert_eq!(text, "AB");
        assert!(!edit_text(&mut text, KeyCode::Left, 3));
    }
}
