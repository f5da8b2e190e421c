use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::{Block as BlockWidget, Row, Table},
};

use super::{centered_area, key_press};
use crate::{
    command::play::{PlayContext, PlayRuntime, PlayTransition},
    model::leaderboard::{LEADERBOARD_SIZE, Leaderboard},
    tui::Screen,
    view::widgets::{KeyBindingDisplay, KeyHint, style},
};

#[derive(Debug)]
pub struct LeaderboardScreen {
    leaderboard: Leaderboard,
    highlight: Option<usize>,
}

impl LeaderboardScreen {
    /// `highlight` is the rank of an entry that was just added.
    pub fn new(leaderboard: Leaderboard, highlight: Option<usize>) -> Self {
        Self {
            leaderboard,
            highlight,
        }
    }
}

impl Screen<PlayContext> for LeaderboardScreen {
    fn on_active(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(None);
    }

    fn handle_event(&mut self, _runtime: &mut PlayRuntime, event: &Event) -> PlayTransition {
        match key_press(event).map(|key| key.code) {
            Some(KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) => PlayTransition::Pop,
            _ => PlayTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let rows = (0..LEADERBOARD_SIZE).map(|rank| {
            let cells = match self.leaderboard.entries().get(rank) {
                Some(entry) => [
                    format!("{}.", rank + 1),
                    entry.initials.to_string(),
                    entry.score.to_string(),
                    entry.level.to_string(),
                ],
                None => [format!("{}.", rank + 1), "---".to_owned(), "-".to_owned(), "-".to_owned()],
            };
            let style = if self.highlight == Some(rank) {
                style::SELECTED
            } else {
                style::DEFAULT
            };
            Row::new(cells).style(style)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Fill(1),
                Constraint::Length(6),
            ],
        )
        .header(Row::new(["", "Initials", "Score", "Level"]).style(style::MESSAGE))
        .block(BlockWidget::bordered().title(Line::from(" LEADERBOARD ").centered()));
        let hints = [KeyHint::new(["Esc"], "Back")];

        let table_height = u16::try_from(LEADERBOARD_SIZE).unwrap_or(u16::MAX) + 3;
        let area = centered_area(frame.area(), 40, table_height + 1);
        let [table_area, help_area] =
            Layout::vertical([Constraint::Length(table_height), Constraint::Length(1)]).areas(area);
        frame.render_widget(table, table_area);
        frame.render_widget(KeyBindingDisplay::new(&hints), help_area);
    }
}
