use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::{Block as BlockWidget, Padding, Paragraph, Wrap},
};

use super::{Selection, centered_area, key_press};
use crate::{
    command::play::{PlayContext, PlayRuntime, PlayTransition},
    tui::Screen,
    view::widgets::{KeyBindingDisplay, KeyHint, style},
};

const PAGES: [&str; 4] = [
    "Bring down blocks from the top of the screen. You can move the blocks around or rotate them.",
    "Your objective is to get all of the blocks to fill the empty space in a line at the bottom of the screen",
    "Your game is over if your pieces reach the top of the screen.",
    "Press the boss key to flip to an image that shows that you're really doing work!",
];

#[derive(Debug)]
pub struct InstructionsScreen {
    page: Selection,
}

impl InstructionsScreen {
    pub fn new() -> Self {
        Self {
            page: Selection::new(PAGES.len()),
        }
    }
}

impl Screen<PlayContext> for InstructionsScreen {
    fn on_active(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(None);
    }

    fn handle_event(&mut self, _runtime: &mut PlayRuntime, event: &Event) -> PlayTransition {
        let Some(key) = key_press(event) else {
            return PlayTransition::Stay;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('<' | ',') => self.page.prev(),
            KeyCode::Right | KeyCode::Char('>' | '.') => self.page.next(),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => return PlayTransition::Pop,
            _ => {}
        }
        PlayTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let title = format!(" INSTRUCTIONS {}/{} ", self.page.index() + 1, PAGES.len());
        let text = Paragraph::new(PAGES[self.page.index()])
            .style(style::DEFAULT)
            .centered()
            .wrap(Wrap { trim: true })
            .block(
                BlockWidget::bordered()
                    .title(Line::from(title).centered())
                    .padding(Padding::uniform(1)),
            );
        let hints = [
            KeyHint::new(["<", ">"], "Page"),
            KeyHint::new(["Esc"], "Back"),
        ];

        let area = centered_area(frame.area(), 50, 9);
        let [text_area, help_area] =
            Layout::vertical([Constraint::Length(8), Constraint::Length(1)]).areas(area);
        frame.render_widget(text, text_area);
        frame.render_widget(KeyBindingDisplay::new(&hints), help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::play::screens::test_util::{press, test_runtime};

    #[test]
    fn test_pages_wrap_both_ways() {
        let mut runtime = test_runtime("unused".as_ref());
        let mut screen = InstructionsScreen::new();

        press(&mut screen, &mut runtime, KeyCode::Char('<'));
        assert_eq!(screen.page.index(), PAGES.len() - 1);
        press(&mut screen, &mut runtime, KeyCode::Char('>'));
        assert_eq!(screen.page.index(), 0);
        press(&mut screen, &mut runtime, KeyCode::Right);
        assert_eq!(screen.page.index(), 1);
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut runtime = test_runtime("unused".as_ref());
        let mut screen = InstructionsScreen::new();
        assert!(matches!(
            press(&mut screen, &mut runtime, KeyCode::Esc),
            PlayTransition::Pop
        ));
    }
}
