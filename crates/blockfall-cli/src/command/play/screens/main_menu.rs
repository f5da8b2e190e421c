use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};

use super::{
    Notice, Selection, centered_area, instructions::InstructionsScreen, key_press,
    leaderboard::LeaderboardScreen, load_game::LoadGameScreen, options::OptionsScreen,
};
use crate::{
    command::play::{PlayContext, PlayRuntime, PlayTransition},
    tui::Screen,
    view::widgets::{KeyBindingDisplay, KeyHint, MenuDisplay},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    NewGame,
    LoadGame,
    Instructions,
    Leaderboard,
    Exit,
}

impl MenuItem {
    const ALL: [Self; 5] = [
        Self::NewGame,
        Self::LoadGame,
        Self::Instructions,
        Self::Leaderboard,
        Self::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            MenuItem::NewGame => "New Game",
            MenuItem::LoadGame => "Load Game",
            MenuItem::Instructions => "Instructions",
            MenuItem::Leaderboard => "View Leaderboard",
            MenuItem::Exit => "Exit",
        }
    }
}

#[derive(Debug)]
pub struct MainMenuScreen {
    selection: Selection,
    notice: Option<Notice>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self {
            selection: Selection::new(MenuItem::ALL.len()),
            notice: None,
        }
    }

    fn activate(&mut self, runtime: &mut PlayRuntime, item: MenuItem) -> PlayTransition {
        match item {
            MenuItem::NewGame => PlayTransition::push(OptionsScreen::new(runtime.shared())),
            MenuItem::LoadGame => match LoadGameScreen::load(runtime.shared()) {
                Ok(screen) => PlayTransition::push(screen),
                Err(err) => {
                    log::error!("failed to list saved games: {err:#}");
                    self.notice = Some(Notice::error(&err));
                    PlayTransition::Stay
                }
            },
            MenuItem::Instructions => PlayTransition::push(InstructionsScreen::new()),
            MenuItem::Leaderboard => match runtime.shared().store.load_leaderboard() {
                Ok(leaderboard) => PlayTransition::push(LeaderboardScreen::new(leaderboard, None)),
                Err(err) => {
                    log::error!("failed to load leaderboard: {err:#}");
                    self.notice = Some(Notice::error(&err));
                    PlayTransition::Stay
                }
            },
            MenuItem::Exit => PlayTransition::Exit,
        }
    }
}

impl Screen<PlayContext> for MainMenuScreen {
    fn on_active(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(None);
    }

    fn handle_event(&mut self, runtime: &mut PlayRuntime, event: &Event) -> PlayTransition {
        let Some(key) = key_press(event) else {
            return PlayTransition::Stay;
        };
        if self.selection.handle_key(key.code) {
            return PlayTransition::Stay;
        }
        match key.code {
            KeyCode::Enter => {
                self.notice = None;
                self.activate(runtime, MenuItem::ALL[self.selection.index()])
            }
            KeyCode::Esc | KeyCode::Char('q') => PlayTransition::Exit,
            _ => PlayTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let menu = MenuDisplay::new(MenuItem::ALL.map(MenuItem::label))
            .selected(self.selection.index())
            .block(BlockWidget::bordered().title(Line::from(" BLOCKFALL ").centered()));
        let hints = [
            KeyHint::new(["↑", "↓"], "Select"),
            KeyHint::new(["Enter"], "Open"),
            KeyHint::new(["Esc"], "Exit"),
        ];

        let area = centered_area(frame.area(), 40, menu.height() + 3);
        let [menu_area, notice_area, _, help_area] = Layout::vertical([
            Constraint::Length(menu.height()),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(menu, menu_area);
        if let Some(notice) = &self.notice {
            frame.render_widget(notice.line(), notice_area);
        }
        frame.render_widget(KeyBindingDisplay::new(&hints), help_area);
    }
}
