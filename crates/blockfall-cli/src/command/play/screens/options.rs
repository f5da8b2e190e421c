use blockfall_engine::{CheatError, CheatSet, GameSession, Grid};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};

use super::{Notice, Selection, centered_area, edit_text, game::GameScreen, key_press};
use crate::{
    command::play::{PlayContext, PlayRuntime, PlayTransition},
    model::key_bindings::{Action, BoundKey, KeyBindings},
    tui::{RenderMode, Screen},
    view::widgets::{KeyBindingDisplay, KeyHint, MenuDisplay},
};

const MAX_CHEAT_CODE_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Binding(Action),
    CheatCode,
    Back,
    StartGame,
}

const ROWS: [Row; 9] = [
    Row::Binding(Action::MoveLeft),
    Row::Binding(Action::MoveRight),
    Row::Binding(Action::Rotate),
    Row::Binding(Action::Fall),
    Row::Binding(Action::Stop),
    Row::Binding(Action::BossKey),
    Row::CheatCode,
    Row::Back,
    Row::StartGame,
];

/// Key bindings and cheat codes for the next game.
#[derive(Debug)]
pub struct OptionsScreen {
    key_bindings: KeyBindings,
    cheats: CheatSet,
    cheat_input: String,
    selection: Selection,
    /// Waiting for the key to bind to this action
    capturing: Option<Action>,
    notice: Option<Notice>,
}

impl OptionsScreen {
    pub fn new(ctx: &PlayContext) -> Self {
        Self {
            key_bindings: ctx.settings.key_bindings,
            cheats: CheatSet::new(),
            cheat_input: String::new(),
            selection: Selection::new(ROWS.len()),
            capturing: None,
            notice: None,
        }
    }

    fn current_row(&self) -> Row {
        ROWS[self.selection.index()]
    }

    fn cycle_binding(&mut self, action: Action, forward: bool) {
        let keys: Vec<BoundKey> = BoundKey::all().collect();
        let current = self.key_bindings.get(action);
        let index = keys.iter().position(|&key| key == current).unwrap_or(0);
        let next = if forward {
            (index + 1) % keys.len()
        } else {
            (index + keys.len() - 1) % keys.len()
        };
        self.key_bindings.set(action, keys[next]);
    }

    fn submit_cheat(&mut self) {
        let code = std::mem::take(&mut self.cheat_input);
        self.notice = Some(match self.cheats.enter_code(&code) {
            Ok(cheat) => {
                log::info!("cheat entered: {cheat}");
                Notice::Info("Cheat Added! Score will not be added to the leaderboard!".to_owned())
            }
            Err(CheatError::AlreadyActive { .. }) => Notice::Error("Cheat already entered".to_owned()),
            Err(err) => {
                log::debug!("{err}");
                Notice::Error("Invalid Cheat Code!".to_owned())
            }
        });
    }

    fn start_game(&mut self, runtime: &mut PlayRuntime) -> PlayTransition {
        if let Err(err) = self.key_bindings.validate() {
            log::warn!("rejected key bindings: {err}");
            self.key_bindings = KeyBindings::default();
            self.notice = Some(Notice::Error("Please do not enter the same keybinds!".to_owned()));
            return PlayTransition::Stay;
        }

        let ctx = runtime.shared_mut();
        ctx.settings.key_bindings = self.key_bindings;
        if let Err(err) = ctx.store.save_settings(&ctx.settings) {
            log::warn!("failed to save settings: {err:#}");
        }

        let session = GameSession::with_grid(Grid::default(), ctx.generator(), self.cheats.clone());
        PlayTransition::replace(GameScreen::new(session, self.key_bindings))
    }

    fn handle_capture(&mut self, action: Action, code: KeyCode) {
        if code == KeyCode::Esc {
            self.capturing = None;
            return;
        }
        if let Some(key) = BoundKey::from_key_code(code) {
            self.key_bindings.set(action, key);
            self.capturing = None;
        }
    }

    fn row_label(&self, row: Row) -> String {
        match row {
            Row::Binding(action) if self.capturing == Some(action) => {
                format!("{:<12}< press a key >", action.label())
            }
            Row::Binding(action) => {
                format!("{:<12}< {:^9} >", action.label(), self.key_bindings.get(action).to_string())
            }
            Row::CheatCode => format!("{:<12}[{:<16}]", "Cheat Code", self.cheat_input),
            Row::Back => "Back".to_owned(),
            Row::StartGame => "Start Game".to_owned(),
        }
    }
}

impl Screen<PlayContext> for OptionsScreen {
    fn on_active(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn handle_event(&mut self, runtime: &mut PlayRuntime, event: &Event) -> PlayTransition {
        let Some(key) = key_press(event) else {
            return PlayTransition::Stay;
        };
        if let Some(action) = self.capturing {
            self.handle_capture(action, key.code);
            return PlayTransition::Stay;
        }
        if self.selection.handle_key(key.code) {
            return PlayTransition::Stay;
        }

        match (self.current_row(), key.code) {
            (_, KeyCode::Esc) | (Row::Back, KeyCode::Enter) => return PlayTransition::Pop,
            (Row::StartGame, KeyCode::Enter) => return self.start_game(runtime),
            (Row::Binding(action), KeyCode::Enter) => self.capturing = Some(action),
            (Row::Binding(action), KeyCode::Left) => self.cycle_binding(action, false),
            (Row::Binding(action), KeyCode::Right) => self.cycle_binding(action, true),
            (Row::CheatCode, KeyCode::Enter) => self.submit_cheat(),
            (Row::CheatCode, code) => {
                edit_text(&mut self.cheat_input, code, MAX_CHEAT_CODE_LEN);
            }
            _ => {}
        }
        PlayTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let menu = MenuDisplay::new(ROWS.map(|row| self.row_label(row)))
            .selected(self.selection.index())
            .block(BlockWidget::bordered().title(Line::from(" OPTIONS ").centered()));
        let hints = match self.current_row() {
            _ if self.capturing.is_some() => vec![KeyHint::new(["Esc"], "Cancel")],
            Row::Binding(_) => vec![
                KeyHint::new(["←", "→"], "Change"),
                KeyHint::new(["Enter"], "Press new key"),
                KeyHint::new(["Esc"], "Back"),
            ],
            Row::CheatCode => vec![
                KeyHint::new(["Enter"], "Enter cheat"),
                KeyHint::new(["Esc"], "Back"),
            ],
            Row::Back | Row::StartGame => vec![
                KeyHint::new(["↑", "↓"], "Select"),
                KeyHint::new(["Enter"], "Confirm"),
            ],
        };

        let area = centered_area(frame.area(), 50, menu.height() + 3);
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
