use blockfall_engine::GameSession;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};

use super::{Notice, Selection, centered_area, game::GameScreen, key_press};
use crate::{
    command::play::{PlayContext, PlayRuntime, PlayTransition},
    store::{MAX_SAVES, SaveSlot},
    tui::{RenderMode, Screen},
    view::widgets::{KeyBindingDisplay, KeyHint, MenuDisplay, style},
};

#[derive(Debug)]
pub struct LoadGameScreen {
    saves: Vec<SaveSlot>,
    selection: Selection,
    notice: Option<Notice>,
}

impl LoadGameScreen {
    pub fn load(ctx: &PlayContext) -> anyhow::Result<Self> {
        let saves = ctx.store.list_saves()?;
        Ok(Self {
            selection: Selection::new(saves.len()),
            saves,
            notice: None,
        })
    }

    fn selected(&self) -> Option<&SaveSlot> {
        self.saves.get(self.selection.index())
    }

    /// Resumes the selected game. The save file is kept.
    fn load_selected(&mut self, runtime: &PlayRuntime) -> PlayTransition {
        let Some(save) = self.selected() else {
            return PlayTransition::Stay;
        };
        let game = match &save.game {
            Ok(game) => game,
            Err(err) => {
                let message = format!("Cannot load saved game: {err}");
                self.notice = Some(Notice::Error(message));
                return PlayTransition::Stay;
            }
        };
        let generator = runtime.shared().generator();
        match GameSession::restore(game.session.clone(), generator) {
            Ok(session) => {
                log::info!("loaded saved game from slot {}", save.slot);
                PlayTransition::replace(GameScreen::new(session, game.key_bindings))
            }
            Err(err) => {
                log::error!("saved game in slot {} is corrupt: {err}", save.slot);
                self.notice = Some(Notice::Error(format!("Cannot load saved game: {err}")));
                PlayTransition::Stay
            }
        }
    }

    fn delete_selected(&mut self, runtime: &PlayRuntime) {
        let Some(slot) = self.selected().map(|save| save.slot) else {
            return;
        };
        let store = &runtime.shared().store;
        self.notice = Some(match store.delete_game(slot).and_then(|()| store.list_saves()) {
            Ok(saves) => {
                self.saves = saves;
                self.selection.set_len(self.saves.len());
                Notice::Info("Saved Game has been deleted!".to_owned())
            }
            Err(err) => Notice::error(&err),
        });
    }
}

impl Screen<PlayContext> for LoadGameScreen {
    fn on_active(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn handle_event(&mut self, runtime: &mut PlayRuntime, event: &Event) -> PlayTransition {
        let Some(key) = key_press(event) else {
            return PlayTransition::Stay;
        };
        if self.selection.handle_key(key.code) {
            return PlayTransition::Stay;
        }
        match key.code {
            KeyCode::Enter => return self.load_selected(runtime),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(runtime),
            KeyCode::Esc | KeyCode::Char('q') => return PlayTransition::Pop,
            _ => {}
        }
        PlayTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let block = BlockWidget::bordered().title(Line::from(" LOAD GAME ").centered());
        let menu_height = u16::try_from(MAX_SAVES).unwrap_or(u16::MAX) + 2;
        let area = centered_area(frame.area(), 50, menu_height + 3);
        let [menu_area, notice_area, _, help_area] = Layout::vertical([
            Constraint::Length(menu_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if self.saves.is_empty() {
            let text = Line::styled("There are no saved games", style::MESSAGE).centered();
            frame.render_widget(text, block.inner(menu_area));
            frame.render_widget(block, menu_area);
        } else {
            let items = self.saves.iter().map(|save| match &save.game {
                Ok(game) => format!(
                    "{:<16} Score: {} Level: {}",
                    game.display_name(),
                    game.session.score,
                    game.session.level
                ),
                Err(_) => format!("{:<16} Slot {}", "(unreadable)", save.slot),
            });
            let menu = MenuDisplay::new(items)
                .selected(self.selection.index())
                .block(block);
            frame.render_widget(menu, menu_area);
        }

        if let Some(notice) = &self.notice {
            frame.render_widget(notice.line(), notice_area);
        }
        let hints = [
            KeyHint::new(["Enter"], "Load"),
            KeyHint::new(["d"], "Delete"),
            KeyHint::new(["Esc"], "Back"),
        ];
        frame.render_widget(KeyBindingDisplay::new(&hints), help_area);
    }
}
