use blockfall_engine::{GameSession, PauseKind, SessionState, TickOutcome};
use chrono::Utc;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Clear, Row as TableRow, Table},
};

use super::{Notice, Selection, centered_area, edit_text, game_over::GameOverScreen, key_press};
use crate::{
    command::play::{PlayContext, PlayRuntime, PlayTransition},
    model::key_bindings::{Action, KeyBindings},
    schema::save::SavedGame,
    store::{MAX_SAVES, SaveSlotsFull},
    tui::{RenderMode, Screen},
    view::widgets::{
        BoardDisplay, KeyBindingDisplay, KeyHint, MenuDisplay, SessionStatsDisplay, style,
    },
};

const MAX_SAVE_NAME_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PauseItem {
    Name,
    SaveAndQuit,
    Quit,
    Resume,
}

const PAUSE_ITEMS: [PauseItem; 4] = [
    PauseItem::Name,
    PauseItem::SaveAndQuit,
    PauseItem::Quit,
    PauseItem::Resume,
];

#[derive(Debug)]
pub struct GameScreen {
    session: GameSession,
    key_bindings: KeyBindings,
    pause_menu: Selection,
    save_name: String,
    notice: Option<Notice>,
}

impl GameScreen {
    pub fn new(session: GameSession, key_bindings: KeyBindings) -> Self {
        Self {
            session,
            key_bindings,
            pause_menu: Selection::new(PAUSE_ITEMS.len()),
            save_name: String::new(),
            notice: None,
        }
    }

    fn sync_tick_interval(&self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(self.session.tick_interval());
    }

    fn game_over(&self, runtime: &PlayRuntime) -> PlayTransition {
        PlayTransition::replace(GameOverScreen::new(runtime.shared(), self.session.clone()))
    }

    fn handle_action(&mut self, runtime: &PlayRuntime, action: Action) -> PlayTransition {
        let result = match action {
            Action::MoveLeft => self.session.try_move_left(),
            Action::MoveRight => self.session.try_move_right(),
            Action::Rotate => self.session.try_rotate(),
            Action::Fall => match self.session.soft_drop() {
                Ok(TickOutcome::GameOver) => return self.game_over(runtime),
                Ok(_) => Ok(()),
                Err(err) => Err(err),
            },
            Action::Stop => {
                if let Err(err) = self.session.toggle_stop() {
                    log::debug!("stop key ignored: {err}");
                }
                Ok(())
            }
            Action::BossKey => {
                self.session.toggle_boss();
                Ok(())
            }
        };
        if let Err(err) = result {
            log::trace!("{action:?} rejected: {err}");
        }
        PlayTransition::Stay
    }

    fn handle_pause_menu(&mut self, runtime: &PlayRuntime, code: KeyCode) -> PlayTransition {
        if self.pause_menu.handle_key(code) {
            return PlayTransition::Stay;
        }
        match (PAUSE_ITEMS[self.pause_menu.index()], code) {
            (_, KeyCode::Esc) | (PauseItem::Resume, KeyCode::Enter) => self.session.resume(),
            (PauseItem::Quit, KeyCode::Enter) => {
                log::info!("quit without saving");
                return PlayTransition::Pop;
            }
            (PauseItem::SaveAndQuit, KeyCode::Enter) => return self.save_and_quit(runtime),
            (PauseItem::Name, code) => {
                edit_text(&mut self.save_name, code, MAX_SAVE_NAME_LEN);
            }
            _ => {}
        }
        PlayTransition::Stay
    }

    fn save_and_quit(&mut self, runtime: &PlayRuntime) -> PlayTransition {
        let game = SavedGame {
            name: self.save_name.trim().to_owned(),
            saved_at: Utc::now(),
            key_bindings: self.key_bindings,
            session: self.session.record(),
        };
        match runtime.shared().store.save_game(&game) {
            Ok(_) => PlayTransition::Pop,
            Err(err) if err.is::<SaveSlotsFull>() => {
                self.notice = Some(Notice::Error(format!(
                    "Already {MAX_SAVES} games saved! Delete a Game to save some more!"
                )));
                PlayTransition::Stay
            }
            Err(err) => {
                log::error!("failed to save game: {err:#}");
                self.notice = Some(Notice::error(&err));
                PlayTransition::Stay
            }
        }
    }

    fn is_in_pause_menu(&self) -> bool {
        self.session.session_state() == SessionState::Paused(PauseKind::Menu)
    }

    fn draw_board(&self, frame: &mut Frame, area: Rect) {
        let board = BoardDisplay::new(self.session.grid())
            .falling_piece(self.session.falling_piece())
            .block(BlockWidget::bordered());
        let stats = SessionStatsDisplay::new(&self.session)
            .block(BlockWidget::bordered().title(Line::from(" STATS ").centered()));

        let [board_area, stats_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .areas(area.centered(
            Constraint::Length(board.width() + stats.width()),
            Constraint::Fill(1),
        ));
        let stats_height = stats.height();
        frame.render_widget(&board, board_area);
        frame.render_widget(stats, stats_area.centered_vertically(Constraint::Length(stats_height)));
    }

    fn draw_pause_menu(&self, frame: &mut Frame, area: Rect) {
        let labels = PAUSE_ITEMS.map(|item| match item {
            PauseItem::Name => format!("Name [{:<20}]", self.save_name),
            PauseItem::SaveAndQuit => "Save & Quit".to_owned(),
            PauseItem::Quit => "Quit".to_owned(),
            PauseItem::Resume => "Resume".to_owned(),
        });
        let menu = MenuDisplay::new(labels)
            .selected(self.pause_menu.index())
            .block(BlockWidget::bordered().title(Line::from(" PAUSED ").centered()));
        let popup = centered_area(area, 36, menu.height() + 1);
        let [menu_area, notice_area] =
            Layout::vertical([Constraint::Length(menu.height()), Constraint::Length(1)]).areas(popup);

        frame.render_widget(Clear, popup);
        frame.render_widget(menu, menu_area);
        if let Some(notice) = &self.notice {
            frame.render_widget(notice.line(), notice_area);
        }
    }

    fn hints(&self) -> Vec<KeyHint> {
        let kb = &self.key_bindings;
        match self.session.session_state() {
            SessionState::Playing => vec![
                KeyHint::new([kb.move_left, kb.move_right], "Move"),
                KeyHint::new([kb.rotate], "Rotate"),
                KeyHint::new([kb.fall], "Fall"),
                KeyHint::new(["Esc"], "Pause"),
            ],
            SessionState::Paused(PauseKind::Stop) => vec![KeyHint::new([kb.stop], "Continue")],
            SessionState::Paused(_) => vec![
                KeyHint::new(["↑", "↓"], "Select"),
                KeyHint::new(["Enter"], "Confirm"),
                KeyHint::new(["Esc"], "Resume"),
            ],
            SessionState::GameOver => vec![],
        }
    }
}

impl Screen<PlayContext> for GameScreen {
    fn on_active(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(60.0));
        self.sync_tick_interval(runtime);
    }

    fn on_close(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn handle_event(&mut self, runtime: &mut PlayRuntime, event: &Event) -> PlayTransition {
        let Some(key) = key_press(event) else {
            return PlayTransition::Stay;
        };
        let editing_name =
            self.is_in_pause_menu() && PAUSE_ITEMS[self.pause_menu.index()] == PauseItem::Name;
        let action = self.key_bindings.action_for(&key);

        let transition = match self.session.session_state() {
            _ if action == Some(Action::BossKey) && !editing_name => {
                self.session.toggle_boss();
                PlayTransition::Stay
            }
            SessionState::Paused(PauseKind::Menu) => self.handle_pause_menu(runtime, key.code),
            SessionState::Paused(PauseKind::Boss) | SessionState::GameOver => PlayTransition::Stay,
            SessionState::Playing | SessionState::Paused(PauseKind::Stop) => {
                if key.code == KeyCode::Esc {
                    // Leave the stop first; the menu resumes into normal play.
                    self.session.resume();
                    self.session.toggle_pause();
                    self.pause_menu = Selection::new(PAUSE_ITEMS.len());
                    self.notice = None;
                    PlayTransition::Stay
                } else if let Some(action) = action {
                    self.handle_action(runtime, action)
                } else {
                    PlayTransition::Stay
                }
            }
        };
        self.sync_tick_interval(runtime);
        transition
    }

    fn update(&mut self, runtime: &mut PlayRuntime) -> PlayTransition {
        let transition = match self.session.tick() {
            TickOutcome::GameOver => return self.game_over(runtime),
            TickOutcome::Locked { cleared_lines } if cleared_lines > 0 => {
                log::debug!("cleared {cleared_lines} lines");
                PlayTransition::Stay
            }
            TickOutcome::Fell | TickOutcome::Locked { .. } | TickOutcome::Suspended => {
                PlayTransition::Stay
            }
        };
        self.sync_tick_interval(runtime);
        transition
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        if self.session.session_state() == SessionState::Paused(PauseKind::Boss) {
            draw_boss_screen(frame, area);
            return;
        }

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        self.draw_board(frame, main_area);
        let hints = self.hints();
        frame.render_widget(KeyBindingDisplay::new(&hints), help_area);

        match self.session.session_state() {
            SessionState::Paused(PauseKind::Menu) => self.draw_pause_menu(frame, main_area),
            SessionState::Paused(PauseKind::Stop) => {
                let text = Line::styled(" STOPPED ", style::MESSAGE).centered();
                frame.render_widget(Clear, centered_area(main_area, 11, 1));
                frame.render_widget(text, centered_area(main_area, 11, 1));
            }
            _ => {}
        }
    }
}

/// A spreadsheet that hides the game.
fn draw_boss_screen(frame: &mut Frame, area: Rect) {
    const ROWS: [[&str; 5]; 8] = [
        ["Region", "Q1", "Q2", "Q3", "Q4"],
        ["North", "12,400", "13,150", "12,980", "14,020"],
        ["South", "9,870", "10,210", "10,640", "11,005"],
        ["East", "15,300", "14,880", "15,720", "16,410"],
        ["West", "8,450", "8,990", "9,320", "9,760"],
        ["Online", "21,600", "23,040", "24,510", "26,300"],
        ["", "", "", "", ""],
        ["Total", "67,620", "70,270", "73,170", "77,495"],
    ];
    let rows = ROWS.iter().skip(1).map(|row| TableRow::new(row.iter().copied()));
    let table = Table::new(rows, [Constraint::Fill(1); 5])
        .header(TableRow::new(ROWS[0].iter().copied()).style(style::SELECTED))
        .style(style::DEFAULT)
        .block(BlockWidget::bordered().title(" quarterly_revenue.xlsx "));
    frame.render_widget(Clear, area);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Cheat, CheatSet, Grid, PieceGenerator, PieceSeed};

    use super::*;
    use crate::command::play::screens::test_util::{press, test_runtime, type_text};

    fn new_screen(cheats: CheatSet) -> GameScreen {
        let generator = PieceGenerator::with_seed(PieceSeed::from_u128(7));
        let session = GameSession::with_grid(Grid::default(), generator, cheats);
        GameScreen::new(session, KeyBindings::default())
    }

    #[test]
    fn test_escape_opens_and_closes_pause_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = new_screen(CheatSet::new());

        press(&mut screen, &mut runtime, KeyCode::Esc);
        assert!(screen.is_in_pause_menu());
        assert_eq!(screen.session.tick(), TickOutcome::Suspended);

        press(&mut screen, &mut runtime, KeyCode::Esc);
        assert_eq!(screen.session.session_state(), SessionState::Playing);
    }

    #[test]
    fn test_boss_key_hides_and_restores() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = new_screen(CheatSet::new());

        press(&mut screen, &mut runtime, KeyCode::Char('q'));
        assert_eq!(screen.session.session_state(), SessionState::Paused(PauseKind::Boss));
        press(&mut screen, &mut runtime, KeyCode::Char('a'));
        press(&mut screen, &mut runtime, KeyCode::Esc);
        assert_eq!(screen.session.session_state(), SessionState::Paused(PauseKind::Boss));

        press(&mut screen, &mut runtime, KeyCode::Char('q'));
        assert_eq!(screen.session.session_state(), SessionState::Playing);
    }

    #[test]
    fn test_stop_key_requires_cheat() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());

        let mut screen = new_screen(CheatSet::new());
        press(&mut screen, &mut runtime, KeyCode::Char(' '));
        assert_eq!(screen.session.session_state(), SessionState::Playing);

        let mut screen = new_screen([Cheat::StopKey].into_iter().collect());
        press(&mut screen, &mut runtime, KeyCode::Char(' '));
        assert_eq!(screen.session.session_state(), SessionState::Paused(PauseKind::Stop));
        press(&mut screen, &mut runtime, KeyCode::Char(' '));
        assert_eq!(screen.session.session_state(), SessionState::Playing);

        press(&mut screen, &mut runtime, KeyCode::Char(' '));
        press(&mut screen, &mut runtime, KeyCode::Esc);
        assert!(screen.is_in_pause_menu());
    }

    #[test]
    fn test_moves_follow_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = new_screen(CheatSet::new());
        let start = screen.session.falling_piece().cells()[0];

        press(&mut screen, &mut runtime, KeyCode::Char('a'));
        assert_eq!(screen.session.falling_piece().cells()[0].x, start.x - 1);
        press(&mut screen, &mut runtime, KeyCode::Char('d'));
        press(&mut screen, &mut runtime, KeyCode::Char('s'));
        assert_eq!(screen.session.falling_piece().cells()[0], start.offset(0, 1));
    }

    #[test]
    fn test_save_and_quit_writes_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = new_screen(CheatSet::new());

        press(&mut screen, &mut runtime, KeyCode::Esc);
        type_text(&mut screen, &mut runtime, "lunch break");
        press(&mut screen, &mut runtime, KeyCode::Down);
        let transition = press(&mut screen, &mut runtime, KeyCode::Enter);

        assert!(matches!(transition, PlayTransition::Pop));
        let saves = runtime.shared().store.list_saves().unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].game.as_ref().unwrap().name, "lunch break");
    }

    #[test]
    fn test_save_with_full_slots_shows_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = new_screen(CheatSet::new());
        for _ in 0..MAX_SAVES {
            screen.save_name = "filler".to_owned();
            assert!(matches!(screen.save_and_quit(&runtime), PlayTransition::Pop));
        }

        press(&mut screen, &mut runtime, KeyCode::Esc);
        press(&mut screen, &mut runtime, KeyCode::Down);
        let transition = press(&mut screen, &mut runtime, KeyCode::Enter);

        assert!(matches!(transition, PlayTransition::Stay));
        assert!(matches!(
            &screen.notice,
            Some(Notice::Error(text)) if text == "Already 5 games saved! Delete a Game to save some more!"
        ));
    }

    #[test]
    fn test_quit_leaves_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = new_screen(CheatSet::new());

        press(&mut screen, &mut runtime, KeyCode::Esc);
        press(&mut screen, &mut runtime, KeyCode::Up);
        press(&mut screen, &mut runtime, KeyCode::Up);
        let transition = press(&mut screen, &mut runtime, KeyCode::Enter);

        assert!(matches!(transition, PlayTransition::Pop));
        assert!(runtime.shared().store.list_saves().unwrap().is_empty());
    }

    #[test]
    fn test_soft_drops_until_game_over() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = new_screen(CheatSet::new());

        let mut ended = false;
        for _ in 0..10_000 {
            if matches!(press(&mut screen, &mut runtime, KeyCode::Char('s')), PlayTransition::Replace(_)) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(screen.session.session_state().is_game_over());
    }
}
