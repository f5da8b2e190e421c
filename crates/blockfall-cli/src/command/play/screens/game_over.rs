use blockfall_engine::GameSession;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::{Block as BlockWidget, Paragraph},
};

use super::{Notice, centered_area, edit_text, key_press, leaderboard::LeaderboardScreen};
use crate::{
    command::play::{PlayContext, PlayRuntime, PlayTransition},
    model::leaderboard::{Initials, Leaderboard, LeaderboardEntry},
    tui::{RenderMode, Screen},
    view::widgets::{KeyBindingDisplay, KeyHint, style},
};

/// Whether the finished game can go on the leaderboard.
#[derive(Debug)]
enum Entry {
    /// The score qualifies; waiting for initials.
    Initials {
        leaderboard: Leaderboard,
        input: String,
    },
    Cheated,
    NotQualified,
    Unavailable,
}

#[derive(Debug)]
pub struct GameOverScreen {
    score: usize,
    level: usize,
    entry: Entry,
    notice: Option<Notice>,
}

impl GameOverScreen {
    pub fn new(ctx: &PlayContext, session: GameSession) -> Self {
        let score = session.stats().score();
        let entry = if session.is_cheated() {
            Entry::Cheated
        } else {
            match ctx.store.load_leaderboard() {
                Ok(leaderboard) if leaderboard.qualifies(score) => Entry::Initials {
                    leaderboard,
                    input: String::new(),
                },
                Ok(_) => Entry::NotQualified,
                Err(err) => {
                    log::error!("failed to load leaderboard: {err:#}");
                    Entry::Unavailable
                }
            }
        };
        Self {
            score,
            level: session.stats().level(),
            entry,
            notice: None,
        }
    }

    fn submit(&mut self, runtime: &PlayRuntime) -> PlayTransition {
        let Entry::Initials { leaderboard, input } = &self.entry else {
            return PlayTransition::Pop;
        };
        let initials = match Initials::new(input) {
            Ok(initials) => initials,
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                return PlayTransition::Stay;
            }
        };

        let mut leaderboard = leaderboard.clone();
        let rank = leaderboard.insert(LeaderboardEntry {
            initials,
            score: self.score,
            level: self.level,
        });
        if let Err(err) = runtime.shared().store.save_leaderboard(&leaderboard) {
            log::error!("failed to save leaderboard: {err:#}");
            self.notice = Some(Notice::error(&err));
            return PlayTransition::Stay;
        }
        log::info!("leaderboard entry added at rank {rank:?}");
        PlayTransition::replace(LeaderboardScreen::new(leaderboard, rank))
    }

    fn message(&self) -> Line<'_> {
        let line = match &self.entry {
            Entry::Initials { input, .. } => Line::from(format!("New high score! Initials: [{input:<3}]")),
            Entry::Cheated => Line::styled("Cheats were used. Score not recorded.", style::MESSAGE),
            Entry::NotQualified => Line::from("Not enough for the leaderboard."),
            Entry::Unavailable => Line::styled("Leaderboard unavailable.", style::ERROR),
        };
        line.centered()
    }
}

impl Screen<PlayContext> for GameOverScreen {
    fn on_active(&mut self, runtime: &mut PlayRuntime) {
        runtime.set_tick_interval(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn handle_event(&mut self, runtime: &mut PlayRuntime, event: &Event) -> PlayTransition {
        let Some(key) = key_press(event) else {
            return PlayTransition::Stay;
        };
        match key.code {
            KeyCode::Esc => PlayTransition::Pop,
            KeyCode::Enter => self.submit(runtime),
            code => {
                if let Entry::Initials { input, .. } = &mut self.entry {
                    edit_text(input, code, 3);
                }
                PlayTransition::Stay
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let summary = Paragraph::new(vec![
            Line::styled("GAME OVER", style::ERROR).centered(),
            Line::default(),
            Line::from(format!("Score: {}", self.score)).centered(),
            Line::from(format!("Level: {}", self.level)).centered(),
            Line::default(),
            self.message(),
        ])
        .block(BlockWidget::bordered());
        let hints = match self.entry {
            Entry::Initials { .. } => vec![
                KeyHint::new(["Enter"], "Submit"),
                KeyHint::new(["Esc"], "Skip"),
            ],
            _ => vec![KeyHint::new(["Enter"], "Main menu")],
        };

        let area = centered_area(frame.area(), 44, 12);
        let [summary_area, notice_area, help_area] = Layout::vertical([
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        frame.render_widget(summary, summary_area);
        if let Some(notice) = &self.notice {
            frame.render_widget(notice.line(), notice_area);
        }
        frame.render_widget(KeyBindingDisplay::new(&hints), help_area);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Cheat, CheatSet, PieceGenerator, SessionRecord};

    use super::*;
    use crate::command::play::screens::test_util::{press, test_runtime, type_text};

    fn finished(score: usize, cheats: CheatSet) -> GameSession {
        let record = SessionRecord {
            cheats,
            score,
            level: 3,
            locked_pieces: vec![],
        };
        GameSession::restore(record, PieceGenerator::new()).unwrap()
    }

    #[test]
    fn test_initials_enter_leaderboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let mut screen = GameOverScreen::new(runtime.shared(), finished(120, CheatSet::new()));

        type_text(&mut screen, &mut runtime, "AB");
        press(&mut screen, &mut runtime, KeyCode::Enter);
        assert!(screen.notice.is_some());

        type_text(&mut screen, &mut runtime, "CD");
        let transition = press(&mut screen, &mut runtime, KeyCode::Enter);

        assert!(matches!(transition, PlayTransition::Replace(_)));
        let leaderboard = runtime.shared().store.load_leaderboard().unwrap();
        assert_eq!(leaderboard.entries().len(), 1);
        assert_eq!(leaderboard.entries()[0].initials.to_string(), "ABC");
        assert_eq!(leaderboard.entries()[0].score, 120);
        assert_eq!(leaderboard.entries()[0].level, 3);
    }

    #[test]
    fn test_cheated_game_skips_leaderboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut runtime = test_runtime(dir.path());
        let cheats = [Cheat::SlowGame].into_iter().collect();
        let mut screen = GameOverScreen::new(runtime.shared(), finished(500, cheats));

        assert!(matches!(screen.entry, Entry::Cheated));
        assert!(matches!(press(&mut screen, &mut runtime, KeyCode::Enter), PlayTransition::Pop));
        assert!(runtime.shared().store.load_leaderboard().unwrap().entries().is_empty());
    }

    #[test]
    fn test_zero_score_does_not_qualify() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = test_runtime(dir.path());
        let screen = GameOverScreen::new(runtime.shared(), finished(0, CheatSet::new()));
        assert!(matches!(screen.entry, Entry::NotQualified));
    }
}
