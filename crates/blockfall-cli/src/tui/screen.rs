use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use super::runtime::{App, Runtime};

/// One screen of the application (a menu, the game board, a dialog).
///
/// Only the top screen of a [`ScreenStack`] receives events, ticks, and draws.
///
/// ```text
/// on_active() ←──────────┐
///   ↓                    │ child screen pops
/// (foreground)           │
///   ↓                    │
/// on_inactive() ─────────┘ (pushed over)
///   ↓
/// on_close()  ← Pop/Replace/Exit only
/// ```
///
/// Screens configure the tick interval and render mode in [`Self::on_active`],
/// since another screen may have changed them while this one was in the
/// background.
pub trait Screen<S>: fmt::Debug {
    /// Called when this screen becomes the top of the stack.
    fn on_active(&mut self, runtime: &mut Runtime<S>);

    /// Called when another screen covers this one, or before [`Self::on_close`].
    fn on_inactive(&mut self, _runtime: &mut Runtime<S>) {}

    /// Called when this screen leaves the stack for good.
    fn on_close(&mut self, _runtime: &mut Runtime<S>) {}

    fn handle_event(&mut self, runtime: &mut Runtime<S>, event: &Event) -> ScreenTransition<S>;

    /// Called on each tick while this screen is on top.
    fn update(&mut self, _runtime: &mut Runtime<S>) -> ScreenTransition<S> {
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame);
}

/// What the stack should do after an event or tick.
#[derive(Debug)]
pub enum ScreenTransition<S> {
    Stay,
    /// Covers the current screen with a new one.
    Push(Box<dyn Screen<S>>),
    /// Closes the current screen and reactivates the one below.
    Pop,
    /// Closes the current screen and activates a new one in its place.
    Replace(Box<dyn Screen<S>>),
    /// Closes every screen.
    Exit,
}

impl<S> ScreenTransition<S> {
    pub fn push(screen: impl Screen<S> + 'static) -> Self {
        Self::Push(Box::new(screen))
    }

    pub fn replace(screen: impl Screen<S> + 'static) -> Self {
        Self::Replace(Box::new(screen))
    }
}

#[derive(Debug)]
pub struct ScreenStack<S> {
    screens: Vec<Box<dyn Screen<S>>>,
    should_exit: bool,
}

impl<S> ScreenStack<S> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen<S>>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime<S>, transition: ScreenTransition<S>) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(previous) = self.screens.last_mut() {
                    previous.on_active(runtime);
                }
            }
            ScreenTransition::Replace(mut screen) => {
                self.close_top(runtime);
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.should_exit = true;
            }
        }
    }

    fn close_top(&mut self, runtime: &mut Runtime<S>) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }
}

impl<S> App<S> for ScreenStack<S> {
    fn init(&mut self, runtime: &mut Runtime<S>) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime<S>, event: Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime<S>) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.update(runtime);
            self.apply_transition(runtime, transition);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    /// The shared state is the lifecycle log itself.
    type Log = Vec<String>;

    #[derive(Debug)]
    struct TestScreen {
        name: &'static str,
        on_event: Option<ScreenTransition<Log>>,
        on_tick: Option<ScreenTransition<Log>>,
    }

    impl TestScreen {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                on_event: None,
                on_tick: None,
            }
        }

        fn on_event(mut self, transition: ScreenTransition<Log>) -> Self {
            self.on_event = Some(transition);
            self
        }

        fn on_tick(mut self, transition: ScreenTransition<Log>) -> Self {
            self.on_tick = Some(transition);
            self
        }

        fn boxed(self) -> Box<dyn Screen<Log>> {
            Box::new(self)
        }

        fn log(&self, runtime: &mut Runtime<Log>, what: &str) {
            runtime.shared_mut().push(format!("{}: {what}", self.name));
        }
    }

    impl Screen<Log> for TestScreen {
        fn on_active(&mut self, runtime: &mut Runtime<Log>) {
            self.log(runtime, "on_active");
        }

        fn on_inactive(&mut self, runtime: &mut Runtime<Log>) {
            self.log(runtime, "on_inactive");
        }

        fn on_close(&mut self, runtime: &mut Runtime<Log>) {
            self.log(runtime, "on_close");
        }

        fn handle_event(&mut self, runtime: &mut Runtime<Log>, _event: &Event) -> ScreenTransition<Log> {
            self.log(runtime, "handle_event");
            self.on_event.take().unwrap_or(ScreenTransition::Stay)
        }

        fn update(&mut self, runtime: &mut Runtime<Log>) -> ScreenTransition<Log> {
            self.log(runtime, "update");
            self.on_tick.take().unwrap_or(ScreenTransition::Stay)
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key_event() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    fn started(initial: TestScreen) -> (ScreenStack<Log>, Runtime<Log>) {
        let mut stack = ScreenStack::new(initial.boxed());
        let mut runtime = Runtime::new(Log::new());
        stack.init(&mut runtime);
        runtime.shared_mut().clear();
        (stack, runtime)
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let mut stack = ScreenStack::new(TestScreen::new("menu").boxed());
        let mut runtime = Runtime::new(Log::new());
        stack.init(&mut runtime);
        assert_eq!(runtime.shared(), &["menu: on_active"]);
    }

    #[test]
    fn test_push_then_pop_from_event() {
        let (mut stack, mut runtime) = started(TestScreen::new("menu"));
        let game = TestScreen::new("game").on_event(ScreenTransition::Pop);

        stack.apply_transition(&mut runtime, ScreenTransition::Push(game.boxed()));
        stack.handle_event(&mut runtime, key_event());

        assert_eq!(runtime.into_shared(), [
            "menu: on_inactive",
            "game: on_active",
            "game: handle_event",
            "game: on_inactive",
            "game: on_close",
            "menu: on_active",
        ]);
    }

    #[test]
    fn test_replace_from_tick() {
        let game = TestScreen::new("game").on_tick(ScreenTransition::replace(TestScreen::new("over")));
        let (mut stack, mut runtime) = started(TestScreen::new("menu"));
        stack.apply_transition(&mut runtime, ScreenTransition::Push(game.boxed()));
        runtime.shared_mut().clear();

        stack.update(&mut runtime);
        stack.update(&mut runtime);

        assert_eq!(runtime.into_shared(), [
            "game: update",
            "game: on_inactive",
            "game: on_close",
            "over: on_active",
            "over: update",
        ]);
    }

    #[test]
    fn test_exit_closes_every_screen_top_down() {
        let (mut stack, mut runtime) = started(TestScreen::new("menu"));
        stack.apply_transition(&mut runtime, ScreenTransition::push(TestScreen::new("load")));
        runtime.shared_mut().clear();

        stack.apply_transition(&mut runtime, ScreenTransition::Exit);

        assert!(stack.should_exit());
        assert_eq!(runtime.into_shared(), [
            "load: on_inactive",
            "load: on_close",
            "menu: on_inactive",
            "menu: on_close",
        ]);
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let (mut stack, mut runtime) = started(TestScreen::new("menu").on_event(ScreenTransition::Pop));
        assert!(!stack.should_exit());
        stack.handle_event(&mut runtime, key_event());
        assert!(stack.should_exit());
    }

    #[test]
    fn test_only_top_screen_receives_events() {
        let (mut stack, mut runtime) = started(TestScreen::new("menu"));
        stack.apply_transition(&mut runtime, ScreenTransition::push(TestScreen::new("options")));
        runtime.shared_mut().clear();

        stack.handle_event(&mut runtime, key_event());
        stack.apply_transition(&mut runtime, ScreenTransition::Stay);

        assert_eq!(runtime.shared(), &["options: handle_event"]);
    }
}
