use std::{io, time::Duration};

use crossterm::event::Event;
use ratatui::Frame;

use super::event_loop::{EventLoop, RenderMode, TuiEvent};

/// An application driven by [`Runtime::run`].
pub trait App<S> {
    /// Called once before the first event.
    fn init(&mut self, runtime: &mut Runtime<S>);

    fn should_exit(&self) -> bool;

    /// Handles key input, resize, and other terminal events.
    fn handle_event(&mut self, runtime: &mut Runtime<S>, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances timed state (called on each tick).
    fn update(&mut self, runtime: &mut Runtime<S>);
}

/// Event loop plus the state shared by every screen of the application.
#[derive(Debug)]
pub struct Runtime<S> {
    events: EventLoop,
    shared: S,
}

impl<S> Runtime<S> {
    #[must_use]
    pub fn new(shared: S) -> Self {
        Self {
            events: EventLoop::new(),
            shared,
        }
    }

    pub fn shared(&self) -> &S {
        &self.shared
    }

    pub fn shared_mut(&mut self) -> &mut S {
        &mut self.shared
    }

    #[cfg(test)]
    pub fn into_shared(self) -> S {
        self.shared
    }

    /// Sets the time between ticks. `None` stops ticking.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs `app` in the terminal until it asks to exit.
    ///
    /// Ticks call [`App::update`]; the next tick deadline is armed only after
    /// `update` returns.
    pub fn run<A>(&mut self, app: &mut A) -> io::Result<()>
    where
        A: App<S>,
    {
        app.init(self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => {
                        app.update(self);
                        self.events.finish_tick();
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(self, event);
                    }
                }
            }
            Ok(())
        })
    }
}
