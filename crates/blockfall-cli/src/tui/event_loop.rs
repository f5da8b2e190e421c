use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// Events produced by [`EventLoop::next`].
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick deadline passed.
    Tick,
    /// The screen should be redrawn.
    Render,
    /// Key input, resize, and other terminal events.
    Crossterm(Event),
}

/// When to redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Like `OnDirty`, but at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Single pending tick deadline plus render scheduling.
///
/// The tick deadline is measured from the end of the previous tick's work
/// (see [`Self::finish_tick`]), or from the moment ticking was enabled.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: past_time,
            dirty: true,
        }
    }

    /// Sets the tick interval. `None` disables ticks.
    ///
    /// Enabling ticks after they were disabled arms a full interval from now.
    /// Changing an already running interval keeps the current deadline base.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() && interval.is_some() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Re-arms the tick deadline once the tick's work has completed.
    pub(super) fn finish_tick(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Blocks until the next tick, render, or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.tick_due(now) {
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.render_due(now) {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn tick_due(&self, now: Instant) -> bool {
        self.tick_interval
            .is_some_and(|interval| now.duration_since(self.last_tick) >= interval)
    }

    fn render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_loop() -> EventLoop {
        let mut events = EventLoop::new();
        events.dirty = false;
        events
    }

    #[test]
    fn test_idle_loop_waits_without_timeout() {
        let events = clean_loop();
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }

    #[test]
    fn test_dirty_loop_renders_immediately() {
        let events = EventLoop::new();
        let now = Instant::now();
        assert!(events.render_due(now));
        assert_eq!(events.compute_timeout(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_enabling_ticks_arms_full_interval() {
        let mut events = clean_loop();
        events.last_tick = Instant::now() - Duration::from_secs(10);

        events.set_tick_interval(Some(Duration::from_millis(500)));
        let now = Instant::now();
        assert!(!events.tick_due(now));
        let timeout = events.compute_timeout(now).unwrap();
        assert!(timeout > Duration::from_millis(400));
        assert!(timeout <= Duration::from_millis(500));
    }

    #[test]
    fn test_changing_interval_keeps_deadline_base() {
        let mut events = clean_loop();
        events.set_tick_interval(Some(Duration::from_millis(500)));
        let armed_at = events.last_tick;

        events.set_tick_interval(Some(Duration::from_millis(480)));
        assert_eq!(events.last_tick, armed_at);
    }

    #[test]
    fn test_overdue_tick_is_due() {
        let mut events = clean_loop();
        events.set_tick_interval(Some(Duration::from_millis(20)));
        events.last_tick = Instant::now() - Duration::from_millis(50);
        assert!(events.tick_due(Instant::now()));

        events.finish_tick();
        assert!(!events.tick_due(Instant::now()));
    }

    #[test]
    fn test_disabled_ticks_never_fire() {
        let mut events = clean_loop();
        events.set_tick_interval(Some(Duration::from_millis(1)));
        events.set_tick_interval(None);
        events.last_tick = Instant::now() - Duration::from_secs(1);
        assert!(!events.tick_due(Instant::now()));
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let mut events = EventLoop::new();
        events.set_render_mode(RenderMode::Throttled(Duration::from_secs(60)));
        events.last_render = Instant::now();
        let now = Instant::now();
        assert!(!events.render_due(now));
        assert!(events.compute_timeout(now).unwrap() > Duration::from_secs(50));
    }
}
