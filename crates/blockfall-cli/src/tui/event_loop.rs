use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Yields a `Tick` whenever the tick interval elapses, a `Render` whenever the
/// screen is dirty, and crossterm events in between. Without a tick interval
/// only terminal events wake the loop.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with no tick interval.
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval, measured from the last tick.
    ///
    /// Pass `None` to stop tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() {
            // Resuming: start a full interval from now
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Returns the next event.
    ///
    /// Blocks until the next tick is due or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self
                .tick_interval
                .map(|interval| (self.last_tick + interval).saturating_duration_since(now));
            match timeout {
                Some(timeout) if !event::poll(timeout)? => continue,
                _ => {}
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_elapsed_tick_comes_first() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::ZERO));
        assert!(events.next().unwrap().is_tick());
        assert!(events.dirty);
    }

    #[test]
    fn test_set_tick_interval() {
        let mut events = EventLoop::new();
        assert_eq!(events.tick_interval(), None);
        events.set_tick_interval(Some(Duration::from_millis(940)));
        assert_eq!(events.tick_interval(), Some(Duration::from_millis(940)));
        events.set_tick_interval(None);
        assert_eq!(events.tick_interval(), None);
    }
}
