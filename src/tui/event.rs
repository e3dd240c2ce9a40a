//! Event handling for TUI.
//!
//! The loop is its own timer: `next` polls the terminal for at most the time
//! left until the next tick deadline and reports `Tick` once it has passed.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for data refresh.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
}

/// Synchronous event source with a fixed tick period.
pub struct EventHandler {
    tick_rate: Duration,
    deadline: Instant,
}

impl EventHandler {
    /// Creates a handler whose first tick fires one period from now.
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            deadline: Instant::now() + tick_rate,
        }
    }

    /// Blocks until a key, a resize or the next tick.
    pub fn next(&mut self) -> io::Result<Event> {
        loop {
            let now = Instant::now();
            if now >= self.deadline {
                self.deadline = next_deadline(self.deadline, now, self.tick_rate);
                return Ok(Event::Tick);
            }

            if event::poll(time_until(self.deadline, now))? {
                match event::read()? {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        return Ok(Event::Key(key));
                    }
                    CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                    _ => {}
                }
            }
        }
    }
}

/// Time left until `deadline`, zero once it has passed.
pub fn time_until(deadline: Instant, now: Instant) -> Duration {
    deadline.saturating_duration_since(now)
}

/// Deadline after the one that just fired.
///
/// Stays on the original cadence; when a slow tick overran one or more whole
/// periods the missed ticks are skipped instead of fired back to back.
pub fn next_deadline(fired: Instant, now: Instant, tick_rate: Duration) -> Instant {
    let mut next = fired + tick_rate;
    if next <= now && !tick_rate.is_zero() {
        let behind = now.duration_since(next).as_nanos() / tick_rate.as_nanos();
        let skip = u32::try_from(behind + 1).unwrap_or(u32::MAX);
        next += tick_rate.saturating_mul(skip);
    }
    next
}
