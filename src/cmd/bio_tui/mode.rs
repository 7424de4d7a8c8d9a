//! Input mode state machine
//!
//! normal --g--> g-prefix --any key / timeout / Escape--> normal
//!
//! The prefix timeout is a deadline owned by the machine. Nothing fires on its
//! own: the shell calls [`ModeMachine::tick`] from its poll loop.

use super::state::Mode;
use log::debug;
use std::time::{Duration, Instant};

/// Deadline for leaving g-prefix. Arming always replaces the previous deadline.
#[derive(Debug, Clone, Copy)]
pub struct PrefixTimer {
    timeout: Duration,
    deadline: Option<Instant>,
}

impl PrefixTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.timeout);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Time left before expiry, if armed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

#[derive(Debug, Clone)]
pub struct ModeMachine {
    mode: Mode,
    timer: PrefixTimer,
}

impl ModeMachine {
    pub fn new(prefix_timeout: Duration) -> Self {
        Self {
            mode: Mode::Normal,
            timer: PrefixTimer::new(prefix_timeout),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn enter_prefix(&mut self, now: Instant) {
        self.timer.arm(now);
        self.set(Mode::GPrefix);
    }

    pub fn enter_command(&mut self) {
        self.timer.cancel();
        self.set(Mode::Command);
    }

    pub fn reset(&mut self) {
        self.timer.cancel();
        self.set(Mode::Normal);
    }

    /// Revert to normal if the prefix deadline has passed. Returns true if it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.mode == Mode::GPrefix && self.timer.expired(now) {
            debug!("g-prefix timed out");
            self.reset();
            return true;
        }
        false
    }

    pub fn prefix_remaining(&self, now: Instant) -> Option<Duration> {
        if self.mode == Mode::GPrefix {
            self.timer.remaining(now)
        } else {
            None
        }
    }

    fn set(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(1500);

    #[test]
    fn test_prefix_times_out() {
        let start = Instant::now();
        let mut modes = ModeMachine::new(TIMEOUT);

        modes.enter_prefix(start);
        assert_eq!(modes.mode(), Mode::GPrefix);

        assert!(!modes.tick(start + Duration::from_millis(1499)));
        assert_eq!(modes.mode(), Mode::GPrefix);

        assert!(modes.tick(start + TIMEOUT));
        assert_eq!(modes.mode(), Mode::Normal);
        assert!(modes.prefix_remaining(start + TIMEOUT).is_none());
    }

    #[test]
    fn test_rearming_replaces_deadline() {
        let start = Instant::now();
        let mut modes = ModeMachine::new(TIMEOUT);

        modes.enter_prefix(start);
        modes.enter_prefix(start + Duration::from_millis(1000));

        // the first deadline would have fired here
        assert!(!modes.tick(start + Duration::from_millis(1600)));
        assert_eq!(modes.mode(), Mode::GPrefix);
        assert!(modes.tick(start + Duration::from_millis(2500)));
    }

    #[test]
    fn test_reset_cancels_timer() {
        let start = Instant::now();
        let mut modes = ModeMachine::new(TIMEOUT);

        modes.enter_prefix(start);
        modes.reset();
        assert!(modes.timer.remaining(start).is_none());

        // re-entering normal by other means never gets clobbered by the old deadline
        modes.enter_command();
        assert!(!modes.tick(start + TIMEOUT * 2));
        assert_eq!(modes.mode(), Mode::Command);
    }

    #[test]
    fn test_remaining_counts_down() {
        let start = Instant::now();
        let mut modes = ModeMachine::new(TIMEOUT);
        assert!(modes.prefix_remaining(start).is_none());

        modes.enter_prefix(start);
        assert_eq!(
            modes.prefix_remaining(start + Duration::from_millis(500)),
            Some(Duration::from_millis(1000))
        );
    }
}
