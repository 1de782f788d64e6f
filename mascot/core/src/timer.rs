//! Cancellable Countdown Timers
//!
//! One-shot timer state for the reveal machinery. A [`Countdown`] is armed
//! with a duration and observed by its owner's tick loop; there are no
//! callbacks, so dropping the owner releases every pending timer on every
//! exit path. Cancellation is explicit (`cancel`) or implicit (`Drop`).
//!
//! # Design
//!
//! The timer uses `std::time::Instant` rather than a spawned task, the same
//! approach the avatar animator takes for frame timing. Expiry is consumed
//! with [`Countdown::fire`], which disarms the timer so a one-shot can never
//! be observed twice.

use std::time::{Duration, Instant};

/// A one-shot countdown observed by a tick loop.
///
/// State machine: idle → armed → (fired | cancelled) → idle.
#[derive(Clone, Debug)]
pub struct Countdown {
    /// When the countdown was armed (`None` = idle)
    armed_at: Option<Instant>,
    /// How long after arming the countdown expires
    duration: Duration,
}

impl Countdown {
    /// Create an idle countdown.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            armed_at: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a countdown already armed with `duration`.
    #[must_use]
    pub fn armed(duration: Duration) -> Self {
        Self {
            armed_at: Some(Instant::now()),
            duration,
        }
    }

    /// Arm (or re-arm) the countdown with a new duration.
    ///
    /// Re-arming replaces any pending expiry, so overlapping timers are
    /// impossible by construction.
    pub fn arm(&mut self, duration: Duration) {
        self.armed_at = Some(Instant::now());
        self.duration = duration;
    }

    /// Release the countdown without firing.
    pub fn cancel(&mut self) {
        self.armed_at = None;
    }

    /// Whether the countdown is currently armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Whether the countdown is armed and its duration has elapsed.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.armed_at
            .is_some_and(|armed| armed.elapsed() >= self.duration)
    }

    /// Time left until expiry, or `None` when idle.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.armed_at
            .map(|armed| self.duration.saturating_sub(armed.elapsed()))
    }

    /// Consume an expiry.
    ///
    /// Returns `true` exactly once per arming: the countdown is disarmed as
    /// it fires. Returns `false` while idle or still running.
    pub fn fire(&mut self) -> bool {
        if self.expired() {
            self.armed_at = None;
            true
        } else {
            false
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_idle_never_fires() {
        let mut countdown = Countdown::idle();
        assert!(!countdown.is_armed());
        assert!(!countdown.expired());
        assert!(!countdown.fire());
        assert_eq!(countdown.remaining(), None);
    }

    #[test]
    fn test_fires_after_duration() {
        let mut countdown = Countdown::armed(Duration::from_millis(10));
        assert!(countdown.is_armed());
        assert!(!countdown.fire());

        thread::sleep(Duration::from_millis(15));
        assert!(countdown.expired());
        assert!(countdown.fire());
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut countdown = Countdown::armed(Duration::ZERO);
        assert!(countdown.fire());
        // Disarmed after firing; a second observation sees nothing.
        assert!(!countdown.fire());
        assert!(!countdown.is_armed());
    }

    #[test]
    fn test_cancel_releases_pending_timer() {
        let mut countdown = Countdown::armed(Duration::ZERO);
        countdown.cancel();
        assert!(!countdown.is_armed());
        assert!(!countdown.fire());
    }

    #[test]
    fn test_rearm_replaces_pending_expiry() {
        let mut countdown = Countdown::armed(Duration::ZERO);
        countdown.arm(Duration::from_secs(60));
        assert!(!countdown.fire());
        assert!(countdown.remaining().unwrap() > Duration::from_secs(30));
    }
}
