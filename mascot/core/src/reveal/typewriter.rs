//! Typewriter Renderer
//!
//! Incremental character-by-character reveal of the greeting string. The
//! typewriter produces the finite sequence: empty string, then each
//! successive one-character-longer prefix, at a fixed interval, terminating
//! at the full greeting. The terminal state is retained, not cleared.
//!
//! Prefixes are taken by `char`, so multi-byte greetings never split a
//! code point.
//!
//! The sequence is not restartable within one activation: [`Typewriter::tick`]
//! only ever moves forward, and only [`Typewriter::activate`] resets the
//! cursor (cancelling any running interval first, so intervals never
//! overlap).

use std::time::Duration;

use crate::timer::Countdown;

/// Incremental reveal of a fixed greeting string
#[derive(Clone, Debug)]
pub struct Typewriter {
    /// The full greeting
    greeting: String,
    /// Total characters in the greeting
    char_count: usize,
    /// Characters revealed so far (0..=char_count)
    cursor: usize,
    /// Currently displayed prefix of the greeting
    shown: String,
    /// Step interval
    interval: Duration,
    /// Countdown to the next character
    ticker: Countdown,
    /// Whether the typewriter is currently activated
    active: bool,
}

impl Typewriter {
    /// Create an inactive typewriter for the given greeting
    #[must_use]
    pub fn new(greeting: impl Into<String>, interval: Duration) -> Self {
        let greeting = greeting.into();
        let char_count = greeting.chars().count();
        Self {
            greeting,
            char_count,
            cursor: 0,
            shown: String::new(),
            interval,
            ticker: Countdown::idle(),
            active: false,
        }
    }

    /// The full greeting string
    #[must_use]
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Currently displayed prefix
    #[must_use]
    pub fn shown(&self) -> &str {
        &self.shown
    }

    /// Characters revealed so far
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the typewriter is activated
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the full greeting is displayed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor == self.char_count
    }

    /// (Re)activate: reset to the empty prefix and start the interval.
    ///
    /// Any running interval is cancelled first; the cursor restarts at zero.
    pub fn activate(&mut self) {
        self.ticker.cancel();
        self.cursor = 0;
        self.shown.clear();
        self.active = true;
        self.ticker.arm(self.interval);
    }

    /// Deactivate: cancel the interval.
    ///
    /// The displayed text is retained; whether it stays visible is the
    /// presentation layer's call.
    pub fn deactivate(&mut self) {
        self.ticker.cancel();
        self.active = false;
    }

    /// Reveal the next character if the interval has elapsed.
    ///
    /// Returns `true` when the displayed prefix grew. Once the greeting is
    /// complete the interval stays released and ticks are no-ops.
    pub fn tick(&mut self) -> bool {
        if !self.active || self.is_complete() {
            return false;
        }
        if !self.ticker.fire() {
            return false;
        }

        if let Some(next) = self.greeting.chars().nth(self.cursor) {
            self.shown.push(next);
            self.cursor += 1;
        }
        if !self.is_complete() {
            self.ticker.arm(self.interval);
        }
        true
    }
}
