//! Staged Reveal
//!
//! The mascot does not appear all at once: the sprite fades in first, then
//! (for the tutor) a short remark, then the speech bubble that hosts the
//! greeting and the chat. This module owns that sequence as an explicit
//! state machine advanced by ticks.
//!
//! # Guarantees
//!
//! - Transitions are forward-only and stop permanently at
//!   [`Stage::BubbleShown`]; no stage is skipped or replayed within one
//!   sequencer lifetime.
//! - Each transition is gated on the prior stage holding: at most one
//!   transition fires per tick, and its countdown is armed only when the
//!   previous stage is entered.
//! - Teardown is [`StageSequencer::cancel`] or `Drop`; either releases the
//!   pending countdown, after which nothing can fire.

mod typewriter;

pub use typewriter::Typewriter;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timer::Countdown;

/// A named point in the mascot's timed reveal sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Nothing visible yet
    Init,
    /// Mascot sprite is visible
    MascotShown,
    /// Remark text is visible (personas with a remark only)
    RemarkShown,
    /// Speech bubble is visible; typewriter and chat may run
    BubbleShown,
}

impl Stage {
    /// Whether this is the terminal stage
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::BubbleShown
    }

    /// The stage that follows this one, or `None` at the end.
    ///
    /// `has_remark` decides whether [`Stage::RemarkShown`] is part of the
    /// sequence at all.
    #[must_use]
    pub fn next(self, has_remark: bool) -> Option<Self> {
        match self {
            Self::Init => Some(Self::MascotShown),
            Self::MascotShown if has_remark => Some(Self::RemarkShown),
            Self::MascotShown | Self::RemarkShown => Some(Self::BubbleShown),
            Self::BubbleShown => None,
        }
    }
}

/// Delays between reveal stages.
///
/// `Default` is the production timing; tests compress it to keep wall-clock
/// time down without changing the machine's semantics.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StageSchedule {
    /// Delay from activation to the mascot appearing
    pub mascot_delay: Duration,
    /// Delay from mascot to remark
    pub remark_delay: Duration,
    /// Delay from the previous stage to the speech bubble
    pub bubble_delay: Duration,
}

impl Default for StageSchedule {
    fn default() -> Self {
        Self {
            mascot_delay: Duration::from_millis(100),
            remark_delay: Duration::from_millis(400),
            bubble_delay: Duration::from_millis(600),
        }
    }
}

impl StageSchedule {
    /// Uniform schedule, useful for tests
    #[must_use]
    pub fn uniform(delay: Duration) -> Self {
        Self {
            mascot_delay: delay,
            remark_delay: delay,
            bubble_delay: delay,
        }
    }

    /// Delay that must elapse before entering `stage`
    #[must_use]
    pub fn delay_into(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Init => Duration::ZERO,
            Stage::MascotShown => self.mascot_delay,
            Stage::RemarkShown => self.remark_delay,
            Stage::BubbleShown => self.bubble_delay,
        }
    }
}

/// Time-driven reveal state machine.
///
/// Created at widget mount, ticked by the driver loop, dropped at unmount.
#[derive(Clone, Debug)]
pub struct StageSequencer {
    /// Current stage
    stage: Stage,
    /// Whether the remark stage is part of this sequence
    has_remark: bool,
    /// Stage delays
    schedule: StageSchedule,
    /// Countdown to the next transition (idle once terminal or cancelled)
    countdown: Countdown,
}

impl StageSequencer {
    /// Create a sequencer and arm the first transition
    #[must_use]
    pub fn new(schedule: StageSchedule, has_remark: bool) -> Self {
        Self {
            stage: Stage::Init,
            has_remark,
            schedule,
            countdown: Countdown::armed(schedule.delay_into(Stage::MascotShown)),
        }
    }

    /// Current stage
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the sequence has reached its terminal stage
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Advance at most one transition if its delay has elapsed.
    ///
    /// Returns the newly entered stage, or `None` when nothing fired.
    pub fn tick(&mut self) -> Option<Stage> {
        if !self.countdown.fire() {
            return None;
        }
        let next = self.stage.next(self.has_remark)?;
        self.stage = next;
        tracing::debug!(stage = ?next, "reveal stage entered");

        // Arm the following transition only now that this stage holds.
        if let Some(after) = next.next(self.has_remark) {
            self.countdown.arm(self.schedule.delay_into(after));
        }
        Some(next)
    }

    /// Release the pending transition timer.
    ///
    /// The sequencer halts permanently at its current stage; no further
    /// transition can fire.
    pub fn cancel(&mut self) {
        self.countdown.cancel();
    }
}
