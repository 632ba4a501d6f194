//! Simulation clock.
//!
//! Time advances only when the host loop hands over a frame delta, so replays
//! and tests are deterministic. Hit timestamps, projectile lifetimes and the
//! damage flicker all read this clock.

use crate::numeric::seconds_to_millis;

/// Milliseconds elapsed since the level started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameClock {
    now_ms: u64,
}

impl GameClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { now_ms: 0 }
    }

    /// Creates a clock already reading `now_ms`.
    #[must_use]
    pub const fn at(now_ms: u64) -> Self {
        Self { now_ms }
    }

    /// Current reading in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advances the clock by a frame delta given in seconds.
    pub fn advance(&mut self, dt: f32) {
        self.advance_ms(seconds_to_millis(dt));
    }

    /// Advances the clock by whole milliseconds.
    pub const fn advance_ms(&mut self, millis: u64) {
        self.now_ms = self.now_ms.saturating_add(millis);
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    #[must_use]
    pub const fn since(&self, earlier: u64) -> u64 {
        self.now_ms.saturating_sub(earlier)
    }

    /// Phase of the damage flicker oscillator.
    ///
    /// Returns `true` on the non-negative half of a sine sampled at the clock
    /// reading, which flips rapidly and irregularly from frame to frame.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Only the phase matters; precision loss past 2^53 ms is irrelevant."
    )]
    #[must_use]
    pub fn flicker_phase(&self) -> bool {
        (self.now_ms as f64).sin() >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn advances_by_frame_delta() {
        let mut clock = GameClock::new();
        clock.advance(0.25);
        clock.advance(0.25);
        assert_eq!(clock.now_ms(), 500);
        assert_eq!(clock.since(100), 400);
        assert_eq!(clock.since(900), 0);
    }

    #[rstest]
    #[case(0, true)]
    #[case(4, false)]
    #[case(7, true)]
    fn flicker_follows_sine(#[case] at: u64, #[case] expected: bool) {
        assert_eq!(GameClock::at(at).flicker_phase(), expected);
    }
}
