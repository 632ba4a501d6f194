//! Owned stand-ins for the sinks a [`TickContext`] borrows.
//!
//! Entity-level tests drive a player or monster directly without a
//! [`dustbowl::Simulation`]; the harness keeps the clock, the audio log and
//! the queued projectile requests between ticks.

use dustbowl::config::CombatRules;
use dustbowl::tick::TickContext;
use dustbowl::{CueLog, GameClock, Obstacle, ProjectileRequest};

/// Clock plus recording sinks.
#[derive(Clone, Debug, Default)]
pub struct TickHarness {
    /// Current clock reading.
    pub clock: GameClock,
    /// Combat timing handed to every context.
    pub rules: CombatRules,
    /// Cues played so far.
    pub audio: CueLog,
    /// Projectile requests raised so far.
    pub shots: Vec<ProjectileRequest>,
    /// Static geometry.
    pub obstacles: Vec<Obstacle>,
}

impl TickHarness {
    /// Harness with no obstacles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Harness whose entities collide with `obstacles`.
    pub fn with_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self {
            obstacles,
            ..Self::default()
        }
    }

    /// Advances the clock by `dt` and returns the context for that tick.
    pub fn step(&mut self, dt: f32) -> TickContext<'_> {
        self.clock.advance(dt);
        self.context(dt)
    }

    /// Context for the current clock reading without advancing it.
    pub fn context(&mut self, dt: f32) -> TickContext<'_> {
        TickContext::new(
            self.clock,
            dt,
            self.rules,
            &self.obstacles,
            &mut self.audio,
            &mut self.shots,
        )
    }
}
