//! Per-tick context handed to every entity update.

use crate::audio::AudioOutput;
use crate::clock::GameClock;
use crate::config::CombatRules;
use crate::movement::Obstacle;
use crate::projectile::ProjectileSpawner;

/// Everything an entity may read or call out to during one tick.
///
/// The context borrows the level geometry immutably and the external sinks
/// mutably; entities never reach into simulation collections through it.
pub struct TickContext<'w> {
    /// Clock reading for this tick.
    pub clock: GameClock,
    /// Frame delta in seconds.
    pub dt: f32,
    /// Shared combat timing rules.
    pub rules: CombatRules,
    /// Static level geometry.
    pub obstacles: &'w [Obstacle],
    /// Audio sink.
    pub audio: &'w mut dyn AudioOutput,
    /// Receives projectile spawn requests.
    pub spawner: &'w mut dyn ProjectileSpawner,
}

impl<'w> TickContext<'w> {
    /// Bundles the pieces of a tick.
    pub const fn new(
        clock: GameClock,
        dt: f32,
        rules: CombatRules,
        obstacles: &'w [Obstacle],
        audio: &'w mut dyn AudioOutput,
        spawner: &'w mut dyn ProjectileSpawner,
    ) -> Self {
        Self {
            clock,
            dt,
            rules,
            obstacles,
            audio,
            spawner,
        }
    }

    /// Clock reading in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}
