//! Gameplay constants shared across the simulation.

/// Invulnerability window that follows a registered hit.
///
/// Time values are milliseconds on the [`GameClock`](crate::clock::GameClock);
/// distances are world pixels. Tunables that vary per entity kind live in
/// [`SimulationConfig`](crate::config::SimulationConfig) and default to these.
pub const VULNERABILITY_WINDOW_MS: u64 = 400;
/// Animation frames advanced per second of simulated time.
pub const ANIMATION_RATE: f32 = 7.0;
/// Frame index at which the player's shot leaves the barrel.
pub const PLAYER_SHOT_FRAME: f32 = 2.0;
/// Distance from the player's centre at which bullets spawn.
pub const PLAYER_MUZZLE_OFFSET: f32 = 80.0;
/// Frame index at which a ranged monster releases its projectile.
pub const RANGED_SHOT_FRAME: f32 = 6.0;
/// Distance from a ranged monster's centre at which its projectile spawns.
pub const RANGED_MUZZLE_OFFSET: f32 = 150.0;
/// Player walking speed in pixels per second.
pub const PLAYER_SPEED: f32 = 250.0;
/// Hit points every entity spawns with.
pub const DEFAULT_HEALTH: i32 = 3;
/// Projectile travel speed in pixels per second.
pub const PROJECTILE_SPEED: f32 = 600.0;
/// Time a projectile survives without hitting anything.
pub const PROJECTILE_LIFETIME_MS: u64 = 1000;
/// Edge length of a projectile hitbox.
pub const PROJECTILE_SIZE: i32 = 16;
/// Edge length of an entity sprite when no asset metadata overrides it.
pub const DEFAULT_SPRITE_SIZE: i32 = 128;
/// Band on the normalised y axis inside which a monster faces sideways.
pub const SIDEWAYS_FACING_BAND: f32 = 0.5;
/// Longest frame delta accepted by [`Simulation::tick`](crate::world::Simulation::tick).
///
/// Guards the integrator against a stalled host loop handing over several
/// seconds at once.
pub const MAX_TICK_SECONDS: f32 = 0.25;
