//! Projectiles and the spawn port entities fire them through.

use glam::{IVec2, Vec2};
use log::trace;

use crate::clock::GameClock;
use crate::components::Faction;
use crate::config::ProjectileTuning;
use crate::geometry::Rect;
use crate::numeric::round_to_pixel;
use crate::registry::EntityId;
use crate::vector_math::normalize_or_zero;

/// Request to register a new projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileRequest {
    /// Spawn point (centre of the projectile).
    pub position: Vec2,
    /// Flight direction.
    pub direction: Vec2,
    /// Side that fired it.
    pub faction: Faction,
}

/// Receives projectile spawn requests during a tick.
///
/// The simulation registers queued requests after every entity has updated,
/// so a projectile never collides in the tick before it exists.
pub trait ProjectileSpawner {
    /// Queues `request`.
    fn spawn(&mut self, request: ProjectileRequest);
}

impl ProjectileSpawner for Vec<ProjectileRequest> {
    fn spawn(&mut self, request: ProjectileRequest) {
        self.push(request);
    }
}

/// A projectile in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    id: EntityId,
    /// Float position of the centre.
    pub position: Vec2,
    /// Unit flight direction, or zero for a dud.
    pub direction: Vec2,
    /// Pixels per second.
    pub speed: f32,
    /// Collision rectangle centred on `position`.
    pub hitbox: Rect,
    /// Side that fired it.
    pub faction: Faction,
    spawned_at: u64,
    lifetime_ms: u64,
}

impl Projectile {
    /// Creates a projectile from a queued request.
    #[must_use]
    pub fn launch(
        id: EntityId,
        request: ProjectileRequest,
        tuning: ProjectileTuning,
        clock: GameClock,
    ) -> Self {
        let center = IVec2::new(
            round_to_pixel(request.position.x),
            round_to_pixel(request.position.y),
        );
        Self {
            id,
            position: request.position,
            direction: normalize_or_zero(request.direction),
            speed: tuning.speed,
            hitbox: Rect::centered(center, tuning.size, tuning.size),
            faction: request.faction,
            spawned_at: clock.now_ms(),
            lifetime_ms: tuning.lifetime_ms,
        }
    }

    /// Identifier issued at launch.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Advances along the flight direction. Projectiles ignore walls here;
    /// the collision broker consumes them on contact.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
        self.hitbox.set_center(IVec2::new(
            round_to_pixel(self.position.x),
            round_to_pixel(self.position.y),
        ));
        trace!("projectile {} at {:?}", self.id, self.position);
    }

    /// Whether the projectile has outlived its lifetime.
    #[must_use]
    pub const fn is_expired(&self, clock: GameClock) -> bool {
        clock.since(self.spawned_at) >= self.lifetime_ms
    }
}
