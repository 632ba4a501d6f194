//! Fluent construction of [`LevelLayout`]s.

use dustbowl::{EntityKind, LevelLayout, MonsterKind, Obstacle, Rect, SpawnPoint};
use glam::Vec2;

/// Obstacle covering `x`, `y`, `w`, `h`.
///
/// # Examples
/// ```
/// use test_utils::wall;
/// assert_eq!(wall(0, 0, 10, 20).hitbox.bottom(), 20);
/// ```
pub const fn wall(x: i32, y: i32, w: i32, h: i32) -> Obstacle {
    Obstacle::new(Rect::new(x, y, w, h))
}

/// Accumulates obstacles and spawns for a test level.
#[derive(Clone, Debug, Default)]
pub struct LevelBuilder {
    layout: LevelLayout,
}

impl LevelBuilder {
    /// Empty level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the player spawn.
    pub fn player(self, x: f32, y: f32) -> Self {
        self.spawn(EntityKind::Player, x, y)
    }

    /// Adds a melee monster.
    pub fn coffin(self, x: f32, y: f32) -> Self {
        self.spawn(EntityKind::Monster(MonsterKind::Coffin), x, y)
    }

    /// Adds a ranged monster.
    pub fn cactus(self, x: f32, y: f32) -> Self {
        self.spawn(EntityKind::Monster(MonsterKind::Cactus), x, y)
    }

    /// Adds an obstacle.
    pub fn obstacle(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.layout.obstacles.push(wall(x, y, w, h));
        self
    }

    fn spawn(mut self, kind: EntityKind, x: f32, y: f32) -> Self {
        self.layout
            .spawns
            .push(SpawnPoint::new(kind, Vec2::new(x, y)));
        self
    }

    /// Finished layout.
    pub fn build(self) -> LevelLayout {
        self.layout
    }
}
