//! Read-only views the external renderer draws from.
//!
//! The simulation never draws. Each tick the renderer asks for
//! [`SpriteView`]s in depth order: sprites lower on screen (greater centre y)
//! are drawn later so they overlap the ones behind them.

use crate::components::{EntityKind, Faction};
use crate::entity::Body;
use crate::geometry::Rect;
use crate::projectile::Projectile;
use crate::registry::EntityId;

/// What a sprite depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    /// An animated entity.
    Entity(EntityKind),
    /// A projectile fired by the given side.
    Projectile(Faction),
}

/// Everything needed to draw one sprite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteView {
    /// Identifier; the player has none.
    pub id: Option<EntityId>,
    /// What to draw.
    pub kind: SpriteKind,
    /// Animation key.
    pub status: String,
    /// Frame slot within the animation.
    pub frame: usize,
    /// Sprite rectangle.
    pub rect: Rect,
    /// Collision rectangle, for debug overlays.
    pub hitbox: Rect,
    /// Draw the hit silhouette instead of the frame.
    pub flash: bool,
}

impl SpriteView {
    /// View of an animated body.
    #[must_use]
    pub fn of_body(id: Option<EntityId>, kind: EntityKind, body: &Body) -> Self {
        Self {
            id,
            kind: SpriteKind::Entity(kind),
            status: body.status_key(),
            frame: body.frame_slot(),
            rect: body.rect,
            hitbox: body.hitbox,
            flash: body.flash,
        }
    }

    /// View of a projectile.
    #[must_use]
    pub fn of_projectile(projectile: &Projectile) -> Self {
        Self {
            id: Some(projectile.id()),
            kind: SpriteKind::Projectile(projectile.faction),
            status: "projectile".to_owned(),
            frame: 0,
            rect: projectile.hitbox,
            hitbox: projectile.hitbox,
            flash: false,
        }
    }
}

/// Sorts `views` back to front by sprite centre y. Ties keep their order.
pub fn depth_sort(views: &mut [SpriteView]) {
    views.sort_by_key(|view| view.rect.center_y());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn view(id: u64, y: i32) -> SpriteView {
        SpriteView {
            id: Some(EntityId(id)),
            kind: SpriteKind::Projectile(Faction::Player),
            status: "projectile".to_owned(),
            frame: 0,
            rect: Rect::new(0, y, 10, 10),
            hitbox: Rect::new(0, y, 10, 10),
            flash: false,
        }
    }

    #[rstest]
    fn sorts_by_centre_y_and_keeps_ties_stable() {
        let mut views = vec![view(1, 50), view(2, 10), view(3, 50), view(4, -5)];
        depth_sort(&mut views);
        let order: Vec<_> = views.iter().filter_map(|v| v.id).map(|id| id.0).collect();
        assert_eq!(order, [4, 2, 1, 3]);
    }
}
