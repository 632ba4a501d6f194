//! Cross-entity collision queries.
//!
//! The broker runs once per tick after every entity has moved. It never
//! removes anything while scanning: consumed projectiles are collected into a
//! [`Removals`] set and dropped in one pass afterwards, so a projectile that
//! touches both a wall and a monster is consumed once.

use hashbrown::HashSet;
use log::debug;

use crate::components::Faction;
use crate::monster::Monster;
use crate::player::Player;
use crate::projectile::Projectile;
use crate::registry::EntityId;
use crate::tick::TickContext;

/// Identifiers marked for removal.
///
/// Marking is idempotent and applying twice removes nothing the second time.
#[derive(Debug, Default, Clone)]
pub struct Removals {
    marked: HashSet<EntityId>,
}

impl Removals {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id`. Returns `false` if it was already marked.
    pub fn mark(&mut self, id: EntityId) -> bool {
        self.marked.insert(id)
    }

    /// Whether `id` is marked.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.marked.contains(&id)
    }

    /// Drops every item of `items` whose identifier is marked. Returns how
    /// many were dropped.
    pub fn apply<T>(&self, items: &mut Vec<T>, id_of: impl Fn(&T) -> EntityId) -> usize {
        let before = items.len();
        items.retain(|item| !self.marked.contains(&id_of(item)));
        before - items.len()
    }
}

/// What a collision pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Projectiles consumed, in detection order.
    pub consumed: Vec<EntityId>,
    /// Monsters whose hit counted.
    pub monsters_hit: Vec<EntityId>,
    /// Whether a hostile projectile's hit on the player counted.
    pub player_hit: bool,
}

/// Which projectile collisions are live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrokerRules {
    /// Whether monster projectiles damage the player.
    pub hostile_projectiles_hit_player: bool,
}

/// Resolves projectile contacts and removes consumed projectiles.
///
/// Obstacles are read from `ctx`. Passes run in order: obstacles, then
/// monsters, then (when enabled) the player. A projectile consumed by an
/// earlier pass takes no part in later ones. Every live monster overlapping a
/// projectile is damaged, whichever side fired it.
pub fn reconcile(
    projectiles: &mut Vec<Projectile>,
    monsters: &mut [Monster],
    player: &mut Player,
    rules: BrokerRules,
    ctx: &mut TickContext<'_>,
) -> CollisionReport {
    let obstacles = ctx.obstacles;
    let mut removals = Removals::new();
    let mut report = CollisionReport::default();

    for projectile in projectiles.iter() {
        if obstacles
            .iter()
            .any(|obstacle| obstacle.hitbox.collides(&projectile.hitbox))
            && removals.mark(projectile.id())
        {
            report.consumed.push(projectile.id());
        }
    }

    for projectile in projectiles.iter() {
        if removals.contains(projectile.id()) {
            continue;
        }
        let mut struck = false;
        for monster in monsters.iter_mut() {
            if monster.is_dead() || !monster.body().hitbox.collides(&projectile.hitbox) {
                continue;
            }
            struck = true;
            if monster.damage(ctx) {
                report.monsters_hit.push(monster.id());
            }
        }
        if struck && removals.mark(projectile.id()) {
            report.consumed.push(projectile.id());
        }
    }

    if rules.hostile_projectiles_hit_player && !player.is_dead() {
        for projectile in projectiles.iter() {
            if removals.contains(projectile.id())
                || projectile.faction != Faction::Monster
                || !player.body().hitbox.collides(&projectile.hitbox)
            {
                continue;
            }
            report.player_hit |= player.damage(ctx);
            if removals.mark(projectile.id()) {
                report.consumed.push(projectile.id());
            }
        }
    }

    let dropped = removals.apply(projectiles, Projectile::id);
    if dropped > 0 {
        debug!("{dropped} projectiles consumed");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct Item(u64);

    const fn id_of(item: &Item) -> EntityId {
        EntityId(item.0)
    }

    #[rstest]
    fn marking_twice_is_harmless() {
        let mut removals = Removals::new();
        assert!(removals.mark(EntityId(2)));
        assert!(!removals.mark(EntityId(2)));
        assert!(removals.contains(EntityId(2)));
        assert!(!removals.contains(EntityId(3)));
    }

    #[rstest]
    fn applying_twice_removes_once() {
        let mut removals = Removals::new();
        removals.mark(EntityId(2));
        removals.mark(EntityId(9));
        let mut items = vec![Item(1), Item(2), Item(3)];
        assert_eq!(removals.apply(&mut items, id_of), 1);
        assert_eq!(removals.apply(&mut items, id_of), 0);
        assert_eq!(items, [Item(1), Item(3)]);
    }
}
