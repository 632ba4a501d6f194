//! Spawn points read from authored entity markers.
//!
//! Markers carry a kind name and a centre. Names are matched exactly as
//! authored (`Player`, `Coffin`, `Cactus`); anything else fails the level
//! load rather than being skipped, so a typo never silently removes an enemy.

use glam::Vec2;
use serde::Deserialize;

use super::MapError;
use crate::components::{EntityKind, MonsterKind};

/// Entity marker as authored in a level file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EntityMarker {
    /// Kind name.
    pub name: String,
    /// Centre x.
    pub x: f32,
    /// Centre y.
    pub y: f32,
}

/// Where an entity of some kind enters the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    /// Kind to create.
    pub kind: EntityKind,
    /// Centre of the new entity.
    pub position: Vec2,
}

impl SpawnPoint {
    /// Spawn point for `kind` at `position`.
    #[must_use]
    pub const fn new(kind: EntityKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

fn kind_named(name: &str) -> Option<EntityKind> {
    match name {
        "Player" => Some(EntityKind::Player),
        "Coffin" => Some(EntityKind::Monster(MonsterKind::Coffin)),
        "Cactus" => Some(EntityKind::Monster(MonsterKind::Cactus)),
        _ => None,
    }
}

impl TryFrom<&EntityMarker> for SpawnPoint {
    type Error = MapError;

    fn try_from(marker: &EntityMarker) -> Result<Self, Self::Error> {
        let kind =
            kind_named(&marker.name).ok_or_else(|| MapError::UnknownEntity(marker.name.clone()))?;
        Ok(Self::new(kind, Vec2::new(marker.x, marker.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn marker(name: &str) -> EntityMarker {
        EntityMarker {
            name: name.to_owned(),
            x: 12.5,
            y: -4.0,
        }
    }

    #[rstest]
    #[case("Player", EntityKind::Player)]
    #[case("Coffin", EntityKind::Monster(MonsterKind::Coffin))]
    #[case("Cactus", EntityKind::Monster(MonsterKind::Cactus))]
    fn known_markers_become_spawns(#[case] name: &str, #[case] kind: EntityKind) {
        let spawn = SpawnPoint::try_from(&marker(name)).expect("known marker");
        assert_eq!(spawn, SpawnPoint::new(kind, Vec2::new(12.5, -4.0)));
    }

    #[rstest]
    #[case("coffin")]
    #[case("Tumbleweed")]
    fn unknown_markers_fail(#[case] name: &str) {
        assert!(matches!(
            SpawnPoint::try_from(&marker(name)),
            Err(MapError::UnknownEntity(found)) if found == name
        ));
    }
}
