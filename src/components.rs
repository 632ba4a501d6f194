//! Small value types shared between entities.
//! Includes facings, display statuses, entity kinds and projectile factions.
use std::fmt;

use glam::Vec2;
use serde::Deserialize;

use crate::constants::SIDEWAYS_FACING_BAND;

/// Cardinal direction an entity is facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Towards negative y.
    Up,
    /// Towards positive y.
    #[default]
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Facing {
    /// Every facing.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Lower-case name used as the animation key prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Unit vector for the facing.
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Facing that best describes a unit `direction`.
    ///
    /// Directions inside the sideways band on the y axis face left or right;
    /// everything else faces up or down. The zero vector has no facing.
    ///
    /// # Examples
    /// ```
    /// use dustbowl::components::Facing;
    /// use glam::Vec2;
    /// assert_eq!(Facing::from_direction(Vec2::new(-0.9, 0.4)), Some(Facing::Left));
    /// assert_eq!(Facing::from_direction(Vec2::new(0.6, -0.8)), Some(Facing::Up));
    /// assert_eq!(Facing::from_direction(Vec2::ZERO), None);
    /// ```
    #[must_use]
    pub const fn from_direction(direction: Vec2) -> Option<Self> {
        if direction.y.abs() < SIDEWAYS_FACING_BAND {
            if direction.x < 0.0 {
                Some(Self::Left)
            } else if direction.x > 0.0 {
                Some(Self::Right)
            } else {
                None
            }
        } else if direction.y < 0.0 {
            Some(Self::Up)
        } else {
            Some(Self::Down)
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a facing entity is doing, for animation selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pose {
    /// `<facing>_idle`.
    Idle,
    /// `<facing>_walking`.
    Walking,
    /// `<facing>_attacking`.
    Attacking,
    /// Bare `<facing>`: the monster movement cycle.
    Moving,
}

/// Display status of an entity.
///
/// The facing is stored alongside on the entity so it survives the
/// facing-less statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Facing-qualified pose.
    Posed(Pose),
    /// Terminal collapse animation.
    Dead,
}

impl Default for Status {
    fn default() -> Self {
        Self::Posed(Pose::Idle)
    }
}

impl Status {
    /// Animation key for this status under `facing`, e.g. `"left_attacking"`.
    ///
    /// # Examples
    /// ```
    /// use dustbowl::components::{Facing, Pose, Status};
    /// assert_eq!(Status::Posed(Pose::Attacking).key(Facing::Left), "left_attacking");
    /// assert_eq!(Status::Posed(Pose::Moving).key(Facing::Up), "up");
    /// assert_eq!(Status::Dead.key(Facing::Right), "dead");
    /// ```
    #[must_use]
    pub fn key(self, facing: Facing) -> String {
        match self {
            Self::Posed(Pose::Idle) => format!("{facing}_idle"),
            Self::Posed(Pose::Walking) => format!("{facing}_walking"),
            Self::Posed(Pose::Attacking) => format!("{facing}_attacking"),
            Self::Posed(Pose::Moving) => facing.name().to_owned(),
            Self::Dead => "dead".to_owned(),
        }
    }
}

/// Kind of monster, selecting its tuning and attack capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum MonsterKind {
    /// Melee brawler that interrupts the player at close range.
    Coffin,
    /// Stationary-ish shooter that fires from long range.
    Cactus,
}

impl MonsterKind {
    /// Name used in logs, level files and asset directories.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Coffin => "coffin",
            Self::Cactus => "cactus",
        }
    }
}

impl fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coffin => f.write_str("Coffin"),
            Self::Cactus => f.write_str("Cactus"),
        }
    }
}

/// Kind of animated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The single player character.
    Player,
    /// A monster of the given kind.
    Monster(MonsterKind),
}

impl EntityKind {
    /// Asset directory name for the kind.
    #[must_use]
    pub const fn asset_dir(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Monster(kind) => kind.name(),
        }
    }

    /// Every animation key an entity of this kind can ever display.
    #[must_use]
    pub fn reachable_keys(self) -> Vec<String> {
        let poses: &[Status] = match self {
            Self::Player => &[
                Status::Posed(Pose::Idle),
                Status::Posed(Pose::Walking),
                Status::Posed(Pose::Attacking),
            ],
            Self::Monster(_) => &[
                Status::Posed(Pose::Moving),
                Status::Posed(Pose::Idle),
                Status::Posed(Pose::Attacking),
            ],
        };
        let mut keys: Vec<String> = Facing::ALL
            .into_iter()
            .flat_map(|facing| poses.iter().map(move |status| status.key(facing)))
            .collect();
        if self == Self::Player {
            keys.push(Status::Dead.key(Facing::default()));
        }
        keys
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("Player"),
            Self::Monster(kind) => kind.fmt(f),
        }
    }
}

/// Side that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Fired by the player.
    Player,
    /// Fired by a monster.
    Monster,
}
