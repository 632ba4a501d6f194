//! Distance bands that turn the player's relative position into intent.
//!
//! Three concentric radii split the plane around a monster:
//!
//! - inside `attack`: stand still and engage;
//! - from `attack` up to `walk`: chase;
//! - beyond `walk`: stand still;
//!
//! and independently, inside `notice` the monster turns to face the player.

use glam::Vec2;

use crate::components::Facing;
use crate::config::MonsterProfile;
use crate::vector_math::distance_and_direction;

/// Awareness radii of a monster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Radii {
    /// Facing threshold.
    pub notice: f32,
    /// Pursuit threshold.
    pub walk: f32,
    /// Engagement threshold.
    pub attack: f32,
}

impl Radii {
    /// Radii of `profile`.
    #[must_use]
    pub const fn from_profile(profile: &MonsterProfile) -> Self {
        Self {
            notice: profile.notice_radius,
            walk: profile.walk_radius,
            attack: profile.attack_radius,
        }
    }

    /// Whether the player is close enough to be noticed.
    #[must_use]
    pub const fn notices(self, distance: f32) -> bool {
        distance < self.notice
    }

    /// Whether the player is inside the pursuit band.
    #[must_use]
    pub const fn pursues(self, distance: f32) -> bool {
        self.attack <= distance && distance < self.walk
    }

    /// Whether the player is inside attack range.
    #[must_use]
    pub const fn strikes(self, distance: f32) -> bool {
        distance < self.attack
    }
}

/// Where the player is relative to a monster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sensing {
    /// Distance between centres.
    pub distance: f32,
    /// Unit vector towards the player, or zero when the centres coincide.
    pub direction: Vec2,
}

impl Sensing {
    /// Measures from `monster` to `player`.
    #[must_use]
    pub fn between(monster: Vec2, player: Vec2) -> Self {
        let (distance, direction) = distance_and_direction(monster, player);
        Self {
            distance,
            direction,
        }
    }
}

/// What the monster does with its legs this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pursuit {
    /// Move along the given unit direction.
    Chase(Vec2),
    /// Stand still.
    Hold,
}

/// Decides movement from the pursuit band.
///
/// # Examples
/// ```
/// use dustbowl::monster::{pursuit, Pursuit, Radii, Sensing};
/// use glam::Vec2;
/// let radii = Radii { notice: 550.0, walk: 400.0, attack: 50.0 };
/// let near = Sensing::between(Vec2::ZERO, Vec2::new(30.0, 0.0));
/// let mid = Sensing::between(Vec2::ZERO, Vec2::new(300.0, 0.0));
/// assert_eq!(pursuit(radii, near), Pursuit::Hold);
/// assert_eq!(pursuit(radii, mid), Pursuit::Chase(Vec2::X));
/// ```
#[must_use]
pub const fn pursuit(radii: Radii, sensing: Sensing) -> Pursuit {
    if radii.pursues(sensing.distance) {
        Pursuit::Chase(sensing.direction)
    } else {
        Pursuit::Hold
    }
}

/// Facing to adopt, if the player has been noticed.
#[must_use]
pub const fn noticed_facing(radii: Radii, sensing: Sensing) -> Option<Facing> {
    if radii.notices(sensing.distance) {
        Facing::from_direction(sensing.direction)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn radii() -> Radii {
        Radii {
            notice: 550.0,
            walk: 400.0,
            attack: 50.0,
        }
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(49.9, false)]
    #[case(50.0, true)]
    #[case(300.0, true)]
    #[case(399.9, true)]
    #[case(400.0, false)]
    #[case(900.0, false)]
    fn pursuit_band_is_half_open(radii: Radii, #[case] distance: f32, #[case] chases: bool) {
        let sensing = Sensing::between(Vec2::ZERO, Vec2::new(distance, 0.0));
        match pursuit(radii, sensing) {
            Pursuit::Chase(direction) => {
                assert!(chases, "chased at {distance}");
                assert_relative_eq!(direction.x, 1.0, epsilon = 1e-6);
                assert_relative_eq!(direction.y, 0.0);
            }
            Pursuit::Hold => assert!(!chases, "held at {distance}"),
        }
    }

    #[rstest]
    fn coincident_centres_have_no_direction() {
        let sensing = Sensing::between(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert_relative_eq!(sensing.distance, 0.0);
        assert_eq!(sensing.direction, Vec2::ZERO);
    }

    #[rstest]
    #[case(Vec2::new(-200.0, 10.0), Some(Facing::Left))]
    #[case(Vec2::new(0.0, 500.0), Some(Facing::Down))]
    #[case(Vec2::new(0.0, 600.0), None)]
    fn faces_only_once_noticed(
        radii: Radii,
        #[case] player: Vec2,
        #[case] expected: Option<Facing>,
    ) {
        let sensing = Sensing::between(Vec2::ZERO, player);
        assert_eq!(noticed_facing(radii, sensing), expected);
    }

    #[rstest]
    fn strike_range_excludes_its_edge(radii: Radii) {
        assert!(radii.strikes(49.0));
        assert!(!radii.strikes(50.0));
    }
}
