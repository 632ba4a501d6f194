//! Per-tick input snapshots.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::components::Facing;

/// Actions the player can hold down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk right.
    Right,
    /// Walk left.
    Left,
    /// Walk up.
    Up,
    /// Walk down.
    Down,
    /// Fire.
    Attack,
}

impl Action {
    /// Directional actions in scan order; a later held action overrides an
    /// earlier one.
    pub const DIRECTIONS: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    const fn bit(self) -> u8 {
        match self {
            Self::Right => 1,
            Self::Left => 1 << 1,
            Self::Up => 1 << 2,
            Self::Down => 1 << 3,
            Self::Attack => 1 << 4,
        }
    }

    /// Facing a directional action turns the player towards.
    #[must_use]
    pub const fn facing(self) -> Option<Facing> {
        match self {
            Self::Right => Some(Facing::Right),
            Self::Left => Some(Facing::Left),
            Self::Up => Some(Facing::Up),
            Self::Down => Some(Facing::Down),
            Self::Attack => None,
        }
    }

    /// Lower-case action name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
            Self::Attack => "attack",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An action name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [Self::Right, Self::Left, Self::Up, Self::Down, Self::Attack]
            .into_iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| UnknownAction(name.to_owned()))
    }
}

/// Answers "is this action held right now".
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// Whether `action` is currently held.
    fn is_held(&self, action: Action) -> bool;

    /// Whether any directional action is held.
    fn any_direction(&self) -> bool {
        Action::DIRECTIONS
            .into_iter()
            .any(|action| self.is_held(action))
    }
}

/// Immutable set of held actions.
///
/// # Examples
/// ```
/// use dustbowl::input::{Action, InputSnapshot, InputSource};
/// let input = InputSnapshot::holding(&[Action::Left, Action::Attack]);
/// assert!(input.is_held(Action::Left));
/// assert!(!input.is_held(Action::Up));
/// assert!(input.any_direction());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: u8,
}

impl InputSnapshot {
    /// Nothing held.
    #[must_use]
    pub const fn none() -> Self {
        Self { held: 0 }
    }

    /// Snapshot holding every action in `actions`.
    #[must_use]
    pub fn holding(actions: &[Action]) -> Self {
        actions
            .iter()
            .fold(Self::none(), |snapshot, action| snapshot.with(*action))
    }

    /// Copy of the snapshot with `action` held as well.
    #[must_use]
    pub const fn with(self, action: Action) -> Self {
        Self {
            held: self.held | action.bit(),
        }
    }
}

impl InputSource for InputSnapshot {
    fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }
}
