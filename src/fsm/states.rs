//! State sets for the player and for monsters.

use std::fmt;

use super::machine::MachineState;
use super::trigger::Trigger;

/// Behavioural states of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// Standing still.
    Idle,
    /// Moving under input.
    Walking,
    /// Playing the shooting animation.
    Attacking,
    /// Flashing after a hit.
    Damaged,
    /// Out of health. Terminal.
    Dead,
}

impl PlayerState {
    /// Lower-case state name, also used in animation keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Attacking => "attacking",
            Self::Damaged => "damaged",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl MachineState for PlayerState {
    const INITIAL: Self = Self::Idle;
    const TERMINAL: Self = Self::Dead;
    const ROUTES: &'static [(Trigger, Self)] = &[
        (Trigger::Walk, Self::Walking),
        (Trigger::Idle, Self::Idle),
        (Trigger::Attack, Self::Attacking),
        (Trigger::TakeDamage, Self::Damaged),
        (Trigger::Die, Self::Dead),
    ];
}

/// Behavioural states of a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonsterState {
    /// Waiting, or standing its ground.
    Idle,
    /// Closing in on the player.
    Chasing,
    /// Engaging the player.
    Attacking,
    /// Flashing after a hit.
    Damaged,
    /// Out of health. Terminal.
    Dead,
}

impl MonsterState {
    /// Lower-case state name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Chasing => "chasing",
            Self::Attacking => "attacking",
            Self::Damaged => "damaged",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for MonsterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl MachineState for MonsterState {
    const INITIAL: Self = Self::Idle;
    const TERMINAL: Self = Self::Dead;
    const ROUTES: &'static [(Trigger, Self)] = &[
        (Trigger::Idle, Self::Idle),
        (Trigger::Attack, Self::Attacking),
        (Trigger::Chase, Self::Chasing),
        (Trigger::TakeDamage, Self::Damaged),
        (Trigger::Die, Self::Dead),
    ];
}
