//! Trigger vocabulary shared by every state machine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Named event presented to a [`StateMachine`](super::StateMachine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Start walking (player).
    Walk,
    /// Return to rest.
    Idle,
    /// Begin an attack cycle.
    Attack,
    /// Pursue the target (monster).
    Chase,
    /// Register a hit.
    TakeDamage,
    /// Enter the terminal state.
    Die,
}

impl Trigger {
    /// Every trigger, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Walk,
        Self::Idle,
        Self::Attack,
        Self::Chase,
        Self::TakeDamage,
        Self::Die,
    ];

    /// The trigger's wire name, e.g. `"take_damage"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Idle => "idle",
            Self::Attack => "attack",
            Self::Chase => "chase",
            Self::TakeDamage => "take_damage",
            Self::Die => "die",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A trigger name that no machine understands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trigger `{0}`")]
pub struct UnknownTrigger(pub String);

impl FromStr for Trigger {
    type Err = UnknownTrigger;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.name() == name)
            .ok_or_else(|| UnknownTrigger(name.to_owned()))
    }
}
