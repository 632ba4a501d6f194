//! Identity registry for simulation objects.
//!
//! The simulation owns one registry and hands out identifiers when it creates
//! monsters and projectiles. Identifiers are never reused within a level, so
//! log lines and deferred-removal sets can refer to objects unambiguously.

use std::fmt;

/// Stable identifier of a spawned object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic identifier source.
#[derive(Debug, Default)]
pub struct IdRegistry {
    issued: u64,
}

impl IdRegistry {
    /// Creates a registry whose first identifier is `#1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issues the next identifier.
    pub const fn issue(&mut self) -> EntityId {
        self.issued = self.issued.wrapping_add(1);
        EntityId(self.issued)
    }

    /// Number of identifiers issued so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }
}
