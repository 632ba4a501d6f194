//! Generic wildcard-transition state machine.
//!
//! A machine owns its current state and a table mapping each [`Trigger`] to a
//! destination. The source state never takes part in the lookup: a routed
//! trigger fires from anywhere except the terminal state, which swallows
//! every event. Firing the trigger for the state the machine is already in
//! still runs the exit and enter hooks; callers that want "already there"
//! suppression check [`StateMachine::is`] first.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashMap;
use log::{debug, warn};

use super::trigger::Trigger;

/// A closed set of states for one kind of entity.
pub trait MachineState: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    /// State a fresh machine starts in.
    const INITIAL: Self;
    /// State that accepts no outgoing transitions.
    const TERMINAL: Self;
    /// Wildcard routes: trigger to destination.
    const ROUTES: &'static [(Trigger, Self)];
}

/// Side effects run around a state change.
///
/// Both hooks default to doing nothing. Implementors typically borrow the
/// owning entity's data so the hooks can mutate it while the machine itself
/// is borrowed separately.
pub trait StateHooks<S> {
    /// Runs before leaving `from`.
    fn on_exit(&mut self, from: S) {
        let _ = from;
    }

    /// Runs after entering `to`.
    fn on_enter(&mut self, to: S) {
        let _ = to;
    }
}

/// Hooks that do nothing, for machines driven without an owner.
impl<S> StateHooks<S> for () {}

/// Record of a state change performed by [`StateMachine::trigger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S> {
    /// State left.
    pub from: S,
    /// State entered.
    pub to: S,
    /// Trigger that caused the change.
    pub trigger: Trigger,
}

/// Trigger to destination lookup.
#[derive(Clone, Debug)]
pub struct TransitionTable<S> {
    routes: HashMap<Trigger, S>,
}

impl<S: MachineState> TransitionTable<S> {
    /// Builds the table from `S::ROUTES`.
    #[must_use]
    pub fn for_state() -> Self {
        Self {
            routes: S::ROUTES.iter().copied().collect(),
        }
    }

    /// Destination for `trigger`, if routed.
    #[must_use]
    pub fn destination(&self, trigger: Trigger) -> Option<S> {
        self.routes.get(&trigger).copied()
    }
}

/// Current state plus its transition table.
#[derive(Clone, Debug)]
pub struct StateMachine<S: MachineState> {
    state: S,
    table: TransitionTable<S>,
}

impl<S: MachineState> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MachineState> StateMachine<S> {
    /// Creates a machine in `S::INITIAL`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: S::INITIAL,
            table: TransitionTable::for_state(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> S {
        self.state
    }

    /// Whether the machine is currently in `state`.
    #[must_use]
    pub fn is(&self, state: S) -> bool {
        self.state == state
    }

    /// Whether the machine has reached its terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state == S::TERMINAL
    }

    /// Fires `trigger`.
    ///
    /// Runs `hooks.on_exit(current)`, switches state, then runs
    /// `hooks.on_enter(destination)`. Returns `None` without side effects when
    /// the machine is terminal or the trigger is not routed.
    pub fn trigger<H>(&mut self, trigger: Trigger, hooks: &mut H) -> Option<Transition<S>>
    where
        H: StateHooks<S> + ?Sized,
    {
        if self.is_terminal() {
            return None;
        }
        let Some(to) = self.table.destination(trigger) else {
            debug!("trigger `{trigger}` has no route from {}", self.state);
            return None;
        };
        let from = self.state;
        hooks.on_exit(from);
        self.state = to;
        hooks.on_enter(to);
        Some(Transition { from, to, trigger })
    }

    /// Fires a trigger given by name.
    ///
    /// Unknown names are ignored so newer content can reference triggers an
    /// older machine does not know about.
    pub fn trigger_named<H>(&mut self, name: &str, hooks: &mut H) -> Option<Transition<S>>
    where
        H: StateHooks<S> + ?Sized,
    {
        match name.parse::<Trigger>() {
            Ok(trigger) => self.trigger(trigger, hooks),
            Err(err) => {
                warn!("{err}; ignoring");
                None
            }
        }
    }
}
