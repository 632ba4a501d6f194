//! Finite-state machines driving player and monster behaviour.
//!
//! The engine is generic over a [`MachineState`] set. Each state set declares
//! its wildcard routes and terminal state; the entity that owns a machine
//! supplies [`StateHooks`] when it fires a trigger.

mod machine;
mod states;
mod trigger;

pub use machine::{MachineState, StateHooks, StateMachine, Transition, TransitionTable};
pub use states::{MonsterState, PlayerState};
pub use trigger::{Trigger, UnknownTrigger};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl<S: MachineState> StateHooks<S> for Recorder {
        fn on_exit(&mut self, from: S) {
            self.calls.push(format!("exit {from}"));
        }

        fn on_enter(&mut self, to: S) {
            self.calls.push(format!("enter {to}"));
        }
    }

    #[rstest]
    fn starts_idle() {
        assert_eq!(StateMachine::<PlayerState>::new().state(), PlayerState::Idle);
        assert_eq!(
            StateMachine::<MonsterState>::new().state(),
            MonsterState::Idle
        );
    }

    #[rstest]
    #[case(Trigger::Walk, PlayerState::Walking)]
    #[case(Trigger::Idle, PlayerState::Idle)]
    #[case(Trigger::Attack, PlayerState::Attacking)]
    #[case(Trigger::TakeDamage, PlayerState::Damaged)]
    #[case(Trigger::Die, PlayerState::Dead)]
    fn player_routes_ignore_source(#[case] trigger: Trigger, #[case] expected: PlayerState) {
        for setup in [Trigger::Idle, Trigger::Walk, Trigger::Attack, Trigger::TakeDamage] {
            let mut machine = StateMachine::<PlayerState>::new();
            machine.trigger(setup, &mut ());
            machine.trigger(trigger, &mut ());
            assert_eq!(machine.state(), expected, "from {setup}");
        }
    }

    #[rstest]
    #[case(Trigger::Chase, MonsterState::Chasing)]
    #[case(Trigger::Attack, MonsterState::Attacking)]
    #[case(Trigger::Idle, MonsterState::Idle)]
    #[case(Trigger::TakeDamage, MonsterState::Damaged)]
    #[case(Trigger::Die, MonsterState::Dead)]
    fn monster_routes(#[case] trigger: Trigger, #[case] expected: MonsterState) {
        let mut machine = StateMachine::<MonsterState>::new();
        machine.trigger(Trigger::Chase, &mut ());
        machine.trigger(trigger, &mut ());
        assert_eq!(machine.state(), expected);
    }

    #[rstest]
    fn hooks_run_exit_then_enter() {
        let mut machine = StateMachine::<PlayerState>::new();
        let mut recorder = Recorder::default();
        let transition = machine.trigger(Trigger::Walk, &mut recorder);
        assert_eq!(
            transition,
            Some(Transition {
                from: PlayerState::Idle,
                to: PlayerState::Walking,
                trigger: Trigger::Walk,
            })
        );
        assert_eq!(recorder.calls, ["exit idle", "enter walking"]);
    }

    #[rstest]
    fn re_entering_same_state_runs_hooks() {
        let mut machine = StateMachine::<MonsterState>::new();
        let mut recorder = Recorder::default();
        machine.trigger(Trigger::TakeDamage, &mut recorder);
        machine.trigger(Trigger::TakeDamage, &mut recorder);
        assert_eq!(
            recorder.calls,
            [
                "exit idle",
                "enter damaged",
                "exit damaged",
                "enter damaged"
            ]
        );
    }

    #[rstest]
    fn dead_swallows_every_trigger() {
        let mut machine = StateMachine::<PlayerState>::new();
        machine.trigger(Trigger::Die, &mut ());
        let mut recorder = Recorder::default();
        for trigger in Trigger::ALL {
            assert_eq!(machine.trigger(trigger, &mut recorder), None);
            assert!(machine.is_terminal());
        }
        assert!(recorder.calls.is_empty());
    }

    #[rstest]
    #[case(StateMachine::<PlayerState>::new(), "chase")]
    #[case(StateMachine::<PlayerState>::new(), "moonwalk")]
    fn unrouted_or_unknown_triggers_are_no_ops(
        #[case] mut machine: StateMachine<PlayerState>,
        #[case] name: &str,
    ) {
        let mut recorder = Recorder::default();
        assert_eq!(machine.trigger_named(name, &mut recorder), None);
        assert_eq!(machine.state(), PlayerState::Idle);
        assert!(recorder.calls.is_empty());
    }

    #[rstest]
    fn monsters_cannot_walk() {
        let mut machine = StateMachine::<MonsterState>::new();
        assert_eq!(machine.trigger(Trigger::Walk, &mut ()), None);
        assert_eq!(machine.state(), MonsterState::Idle);
    }
}
