//! The player-controlled gunslinger.
//!
//! Input is only read while the player is neither attacking nor dead. An
//! attack plays through the attacking clip once, firing exactly one
//! projectile when the cursor first reaches the shot frame, then drops back
//! to idle when the clip wraps.

use std::sync::Arc;

use glam::{IVec2, Vec2};
use log::{debug, info};

use crate::assets::AnimationSet;
use crate::audio::AudioCue;
use crate::components::{Facing, Faction, Pose, Status};
use crate::config::PlayerTuning;
use crate::entity::{Body, BodySpec};
use crate::fsm::{PlayerState, StateHooks, StateMachine, Transition, Trigger};
use crate::input::{Action, InputSource};
use crate::projectile::ProjectileRequest;
use crate::tick::TickContext;

/// Side effects of player state changes.
struct PlayerHooks<'a, 'w> {
    body: &'a mut Body,
    ctx: &'a mut TickContext<'w>,
}

impl StateHooks<PlayerState> for PlayerHooks<'_, '_> {
    fn on_exit(&mut self, from: PlayerState) {
        if matches!(from, PlayerState::Idle | PlayerState::Walking) {
            self.body.direction = Vec2::ZERO;
        }
        debug!("Player is leaving {from} state");
    }

    fn on_enter(&mut self, to: PlayerState) {
        if to == PlayerState::Damaged {
            self.body.damage(self.ctx.now_ms(), &mut *self.ctx.audio);
        }
        debug!("Player has entered {to} state");
    }
}

/// The player entity.
#[derive(Clone, Debug)]
pub struct Player {
    body: Body,
    machine: StateMachine<PlayerState>,
    bullet_direction: Vec2,
    shot_fired: bool,
    tuning: PlayerTuning,
}

impl Player {
    /// Creates a player centred on `spawn`.
    #[must_use]
    pub fn new(spawn: Vec2, tuning: PlayerTuning, animations: Arc<AnimationSet>) -> Self {
        let body = Body::new(BodySpec {
            spawn,
            sprite_size: IVec2::splat(tuning.sprite_size),
            speed: tuning.speed,
            health: tuning.health,
            despawn_on_death: false,
            animations,
        });
        info!("Player spawned at {spawn}");
        Self {
            body,
            machine: StateMachine::new(),
            bullet_direction: Facing::default().unit(),
            shot_fired: false,
            tuning,
        }
    }

    /// Shared entity data.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable shared entity data.
    pub const fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Current behavioural state.
    #[must_use]
    pub const fn state(&self) -> PlayerState {
        self.machine.state()
    }

    /// Whether the player is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.machine.is(PlayerState::Dead)
    }

    /// Whether the player is mid-attack.
    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.machine.is(PlayerState::Attacking)
    }

    /// Whether a projectile has already left the barrel this attack cycle.
    #[must_use]
    pub const fn shot_fired(&self) -> bool {
        self.shot_fired
    }

    /// Direction fixed for the current attack cycle.
    #[must_use]
    pub const fn bullet_direction(&self) -> Vec2 {
        self.bullet_direction
    }

    /// Fires `trigger` with the player's hooks.
    pub fn fire(
        &mut self,
        trigger: Trigger,
        ctx: &mut TickContext<'_>,
    ) -> Option<Transition<PlayerState>> {
        let mut hooks = PlayerHooks {
            body: &mut self.body,
            ctx,
        };
        self.machine.trigger(trigger, &mut hooks)
    }

    /// A monster struck the player in melee.
    pub fn take_hit(&mut self, ctx: &mut TickContext<'_>) {
        self.fire(Trigger::TakeDamage, ctx);
    }

    /// A monster forced the player into its attack stance.
    pub fn interrupt(&mut self, ctx: &mut TickContext<'_>) {
        self.fire(Trigger::Attack, ctx);
    }

    /// A projectile hit the player. Returns whether the hit counted.
    pub fn damage(&mut self, ctx: &mut TickContext<'_>) -> bool {
        self.body.damage(ctx.now_ms(), &mut *ctx.audio)
    }

    /// Runs one tick: input, status, movement, animation, then health.
    pub fn update(&mut self, input: &dyn InputSource, ctx: &mut TickContext<'_>) {
        if !self.is_attacking() && !self.is_dead() {
            self.handle_input(input, ctx);
        }
        self.refresh_status();
        self.body.integrate(ctx.dt, ctx.obstacles);
        self.animate(ctx);
        self.blink(ctx);
        self.check_death(ctx);
        self.vulnerability_timer(ctx);
    }

    fn handle_input(&mut self, input: &dyn InputSource, ctx: &mut TickContext<'_>) {
        for action in Action::DIRECTIONS {
            let Some(facing) = action.facing().filter(|_| input.is_held(action)) else {
                continue;
            };
            if !self.machine.is(PlayerState::Walking) {
                self.fire(Trigger::Walk, ctx);
            }
            self.body.facing = facing;
            self.body.direction = facing.unit();
        }
        if self.machine.is(PlayerState::Walking) && !input.any_direction() {
            self.fire(Trigger::Idle, ctx);
        }
        if input.is_held(Action::Attack) {
            self.body.direction = Vec2::ZERO;
            self.body.frame_index = 0.0;
            self.shot_fired = false;
            self.fire(Trigger::Attack, ctx);
            self.bullet_direction = self.body.facing.unit();
        }
    }

    /// Derives the display status from the state. Frozen while damaged.
    const fn refresh_status(&mut self) {
        self.body.status = match self.machine.state() {
            PlayerState::Idle => Status::Posed(Pose::Idle),
            PlayerState::Walking => Status::Posed(Pose::Walking),
            PlayerState::Attacking => Status::Posed(Pose::Attacking),
            PlayerState::Dead => Status::Dead,
            PlayerState::Damaged => return,
        };
    }

    fn animate(&mut self, ctx: &mut TickContext<'_>) {
        self.body.advance_frame(ctx.dt, ctx.rules.animation_rate);
        self.release_shot(ctx);
        if self.is_dead() {
            self.body.freeze_on_last_frame();
        } else if self.body.clip_finished() {
            self.body.frame_index = 0.0;
            if self.is_attacking() {
                self.fire(Trigger::Idle, ctx);
            }
        }
    }

    fn release_shot(&mut self, ctx: &mut TickContext<'_>) {
        if !self.is_attacking()
            || self.shot_fired
            || self.body.frame_index < self.tuning.shot_frame
        {
            return;
        }
        let position = self.body.center() + self.bullet_direction * self.tuning.muzzle_offset;
        ctx.spawner.spawn(ProjectileRequest {
            position,
            direction: self.bullet_direction,
            faction: Faction::Player,
        });
        ctx.audio.play(AudioCue::Shot);
        self.shot_fired = true;
        debug!("Player fired towards {}", self.bullet_direction);
    }

    fn blink(&mut self, ctx: &mut TickContext<'_>) {
        if self.body.flicker(ctx.clock) && !self.machine.is(PlayerState::Damaged) {
            self.fire(Trigger::TakeDamage, ctx);
        }
    }

    /// Triggers `die` once health has run out.
    pub fn check_death(&mut self, ctx: &mut TickContext<'_>) {
        if self.body.is_spent() && !self.is_dead() {
            self.fire(Trigger::Die, ctx);
            info!("Player died");
        }
    }

    fn vulnerability_timer(&mut self, ctx: &mut TickContext<'_>) {
        let restored = self
            .body
            .restore_vulnerability(ctx.clock, ctx.rules.vulnerability_window_ms);
        if restored && self.machine.is(PlayerState::Damaged) {
            self.fire(Trigger::Idle, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCue, CueLog, MockAudioOutput};
    use crate::clock::GameClock;
    use crate::components::EntityKind;
    use crate::config::CombatRules;
    use crate::input::{InputSnapshot, MockInputSource};
    use rstest::{fixture, rstest};

    #[fixture]
    fn player() -> Player {
        Player::new(
            Vec2::new(400.0, 300.0),
            PlayerTuning::default(),
            Arc::new(AnimationSet::uniform(EntityKind::Player, 4)),
        )
    }

    fn tick(
        player: &mut Player,
        input: &dyn InputSource,
        now: u64,
        dt: f32,
        audio: &mut CueLog,
    ) -> Vec<ProjectileRequest> {
        let mut spawned: Vec<ProjectileRequest> = Vec::new();
        let rules = CombatRules::default();
        let mut ctx = TickContext::new(GameClock::at(now), dt, rules, &[], audio, &mut spawned);
        player.update(input, &mut ctx);
        spawned
    }

    #[rstest]
    fn walks_on_the_first_tick_a_key_is_held(mut player: Player) {
        let mut audio = CueLog::default();
        let left = InputSnapshot::holding(&[Action::Left]);
        tick(&mut player, &left, 16, 0.1, &mut audio);
        assert_eq!(player.state(), PlayerState::Walking);
        assert_eq!(player.body().facing, Facing::Left);
        assert_eq!(player.body().status_key(), "left_walking");
        assert!(player.body().position.x < 400.0);
    }

    #[rstest]
    fn last_held_direction_wins(mut player: Player) {
        let mut audio = CueLog::default();
        let input = InputSnapshot::holding(&[Action::Right, Action::Up, Action::Left]);
        tick(&mut player, &input, 16, 0.016, &mut audio);
        assert_eq!(player.body().facing, Facing::Up);
        assert_eq!(player.body().direction, Vec2::NEG_Y);
    }

    #[rstest]
    fn releasing_keys_returns_to_idle(mut player: Player) {
        let mut audio = CueLog::default();
        let down = InputSnapshot::holding(&[Action::Down]);
        tick(&mut player, &down, 16, 0.016, &mut audio);
        tick(&mut player, &InputSnapshot::none(), 32, 0.016, &mut audio);
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.body().direction, Vec2::ZERO);
        assert_eq!(player.body().status_key(), "down_idle");
    }

    #[rstest]
    fn attack_fires_once_even_when_frames_overshoot(mut player: Player) {
        let mut audio = CueLog::default();
        let fire = InputSnapshot::holding(&[Action::Attack]);
        // 7 frames/s * 0.45 s = 3.15 frames: past the shot frame in one step.
        let spawned = tick(&mut player, &fire, 450, 0.45, &mut audio);
        assert_eq!(spawned.len(), 1);
        assert!(player.shot_fired());
        let follow_up = tick(&mut player, &InputSnapshot::none(), 500, 0.05, &mut audio);
        assert!(follow_up.is_empty());
        assert_eq!(audio.count(AudioCue::Shot), 1);
    }

    #[rstest]
    fn shot_leaves_the_muzzle_along_facing(mut player: Player) {
        player.body_mut().facing = Facing::Right;
        let mut audio = CueLog::default();
        let fire = InputSnapshot::holding(&[Action::Attack]);
        let spawned = tick(&mut player, &fire, 400, 0.4, &mut audio);
        let shot = spawned.first().copied().expect("one shot");
        assert_eq!(shot.direction, Vec2::X);
        assert_eq!(shot.position, Vec2::new(480.0, 300.0));
        assert_eq!(shot.faction, Faction::Player);
    }

    #[rstest]
    fn attack_cycle_ends_in_idle(mut player: Player) {
        let mut audio = CueLog::default();
        let fire = InputSnapshot::holding(&[Action::Attack]);
        tick(&mut player, &fire, 100, 0.1, &mut audio);
        assert!(player.is_attacking());
        tick(&mut player, &InputSnapshot::none(), 700, 0.6, &mut audio);
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(player.body().frame_index < 1.0);
    }

    #[rstest]
    fn input_is_ignored_while_attacking(mut player: Player) {
        let mut audio = CueLog::default();
        let fire = InputSnapshot::holding(&[Action::Attack]);
        tick(&mut player, &fire, 16, 0.016, &mut audio);
        let mut input = MockInputSource::new();
        input.expect_is_held().never();
        input.expect_any_direction().never();
        tick(&mut player, &input, 32, 0.016, &mut audio);
        assert!(player.is_attacking());
    }

    #[rstest]
    fn melee_hit_plays_hit_cue_once(mut player: Player) {
        let mut audio = MockAudioOutput::new();
        audio
            .expect_play()
            .withf(|cue| *cue == AudioCue::Hit)
            .times(1)
            .return_const(());
        let mut spawned: Vec<ProjectileRequest> = Vec::new();
        let rules = CombatRules::default();
        let mut ctx =
            TickContext::new(GameClock::at(50), 0.016, rules, &[], &mut audio, &mut spawned);
        player.take_hit(&mut ctx);
        player.take_hit(&mut ctx);
        assert_eq!(player.state(), PlayerState::Damaged);
        assert_eq!(player.body().health, 2);
    }

    #[rstest]
    fn damaged_player_recovers_once_vulnerable(mut player: Player) {
        let mut audio = CueLog::default();
        let mut spawned: Vec<ProjectileRequest> = Vec::new();
        {
            let rules = CombatRules::default();
            let mut ctx =
                TickContext::new(GameClock::at(100), 0.016, rules, &[], &mut audio, &mut spawned);
            player.take_hit(&mut ctx);
        }
        tick(&mut player, &InputSnapshot::none(), 300, 0.016, &mut audio);
        assert_eq!(player.state(), PlayerState::Damaged);
        tick(&mut player, &InputSnapshot::none(), 501, 0.016, &mut audio);
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(player.body().vulnerable);
    }

    #[rstest]
    fn dead_player_freezes_on_last_frame(mut player: Player) {
        player.body_mut().health = 0;
        let mut audio = CueLog::default();
        tick(&mut player, &InputSnapshot::none(), 16, 0.016, &mut audio);
        assert!(player.is_dead());
        let fire = InputSnapshot::holding(&[Action::Attack]);
        for step in 2..20_u64 {
            tick(&mut player, &fire, step * 100, 0.1, &mut audio);
        }
        assert!(player.is_dead());
        assert_eq!(player.body().status_key(), "dead");
        assert_eq!(player.body().frame_slot(), 3);
    }
}
