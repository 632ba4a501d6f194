//! Monsters: shared chase behaviour plus a per-kind attack capability.
//!
//! A [`Monster`] is a [`MonsterCore`] (body, state machine, radii, identity)
//! paired with an [`Attacker`] chosen from its kind's [`AttackStyle`]. The
//! player is passed into every update rather than referenced, so monsters
//! never outlive or alias it.
//!
//! [`AttackStyle`]: crate::config::AttackStyle

mod attack;
mod policy;

use std::sync::Arc;

use glam::{IVec2, Vec2};
use log::{debug, info};

use crate::assets::AnimationSet;
use crate::components::{EntityKind, MonsterKind, Pose, Status};
use crate::config::MonsterProfile;
use crate::entity::{Body, BodySpec};
use crate::fsm::{MonsterState, StateHooks, StateMachine, Transition, Trigger};
use crate::player::Player;
use crate::registry::EntityId;
use crate::tick::TickContext;

pub use attack::{AttackCapability, Attacker, MeleeAttacker, RangedAttacker};
pub use policy::{noticed_facing, pursuit, Pursuit, Radii, Sensing};

struct MonsterHooks<'a, 'w> {
    id: EntityId,
    kind: MonsterKind,
    body: &'a mut Body,
    ctx: &'a mut TickContext<'w>,
}

impl StateHooks<MonsterState> for MonsterHooks<'_, '_> {
    fn on_exit(&mut self, from: MonsterState) {
        debug!("{} {} is leaving {from} state", self.kind, self.id);
    }

    fn on_enter(&mut self, to: MonsterState) {
        if to == MonsterState::Damaged {
            self.body.damage(self.ctx.now_ms(), &mut *self.ctx.audio);
        }
        debug!("{} {} has entered {to} state", self.kind, self.id);
    }
}

/// Everything a monster is apart from its attack capability.
#[derive(Clone, Debug)]
pub struct MonsterCore {
    id: EntityId,
    kind: MonsterKind,
    body: Body,
    machine: StateMachine<MonsterState>,
    radii: Radii,
}

impl MonsterCore {
    /// Identifier issued at spawn.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Monster kind.
    #[must_use]
    pub const fn kind(&self) -> MonsterKind {
        self.kind
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

    /// Awareness radii.
    #[must_use]
    pub const fn radii(&self) -> Radii {
        self.radii
    }

    /// Current behavioural state.
    #[must_use]
    pub const fn state(&self) -> MonsterState {
        self.machine.state()
    }

    /// Whether the machine is in `state`.
    #[must_use]
    pub fn is(&self, state: MonsterState) -> bool {
        self.machine.is(state)
    }

    /// Fires `trigger` with the monster's hooks.
    pub fn fire(
        &mut self,
        trigger: Trigger,
        ctx: &mut TickContext<'_>,
    ) -> Option<Transition<MonsterState>> {
        let mut hooks = MonsterHooks {
            id: self.id,
            kind: self.kind,
            body: &mut self.body,
            ctx,
        };
        self.machine.trigger(trigger, &mut hooks)
    }

    fn face_player(&mut self, sensing: Sensing) {
        if let Some(facing) = noticed_facing(self.radii, sensing) {
            self.body.facing = facing;
            self.body.status = Status::Posed(Pose::Idle);
        }
    }

    fn walk_to_player(&mut self, sensing: Sensing, ctx: &mut TickContext<'_>) {
        match pursuit(self.radii, sensing) {
            Pursuit::Chase(direction) => {
                self.body.direction = direction;
                self.body.status = Status::Posed(Pose::Moving);
                if !self.is(MonsterState::Chasing) {
                    self.fire(Trigger::Chase, ctx);
                }
            }
            Pursuit::Hold => self.body.direction = Vec2::ZERO,
        }
    }

    fn blink(&mut self, ctx: &mut TickContext<'_>) {
        if self.body.flicker(ctx.clock) && !self.is(MonsterState::Damaged) {
            self.fire(Trigger::TakeDamage, ctx);
        }
    }

    fn check_death(&mut self, ctx: &mut TickContext<'_>) {
        if self.body.is_spent() && !self.machine.is_terminal() {
            self.fire(Trigger::Die, ctx);
            info!("{} {} died", self.kind, self.id);
        }
    }

    fn vulnerability_timer(&mut self, ctx: &mut TickContext<'_>) {
        let restored = self
            .body
            .restore_vulnerability(ctx.clock, ctx.rules.vulnerability_window_ms);
        if restored && self.is(MonsterState::Damaged) {
            self.fire(Trigger::Idle, ctx);
        }
    }
}

/// A monster of some kind.
#[derive(Clone, Debug)]
pub struct Monster {
    core: MonsterCore,
    attacker: Attacker,
}

impl Monster {
    /// Creates a monster of `kind` centred on `spawn`.
    #[must_use]
    pub fn new(
        id: EntityId,
        kind: MonsterKind,
        spawn: Vec2,
        profile: &MonsterProfile,
        animations: Arc<AnimationSet>,
    ) -> Self {
        let body = Body::new(BodySpec {
            spawn,
            sprite_size: IVec2::splat(profile.sprite_size),
            speed: profile.speed,
            health: profile.health,
            despawn_on_death: true,
            animations,
        });
        info!("{kind} {id} spawned at {spawn}");
        Self {
            core: MonsterCore {
                id,
                kind,
                body,
                machine: StateMachine::new(),
                radii: Radii::from_profile(profile),
            },
            attacker: Attacker::from_style(profile.attack),
        }
    }

    /// Identifier issued at spawn.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.core.id
    }

    /// Monster kind.
    #[must_use]
    pub const fn kind(&self) -> MonsterKind {
        self.core.kind
    }

    /// Entity kind, for asset lookups and draw lists.
    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        EntityKind::Monster(self.core.kind)
    }

    /// Everything but the attack capability.
    #[must_use]
    pub const fn core(&self) -> &MonsterCore {
        &self.core
    }

    /// Shared entity data.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.core.body
    }

    /// Mutable shared entity data.
    pub const fn body_mut(&mut self) -> &mut Body {
        &mut self.core.body
    }

    /// Current behavioural state.
    #[must_use]
    pub const fn state(&self) -> MonsterState {
        self.core.state()
    }

    /// Attack capability.
    #[must_use]
    pub const fn attacker(&self) -> &Attacker {
        &self.attacker
    }

    /// Whether the monster is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.core.machine.is_terminal()
    }

    /// Whether the monster is dead and should leave the simulation.
    #[must_use]
    pub fn should_despawn(&self) -> bool {
        self.is_dead() && self.core.body.despawn_on_death
    }

    /// Fires `trigger` with the monster's hooks.
    pub fn fire(
        &mut self,
        trigger: Trigger,
        ctx: &mut TickContext<'_>,
    ) -> Option<Transition<MonsterState>> {
        self.core.fire(trigger, ctx)
    }

    /// A projectile hit the monster. Returns whether the hit counted.
    pub fn damage(&mut self, ctx: &mut TickContext<'_>) -> bool {
        let counted = self.core.body.damage(ctx.now_ms(), &mut *ctx.audio);
        if counted {
            debug!(
                "{} {} hit, {} health left",
                self.core.kind, self.core.id, self.core.body.health
            );
        }
        counted
    }

    /// Runs one tick against `player`.
    ///
    /// Order: face, pursue, attack, forced idle, move, animate, then the
    /// shared health policy. Dead monsters do nothing.
    pub fn update(&mut self, player: &mut Player, ctx: &mut TickContext<'_>) {
        if self.is_dead() {
            return;
        }
        let core = &mut self.core;
        let sensing = Sensing::between(core.body.center(), player.body().center());
        core.face_player(sensing);
        core.walk_to_player(sensing, ctx);
        if !player.is_dead() {
            self.attacker.engage(core, player, sensing, ctx);
        }
        if (player.is_dead() || player.is_attacking()) && !core.is(MonsterState::Idle) {
            core.fire(Trigger::Idle, ctx);
        }
        core.body.integrate(ctx.dt, ctx.obstacles);

        core.body.advance_frame(ctx.dt, ctx.rules.animation_rate);
        self.attacker.on_frame(core, sensing, ctx);
        if core.body.clip_finished() {
            core.body.frame_index = 0.0;
            self.attacker.on_cycle_end();
        }

        core.blink(ctx);
        core.check_death(ctx);
        core.vulnerability_timer(ctx);
    }
}
