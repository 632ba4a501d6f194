//! Attack capabilities, one per [`AttackStyle`].

use glam::Vec2;
use log::debug;

use super::{MonsterCore, Sensing};
use crate::audio::AudioCue;
use crate::components::{Faction, Pose, Status};
use crate::config::AttackStyle;
use crate::fsm::{MonsterState, Trigger};
use crate::player::Player;
use crate::projectile::ProjectileRequest;
use crate::tick::TickContext;

/// How a monster hurts the player.
pub trait AttackCapability {
    /// Runs each tick after pursuit while the player is alive.
    fn engage(
        &mut self,
        core: &mut MonsterCore,
        player: &mut Player,
        sensing: Sensing,
        ctx: &mut TickContext<'_>,
    );

    /// Runs after the animation cursor has advanced.
    fn on_frame(&mut self, core: &mut MonsterCore, sensing: Sensing, ctx: &mut TickContext<'_>) {
        let _ = (core, sensing, ctx);
    }

    /// Runs when the clip wraps back to its first frame.
    fn on_cycle_end(&mut self) {}
}

/// Contact damage.
///
/// While the player is inside attack range the monster attacks every tick.
/// A player caught outside its own attack is forced into it first, which
/// cancels whatever it was doing, and the monster restarts its clip. The
/// player's own vulnerability window limits the actual health loss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeleeAttacker;

impl AttackCapability for MeleeAttacker {
    fn engage(
        &mut self,
        core: &mut MonsterCore,
        player: &mut Player,
        sensing: Sensing,
        ctx: &mut TickContext<'_>,
    ) {
        if !core.radii().strikes(sensing.distance) {
            return;
        }
        if !core.is(MonsterState::Attacking) {
            core.fire(Trigger::Attack, ctx);
        }
        if !player.is_attacking() {
            player.interrupt(ctx);
            core.body_mut().frame_index = 0.0;
        }
        player.take_hit(ctx);
        core.body_mut().status = Status::Posed(Pose::Attacking);
    }
}

/// Fires one projectile per attack cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangedAttacker {
    shot_frame: f32,
    muzzle_offset: f32,
    shot_fired: bool,
}

impl RangedAttacker {
    /// Creates an attacker firing on `shot_frame` from `muzzle_offset` out.
    #[must_use]
    pub const fn new(shot_frame: f32, muzzle_offset: f32) -> Self {
        Self {
            shot_frame,
            muzzle_offset,
            shot_fired: false,
        }
    }

    /// Whether this cycle's projectile has been fired.
    #[must_use]
    pub const fn shot_fired(&self) -> bool {
        self.shot_fired
    }
}

impl AttackCapability for RangedAttacker {
    fn engage(
        &mut self,
        core: &mut MonsterCore,
        _player: &mut Player,
        sensing: Sensing,
        ctx: &mut TickContext<'_>,
    ) {
        if core.radii().strikes(sensing.distance) {
            if !core.is(MonsterState::Attacking) {
                core.fire(Trigger::Attack, ctx);
                core.body_mut().frame_index = 0.0;
                self.shot_fired = false;
            }
            core.body_mut().status = Status::Posed(Pose::Attacking);
        } else if core.is(MonsterState::Attacking) {
            core.fire(Trigger::Idle, ctx);
        }
    }

    fn on_frame(&mut self, core: &mut MonsterCore, sensing: Sensing, ctx: &mut TickContext<'_>) {
        if !core.is(MonsterState::Attacking)
            || self.shot_fired
            || core.body().frame_index < self.shot_frame
        {
            return;
        }
        let direction = if sensing.direction == Vec2::ZERO {
            core.body().facing.unit()
        } else {
            sensing.direction
        };
        ctx.spawner.spawn(ProjectileRequest {
            position: core.body().center() + direction * self.muzzle_offset,
            direction,
            faction: Faction::Monster,
        });
        ctx.audio.play(AudioCue::Shot);
        self.shot_fired = true;
        debug!("{} {} fired towards {direction}", core.kind(), core.id());
    }

    fn on_cycle_end(&mut self) {
        self.shot_fired = false;
    }
}

/// Attack capability selected by a monster's profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attacker {
    /// Contact damage.
    Melee(MeleeAttacker),
    /// Projectiles.
    Ranged(RangedAttacker),
}

impl Attacker {
    /// Capability for `style`.
    #[must_use]
    pub const fn from_style(style: AttackStyle) -> Self {
        match style {
            AttackStyle::Melee => Self::Melee(MeleeAttacker),
            AttackStyle::Ranged {
                shot_frame,
                muzzle_offset,
            } => Self::Ranged(RangedAttacker::new(shot_frame, muzzle_offset)),
        }
    }
}

impl AttackCapability for Attacker {
    fn engage(
        &mut self,
        core: &mut MonsterCore,
        player: &mut Player,
        sensing: Sensing,
        ctx: &mut TickContext<'_>,
    ) {
        match self {
            Self::Melee(melee) => melee.engage(core, player, sensing, ctx),
            Self::Ranged(ranged) => ranged.engage(core, player, sensing, ctx),
        }
    }

    fn on_frame(&mut self, core: &mut MonsterCore, sensing: Sensing, ctx: &mut TickContext<'_>) {
        match self {
            Self::Melee(melee) => melee.on_frame(core, sensing, ctx),
            Self::Ranged(ranged) => ranged.on_frame(core, sensing, ctx),
        }
    }

    fn on_cycle_end(&mut self) {
        match self {
            Self::Melee(melee) => melee.on_cycle_end(),
            Self::Ranged(ranged) => ranged.on_cycle_end(),
        }
    }
}
