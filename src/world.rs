//! The simulation: owns every entity and runs the per-tick pipeline.
//!
//! One [`Simulation::tick`] does, in order:
//!
//! 1. advance the clock by the (clamped) frame delta;
//! 2. update the player, then every monster against the player;
//! 3. fly existing projectiles and drop the ones past their lifetime;
//! 4. register projectiles requested during step 2;
//! 5. run the collision broker;
//! 6. remove dead monsters.
//!
//! Removals in steps 3, 5 and 6 are deferred until their scan has finished.

use std::sync::Arc;

use glam::Vec2;
use log::{debug, info, warn};
use thiserror::Error;

use crate::assets::{AnimationSet, AssetError, AssetLoader};
use crate::audio::AudioOutput;
use crate::broker::{self, BrokerRules, Removals};
use crate::clock::GameClock;
use crate::components::{EntityKind, MonsterKind};
use crate::config::{ConfigError, SimulationConfig};
use crate::constants::MAX_TICK_SECONDS;
use crate::input::InputSource;
use crate::map::{LevelLayout, MapError};
use crate::monster::Monster;
use crate::movement::Obstacle;
use crate::player::Player;
use crate::presentation::{depth_sort, SpriteView};
use crate::projectile::{Projectile, ProjectileRequest};
use crate::registry::{EntityId, IdRegistry};
use crate::tick::TickContext;

/// Errors raised while building a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Animation clips could not be loaded.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// The level layout is unusable.
    #[error(transparent)]
    Map(#[from] MapError),
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Whether the level is still being played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// The player is alive.
    #[default]
    Running,
    /// The player has died; the renderer shows the end screen.
    PlayerDied,
}

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Projectiles registered this tick.
    pub spawned: Vec<EntityId>,
    /// Projectiles that outlived their lifetime.
    pub expired: Vec<EntityId>,
    /// Projectiles consumed by a collision.
    pub consumed: Vec<EntityId>,
    /// Monsters whose projectile hit counted.
    pub monsters_hit: Vec<EntityId>,
    /// Monsters removed after dying.
    pub monsters_removed: Vec<EntityId>,
    /// Whether a hostile projectile's hit on the player counted.
    pub player_hit: bool,
    /// Level state after the tick.
    pub outcome: Outcome,
}

/// Validated animation sets for every kind, loaded once per level.
#[derive(Clone, Debug)]
struct KindAnimations {
    player: Arc<AnimationSet>,
    coffin: Arc<AnimationSet>,
    cactus: Arc<AnimationSet>,
}

impl KindAnimations {
    fn load(assets: &dyn AssetLoader) -> Result<Self, AssetError> {
        Ok(Self {
            player: assets.load(EntityKind::Player)?,
            coffin: assets.load(EntityKind::Monster(MonsterKind::Coffin))?,
            cactus: assets.load(EntityKind::Monster(MonsterKind::Cactus))?,
        })
    }

    fn monster(&self, kind: MonsterKind) -> Arc<AnimationSet> {
        match kind {
            MonsterKind::Coffin => Arc::clone(&self.coffin),
            MonsterKind::Cactus => Arc::clone(&self.cactus),
        }
    }
}

/// A running level.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    clock: GameClock,
    ids: IdRegistry,
    animations: KindAnimations,
    obstacles: Vec<Obstacle>,
    player: Player,
    monsters: Vec<Monster>,
    projectiles: Vec<Projectile>,
    outcome: Outcome,
    ticks: u64,
}

impl Simulation {
    /// Builds a simulation from a level layout.
    ///
    /// Every kind's animations are loaded and validated up front, so a
    /// missing clip fails here rather than mid-level.
    ///
    /// # Errors
    /// Returns [`SimError`] when the config is invalid, the layout lacks
    /// exactly one player, or an animation set fails to load.
    pub fn from_level(
        layout: &LevelLayout,
        assets: &dyn AssetLoader,
        config: SimulationConfig,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let player_spawn = layout.player_spawn()?;
        let animations = KindAnimations::load(assets)?;
        let player = Player::new(
            player_spawn.position,
            config.player,
            Arc::clone(&animations.player),
        );
        let mut simulation = Self {
            config,
            clock: GameClock::new(),
            ids: IdRegistry::new(),
            animations,
            obstacles: layout.obstacles.clone(),
            player,
            monsters: Vec::new(),
            projectiles: Vec::new(),
            outcome: Outcome::Running,
            ticks: 0,
        };
        for spawn in layout.monster_spawns() {
            if let EntityKind::Monster(kind) = spawn.kind {
                simulation.spawn_monster(kind, spawn.position);
            }
        }
        info!(
            "level ready: {} obstacles, {} monsters",
            simulation.obstacles.len(),
            simulation.monsters.len()
        );
        Ok(simulation)
    }

    /// Adds a monster of `kind` centred on `position`.
    pub fn spawn_monster(&mut self, kind: MonsterKind, position: Vec2) -> EntityId {
        let id = self.ids.issue();
        let monster = Monster::new(
            id,
            kind,
            position,
            self.config.profile(kind),
            self.animations.monster(kind),
        );
        self.monsters.push(monster);
        id
    }

    /// Registers a projectile immediately.
    pub fn launch_projectile(&mut self, request: ProjectileRequest) -> EntityId {
        let id = self.ids.issue();
        self.projectiles.push(Projectile::launch(
            id,
            request,
            self.config.projectile,
            self.clock,
        ));
        debug!("projectile {id} launched from {}", request.position);
        id
    }

    /// Runs one tick of `frame_dt` seconds.
    ///
    /// `frame_dt` is clamped to `[0, MAX_TICK_SECONDS]`; non-finite deltas count
    /// as zero.
    pub fn tick(
        &mut self,
        frame_dt: f32,
        input: &dyn InputSource,
        audio: &mut dyn AudioOutput,
    ) -> TickReport {
        let dt = clamp_dt(frame_dt);
        self.clock.advance(dt);
        self.ticks += 1;
        let rules = self.config.combat;
        let mut report = TickReport::default();
        let mut queued: Vec<ProjectileRequest> = Vec::new();

        {
            let mut ctx =
                TickContext::new(self.clock, dt, rules, &self.obstacles, &mut *audio, &mut queued);
            self.player.update(input, &mut ctx);
            for monster in &mut self.monsters {
                monster.update(&mut self.player, &mut ctx);
            }
        }

        let mut expired = Removals::new();
        for projectile in &mut self.projectiles {
            projectile.advance(dt);
            if projectile.is_expired(self.clock) && expired.mark(projectile.id()) {
                report.expired.push(projectile.id());
            }
        }
        expired.apply(&mut self.projectiles, Projectile::id);

        for request in queued.drain(..) {
            let id = self.launch_projectile(request);
            report.spawned.push(id);
        }

        let broker_rules = BrokerRules {
            hostile_projectiles_hit_player: self.config.hostile_projectiles_hit_player,
        };
        let collisions = {
            let mut ctx =
                TickContext::new(self.clock, dt, rules, &self.obstacles, &mut *audio, &mut queued);
            broker::reconcile(
                &mut self.projectiles,
                &mut self.monsters,
                &mut self.player,
                broker_rules,
                &mut ctx,
            )
        };
        report.consumed = collisions.consumed;
        report.monsters_hit = collisions.monsters_hit;
        report.player_hit = collisions.player_hit;

        let mut fallen = Removals::new();
        for monster in &self.monsters {
            if monster.should_despawn() && fallen.mark(monster.id()) {
                info!("{} {} despawned", monster.kind(), monster.id());
                report.monsters_removed.push(monster.id());
            }
        }
        fallen.apply(&mut self.monsters, Monster::id);

        self.refresh_outcome();
        report.outcome = self.outcome;
        report
    }

    fn refresh_outcome(&mut self) {
        if self.outcome == Outcome::Running && self.player.is_dead() {
            self.outcome = Outcome::PlayerDied;
            warn!("YOU DIED after {} ticks", self.ticks);
        }
    }

    /// Sprites to draw this frame, back to front.
    #[must_use]
    pub fn draw_order(&self) -> Vec<SpriteView> {
        let mut views = Vec::with_capacity(1 + self.monsters.len() + self.projectiles.len());
        views.push(SpriteView::of_body(
            None,
            EntityKind::Player,
            self.player.body(),
        ));
        views.extend(self.monsters.iter().map(|monster| {
            SpriteView::of_body(Some(monster.id()), monster.entity_kind(), monster.body())
        }));
        views.extend(self.projectiles.iter().map(SpriteView::of_projectile));
        depth_sort(&mut views);
        views
    }

    /// Level state.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the player.
    pub const fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Live monsters in spawn order.
    #[must_use]
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Monster with identifier `id`, if still present.
    #[must_use]
    pub fn monster(&self, id: EntityId) -> Option<&Monster> {
        self.monsters.iter().find(|monster| monster.id() == id)
    }

    /// Mutable access to the monster with identifier `id`.
    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|monster| monster.id() == id)
    }

    /// Projectiles in flight.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Static geometry.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Clock reading.
    #[must_use]
    pub const fn clock(&self) -> GameClock {
        self.clock
    }

    /// Number of ticks run.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

const fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_TICK_SECONDS)
    } else {
        0.0
    }
}
