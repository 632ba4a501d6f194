//! Tunable simulation parameters.
//!
//! Defaults come from [`crate::constants`]; a JSON file may override any
//! subset of them. Every monster profile is validated on load so the
//! proximity policy can rely on `notice >= walk >= attack`.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::components::MonsterKind;
use crate::constants::{
    ANIMATION_RATE, DEFAULT_HEALTH, DEFAULT_SPRITE_SIZE, PLAYER_MUZZLE_OFFSET, PLAYER_SHOT_FRAME,
    PLAYER_SPEED, PROJECTILE_LIFETIME_MS, PROJECTILE_SIZE, PROJECTILE_SPEED,
    RANGED_MUZZLE_OFFSET, RANGED_SHOT_FRAME, VULNERABILITY_WINDOW_MS,
};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid configuration JSON.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A monster profile has its radii out of order.
    #[error("{kind} radii must satisfy notice >= walk >= attack (got {notice}, {walk}, {attack})")]
    RadiusOrder {
        /// Offending kind.
        kind: MonsterKind,
        /// Notice radius.
        notice: f32,
        /// Walk radius.
        walk: f32,
        /// Attack radius.
        attack: f32,
    },
    /// A speed, size or rate is not a positive finite number.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Field path.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
}

/// Timing rules shared by every entity.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    /// Milliseconds a hit entity ignores further hits.
    pub vulnerability_window_ms: u64,
    /// Animation frames per second.
    pub animation_rate: f32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            vulnerability_window_ms: VULNERABILITY_WINDOW_MS,
            animation_rate: ANIMATION_RATE,
        }
    }
}

/// Player tuning.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Pixels per second.
    pub speed: f32,
    /// Starting health.
    pub health: i32,
    /// Square sprite edge in pixels.
    pub sprite_size: i32,
    /// Frame of the attack clip on which the shot leaves the barrel.
    pub shot_frame: f32,
    /// Distance from the centre at which projectiles appear.
    pub muzzle_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            health: DEFAULT_HEALTH,
            sprite_size: DEFAULT_SPRITE_SIZE,
            shot_frame: PLAYER_SHOT_FRAME,
            muzzle_offset: PLAYER_MUZZLE_OFFSET,
        }
    }
}

/// How a monster hurts the player.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum AttackStyle {
    /// Contact damage inside the attack radius.
    Melee,
    /// Fires a projectile on `shot_frame` of each attack cycle.
    Ranged {
        /// Frame of the attack clip on which the shot is fired.
        shot_frame: f32,
        /// Distance from the centre at which projectiles appear.
        muzzle_offset: f32,
    },
}

/// Tuning for one monster kind.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct MonsterProfile {
    /// Pixels per second.
    pub speed: f32,
    /// Starting health.
    pub health: i32,
    /// Square sprite edge in pixels.
    pub sprite_size: i32,
    /// Distance below which the monster turns to face the player.
    pub notice_radius: f32,
    /// Distance below which the monster gives chase.
    pub walk_radius: f32,
    /// Distance below which the monster attacks instead of chasing.
    pub attack_radius: f32,
    /// Attack capability.
    pub attack: AttackStyle,
}

impl MonsterProfile {
    /// The melee coffin.
    #[must_use]
    pub const fn coffin() -> Self {
        Self {
            speed: 150.0,
            health: DEFAULT_HEALTH,
            sprite_size: DEFAULT_SPRITE_SIZE,
            notice_radius: 550.0,
            walk_radius: 400.0,
            attack_radius: 50.0,
            attack: AttackStyle::Melee,
        }
    }

    /// The ranged cactus.
    #[must_use]
    pub const fn cactus() -> Self {
        Self {
            speed: 90.0,
            health: DEFAULT_HEALTH,
            sprite_size: DEFAULT_SPRITE_SIZE,
            notice_radius: 600.0,
            walk_radius: 500.0,
            attack_radius: 350.0,
            attack: AttackStyle::Ranged {
                shot_frame: RANGED_SHOT_FRAME,
                muzzle_offset: RANGED_MUZZLE_OFFSET,
            },
        }
    }

    const fn validate(&self, kind: MonsterKind) -> Result<(), ConfigError> {
        let ordered = self.notice_radius >= self.walk_radius
            && self.walk_radius >= self.attack_radius
            && self.attack_radius >= 0.0;
        if !ordered {
            return Err(ConfigError::RadiusOrder {
                kind,
                notice: self.notice_radius,
                walk: self.walk_radius,
                attack: self.attack_radius,
            });
        }
        positive("monster.speed", self.speed)
    }
}

/// Projectile tuning.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Pixels per second.
    pub speed: f32,
    /// Milliseconds before an unconsumed projectile disappears.
    pub lifetime_ms: u64,
    /// Square hitbox edge in pixels.
    pub size: i32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            lifetime_ms: PROJECTILE_LIFETIME_MS,
            size: PROJECTILE_SIZE,
        }
    }
}

/// Every tunable of a level run.
///
/// # Examples
/// ```
/// use dustbowl::config::SimulationConfig;
/// let config = SimulationConfig::from_json_str(
///     r#"{ "coffin": { "speed": 120.0, "health": 5, "sprite_size": 96,
///          "notice_radius": 500.0, "walk_radius": 300.0, "attack_radius": 40.0,
///          "attack": { "style": "melee" } } }"#,
/// )
/// .expect("valid config");
/// assert_eq!(config.coffin.health, 5);
/// assert!(!config.hostile_projectiles_hit_player);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Shared timing rules.
    pub combat: CombatRules,
    /// Player tuning.
    pub player: PlayerTuning,
    /// Coffin tuning.
    pub coffin: MonsterProfile,
    /// Cactus tuning.
    pub cactus: MonsterProfile,
    /// Projectile tuning.
    pub projectile: ProjectileTuning,
    /// Whether monster projectiles damage the player.
    pub hostile_projectiles_hit_player: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            combat: CombatRules::default(),
            player: PlayerTuning::default(),
            coffin: MonsterProfile::coffin(),
            cactus: MonsterProfile::cactus(),
            projectile: ProjectileTuning::default(),
            hostile_projectiles_hit_player: false,
        }
    }
}

impl SimulationConfig {
    /// Profile for `kind`.
    #[must_use]
    pub const fn profile(&self, kind: MonsterKind) -> &MonsterProfile {
        match kind {
            MonsterKind::Coffin => &self.coffin,
            MonsterKind::Cactus => &self.cactus,
        }
    }

    /// Checks radius ordering and that rates and sizes are positive.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in [MonsterKind::Coffin, MonsterKind::Cactus] {
            self.profile(kind).validate(kind)?;
        }
        positive("player.speed", self.player.speed)?;
        positive("combat.animation_rate", self.combat.animation_rate)?;
        positive("projectile.speed", self.projectile.speed)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] or a validation error.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_json_str`].
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!("loaded simulation config from {}", path.display());
        Ok(config)
    }
}

const fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
