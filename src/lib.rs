#![cfg_attr(docsrs, feature(doc_cfg))]
//! Simulation core for a top-down western shooter.
//!
//! The crate owns game rules only: entity state machines, movement against
//! static obstacles, combat timing, monster pursuit, and projectile
//! collisions. Rendering, audio playback and keyboard polling sit behind
//! small traits ([`SpriteView`] out, [`AudioOutput`] and [`InputSource`] in)
//! so the whole level runs headless in tests and in the `dustbowl` binary.
pub mod assets;
pub mod audio;
pub mod broker;
pub mod clock;
pub mod components;
pub mod config;
pub mod constants;
pub mod entity;
pub mod fsm;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod map;
pub mod monster;
pub mod movement;
pub mod numeric;
pub mod player;
pub mod presentation;
pub mod projectile;
pub mod registry;
pub mod tick;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use assets::{AnimationSet, AssetError, AssetLoader, DirectoryAssetLoader, UniformAssets};
pub use audio::{AudioCue, AudioOutput, CueLog, Silence};
pub use clock::GameClock;
pub use components::{EntityKind, Facing, Faction, MonsterKind, Pose, Status};
pub use config::{ConfigError, SimulationConfig};
pub use entity::Body;
pub use geometry::Rect;
pub use input::{Action, InputSnapshot, InputSource};
pub use logging::init as init_logging;
pub use map::{JsonLevel, LevelLayout, MapError, MapSource, SpawnPoint};
pub use monster::Monster;
pub use movement::Obstacle;
pub use player::Player;
pub use presentation::{SpriteKind, SpriteView};
pub use projectile::{Projectile, ProjectileRequest};
pub use registry::EntityId;
pub use vector_math::{distance_and_direction, normalize_or_zero};
pub use world::{Outcome, SimError, Simulation, TickReport};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use dustbowl::prelude::*;
    //! ```

    pub use crate::fsm::{MonsterState, PlayerState, StateMachine, Trigger};
    pub use crate::AssetLoader;
    pub use crate::AudioOutput;
    pub use crate::InputSource;
    pub use crate::InputSnapshot;
    pub use crate::LevelLayout;
    pub use crate::MapSource;
    pub use crate::Simulation;
    pub use crate::SimulationConfig;
    pub use glam::Vec2;
}
