//! Level loading: static obstacles plus entity spawn points.
//!
//! A [`MapSource`] produces a [`LevelLayout`] once at level start. The layout
//! is plain data; the simulation turns obstacles into collision geometry and
//! spawn points into entities.
//!
//! [`JsonLevel`] reads the authored level format:
//!
//! - `tile_size`: edge of one fence tile in pixels;
//! - `fence`: `[column, row]` pairs, each a `tile_size` square obstacle;
//! - `objects`: free rectangles (`x`, `y`, `w`, `h`) that block movement;
//! - `entities`: named markers (`Player`, `Coffin`, `Cactus`) centred on
//!   `x`, `y`.
//!
//! Exactly one `Player` marker is required.

pub mod spawn;
mod translate;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::components::EntityKind;
use crate::geometry::Rect;
use crate::movement::Obstacle;

pub use spawn::{EntityMarker, SpawnPoint};
pub use translate::{fence_obstacles, object_obstacles};

/// Errors raised while loading a level.
#[derive(Debug, Error)]
pub enum MapError {
    /// The level file could not be read.
    #[error("failed to read level {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The level document is not valid JSON for the level schema.
    #[error("invalid level: {0}")]
    Parse(#[from] serde_json::Error),
    /// The tile size is not positive.
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(i32),
    /// An entity marker names no known kind.
    #[error("unknown entity `{0}` in level")]
    UnknownEntity(String),
    /// No player marker.
    #[error("level has no Player spawn")]
    MissingPlayer,
    /// More than one player marker.
    #[error("level has {0} Player spawns; exactly one is allowed")]
    DuplicatePlayer(usize),
}

/// Static geometry and spawn points of a level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelLayout {
    /// Blocking rectangles.
    pub obstacles: Vec<Obstacle>,
    /// Entities to create at level start.
    pub spawns: Vec<SpawnPoint>,
}

impl LevelLayout {
    /// Checks the layout has exactly one player spawn and returns it.
    ///
    /// # Errors
    /// Returns [`MapError::MissingPlayer`] or [`MapError::DuplicatePlayer`].
    pub fn player_spawn(&self) -> Result<&SpawnPoint, MapError> {
        let mut players = self
            .spawns
            .iter()
            .filter(|spawn| spawn.kind == EntityKind::Player);
        let first = players.next().ok_or(MapError::MissingPlayer)?;
        let extra = players.count();
        if extra > 0 {
            return Err(MapError::DuplicatePlayer(extra + 1));
        }
        Ok(first)
    }

    /// Monster spawn points in authored order.
    pub fn monster_spawns(&self) -> impl Iterator<Item = &SpawnPoint> + '_ {
        self.spawns
            .iter()
            .filter(|spawn| matches!(spawn.kind, EntityKind::Monster(_)))
    }
}

/// Supplies the layout of a level.
pub trait MapSource {
    /// Loads the layout.
    ///
    /// # Errors
    /// Returns a [`MapError`] when the level cannot be read or is malformed.
    fn load(&self) -> Result<LevelLayout, MapError>;
}

/// Layouts built in code are their own source.
impl MapSource for LevelLayout {
    fn load(&self) -> Result<LevelLayout, MapError> {
        self.player_spawn()?;
        Ok(self.clone())
    }
}

#[derive(Debug, Deserialize)]
struct LevelDocument {
    tile_size: i32,
    #[serde(default)]
    fence: Vec<[i32; 2]>,
    #[serde(default)]
    objects: Vec<Rect>,
    #[serde(default)]
    entities: Vec<EntityMarker>,
}

/// Level read from a JSON file.
#[derive(Clone, Debug)]
pub struct JsonLevel {
    path: PathBuf,
}

impl JsonLevel {
    /// Source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the level file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a level document.
    ///
    /// # Errors
    /// Returns [`MapError::Parse`] for malformed JSON, otherwise as
    /// [`LevelLayout::player_spawn`] plus the tile size and entity checks.
    ///
    /// # Examples
    /// ```
    /// use dustbowl::map::JsonLevel;
    /// let layout = JsonLevel::parse(
    ///     r#"{ "tile_size": 64, "fence": [[0, 0], [1, 0]],
    ///          "entities": [{ "name": "Player", "x": 300.0, "y": 300.0 },
    ///                       { "name": "Cactus", "x": 900.0, "y": 300.0 }] }"#,
    /// )
    /// .expect("valid level");
    /// assert_eq!(layout.obstacles.len(), 2);
    /// assert_eq!(layout.monster_spawns().count(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<LevelLayout, MapError> {
        let document: LevelDocument = serde_json::from_str(text)?;
        if document.tile_size <= 0 {
            return Err(MapError::InvalidTileSize(document.tile_size));
        }
        let mut obstacles = fence_obstacles(&document.fence, document.tile_size);
        obstacles.extend(object_obstacles(&document.objects));
        let spawns = document
            .entities
            .iter()
            .map(SpawnPoint::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let layout = LevelLayout { obstacles, spawns };
        layout.player_spawn()?;
        Ok(layout)
    }
}

impl MapSource for JsonLevel {
    fn load(&self) -> Result<LevelLayout, MapError> {
        let text = fs::read_to_string(&self.path).map_err(|source| MapError::Io {
            path: self.path.clone(),
            source,
        })?;
        let layout = Self::parse(&text)?;
        info!(
            "loaded level {} with {} obstacles and {} spawns",
            self.path.display(),
            layout.obstacles.len(),
            layout.spawns.len()
        );
        Ok(layout)
    }
}
