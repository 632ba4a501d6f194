//! Animation clip tables.
//!
//! The simulation never touches pixels, but it needs to know how many frames
//! each status animation has so it can wrap, freeze and time attacks. An
//! [`AnimationSet`] maps animation keys to ordered frame references and is
//! validated against every key its entity kind can reach before a level
//! starts, so a missing clip fails at load time instead of mid-frame.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, info};
use thiserror::Error;

use crate::components::EntityKind;

/// Errors raised while building animation sets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// A reachable status has no clip.
    #[error("{kind} animation `{status}` is missing")]
    MissingClip {
        /// Entity kind being validated.
        kind: EntityKind,
        /// Animation key that was not found.
        status: String,
    },
    /// A reachable status has a clip without frames.
    #[error("{kind} animation `{status}` has no frames")]
    EmptyClip {
        /// Entity kind being validated.
        kind: EntityKind,
        /// Animation key with the empty clip.
        status: String,
    },
    /// The asset directory could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A frame file is not named by its numeric index.
    #[error("frame file {} is not named by its index", .path.display())]
    UnnumberedFrame {
        /// Offending file.
        path: PathBuf,
    },
}

/// Ordered frame references keyed by animation key.
#[derive(Clone, Debug, Default)]
pub struct AnimationSet {
    clips: HashMap<String, Vec<PathBuf>>,
}

impl AnimationSet {
    /// Synthesises `frames` anonymous frames for every key `kind` can reach.
    ///
    /// # Examples
    /// ```
    /// use dustbowl::assets::AnimationSet;
    /// use dustbowl::components::EntityKind;
    /// let set = AnimationSet::uniform(EntityKind::Player, 4);
    /// assert_eq!(set.clip_len("left_attacking"), 4);
    /// assert!(set.validate(EntityKind::Player).is_ok());
    /// ```
    #[must_use]
    pub fn uniform(kind: EntityKind, frames: usize) -> Self {
        let clips = kind
            .reachable_keys()
            .into_iter()
            .map(|key| {
                let clip = (0..frames)
                    .map(|index| Path::new(kind.asset_dir()).join(&key).join(index.to_string()))
                    .collect();
                (key, clip)
            })
            .collect();
        Self { clips }
    }

    /// Replaces the clip for `key`.
    pub fn insert(&mut self, key: impl Into<String>, frames: Vec<PathBuf>) {
        self.clips.insert(key.into(), frames);
    }

    /// Checks every key `kind` can reach has a non-empty clip.
    ///
    /// # Errors
    /// Returns [`AssetError::MissingClip`] or [`AssetError::EmptyClip`] for the
    /// first offending key.
    pub fn validate(&self, kind: EntityKind) -> Result<(), AssetError> {
        for status in kind.reachable_keys() {
            match self.clips.get(&status) {
                None => return Err(AssetError::MissingClip { kind, status }),
                Some(frames) if frames.is_empty() => {
                    return Err(AssetError::EmptyClip { kind, status })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Number of frames in the clip for `key`, or `0` if absent.
    #[must_use]
    pub fn clip_len(&self, key: &str) -> usize {
        self.clips.get(key).map_or(0, Vec::len)
    }

    /// Frames of the clip for `key`.
    #[must_use]
    pub fn frames(&self, key: &str) -> Option<&[PathBuf]> {
        self.clips.get(key).map(Vec::as_slice)
    }
}

/// Source of validated animation sets, one per entity kind.
pub trait AssetLoader {
    /// Loads and validates the animation set for `kind`.
    ///
    /// # Errors
    /// Returns an [`AssetError`] when the clips cannot be read or a reachable
    /// status is missing.
    fn load(&self, kind: EntityKind) -> Result<Arc<AnimationSet>, AssetError>;
}

/// Loader producing [`AnimationSet::uniform`] sets.
#[derive(Clone, Copy, Debug)]
pub struct UniformAssets {
    /// Frames per clip.
    pub frames: usize,
}

impl Default for UniformAssets {
    fn default() -> Self {
        Self { frames: 4 }
    }
}

impl AssetLoader for UniformAssets {
    fn load(&self, kind: EntityKind) -> Result<Arc<AnimationSet>, AssetError> {
        let set = AnimationSet::uniform(kind, self.frames);
        set.validate(kind)?;
        Ok(Arc::new(set))
    }
}

/// Loader reading `<root>/<kind>/<status>/<index>.<ext>` trees.
///
/// Each status directory becomes one clip; its files are ordered by the
/// numeric stem, so `10.png` follows `9.png`.
#[derive(Clone, Debug)]
pub struct DirectoryAssetLoader {
    root: PathBuf,
}

impl DirectoryAssetLoader {
    /// Creates a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_clip(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
        let mut numbered = Vec::new();
        for entry in read_dir(dir)? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let index = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u32>().ok())
                .ok_or_else(|| AssetError::UnnumberedFrame { path: path.clone() })?;
            numbered.push((index, path));
        }
        numbered.sort_by_key(|(index, _)| *index);
        Ok(numbered.into_iter().map(|(_, path)| path).collect())
    }
}

fn read_dir(dir: &Path) -> Result<Vec<fs::DirEntry>, AssetError> {
    let io_err = |source| AssetError::Io {
        path: dir.to_path_buf(),
        source,
    };
    fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)
}

impl AssetLoader for DirectoryAssetLoader {
    fn load(&self, kind: EntityKind) -> Result<Arc<AnimationSet>, AssetError> {
        let kind_dir = self.root.join(kind.asset_dir());
        let mut set = AnimationSet::default();
        for entry in read_dir(&kind_dir)? {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(status) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let frames = Self::read_clip(&path)?;
            debug!("{kind}: clip `{status}` has {} frames", frames.len());
            set.insert(status, frames);
        }
        set.validate(kind)?;
        info!("loaded {kind} animations from {}", kind_dir.display());
        Ok(Arc::new(set))
    }
}
