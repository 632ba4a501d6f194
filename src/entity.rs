//! Shared state of every animate actor.
//!
//! [`Body`] is the data aggregate the player and monsters are composed from:
//! float position, movement direction, hitbox, health and the animation
//! cursor. It also implements the health policy both kinds share: a hit only
//! counts while the body is vulnerable, and vulnerability returns once the
//! window since the last counted hit has elapsed.

use std::sync::Arc;

use glam::{IVec2, Vec2};
use log::debug;

use crate::assets::AnimationSet;
use crate::audio::{AudioCue, AudioOutput};
use crate::clock::GameClock;
use crate::components::{Facing, Status};
use crate::geometry::Rect;
use crate::numeric::{clip_len_as_f32, frame_slot, pixel_to_world, round_to_pixel};

/// Construction parameters for a [`Body`].
#[derive(Clone, Debug)]
pub struct BodySpec {
    /// Spawn point (centre of the sprite).
    pub spawn: Vec2,
    /// Sprite width and height.
    pub sprite_size: IVec2,
    /// Movement speed in pixels per second.
    pub speed: f32,
    /// Starting health.
    pub health: i32,
    /// Whether the body leaves the simulation once dead.
    pub despawn_on_death: bool,
    /// Animation clips for the body's kind.
    pub animations: Arc<AnimationSet>,
}

/// Position, health and animation state of an actor.
#[derive(Clone, Debug)]
pub struct Body {
    /// Float position; the hitbox centre is this rounded to the pixel grid.
    pub position: Vec2,
    /// Zero or a unit vector.
    pub direction: Vec2,
    /// Movement speed in pixels per second.
    pub speed: f32,
    /// Remaining health, never negative.
    pub health: i32,
    /// Whether the next hit counts.
    pub vulnerable: bool,
    /// Clock reading of the last counted hit.
    pub hit_time: Option<u64>,
    /// Sprite rectangle.
    pub rect: Rect,
    /// Collision rectangle, inset from `rect`.
    pub hitbox: Rect,
    /// Fractional animation cursor.
    pub frame_index: f32,
    /// Last facing.
    pub facing: Facing,
    /// Display status.
    pub status: Status,
    /// Whether the renderer should draw the hit silhouette this frame.
    pub flash: bool,
    /// Whether the body leaves the simulation once dead.
    pub despawn_on_death: bool,
    animations: Arc<AnimationSet>,
}

impl Body {
    /// Creates a body centred on `spec.spawn`.
    ///
    /// The hitbox is the sprite rectangle shrunk by half its width and half
    /// its height.
    #[must_use]
    pub fn new(spec: BodySpec) -> Self {
        let center = IVec2::new(round_to_pixel(spec.spawn.x), round_to_pixel(spec.spawn.y));
        let rect = Rect::centered(center, spec.sprite_size.x, spec.sprite_size.y);
        let hitbox = rect.inflate(-spec.sprite_size.x / 2, -spec.sprite_size.y / 2);
        Self {
            position: Vec2::new(
                pixel_to_world(hitbox.center_x()),
                pixel_to_world(hitbox.center_y()),
            ),
            direction: Vec2::ZERO,
            speed: spec.speed,
            health: spec.health.max(0),
            vulnerable: true,
            hit_time: None,
            rect,
            hitbox,
            frame_index: 0.0,
            facing: Facing::default(),
            status: Status::default(),
            flash: false,
            despawn_on_death: spec.despawn_on_death,
            animations: spec.animations,
        }
    }

    /// Hitbox centre in world space.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        Vec2::new(
            pixel_to_world(self.hitbox.center_x()),
            pixel_to_world(self.hitbox.center_y()),
        )
    }

    /// Animation key for the current status and facing.
    #[must_use]
    pub fn status_key(&self) -> String {
        self.status.key(self.facing)
    }

    /// Frame count of the clip for the current status.
    ///
    /// Sets are validated at load, so a missing clip only happens for hand
    /// built sets; it is treated as a single frame.
    #[must_use]
    pub fn clip_len(&self) -> usize {
        let key = self.status_key();
        let len = self.animations.clip_len(&key);
        if len == 0 {
            debug!("no clip for `{key}`; treating as one frame");
        }
        len.max(1)
    }

    /// Current frame slot within the clip.
    #[must_use]
    pub fn frame_slot(&self) -> usize {
        frame_slot(self.frame_index, self.clip_len())
    }

    /// Animation clips for the body's kind.
    #[must_use]
    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    /// Advances the animation cursor by `rate` frames per second.
    pub const fn advance_frame(&mut self, dt: f32, rate: f32) {
        self.frame_index += rate * dt;
    }

    /// Whether the cursor has run past the end of the clip.
    #[must_use]
    pub fn clip_finished(&self) -> bool {
        self.frame_index >= clip_len_as_f32(self.clip_len())
    }

    /// Pins the cursor to the last frame of the clip once it gets there.
    pub fn freeze_on_last_frame(&mut self) {
        let last = clip_len_as_f32(self.clip_len() - 1);
        if self.frame_index >= last {
            self.frame_index = last;
        }
    }

    /// Registers a hit.
    ///
    /// While vulnerable this costs one health, starts the invulnerability
    /// window and plays the hit cue. Otherwise nothing happens. Returns
    /// whether the hit counted.
    pub fn damage(&mut self, now_ms: u64, audio: &mut dyn AudioOutput) -> bool {
        if !self.vulnerable {
            return false;
        }
        self.health = (self.health - 1).max(0);
        self.vulnerable = false;
        self.hit_time = Some(now_ms);
        audio.play(AudioCue::Hit);
        true
    }

    /// Restores vulnerability once more than `window_ms` has passed since the
    /// last counted hit. Returns whether vulnerability was restored this call.
    pub fn restore_vulnerability(&mut self, clock: GameClock, window_ms: u64) -> bool {
        if self.vulnerable {
            return false;
        }
        let elapsed = self.hit_time.map_or(u64::MAX, |hit| clock.since(hit));
        if elapsed > window_ms {
            self.vulnerable = true;
            return true;
        }
        false
    }

    /// Updates the hit silhouette while invulnerable.
    ///
    /// Returns `true` on frames where the silhouette is shown.
    pub fn flicker(&mut self, clock: GameClock) -> bool {
        self.flash = !self.vulnerable && clock.flicker_phase();
        self.flash
    }

    /// Whether health has run out.
    #[must_use]
    pub const fn is_spent(&self) -> bool {
        self.health <= 0
    }
}
