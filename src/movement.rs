//! Axis-separated movement against static obstacles.
//!
//! Each axis is integrated and resolved on its own: the body advances along
//! x, is clamped against every obstacle it now overlaps, and only then
//! advances along y. A diagonal step into the inside of a corner therefore
//! never ends inside either wall.

use log::trace;

use crate::entity::Body;
use crate::geometry::Rect;
use crate::numeric::{pixel_to_world, round_to_pixel};
use crate::vector_math::normalize_or_zero;

/// Static blocking geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    /// Blocking rectangle.
    pub hitbox: Rect,
}

impl Obstacle {
    /// Wraps `hitbox`.
    #[must_use]
    pub const fn new(hitbox: Rect) -> Self {
        Self { hitbox }
    }
}

impl From<Rect> for Obstacle {
    fn from(hitbox: Rect) -> Self {
        Self::new(hitbox)
    }
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Body {
    /// Moves the body by `direction * speed * dt`, one axis at a time.
    ///
    /// The direction is normalised first; a zero direction stays zero.
    pub fn integrate(&mut self, dt: f32, obstacles: &[Obstacle]) {
        self.direction = normalize_or_zero(self.direction);
        let step = self.direction * self.speed * dt;

        self.position.x += step.x;
        self.hitbox.set_center_x(round_to_pixel(self.position.x));
        self.rect.set_center_x(self.hitbox.center_x());
        self.resolve(Axis::Horizontal, obstacles);

        self.position.y += step.y;
        self.hitbox.set_center_y(round_to_pixel(self.position.y));
        self.rect.set_center_y(self.hitbox.center_y());
        self.resolve(Axis::Vertical, obstacles);
    }

    fn resolve(&mut self, axis: Axis, obstacles: &[Obstacle]) {
        let heading = match axis {
            Axis::Horizontal => self.direction.x,
            Axis::Vertical => self.direction.y,
        };
        if heading == 0.0 {
            return;
        }
        for obstacle in obstacles {
            if !obstacle.hitbox.collides(&self.hitbox) {
                continue;
            }
            let wall = obstacle.hitbox;
            trace!("clamping {:?} against {wall:?} on {axis:?}", self.hitbox);
            match axis {
                Axis::Horizontal => {
                    if heading > 0.0 {
                        self.hitbox.set_right(wall.left());
                    } else {
                        self.hitbox.set_left(wall.right());
                    }
                    self.rect.set_center_x(self.hitbox.center_x());
                    self.position.x = pixel_to_world(self.hitbox.center_x());
                }
                Axis::Vertical => {
                    if heading > 0.0 {
                        self.hitbox.set_bottom(wall.top());
                    } else {
                        self.hitbox.set_top(wall.bottom());
                    }
                    self.rect.set_center_y(self.hitbox.center_y());
                    self.position.y = pixel_to_world(self.hitbox.center_y());
                }
            }
        }
    }
}
