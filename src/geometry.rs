//! Integer axis-aligned rectangles used for sprites and hitboxes.
//!
//! Rectangles live on the pixel grid. Centre accessors use floor division so
//! a rectangle of odd width has its centre on the left/top half, and the
//! centre setters are the exact inverse of the getters. Collision is strict
//! overlap: rectangles that merely share an edge do not collide. Edge and
//! centre arithmetic saturates at the `i32` range.

use glam::IVec2;
use serde::Deserialize;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

const fn half(length: i32) -> i32 {
    length.div_euclid(2)
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a `w` by `h` rectangle whose centre is `center`.
    ///
    /// # Examples
    /// ```
    /// use dustbowl::geometry::Rect;
    /// use glam::IVec2;
    /// let rect = Rect::centered(IVec2::new(100, 50), 20, 10);
    /// assert_eq!(rect, Rect::new(90, 45, 20, 10));
    /// ```
    #[must_use]
    pub const fn centered(center: IVec2, w: i32, h: i32) -> Self {
        Self {
            x: center.x.saturating_sub(half(w)),
            y: center.y.saturating_sub(half(h)),
            w,
            h,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Horizontal centre.
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.x.saturating_add(half(self.w))
    }

    /// Vertical centre.
    #[must_use]
    pub const fn center_y(&self) -> i32 {
        self.y.saturating_add(half(self.h))
    }

    /// Centre point.
    #[must_use]
    pub const fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    /// Moves the rectangle so its left edge sits at `left`.
    pub const fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Moves the rectangle so its right edge sits at `right`.
    pub const fn set_right(&mut self, right: i32) {
        self.x = right.saturating_sub(self.w);
    }

    /// Moves the rectangle so its top edge sits at `top`.
    pub const fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Moves the rectangle so its bottom edge sits at `bottom`.
    pub const fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom.saturating_sub(self.h);
    }

    /// Moves the rectangle horizontally so that `center_x()` returns `cx`.
    pub const fn set_center_x(&mut self, cx: i32) {
        self.x = cx.saturating_sub(half(self.w));
    }

    /// Moves the rectangle vertically so that `center_y()` returns `cy`.
    pub const fn set_center_y(&mut self, cy: i32) {
        self.y = cy.saturating_sub(half(self.h));
    }

    /// Moves the rectangle so that `center()` returns `center`.
    pub const fn set_center(&mut self, center: IVec2) {
        self.set_center_x(center.x);
        self.set_center_y(center.y);
    }

    /// Returns a copy grown by `dw` horizontally and `dh` vertically, keeping
    /// the centre fixed. Negative amounts shrink the rectangle.
    ///
    /// # Examples
    /// ```
    /// use dustbowl::geometry::Rect;
    /// let sprite = Rect::new(0, 0, 128, 128);
    /// let hitbox = sprite.inflate(-64, -64);
    /// assert_eq!(hitbox, Rect::new(32, 32, 64, 64));
    /// assert_eq!(hitbox.center(), sprite.center());
    /// ```
    #[must_use]
    pub const fn inflate(&self, dw: i32, dh: i32) -> Self {
        Self {
            x: self.x.saturating_sub(half(dw)),
            y: self.y.saturating_sub(half(dh)),
            w: self.w.saturating_add(dw),
            h: self.h.saturating_add(dh),
        }
    }

    /// Whether the rectangle has a positive area.
    #[must_use]
    pub const fn has_area(&self) -> bool {
        self.w > 0 && self.h > 0
    }

    /// Strict overlap test. Shared edges and empty rectangles never collide.
    ///
    /// # Examples
    /// ```
    /// use dustbowl::geometry::Rect;
    /// let a = Rect::new(0, 0, 10, 10);
    /// assert!(a.collides(&Rect::new(9, 9, 10, 10)));
    /// assert!(!a.collides(&Rect::new(10, 0, 10, 10)));
    /// ```
    #[must_use]
    pub const fn collides(&self, other: &Self) -> bool {
        self.has_area()
            && other.has_area()
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
