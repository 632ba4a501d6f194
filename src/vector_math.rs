//! Basic vector math helper functions.
//! Small helpers for normalising directions and measuring offsets between
//! entities.
use glam::Vec2;

/// Tolerance used when checking that a direction has unit length.
pub const UNIT_EPSILON: f32 = 1e-4;

/// Returns the unit vector pointing along `vector`.
///
/// Zero, near-zero and non-finite vectors map to [`Vec2::ZERO`] instead of
/// dividing by zero.
///
/// # Examples
///
/// ```
/// use dustbowl::vector_math::normalize_or_zero;
/// use glam::Vec2;
/// let unit = normalize_or_zero(Vec2::new(3.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.y - 0.8).abs() < 1e-6);
///
/// assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
/// ```
#[must_use]
pub fn normalize_or_zero(vector: Vec2) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Distance and unit direction from `from` to `to`.
///
/// When both points coincide the direction is the zero vector.
///
/// # Examples
///
/// ```
/// use dustbowl::vector_math::distance_and_direction;
/// use glam::Vec2;
/// let (distance, direction) = distance_and_direction(Vec2::ZERO, Vec2::new(0.0, -5.0));
/// assert!((distance - 5.0).abs() < f32::EPSILON);
/// assert_eq!(direction, Vec2::new(0.0, -1.0));
/// ```
#[must_use]
pub fn distance_and_direction(from: Vec2, to: Vec2) -> (f32, Vec2) {
    let offset = to - from;
    let distance = offset.length();
    if distance == 0.0 {
        return (0.0, Vec2::ZERO);
    }
    (distance, normalize_or_zero(offset))
}

/// Whether `vector` is either zero or of unit length.
#[must_use]
pub fn is_unit_or_zero(vector: Vec2) -> bool {
    vector == Vec2::ZERO || (vector.length() - 1.0).abs() <= UNIT_EPSILON
}
