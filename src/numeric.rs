//! Numeric conversion helpers used across the project.
//!
//! Positions are integrated as `f32` but hitboxes live on the integer pixel
//! grid. These helpers centralise the lossy conversions between the two so
//! call-sites stay readable and the rounding rule stays consistent.

/// Round a world coordinate to the pixel grid.
///
/// Ties round to the even neighbour, matching the rounding the level data was
/// authored against. Non-finite input collapses to `0` and out-of-range input
/// is clamped into the `i32` domain.
///
/// # Examples
/// ```
/// use dustbowl::numeric::round_to_pixel;
/// assert_eq!(round_to_pixel(2.5), 2);
/// assert_eq!(round_to_pixel(3.5), 4);
/// assert_eq!(round_to_pixel(-1.6), -2);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn round_to_pixel(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = f64::from(value.round_ties_even());
    rounded.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Convert a pixel coordinate back into world space.
#[expect(
    clippy::cast_precision_loss,
    reason = "Pixel coordinates stay far below 2^24 in any authored level."
)]
#[must_use]
pub const fn pixel_to_world(value: i32) -> f32 {
    value as f32
}

/// Select the animation slot for a fractional frame index.
///
/// The slot is the floor of `frame_index`, clamped into `0..clip_len`. An
/// empty clip yields slot `0`.
///
/// # Examples
/// ```
/// use dustbowl::numeric::frame_slot;
/// assert_eq!(frame_slot(2.9, 4), 2);
/// assert_eq!(frame_slot(7.2, 4), 3);
/// assert_eq!(frame_slot(-0.5, 4), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The floored value is clamped to the clip bounds before casting."
)]
#[must_use]
pub fn frame_slot(frame_index: f32, clip_len: usize) -> usize {
    let last = clip_len.saturating_sub(1);
    if !frame_index.is_finite() || frame_index <= 0.0 {
        return 0;
    }
    let floored = frame_index.floor();
    if floored >= clip_len_as_f32(last) {
        return last;
    }
    floored as usize
}

/// Clip lengths expressed as frame indices.
#[expect(
    clippy::cast_precision_loss,
    reason = "Clip lengths are a handful of frames."
)]
#[must_use]
pub const fn clip_len_as_f32(clip_len: usize) -> f32 {
    clip_len as f32
}

/// Convert a frame delta in seconds to whole clock milliseconds.
///
/// Negative and non-finite deltas produce `0`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The delta is validated as finite, non-negative and bounded."
)]
#[must_use]
pub fn seconds_to_millis(seconds: f32) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (f64::from(seconds) * 1000.0).round().min(u64::MAX as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, 0)]
    #[case(1.5, 2)]
    #[case(-2.5, -2)]
    #[case(10.49, 10)]
    #[case(f32::NAN, 0)]
    #[case(f32::INFINITY, 0)]
    fn rounds_half_to_even(#[case] input: f32, #[case] expected: i32) {
        assert_eq!(round_to_pixel(input), expected);
    }

    #[rstest]
    fn huge_values_clamp() {
        assert_eq!(round_to_pixel(1e20), i32::MAX);
        assert_eq!(round_to_pixel(-1e20), i32::MIN);
    }

    #[rstest]
    #[case(0.0, 4, 0)]
    #[case(3.99, 4, 3)]
    #[case(4.0, 4, 3)]
    #[case(1.0, 0, 0)]
    fn frame_slot_stays_in_clip(#[case] index: f32, #[case] len: usize, #[case] expected: usize) {
        assert_eq!(frame_slot(index, len), expected);
    }

    #[rstest]
    #[case(1.0 / 60.0, 17)]
    #[case(0.0, 0)]
    #[case(-1.0, 0)]
    #[case(0.4, 400)]
    fn millis_from_seconds(#[case] seconds: f32, #[case] expected: u64) {
        assert_eq!(seconds_to_millis(seconds), expected);
    }
}
