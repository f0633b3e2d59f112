// src/math.rs

//! Numeric constants and small scalar helpers shared by the vector, matrix
//! and color modules.
//!
//! All angles in this crate are radians. `DEG_TO_RAD` / `RAD_TO_DEG` exist for
//! callers that speak degrees at the edge.

/// Tolerance used for degenerate-axis detection and approximate comparisons.
pub const EPSILON: f32 = 0.0001;

pub const PI: f32 = std::f32::consts::PI;
pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;
pub const THIRD_PI: f32 = std::f32::consts::FRAC_PI_3;
pub const QUARTER_PI: f32 = std::f32::consts::FRAC_PI_4;
pub const TWO_PI: f32 = std::f32::consts::TAU;
pub const TAU: f32 = std::f32::consts::TAU;

pub const DEG_TO_RAD: f32 = PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / PI;

/// Linear interpolation: `start + (stop - start) * amt`.
///
/// `amt` is not clamped; values outside `[0, 1]` extrapolate.
#[inline]
pub fn lerp(start: f32, stop: f32, amt: f32) -> f32 {
    start + (stop - start) * amt
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike `f32::clamp`, this never panics when `min > max`; the result is
/// `max` in that case, matching `max(min, min(value, max))` evaluated
/// inside-out.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(value.min(max))
}

/// Integer counterpart of [`clamp`].
#[inline]
pub fn clamp_i32(value: i32, min: i32, max: i32) -> i32 {
    min.max(value.min(max))
}

#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Absolute-difference comparison with an explicit tolerance.
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}
