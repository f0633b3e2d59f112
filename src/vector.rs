// src/vector.rs

//! Defines `Vector3`, the 3-component point/direction value used by the matrix
//! `mult` routines and by sketch code for motion and geometry.
//!
//! `Vector3` is a plain `Copy` value. In-place mutators return `&mut Self` so
//! they can be chained; out-of-place variants are provided through the
//! arithmetic operators and a handful of associated functions.

use crate::math::{lerp, PI};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A vector in the XY plane (`z = 0`).
    #[inline(always)]
    pub const fn new2(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Unit vector in the XY plane pointing at `angle` radians.
    pub fn from_angle(angle: f32) -> Self {
        Self::new2(angle.cos(), angle.sin())
    }

    /// Unit vector on the sphere given an azimuth `angle` and a height
    /// `z` in `[-1, 1]`. Feeding uniformly distributed inputs yields a
    /// uniformly distributed direction.
    pub fn from_spherical(angle: f32, z: f32) -> Self {
        let r = (1.0 - z * z).max(0.0).sqrt();
        Self::new(r * angle.cos(), r * angle.sin(), z)
    }

    /// Reads up to three components; missing ones are 0.
    pub fn from_slice(source: &[f32]) -> Self {
        let mut v = Self::ZERO;
        for (dst, src) in [&mut v.x, &mut v.y, &mut v.z].into_iter().zip(source) {
            *dst = *src;
        }
        v
    }

    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Sets `x`/`y` and zeroes `z`.
    pub fn set2(&mut self, x: f32, y: f32) -> &mut Self {
        self.set(x, y, 0.0)
    }

    #[inline(always)]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn add_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x += x;
        self.y += y;
        self.z += z;
        self
    }

    pub fn sub_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x -= x;
        self.y -= y;
        self.z -= z;
        self
    }

    #[inline(always)]
    pub fn mag_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Length, accumulated in f64 so the squares of any finite f32
    /// components neither overflow nor underflow.
    #[inline]
    pub fn mag(&self) -> f32 {
        self.mag_f64() as f32
    }

    #[inline]
    fn mag_f64(&self) -> f64 {
        let [x, y, z] = self.to_f64();
        (x * x + y * y + z * z).sqrt()
    }

    #[inline(always)]
    fn to_f64(self) -> [f64; 3] {
        [self.x as f64, self.y as f64, self.z as f64]
    }

    /// Euclidean distance between two points.
    pub fn dist(&self, other: Self) -> f32 {
        let [ax, ay, az] = self.to_f64();
        let [bx, by, bz] = other.to_f64();
        let (dx, dy, dz) = (ax - bx, ay - by, az - bz);
        (dx * dx + dy * dy + dz * dz).sqrt() as f32
    }

    #[inline(always)]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline(always)]
    pub fn dot_xyz(&self, x: f32, y: f32, z: f32) -> f32 {
        self.x * x + self.y * y + self.z * z
    }

    #[inline(always)]
    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - other.y * self.z,
            self.z * other.x - other.z * self.x,
            self.x * other.y - other.x * self.y,
        )
    }

    /// Writes `self × other` into `target` and returns it.
    pub fn cross_into<'a>(&self, other: Self, target: &'a mut Self) -> &'a mut Self {
        *target = self.cross(other);
        target
    }

    /// Scales to unit length in place. A zero or already-unit vector is left
    /// untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let m = self.mag_f64();
        if m != 0.0 && m as f32 != 1.0 {
            *self = self.scaled_f64(1.0 / m);
        }
        self
    }

    /// Out-of-place normalization. A zero vector is copied unchanged.
    pub fn normalize_into<'a>(&self, target: &'a mut Self) -> &'a mut Self {
        let m = self.mag_f64();
        *target = if m > 0.0 { self.scaled_f64(1.0 / m) } else { *self };
        target
    }

    fn scaled_f64(&self, k: f64) -> Self {
        let [x, y, z] = self.to_f64();
        Self::new((x * k) as f32, (y * k) as f32, (z * k) as f32)
    }

    #[inline]
    pub fn normalized(&self) -> Self {
        let mut out = *self;
        out.normalize();
        out
    }

    /// Caps the magnitude at `max`.
    pub fn limit(&mut self, max: f32) -> &mut Self {
        if self.mag_f64() > max as f64 {
            self.normalize();
            *self *= max;
        }
        self
    }

    pub fn set_mag(&mut self, len: f32) -> &mut Self {
        self.normalize();
        *self *= len;
        self
    }

    pub fn set_mag_into<'a>(&self, target: &'a mut Self, len: f32) -> &'a mut Self {
        self.normalize_into(target);
        *target *= len;
        target
    }

    /// 2D heading (`atan2(y, x)`), ignoring `z`.
    pub fn heading(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Rotates the XY components by `theta` radians in place.
    pub fn rotate(&mut self, theta: f32) -> &mut Self {
        let (s, c) = theta.sin_cos();
        let x = self.x;
        self.x = x * c - self.y * s;
        self.y = x * s + self.y * c;
        self
    }

    /// Per-component interpolation toward `target`.
    pub fn lerp(&mut self, target: Self, amt: f32) -> &mut Self {
        self.lerp_xyz(target.x, target.y, target.z, amt)
    }

    pub fn lerp_xyz(&mut self, x: f32, y: f32, z: f32, amt: f32) -> &mut Self {
        self.x = lerp(self.x, x, amt);
        self.y = lerp(self.y, y, amt);
        self.z = lerp(self.z, z, amt);
        self
    }

    /// Out-of-place interpolation between two vectors.
    pub fn lerp_between(a: Self, b: Self, amt: f32) -> Self {
        let mut v = a;
        v.lerp(b, amt);
        v
    }

    pub fn distance(a: Self, b: Self) -> f32 {
        a.dist(b)
    }

    /// Unsigned angle between two vectors in `[0, π]`.
    ///
    /// A zero-length input yields 0. The cosine is clamped to the valid `acos`
    /// domain, so parallel and anti-parallel inputs return exactly 0 and π.
    pub fn angle_between(a: Self, b: Self) -> f32 {
        // f64 covers the products of any finite f32 inputs.
        let denom = a.mag_f64() * b.mag_f64();
        if denom == 0.0 || !denom.is_finite() {
            return 0.0;
        }
        let [ax, ay, az] = a.to_f64();
        let [bx, by, bz] = b.to_f64();
        let amt = (ax * bx + ay * by + az * bz) / denom;
        if amt <= -1.0 {
            PI
        } else if amt >= 1.0 {
            0.0
        } else {
            amt.acos() as f32
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {}, {} ]", self.x, self.y, self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<(f32, f32)> for Vector3 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new2(x, y)
    }
}

impl Add for Vector3 {
    type Output = Self;
    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, v: Self) {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, v: Self) {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    fn mul(self, n: f32) -> Self {
        Self::new(self.x * n, self.y * n, self.z * n)
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, n: f32) {
        self.x *= n;
        self.y *= n;
        self.z *= n;
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;
    fn div(self, n: f32) -> Self {
        Self::new(self.x / n, self.y / n, self.z / n)
    }
}

impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, n: f32) {
        self.x /= n;
        self.y /= n;
        self.z /= n;
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests;
