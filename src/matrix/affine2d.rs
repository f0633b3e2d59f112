// src/matrix/affine2d.rs

//! The planar affine transform.

use super::{all_finite, format, is_singular, Affine3D, Matrix};
use crate::error::MatrixError;
use crate::vector::Vector3;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3x2 affine matrix:
///
/// ```text
/// | m00 m01 m02 |
/// | m10 m11 m12 |
/// ```
///
/// applied to the column vector `(x, y, 1)`. The implicit last row is always
/// `(0, 0, 1)`, so the map can never become projective.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine2D {
    /// Row-major elements.
    pub m: [[f32; 3]; 2],
}

impl Affine2D {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    };

    pub const fn new(m00: f32, m01: f32, m02: f32, m10: f32, m11: f32, m12: f32) -> Self {
        Self {
            m: [[m00, m01, m02], [m10, m11, m12]],
        }
    }

    /// Applies the transform and returns only the x coordinate.
    #[inline]
    pub fn mult_x(&self, x: f32, y: f32) -> f32 {
        self.m[0][0] * x + self.m[0][1] * y + self.m[0][2]
    }

    /// Applies the transform and returns only the y coordinate.
    #[inline]
    pub fn mult_y(&self, x: f32, y: f32) -> f32 {
        self.m[1][0] * x + self.m[1][1] * y + self.m[1][2]
    }

    /// Transforms an `[x, y]` pair.
    pub fn mult_array(&self, source: [f32; 2]) -> [f32; 2] {
        [
            self.mult_x(source[0], source[1]),
            self.mult_y(source[0], source[1]),
        ]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when the linear part is anything other than the identity, i.e.
    /// the transform rotates, scales or shears rather than purely translating.
    pub fn is_warped(&self) -> bool {
        let [[m00, m01, _], [m10, m11, _]] = self.m;
        m00 != 1.0 || m01 != 0.0 || m10 != 0.0 || m11 != 1.0
    }
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix for Affine2D {
    const LEN: usize = 6;

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn to_vec(&self) -> Vec<f32> {
        self.m.iter().flatten().copied().collect()
    }

    fn set_slice(&mut self, source: &[f32]) -> Result<(), MatrixError> {
        if source.len() != Self::LEN {
            return Err(MatrixError::BadLength {
                expected: "6",
                got: source.len(),
            });
        }
        self.set_2d(source[0], source[1], source[2], source[3], source[4], source[5]);
        Ok(())
    }

    fn set_2d(&mut self, m00: f32, m01: f32, m02: f32, m10: f32, m11: f32, m12: f32) {
        *self = Self::new(m00, m01, m02, m10, m11, m12);
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        for row in self.m.iter_mut() {
            row[2] += tx * row[0] + ty * row[1];
        }
    }

    fn rotate(&mut self, angle: f32) {
        let (s, c) = angle.sin_cos();
        for row in self.m.iter_mut() {
            let (t0, t1) = (row[0], row[1]);
            row[0] = c * t0 + s * t1;
            row[1] = -s * t0 + c * t1;
        }
    }

    fn scale(&mut self, s: f32) {
        self.scale_xy(s, s);
    }

    fn scale_xy(&mut self, sx: f32, sy: f32) {
        for row in self.m.iter_mut() {
            row[0] *= sx;
            row[1] *= sy;
        }
    }

    fn apply(&mut self, other: &Self) {
        let [[n00, n01, n02], [n10, n11, n12]] = other.m;
        self.apply_2d(n00, n01, n02, n10, n11, n12);
    }

    fn pre_apply(&mut self, other: &Self) {
        let [[n00, n01, n02], [n10, n11, n12]] = other.m;
        self.pre_apply_2d(n00, n01, n02, n10, n11, n12);
    }

    fn apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32) {
        for row in self.m.iter_mut() {
            let (t0, t1) = (row[0], row[1]);
            row[0] = t0 * n00 + t1 * n10;
            row[1] = t0 * n01 + t1 * n11;
            row[2] += t0 * n02 + t1 * n12;
        }
    }

    fn pre_apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32) {
        let [[m00, m01, m02], [m10, m11, m12]] = self.m;
        self.m = [
            [
                n00 * m00 + n01 * m10,
                n00 * m01 + n01 * m11,
                n00 * m02 + n01 * m12 + n02,
            ],
            [
                n10 * m00 + n11 * m10,
                n10 * m01 + n11 * m11,
                n10 * m02 + n11 * m12 + n12,
            ],
        ];
    }

    fn mult(&self, v: Vector3) -> Vector3 {
        Vector3::new2(self.mult_x(v.x, v.y), self.mult_y(v.x, v.y))
    }

    fn transpose(&mut self) -> Result<(), MatrixError> {
        warn!("transpose() rejected on a 2D matrix");
        Err(MatrixError::Unsupported2D { op: "transpose" })
    }

    fn determinant(&self) -> f32 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    fn invert(&mut self) -> bool {
        let det = self.determinant();
        if is_singular(det) {
            warn!("Cannot invert singular 2D matrix (determinant {})", det);
            return false;
        }
        let [[t00, t01, t02], [t10, t11, t12]] = self.m;
        let inv = [
            [t11 / det, -t01 / det, (t01 * t12 - t11 * t02) / det],
            [-t10 / det, t00 / det, (t10 * t02 - t00 * t12) / det],
        ];
        if !all_finite(&inv) {
            warn!("Inverse of 2D matrix overflows (determinant {})", det);
            return false;
        }
        self.m = inv;
        trace!("Inverted 2D matrix (determinant {})", det);
        true
    }
}

impl From<[f32; 6]> for Affine2D {
    fn from(a: [f32; 6]) -> Self {
        Self::new(a[0], a[1], a[2], a[3], a[4], a[5])
    }
}

/// Narrows a 3D matrix that only encodes a planar affine map.
///
/// The z row and column must be the identity passthrough and the bottom row
/// `(0, 0, 0, 1)`; anything else would be silently dropped, so it is refused.
impl TryFrom<Affine3D> for Affine2D {
    type Error = MatrixError;

    fn try_from(src: Affine3D) -> Result<Self, Self::Error> {
        if !src.is_planar() {
            warn!("Refusing to narrow a non-planar 3D matrix to 2D");
            return Err(MatrixError::NotAffine2D);
        }
        let m = &src.m;
        Ok(Self::new(m[0][0], m[0][1], m[0][3], m[1][0], m[1][1], m[1][3]))
    }
}

impl fmt::Display for Affine2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_rows(f, &self.to_vec(), 3)
    }
}
