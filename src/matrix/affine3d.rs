// src/matrix/affine3d.rs

//! The 4x4 homogeneous transform.
//!
//! Inversion uses the adjugate method: sixteen signed 3x3 cofactors,
//! transposed and divided by the 4x4 determinant. The determinant itself is
//! expanded along the first row.

use super::{all_finite, format, is_singular, Affine2D, Matrix};
use crate::error::MatrixError;
use crate::math::EPSILON;
use crate::vector::Vector3;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

type Rows = [[f32; 4]; 4];

/// A full 4x4 homogeneous matrix, row-major (`m[row][col]`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine3D {
    pub m: Rows,
}

const IDENTITY_ROWS: Rows = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

impl Affine3D {
    pub const IDENTITY: Self = Self { m: IDENTITY_ROWS };

    pub const fn from_rows(m: Rows) -> Self {
        Self { m }
    }

    /// True when the matrix is the embedding of a planar affine map: z row
    /// and column are identity passthrough and the bottom row is `0 0 0 1`.
    pub fn is_planar(&self) -> bool {
        let m = &self.m;
        m[0][2] == 0.0
            && m[1][2] == 0.0
            && m[2] == [0.0, 0.0, 1.0, 0.0]
            && m[3] == [0.0, 0.0, 0.0, 1.0]
    }

    pub fn translate_3d(&mut self, tx: f32, ty: f32, tz: f32) {
        for row in self.m.iter_mut() {
            row[3] += tx * row[0] + ty * row[1] + tz * row[2];
        }
    }

    pub fn rotate_x(&mut self, angle: f32) {
        let (s, c) = angle.sin_cos();
        self.apply_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    pub fn rotate_y(&mut self, angle: f32) {
        let (s, c) = angle.sin_cos();
        self.apply_rows(&[
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    /// Rotation by `angle` about the axis `(v0, v1, v2)`.
    ///
    /// A near-zero axis (squared norm below `EPSILON`) leaves the matrix
    /// unchanged. An axis whose squared norm is off unit length by more than
    /// `EPSILON` is normalized first.
    pub fn rotate_axis(&mut self, angle: f32, v0: f32, v1: f32, v2: f32) {
        if let Some(rows) = axis_rotation(angle, v0, v1, v2) {
            self.apply_rows(&rows);
        } else {
            trace!("rotate() about a zero-length axis ignored");
        }
    }

    pub fn scale_3d(&mut self, sx: f32, sy: f32, sz: f32) {
        for row in self.m.iter_mut() {
            row[0] *= sx;
            row[1] *= sy;
            row[2] *= sz;
        }
    }

    /// `self = self * n` for a matrix given as rows.
    pub fn apply_rows(&mut self, n: &Rows) {
        self.m = multiply(&self.m, n);
    }

    /// `self = n * self` for a matrix given as rows.
    pub fn pre_apply_rows(&mut self, n: &Rows) {
        self.m = multiply(n, &self.m);
    }

    /// Transforms `[x, y, z]` as a point (implicit `w = 1`).
    pub fn mult3(&self, s: [f32; 3]) -> [f32; 3] {
        [
            self.mult_x3(s[0], s[1], s[2]),
            self.mult_y3(s[0], s[1], s[2]),
            self.mult_z3(s[0], s[1], s[2]),
        ]
    }

    /// Homogeneous transform of `[x, y, z, w]`.
    ///
    /// The perspective divide is not performed; callers that need it divide
    /// by the returned `w` themselves.
    pub fn mult4(&self, s: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (o, row) in out.iter_mut().zip(self.m.iter()) {
            *o = row[0] * s[0] + row[1] * s[1] + row[2] * s[2] + row[3] * s[3];
        }
        out
    }

    pub fn mult_x(&self, x: f32, y: f32) -> f32 {
        self.m[0][0] * x + self.m[0][1] * y + self.m[0][3]
    }

    pub fn mult_y(&self, x: f32, y: f32) -> f32 {
        self.m[1][0] * x + self.m[1][1] * y + self.m[1][3]
    }

    pub fn mult_x3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.row_dot(0, x, y, z, 1.0)
    }

    pub fn mult_y3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.row_dot(1, x, y, z, 1.0)
    }

    pub fn mult_z3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.row_dot(2, x, y, z, 1.0)
    }

    pub fn mult_w3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.row_dot(3, x, y, z, 1.0)
    }

    pub fn mult_x4(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        self.row_dot(0, x, y, z, w)
    }

    pub fn mult_y4(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        self.row_dot(1, x, y, z, w)
    }

    pub fn mult_z4(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        self.row_dot(2, x, y, z, w)
    }

    pub fn mult_w4(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        self.row_dot(3, x, y, z, w)
    }

    #[inline]
    fn row_dot(&self, r: usize, x: f32, y: f32, z: f32, w: f32) -> f32 {
        let row = &self.m[r];
        row[0] * x + row[1] * y + row[2] * z + row[3] * w
    }

    // Inverse-side helpers: each left-multiplies by the inverse of the named
    // transform, undoing it from the outside.

    pub fn inv_translate(&mut self, tx: f32, ty: f32, tz: f32) {
        self.pre_apply_rows(&[
            [1.0, 0.0, 0.0, -tx],
            [0.0, 1.0, 0.0, -ty],
            [0.0, 0.0, 1.0, -tz],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    pub fn inv_rotate_x(&mut self, angle: f32) {
        let (s, c) = (-angle).sin_cos();
        self.pre_apply_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    pub fn inv_rotate_y(&mut self, angle: f32) {
        let (s, c) = (-angle).sin_cos();
        self.pre_apply_rows(&[
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    pub fn inv_rotate_z(&mut self, angle: f32) {
        let (s, c) = (-angle).sin_cos();
        self.pre_apply_rows(&[
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    /// Inverse of [`Affine3D::rotate_axis`]; the axis is normalized the same way.
    pub fn inv_rotate(&mut self, angle: f32, v0: f32, v1: f32, v2: f32) {
        if let Some(rows) = axis_rotation(-angle, v0, v1, v2) {
            self.pre_apply_rows(&rows);
        }
    }

    pub fn inv_scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.pre_apply_rows(&[
            [1.0 / sx, 0.0, 0.0, 0.0],
            [0.0, 1.0 / sy, 0.0, 0.0],
            [0.0, 0.0, 1.0 / sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    /// Left-multiplies by the inverse of `n`. Returns `false` and leaves
    /// `self` unchanged when `n` is singular.
    pub fn inv_apply(&mut self, n: &Affine3D) -> bool {
        match n.inverse() {
            Some(inv) => {
                self.pre_apply(&inv);
                true
            }
            None => false,
        }
    }
}

impl Default for Affine3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix for Affine3D {
    const LEN: usize = 16;

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn to_vec(&self) -> Vec<f32> {
        self.m.iter().flatten().copied().collect()
    }

    /// Accepts either 16 elements or a 6-element planar layout, which is
    /// embedded with an identity z passthrough.
    fn set_slice(&mut self, source: &[f32]) -> Result<(), MatrixError> {
        match source.len() {
            6 => {
                self.set_2d(source[0], source[1], source[2], source[3], source[4], source[5]);
                Ok(())
            }
            16 => {
                for (i, row) in self.m.iter_mut().enumerate() {
                    row.copy_from_slice(&source[i * 4..i * 4 + 4]);
                }
                Ok(())
            }
            got => Err(MatrixError::BadLength {
                expected: "6 or 16",
                got,
            }),
        }
    }

    fn set_2d(&mut self, m00: f32, m01: f32, m02: f32, m10: f32, m11: f32, m12: f32) {
        self.m = embed_2d(m00, m01, m02, m10, m11, m12);
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.translate_3d(tx, ty, 0.0);
    }

    fn rotate(&mut self, angle: f32) {
        let (s, c) = angle.sin_cos();
        self.apply_rows(&[
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    fn scale(&mut self, s: f32) {
        self.scale_3d(s, s, s);
    }

    fn scale_xy(&mut self, sx: f32, sy: f32) {
        self.scale_3d(sx, sy, 1.0);
    }

    fn apply(&mut self, other: &Self) {
        self.apply_rows(&other.m);
    }

    fn pre_apply(&mut self, other: &Self) {
        self.pre_apply_rows(&other.m);
    }

    fn apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32) {
        self.apply_rows(&embed_2d(n00, n01, n02, n10, n11, n12));
    }

    fn pre_apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32) {
        self.pre_apply_rows(&embed_2d(n00, n01, n02, n10, n11, n12));
    }

    fn mult(&self, v: Vector3) -> Vector3 {
        Vector3::from(self.mult3(v.to_array()))
    }

    fn transpose(&mut self) -> Result<(), MatrixError> {
        for r in 0..4 {
            for c in (r + 1)..4 {
                let t = self.m[r][c];
                self.m[r][c] = self.m[c][r];
                self.m[c][r] = t;
            }
        }
        Ok(())
    }

    fn determinant(&self) -> f32 {
        let m = &self.m;
        let mut f = m[0][0]
            * (m[1][1] * m[2][2] * m[3][3] + m[1][2] * m[2][3] * m[3][1] + m[1][3] * m[2][1] * m[3][2]
                - m[1][3] * m[2][2] * m[3][1]
                - m[1][1] * m[2][3] * m[3][2]
                - m[1][2] * m[2][1] * m[3][3]);
        f -= m[0][1]
            * (m[1][0] * m[2][2] * m[3][3] + m[1][2] * m[2][3] * m[3][0] + m[1][3] * m[2][0] * m[3][2]
                - m[1][3] * m[2][2] * m[3][0]
                - m[1][0] * m[2][3] * m[3][2]
                - m[1][2] * m[2][0] * m[3][3]);
        f += m[0][2]
            * (m[1][0] * m[2][1] * m[3][3] + m[1][1] * m[2][3] * m[3][0] + m[1][3] * m[2][0] * m[3][1]
                - m[1][3] * m[2][1] * m[3][0]
                - m[1][0] * m[2][3] * m[3][1]
                - m[1][1] * m[2][0] * m[3][3]);
        f -= m[0][3]
            * (m[1][0] * m[2][1] * m[3][2] + m[1][1] * m[2][2] * m[3][0] + m[1][2] * m[2][0] * m[3][1]
                - m[1][2] * m[2][1] * m[3][0]
                - m[1][0] * m[2][2] * m[3][1]
                - m[1][1] * m[2][0] * m[3][2]);
        f
    }

    fn invert(&mut self) -> bool {
        let det = self.determinant();
        if is_singular(det) {
            warn!("Cannot invert singular 3D matrix (determinant {})", det);
            return false;
        }

        // Cofactor C[r][c] = (-1)^(r+c) * minor(r, c); the inverse is the
        // transposed cofactor matrix over the determinant.
        let mut inv = [[0.0f32; 4]; 4];
        for r in 0..4 {
            for c in 0..4 {
                let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
                inv[c][r] = sign * minor(&self.m, r, c) / det;
            }
        }
        if !all_finite(&inv) {
            warn!("Inverse of 3D matrix overflows (determinant {})", det);
            return false;
        }
        self.m = inv;
        trace!("Inverted 3D matrix (determinant {})", det);
        true
    }
}

impl From<Affine2D> for Affine3D {
    fn from(src: Affine2D) -> Self {
        let [[m00, m01, m02], [m10, m11, m12]] = src.m;
        Self::from_rows(embed_2d(m00, m01, m02, m10, m11, m12))
    }
}

impl From<[f32; 16]> for Affine3D {
    fn from(a: [f32; 16]) -> Self {
        let mut out = Self::IDENTITY;
        for (i, row) in out.m.iter_mut().enumerate() {
            row.copy_from_slice(&a[i * 4..i * 4 + 4]);
        }
        out
    }
}

impl fmt::Display for Affine3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_rows(f, &self.to_vec(), 4)
    }
}

fn embed_2d(m00: f32, m01: f32, m02: f32, m10: f32, m11: f32, m12: f32) -> Rows {
    [
        [m00, m01, 0.0, m02],
        [m10, m11, 0.0, m12],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

fn multiply(a: &Rows, b: &Rows) -> Rows {
    let mut out = [[0.0f32; 4]; 4];
    for (r, out_row) in out.iter_mut().enumerate() {
        for (c, cell) in out_row.iter_mut().enumerate() {
            *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c] + a[r][3] * b[3][c];
        }
    }
    out
}

/// Determinant of the 3x3 matrix left after deleting row `skip_r` and
/// column `skip_c`.
fn minor(m: &Rows, skip_r: usize, skip_c: usize) -> f32 {
    let mut sub = [[0.0f32; 3]; 3];
    for (sr, r) in (0..4).filter(|&r| r != skip_r).enumerate() {
        for (sc, c) in (0..4).filter(|&c| c != skip_c).enumerate() {
            sub[sr][sc] = m[r][c];
        }
    }
    determinant3x3(&sub)
}

fn determinant3x3(t: &[[f32; 3]; 3]) -> f32 {
    t[0][0] * (t[1][1] * t[2][2] - t[1][2] * t[2][1])
        + t[0][1] * (t[1][2] * t[2][0] - t[1][0] * t[2][2])
        + t[0][2] * (t[1][0] * t[2][1] - t[1][1] * t[2][0])
}

/// Rodrigues rotation block about `(v0, v1, v2)`, or `None` for a
/// degenerate axis.
fn axis_rotation(angle: f32, v0: f32, v1: f32, v2: f32) -> Option<Rows> {
    let (mut p0, mut p1, mut p2) = (v0, v1, v2);
    let norm2 = p0 * p0 + p1 * p1 + p2 * p2;
    if norm2 < EPSILON {
        return None;
    }
    if (norm2 - 1.0).abs() > EPSILON {
        let norm = norm2.sqrt();
        p0 /= norm;
        p1 /= norm;
        p2 /= norm;
    }

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    Some([
        [t * p0 * p0 + c, t * p0 * p1 - s * p2, t * p0 * p2 + s * p1, 0.0],
        [t * p0 * p1 + s * p2, t * p1 * p1 + c, t * p1 * p2 - s * p0, 0.0],
        [t * p0 * p2 - s * p1, t * p1 * p2 + s * p0, t * p2 * p2 + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}
