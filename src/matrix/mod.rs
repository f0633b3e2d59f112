// src/matrix/mod.rs

//! Affine transform matrices.
//!
//! Two concrete types implement the transform algebra:
//!
//! * [`Affine2D`]: a 3x2 matrix (implicit last row `0 0 1`) for planar work.
//! * [`Affine3D`]: a full 4x4 homogeneous matrix.
//!
//! Both follow the same composition convention. `apply(N)` right-multiplies
//! (`M' = M * N`, the new transform happens in the current local frame) and
//! `pre_apply(N)` left-multiplies (`M' = N * M`, an outer wrapper). Every
//! convenience transform (`translate`, `rotate`, `scale`, `shear_*`) is a
//! right-multiply.
//!
//! Operations that make sense on both types live on the [`Matrix`] trait.
//! 3D-only operations are inherent methods of `Affine3D`, so the type system
//! rejects them on a 2D matrix. Code that only learns the dimensionality at
//! runtime (the graphics context) holds an [`AnyMatrix`], which reports those
//! mismatches as [`MatrixError`] values instead.

pub mod affine2d;
pub mod affine3d;
mod format;

pub use affine2d::Affine2D;
pub use affine3d::Affine3D;

use crate::error::MatrixError;
use crate::vector::Vector3;
use log::warn;
use std::fmt;

/// Capabilities shared by the 2D and 3D matrix types.
pub trait Matrix: Copy + PartialEq + fmt::Debug + fmt::Display {
    /// Number of stored elements (6 or 16).
    const LEN: usize;

    fn identity() -> Self;

    /// Resets to the identity transform.
    fn reset(&mut self) {
        *self = Self::identity();
    }

    /// Copies the elements out in row-major order.
    fn to_vec(&self) -> Vec<f32>;

    /// Overwrites the elements from a row-major slice.
    fn set_slice(&mut self, source: &[f32]) -> Result<(), MatrixError>;

    /// Sets the planar affine part from six values laid out as
    /// `m00 m01 m02 / m10 m11 m12`.
    fn set_2d(&mut self, m00: f32, m01: f32, m02: f32, m10: f32, m11: f32, m12: f32);

    fn translate(&mut self, tx: f32, ty: f32);

    /// Rotation about the z axis, radians.
    fn rotate(&mut self, angle: f32);

    /// Same as [`Matrix::rotate`]; both types rotate in the XY plane.
    fn rotate_z(&mut self, angle: f32) {
        self.rotate(angle);
    }

    /// Uniform scale. On a 3D matrix this scales all three axes.
    fn scale(&mut self, s: f32);

    fn scale_xy(&mut self, sx: f32, sy: f32);

    fn shear_x(&mut self, angle: f32) {
        self.apply_2d(1.0, angle.tan(), 0.0, 0.0, 1.0, 0.0);
    }

    fn shear_y(&mut self, angle: f32) {
        self.apply_2d(1.0, 0.0, 0.0, angle.tan(), 1.0, 0.0);
    }

    /// `self = self * other`.
    fn apply(&mut self, other: &Self);

    /// `self = other * self`.
    fn pre_apply(&mut self, other: &Self);

    /// Right-multiplies by a planar affine transform given element-wise.
    fn apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32);

    /// Left-multiplies by a planar affine transform given element-wise.
    fn pre_apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32);

    /// Transforms a point. The 2D matrix ignores `z` and returns `z = 0`.
    fn mult(&self, v: Vector3) -> Vector3;

    /// In-place transpose. A 3x2 affine matrix has no affine transpose, so
    /// the 2D implementation reports [`MatrixError::Unsupported2D`].
    fn transpose(&mut self) -> Result<(), MatrixError>;

    fn determinant(&self) -> f32;

    /// Inverts in place. Returns `false` and leaves the matrix untouched when
    /// it is singular (see [`is_singular`]) or the inverse is not representable.
    fn invert(&mut self) -> bool;

    /// Value-returning form of [`Matrix::invert`].
    fn inverse(&self) -> Option<Self> {
        let mut out = *self;
        out.invert().then_some(out)
    }
}

/// Singularity test shared by both matrix types: a determinant that is zero,
/// infinite or NaN cannot produce a usable inverse. Tiny (even subnormal)
/// determinants are accepted; `invert` still refuses a result that overflows.
#[inline]
pub fn is_singular(det: f32) -> bool {
    det == 0.0 || !det.is_finite()
}

/// True when every element of an inverse is finite.
#[inline]
fn all_finite<const N: usize>(rows: &[[f32; N]]) -> bool {
    rows.iter().flatten().all(|v| v.is_finite())
}

/// A matrix whose dimensionality is chosen at runtime.
///
/// 3D-only operations on the `Flat` variant and 2D/3D mixing that would lose
/// information are rejected with a [`MatrixError`] and leave the matrix
/// unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyMatrix {
    Flat(Affine2D),
    Spatial(Affine3D),
}

impl Default for AnyMatrix {
    fn default() -> Self {
        AnyMatrix::Flat(Affine2D::identity())
    }
}

impl From<Affine2D> for AnyMatrix {
    fn from(m: Affine2D) -> Self {
        AnyMatrix::Flat(m)
    }
}

impl From<Affine3D> for AnyMatrix {
    fn from(m: Affine3D) -> Self {
        AnyMatrix::Spatial(m)
    }
}

// Dispatches a `Matrix` trait call to whichever variant is held.
macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            AnyMatrix::Flat($m) => $body,
            AnyMatrix::Spatial($m) => $body,
        }
    };
}

impl AnyMatrix {
    pub fn is_3d(&self) -> bool {
        matches!(self, AnyMatrix::Spatial(_))
    }

    /// Identity of the same dimensionality as `self`.
    pub fn identity_like(&self) -> Self {
        match self {
            AnyMatrix::Flat(_) => AnyMatrix::Flat(Affine2D::identity()),
            AnyMatrix::Spatial(_) => AnyMatrix::Spatial(Affine3D::identity()),
        }
    }

    pub fn reset(&mut self) {
        dispatch!(self, m => m.reset())
    }

    pub fn to_vec(&self) -> Vec<f32> {
        dispatch!(self, m => m.to_vec())
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        dispatch!(self, m => m.translate(tx, ty))
    }

    pub fn rotate(&mut self, angle: f32) {
        dispatch!(self, m => m.rotate(angle))
    }

    pub fn scale(&mut self, s: f32) {
        dispatch!(self, m => m.scale(s))
    }

    pub fn scale_xy(&mut self, sx: f32, sy: f32) {
        dispatch!(self, m => m.scale_xy(sx, sy))
    }

    pub fn shear_x(&mut self, angle: f32) {
        dispatch!(self, m => m.shear_x(angle))
    }

    pub fn shear_y(&mut self, angle: f32) {
        dispatch!(self, m => m.shear_y(angle))
    }

    pub fn apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32) {
        dispatch!(self, m => m.apply_2d(n00, n01, n02, n10, n11, n12))
    }

    pub fn pre_apply_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32) {
        dispatch!(self, m => m.pre_apply_2d(n00, n01, n02, n10, n11, n12))
    }

    pub fn mult(&self, v: Vector3) -> Vector3 {
        dispatch!(self, m => m.mult(v))
    }

    pub fn determinant(&self) -> f32 {
        dispatch!(self, m => m.determinant())
    }

    pub fn invert(&mut self) -> bool {
        dispatch!(self, m => m.invert())
    }

    pub fn transpose(&mut self) -> Result<(), MatrixError> {
        dispatch!(self, m => m.transpose())
    }

    /// `self = self * other`. A 2D receiver rejects a 3D argument; a 3D
    /// receiver embeds a 2D argument.
    pub fn apply(&mut self, other: &AnyMatrix) -> Result<(), MatrixError> {
        match (self, other) {
            (AnyMatrix::Flat(m), AnyMatrix::Flat(n)) => m.apply(n),
            (AnyMatrix::Spatial(m), AnyMatrix::Spatial(n)) => m.apply(n),
            (AnyMatrix::Spatial(m), AnyMatrix::Flat(n)) => m.apply(&Affine3D::from(*n)),
            (AnyMatrix::Flat(_), AnyMatrix::Spatial(_)) => {
                return Err(reject(MatrixError::DimensionMismatch { op: "apply" }));
            }
        }
        Ok(())
    }

    /// `self = other * self`, with the same dimensionality rules as `apply`.
    pub fn pre_apply(&mut self, other: &AnyMatrix) -> Result<(), MatrixError> {
        match (self, other) {
            (AnyMatrix::Flat(m), AnyMatrix::Flat(n)) => m.pre_apply(n),
            (AnyMatrix::Spatial(m), AnyMatrix::Spatial(n)) => m.pre_apply(n),
            (AnyMatrix::Spatial(m), AnyMatrix::Flat(n)) => m.pre_apply(&Affine3D::from(*n)),
            (AnyMatrix::Flat(_), AnyMatrix::Spatial(_)) => {
                return Err(reject(MatrixError::DimensionMismatch { op: "preApply" }));
            }
        }
        Ok(())
    }

    /// Replaces the contents with `other`. A 2D receiver accepts a 3D source
    /// only if it narrows losslessly.
    pub fn set(&mut self, other: &AnyMatrix) -> Result<(), MatrixError> {
        match (&mut *self, other) {
            (AnyMatrix::Flat(m), AnyMatrix::Flat(n)) => *m = *n,
            (AnyMatrix::Spatial(m), AnyMatrix::Spatial(n)) => *m = *n,
            (AnyMatrix::Spatial(m), AnyMatrix::Flat(n)) => *m = Affine3D::from(*n),
            (AnyMatrix::Flat(m), AnyMatrix::Spatial(n)) => *m = Affine2D::try_from(*n)?,
        }
        Ok(())
    }

    pub fn translate_3d(&mut self, tx: f32, ty: f32, tz: f32) -> Result<(), MatrixError> {
        self.spatial_mut("translate")?.translate_3d(tx, ty, tz);
        Ok(())
    }

    pub fn rotate_x(&mut self, angle: f32) -> Result<(), MatrixError> {
        self.spatial_mut("rotateX")?.rotate_x(angle);
        Ok(())
    }

    pub fn rotate_y(&mut self, angle: f32) -> Result<(), MatrixError> {
        self.spatial_mut("rotateY")?.rotate_y(angle);
        Ok(())
    }

    pub fn rotate_axis(&mut self, angle: f32, v0: f32, v1: f32, v2: f32) -> Result<(), MatrixError> {
        self.spatial_mut("rotate")?.rotate_axis(angle, v0, v1, v2);
        Ok(())
    }

    pub fn scale_3d(&mut self, sx: f32, sy: f32, sz: f32) -> Result<(), MatrixError> {
        self.spatial_mut("scale")?.scale_3d(sx, sy, sz);
        Ok(())
    }

    fn spatial_mut(&mut self, op: &'static str) -> Result<&mut Affine3D, MatrixError> {
        match self {
            AnyMatrix::Spatial(m) => Ok(m),
            AnyMatrix::Flat(_) => Err(reject(MatrixError::Unsupported2D { op })),
        }
    }
}

impl fmt::Display for AnyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, m => fmt::Display::fmt(m, f))
    }
}

fn reject(err: MatrixError) -> MatrixError {
    warn!("Rejected matrix operation: {}", err);
    err
}
