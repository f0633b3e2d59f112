// src/error.rs

//! Error taxonomy for the transform, stack and graphics-context layers.
//!
//! Every error here is local and recoverable: the caller decides whether to
//! propagate it to the application or skip the offending operation.
//! Degenerate geometry (zero-length rotation axes, zero vectors) is not an
//! error and never shows up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A 3D-only operation was invoked on a 2D matrix.
    #[error("cannot use {op}() on a 2D matrix")]
    Unsupported2D { op: &'static str },
    /// An operation tried to combine a 2D and a 3D matrix.
    #[error("cannot combine a 2D matrix with a 3D matrix in {op}()")]
    DimensionMismatch { op: &'static str },
    /// A 3D matrix carries z-dependent or projective terms and cannot be
    /// narrowed to 2D without losing information.
    #[error("3D matrix is not a pure 2D affine map")]
    NotAffine2D,
    /// An operation that needs the inverse found a singular matrix.
    #[error("matrix is singular and cannot be inverted")]
    Singular,
    #[error("expected {expected} matrix elements, got {got}")]
    BadLength { expected: &'static str, got: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("transform stack overflow (capacity {capacity})")]
    Overflow { capacity: usize },
    #[error("transform stack underflow")]
    Underflow,
}

/// Errors surfaced by the graphics-context facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Stack(#[from] StackError),
}
