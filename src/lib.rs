// src/lib.rs

//! Affine transform, vector and color-state core for a Processing-style
//! drawing API.
//!
//! The crate is organised bottom-up:
//!
//! * [`math`] and [`vector`]: scalar helpers and the `Vector3` value type.
//! * [`matrix`]: 2D (3x2) and 3D (4x4) affine matrices with a shared
//!   composition convention.
//! * [`color`]: packed ARGB colors and the synchronized `ColorChannels` model.
//! * [`stack`]: the bounded transform stack behind `push_matrix`/`pop_matrix`.
//! * [`graphics`]: the graphics context that runs user-space geometry through
//!   the active matrix into a device-space [`graphics::Surface`].
//!
//! Everything is single-threaded: a context and its colors are meant to be
//! owned by one drawing loop.

pub mod color;
pub mod config;
pub mod error;
pub mod graphics;
pub mod math;
pub mod matrix;
pub mod stack;
pub mod vector;

pub use color::{Channel, ColorChannels, PColor};
pub use error::{GraphicsError, MatrixError, StackError};
pub use graphics::{GraphicsContext, RecordingSurface, Surface};
pub use matrix::{Affine2D, Affine3D, AnyMatrix, Matrix};
pub use stack::TransformStack;
pub use vector::Vector3;
