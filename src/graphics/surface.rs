// src/graphics/surface.rs
//! Surface trait - the device-space drawing backend behind a graphics context.
//!
//! The graphics context owns every piece of user-space state (the active
//! matrix, the transform stack, style colors and flags) and hands the surface
//! geometry that has already been transformed into device coordinates. A
//! surface therefore never sees a matrix; it only fills and strokes point lists.

use crate::color::{ColorChannels, PColor};
use serde::{Deserialize, Serialize};

/// A point in device space.
pub type DevicePoint = [f32; 2];

/// How two stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// How an open stroke ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    #[default]
    Round,
    /// Square end extended by half the stroke weight.
    Project,
    /// Square end flush with the endpoint.
    Square,
}

/// Device-space drawing backend.
///
/// Style calls (`set_fill`, `set_stroke`, `set_stroke_weight`,
/// `set_stroke_style`) change state that applies to the geometry calls that
/// follow them, the way a canvas context keeps its current paint.
pub trait Surface {
    /// The fill paint changed. Called once per logical color write.
    fn set_fill(&mut self, color: &ColorChannels);

    /// The stroke paint changed. Called once per logical color write.
    fn set_stroke(&mut self, color: &ColorChannels);

    fn set_stroke_weight(&mut self, weight: f32);

    fn set_stroke_style(&mut self, join: StrokeJoin, cap: StrokeCap);

    /// Fills the closed polygon through `points` with the current fill.
    fn fill_polygon(&mut self, points: &[DevicePoint]);

    /// Strokes the polyline through `points` with the current stroke,
    /// closing it back to the first point when `closed` is set.
    fn stroke_polyline(&mut self, points: &[DevicePoint], closed: bool);

    /// Replaces every pixel with `color`, ignoring the active transform.
    fn clear(&mut self, color: PColor);

    /// Width and height in device pixels.
    fn size(&self) -> (u32, u32);
}
