// src/graphics/shape.rs
//! User-space outlines for the rectangle, ellipse and arc primitives.
//!
//! Everything here works before the active transform is applied; the graphics
//! context maps the resulting points to device space.

use crate::math::TWO_PI;
use serde::{Deserialize, Serialize};

/// How the four numbers passed to `rect`/`ellipse`/`arc` are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    /// `(x, y)` is the top-left corner, then width and height.
    Corner,
    /// `(x, y)` and `(c, d)` are opposite corners.
    Corners,
    /// `(x, y)` is the center, then width and height.
    Center,
    /// `(x, y)` is the center, then half-width and half-height.
    Radius,
}

/// How an arc is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcMode {
    /// Filled as a pie, stroked as an open curve.
    Default,
    /// Filled as a chord, stroked as an open curve.
    Open,
    /// Filled and stroked closed by the chord.
    Chord,
    /// Filled and stroked closed through the center.
    Pie,
}

/// Axis-aligned bounds in user space with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub fn resolve(mode: ShapeMode, a: f32, b: f32, c: f32, d: f32) -> Self {
        let (x1, y1, x2, y2) = match mode {
            ShapeMode::Corner => (a, b, a + c, b + d),
            ShapeMode::Corners => (a, b, c, d),
            ShapeMode::Center => (a - c / 2.0, b - d / 2.0, a + c / 2.0, b + d / 2.0),
            ShapeMode::Radius => (a - c, b - d, a + c, b + d),
        };
        Bounds {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn radii(&self) -> (f32, f32) {
        ((self.x2 - self.x1) / 2.0, (self.y2 - self.y1) / 2.0)
    }

    /// Corners clockwise from the top-left (on a y-down surface).
    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.x1, self.y1),
            (self.x2, self.y1),
            (self.x2, self.y2),
            (self.x1, self.y2),
        ]
    }
}

/// Puts an arc's angles into canonical form: `0 <= start < TWO_PI` and a
/// sweep of at most one full turn. Returns `None` for arcs with nothing to
/// draw (non-finite angles or `stop < start`).
pub fn normalize_arc(start: f32, stop: f32) -> Option<(f32, f32)> {
    if !start.is_finite() || !stop.is_finite() || stop < start {
        return None;
    }
    let (mut start, mut stop) = (start, stop);
    if start < 0.0 {
        let turns = (-start / TWO_PI).ceil();
        start += turns * TWO_PI;
        stop += turns * TWO_PI;
    }
    if stop - start > TWO_PI {
        start = 0.0;
        stop = TWO_PI;
    }
    Some((start, stop))
}

/// `segments` points evenly spaced around the ellipse inscribed in `bounds`,
/// starting at angle 0. The polygon is implicitly closed.
pub fn ellipse_outline(bounds: &Bounds, segments: usize) -> Vec<(f32, f32)> {
    let (cx, cy) = bounds.center();
    let (rx, ry) = bounds.radii();
    let n = segments.max(3);
    (0..n)
        .map(|i| {
            let a = TWO_PI * i as f32 / n as f32;
            (cx + rx * a.cos(), cy + ry * a.sin())
        })
        .collect()
}

/// Points along the arc from `start` to `stop` (both included), using the
/// share of `segments` that the sweep covers. Angles grow clockwise on a
/// y-down surface.
pub fn arc_outline(bounds: &Bounds, start: f32, stop: f32, segments: usize) -> Vec<(f32, f32)> {
    let (cx, cy) = bounds.center();
    let (rx, ry) = bounds.radii();
    let sweep = stop - start;
    let n = ((segments.max(3) as f32 * sweep / TWO_PI).ceil() as usize).max(1);
    (0..=n)
        .map(|i| {
            let a = start + sweep * i as f32 / n as f32;
            (cx + rx * a.cos(), cy + ry * a.sin())
        })
        .collect()
}
