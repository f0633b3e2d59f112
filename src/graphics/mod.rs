// src/graphics/mod.rs

//! The graphics context: the coordinate pipeline between a sketch's user-space
//! drawing calls and a device-space [`Surface`].
//!
//! A [`GraphicsContext`] owns the active transform, the transform stack and
//! the style state. Transform calls mutate the active matrix; primitives push
//! their user-space vertices through it and hand the device-space result to
//! the surface. Fill and stroke colors are [`ColorChannels`] whose change
//! listeners forward every write straight to the surface, so the backend's
//! paint is always the color the sketch last set.

pub mod recording;
pub mod shape;
pub mod surface;

pub use recording::{DrawCommand, RecordingSurface};
pub use shape::{ArcMode, ShapeMode};
pub use surface::{DevicePoint, StrokeCap, StrokeJoin, Surface};

use crate::color::{named, ColorChannels, PColor};
use crate::config::{Config, RenderMode};
use crate::error::{GraphicsError, MatrixError};
use crate::math::EPSILON;
use crate::matrix::{Affine2D, Affine3D, AnyMatrix, Matrix};
use crate::stack::TransformStack;
use crate::vector::Vector3;
use bitflags::bitflags;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use shape::{arc_outline, ellipse_outline, normalize_arc, Bounds};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

bitflags! {
    /// Which paints are active for the primitives that follow.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StyleFlags: u8 {
        const DO_FILL   = 1 << 0;
        const DO_STROKE = 1 << 1;
        const DO_TINT   = 1 << 2;
    }
}

impl Default for StyleFlags {
    fn default() -> Self {
        StyleFlags::DO_FILL | StyleFlags::DO_STROKE
    }
}

/// Current, previous and pending pointer positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct MouseState {
    x: f32,
    y: f32,
    px: f32,
    py: f32,
    event_x: f32,
    event_y: f32,
}

pub struct GraphicsContext<S: Surface + 'static> {
    surface: Rc<RefCell<S>>,
    matrix: AnyMatrix,
    stack: TransformStack<AnyMatrix>,

    fill: ColorChannels,
    stroke: ColorChannels,
    tint: ColorChannels,
    background: ColorChannels,
    ambient: ColorChannels,
    specular: ColorChannels,
    emissive: ColorChannels,
    shininess: f32,

    flags: StyleFlags,
    stroke_weight: f32,
    stroke_join: StrokeJoin,
    stroke_cap: StrokeCap,
    rect_mode: ShapeMode,
    ellipse_mode: ShapeMode,
    ellipse_segments: usize,

    mouse: MouseState,
}

impl<S: Surface + 'static> GraphicsContext<S> {
    /// Builds a context over `surface` and pushes the configured initial fill,
    /// stroke and stroke style to it.
    pub fn new(surface: S, config: &Config) -> Self {
        let surface = Rc::new(RefCell::new(surface));
        let track_alpha = config.color.track_alpha;
        let matrix = match config.surface.mode {
            RenderMode::Flat => AnyMatrix::Flat(Affine2D::identity()),
            RenderMode::Spatial => AnyMatrix::Spatial(Affine3D::identity()),
        };

        let mut fill = ColorChannels::new(track_alpha);
        let sink = Rc::clone(&surface);
        fill.set_listener(Box::new(move |c| sink.borrow_mut().set_fill(c)));

        let mut stroke = ColorChannels::new(track_alpha);
        let sink = Rc::clone(&surface);
        stroke.set_listener(Box::new(move |c| sink.borrow_mut().set_stroke(c)));

        let mut ctx = GraphicsContext {
            surface,
            matrix,
            stack: TransformStack::new(config.transform.stack_capacity),
            fill,
            stroke,
            tint: ColorChannels::with_packed(track_alpha, config.color.tint.0),
            background: ColorChannels::with_packed(track_alpha, config.color.background.0),
            ambient: ColorChannels::new(track_alpha),
            specular: ColorChannels::new(track_alpha),
            emissive: ColorChannels::new(track_alpha),
            shininess: 0.0,
            flags: StyleFlags::default(),
            stroke_weight: config.surface.stroke_weight,
            stroke_join: StrokeJoin::default(),
            stroke_cap: StrokeCap::default(),
            rect_mode: ShapeMode::Corner,
            ellipse_mode: ShapeMode::Center,
            ellipse_segments: config.surface.ellipse_segments,
            mouse: MouseState::default(),
        };

        ctx.fill.set_packed(config.color.fill.0);
        ctx.stroke.set_packed(config.color.stroke.0);
        ctx.stroke_weight(config.surface.stroke_weight);
        ctx.surface
            .borrow_mut()
            .set_stroke_style(ctx.stroke_join, ctx.stroke_cap);
        debug!(
            "Graphics context ready: {:?} mode, stack capacity {}",
            config.surface.mode,
            ctx.stack.capacity()
        );
        ctx
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    /// Mutable access to the backend. Takes `&mut self` so it can never
    /// overlap a [`GraphicsContext::surface`] borrow.
    pub fn surface_mut(&mut self) -> RefMut<'_, S> {
        self.surface.borrow_mut()
    }

    pub fn width(&self) -> u32 {
        self.surface.borrow().size().0
    }

    pub fn height(&self) -> u32 {
        self.surface.borrow().size().1
    }

    // --- Frame and mouse ---

    /// Records a pointer position; it becomes `mouse_x`/`mouse_y` at the next
    /// [`GraphicsContext::begin_frame`].
    pub fn mouse_moved(&mut self, x: f32, y: f32) {
        self.mouse.event_x = x;
        self.mouse.event_y = y;
    }

    /// Prepares for a new frame: resets the active matrix and rolls the mouse
    /// positions (current becomes previous, the last event becomes current).
    pub fn begin_frame(&mut self) {
        if !self.stack.is_empty() {
            warn!(
                "Frame ended with {} unmatched push_matrix call(s); discarding them",
                self.stack.depth()
            );
            self.stack.clear();
        }
        self.reset_matrix();
        self.mouse.px = self.mouse.x;
        self.mouse.py = self.mouse.y;
        self.mouse.x = self.mouse.event_x;
        self.mouse.y = self.mouse.event_y;
    }

    pub fn mouse_x(&self) -> f32 {
        self.mouse.x
    }

    pub fn mouse_y(&self) -> f32 {
        self.mouse.y
    }

    pub fn pmouse_x(&self) -> f32 {
        self.mouse.px
    }

    pub fn pmouse_y(&self) -> f32 {
        self.mouse.py
    }

    /// The current mouse position in the active local coordinate frame.
    pub fn model_mouse(&self) -> Result<Vector3, GraphicsError> {
        self.model_point(self.mouse.x, self.mouse.y)
    }

    // --- Style ---

    pub fn style_flags(&self) -> StyleFlags {
        self.flags
    }

    pub fn fill(&mut self, color: PColor) {
        self.flags.insert(StyleFlags::DO_FILL);
        self.fill.set_packed(color);
    }

    pub fn no_fill(&mut self) {
        self.flags.remove(StyleFlags::DO_FILL);
    }

    pub fn stroke(&mut self, color: PColor) {
        self.flags.insert(StyleFlags::DO_STROKE);
        self.stroke.set_packed(color);
    }

    pub fn no_stroke(&mut self) {
        self.flags.remove(StyleFlags::DO_STROKE);
    }

    pub fn tint(&mut self, color: PColor) {
        self.flags.insert(StyleFlags::DO_TINT);
        self.tint.set_packed(color);
    }

    pub fn no_tint(&mut self) {
        self.flags.remove(StyleFlags::DO_TINT);
    }

    /// Sets the stroke width. A weight of zero turns stroking off; any other
    /// weight turns it on.
    pub fn stroke_weight(&mut self, weight: f32) {
        self.flags.set(StyleFlags::DO_STROKE, weight != 0.0);
        self.stroke_weight = weight;
        self.surface.borrow_mut().set_stroke_weight(weight);
    }

    pub fn stroke_join(&mut self, join: StrokeJoin) {
        self.stroke_join = join;
        self.surface.borrow_mut().set_stroke_style(join, self.stroke_cap);
    }

    pub fn stroke_cap(&mut self, cap: StrokeCap) {
        self.stroke_cap = cap;
        self.surface.borrow_mut().set_stroke_style(self.stroke_join, cap);
    }

    pub fn rect_mode(&mut self, mode: ShapeMode) {
        self.rect_mode = mode;
    }

    pub fn ellipse_mode(&mut self, mode: ShapeMode) {
        self.ellipse_mode = mode;
    }

    pub fn ambient(&mut self, color: PColor) {
        self.ambient.set_packed(color);
    }

    pub fn specular(&mut self, color: PColor) {
        self.specular.set_packed(color);
    }

    pub fn emissive(&mut self, color: PColor) {
        self.emissive.set_packed(color);
    }

    pub fn shininess(&mut self, shine: f32) {
        self.shininess = shine;
    }

    pub fn get_shininess(&self) -> f32 {
        self.shininess
    }

    pub fn get_stroke_weight(&self) -> f32 {
        self.stroke_weight
    }

    pub fn fill_color(&self) -> &ColorChannels {
        &self.fill
    }

    /// Per-channel access to the fill; writes still reach the surface.
    pub fn fill_color_mut(&mut self) -> &mut ColorChannels {
        &mut self.fill
    }

    pub fn stroke_color(&self) -> &ColorChannels {
        &self.stroke
    }

    pub fn stroke_color_mut(&mut self) -> &mut ColorChannels {
        &mut self.stroke
    }

    pub fn tint_color(&self) -> &ColorChannels {
        &self.tint
    }

    pub fn background_color(&self) -> &ColorChannels {
        &self.background
    }

    pub fn ambient_color(&self) -> &ColorChannels {
        &self.ambient
    }

    pub fn specular_color(&self) -> &ColorChannels {
        &self.specular
    }

    pub fn emissive_color(&self) -> &ColorChannels {
        &self.emissive
    }

    // --- Transforms ---

    pub fn translate(&mut self, tx: f32, ty: f32) {
        trace!("translate({}, {})", tx, ty);
        self.matrix.translate(tx, ty);
    }

    pub fn translate_3d(&mut self, tx: f32, ty: f32, tz: f32) -> Result<(), GraphicsError> {
        trace!("translate({}, {}, {})", tx, ty, tz);
        Ok(self.matrix.translate_3d(tx, ty, tz)?)
    }

    pub fn rotate(&mut self, angle: f32) {
        trace!("rotate({})", angle);
        self.matrix.rotate(angle);
    }

    pub fn rotate_x(&mut self, angle: f32) -> Result<(), GraphicsError> {
        trace!("rotate_x({})", angle);
        Ok(self.matrix.rotate_x(angle)?)
    }

    pub fn rotate_y(&mut self, angle: f32) -> Result<(), GraphicsError> {
        trace!("rotate_y({})", angle);
        Ok(self.matrix.rotate_y(angle)?)
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate(angle);
    }

    /// Rotation about an arbitrary axis. A near-zero axis is a no-op.
    pub fn rotate_axis(&mut self, angle: f32, x: f32, y: f32, z: f32) -> Result<(), GraphicsError> {
        trace!("rotate({}, [{}, {}, {}])", angle, x, y, z);
        Ok(self.matrix.rotate_axis(angle, x, y, z)?)
    }

    pub fn scale(&mut self, s: f32) {
        trace!("scale({})", s);
        self.matrix.scale(s);
    }

    pub fn scale_xy(&mut self, sx: f32, sy: f32) {
        trace!("scale({}, {})", sx, sy);
        self.matrix.scale_xy(sx, sy);
    }

    pub fn scale_3d(&mut self, sx: f32, sy: f32, sz: f32) -> Result<(), GraphicsError> {
        trace!("scale({}, {}, {})", sx, sy, sz);
        Ok(self.matrix.scale_3d(sx, sy, sz)?)
    }

    pub fn shear_x(&mut self, angle: f32) {
        trace!("shear_x({})", angle);
        self.matrix.shear_x(angle);
    }

    pub fn shear_y(&mut self, angle: f32) {
        trace!("shear_y({})", angle);
        self.matrix.shear_y(angle);
    }

    pub fn reset_matrix(&mut self) {
        trace!("reset_matrix()");
        self.matrix.reset();
    }

    /// Right-multiplies the active matrix by a planar affine transform.
    pub fn apply_matrix_2d(&mut self, n00: f32, n01: f32, n02: f32, n10: f32, n11: f32, n12: f32) {
        trace!("apply_matrix([{} {} {}] [{} {} {}])", n00, n01, n02, n10, n11, n12);
        self.matrix.apply_2d(n00, n01, n02, n10, n11, n12);
    }

    /// Right-multiplies the active matrix by `m`. A 3D matrix cannot be
    /// applied while the context is in flat mode.
    pub fn apply_matrix(&mut self, m: &AnyMatrix) -> Result<(), GraphicsError> {
        trace!("apply_matrix({:?})", m);
        Ok(self.matrix.apply(m)?)
    }

    pub fn get_matrix(&self) -> AnyMatrix {
        self.matrix
    }

    /// Replaces the active matrix, keeping the context's dimensionality.
    pub fn set_matrix(&mut self, m: &AnyMatrix) -> Result<(), GraphicsError> {
        trace!("set_matrix({:?})", m);
        Ok(self.matrix.set(m)?)
    }

    /// Saves a copy of the active matrix.
    pub fn push_matrix(&mut self) -> Result<(), GraphicsError> {
        self.stack.push(&self.matrix)?;
        trace!("push_matrix() -> depth {}", self.stack.depth());
        Ok(())
    }

    /// Restores the most recently saved matrix.
    pub fn pop_matrix(&mut self) -> Result<(), GraphicsError> {
        self.matrix = self.stack.pop()?;
        trace!("pop_matrix() -> depth {}", self.stack.depth());
        Ok(())
    }

    pub fn matrix_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Logs the active matrix at debug level.
    pub fn print_matrix(&self) {
        debug!("Active matrix:\n{}", self.matrix);
    }

    // --- Coordinate queries ---

    pub fn screen_x(&self, x: f32, y: f32) -> f32 {
        self.project(Vector3::new2(x, y))[0]
    }

    pub fn screen_y(&self, x: f32, y: f32) -> f32 {
        self.project(Vector3::new2(x, y))[1]
    }

    pub fn screen_point(&self, x: f32, y: f32) -> DevicePoint {
        self.project(Vector3::new2(x, y))
    }

    /// Device position of a 3D point. In flat mode `z` is ignored.
    pub fn screen_point_3d(&self, x: f32, y: f32, z: f32) -> DevicePoint {
        self.project(Vector3::new(x, y, z))
    }

    /// Maps a device-space point back into the active local frame.
    pub fn model_point(&self, sx: f32, sy: f32) -> Result<Vector3, GraphicsError> {
        let mut inverse = self.matrix;
        if !inverse.invert() {
            return Err(MatrixError::Singular.into());
        }
        Ok(inverse.mult(Vector3::new2(sx, sy)))
    }

    /// Applies the active matrix, dividing by `w` when a 3D matrix produces a
    /// projective result.
    fn project(&self, v: Vector3) -> DevicePoint {
        match &self.matrix {
            AnyMatrix::Flat(m) => [m.mult_x(v.x, v.y), m.mult_y(v.x, v.y)],
            AnyMatrix::Spatial(m) => {
                let [x, y, _, w] = m.mult4([v.x, v.y, v.z, 1.0]);
                if w != 0.0 && w != 1.0 {
                    [x / w, y / w]
                } else {
                    [x, y]
                }
            }
        }
    }

    fn project_all(&self, points: &[(f32, f32)]) -> Vec<DevicePoint> {
        points
            .iter()
            .map(|&(x, y)| self.project(Vector3::new2(x, y)))
            .collect()
    }

    // --- Primitives ---

    /// Fills the full surface with transparent black.
    pub fn clear(&mut self) {
        self.surface.borrow_mut().clear(named::BLANK);
    }

    /// Sets the background color and paints the whole surface with it.
    pub fn background(&mut self, color: PColor) {
        self.background.set_packed(color);
        self.paint_background();
    }

    /// Paints the whole surface with the current background color.
    pub fn paint_background(&mut self) {
        self.surface.borrow_mut().clear(self.background.packed());
    }

    pub fn point(&mut self, x: f32, y: f32) {
        if self.flags.contains(StyleFlags::DO_STROKE) {
            self.line(x, y, x + EPSILON, y + EPSILON);
        }
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        if !self.flags.contains(StyleFlags::DO_STROKE) {
            return;
        }
        let points = self.project_all(&[(x1, y1), (x2, y2)]);
        self.surface.borrow_mut().stroke_polyline(&points, false);
    }

    /// Draws a rectangle; the four numbers are read per the rect mode.
    pub fn rect(&mut self, a: f32, b: f32, c: f32, d: f32) {
        let bounds = Bounds::resolve(self.rect_mode, a, b, c, d);
        let points = self.project_all(&bounds.corners());
        self.draw_closed(&points);
    }

    /// Draws an ellipse; the four numbers are read per the ellipse mode.
    pub fn ellipse(&mut self, a: f32, b: f32, c: f32, d: f32) {
        let bounds = Bounds::resolve(self.ellipse_mode, a, b, c, d);
        let points = self.project_all(&ellipse_outline(&bounds, self.ellipse_segments));
        self.draw_closed(&points);
    }

    /// Arc of the ellipse given per the ellipse mode, from `start` to `stop`
    /// radians, filled as a pie and stroked as an open curve.
    pub fn arc(&mut self, a: f32, b: f32, c: f32, d: f32, start: f32, stop: f32) {
        self.arc_with_mode(a, b, c, d, start, stop, ArcMode::Default);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_with_mode(
        &mut self,
        a: f32,
        b: f32,
        c: f32,
        d: f32,
        start: f32,
        stop: f32,
        mode: ArcMode,
    ) {
        let Some((start, stop)) = normalize_arc(start, stop) else {
            debug!("Skipping arc with no extent ({} .. {})", start, stop);
            return;
        };
        let bounds = Bounds::resolve(self.ellipse_mode, a, b, c, d);
        let curve = arc_outline(&bounds, start, stop, self.ellipse_segments);
        let mut pie = curve.clone();
        pie.push(bounds.center());

        let curve = self.project_all(&curve);
        let pie = self.project_all(&pie);
        let mut surface = self.surface.borrow_mut();

        if self.flags.contains(StyleFlags::DO_FILL) {
            match mode {
                ArcMode::Default | ArcMode::Pie => surface.fill_polygon(&pie),
                ArcMode::Open | ArcMode::Chord => surface.fill_polygon(&curve),
            }
        }
        if self.flags.contains(StyleFlags::DO_STROKE) {
            match mode {
                ArcMode::Default | ArcMode::Open => surface.stroke_polyline(&curve, false),
                ArcMode::Chord => surface.stroke_polyline(&curve, true),
                ArcMode::Pie => surface.stroke_polyline(&pie, true),
            }
        }
    }

    fn draw_closed(&self, points: &[DevicePoint]) {
        let mut surface = self.surface.borrow_mut();
        if self.flags.contains(StyleFlags::DO_FILL) {
            surface.fill_polygon(points);
        }
        if self.flags.contains(StyleFlags::DO_STROKE) {
            surface.stroke_polyline(points, true);
        }
    }
}

impl<S: Surface + Default + 'static> Default for GraphicsContext<S> {
    fn default() -> Self {
        Self::new(S::default(), &Config::default())
    }
}

#[cfg(test)]
mod tests;
