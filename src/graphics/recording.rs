// src/graphics/recording.rs
//! RecordingSurface - an in-memory surface that keeps every call as a
//! serializable [`DrawCommand`]. Used by the demo binary and by tests that
//! need to inspect exactly what reached the backend.

use super::surface::{DevicePoint, StrokeCap, StrokeJoin, Surface};
use crate::color::{ColorChannels, PColor};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Fill { color: PColor, rgba: [f32; 4] },
    Stroke { color: PColor, rgba: [f32; 4] },
    StrokeWeight { weight: f32 },
    StrokeStyle { join: StrokeJoin, cap: StrokeCap },
    FillPolygon { points: Vec<DevicePoint> },
    StrokePolyline { points: Vec<DevicePoint>, closed: bool },
    Clear { color: PColor },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the recorded commands and starts a fresh recording.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        debug!("Handing off {} recorded draw commands", self.commands.len());
        std::mem::take(&mut self.commands)
    }

    /// Only the geometry commands, skipping style changes.
    pub fn shapes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| {
            matches!(
                c,
                DrawCommand::FillPolygon { .. } | DrawCommand::StrokePolyline { .. } | DrawCommand::Clear { .. }
            )
        })
    }

    fn record(&mut self, command: DrawCommand) {
        trace!("Recording {:?}", command);
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn set_fill(&mut self, color: &ColorChannels) {
        self.record(DrawCommand::Fill {
            color: color.packed(),
            rgba: color.to_rgba_f32(),
        });
    }

    fn set_stroke(&mut self, color: &ColorChannels) {
        self.record(DrawCommand::Stroke {
            color: color.packed(),
            rgba: color.to_rgba_f32(),
        });
    }

    fn set_stroke_weight(&mut self, weight: f32) {
        self.record(DrawCommand::StrokeWeight { weight });
    }

    fn set_stroke_style(&mut self, join: StrokeJoin, cap: StrokeCap) {
        self.record(DrawCommand::StrokeStyle { join, cap });
    }

    fn fill_polygon(&mut self, points: &[DevicePoint]) {
        self.record(DrawCommand::FillPolygon {
            points: points.to_vec(),
        });
    }

    fn stroke_polyline(&mut self, points: &[DevicePoint], closed: bool) {
        self.record(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            closed,
        });
    }

    fn clear(&mut self, color: PColor) {
        self.record(DrawCommand::Clear { color });
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
