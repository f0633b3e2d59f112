// src/color/mod.rs

//! Packed ARGB colors and the synchronized channel model behind every color
//! property of the graphics context.
//!
//! A color is held in three views at once: a packed `0xAARRGGBB` integer, an
//! 8-bit integer per channel, and a normalized float per channel. Writing any
//! one view through [`ColorChannels`] re-derives the other two before the
//! optional change listener runs, so listeners never see a half-updated color.

pub mod named;

use crate::math::{clamp, clamp_i32};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A packed `0xAARRGGBB` color.
pub type PColor = u32;

/// One of the four 8-bit channels of a packed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channel {
    Alpha = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Alpha, Channel::Red, Channel::Green, Channel::Blue];

    /// Bit offset of this channel inside a packed color.
    pub const fn shift(self) -> u32 {
        match self {
            Channel::Alpha => 24,
            Channel::Red => 16,
            Channel::Green => 8,
            Channel::Blue => 0,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

// --- Packing helpers ---

/// Packs four 8-bit channels, alpha first.
#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> PColor {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits a packed color into `[a, r, g, b]`.
#[inline]
pub const fn unpack_argb(c: PColor) -> [u8; 4] {
    [(c >> 24) as u8, (c >> 16) as u8, (c >> 8) as u8, c as u8]
}

/// A literal already in `0xAARRGGBB` order.
#[inline]
pub const fn argb(v: u32) -> PColor {
    v
}

/// Converts an `0xRRGGBBAA` literal to `0xAARRGGBB`.
#[inline]
pub const fn rgba_to_argb(v: u32) -> PColor {
    ((v & 0xFF) << 24) | (v >> 8)
}

/// Converts an `0xRRGGBB` literal to an opaque packed color.
#[inline]
pub const fn rgb(v: u32) -> PColor {
    0xFF00_0000 | (v & 0x00FF_FFFF)
}

/// Normalized float to an 8-bit channel, clamped and rounded to nearest.
fn unit_to_byte(v: f32) -> u32 {
    clamp(255.0 * v, 0.0, 255.0).round() as u32
}

/// Opaque gray from a normalized level.
pub fn gray(level: f32) -> PColor {
    let c = unit_to_byte(level);
    0xFF00_0000 | (c << 16) | (c << 8) | c
}

/// Opaque color from normalized red, green, blue.
pub fn color_rgb(r: f32, g: f32, b: f32) -> PColor {
    0xFF00_0000 | (unit_to_byte(r) << 16) | (unit_to_byte(g) << 8) | unit_to_byte(b)
}

/// Color from normalized red, green, blue, alpha.
pub fn color_rgba(r: f32, g: f32, b: f32, a: f32) -> PColor {
    (unit_to_byte(a) << 24) | (unit_to_byte(r) << 16) | (unit_to_byte(g) << 8) | unit_to_byte(b)
}

// --- Synchronized channels ---

/// Callback run once after every logical write to a [`ColorChannels`].
pub type ColorListener = Box<dyn FnMut(&ColorChannels)>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ChannelValue {
    int: u8,
    float: f32,
}

impl ChannelValue {
    fn from_int(int: u8) -> Self {
        Self {
            int,
            float: int as f32 / 255.0,
        }
    }
}

/// A color kept consistent across its packed, integer-channel and
/// float-channel forms.
///
/// Invariants after every public call:
/// * `packed() == pack_argb(a, r, g, b)` of the integer channels;
/// * `channel_float(c) == channel_int(c) as f32 / 255.0` for every channel;
/// * `has_alpha()` is `channel_int(Alpha) < 255` when alpha tracking is on,
///   and always `false` when it is off.
pub struct ColorChannels {
    packed: PColor,
    channels: [ChannelValue; 4],
    has_alpha: bool,
    track_alpha: bool,
    listener: Option<ColorListener>,
}

impl ColorChannels {
    /// A transparent black color (`0x00000000`).
    pub fn new(track_alpha: bool) -> Self {
        let mut c = Self {
            packed: 0,
            channels: [ChannelValue::default(); 4],
            has_alpha: false,
            track_alpha,
            listener: None,
        };
        c.sync_from_packed(0);
        c
    }

    pub fn with_packed(track_alpha: bool, packed: PColor) -> Self {
        let mut c = Self::new(track_alpha);
        c.sync_from_packed(packed);
        c
    }

    /// Installs the change listener, replacing any previous one. The listener
    /// is not invoked for the current value.
    pub fn set_listener(&mut self, listener: ColorListener) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn packed(&self) -> PColor {
        self.packed
    }

    pub fn channel_int(&self, channel: Channel) -> u8 {
        self.channels[channel.index()].int
    }

    pub fn channel_float(&self, channel: Channel) -> f32 {
        self.channels[channel.index()].float
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn tracks_alpha(&self) -> bool {
        self.track_alpha
    }

    /// Integer channels in `[a, r, g, b]` order.
    pub fn ints(&self) -> [u8; 4] {
        self.channels.map(|c| c.int)
    }

    /// Float channels in `[a, r, g, b]` order.
    pub fn floats(&self) -> [f32; 4] {
        self.channels.map(|c| c.float)
    }

    /// Float channels in `[r, g, b, a]` order, the layout most native
    /// drawing APIs take.
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        let [a, r, g, b] = self.floats();
        [r, g, b, a]
    }

    /// Replaces the whole color from a packed value.
    pub fn set_packed(&mut self, value: PColor) {
        self.sync_from_packed(value);
        self.notify();
    }

    /// Sets one channel from an integer, clamped to `[0, 255]`.
    pub fn set_channel_int(&mut self, channel: Channel, value: i32) {
        let clamped = clamp_i32(value, 0, 255);
        if clamped != value {
            debug!("{:?} channel value {} clamped to {}", channel, value, clamped);
        }
        self.sync_channel(channel, clamped as u8);
        self.notify();
    }

    /// Sets one channel from a normalized float, clamped to `[0, 1]`. The
    /// integer form is `floor(255 * value)`; the stored float is re-derived
    /// from it.
    pub fn set_channel_float(&mut self, channel: Channel, value: f32) {
        let clamped = clamp(value, 0.0, 1.0);
        if clamped != value {
            debug!("{:?} channel value {} clamped to {}", channel, value, clamped);
        }
        self.sync_channel(channel, (255.0 * clamped) as u8);
        self.notify();
    }

    /// An independent color with the same packed value and alpha policy and
    /// no listener.
    pub fn copy(&self) -> Self {
        Self::with_packed(self.track_alpha, self.packed)
    }

    fn sync_from_packed(&mut self, value: PColor) {
        self.packed = value;
        let ints = unpack_argb(value);
        self.channels = ints.map(ChannelValue::from_int);
        self.refresh_alpha_flag();
    }

    fn sync_channel(&mut self, channel: Channel, int: u8) {
        self.channels[channel.index()] = ChannelValue::from_int(int);
        let [a, r, g, b] = self.ints();
        self.packed = pack_argb(a, r, g, b);
        self.refresh_alpha_flag();
    }

    fn refresh_alpha_flag(&mut self) {
        self.has_alpha = self.track_alpha && self.channel_int(Channel::Alpha) < 255;
    }

    fn notify(&mut self) {
        trace!("Color now {:#010x} (has_alpha {})", self.packed, self.has_alpha);
        // Taken out for the call so the listener can borrow `self` immutably.
        if let Some(mut listener) = self.listener.take() {
            listener(self);
            self.listener = Some(listener);
        }
    }
}

impl Default for ColorChannels {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for ColorChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorChannels")
            .field("packed", &format_args!("{:#010x}", self.packed))
            .field("has_alpha", &self.has_alpha)
            .field("track_alpha", &self.track_alpha)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
