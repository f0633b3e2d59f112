// src/color/named.rs

//! The sixteen HTML 4.01 color keywords as opaque packed colors.

use super::{argb, rgb, PColor};

/// Fully transparent black.
pub const BLANK: PColor = argb(0x0000_0000);

pub const WHITE: PColor = rgb(0xFF_FF_FF);
pub const SILVER: PColor = rgb(0xC0_C0_C0);
pub const GRAY: PColor = rgb(0x80_80_80);
pub const BLACK: PColor = rgb(0x00_00_00);
pub const RED: PColor = rgb(0xFF_00_00);
pub const MAROON: PColor = rgb(0x80_00_00);
pub const YELLOW: PColor = rgb(0xFF_FF_00);
pub const OLIVE: PColor = rgb(0x80_80_00);
pub const LIME: PColor = rgb(0x00_FF_00);
pub const GREEN: PColor = rgb(0x00_80_00);
pub const AQUA: PColor = rgb(0x00_FF_FF);
pub const TEAL: PColor = rgb(0x00_80_80);
pub const BLUE: PColor = rgb(0x00_00_FF);
pub const NAVY: PColor = rgb(0x00_00_80);
pub const FUCHSIA: PColor = rgb(0xFF_00_FF);
pub const PURPLE: PColor = rgb(0x80_00_80);

pub const CYAN: PColor = AQUA;
pub const MAGENTA: PColor = FUCHSIA;

/// Looks up a keyword case-insensitively.
pub fn by_name(name: &str) -> Option<PColor> {
    let c = match name.to_ascii_lowercase().as_str() {
        "blank" => BLANK,
        "white" => WHITE,
        "silver" => SILVER,
        "gray" | "grey" => GRAY,
        "black" => BLACK,
        "red" => RED,
        "maroon" => MAROON,
        "yellow" => YELLOW,
        "olive" => OLIVE,
        "lime" => LIME,
        "green" => GREEN,
        "aqua" | "cyan" => AQUA,
        "teal" => TEAL,
        "blue" => BLUE,
        "navy" => NAVY,
        "fuchsia" | "magenta" => FUCHSIA,
        "purple" => PURPLE,
        _ => return None,
    };
    Some(c)
}
