//! Color values, ARGB packing, and face shading (no renderer dependency).
#![forbid(unsafe_code)]

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Brightness multiplier applied to faces whose normal points along X.
pub const SHADE_X: f32 = 0.6;
/// Brightness multiplier applied to faces whose normal points along Z.
pub const SHADE_Z: f32 = 0.8;
/// Brightness multiplier applied to downward-facing faces.
pub const SHADE_Y_BOTTOM: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packs as `0xAARRGGBB`.
    #[inline]
    pub const fn pack(self) -> PackedColor {
        PackedColor(
            ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32,
        )
    }

    /// Multiplies RGB by `t`, truncating toward zero. Alpha is untouched.
    #[inline]
    pub fn scale(self, t: f32) -> Color {
        let f = |c: u8| (c as f32 * t) as u8;
        Color { r: f(self.r), g: f(self.g), b: f(self.b), a: self.a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// A color packed as `0xAARRGGBB`, the form meshers write into vertex data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    #[inline]
    pub const fn unpack(self) -> Color {
        Color {
            a: (self.0 >> 24) as u8,
            r: (self.0 >> 16) as u8,
            g: (self.0 >> 8) as u8,
            b: self.0 as u8,
        }
    }
}

impl fmt::Display for PackedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

/// Packed X-side, Z-side and bottom variants of a base color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideShades {
    pub x_side: PackedColor,
    pub z_side: PackedColor,
    pub y_bottom: PackedColor,
}

pub fn shade_sides(col: Color) -> SideShades {
    SideShades {
        x_side: col.scale(SHADE_X).pack(),
        z_side: col.scale(SHADE_Z).pack(),
        y_bottom: col.scale(SHADE_Y_BOTTOM).pack(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash,
    BadLength(usize),
    BadDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::MissingHash => write!(f, "color must start with '#'"),
            ColorParseError::BadLength(n) => {
                write!(f, "expected #RRGGBB or #RRGGBBAA, got {} hex digits", n)
            }
            ColorParseError::BadDigit(s) => write!(f, "invalid hex digits in {:?}", s),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::BadLength(hex.len()));
        }
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|d| u8::from_str_radix(d, 16).ok())
                .ok_or_else(|| ColorParseError::BadDigit(s.to_string()))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Color { r: byte(0)?, g: byte(2)?, b: byte(4)?, a })
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}
