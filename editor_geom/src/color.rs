use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// An RGBA color. Serialized as a "#RRGGBB" or "#RRGGBBAA" hex string, so settings files stay
/// readable.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Color(r={}, g={}, b={}, a={})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb_f(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb_f(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb_f(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb_f(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb_f(0.0, 0.0, 1.0);
    pub const CYAN: Color = Color::rgb_f(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb_f(1.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb_f(1.0, 1.0, 0.0);
    pub const ORANGE: Color = Color::rgb_f(1.0, 0.55, 0.0);

    pub fn rgb(r: usize, g: usize, b: usize) -> Color {
        Color::rgba(r, g, b, 1.0)
    }

    pub const fn rgb_f(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: usize, g: usize, b: usize, a: f32) -> Color {
        Color {
            r: (r as f32) / 255.0,
            g: (g as f32) / 255.0,
            b: (b as f32) / 255.0,
            a,
        }
    }

    pub fn alpha(&self, a: f32) -> Color {
        let mut c = *self;
        c.a = a;
        c
    }

    /// Parses "#RRGGBB" or "#RRGGBBAA".
    pub fn hex(raw: &str) -> Result<Color> {
        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            bail!("{} isn't a #RRGGBB or #RRGGBBAA color", raw);
        }
        let channel = |idx: usize| usize::from_str_radix(&digits[idx..idx + 2], 16);
        let alpha = if digits.len() == 8 {
            (channel(6)? as f32) / 255.0
        } else {
            1.0
        };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    pub fn as_hex(&self) -> String {
        let [r, g, b] = self.to_rgb255();
        if self.a < 1.0 {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                r,
                g,
                b,
                (self.a * 255.0).round() as u8
            )
        } else {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        }
    }

    fn to_rgb255(self) -> [i32; 3] {
        [
            (self.r * 255.0).round() as i32,
            (self.g * 255.0).round() as i32,
            (self.b * 255.0).round() as i32,
        ]
    }

    /// Brightens (positive) or darkens (negative) every channel by `change` on the 0-255 scale.
    /// When some channels saturate, the remaining change is spread over the others, so the
    /// overall brightness shift stays about the same.
    pub fn changed_brightness(&self, change: i32) -> Color {
        self.spread_brightness(change, 3)
    }

    fn spread_brightness(&self, change: i32, channels: i32) -> Color {
        let old = self.to_rgb255();
        let new = old.map(|c| (c + change).clamp(0, 255));
        let changed: i32 = new.iter().zip(old.iter()).map(|(n, o)| n - o).sum();
        let result = Color::rgba(
            new[0] as usize,
            new[1] as usize,
            new[2] as usize,
            self.a,
        );
        if changed == channels * change || changed == 0 {
            return result;
        }
        let saturated = new
            .iter()
            .zip(old.iter())
            .filter(|(n, o)| **n != **o + change)
            .count() as i32;
        if saturated == 3 {
            return result;
        }
        let remaining = 3 - saturated;
        result.spread_brightness((channels * change - changed) / remaining, remaining)
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(raw: String) -> Result<Color> {
        Color::hex(&raw)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.as_hex()
    }
}
