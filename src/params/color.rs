//! sRGB colors with hex parsing, as written in config files and shown in the panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a hex color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': expected #rrggbb or #rgb")]
pub struct ParseColorError {
    pub input: String,
}

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Linear-light components in [0, 1], ready for uniforms and clear colors
    pub fn to_linear(self) -> [f32; 3] {
        self.0.map(|c| srgb_to_linear(c as f32 / 255.0))
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b] = self.to_linear();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            input: s.to_string(),
        };
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Rgb([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ])),
            // Shorthand: #abc == #aabbcc
            3 => {
                let mut out = [0u8; 3];
                for (slot, digit) in out.iter_mut().zip(hex.chars()) {
                    let nibble = digit.to_digit(16).ok_or_else(err)? as u8;
                    *slot = nibble * 17;
                }
                Ok(Rgb(out))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// sRGB transfer function (IEC 61966-2-1)
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
