use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ColorError {
    #[error("color must start with '#': {raw}")]
    MissingHash { raw: String },

    #[error("color must have 3 or 6 hex digits: {raw}")]
    InvalidLength { raw: String },

    #[error("invalid hex digit in color: {raw}")]
    InvalidDigit { raw: String },
}

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the short `#rgb` form.
    ///
    /// # Errors
    ///
    /// Returns `ColorError` when the hash prefix is missing, the length is wrong,
    /// or a digit is not hexadecimal.
    pub fn parse_hex(raw: &str) -> Result<Self, ColorError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash {
                raw: raw.to_string(),
            })?;
        // from_str_radix alone would accept a leading '+'.
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit {
                raw: raw.to_string(),
            });
        }

        let channel = |hex: &str| {
            u8::from_str_radix(hex, 16).map_err(|_| ColorError::InvalidDigit {
                raw: raw.to_string(),
            })
        };

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorError::InvalidLength {
                raw: raw.to_string(),
            }),
        }
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    #[must_use]
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| {
            let a = f32::from(a);
            let b = f32::from(b);
            // Rounded result always lies between a and b, both in 0..=255.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = (a + (b - a) * t).round() as u8;
            value
        };
        Self::new(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}
