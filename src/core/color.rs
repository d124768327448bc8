use crate::utils::error::{Result, ShippingError};
use std::fmt;

/// An RGB box color. Stored as `"r,g,b"`, edited as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Clamps each channel into 0..=255.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    pub fn to_storage_string(&self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    /// Clamps channels that parse but fall outside 0..=255.
    pub fn from_storage_str(value: &str) -> Result<Self> {
        let [r, g, b] = Self::parse_channels(value)?;
        Ok(Self::clamped(r, g, b))
    }

    /// Raw integer channels of a storage string, before any clamping.
    pub fn parse_channels(value: &str) -> Result<[i64; 3]> {
        let parts: Vec<&str> = value.split(',').collect();
        if parts.len() != 3 {
            return Err(malformed(
                value,
                format!("expected 3 comma-separated channels, found {}", parts.len()),
            ));
        }

        let mut channels = [0i64; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse::<i64>()
                .map_err(|_| malformed(value, format!("'{}' is not an integer", part)))?;
        }

        Ok(channels)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| malformed(value, "hex colors start with '#'"))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed(value, "expected six hex digits"));
        }

        let channel = |offset: usize| {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map_err(|e| malformed(value, e.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Accepts either a storage string or a `#rrggbb` value.
    pub fn parse_any(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            Self::from_hex(value)
        } else {
            Self::from_storage_str(value)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

fn malformed(value: &str, reason: impl Into<String>) -> ShippingError {
    ShippingError::MalformedColor {
        value: value.to_string(),
        reason: reason.into(),
    }
}
