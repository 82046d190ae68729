//! Packed ARGB note colors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A note color stored as a packed `0xAARRGGBB` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteColor(u32);

/// White; reserved to mean "no explicit color chosen".
pub const DEFAULT_COLOR: NoteColor = NoteColor(0xFFFF_FFFF);

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}': expected #RRGGBB, #AARRGGBB or a palette name")]
pub struct ParseColorError(String);

impl NoteColor {
    /// Named swatches offered by the color picker, in display order
    pub const PALETTE: [(&'static str, Self); 20] = [
        ("red", Self(0xFFF4_4336)),
        ("pink", Self(0xFFE9_1E63)),
        ("purple", Self(0xFF9C_27B0)),
        ("deep-purple", Self(0xFF67_3AB7)),
        ("indigo", Self(0xFF3F_51B5)),
        ("blue", Self(0xFF21_96F3)),
        ("light-blue", Self(0xFF03_A9F4)),
        ("cyan", Self(0xFF00_BCD4)),
        ("teal", Self(0xFF00_9688)),
        ("green", Self(0xFF4C_AF50)),
        ("light-green", Self(0xFF8B_C34A)),
        ("lime", Self(0xFFCD_DC39)),
        ("yellow", Self(0xFFFF_EB3B)),
        ("amber", Self(0xFFFF_C107)),
        ("orange", Self(0xFFFF_9800)),
        ("deep-orange", Self(0xFFFF_5722)),
        ("brown", Self(0xFF79_5548)),
        ("grey", Self(0xFF9E_9E9E)),
        ("blue-grey", Self(0xFF60_7D8B)),
        ("white", DEFAULT_COLOR),
    ];

    /// Create a color from a packed ARGB value
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Create an opaque color from RGB components
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(0xFF00_0000 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    /// Packed ARGB value
    #[must_use]
    pub const fn argb(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Whether this is the "no color chosen" default
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.0 == DEFAULT_COLOR.0
    }

    /// The default color is drawn as a bordered swatch instead of a fill.
    #[must_use]
    pub const fn needs_border(self) -> bool {
        self.is_default()
    }

    /// Palette name of this color, if it is one of the picker swatches
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::PALETTE
            .iter()
            .find(|(_, color)| *color == self)
            .map(|(name, _)| *name)
    }

    /// Look up a palette color by name (case-insensitive, `_` or `-` separators)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        let wanted = if wanted == "gray" { "grey".to_string() } else { wanted };
        Self::PALETTE
            .iter()
            .find(|(palette_name, _)| *palette_name == wanted)
            .map(|(_, color)| *color)
    }

    /// Value written to the `color` column
    #[must_use]
    pub fn to_stored(self) -> i64 {
        i64::from(self.0)
    }

    /// Decode a `color` column value.
    ///
    /// Accepts both the unsigned packing written by this crate and the signed
    /// 32-bit packing used by older databases (e.g. `-1` for white).
    #[must_use]
    pub fn from_stored(value: i64) -> Option<Self> {
        if let Ok(unsigned) = u32::try_from(value) {
            return Some(Self(unsigned));
        }
        i32::try_from(value)
            .ok()
            .map(|signed| Self(u32::from_ne_bytes(signed.to_ne_bytes())))
    }
}

impl Default for NoteColor {
    fn default() -> Self {
        DEFAULT_COLOR
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for NoteColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some(color) = Self::from_name(raw) {
            return Ok(color);
        }

        let invalid = || ParseColorError(raw.to_string());
        let hex = raw
            .strip_prefix('#')
            .or_else(|| raw.strip_prefix("0x"))
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or_else(invalid)?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;

        match hex.len() {
            6 => Ok(Self(0xFF00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(invalid()),
        }
    }
}
