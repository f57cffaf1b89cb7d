//! Hex, RGB and hue/lightness/saturation conversions
//!
//! Provides:
//! - Strict hex parsing and canonical uppercase formatting
//! - The [`Color`] value type, whose hex and RGB forms cannot drift apart
//! - HLS round trips (via `palette`) used by lightness adjustment and harmony generation
//! - Euclidean RGB distance used by every uniqueness test

use palette::{encoding, FromColor, Hsl, Srgb};
use serde::{Deserialize, Serialize};

use crate::{PaletteError, Result};

type Hsl64 = Hsl<encoding::Srgb, f64>;

/// 8-bit sRGB channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from floating-point channels, clamping to [0, 255] and rounding
    pub fn from_f64_rounded(r: f64, g: f64, b: f64) -> Self {
        let channel = |c: f64| c.clamp(0.0, 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Build from integer channels, clamping to [0, 255]
    pub fn from_i32_clamped(r: i32, g: i32, b: i32) -> Self {
        let channel = |c: i32| c.clamp(0, 255) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Canonical `#RRGGBB` form
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Mean of the three channels
    pub fn brightness(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    /// Population standard deviation across the three channels
    pub fn dispersion(self) -> f64 {
        let mean = self.brightness();
        let var = self
            .channels()
            .iter()
            .map(|&c| {
                let d = f64::from(c) - mean;
                d * d
            })
            .sum::<f64>()
            / 3.0;
        var.sqrt()
    }
}

/// Parse a six-digit hex color, with or without a leading `#`
///
/// # Errors
///
/// Returns [`PaletteError::InvalidColorFormat`] unless the input is exactly
/// six ASCII hex digits after stripping one optional `#`.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PaletteError::invalid_color(hex));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| PaletteError::invalid_color(hex))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format channels as an uppercase `#RRGGBB` string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Validate a hex color and return its canonical uppercase `#RRGGBB` form
pub fn normalize_hex(hex: &str) -> Result<String> {
    hex_to_rgb(hex).map(Rgb::to_hex)
}

/// Euclidean distance between two colors in RGB space
pub fn rgb_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Hue/lightness/saturation triple with the hue expressed in turns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    /// Hue in [0, 1)
    pub hue: f64,
    /// Lightness in [0, 1]
    pub lightness: f64,
    /// Saturation in [0, 1]
    pub saturation: f64,
}

impl Hls {
    pub fn new(hue: f64, lightness: f64, saturation: f64) -> Self {
        Self {
            hue: hue.rem_euclid(1.0),
            lightness: lightness.clamp(0.0, 1.0),
            saturation: saturation.clamp(0.0, 1.0),
        }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        let srgb = Srgb::new(
            f64::from(rgb.r) / 255.0,
            f64::from(rgb.g) / 255.0,
            f64::from(rgb.b) / 255.0,
        );
        let hsl = Hsl64::from_color(srgb);
        Self::new(
            hsl.hue.into_positive_degrees() / 360.0,
            hsl.lightness,
            hsl.saturation,
        )
    }

    /// Convert back to 8-bit channels, truncating each scaled channel
    pub fn to_rgb(self) -> Rgb {
        let hsl = Hsl64::new(self.hue * 360.0, self.saturation, self.lightness);
        let srgb = Srgb::<f64>::from_color(hsl);
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Rgb::new(channel(srgb.red), channel(srgb.green), channel(srgb.blue))
    }

    /// Same lightness and saturation, hue rotated by `turns`
    pub fn rotate(self, turns: f64) -> Self {
        Self::new(self.hue + turns, self.lightness, self.saturation)
    }

    pub fn with_lightness(self, lightness: f64) -> Self {
        Self::new(self.hue, lightness, self.saturation)
    }
}

/// Shift a color's lightness by `factor * 0.3`, preserving hue and saturation
///
/// `factor` is clamped to [-1, 1]; the resulting lightness to [0, 1].
pub fn adjust_lightness(hex: &str, factor: f64) -> Result<String> {
    let hls = Hls::from_rgb(hex_to_rgb(hex)?);
    let factor = factor.clamp(-1.0, 1.0);
    Ok(hls
        .with_lightness(hls.lightness + factor * 0.3)
        .to_rgb()
        .to_hex())
}

/// A palette entry. The hex string is always the canonical form of `rgb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColor")]
pub struct Color {
    hex: String,
    rgb: Rgb,
    name: Option<String>,
}

#[derive(Deserialize)]
struct RawColor {
    hex: String,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawColor> for Color {
    type Error = PaletteError;

    fn try_from(raw: RawColor) -> Result<Self> {
        Color::from_hex(&raw.hex, raw.name)
    }
}

impl Color {
    pub fn from_rgb(rgb: Rgb, name: Option<String>) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
            name,
        }
    }

    /// Parse and canonicalize a hex color
    pub fn from_hex(hex: &str, name: Option<String>) -> Result<Self> {
        Ok(Self::from_rgb(hex_to_rgb(hex)?, name))
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
