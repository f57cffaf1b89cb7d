//! WCAG relative luminance and contrast ratio
//!
//! Luminance follows the WCAG 2.x definition exactly, including its
//! 0.03928 linearization breakpoint. `palette`'s own contrast helper uses the
//! IEC 0.04045 breakpoint and is therefore not used here.

use serde::{Deserialize, Serialize};

use crate::color::conversion::{hex_to_rgb, Rgb};
use crate::constants::wcag;
use crate::Result;

/// Contrast ratio between two colors with WCAG compliance flags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastCheck {
    /// Ratio rounded to two decimals, in [1, 21]
    pub ratio: f64,
    /// AA for normal text (4.5:1)
    pub aa_normal: bool,
    /// AA for large text (3:1)
    pub aa_large: bool,
    /// AAA for normal text (7:1)
    pub aaa_normal: bool,
    /// AAA for large text (4.5:1)
    pub aaa_large: bool,
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= wcag::LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in [0, 1]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let [wr, wg, wb] = wcag::LUMINANCE_WEIGHTS;
    wr * linearize(r) + wg * linearize(g) + wb * linearize(b)
}

/// Contrast ratio of two already-parsed colors; symmetric and >= 1
pub fn contrast_ratio_rgb(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a.r, a.g, a.b);
    let lb = relative_luminance(b.r, b.g, b.b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + wcag::FLARE) / (darker + wcag::FLARE)
}

/// Contrast ratio between two hex colors
pub fn contrast_ratio(hex1: &str, hex2: &str) -> Result<f64> {
    Ok(contrast_ratio_rgb(hex_to_rgb(hex1)?, hex_to_rgb(hex2)?))
}

/// Evaluate a ratio against the fixed WCAG thresholds
///
/// Flags use the unrounded ratio; only the reported `ratio` is rounded.
pub fn wcag_compliance(ratio: f64) -> ContrastCheck {
    ContrastCheck {
        ratio: (ratio * 100.0).round() / 100.0,
        aa_normal: ratio >= wcag::AA_NORMAL,
        aa_large: ratio >= wcag::AA_LARGE,
        aaa_normal: ratio >= wcag::AAA_NORMAL,
        aaa_large: ratio >= wcag::AAA_LARGE,
    }
}

/// Contrast check between two hex colors
pub fn check_contrast(foreground: &str, background: &str) -> Result<ContrastCheck> {
    contrast_ratio(foreground, background).map(wcag_compliance)
}
