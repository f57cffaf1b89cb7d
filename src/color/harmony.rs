//! Color-wheel harmony generation from a single seed color
//!
//! Candidates are produced in three phases:
//! 1. Structured color-theory relations (complementary, triadic,
//!    split-complementary, darker shade), gated by the requested count
//! 2. A bounded deterministic search that walks the hue wheel while
//!    alternating lightness
//! 3. A fallback that fills any remaining slots without the uniqueness test
//!
//! Phases 1 and 2 only accept a candidate whose RGB distance to every
//! accepted color is at least [`harmony::MIN_DISTANCE`].

use tracing::debug;

use crate::color::conversion::{hex_to_rgb, rgb_distance, Hls, Rgb};
use crate::constants::harmony;
use crate::Result;

/// Deterministic harmony generator
#[derive(Debug, Clone, Copy, Default)]
pub struct HarmonyGenerator;

impl HarmonyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate exactly `count` colors, the first being `base_hex`
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColorFormat`] if `base_hex` is malformed.
    pub fn generate(&self, base_hex: &str, count: usize) -> Result<Vec<String>> {
        let base = hex_to_rgb(base_hex)?;
        Ok(self
            .generate_rgb(base, count)
            .into_iter()
            .map(Rgb::to_hex)
            .collect())
    }

    /// Generate from already-parsed channels
    pub fn generate_rgb(&self, base: Rgb, count: usize) -> Vec<Rgb> {
        if count == 0 {
            return Vec::new();
        }

        let hls = Hls::from_rgb(base);
        let mut accepted = vec![base];

        // Phase 1: structured relations
        let structured = [
            (2, hls.rotate(harmony::COMPLEMENTARY_OFFSET)),
            (3, hls.rotate(harmony::TRIADIC_OFFSET)),
            (4, hls.rotate(harmony::SPLIT_COMPLEMENTARY_OFFSET)),
            (
                5,
                hls.with_lightness((hls.lightness - harmony::SHADE_DROP).max(harmony::SHADE_FLOOR)),
            ),
        ];
        for (min_count, candidate) in structured {
            if count >= min_count {
                accept_if_distinct(&mut accepted, candidate.to_rgb());
            }
        }
        let after_structured = accepted.len();

        // Phase 2: bounded search
        let max_attempts = count * harmony::ATTEMPTS_PER_COLOR;
        let mut attempt = 0;
        while accepted.len() < count && attempt < max_attempts {
            attempt += 1;
            let hue_shift = (attempt as f64 * harmony::SEARCH_HUE_STEP) % 1.0;
            let lightness_shift = if attempt % 2 == 0 {
                harmony::SEARCH_LIGHTNESS_SHIFT
            } else {
                -harmony::SEARCH_LIGHTNESS_SHIFT
            };
            let lightness = (hls.lightness + lightness_shift)
                .clamp(harmony::SEARCH_LIGHTNESS_MIN, harmony::SEARCH_LIGHTNESS_MAX);
            let candidate = Hls::new(hls.hue + hue_shift, lightness, hls.saturation);
            accept_if_distinct(&mut accepted, candidate.to_rgb());
        }
        let after_search = accepted.len();

        // Phase 3: unconditional fill
        while accepted.len() < count {
            let idx = accepted.len();
            let candidate = Hls::new(
                hls.hue + idx as f64 * harmony::FALLBACK_HUE_STEP,
                0.5 + ((idx % 3) as f64 - 1.0) * harmony::FALLBACK_LIGHTNESS_STEP,
                hls.saturation.max(harmony::FALLBACK_MIN_SATURATION),
            );
            accepted.push(candidate.to_rgb());
        }

        debug!(
            count,
            structured = after_structured,
            searched = after_search - after_structured,
            filled = count - after_search.min(count),
            attempts = attempt,
            "harmony generated"
        );

        accepted.truncate(count);
        accepted
    }
}

fn accept_if_distinct(accepted: &mut Vec<Rgb>, candidate: Rgb) -> bool {
    let distinct = accepted
        .iter()
        .all(|&existing| rgb_distance(existing, candidate) >= harmony::MIN_DISTANCE);
    if distinct {
        accepted.push(candidate);
    }
    distinct
}
