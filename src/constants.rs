//! Fixed constants for contrast evaluation, harmony generation and extraction
//!
//! Values here are not configurable. Tunables that callers may change
//! (sampling seed, grid size, iteration budgets) live in [`crate::config`].

/// WCAG 2.x contrast thresholds
pub mod wcag {
    /// AA, normal text
    pub const AA_NORMAL: f64 = 4.5;

    /// AA, large text (18pt or 14pt bold)
    pub const AA_LARGE: f64 = 3.0;

    /// AAA, normal text
    pub const AAA_NORMAL: f64 = 7.0;

    /// AAA, large text
    pub const AAA_LARGE: f64 = 4.5;

    /// sRGB linearization breakpoint used by the WCAG luminance definition
    pub const LINEAR_THRESHOLD: f64 = 0.03928;

    /// Luminance channel weights (R, G, B)
    pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

    /// Flare term added to both luminances in the ratio
    pub const FLARE: f64 = 0.05;
}

/// Harmony generation parameters
pub mod harmony {
    /// Minimum RGB distance between any two generated colors
    pub const MIN_DISTANCE: f64 = 40.0;

    /// Complementary hue offset (turns)
    pub const COMPLEMENTARY_OFFSET: f64 = 0.5;

    /// Triadic hue offset (turns)
    pub const TRIADIC_OFFSET: f64 = 1.0 / 3.0;

    /// Split-complementary hue offset, ~150 degrees (turns)
    pub const SPLIT_COMPLEMENTARY_OFFSET: f64 = 0.417;

    /// Lightness reduction for the darker shade
    pub const SHADE_DROP: f64 = 0.25;

    /// Lowest lightness the darker shade may reach
    pub const SHADE_FLOOR: f64 = 0.1;

    /// Hue step per search attempt (turns)
    pub const SEARCH_HUE_STEP: f64 = 0.12;

    /// Lightness swing per search attempt
    pub const SEARCH_LIGHTNESS_SHIFT: f64 = 0.3;

    /// Lightness bounds during the search phase
    pub const SEARCH_LIGHTNESS_MIN: f64 = 0.1;
    pub const SEARCH_LIGHTNESS_MAX: f64 = 0.9;

    /// Search attempts per requested color
    pub const ATTEMPTS_PER_COLOR: usize = 20;

    /// Fallback hue step per slot (turns)
    pub const FALLBACK_HUE_STEP: f64 = 0.2;

    /// Fallback lightness step around 0.5
    pub const FALLBACK_LIGHTNESS_STEP: f64 = 0.2;

    /// Minimum saturation used by the fallback
    pub const FALLBACK_MIN_SATURATION: f64 = 0.5;
}

/// Dominant-color extraction parameters
pub mod extraction {
    /// Minimum RGB distance between extracted colors
    pub const MIN_DISTANCE: f64 = 10.0;

    /// Strict brightness window for the first filter pass (exclusive)
    pub const BRIGHTNESS_MIN: f64 = 10.0;
    pub const BRIGHTNESS_MAX: f64 = 245.0;

    /// Pixels darker/brighter than these are kept even without color
    pub const NEAR_BLACK: f64 = 30.0;
    pub const NEAR_WHITE: f64 = 220.0;

    /// Channel standard deviation above which a pixel counts as colored
    pub const MIN_DISPERSION: f64 = 3.0;

    /// Relaxed brightness window for the second filter pass (exclusive)
    pub const RELAXED_BRIGHTNESS_MIN: f64 = 5.0;
    pub const RELAXED_BRIGHTNESS_MAX: f64 = 250.0;

    /// Survivors required to accept the strict pass
    pub const STRICT_MIN_PIXELS: usize = 500;

    /// Survivors required to accept the relaxed pass
    pub const RELAXED_MIN_PIXELS: usize = 100;

    /// Cluster score weights: size, saturation, coherence
    pub const WEIGHT_SIZE: f64 = 0.6;
    pub const WEIGHT_SATURATION: f64 = 0.2;
    pub const WEIGHT_COHERENCE: f64 = 0.2;

    /// Per-channel shift for the lighten/darken backfill perturbations
    pub const BACKFILL_SHIFT: i32 = 80;

    /// Deviation-from-mean factor for the saturation backfill perturbations
    pub const BACKFILL_SATURATION_FACTOR: f64 = 0.7;

    /// Backfill attempts per requested color
    pub const ATTEMPTS_PER_COLOR: usize = 20;

    /// Channel step of the deterministic filler lattice
    pub const FILLER_STEP: usize = 51;
}

/// Defaults substituted when the semantic analysis is missing fields
pub mod defaults {
    /// Base color used when no valid seed color is available
    pub const BASE_COLOR: &str = "#6366F1";

    /// Mood reported for prompt palettes without an analyzed mood
    pub const PROMPT_MOOD: &str = "harmonious";

    /// Mood reported for image palettes without an analyzed mood
    pub const IMAGE_MOOD: &str = "extracted from image";

    /// Upper bound for the provider timeout in seconds
    pub const MAX_TIMEOUT_SECS: u64 = 10;
}

/// Request boundary limits
pub mod limits {
    /// Allowed palette sizes
    pub const MIN_COLORS: usize = 3;
    pub const MAX_COLORS: usize = 15;

    /// Default palette size
    pub const DEFAULT_COLORS: usize = 5;

    /// Prompt length in characters
    pub const MIN_PROMPT_CHARS: usize = 1;
    pub const MAX_PROMPT_CHARS: usize = 500;
}
