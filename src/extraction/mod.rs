//! Dominant-color extraction from images
//!
//! Pipeline: decode → downscale → stratified sample → noise filter → cap →
//! cluster → score → near-identity dedup → perturbation backfill →
//! deterministic lattice filler. The result always has the requested length
//! and every pair of colors is at least [`extraction::MIN_DISTANCE`] apart.

pub mod clustering;
pub mod image_loader;
pub mod sampling;

use image::RgbImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::color::conversion::{rgb_distance, Rgb};
use crate::config::ExtractionConfig;
use crate::constants::extraction;
use crate::{PaletteError, Result};

pub use clustering::{Cluster, ClusterParams};
pub use sampling::{FilterStage, SampleGrid};

/// Extracts a ranked, exact-count list of dominant colors
#[derive(Debug, Clone, Default)]
pub struct ImageColorExtractor {
    config: ExtractionConfig,
}

impl ImageColorExtractor {
    /// Build without checking the configuration; see [`ImageColorExtractor::try_new`]
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Build from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] for a zero sampling or clustering budget.
    pub fn try_new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract `count` hex colors from encoded image bytes
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ImageDecodeError`] for unreadable image data and
    /// [`PaletteError::InvalidParameter`] if `count` exceeds the cluster label range.
    pub fn extract(&self, image_bytes: &[u8], count: usize) -> Result<Vec<String>> {
        let image = image_loader::decode_image(image_bytes)?;
        Ok(self
            .extract_from_image(image, count)?
            .into_iter()
            .map(Rgb::to_hex)
            .collect())
    }

    /// Extract from an already-decoded RGB image
    pub fn extract_from_image(&self, image: RgbImage, count: usize) -> Result<Vec<Rgb>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if count > usize::from(u8::MAX) {
            return Err(PaletteError::invalid_parameter("count", count));
        }

        let image = image_loader::downscale(image, self.config.max_dimension);
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let grid = SampleGrid {
            rows: self.config.grid_rows,
            cols: self.config.grid_cols,
            pixels_per_region: self.config.pixels_per_region,
        };
        let sample = grid.sample(&image, &mut rng);
        let (filtered, _stage) = sampling::filter_noise(sample);
        let working = sampling::cap_working_set(filtered, self.config.max_working_pixels, &mut rng);

        let clusters = clustering::cluster_pixels(
            &working,
            &ClusterParams {
                clusters: count,
                n_init: self.config.n_init,
                max_iterations: self.config.max_iterations,
                convergence: self.config.convergence,
                seed: self.config.seed,
            },
        );

        let mut colors = dedup_clusters(&clusters, count);
        let ranked = colors.len();
        backfill(&mut colors, count);
        let backfilled = colors.len() - ranked;
        fill_from_lattice(&mut colors, count);

        debug!(
            count,
            ranked,
            backfilled,
            filled = colors.len() - ranked - backfilled,
            "dominant colors extracted"
        );
        Ok(colors)
    }
}

fn is_distinct(accepted: &[Rgb], candidate: Rgb) -> bool {
    accepted
        .iter()
        .all(|&existing| rgb_distance(existing, candidate) >= extraction::MIN_DISTANCE)
}

/// Keep cluster centroids in score order, skipping near-identical ones
fn dedup_clusters(clusters: &[Cluster], count: usize) -> Vec<Rgb> {
    let mut accepted = Vec::with_capacity(count);
    for cluster in clusters {
        if accepted.len() >= count {
            break;
        }
        if is_distinct(&accepted, cluster.centroid) {
            accepted.push(cluster.centroid);
        }
    }
    accepted
}

/// Round-robin perturbation of an accepted color
fn perturb(base: Rgb, kind: usize) -> Rgb {
    let [r, g, b] = base.channels().map(i32::from);
    match kind % 4 {
        0 => Rgb::from_i32_clamped(
            r + extraction::BACKFILL_SHIFT,
            g + extraction::BACKFILL_SHIFT,
            b + extraction::BACKFILL_SHIFT,
        ),
        1 => Rgb::from_i32_clamped(
            r - extraction::BACKFILL_SHIFT,
            g - extraction::BACKFILL_SHIFT,
            b - extraction::BACKFILL_SHIFT,
        ),
        kind => {
            let mean = (r + g + b) / 3;
            let factor = if kind == 2 {
                extraction::BACKFILL_SATURATION_FACTOR
            } else {
                -extraction::BACKFILL_SATURATION_FACTOR
            };
            let shift = |c: i32| {
                (f64::from(c) + f64::from(c - mean) * factor).clamp(0.0, 255.0) as u8
            };
            Rgb::new(shift(r), shift(g), shift(b))
        }
    }
}

/// Derive extra colors from accepted ones until `count` is reached or attempts run out
fn backfill(colors: &mut Vec<Rgb>, count: usize) {
    let max_attempts = count * extraction::ATTEMPTS_PER_COLOR;
    let mut attempts = 0;
    while colors.len() < count && !colors.is_empty() && attempts < max_attempts {
        attempts += 1;
        let base = colors[(colors.len() + attempts) % colors.len()];
        let candidate = perturb(base, attempts);
        if is_distinct(colors, candidate) {
            colors.push(candidate);
        }
    }
}

/// Pad any residual shortfall from a fixed RGB lattice
///
/// Lattice points are 51 apart, so each accepted color blocks at most one of
/// the 216 points and a free point exists while fewer than 216 are accepted.
fn fill_from_lattice(colors: &mut Vec<Rgb>, count: usize) {
    if colors.len() >= count {
        return;
    }

    let shortfall = count - colors.len();
    let steps: Vec<u8> = (0..=255u8).step_by(extraction::FILLER_STEP).collect();
    'lattice: for &r in &steps {
        for &g in &steps {
            for &b in &steps {
                if colors.len() >= count {
                    break 'lattice;
                }
                let candidate = Rgb::new(r, g, b);
                if is_distinct(colors, candidate) {
                    colors.push(candidate);
                }
            }
        }
    }
    warn!(shortfall, "backfill exhausted, padded palette from fixed lattice");
}
