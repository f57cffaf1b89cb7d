//! Stratified pixel sampling and noise filtering
//!
//! The image is split into a grid; each cell contributes up to a fixed
//! number of pixels so small but prominent regions are not drowned out by a
//! large uniform background. Near-black, near-white and colorless pixels are
//! then filtered in up to three progressively looser passes.

use image::RgbImage;
use rand::seq::index;
use rand::Rng;
use tracing::debug;

use crate::color::conversion::Rgb;
use crate::constants::extraction;

/// Which noise-filter pass produced the working set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    /// Brightness in (10, 245) with color or intentional black/white
    Strict,
    /// Brightness in (5, 250)
    Relaxed,
    /// Raw sample
    Unfiltered,
}

/// Grid geometry for stratified sampling
#[derive(Debug, Clone, Copy)]
pub struct SampleGrid {
    pub rows: u32,
    pub cols: u32,
    pub pixels_per_region: usize,
}

impl SampleGrid {
    /// Pixel bounds `(x0, x1, y0, y1)` of a cell; the last row and column absorb remainders
    pub fn region_bounds(&self, width: u32, height: u32, row: u32, col: u32) -> (u32, u32, u32, u32) {
        let region_height = height / self.rows;
        let region_width = width / self.cols;
        let y0 = row * region_height;
        let y1 = if row + 1 < self.rows { y0 + region_height } else { height };
        let x0 = col * region_width;
        let x1 = if col + 1 < self.cols { x0 + region_width } else { width };
        (x0, x1, y0, y1)
    }

    /// Draw up to `pixels_per_region` pixels, without replacement, from every cell
    pub fn sample<R: Rng + ?Sized>(&self, image: &RgbImage, rng: &mut R) -> Vec<Rgb> {
        let (width, height) = image.dimensions();
        let mut sampled = Vec::with_capacity((self.rows * self.cols) as usize * self.pixels_per_region);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let (x0, x1, y0, y1) = self.region_bounds(width, height, row, col);
                let region: Vec<Rgb> = (y0..y1)
                    .flat_map(|y| (x0..x1).map(move |x| (x, y)))
                    .map(|(x, y)| {
                        let p = image.get_pixel(x, y);
                        Rgb::new(p[0], p[1], p[2])
                    })
                    .collect();

                if region.len() > self.pixels_per_region {
                    sampled.extend(
                        index::sample(rng, region.len(), self.pixels_per_region)
                            .into_iter()
                            .map(|i| region[i]),
                    );
                } else {
                    sampled.extend(region);
                }
            }
        }

        debug!(sampled = sampled.len(), rows = self.rows, cols = self.cols, "stratified sample");
        sampled
    }
}

fn passes_strict(pixel: Rgb) -> bool {
    let brightness = pixel.brightness();
    brightness > extraction::BRIGHTNESS_MIN
        && brightness < extraction::BRIGHTNESS_MAX
        && (pixel.dispersion() > extraction::MIN_DISPERSION
            || brightness < extraction::NEAR_BLACK
            || brightness > extraction::NEAR_WHITE)
}

fn passes_relaxed(pixel: Rgb) -> bool {
    let brightness = pixel.brightness();
    brightness > extraction::RELAXED_BRIGHTNESS_MIN && brightness < extraction::RELAXED_BRIGHTNESS_MAX
}

/// Drop noise pixels, loosening the filter when too few survive
pub fn filter_noise(pixels: Vec<Rgb>) -> (Vec<Rgb>, FilterStage) {
    let strict: Vec<Rgb> = pixels.iter().copied().filter(|&p| passes_strict(p)).collect();
    let (filtered, stage) = if strict.len() >= extraction::STRICT_MIN_PIXELS {
        (strict, FilterStage::Strict)
    } else {
        let relaxed: Vec<Rgb> = pixels.iter().copied().filter(|&p| passes_relaxed(p)).collect();
        if relaxed.len() >= extraction::RELAXED_MIN_PIXELS {
            (relaxed, FilterStage::Relaxed)
        } else {
            (pixels, FilterStage::Unfiltered)
        }
    };

    debug!(kept = filtered.len(), ?stage, "noise filter");
    (filtered, stage)
}

/// Uniformly subsample (without replacement) down to `max_pixels`
pub fn cap_working_set<R: Rng + ?Sized>(pixels: Vec<Rgb>, max_pixels: usize, rng: &mut R) -> Vec<Rgb> {
    if pixels.len() <= max_pixels {
        return pixels;
    }
    index::sample(rng, pixels.len(), max_pixels)
        .into_iter()
        .map(|i| pixels[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb as Pixel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GRID: SampleGrid = SampleGrid {
        rows: 4,
        cols: 4,
        pixels_per_region: 3000,
    };

    #[test]
    fn test_region_bounds_absorb_remainder() {
        assert_eq!(GRID.region_bounds(10, 10, 0, 0), (0, 2, 0, 2));
        assert_eq!(GRID.region_bounds(10, 10, 3, 3), (6, 10, 6, 10));
        // Tiny image: only the last cell has pixels
        assert_eq!(GRID.region_bounds(1, 1, 0, 0), (0, 0, 0, 0));
        assert_eq!(GRID.region_bounds(1, 1, 3, 3), (0, 1, 0, 1));
    }

    #[test]
    fn test_small_image_sampled_completely() {
        let img = RgbImage::from_pixel(20, 10, Pixel([1, 2, 3]));
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(GRID.sample(&img, &mut rng).len(), 200);
    }

    #[test]
    fn test_large_regions_are_capped_per_region() {
        let img = RgbImage::from_pixel(400, 400, Pixel([1, 2, 3]));
        let mut rng = StdRng::seed_from_u64(42);
        // 16 regions of 10_000 pixels, 3000 drawn from each
        assert_eq!(GRID.sample(&img, &mut rng).len(), 16 * 3000);
    }

    #[test]
    fn test_every_region_contributes() {
        // Large white field with a small red patch in the bottom-right cell
        let mut img = RgbImage::from_pixel(400, 400, Pixel([250, 250, 250]));
        for y in 380..400 {
            for x in 380..400 {
                img.put_pixel(x, y, Pixel([200, 20, 20]));
            }
        }
        let mut rng = StdRng::seed_from_u64(7);
        let sample = GRID.sample(&img, &mut rng);
        let red = sample.iter().filter(|p| p.r == 200).count();
        assert!(red > 0);
    }

    #[test]
    fn test_sampling_is_seeded() {
        let mut img = RgbImage::new(300, 300);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Pixel([x as u8, y as u8, (x ^ y) as u8]);
        }
        let a = GRID.sample(&img, &mut StdRng::seed_from_u64(42));
        let b = GRID.sample(&img, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_strict_filter() {
        assert!(passes_strict(Rgb::new(200, 40, 40)));
        assert!(!passes_strict(Rgb::new(5, 5, 5))); // Too dark
        assert!(!passes_strict(Rgb::new(250, 250, 250))); // Too bright
        assert!(!passes_strict(Rgb::new(128, 128, 128))); // Mid gray, no color
        assert!(passes_strict(Rgb::new(20, 20, 20))); // Intentional black
        assert!(passes_strict(Rgb::new(230, 230, 230))); // Intentional white
    }

    #[test]
    fn test_filter_prefers_strict() {
        let mut pixels = vec![Rgb::new(200, 40, 40); 600];
        pixels.extend(vec![Rgb::new(128, 128, 128); 100]);
        let (kept, stage) = filter_noise(pixels);
        assert_eq!(stage, FilterStage::Strict);
        assert_eq!(kept.len(), 600);
    }

    #[test]
    fn test_filter_relaxes_for_gray_images() {
        let pixels = vec![Rgb::new(128, 128, 128); 700];
        let (kept, stage) = filter_noise(pixels);
        assert_eq!(stage, FilterStage::Relaxed);
        assert_eq!(kept.len(), 700);
    }

    #[test]
    fn test_filter_falls_back_to_raw() {
        let pixels = vec![Rgb::new(0, 0, 0); 300];
        let (kept, stage) = filter_noise(pixels);
        assert_eq!(stage, FilterStage::Unfiltered);
        assert_eq!(kept.len(), 300);
    }

    #[test]
    fn test_cap_working_set() {
        let pixels: Vec<Rgb> = (0..30_000u32).map(|i| Rgb::new((i % 256) as u8, 0, 0)).collect();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(cap_working_set(pixels.clone(), 25_000, &mut rng).len(), 25_000);
        assert_eq!(cap_working_set(pixels, 40_000, &mut rng).len(), 30_000);
    }
}
