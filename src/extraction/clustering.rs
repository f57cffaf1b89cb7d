//! Seeded k-means clustering and cluster importance scoring
//!
//! Clustering runs in normalized sRGB with `kmeans_colors`, repeated over
//! several seeds, keeping the lowest-score (tightest) run. When the working
//! set has no more distinct colors than requested clusters, each distinct
//! color becomes its own cluster directly.

use std::collections::HashMap;

use kmeans_colors::{get_kmeans, Kmeans};
use palette::Srgb;
use tracing::debug;

use crate::color::conversion::Rgb;
use crate::constants::extraction;

/// Clustering budget
#[derive(Debug, Clone, Copy)]
pub struct ClusterParams {
    pub clusters: usize,
    pub n_init: usize,
    pub max_iterations: usize,
    pub convergence: f32,
    pub seed: u64,
}

/// A scored cluster of working-set pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: Rgb,
    pub count: usize,
    /// Mean of the per-channel standard deviations
    pub saturation: f64,
    /// `1 / (variance + 1)` over all channel values of the members
    pub coherence: f64,
    pub score: f64,
}

impl Cluster {
    fn from_members(centroid: Rgb, members: &[Rgb]) -> Self {
        let count = members.len();
        if count == 0 {
            return Self {
                centroid,
                count,
                saturation: 0.0,
                coherence: 0.0,
                score: 0.0,
            };
        }

        let n = count as f64;
        let mut sums = [0.0f64; 3];
        let mut squares = [0.0f64; 3];
        for member in members {
            for (channel, value) in member.channels().iter().enumerate() {
                let v = f64::from(*value);
                sums[channel] += v;
                squares[channel] += v * v;
            }
        }

        let channel_std = |i: usize| {
            let mean = sums[i] / n;
            (squares[i] / n - mean * mean).max(0.0).sqrt()
        };
        let saturation = (channel_std(0) + channel_std(1) + channel_std(2)) / 3.0;

        // Variance of the flattened 3*n channel values
        let total = 3.0 * n;
        let mean_all = sums.iter().sum::<f64>() / total;
        let variance = (squares.iter().sum::<f64>() / total - mean_all * mean_all).max(0.0);
        let coherence = 1.0 / (variance + 1.0);

        let score = extraction::WEIGHT_SIZE * n
            + extraction::WEIGHT_SATURATION * saturation * n
            + extraction::WEIGHT_COHERENCE * coherence * n;

        Self {
            centroid,
            count,
            saturation,
            coherence,
            score,
        }
    }
}

/// Partition pixels into clusters, sorted by descending importance score
pub fn cluster_pixels(pixels: &[Rgb], params: &ClusterParams) -> Vec<Cluster> {
    if pixels.is_empty() || params.clusters == 0 {
        return Vec::new();
    }

    let mut distinct: HashMap<Rgb, usize> = HashMap::new();
    for &pixel in pixels {
        *distinct.entry(pixel).or_insert(0) += 1;
    }

    let mut clusters = if distinct.len() <= params.clusters {
        debug!(distinct = distinct.len(), "working set has few distinct colors, grouping exactly");
        group_exact(pixels, &distinct)
    } else {
        run_kmeans(pixels, params)
    };

    clusters.sort_by(|a, b| b.score.total_cmp(&a.score));
    for cluster in &clusters {
        debug!(
            centroid = %cluster.centroid.to_hex(),
            count = cluster.count,
            score = cluster.score,
            "cluster"
        );
    }
    clusters
}

fn group_exact(pixels: &[Rgb], distinct: &HashMap<Rgb, usize>) -> Vec<Cluster> {
    // First-seen order keeps the result independent of hash iteration order
    let mut order: Vec<Rgb> = Vec::with_capacity(distinct.len());
    for &pixel in pixels {
        if !order.contains(&pixel) {
            order.push(pixel);
        }
        if order.len() == distinct.len() {
            break;
        }
    }

    order
        .into_iter()
        .map(|color| {
            let members = vec![color; distinct.get(&color).copied().unwrap_or(0)];
            Cluster::from_members(color, &members)
        })
        .collect()
}

fn to_srgb_buffer(pixels: &[Rgb]) -> Vec<Srgb> {
    pixels
        .iter()
        .map(|p| {
            Srgb::new(
                f32::from(p.r) / 255.0,
                f32::from(p.g) / 255.0,
                f32::from(p.b) / 255.0,
            )
        })
        .collect()
}

/// Lowest-score result over `n_init` runs seeded `seed, seed + 1, ...`
fn best_kmeans(buffer: &[Srgb], params: &ClusterParams) -> Kmeans<Srgb> {
    let run = |offset: u64| {
        get_kmeans(
            params.clusters,
            params.max_iterations,
            params.convergence,
            false,
            buffer,
            params.seed.wrapping_add(offset),
        )
    };

    let mut best = run(0);
    for offset in 1..params.n_init.max(1) as u64 {
        let candidate = run(offset);
        if candidate.score < best.score {
            best = candidate;
        }
    }
    debug!(score = best.score, runs = params.n_init, "k-means converged");
    best
}

fn run_kmeans(pixels: &[Rgb], params: &ClusterParams) -> Vec<Cluster> {
    let best = best_kmeans(&to_srgb_buffer(pixels), params);

    let mut members: Vec<Vec<Rgb>> = vec![Vec::new(); best.centroids.len()];
    for (pixel, &label) in pixels.iter().zip(best.indices.iter()) {
        if let Some(group) = members.get_mut(usize::from(label)) {
            group.push(*pixel);
        }
    }

    best.centroids
        .iter()
        .zip(members.iter())
        .map(|(centroid, group)| {
            let rgb = Rgb::from_f64_rounded(
                f64::from(centroid.red) * 255.0,
                f64::from(centroid.green) * 255.0,
                f64::from(centroid.blue) * 255.0,
            );
            Cluster::from_members(rgb, group)
        })
        .collect()
}
