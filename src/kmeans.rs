//! K-means clustering over sampled RGB colors.
//!
//! Seeding is deterministic: the distinct opaque colors of the sample set are
//! collected in first-seen order and center `i` starts at distinct color
//! `floor(i * D / K)`. When the samples hold fewer than `K` distinct colors the
//! clustering degrades to `D` centers. Each round assigns every opaque sample
//! to its nearest center (squared Euclidean RGB distance, lowest index wins
//! ties) and moves each center to the mean of its members. Empty clusters keep
//! their previous value. The loop always runs the requested number of rounds.

use std::collections::HashSet;

use palette::Srgb;

use crate::error::{Result, invalid};
use crate::sampler::Samples;

/// Result of a clustering run.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Normalized (0..=1) centers, indexed by cluster id.
    pub centers: Vec<Srgb<f32>>,
    /// Cluster id per sample from the last round; `None` for transparent samples.
    pub assignments: Vec<Option<usize>>,
}

#[inline(always)]
fn normalize(rgb: [u8; 3]) -> Srgb<f32> {
    Srgb::new(rgb[0], rgb[1], rgb[2]).into_format()
}

#[inline(always)]
fn distance_sq(a: Srgb<f32>, b: Srgb<f32>) -> f32 {
    let dr = a.red - b.red;
    let dg = a.green - b.green;
    let db = a.blue - b.blue;
    dr * dr + dg * dg + db * db
}

/// Index of the center closest to `rgb`, or `None` when there are no centers.
pub(crate) fn nearest(centers: &[Srgb<f32>], rgb: [u8; 3]) -> Option<usize> {
    let color = normalize(rgb);
    let mut best = None;
    let mut best_dist = f32::INFINITY;
    for (idx, &c) in centers.iter().enumerate() {
        let d = distance_sq(color, c);
        if d < best_dist {
            best_dist = d;
            best = Some(idx);
        }
    }
    best
}

/// Assign each opaque sample to its nearest center.
pub(crate) fn assign(samples: &Samples, centers: &[Srgb<f32>]) -> Vec<Option<usize>> {
    samples
        .pixels()
        .map(|p| if p[3] == 0 { None } else { nearest(centers, [p[0], p[1], p[2]]) })
        .collect()
}

fn seed_centers(samples: &Samples, k: usize) -> Vec<Srgb<f32>> {
    let mut seen = HashSet::new();
    let distinct: Vec<[u8; 3]> = samples
        .pixels()
        .filter(|p| p[3] != 0)
        .map(|p| [p[0], p[1], p[2]])
        .filter(|rgb| seen.insert(*rgb))
        .collect();

    let count = k.min(distinct.len());
    (0..count)
        .map(|i| normalize(distinct[i * distinct.len() / count]))
        .collect()
}

/// Move every non-empty cluster to the mean of its members.
fn update_centers(samples: &Samples, assignments: &[Option<usize>], centers: &mut [Srgb<f32>]) {
    let mut sums = vec![[0u64; 3]; centers.len()];
    let mut counts = vec![0u64; centers.len()];
    for (p, cluster) in samples.pixels().zip(assignments) {
        if let Some(c) = *cluster {
            sums[c][0] += p[0] as u64;
            sums[c][1] += p[1] as u64;
            sums[c][2] += p[2] as u64;
            counts[c] += 1;
        }
    }
    for ((center, sum), &n) in centers.iter_mut().zip(&sums).zip(&counts) {
        if n == 0 {
            continue;
        }
        let scale = n as f64 * 255.0;
        *center = Srgb::new(
            (sum[0] as f64 / scale) as f32,
            (sum[1] as f64 / scale) as f32,
            (sum[2] as f64 / scale) as f32,
        );
    }
}

/// Cluster the opaque samples into at most `k` centers over `iterations` rounds.
pub fn cluster(samples: &Samples, k: usize, iterations: usize) -> Result<Clustering> {
    if k == 0 {
        return Err(invalid("palette size k must be at least 1"));
    }

    let mut centers = seed_centers(samples, k);
    if centers.len() < k {
        log::debug!("only {} distinct colors sampled, clustering with {} of {k} centers", centers.len(), centers.len());
    }

    let mut assignments = assign(samples, &centers);
    for round in 0..iterations {
        if round > 0 {
            assignments = assign(samples, &centers);
        }
        update_centers(samples, &assignments, &mut centers);
    }

    log::debug!("k-means finished: {} centers, {iterations} rounds, {} samples", centers.len(), samples.len());
    Ok(Clustering { centers, assignments })
}
