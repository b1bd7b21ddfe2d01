use palette::Srgb;

use crate::color::to_hex;
use crate::kmeans::assign;
use crate::sampler::Samples;

/// A palette color and how many opaque samples fell closest to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedColor {
    pub color: Srgb<u8>,
    pub count: usize,
}

/// Count nearest-center membership and order centers by it, most frequent first.
///
/// Uses the same assignment rule as clustering, so transparent samples are
/// not counted. The sort is stable: equal counts keep center order.
pub fn rank_centers(samples: &Samples, centers: &[Srgb<f32>]) -> Vec<RankedColor> {
    let mut counts = vec![0usize; centers.len()];
    for cluster in assign(samples, centers).into_iter().flatten() {
        counts[cluster] += 1;
    }

    let mut ranked: Vec<RankedColor> = centers
        .iter()
        .zip(counts)
        .map(|(c, count)| RankedColor { color: c.into_format(), count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// `#RRGGBB` strings in ranked order.
pub fn palette_hex(ranked: &[RankedColor]) -> Vec<String> {
    ranked.iter().map(|r| to_hex(r.color)).collect()
}
