use crate::error::Result;
use crate::source::PixelSource;

/// Downsampled RGBA working set used for clustering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Samples {
    pub width: u32,
    pub height: u32,
    pub step: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Samples {
    /// Iterate the sampled pixels as `[r, g, b, a]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data.chunks_exact(4).map(|c| [c[0], c[1], c[2], c[3]])
    }

    pub fn len(&self) -> usize {
        self.data.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Stride between sampled pixels on both axes: `max(1, floor(sqrt(w*h / target)))`,
/// capped at the shorter side so a non-empty image always yields a sample.
#[inline]
pub fn sample_step(width: u32, height: u32, target_pixels: u32) -> u32 {
    let ratio = (width as f64 * height as f64) / target_pixels.max(1) as f64;
    let cap = width.min(height).max(1);
    (ratio.sqrt().floor() as u32).clamp(1, cap)
}

/// Take every `step`-th pixel along both axes of `source`.
///
/// Only sampled rows are fetched, one `read_row` call each, so large sources
/// are never materialized in full.
pub fn sample_pixels<S: PixelSource + ?Sized>(source: &S, target_pixels: u32) -> Result<Samples> {
    let (width, height) = (source.width(), source.height());
    let step = sample_step(width, height, target_pixels);
    let out_w = width / step;
    let out_h = height / step;

    let mut data = Vec::with_capacity(out_w as usize * out_h as usize * 4);
    for sy in 0..out_h {
        let row = source.read_row(sy * step)?;
        for sx in 0..out_w {
            let idx = (sx * step) as usize * 4;
            data.extend_from_slice(&row[idx..idx + 4]);
        }
    }

    log::debug!(
        "sampled {}x{} -> {}x{} (step {}, target {})",
        width, height, out_w, out_h, step, target_pixels
    );

    Ok(Samples { width: out_w, height: out_h, step, data })
}
