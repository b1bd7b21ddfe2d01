//! Palette extraction and flat-color polygon vectorization for raster images.
//!
//! Two independent pipelines share the same configuration:
//!
//! 1. **Palette** – downsample, cluster with k-means in RGB, rank the centers
//!    by membership and return `#RRGGBB` strings, most frequent first.
//! 2. **Vectorize** – flood-collect same-colored regions over the full
//!    resolution buffer, drop small ones, decimate their points and emit a
//!    flat SVG document of `<polygon>` elements.

pub mod color;
pub mod config;
pub mod error;
pub mod kmeans;
pub mod rank;
pub mod sampler;
pub mod simplify;
pub mod source;
pub mod svg;
pub mod trace;
pub mod wasm;

use image::RgbaImage;

pub use color::{PaletteFilter, parse_hex, to_hex};
pub use config::VectorizeConfig;
pub use error::{Result, VectorizeError};
pub use rank::RankedColor;
pub use source::PixelSource;
pub use svg::Polygon;
pub use trace::{Point, Region, TraceStats};

// ------------------------------------------------------------
// Palette
// ------------------------------------------------------------

/// Frequency-ranked palette entries for `source`.
pub fn rank_palette<S: PixelSource + ?Sized>(source: &S, config: &VectorizeConfig) -> Result<Vec<RankedColor>> {
    config.validate()?;
    let samples = sampler::sample_pixels(source, config.target_pixels)?;
    let clustering = kmeans::cluster(&samples, config.k, config.iterations)?;
    Ok(rank::rank_centers(&samples, &clustering.centers))
}

/// Extract up to `k` representative colors as `#RRGGBB`, most frequent first.
///
/// Empty images yield an empty palette.
pub fn extract_palette<S: PixelSource + ?Sized>(source: &S, config: &VectorizeConfig) -> Result<Vec<String>> {
    let ranked = rank_palette(source, config)?;
    let palette = rank::palette_hex(&ranked);
    log::info!("extracted {} palette colors", palette.len());
    Ok(palette)
}

// ------------------------------------------------------------
// Vectorize
// ------------------------------------------------------------

/// Trace and simplify the regions of `source` without serializing them.
pub fn trace_polygons<S: PixelSource + ?Sized>(
    source: &S,
    config: &VectorizeConfig,
) -> Result<(Vec<Polygon>, TraceStats)> {
    config.validate()?;
    let filter = config.palette_filter()?;
    let pixels = source.read_all()?;
    let (regions, stats) = trace::trace_regions(
        &pixels,
        source.width(),
        source.height(),
        filter.as_ref(),
        config.min_area,
    )?;

    let polygons = regions
        .into_iter()
        .map(|region| Polygon {
            fill: region.fill,
            points: simplify::simplify_points(&region.points, config.simplify),
        })
        .collect();
    Ok((polygons, stats))
}

/// Convert `source` into an SVG document of flat-color polygons.
///
/// This is a blocking call; it returns once tracing is complete.
pub fn vectorize<S: PixelSource + ?Sized>(source: &S, config: &VectorizeConfig) -> Result<String> {
    let (polygons, stats) = trace_polygons(source, config)?;
    log::info!(
        "vectorized {}x{} into {} polygons ({} regions discovered)",
        source.width(),
        source.height(),
        polygons.len(),
        stats.discovered
    );
    Ok(svg::to_svg(source.width(), source.height(), &polygons))
}

// ------------------------------------------------------------
// Session
// ------------------------------------------------------------

/// Holds a configuration and, once attached, the image to work on.
///
/// Calls made before a source is attached fail with
/// [`VectorizeError::BackendUnavailable`].
pub struct Vectorizer {
    config: VectorizeConfig,
    source: Option<Box<dyn PixelSource>>,
}

impl Vectorizer {
    pub fn new(config: VectorizeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, source: None })
    }

    pub fn config(&self) -> &VectorizeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: VectorizeConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn attach(&mut self, source: impl PixelSource + 'static) {
        self.source = Some(Box::new(source));
    }

    pub fn detach(&mut self) {
        self.source = None;
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    fn source(&self) -> Result<&dyn PixelSource> {
        self.source
            .as_deref()
            .ok_or_else(|| VectorizeError::BackendUnavailable("no image attached".into()))
    }

    pub fn palette(&self) -> Result<Vec<String>> {
        extract_palette(self.source()?, &self.config)
    }

    pub fn vectorize(&self) -> Result<String> {
        vectorize(self.source()?, &self.config)
    }
}

// ------------------------------------------------------------
// Encoded-image helpers
// ------------------------------------------------------------

/// Decode any format the `image` crate understands into RGBA8.
pub fn decode_rgba(input: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(input)?.to_rgba8())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn extract_palette_bytes(input: &[u8], config: &VectorizeConfig) -> Result<Vec<String>> {
    extract_palette(&decode_rgba(input)?, config)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn vectorize_bytes(input: &[u8], config: &VectorizeConfig) -> Result<String> {
    vectorize(&decode_rgba(input)?, config)
}
