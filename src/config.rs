use serde::{Deserialize, Serialize};

use crate::color::PaletteFilter;
use crate::error::{Result, invalid};

pub const DEFAULT_TARGET_PIXELS: u32 = 120_000;
pub const DEFAULT_K: usize = 10;
pub const DEFAULT_ITERATIONS: usize = 8;
pub const DEFAULT_SIMPLIFY: f32 = 0.35;
pub const DEFAULT_MIN_AREA: f64 = 8.0;

/// Options recognized by palette extraction and vectorization.
///
/// Keys are camelCase when (de)serialized and every key is optional, so
/// `{"k": 6}` is a valid configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VectorizeConfig {
    /// Sampler budget in pixels.
    pub target_pixels: u32,
    /// Palette size.
    pub k: usize,
    /// Clustering rounds; there is no convergence check.
    pub iterations: usize,
    /// Decimation strength in `[0, 1]`, higher keeps fewer points.
    pub simplify: f32,
    /// Minimum shoelace area (px²) for a region to be emitted.
    pub min_area: f64,
    /// Optional hex colors allowed to seed regions.
    pub palette: Option<Vec<String>>,
}

impl Default for VectorizeConfig {
    fn default() -> Self {
        Self {
            target_pixels: DEFAULT_TARGET_PIXELS,
            k: DEFAULT_K,
            iterations: DEFAULT_ITERATIONS,
            simplify: DEFAULT_SIMPLIFY,
            min_area: DEFAULT_MIN_AREA,
            palette: None,
        }
    }
}

impl VectorizeConfig {
    pub fn from_json(doc: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(doc)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_pixels == 0 {
            return Err(invalid("targetPixels must be at least 1"));
        }
        if self.k == 0 {
            return Err(invalid("k must be at least 1"));
        }
        if !self.simplify.is_finite() || !(0.0..=1.0).contains(&self.simplify) {
            return Err(invalid(format!("simplify must lie in [0, 1], got {}", self.simplify)));
        }
        if !self.min_area.is_finite() || self.min_area < 0.0 {
            return Err(invalid(format!("minArea must be a non-negative number, got {}", self.min_area)));
        }
        Ok(())
    }

    /// Parsed palette filter, `None` when unrestricted.
    pub fn palette_filter(&self) -> Result<Option<PaletteFilter>> {
        self.palette.as_deref().map(PaletteFilter::from_hex).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = VectorizeConfig::from_json(r#"{"k": 4, "minArea": 2.5}"#).unwrap();
        assert_eq!(config.k, 4);
        assert_eq!(config.min_area, 2.5);
        assert_eq!(config.target_pixels, DEFAULT_TARGET_PIXELS);
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.simplify, DEFAULT_SIMPLIFY);
        assert!(config.palette.is_none());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let bad = [
            VectorizeConfig { k: 0, ..Default::default() },
            VectorizeConfig { target_pixels: 0, ..Default::default() },
            VectorizeConfig { simplify: 1.5, ..Default::default() },
            VectorizeConfig { simplify: f32::NAN, ..Default::default() },
            VectorizeConfig { min_area: -1.0, ..Default::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
        assert!(VectorizeConfig::default().validate().is_ok());
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = VectorizeConfig::from_json("{ k: }").unwrap_err();
        assert!(matches!(err, crate::VectorizeError::Config(_)));
    }

    #[test]
    fn palette_filter_is_parsed() {
        let config = VectorizeConfig {
            palette: Some(vec!["#ff0000".into()]),
            ..Default::default()
        };
        let filter = config.palette_filter().unwrap().unwrap();
        assert!(filter.contains([255, 0, 0]));
        assert!(VectorizeConfig::default().palette_filter().unwrap().is_none());
    }
}
