//! JavaScript bindings.
//!
//! Options are passed as a JSON string using the same camelCase keys as
//! [`VectorizeConfig`]; omitted keys take their defaults.

use image::RgbaImage;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::{VectorizeConfig, VectorizeError, Vectorizer, decode_rgba};

fn to_js(err: VectorizeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_options(options: Option<String>) -> Result<VectorizeConfig, JsValue> {
    match options.as_deref().map(str::trim) {
        None | Some("") => Ok(VectorizeConfig::default()),
        Some(doc) => VectorizeConfig::from_json(doc).map_err(to_js),
    }
}

fn palette_from_js(palette: &Array) -> Result<Vec<String>, JsValue> {
    palette
        .iter()
        .map(|val| {
            val.as_string()
                .ok_or_else(|| JsValue::from_str("Palette values must be strings"))
        })
        .collect()
}

fn hex_array(palette: Vec<String>) -> Array {
    let out = Array::new();
    for hex in palette {
        out.push(&JsValue::from_str(&hex));
    }
    out
}

/// Extract the ranked palette of an encoded image (PNG, JPEG, ...).
#[wasm_bindgen]
pub fn extract_palette(input: Vec<u8>, options: Option<String>) -> Result<Array, JsValue> {
    let config = parse_options(options)?;
    let img = decode_rgba(&input).map_err(to_js)?;
    crate::extract_palette(&img, &config).map(hex_array).map_err(to_js)
}

/// Vectorize an encoded image.
///
/// `palette`, when given, overrides the `palette` option. Returns
/// `{ svg: string, palette: string[] }` where `palette` is the extracted
/// ranked palette of the same image.
#[wasm_bindgen]
pub fn vectorize(input: Vec<u8>, options: Option<String>, palette: Option<Array>) -> Result<Object, JsValue> {
    let mut config = parse_options(options)?;
    if let Some(js_palette) = palette {
        config.palette = Some(palette_from_js(&js_palette)?);
    }
    let img = decode_rgba(&input).map_err(to_js)?;

    let ranked = crate::extract_palette(&img, &config).map_err(to_js)?;
    let svg = crate::vectorize(&img, &config).map_err(to_js)?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("svg"), &JsValue::from_str(&svg))?;
    Reflect::set(&result, &JsValue::from_str("palette"), &hex_array(ranked))?;
    Ok(result)
}

/// Stateful handle: load an image once, then query palette and SVG.
#[wasm_bindgen]
pub struct WasmVectorizer {
    inner: Vectorizer,
}

#[wasm_bindgen]
impl WasmVectorizer {
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<WasmVectorizer, JsValue> {
        let config = parse_options(options)?;
        Ok(Self { inner: Vectorizer::new(config).map_err(to_js)? })
    }

    /// Replace the options; the loaded image is kept.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: Option<String>) -> Result<(), JsValue> {
        let config = parse_options(options)?;
        self.inner.set_config(config).map_err(to_js)
    }

    /// Load an encoded image.
    pub fn load(&mut self, input: Vec<u8>) -> Result<(), JsValue> {
        let img = decode_rgba(&input).map_err(to_js)?;
        self.inner.attach(img);
        Ok(())
    }

    /// Load raw RGBA pixels, e.g. `ImageData.data` from a canvas.
    #[wasm_bindgen(js_name = loadRgba)]
    pub fn load_rgba(&mut self, data: Vec<u8>, width: u32, height: u32) -> Result<(), JsValue> {
        let img = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            JsValue::from_str(&format!("RGBA buffer does not match {width}x{height}"))
        })?;
        self.inner.attach(img);
        Ok(())
    }

    pub fn palette(&self) -> Result<Array, JsValue> {
        self.inner.palette().map(hex_array).map_err(to_js)
    }

    pub fn vectorize(&self) -> Result<String, JsValue> {
        self.inner.vectorize().map_err(to_js)
    }
}
