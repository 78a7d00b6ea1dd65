//! FRC-WASM: WebAssembly-accelerated Fourier correlation resolution analysis
//!
//! This crate measures the spatial resolution of microscopy images by
//! correlating two independently acquired images of the same sample in
//! frequency space, compiled to WebAssembly for browser-based analysis.
//!
//! # Modules
//! - `fft`: 2D/3D FFT operations using rustfft
//! - `image`: image container (flat samples + shape + spacing)
//! - `iterators`: ring and sectioned-shell bin geometry providers
//! - `correlation`: the FRC (2D) and directional FSC (3D) engines
//! - `analysis`: threshold-crossing resolution analysis
//! - `utils`: zero-padding, guarded division

// Core modules
pub mod fft;
pub mod image;

// Geometry and engines
pub mod iterators;
pub mod correlation;
pub mod analysis;

// Support modules
pub mod error;
pub mod utils;

use wasm_bindgen::prelude::*;

use crate::correlation::data::DEFAULT_KEY;
use crate::correlation::{DirectionalFsc, FourierCorrelationConfig, Frc};
use crate::image::Image;
use crate::iterators::SectionedFourierShellIterator;
use crate::utils::padding::zero_pad_to_cube;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[allow(unused_macros)]
macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// ============================================================================
// WASM Exports: Fourier Ring Correlation (2D)
// ============================================================================

/// Fourier ring correlation between two 2D images
///
/// # Arguments
/// * `image1`, `image2` - Sample values (nx * ny), Fortran order
/// * `nx`, `ny` - Image dimensions
/// * `pixel_size` - Physical pixel size
/// * `d_bin` - Ring thickness in spectrum samples
/// * `normalize_power` - Divide each spectrum by its image's DC power
///
/// # Returns
/// Object with `frequency`, `correlation`, `pointsPerBin`, `threshold`
/// (Float64Array, one value per ring), `crossingFrequency` and
/// `resolution` (number or null)
#[wasm_bindgen]
pub fn frc_wasm(
    image1: &[f64],
    image2: &[f64],
    nx: usize,
    ny: usize,
    pixel_size: f64,
    d_bin: f64,
    normalize_power: bool,
) -> Result<js_sys::Object, JsValue> {
    console_log!("WASM FRC: {}x{}, d_bin={:.1}, normalize={}", nx, ny, d_bin, normalize_power);

    let image1 = Image::new(image1.to_vec(), vec![nx, ny], vec![pixel_size, pixel_size])
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let image2 = Image::new(image2.to_vec(), vec![nx, ny], vec![pixel_size, pixel_size])
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let config = FourierCorrelationConfig {
        d_bin,
        normalize_power,
        ..Default::default()
    };

    let mut frc = Frc::new(&image1, &image2, config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let analysis = frc
        .execute()
        .get(&DEFAULT_KEY)
        .ok_or_else(|| JsValue::from_str("ring correlation produced no result"))?;

    let curve = &analysis.data.correlation;

    let result = js_sys::Object::new();
    js_sys::Reflect::set(
        &result,
        &"frequency".into(),
        &js_sys::Float64Array::from(curve.frequency.as_slice()),
    )?;
    js_sys::Reflect::set(
        &result,
        &"correlation".into(),
        &js_sys::Float64Array::from(curve.correlation.as_slice()),
    )?;
    js_sys::Reflect::set(
        &result,
        &"pointsPerBin".into(),
        &js_sys::Float64Array::from(curve.points_per_bin.as_slice()),
    )?;
    js_sys::Reflect::set(
        &result,
        &"threshold".into(),
        &js_sys::Float64Array::from(analysis.threshold.as_slice()),
    )?;
    js_sys::Reflect::set(
        &result,
        &"crossingFrequency".into(),
        &analysis.crossing_frequency.map_or(JsValue::NULL, JsValue::from),
    )?;
    js_sys::Reflect::set(
        &result,
        &"resolution".into(),
        &analysis.resolution.map_or(JsValue::NULL, JsValue::from),
    )?;

    match analysis.resolution {
        Some(resolution) => console_log!("WASM FRC complete: resolution {:.4}", resolution),
        None => console_log!("WASM FRC complete: no threshold crossing"),
    }
    Ok(result)
}

// ============================================================================
// WASM Exports: Directional Fourier Shell Correlation (3D)
// ============================================================================

/// Directional Fourier shell correlation between two 3D stacks
///
/// Non-cubic stacks are zero-padded to a cube before the analysis.
///
/// # Arguments
/// * `image1`, `image2` - Sample values (nx * ny * nz), Fortran order
/// * `nx`, `ny`, `nz` - Stack dimensions
/// * `voxel_size` - Physical voxel size
/// * `d_bin` - Shell thickness in spectrum samples
/// * `d_angle` - Angular section aperture in degrees
/// * `normalize_power` - Divide each spectrum by its image's DC power
///
/// # Returns
/// Object with `angles` (degrees), shared `frequency`, and row-major
/// `correlation` / `pointsPerBin` matrices (angles x radii), plus
/// `voxelSize`
#[wasm_bindgen]
pub fn fsc_wasm(
    image1: &[f64],
    image2: &[f64],
    nx: usize,
    ny: usize,
    nz: usize,
    voxel_size: f64,
    d_bin: f64,
    d_angle: f64,
    normalize_power: bool,
) -> Result<js_sys::Object, JsValue> {
    console_log!(
        "WASM FSC: {}x{}x{}, d_bin={:.1}, d_angle={:.1}, normalize={}",
        nx, ny, nz, d_bin, d_angle, normalize_power
    );

    let spacing = vec![voxel_size, voxel_size, voxel_size];
    let image1 = Image::new(image1.to_vec(), vec![nx, ny, nz], spacing.clone())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let image2 = Image::new(image2.to_vec(), vec![nx, ny, nz], spacing)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // The shell geometry needs a cubic canvas
    let image1 = zero_pad_to_cube(&image1);
    let image2 = zero_pad_to_cube(&image2);
    let n = image1.shape()[0];

    let iterator = SectionedFourierShellIterator::new(n, d_bin, d_angle);
    let mut fsc = DirectionalFsc::new(&image1, &image2, iterator, normalize_power)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let voxel = fsc.pixel_size();
    let collection = fsc.execute();

    let mut angles = Vec::with_capacity(collection.len());
    let mut frequency: Vec<f64> = Vec::new();
    let mut correlation = Vec::new();
    let mut points = Vec::new();

    for (&angle, data) in collection {
        let curve = &data.correlation;
        if frequency.is_empty() {
            frequency = curve.frequency.clone();
        }
        angles.push(angle as f64);
        correlation.extend_from_slice(&curve.correlation);
        points.extend_from_slice(&curve.points_per_bin);
    }

    let result = js_sys::Object::new();
    js_sys::Reflect::set(
        &result,
        &"angles".into(),
        &js_sys::Float64Array::from(angles.as_slice()),
    )?;
    js_sys::Reflect::set(
        &result,
        &"frequency".into(),
        &js_sys::Float64Array::from(frequency.as_slice()),
    )?;
    js_sys::Reflect::set(
        &result,
        &"correlation".into(),
        &js_sys::Float64Array::from(correlation.as_slice()),
    )?;
    js_sys::Reflect::set(
        &result,
        &"pointsPerBin".into(),
        &js_sys::Float64Array::from(points.as_slice()),
    )?;
    js_sys::Reflect::set(&result, &"voxelSize".into(), &JsValue::from(voxel))?;

    console_log!("WASM FSC complete: {} directions", angles.len());
    Ok(result)
}
