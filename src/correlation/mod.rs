//! Frequency-domain correlation engines
//!
//! Two sibling engines share one design: transform both inputs once,
//! partition the centered spectrum into bins supplied by a geometry
//! provider, accumulate three sums per bin and combine them into a
//! normalized correlation coefficient.

pub mod data;
pub mod frc;
pub mod fsc;

pub use data::{CorrelationCurve, FourierCorrelationData, FourierCorrelationDataCollection};
pub use frc::Frc;
pub use fsc::DirectionalFsc;

use crate::analysis::ThresholdCriterion;

/// Options recognized by the correlation engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourierCorrelationConfig {
    /// Ring/shell thickness in spectrum samples.
    pub d_bin: f64,
    /// Angular section aperture in degrees (directional analysis only).
    pub d_angle: f64,
    /// Divide each spectrum by its image's DC power before accumulating.
    pub normalize_power: bool,
    /// Threshold criterion for the resolution analysis.
    pub threshold: ThresholdCriterion,
}

impl Default for FourierCorrelationConfig {
    fn default() -> Self {
        Self {
            d_bin: 1.0,
            d_angle: 15.0,
            normalize_power: false,
            threshold: ThresholdCriterion::default(),
        }
    }
}
