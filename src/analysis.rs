//! Resolution analysis of correlation curves
//!
//! Consumes a collection of correlation curves, locates the frequency at
//! which each curve drops below its threshold and converts that crossing
//! into a resolution figure in physical units.

use std::collections::BTreeMap;

use crate::correlation::data::{FourierCorrelationData, FourierCorrelationDataCollection};

/// Criterion deciding the threshold the correlation curve is tested against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdCriterion {
    /// A constant threshold across all frequencies. 0.143 is the common
    /// fixed criterion for resolution estimation.
    Fixed(f64),
    /// Half-bit information curve, computed per bin from its sample count.
    HalfBit,
    /// One-bit information curve, computed per bin from its sample count.
    OneBit,
}

impl Default for ThresholdCriterion {
    fn default() -> Self {
        ThresholdCriterion::Fixed(0.143)
    }
}

impl ThresholdCriterion {
    /// Threshold sequence for a curve with the given per-bin sample counts.
    ///
    /// Empty bins get a threshold of 1.0, which no correlation value can
    /// cross from above.
    pub fn curve(&self, points_per_bin: &[f64]) -> Vec<f64> {
        match *self {
            ThresholdCriterion::Fixed(value) => vec![value; points_per_bin.len()],
            ThresholdCriterion::HalfBit => points_per_bin
                .iter()
                .map(|&n| {
                    if n <= 0.0 {
                        1.0
                    } else {
                        (0.2071 + 1.9102 / n.sqrt()) / (1.2071 + 0.9102 / n.sqrt())
                    }
                })
                .collect(),
            ThresholdCriterion::OneBit => points_per_bin
                .iter()
                .map(|&n| {
                    if n <= 0.0 {
                        1.0
                    } else {
                        (0.5 + 2.4142 / n.sqrt()) / (1.5 + 1.4142 / n.sqrt())
                    }
                })
                .collect(),
        }
    }
}

/// Analysis outcome for one correlation curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    /// The curve the analysis ran on.
    pub data: FourierCorrelationData,
    /// Threshold sequence, one value per bin.
    pub threshold: Vec<f64>,
    /// Normalized frequency at which the curve first drops below the
    /// threshold. None when the curve never crosses.
    pub crossing_frequency: Option<f64>,
    /// Resolution in physical units, 2 * pixel_size / crossing_frequency.
    pub resolution: Option<f64>,
}

/// Keyed analysis results, one entry per curve in the input collection.
pub type ResolutionResultCollection = BTreeMap<i32, ResolutionResult>;

/// Threshold-crossing analysis over a collection of correlation curves.
pub struct FourierCorrelationAnalysis {
    data: FourierCorrelationDataCollection,
    criterion: ThresholdCriterion,
}

impl FourierCorrelationAnalysis {
    pub fn new(data: FourierCorrelationDataCollection, criterion: ThresholdCriterion) -> Self {
        Self { data, criterion }
    }

    /// Run the analysis on every curve in the collection.
    ///
    /// # Arguments
    /// * `pixel_size` - Physical sample spacing of the analyzed images
    pub fn calculate_resolution(self, pixel_size: f64) -> ResolutionResultCollection {
        let criterion = self.criterion;
        self.data
            .iter()
            .map(|(&key, data)| (key, analyze_curve(data, criterion, pixel_size)))
            .collect()
    }
}

fn analyze_curve(
    data: &FourierCorrelationData,
    criterion: ThresholdCriterion,
    pixel_size: f64,
) -> ResolutionResult {
    let curve = &data.correlation;
    let threshold = criterion.curve(&curve.points_per_bin);
    let smoothed = smooth(&curve.correlation);

    let crossing_frequency = find_crossing(&curve.frequency, &smoothed, &threshold);
    let resolution = crossing_frequency.map(|f| 2.0 * pixel_size / f);

    ResolutionResult {
        data: data.clone(),
        threshold,
        crossing_frequency,
        resolution,
    }
}

/// Centered 3-point moving average; the ends use the available neighbors.
fn smooth(values: &[f64]) -> Vec<f64> {
    if values.len() < 3 {
        return values.to_vec();
    }
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let lo = i.saturating_sub(1);
        let hi = (i + 1).min(values.len() - 1);
        let window = &values[lo..=hi];
        out.push(window.iter().sum::<f64>() / window.len() as f64);
    }
    out
}

/// First downward crossing of the threshold, located by linear
/// interpolation between the two straddling bins. NaN bins never satisfy
/// the comparisons and are skipped.
fn find_crossing(frequency: &[f64], correlation: &[f64], threshold: &[f64]) -> Option<f64> {
    for i in 1..correlation.len() {
        let above = correlation[i - 1] - threshold[i - 1];
        let below = correlation[i] - threshold[i];
        if above >= 0.0 && below < 0.0 {
            let t = above / (above - below);
            return Some(frequency[i - 1] + t * (frequency[i] - frequency[i - 1]));
        }
    }
    None
}
