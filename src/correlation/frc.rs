//! Fourier ring correlation (2D)

use crate::analysis::{FourierCorrelationAnalysis, ResolutionResultCollection};
use crate::correlation::data::{
    CorrelationCurve, FourierCorrelationData, FourierCorrelationDataCollection, DEFAULT_KEY,
};
use crate::correlation::FourierCorrelationConfig;
use crate::error::ValidationError;
use crate::fft::{fft2d_real, fftshift2d};
use crate::image::Image;
use crate::iterators::FourierRingIterator;
use crate::utils::padding::zero_pad_to_square;

/// Fourier ring correlation between two 2D images.
///
/// Both inputs are zero-padded to a square canvas and transformed once at
/// construction; the correlation works on the real part of the shifted
/// spectra. The curve is assembled per ring and handed to the resolution
/// analysis, whose output is cached on the instance.
pub struct Frc {
    fft_image1: Vec<f64>,
    fft_image2: Vec<f64>,
    iterator: FourierRingIterator,
    freq_nyq: usize,
    pixel_size: f64,
    config: FourierCorrelationConfig,
    result: Option<ResolutionResultCollection>,
}

impl Frc {
    /// Validate the input pair and prepare the spectra.
    ///
    /// # Errors
    /// `ValidationError` when either input is not 2D, or when the shapes
    /// or spacings differ. All checks run before any transform work.
    pub fn new(
        image1: &Image,
        image2: &Image,
        config: FourierCorrelationConfig,
    ) -> Result<Self, ValidationError> {
        if image1.ndim() != 2 {
            return Err(ValidationError::WrongDimensionality {
                expected: 2,
                actual: image1.ndim(),
            });
        }
        if image2.ndim() != 2 {
            return Err(ValidationError::WrongDimensionality {
                expected: 2,
                actual: image2.ndim(),
            });
        }
        if image1.shape() != image2.shape() {
            return Err(ValidationError::ShapeMismatch(
                image1.shape().to_vec(),
                image2.shape().to_vec(),
            ));
        }
        if image1.spacing() != image2.spacing() {
            return Err(ValidationError::SpacingMismatch(
                image1.spacing().to_vec(),
                image2.spacing().to_vec(),
            ));
        }

        let pixel_size = image1.spacing()[0];

        // Expand to square
        let image1 = zero_pad_to_square(image1);
        let image2 = zero_pad_to_square(image2);
        let n = image1.shape()[0];

        let iterator = FourierRingIterator::new(n, config.d_bin);

        // The ring correlation operates on the real part of the shifted
        // spectrum, not the full complex values.
        let mut fft_image1 = real_part_of_shifted_spectrum(&image1, n);
        let mut fft_image2 = real_part_of_shifted_spectrum(&image2, n);

        if config.normalize_power {
            // DC-power normalization. A zero-mean image makes the divisor
            // zero and non-finite values propagate per float semantics.
            let pixels = (n * n) as f64;
            let norm1 = pixels * image1.mean();
            let norm2 = pixels * image2.mean();
            for v in fft_image1.iter_mut() {
                *v /= norm1;
            }
            for v in fft_image2.iter_mut() {
                *v /= norm2;
            }
        }

        let freq_nyq = n / 2;

        Ok(Self {
            fft_image1,
            fft_image2,
            iterator,
            freq_nyq,
            pixel_size,
            config,
            result: None,
        })
    }

    /// Calculate the ring correlation and the resolution analysis.
    ///
    /// The first call runs the full computation; repeat calls return the
    /// cached result.
    pub fn execute(&mut self) -> &ResolutionResultCollection {
        let result = match self.result.take() {
            Some(cached) => cached,
            None => self.compute(),
        };
        self.result.insert(result)
    }

    /// The analysis result, computing it on first access.
    pub fn result(&mut self) -> &ResolutionResultCollection {
        self.execute()
    }

    fn compute(&self) -> ResolutionResultCollection {
        let n_bins = self.iterator.len();
        let mut c1 = vec![0.0; n_bins];
        let mut c2 = vec![0.0; n_bins];
        let mut c3 = vec![0.0; n_bins];
        let mut points = vec![0.0; n_bins];

        for (indices, idx) in self.iterator.bins() {
            let mut sum12 = 0.0;
            let mut sum11 = 0.0;
            let mut sum22 = 0.0;
            for &i in indices {
                let s1 = self.fft_image1[i];
                let s2 = self.fft_image2[i];
                // Real spectra: s2's conjugate is s2 itself
                sum12 += s1 * s2;
                sum11 += s1 * s1;
                sum22 += s2 * s2;
            }
            c1[idx] = sum12;
            c2[idx] = sum11;
            c3[idx] = sum22;
            points[idx] = indices.len() as f64;
        }

        let mut correlation = Vec::with_capacity(n_bins);
        let mut frequency = Vec::with_capacity(n_bins);
        for idx in 0..n_bins {
            // Unguarded: an empty or zero-power ring yields NaN/Inf and
            // surfaces as-is in the curve
            correlation.push(c1[idx].abs() / (c2[idx] * c3[idx]).sqrt());
            frequency.push(idx as f64 * self.config.d_bin / self.freq_nyq as f64);
        }

        let data = FourierCorrelationData {
            correlation: CorrelationCurve {
                correlation,
                frequency,
                points_per_bin: points,
            },
        };

        let mut collection = FourierCorrelationDataCollection::new();
        collection.insert(DEFAULT_KEY, data);

        FourierCorrelationAnalysis::new(collection, self.config.threshold)
            .calculate_resolution(self.pixel_size)
    }
}

fn real_part_of_shifted_spectrum(image: &Image, n: usize) -> Vec<f64> {
    let spectrum = fft2d_real(image.data(), n, n);
    fftshift2d(&spectrum, n, n).iter().map(|c| c.re).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(n: usize, seed: u64) -> Image {
        // Simple LCG so tests are deterministic without an RNG dependency
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let data: Vec<f64> = (0..n * n)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 33) as f64 / (1u64 << 31) as f64
            })
            .collect();
        Image::new(data, vec![n, n], vec![0.05, 0.05]).unwrap()
    }

    #[test]
    fn test_rejects_wrong_dimensionality() {
        let image3d = Image::new(vec![0.0; 8], vec![2, 2, 2], vec![1.0, 1.0, 1.0]).unwrap();
        let err = Frc::new(&image3d, &image3d, FourierCorrelationConfig::default());
        assert!(matches!(
            err,
            Err(ValidationError::WrongDimensionality { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let a = Image::new(vec![0.0; 16], vec![4, 4], vec![1.0, 1.0]).unwrap();
        let b = Image::new(vec![0.0; 36], vec![6, 6], vec![1.0, 1.0]).unwrap();
        let err = Frc::new(&a, &b, FourierCorrelationConfig::default());
        assert!(matches!(err, Err(ValidationError::ShapeMismatch(_, _))));
    }

    #[test]
    fn test_rejects_spacing_mismatch() {
        let a = Image::new(vec![0.0; 16], vec![4, 4], vec![1.0, 1.0]).unwrap();
        let b = Image::new(vec![0.0; 16], vec![4, 4], vec![2.0, 2.0]).unwrap();
        let err = Frc::new(&a, &b, FourierCorrelationConfig::default());
        assert!(matches!(err, Err(ValidationError::SpacingMismatch(_, _))));
    }

    #[test]
    fn test_identity_pair_correlates_to_one() {
        let image = test_image(32, 7);
        let mut frc = Frc::new(&image, &image, FourierCorrelationConfig::default()).unwrap();

        let result = &frc.execute()[&DEFAULT_KEY];
        let curve = &result.data.correlation;
        for (i, &corr) in curve.correlation.iter().enumerate() {
            assert!(
                (corr - 1.0).abs() < 1e-9,
                "ring {} of an identical pair should correlate to 1, got {}",
                i, corr
            );
        }
    }

    #[test]
    fn test_independent_noise_decorrelates() {
        let image1 = test_image(64, 17);
        let image2 = test_image(64, 91);
        let mut frc = Frc::new(&image1, &image2, FourierCorrelationConfig::default()).unwrap();

        let result = &frc.execute()[&DEFAULT_KEY];
        let curve = &result.data.correlation;

        // Mean |correlation| over well-populated rings stays low
        let mut sum = 0.0;
        let mut count = 0;
        for (i, &corr) in curve.correlation.iter().enumerate() {
            if curve.points_per_bin[i] >= 50.0 {
                sum += corr.abs();
                count += 1;
            }
        }
        assert!(count > 0);
        let mean = sum / count as f64;
        assert!(
            mean < 0.35,
            "independent noise should decorrelate, mean |corr| = {}",
            mean
        );
    }

    #[test]
    fn test_frequency_axis_monotonic_in_unit_range() {
        let image = test_image(32, 3);
        let mut frc = Frc::new(&image, &image, FourierCorrelationConfig::default()).unwrap();
        let curve = &frc.execute()[&DEFAULT_KEY].data.correlation;

        let mut prev = -1.0;
        for &f in &curve.frequency {
            assert!(f >= 0.0 && f <= 1.0, "frequency {} outside [0, 1]", f);
            assert!(f >= prev, "frequency axis must be non-decreasing");
            prev = f;
        }
    }

    #[test]
    fn test_deterministic_across_instances() {
        let image1 = test_image(32, 5);
        let image2 = test_image(32, 6);

        let mut frc_a = Frc::new(&image1, &image2, FourierCorrelationConfig::default()).unwrap();
        let mut frc_b = Frc::new(&image1, &image2, FourierCorrelationConfig::default()).unwrap();

        assert_eq!(frc_a.execute(), frc_b.execute());
    }

    #[test]
    fn test_result_is_cached() {
        let image = test_image(16, 11);
        let mut frc = Frc::new(&image, &image, FourierCorrelationConfig::default()).unwrap();

        // Compare the heap allocation of an inner sequence: a recompute
        // would build fresh vectors at new addresses
        let first = frc.result()[&DEFAULT_KEY].data.correlation.frequency.as_ptr();
        let second = frc.result()[&DEFAULT_KEY].data.correlation.frequency.as_ptr();
        assert_eq!(first, second, "repeat result access must not recompute");
    }

    #[test]
    fn test_zero_images_produce_nan_bins() {
        // All-zero inputs have zero spectral power in every ring: the
        // unguarded division yields NaN, which is surfaced, not hidden
        let image = Image::new(vec![0.0; 256], vec![16, 16], vec![1.0, 1.0]).unwrap();
        let mut frc = Frc::new(&image, &image, FourierCorrelationConfig::default()).unwrap();

        let curve = &frc.execute()[&DEFAULT_KEY].data.correlation;
        assert!(
            curve.correlation.iter().all(|c| c.is_nan()),
            "zero-power rings must surface NaN"
        );
    }

    #[test]
    fn test_normalize_power_keeps_identity_correlation() {
        let image = test_image(32, 23);
        let config = FourierCorrelationConfig {
            normalize_power: true,
            ..Default::default()
        };
        let mut frc = Frc::new(&image, &image, config).unwrap();

        let curve = &frc.execute()[&DEFAULT_KEY].data.correlation;
        for &corr in &curve.correlation {
            assert!((corr - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_square_input_is_padded() {
        let data: Vec<f64> = (0..8 * 4).map(|i| (i % 5) as f64).collect();
        let a = Image::new(data.clone(), vec![8, 4], vec![1.0, 1.0]).unwrap();
        let b = Image::new(data, vec![8, 4], vec![1.0, 1.0]).unwrap();

        let mut frc = Frc::new(&a, &b, FourierCorrelationConfig::default()).unwrap();
        let curve = &frc.execute()[&DEFAULT_KEY].data.correlation;

        // Padded canvas is 8x8: Nyquist radius 4, default bin width 1
        assert_eq!(curve.frequency.len(), 4);
    }
}
