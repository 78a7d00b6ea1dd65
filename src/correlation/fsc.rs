//! Directional Fourier shell correlation (3D)

use num_complex::Complex64;

use crate::correlation::data::{
    CorrelationCurve, FourierCorrelationData, FourierCorrelationDataCollection,
};
use crate::error::ValidationError;
use crate::fft::{fft3d_real, fftshift3d};
use crate::image::Image;
use crate::iterators::FourierShellProvider;
use crate::utils::arrays::safe_divide;

/// Orientation-resolved Fourier shell correlation between two 3D stacks.
///
/// The geometry provider is injected so the caller chooses the shell
/// thickness and angular resolution. Unlike the ring engine this one
/// keeps the full complex spectra, and the result is the raw per-angle
/// curve collection; fitting or thresholding per direction is the
/// caller's concern.
pub struct DirectionalFsc<I: FourierShellProvider> {
    iterator: I,
    fft_image1: Vec<Complex64>,
    fft_image2: Vec<Complex64>,
    pixel_size: f64,
    result: Option<FourierCorrelationDataCollection>,
}

impl<I: FourierShellProvider> DirectionalFsc<I> {
    /// Validate the stack pair and prepare the spectra.
    ///
    /// The provider must have been built for the same cubic canvas as the
    /// images; its index sets address the spectra directly.
    ///
    /// # Errors
    /// `ValidationError` when the first input is not a 3D stack of at
    /// least 2 slices, or when the shapes differ.
    pub fn new(
        image1: &Image,
        image2: &Image,
        iterator: I,
        normalize_power: bool,
    ) -> Result<Self, ValidationError> {
        if image1.ndim() != 3 {
            return Err(ValidationError::WrongDimensionality {
                expected: 3,
                actual: image1.ndim(),
            });
        }
        if image1.shape()[0] <= 1 {
            return Err(ValidationError::InsufficientStackDepth(image1.shape()[0]));
        }
        if image1.shape() != image2.shape() {
            return Err(ValidationError::ShapeMismatch(
                image1.shape().to_vec(),
                image2.shape().to_vec(),
            ));
        }

        let (nx, ny, nz) = (image1.shape()[0], image1.shape()[1], image1.shape()[2]);

        let mut fft_image1 = shifted_spectrum(image1, nx, ny, nz);
        let mut fft_image2 = shifted_spectrum(image2, nx, ny, nz);

        if normalize_power {
            // DC-power normalization on a cubic canvas
            let pixels = (nx * nx * nx) as f64;
            let norm1 = pixels * image1.mean();
            let norm2 = pixels * image2.mean();
            for v in fft_image1.iter_mut() {
                *v /= norm1;
            }
            for v in fft_image2.iter_mut() {
                *v /= norm2;
            }
        }

        Ok(Self {
            iterator,
            fft_image1,
            fft_image2,
            pixel_size: image1.spacing()[0],
            result: None,
        })
    }

    /// Voxel size of the analyzed stacks, for per-direction analysis of
    /// the returned curves.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Calculate one correlation curve per rotation angle.
    ///
    /// The first call runs the full computation; repeat calls return the
    /// cached collection.
    pub fn execute(&mut self) -> &FourierCorrelationDataCollection {
        let result = match self.result.take() {
            Some(cached) => cached,
            None => self.compute(),
        };
        self.result.insert(result)
    }

    /// The result collection, computing it on first access.
    pub fn result(&mut self) -> &FourierCorrelationDataCollection {
        self.execute()
    }

    fn compute(&self) -> FourierCorrelationDataCollection {
        let (radii, angles) = self.iterator.steps();
        let freq_nyq = self.iterator.nyquist();
        let n_radii = radii.len();
        let n_angles = angles.len();

        // [angles x radii] accumulators, one cell per (cone, shell) bin
        let mut c1 = vec![0.0; n_angles * n_radii];
        let mut c2 = vec![0.0; n_angles * n_radii];
        let mut c3 = vec![0.0; n_angles * n_radii];
        let mut points = vec![0.0; n_angles * n_radii];

        // Single pass: the provider's bins already factor the spectrum by
        // both shell and cone, so one traversal fills the whole matrix
        for (indices, shell, rotation) in self.iterator.bins() {
            let mut sum12 = 0.0;
            let mut sum11 = 0.0;
            let mut sum22 = 0.0;
            for &i in indices {
                let s1 = self.fft_image1[i];
                let s2 = self.fft_image2[i];
                sum12 += (s1 * s2.conj()).re;
                sum11 += s1.norm_sqr();
                sum22 += s2.norm_sqr();
            }
            let cell = rotation * n_radii + shell;
            c1[cell] = sum12;
            c2[cell] = sum11;
            c3[cell] = sum22;
            points[cell] = indices.len() as f64;
        }

        let frequency: Vec<f64> = radii.iter().map(|&r| r / freq_nyq as f64).collect();

        let mut collection = FourierCorrelationDataCollection::new();
        for (rotation, &angle) in angles.iter().enumerate() {
            let row = rotation * n_radii..(rotation + 1) * n_radii;

            // Empty or zero-power bins get the 0.0 sentinel instead of NaN
            let correlation: Vec<f64> = c1[row.clone()]
                .iter()
                .zip(c2[row.clone()].iter().zip(c3[row.clone()].iter()))
                .map(|(&num, (&d1, &d2))| safe_divide(num, (d1 * d2).sqrt()))
                .collect();

            let data = FourierCorrelationData {
                correlation: CorrelationCurve {
                    correlation,
                    frequency: frequency.clone(),
                    points_per_bin: points[row].to_vec(),
                },
            };
            collection.insert(angle.round() as i32, data);
        }

        collection
    }
}

fn shifted_spectrum(image: &Image, nx: usize, ny: usize, nz: usize) -> Vec<Complex64> {
    let spectrum = fft3d_real(image.data(), nx, ny, nz);
    fftshift3d(&spectrum, nx, ny, nz)
}
