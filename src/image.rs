//! Image container for correlation analysis.
//!
//! Bundles a flat sample buffer with its shape and per-axis physical
//! spacing. Data is stored in Fortran (column-major) order to match the
//! FFT and indexing conventions used throughout the crate.

use crate::error::ValidationError;

/// An N-dimensional image: flat samples plus shape and spacing metadata.
///
/// The spacing of the first axis is used as "the" pixel/voxel size when
/// converting frequency-space results to physical units.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Vec<f64>,
    shape: Vec<usize>,
    spacing: Vec<f64>,
}

impl Image {
    /// Create an image from a flat buffer in Fortran order.
    ///
    /// # Arguments
    /// * `data` - Sample values, length must equal the product of `shape`
    /// * `shape` - Extent along each axis
    /// * `spacing` - Physical sample spacing along each axis, one entry per axis
    ///
    /// # Errors
    /// `ValidationError::DataLength` if the buffer does not match the shape,
    /// `ValidationError::WrongDimensionality` if `spacing` does not have one
    /// entry per axis.
    pub fn new(data: Vec<f64>, shape: Vec<usize>, spacing: Vec<f64>) -> Result<Self, ValidationError> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(ValidationError::DataLength {
                len: data.len(),
                shape,
            });
        }
        if spacing.len() != shape.len() {
            return Err(ValidationError::WrongDimensionality {
                expected: shape.len(),
                actual: spacing.len(),
            });
        }
        Ok(Self { data, shape, spacing })
    }

    /// Build an image from parts already known to be consistent.
    pub(crate) fn from_parts(data: Vec<f64>, shape: Vec<usize>, spacing: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Self { data, shape, spacing }
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}
