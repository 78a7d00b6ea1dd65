//! Validation errors raised when constructing a correlation engine.
//!
//! All checks run before any Fourier transform is computed, so a failed
//! construction leaves no partial engine state behind.

use thiserror::Error;

/// Errors detected while validating engine inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("image dimensions do not match: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    #[error("image spacings do not match: {0:?} vs {1:?}")]
    SpacingMismatch(Vec<f64>, Vec<f64>),

    #[error("expected a {expected}-dimensional image, got {actual} dimensions")]
    WrongDimensionality { expected: usize, actual: usize },

    #[error("a stack of at least 2 slices is required, got {0}")]
    InsufficientStackDepth(usize),

    #[error("data length {len} does not match shape {shape:?}")]
    DataLength { len: usize, shape: Vec<usize> },
}
