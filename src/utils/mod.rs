//! Utility functions for correlation analysis
//!
//! - Zero-padding to square/cubic canvases
//! - Small numeric helpers (guarded division)

pub mod arrays;
pub mod padding;

pub use arrays::*;
pub use padding::*;
