//! Bin geometry providers for frequency-space correlation
//!
//! A provider partitions a zero-frequency-centered spectrum into disjoint
//! index sets: concentric rings in 2D, shells crossed with angular
//! sections in 3D. The correlation engines are written against the
//! provider interface only, so alternative sampling strategies can be
//! swapped in without engine changes.

pub mod ring;
pub mod shell;

pub use ring::FourierRingIterator;
pub use shell::SectionedFourierShellIterator;

/// Interface of a 3D shell-and-section geometry provider.
///
/// Implementations must yield disjoint index sets so a single traversal
/// can populate the full (angle, shell) accumulation matrix.
pub trait FourierShellProvider {
    /// The ordered (radii, angles) sequences. Radii are shell lower edges
    /// in spectrum samples; angles are section lower edges in degrees.
    fn steps(&self) -> (&[f64], &[f64]);

    /// Nyquist radius in spectrum samples: floor(edge length / 2).
    fn nyquist(&self) -> usize;

    /// Iterate all (index set, shell index, rotation index) bins.
    fn bins<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a [usize], usize, usize)> + 'a>;
}
