//! Concentric ring partition of a 2D frequency spectrum

use crate::fft::idx2d;

/// Partitions an n x n centered spectrum into concentric rings.
///
/// Ring `b` selects all samples whose distance from the spectrum center
/// falls in `[b * d_bin, (b + 1) * d_bin)`. The center is at index
/// `floor(n / 2)` on both axes, which is where fftshift places the
/// zero-frequency sample. Rings are disjoint; corner samples beyond the
/// outermost ring are not covered.
pub struct FourierRingIterator {
    bins: Vec<Vec<usize>>,
    nyquist: usize,
}

impl FourierRingIterator {
    /// Build the ring partition for an `n x n` canvas.
    ///
    /// # Arguments
    /// * `n` - Canvas edge length (the canvas must be square)
    /// * `d_bin` - Ring thickness in spectrum samples, must be positive
    pub fn new(n: usize, d_bin: f64) -> Self {
        assert!(d_bin > 0.0, "ring thickness must be positive");

        let nyquist = n / 2;
        let n_bins = (nyquist as f64 / d_bin).ceil() as usize;
        let mut bins = vec![Vec::new(); n_bins];

        let center = (n / 2) as isize;
        for j in 0..n {
            let y = (j as isize - center) as f64;
            for i in 0..n {
                let x = (i as isize - center) as f64;
                let r = (x * x + y * y).sqrt();
                let bin = (r / d_bin).floor() as usize;
                if bin < n_bins {
                    bins[bin].push(idx2d(i, j, n));
                }
            }
        }

        Self { bins, nyquist }
    }

    /// Nyquist radius in spectrum samples: floor(n / 2).
    pub fn nyquist(&self) -> usize {
        self.nyquist
    }

    /// Number of rings.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Iterate all (index set, ring index) pairs.
    pub fn bins(&self) -> impl Iterator<Item = (&[usize], usize)> {
        self.bins.iter().enumerate().map(|(idx, set)| (set.as_slice(), idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_count_matches_radius_sequence() {
        // radii = 0, 1, 2, 3 for n = 8, d_bin = 1
        let it = FourierRingIterator::new(8, 1.0);
        assert_eq!(it.nyquist(), 4);
        assert_eq!(it.len(), 4);

        // d_bin that does not divide the Nyquist radius rounds up
        let it = FourierRingIterator::new(8, 1.5);
        assert_eq!(it.len(), 3);
    }

    #[test]
    fn test_innermost_ring_is_dc_sample() {
        let n = 8;
        let it = FourierRingIterator::new(n, 1.0);
        let (indices, idx) = it.bins().next().unwrap();
        assert_eq!(idx, 0);
        // Only the center sample has radius < 1
        assert_eq!(indices, &[idx2d(4, 4, n)]);
    }

    #[test]
    fn test_rings_are_disjoint_and_radius_bounded() {
        let n = 16;
        let d_bin = 2.0;
        let it = FourierRingIterator::new(n, d_bin);
        let center = (n / 2) as isize;

        let mut seen = std::collections::HashSet::new();
        for (indices, bin) in it.bins() {
            for &idx in indices {
                assert!(seen.insert(idx), "index {} appears in two rings", idx);

                let i = (idx % n) as isize;
                let j = (idx / n) as isize;
                let r = (((i - center).pow(2) + (j - center).pow(2)) as f64).sqrt();
                assert!(
                    r >= bin as f64 * d_bin && r < (bin + 1) as f64 * d_bin,
                    "radius {} outside ring {} band",
                    r, bin
                );
            }
        }
    }

    #[test]
    fn test_odd_canvas_center() {
        // Odd n: the center is at floor(n / 2) = 3
        let n = 7;
        let it = FourierRingIterator::new(n, 1.0);
        let (indices, _) = it.bins().next().unwrap();
        assert_eq!(indices, &[idx2d(3, 3, n)]);
    }
}
