//! Sectioned shell partition of a 3D frequency spectrum

use crate::fft::idx3d;
use crate::iterators::FourierShellProvider;

/// Partitions an n x n x n centered spectrum into shells crossed with
/// angular sections.
///
/// Shell `s` selects samples whose distance from the spectrum center
/// falls in `[s * d_bin, (s + 1) * d_bin)`. Section `a` selects samples
/// whose polar angle against the leading axis falls in
/// `[a * d_angle, (a + 1) * d_angle)` degrees; the sections cover
/// [0, 180) and the antipodal axis samples at exactly 180 degrees join
/// the last section. Every sample lands in at most one (shell, section)
/// bin, so one traversal visits each covered sample exactly once.
pub struct SectionedFourierShellIterator {
    bins: Vec<Vec<usize>>,
    radii: Vec<f64>,
    angles: Vec<f64>,
    nyquist: usize,
}

impl SectionedFourierShellIterator {
    /// Build the sectioned shell partition for an `n x n x n` canvas.
    ///
    /// # Arguments
    /// * `n` - Canvas edge length (the canvas must be cubic)
    /// * `d_bin` - Shell thickness in spectrum samples, must be positive
    /// * `d_angle` - Section aperture in degrees, must be positive
    pub fn new(n: usize, d_bin: f64, d_angle: f64) -> Self {
        assert!(d_bin > 0.0, "shell thickness must be positive");
        assert!(d_angle > 0.0, "section aperture must be positive");

        let nyquist = n / 2;
        let n_radii = (nyquist as f64 / d_bin).ceil() as usize;
        let n_angles = (180.0 / d_angle).ceil() as usize;

        let radii: Vec<f64> = (0..n_radii).map(|s| s as f64 * d_bin).collect();
        let angles: Vec<f64> = (0..n_angles).map(|a| a as f64 * d_angle).collect();

        let mut bins = vec![Vec::new(); n_angles * n_radii];
        let center = (n / 2) as isize;

        for k in 0..n {
            let z = (k as isize - center) as f64;
            for j in 0..n {
                let y = (j as isize - center) as f64;
                for i in 0..n {
                    let x = (i as isize - center) as f64;

                    let r = (x * x + y * y + z * z).sqrt();
                    let shell = (r / d_bin).floor() as usize;
                    if shell >= n_radii {
                        continue;
                    }

                    // Polar angle against the leading axis, in [0, 180]
                    let phi = (y * y + z * z).sqrt().atan2(x).to_degrees();
                    let section = ((phi / d_angle).floor() as usize).min(n_angles - 1);

                    bins[section * n_radii + shell].push(idx3d(i, j, k, n, n));
                }
            }
        }

        Self { bins, radii, angles, nyquist }
    }
}

impl FourierShellProvider for SectionedFourierShellIterator {
    fn steps(&self) -> (&[f64], &[f64]) {
        (&self.radii, &self.angles)
    }

    fn nyquist(&self) -> usize {
        self.nyquist
    }

    fn bins<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a [usize], usize, usize)> + 'a> {
        let n_radii = self.radii.len();
        Box::new(self.bins.iter().enumerate().map(move |(flat, set)| {
            (set.as_slice(), flat % n_radii, flat / n_radii)
        }))
    }
}
