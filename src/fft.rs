//! FFT operations for 2D and 3D correlation analysis using rustfft
//!
//! Provides forward transforms and fftshift compatible with NumPy's FFT
//! conventions. Arrays use Fortran (column-major) order indexing.

use num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

/// Index into a 2D array stored in Fortran order (column-major)
/// index = x + y*nx
#[inline(always)]
pub fn idx2d(i: usize, j: usize, nx: usize) -> usize {
    i + j * nx
}

/// Index into a 3D array stored in Fortran order (column-major)
/// index = x + y*nx + z*nx*ny
#[inline(always)]
pub fn idx3d(i: usize, j: usize, k: usize, nx: usize, ny: usize) -> usize {
    i + j * nx + k * nx * ny
}

/// In-place forward 2D FFT
///
/// # Arguments
/// * `data` - Complex array (nx * ny), modified in-place
/// * `nx`, `ny` - Array dimensions
pub fn fft2d(data: &mut [Complex64], nx: usize, ny: usize) {
    let mut planner = FftPlanner::new();
    let fft_x = planner.plan_fft(nx, FftDirection::Forward);
    let fft_y = planner.plan_fft(ny, FftDirection::Forward);

    let mut scratch_x = vec![Complex64::new(0.0, 0.0); fft_x.get_inplace_scratch_len()];
    let mut scratch_y = vec![Complex64::new(0.0, 0.0); fft_y.get_inplace_scratch_len()];
    let mut buffer_y = vec![Complex64::new(0.0, 0.0); ny];

    // Transform along x-axis (contiguous rows)
    for j in 0..ny {
        let start = idx2d(0, j, nx);
        fft_x.process_with_scratch(&mut data[start..start + nx], &mut scratch_x);
    }

    // Transform along y-axis
    for i in 0..nx {
        for j in 0..ny {
            buffer_y[j] = data[idx2d(i, j, nx)];
        }
        fft_y.process_with_scratch(&mut buffer_y, &mut scratch_y);
        for j in 0..ny {
            data[idx2d(i, j, nx)] = buffer_y[j];
        }
    }
}

/// In-place forward 3D FFT
///
/// # Arguments
/// * `data` - Complex array (nx * ny * nz), modified in-place
/// * `nx`, `ny`, `nz` - Array dimensions
pub fn fft3d(data: &mut [Complex64], nx: usize, ny: usize, nz: usize) {
    let mut planner = FftPlanner::new();
    let fft_x = planner.plan_fft(nx, FftDirection::Forward);
    let fft_y = planner.plan_fft(ny, FftDirection::Forward);
    let fft_z = planner.plan_fft(nz, FftDirection::Forward);

    let mut scratch_x = vec![Complex64::new(0.0, 0.0); fft_x.get_inplace_scratch_len()];
    let mut scratch_y = vec![Complex64::new(0.0, 0.0); fft_y.get_inplace_scratch_len()];
    let mut scratch_z = vec![Complex64::new(0.0, 0.0); fft_z.get_inplace_scratch_len()];
    let mut buffer_y = vec![Complex64::new(0.0, 0.0); ny];
    let mut buffer_z = vec![Complex64::new(0.0, 0.0); nz];

    // Transform along x-axis
    for k in 0..nz {
        for j in 0..ny {
            let start = idx3d(0, j, k, nx, ny);
            fft_x.process_with_scratch(&mut data[start..start + nx], &mut scratch_x);
        }
    }

    // Transform along y-axis
    for k in 0..nz {
        for i in 0..nx {
            for j in 0..ny {
                buffer_y[j] = data[idx3d(i, j, k, nx, ny)];
            }
            fft_y.process_with_scratch(&mut buffer_y, &mut scratch_y);
            for j in 0..ny {
                data[idx3d(i, j, k, nx, ny)] = buffer_y[j];
            }
        }
    }

    // Transform along z-axis
    for j in 0..ny {
        for i in 0..nx {
            for k in 0..nz {
                buffer_z[k] = data[idx3d(i, j, k, nx, ny)];
            }
            fft_z.process_with_scratch(&mut buffer_z, &mut scratch_z);
            for k in 0..nz {
                data[idx3d(i, j, k, nx, ny)] = buffer_z[k];
            }
        }
    }
}

/// 2D FFT of real data (real-to-complex)
///
/// Returns the full complex spectrum, shape (nx, ny).
pub fn fft2d_real(data: &[f64], nx: usize, ny: usize) -> Vec<Complex64> {
    let mut complex_data: Vec<Complex64> = data.iter()
        .map(|&x| Complex64::new(x, 0.0))
        .collect();
    fft2d(&mut complex_data, nx, ny);
    complex_data
}

/// 3D FFT of real data (real-to-complex)
///
/// Returns the full complex spectrum, shape (nx, ny, nz).
pub fn fft3d_real(data: &[f64], nx: usize, ny: usize, nz: usize) -> Vec<Complex64> {
    let mut complex_data: Vec<Complex64> = data.iter()
        .map(|&x| Complex64::new(x, 0.0))
        .collect();
    fft3d(&mut complex_data, nx, ny, nz);
    complex_data
}

/// Shift the zero-frequency sample to the center of a 2D spectrum
/// Matches numpy.fft.fftshift: DC moves to index floor(n/2) on each axis
pub fn fftshift2d(data: &[Complex64], nx: usize, ny: usize) -> Vec<Complex64> {
    let mut shifted = vec![Complex64::new(0.0, 0.0); data.len()];
    for j in 0..ny {
        let sj = (j + ny - ny / 2) % ny;
        for i in 0..nx {
            let si = (i + nx - nx / 2) % nx;
            shifted[idx2d(i, j, nx)] = data[idx2d(si, sj, nx)];
        }
    }
    shifted
}

/// Shift the zero-frequency sample to the center of a 3D spectrum
/// Matches numpy.fft.fftshift: DC moves to index floor(n/2) on each axis
pub fn fftshift3d(data: &[Complex64], nx: usize, ny: usize, nz: usize) -> Vec<Complex64> {
    let mut shifted = vec![Complex64::new(0.0, 0.0); data.len()];
    for k in 0..nz {
        let sk = (k + nz - nz / 2) % nz;
        for j in 0..ny {
            let sj = (j + ny - ny / 2) % ny;
            for i in 0..nx {
                let si = (i + nx - nx / 2) % nx;
                shifted[idx3d(i, j, k, nx, ny)] = data[idx3d(si, sj, sk, nx, ny)];
            }
        }
    }
    shifted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft2d_dc_term() {
        // DC term of the spectrum equals the sum of all samples
        let nx = 4;
        let ny = 4;
        let data: Vec<f64> = (0..nx * ny).map(|i| i as f64).collect();
        let sum: f64 = data.iter().sum();

        let spectrum = fft2d_real(&data, nx, ny);
        assert!(
            (spectrum[0].re - sum).abs() < 1e-9,
            "DC term should equal sample sum: expected {}, got {}",
            sum, spectrum[0].re
        );
        assert!(spectrum[0].im.abs() < 1e-9);
    }

    #[test]
    fn test_fft2d_constant_image() {
        // A constant image has all spectral power in the DC term
        let nx = 8;
        let ny = 8;
        let data = vec![3.0; nx * ny];

        let spectrum = fft2d_real(&data, nx, ny);
        assert!((spectrum[0].re - 3.0 * (nx * ny) as f64).abs() < 1e-9);
        for (idx, val) in spectrum.iter().enumerate().skip(1) {
            assert!(
                val.norm() < 1e-9,
                "Non-DC term {} should be zero, got {}",
                idx, val.norm()
            );
        }
    }

    #[test]
    fn test_fft3d_dc_term() {
        let n = 4;
        let data: Vec<f64> = (0..n * n * n).map(|i| (i % 7) as f64).collect();
        let sum: f64 = data.iter().sum();

        let spectrum = fft3d_real(&data, n, n, n);
        assert!((spectrum[0].re - sum).abs() < 1e-9);
    }

    #[test]
    fn test_fftshift2d_even() {
        // 4x4: DC at (0,0) moves to (2,2)
        let nx = 4;
        let ny = 4;
        let mut data = vec![Complex64::new(0.0, 0.0); nx * ny];
        data[0] = Complex64::new(1.0, 0.0);

        let shifted = fftshift2d(&data, nx, ny);
        assert!((shifted[idx2d(2, 2, nx)].re - 1.0).abs() < 1e-12);
        assert!(shifted[idx2d(0, 0, nx)].norm() < 1e-12);
    }

    #[test]
    fn test_fftshift2d_odd() {
        // 5x5: DC at (0,0) moves to (2,2)
        let nx = 5;
        let ny = 5;
        let mut data = vec![Complex64::new(0.0, 0.0); nx * ny];
        data[0] = Complex64::new(1.0, 0.0);

        let shifted = fftshift2d(&data, nx, ny);
        assert!((shifted[idx2d(2, 2, nx)].re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fftshift3d_center() {
        let n = 4;
        let mut data = vec![Complex64::new(0.0, 0.0); n * n * n];
        data[0] = Complex64::new(1.0, 0.0);

        let shifted = fftshift3d(&data, n, n, n);
        assert!((shifted[idx3d(2, 2, 2, n, n)].re - 1.0).abs() < 1e-12);
    }
}
