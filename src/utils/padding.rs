//! Zero-padding to square/cubic canvases
//!
//! The correlation geometry is measured from the spectrum center, so the
//! original data is centered on the padded canvas. Spacing metadata is
//! preserved.

use crate::fft::{idx2d, idx3d};
use crate::image::Image;

/// Pad a 2D image with zeros to a square canvas
///
/// The original data is centered; the edge length is the larger of the
/// two extents. An already-square image comes back as an equal copy.
pub fn zero_pad_to_square(image: &Image) -> Image {
    let nx = image.shape()[0];
    let ny = image.shape()[1];
    let n = nx.max(ny);

    let mut padded = vec![0.0; n * n];
    let off_x = (n - nx) / 2;
    let off_y = (n - ny) / 2;

    let data = image.data();
    for j in 0..ny {
        for i in 0..nx {
            padded[idx2d(i + off_x, j + off_y, n)] = data[idx2d(i, j, nx)];
        }
    }

    Image::from_parts(padded, vec![n, n], image.spacing().to_vec())
}

/// Pad a 3D image with zeros to a cubic canvas
///
/// The original data is centered; the edge length is the largest of the
/// three extents. An already-cubic image comes back as an equal copy.
pub fn zero_pad_to_cube(image: &Image) -> Image {
    let nx = image.shape()[0];
    let ny = image.shape()[1];
    let nz = image.shape()[2];
    let n = nx.max(ny).max(nz);

    let mut padded = vec![0.0; n * n * n];
    let off_x = (n - nx) / 2;
    let off_y = (n - ny) / 2;
    let off_z = (n - nz) / 2;

    let data = image.data();
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                padded[idx3d(i + off_x, j + off_y, k + off_z, n, n)] =
                    data[idx3d(i, j, k, nx, ny)];
            }
        }
    }

    Image::from_parts(padded, vec![n, n, n], image.spacing().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_square_centers_data() {
        let nx = 2;
        let ny = 4;
        let data: Vec<f64> = (1..=(nx * ny)).map(|i| i as f64).collect();
        let image = Image::new(data.clone(), vec![nx, ny], vec![0.1, 0.1]).unwrap();

        let padded = zero_pad_to_square(&image);
        assert_eq!(padded.shape(), &[4, 4]);
        assert_eq!(padded.spacing(), &[0.1, 0.1]);

        // Original values survive at the centered offset (off_x = 1)
        for j in 0..ny {
            for i in 0..nx {
                assert_eq!(
                    padded.data()[idx2d(i + 1, j, 4)],
                    data[idx2d(i, j, nx)],
                    "value moved incorrectly at ({}, {})",
                    i, j
                );
            }
        }

        // Padding is zero-filled
        let sum_orig: f64 = data.iter().sum();
        let sum_padded: f64 = padded.data().iter().sum();
        assert!((sum_orig - sum_padded).abs() < 1e-12);
    }

    #[test]
    fn test_pad_square_input_is_copy() {
        let image = Image::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2], vec![1.0, 1.0]).unwrap();
        let padded = zero_pad_to_square(&image);
        assert_eq!(padded, image);
    }

    #[test]
    fn test_pad_to_cube() {
        let image = Image::new(vec![1.0; 2 * 3 * 4], vec![2, 3, 4], vec![1.0, 1.0, 1.0]).unwrap();
        let padded = zero_pad_to_cube(&image);
        assert_eq!(padded.shape(), &[4, 4, 4]);

        let sum: f64 = padded.data().iter().sum();
        assert!((sum - 24.0).abs() < 1e-12, "padding must not change total mass");
    }
}
