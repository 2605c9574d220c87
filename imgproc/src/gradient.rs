//! Per-pixel gradient magnitude and orientation.
//!
//! Derivatives come from plain 1-D central-difference kernels, matching the
//! behavior of a 2-D correlation with mirrored (Reflect101) borders.

use hog_core::FloatMap;
use image::GrayImage;
use rayon::prelude::*;

use crate::convolve::{correlate, BorderMode, Kernel};
use crate::{validate_image_size, Result};

/// Horizontal (1x3) and vertical (3x1) `[-1, 0, 1]` derivative kernels.
pub fn derivative_kernels() -> (Kernel, Kernel) {
    let kx = Kernel::from_slice(&[-1.0, 0.0, 1.0], 3, 1);
    let ky = Kernel::from_slice(&[-1.0, 0.0, 1.0], 1, 3);
    (kx, ky)
}

/// Gradient maps for one image: per-pixel magnitude and orientation.
///
/// Orientation is in degrees in `[0, 360)`, measured from the positive x
/// axis with y pointing down.
#[derive(Debug, Clone)]
pub struct GradientMaps {
    pub magnitude: FloatMap,
    pub orientation: FloatMap,
}

impl GradientMaps {
    pub fn width(&self) -> usize {
        self.magnitude.width()
    }

    pub fn height(&self) -> usize {
        self.magnitude.height()
    }
}

/// Compute gradient magnitude and orientation for a gray image.
///
/// Pure: the result depends only on the image and the derivative kernels.
pub fn magnitude_orientation(image: &GrayImage) -> Result<GradientMaps> {
    validate_image_size(image.width(), image.height())?;

    let (kernel_x, kernel_y) = derivative_kernels();
    let dx = correlate(image, &kernel_x, BorderMode::Reflect101);
    let dy = correlate(image, &kernel_y, BorderMode::Reflect101);

    let width = dx.width();
    let height = dx.height();
    let mut magnitude = FloatMap::new(width, height);
    let mut orientation = FloatMap::new(width, height);

    magnitude
        .par_rows_mut()
        .zip(orientation.par_rows_mut())
        .enumerate()
        .for_each(|(y, (mag_row, ori_row))| {
            let dx_row = dx.row(y);
            let dy_row = dy.row(y);
            for x in 0..width {
                let gx = dx_row[x];
                let gy = dy_row[x];
                mag_row[x] = (gx * gx + gy * gy).sqrt();

                let mut deg = gy.atan2(gx).to_degrees();
                if deg < 0.0 {
                    deg += 360.0;
                }
                ori_row[x] = deg;
            }
        });

    Ok(GradientMaps {
        magnitude,
        orientation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn vertical_edge(width: u32, height: u32, split: u32) -> GrayImage {
        let mut img = GrayImage::new(width, height);
        for y in 0..height {
            for x in split..width {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        img
    }

    #[test]
    fn uniform_image_has_zero_magnitude() {
        let img = GrayImage::from_pixel(16, 16, Luma([77]));
        let maps = magnitude_orientation(&img).unwrap();
        assert!(maps.magnitude.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn vertical_edge_points_along_x() {
        let img = vertical_edge(16, 8, 8);
        let maps = magnitude_orientation(&img).unwrap();

        // one pixel left of the step: Dx = 255 - 0, Dy = 0
        assert_eq!(maps.magnitude.get(7, 4), 255.0);
        assert_eq!(maps.orientation.get(7, 4), 0.0);
    }

    #[test]
    fn horizontal_edge_points_along_y() {
        let mut img = GrayImage::new(8, 16);
        for y in 8..16 {
            for x in 0..8 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let maps = magnitude_orientation(&img).unwrap();

        // y axis points down, so a dark-to-bright step downward gives 90 deg
        assert_eq!(maps.magnitude.get(4, 7), 255.0);
        assert_eq!(maps.orientation.get(4, 7), 90.0);
    }

    #[test]
    fn mirrored_border_zeroes_edge_derivatives() {
        let img = vertical_edge(16, 8, 8);
        let maps = magnitude_orientation(&img).unwrap();

        // Reflect101: Dx at x = 0 is img(1) - img(1)
        assert_eq!(maps.magnitude.get(0, 3), 0.0);
        assert_eq!(maps.magnitude.get(15, 3), 0.0);
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = GrayImage::new(0, 0);
        assert!(magnitude_orientation(&img).is_err());
    }

    #[test]
    fn orientation_stays_in_range() {
        let mut img = GrayImage::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                let v = ((x * 7 + y * 13) % 256) as u8;
                img.put_pixel(x, y, Luma([v]));
            }
        }
        let maps = magnitude_orientation(&img).unwrap();
        assert!(maps
            .orientation
            .as_slice()
            .iter()
            .all(|&deg| (0.0..360.0).contains(&deg)));
    }
}
