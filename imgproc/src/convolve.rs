use hog_core::FloatMap;
use image::GrayImage;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct Kernel {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Kernel {
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn from_slice(data: &[f32], width: usize, height: usize) -> Self {
        Self::new(data.to_vec(), width, height)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn center(&self) -> (isize, isize) {
        ((self.width / 2) as isize, (self.height / 2) as isize)
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode {
    Constant(f32),
    Replicate,
    Reflect101,
}

fn map_coord(coord: isize, len: usize, mode: BorderMode) -> Option<usize> {
    let n = len as isize;
    if n <= 0 {
        return None;
    }

    match mode {
        BorderMode::Constant(_) => {
            if coord < 0 || coord >= n {
                None
            } else {
                Some(coord as usize)
            }
        }
        BorderMode::Replicate => Some(coord.clamp(0, n - 1) as usize),
        BorderMode::Reflect101 => {
            if n == 1 {
                return Some(0);
            }
            let period = 2 * n - 2;
            let mut c = coord % period;
            if c < 0 {
                c += period;
            }
            if c >= n {
                c = period - c;
            }
            Some(c as usize)
        }
    }
}

/// 2-D correlation of a gray image with an f32 kernel.
///
/// The output is a `FloatMap` rather than an image: derivative kernels
/// produce signed values that must not be clamped to `u8`.
pub fn correlate(image: &GrayImage, kernel: &Kernel, border: BorderMode) -> FloatMap {
    let mut output = FloatMap::new(image.width() as usize, image.height() as usize);
    correlate_into(image, &mut output, kernel, border);
    output
}

pub fn correlate_into(
    image: &GrayImage,
    output: &mut FloatMap,
    kernel: &Kernel,
    border: BorderMode,
) {
    let (kx_center, ky_center) = kernel.center();
    let width = image.width() as usize;
    let height = image.height() as usize;
    if output.width() != width || output.height() != height {
        *output = FloatMap::new(width, height);
    }
    let input_data = image.as_raw();

    output.par_rows_mut().enumerate().for_each(|(y, row)| {
        for x in 0..width {
            let mut sum = 0.0f32;

            for ky in 0..kernel.height {
                for kx in 0..kernel.width {
                    let src_x = x as isize + kx as isize - kx_center;
                    let src_y = y as isize + ky as isize - ky_center;

                    let pixel_val = match (
                        map_coord(src_x, width, border),
                        map_coord(src_y, height, border),
                    ) {
                        (Some(ix), Some(iy)) => input_data[iy * width + ix] as f32,
                        _ => match border {
                            BorderMode::Constant(v) => v,
                            _ => 0.0,
                        },
                    };

                    sum += pixel_val * kernel.get(kx, ky);
                }
            }

            row[x] = sum;
        }
    });
}
