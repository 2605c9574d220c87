use rayon::prelude::*;
use rayon::slice::ChunksMut;

/// Owned 2-D buffer of `f32` values in row-major order.
///
/// Used for the per-pixel magnitude and orientation maps produced by the
/// gradient pass, where `u8` image storage would lose range and sign.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatMap {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl FloatMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    pub fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Parallel iterator over mutable rows.
    pub fn par_rows_mut(&mut self) -> ChunksMut<'_, f32> {
        self.data.par_chunks_mut(self.width)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().cloned().fold(0.0, f32::max)
    }
}
