use crate::norm::BlockNorm;
use crate::{HogError, Result};

/// Angular range of gradient orientations.
///
/// `Signed` keeps the full circle; `Unsigned` folds opposite directions
/// together, which is the usual choice for HOG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientRange {
    /// Orientations in `[0, 360)` degrees.
    Signed,
    /// Orientations in `[0, 180)` degrees.
    Unsigned,
}

impl GradientRange {
    pub fn degrees(self) -> f32 {
        match self {
            GradientRange::Signed => 360.0,
            GradientRange::Unsigned => 180.0,
        }
    }
}

/// HOG extraction parameters.
///
/// `block_size`, `cell_size` and `stride` are in pixels. Constraints are
/// checked by [`HogConfig::validate`], which `Hog::new` runs for you:
/// block at least 2, cell at least 1, bins at least 2, block and stride
/// both multiples of the cell size.
#[derive(Debug, Clone)]
pub struct HogConfig {
    pub block_size: usize,
    pub cell_size: usize,
    pub stride: usize,
    pub bins: usize,
    pub range: GradientRange,
    pub norm: BlockNorm,
}

impl HogConfig {
    /// Config with the conventional defaults: cells of half a block,
    /// stride of half a block, 9 bins, unsigned gradients, L2-Hys.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            cell_size: block_size / 2,
            stride: block_size / 2,
            bins: 9,
            range: GradientRange::Unsigned,
            norm: BlockNorm::L2Hys,
        }
    }

    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_range(mut self, range: GradientRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_norm(mut self, norm: BlockNorm) -> Self {
        self.norm = norm;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size < 2 {
            return Err(HogError::ConfigInvalid(
                "block size must be at least 2 pixels".into(),
            ));
        }
        if self.cell_size < 1 {
            return Err(HogError::ConfigInvalid(
                "cell size must be at least 1 pixel".into(),
            ));
        }
        if self.stride < 1 {
            return Err(HogError::ConfigInvalid(
                "stride must be at least 1 pixel".into(),
            ));
        }
        if self.bins < 2 {
            return Err(HogError::ConfigInvalid(
                "bin count must be at least 2".into(),
            ));
        }
        if self.block_size % self.cell_size != 0 {
            return Err(HogError::ConfigInvalid(format!(
                "block size {} must be a multiple of cell size {}",
                self.block_size, self.cell_size
            )));
        }
        if self.stride % self.cell_size != 0 {
            return Err(HogError::ConfigInvalid(format!(
                "stride {} must be a multiple of cell size {}",
                self.stride, self.cell_size
            )));
        }
        Ok(())
    }

    /// Cells per block side.
    pub fn cells_per_block(&self) -> usize {
        self.block_size / self.cell_size
    }

    /// Block step in cell units.
    pub fn stride_cells(&self) -> usize {
        self.stride / self.cell_size
    }

    /// Width of one orientation bin in degrees.
    pub fn bin_width(&self) -> f32 {
        self.range.degrees() / self.bins as f32
    }

    /// Length of one concatenated block histogram.
    pub fn block_len(&self) -> usize {
        let cpb = self.cells_per_block();
        self.bins * cpb * cpb
    }
}

impl Default for HogConfig {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_derive_from_block_size() {
        let config = HogConfig::new(32);
        assert_eq!(config.cell_size, 16);
        assert_eq!(config.stride, 16);
        assert_eq!(config.bins, 9);
        assert_eq!(config.range, GradientRange::Unsigned);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn derived_quantities() {
        let config = HogConfig::new(32)
            .with_cell_size(8)
            .with_stride(16)
            .with_bins(9);
        assert_eq!(config.cells_per_block(), 4);
        assert_eq!(config.stride_cells(), 2);
        assert_eq!(config.block_len(), 9 * 16);
        assert_eq!(config.bin_width(), 20.0);
    }

    #[test]
    fn signed_range_widens_bins() {
        let config = HogConfig::new(16).with_range(GradientRange::Signed);
        assert_eq!(config.bin_width(), 40.0);
    }

    #[test]
    fn rejects_indivisible_sizes() {
        assert!(HogConfig::new(32).with_cell_size(12).validate().is_err());
        assert!(HogConfig::new(32).with_stride(10).validate().is_err());
        assert!(HogConfig::new(1).validate().is_err());
        assert!(HogConfig::new(32).with_bins(1).validate().is_err());
        assert!(HogConfig::new(32).with_stride(0).validate().is_err());
    }
}
