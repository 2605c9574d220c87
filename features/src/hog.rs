//! Histogram of Oriented Gradients (HOG)
//!
//! Dense gradient descriptor for classical object-detection pipelines,
//! after Dalal & Triggs (CVPR 2005).
//!
//! An extraction session is driven in two steps: [`Hog::process`] computes
//! the gradient maps and per-cell orientation histograms for one image, and
//! [`Hog::retrieve`] assembles normalized block descriptors for any window
//! of that image. Cell histograms are computed once per image, so sliding
//! many detection windows over the same frame only pays for block assembly.

use hog_core::{FloatMap, Rect};
use hog_imgproc::gradient::{magnitude_orientation, GradientMaps};
use image::GrayImage;
use rayon::prelude::*;

use crate::config::{GradientRange, HogConfig};
use crate::{HogError, Result};

/// Per-cell orientation histograms for one processed image.
///
/// Stored flat in row-major cell order, `bins` values per cell.
#[derive(Debug, Clone)]
pub struct CellGrid {
    hists: Vec<f32>,
    cells_x: usize,
    cells_y: usize,
    bins: usize,
}

impl CellGrid {
    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Histogram of the cell at grid position `(cx, cy)`.
    pub fn cell(&self, cx: usize, cy: usize) -> &[f32] {
        let start = (cy * self.cells_x + cx) * self.bins;
        &self.hists[start..start + self.bins]
    }
}

/// HOG extraction session.
///
/// Owns the gradient maps and cell-histogram grid of the most recently
/// processed image. Not synchronized: `process` mutates the session, so
/// concurrent use needs external locking.
#[derive(Debug)]
pub struct Hog {
    config: HogConfig,
    maps: Option<GradientMaps>,
    grid: Option<CellGrid>,
}

impl Hog {
    pub fn new(config: HogConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            maps: None,
            grid: None,
        })
    }

    pub fn config(&self) -> &HogConfig {
        &self.config
    }

    pub fn is_processed(&self) -> bool {
        self.grid.is_some()
    }

    /// Magnitude map of the last processed image.
    pub fn magnitudes(&self) -> Option<&FloatMap> {
        self.maps.as_ref().map(|m| &m.magnitude)
    }

    /// Orientation map of the last processed image, degrees in `[0, 360)`.
    pub fn orientations(&self) -> Option<&FloatMap> {
        self.maps.as_ref().map(|m| &m.orientation)
    }

    /// Cell-histogram grid of the last processed image.
    pub fn cell_grid(&self) -> Option<&CellGrid> {
        self.grid.as_ref()
    }

    /// Compute gradient maps and cell histograms for `image`, replacing any
    /// previous session state.
    ///
    /// Validation happens before the old state is touched: a failed call
    /// leaves the previous processed image fully retrievable.
    pub fn process(&mut self, image: &GrayImage) -> Result<()> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        if width == 0 || height == 0 {
            return Err(HogError::InvalidInput("image has no data".into()));
        }
        if width < self.config.block_size || height < self.config.block_size {
            return Err(HogError::InvalidInput(format!(
                "image {}x{} is smaller than the {} px block",
                width, height, self.config.block_size
            )));
        }

        let maps =
            magnitude_orientation(image).map_err(|e| HogError::InvalidInput(e.to_string()))?;
        let grid = build_cell_grid(&maps, &self.config);
        self.maps = Some(maps);
        self.grid = Some(grid);
        Ok(())
    }

    /// Descriptor length for a window, from the closed form
    /// `bins * cells_per_block^2 * n_blocks_y * n_blocks_x`.
    ///
    /// Pure configuration arithmetic; needs no processed image. Returns 0
    /// when no block fits in the window.
    pub fn descriptor_len(&self, window: &Rect) -> usize {
        let cpb = self.config.cells_per_block();
        let w_cells = window.width / self.config.cell_size;
        let h_cells = window.height / self.config.cell_size;
        if w_cells < cpb || h_cells < cpb {
            return 0;
        }
        let step = self.config.stride_cells();
        let n_blocks_x = (w_cells - cpb) / step + 1;
        let n_blocks_y = (h_cells - cpb) / step + 1;
        self.config.block_len() * n_blocks_x * n_blocks_y
    }

    /// Assemble the descriptor for a pixel-space `window` of the processed
    /// image.
    ///
    /// A block window slides over the cells covered by `window` at the
    /// configured stride, y-major; each block concatenates its cell
    /// histograms in row-major order and is normalized in place before
    /// being appended. Read-only: identical calls return identical vectors.
    pub fn retrieve(&self, window: &Rect) -> Result<Vec<f32>> {
        let grid = self.grid.as_ref().ok_or(HogError::NotProcessed)?;
        let maps = self.maps.as_ref().ok_or(HogError::NotProcessed)?;
        let config = &self.config;

        if window.width < config.block_size || window.height < config.block_size {
            return Err(HogError::WindowTooSmall(format!(
                "{}x{} window is smaller than the {} px block",
                window.width, window.height, config.block_size
            )));
        }
        if window.right() > maps.width() || window.bottom() > maps.height() {
            return Err(HogError::WindowOutOfBounds(format!(
                "window {}x{}+{}+{} exceeds the {}x{} gradient map",
                window.width,
                window.height,
                window.x,
                window.y,
                maps.width(),
                maps.height()
            )));
        }

        // window in cell-grid coordinates
        let x0 = window.x / config.cell_size;
        let y0 = window.y / config.cell_size;
        let w_cells = window.width / config.cell_size;
        let h_cells = window.height / config.cell_size;

        let cpb = config.cells_per_block();
        let step = config.stride_cells();
        let bins = config.bins;
        let block_len = config.block_len();

        // last valid block origin is (x0 + w_cells - cpb, y0 + h_cells - cpb),
        // inclusive
        let n_blocks_x = (w_cells - cpb) / step + 1;
        let n_blocks_y = (h_cells - cpb) / step + 1;

        let mut descriptor = vec![0.0f32; n_blocks_x * n_blocks_y * block_len];
        descriptor
            .par_chunks_mut(block_len)
            .enumerate()
            .for_each(|(idx, block)| {
                let bx = x0 + (idx % n_blocks_x) * step;
                let by = y0 + (idx / n_blocks_x) * step;

                let mut offset = 0;
                for cy in by..by + cpb {
                    for cx in bx..bx + cpb {
                        block[offset..offset + bins].copy_from_slice(grid.cell(cx, cy));
                        offset += bins;
                    }
                }
                config.norm.apply(block);
            });

        Ok(descriptor)
    }
}

/// Accumulate the per-cell orientation histograms.
///
/// The grid covers `floor(map / cell)` cells per axis; remainder pixels at
/// the bottom/right edges belong to no cell. Each pixel votes its full
/// magnitude into the single bin holding its orientation.
fn build_cell_grid(maps: &GradientMaps, config: &HogConfig) -> CellGrid {
    let cell = config.cell_size;
    let cells_x = maps.width() / cell;
    let cells_y = maps.height() / cell;
    let bins = config.bins;
    let bin_width = config.bin_width();
    let unsigned = config.range == GradientRange::Unsigned;

    let mut hists = vec![0.0f32; cells_x * cells_y * bins];
    hists
        .par_chunks_mut(bins)
        .enumerate()
        .for_each(|(idx, hist)| {
            let cx = idx % cells_x;
            let cy = idx / cells_x;
            let x_start = cx * cell;
            let y_start = cy * cell;

            for dy in 0..cell {
                let y = y_start + dy;
                let mag_row = maps.magnitude.row(y);
                let ori_row = maps.orientation.row(y);
                for dx in 0..cell {
                    let x = x_start + dx;
                    let mut ori = ori_row[x];
                    if unsigned && ori >= 180.0 {
                        ori -= 180.0;
                    }
                    // clamp guards float round-off at the upper seam
                    let bin = ((ori / bin_width) as usize).min(bins - 1);
                    hist[bin] += mag_row[x];
                }
            }
        });

    CellGrid {
        hists,
        cells_x,
        cells_y,
        bins,
    }
}
