//! Debug rendering of cell histograms.
//!
//! Presentation only: nothing here feeds back into descriptor extraction.

use image::{GrayImage, Luma};

use crate::config::GradientRange;
use crate::hog::Hog;

/// Render an arrow-glyph overlay of the cell histograms.
///
/// Each cell draws one line per orientation bin, scaled by the bin's share
/// of the cell maximum; line brightness encodes the cell maximum relative
/// to the image-wide maximum. Returns `None` before the first successful
/// `process`.
pub fn vector_mask(hog: &Hog, thickness: usize) -> Option<GrayImage> {
    let grid = hog.cell_grid()?;
    let maps_width = hog.magnitudes()?.width();
    let maps_height = hog.magnitudes()?.height();

    let config = hog.config();
    let cell = config.cell_size;
    let bin_width = config.bin_width();
    let unsigned = config.range == GradientRange::Unsigned;

    let mut mask = GrayImage::new(maps_width as u32, maps_height as u32);

    // per-cell histogram maxima and the image-wide maximum
    let mut cell_maxs = vec![0.0f32; grid.cells_x() * grid.cells_y()];
    let mut global_max = 0.0f32;
    for cy in 0..grid.cells_y() {
        for cx in 0..grid.cells_x() {
            let m = grid
                .cell(cx, cy)
                .iter()
                .cloned()
                .fold(0.0f32, f32::max);
            cell_maxs[cy * grid.cells_x() + cx] = m;
            global_max = global_max.max(m);
        }
    }

    if global_max > 0.0 {
        for cy in 0..grid.cells_y() {
            for cx in 0..grid.cells_x() {
                let cell_max = cell_maxs[cy * grid.cells_x() + cx];
                if cell_max <= 0.0 {
                    continue;
                }
                let shade = (cell_max / global_max * 255.0) as u8;
                let center_x = (cx * cell + cell / 2) as i32;
                let center_y = (cy * cell + cell / 2) as i32;

                let hist = grid.cell(cx, cy);
                for (k, &value) in hist.iter().enumerate() {
                    let length = (value / cell_max * (cell / 2) as f32) as i32;
                    if length <= 0 {
                        continue;
                    }
                    let angle = (k as f32 * bin_width).to_radians();
                    let tip_x = center_x + (angle.cos() * length as f32) as i32;
                    let tip_y = center_y + (angle.sin() * length as f32) as i32;

                    if unsigned {
                        // folded orientations are direction-free: draw
                        // through the center to the mirrored endpoint
                        let tail_x = center_x - (angle.cos() * length as f32) as i32;
                        let tail_y = center_y - (angle.sin() * length as f32) as i32;
                        draw_line(&mut mask, (tail_x, tail_y), (tip_x, tip_y), shade, thickness);
                    } else {
                        draw_line(
                            &mut mask,
                            (center_x, center_y),
                            (tip_x, tip_y),
                            shade,
                            thickness,
                        );
                    }
                }
            }
        }
    }

    // cell delimiters
    let grid_w = (grid.cells_x() * cell) as i32;
    let grid_h = (grid.cells_y() * cell) as i32;
    for cy in 0..=grid.cells_y() {
        let y = (cy * cell) as i32;
        draw_line(&mut mask, (0, y), (grid_w - 1, y), 255, thickness);
    }
    for cx in 0..=grid.cells_x() {
        let x = (cx * cell) as i32;
        draw_line(&mut mask, (x, 0), (x, grid_h - 1), 255, thickness);
    }

    Some(mask)
}

// Bresenham with a square brush of side `thickness`
fn draw_line(img: &mut GrayImage, p0: (i32, i32), p1: (i32, i32), value: u8, thickness: usize) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let radius = thickness.max(1) as i32 - 1;
    loop {
        for oy in -radius..=radius {
            for ox in -radius..=radius {
                let px = x0 + ox;
                let py = y0 + oy;
                if px >= 0 && px < img.width() as i32 && py >= 0 && py < img.height() as i32 {
                    img.put_pixel(px as u32, py as u32, Luma([value]));
                }
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
