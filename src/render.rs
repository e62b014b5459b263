//! One full repaint of the tile grid

use crate::colors::Rgb;
use crate::config::TrailConfig;
use crate::decay::{DecayStore, Millis};
use crate::geometry::{cell_origin, grid_dimensions};
use crate::surface::Surface;

/// What a render pass drew
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStats {
    pub columns: u32,
    pub rows: u32,
    /// Cells drawn with non-zero intensity
    pub lit: usize,
}

/// Fill colour of a cell at the given intensity
pub fn cell_color(base: Rgb, highlight: Rgb, intensity: f64) -> Rgb {
    if intensity <= 0.0 {
        base
    } else {
        base.blend(highlight, intensity)
    }
}

/// Repaint every visible cell from the decay store at time `now`.
///
/// The grid is recomputed from the surface size on every call. Returns `None`
/// without touching the surface when it is not available.
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    store: &DecayStore,
    config: &TrailConfig,
    highlight: Rgb,
    now: Millis,
) -> Option<FrameStats> {
    let (width, height) = surface.size()?;
    let (columns, rows) = grid_dimensions(
        width,
        height,
        config.cell_width,
        config.cell_height,
        config.gap,
    );

    surface.clear();

    let mut lit = 0;
    for row in 0..rows {
        for col in 0..columns {
            let intensity = store.intensity_of(row, col, now);
            if intensity > 0.0 {
                lit += 1;
            }
            let color = cell_color(config.base, highlight, intensity);
            let (x, y) = cell_origin(row, col, config.cell_width, config.cell_height, config.gap);
            surface.fill_rect(x, y, config.cell_width, config.cell_height, color);
        }
    }

    Some(FrameStats { columns, rows, lit })
}
