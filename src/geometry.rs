//! Grid geometry: surface size to grid dimensions, cells to pixel origins,
//! pointer positions to cells.
//!
//! All lengths are surface pixels. A cell occupies `cell_w x cell_h` pixels and
//! is followed by `gap` pixels of spacing, so the grid pitch is `cell + gap`.

/// Grid position of a tile. Not bounded by the current grid: after a resize a
/// key may point past the last row or column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row: u32,
    pub col: u32,
}

impl CellKey {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Number of (columns, rows) needed to cover the whole surface.
pub fn grid_dimensions(surface_w: u32, surface_h: u32, cell_w: u32, cell_h: u32, gap: u32) -> (u32, u32) {
    let pitch_x = cell_w.saturating_add(gap);
    let pitch_y = cell_h.saturating_add(gap);
    if pitch_x == 0 || pitch_y == 0 {
        return (0, 0);
    }
    (surface_w.div_ceil(pitch_x), surface_h.div_ceil(pitch_y))
}

/// Top-left pixel of a cell.
pub fn cell_origin(row: u32, col: u32, cell_w: u32, cell_h: u32, gap: u32) -> (u32, u32) {
    let x = col.saturating_mul(cell_w.saturating_add(gap));
    let y = row.saturating_mul(cell_h.saturating_add(gap));
    (x, y)
}

/// Cell under a pointer. Gaps belong to the cell on their left/top.
///
/// No clamping to the grid is done here; `None` only means the position cannot
/// name a cell at all (negative or NaN coordinates, zero pitch).
pub fn pointer_to_cell(x: f64, y: f64, cell_w: u32, cell_h: u32, gap: u32) -> Option<CellKey> {
    let pitch_x = cell_w.saturating_add(gap) as f64;
    let pitch_y = cell_h.saturating_add(gap) as f64;
    if pitch_x == 0.0 || pitch_y == 0.0 {
        return None;
    }
    // Negated comparison so NaN is rejected too
    if !(x >= 0.0 && y >= 0.0) {
        return None;
    }
    let col = (x / pitch_x).floor() as u32;
    let row = (y / pitch_y).floor() as u32;
    Some(CellKey { row, col })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_partial_cells() {
        assert_eq!(grid_dimensions(207, 59, 50, 27, 5), (4, 2));
    }

    #[test]
    fn grid_exact_fit() {
        assert_eq!(grid_dimensions(110, 64, 50, 27, 5), (2, 2));
    }

    #[test]
    fn grid_zero_surface() {
        assert_eq!(grid_dimensions(0, 0, 50, 27, 5), (0, 0));
        assert_eq!(grid_dimensions(0, 100, 50, 27, 5), (0, 4));
    }

    #[test]
    fn grid_zero_pitch() {
        assert_eq!(grid_dimensions(100, 100, 0, 0, 0), (0, 0));
    }

    #[test]
    fn origin_includes_gap() {
        assert_eq!(cell_origin(0, 0, 50, 27, 5), (0, 0));
        assert_eq!(cell_origin(2, 3, 50, 27, 5), (165, 64));
    }

    #[test]
    fn pointer_inside_first_cell() {
        assert_eq!(pointer_to_cell(10.0, 10.0, 50, 27, 5), Some(CellKey::new(0, 0)));
    }

    #[test]
    fn pointer_on_pitch_boundary() {
        assert_eq!(pointer_to_cell(55.0, 32.0, 50, 27, 5), Some(CellKey::new(1, 1)));
    }

    #[test]
    fn pointer_in_gap_maps_to_preceding_cell() {
        assert_eq!(pointer_to_cell(52.0, 29.0, 50, 27, 5), Some(CellKey::new(0, 0)));
    }

    #[test]
    fn pointer_far_outside_is_not_clamped() {
        assert_eq!(pointer_to_cell(5500.0, 320.0, 50, 27, 5), Some(CellKey::new(10, 100)));
    }

    #[test]
    fn pointer_negative_or_nan() {
        assert_eq!(pointer_to_cell(-1.0, 10.0, 50, 27, 5), None);
        assert_eq!(pointer_to_cell(10.0, f64::NAN, 50, 27, 5), None);
        assert_eq!(pointer_to_cell(10.0, 10.0, 0, 0, 0), None);
    }
}
