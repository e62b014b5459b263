use crate::colors::Rgb;

/// A 2D raster target with an immediate-mode rectangle fill.
pub trait Surface {
    /// Current size in pixels, or `None` while the surface is not usable.
    fn size(&self) -> Option<(u32, u32)>;

    fn clear(&mut self);

    /// Fill a rectangle. Parts outside the surface are ignored.
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb);
}
