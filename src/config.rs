use crate::colors::Rgb;
use serde::Serialize;
use std::io;
use std::time::Duration;

/// Longest accepted fade-out, about 49 days
pub const MAX_LINGER_MS: u64 = u32::MAX as u64;

/// Tile trail configuration. Lengths are surface pixels, times milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrailConfig {
    pub cell_width: u32,
    pub cell_height: u32,
    pub gap: u32,
    /// How long an activated cell keeps glowing
    pub linger_ms: u64,
    /// Fixed repaint interval, independent of pointer activity
    pub tick_ms: u64,
    /// Fill of an idle cell
    pub base: Rgb,
    /// Fill of a freshly activated cell
    pub highlight: Rgb,
    /// Surface colour visible through the gaps
    pub background: Rgb,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            cell_width: 50,
            cell_height: 27,
            gap: 5,
            linger_ms: 1000,
            tick_ms: 16,
            base: Rgb::new(0x29, 0x29, 0x29),       // Dark gray
            highlight: Rgb::new(0x00, 0xbf, 0xff),  // Cyan
            background: Rgb::new(0x1d, 0x1d, 0x1d),
        }
    }
}

impl TrailConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Reject values that would make the grid or the animation degenerate
    pub fn validate(&self) -> io::Result<()> {
        let invalid = |msg: &str| Err(io::Error::new(io::ErrorKind::InvalidInput, msg.to_string()));
        if self.cell_width == 0 || self.cell_height == 0 {
            return invalid("cell width and height must be at least 1 pixel");
        }
        if self.linger_ms == 0 {
            return invalid("linger duration must be at least 1 ms");
        }
        if self.linger_ms > MAX_LINGER_MS {
            return invalid("linger duration must be at most 4294967295 ms");
        }
        if self.tick_ms == 0 {
            return invalid("tick interval must be at least 1 ms");
        }
        Ok(())
    }
}
