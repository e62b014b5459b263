use crossterm::event::{KeyCode, KeyModifiers};

/// Host events delivered to the trail effect by the event loop.
///
/// Pointer positions are surface pixels; the host converts from its own units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Tick,
    PointerMoved { x: f64, y: f64 },
    Key(KeyCode, KeyModifiers),
    /// Surface resized to (columns, rows) of host units
    Resized(u16, u16),
}
