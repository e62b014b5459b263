//! The trail component: owns the decay store and the ticker, and turns ticks
//! and pointer moves into render passes.

use crate::colors::ColorState;
use crate::config::TrailConfig;
use crate::decay::{DecayStore, Millis};
use crate::event::HostEvent;
use crate::geometry::{pointer_to_cell, CellKey};
use crate::render::{render_frame, FrameStats};
use crate::scheduler::Ticker;
use crate::surface::Surface;

pub struct TrailEffect {
    config: TrailConfig,
    store: DecayStore,
    ticker: Ticker,
    pub colors: ColorState,
    live: bool,
}

impl TrailEffect {
    pub fn new(config: TrailConfig) -> Self {
        let store = DecayStore::new(config.linger_ms);
        let ticker = Ticker::new(config.tick_interval());
        Self {
            config,
            store,
            ticker,
            colors: ColorState::new(0),
            live: false,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &DecayStore {
        &self.store
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Consume a due tick from the ticker
    pub fn tick_due(&mut self, now: Millis) -> bool {
        self.ticker.poll(now)
    }

    /// Begin accepting events and start the periodic tick
    pub fn start(&mut self, now: Millis) {
        self.live = true;
        self.ticker.start(now);
        log::info!(
            "trail started: {}x{} cells, gap {}, linger {} ms, tick {} ms",
            self.config.cell_width,
            self.config.cell_height,
            self.config.gap,
            self.config.linger_ms,
            self.config.tick_ms
        );
    }

    /// Stop the tick and ignore every later event
    pub fn stop(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        self.ticker.stop();
        log::info!("trail stopped with {} active cells", self.store.len());
    }

    /// Forget every activation
    pub fn clear_trail(&mut self) {
        self.store.clear();
    }

    /// Render from the current decay state
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, now: Millis) -> Option<FrameStats> {
        if !self.live {
            return None;
        }
        let highlight = self.colors.highlight(self.config.highlight);
        render_frame(surface, &self.store, &self.config, highlight, now)
    }

    /// Periodic repaint. Also drops fully faded records.
    pub fn on_tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: Millis) -> Option<FrameStats> {
        if !self.live {
            return None;
        }
        let pruned = self.store.prune(now);
        if pruned > 0 {
            log::debug!("pruned {} faded cells, {} remain", pruned, self.store.len());
        }
        self.render(surface, now)
    }

    /// Activate the cell under the pointer and repaint right away
    pub fn on_pointer_move<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: f64,
        y: f64,
        now: Millis,
    ) -> Option<FrameStats> {
        if !self.live {
            return None;
        }
        if let Some(CellKey { row, col }) =
            pointer_to_cell(x, y, self.config.cell_width, self.config.cell_height, self.config.gap)
        {
            self.store.activate(row, col, now);
        }
        self.render(surface, now)
    }

    /// Dispatch a host event. Keys and resizes are handled by the host loop;
    /// a resize only needs a repaint since the grid follows the surface size.
    pub fn handle<S: Surface + ?Sized>(
        &mut self,
        event: HostEvent,
        surface: &mut S,
        now: Millis,
    ) -> Option<FrameStats> {
        match event {
            HostEvent::Tick => self.on_tick(surface, now),
            HostEvent::PointerMoved { x, y } => self.on_pointer_move(surface, x, y, now),
            HostEvent::Resized(..) => self.render(surface, now),
            HostEvent::Key(..) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::RecordingSurface;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn live_effect() -> TrailEffect {
        let mut effect = TrailEffect::new(TrailConfig::default());
        effect.start(0);
        effect
    }

    #[test]
    fn not_live_before_start() {
        let mut effect = TrailEffect::new(TrailConfig::default());
        let mut surface = RecordingSurface::new(200, 200);
        assert!(effect.handle(HostEvent::Tick, &mut surface, 0).is_none());
        assert!(!effect.ticker().is_running());
    }

    #[test]
    fn pointer_move_activates_and_renders_immediately() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(600, 300);
        let stats = effect
            .handle(HostEvent::PointerMoved { x: 60.0, y: 40.0 }, &mut surface, 5)
            .unwrap();
        assert_eq!(stats.lit, 1);
        assert_eq!(effect.store().get(1, 1), Some(5));
        assert_eq!(surface.fill_at(55, 32).unwrap().color, TrailConfig::default().highlight);
    }

    #[test]
    fn repeated_moves_in_one_cell_refresh_timestamp() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(600, 300);
        effect.on_pointer_move(&mut surface, 10.0, 10.0, 100);
        effect.on_pointer_move(&mut surface, 20.0, 12.0, 300);
        assert_eq!(effect.store().len(), 1);
        assert_eq!(effect.store().get(0, 0), Some(300));
    }

    #[test]
    fn tick_fades_without_input() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(600, 300);
        effect.on_pointer_move(&mut surface, 10.0, 10.0, 0);
        let halfway = effect.on_tick(&mut surface, 500).unwrap();
        assert_eq!(halfway.lit, 1);
        let done = effect.on_tick(&mut surface, 1000).unwrap();
        assert_eq!(done.lit, 0);
        assert!(effect.store().is_empty());
    }

    #[test]
    fn out_of_bounds_pointer_is_stored_not_drawn() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(100, 100);
        let stats = effect.on_pointer_move(&mut surface, 5000.0, 5000.0, 0).unwrap();
        assert_eq!(stats.lit, 0);
        assert_eq!(effect.store().len(), 1);
    }

    #[test]
    fn no_renders_after_stop() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(600, 300);
        effect.on_tick(&mut surface, 16);
        let clears = surface.clears;

        effect.stop();
        assert!(!effect.ticker().is_running());
        let events = [
            HostEvent::Tick,
            HostEvent::PointerMoved { x: 10.0, y: 10.0 },
            HostEvent::Resized(80, 24),
            HostEvent::Tick,
        ];
        for (i, event) in events.into_iter().enumerate() {
            assert!(effect.handle(event, &mut surface, 32 + i as u64 * 16).is_none());
        }
        assert_eq!(surface.clears, clears);
        assert!(effect.store().is_empty());
    }

    #[test]
    fn keys_do_not_render() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(100, 100);
        let key = HostEvent::Key(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(effect.handle(key, &mut surface, 0).is_none());
        assert_eq!(surface.clears, 0);
    }

    #[test]
    fn scheme_changes_highlight() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(100, 100);
        effect.colors.handle_key(KeyCode::Char('!'));
        effect.on_pointer_move(&mut surface, 1.0, 1.0, 0);
        assert_ne!(surface.fill_at(0, 0).unwrap().color, TrailConfig::default().highlight);
    }

    #[test]
    fn clear_trail_empties_store() {
        let mut effect = live_effect();
        let mut surface = RecordingSurface::new(100, 100);
        effect.on_pointer_move(&mut surface, 1.0, 1.0, 0);
        effect.clear_trail();
        assert_eq!(effect.on_tick(&mut surface, 1).unwrap().lit, 0);
    }
}
