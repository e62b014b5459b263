//! Terminal host: owns the tty, feeds ticks and mouse moves to the effect

use crate::config::TrailConfig;
use crate::effect::TrailEffect;
use crate::event::HostEvent;
use crate::help::{render_help_overlay, HELP_TEXT};
use crate::scheduler::Clock;
use crate::terminal::{MouseCaptureGuard, Terminal};
use crossterm::event::{KeyCode, KeyModifiers};
use std::io;
use std::time::Duration;

/// Upper bound on a single event wait, so resizes are noticed while stopped
const MAX_WAIT: Duration = Duration::from_millis(250);

/// What the host loop should do after a key press
#[derive(Debug, PartialEq)]
enum KeyAction {
    Quit,
    ToggleHelp,
    ClearTrail,
    Redraw,
    Ignore,
}

fn key_action(effect: &mut TrailEffect, code: KeyCode, mods: KeyModifiers) -> KeyAction {
    if effect.colors.handle_key(code) {
        return KeyAction::Redraw;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if mods.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('?') => KeyAction::ToggleHelp,
        KeyCode::Char('/') if mods.contains(KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
        KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::ClearTrail,
        _ => KeyAction::Ignore,
    }
}

/// Run the tile trail until the user quits
pub fn run(config: TrailConfig) -> io::Result<()> {
    config.validate()?;

    let mut term = Terminal::new(true, config.background)?;
    let clock = Clock::start();
    let mut effect = TrailEffect::new(config);

    let result = {
        let _mouse_guard = MouseCaptureGuard::enable()?;
        effect.start(clock.now());
        let result = event_loop(&mut term, &mut effect, &clock);
        // Tick and event handling stop before mouse capture is released,
        // and both before the terminal is restored
        effect.stop();
        result
    };

    drop(term);
    result
}

fn event_loop(term: &mut Terminal, effect: &mut TrailEffect, clock: &Clock) -> io::Result<()> {
    let mut show_help = false;

    // First frame without waiting for input or the first tick
    let rendered = effect.render(term, clock.now());
    present(term, rendered.is_some(), show_help)?;

    loop {
        let wait = effect
            .ticker()
            .timeout(clock.now())
            .map_or(MAX_WAIT, |t| t.min(MAX_WAIT));

        if let Some(event) = term.poll_event(wait)? {
            term.sync_size()?;
            let now = clock.now();
            let rendered = match event {
                HostEvent::Key(code, mods) => match key_action(effect, code, mods) {
                    KeyAction::Quit => break,
                    KeyAction::ToggleHelp => {
                        show_help = !show_help;
                        effect.render(term, now)
                    }
                    KeyAction::ClearTrail => {
                        effect.clear_trail();
                        effect.render(term, now)
                    }
                    KeyAction::Redraw => effect.render(term, now),
                    KeyAction::Ignore => None,
                },
                HostEvent::Resized(w, h) => {
                    term.resize(w, h);
                    term.clear_screen()?;
                    effect.handle(event, term, now)
                }
                _ => effect.handle(event, term, now),
            };
            present(term, rendered.is_some(), show_help)?;
        }

        let now = clock.now();
        if effect.tick_due(now) {
            term.sync_size()?;
            let rendered = effect.handle(HostEvent::Tick, term, now);
            present(term, rendered.is_some(), show_help)?;
        }
    }

    Ok(())
}

fn present(term: &mut Terminal, rendered: bool, show_help: bool) -> io::Result<()> {
    if !rendered {
        return Ok(());
    }
    if show_help {
        render_help_overlay(term, HELP_TEXT);
    }
    term.present()
}
