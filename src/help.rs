use crate::terminal::Terminal;
use crossterm::style::Color;

pub const HELP_TEXT: &str = "\
TILE TRAIL
─────────────────
Mouse  Light up tiles
c      Clear trail
?      Close help
───────────────────────
 GLOBAL CONTROLS
 !-()   Color scheme
 q/Esc  Quit
───────────────────────";

/// Render a centered help overlay box with the provided text.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    if help_text.is_empty() {
        return;
    }

    let (width, height) = term.char_size();
    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // 1 row padding top/bottom

    // Center the box
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    let border_color = Color::White;
    let text_color = Color::Grey;

    // Draw top border: ┌─────┐
    term.set(start_x as i32, start_y as i32, '┌', border_color);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, start_y as i32, '─', border_color);
    }
    term.set((start_x + box_width - 1) as i32, start_y as i32, '┐', border_color);

    // Draw content rows with side borders
    for (i, line) in lines.iter().enumerate() {
        let y = start_y + 1 + i;
        term.set(start_x as i32, y as i32, '│', border_color);

        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        for (j, ch) in padded.chars().enumerate() {
            term.set((start_x + 1 + j) as i32, y as i32, ch, text_color);
        }

        term.set((start_x + box_width - 1) as i32, y as i32, '│', border_color);
    }

    // Draw bottom border: └─────┘
    let bottom_y = start_y + box_height - 1;
    term.set(start_x as i32, bottom_y as i32, '└', border_color);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, bottom_y as i32, '─', border_color);
    }
    term.set((start_x + box_width - 1) as i32, bottom_y as i32, '┘', border_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Rgb;

    #[test]
    fn overlay_is_centred() {
        let mut term = Terminal::detached(80, 24, Rgb::new(0, 0, 0));
        render_help_overlay(&mut term, "ab\ncd");
        // box is 6x4, centred at (37, 10)
        assert_eq!(term.glyph_at(37, 10), Some('┌'));
        assert_eq!(term.glyph_at(39, 11), Some('a'));
        assert_eq!(term.glyph_at(42, 13), Some('┘'));
        assert_eq!(term.glyph_at(0, 0), None);
    }

    #[test]
    fn overlay_on_tiny_terminal_does_not_panic() {
        let mut term = Terminal::detached(3, 2, Rgb::new(0, 0, 0));
        render_help_overlay(&mut term, HELP_TEXT);
        assert_eq!(term.glyph_at(0, 0), Some('┌'));
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut term = Terminal::detached(10, 5, Rgb::new(0, 0, 0));
        render_help_overlay(&mut term, "");
        assert_eq!(term.glyph_at(4, 2), None);
    }
}
