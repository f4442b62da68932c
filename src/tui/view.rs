use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::grid::draw_pad_grid;
use super::mode::HitMap;
use super::overlay::draw_overlay;
use crate::shared::DisplayState;

const HELP: &str = "keys trigger pads · space stop all · right click / enter menu · F5 rescan midi · esc quit";

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState, hits: &mut HitMap) {
    hits.clear();

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title + midi status
            Constraint::Min(16),   // pad grid
            Constraint::Length(2), // message + help
        ])
        .split(area);

    draw_header(frame, sections[0], state);
    draw_pad_grid(frame, grid_area(sections[1]), &state.pads, hits);
    draw_footer(frame, sections[2], state);

    // overlays go on top of everything else
    draw_overlay(frame, area, &state.overlay, hits);
}

// keep pads roughly square: terminal cells are about twice as tall as wide
fn grid_area(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let mut spans = vec![
        Span::styled(" padgrid ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(state.midi_status.clone(), Style::default().fg(Color::Gray)),
    ];
    if state.playing_count > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("▶ {}", state.playing_count),
            Style::default().fg(Color::Green),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let message = state.message.clone().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_area_is_centered_and_bounded() {
        let wide = grid_area(Rect::new(0, 1, 100, 20));
        assert_eq!(wide, Rect::new(30, 1, 40, 20));

        let narrow = grid_area(Rect::new(0, 1, 30, 20));
        assert_eq!(narrow, Rect::new(0, 1, 30, 20));
    }
}
