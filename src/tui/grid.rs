use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use super::input::key_for_pad;
use super::mode::HitMap;
use super::{text_on, to_color};
use crate::model::{Rgb, Thumbnail};
use crate::shared::{PadView, GRID_SIZE};

pub fn draw_pad_grid(frame: &mut Frame, area: Rect, pads: &[PadView], hits: &mut HitMap) {
    let row_constraints = [Constraint::Ratio(1, GRID_SIZE as u32); GRID_SIZE];
    let col_constraints = [Constraint::Ratio(1, GRID_SIZE as u32); GRID_SIZE];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col_idx, cell_area) in cols.iter().enumerate() {
            let Some(pad) = pads.get(row_idx * GRID_SIZE + col_idx) else { continue };
            draw_pad(frame, *cell_area, pad);
            hits.pads.push((*cell_area, pad.id));
        }
    }
}

fn draw_pad(frame: &mut Frame, area: Rect, pad: &PadView) {
    let border = if pad.loaded { to_color(Rgb::ACCENT) } else { Color::DarkGray };
    let mut block = Block::bordered()
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(to_color(pad.fill)));
    if pad.selected {
        block = block
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::White));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(thumb) = &pad.image {
        paint_thumbnail(frame.buffer_mut(), inner, thumb);
    }

    let hint = key_for_pad(pad.id).map(|c| c.to_ascii_uppercase().to_string()).unwrap_or_default();
    let label = Line::from(format!("{} {}", pad.status.glyph(), hint).trim().to_string());
    let style = Style::default().fg(text_on(pad.fill)).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(label).style(style), Rect { height: inner.height.min(1), ..inner });
}

// two image rows per terminal cell using the upper half block
fn paint_thumbnail(buf: &mut Buffer, area: Rect, thumb: &Thumbnail) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (w, h) = (area.width as f32, area.height as f32 * 2.0);
    for cy in 0..area.height {
        for cx in 0..area.width {
            let u = (cx as f32 + 0.5) / w;
            let top = thumb.sample(u, (cy as f32 * 2.0 + 0.5) / h);
            let bottom = thumb.sample(u, (cy as f32 * 2.0 + 1.5) / h);
            if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                cell.set_symbol("▀").set_fg(to_color(top)).set_bg(to_color(bottom));
            }
        }
    }
}
