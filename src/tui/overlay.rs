use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use super::mode::{HitMap, PickerButton};
use super::to_color;
use crate::model::{place_menu, ColorPicker, ContextMenu, FilePicker, Overlay, SWATCHES};

const MENU_MARGIN: u16 = 1;
const SWATCH_WIDTH: u16 = 3;
const PICKER_SIZE: (u16, u16) = (36, 9);

pub fn draw_overlay(frame: &mut Frame, area: Rect, overlay: &Overlay, hits: &mut HitMap) {
    match overlay {
        Overlay::None => {}
        Overlay::Menu(menu) => draw_menu(frame, area, menu, hits),
        Overlay::ColorPicker(picker) => draw_color_picker(frame, area, picker, hits),
        Overlay::FilePicker(picker) => draw_file_picker(frame, area, picker, hits),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// one text row inside `inner`, empty when it doesn't fit
fn line_at(inner: Rect, dy: u16) -> Rect {
    Rect::new(inner.x, inner.y + dy, inner.width, 1).intersection(inner)
}

fn draw_menu(frame: &mut Frame, area: Rect, menu: &ContextMenu, hits: &mut HitMap) {
    let size = menu.size();
    let (x, y) = place_menu(menu.anchor, size, (area.width, area.height), MENU_MARGIN);
    let rect = Rect::new(x, y, size.0, size.1).intersection(area);

    let lines: Vec<Line> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut style = Style::default();
            if !item.action.is_actionable() {
                style = style.fg(Color::Gray).add_modifier(Modifier::ITALIC);
            } else if item.action.is_destructive() {
                style = style.fg(Color::LightRed);
            }
            if i == menu.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(format!(" {} ", item.label), style))
        })
        .collect();

    let block = Block::bordered().title(format!(" {} ", menu.pad));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);

    hits.overlay = Some(rect);
    for i in 0..menu.items.len() as u16 {
        if i < inner.height {
            hits.rows.push((Rect::new(inner.x, inner.y + i, inner.width, 1), i as usize));
        }
    }
}

fn draw_color_picker(frame: &mut Frame, area: Rect, picker: &ColorPicker, hits: &mut HitMap) {
    let rect = centered(area, PICKER_SIZE.0, PICKER_SIZE.1);
    let block = Block::bordered().title(format!(" Color for {} ", picker.pad));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    hits.overlay = Some(rect);

    let preview = match picker.preview() {
        Some(rgb) => Span::styled("      ", Style::default().bg(to_color(rgb))),
        None => Span::styled("  ??  ", Style::default().fg(Color::DarkGray)),
    };
    let field = Line::from(vec![
        Span::raw(" Hex: "),
        Span::styled(format!("{:<7}", picker.input), Style::default().add_modifier(Modifier::UNDERLINED)),
        Span::raw("  "),
        preview,
    ]);
    frame.render_widget(Paragraph::new(field), line_at(inner, 1));

    // swatch row
    let swatch_y = inner.y + 3;
    let swatch_spans: Vec<Span> = std::iter::once(Span::raw(" "))
        .chain(SWATCHES.iter().map(|c| Span::styled("   ", Style::default().bg(to_color(*c)))))
        .collect();
    frame.render_widget(Paragraph::new(Line::from(swatch_spans)), line_at(inner, 3));
    for i in 0..SWATCHES.len() as u16 {
        let x = inner.x + 1 + i * SWATCH_WIDTH;
        if x + SWATCH_WIDTH <= inner.x + inner.width {
            hits.rows.push((Rect::new(x, swatch_y, SWATCH_WIDTH, 1), i as usize));
        }
    }

    if let Some(error) = &picker.error {
        let line = Line::from(Span::styled(format!(" {error}"), Style::default().fg(Color::LightRed)));
        frame.render_widget(Paragraph::new(line), line_at(inner, 4));
    }

    // buttons
    let buttons_y = inner.y + inner.height.saturating_sub(1);
    let mut x = inner.x + 1;
    for (label, button) in [
        ("[ Apply ]", PickerButton::Apply),
        ("[ Reset ]", PickerButton::Reset),
        ("[ Cancel ]", PickerButton::Cancel),
    ] {
        let width = label.chars().count() as u16;
        let button_rect = Rect::new(x, buttons_y, width, 1).intersection(inner);
        frame.render_widget(Paragraph::new(label), button_rect);
        hits.buttons.push((button_rect, button));
        x += width + 1;
    }
}

fn draw_file_picker(frame: &mut Frame, area: Rect, picker: &FilePicker, hits: &mut HitMap) {
    let rect = centered(area, area.width * 3 / 5, area.height * 3 / 5);
    let block = Block::bordered().title(format!(" {} ", picker.title()));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    hits.overlay = Some(rect);

    if picker.entries.is_empty() {
        let line = Line::from(Span::styled(" no matching files", Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    // scroll so the selection stays visible
    let visible = inner.height as usize;
    let offset = (picker.selected + 1).saturating_sub(visible);

    let lines: Vec<Line> = picker
        .entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, path)| {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            let style = if i == picker.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {name}"), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    for (row, index) in (offset..picker.entries.len()).take(visible).enumerate() {
        hits.rows.push((Rect::new(inner.x, inner.y + row as u16, inner.width, 1), index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        assert_eq!(centered(Rect::new(0, 0, 100, 40), 36, 9), Rect::new(32, 15, 36, 9));
        assert_eq!(centered(Rect::new(0, 0, 20, 5), 36, 9), Rect::new(0, 0, 20, 5));
    }
}
