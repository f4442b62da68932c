pub mod grid;
pub mod input;
pub mod mode;
pub mod overlay;
pub mod view;

use ratatui::style::Color;

use crate::model::Rgb;

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

// readable text on top of a pad fill
pub fn text_on(fill: Rgb) -> Color {
    if fill.velocity() > 80 { Color::Black } else { Color::White }
}
