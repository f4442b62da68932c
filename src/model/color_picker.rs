use crate::shared::PadId;

use super::color::Rgb;

// quick picks shown under the text field
pub const SWATCHES: [Rgb; 8] = [
    Rgb::new(0xf4, 0x43, 0x36), // red
    Rgb::new(0xff, 0x98, 0x00), // orange
    Rgb::new(0xff, 0xeb, 0x3b), // yellow
    Rgb::ACCENT,
    Rgb::new(0x00, 0xbc, 0xd4), // cyan
    Rgb::new(0x21, 0x96, 0xf3), // blue
    Rgb::new(0x9c, 0x27, 0xb0), // purple
    Rgb::FLASH,
];

const MAX_INPUT: usize = 7; // "#rrggbb"

#[derive(Clone, Debug, PartialEq)]
pub struct ColorPicker {
    pub pad: PadId,
    pub input: String,
    pub error: Option<String>,
}

impl ColorPicker {
    // pre-filled with the pad's current color
    pub fn new(pad: PadId, current: Rgb) -> Self {
        Self {
            pad,
            input: current.to_hex(),
            error: None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.error = None;
        if c == '#' && self.input.is_empty() {
            self.input.push(c);
            return;
        }
        if c.is_ascii_hexdigit() && self.input.len() < MAX_INPUT {
            if self.input.is_empty() {
                self.input.push('#');
            }
            self.input.push(c.to_ascii_lowercase());
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        self.input.pop();
    }

    pub fn pick_swatch(&mut self, index: usize) {
        if let Some(color) = SWATCHES.get(index) {
            self.input = color.to_hex();
            self.error = None;
        }
    }

    pub fn preview(&self) -> Option<Rgb> {
        Rgb::from_hex(&self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> ColorPicker {
        ColorPicker::new(PadId::new(0, 1).unwrap(), Rgb::DEFAULT_PAD)
    }

    #[test]
    fn starts_with_current_color() {
        let p = picker();
        assert_eq!(p.input, "#333333");
        assert_eq!(p.preview(), Some(Rgb::DEFAULT_PAD));
    }

    #[test]
    fn typing_replaces_the_value() {
        let mut p = picker();
        for _ in 0..7 {
            p.backspace();
        }
        assert!(p.preview().is_none());
        for c in "FF00zz80".chars() {
            p.push_char(c);
        }
        assert_eq!(p.input, "#ff0080");
        assert_eq!(p.preview(), Some(Rgb::new(0xff, 0x00, 0x80)));
        // full, further digits are dropped
        p.push_char('1');
        assert_eq!(p.input, "#ff0080");
    }

    #[test]
    fn swatches_fill_the_field() {
        let mut p = picker();
        p.pick_swatch(3);
        assert_eq!(p.preview(), Some(Rgb::ACCENT));
        p.pick_swatch(99);
        assert_eq!(p.preview(), Some(Rgb::ACCENT));
    }
}
