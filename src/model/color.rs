use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    // pads start with this and go back to it on reset
    pub const DEFAULT_PAD: Rgb = Rgb::new(0x33, 0x33, 0x33);
    pub const FLASH: Rgb = Rgb::new(0xff, 0xff, 0xff);
    // spiral + loaded outline
    pub const ACCENT: Rgb = Rgb::new(0x4c, 0xaf, 0x50);

    // #rrggbb, rrggbb or #rgb
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                // #abc == #aabbcc
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|n| n * 17);
                Some(Self {
                    r: nibble(0).ok()?,
                    g: nibble(1).ok()?,
                    b: nibble(2).ok()?,
                })
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    // brightness as a note velocity, 0..=127
    pub fn velocity(self) -> u8 {
        let sum = self.r as u32 + self.g as u32 + self.b as u32;
        (sum * 127 / (3 * 255)) as u8
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::DEFAULT_PAD
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#4caf50"), Some(Rgb::new(0x4c, 0xaf, 0x50)));
        assert_eq!(Rgb::from_hex("4CAF50"), Some(Rgb::new(0x4c, 0xaf, 0x50)));
        assert_eq!(Rgb::from_hex("#333"), Some(Rgb::DEFAULT_PAD));
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::FLASH));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Rgb::from_hex(""), None);
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex("#+1+1+1"), None);
    }

    #[test]
    fn hex_output_is_lowercase_six_digits() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "#000aff");
        assert_eq!(Rgb::DEFAULT_PAD.to_string(), "#333333");
    }

    #[test]
    fn velocity_spans_midi_range() {
        assert_eq!(Rgb::from_hex("#000000").unwrap().velocity(), 0);
        assert_eq!(Rgb::from_hex("#ffffff").unwrap().velocity(), 127);
        assert_eq!(Rgb::DEFAULT_PAD.velocity(), 25);
        // pure red averages to 85 -> 42
        assert_eq!(Rgb::new(255, 0, 0).velocity(), 42);
    }

    #[test]
    fn velocity_is_monotonic_in_brightness() {
        let mut last = 0;
        for level in 0..=255u8 {
            let v = Rgb::new(level, level, level).velocity();
            assert!(v >= last);
            last = v;
        }
    }
}
