use std::path::Path;

use image::imageops::FilterType;

use crate::error::LoadError;
use crate::model::{Rgb, Thumbnail};

// A pad is a handful of terminal cells; two pixel rows per cell with half blocks.
pub const THUMB_WIDTH: u32 = 12;
pub const THUMB_HEIGHT: u32 = 8;

pub fn load(path: &Path) -> Result<Thumbnail, LoadError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

pub fn decode(bytes: &[u8]) -> Result<Thumbnail, LoadError> {
    let img = image::load_from_memory(bytes)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(LoadError::Empty);
    }
    let small = img
        .resize_exact(THUMB_WIDTH, THUMB_HEIGHT, FilterType::Triangle)
        .to_rgb8();
    let pixels = small
        .pixels()
        .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
        .collect();
    Ok(Thumbnail {
        width: THUMB_WIDTH as usize,
        height: THUMB_HEIGHT as usize,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png(color: [u8; 3], w: u32, h: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(w, h, image::Rgb(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn decodes_into_a_fixed_size_thumbnail() {
        let thumb = decode(&png([200, 10, 30], 64, 40)).unwrap();
        assert_eq!(thumb.width, THUMB_WIDTH as usize);
        assert_eq!(thumb.height, THUMB_HEIGHT as usize);
        assert_eq!(thumb.pixels.len(), (THUMB_WIDTH * THUMB_HEIGHT) as usize);
        assert_eq!(thumb.pixels[0], Rgb::new(200, 10, 30));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode(b"not an image"), Err(LoadError::Image(_))));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pad.png");
        std::fs::write(&path, png([1, 2, 3], 4, 4)).unwrap();
        assert_eq!(load(&path).unwrap().pixels[5], Rgb::new(1, 2, 3));
    }
}
