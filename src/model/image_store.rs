// Pads hold an ImageHandle, the store holds the pixels until the handle is revoked.
// Handles aren't Clone, so whoever takes one off a pad has to give it back.

use std::collections::HashMap;
use std::sync::Arc;

use super::color::Rgb;

#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgb>, // row-major, width * height
}

impl Thumbnail {
    pub fn solid(color: Rgb, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    // nearest-neighbour lookup in normalized coordinates
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        if self.pixels.is_empty() {
            return Rgb::default();
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as usize).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as usize).min(self.height - 1);
        self.pixels[y * self.width + x]
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(u64);

#[derive(Debug, Default)]
pub struct ImageStore {
    next: u64,
    live: HashMap<u64, Arc<Thumbnail>>,
}

impl ImageStore {
    pub fn create(&mut self, thumbnail: Thumbnail) -> ImageHandle {
        let id = self.next;
        self.next += 1;
        self.live.insert(id, Arc::new(thumbnail));
        ImageHandle(id)
    }

    pub fn get(&self, handle: &ImageHandle) -> Option<&Arc<Thumbnail>> {
        self.live.get(&handle.0)
    }

    // false if it was already gone
    pub fn revoke(&mut self, handle: ImageHandle) -> bool {
        self.live.remove(&handle.0).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
