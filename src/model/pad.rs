use std::sync::Arc;

use crate::audio::SampleBuffer;
use super::color::Rgb;
use super::image_store::ImageHandle;

/// Little marker drawn in the pad corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusIndicator {
    #[default]
    Cleared, // never played, or finished on its own
    Playing,
    Stopped, // stopped by hand, kept visible on purpose
}

impl StatusIndicator {
    pub fn glyph(self) -> &'static str {
        match self {
            StatusIndicator::Cleared => "",
            StatusIndicator::Playing => "▶",
            StatusIndicator::Stopped => "■",
        }
    }
}

// a decoded sample, already at the output rate
#[derive(Clone, Debug)]
pub struct LoadedSample {
    pub name: String,
    pub buffer: Arc<SampleBuffer>,
    pub duration_secs: f32,
}

impl LoadedSample {
    pub fn summary(&self) -> String {
        format!("Sound: {} ({:.2}s)", self.name, self.duration_secs)
    }
}

#[derive(Debug, Default)]
pub struct Pad {
    pub color: Rgb,
    pub sample: Option<LoadedSample>,
    pub playing: bool,
    pub image: Option<ImageHandle>,
    pub status: StatusIndicator,
}

impl Pad {
    pub fn is_loaded(&self) -> bool { self.sample.is_some() }
    pub fn has_image(&self) -> bool { self.image.is_some() }
}
