// The fixed 8x8 pad collection. Pads are created once and never added or removed;
// PadId is range-checked on construction so lookups can't miss.

use crate::audio::SampleBuffer;
use crate::shared::{PadId, NUM_PADS};

use super::color::Rgb;
use super::image_store::ImageHandle;
use super::pad::{LoadedSample, Pad};

#[derive(Debug)]
pub struct Grid {
    pads: [Pad; NUM_PADS],
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            pads: std::array::from_fn(|_| Pad::default()),
        }
    }
}

impl Grid {
    pub fn get(&self, id: PadId) -> &Pad {
        &self.pads[id.index()]
    }

    pub fn get_mut(&mut self, id: PadId) -> &mut Pad {
        &mut self.pads[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PadId, &Pad)> {
        PadId::all().map(move |id| (id, self.get(id)))
    }

    pub fn set_color(&mut self, id: PadId, color: Rgb) {
        self.get_mut(id).color = color;
    }

    // returns the sample it replaced, if any
    pub fn set_sample(&mut self, id: PadId, sample: LoadedSample) -> Option<LoadedSample> {
        self.get_mut(id).sample.replace(sample)
    }

    pub fn take_sample(&mut self, id: PadId) -> Option<LoadedSample> {
        self.get_mut(id).sample.take()
    }

    pub fn sample_buffer(&self, id: PadId) -> Option<&std::sync::Arc<SampleBuffer>> {
        self.get(id).sample.as_ref().map(|s| &s.buffer)
    }

    // the returned handle must be revoked by the caller
    pub fn set_image(&mut self, id: PadId, image: ImageHandle) -> Option<ImageHandle> {
        self.get_mut(id).image.replace(image)
    }

    pub fn take_image(&mut self, id: PadId) -> Option<ImageHandle> {
        self.get_mut(id).image.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::image_store::{ImageStore, Thumbnail};

    #[test]
    fn fresh_grid_is_all_default() {
        let grid = Grid::default();
        assert_eq!(grid.iter().count(), NUM_PADS);
        for (_, pad) in grid.iter() {
            assert_eq!(pad.color, Rgb::DEFAULT_PAD);
            assert!(!pad.is_loaded());
            assert!(!pad.has_image());
            assert!(!pad.playing);
        }
    }

    #[test]
    fn mutations_only_touch_their_pad() {
        let mut grid = Grid::default();
        let a = PadId::new(2, 5).unwrap();
        let b = PadId::new(5, 2).unwrap();
        grid.set_color(a, Rgb::new(1, 2, 3));
        assert_eq!(grid.get(a).color, Rgb::new(1, 2, 3));
        assert_eq!(grid.get(b).color, Rgb::DEFAULT_PAD);
    }

    #[test]
    fn image_and_color_are_independent() {
        let mut grid = Grid::default();
        let mut store = ImageStore::default();
        let id = PadId::new(0, 0).unwrap();
        grid.set_color(id, Rgb::FLASH);
        let handle = store.create(Thumbnail::solid(Rgb::ACCENT, 2, 2));
        assert!(grid.set_image(id, handle).is_none());

        let taken = grid.take_image(id).unwrap();
        assert!(store.revoke(taken));
        assert!(!grid.get(id).has_image());
        assert_eq!(grid.get(id).color, Rgb::FLASH);
    }
}
