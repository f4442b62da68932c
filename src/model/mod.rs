mod color;
mod color_picker;
mod file_picker;
mod grid;
mod image_store;
mod menu;
mod pad;
mod spiral;
mod voices;

pub use color::Rgb;
pub use color_picker::{ColorPicker, SWATCHES};
pub use file_picker::FilePicker;
pub use grid::Grid;
pub use image_store::{ImageStore, Thumbnail};
pub use menu::{place_menu, ContextMenu, MenuAction};
pub use pad::{LoadedSample, Pad, StatusIndicator};
pub use spiral::Spiral;
pub use voices::ActiveVoices;

/// The one overlay on screen at a time, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    Menu(ContextMenu),
    ColorPicker(ColorPicker),
    FilePicker(FilePicker),
}

impl Overlay {
    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }
}
