use ratatui::layout::Rect;

use crate::model::Overlay;
use crate::shared::PadId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayKind {
    #[default]
    None,
    Menu,
    ColorPicker,
    FilePicker,
}

impl From<&Overlay> for OverlayKind {
    fn from(overlay: &Overlay) -> Self {
        match overlay {
            Overlay::None => OverlayKind::None,
            Overlay::Menu(_) => OverlayKind::Menu,
            Overlay::ColorPicker(_) => OverlayKind::ColorPicker,
            Overlay::FilePicker(_) => OverlayKind::FilePicker,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerButton {
    Apply,
    Reset,
    Cancel,
}

fn hit(r: &Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
}

// Where things landed on screen in the last frame, so mouse clicks can be
// resolved into pads, menu rows and buttons. Rebuilt by every render.
#[derive(Clone, Debug, Default)]
pub struct HitMap {
    pub pads: Vec<(Rect, PadId)>,
    pub overlay: Option<Rect>,
    pub rows: Vec<(Rect, usize)>, // menu rows, file rows or color swatches
    pub buttons: Vec<(Rect, PickerButton)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.pads.clear();
        self.overlay = None;
        self.rows.clear();
        self.buttons.clear();
    }

    pub fn pad_at(&self, x: u16, y: u16) -> Option<PadId> {
        self.pads.iter().find(|(r, _)| hit(r, x, y)).map(|(_, id)| *id)
    }

    pub fn pad_rect(&self, pad: PadId) -> Option<Rect> {
        self.pads.iter().find(|(_, id)| *id == pad).map(|(r, _)| *r)
    }

    pub fn in_overlay(&self, x: u16, y: u16) -> bool {
        self.overlay.is_some_and(|r| hit(&r, x, y))
    }

    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        self.rows.iter().find(|(r, _)| hit(r, x, y)).map(|(_, i)| *i)
    }

    pub fn button_at(&self, x: u16, y: u16) -> Option<PickerButton> {
        self.buttons.iter().find(|(r, _)| hit(r, x, y)).map(|(_, b)| *b)
    }
}

// state local to the tui; overlay and selected are synced from DisplayState each frame
#[derive(Clone, Debug, Default)]
pub struct TuiState {
    pub overlay: OverlayKind,
    pub selected: Option<PadId>,
    pub hits: HitMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_testing_respects_rect_edges() {
        let mut hits = HitMap::default();
        let pad = PadId::new(1, 2).unwrap();
        hits.pads.push((Rect::new(10, 5, 4, 3), pad));
        assert_eq!(hits.pad_at(10, 5), Some(pad));
        assert_eq!(hits.pad_at(13, 7), Some(pad));
        assert_eq!(hits.pad_at(14, 7), None);
        assert_eq!(hits.pad_at(13, 8), None);
        assert_eq!(hits.pad_rect(pad), Some(Rect::new(10, 5, 4, 3)));

        hits.clear();
        assert_eq!(hits.pad_at(10, 5), None);
    }
}
