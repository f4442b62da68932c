// Context menu for one pad, rebuilt from the pad every time it opens.
// The info row is skipped by the arrows and does nothing when picked.

use crate::shared::PadId;

use super::pad::Pad;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Info,
    LoadAudio,
    ChangeColor,
    ChangeImage,
    RemoveAudio,
    RemoveImage,
}

impl MenuAction {
    pub fn is_actionable(self) -> bool {
        self != MenuAction::Info
    }

    pub fn is_destructive(self) -> bool {
        matches!(self, MenuAction::RemoveAudio | MenuAction::RemoveImage)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

impl MenuItem {
    fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self { label: label.into(), action }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
    pub pad: PadId,
    pub anchor: (u16, u16), // where the click landed, in terminal cells
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl ContextMenu {
    pub fn for_pad(id: PadId, pad: &Pad, anchor: (u16, u16)) -> Self {
        let mut items = Vec::new();
        if let Some(sample) = &pad.sample {
            items.push(MenuItem::new(sample.summary(), MenuAction::Info));
        }
        items.push(MenuItem::new("Load audio", MenuAction::LoadAudio));
        items.push(MenuItem::new("Change color", MenuAction::ChangeColor));
        items.push(MenuItem::new("Change image", MenuAction::ChangeImage));
        if pad.is_loaded() {
            items.push(MenuItem::new("Remove audio", MenuAction::RemoveAudio));
        }
        if pad.has_image() {
            items.push(MenuItem::new("Remove image", MenuAction::RemoveImage));
        }

        let selected = items
            .iter()
            .position(|item| item.action.is_actionable())
            .unwrap_or(0);
        Self { pad: id, anchor, items, selected }
    }

    pub fn move_down(&mut self) {
        let n = self.items.len();
        for step in 1..=n {
            let i = (self.selected + step) % n;
            if self.items[i].action.is_actionable() {
                self.selected = i;
                return;
            }
        }
    }

    pub fn move_up(&mut self) {
        let n = self.items.len();
        for step in 1..=n {
            let i = (self.selected + n - step) % n;
            if self.items[i].action.is_actionable() {
                self.selected = i;
                return;
            }
        }
    }

    pub fn action_at(&self, index: usize) -> Option<MenuAction> {
        self.items
            .get(index)
            .map(|item| item.action)
            .filter(|action| action.is_actionable())
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.action_at(self.selected)
    }

    // border + one cell of padding each side
    pub fn size(&self) -> (u16, u16) {
        let widest = self
            .items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0);
        (widest as u16 + 4, self.items.len() as u16 + 2)
    }
}

// shift left/up only on overflow, never closer than `margin` to the top/left edge
pub fn place_menu(anchor: (u16, u16), size: (u16, u16), viewport: (u16, u16), margin: u16) -> (u16, u16) {
    let axis = |pos: u16, len: u16, limit: u16| {
        let mut p = pos;
        if p.saturating_add(len) > limit {
            p = limit.saturating_sub(len).saturating_sub(margin);
        }
        p.max(margin)
    };
    (
        axis(anchor.0, size.0, viewport.0),
        axis(anchor.1, size.1, viewport.1),
    )
}
