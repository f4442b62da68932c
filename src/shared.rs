// Types shared between the tui, the middle layer and the audio/midi plumbing.
//
// Input plan (resolved by tui/input.rs and midi/, consumed by middle.rs):
//
//   Grid keys (rows 0-2):
//     q w e r t y u i     //  Trigger(0-0 .. 0-7)
//     a s d f g h j k     //  Trigger(1-0 .. 1-7)
//     z x c v b n m ,     //  Trigger(2-0 .. 2-7)
//
//   Side cluster (digits, rows 5-7):
//     7 8 9               //  Trigger(5-5 5-6 5-7)
//     4 5 6               //  Trigger(6-5 6-6 6-7)
//     1 2 3               //  Trigger(7-5 7-6 7-7)
//
//   Space                 //  StopAll
//   Enter                 //  OpenMenu on the last clicked pad
//   F5                    //  RescanMidi
//   Esc                   //  DismissOverlay, or Quit when nothing is open
//
//   Mouse: left click on a pad = Click, right click = OpenMenu
//   MIDI: note-on (status 144) on note row*16+col = Trigger

use std::fmt;
use std::str::FromStr;

use crate::model::{Overlay, Rgb, StatusIndicator, Thumbnail};
use std::sync::Arc;

pub const GRID_SIZE: usize = 8;
pub const NUM_PADS: usize = GRID_SIZE * GRID_SIZE;

/// One cell of the grid, always inside `[0, GRID_SIZE)` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PadId {
    row: u8,
    col: u8,
}

impl PadId {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    pub fn row(self) -> usize { self.row as usize }
    pub fn col(self) -> usize { self.col as usize }

    // flat index into fixed-size pad arrays
    pub fn index(self) -> usize {
        self.row() * GRID_SIZE + self.col()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index / GRID_SIZE, index % GRID_SIZE)
    }

    /// Launchpad-style note layout: 16 notes per row, only the first 8 are pads.
    pub fn from_note(note: u8) -> Option<Self> {
        Self::new((note / 16) as usize, (note % 16) as usize)
    }

    pub fn note(self) -> u8 {
        self.row * 16 + self.col
    }

    pub fn all() -> impl Iterator<Item = PadId> {
        (0..NUM_PADS).filter_map(PadId::from_index)
    }
}

impl fmt::Display for PadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePadIdError(pub String);

impl fmt::Display for ParsePadIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a pad id: {:?}", self.0)
    }
}

impl std::error::Error for ParsePadIdError {}

impl FromStr for PadId {
    type Err = ParsePadIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePadIdError(s.to_string());
        let (row, col) = s.split_once('-').ok_or_else(err)?;
        let row: usize = row.parse().map_err(|_| err())?;
        let col: usize = col.parse().map_err(|_| err())?;
        PadId::new(row, col).ok_or_else(err)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // pads
    Click(PadId), // pointer: selects and triggers
    Trigger(PadId), // keyboard + midi
    StopAll,

    // context menu
    OpenMenu { pad: PadId, x: u16, y: u16 },

    // navigation inside whatever overlay is open
    OverlayUp,
    OverlayDown,
    OverlayActivate,
    OverlayPick(usize), // clicked row of a menu / file list, or swatch of the color picker
    DismissOverlay,

    // color picker text field + buttons
    PickerChar(char),
    PickerBackspace,
    PickerApply,
    PickerReset,

    // handled by main, never reaches the middle layer
    RescanMidi,
    Quit,
}

// what the tui needs for one pad, computed fresh each frame
#[derive(Clone, Debug)]
pub struct PadView {
    pub id: PadId,
    pub fill: Rgb,
    pub loaded: bool,
    pub selected: bool,
    pub status: StatusIndicator,
    pub image: Option<Arc<Thumbnail>>,
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub pads: Vec<PadView>, // NUM_PADS entries, row-major
    pub selected: Option<PadId>,
    pub midi_status: String,
    pub message: Option<String>, // latest pad-scoped note or error
    pub playing_count: usize,
    pub overlay: Overlay,
}
