// Only note-on on channel 1 means anything. Velocity is ignored, so velocity 0 still presses.

use crate::model::Rgb;
use crate::shared::PadId;

pub const NOTE_ON: u8 = 144;

pub fn pad_for_message(bytes: &[u8]) -> Option<PadId> {
    match bytes {
        [NOTE_ON, note, ..] => PadId::from_note(*note),
        _ => None,
    }
}

pub fn color_message(pad: PadId, color: Rgb) -> [u8; 3] {
    [NOTE_ON, pad.note(), color.velocity()]
}
