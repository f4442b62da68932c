use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::mode::{OverlayKind, PickerButton, TuiState};
use crate::shared::{InputEvent, PadId};

// poll for input from the terminal and resolve it into semantic input events
// based on what is on screen (overlay kind and last frame's hit map)
pub fn poll_input(timeout: Duration, ts: &TuiState) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    match event::read()? {
        Event::Key(key) => Ok(handle_key(key, ts)),
        Event::Mouse(mouse) => Ok(handle_mouse(mouse, ts)),
        _ => Ok(vec![]),
    }
}

pub fn handle_key(key: KeyEvent, ts: &TuiState) -> Vec<InputEvent> {
    // key repeat counts as another press, release is ignored
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![InputEvent::Quit];
    }

    match ts.overlay {
        OverlayKind::None => grid_key(key.code, ts, true),
        // the menu isn't modal: arrows/enter/esc drive it, pad keys still play
        OverlayKind::Menu => match key.code {
            KeyCode::Up => vec![InputEvent::OverlayUp],
            KeyCode::Down => vec![InputEvent::OverlayDown],
            KeyCode::Enter => vec![InputEvent::OverlayActivate],
            KeyCode::Esc => vec![InputEvent::DismissOverlay],
            code => grid_key(code, ts, false),
        },
        OverlayKind::FilePicker => match key.code {
            KeyCode::Up => vec![InputEvent::OverlayUp],
            KeyCode::Down => vec![InputEvent::OverlayDown],
            KeyCode::Enter => vec![InputEvent::OverlayActivate],
            KeyCode::Esc => vec![InputEvent::DismissOverlay],
            _ => vec![],
        },
        OverlayKind::ColorPicker => match key.code {
            KeyCode::Enter => vec![InputEvent::PickerApply],
            KeyCode::Esc => vec![InputEvent::DismissOverlay],
            KeyCode::Backspace => vec![InputEvent::PickerBackspace],
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![InputEvent::PickerReset]
            }
            KeyCode::Char(c) => vec![InputEvent::PickerChar(c)],
            _ => vec![],
        },
    }
}

fn grid_key(code: KeyCode, ts: &TuiState, esc_quits: bool) -> Vec<InputEvent> {
    match code {
        KeyCode::Esc if esc_quits => vec![InputEvent::Quit],
        KeyCode::Char(' ') => vec![InputEvent::StopAll],
        KeyCode::Enter => open_menu_for_selected(ts),
        KeyCode::F(5) => vec![InputEvent::RescanMidi],
        KeyCode::Char(c) => match key_to_pad(c) {
            Some(pad) => vec![InputEvent::Trigger(pad)],
            None => vec![], // unmapped key
        },
        _ => vec![],
    }
}

// keyboard equivalent of a right click: anchor the menu on the pad itself
fn open_menu_for_selected(ts: &TuiState) -> Vec<InputEvent> {
    let Some(pad) = ts.selected else { return vec![] };
    let (x, y) = ts
        .hits
        .pad_rect(pad)
        .map(|r| (r.x + r.width / 2, r.y + r.height / 2))
        .unwrap_or((0, 0));
    vec![InputEvent::OpenMenu { pad, x, y }]
}

pub fn handle_mouse(mouse: MouseEvent, ts: &TuiState) -> Vec<InputEvent> {
    let (x, y) = (mouse.column, mouse.row);
    let hits = &ts.hits;

    match (ts.overlay, mouse.kind) {
        (OverlayKind::None, MouseEventKind::Down(MouseButton::Left)) => {
            hits.pad_at(x, y).map(InputEvent::Click).into_iter().collect()
        }
        (OverlayKind::None | OverlayKind::Menu, MouseEventKind::Down(MouseButton::Right)) => {
            match hits.pad_at(x, y) {
                Some(pad) => vec![InputEvent::OpenMenu { pad, x, y }],
                None => vec![InputEvent::DismissOverlay],
            }
        }

        // any click outside the menu closes it, and still reaches the pad underneath
        (OverlayKind::Menu, MouseEventKind::Down(MouseButton::Left)) => {
            if hits.in_overlay(x, y) {
                hits.row_at(x, y).map(InputEvent::OverlayPick).into_iter().collect()
            } else {
                let mut events = vec![InputEvent::DismissOverlay];
                events.extend(hits.pad_at(x, y).map(InputEvent::Click));
                events
            }
        }

        (OverlayKind::FilePicker, MouseEventKind::Down(MouseButton::Left)) => {
            if hits.in_overlay(x, y) {
                hits.row_at(x, y).map(InputEvent::OverlayPick).into_iter().collect()
            } else {
                vec![InputEvent::DismissOverlay]
            }
        }
        (OverlayKind::FilePicker, MouseEventKind::ScrollUp) => vec![InputEvent::OverlayUp],
        (OverlayKind::FilePicker, MouseEventKind::ScrollDown) => vec![InputEvent::OverlayDown],

        // color picker is modal
        (OverlayKind::ColorPicker, MouseEventKind::Down(MouseButton::Left)) => {
            if let Some(button) = hits.button_at(x, y) {
                return vec![match button {
                    PickerButton::Apply => InputEvent::PickerApply,
                    PickerButton::Reset => InputEvent::PickerReset,
                    PickerButton::Cancel => InputEvent::DismissOverlay,
                }];
            }
            hits.row_at(x, y).map(InputEvent::OverlayPick).into_iter().collect()
        }

        _ => vec![],
    }
}

/// Fixed keyboard layout: three letter rows for the top of the grid and the
/// digit cluster for the bottom-right corner. Case-insensitive.
pub fn key_to_pad(c: char) -> Option<PadId> {
    let (row, col) = match c.to_ascii_lowercase() {
        'q' => (0, 0), 'w' => (0, 1), 'e' => (0, 2), 'r' => (0, 3),
        't' => (0, 4), 'y' => (0, 5), 'u' => (0, 6), 'i' => (0, 7),

        'a' => (1, 0), 's' => (1, 1), 'd' => (1, 2), 'f' => (1, 3),
        'g' => (1, 4), 'h' => (1, 5), 'j' => (1, 6), 'k' => (1, 7),

        'z' => (2, 0), 'x' => (2, 1), 'c' => (2, 2), 'v' => (2, 3),
        'b' => (2, 4), 'n' => (2, 5), 'm' => (2, 6), ',' => (2, 7),

        '1' => (7, 5), '2' => (7, 6), '3' => (7, 7),
        '4' => (6, 5), '5' => (6, 6), '6' => (6, 7),
        '7' => (5, 5), '8' => (5, 6), '9' => (5, 7),
        _ => return None,
    };
    PadId::new(row, col)
}

// reverse lookup, for printing key hints on the pads
pub fn key_for_pad(pad: PadId) -> Option<char> {
    "qwertyuiasdfghjkzxcvbnm,123456789"
        .chars()
        .find(|&c| key_to_pad(c) == Some(pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::mode::HitMap;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyEventKind::Press)
    }

    fn click(button: MouseButton, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(button),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn pad(row: usize, col: usize) -> PadId {
        PadId::new(row, col).unwrap()
    }

    fn state_with_pad() -> TuiState {
        let mut hits = HitMap::default();
        hits.pads.push((Rect::new(0, 0, 10, 4), pad(0, 0)));
        TuiState { hits, ..TuiState::default() }
    }

    #[test]
    fn letter_rows_cover_top_three_rows() {
        for (i, c) in "qwertyui".chars().enumerate() {
            assert_eq!(key_to_pad(c), Some(pad(0, i)));
        }
        for (i, c) in "asdfghjk".chars().enumerate() {
            assert_eq!(key_to_pad(c), Some(pad(1, i)));
        }
        for (i, c) in "zxcvbnm,".chars().enumerate() {
            assert_eq!(key_to_pad(c), Some(pad(2, i)));
        }
    }

    #[test]
    fn digits_form_the_side_cluster() {
        assert_eq!(key_to_pad('1'), Some(pad(7, 5)));
        assert_eq!(key_to_pad('3'), Some(pad(7, 7)));
        assert_eq!(key_to_pad('5'), Some(pad(6, 6)));
        assert_eq!(key_to_pad('9'), Some(pad(5, 7)));
        assert_eq!(key_to_pad('0'), None);
    }

    #[test]
    fn lookup_is_case_insensitive_and_misses_quietly() {
        assert_eq!(key_to_pad('Q'), key_to_pad('q'));
        assert_eq!(key_to_pad('p'), None);
        assert!(handle_key(press(KeyCode::Char('p')), &TuiState::default()).is_empty());
    }

    #[test]
    fn key_hints_match_the_table() {
        assert_eq!(key_for_pad(pad(2, 7)), Some(','));
        assert_eq!(key_for_pad(pad(6, 5)), Some('4'));
        assert_eq!(key_for_pad(pad(4, 4)), None);
    }

    #[test]
    fn space_stops_all_and_esc_quits() {
        let ts = TuiState::default();
        assert_eq!(handle_key(press(KeyCode::Char(' ')), &ts), vec![InputEvent::StopAll]);
        assert_eq!(handle_key(press(KeyCode::Esc), &ts), vec![InputEvent::Quit]);
        assert_eq!(handle_key(press(KeyCode::Char('w')), &ts), vec![InputEvent::Trigger(pad(0, 1))]);
    }

    #[test]
    fn repeat_triggers_and_release_does_nothing() {
        let ts = TuiState::default();
        let q = KeyCode::Char('q');
        assert_eq!(handle_key(key(q, KeyEventKind::Repeat), &ts), vec![InputEvent::Trigger(pad(0, 0))]);
        assert!(handle_key(key(q, KeyEventKind::Release), &ts).is_empty());
        assert!(handle_key(key(KeyCode::Char(' '), KeyEventKind::Release), &ts).is_empty());
    }

    #[test]
    fn pad_keys_still_play_with_menu_open() {
        let ts = TuiState { overlay: OverlayKind::Menu, ..TuiState::default() };
        assert_eq!(handle_key(press(KeyCode::Char('a')), &ts), vec![InputEvent::Trigger(pad(1, 0))]);
        assert_eq!(handle_key(press(KeyCode::Esc), &ts), vec![InputEvent::DismissOverlay]);
    }

    #[test]
    fn color_picker_captures_typing() {
        let ts = TuiState { overlay: OverlayKind::ColorPicker, ..TuiState::default() };
        assert_eq!(handle_key(press(KeyCode::Char('a')), &ts), vec![InputEvent::PickerChar('a')]);
        assert_eq!(handle_key(press(KeyCode::Enter), &ts), vec![InputEvent::PickerApply]);
    }

    #[test]
    fn enter_opens_menu_on_selected_pad() {
        let mut ts = state_with_pad();
        assert!(handle_key(press(KeyCode::Enter), &ts).is_empty());
        ts.selected = Some(pad(0, 0));
        assert_eq!(
            handle_key(press(KeyCode::Enter), &ts),
            vec![InputEvent::OpenMenu { pad: pad(0, 0), x: 5, y: 2 }]
        );
    }

    #[test]
    fn left_and_right_clicks_on_pads() {
        let ts = state_with_pad();
        assert_eq!(handle_mouse(click(MouseButton::Left, 3, 1), &ts), vec![InputEvent::Click(pad(0, 0))]);
        assert_eq!(
            handle_mouse(click(MouseButton::Right, 3, 1), &ts),
            vec![InputEvent::OpenMenu { pad: pad(0, 0), x: 3, y: 1 }]
        );
        assert!(handle_mouse(click(MouseButton::Left, 30, 30), &ts).is_empty());
    }

    #[test]
    fn clicking_outside_menu_dismisses_and_hits_pad() {
        let mut ts = state_with_pad();
        ts.overlay = OverlayKind::Menu;
        ts.hits.overlay = Some(Rect::new(20, 0, 10, 5));
        ts.hits.rows.push((Rect::new(21, 1, 8, 1), 0));

        assert_eq!(
            handle_mouse(click(MouseButton::Left, 3, 1), &ts),
            vec![InputEvent::DismissOverlay, InputEvent::Click(pad(0, 0))]
        );
        assert_eq!(handle_mouse(click(MouseButton::Left, 22, 1), &ts), vec![InputEvent::OverlayPick(0)]);
        // border of the menu: inside, but not a row
        assert!(handle_mouse(click(MouseButton::Left, 20, 0), &ts).is_empty());
    }
}
