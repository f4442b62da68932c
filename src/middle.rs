// The middle layer owns every piece of pad state. The tui hands it semantic
// InputEvents, midi hands it raw bytes, and it answers with Outputs for main to
// route (audio thread, midi port, loader threads). Rendering only ever sees the
// DisplayState snapshot, so nothing in here draws.

use std::path::PathBuf;
use std::time::Instant;

use crate::audio::next_voice_id;
use crate::audio_api::{AudioCommand, AudioEvent, VoiceId};
use crate::config::{Settings, Timing};
use crate::loader::{LoadKind, LoadOutcome, LoadRequest, Loaded};
use crate::midi::message;
use crate::model::{
    ActiveVoices, ColorPicker, ContextMenu, FilePicker, Grid, ImageStore, MenuAction, Overlay, Rgb,
    Spiral, StatusIndicator,
};
use crate::shared::{DisplayState, InputEvent, PadId, PadView, NUM_PADS};

#[derive(Clone, Debug)]
pub enum Output {
    Audio(AudioCommand),
    Midi([u8; 3]),
    Load(LoadRequest),
}

pub struct Middle {
    grid: Grid,
    voices: ActiveVoices,
    images: ImageStore,
    flash_until: [Option<Instant>; NUM_PADS], // latest trigger wins
    spiral: Option<Spiral>,
    overlay: Overlay,
    selected: Option<PadId>,
    midi_status: String,
    midi_out_connected: bool,
    audio_available: bool, // false when there is no output device; pads only flash
    message: Option<String>,
    timing: Timing,
    samples_dir: PathBuf,
    images_dir: PathBuf,
}

impl Middle {
    pub fn new(settings: &Settings) -> Self {
        Self {
            grid: Grid::default(),
            voices: ActiveVoices::default(),
            images: ImageStore::default(),
            flash_until: [None; NUM_PADS],
            spiral: None,
            overlay: Overlay::None,
            selected: None,
            midi_status: "MIDI: off".to_string(),
            midi_out_connected: false,
            audio_available: true,
            message: None,
            timing: settings.timing.clone(),
            samples_dir: settings.samples_dir.clone(),
            images_dir: settings.images_dir.clone(),
        }
    }

    #[cfg(test)]
    pub fn grid(&self) -> &Grid { &self.grid }
    #[cfg(test)]
    pub fn voices(&self) -> &ActiveVoices { &self.voices }
    #[cfg(test)]
    pub fn images(&self) -> &ImageStore { &self.images }
    #[cfg(test)]
    pub fn overlay(&self) -> &Overlay { &self.overlay }
    #[cfg(test)]
    pub fn message(&self) -> Option<&str> { self.message.as_deref() }

    pub fn start_animation(&mut self, now: Instant) {
        self.spiral = Some(Spiral::new(now, self.timing.spiral_step, self.timing.spiral_hold));
    }

    pub fn set_midi_status(&mut self, status: impl Into<String>, output_connected: bool) {
        self.midi_status = status.into();
        self.midi_out_connected = output_connected;
    }

    pub fn set_audio_available(&mut self, available: bool) {
        self.audio_available = available;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    // ── input ─────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Vec<Output> {
        match event {
            InputEvent::Click(pad) => {
                self.selected = Some(pad);
                self.trigger(pad, now)
            }
            InputEvent::Trigger(pad) => self.trigger(pad, now),
            InputEvent::StopAll => self.stop_all(),
            InputEvent::OpenMenu { pad, x, y } => {
                self.open_menu(pad, (x, y));
                vec![]
            }
            InputEvent::OverlayUp => {
                match &mut self.overlay {
                    Overlay::Menu(menu) => menu.move_up(),
                    Overlay::FilePicker(picker) => picker.move_up(),
                    _ => {}
                }
                vec![]
            }
            InputEvent::OverlayDown => {
                match &mut self.overlay {
                    Overlay::Menu(menu) => menu.move_down(),
                    Overlay::FilePicker(picker) => picker.move_down(),
                    _ => {}
                }
                vec![]
            }
            InputEvent::OverlayActivate => match &self.overlay {
                Overlay::Menu(menu) => {
                    let (pad, action) = (menu.pad, menu.selected_action());
                    self.activate_menu(pad, action)
                }
                Overlay::FilePicker(picker) => {
                    let index = picker.selected;
                    self.pick_file(index)
                }
                Overlay::ColorPicker(_) => self.apply_color(),
                Overlay::None => vec![],
            },
            InputEvent::OverlayPick(index) => match &mut self.overlay {
                Overlay::Menu(menu) => {
                    let (pad, action) = (menu.pad, menu.action_at(index));
                    self.activate_menu(pad, action)
                }
                Overlay::FilePicker(_) => self.pick_file(index),
                Overlay::ColorPicker(picker) => {
                    picker.pick_swatch(index);
                    vec![]
                }
                Overlay::None => vec![],
            },
            InputEvent::DismissOverlay => {
                self.overlay = Overlay::None;
                vec![]
            }
            InputEvent::PickerChar(c) => {
                if let Overlay::ColorPicker(picker) = &mut self.overlay {
                    picker.push_char(c);
                }
                vec![]
            }
            InputEvent::PickerBackspace => {
                if let Overlay::ColorPicker(picker) = &mut self.overlay {
                    picker.backspace();
                }
                vec![]
            }
            InputEvent::PickerApply => self.apply_color(),
            InputEvent::PickerReset => self.reset_color(),
            // main deals with these
            InputEvent::RescanMidi | InputEvent::Quit => vec![],
        }
    }

    pub fn handle_midi(&mut self, bytes: &[u8], now: Instant) -> Vec<Output> {
        match message::pad_for_message(bytes) {
            Some(pad) => {
                log::trace!("MIDI {bytes:?} -> pad {pad}");
                self.trigger(pad, now)
            }
            None => vec![],
        }
    }

    pub fn on_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::VoiceEnded { pad, voice } => self.on_voice_ended(pad, voice),
        }
    }

    // ── playback ──────────────────────────────────────────────────

    /// Play-or-stop, plus a flash whether or not there is anything to play.
    pub fn trigger(&mut self, pad: PadId, now: Instant) -> Vec<Output> {
        let mut out = Vec::new();
        if self.audio_available && self.grid.get(pad).is_loaded() {
            if self.grid.get(pad).playing {
                out.extend(self.stop(pad));
            } else {
                out.extend(self.start(pad));
            }
        }
        self.flash_until[pad.index()] = Some(now + self.timing.flash);
        out
    }

    pub fn start(&mut self, pad: PadId) -> Vec<Output> {
        if !self.audio_available {
            return vec![];
        }
        let Some(sample) = self.grid.sample_buffer(pad).cloned() else {
            return vec![];
        };
        let mut out = Vec::new();
        if self.grid.get(pad).playing {
            out.extend(self.stop(pad));
        }

        let voice = next_voice_id();
        self.voices.insert(pad, voice);
        let state = self.grid.get_mut(pad);
        state.playing = true;
        state.status = StatusIndicator::Playing;
        out.push(Output::Audio(AudioCommand::Play { pad, voice, sample }));
        out
    }

    pub fn stop(&mut self, pad: PadId) -> Vec<Output> {
        let mut out = Vec::new();
        if let Some(voice) = self.voices.remove(pad) {
            out.push(Output::Audio(AudioCommand::Stop { pad, voice }));
        }
        let state = self.grid.get_mut(pad);
        state.playing = false;
        state.status = StatusIndicator::Stopped;
        out
    }

    pub fn stop_all(&mut self) -> Vec<Output> {
        self.voices
            .pads()
            .into_iter()
            .flat_map(|pad| self.stop(pad))
            .collect()
    }

    // a finished voice only counts if it is still the pad's current one
    pub fn on_voice_ended(&mut self, pad: PadId, voice: VoiceId) {
        if self.voices.remove_if_current(pad, voice) {
            let state = self.grid.get_mut(pad);
            state.playing = false;
            state.status = StatusIndicator::Cleared;
        }
    }

    // ── configuration ─────────────────────────────────────────────

    pub fn open_menu(&mut self, pad: PadId, anchor: (u16, u16)) {
        self.overlay = Overlay::Menu(ContextMenu::for_pad(pad, self.grid.get(pad), anchor));
    }

    fn activate_menu(&mut self, pad: PadId, action: Option<MenuAction>) -> Vec<Output> {
        self.overlay = Overlay::None;
        match action {
            Some(MenuAction::LoadAudio) => {
                self.open_file_picker(pad, LoadKind::Sample);
                vec![]
            }
            Some(MenuAction::ChangeColor) => {
                self.overlay = Overlay::ColorPicker(ColorPicker::new(pad, self.grid.get(pad).color));
                vec![]
            }
            Some(MenuAction::ChangeImage) => {
                self.open_file_picker(pad, LoadKind::Image);
                vec![]
            }
            Some(MenuAction::RemoveAudio) => self.remove_audio(pad),
            Some(MenuAction::RemoveImage) => {
                self.remove_image(pad);
                vec![]
            }
            Some(MenuAction::Info) | None => vec![],
        }
    }

    fn open_file_picker(&mut self, pad: PadId, kind: LoadKind) {
        let dir = match kind {
            LoadKind::Sample => &self.samples_dir,
            LoadKind::Image => &self.images_dir,
        };
        match FilePicker::open(pad, kind, dir) {
            Ok(picker) => self.overlay = Overlay::FilePicker(picker),
            Err(e) => {
                log::warn!("cannot list {}: {e}", dir.display());
                self.message = Some(format!("cannot list {}: {e}", dir.display()));
            }
        }
    }

    fn pick_file(&mut self, index: usize) -> Vec<Output> {
        let Overlay::FilePicker(picker) = &self.overlay else {
            return vec![];
        };
        let Some(path) = picker.path_at(index) else {
            return vec![];
        };
        let request = LoadRequest {
            pad: picker.pad,
            kind: picker.kind,
            path: path.to_path_buf(),
        };
        self.message = Some(format!("pad {}: loading {}", request.pad, request.path.display()));
        self.overlay = Overlay::None;
        vec![Output::Load(request)]
    }

    fn apply_color(&mut self) -> Vec<Output> {
        let Overlay::ColorPicker(picker) = &mut self.overlay else {
            return vec![];
        };
        match picker.preview() {
            Some(color) => {
                let pad = picker.pad;
                self.overlay = Overlay::None;
                self.set_pad_color(pad, color)
            }
            None => {
                picker.error = Some(format!("not a color: {:?}", picker.input));
                vec![]
            }
        }
    }

    fn reset_color(&mut self) -> Vec<Output> {
        let Overlay::ColorPicker(picker) = &self.overlay else {
            return vec![];
        };
        let pad = picker.pad;
        self.overlay = Overlay::None;
        self.set_pad_color(pad, Rgb::DEFAULT_PAD)
    }

    /// Commits a color and mirrors it to the controller when one is listening.
    pub fn set_pad_color(&mut self, pad: PadId, color: Rgb) -> Vec<Output> {
        self.grid.set_color(pad, color);
        if self.midi_out_connected {
            vec![Output::Midi(message::color_message(pad, color))]
        } else {
            vec![]
        }
    }

    pub fn remove_audio(&mut self, pad: PadId) -> Vec<Output> {
        let mut out = Vec::new();
        if self.grid.get(pad).playing {
            out.extend(self.stop(pad));
        }
        self.grid.take_sample(pad);
        self.grid.get_mut(pad).status = StatusIndicator::Cleared;
        out
    }

    pub fn remove_image(&mut self, pad: PadId) {
        if let Some(handle) = self.grid.take_image(pad) {
            self.images.revoke(handle);
            log::debug!("pad {pad}: image removed, {} still live", self.images.live_count());
        }
    }

    // the pad is only touched once the file decoded; failures leave it as it was
    pub fn on_load_complete(&mut self, outcome: LoadOutcome) {
        let LoadOutcome { request, result } = outcome;
        let pad = request.pad;
        match result {
            Ok(Loaded::Sample(sample)) => {
                log::info!("pad {pad}: loaded {} ({:.2}s)", sample.name, sample.duration_secs);
                self.message = Some(format!("pad {pad}: loaded {}", sample.name));
                self.grid.set_sample(pad, sample);
            }
            Ok(Loaded::Image { name, thumbnail }) => {
                log::info!("pad {pad}: image {name}");
                let handle = self.images.create(thumbnail);
                if let Some(old) = self.grid.set_image(pad, handle) {
                    self.images.revoke(old);
                }
                self.message = Some(format!("pad {pad}: image {name}"));
            }
            Err(e) => {
                log::warn!("pad {pad}: failed to load {}: {e}", request.path.display());
                self.message = Some(format!("pad {pad}: {e}"));
            }
        }
    }

    // ── frame ─────────────────────────────────────────────────────

    pub fn tick(&mut self, now: Instant) {
        for slot in self.flash_until.iter_mut() {
            if slot.is_some_and(|until| now >= until) {
                *slot = None;
            }
        }
        if self.spiral.as_ref().is_some_and(|s| s.is_finished(now)) {
            self.spiral = None;
        }
    }

    pub fn is_flashing(&self, pad: PadId, now: Instant) -> bool {
        self.flash_until[pad.index()].is_some_and(|until| now < until)
    }

    pub fn display_state(&self, now: Instant) -> DisplayState {
        let pads = self
            .grid
            .iter()
            .map(|(id, pad)| {
                let fill = if self.is_flashing(id, now) {
                    Rgb::FLASH
                } else if self.spiral.as_ref().is_some_and(|s| s.is_lit(id, now)) {
                    Rgb::ACCENT
                } else {
                    pad.color
                };
                PadView {
                    id,
                    fill,
                    loaded: pad.is_loaded(),
                    selected: self.selected == Some(id),
                    status: pad.status,
                    image: pad.image.as_ref().and_then(|h| self.images.get(h)).cloned(),
                }
            })
            .collect();

        DisplayState {
            pads,
            selected: self.selected,
            midi_status: self.midi_status.clone(),
            message: self.message.clone(),
            playing_count: self.voices.len(),
            overlay: self.overlay.clone(),
        }
    }
}
