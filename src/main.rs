mod shared;
mod tui;
mod audio_api;
mod audio;
mod loader;
mod middle;
mod model;
mod midi;
mod config;
mod logging;
mod error;

use std::time::{Duration, Instant};
use clap::Parser;
use crossbeam_channel::Sender;
use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use config::{Args, Settings};
use loader::LoadOutcome;
use middle::{Middle, Output};
use midi::MidiLink;
use shared::InputEvent;

const FALLBACK_SAMPLE_RATE: u32 = 44100;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::from_args(Args::parse())?;
    logging::setup_logger(&settings.log_file)?;
    log::info!("starting with {settings:?}");

    terminal::enable_raw_mode()?;
    // Enable keyboard enhancement for real press/release detection.
    // Falls back gracefully if the terminal doesn't support it.
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        ),
        crossterm::event::EnableMouseCapture
    );
    let _guard = RawModeGuard; // auto drops when out of scope

    let mut middle = Middle::new(&settings);

    // no output device: keep going without sound
    let audio = match audio::start_audio() {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("audio unavailable: {e:#}");
            middle.set_audio_available(false);
            middle.set_message(format!("No audio output ({e}), running silent"));
            None
        }
    };
    let sample_rate = audio.as_ref().map_or(FALLBACK_SAMPLE_RATE, |a| a.sample_rate());

    let (load_tx, load_rx) = crossbeam_channel::unbounded::<LoadOutcome>();
    let (midi_tx, midi_rx) = crossbeam_channel::bounded::<Vec<u8>>(256);
    let mut midi_link = connect_midi(&settings, &midi_tx, &mut middle);

    if settings.animation {
        middle.start_animation(Instant::now());
    }

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let tick_rate = Duration::from_millis(16); // ~60fps
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let now = Instant::now();
        let ds = middle.display_state(now);
        tui_state.overlay = (&ds.overlay).into();
        tui_state.selected = ds.selected;

        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds, &mut tui_state.hits);
        })?;

        let mut outputs = Vec::new();
        for event in tui::input::poll_input(tick_rate, &tui_state)? {
            match event {
                InputEvent::Quit => {
                    drop(term);
                    drop(audio);
                    return Ok(());
                }
                InputEvent::RescanMidi => {
                    // ports are exclusive on some backends, release before reconnecting
                    drop(midi_link.take());
                    midi_link = connect_midi(&settings, &midi_tx, &mut middle);
                }
                event => outputs.extend(middle.handle_input(event, Instant::now())),
            }
        }

        while let Ok(bytes) = midi_rx.try_recv() {
            outputs.extend(middle.handle_midi(&bytes, Instant::now()));
        }
        if let Some(audio) = &audio {
            while let Some(event) = audio.poll_event() {
                middle.on_audio_event(event);
            }
            audio.release_retired();
        }
        while let Ok(outcome) = load_rx.try_recv() {
            middle.on_load_complete(outcome);
        }

        dispatch(outputs, audio.as_ref(), &mut midi_link, sample_rate, &load_tx);
        middle.tick(Instant::now());
    }
}

fn connect_midi(settings: &Settings, tx: &Sender<Vec<u8>>, middle: &mut Middle) -> Option<MidiLink> {
    let Some(filter) = &settings.midi_device else {
        middle.set_midi_status("MIDI disabled", false);
        return None;
    };
    match MidiLink::connect(filter, tx.clone()) {
        Ok(link) => {
            middle.set_midi_status(link.status_text(), link.has_output());
            Some(link)
        }
        Err(e) => {
            log::warn!("MIDI init failed: {e}");
            middle.set_midi_status(midi::status_for_error(&e), false);
            None
        }
    }
}

fn dispatch(
    outputs: Vec<Output>,
    audio: Option<&audio::AudioHandle>,
    midi: &mut Option<MidiLink>,
    sample_rate: u32,
    load_tx: &Sender<LoadOutcome>,
) {
    for output in outputs {
        match output {
            Output::Audio(cmd) => {
                if let Some(audio) = audio {
                    audio.send(cmd);
                }
            }
            Output::Midi(bytes) => {
                if let Some(link) = midi.as_mut() {
                    link.send(&bytes);
                }
            }
            Output::Load(request) => loader::spawn_load(request, sample_rate, load_tx.clone()),
        }
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::DisableMouseCapture,
            crossterm::event::PopKeyboardEnhancementFlags
        );
        let _ = terminal::disable_raw_mode();
    }
}
