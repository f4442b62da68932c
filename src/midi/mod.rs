// First input and first output whose names contain the filter. Either side can be missing.

use crossbeam_channel::Sender;
use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

use crate::error::MidiError;

pub mod message;

pub const DEFAULT_DEVICE_FILTER: &str = "Launchpad";

pub fn find_port<S: AsRef<str>>(names: &[S], filter: &str) -> Option<usize> {
    names.iter().position(|n| n.as_ref().contains(filter))
}

pub struct MidiLink {
    _input: Option<MidiInputConnection<()>>,
    output: Option<MidiOutputConnection>,
    input_name: Option<String>,
    output_name: Option<String>,
    failures: Vec<MidiError>, // ports that matched but wouldn't open
}

impl MidiLink {
    // Raw inbound messages are forwarded to `tx` from midir's callback thread.
    // Only a missing MIDI backend is an error; a port that won't open is
    // recorded and the other direction still gets connected.
    pub fn connect(filter: &str, tx: Sender<Vec<u8>>) -> Result<Self, MidiError> {
        let mut midi_in = MidiInput::new("padgrid input")?;
        let midi_out = MidiOutput::new("padgrid output")?;

        // Ignore sysex and timing messages
        midi_in.ignore(Ignore::Sysex | Ignore::Time | Ignore::ActiveSense);

        let mut failures = Vec::new();

        let in_ports = midi_in.ports();
        let in_names: Vec<String> = in_ports
            .iter()
            .map(|p| midi_in.port_name(p).unwrap_or_default())
            .collect();
        log::debug!("MIDI inputs: {in_names:?}");

        let mut input = None;
        let mut input_name = None;
        if let Some(i) = find_port(&in_names, filter) {
            let name = in_names[i].clone();
            let connected = midi_in.connect(
                &in_ports[i],
                "padgrid-in",
                move |_stamp, bytes, _| {
                    let _ = tx.try_send(bytes.to_vec());
                },
                (),
            );
            match connected {
                Ok(conn) => {
                    log::info!("MIDI input connected: {name}");
                    input = Some(conn);
                    input_name = Some(name);
                }
                Err(e) => {
                    let err = MidiError::Connect { port: name, reason: e.to_string() };
                    log::warn!("MIDI input: {err}");
                    failures.push(err);
                }
            }
        }

        let out_ports = midi_out.ports();
        let out_names: Vec<String> = out_ports
            .iter()
            .map(|p| midi_out.port_name(p).unwrap_or_default())
            .collect();
        log::debug!("MIDI outputs: {out_names:?}");

        let mut output = None;
        let mut output_name = None;
        if let Some(i) = find_port(&out_names, filter) {
            let name = out_names[i].clone();
            match midi_out.connect(&out_ports[i], "padgrid-out") {
                Ok(conn) => {
                    log::info!("MIDI output connected: {name}");
                    output = Some(conn);
                    output_name = Some(name);
                }
                Err(e) => {
                    let err = MidiError::Connect { port: name, reason: e.to_string() };
                    log::warn!("MIDI output: {err}");
                    failures.push(err);
                }
            }
        }

        Ok(Self {
            _input: input,
            output,
            input_name,
            output_name,
            failures,
        })
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn send(&mut self, bytes: &[u8]) {
        let Some(out) = self.output.as_mut() else { return };
        match out.send(bytes) {
            Ok(()) => log::debug!("MIDI out {bytes:?}"),
            Err(e) => log::warn!("MIDI send failed: {e}"),
        }
    }

    pub fn status_text(&self) -> String {
        status_line(self.input_name.as_deref(), self.output_name.as_deref(), &self.failures)
    }
}

pub fn status_line(input: Option<&str>, output: Option<&str>, failures: &[MidiError]) -> String {
    let mut status = match (input, output) {
        (Some(input), _) => format!("MIDI: connected to {input}"),
        (None, Some(output)) => format!("MIDI: output only ({output})"),
        (None, None) if failures.is_empty() => "MIDI: no controller found".to_string(),
        (None, None) => "MIDI: not connected".to_string(),
    };
    for failure in failures {
        status.push_str(&format!(" ({failure})"));
    }
    status
}

// status line for when there is no link at all
pub fn status_for_error(err: &MidiError) -> String {
    match err {
        MidiError::Unsupported(_) => "MIDI not supported".to_string(),
        other => format!("MIDI: {other}"),
    }
}
