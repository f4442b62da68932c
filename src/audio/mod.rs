use std::sync::Arc;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio_api::{AudioCommand, AudioEvent};

mod engine;
mod frame;
mod sample_buffer;
mod voice;
mod voice_id;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;
pub use voice_id::{next_voice_id, VoiceId};

use engine::Engine;

// largest callback we expect; bigger ones grow the scratch buffer once
const SCRATCH_FRAMES: usize = 4096;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    events_rx: Receiver<AudioEvent>,
    retired_rx: Receiver<Arc<SampleBuffer>>,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

impl AudioHandle {
    pub fn send(&self, cmd: AudioCommand) {
        if self.tx.try_send(cmd).is_err() {
            log::warn!("audio command queue full, dropping command");
        }
    }

    pub fn poll_event(&self) -> Option<AudioEvent> {
        self.events_rx.try_recv().ok()
    }

    // drop samples the engine is done with, here rather than in the callback
    pub fn release_retired(&self) {
        for sample in self.retired_rx.try_iter() {
            drop(sample);
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);
    let (events_tx, events_rx) = crossbeam_channel::bounded::<AudioEvent>(256);
    let (retired_tx, retired_rx) = crossbeam_channel::bounded::<Arc<SampleBuffer>>(256);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let config = device.default_output_config().context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;

    log::info!("audio output: {} ch @ {} Hz", channels, sample_rate);

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream = build_output_stream_f32(&device, &config.into(), rx, events_tx, retired_tx, channels)?;
            output_stream.play().context("failed to play output stream")?;

            Ok(AudioHandle {
                tx,
                events_rx,
                retired_rx,
                sample_rate,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

// ── Output stream ─────────────────────────────────────────────────

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    events_tx: Sender<AudioEvent>,
    retired_tx: Sender<Arc<SampleBuffer>>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new();
    engine.set_events_tx(events_tx);
    engine.set_retired_tx(retired_tx);
    let mut scratch = vec![StereoFrame::zero(); SCRATCH_FRAMES];

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels.max(1);
            if scratch.len() < n_frames {
                scratch.resize(n_frames, StereoFrame::zero());
            }
            let frames = &mut scratch[..n_frames];
            engine.render_block(frames);
            write_interleaved(frames, data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// stereo frames -> whatever channel layout the device wants
fn write_interleaved(frames: &[StereoFrame], data: &mut [f32], channels: usize) {
    match channels {
        0 => {}
        1 => {
            for (out, f) in data.iter_mut().zip(frames) {
                *out = f.mono();
            }
        }
        _ => {
            for (out, f) in data.chunks_exact_mut(channels).zip(frames) {
                out[0] = f.left;
                out[1] = f.right;
                for extra in &mut out[2..] {
                    *extra = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_for_mono_stereo_and_surround() {
        let frames = [StereoFrame { left: 0.2, right: 0.4 }, StereoFrame { left: -1.0, right: 1.0 }];

        let mut mono = [9.0; 2];
        write_interleaved(&frames, &mut mono, 1);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert_eq!(mono[1], 0.0);

        let mut stereo = [9.0; 4];
        write_interleaved(&frames, &mut stereo, 2);
        assert_eq!(stereo, [0.2, 0.4, -1.0, 1.0]);

        let mut quad = [9.0; 8];
        write_interleaved(&frames, &mut quad, 4);
        assert_eq!(quad, [0.2, 0.4, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn audio_stream_smoke() {
        // Actual stream creation requires audio hardware
        if cpal::default_host().default_output_device().is_none() {
            return;
        }
        if let Ok(handle) = start_audio() {
            assert!(handle.sample_rate() > 0);
        }
    }
}
