use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::audio_api::{AudioCommand, AudioEvent};
use crate::shared::{PadId, NUM_PADS};

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;
use super::voice_id::VoiceId;

const VOICE_GAIN: f32 = 0.8;

// Lives inside the cpal callback. One voice slot per pad, so "at most one voice per pad"
// holds by construction; a Play on a busy slot replaces the old voice.
pub struct Engine {
    voices: [Option<Voice>; NUM_PADS],
    events_tx: Option<Sender<AudioEvent>>,
    retired_tx: Option<Sender<Arc<SampleBuffer>>>,
}

// Samples leaving the engine go back to the ui thread so a last Arc never
// frees a big buffer inside the callback. Only falls back to dropping here
// if that queue is full.
fn retire(tx: &Option<Sender<Arc<SampleBuffer>>>, voice: Voice) {
    if let Some(tx) = tx {
        let _ = tx.try_send(voice.into_sample());
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            voices: std::array::from_fn(|_| None),
            events_tx: None,
            retired_tx: None,
        }
    }

    pub fn set_events_tx(&mut self, tx: Sender<AudioEvent>) {
        self.events_tx = Some(tx);
    }

    pub fn set_retired_tx(&mut self, tx: Sender<Arc<SampleBuffer>>) {
        self.retired_tx = Some(tx);
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Play { pad, voice, sample } => self.play(pad, voice, sample),
            AudioCommand::Stop { pad, voice } => self.stop(pad, voice),
        }
    }

    fn play(&mut self, pad: PadId, voice: VoiceId, sample: Arc<SampleBuffer>) {
        let replaced = self.voices[pad.index()].replace(Voice::new(voice, sample, VOICE_GAIN));
        if let Some(old) = replaced {
            retire(&self.retired_tx, old);
        }
    }

    // explicit stops never report VoiceEnded
    fn stop(&mut self, pad: PadId, voice: VoiceId) {
        let slot = &mut self.voices[pad.index()];
        if slot.as_ref().is_some_and(|v| v.id == voice) {
            if let Some(old) = slot.take() {
                retire(&self.retired_tx, old);
            }
        }
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_some()).count()
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());

        for (index, slot) in self.voices.iter_mut().enumerate() {
            let Some(voice) = slot.as_mut() else { continue };
            voice.render_into(out);
            if voice.active {
                continue;
            }
            let Some(done) = slot.take() else { continue };
            if let (Some(tx), Some(pad)) = (&self.events_tx, PadId::from_index(index)) {
                let _ = tx.try_send(AudioEvent::VoiceEnded { pad, voice: done.id });
            }
            retire(&self.retired_tx, done);
        }

        for frame in out.iter_mut() {
            frame.left = frame.left.clamp(-1.0, 1.0);
            frame.right = frame.right.clamp(-1.0, 1.0);
        }
    }
}
