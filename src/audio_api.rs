pub use crate::audio::{SampleBuffer, VoiceId};
use crate::shared::PadId;
use std::sync::Arc;

// ui thread -> audio thread
#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't load files (interrupts thread), so the sample arrives
    // already decoded and resampled (see loader/sample_loader.rs)
    Play { pad: PadId, voice: VoiceId, sample: Arc<SampleBuffer> },

    // Ignored unless `voice` is still the one playing on `pad`
    Stop { pad: PadId, voice: VoiceId },
}

// audio thread -> ui thread
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    // the sample ran out on its own; never sent after a Stop
    VoiceEnded { pad: PadId, voice: VoiceId },
}
