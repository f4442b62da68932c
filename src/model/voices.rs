use std::collections::HashMap;

use crate::audio::VoiceId;
use crate::shared::PadId;

// Pads with a voice in flight. An entry exists iff that pad's `playing` flag is set;
// the middle layer keeps the two in step.
#[derive(Debug, Default)]
pub struct ActiveVoices {
    voices: HashMap<PadId, VoiceId>,
}

impl ActiveVoices {
    pub fn insert(&mut self, pad: PadId, voice: VoiceId) -> Option<VoiceId> {
        self.voices.insert(pad, voice)
    }

    pub fn get(&self, pad: PadId) -> Option<VoiceId> {
        self.voices.get(&pad).copied()
    }

    pub fn remove(&mut self, pad: PadId) -> Option<VoiceId> {
        self.voices.remove(&pad)
    }

    // only removes if `voice` is still the one registered for `pad`
    pub fn remove_if_current(&mut self, pad: PadId, voice: VoiceId) -> bool {
        if self.get(pad) == Some(voice) {
            self.voices.remove(&pad);
            true
        } else {
            false
        }
    }

    pub fn pads(&self) -> Vec<PadId> {
        self.voices.keys().copied().collect()
    }

    pub fn len(&self) -> usize { self.voices.len() }
    pub fn is_empty(&self) -> bool { self.voices.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::next_voice_id;

    #[test]
    fn stale_voice_does_not_remove_newer_one() {
        let mut voices = ActiveVoices::default();
        let pad = PadId::new(1, 1).unwrap();
        let old = next_voice_id();
        let new = next_voice_id();
        voices.insert(pad, old);
        voices.insert(pad, new);

        assert!(!voices.remove_if_current(pad, old));
        assert_eq!(voices.get(pad), Some(new));
        assert!(voices.remove_if_current(pad, new));
        assert!(voices.is_empty());
    }
}
