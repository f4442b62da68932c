use std::sync::Arc;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice_id::VoiceId;

// One in-flight playback of a pad's sample, from the first frame to the last.
#[derive(Clone, Debug)]
pub struct Voice {
    pub id: VoiceId,
    pub pos: usize,
    pub gain: f32,
    pub active: bool,
    sample: Arc<SampleBuffer>,
}

impl Voice {
    pub fn new(id: VoiceId, sample: Arc<SampleBuffer>, gain: f32) -> Self {
        Self {
            id,
            pos: 0,
            gain,
            active: !sample.is_empty(),
            sample,
        }
    }

    // hands the sample back so the caller decides where it gets freed
    pub fn into_sample(self) -> Arc<SampleBuffer> {
        self.sample
    }

    // mixes this voice into `out`; flips `active` off once the sample runs out
    pub fn render_into(&mut self, out: &mut [StereoFrame]) {
        if !self.active {
            return;
        }
        let data = &self.sample.data;
        let remaining = data.len().saturating_sub(self.pos);
        let n = remaining.min(out.len());

        for (frame, s) in out[..n].iter_mut().zip(&data[self.pos..self.pos + n]) {
            frame.left += s.left * self.gain;
            frame.right += s.right * self.gain;
        }
        self.pos += n;

        if self.pos >= data.len() {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::next_voice_id;

    fn ramp(len: usize) -> Arc<SampleBuffer> {
        Arc::new(SampleBuffer::from_frames(
            (0..len)
                .map(|i| StereoFrame { left: i as f32, right: -(i as f32) })
                .collect(),
        ))
    }

    #[test]
    fn plays_through_and_deactivates() {
        let mut voice = Voice::new(next_voice_id(), ramp(5), 1.0);
        let mut out = vec![StereoFrame::zero(); 3];
        voice.render_into(&mut out);
        assert!(voice.active);
        assert_eq!(out[2].left, 2.0);

        let mut out = vec![StereoFrame::zero(); 3];
        voice.render_into(&mut out);
        assert!(!voice.active);
        assert_eq!(out[1].right, -4.0);
        assert_eq!(out[2], StereoFrame::zero());
    }

    #[test]
    fn mixes_on_top_of_existing_output() {
        let mut voice = Voice::new(next_voice_id(), ramp(2), 0.5);
        let mut out = vec![StereoFrame { left: 1.0, right: 1.0 }; 2];
        voice.render_into(&mut out);
        assert_eq!(out[1].left, 1.5);
        assert_eq!(out[1].right, 0.5);
    }

    #[test]
    fn empty_sample_is_never_active() {
        let voice = Voice::new(next_voice_id(), ramp(0), 1.0);
        assert!(!voice.active);
    }
}
