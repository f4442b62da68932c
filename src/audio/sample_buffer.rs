use std::path::Path;

use super::frame::StereoFrame;
use crate::error::LoadError;

#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // the audio data array, at the engine's output rate
}

impl SampleBuffer {
    pub fn from_frames(data: Vec<StereoFrame>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    pub fn duration_secs(&self, sample_rate: u32) -> f32 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.data.len() as f32 / sample_rate as f32
    }

    // Load a WAV file from disk, converted to stereo at `target_rate`
    pub fn load_wav(path: &Path, target_rate: u32) -> Result<Self, LoadError> {
        let reader = hound::WavReader::open(path)?;
        Self::from_wav_reader(reader, target_rate)
    }

    pub fn from_wav_reader<R: std::io::Read>(
        mut reader: hound::WavReader<R>,
        target_rate: u32,
    ) -> Result<Self, LoadError> {
        let spec = reader.spec();
        let file_rate = spec.sample_rate;
        let file_channels = spec.channels as usize;
        if file_channels == 0 {
            return Err(LoadError::UnsupportedFormat("wav with zero channels".into()));
        }

        // Read the samples from the WAV file
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader // float, just pass it through
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => { // int, convert to float
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let mut frames: Vec<StereoFrame> = if file_channels == 1 {
            samples
                .into_iter()
                .map(|x| StereoFrame { // mono, duplicate
                    left: x,
                    right: x,
                })
                .collect()
        } else {
            // anything wider than stereo keeps its first two channels
            samples
                .chunks_exact(file_channels)
                .map(|c| StereoFrame {
                    left: c[0],
                    right: c[1],
                })
                .collect()
        };

        if frames.is_empty() {
            return Err(LoadError::Empty);
        }

        if file_rate != target_rate {
            frames = resample_linear(&frames, file_rate, target_rate);
        }

        Ok(Self { data: frames })
    }
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || source_rate == 0 {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        // fractional position in the source buffer
        let src_pos = i as f64 / ratio; // ex. 3.7
        let idx = src_pos.floor() as usize; // ex. 3
        let frac = (src_pos - idx as f64) as f32; // ex. 0.7
        if idx >= frames.len().saturating_sub(1) { // edge case
            out.push(*frames.last().unwrap_or(&StereoFrame::zero()));
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame { // blend via frac and linear interpolation
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn mono_is_duplicated_to_both_sides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_wav(&path, 1, 48_000, &[0, 16384, -16384]);

        let buf = SampleBuffer::load_wav(&path, 48_000).unwrap();
        assert_eq!(buf.len(), 3);
        assert!((buf.data[1].left - 0.5).abs() < 1e-4);
        assert_eq!(buf.data[1].left, buf.data[1].right);
    }

    #[test]
    fn stereo_keeps_channels_apart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, 44_100, &[16384, -16384, 0, 0]);

        let buf = SampleBuffer::load_wav(&path, 44_100).unwrap();
        assert_eq!(buf.len(), 2);
        assert!(buf.data[0].left > 0.0 && buf.data[0].right < 0.0);
    }

    #[test]
    fn resamples_to_the_output_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slow.wav");
        write_wav(&path, 1, 22_050, &vec![1000; 22_050]);

        let buf = SampleBuffer::load_wav(&path, 44_100).unwrap();
        assert_eq!(buf.len(), 44_100);
        assert!((buf.duration_secs(44_100) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn empty_and_garbage_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.wav");
        write_wav(&empty, 1, 44_100, &[]);
        assert!(matches!(SampleBuffer::load_wav(&empty, 44_100), Err(LoadError::Empty)));

        let junk = dir.path().join("junk.wav");
        std::fs::write(&junk, b"definitely not riff").unwrap();
        assert!(matches!(SampleBuffer::load_wav(&junk, 44_100), Err(LoadError::Wav(_))));
    }
}
