use std::path::Path;
use std::sync::Arc;

use crate::audio::SampleBuffer;
use crate::error::LoadError;
use crate::model::LoadedSample;

// Load a WAV from disk, decoded and resampled so the engine can play it as-is
pub fn load(path: &Path, target_rate: u32) -> Result<LoadedSample, LoadError> {
    let buffer = SampleBuffer::load_wav(path, target_rate)?;
    let duration_secs = buffer.duration_secs(target_rate);
    Ok(LoadedSample {
        name: display_name(path),
        buffer: Arc::new(buffer),
        duration_secs,
    })
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
