use thiserror::Error;

// the pad keeps whatever it had when one of these comes back
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode audio: {0}")]
    Wav(#[from] hound::Error),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("file contains no data")]
    Empty,
}

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("MIDI not supported: {0}")]
    Unsupported(#[from] midir::InitError),

    #[error("failed to connect to {port}: {reason}")]
    Connect { port: String, reason: String },
}
