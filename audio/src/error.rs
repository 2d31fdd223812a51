use thiserror::Error;

/// Errors returned by audio decoding, encoding and conversion.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio: wav: {0}")]
    Wav(#[from] hound::Error),

    #[error("audio: io: {0}")]
    Io(#[from] std::io::Error),

    #[error("audio: resample: {0}")]
    Resample(String),

    #[error("audio: unsupported channel count {0}")]
    UnsupportedChannels(u16),

    #[error("audio: unsupported bit depth {0}")]
    UnsupportedBitDepth(u16),

    #[error("audio: track has no format")]
    EmptyTrack,
}

impl From<rubato::ResamplerConstructionError> for AudioError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        AudioError::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for AudioError {
    fn from(e: rubato::ResampleError) -> Self {
        AudioError::Resample(e.to_string())
    }
}
