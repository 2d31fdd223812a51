use std::path::PathBuf;

use thiserror::Error;
use voxprep_audio::AudioError;

/// Errors returned by the corpus pipeline and manifest builder.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus: {0}")]
    Audio(#[from] AudioError),

    #[error("corpus: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus: walk: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("corpus: {0:?} is not a p<speaker-id> directory")]
    InvalidSpeakerDir(PathBuf),

    #[error("corpus: speaker {0} listed more than once")]
    DuplicateSpeaker(u32),

    #[error("corpus: split fraction {0} outside [0, 1]")]
    InvalidSplit(f64),

    #[error("corpus: progress: {0}")]
    Progress(String),
}

impl CorpusError {
    /// Wraps an I/O error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
